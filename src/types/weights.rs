//! # Literal Weights
//!
//! Weighted model counting assigns independent weights to both literals of a
//! variable. The weight table stores these pairs by variable index.

use std::fmt;

use super::Var;

/// The weights of the positive and the negative literal of a variable
#[derive(Clone, Copy, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Weight {
    /// Weight of the positive literal
    pub pos: f64,
    /// Weight of the negative literal
    pub neg: f64,
}

impl Weight {
    /// The weight of a variable that carries no probability
    pub const NEUTRAL: Weight = Weight { pos: 1., neg: 1. };

    /// Creates a new weight pair
    #[must_use]
    pub fn new(pos: f64, neg: f64) -> Self {
        Self { pos, neg }
    }

    /// Gets the weight of the literal with the given polarity
    #[inline]
    #[must_use]
    pub fn of(&self, value: bool) -> f64 {
        if value {
            self.pos
        } else {
            self.neg
        }
    }
}

impl Default for Weight {
    fn default() -> Self {
        Weight::NEUTRAL
    }
}

impl fmt::Display for Weight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.pos, self.neg)
    }
}

/// Mapping from variables to literal weights. Variables that were never
/// assigned a weight have the neutral weight `(1, 1)`.
#[derive(Clone, PartialEq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeightTable {
    weights: Vec<Option<Weight>>,
}

impl WeightTable {
    /// Creates an empty weight table
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a weight table for `n_vars` variables, all unassigned
    #[must_use]
    pub fn with_vars(n_vars: u32) -> Self {
        Self {
            weights: vec![None; n_vars as usize],
        }
    }

    /// Sets the weight of a variable, growing the table if needed
    pub fn set(&mut self, var: Var, weight: Weight) {
        if var.idx() >= self.weights.len() {
            self.weights.resize(var.idx() + 1, None);
        }
        self.weights[var.idx()] = Some(weight);
    }

    /// Gets the weight of a variable, defaulting to the neutral weight
    #[must_use]
    pub fn get(&self, var: Var) -> Weight {
        self.weights
            .get(var.idx())
            .copied()
            .flatten()
            .unwrap_or(Weight::NEUTRAL)
    }

    /// Gets the number of variables covered by the table
    #[must_use]
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// Checks if the table is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Iterates over the weights of the first `n_vars` variables in index
    /// order, filling in neutral weights where none was assigned
    pub fn iter(&self, n_vars: u32) -> impl Iterator<Item = (Var, Weight)> + '_ {
        (0..n_vars).map(|idx| {
            let var = Var::new(idx);
            (var, self.get(var))
        })
    }
}
