//! # Pairwise At-Most-1 Encoding
//!
//! One binary clause per unordered pair of input literals. Quadratic in the
//! number of inputs but needs no auxiliary variables.
//!
//! ## References
//!
//! - Steven D. Prestwich: _CNF Encodings_, in Handbook of Satisfiability 2021.

use super::Encode;
use crate::{
    clause,
    encodings::{CollectClauses, EncodeStats},
    instances::ManageVars,
    types::Lit,
};

/// Implementation of the pairwise at-most-1 encoding.
#[derive(Default, Debug, Clone)]
pub struct Pairwise {
    /// Input literals
    in_lits: Vec<Lit>,
    /// The number of clauses in the encoding
    n_clauses: usize,
}

impl Encode for Pairwise {
    fn encode<Col>(&mut self, collector: &mut Col, _var_manager: &mut dyn ManageVars)
    where
        Col: CollectClauses,
    {
        let prev_clauses = collector.n_clauses();
        let lits = &self.in_lits;
        let clause_iter = (0..lits.len()).flat_map(|first| {
            (first + 1..lits.len()).map(move |second| clause![!lits[first], !lits[second]])
        });
        collector.extend(clause_iter);
        self.n_clauses = collector.n_clauses() - prev_clauses;
    }
}

impl EncodeStats for Pairwise {
    fn n_clauses(&self) -> usize {
        self.n_clauses
    }

    fn n_vars(&self) -> u32 {
        0
    }
}

impl From<Vec<Lit>> for Pairwise {
    fn from(lits: Vec<Lit>) -> Self {
        Self {
            in_lits: lits,
            n_clauses: Default::default(),
        }
    }
}

impl FromIterator<Lit> for Pairwise {
    fn from_iter<T: IntoIterator<Item = Lit>>(iter: T) -> Self {
        Self {
            in_lits: Vec::from_iter(iter),
            n_clauses: Default::default(),
        }
    }
}
