//! # Propositional Formulas
//!
//! The formulas constraint generators emit before CNF reduction. Only the
//! connectives the generators need are represented; reduction to clauses
//! happens in [`crate::encodings::reduce`].

use std::fmt;

use itertools::Itertools;

use super::Lit;

/// A propositional formula over literals
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Formula {
    /// A single literal
    Lit(Lit),
    /// Conjunction; the empty conjunction is true
    And(Vec<Formula>),
    /// Disjunction; the empty disjunction is false
    Or(Vec<Formula>),
    /// Negation
    Not(Box<Formula>),
    /// Implication `lhs -> rhs`
    Implies(Box<Formula>, Box<Formula>),
    /// Equivalence `lhs <-> rhs`
    Equiv(Box<Formula>, Box<Formula>),
}

impl Formula {
    /// Conjunction of literals
    pub fn cube<I: IntoIterator<Item = Lit>>(lits: I) -> Formula {
        Formula::And(lits.into_iter().map(Formula::Lit).collect())
    }

    /// Disjunction of literals
    pub fn clause<I: IntoIterator<Item = Lit>>(lits: I) -> Formula {
        Formula::Or(lits.into_iter().map(Formula::Lit).collect())
    }

    /// Negation of a formula
    #[must_use]
    pub fn negate(self) -> Formula {
        Formula::Not(Box::new(self))
    }

    /// Implication `self -> rhs`
    #[must_use]
    pub fn implies(self, rhs: Formula) -> Formula {
        Formula::Implies(Box::new(self), Box::new(rhs))
    }

    /// Equivalence `self <-> rhs`
    #[must_use]
    pub fn equiv(self, rhs: Formula) -> Formula {
        Formula::Equiv(Box::new(self), Box::new(rhs))
    }
}

impl From<Lit> for Formula {
    fn from(lit: Lit) -> Self {
        Formula::Lit(lit)
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Formula::Lit(l) => write!(f, "{l}"),
            Formula::And(subs) if subs.is_empty() => write!(f, "true"),
            Formula::And(subs) => write!(f, "({})", subs.iter().format(" & ")),
            Formula::Or(subs) if subs.is_empty() => write!(f, "false"),
            Formula::Or(subs) => write!(f, "({})", subs.iter().format(" | ")),
            Formula::Not(sub) => write!(f, "!{sub}"),
            Formula::Implies(lhs, rhs) => write!(f, "({lhs} -> {rhs})"),
            Formula::Equiv(lhs, rhs) => write!(f, "({lhs} <-> {rhs})"),
        }
    }
}
