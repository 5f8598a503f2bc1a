//! # Encodings of Probabilistic Models to Weighted CNF
//!
//! Constraint generators for Bayesian networks ([`bayes`]) and ground
//! probabilistic logic programs ([`program`]), the structural CNF reducer
//! ([`reduce`]) they share, and the small clause-level building blocks
//! ([`atomics`], [`am1`]).

use thiserror::Error;

use crate::instances::DuplicateVariable;

pub mod am1;
pub mod atomics;
pub mod bayes;
pub mod program;
pub mod reduce;

/// Trait for collecting clauses. Mainly used when generating encodings and implemented by
/// [`crate::instances::Cnf`].
pub trait CollectClauses: Extend<crate::types::Clause> {
    /// Gets the number of clauses in the collection
    fn n_clauses(&self) -> usize;
}

/// Trait for encodings that track statistics.
pub trait EncodeStats {
    /// Gets the number of clauses in the encoding
    fn n_clauses(&self) -> usize;

    /// Gets the number of variables in the encoding
    fn n_vars(&self) -> u32;
}

/// Why a probability distribution was rejected
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DistributionIssue {
    /// No probability was given for a state
    #[error("no probability given for state `{0}`")]
    Missing(String),
    /// A probability outside of `[0, 1]`
    #[error("probability {1} of `{0}` is not in [0, 1]")]
    OutOfRange(String, f64),
    /// The probabilities do not sum to one
    #[error("probabilities sum to {0} instead of 1")]
    Sum(f64),
    /// The probabilities sum to more than one
    #[error("probabilities sum to {0}, which exceeds 1")]
    Exceeds(f64),
}

/// Errors from encodings
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// The same proposition was allocated twice, e.g., because of a duplicate
    /// node name
    #[error(transparent)]
    DuplicateVariable(#[from] DuplicateVariable),
    /// A conditional distribution is malformed
    #[error("invalid distribution of `{node}` given [{assignment}]: {issue}")]
    Distribution {
        /// The node or statement the distribution belongs to
        node: String,
        /// The parent assignment of the distribution, if any
        assignment: String,
        /// What is wrong with it
        issue: DistributionIssue,
    },
    /// An atom is used without being declared as a rule head, fact or
    /// alternative of a probabilistic disjunction
    #[error("`{0}` is referenced but never declared")]
    UnresolvedReference(String),
    /// A node or state named in a query or in evidence does not exist
    #[error("unknown state `{state}` of node `{node}`")]
    UnknownState {
        /// Node name
        node: String,
        /// State name
        state: String,
    },
    /// The reducer was handed a formula that is not of a supported shape
    #[error("cannot reduce formula to clauses: {0}")]
    UnsupportedShape(String),
}
