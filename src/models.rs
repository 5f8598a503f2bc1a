//! # Probabilistic Models
//!
//! In-memory representations of the models the encoders consume: Bayesian
//! networks with conditional probability tables ([`network`]) and ground
//! probabilistic logic programs ([`program`]). Both are built through small
//! builder APIs by a front end and are read-only input to the encoders.

use thiserror::Error;

pub mod network;
pub use network::{BayesNet, Cpd, Node, NodeId};

pub mod program;
pub use program::{AnnotatedDisjunction, BodyLit, GroundProgram, ProbFact, Rule, Statement};

/// Errors detected while building a model
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// A parent was referenced before being added
    #[error("parent `{parent}` of `{node}` is not a node of the network")]
    UnknownParent {
        /// The node being added
        node: String,
        /// The missing parent
        parent: String,
    },
    /// A node id that does not belong to the network
    #[error("node id {0} is out of range")]
    UnknownNode(usize),
    /// A node without states
    #[error("node `{0}` has no states")]
    NoStates(String),
    /// A state name appearing twice for the same node
    #[error("state `{state}` of node `{node}` is declared twice")]
    DuplicateState {
        /// Node name
        node: String,
        /// State name
        state: String,
    },
    /// A state name that is not declared for a node
    #[error("node `{node}` has no state `{state}`")]
    UnknownState {
        /// Node name
        node: String,
        /// State name
        state: String,
    },
    /// A table or parent assignment of the wrong size
    #[error("expected {expected} entries for `{node}`, found {found}")]
    WrongLength {
        /// Node name
        node: String,
        /// Expected number of entries
        expected: usize,
        /// Given number of entries
        found: usize,
    },
    /// A disjunction without alternatives
    #[error("probabilistic disjunction without alternatives")]
    EmptyDisjunction,
}
