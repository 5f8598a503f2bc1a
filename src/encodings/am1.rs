//! # CNF Encodings for At-Most-1 Constraints
//!
//! Mutual exclusion of the states of a node and of the alternatives of a
//! probabilistic disjunction are at-most-1 constraints. The domains involved
//! are small, so the [`Pairwise`] encoding is the default.
//!
//! ## Example Usage
//!
//! ```
//! use wmcnf::{
//!     encodings::am1::{self, Encode},
//!     instances::{Cnf, KeyedVarManager},
//!     lit,
//! };
//!
//! let mut var_manager = KeyedVarManager::<String>::new();
//!
//! let mut encoder = am1::Pairwise::from(vec![lit![0], lit![1], lit![2]]);
//! let mut encoding = Cnf::new();
//! encoder.encode(&mut encoding, &mut var_manager);
//! assert_eq!(encoding.len(), 3);
//! ```

use crate::{
    encodings::{CollectClauses, EncodeStats},
    instances::ManageVars,
    types::{Clause, Lit},
};

mod pairwise;
pub use pairwise::Pairwise;

/// Trait for all at-most-1 encodings
pub trait Encode: EncodeStats {
    /// Encodes and enforces the at-most-1 constraint
    fn encode<Col>(&mut self, collector: &mut Col, var_manager: &mut dyn ManageVars)
    where
        Col: CollectClauses;
}

/// The default at-most-1 encoding. For now this is a [`Pairwise`] encoding.
pub type DefAm1 = Pairwise;

/// Encodes that exactly one of the literals holds: an at-least-1 clause
/// followed by the default at-most-1 encoding
pub fn exactly_one<Col>(lits: &[Lit], collector: &mut Col, var_manager: &mut dyn ManageVars)
where
    Col: CollectClauses,
{
    collector.extend([lits.iter().copied().collect::<Clause>()]);
    DefAm1::from(lits.to_vec()).encode(collector, var_manager);
}

#[cfg(test)]
mod tests {
    use crate::{
        clause,
        instances::{Cnf, KeyedVarManager},
        lit,
    };

    #[test]
    fn exactly_one() {
        let mut cnf = Cnf::new();
        let mut vm = KeyedVarManager::<String>::new();
        super::exactly_one(&[lit![0], lit![1], lit![2]], &mut cnf, &mut vm);
        assert_eq!(cnf.len(), 4);
        assert_eq!(cnf[0], clause![lit![0], lit![1], lit![2]]);
        assert_eq!(cnf[1], clause![!lit![0], !lit![1]]);
    }

    #[test]
    fn exactly_one_single() {
        let mut cnf = Cnf::new();
        let mut vm = KeyedVarManager::<String>::new();
        super::exactly_one(&[lit![0]], &mut cnf, &mut vm);
        assert_eq!(cnf.len(), 1);
        assert_eq!(cnf[0], clause![lit![0]]);
    }
}
