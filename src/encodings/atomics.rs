//! # "Atomic"/"Trivial" Encodings
//!
//! Implications between cubes (conjunctions of literals) and clauses
//! (disjunctions of literals) that produce a single clause directly.

use std::ops::Not;

use crate::types::{Clause, Lit};

/// Implication of form `(a1 & a2 & ... & an) -> (b1 | b2 | ... | bm)`
#[must_use]
pub fn cube_impl_clause(a: &[Lit], b: &[Lit]) -> Clause {
    let mut cl: Clause = a.iter().copied().map(Not::not).collect();
    cl.extend(b.iter().copied());
    cl
}

#[cfg(test)]
mod tests {
    use crate::{clause, lit};

    #[test]
    fn cube_impl_clause() {
        assert_eq!(
            super::cube_impl_clause(&[lit![0], !lit![1]], &[lit![2], lit![3]]),
            clause![!lit![0], lit![1], lit![2], lit![3]]
        );
    }

    #[test]
    fn empty_sides() {
        assert_eq!(super::cube_impl_clause(&[], &[lit![2]]), clause![lit![2]]);
        assert_eq!(super::cube_impl_clause(&[lit![0]], &[]), clause![!lit![0]]);
        assert_eq!(super::cube_impl_clause(&[], &[]), clause![]);
    }
}
