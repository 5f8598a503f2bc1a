//! # Clauses
//!
//! The clause type every encoding in this library ultimately produces.

use std::{fmt, ops};

use itertools::Itertools;

use super::Lit;

/// Type representing a clause, a disjunction of literals.
/// Wrapper around a std collection to allow for changing the data structure.
/// The literal order is kept as generated: duplicate literals are harmless
/// and are not removed.
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Default, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Clause {
    lits: Vec<Lit>,
}

impl Clause {
    /// Creates a new empty clause
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a literal to the clause
    pub fn add(&mut self, lit: Lit) {
        self.lits.push(lit);
    }

    /// Gets the length of the clause
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.lits.len()
    }

    /// Checks if the clause is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lits.is_empty()
    }

    /// Gets an iterator over the clause
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Lit> {
        self.lits.iter()
    }
}

impl ops::Index<usize> for Clause {
    type Output = Lit;

    fn index(&self, index: usize) -> &Self::Output {
        &self.lits[index]
    }
}

impl Extend<Lit> for Clause {
    fn extend<T: IntoIterator<Item = Lit>>(&mut self, iter: T) {
        self.lits.extend(iter);
    }
}

impl IntoIterator for Clause {
    type Item = Lit;

    type IntoIter = std::vec::IntoIter<Lit>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.lits.into_iter()
    }
}

impl<'a> IntoIterator for &'a Clause {
    type Item = &'a Lit;

    type IntoIter = std::slice::Iter<'a, Lit>;

    fn into_iter(self) -> Self::IntoIter {
        self.lits.iter()
    }
}

impl FromIterator<Lit> for Clause {
    fn from_iter<T: IntoIterator<Item = Lit>>(iter: T) -> Self {
        Self {
            lits: Vec::from_iter(iter),
        }
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({})", self.iter().format("|"))
    }
}

impl fmt::Debug for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({})", self.iter().format("|"))
    }
}

/// Creates a clause from a list of literals
#[macro_export]
macro_rules! clause {
    () => {
        $crate::types::Clause::new()
    };
    ( $($l:expr),* ) => {
        {
            let mut tmp_clause = $crate::types::Clause::new();
            $(
                tmp_clause.add($l);
            )*
            tmp_clause
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::{clause, lit};

    #[test]
    fn keeps_generation_order() {
        let cl = clause![lit![2], !lit![0], lit![2]];
        assert_eq!(cl.len(), 3);
        assert_eq!(cl[0], lit![2]);
        assert_eq!(cl[1], !lit![0]);
    }

    #[test]
    fn extend_and_collect() {
        let mut cl: super::Clause = [lit![0], lit![1]].into_iter().collect();
        cl.extend([!lit![1]]);
        assert_eq!(cl, clause![lit![0], lit![1], !lit![1]]);
        assert!(!cl.is_empty());
    }

    #[test]
    fn display() {
        let cl = clause![lit![0], !lit![1]];
        assert_eq!(format!("{cl}"), "(x1|~x2)");
    }
}
