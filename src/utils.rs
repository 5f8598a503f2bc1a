//! # Library-Internal Utilities

use itertools::Itertools;

/// Gets an iterator over all assignments to domains of the given sizes in
/// lexicographic order with the first position varying slowest
///
/// An empty sequence of domains has exactly one (empty) assignment, a domain
/// of size zero has no assignments.
pub(crate) fn assignments(radices: &[usize]) -> impl Iterator<Item = Vec<usize>> {
    radices
        .iter()
        .map(|&radix| 0..radix)
        .multi_cartesian_product()
}

/// Gets the position of an assignment in the order of [`assignments`]
pub(crate) fn assignment_index(radices: &[usize], assignment: &[usize]) -> usize {
    debug_assert_eq!(radices.len(), assignment.len());
    radices
        .iter()
        .zip(assignment)
        .fold(0, |idx, (&radix, &val)| idx * radix + val)
}

/// Checks whether two floats are equal up to the given tolerance
#[inline]
pub(crate) fn approx_eq(a: f64, b: f64, tolerance: f64) -> bool {
    (a - b).abs() <= tolerance
}

#[cfg(test)]
mod tests {
    use super::{assignment_index, assignments};

    #[test]
    fn lexicographic_order() {
        let all: Vec<_> = assignments(&[2, 3]).collect();
        assert_eq!(
            all,
            vec![
                vec![0, 0],
                vec![0, 1],
                vec![0, 2],
                vec![1, 0],
                vec![1, 1],
                vec![1, 2]
            ]
        );
        for (idx, asgn) in all.iter().enumerate() {
            assert_eq!(assignment_index(&[2, 3], asgn), idx);
        }
    }

    #[test]
    fn no_domains() {
        let all: Vec<_> = assignments(&[]).collect();
        assert_eq!(all, vec![Vec::<usize>::new()]);
        assert_eq!(assignment_index(&[], &[]), 0);
    }

    #[test]
    fn empty_domain() {
        assert_eq!(assignments(&[2, 0, 3]).count(), 0);
    }

    #[test]
    fn single_value_domains() {
        assert_eq!(assignments(&[1, 1, 1]).count(), 1);
    }
}
