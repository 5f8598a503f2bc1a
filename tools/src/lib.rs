//! # wmcnf-tools - Testing Utilities for the wmcnf Library
//!
//! An exact weighted model counter for small instances, standing in for an
//! external knowledge compiler and counter in the integration tests, and
//! inference by enumeration as the reference it is checked against.

pub mod count;
pub mod joint;

/// Asserts that two probabilities are equal up to a tolerance (default
/// `1e-9`). This is used in the integration tests.
#[macro_export]
macro_rules! assert_prob {
    ($actual:expr, $expected:expr) => {
        $crate::assert_prob!($actual, $expected, 1e-9)
    };
    ($actual:expr, $expected:expr, $tolerance:expr) => {{
        let actual: f64 = $actual;
        let expected: f64 = $expected;
        assert!(
            (actual - expected).abs() <= $tolerance,
            "probability {actual} differs from expected {expected}"
        );
    }};
}
