//! # Common Types for Weighted CNF Encodings
//!
//! Common types used throughout the library to guarantee type safety.

use std::{fmt, ops};

pub mod constraints;
pub use constraints::Clause;

pub mod formula;
pub use formula::Formula;

pub mod weights;
pub use weights::{Weight, WeightTable};

/// The hash map to use throughout the library
#[cfg(feature = "fxhash")]
pub type RsHashMap<K, V> = rustc_hash::FxHashMap<K, V>;
#[cfg(not(feature = "fxhash"))]
pub type RsHashMap<K, V> = std::collections::HashMap<K, V>;

/// Type representing a boolean proposition of an encoded model. Variable
/// indexing starts from 0 internally; the DIMACS identifier of a variable is
/// its index plus one. The maximum index is `(u32::MAX - 1) / 2` since
/// literals are represented as a single `u32` as well.
#[derive(Hash, Eq, PartialEq, PartialOrd, Clone, Copy, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct Var {
    idx: u32,
}

impl Var {
    /// The maximum index that can be represented.
    pub const MAX_IDX: u32 = (u32::MAX - 1) / 2;

    /// Creates a new variable with a given index.
    /// Indices start from 0.
    ///
    /// # Panics
    ///
    /// If `idx > Var::MAX_IDX`.
    #[must_use]
    pub fn new(idx: u32) -> Var {
        assert!(idx <= Var::MAX_IDX, "variable index too high");
        Var { idx }
    }

    /// Creates a literal that is not negated.
    ///
    /// # Examples
    ///
    /// ```
    /// use wmcnf::types::{Lit, Var};
    ///
    /// let var = Var::new(5);
    /// assert_eq!(Lit::positive(5), var.pos_lit());
    /// ```
    #[inline]
    #[must_use]
    pub fn pos_lit(self) -> Lit {
        Lit::represent(self.idx, false)
    }

    /// Creates a negated literal.
    #[inline]
    #[must_use]
    pub fn neg_lit(self) -> Lit {
        Lit::represent(self.idx, true)
    }

    /// Creates a literal with the given polarity
    #[inline]
    #[must_use]
    pub fn lit(self, value: bool) -> Lit {
        Lit::represent(self.idx, !value)
    }

    /// Returns the index of the variable as a `usize` for indexing data structures
    #[inline]
    #[must_use]
    pub fn idx(&self) -> usize {
        self.idx as usize
    }

    /// Returns the 32 bit index of the variable
    #[inline]
    #[must_use]
    pub fn idx32(&self) -> u32 {
        self.idx
    }

    /// Converts the variable to its DIMACS identifier, i.e., `idx + 1`
    ///
    /// # Examples
    ///
    /// ```
    /// use wmcnf::var;
    ///
    /// assert_eq!(var![0].to_dimacs(), 1);
    /// ```
    #[inline]
    #[must_use]
    pub fn to_dimacs(self) -> u32 {
        self.idx + 1
    }
}

/// Incrementing variables
impl ops::Add<u32> for Var {
    type Output = Var;

    fn add(self, rhs: u32) -> Self::Output {
        Var {
            idx: self.idx + rhs,
        }
    }
}

/// Variables are printed with their DIMACS identifier
impl fmt::Display for Var {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "x{}", self.to_dimacs())
    }
}

/// More easily creates variables. Mainly used in tests.
///
/// # Examples
///
/// ```
/// use wmcnf::{var, types::Var};
///
/// assert_eq!(var![42], Var::new(42));
/// ```
#[macro_export]
macro_rules! var {
    ($v:expr) => {
        $crate::types::Var::new($v)
    };
}

/// Type representing literals, possibly negated boolean variables.
#[derive(Hash, Eq, PartialEq, PartialOrd, Ord, Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct Lit {
    /// Literal representation is `idx << 1` with the last bit representing
    /// whether the literal is negated or not.
    lidx: u32,
}

impl Lit {
    #[inline]
    fn represent(idx: u32, negated: bool) -> Lit {
        Lit {
            lidx: (idx << 1) + u32::from(negated),
        }
    }

    /// Creates a new (negated or not) literal with a given index.
    ///
    /// # Panics
    ///
    /// If `idx > Var::MAX_IDX`.
    #[must_use]
    pub fn new(idx: u32, negated: bool) -> Lit {
        assert!(idx <= Var::MAX_IDX, "variable index too high");
        Lit::represent(idx, negated)
    }

    /// Creates a new positive literal with a given index.
    #[inline]
    #[must_use]
    pub fn positive(idx: u32) -> Lit {
        Lit::new(idx, false)
    }

    /// Creates a new negated literal with a given index.
    #[inline]
    #[must_use]
    pub fn negative(idx: u32) -> Lit {
        Lit::new(idx, true)
    }

    /// Gets the variable index of the literal
    #[inline]
    #[must_use]
    pub fn vidx(&self) -> usize {
        (self.lidx >> 1) as usize
    }

    /// Gets the variable that the literal corresponds to.
    ///
    /// # Examples
    ///
    /// ```
    /// use wmcnf::types::{Lit, Var};
    ///
    /// assert_eq!(Var::new(5), Lit::negative(5).var());
    /// ```
    #[inline]
    #[must_use]
    pub fn var(&self) -> Var {
        Var {
            idx: self.lidx >> 1,
        }
    }

    /// True if the literal is positive.
    #[inline]
    #[must_use]
    pub fn is_pos(&self) -> bool {
        (self.lidx & 1u32) == 0
    }

    /// True if the literal is negated.
    #[inline]
    #[must_use]
    pub fn is_neg(&self) -> bool {
        (self.lidx & 1u32) == 1
    }

    /// Converts the literal to a signed DIMACS integer
    ///
    /// # Examples
    ///
    /// ```
    /// use wmcnf::lit;
    ///
    /// assert_eq!(lit![2].to_dimacs(), 3);
    /// assert_eq!((!lit![2]).to_dimacs(), -3);
    /// ```
    #[must_use]
    pub fn to_dimacs(self) -> i64 {
        let id = i64::from(self.var().to_dimacs());
        if self.is_neg() {
            -id
        } else {
            id
        }
    }
}

/// Negates literals with the `!` operator.
impl ops::Not for Lit {
    type Output = Lit;

    #[inline]
    fn not(self) -> Lit {
        Lit {
            lidx: self.lidx ^ 1u32,
        }
    }
}

impl fmt::Display for Lit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_neg() {
            write!(f, "~{}", self.var())
        } else {
            write!(f, "{}", self.var())
        }
    }
}

/// More easily creates literals. Mainly used in tests.
///
/// # Examples
///
/// ```
/// use wmcnf::{lit, types::Lit};
///
/// assert_eq!(lit![42], Lit::positive(42));
/// assert_eq!(!lit![42], Lit::negative(42));
/// ```
#[macro_export]
macro_rules! lit {
    ($l:expr) => {
        $crate::types::Lit::positive($l)
    };
}
