//! Trait implementations for `IndexFilter`.

use core::{
    fmt,
    hash::{Hash, Hasher},
    ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign},
};

use crate::IndexFilter;

/// Precondition violations reported by the fallible `try_*` methods of
/// [`IndexFilter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterError {
    /// A position at or beyond the filter capacity.
    OutOfRange {
        /// The rejected position
        position: usize,
        /// The capacity of the filter
        capacity: usize,
    },

    /// A set operation between filters of different capacities.
    CapacityMismatch {
        /// Capacity of the receiving filter
        expected: usize,
        /// Capacity of the offending operand
        found: usize,
    },
}

impl fmt::Display for FilterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange { position, capacity } => {
                write!(
                    f,
                    "position {position} out of range for filter of capacity {capacity}"
                )
            }
            Self::CapacityMismatch { expected, found } => {
                write!(
                    f,
                    "filter capacity mismatch: expected {expected}, found {found}"
                )
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for FilterError {}

impl Default for IndexFilter {
    fn default() -> Self {
        Self::new(0)
    }
}

impl Clone for IndexFilter {
    fn clone(&self) -> Self {
        self.copy()
    }

    fn clone_from(&mut self, source: &Self) {
        self.copy_from(source);
    }
}

impl fmt::Debug for IndexFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        struct Positions<'a>(&'a IndexFilter);

        impl fmt::Debug for Positions<'_> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_set().entries(self.0).finish()
            }
        }

        f.debug_struct("IndexFilter")
            .field("capacity", &self.capacity)
            .field("positions", &Positions(self))
            .finish()
    }
}

impl PartialEq for IndexFilter {
    fn eq(&self, other: &Self) -> bool {
        self.capacity == other.capacity && self.len == other.len && self.words == other.words
    }
}

impl Eq for IndexFilter {}

impl Hash for IndexFilter {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.capacity.hash(state);
        self.words.hash(state);
    }
}

// ============================================================================
// Bitwise Operator Implementations
// ============================================================================

impl BitAnd for &IndexFilter {
    type Output = IndexFilter;

    /// Returns the intersection of two filters of equal capacity.
    ///
    /// # Examples
    ///
    /// ```
    /// use index_filter::IndexFilter;
    ///
    /// let a = IndexFilter::from_positions(4, [0, 1]);
    /// let b = IndexFilter::from_positions(4, [1, 2]);
    ///
    /// let c = &a & &b;
    /// assert!(c.has(1)); // Only position 1 is in both
    /// assert!(!c.has(0));
    /// assert!(!c.has(2));
    /// ```
    #[inline]
    #[track_caller]
    fn bitand(self, rhs: Self) -> Self::Output {
        self.intersection(rhs)
    }
}

impl BitAndAssign<&Self> for IndexFilter {
    #[inline]
    #[track_caller]
    fn bitand_assign(&mut self, rhs: &Self) {
        self.intersection_with(rhs);
    }
}

impl BitOr for &IndexFilter {
    type Output = IndexFilter;

    /// Returns the union of two filters of equal capacity.
    ///
    /// # Examples
    ///
    /// ```
    /// use index_filter::IndexFilter;
    ///
    /// let a = IndexFilter::from_positions(4, [0, 1]);
    /// let b = IndexFilter::from_positions(4, [1, 2]);
    ///
    /// let c = &a | &b;
    /// assert_eq!(c.iter().collect::<Vec<_>>(), [0, 1, 2]);
    /// ```
    #[inline]
    #[track_caller]
    fn bitor(self, rhs: Self) -> Self::Output {
        self.union(rhs)
    }
}

impl BitOrAssign<&Self> for IndexFilter {
    /// Marks every position of `rhs` in place.
    ///
    /// # Examples
    ///
    /// ```
    /// use index_filter::IndexFilter;
    ///
    /// let mut a = IndexFilter::from_positions(4, [0]);
    /// a |= &IndexFilter::from_positions(4, [3]);
    /// assert_eq!(a.len(), 2);
    /// ```
    #[inline]
    #[track_caller]
    fn bitor_assign(&mut self, rhs: &Self) {
        self.union_with(rhs);
    }
}
