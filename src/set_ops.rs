//! Implementations of set operations for `IndexFilter`.
//!
//! Every operand must have the same capacity as the receiver. The result
//! cardinality is recounted once the words are combined, ignoring any bits
//! at or beyond the capacity.

use crate::{FilterError, IndexFilter, storage::count_ones};

impl IndexFilter {
    fn check_same_capacity(&self, other: &Self) -> Result<(), FilterError> {
        if self.capacity == other.capacity {
            Ok(())
        } else {
            Err(FilterError::CapacityMismatch {
                expected: self.capacity,
                found: other.capacity,
            })
        }
    }

    #[track_caller]
    fn assert_same_capacity(&self, other: &Self) {
        if let Err(err) = self.check_same_capacity(other) {
            panic!("{err}");
        }
    }

    /// Overwrites every word with `op(a[i], b[i])` and recounts the
    /// cardinality.
    #[inline(always)]
    fn combine_into(&mut self, a: &[u64], b: &[u64], op: impl Fn(u64, u64) -> u64) {
        for (dst, (&x, &y)) in self.words.iter_mut().zip(a.iter().zip(b)) {
            *dst = op(x, y);
        }
        self.len = count_ones(&self.words, self.capacity);
    }

    /// Combines `self` in place with `other` and recounts the cardinality.
    #[inline(always)]
    fn combine_with(&mut self, other: &[u64], op: impl Fn(u64, u64) -> u64) {
        for (dst, &src) in self.words.iter_mut().zip(other) {
            *dst = op(*dst, src);
        }
        self.len = count_ones(&self.words, self.capacity);
    }

    /// Replaces the contents of `self` with the positions marked in `a`,
    /// `b`, or both.
    ///
    /// # Panics
    ///
    /// Panics if `a` or `b` has a different capacity than `self`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use index_filter::IndexFilter;
    /// let a = IndexFilter::from_positions(16, (0..16).step_by(2));
    /// let b = IndexFilter::from_positions(16, (0..16).step_by(3));
    ///
    /// let mut union = IndexFilter::new(16);
    /// union.union_of(&a, &b);
    /// assert_eq!(
    ///     union.iter().collect::<Vec<_>>(),
    ///     [0, 2, 3, 4, 6, 8, 9, 10, 12, 14, 15]
    /// );
    /// assert_eq!(union.len(), 11);
    /// ```
    #[track_caller]
    pub fn union_of(&mut self, a: &Self, b: &Self) {
        self.assert_same_capacity(a);
        self.assert_same_capacity(b);
        self.combine_into(&a.words, &b.words, |x, y| x | y);
    }

    /// Fallible form of [`union_of`](Self::union_of).
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::CapacityMismatch`] if `a` or `b` has a
    /// different capacity than `self`. `self` is left untouched in that case.
    pub fn try_union_of(&mut self, a: &Self, b: &Self) -> Result<(), FilterError> {
        self.check_same_capacity(a)?;
        self.check_same_capacity(b)?;
        self.combine_into(&a.words, &b.words, |x, y| x | y);
        Ok(())
    }

    /// Replaces the contents of `self` with the positions marked in both
    /// `a` and `b`.
    ///
    /// # Panics
    ///
    /// Panics if `a` or `b` has a different capacity than `self`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use index_filter::IndexFilter;
    /// let a = IndexFilter::from_positions(16, (0..16).step_by(2));
    /// let b = IndexFilter::from_positions(16, (0..16).step_by(3));
    ///
    /// let mut both = IndexFilter::filled(16);
    /// both.intersection_of(&a, &b);
    /// assert_eq!(both.iter().collect::<Vec<_>>(), [0, 6, 12]);
    /// ```
    #[track_caller]
    pub fn intersection_of(&mut self, a: &Self, b: &Self) {
        self.assert_same_capacity(a);
        self.assert_same_capacity(b);
        self.combine_into(&a.words, &b.words, |x, y| x & y);
    }

    /// Fallible form of [`intersection_of`](Self::intersection_of).
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::CapacityMismatch`] if `a` or `b` has a
    /// different capacity than `self`. `self` is left untouched in that case.
    pub fn try_intersection_of(&mut self, a: &Self, b: &Self) -> Result<(), FilterError> {
        self.check_same_capacity(a)?;
        self.check_same_capacity(b)?;
        self.combine_into(&a.words, &b.words, |x, y| x & y);
        Ok(())
    }

    /// Marks every position marked in `other`.
    ///
    /// # Panics
    ///
    /// Panics if `other` has a different capacity than `self`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use index_filter::IndexFilter;
    /// let mut a = IndexFilter::from_positions(10, [1]);
    /// let b = IndexFilter::from_positions(10, [1, 8]);
    /// a.union_with(&b);
    /// assert_eq!(a.len(), 2);
    /// ```
    #[track_caller]
    pub fn union_with(&mut self, other: &Self) {
        self.assert_same_capacity(other);
        self.combine_with(&other.words, |x, y| x | y);
    }

    /// Unmarks every position not marked in `other`.
    ///
    /// # Panics
    ///
    /// Panics if `other` has a different capacity than `self`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use index_filter::IndexFilter;
    /// let mut a = IndexFilter::from_positions(10, [1, 4]);
    /// let b = IndexFilter::from_positions(10, [1, 8]);
    /// a.intersection_with(&b);
    /// assert_eq!(a.iter().collect::<Vec<_>>(), [1]);
    /// ```
    #[track_caller]
    pub fn intersection_with(&mut self, other: &Self) {
        self.assert_same_capacity(other);
        self.combine_with(&other.words, |x, y| x & y);
    }

    /// Creates a new filter holding the positions marked in either filter.
    ///
    /// # Panics
    ///
    /// Panics if the capacities differ.
    #[must_use]
    #[track_caller]
    pub fn union(&self, other: &Self) -> Self {
        let mut result = Self::new(self.capacity);
        result.union_of(self, other);
        result
    }

    /// Creates a new filter holding the positions marked in both filters.
    ///
    /// # Panics
    ///
    /// Panics if the capacities differ.
    #[must_use]
    #[track_caller]
    pub fn intersection(&self, other: &Self) -> Self {
        let mut result = Self::new(self.capacity);
        result.intersection_of(self, other);
        result
    }
}
