//! `IndexFilter` struct and core implementation.

use alloc::{vec, vec::Vec};

use crate::{
    FilterError,
    iter::Iter,
    macros::{bitpos, trace_alloc},
    storage::{clear_padding, count_ones_below, word_count},
};

/// A fixed-capacity set of positions in `[0, capacity)`, packed into 64-bit
/// words.
///
/// # Overview
///
/// `IndexFilter` is meant for filtering a source collection of known length
/// without growing a result collection element by element: mark the
/// positions that survive, read [`len`](Self::len) to size the result
/// exactly, then replay the marked positions in ascending order with
/// [`iter`](Self::iter).
///
/// # Cardinality
///
/// The number of marked positions is tracked on every mutation, so
/// [`len`](Self::len) is O(1). Only the bulk operations
/// ([`union_of`](Self::union_of), [`intersection_of`](Self::intersection_of)
/// and their in-place forms) recount, and they already visit every word.
///
/// # Allocation
///
/// Construction allocates `ceil(capacity / 64)` words. Marking, unmarking,
/// [`clear`](Self::clear), [`fill`](Self::fill), the set operations and
/// iteration never allocate. [`copy`](Self::copy) allocates, while
/// [`copy_from`](Self::copy_from) and [`resize`](Self::resize) only allocate
/// when the existing buffer is too small.
///
/// # Panics
///
/// Positions outside `[0, capacity)` and set operations between filters of
/// different capacities are caller bugs and panic. The `try_*` methods
/// report the same conditions as a [`FilterError`] instead.
///
/// # Examples
///
/// ```
/// use index_filter::IndexFilter;
///
/// let source = [3, 8, 5, 12, 7, 6];
/// let mut filter = IndexFilter::new(source.len());
/// for (i, v) in source.iter().enumerate() {
///     if v % 2 == 0 {
///         filter.add(i);
///     }
/// }
///
/// let mut evens = Vec::with_capacity(filter.len());
/// evens.extend(filter.iter().map(|i| source[i]));
/// assert_eq!(evens, [8, 12, 6]);
/// ```
pub struct IndexFilter {
    pub(crate) words: Vec<u64>,
    pub(crate) capacity: usize,
    pub(crate) len: usize,
}

impl IndexFilter {
    /// Creates an empty filter with room for `capacity` positions.
    ///
    /// # Examples
    ///
    /// ```
    /// # use index_filter::IndexFilter;
    /// let filter = IndexFilter::new(100);
    /// assert_eq!(filter.capacity(), 100);
    /// assert!(filter.is_empty());
    /// ```
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let words = word_count(capacity);
        trace_alloc!(capacity, words, "allocating index filter");
        Self {
            words: vec![0; words],
            capacity,
            len: 0,
        }
    }

    /// Creates a filter with every position in `[0, capacity)` marked.
    ///
    /// Useful as the starting point of multi-level filtering, where each
    /// stage only removes positions.
    ///
    /// # Examples
    ///
    /// ```
    /// # use index_filter::IndexFilter;
    /// let filter = IndexFilter::filled(20);
    /// assert_eq!(filter.len(), 20);
    /// assert_eq!(filter.iter().last(), Some(19));
    /// ```
    #[must_use]
    pub fn filled(capacity: usize) -> Self {
        let mut filter = Self::new(capacity);
        filter.fill();
        filter
    }

    /// Creates a filter of `capacity` with the given positions marked.
    ///
    /// Repeated positions are marked once.
    ///
    /// # Panics
    ///
    /// Panics if any position is `>= capacity`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use index_filter::IndexFilter;
    /// let filter = IndexFilter::from_positions(8, [6, 0, 2, 4, 2]);
    /// assert_eq!(filter.len(), 4);
    /// assert_eq!(filter.iter().collect::<Vec<_>>(), [0, 2, 4, 6]);
    /// ```
    #[must_use]
    pub fn from_positions(capacity: usize, positions: impl IntoIterator<Item = usize>) -> Self {
        let mut filter = Self::new(capacity);
        filter.extend(positions);
        filter
    }

    /// Returns the exclusive upper bound of valid positions.
    #[must_use]
    #[inline(always)]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the number of marked positions.
    ///
    /// # Examples
    ///
    /// ```
    /// # use index_filter::IndexFilter;
    /// let mut filter = IndexFilter::new(10);
    /// filter.add(3);
    /// filter.add(7);
    /// assert_eq!(filter.len(), 2);
    /// ```
    #[must_use]
    #[inline(always)]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if no position is marked.
    #[must_use]
    #[inline(always)]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the packed words, `ceil(capacity / 64)` of them.
    ///
    /// Bits of the last word at or beyond the capacity are always zero.
    #[must_use]
    #[inline(always)]
    pub fn words(&self) -> &[u64] {
        &self.words
    }

    #[inline(always)]
    fn check_position(&self, position: usize) -> Result<(), FilterError> {
        if position < self.capacity {
            Ok(())
        } else {
            Err(FilterError::OutOfRange {
                position,
                capacity: self.capacity,
            })
        }
    }

    #[track_caller]
    #[inline(always)]
    fn assert_position(&self, position: usize) {
        assert!(
            position < self.capacity,
            "position {position} out of range for filter of capacity {}",
            self.capacity
        );
    }

    /// Marks `position`.
    ///
    /// Returns `true` if the position was newly marked, or `false` if it was
    /// already marked. The cardinality only grows in the first case.
    ///
    /// # Panics
    ///
    /// Panics if `position >= capacity`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use index_filter::IndexFilter;
    /// let mut filter = IndexFilter::new(8);
    /// assert!(filter.add(2));
    /// assert!(!filter.add(2));
    /// assert_eq!(filter.len(), 1);
    /// ```
    #[track_caller]
    #[inline]
    pub fn add(&mut self, position: usize) -> bool {
        self.assert_position(position);
        self.add_unchecked(position)
    }

    /// Marks `position`, reporting an out-of-range position as an error.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::OutOfRange`] if `position >= capacity`.
    pub fn try_add(&mut self, position: usize) -> Result<bool, FilterError> {
        self.check_position(position)?;
        Ok(self.add_unchecked(position))
    }

    #[inline(always)]
    fn add_unchecked(&mut self, position: usize) -> bool {
        let (wi, bi) = bitpos!(position);
        let mask = 1 << bi;
        let word = &mut self.words[wi];
        if *word & mask != 0 {
            return false;
        }
        *word |= mask;
        self.len += 1;
        true
    }

    /// Unmarks `position`.
    ///
    /// Returns `true` if the position was marked. Unmarking a position that
    /// is not marked is a no-op.
    ///
    /// # Panics
    ///
    /// Panics if `position >= capacity`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use index_filter::IndexFilter;
    /// let mut filter = IndexFilter::from_positions(8, [5]);
    /// assert!(filter.delete(5));
    /// assert!(!filter.delete(5));
    /// assert!(filter.is_empty());
    /// ```
    #[track_caller]
    #[inline]
    pub fn delete(&mut self, position: usize) -> bool {
        self.assert_position(position);
        self.delete_unchecked(position)
    }

    /// Unmarks `position`, reporting an out-of-range position as an error.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::OutOfRange`] if `position >= capacity`.
    pub fn try_delete(&mut self, position: usize) -> Result<bool, FilterError> {
        self.check_position(position)?;
        Ok(self.delete_unchecked(position))
    }

    #[inline(always)]
    fn delete_unchecked(&mut self, position: usize) -> bool {
        let (wi, bi) = bitpos!(position);
        let mask = 1 << bi;
        let word = &mut self.words[wi];
        if *word & mask == 0 {
            return false;
        }
        *word &= !mask;
        self.len -= 1;
        true
    }

    /// Returns `true` if `position` is marked.
    ///
    /// # Panics
    ///
    /// Panics if `position >= capacity`.
    #[must_use]
    #[track_caller]
    #[inline]
    pub fn has(&self, position: usize) -> bool {
        self.assert_position(position);
        self.has_unchecked(position)
    }

    /// Returns whether `position` is marked, reporting an out-of-range
    /// position as an error.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::OutOfRange`] if `position >= capacity`.
    pub fn try_has(&self, position: usize) -> Result<bool, FilterError> {
        self.check_position(position)?;
        Ok(self.has_unchecked(position))
    }

    #[inline(always)]
    fn has_unchecked(&self, position: usize) -> bool {
        let (wi, bi) = bitpos!(position);
        (self.words[wi] >> bi) & 1 != 0
    }

    /// Unmarks every position.
    pub fn clear(&mut self) {
        self.words.fill(0);
        self.len = 0;
    }

    /// Marks every position in `[0, capacity)`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use index_filter::IndexFilter;
    /// let mut filter = IndexFilter::new(20);
    /// filter.fill();
    /// assert_eq!(filter.len(), 20);
    /// assert_eq!(filter.words(), [(1u64 << 20) - 1]);
    /// ```
    pub fn fill(&mut self) {
        self.words.fill(!0);
        clear_padding(&mut self.words, self.capacity);
        self.len = self.capacity;
    }

    /// Unmarks every marked position for which `f` returns `false`.
    ///
    /// Positions are visited in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// # use index_filter::IndexFilter;
    /// let mut filter = IndexFilter::filled(10);
    /// filter.retain(|i| i % 3 == 0);
    /// assert_eq!(filter.iter().collect::<Vec<_>>(), [0, 3, 6, 9]);
    /// assert_eq!(filter.len(), 4);
    /// ```
    pub fn retain<F>(&mut self, mut f: F)
    where
        F: FnMut(usize) -> bool,
    {
        for (wi, word) in self.words.iter_mut().enumerate() {
            let mut rem = *word;
            while rem != 0 {
                let rel = rem.trailing_zeros() as usize;
                let nmask = !(1 << rel);
                if !f(wi * 64 + rel) {
                    *word &= nmask;
                    self.len -= 1;
                }
                rem &= nmask;
            }
        }
    }

    /// Returns an independent filter with the same capacity and marks.
    ///
    /// # Examples
    ///
    /// ```
    /// # use index_filter::IndexFilter;
    /// let original = IndexFilter::from_positions(16, [1, 2]);
    /// let mut copy = original.copy();
    /// copy.add(9);
    /// assert_eq!(original.len(), 2);
    /// assert_eq!(copy.len(), 3);
    /// ```
    #[must_use]
    pub fn copy(&self) -> Self {
        let mut filter = Self::new(self.capacity);
        filter.copy_from(self);
        filter
    }

    /// Makes `self` an exact copy of `other`, resizing as needed.
    ///
    /// The existing word buffer is reused when it is large enough.
    ///
    /// # Examples
    ///
    /// ```
    /// # use index_filter::IndexFilter;
    /// let source = IndexFilter::from_positions(40, [0, 39]);
    /// let mut target = IndexFilter::filled(100);
    /// target.copy_from(&source);
    /// assert_eq!(target.capacity(), 40);
    /// assert_eq!(target.iter().collect::<Vec<_>>(), [0, 39]);
    /// ```
    pub fn copy_from(&mut self, other: &Self) {
        self.reserve_words(other.words.len());
        self.words.clone_from(&other.words);
        self.capacity = other.capacity;
        self.len = other.len;
    }

    /// Changes the capacity in place.
    ///
    /// A new word buffer is only allocated when the required word count
    /// exceeds the allocated one. Marks below the new capacity are kept and
    /// newly exposed positions are unmarked, so the cardinality stays exact.
    ///
    /// # Examples
    ///
    /// ```
    /// # use index_filter::IndexFilter;
    /// let mut filter = IndexFilter::from_positions(100, [10, 50, 90]);
    /// filter.resize(60);
    /// assert_eq!(filter.len(), 2);
    ///
    /// filter.resize(200);
    /// assert_eq!(filter.len(), 2);
    /// assert!(!filter.has(90));
    /// assert!(!filter.has(150));
    /// ```
    pub fn resize(&mut self, capacity: usize) {
        if capacity == self.capacity {
            return;
        }

        let new_words = word_count(capacity);
        if capacity < self.capacity {
            self.len -= self.count_from(capacity);
            self.words.truncate(new_words);
            clear_padding(&mut self.words, capacity);
        } else {
            self.reserve_words(new_words);
            self.words.resize(new_words, 0);
        }
        self.capacity = capacity;
    }

    /// Counts the marked positions at or beyond `from`.
    fn count_from(&self, from: usize) -> usize {
        let (wi, bi) = bitpos!(from);
        let Some(first) = self.words.get(wi) else {
            return 0;
        };
        let head = (first.count_ones() as usize) - count_ones_below(*first, bi);
        let rest: usize = self.words[wi + 1..]
            .iter()
            .map(|w| w.count_ones() as usize)
            .sum();
        head + rest
    }

    fn reserve_words(&mut self, words: usize) {
        if let Some(additional) = words.checked_sub(self.words.len())
            && self.words.capacity() < words
        {
            trace_alloc!(
                capacity = self.capacity,
                words,
                "growing index filter storage"
            );
            self.words.reserve_exact(additional);
        }
    }

    /// Returns an iterator over the marked positions in ascending order.
    ///
    /// The iterator borrows the filter, so the filter cannot be mutated
    /// while it is alive.
    ///
    /// # Examples
    ///
    /// ```
    /// # use index_filter::IndexFilter;
    /// let filter = IndexFilter::from_positions(8, [0, 2, 4, 6]);
    /// assert_eq!(filter.iter().collect::<Vec<_>>(), [0, 2, 4, 6]);
    /// ```
    #[must_use]
    #[inline]
    pub fn iter(&self) -> Iter<'_> {
        Iter::new(self)
    }
}
