//! Forward iteration over the marked positions of an `IndexFilter`.

use core::iter::FusedIterator;

use crate::{IndexFilter, macros::bitpos};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    BeforeStart,
    At(usize),
    Exhausted,
}

/// A forward iterator over the marked positions of an [`IndexFilter`].
///
/// This struct is created by the [`iter`](IndexFilter::iter) method. It
/// yields positions in ascending order, skipping whole zero words at a time,
/// and is single-pass: ask the filter for a fresh iterator to go again.
///
/// Besides [`Iterator`], it exposes the cursor-style interface
/// [`advance`](Self::advance) / [`value`](Self::value) /
/// [`is_exhausted`](Self::is_exhausted). A new iterator sits before the first
/// position until `advance` is called.
///
/// The number of positions left is known exactly at all times, derived from
/// the filter's cardinality and decremented as positions are produced.
///
/// # Examples
///
/// ```
/// use index_filter::IndexFilter;
///
/// let filter = IndexFilter::from_positions(100, [3, 70]);
/// let mut it = filter.iter();
/// assert_eq!(it.len(), 2);
///
/// it.advance();
/// assert_eq!(it.value(), 3);
/// it.advance();
/// assert_eq!(it.value(), 70);
/// it.advance();
/// assert!(it.is_exhausted());
/// ```
#[derive(Clone, Debug)]
pub struct Iter<'a> {
    words: &'a [u64],
    capacity: usize,
    next: usize, // next candidate position
    remaining: usize,
    state: State,
}

impl<'a> Iter<'a> {
    pub(crate) fn new(filter: &'a IndexFilter) -> Self {
        Self {
            words: filter.words(),
            capacity: filter.capacity(),
            next: 0,
            remaining: filter.len(),
            state: State::BeforeStart,
        }
    }

    /// Returns `true` once every marked position has been produced.
    #[must_use]
    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.state == State::Exhausted
    }

    /// Moves to the next marked position and returns it, or returns `None`
    /// and becomes exhausted if there is none.
    pub fn advance(&mut self) -> Option<usize> {
        if self.state == State::Exhausted {
            return None;
        }
        if self.remaining == 0 {
            self.state = State::Exhausted;
            return None;
        }

        let (mut wi, mut bi) = bitpos!(self.next);
        while let Some(word) = self.words.get(wi) {
            let word = *word >> bi;
            if word == 0 {
                // Skip the rest of an empty word at once
                wi += 1;
                bi = 0;
                continue;
            }

            let pos = (word.trailing_zeros() as usize) + bi + wi * 64;
            if pos >= self.capacity {
                break;
            }
            self.next = pos + 1;
            self.remaining -= 1;
            self.state = State::At(pos);
            return Some(pos);
        }

        self.next = self.capacity;
        self.state = State::Exhausted;
        None
    }

    /// Returns the current position.
    ///
    /// # Panics
    ///
    /// Panics if [`advance`](Self::advance) has not been called yet or the
    /// iterator is exhausted.
    #[must_use]
    #[track_caller]
    pub fn value(&self) -> usize {
        match self.state {
            State::At(pos) => pos,
            State::BeforeStart => panic!("index filter iterator read before the first advance"),
            State::Exhausted => panic!("index filter iterator read after exhaustion"),
        }
    }
}

impl Iterator for Iter<'_> {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.advance()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }

    fn count(self) -> usize {
        self.remaining
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl FusedIterator for Iter<'_> {}

impl<'a> IntoIterator for &'a IndexFilter {
    type IntoIter = Iter<'a>;
    type Item = usize;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Extend<usize> for IndexFilter {
    /// Marks every position produced by `iter`.
    ///
    /// # Panics
    ///
    /// Panics if a position is `>= capacity`.
    fn extend<I: IntoIterator<Item = usize>>(&mut self, iter: I) {
        for position in iter {
            self.add(position);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn test_skips_empty_words() {
        let filter = IndexFilter::from_positions(64 * 5, [1, 64 * 4 + 7]);
        let mut it = filter.iter();
        assert_eq!(it.advance(), Some(1));
        assert_eq!(it.advance(), Some(64 * 4 + 7));
        assert_eq!(it.advance(), None);
        assert!(it.is_exhausted());
    }

    #[test]
    fn test_state_transitions() {
        let filter = IndexFilter::from_positions(10, [9]);
        let mut it = filter.iter();
        assert_eq!(it.state, State::BeforeStart);
        assert!(!it.is_exhausted());

        it.advance();
        assert_eq!(it.state, State::At(9));
        it.advance();
        assert_eq!(it.state, State::Exhausted);

        // Stays exhausted
        assert_eq!(it.advance(), None);
        assert_eq!(it.state, State::Exhausted);
    }

    #[test]
    fn test_empty_filter_exhausts_on_first_advance() {
        let filter = IndexFilter::new(0);
        let mut it = filter.iter();
        assert!(!it.is_exhausted());
        assert_eq!(it.advance(), None);
        assert!(it.is_exhausted());
    }

    #[test]
    fn test_remaining_tracks_yields() {
        let filter = IndexFilter::from_positions(130, [0, 64, 65, 129]);
        let mut it = filter.iter();
        assert_eq!(it.len(), 4);
        it.next();
        it.next();
        assert_eq!(it.len(), 2);
        assert_eq!(it.clone().count(), 2);
        assert_eq!(it.collect::<Vec<_>>(), [65, 129]);
    }

    #[test]
    #[should_panic(expected = "before the first advance")]
    fn test_value_before_advance_panics() {
        let filter = IndexFilter::filled(4);
        let _ = filter.iter().value();
    }

    #[test]
    #[should_panic(expected = "after exhaustion")]
    fn test_value_after_exhaustion_panics() {
        let filter = IndexFilter::new(4);
        let mut it = filter.iter();
        it.advance();
        let _ = it.value();
    }
}
