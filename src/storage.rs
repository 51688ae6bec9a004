//! Word-level helpers for the packed representation.
//!
//! Position `p` lives in word `p / WORD_BITS` at bit `p % WORD_BITS`. The
//! bits of the last word at or beyond the filter capacity are padding and
//! are kept zero by every mutation.

use crate::macros::bitpos;

/// Width in bits of a single storage word.
pub const WORD_BITS: usize = u64::BITS as usize;

/// Number of words needed to hold `capacity` positions.
#[inline(always)]
pub(crate) const fn word_count(capacity: usize) -> usize {
    capacity.div_ceil(WORD_BITS)
}

/// Number of positions used in the last word of a filter of `capacity`.
///
/// A capacity that is an exact multiple of the word width uses the whole
/// last word.
#[inline(always)]
pub(crate) const fn tail_bits(capacity: usize) -> usize {
    let (_, bi) = bitpos!(capacity);
    if bi == 0 { WORD_BITS } else { bi }
}

/// Mask selecting the low `used` bits of a word.
#[inline(always)]
pub(crate) const fn low_mask(used: usize) -> u64 {
    if used >= WORD_BITS {
        !0
    } else {
        (1u64 << used) - 1
    }
}

/// Counts the set bits of `word` below `used`, ignoring padding.
#[inline(always)]
pub(crate) const fn count_ones_below(word: u64, used: usize) -> usize {
    (word & low_mask(used)).count_ones() as usize
}

/// Counts the set bits of a filter's words, masking the padding of the last
/// word against `capacity`.
pub(crate) fn count_ones(words: &[u64], capacity: usize) -> usize {
    let [body @ .., last] = words else {
        return 0;
    };
    let body: usize = body.iter().map(|w| w.count_ones() as usize).sum();
    body + count_ones_below(*last, tail_bits(capacity))
}

/// Zeroes the padding bits of the last word.
#[inline(always)]
pub(crate) fn clear_padding(words: &mut [u64], capacity: usize) {
    if let Some(last) = words.last_mut() {
        *last &= low_mask(tail_bits(capacity));
    }
}
