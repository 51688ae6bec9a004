//! A fixed-capacity, word-packed set of positions for allocation-light
//! filtering.
//!
//! This crate provides [`IndexFilter`], a bit set over the positions
//! `[0, capacity)` of some source collection. Instead of pushing surviving
//! elements into a growing result, mark the positions that survive, size the
//! result once from [`IndexFilter::len`], and replay the marked positions in
//! ascending order. A whole filtering pass then costs two allocations: one
//! word per 64 source elements for the filter, and the exactly-sized result.
//!
//! # Features
//!
//! - **Exact cardinality** maintained on every mutation, O(1) to query
//! - **Set operations** (union, intersection) between filters of equal
//!   capacity
//! - **Storage reuse** through [`IndexFilter::copy_from`] and
//!   [`IndexFilter::resize`]
//! - **Word-skipping iterator** with an exact remaining length
//! - **`no_std` support** with `alloc`
//!
//! # Examples
//!
//! ```
//! use index_filter::IndexFilter;
//!
//! let words = ["apple", "kiwi", "banana", "fig", "cherry"];
//!
//! // Mark the positions that survive
//! let mut filter = IndexFilter::new(words.len());
//! for (i, w) in words.iter().enumerate() {
//!     if w.len() > 4 {
//!         filter.add(i);
//!     }
//! }
//!
//! // One exactly-sized allocation for the result
//! let mut long = Vec::with_capacity(filter.len());
//! for i in &filter {
//!     long.push(words[i]);
//! }
//! assert_eq!(long, ["apple", "banana", "cherry"]);
//! ```
//!
//! # Multi-level filtering
//!
//! Start from a filled filter and let each stage remove positions:
//!
//! ```
//! use index_filter::IndexFilter;
//!
//! let mut filter = IndexFilter::filled(100);
//! filter.retain(|i| i % 2 == 0);
//! filter.retain(|i| i % 5 == 0);
//! assert_eq!(filter.len(), 10);
//! ```
//!
//! # Cargo features
//!
//! - `std` (default): implements `std::error::Error` for [`FilterError`].
//! - `tracing`: emits `tracing` trace events when word storage is allocated
//!   or grown.

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

extern crate alloc;

// Module declarations
mod filter;
mod iter;
mod macros;
mod set_ops;
mod storage;
mod traits;

// Re-exports
pub use filter::IndexFilter;
pub use iter::Iter;
pub use storage::WORD_BITS;
pub use traits::FilterError;
