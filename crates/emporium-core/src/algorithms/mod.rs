//! # Ordering & Search Toolkit
//!
//! In-memory algorithms the product endpoints route a materialized record
//! set through. Every function takes the key projection as a plain generic
//! parameter (`F: Fn(&T) -> K`), so the caller decides what a record is
//! ordered by at each call site.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  records (already in memory)                                           │
//! │       │                                                                 │
//! │       ├──► merge_sort ─────────────► ascending, stable                 │
//! │       │        │                                                        │
//! │       │        └──► binary_search_by_key ──► Some(&record) / None       │
//! │       │                                                                 │
//! │       ├──► top_k / BoundedTopK ────► k largest, descending              │
//! │       │                                                                 │
//! │       └──► KeyedTree ──────────────► inorder() / search()               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All structures are built fresh per call and never shared between
//! requests. None of them can fail: a miss is `None`, an empty input gives an
//! empty output.

pub mod binary_search;
pub mod bst;
pub mod merge_sort;
pub mod top_k;

pub use binary_search::binary_search_by_key;
pub use bst::KeyedTree;
pub use merge_sort::merge_sort;
pub use top_k::{top_k, BoundedTopK};
