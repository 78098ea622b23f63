//! # emporium-core: Pure Logic for Emporium
//!
//! This crate holds everything in the Emporium backend that can be expressed
//! as a pure function: domain types, input validation, and the in-memory
//! ordering/search toolkit that the product endpoints route records through.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Emporium Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    apps/api (axum)                              │   │
//! │  │    /auth/*  ──►  /products  ──►  /products/top  ──►  ...        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ emporium-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌────────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │ algorithms │  │  catalog  │  │ validation│  │   │
//! │  │   │  Product  │  │ merge sort │  │ price /   │  │   rules   │  │   │
//! │  │   │   User    │  │ top-k, bst │  │ name view │  │  checks   │  │   │
//! │  │   └───────────┘  └────────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                emporium-db (Database Layer)                     │   │
//! │  │              SQLite queries, migrations, repositories           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, User, filters, patches)
//! - [`algorithms`] - Merge sort, binary search, bounded top-K, keyed BST
//! - [`catalog`] - Routes a materialized product list through one algorithm
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation
//!
//! ## Example Usage
//!
//! ```rust
//! use emporium_core::algorithms::{binary_search_by_key, merge_sort};
//!
//! let prices = vec![30, 10, 20, 20];
//! let sorted = merge_sort(&prices, |p| *p);
//! assert_eq!(sorted, vec![10, 20, 20, 30]);
//!
//! assert_eq!(binary_search_by_key(&sorted, &20, |p| *p), Some(&20));
//! assert_eq!(binary_search_by_key(&sorted, &25, |p| *p), None);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod algorithms;
pub mod catalog;
pub mod error;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use algorithms::{binary_search_by_key, merge_sort, top_k, BoundedTopK, KeyedTree};
pub use catalog::Page;
pub use error::{CoreError, ValidationError};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Default page size for product listings.
pub const DEFAULT_PAGE_LIMIT: usize = 50;

/// Largest page a client may request.
pub const MAX_PAGE_LIMIT: usize = 200;

/// Default `k` for the top-priced products view.
pub const DEFAULT_TOP_K: i64 = 10;
