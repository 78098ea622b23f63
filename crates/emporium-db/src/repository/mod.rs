//! # Repository Module
//!
//! Database repository implementations for Emporium.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  HTTP handler                                                           │
//! │       │                                                                 │
//! │       │  db.products().list(&filter)                                   │
//! │       ▼                                                                 │
//! │  ProductRepository                    UserRepository                   │
//! │  ├── list(&self, filter)              ├── insert(&self, ...)           │
//! │  ├── get_by_id(&self, id)             ├── get_by_email(&self, email)   │
//! │  ├── insert(&self, input)             └── get_by_id(&self, id)         │
//! │  ├── update(&self, id, patch)                                          │
//! │  └── delete(&self, id)                                                 │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Repositories only filter. Ordering for the catalog views happens in
//! `emporium_core::catalog` on the materialized rows.

pub mod product;
pub mod user;
