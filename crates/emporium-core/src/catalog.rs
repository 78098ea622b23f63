//! # Catalog Views
//!
//! Each product endpoint pulls a candidate set from the record source and
//! routes it through exactly one algorithm here.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  GET /products?order_by_price  ──► order_by_price ──► paginate          │
//! │  GET /products/search/price    ──► find_by_price  (sort + bsearch)      │
//! │  GET /products/top             ──► top_by_price   (bounded min-heap)    │
//! │  GET /products/alphabetical    ──► alphabetical   (BST in-order)        │
//! │  GET /products/by-name/{name}  ──► find_by_name   (BST search)          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The same key projection is used to sort and to search, including the
//! case-folding applied to names.

use serde::{Deserialize, Serialize};

use crate::algorithms::{binary_search_by_key, merge_sort, top_k, KeyedTree};
use crate::error::ValidationError;
use crate::types::Product;
use crate::validation::ValidationResult;
use crate::{DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};

// =============================================================================
// Keys
// =============================================================================

/// Price key.
pub fn price_key(product: &Product) -> i64 {
    product.price_cents
}

/// Name key: trimmed and case-folded.
pub fn name_key(name: &str) -> String {
    name.trim().to_lowercase()
}

// =============================================================================
// Views
// =============================================================================

/// Products ordered by ascending price, ties in their original order.
pub fn order_by_price(products: &[Product]) -> Vec<Product> {
    merge_sort(products, price_key)
}

/// Any product priced exactly `price_cents`.
///
/// With several products at that price, which one comes back is unspecified.
pub fn find_by_price(products: &[Product], price_cents: i64) -> Option<Product> {
    let sorted = order_by_price(products);
    binary_search_by_key(&sorted, &price_cents, price_key).cloned()
}

/// The `k` most expensive products, most expensive first.
///
/// A non-positive `k` yields an empty list.
pub fn top_by_price(products: Vec<Product>, k: i64) -> Vec<Product> {
    let k = usize::try_from(k).unwrap_or(0);
    top_k(products, k, price_key)
}

/// Builds a name-keyed tree. A later product whose folded name matches an
/// earlier one replaces it.
pub fn name_index(products: Vec<Product>) -> KeyedTree<String, Product> {
    products
        .into_iter()
        .map(|product| (name_key(&product.name), product))
        .collect()
}

/// Products in ascending (case-insensitive) name order, one per distinct name.
pub fn alphabetical(products: Vec<Product>) -> Vec<Product> {
    name_index(products).into_inorder()
}

/// The product whose folded name equals the folded `name`.
pub fn find_by_name(products: Vec<Product>, name: &str) -> Option<Product> {
    name_index(products).search(name_key(name).as_str()).cloned()
}

// =============================================================================
// Pagination
// =============================================================================

/// Offset/limit window applied after ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub limit: usize,
    pub offset: usize,
}

impl Default for Page {
    fn default() -> Self {
        Page {
            limit: DEFAULT_PAGE_LIMIT,
            offset: 0,
        }
    }
}

impl Page {
    /// Builds a page from optional query values, applying defaults.
    ///
    /// ## Rules
    /// - `limit` between 1 and 200 (default 50)
    /// - `offset` >= 0 (default 0)
    pub fn new(limit: Option<i64>, offset: Option<i64>) -> ValidationResult<Self> {
        let limit = limit.unwrap_or(DEFAULT_PAGE_LIMIT as i64);
        if limit < 1 || limit > MAX_PAGE_LIMIT as i64 {
            return Err(ValidationError::OutOfRange {
                field: "limit".to_string(),
                min: 1,
                max: MAX_PAGE_LIMIT as i64,
            });
        }

        let offset = offset.unwrap_or(0);
        let offset = usize::try_from(offset).map_err(|_| ValidationError::OutOfRange {
            field: "offset".to_string(),
            min: 0,
            max: i64::MAX,
        })?;

        Ok(Page {
            limit: limit as usize,
            offset,
        })
    }

    /// Returns the window of `items` this page covers.
    pub fn apply<T>(&self, items: Vec<T>) -> Vec<T> {
        items.into_iter().skip(self.offset).take(self.limit).collect()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
