//! # Product Handlers
//!
//! Every read endpoint materializes rows from the repository, then hands
//! them to exactly one catalog view.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  GET /products               list(filter) ─► [order_by_price] ─► Page   │
//! │  GET /products/search/price  list_all     ─► find_by_price             │
//! │  GET /products/top           list_all     ─► top_by_price              │
//! │  GET /products/alphabetical  list_all     ─► alphabetical  ─► Page     │
//! │  GET /products/by-name/{n}   list_all     ─► find_by_name              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Without `order_by_price`, `/products` pages over the repository's id order.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::auth::CurrentUser;
use crate::error::{ApiError, ApiResult};
use crate::extract::{Path, Query};
use crate::AppState;
use emporium_core::catalog::{
    alphabetical, find_by_name, find_by_price, order_by_price, top_by_price,
};
use emporium_core::{
    CoreError, NewProduct, Page, Product, ProductFilter, ProductPatch, DEFAULT_TOP_K,
};

// =============================================================================
// Query Parameters
// =============================================================================

/// `GET /products` query string.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListQuery {
    pub q: Option<String>,
    pub category: Option<String>,
    pub min_price_cents: Option<i64>,
    pub max_price_cents: Option<i64>,
    #[serde(default)]
    pub order_by_price: bool,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl ListQuery {
    fn filter(&self) -> ProductFilter {
        ProductFilter {
            q: self.q.clone(),
            category: self.category.clone(),
            min_price_cents: self.min_price_cents,
            max_price_cents: self.max_price_cents,
        }
    }
}

/// Pagination-only query string.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// `GET /products/search/price` query string.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceQuery {
    pub price_cents: i64,
}

/// `GET /products/top` query string.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TopQuery {
    pub k: Option<i64>,
}

// =============================================================================
// CRUD
// =============================================================================

/// `POST /products`
pub async fn create_product(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Json(input): Json<NewProduct>,
) -> ApiResult<(StatusCode, Json<Product>)> {
    input.validate()?;

    let product = state.db.products().insert(&input).await?;

    info!(product_id = product.id, user_id = user.id, "Product created");
    Ok((StatusCode::CREATED, Json(product)))
}

/// `GET /products`: filtered, optionally ordered by ascending price, paginated.
pub async fn list_products(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<Vec<Product>>> {
    let page = Page::new(query.limit, query.offset)?;

    let products = state.db.products().list(&query.filter()).await?;
    debug!(
        count = products.len(),
        order_by_price = query.order_by_price,
        ?page,
        "Listing products"
    );

    let products = if query.order_by_price {
        order_by_price(&products)
    } else {
        products
    };

    Ok(Json(page.apply(products)))
}

/// `GET /products/{id}`
pub async fn get_product(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Product>> {
    let product = state
        .db
        .products()
        .get_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Product", id))?;

    Ok(Json(product))
}

/// `PUT /products/{id}`: only the fields present in the body change.
pub async fn update_product(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i64>,
    Json(patch): Json<ProductPatch>,
) -> ApiResult<Json<Product>> {
    patch.validate()?;

    let product = state.db.products().update(id, patch).await?;

    info!(product_id = id, user_id = user.id, "Product updated");
    Ok(Json(product))
}

/// `DELETE /products/{id}`
pub async fn delete_product(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    state.db.products().delete(id).await?;

    info!(product_id = id, user_id = user.id, "Product deleted");
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
// Catalog Views
// =============================================================================

/// `GET /products/search/price?price_cents=`
///
/// With several products at that price, any one of them may be returned.
pub async fn search_by_price(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PriceQuery>,
) -> ApiResult<Json<Product>> {
    let products = state.db.products().list_all().await?;

    let product = find_by_price(&products, query.price_cents).ok_or_else(|| {
        CoreError::ProductNotFound(format!("price_cents={}", query.price_cents))
    })?;

    Ok(Json(product))
}

/// `GET /products/top?k=`: most expensive first. `k <= 0` is an empty list.
pub async fn top_products(
    State(state): State<Arc<AppState>>,
    Query(query): Query<TopQuery>,
) -> ApiResult<Json<Vec<Product>>> {
    let k = query.k.unwrap_or(DEFAULT_TOP_K);
    let products = state.db.products().list_all().await?;

    Ok(Json(top_by_price(products, k)))
}

/// `GET /products/alphabetical`: case-insensitive name order, paginated.
pub async fn alphabetical_products(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PageQuery>,
) -> ApiResult<Json<Vec<Product>>> {
    let page = Page::new(query.limit, query.offset)?;
    let products = state.db.products().list_all().await?;

    Ok(Json(page.apply(alphabetical(products))))
}

/// `GET /products/by-name/{name}`: case-insensitive exact name match.
pub async fn product_by_name(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> ApiResult<Json<Product>> {
    let products = state.db.products().list_all().await?;

    let product =
        find_by_name(products, &name).ok_or_else(|| CoreError::ProductNotFound(name.clone()))?;

    Ok(Json(product))
}

// =============================================================================
// Unit Tests
// =============================================================================
