//! # Emporium API
//!
//! HTTP server for the product catalog.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        API Server                                       │
//! │                                                                         │
//! │  Client ───► axum Router ───► handlers ───► emporium-db (filter)        │
//! │                                   │                                     │
//! │                                   ▼                                     │
//! │                          emporium_core::catalog                         │
//! │                     (merge sort / binary search /                       │
//! │                      bounded top-K / name tree)                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Routes
//! | Method | Path                         | Auth   |
//! |--------|------------------------------|--------|
//! | GET    | `/health`                    |        |
//! | POST   | `/auth/register`             |        |
//! | POST   | `/auth/login`                |        |
//! | GET    | `/auth/me`                   | bearer |
//! | GET    | `/products`                  |        |
//! | POST   | `/products`                  | bearer |
//! | GET    | `/products/{id}`             |        |
//! | PUT    | `/products/{id}`             | bearer |
//! | DELETE | `/products/{id}`             | bearer |
//! | GET    | `/products/search/price`     |        |
//! | GET    | `/products/top`              |        |
//! | GET    | `/products/alphabetical`     |        |
//! | GET    | `/products/by-name/{name}`   |        |

pub mod auth;
pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod password;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;

use crate::auth::JwtManager;
use crate::config::ApiConfig;
use emporium_db::Database;

pub use error::{ApiError, ApiResult, ErrorCode};

/// Shared application state.
pub struct AppState {
    pub db: Database,
    pub jwt: JwtManager,
    pub config: ApiConfig,
}

impl AppState {
    /// Builds state from loaded configuration and an open database.
    pub fn new(config: ApiConfig, db: Database) -> Self {
        let jwt = JwtManager::new(&config.jwt_secret, config.access_token_lifetime_secs());
        AppState { db, jwt, config }
    }
}

/// Builds the application router.
pub fn router(state: Arc<AppState>) -> Router {
    use handlers::{auth, health, products};

    Router::new()
        .route("/health", get(health::health))
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/me", get(auth::me))
        .route(
            "/products",
            get(products::list_products).post(products::create_product),
        )
        .route("/products/search/price", get(products::search_by_price))
        .route("/products/top", get(products::top_products))
        .route("/products/alphabetical", get(products::alphabetical_products))
        .route("/products/by-name/{name}", get(products::product_by_name))
        .route(
            "/products/{id}",
            get(products::get_product)
                .put(products::update_product)
                .delete(products::delete_product),
        )
        .with_state(state)
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use emporium_db::DbConfig;

    /// State backed by a fresh in-memory database.
    pub async fn test_state() -> Arc<AppState> {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let config = ApiConfig {
            jwt_secret: "test-secret".to_string(),
            ..ApiConfig::default()
        };
        Arc::new(AppState::new(config, db))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_router_builds() {
        // Conflicting routes panic at construction
        let _ = router(test_support::test_state().await);
    }
}
