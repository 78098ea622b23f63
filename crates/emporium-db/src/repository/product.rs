//! # Product Repository
//!
//! Database operations for products.
//!
//! ## Key Operations
//! - Filtered listing (name substring, category, price bounds)
//! - CRUD operations
//!
//! ## Filtering
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ProductFilter { q: "lamp", category: "home", min: 1000, max: None }   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SELECT ... FROM products WHERE 1 = 1                                  │
//! │    AND instr(lower(name), lower(?)) > 0    ← q                         │
//! │    AND category = ?                         ← category                  │
//! │    AND price_cents >= ?                     ← min_price_cents           │
//! │  ORDER BY id                                                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Vec<Product> in insertion order ──► catalog ordering in memory        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tracing::debug;

use crate::error::{DbError, DbResult};
use emporium_core::{NewProduct, Product, ProductFilter, ProductPatch};

const PRODUCT_COLUMNS: &str = "id, name, category, price_cents, created_at, updated_at";

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = ProductRepository::new(pool);
/// let lamps = repo.list(&ProductFilter { q: Some("lamp".into()), ..Default::default() }).await?;
/// let product = repo.get_by_id(42).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Lists products matching `filter`, in insertion order.
    ///
    /// Blank `q` and `category` values are ignored.
    pub async fn list(&self, filter: &ProductFilter) -> DbResult<Vec<Product>> {
        debug!(?filter, "Listing products");

        let mut query: QueryBuilder<Sqlite> =
            QueryBuilder::new(format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE 1 = 1"));

        if let Some(q) = filter.q.as_deref().map(str::trim).filter(|q| !q.is_empty()) {
            query
                .push(" AND instr(lower(name), lower(")
                .push_bind(q.to_string())
                .push(")) > 0");
        }
        if let Some(category) = filter
            .category
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
        {
            query.push(" AND category = ").push_bind(category.to_string());
        }
        if let Some(min) = filter.min_price_cents {
            query.push(" AND price_cents >= ").push_bind(min);
        }
        if let Some(max) = filter.max_price_cents {
            query.push(" AND price_cents <= ").push_bind(max);
        }
        query.push(" ORDER BY id");

        let products = query
            .build_query_as::<Product>()
            .fetch_all(&self.pool)
            .await?;

        debug!(count = products.len(), "Listing returned products");
        Ok(products)
    }

    /// Lists every product, in insertion order.
    pub async fn list_all(&self) -> DbResult<Vec<Product>> {
        self.list(&ProductFilter::default()).await
    }

    /// Gets a product by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - Product found
    /// * `Ok(None)` - Product not found
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Inserts a new product and returns the stored row.
    ///
    /// Name and category are stored trimmed. Validation is the caller's job.
    pub async fn insert(&self, input: &NewProduct) -> DbResult<Product> {
        let name = input.name.trim();
        debug!(name = %name, price_cents = input.price_cents, "Inserting product");

        let now = Utc::now();

        let product = sqlx::query_as::<_, Product>(&format!(
            r#"
            INSERT INTO products (name, category, price_cents, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?4)
            RETURNING {PRODUCT_COLUMNS}
            "#
        ))
        .bind(name)
        .bind(input.category.trim())
        .bind(input.price_cents)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(product)
    }

    /// Applies `patch` to the product with `id` and returns the updated row.
    ///
    /// ## Returns
    /// * `Err(DbError::NotFound)` - Product doesn't exist
    pub async fn update(&self, id: i64, patch: ProductPatch) -> DbResult<Product> {
        debug!(id, ?patch, "Updating product");

        let mut product = self
            .get_by_id(id)
            .await?
            .ok_or_else(|| DbError::not_found("Product", id))?;

        if patch.is_empty() {
            return Ok(product);
        }

        product.apply(patch);
        product.updated_at = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE products SET
                name = ?2,
                category = ?3,
                price_cents = ?4,
                updated_at = ?5
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(&product.name)
        .bind(&product.category)
        .bind(product.price_cents)
        .bind(product.updated_at)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(product)
    }

    /// Permanently deletes a product.
    ///
    /// ## Returns
    /// * `Err(DbError::NotFound)` - Product doesn't exist
    pub async fn delete(&self, id: i64) -> DbResult<()> {
        debug!(id, "Deleting product");

        let result = sqlx::query("DELETE FROM products WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }

    /// Counts all products (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::{Database, DbConfig};
    use emporium_core::{NewProduct, ProductFilter, ProductPatch};

    async fn seeded() -> Database {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.products();
        for (name, category, price_cents) in [
            ("Desk Lamp", "home", 2599),
            ("Floor LAMP", "home", 8999),
            ("Notebook", "office", 450),
            ("Stapler", "office", 1299),
        ] {
            repo.insert(&NewProduct {
                name: name.to_string(),
                category: category.to_string(),
                price_cents,
            })
            .await
            .unwrap();
        }
        db
    }

    fn names(products: &[emporium_core::Product]) -> Vec<&str> {
        products.iter().map(|p| p.name.as_str()).collect()
    }

    #[tokio::test]
    async fn test_insert_assigns_id_and_trims() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let product = db
            .products()
            .insert(&NewProduct {
                name: "  Mug ".to_string(),
                category: " kitchen".to_string(),
                price_cents: 800,
            })
            .await
            .unwrap();

        assert!(product.id > 0);
        assert_eq!(product.name, "Mug");
        assert_eq!(product.category, "kitchen");

        let fetched = db.products().get_by_id(product.id).await.unwrap().unwrap();
        assert_eq!(fetched, product);
    }

    #[tokio::test]
    async fn test_list_keeps_insertion_order() {
        let db = seeded().await;
        let all = db.products().list_all().await.unwrap();
        assert_eq!(names(&all), vec!["Desk Lamp", "Floor LAMP", "Notebook", "Stapler"]);
        assert_eq!(db.products().count().await.unwrap(), 4);
    }

    #[tokio::test]
    async fn test_list_filters() {
        let db = seeded().await;
        let repo = db.products();

        let lamps = repo
            .list(&ProductFilter {
                q: Some("lamp".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(names(&lamps), vec!["Desk Lamp", "Floor LAMP"]);

        let office = repo
            .list(&ProductFilter {
                category: Some("office".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(names(&office), vec!["Notebook", "Stapler"]);

        let mid = repo
            .list(&ProductFilter {
                min_price_cents: Some(1000),
                max_price_cents: Some(3000),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(names(&mid), vec!["Desk Lamp", "Stapler"]);

        let blank = repo
            .list(&ProductFilter {
                q: Some("   ".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(blank.len(), 4);
    }

    #[tokio::test]
    async fn test_update_applies_patch() {
        let db = seeded().await;
        let repo = db.products();

        let updated = repo
            .update(
                1,
                ProductPatch {
                    price_cents: Some(1999),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.price_cents, 1999);
        assert_eq!(updated.name, "Desk Lamp");

        let fetched = repo.get_by_id(1).await.unwrap().unwrap();
        assert_eq!(fetched.price_cents, 1999);
    }

    #[tokio::test]
    async fn test_update_and_delete_missing() {
        let db = seeded().await;
        let repo = db.products();

        let err = repo.update(999, ProductPatch::default()).await.unwrap_err();
        assert!(matches!(err, crate::DbError::NotFound { .. }));

        let err = repo.delete(999).await.unwrap_err();
        assert!(matches!(err, crate::DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_delete() {
        let db = seeded().await;
        let repo = db.products();

        repo.delete(2).await.unwrap();
        assert!(repo.get_by_id(2).await.unwrap().is_none());
        assert_eq!(repo.count().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_negative_price_rejected_by_schema() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let result = db
            .products()
            .insert(&NewProduct {
                name: "Broken".to_string(),
                category: String::new(),
                price_cents: -5,
            })
            .await;
        assert!(matches!(result, Err(crate::DbError::QueryFailed(_))));
    }
}
