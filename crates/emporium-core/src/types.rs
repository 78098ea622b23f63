//! # Domain Types
//!
//! Core domain types used throughout Emporium.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │      User       │   │  ProductFilter  │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (i64)       │   │  id (i64)       │   │  q (name LIKE)  │       │
//! │  │  name           │   │  full_name      │   │  category       │       │
//! │  │  category       │   │  email (unique) │   │  min/max price  │       │
//! │  │  price_cents    │   │  password_hash  │   └─────────────────┘       │
//! │  └─────────────────┘   └─────────────────┘                              │
//! │                                                                         │
//! │  NewProduct / ProductPatch / NewUser: validated inputs                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Prices are integer cents. Integer keys are totally ordered, which is what
//! the sort/search/top-K toolkit needs from a key.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::validation::{
    validate_category, validate_email, validate_full_name, validate_password,
    validate_price_cents, validate_product_name, ValidationResult,
};

// =============================================================================
// Product
// =============================================================================

/// A product in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Product {
    /// Database identifier.
    pub id: i64,

    /// Display name.
    pub name: String,

    /// Free-form category label ("" when uncategorized).
    pub category: String,

    /// Price in cents (smallest currency unit).
    pub price_cents: i64,

    /// When the product was created.
    pub created_at: DateTime<Utc>,

    /// When the product was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Applies the provided fields of a patch.
    pub fn apply(&mut self, patch: ProductPatch) {
        if let Some(name) = patch.name {
            self.name = name.trim().to_string();
        }
        if let Some(category) = patch.category {
            self.category = category.trim().to_string();
        }
        if let Some(price_cents) = patch.price_cents {
            self.price_cents = price_cents;
        }
    }
}

/// Input for creating a product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    #[serde(default)]
    pub category: String,
    pub price_cents: i64,
}

impl NewProduct {
    /// Validates every field.
    pub fn validate(&self) -> ValidationResult<()> {
        validate_product_name(&self.name)?;
        validate_category(&self.category)?;
        validate_price_cents(self.price_cents)
    }
}

/// Partial update for a product. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub category: Option<String>,
    pub price_cents: Option<i64>,
}

impl ProductPatch {
    /// Validates the fields that are present.
    pub fn validate(&self) -> ValidationResult<()> {
        if let Some(name) = &self.name {
            validate_product_name(name)?;
        }
        if let Some(category) = &self.category {
            validate_category(category)?;
        }
        if let Some(price_cents) = self.price_cents {
            validate_price_cents(price_cents)?;
        }
        Ok(())
    }

    /// Returns true if the patch would not change anything.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.category.is_none() && self.price_cents.is_none()
    }
}

/// Storage-side filters for listing products.
///
/// These are applied by the record source before any in-memory ordering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductFilter {
    /// Case-insensitive substring match on the product name.
    pub q: Option<String>,
    /// Exact category match.
    pub category: Option<String>,
    /// Inclusive lower price bound.
    pub min_price_cents: Option<i64>,
    /// Inclusive upper price bound.
    pub max_price_cents: Option<i64>,
}

// =============================================================================
// User
// =============================================================================

/// A registered account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct User {
    pub id: i64,
    pub full_name: String,
    pub email: String,
    /// Argon2 PHC string. Never serialized.
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Registration input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    pub full_name: String,
    pub email: String,
    pub password: String,
}

impl NewUser {
    /// Validates every field.
    pub fn validate(&self) -> ValidationResult<()> {
        validate_full_name(&self.full_name)?;
        validate_email(&self.email)?;
        validate_password(&self.password)
    }

    /// E-mail in the form it is stored and looked up by.
    pub fn normalized_email(&self) -> String {
        normalize_email(&self.email)
    }
}

/// Trims and lowercases an e-mail address.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_product() -> Product {
        let now = Utc::now();
        Product {
            id: 1,
            name: "Desk Lamp".to_string(),
            category: "home".to_string(),
            price_cents: 2599,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_patch_only_touches_present_fields() {
        let mut product = sample_product();
        product.apply(ProductPatch {
            price_cents: Some(1999),
            ..Default::default()
        });

        assert_eq!(product.price_cents, 1999);
        assert_eq!(product.name, "Desk Lamp");
        assert_eq!(product.category, "home");
    }

    #[test]
    fn test_patch_trims_strings() {
        let mut product = sample_product();
        product.apply(ProductPatch {
            name: Some("  Floor Lamp ".to_string()),
            ..Default::default()
        });
        assert_eq!(product.name, "Floor Lamp");
    }

    #[test]
    fn test_patch_validation() {
        assert!(ProductPatch::default().validate().is_ok());
        assert!(ProductPatch::default().is_empty());

        let bad_price = ProductPatch {
            price_cents: Some(-1),
            ..Default::default()
        };
        assert!(bad_price.validate().is_err());

        let blank_name = ProductPatch {
            name: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(blank_name.validate().is_err());
    }

    #[test]
    fn test_new_product_category_defaults_to_empty() {
        let input: NewProduct =
            serde_json::from_str(r#"{"name":"Mug","price_cents":800}"#).unwrap();
        assert_eq!(input.category, "");
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_password_hash_not_serialized() {
        let user = User {
            id: 7,
            full_name: "Ana Souza".to_string(),
            email: "ana@example.com".to_string(),
            password_hash: "$argon2id$secret".to_string(),
            created_at: Utc::now(),
        };
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("password_hash"));
        assert!(!json.contains("secret"));
    }

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  Ana@Example.COM "), "ana@example.com");
    }
}
