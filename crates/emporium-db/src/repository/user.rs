//! # User Repository
//!
//! Account storage. E-mails are stored exactly as given, so callers
//! normalize them (see `emporium_core::normalize_email`) before both
//! inserting and looking up.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use emporium_core::User;

const USER_COLUMNS: &str = "id, full_name, email, password_hash, created_at";

/// Repository for user database operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    /// Creates a new UserRepository.
    pub fn new(pool: SqlitePool) -> Self {
        UserRepository { pool }
    }

    /// Inserts a user with an already-hashed password.
    ///
    /// ## Returns
    /// * `Ok(User)` - Stored user with its generated id
    /// * `Err(DbError::UniqueViolation)` - E-mail already registered
    pub async fn insert(
        &self,
        full_name: &str,
        email: &str,
        password_hash: &str,
    ) -> DbResult<User> {
        debug!(email = %email, "Inserting user");

        let result = sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (full_name, email, password_hash, created_at)
            VALUES (?1, ?2, ?3, ?4)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(full_name.trim())
        .bind(email)
        .bind(password_hash)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(user) => Ok(user),
            Err(err) => match DbError::from(err) {
                DbError::UniqueViolation { field, .. } => Err(DbError::duplicate(field, email)),
                other => Err(other),
            },
        }
    }

    /// Gets a user by e-mail.
    pub async fn get_by_email(&self, email: &str) -> DbResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = ?1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Gets a user by ID.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }
}
