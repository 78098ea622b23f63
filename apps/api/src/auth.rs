//! JWT authentication module.
//!
//! Handles access token generation and validation, and the bearer-token
//! extractor that protected handlers take as an argument.
//!
//! ```text
//! POST /auth/login ──► verify password ──► JwtManager::generate_access_token
//!                                                   │
//!                                   {"access_token": "...", "token_type": "bearer"}
//!
//! GET /auth/me
//!   Authorization: Bearer <token>
//!        │
//!        ▼
//!   CurrentUser::from_request_parts
//!        ├── extract_bearer_token   (401 if missing)
//!        ├── JwtManager::validate   (401 if bad/expired)
//!        └── users().get_by_id(sub) (401 if user is gone)
//! ```

use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, TokenData, Validation};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::error::ApiError;
use crate::AppState;
use emporium_core::User;

/// JWT claims structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user id)
    pub sub: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration (Unix timestamp)
    pub exp: i64,

    /// JWT ID (unique identifier for this token)
    pub jti: String,
}

impl Claims {
    /// User id carried in `sub`.
    pub fn user_id(&self) -> Result<i64, ApiError> {
        self.sub
            .parse()
            .map_err(|_| ApiError::unauthorized("Invalid token subject"))
    }
}

/// JWT token manager (HS256).
pub struct JwtManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_lifetime_secs: i64,
}

impl JwtManager {
    /// Create a new JWT manager.
    pub fn new(secret: &str, access_lifetime_secs: i64) -> Self {
        JwtManager {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            access_lifetime_secs,
        }
    }

    /// Generate an access token for `user_id`.
    pub fn generate_access_token(&self, user_id: i64) -> Result<String, ApiError> {
        let now = Utc::now();
        let exp = Duration::try_seconds(self.access_lifetime_secs)
            .and_then(|lifetime| now.checked_add_signed(lifetime))
            .ok_or_else(|| ApiError::internal("Token lifetime out of range"))?;

        let claims = Claims {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
            jti: Uuid::new_v4().to_string(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| ApiError::internal(format!("Failed to generate token: {}", e)))
    }

    /// Validate and decode a token.
    pub fn validate_token(&self, token: &str) -> Result<Claims, ApiError> {
        let token_data: TokenData<Claims> =
            decode(token, &self.decoding_key, &Validation::default()).map_err(|e| {
                debug!(error = %e, "Rejected token");
                ApiError::unauthorized("Could not validate credentials")
            })?;

        Ok(token_data.claims)
    }
}

/// Extract bearer token from authorization header.
pub fn extract_bearer_token(auth_header: &str) -> Option<&str> {
    auth_header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// The authenticated user behind a request's bearer token.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl FromRequestParts<Arc<AppState>> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(extract_bearer_token)
            .ok_or_else(|| ApiError::unauthorized("Not authenticated"))?;

        let claims = state.jwt.validate_token(token)?;
        let user_id = claims.user_id()?;

        let user = state
            .db
            .users()
            .get_by_id(user_id)
            .await?
            .ok_or_else(|| ApiError::unauthorized("Could not validate credentials"))?;

        Ok(CurrentUser(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::test_support::test_state;
    use axum::http::Request;

    #[test]
    fn test_jwt_roundtrip() {
        let manager = JwtManager::new("test-secret", 3600);
        let token = manager.generate_access_token(42).unwrap();

        let claims = manager.validate_token(&token).unwrap();
        assert_eq!(claims.sub, "42");
        assert_eq!(claims.user_id().unwrap(), 42);
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn test_unique_token_ids() {
        let manager = JwtManager::new("test-secret", 3600);
        let a = manager.validate_token(&manager.generate_access_token(1).unwrap()).unwrap();
        let b = manager.validate_token(&manager.generate_access_token(1).unwrap()).unwrap();
        assert_ne!(a.jti, b.jti);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let issuer = JwtManager::new("secret-a", 3600);
        let verifier = JwtManager::new("secret-b", 3600);
        let token = issuer.generate_access_token(1).unwrap();

        let err = verifier.validate_token(&token).unwrap_err();
        assert_eq!(err.code, ErrorCode::Unauthorized);
    }

    #[test]
    fn test_expired_token_rejected() {
        let manager = JwtManager::new("test-secret", -3600);
        let token = manager.generate_access_token(1).unwrap();
        assert!(manager.validate_token(&token).is_err());
    }

    #[test]
    fn test_out_of_range_lifetime_is_an_error() {
        let manager = JwtManager::new("test-secret", i64::MAX);
        let err = manager.generate_access_token(1).unwrap_err();
        assert_eq!(err.code, ErrorCode::Internal);
    }

    #[test]
    fn test_extract_bearer_token() {
        assert_eq!(extract_bearer_token("Bearer abc.def"), Some("abc.def"));
        assert_eq!(extract_bearer_token("Bearer "), None);
        assert_eq!(extract_bearer_token("Basic abc"), None);
        assert_eq!(extract_bearer_token("abc"), None);
    }

    fn parts_with_auth(value: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/auth/me");
        if let Some(value) = value {
            builder = builder.header(AUTHORIZATION, value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[tokio::test]
    async fn test_current_user_extractor() {
        let state = test_state().await;
        let user = state
            .db
            .users()
            .insert("Ana", "ana@example.com", "hash")
            .await
            .unwrap();
        let token = state.jwt.generate_access_token(user.id).unwrap();

        let mut parts = parts_with_auth(Some(&format!("Bearer {token}")));
        let CurrentUser(found) = CurrentUser::from_request_parts(&mut parts, &state)
            .await
            .unwrap();
        assert_eq!(found.id, user.id);
    }

    #[tokio::test]
    async fn test_current_user_rejections() {
        let state = test_state().await;

        let mut missing = parts_with_auth(None);
        let err = CurrentUser::from_request_parts(&mut missing, &state)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::Unauthorized);

        let mut garbage = parts_with_auth(Some("Bearer not-a-jwt"));
        let err = CurrentUser::from_request_parts(&mut garbage, &state)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::Unauthorized);

        // Valid signature, but the user doesn't exist
        let token = state.jwt.generate_access_token(999).unwrap();
        let mut orphan = parts_with_auth(Some(&format!("Bearer {token}")));
        let err = CurrentUser::from_request_parts(&mut orphan, &state)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::Unauthorized);
    }
}
