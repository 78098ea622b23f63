//! # Auth Handlers
//!
//! ```text
//! register ──► validate ──► normalize e-mail ──► argon2 hash ──► users.insert
//! login    ──► users.get_by_email ──► verify ──► JWT
//! me       ──► CurrentUser extractor
//! ```
//!
//! E-mails are trimmed and lowercased before they are stored or looked up.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::auth::CurrentUser;
use crate::error::{ApiError, ApiResult};
use crate::password::{hash_password, verify_password};
use crate::AppState;
use emporium_core::{normalize_email, NewUser, User};

/// Login form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Issued access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

/// `POST /auth/register`
///
/// ## Returns
/// * `201` - The new user (without the password hash)
/// * `400` - E-mail already registered
/// * `422` - Invalid input
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(input): Json<NewUser>,
) -> ApiResult<(StatusCode, Json<User>)> {
    input.validate()?;

    let email = input.normalized_email();
    let users = state.db.users();

    if users.get_by_email(&email).await?.is_some() {
        debug!(email = %email, "Registration with existing e-mail");
        return Err(ApiError::bad_request("Email already registered"));
    }

    let password_hash = hash_password(&input.password)?;
    let user = users
        .insert(&input.full_name, &email, &password_hash)
        .await?;

    info!(user_id = user.id, "User registered");
    Ok((StatusCode::CREATED, Json(user)))
}

/// `POST /auth/login`
///
/// Unknown e-mail and wrong password produce the same `400`.
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(input): Json<LoginRequest>,
) -> ApiResult<Json<TokenResponse>> {
    let email = normalize_email(&input.email);

    let user = state
        .db
        .users()
        .get_by_email(&email)
        .await?
        .filter(|user| verify_password(&input.password, &user.password_hash))
        .ok_or_else(|| ApiError::bad_request("Incorrect email or password"))?;

    let access_token = state.jwt.generate_access_token(user.id)?;

    info!(user_id = user.id, "User logged in");
    Ok(Json(TokenResponse {
        access_token,
        token_type: "bearer".to_string(),
    }))
}

/// `GET /auth/me`
pub async fn me(CurrentUser(user): CurrentUser) -> Json<User> {
    Json(user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::test_support::test_state;

    fn new_user(email: &str, password: &str) -> NewUser {
        NewUser {
            full_name: "Ana Souza".to_string(),
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    fn login_request(email: &str, password: &str) -> LoginRequest {
        LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_normalizes_email() {
        let state = test_state().await;
        let (status, Json(user)) = register(
            State(state.clone()),
            Json(new_user("  Ana@Example.com ", "secret1")),
        )
        .await
        .unwrap();

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(user.email, "ana@example.com");
        assert!(user.password_hash.starts_with("$argon2"));
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let state = test_state().await;
        register(State(state.clone()), Json(new_user("ana@example.com", "secret1")))
            .await
            .unwrap();

        let err = register(State(state), Json(new_user("ANA@example.com", "secret2")))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::BadRequest);
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_register_invalid_input() {
        let state = test_state().await;

        let err = register(State(state.clone()), Json(new_user("not-an-email", "secret1")))
            .await
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let err = register(State(state), Json(new_user("ana@example.com", "123")))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[tokio::test]
    async fn test_login_and_me() {
        let state = test_state().await;
        register(State(state.clone()), Json(new_user("ana@example.com", "secret1")))
            .await
            .unwrap();

        let Json(token) = login(
            State(state.clone()),
            Json(login_request("ANA@example.com ", "secret1")),
        )
        .await
        .unwrap();
        assert_eq!(token.token_type, "bearer");

        let claims = state.jwt.validate_token(&token.access_token).unwrap();
        let user = state
            .db
            .users()
            .get_by_id(claims.user_id().unwrap())
            .await
            .unwrap()
            .unwrap();

        let Json(me) = me(CurrentUser(user)).await;
        assert_eq!(me.email, "ana@example.com");
    }

    #[tokio::test]
    async fn test_login_failures_look_the_same() {
        let state = test_state().await;
        register(State(state.clone()), Json(new_user("ana@example.com", "secret1")))
            .await
            .unwrap();

        let wrong_password = login(
            State(state.clone()),
            Json(login_request("ana@example.com", "wrong-one")),
        )
        .await
        .unwrap_err();
        let unknown_user = login(
            State(state),
            Json(login_request("bob@example.com", "secret1")),
        )
        .await
        .unwrap_err();

        assert_eq!(wrong_password.code, ErrorCode::BadRequest);
        assert_eq!(wrong_password.message, unknown_user.message);
    }
}
