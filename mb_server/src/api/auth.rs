//! Authentication API handlers.
//!
//! Registration and login are the only unauthenticated mutating endpoints;
//! both return the user alongside a signed identity token.
//!
//! # Examples
//!
//! Register a new user:
//! ```bash
//! curl -X POST http://localhost:8080/api/register \
//!   -H "Content-Type: application/json" \
//!   -d '{"email": "punter@example.com", "password": "hunter2", "full_name": "Punter One"}'
//! ```
//!
//! Login:
//! ```bash
//! curl -X POST http://localhost:8080/api/login \
//!   -H "Content-Type: application/json" \
//!   -d '{"email": "punter@example.com", "password": "hunter2"}'
//! ```

use axum::{Json, extract::State, http::HeaderMap};
use matchbook::auth::{LoginRequest, RegisterRequest, User};
use serde::{Deserialize, Serialize};

use super::{AppState, error::ApiError, guard};
use crate::metrics;

#[derive(Debug, Deserialize)]
pub struct RegisterPayload {
    pub email: String,
    pub password: String,
    pub full_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginPayload {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub user: User,
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub user: User,
}

/// Register a new user account and issue an identity token.
///
/// # Errors
///
/// - `400 Bad Request`: Missing email or password
/// - `409 Conflict`: Email already registered
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterPayload>,
) -> Result<Json<AuthResponse>, ApiError> {
    let user = state
        .auth
        .register(RegisterRequest {
            email: payload.email,
            password: payload.password,
            full_name: payload.full_name,
        })
        .await?;

    let token = state.auth.issue_token(&user)?;
    Ok(Json(AuthResponse { user, token }))
}

/// Authenticate a user and issue an identity token.
///
/// # Errors
///
/// - `400 Bad Request`: Missing email or password
/// - `401 Unauthorized`: Unknown email or wrong password
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginPayload>,
) -> Result<Json<AuthResponse>, ApiError> {
    let result = state
        .auth
        .login(LoginRequest {
            email: payload.email,
            password: payload.password,
        })
        .await;

    metrics::login_attempts_total(result.is_ok());
    let (user, token) = result?;
    Ok(Json(AuthResponse { user, token }))
}

/// Return the authenticated caller's profile.
///
/// # Errors
///
/// - `401 Unauthorized`: Missing or invalid token
/// - `404 Not Found`: User record no longer exists
pub async fn me(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<UserResponse>, ApiError> {
    let claims = guard::auth_user(&state, &headers)?;
    let user = state.auth.get_user(claims.sub).await?;
    Ok(Json(UserResponse { user }))
}
