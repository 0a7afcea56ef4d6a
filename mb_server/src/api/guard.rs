//! Bearer-token guards for protected handlers.
//!
//! Handlers call [`auth_user`] to resolve the caller's identity from the
//! `Authorization` header, and [`admin_user`] where the operation is
//! admin-only. The admin flag lives in the store, not the token, so a
//! revoked admin loses access as soon as the flag flips.

use axum::http::{HeaderMap, StatusCode, header::AUTHORIZATION};
use matchbook::auth::TokenClaims;

use super::{AppState, error::ApiError};

/// Resolve the caller's identity from the bearer token.
///
/// Fails with `401 Unauthorized` on a missing header, a malformed header,
/// a bad signature, or an expired token — all before any store interaction.
pub fn auth_user(state: &AppState, headers: &HeaderMap) -> Result<TokenClaims, ApiError> {
    let token = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or_else(|| ApiError::new(StatusCode::UNAUTHORIZED, "Missing bearer token"))?;

    Ok(state.auth.verify_token(token)?)
}

/// Resolve the caller's identity and require the admin flag.
pub async fn admin_user(state: &AppState, headers: &HeaderMap) -> Result<TokenClaims, ApiError> {
    let claims = auth_user(state, headers)?;
    state.auth.require_admin(claims.sub).await?;
    Ok(claims)
}
