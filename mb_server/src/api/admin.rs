//! Admin read-layer API handlers.

use axum::{Json, extract::State, http::HeaderMap};
use matchbook::auth::User;
use matchbook::ledger::Deposit;
use serde::Serialize;

use super::{AppState, error::ApiError, guard};

/// Admin user listings are capped to keep the response bounded.
const USER_LIST_CAP: i64 = 100;

#[derive(Debug, Serialize)]
pub struct DepositListResponse {
    pub deposits: Vec<Deposit>,
}

#[derive(Debug, Serialize)]
pub struct UserListResponse {
    pub users: Vec<User>,
}

/// List deposits awaiting approval, oldest first (admin only).
pub async fn pending_deposits(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<DepositListResponse>, ApiError> {
    let _claims = guard::admin_user(&state, &headers).await?;

    let deposits = state.ledger.list_pending_deposits().await?;
    Ok(Json(DepositListResponse { deposits }))
}

/// List users by balance descending, capped at 100 (admin only).
pub async fn list_users(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<UserListResponse>, ApiError> {
    let _claims = guard::admin_user(&state, &headers).await?;

    let users = state.auth.list_users_by_balance(USER_LIST_CAP).await?;
    Ok(Json(UserListResponse { users }))
}
