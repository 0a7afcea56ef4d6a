//! Deposit API handlers.
//!
//! A deposit is requested by its owner and credited only when an admin
//! approves it; the approval is the first of the three ledger transactions.

use axum::{Json, extract::State, http::HeaderMap};
use matchbook::ledger::Deposit;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{AppState, error::ApiError, guard};
use crate::metrics;

#[derive(Debug, Deserialize)]
pub struct RequestDepositPayload {
    pub amount: Decimal,
}

#[derive(Debug, Deserialize)]
pub struct ApproveDepositPayload {
    pub id: i64,
}

#[derive(Debug, Serialize)]
pub struct DepositResponse {
    pub deposit: Deposit,
}

#[derive(Debug, Serialize)]
pub struct ApproveResponse {
    pub success: bool,
    #[serde(rename = "newBalance")]
    pub new_balance: Decimal,
}

/// Request a deposit for the authenticated caller.
///
/// # Errors
///
/// - `400 Bad Request`: Non-positive amount
/// - `401 Unauthorized`: Missing or invalid token
pub async fn request_deposit(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<RequestDepositPayload>,
) -> Result<Json<DepositResponse>, ApiError> {
    let claims = guard::auth_user(&state, &headers)?;

    let deposit = state
        .ledger
        .request_deposit(claims.sub, payload.amount)
        .await?;
    Ok(Json(DepositResponse { deposit }))
}

/// Approve a pending deposit (admin only), crediting the owner's balance.
///
/// Calling it a second time on the same deposit fails without a second
/// credit.
///
/// # Errors
///
/// - `400 Bad Request`: Deposit already approved
/// - `401 Unauthorized` / `403 Forbidden`: Auth failures
/// - `404 Not Found`: No such deposit
pub async fn approve_deposit(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<ApproveDepositPayload>,
) -> Result<Json<ApproveResponse>, ApiError> {
    let claims = guard::admin_user(&state, &headers).await?;

    let new_balance = state.ledger.approve_deposit(payload.id, claims.sub).await?;
    metrics::deposits_approved_total();
    Ok(Json(ApproveResponse {
        success: true,
        new_balance,
    }))
}
