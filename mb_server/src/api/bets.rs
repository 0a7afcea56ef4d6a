//! Bet API handlers.
//!
//! Placement debits the stake and settlement credits the payout; both are
//! ledger transactions, so a failure at any step leaves the balance as it
//! was.

use axum::{Json, extract::State, http::HeaderMap};
use matchbook::ledger::BetView;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{AppState, error::ApiError, guard};
use crate::metrics;

#[derive(Debug, Deserialize)]
pub struct PlaceBetPayload {
    pub match_id: i64,
    pub stake: Decimal,
}

#[derive(Debug, Deserialize)]
pub struct SettleBetPayload {
    #[serde(rename = "betId")]
    pub bet_id: i64,
    pub amount: Decimal,
}

#[derive(Debug, Serialize)]
pub struct PlaceBetResponse {
    pub success: bool,
    #[serde(rename = "betId")]
    pub bet_id: i64,
    #[serde(rename = "newBalance")]
    pub new_balance: Decimal,
}

#[derive(Debug, Serialize)]
pub struct SettleBetResponse {
    pub success: bool,
}

#[derive(Debug, Serialize)]
pub struct BetListResponse {
    pub bets: Vec<BetView>,
}

/// Place a stake on a match for the authenticated caller.
///
/// # Errors
///
/// - `400 Bad Request`: Non-positive stake or insufficient balance
/// - `401 Unauthorized`: Missing or invalid token
/// - `404 Not Found`: No such match
pub async fn place_bet(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<PlaceBetPayload>,
) -> Result<Json<PlaceBetResponse>, ApiError> {
    let claims = guard::auth_user(&state, &headers)?;

    let placement = state
        .ledger
        .place_bet(claims.sub, payload.match_id, payload.stake)
        .await?;
    metrics::bets_placed_total();
    Ok(Json(PlaceBetResponse {
        success: true,
        bet_id: placement.bet_id,
        new_balance: placement.new_balance,
    }))
}

/// Settle an open bet with a caller-supplied payout amount (admin only).
///
/// # Errors
///
/// - `400 Bad Request`: Bet already settled or negative amount
/// - `401 Unauthorized` / `403 Forbidden`: Auth failures
/// - `404 Not Found`: No such bet
pub async fn settle_bet(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<SettleBetPayload>,
) -> Result<Json<SettleBetResponse>, ApiError> {
    let claims = guard::admin_user(&state, &headers).await?;

    state
        .ledger
        .settle_bet(payload.bet_id, payload.amount, claims.sub)
        .await?;
    metrics::bets_settled_total();
    Ok(Json(SettleBetResponse { success: true }))
}

/// List the authenticated caller's bets with match info, newest first.
pub async fn my_bets(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<BetListResponse>, ApiError> {
    let claims = guard::auth_user(&state, &headers)?;

    let bets = state.ledger.list_bets_for_user(claims.sub).await?;
    Ok(Json(BetListResponse { bets }))
}
