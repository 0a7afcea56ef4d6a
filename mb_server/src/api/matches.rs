//! Match catalogue API handlers.

use axum::{Json, extract::State, http::HeaderMap};
use matchbook::market::Match;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{AppState, error::ApiError, guard};

#[derive(Debug, Deserialize)]
pub struct CreateMatchPayload {
    pub home: String,
    pub away: String,
    pub odds: Decimal,
}

#[derive(Debug, Serialize)]
pub struct MatchResponse {
    #[serde(rename = "match")]
    pub created: Match,
}

#[derive(Debug, Serialize)]
pub struct MatchListResponse {
    pub matches: Vec<Match>,
}

/// Create a match (admin only).
///
/// # Errors
///
/// - `400 Bad Request`: Blank team label or non-positive odds
/// - `401 Unauthorized`: Missing or invalid token
/// - `403 Forbidden`: Caller is not an admin
pub async fn create_match(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<CreateMatchPayload>,
) -> Result<Json<MatchResponse>, ApiError> {
    let _claims = guard::admin_user(&state, &headers).await?;

    let created = state
        .market
        .create_match(&payload.home, &payload.away, payload.odds)
        .await?;
    Ok(Json(MatchResponse { created }))
}

/// List all matches, newest first. Public.
pub async fn list_matches(
    State(state): State<AppState>,
) -> Result<Json<MatchListResponse>, ApiError> {
    let matches = state.market.list_matches().await?;
    Ok(Json(MatchListResponse { matches }))
}
