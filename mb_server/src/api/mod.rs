//! HTTP API for the betting-ledger server.
//!
//! # Architecture
//!
//! - **Axum**: async web framework for routing and extraction
//! - **Bearer tokens**: handlers resolve the caller through the guards in
//!   [`guard`]; admin checks hit the store, not the token
//! - **Boundary errors**: domain errors become status codes only in
//!   [`error::ApiError`]
//!
//! # Endpoints Overview
//!
//! ## Public
//! - `POST /api/register` - Register and receive a token
//! - `POST /api/login` - Login with credentials
//! - `GET  /api/matches` - List matches
//! - `GET  /health` - Server health status
//!
//! ## Bearer token
//! - `GET  /api/me` - Caller profile
//! - `POST /api/deposits/request` - Request a deposit
//! - `POST /api/bets/place` - Place a bet
//! - `GET  /api/bets/my` - Caller's bets
//!
//! ## Admin
//! - `POST /api/matches` - Create a match
//! - `POST /api/deposits/approve` - Approve a deposit
//! - `POST /api/bets/payout` - Settle a bet
//! - `GET  /api/admin/deposits` - Pending deposits
//! - `GET  /api/admin/users` - Users by balance

pub mod admin;
pub mod auth;
pub mod bets;
pub mod deposits;
pub mod error;
pub mod guard;
pub mod matches;
pub mod request_id;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
};
use matchbook::{AuthManager, LedgerManager, MatchManager};
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

/// Application state shared across all HTTP handlers.
///
/// Cloned per request; cheap because every field is an Arc.
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthManager>,
    pub market: Arc<MatchManager>,
    pub ledger: Arc<LedgerManager>,
    pub pool: Arc<PgPool>,
}

/// Create the complete API router with all endpoints and middleware.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/register", post(auth::register))
        .route("/api/login", post(auth::login))
        .route("/api/me", get(auth::me))
        .route(
            "/api/matches",
            get(matches::list_matches).post(matches::create_match),
        )
        .route("/api/deposits/request", post(deposits::request_deposit))
        .route("/api/deposits/approve", post(deposits::approve_deposit))
        .route("/api/bets/place", post(bets::place_bet))
        .route("/api/bets/payout", post(bets::settle_bet))
        .route("/api/bets/my", get(bets::my_bets))
        .route("/api/admin/deposits", get(admin::pending_deposits))
        .route("/api/admin/users", get(admin::list_users))
        .layer(axum::middleware::from_fn(request_id::request_id_middleware))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check endpoint for monitoring and load balancers.
///
/// Probes database connectivity and returns `200 OK` when healthy,
/// `503 Service Unavailable` otherwise.
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let db_healthy = sqlx::query("SELECT 1")
        .fetch_one(state.pool.as_ref())
        .await
        .is_ok();

    let status_code = if db_healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let response = json!({
        "status": if db_healthy { "healthy" } else { "unhealthy" },
        "version": env!("CARGO_PKG_VERSION"),
        "database": db_healthy,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    });

    (status_code, Json(response))
}
