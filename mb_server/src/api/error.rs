//! Boundary error type mapping domain errors to HTTP status codes.
//!
//! The domain enums stay transport-free; this is the only place where a
//! ledger, market, or auth error becomes a status code. Internal errors are
//! logged in full and reach the client as a generic message via the domain
//! `client_message()` sanitizers.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use matchbook::auth::AuthError;
use matchbook::ledger::LedgerError;
use matchbook::market::MarketError;
use serde_json::json;

/// An error ready to leave the process as an HTTP response
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        let status = match &err {
            AuthError::MissingField(_) => StatusCode::BAD_REQUEST,
            AuthError::EmailTaken => StatusCode::CONFLICT,
            AuthError::InvalidCredentials | AuthError::InvalidToken => StatusCode::UNAUTHORIZED,
            AuthError::Forbidden => StatusCode::FORBIDDEN,
            AuthError::UserNotFound => StatusCode::NOT_FOUND,
            AuthError::Database(_) | AuthError::Jwt(_) | AuthError::HashingFailed => {
                tracing::error!(error = %err, "auth operation failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self::new(status, err.client_message())
    }
}

impl From<LedgerError> for ApiError {
    fn from(err: LedgerError) -> Self {
        let status = match &err {
            LedgerError::InvalidAmount(_)
            | LedgerError::InvalidStake(_)
            | LedgerError::InsufficientBalance { .. }
            | LedgerError::AlreadyApproved(_)
            | LedgerError::AlreadySettled(_) => StatusCode::BAD_REQUEST,
            LedgerError::UserNotFound(_)
            | LedgerError::MatchNotFound(_)
            | LedgerError::DepositNotFound(_)
            | LedgerError::BetNotFound(_) => StatusCode::NOT_FOUND,
            LedgerError::Database(_) => {
                tracing::error!(error = %err, "ledger operation failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self::new(status, err.client_message())
    }
}

impl From<MarketError> for ApiError {
    fn from(err: MarketError) -> Self {
        let status = match &err {
            MarketError::MissingTeams | MarketError::InvalidOdds(_) => StatusCode::BAD_REQUEST,
            MarketError::Database(_) => {
                tracing::error!(error = %err, "market operation failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self::new(status, err.client_message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn already_approved_maps_to_bad_request() {
        let api: ApiError = LedgerError::AlreadyApproved(3).into();
        assert_eq!(api.status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn missing_match_maps_to_not_found() {
        let api: ApiError = LedgerError::MatchNotFound(999).into();
        assert_eq!(api.status, StatusCode::NOT_FOUND);
    }

    #[test]
    fn insufficient_balance_maps_to_bad_request() {
        let api: ApiError = LedgerError::InsufficientBalance {
            available: Decimal::ZERO,
            required: Decimal::from(10),
        }
        .into();
        assert_eq!(api.status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn duplicate_email_maps_to_conflict() {
        let api: ApiError = AuthError::EmailTaken.into();
        assert_eq!(api.status, StatusCode::CONFLICT);
    }

    #[test]
    fn forbidden_and_unauthorized_are_distinct() {
        let forbidden: ApiError = AuthError::Forbidden.into();
        let unauthorized: ApiError = AuthError::InvalidToken.into();
        assert_eq!(forbidden.status, StatusCode::FORBIDDEN);
        assert_eq!(unauthorized.status, StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn database_errors_do_not_leak_detail() {
        let api: ApiError = LedgerError::Database(sqlx::Error::PoolClosed).into();
        assert_eq!(api.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api.message, "Internal server error");
    }
}
