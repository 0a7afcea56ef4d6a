//! Match catalogue error types.

use rust_decimal::Decimal;
use thiserror::Error;

/// Match catalogue errors
#[derive(Debug, Error)]
pub enum MarketError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Home or away label empty
    #[error("Both home and away teams are required")]
    MissingTeams,

    /// Odds must be a positive multiplier
    #[error("Invalid odds: {0}")]
    InvalidOdds(Decimal),
}

impl MarketError {
    /// Get a client-safe error message that doesn't leak sensitive information
    pub fn client_message(&self) -> String {
        match self {
            MarketError::Database(_) => "Internal server error".to_string(),
            _ => self.to_string(),
        }
    }
}

/// Result type for match catalogue operations
pub type MarketResult<T> = Result<T, MarketError>;
