//! Ledger error types.

use rust_decimal::Decimal;
use thiserror::Error;

/// Ledger errors
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Deposit amount must be positive
    #[error("Invalid amount: {0}")]
    InvalidAmount(Decimal),

    /// Stake must be positive
    #[error("Invalid stake: {0}")]
    InvalidStake(Decimal),

    /// Insufficient balance
    #[error("Insufficient balance: available {available}, required {required}")]
    InsufficientBalance {
        available: Decimal,
        required: Decimal,
    },

    /// User not found
    #[error("User not found: {0}")]
    UserNotFound(i64),

    /// Match not found
    #[error("Match not found: {0}")]
    MatchNotFound(i64),

    /// Deposit not found
    #[error("Deposit not found: {0}")]
    DepositNotFound(i64),

    /// Bet not found
    #[error("Bet not found: {0}")]
    BetNotFound(i64),

    /// Deposit already approved (idempotency guard)
    #[error("Deposit {0} already approved")]
    AlreadyApproved(i64),

    /// Bet already settled (idempotency guard)
    #[error("Bet {0} already settled")]
    AlreadySettled(i64),
}

impl LedgerError {
    /// Get a client-safe error message that doesn't leak sensitive information
    ///
    /// Database errors are sanitized to prevent information disclosure about
    /// the internal system structure, and foreign user ids are redacted.
    pub fn client_message(&self) -> String {
        match self {
            LedgerError::Database(_) => "Internal server error".to_string(),
            LedgerError::UserNotFound(_) => "User not found".to_string(),
            _ => self.to_string(),
        }
    }
}

/// Result type for ledger operations
pub type LedgerResult<T> = Result<T, LedgerError>;
