//! Ledger module: the money-moving core of the backend.
//!
//! Three transactions mutate balances — deposit approval, bet placement, and
//! bet settlement — and each runs atomically with explicit row locks and an
//! idempotency guard. The invariants they maintain:
//!
//! - a balance is never negative
//! - a deposit is credited at most once
//! - a bet is paid out at most once
//! - a debit and its bet row persist together or not at all
//!
//! ## Example
//!
//! ```no_run
//! use matchbook::db::Database;
//! use matchbook::ledger::LedgerManager;
//! use rust_decimal::Decimal;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Database::new(&Default::default()).await?;
//!     let ledger = LedgerManager::new(Arc::new(db.pool().clone()));
//!
//!     let deposit = ledger.request_deposit(1, Decimal::from(50)).await?;
//!     let balance = ledger.approve_deposit(deposit.id, 2).await?;
//!     println!("balance after approval: {balance}");
//!     Ok(())
//! }
//! ```

pub mod errors;
pub mod manager;
pub mod models;

pub use errors::{LedgerError, LedgerResult};
pub use manager::LedgerManager;
pub use models::{Bet, BetPlacement, BetStatus, BetView, Deposit, DepositStatus};
