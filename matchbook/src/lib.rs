//! # Matchbook
//!
//! A betting-ledger backend library: users register, fund their balance
//! through admin-approved deposits, stake on matches, and receive payouts.
//!
//! The crate is organized around the store: every manager holds a shared
//! connection pool and all cross-request coordination happens through
//! PostgreSQL row locks, never in-process state.
//!
//! ## Core Modules
//!
//! - [`db`]: connection pool, schema bootstrap, query timeouts
//! - [`auth`]: registration, login, identity tokens, admin checks
//! - [`market`]: the match catalogue bets are placed against
//! - [`ledger`]: the atomic transactions that move money
//!
//! ## Money
//!
//! All monetary values are [`rust_decimal::Decimal`] bound to `NUMERIC`
//! columns; balance arithmetic never passes through floating point.

/// Connection pooling and schema utilities.
pub mod db;
pub use db::{Database, DatabaseConfig};

/// Registration, login, and identity tokens.
pub mod auth;
pub use auth::{AuthConfig, AuthManager};

/// Match catalogue.
pub mod market;
pub use market::MatchManager;

/// The money-moving transactions.
pub mod ledger;
pub use ledger::LedgerManager;
