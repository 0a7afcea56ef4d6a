//! Match catalogue: the betting targets users stake against.
//!
//! Matches are created by admins and immutable afterwards. Placement-time
//! existence checks live in the ledger, inside its transaction, so this
//! module stays lock-free CRUD.

pub mod errors;
pub mod manager;
pub mod models;

pub use errors::{MarketError, MarketResult};
pub use manager::MatchManager;
pub use models::{Match, MatchId};
