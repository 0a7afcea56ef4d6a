//! Match catalogue data models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Match ID type
pub type MatchId = i64;

/// A betting target. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Match {
    pub id: MatchId,
    pub home: String,
    pub away: String,
    pub odds: Decimal,
    pub created_at: DateTime<Utc>,
}
