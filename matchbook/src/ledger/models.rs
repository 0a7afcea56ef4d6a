//! Ledger data models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Deposit status
///
/// The transition is monotonic: pending becomes approved at most once and
/// never reverts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DepositStatus {
    Pending,
    Approved,
}

impl std::fmt::Display for DepositStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DepositStatus::Pending => write!(f, "pending"),
            DepositStatus::Approved => write!(f, "approved"),
        }
    }
}

impl DepositStatus {
    pub fn parse(s: &str) -> Self {
        match s {
            "approved" => DepositStatus::Approved,
            _ => DepositStatus::Pending,
        }
    }
}

/// Bet status
///
/// Open becomes settled at most once; there is no void or lost transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BetStatus {
    Open,
    Settled,
}

impl std::fmt::Display for BetStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BetStatus::Open => write!(f, "open"),
            BetStatus::Settled => write!(f, "settled"),
        }
    }
}

impl BetStatus {
    pub fn parse(s: &str) -> Self {
        match s {
            "settled" => BetStatus::Settled,
            _ => BetStatus::Open,
        }
    }
}

/// A funding request awaiting (or holding) admin approval
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Deposit {
    pub id: i64,
    pub user_id: i64,
    pub amount: Decimal,
    pub status: DepositStatus,
    pub approved_by: Option<i64>,
    pub approved_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// A stake placed on a match
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bet {
    pub id: i64,
    pub user_id: i64,
    pub match_id: i64,
    pub stake: Decimal,
    pub status: BetStatus,
    pub payout: Decimal,
    pub created_at: DateTime<Utc>,
}

/// A bet joined with the match it was placed on, for listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BetView {
    pub id: i64,
    pub match_id: i64,
    pub home: String,
    pub away: String,
    pub odds: Decimal,
    pub stake: Decimal,
    pub status: BetStatus,
    pub payout: Decimal,
    pub created_at: DateTime<Utc>,
}

/// Result of a successful bet placement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BetPlacement {
    pub bet_id: i64,
    pub new_balance: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deposit_status_display_parse_round_trip() {
        assert_eq!(
            DepositStatus::parse(&DepositStatus::Approved.to_string()),
            DepositStatus::Approved
        );
        assert_eq!(
            DepositStatus::parse(&DepositStatus::Pending.to_string()),
            DepositStatus::Pending
        );
    }

    #[test]
    fn bet_status_display_parse_round_trip() {
        assert_eq!(
            BetStatus::parse(&BetStatus::Settled.to_string()),
            BetStatus::Settled
        );
        assert_eq!(BetStatus::parse(&BetStatus::Open.to_string()), BetStatus::Open);
    }
}
