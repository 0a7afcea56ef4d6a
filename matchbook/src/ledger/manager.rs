//! Ledger manager: the transactions that move money.
//!
//! Each mutating operation runs as one database transaction with explicit
//! row locks. Lock order is the same everywhere: the entity row (deposit or
//! bet) first, the user row second; `place_bet` has no entity row yet so it
//! starts at the user row. Consistent ordering keeps the three writers free
//! of circular waits. A status-column guard inside the transaction makes
//! approval and settlement idempotent. Any error propagates out of the
//! transaction scope and the dropped transaction rolls back, so a failed
//! operation leaves no partial balance mutation behind.

use super::{
    errors::{LedgerError, LedgerResult},
    models::{Bet, BetPlacement, BetStatus, BetView, Deposit, DepositStatus},
};
use rust_decimal::Decimal;
use sqlx::{PgPool, Row, postgres::PgRow};
use std::sync::Arc;

/// Ledger manager
#[derive(Clone)]
pub struct LedgerManager {
    pool: Arc<PgPool>,
}

impl LedgerManager {
    /// Create a new ledger manager
    ///
    /// # Arguments
    ///
    /// * `pool` - Database connection pool
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    /// Record a funding request in `pending` state
    ///
    /// # Errors
    ///
    /// * `LedgerError::InvalidAmount` - Amount not strictly positive
    pub async fn request_deposit(&self, user_id: i64, amount: Decimal) -> LedgerResult<Deposit> {
        if amount <= Decimal::ZERO {
            return Err(LedgerError::InvalidAmount(amount));
        }

        let row = sqlx::query(
            r#"
            INSERT INTO deposits (user_id, amount)
            VALUES ($1, $2)
            RETURNING id, user_id, amount, status, approved_by, approved_at, created_at
            "#,
        )
        .bind(user_id)
        .bind(amount)
        .fetch_one(self.pool.as_ref())
        .await?;

        let deposit = deposit_from_row(&row);
        tracing::info!(deposit_id = deposit.id, user_id, %amount, "deposit requested");
        Ok(deposit)
    }

    /// Approve a pending deposit and credit the owner's balance
    ///
    /// Runs as a single transaction, locking the deposit row and then the
    /// user row. The status guard makes a second approval fail without side
    /// effects.
    ///
    /// # Arguments
    ///
    /// * `deposit_id` - Deposit to approve
    /// * `approver_id` - Admin performing the approval (authorization is the
    ///   caller's concern; recorded here for the audit trail)
    ///
    /// # Returns
    ///
    /// * `LedgerResult<Decimal>` - The owner's new balance
    ///
    /// # Errors
    ///
    /// * `LedgerError::DepositNotFound` - No such deposit
    /// * `LedgerError::AlreadyApproved` - Idempotency guard tripped
    /// * `LedgerError::UserNotFound` - Owner row missing (data-integrity
    ///   violation; the transaction aborts)
    pub async fn approve_deposit(
        &self,
        deposit_id: i64,
        approver_id: i64,
    ) -> LedgerResult<Decimal> {
        let mut tx = self.pool.begin().await?;

        // Lock the deposit row first (lock order: entity, then user).
        let deposit = sqlx::query(
            "SELECT id, user_id, amount, status FROM deposits WHERE id = $1 FOR UPDATE",
        )
        .bind(deposit_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(LedgerError::DepositNotFound(deposit_id))?;

        let status = DepositStatus::parse(&deposit.get::<String, _>("status"));
        if status == DepositStatus::Approved {
            return Err(LedgerError::AlreadyApproved(deposit_id));
        }

        let user_id: i64 = deposit.get("user_id");
        let amount: Decimal = deposit.get("amount");

        let user = sqlx::query("SELECT balance FROM users WHERE id = $1 FOR UPDATE")
            .bind(user_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(LedgerError::UserNotFound(user_id))?;

        let new_balance = user.get::<Decimal, _>("balance") + amount;
        sqlx::query("UPDATE users SET balance = $1 WHERE id = $2")
            .bind(new_balance)
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query(
            "UPDATE deposits SET status = 'approved', approved_by = $1, approved_at = NOW()
             WHERE id = $2",
        )
        .bind(approver_id)
        .bind(deposit_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::info!(deposit_id, user_id, approver_id, %amount, %new_balance, "deposit approved");
        Ok(new_balance)
    }

    /// Place a stake on a match, debiting the caller's balance
    ///
    /// Debit and bet insertion happen in one transaction: either both
    /// persist or neither does. The user row lock serializes concurrent
    /// placements against the same balance, so two full-balance stakes
    /// cannot both pass the funds check.
    ///
    /// # Errors
    ///
    /// * `LedgerError::InvalidStake` - Stake not strictly positive
    /// * `LedgerError::UserNotFound` - Caller row missing
    /// * `LedgerError::InsufficientBalance` - Balance below stake
    /// * `LedgerError::MatchNotFound` - No such match
    pub async fn place_bet(
        &self,
        user_id: i64,
        match_id: i64,
        stake: Decimal,
    ) -> LedgerResult<BetPlacement> {
        if stake <= Decimal::ZERO {
            return Err(LedgerError::InvalidStake(stake));
        }

        let mut tx = self.pool.begin().await?;

        let user = sqlx::query("SELECT balance FROM users WHERE id = $1 FOR UPDATE")
            .bind(user_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(LedgerError::UserNotFound(user_id))?;

        let balance: Decimal = user.get("balance");
        if balance < stake {
            return Err(LedgerError::InsufficientBalance {
                available: balance,
                required: stake,
            });
        }

        // Existence check only; matches are immutable so no lock is taken.
        sqlx::query("SELECT id FROM matches WHERE id = $1")
            .bind(match_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(LedgerError::MatchNotFound(match_id))?;

        let new_balance = balance - stake;
        sqlx::query("UPDATE users SET balance = $1 WHERE id = $2")
            .bind(new_balance)
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        let bet = sqlx::query(
            "INSERT INTO bets (user_id, match_id, stake) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(user_id)
        .bind(match_id)
        .bind(stake)
        .fetch_one(&mut *tx)
        .await?;

        let bet_id: i64 = bet.get("id");
        tx.commit().await?;

        tracing::info!(bet_id, user_id, match_id, %stake, %new_balance, "bet placed");
        Ok(BetPlacement { bet_id, new_balance })
    }

    /// Settle an open bet, crediting the payout to its owner
    ///
    /// The payout amount is supplied by the caller; deriving it from odds is
    /// out of this ledger's scope. A zero amount settles a losing bet.
    ///
    /// # Returns
    ///
    /// * `LedgerResult<Decimal>` - The owner's new balance
    ///
    /// # Errors
    ///
    /// * `LedgerError::InvalidAmount` - Negative payout
    /// * `LedgerError::BetNotFound` - No such bet
    /// * `LedgerError::AlreadySettled` - Idempotency guard tripped
    /// * `LedgerError::UserNotFound` - Owner row missing
    pub async fn settle_bet(
        &self,
        bet_id: i64,
        amount: Decimal,
        admin_id: i64,
    ) -> LedgerResult<Decimal> {
        if amount < Decimal::ZERO {
            return Err(LedgerError::InvalidAmount(amount));
        }

        let mut tx = self.pool.begin().await?;

        // Lock the bet row first (lock order: entity, then user).
        let bet = sqlx::query("SELECT id, user_id, status FROM bets WHERE id = $1 FOR UPDATE")
            .bind(bet_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(LedgerError::BetNotFound(bet_id))?;

        let status = BetStatus::parse(&bet.get::<String, _>("status"));
        if status == BetStatus::Settled {
            return Err(LedgerError::AlreadySettled(bet_id));
        }

        let user_id: i64 = bet.get("user_id");
        let user = sqlx::query("SELECT balance FROM users WHERE id = $1 FOR UPDATE")
            .bind(user_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(LedgerError::UserNotFound(user_id))?;

        let new_balance = user.get::<Decimal, _>("balance") + amount;
        sqlx::query("UPDATE users SET balance = $1 WHERE id = $2")
            .bind(new_balance)
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("UPDATE bets SET status = 'settled', payout = $1 WHERE id = $2")
            .bind(amount)
            .bind(bet_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::info!(bet_id, user_id, admin_id, %amount, %new_balance, "bet settled");
        Ok(new_balance)
    }

    /// Fetch a deposit by id
    pub async fn get_deposit(&self, deposit_id: i64) -> LedgerResult<Deposit> {
        let row = sqlx::query(
            r#"
            SELECT id, user_id, amount, status, approved_by, approved_at, created_at
            FROM deposits
            WHERE id = $1
            "#,
        )
        .bind(deposit_id)
        .fetch_optional(self.pool.as_ref())
        .await?
        .ok_or(LedgerError::DepositNotFound(deposit_id))?;

        Ok(deposit_from_row(&row))
    }

    /// List deposits still awaiting approval, oldest first
    pub async fn list_pending_deposits(&self) -> LedgerResult<Vec<Deposit>> {
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, amount, status, approved_by, approved_at, created_at
            FROM deposits
            WHERE status = 'pending'
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.iter().map(deposit_from_row).collect())
    }

    /// List a user's bets joined with match labels, newest first
    pub async fn list_bets_for_user(&self, user_id: i64) -> LedgerResult<Vec<BetView>> {
        let rows = sqlx::query(
            r#"
            SELECT b.id, b.match_id, m.home, m.away, m.odds,
                   b.stake, b.status, b.payout, b.created_at
            FROM bets b
            JOIN matches m ON m.id = b.match_id
            WHERE b.user_id = $1
            ORDER BY b.created_at DESC, b.id DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        let bets = rows
            .iter()
            .map(|row| BetView {
                id: row.get("id"),
                match_id: row.get("match_id"),
                home: row.get("home"),
                away: row.get("away"),
                odds: row.get("odds"),
                stake: row.get("stake"),
                status: BetStatus::parse(&row.get::<String, _>("status")),
                payout: row.get("payout"),
                created_at: row.get("created_at"),
            })
            .collect();

        Ok(bets)
    }

    /// Fetch a bet by id
    pub async fn get_bet(&self, bet_id: i64) -> LedgerResult<Bet> {
        let row = sqlx::query(
            r#"
            SELECT id, user_id, match_id, stake, status, payout, created_at
            FROM bets
            WHERE id = $1
            "#,
        )
        .bind(bet_id)
        .fetch_optional(self.pool.as_ref())
        .await?
        .ok_or(LedgerError::BetNotFound(bet_id))?;

        Ok(Bet {
            id: row.get("id"),
            user_id: row.get("user_id"),
            match_id: row.get("match_id"),
            stake: row.get("stake"),
            status: BetStatus::parse(&row.get::<String, _>("status")),
            payout: row.get("payout"),
            created_at: row.get("created_at"),
        })
    }
}

fn deposit_from_row(row: &PgRow) -> Deposit {
    Deposit {
        id: row.get("id"),
        user_id: row.get("user_id"),
        amount: row.get("amount"),
        status: DepositStatus::parse(&row.get::<String, _>("status")),
        approved_by: row.get("approved_by"),
        approved_at: row.get("approved_at"),
        created_at: row.get("created_at"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::postgres::PgPoolOptions;

    fn lazy_manager() -> LedgerManager {
        let pool = PgPoolOptions::new()
            .connect_lazy("postgres://localhost/unused")
            .expect("lazy pool");
        LedgerManager::new(Arc::new(pool))
    }

    #[tokio::test]
    async fn request_deposit_rejects_non_positive_amount() {
        let ledger = lazy_manager();

        let err = ledger
            .request_deposit(1, Decimal::ZERO)
            .await
            .expect_err("zero amount must fail");
        assert!(matches!(err, LedgerError::InvalidAmount(_)));

        let err = ledger
            .request_deposit(1, Decimal::from(-5))
            .await
            .expect_err("negative amount must fail");
        assert!(matches!(err, LedgerError::InvalidAmount(_)));
    }

    #[tokio::test]
    async fn place_bet_rejects_non_positive_stake() {
        let ledger = lazy_manager();

        let err = ledger
            .place_bet(1, 1, Decimal::ZERO)
            .await
            .expect_err("zero stake must fail");
        assert!(matches!(err, LedgerError::InvalidStake(_)));
    }

    #[tokio::test]
    async fn settle_bet_rejects_negative_amount() {
        let ledger = lazy_manager();

        let err = ledger
            .settle_bet(1, Decimal::from(-1), 1)
            .await
            .expect_err("negative payout must fail");
        assert!(matches!(err, LedgerError::InvalidAmount(_)));
    }
}
