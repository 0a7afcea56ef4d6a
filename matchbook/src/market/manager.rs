//! Match catalogue manager.

use super::{
    errors::{MarketError, MarketResult},
    models::Match,
};
use rust_decimal::Decimal;
use sqlx::{PgPool, Row, postgres::PgRow};
use std::sync::Arc;

/// Match catalogue manager
#[derive(Clone)]
pub struct MatchManager {
    pool: Arc<PgPool>,
}

impl MatchManager {
    /// Create a new match manager
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    /// Create a match
    ///
    /// # Errors
    ///
    /// * `MarketError::MissingTeams` - Empty home or away label
    /// * `MarketError::InvalidOdds` - Odds not strictly positive
    pub async fn create_match(
        &self,
        home: &str,
        away: &str,
        odds: Decimal,
    ) -> MarketResult<Match> {
        let home = home.trim();
        let away = away.trim();
        if home.is_empty() || away.is_empty() {
            return Err(MarketError::MissingTeams);
        }
        if odds <= Decimal::ZERO {
            return Err(MarketError::InvalidOdds(odds));
        }

        let row = sqlx::query(
            r#"
            INSERT INTO matches (home, away, odds)
            VALUES ($1, $2, $3)
            RETURNING id, home, away, odds, created_at
            "#,
        )
        .bind(home)
        .bind(away)
        .bind(odds)
        .fetch_one(self.pool.as_ref())
        .await?;

        let m = match_from_row(&row);
        tracing::info!(match_id = m.id, home, away, %odds, "created match");
        Ok(m)
    }

    /// List all matches, newest first
    pub async fn list_matches(&self) -> MarketResult<Vec<Match>> {
        let rows = sqlx::query(
            r#"
            SELECT id, home, away, odds, created_at
            FROM matches
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.iter().map(match_from_row).collect())
    }
}

fn match_from_row(row: &PgRow) -> Match {
    Match {
        id: row.get("id"),
        home: row.get("home"),
        away: row.get("away"),
        odds: row.get("odds"),
        created_at: row.get("created_at"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::postgres::PgPoolOptions;

    fn lazy_manager() -> MatchManager {
        let pool = PgPoolOptions::new()
            .connect_lazy("postgres://localhost/unused")
            .expect("lazy pool");
        MatchManager::new(Arc::new(pool))
    }

    #[tokio::test]
    async fn create_match_rejects_blank_teams() {
        let market = lazy_manager();
        let err = market
            .create_match("", "Away FC", Decimal::TWO)
            .await
            .expect_err("blank home must fail");
        assert!(matches!(err, MarketError::MissingTeams));
    }

    #[tokio::test]
    async fn create_match_rejects_non_positive_odds() {
        let market = lazy_manager();
        let err = market
            .create_match("Home FC", "Away FC", Decimal::ZERO)
            .await
            .expect_err("zero odds must fail");
        assert!(matches!(err, MarketError::InvalidOdds(_)));
    }
}
