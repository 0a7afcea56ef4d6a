//! Schema bootstrap for the four ledger relations.
//!
//! The statements are idempotent (`CREATE TABLE IF NOT EXISTS`) so the
//! bootstrap can run on every startup. Monetary columns are `NUMERIC` and are
//! read as `rust_decimal::Decimal`; balance arithmetic never touches floats.
//! The `CHECK` constraints back the ledger invariants at the storage layer:
//! balances cannot go negative and stakes, deposit amounts, and odds must be
//! positive.

use sqlx::PgPool;

const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS users (
        id BIGSERIAL PRIMARY KEY,
        email TEXT NOT NULL UNIQUE,
        password_hash TEXT NOT NULL,
        full_name TEXT NOT NULL DEFAULT '',
        balance NUMERIC NOT NULL DEFAULT 0 CHECK (balance >= 0),
        is_admin BOOLEAN NOT NULL DEFAULT FALSE,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS matches (
        id BIGSERIAL PRIMARY KEY,
        home TEXT NOT NULL,
        away TEXT NOT NULL,
        odds NUMERIC NOT NULL CHECK (odds > 0),
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS deposits (
        id BIGSERIAL PRIMARY KEY,
        user_id BIGINT NOT NULL REFERENCES users(id),
        amount NUMERIC NOT NULL CHECK (amount > 0),
        status TEXT NOT NULL DEFAULT 'pending' CHECK (status IN ('pending', 'approved')),
        approved_by BIGINT REFERENCES users(id),
        approved_at TIMESTAMPTZ,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS bets (
        id BIGSERIAL PRIMARY KEY,
        user_id BIGINT NOT NULL REFERENCES users(id),
        match_id BIGINT NOT NULL REFERENCES matches(id),
        stake NUMERIC NOT NULL CHECK (stake > 0),
        status TEXT NOT NULL DEFAULT 'open' CHECK (status IN ('open', 'settled')),
        payout NUMERIC NOT NULL DEFAULT 0,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_deposits_status ON deposits (status, created_at)",
    "CREATE INDEX IF NOT EXISTS idx_bets_user ON bets (user_id, created_at)",
];

/// Create the ledger tables and indexes if they do not exist yet.
pub async fn ensure_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    for statement in SCHEMA {
        sqlx::query(statement).execute(pool).await?;
    }
    Ok(())
}
