//! Betting-ledger server binary.
//!
//! Wires the connection pool, schema bootstrap, and domain managers to the
//! HTTP API, then serves until interrupted.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Error;
use chrono::Duration;
use matchbook::{
    AuthConfig, AuthManager, LedgerManager, MatchManager,
    db::Database,
};
use mb_server::{api, config::ServerConfig, logging, metrics};
use pico_args::Arguments;
use tracing::info;

const HELP: &str = "\
Run a betting-ledger server

USAGE:
  mb_server [OPTIONS]

OPTIONS:
  --bind       IP:PORT     Server socket bind address  [default: env SERVER_BIND or 127.0.0.1:8080]
  --db-url     URL         Database connection string  [default: env DATABASE_URL]

FLAGS:
  -h, --help               Print help information

ENVIRONMENT:
  SERVER_BIND              Server bind address (e.g., 0.0.0.0:8080)
  DATABASE_URL             PostgreSQL connection string
  JWT_SECRET               JWT signing secret (required)
  PASSWORD_PEPPER          Password hashing pepper (required)
  TOKEN_TTL_DAYS           Identity token validity in days [default: 7]
  ADMIN_EMAILS             Comma-separated emails registered as admins
  METRICS_BIND             Optional Prometheus exporter bind address
";

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Load .env file if it exists
    let _ = dotenvy::dotenv();

    let mut pargs = Arguments::from_env();

    // Help has a higher priority and should be handled separately.
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let bind_override: Option<SocketAddr> = pargs.opt_value_from_str("--bind")?;
    let database_url_override: Option<String> = pargs.opt_value_from_str("--db-url")?;

    logging::init();

    let config = ServerConfig::from_env(bind_override, database_url_override)?;
    info!("Starting betting-ledger server at {}", config.bind);

    let db = Database::new(&config.database)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to connect to database: {}", e))?;
    db.ensure_schema()
        .await
        .map_err(|e| anyhow::anyhow!("Schema bootstrap failed: {}", e))?;
    info!("Database connected, schema ready");

    let pool = Arc::new(db.pool().clone());
    let mut auth_config = AuthConfig::new(
        config.security.password_pepper.clone(),
        config.security.jwt_secret.clone(),
    );
    auth_config.token_ttl = Duration::days(config.security.token_ttl_days);
    auth_config.admin_emails = config.security.admin_emails.clone();

    let state = api::AppState {
        auth: Arc::new(AuthManager::new(pool.clone(), auth_config)),
        market: Arc::new(MatchManager::new(pool.clone())),
        ledger: Arc::new(LedgerManager::new(pool.clone())),
        pool,
    };

    if let Some(metrics_bind) = config.metrics_bind {
        metrics::init_metrics(metrics_bind).map_err(Error::msg)?;
        info!("Metrics exporter listening on {}", metrics_bind);
    }

    let app = api::create_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind to {}: {}", config.bind, e))?;

    info!(
        "Server is running at http://{}. Press Ctrl+C to stop.",
        config.bind
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    info!("Shutting down server...");
    db.close().await;

    Ok(())
}

/// Graceful shutdown signal
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to install CTRL+C signal handler: {}", e);
    }
}
