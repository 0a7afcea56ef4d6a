//! Betting-ledger HTTP server.
//!
//! Library surface for the `mb_server` binary, exposed so integration tests
//! can build the router in-process.

pub mod api;
pub mod config;
pub mod logging;
pub mod metrics;
