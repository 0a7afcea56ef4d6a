//! Authentication module providing registration, login, and identity tokens.
//!
//! This module implements:
//! - Argon2id password hashing with a server-side pepper
//! - HS256 identity tokens carrying `{id, email}` with a 7-day default expiry
//! - Admin bootstrap from a configured email list, decided once at insert
//! - The admin authorization check backing every privileged operation
//!
//! ## Example
//!
//! ```no_run
//! use matchbook::auth::{AuthConfig, AuthManager, RegisterRequest};
//! use matchbook::db::Database;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Database::new(&Default::default()).await?;
//!     let auth = AuthManager::new(
//!         Arc::new(db.pool().clone()),
//!         AuthConfig::new("secret_pepper".to_string(), "jwt_secret".to_string()),
//!     );
//!
//!     let user = auth
//!         .register(RegisterRequest {
//!             email: "punter@example.com".to_string(),
//!             password: "hunter2".to_string(),
//!             full_name: Some("Punter One".to_string()),
//!         })
//!         .await?;
//!     let token = auth.issue_token(&user)?;
//!     println!("registered {} with token {token}", user.email);
//!     Ok(())
//! }
//! ```

pub mod errors;
pub mod manager;
pub mod models;

pub use errors::{AuthError, AuthResult};
pub use manager::{AuthConfig, AuthManager};
pub use models::{LoginRequest, RegisterRequest, TokenClaims, User, UserId};
