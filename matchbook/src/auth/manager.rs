//! Authentication manager implementation.

use super::{
    errors::{AuthError, AuthResult},
    models::{LoginRequest, RegisterRequest, TokenClaims, User, UserId},
};
use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use sqlx::{PgPool, Row, postgres::PgRow};
use std::sync::Arc;

/// Authentication configuration
///
/// `admin_emails` implements the admin bootstrap: a registration whose email
/// appears in the list is created with `is_admin = true`. The decision is
/// made exactly once, at insert time.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Server-side pepper mixed into every password before hashing
    pub pepper: String,
    /// Secret key for JWT signing
    pub jwt_secret: String,
    /// Identity token validity (default 7 days)
    pub token_ttl: Duration,
    /// Emails granted the admin flag at registration time
    pub admin_emails: Vec<String>,
}

impl AuthConfig {
    pub fn new(pepper: String, jwt_secret: String) -> Self {
        Self {
            pepper,
            jwt_secret,
            token_ttl: Duration::days(7),
            admin_emails: Vec::new(),
        }
    }
}

const USER_COLUMNS: &str = "id, email, full_name, balance, is_admin, created_at";

/// Authentication manager
#[derive(Clone)]
pub struct AuthManager {
    pool: Arc<PgPool>,
    config: AuthConfig,
}

impl AuthManager {
    /// Create a new authentication manager
    ///
    /// # Arguments
    ///
    /// * `pool` - Database connection pool
    /// * `config` - Pepper, JWT secret, token lifetime, and admin bootstrap list
    pub fn new(pool: Arc<PgPool>, config: AuthConfig) -> Self {
        Self { pool, config }
    }

    /// Register a new user
    ///
    /// # Errors
    ///
    /// * `AuthError::MissingField` - Email or password empty
    /// * `AuthError::EmailTaken` - Email already registered
    pub async fn register(&self, request: RegisterRequest) -> AuthResult<User> {
        let email = request.email.trim().to_lowercase();
        if email.is_empty() {
            return Err(AuthError::MissingField("email"));
        }
        if request.password.is_empty() {
            return Err(AuthError::MissingField("password"));
        }

        let existing = sqlx::query("SELECT id FROM users WHERE email = $1")
            .bind(&email)
            .fetch_optional(self.pool.as_ref())
            .await?;
        if existing.is_some() {
            return Err(AuthError::EmailTaken);
        }

        let password_hash = self.hash_password(&request.password)?;
        let is_admin = self.is_admin_email(&email);
        let full_name = request.full_name.unwrap_or_default();

        let row = sqlx::query(&format!(
            "INSERT INTO users (email, password_hash, full_name, is_admin)
             VALUES ($1, $2, $3, $4)
             RETURNING {USER_COLUMNS}"
        ))
        .bind(&email)
        .bind(&password_hash)
        .bind(&full_name)
        .bind(is_admin)
        .fetch_one(self.pool.as_ref())
        .await
        .map_err(|e| match &e {
            // The pre-check above races with concurrent registrations; the
            // unique index on email is the authority.
            sqlx::Error::Database(db) if db.is_unique_violation() => AuthError::EmailTaken,
            _ => AuthError::from(e),
        })?;

        let user = user_from_row(&row);
        tracing::info!(user_id = user.id, is_admin, "registered user");
        Ok(user)
    }

    /// Login a user
    ///
    /// Returns the user together with a freshly signed identity token.
    ///
    /// # Errors
    ///
    /// * `AuthError::InvalidCredentials` - Unknown email or wrong password
    pub async fn login(&self, request: LoginRequest) -> AuthResult<(User, String)> {
        let email = request.email.trim().to_lowercase();
        if email.is_empty() {
            return Err(AuthError::MissingField("email"));
        }
        if request.password.is_empty() {
            return Err(AuthError::MissingField("password"));
        }

        let row = sqlx::query(&format!(
            "SELECT {USER_COLUMNS}, password_hash FROM users WHERE email = $1"
        ))
        .bind(&email)
        .fetch_optional(self.pool.as_ref())
        .await?
        .ok_or(AuthError::InvalidCredentials)?;

        let password_hash: String = row.get("password_hash");
        self.verify_password(&request.password, &password_hash)?;

        let user = user_from_row(&row);
        let token = self.issue_token(&user)?;
        Ok((user, token))
    }

    /// Sign an identity token for a user
    ///
    /// The token carries `{id, email}` and expires after the configured
    /// lifetime (7 days by default).
    pub fn issue_token(&self, user: &User) -> AuthResult<String> {
        let now = Utc::now();
        let claims = TokenClaims {
            sub: user.id,
            email: user.email.clone(),
            exp: (now + self.config.token_ttl).timestamp(),
            iat: now.timestamp(),
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.config.jwt_secret.as_bytes()),
        )?;

        Ok(token)
    }

    /// Verify an identity token
    ///
    /// # Errors
    ///
    /// * `AuthError::InvalidToken` - Bad signature, malformed token, or expired
    pub fn verify_token(&self, token: &str) -> AuthResult<TokenClaims> {
        let token_data = decode::<TokenClaims>(
            token,
            &DecodingKey::from_secret(self.config.jwt_secret.as_bytes()),
            &Validation::default(),
        )
        .map_err(|_| AuthError::InvalidToken)?;

        Ok(token_data.claims)
    }

    /// Check that a user holds the admin flag
    ///
    /// # Errors
    ///
    /// * `AuthError::Forbidden` - User record absent or not an admin
    /// * `AuthError::Database` - The lookup itself failed
    pub async fn require_admin(&self, user_id: UserId) -> AuthResult<()> {
        let row = sqlx::query("SELECT is_admin FROM users WHERE id = $1")
            .bind(user_id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        match row {
            Some(row) if row.get::<bool, _>("is_admin") => Ok(()),
            _ => Err(AuthError::Forbidden),
        }
    }

    /// Fetch a user by id
    pub async fn get_user(&self, user_id: UserId) -> AuthResult<User> {
        let row = sqlx::query(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
            .bind(user_id)
            .fetch_optional(self.pool.as_ref())
            .await?
            .ok_or(AuthError::UserNotFound)?;

        Ok(user_from_row(&row))
    }

    /// List users ordered by balance descending, capped at `limit`
    pub async fn list_users_by_balance(&self, limit: i64) -> AuthResult<Vec<User>> {
        let rows = sqlx::query(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY balance DESC, id ASC LIMIT $1"
        ))
        .bind(limit)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.iter().map(user_from_row).collect())
    }

    fn is_admin_email(&self, email: &str) -> bool {
        self.config
            .admin_emails
            .iter()
            .any(|admin| admin.eq_ignore_ascii_case(email))
    }

    /// Hash password with Argon2id + pepper
    fn hash_password(&self, password: &str) -> AuthResult<String> {
        let peppered = format!("{}{}", password, self.config.pepper);
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();

        Ok(argon2
            .hash_password(peppered.as_bytes(), &salt)
            .map_err(|_| AuthError::HashingFailed)?
            .to_string())
    }

    /// Verify password against hash
    fn verify_password(&self, password: &str, hash: &str) -> AuthResult<()> {
        let peppered = format!("{}{}", password, self.config.pepper);
        let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;
        let argon2 = Argon2::default();

        argon2
            .verify_password(peppered.as_bytes(), &parsed_hash)
            .map_err(|_| AuthError::InvalidCredentials)
    }
}

fn user_from_row(row: &PgRow) -> User {
    User {
        id: row.get("id"),
        email: row.get("email"),
        full_name: row.get("full_name"),
        balance: row.get("balance"),
        is_admin: row.get("is_admin"),
        created_at: row.get("created_at"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use sqlx::postgres::PgPoolOptions;

    // A lazy pool never connects, so validation and token paths are testable
    // without a running database.
    fn lazy_manager(config: AuthConfig) -> AuthManager {
        let pool = PgPoolOptions::new()
            .connect_lazy("postgres://localhost/unused")
            .expect("lazy pool");
        AuthManager::new(Arc::new(pool), config)
    }

    fn test_user(id: i64, email: &str) -> User {
        User {
            id,
            email: email.to_string(),
            full_name: String::new(),
            balance: Decimal::ZERO,
            is_admin: false,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn token_round_trip() {
        let auth = lazy_manager(AuthConfig::new("pepper".into(), "secret".into()));
        let user = test_user(7, "punter@example.com");

        let token = auth.issue_token(&user).expect("token should sign");
        let claims = auth.verify_token(&token).expect("token should verify");

        assert_eq!(claims.sub, 7);
        assert_eq!(claims.email, "punter@example.com");
        assert!(claims.exp > claims.iat);
    }

    #[tokio::test]
    async fn expired_token_rejected() {
        let mut config = AuthConfig::new("pepper".into(), "secret".into());
        config.token_ttl = Duration::seconds(-120);
        let auth = lazy_manager(config);

        let token = auth
            .issue_token(&test_user(1, "late@example.com"))
            .expect("token should sign");
        assert!(matches!(
            auth.verify_token(&token),
            Err(AuthError::InvalidToken)
        ));
    }

    #[tokio::test]
    async fn token_rejected_with_wrong_secret() {
        let signer = lazy_manager(AuthConfig::new("pepper".into(), "secret-a".into()));
        let verifier = lazy_manager(AuthConfig::new("pepper".into(), "secret-b".into()));

        let token = signer
            .issue_token(&test_user(1, "a@example.com"))
            .expect("token should sign");
        assert!(matches!(
            verifier.verify_token(&token),
            Err(AuthError::InvalidToken)
        ));
    }

    #[tokio::test]
    async fn admin_email_match_is_case_insensitive() {
        let mut config = AuthConfig::new("pepper".into(), "secret".into());
        config.admin_emails = vec!["Boss@Example.com".to_string()];
        let auth = lazy_manager(config);

        assert!(auth.is_admin_email("boss@example.com"));
        assert!(!auth.is_admin_email("punter@example.com"));
    }

    #[tokio::test]
    async fn register_requires_email_and_password() {
        let auth = lazy_manager(AuthConfig::new("pepper".into(), "secret".into()));

        let err = auth
            .register(RegisterRequest {
                email: "  ".to_string(),
                password: "p".to_string(),
                full_name: None,
            })
            .await
            .expect_err("blank email must fail");
        assert!(matches!(err, AuthError::MissingField("email")));

        let err = auth
            .register(RegisterRequest {
                email: "a@x.com".to_string(),
                password: String::new(),
                full_name: None,
            })
            .await
            .expect_err("blank password must fail");
        assert!(matches!(err, AuthError::MissingField("password")));
    }
}
