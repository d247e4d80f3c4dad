//! Password accounts and cookie session tokens.

use db::models::user::{Credentials, User};
use secrecy::{ExposeSecret, SecretString};
use sqlx::SqlitePool;
use thiserror::Error;
use tracing::{debug, info};
use utils::jwt::{self, TokenError};
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("email or password is incorrect")]
    InvalidCredentials,
    #[error("an account with this email already exists")]
    EmailTaken,
    #[error("{0}")]
    InvalidInput(&'static str),
    #[error("authentication required")]
    Unauthenticated,
    #[error("token error: {0}")]
    Token(TokenError),
    #[error("password hashing failed: {0}")]
    Hash(#[from] bcrypt::BcryptError),
    #[error("password hashing task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// A signed-in user together with the token for their session cookie.
#[derive(Debug, Clone)]
pub struct Session {
    pub user: User,
    pub token: String,
}

#[derive(Clone)]
pub struct AuthService {
    pool: SqlitePool,
    jwt_secret: SecretString,
    bcrypt_cost: u32,
}

impl AuthService {
    pub fn new(pool: SqlitePool, jwt_secret: SecretString, bcrypt_cost: u32) -> Self {
        Self {
            pool,
            jwt_secret,
            bcrypt_cost,
        }
    }

    pub async fn register(&self, credentials: &Credentials) -> Result<Session, AuthError> {
        let email = normalize_email(&credentials.email)?;
        if credentials.password.is_empty() {
            return Err(AuthError::InvalidInput("password must not be empty"));
        }

        let password = credentials.password.clone();
        let cost = self.bcrypt_cost;
        let password_hash =
            tokio::task::spawn_blocking(move || bcrypt::hash(password, cost)).await??;

        let user = User::create(&self.pool, Uuid::new_v4(), &email, &password_hash)
            .await
            .map_err(|e| match e.as_database_error() {
                Some(db_err) if db_err.is_unique_violation() => AuthError::EmailTaken,
                _ => AuthError::Database(e),
            })?;

        info!(user_id = %user.id, "Registered user");
        self.session_for(user)
    }

    pub async fn login(&self, credentials: &Credentials) -> Result<Session, AuthError> {
        let email = normalize_email(&credentials.email)?;
        let Some(user) = User::find_by_email(&self.pool, &email).await? else {
            debug!("Login for unknown email");
            return Err(AuthError::InvalidCredentials);
        };

        let password = credentials.password.clone();
        let hash = user.password_hash.clone();
        let valid = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash)).await??;
        if !valid {
            debug!(user_id = %user.id, "Login with wrong password");
            return Err(AuthError::InvalidCredentials);
        }

        info!(user_id = %user.id, "User logged in");
        self.session_for(user)
    }

    /// Resolves the user behind a session token. Any token problem, or a
    /// token for a user that no longer exists, is `Unauthenticated`.
    pub async fn authenticate(&self, token: &str) -> Result<User, AuthError> {
        let claims = jwt::verify_token(token, self.secret()).map_err(|e| {
            debug!(error = %e, "Rejected session token");
            AuthError::Unauthenticated
        })?;
        User::find_by_id(&self.pool, claims.sub)
            .await?
            .ok_or(AuthError::Unauthenticated)
    }

    fn session_for(&self, user: User) -> Result<Session, AuthError> {
        let token = jwt::issue_token(user.id, self.secret()).map_err(AuthError::Token)?;
        Ok(Session { user, token })
    }

    fn secret(&self) -> &[u8] {
        self.jwt_secret.expose_secret().as_bytes()
    }
}

fn normalize_email(email: &str) -> Result<String, AuthError> {
    let email = email.trim().to_lowercase();
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(email),
        _ => Err(AuthError::InvalidInput("a valid email address is required")),
    }
}
