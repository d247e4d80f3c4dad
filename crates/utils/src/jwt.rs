//! Session tokens carried in the `token` cookie.

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Lifetime of a session token and of the cookie holding it.
pub const TOKEN_TTL_HOURS: i64 = 24;

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("failed to sign token: {0}")]
    Encode(#[source] jsonwebtoken::errors::Error),
    #[error("invalid or expired token")]
    Invalid(#[source] jsonwebtoken::errors::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionClaims {
    pub sub: Uuid,
    pub iat: i64,
    pub exp: i64,
}

pub fn issue_token(user_id: Uuid, secret: &[u8]) -> Result<String, TokenError> {
    let now = Utc::now();
    let claims = SessionClaims {
        sub: user_id,
        iat: now.timestamp(),
        exp: (now + Duration::hours(TOKEN_TTL_HOURS)).timestamp(),
    };
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret),
    )
    .map_err(TokenError::Encode)
}

pub fn verify_token(token: &str, secret: &[u8]) -> Result<SessionClaims, TokenError> {
    let validation = Validation::new(Algorithm::HS256);
    decode::<SessionClaims>(token, &DecodingKey::from_secret(secret), &validation)
        .map(|data| data.claims)
        .map_err(TokenError::Invalid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_and_verify_token() {
        let user_id = Uuid::new_v4();
        let token = issue_token(user_id, b"secret").unwrap();
        let claims = verify_token(&token, b"secret").unwrap();
        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.exp - claims.iat, TOKEN_TTL_HOURS * 3600);
    }

    #[test]
    fn test_verify_rejects_wrong_secret() {
        let token = issue_token(Uuid::new_v4(), b"secret").unwrap();
        assert!(matches!(
            verify_token(&token, b"other"),
            Err(TokenError::Invalid(_))
        ));
    }

    #[test]
    fn test_verify_rejects_garbage() {
        assert!(verify_token("not-a-jwt", b"secret").is_err());
    }
}
