use crate::models::Role;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while authenticating a caller
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Missing or malformed Authorization header")]
    MissingToken,

    #[error("Invalid token: {0}")]
    InvalidToken(#[from] jsonwebtoken::errors::Error),

    #[error("Expected a {expected:?} token")]
    WrongTokenKind { expected: TokenKind },

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password hashing failed: {0}")]
    Hashing(String),
}

/// Which of the two token flavours a JWT is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

/// JWT claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    pub sub: String,
    pub role: Role,
    pub kind: TokenKind,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    pub fn user_id(&self) -> Result<i64, AuthError> {
        self.sub.parse().map_err(|_| AuthError::InvalidCredentials)
    }
}

/// Issues and validates HS256 access/refresh tokens
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl TokenService {
    pub fn new(secret: &str, access_ttl_mins: i64, refresh_ttl_days: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            access_ttl: Duration::minutes(access_ttl_mins),
            refresh_ttl: Duration::days(refresh_ttl_days),
        }
    }

    pub fn issue_access_token(&self, user_id: i64, role: Role) -> Result<String, AuthError> {
        self.issue(user_id, role, TokenKind::Access, self.access_ttl)
    }

    pub fn issue_refresh_token(&self, user_id: i64, role: Role) -> Result<String, AuthError> {
        self.issue(user_id, role, TokenKind::Refresh, self.refresh_ttl)
    }

    fn issue(&self, user_id: i64, role: Role, kind: TokenKind, ttl: Duration) -> Result<String, AuthError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            role,
            kind,
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        };

        Ok(encode(&Header::default(), &claims, &self.encoding_key)?)
    }

    /// Decode a token and check signature, expiry and kind
    pub fn validate(&self, token: &str, expected: TokenKind) -> Result<Claims, AuthError> {
        let data = decode::<Claims>(token, &self.decoding_key, &Validation::default())?;

        if data.claims.kind != expected {
            return Err(AuthError::WrongTokenKind { expected });
        }

        Ok(data.claims)
    }
}

/// Hash a password into a PHC string with a random salt
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::encode_b64(uuid::Uuid::new_v4().as_bytes())
        .map_err(|e| AuthError::Hashing(e.to_string()))?;

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AuthError::Hashing(e.to_string()))
}

/// Check a password against a stored PHC string
pub fn verify_password(password: &str, password_hash: &str) -> bool {
    match PasswordHash::new(password_hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(e) => {
            tracing::warn!("Stored password hash is unreadable: {}", e);
            false
        }
    }
}
