use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: i64,
    pub iat: i64,
    pub jti: Uuid,
}

impl Claims {
    pub fn new(subject: impl Into<String>, lifetime: Duration) -> Self {
        let now = Utc::now();
        Self {
            sub: subject.into(),
            exp: (now + lifetime).timestamp(),
            iat: now.timestamp(),
            jti: Uuid::new_v4(),
        }
    }

    pub fn issued_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.iat, 0)
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }
}

/// Upper bound on token lifetime (ten years).
const MAX_EXPIRY_HOURS: u64 = 24 * 365 * 10;

#[derive(Debug, Error)]
pub enum JwtError {
    #[error("JWT secret not configured")]
    InvalidSecret,

    #[error("JWT generation error: {0}")]
    TokenGeneration(String),

    #[error("invalid token: {0}")]
    InvalidToken(String),
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IssuedToken {
    pub token: String,
    pub token_type: &'static str,
    /// Seconds until expiry.
    pub expires_in: i64,
}

/// HS256 signing and verification with one shared secret.
#[derive(Clone)]
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    lifetime: Duration,
    configured: bool,
}

impl JwtKeys {
    pub fn new(secret: &str, expiry_hours: u64) -> Self {
        let hours = expiry_hours.min(MAX_EXPIRY_HOURS) as i64;
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            lifetime: Duration::hours(hours),
            configured: !secret.is_empty(),
        }
    }

    pub fn issue(&self, subject: &str) -> Result<IssuedToken, JwtError> {
        self.issue_claims(&Claims::new(subject, self.lifetime))
    }

    pub fn issue_claims(&self, claims: &Claims) -> Result<IssuedToken, JwtError> {
        if !self.configured {
            return Err(JwtError::InvalidSecret);
        }
        let token = encode(&Header::default(), claims, &self.encoding)
            .map_err(|e| JwtError::TokenGeneration(e.to_string()))?;
        Ok(IssuedToken {
            token,
            token_type: "Bearer",
            expires_in: claims.exp - claims.iat,
        })
    }

    /// Check signature and expiry, returning the claims.
    pub fn verify(&self, token: &str) -> Result<Claims, JwtError> {
        if !self.configured {
            return Err(JwtError::InvalidSecret);
        }
        let validation = Validation::default();
        decode::<Claims>(token, &self.decoding, &validation)
            .map(|data| data.claims)
            .map_err(|e| JwtError::InvalidToken(e.to_string()))
    }
}

/// bcrypt is deliberately slow; call these from `spawn_blocking`.
pub fn hash_password(password: &str, cost: u32) -> Result<String, bcrypt::BcryptError> {
    bcrypt::hash(password, cost)
}

pub fn verify_password(password: &str, hash: &str) -> Result<bool, bcrypt::BcryptError> {
    bcrypt::verify(password, hash)
}
