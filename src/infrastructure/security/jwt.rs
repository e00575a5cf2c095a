use anyhow::{Context, Result};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::AuthConfig;

/// JWT Claims structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // User ID
    pub email: String,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    pub fn user_id(&self) -> Result<Uuid> {
        Uuid::parse_str(&self.sub).context("subject is not a user id")
    }
}

/// Signs and verifies the HS256 session tokens carried in the auth cookie.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
}

impl TokenService {
    pub fn new(secret: &str, ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
        }
    }

    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(&config.jwt_secret, Duration::days(config.token_ttl_days))
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn sign(&self, user_id: Uuid, email: &str) -> Result<String> {
        let now = Utc::now();
        let expiration = now
            .checked_add_signed(self.ttl)
            .context("token expiry out of range")?;

        self.encode_claims(&Claims {
            sub: user_id.to_string(),
            email: email.to_owned(),
            iat: now.timestamp(),
            exp: expiration.timestamp(),
        })
    }

    fn encode_claims(&self, claims: &Claims) -> Result<String> {
        Ok(encode(&Header::default(), claims, &self.encoding_key)?)
    }

    /// Verify and decode a token, rejecting bad signatures and expired ones.
    pub fn verify(&self, token: &str) -> Result<Claims> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &Validation::default())?;
        Ok(token_data.claims)
    }
}
