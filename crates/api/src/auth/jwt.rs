//! HS256 bearer tokens.
//!
//! The identity provider signs tokens with a secret shared with this service.
//! `sub` is a client, instructor or admin id depending on `role`. Tokens can
//! also be minted locally with the `studio-token` binary.

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use studio_core::roles::Actor;
use studio_core::types::DbId;
use uuid::Uuid;

const DEFAULT_TTL_MINS: i64 = 15;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: DbId,
    pub role: String,
    pub exp: i64,
    pub iat: i64,
    /// Absent on some provider-issued tokens.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jti: Option<String>,
}

/// Signing secret and lifetime of locally minted tokens.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub access_token_expiry_mins: i64,
}

impl JwtConfig {
    /// Read `JWT_SECRET` (required, non-empty) and `JWT_ACCESS_EXPIRY_MINS`
    /// (default 15) through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        let secret = lookup("JWT_SECRET")
            .filter(|s| !s.is_empty())
            .ok_or_else(|| "JWT_SECRET must be set and non-empty".to_string())?;

        let access_token_expiry_mins = match lookup("JWT_ACCESS_EXPIRY_MINS") {
            Some(raw) => match raw.parse::<i64>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(format!(
                        "JWT_ACCESS_EXPIRY_MINS must be a positive integer, got '{raw}'"
                    ))
                }
            },
            None => DEFAULT_TTL_MINS,
        };

        Ok(Self {
            secret,
            access_token_expiry_mins,
        })
    }

    /// # Panics
    ///
    /// Panics if the secret is missing or the expiry is malformed.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
            .unwrap_or_else(|e| panic!("Invalid JWT configuration: {e}"))
    }

    /// Mint a token for `actor`, valid for `access_token_expiry_mins`.
    pub fn issue(&self, actor: Actor) -> Result<String, jsonwebtoken::errors::Error> {
        let iat = chrono::Utc::now().timestamp();
        let claims = Claims {
            sub: actor.id(),
            role: actor.role().to_string(),
            exp: iat + self.access_token_expiry_mins * 60,
            iat,
            jti: Some(Uuid::new_v4().to_string()),
        };
        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
    }

    /// Check signature and expiry, then return the claims.
    pub fn verify(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::new(Algorithm::HS256),
        )?;
        Ok(data.claims)
    }
}
