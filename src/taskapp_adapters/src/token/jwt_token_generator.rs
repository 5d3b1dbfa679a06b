use chrono::Duration;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use taskapp_core::{Clock, TokenGenerator, TokenGeneratorError, User, UserRole};
use thiserror::Error;

use crate::config::JwtSettings;

#[derive(Clone)]
pub struct JwtTokenConfig {
    pub secret: Secret<String>,
    pub time_to_live_in_seconds: i64,
    pub issuer: String,
}

impl JwtTokenConfig {
    pub fn as_bytes(&self) -> &[u8] {
        self.secret.expose_secret().as_bytes()
    }
}

impl From<&JwtSettings> for JwtTokenConfig {
    fn from(settings: &JwtSettings) -> Self {
        Self {
            secret: settings.secret.clone(),
            time_to_live_in_seconds: settings.time_to_live,
            issuer: settings.issuer.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub email: String,
    pub roles: Vec<UserRole>,
    pub iat: i64,
    pub exp: i64,
    pub iss: String,
}

#[derive(Debug, Error)]
pub enum TokenValidationError {
    #[error("Token error: {0}")]
    TokenError(#[from] jsonwebtoken::errors::Error),
    #[error("Token has expired")]
    Expired,
}

/// Issues HS256-signed JWTs. Timestamps come from the injected clock, so
/// expiry is checked against the same clock in [`JwtTokenGenerator::decode`].
#[derive(Clone)]
pub struct JwtTokenGenerator<C> {
    config: JwtTokenConfig,
    clock: C,
}

impl<C: Clock> JwtTokenGenerator<C> {
    pub fn new(config: JwtTokenConfig, clock: C) -> Self {
        Self { config, clock }
    }

    pub fn decode(&self, token: &Secret<String>) -> Result<Claims, TokenValidationError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.set_issuer(&[&self.config.issuer]);
        validation.set_required_spec_claims(&["sub", "exp", "iss"]);

        let claims = decode::<Claims>(
            token.expose_secret(),
            &DecodingKey::from_secret(self.config.as_bytes()),
            &validation,
        )?
        .claims;

        if claims.exp <= self.clock.now().timestamp() {
            return Err(TokenValidationError::Expired);
        }

        Ok(claims)
    }
}

#[async_trait::async_trait]
impl<C: Clock> TokenGenerator for JwtTokenGenerator<C> {
    #[tracing::instrument(name = "Generating auth token", skip_all)]
    async fn generate(&self, user: &User) -> Result<Secret<String>, TokenGeneratorError> {
        let time_to_live = Duration::try_seconds(self.config.time_to_live_in_seconds).ok_or(
            TokenGeneratorError::GenerationFailed("Failed to create token duration".to_string()),
        )?;

        let issued_at = self.clock.now();
        let expires_at = issued_at
            .checked_add_signed(time_to_live)
            .ok_or(TokenGeneratorError::GenerationFailed(
                "Duration out of range".to_string(),
            ))?;

        let claims = Claims {
            sub: user.id().to_string(),
            email: user.email().to_string(),
            roles: user.roles().iter().collect(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
            iss: self.config.issuer.clone(),
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.config.as_bytes()),
        )
        .map(Secret::new)
        .map_err(|e| TokenGeneratorError::GenerationFailed(e.to_string()))
    }
}
