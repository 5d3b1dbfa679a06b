use async_trait::async_trait;
use chrono::{DateTime, Utc};
use secrecy::Secret;
use thiserror::Error;

use crate::domain::{password_hash::PasswordHash, user::User};

#[derive(Debug, Error)]
pub enum PasswordHasherError {
    #[error("Failed to hash password: {0}")]
    HashingFailed(String),
}

/// Port trait for turning a raw password into a storable hash
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    async fn hash(
        &self,
        raw_password: &Secret<String>,
    ) -> Result<PasswordHash, PasswordHasherError>;
}

/// Port trait for checking a raw password against a stored hash
#[async_trait]
pub trait PasswordMatchVerifier: Send + Sync {
    async fn matches(&self, raw_password: &Secret<String>, hash: &PasswordHash) -> bool;
}

#[derive(Debug, Error)]
pub enum TokenGeneratorError {
    #[error("Failed to generate token: {0}")]
    GenerationFailed(String),
}

/// Port trait for issuing an authentication token to a logged-in user.
/// The token format is up to the implementation.
#[async_trait]
pub trait TokenGenerator: Send + Sync {
    async fn generate(&self, user: &User) -> Result<Secret<String>, TokenGeneratorError>;
}

/// The only source of "current time" for the use cases.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}

impl<C: Clock + ?Sized> Clock for std::sync::Arc<C> {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}
