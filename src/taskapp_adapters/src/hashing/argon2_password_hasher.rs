use argon2::{
    Algorithm, Argon2, Params, PasswordVerifier, Version,
    password_hash::{self, PasswordHasher as _, SaltString, rand_core},
};
use secrecy::{ExposeSecret, Secret};
use taskapp_core::{PasswordHash, PasswordHasher, PasswordHasherError, PasswordMatchVerifier};

use crate::config::Argon2Settings;

/// Argon2id hasher. Hashing and verification run on the blocking pool so the
/// async workers are never stalled by the key derivation.
#[derive(Clone)]
pub struct Argon2PasswordHasher {
    params: Params,
}

impl Argon2PasswordHasher {
    pub fn new(settings: &Argon2Settings) -> Result<Self, PasswordHasherError> {
        let params = Params::new(
            settings.memory_kib,
            settings.iterations,
            settings.parallelism,
            None,
        )
        .map_err(|e| PasswordHasherError::HashingFailed(e.to_string()))?;

        Ok(Self { params })
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }
}

#[async_trait::async_trait]
impl PasswordHasher for Argon2PasswordHasher {
    #[tracing::instrument(name = "Computing password hash", skip_all)]
    async fn hash(
        &self,
        raw_password: &Secret<String>,
    ) -> Result<PasswordHash, PasswordHasherError> {
        let current_span = tracing::Span::current();
        let hasher = self.argon2();
        let password = Secret::new(raw_password.expose_secret().clone());

        let encoded = tokio::task::spawn_blocking(move || {
            current_span.in_scope(|| {
                let salt = SaltString::generate(rand_core::OsRng);
                hasher
                    .hash_password(password.expose_secret().as_bytes(), &salt)
                    .map(|h| h.to_string())
                    .map_err(|e| PasswordHasherError::HashingFailed(e.to_string()))
            })
        })
        .await
        .map_err(|e| PasswordHasherError::HashingFailed(e.to_string()))??;

        PasswordHash::parse(encoded).map_err(|e| PasswordHasherError::HashingFailed(e.to_string()))
    }
}

#[async_trait::async_trait]
impl PasswordMatchVerifier for Argon2PasswordHasher {
    #[tracing::instrument(name = "Verify password hash", skip_all)]
    async fn matches(&self, raw_password: &Secret<String>, hash: &PasswordHash) -> bool {
        let current_span = tracing::Span::current();
        let verifier = self.argon2();
        let password = Secret::new(raw_password.expose_secret().clone());
        let expected = hash.expose_secret().to_owned();

        let result = tokio::task::spawn_blocking(move || {
            current_span.in_scope(|| {
                let expected = password_hash::PasswordHash::new(&expected)?;
                verifier.verify_password(password.expose_secret().as_bytes(), &expected)
            })
        })
        .await;

        match result {
            Ok(Ok(())) => true,
            Ok(Err(password_hash::Error::Password)) => false,
            Ok(Err(e)) => {
                tracing::warn!(error = %e, "Stored password hash could not be verified");
                false
            }
            Err(e) => {
                tracing::error!(error = %e, "Password verification task failed");
                false
            }
        }
    }
}
