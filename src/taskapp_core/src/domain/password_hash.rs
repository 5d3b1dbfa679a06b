use std::fmt;

use secrecy::{ExposeSecret, Secret};

use super::user::UserError;

/// Shortest accepted hash; matches the output length of common password hashers.
pub const MIN_PASSWORD_HASH_LENGTH: usize = 60;

const REDACTED: &str = "PasswordHash[PROTECTED]";

/// An opaque, precomputed password hash. Hashing itself is the job of the
/// `PasswordHasher` port; this type only guards the shape of its output.
#[derive(Clone)]
pub struct PasswordHash(Secret<String>);

impl PasswordHash {
    pub fn parse(hash: impl Into<String>) -> Result<Self, UserError> {
        let hash = hash.into();
        if hash.chars().count() < MIN_PASSWORD_HASH_LENGTH {
            return Err(UserError::InvalidPasswordFormat);
        }
        Ok(Self(Secret::new(hash)))
    }

    /// Raw hash string, for adapters that persist or verify it.
    pub fn expose_secret(&self) -> &str {
        self.0.expose_secret()
    }
}

impl TryFrom<Secret<String>> for PasswordHash {
    type Error = UserError;

    fn try_from(value: Secret<String>) -> Result<Self, Self::Error> {
        Self::parse(value.expose_secret().as_str())
    }
}

impl PartialEq for PasswordHash {
    fn eq(&self, other: &Self) -> bool {
        self.0.expose_secret() == other.0.expose_secret()
    }
}

impl Eq for PasswordHash {}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REDACTED)
    }
}

impl fmt::Display for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REDACTED)
    }
}
