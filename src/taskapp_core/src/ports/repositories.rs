use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{email::EmailAddress, user::User};

// UserRepository port trait and errors
#[derive(Debug, Error)]
pub enum UserRepositoryError {
    #[error("User not found")]
    UserNotFound,
    #[error("Email already in use")]
    EmailAlreadyExists,
    #[error("Unexpected error {0}")]
    UnexpectedError(String),
}

impl PartialEq for UserRepositoryError {
    fn eq(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::UserNotFound, Self::UserNotFound)
                | (Self::EmailAlreadyExists, Self::EmailAlreadyExists)
                | (Self::UnexpectedError(_), Self::UnexpectedError(_))
        )
    }
}

/// Persistence for the `User` aggregate.
///
/// Implementations must serialize concurrent writers for the same identity and
/// keep emails unique: `save` of a user whose email belongs to a different
/// `UserId` fails with [`UserRepositoryError::EmailAlreadyExists`].
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Inserts or replaces the user, returning the stored aggregate.
    async fn save(&self, user: User) -> Result<User, UserRepositoryError>;
    async fn exists_by_email(&self, email: &EmailAddress) -> Result<bool, UserRepositoryError>;
    /// Fails with [`UserRepositoryError::UserNotFound`] on a miss.
    async fn find_by_email(&self, email: &EmailAddress) -> Result<User, UserRepositoryError>;
}
