pub mod domain;
pub mod ports;

// Re-export commonly used types for convenience
pub use domain::{
    email::EmailAddress,
    password_hash::{MIN_PASSWORD_HASH_LENGTH, PasswordHash},
    role::{RoleSet, UnknownRole, UserRole},
    status::UserStatus,
    user::{MAX_FAILED_LOGIN_ATTEMPTS, User, UserError, UserSnapshot},
    user_id::UserId,
};

pub use ports::{
    repositories::{UserRepository, UserRepositoryError},
    services::{
        Clock, PasswordHasher, PasswordHasherError, PasswordMatchVerifier, TokenGenerator,
        TokenGeneratorError,
    },
};
