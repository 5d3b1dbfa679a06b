//! # Taskapp - User Accounts
//!
//! Facade crate that re-exports the public API of the account components and
//! wires them together in [`AccountService`].
//!
//! ## Structure
//!
//! - **Core domain types**: `EmailAddress`, `PasswordHash`, `UserId`, `User`, etc.
//! - **Ports**: `UserRepository`, `PasswordHasher`, `PasswordMatchVerifier`,
//!   `TokenGenerator`, `Clock`
//! - **Use cases**: `RegisterUserUseCase`, `LoginUserUseCase`
//! - **Adapters**: `HashMapUserRepository`, `Argon2PasswordHasher`, `JwtTokenGenerator`, etc.
//! - **Service**: `AccountService` - registration and login over one set of ports

// ============================================================================
// Core Domain Types
// ============================================================================

/// Core domain types and value objects
pub mod core {
    pub use taskapp_core::*;
}

// Re-export most commonly used core types at the root level
pub use taskapp_core::{
    EmailAddress, MAX_FAILED_LOGIN_ATTEMPTS, PasswordHash, RoleSet, User, UserError, UserId,
    UserRole, UserSnapshot, UserStatus,
};

// ============================================================================
// Ports
// ============================================================================

/// Port trait definitions
pub mod ports {
    pub use taskapp_core::{
        Clock, PasswordHasher, PasswordHasherError, PasswordMatchVerifier, TokenGenerator,
        TokenGeneratorError, UserRepository, UserRepositoryError,
    };
}

pub use ports::{
    Clock, PasswordHasher, PasswordHasherError, PasswordMatchVerifier, TokenGenerator,
    TokenGeneratorError, UserRepository, UserRepositoryError,
};

// ============================================================================
// Use Cases (Application Layer)
// ============================================================================

/// Application use cases
pub mod use_cases {
    pub use taskapp_application::*;
}

pub use taskapp_application::{
    LoginUserCommand, LoginUserError, LoginUserResult, LoginUserUseCase, RegisterUserCommand,
    RegisterUserError, RegisterUserResult, RegisterUserUseCase,
};

// ============================================================================
// Adapters (Infrastructure)
// ============================================================================

/// Infrastructure adapters
pub mod adapters {
    pub use taskapp_adapters::{clock, config, hashing, persistence, telemetry, token};
}

pub use taskapp_adapters::{
    AccountSettings, Argon2PasswordHasher, FixedClock, HashMapUserRepository, JwtTokenConfig,
    JwtTokenGenerator, SystemClock,
};

// ============================================================================
// Account Service (Main Entry Point)
// ============================================================================

pub use taskapp_service::{AccountService, InMemoryAccountService};

// ============================================================================
// Re-export common external dependencies
// ============================================================================

/// Re-export async-trait for implementing port traits
pub use async_trait::async_trait;

/// Re-export secrecy for working with secrets
pub use secrecy::{ExposeSecret, Secret};
