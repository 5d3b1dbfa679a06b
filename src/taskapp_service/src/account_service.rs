use std::sync::Arc;

use chrono::Duration;
use taskapp_adapters::{
    AccountSettings, Argon2PasswordHasher, HashMapUserRepository, JwtTokenConfig,
    JwtTokenGenerator,
};
use taskapp_application::{
    LoginUserCommand, LoginUserError, LoginUserResult, LoginUserUseCase, RegisterUserCommand,
    RegisterUserError, RegisterUserResult, RegisterUserUseCase,
};
use taskapp_core::{
    Clock, PasswordHasher, PasswordHasherError, PasswordMatchVerifier, TokenGenerator,
    UserRepository,
};

/// Account service wired from the default in-memory adapters.
pub type InMemoryAccountService<C> = AccountService<
    HashMapUserRepository,
    Argon2PasswordHasher,
    Argon2PasswordHasher,
    JwtTokenGenerator<Arc<C>>,
    Arc<C>,
>;

/// Owns one instance of every port and runs the account use cases against them.
pub struct AccountService<R, H, V, T, C> {
    user_repository: R,
    password_hasher: H,
    password_verifier: V,
    token_generator: T,
    clock: C,
    lock_duration: Duration,
}

impl<R, H, V, T, C> AccountService<R, H, V, T, C>
where
    R: UserRepository,
    H: PasswordHasher,
    V: PasswordMatchVerifier,
    T: TokenGenerator,
    C: Clock,
{
    /// Create a new AccountService from its ports
    ///
    /// # Arguments
    /// * `user_repository` - Where accounts are persisted
    /// * `password_hasher` - Hashes passwords at registration
    /// * `password_verifier` - Checks passwords at login
    /// * `token_generator` - Issues the token returned by a successful login
    /// * `clock` - Source of the current time for both use cases
    pub fn new(
        user_repository: R,
        password_hasher: H,
        password_verifier: V,
        token_generator: T,
        clock: C,
    ) -> Self {
        Self {
            user_repository,
            password_hasher,
            password_verifier,
            token_generator,
            clock,
            lock_duration: Duration::minutes(taskapp_application::DEFAULT_LOCK_DURATION_MINUTES),
        }
    }

    pub fn with_lock_duration(mut self, lock_duration: Duration) -> Self {
        self.lock_duration = lock_duration;
        self
    }

    pub async fn register(
        &self,
        command: RegisterUserCommand,
    ) -> Result<RegisterUserResult, RegisterUserError> {
        RegisterUserUseCase::new(&self.user_repository, &self.password_hasher, &self.clock)
            .execute(command)
            .await
    }

    pub async fn login(
        &self,
        command: LoginUserCommand,
    ) -> Result<LoginUserResult, LoginUserError> {
        LoginUserUseCase::new(
            &self.user_repository,
            &self.password_verifier,
            &self.token_generator,
            &self.clock,
        )
        .with_lock_duration(self.lock_duration)
        .execute(command)
        .await
    }

    pub fn user_repository(&self) -> &R {
        &self.user_repository
    }

    pub fn token_generator(&self) -> &T {
        &self.token_generator
    }
}

impl<C: Clock> InMemoryAccountService<C> {
    /// Builds the service from settings: an empty in-memory repository, an
    /// Argon2id hasher used for both hashing and verification, and a JWT
    /// generator sharing `clock` with the use cases.
    pub fn in_memory(
        settings: &AccountSettings,
        clock: Arc<C>,
    ) -> Result<Self, PasswordHasherError> {
        let hasher = Argon2PasswordHasher::new(&settings.argon2)?;
        let token_generator =
            JwtTokenGenerator::new(JwtTokenConfig::from(&settings.jwt), Arc::clone(&clock));

        Ok(Self::new(
            HashMapUserRepository::new(),
            hasher.clone(),
            hasher,
            token_generator,
            clock,
        )
        .with_lock_duration(settings.login.lock_duration()))
    }
}
