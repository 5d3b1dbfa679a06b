use chrono::Duration;
use secrecy::{ExposeSecret, Secret};
use taskapp_core::{
    Clock, EmailAddress, MAX_FAILED_LOGIN_ATTEMPTS, PasswordMatchVerifier, TokenGenerator,
    TokenGeneratorError, UserError, UserRepository, UserRepositoryError,
};

/// How long an account stays locked after too many failed logins.
pub const DEFAULT_LOCK_DURATION_MINUTES: i64 = 15;

/// Input for the login use case
pub struct LoginUserCommand {
    pub email: String,
    pub password: Secret<String>,
}

impl LoginUserCommand {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: Secret::new(password.into()),
        }
    }
}

/// Response from login use case
#[derive(Debug)]
pub struct LoginUserResult {
    pub token: Secret<String>,
}

/// Error types specific to login use case
#[derive(Debug, thiserror::Error)]
pub enum LoginUserError {
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("{0}")]
    UserError(#[from] UserError),
    #[error("User repository error: {0}")]
    UserRepositoryError(#[from] UserRepositoryError),
    #[error("Token generator error: {0}")]
    TokenGeneratorError(#[from] TokenGeneratorError),
}

/// Login use case - checks credentials, tracks failed attempts and issues a token
pub struct LoginUserUseCase<'a, R, V, T, C>
where
    R: UserRepository,
    V: PasswordMatchVerifier,
    T: TokenGenerator,
    C: Clock,
{
    user_repository: &'a R,
    password_verifier: &'a V,
    token_generator: &'a T,
    clock: &'a C,
    lock_duration: Duration,
}

impl<'a, R, V, T, C> LoginUserUseCase<'a, R, V, T, C>
where
    R: UserRepository,
    V: PasswordMatchVerifier,
    T: TokenGenerator,
    C: Clock,
{
    pub fn new(
        user_repository: &'a R,
        password_verifier: &'a V,
        token_generator: &'a T,
        clock: &'a C,
    ) -> Self {
        Self {
            user_repository,
            password_verifier,
            token_generator,
            clock,
            lock_duration: Duration::minutes(DEFAULT_LOCK_DURATION_MINUTES),
        }
    }

    pub fn with_lock_duration(mut self, lock_duration: Duration) -> Self {
        self.lock_duration = lock_duration;
        self
    }

    /// Execute the login use case
    ///
    /// A wrong password is recorded against the account and persisted before
    /// the call fails, so the failed attempt survives the error.
    ///
    /// # Arguments
    /// * `command` - Raw email and password as supplied by the caller
    ///
    /// # Returns
    /// LoginUserResult carrying the issued token, or LoginUserError. Blank
    /// input, a wrong password and a locked account all report
    /// `InvalidCredentials`.
    #[tracing::instrument(name = "LoginUserUseCase::execute", skip_all)]
    pub async fn execute(
        &self,
        command: LoginUserCommand,
    ) -> Result<LoginUserResult, LoginUserError> {
        if command.email.trim().is_empty() || command.password.expose_secret().trim().is_empty() {
            return Err(LoginUserError::InvalidCredentials);
        }

        let now = self.clock.now();

        let email = EmailAddress::parse(&command.email)?;
        let mut user = self.user_repository.find_by_email(&email).await?;

        if !self
            .password_verifier
            .matches(&command.password, user.password_hash())
            .await
        {
            user.record_failed_login(now, self.lock_duration);
            tracing::warn!(
                user_id = %user.id(),
                failed_attempts = user.failed_login_attempts(),
                max_attempts = MAX_FAILED_LOGIN_ATTEMPTS,
                locked = user.is_locked(now),
                "Failed login attempt"
            );
            self.user_repository.save(user).await?;
            return Err(LoginUserError::InvalidCredentials);
        }

        user.record_successful_login(now).map_err(|e| match e {
            UserError::UserIsLocked => {
                tracing::warn!("Login with correct password rejected, account is locked");
                LoginUserError::InvalidCredentials
            }
            other => LoginUserError::UserError(other),
        })?;

        let user = self.user_repository.save(user).await?;
        let token = self.token_generator.generate(&user).await?;

        tracing::info!(user_id = %user.id(), "User logged in");

        Ok(LoginUserResult { token })
    }
}
