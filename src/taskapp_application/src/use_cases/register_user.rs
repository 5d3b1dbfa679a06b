use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, Secret};
use taskapp_core::{
    Clock, EmailAddress, PasswordHasher, PasswordHasherError, User, UserError, UserId,
    UserRepository, UserRepositoryError,
};

/// Input for the register use case
pub struct RegisterUserCommand {
    pub email: String,
    pub password: Secret<String>,
}

impl RegisterUserCommand {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: Secret::new(password.into()),
        }
    }
}

/// Identity of a freshly registered account
#[derive(Debug, Clone, PartialEq)]
pub struct RegisterUserResult {
    pub user_id: UserId,
    pub email: EmailAddress,
    pub created_at: DateTime<Utc>,
}

/// Error types specific to register use case
#[derive(Debug, thiserror::Error)]
pub enum RegisterUserError {
    #[error("Invalid registration data: {0}")]
    InvalidRegistrationData(&'static str),
    #[error("Email already in use")]
    EmailAlreadyExists,
    #[error("{0}")]
    UserError(#[from] UserError),
    #[error("User repository error: {0}")]
    UserRepositoryError(UserRepositoryError),
    #[error("Password hasher error: {0}")]
    PasswordHasherError(#[from] PasswordHasherError),
}

impl From<UserRepositoryError> for RegisterUserError {
    fn from(error: UserRepositoryError) -> Self {
        match error {
            // Lost a race against a concurrent registration for the same email
            UserRepositoryError::EmailAlreadyExists => Self::EmailAlreadyExists,
            other => Self::UserRepositoryError(other),
        }
    }
}

/// Register use case - creates a new account with the default role
pub struct RegisterUserUseCase<'a, R, H, C>
where
    R: UserRepository,
    H: PasswordHasher,
    C: Clock,
{
    user_repository: &'a R,
    password_hasher: &'a H,
    clock: &'a C,
}

impl<'a, R, H, C> RegisterUserUseCase<'a, R, H, C>
where
    R: UserRepository,
    H: PasswordHasher,
    C: Clock,
{
    pub fn new(user_repository: &'a R, password_hasher: &'a H, clock: &'a C) -> Self {
        Self {
            user_repository,
            password_hasher,
            clock,
        }
    }

    /// Execute the register use case
    ///
    /// # Arguments
    /// * `command` - Raw email and password as supplied by the caller
    ///
    /// # Returns
    /// The new user's id, normalized email and creation time, or
    /// RegisterUserError if the data is invalid or the email is taken
    #[tracing::instrument(name = "RegisterUserUseCase::execute", skip_all)]
    pub async fn execute(
        &self,
        command: RegisterUserCommand,
    ) -> Result<RegisterUserResult, RegisterUserError> {
        validate(&command)?;

        let email = EmailAddress::parse(&command.email)?;

        if self.user_repository.exists_by_email(&email).await? {
            tracing::debug!("Registration rejected, email already in use");
            return Err(RegisterUserError::EmailAlreadyExists);
        }

        let now = self.clock.now();

        let password_hash = self.password_hasher.hash(&command.password).await?;

        let user = User::create(email, password_hash, None, now);
        let user = self.user_repository.save(user).await?;

        tracing::info!(user_id = %user.id(), "User registered");

        Ok(RegisterUserResult {
            user_id: user.id(),
            email: user.email().clone(),
            created_at: user.created_at(),
        })
    }
}

fn validate(command: &RegisterUserCommand) -> Result<(), RegisterUserError> {
    if command.email.trim().is_empty() {
        return Err(RegisterUserError::InvalidRegistrationData(
            "Email is required",
        ));
    }
    if command.password.expose_secret().trim().is_empty() {
        return Err(RegisterUserError::InvalidRegistrationData(
            "Password is required",
        ));
    }
    Ok(())
}
