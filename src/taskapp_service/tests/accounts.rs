use std::sync::{Arc, Once};

use chrono::{DateTime, Duration, TimeZone, Utc};
use secrecy::{ExposeSecret, Secret};
use taskapp_adapters::{
    AccountSettings, Argon2Settings, FixedClock, JwtSettings, LoginSettings,
    telemetry::init_tracing,
};
use taskapp_application::{
    LoginUserCommand, LoginUserError, LoginUserResult, RegisterUserCommand, RegisterUserError,
};
use taskapp_core::{
    Clock, EmailAddress, User, UserRepository, UserRepositoryError, UserRole, UserStatus,
};
use taskapp_service::InMemoryAccountService;

static TRACING: Once = Once::new();

fn start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 10, 0, 0).unwrap()
}

fn settings() -> AccountSettings {
    AccountSettings {
        jwt: JwtSettings {
            secret: Secret::new("integration-secret".to_owned()),
            time_to_live: 600,
            issuer: "taskapp".to_owned(),
        },
        login: LoginSettings::default(),
        argon2: Argon2Settings {
            memory_kib: 64,
            iterations: 1,
            parallelism: 1,
        },
    }
}

struct TestApp {
    service: InMemoryAccountService<FixedClock>,
    clock: Arc<FixedClock>,
}

impl TestApp {
    fn new() -> Self {
        TRACING.call_once(|| {
            let _ = init_tracing();
        });

        let clock = Arc::new(FixedClock::new(start()));
        let service = InMemoryAccountService::in_memory(&settings(), Arc::clone(&clock)).unwrap();
        Self { service, clock }
    }

    async fn register(&self, email: &str, password: &str) {
        self.service
            .register(RegisterUserCommand::new(email, password))
            .await
            .unwrap();
    }

    async fn login(
        &self,
        email: &str,
        password: &str,
    ) -> Result<LoginUserResult, LoginUserError> {
        self.service
            .login(LoginUserCommand::new(email, password))
            .await
    }

    async fn stored(&self, email: &str) -> User {
        self.service
            .user_repository()
            .find_by_email(&EmailAddress::parse(email).unwrap())
            .await
            .unwrap()
    }
}

#[tokio::test]
async fn register_normalizes_email_and_stamps_creation_time() {
    let app = TestApp::new();

    let result = app
        .service
        .register(RegisterUserCommand::new("User@Example.com ", "hunter2pass"))
        .await
        .unwrap();

    assert_eq!(result.email.as_str(), "user@example.com");
    assert_eq!(result.created_at, start());

    let stored = app.stored("user@example.com").await;
    assert_eq!(stored.id(), result.user_id);
    assert_eq!(stored.status(), UserStatus::Active);
    assert!(stored.has_role(UserRole::User));
    assert!(stored.password_hash().expose_secret().starts_with("$argon2id$"));
}

#[tokio::test]
async fn register_twice_with_same_normalized_email_fails() {
    let app = TestApp::new();
    app.register("dup@example.com", "hunter2pass").await;
    let original_hash = app.stored("dup@example.com").await.password_hash().clone();

    let result = app
        .service
        .register(RegisterUserCommand::new("  DUP@example.com", "other-password"))
        .await;

    assert!(matches!(result, Err(RegisterUserError::EmailAlreadyExists)));
    assert_eq!(app.stored("dup@example.com").await.password_hash(), &original_hash);
}

#[tokio::test]
async fn login_issues_token_and_records_login_time() {
    let app = TestApp::new();
    app.register("login@example.com", "hunter2pass").await;
    app.clock.advance(Duration::minutes(3));

    let result = app.login("login@example.com", "hunter2pass").await.unwrap();
    assert!(!result.token.expose_secret().is_empty());

    let stored = app.stored("login@example.com").await;
    assert_eq!(stored.last_login_at(), Some(app.clock.now()));

    let claims = app.service.token_generator().decode(&result.token).unwrap();
    assert_eq!(claims.sub, stored.id().to_string());
    assert_eq!(claims.email, "login@example.com");
    assert_eq!(claims.roles, vec![UserRole::User]);
    assert_eq!(claims.exp, app.clock.now().timestamp() + 600);
}

#[tokio::test]
async fn three_failures_lock_the_account_until_the_window_elapses() {
    let app = TestApp::new();
    app.register("lock@example.com", "hunter2pass").await;

    for _ in 0..3 {
        app.clock.advance(Duration::seconds(10));
        let result = app.login("lock@example.com", "wrong-password").await;
        assert!(matches!(result, Err(LoginUserError::InvalidCredentials)));
    }

    let locked_at = app.clock.now();
    let stored = app.stored("lock@example.com").await;
    assert_eq!(stored.failed_login_attempts(), 3);
    assert_eq!(stored.account_locked_until(), Some(locked_at + Duration::minutes(15)));

    app.clock.advance(Duration::minutes(5));
    let result = app.login("lock@example.com", "hunter2pass").await;
    assert!(matches!(result, Err(LoginUserError::InvalidCredentials)));

    let result = app.login("lock@example.com", "wrong-password").await;
    assert!(matches!(result, Err(LoginUserError::InvalidCredentials)));
    let stored = app.stored("lock@example.com").await;
    assert_eq!(stored.failed_login_attempts(), 3);
    assert_eq!(stored.account_locked_until(), Some(locked_at + Duration::minutes(15)));

    app.clock.set(locked_at + Duration::minutes(15));
    let result = app.login("lock@example.com", "hunter2pass").await;
    assert!(result.is_ok());

    let stored = app.stored("lock@example.com").await;
    assert_eq!(stored.failed_login_attempts(), 0);
    assert_eq!(stored.account_locked_until(), None);
}

#[tokio::test]
async fn configured_lock_duration_is_applied() {
    TRACING.call_once(|| {
        let _ = init_tracing();
    });
    let mut settings = settings();
    settings.login.lock_duration_secs = 60;
    let clock = Arc::new(FixedClock::new(start()));
    let service = InMemoryAccountService::in_memory(&settings, Arc::clone(&clock)).unwrap();

    service
        .register(RegisterUserCommand::new("short@example.com", "hunter2pass"))
        .await
        .unwrap();
    for _ in 0..3 {
        let _ = service
            .login(LoginUserCommand::new("short@example.com", "nope"))
            .await;
    }

    let stored = service
        .user_repository()
        .find_by_email(&EmailAddress::parse("short@example.com").unwrap())
        .await
        .unwrap();
    assert_eq!(stored.account_locked_until(), Some(start() + Duration::seconds(60)));
}

#[tokio::test]
async fn login_for_unknown_email_reports_not_found() {
    let app = TestApp::new();

    let result = app.login("ghost@example.com", "hunter2pass").await;

    assert!(matches!(
        result,
        Err(LoginUserError::UserRepositoryError(
            UserRepositoryError::UserNotFound
        ))
    ));
}
