//! Hand-rolled port doubles shared by the use case tests.

use std::{
    collections::HashMap,
    sync::{
        Arc, Mutex,
        atomic::{AtomicBool, AtomicUsize, Ordering},
    },
};

use chrono::{DateTime, Duration, TimeZone, Utc};
use secrecy::{ExposeSecret, Secret};
use taskapp_core::{
    Clock, EmailAddress, PasswordHash, PasswordHasher, PasswordHasherError, PasswordMatchVerifier,
    TokenGenerator, TokenGeneratorError, User, UserRepository, UserRepositoryError,
};
use tokio::sync::RwLock;

#[derive(Clone, Default)]
pub struct MockUserRepository {
    users: Arc<RwLock<HashMap<EmailAddress, User>>>,
    exists_calls: Arc<AtomicUsize>,
    save_calls: Arc<AtomicUsize>,
    conflict_on_save: Arc<AtomicBool>,
}

impl MockUserRepository {
    pub async fn get(&self, email: &str) -> Option<User> {
        let email = EmailAddress::parse(email).ok()?;
        self.users.read().await.get(&email).cloned()
    }

    pub async fn insert(&self, user: User) {
        self.users.write().await.insert(user.email().clone(), user);
    }

    pub fn exists_calls(&self) -> usize {
        self.exists_calls.load(Ordering::SeqCst)
    }

    pub fn save_calls(&self) -> usize {
        self.save_calls.load(Ordering::SeqCst)
    }

    pub fn fail_saves_with_conflict(&self) {
        self.conflict_on_save.store(true, Ordering::SeqCst);
    }
}

#[async_trait::async_trait]
impl UserRepository for MockUserRepository {
    async fn save(&self, user: User) -> Result<User, UserRepositoryError> {
        self.save_calls.fetch_add(1, Ordering::SeqCst);
        if self.conflict_on_save.load(Ordering::SeqCst) {
            return Err(UserRepositoryError::EmailAlreadyExists);
        }
        self.users
            .write()
            .await
            .insert(user.email().clone(), user.clone());
        Ok(user)
    }

    async fn exists_by_email(&self, email: &EmailAddress) -> Result<bool, UserRepositoryError> {
        self.exists_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.users.read().await.contains_key(email))
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<User, UserRepositoryError> {
        self.users
            .read()
            .await
            .get(email)
            .cloned()
            .ok_or(UserRepositoryError::UserNotFound)
    }
}

/// Produces `mock$<password>` padded to a valid hash length.
#[derive(Clone, Default)]
pub struct MockPasswordHasher {
    hash_calls: Arc<AtomicUsize>,
}

impl MockPasswordHasher {
    pub fn hash_calls(&self) -> usize {
        self.hash_calls.load(Ordering::SeqCst)
    }

    pub fn hash_of(raw: &str) -> PasswordHash {
        PasswordHash::parse(format!("{:_<64}", format!("mock${raw}")))
            .expect("padded mock hash is long enough")
    }
}

#[async_trait::async_trait]
impl PasswordHasher for MockPasswordHasher {
    async fn hash(
        &self,
        raw_password: &Secret<String>,
    ) -> Result<PasswordHash, PasswordHasherError> {
        self.hash_calls.fetch_add(1, Ordering::SeqCst);
        Ok(Self::hash_of(raw_password.expose_secret()))
    }
}

#[async_trait::async_trait]
impl PasswordMatchVerifier for MockPasswordHasher {
    async fn matches(&self, raw_password: &Secret<String>, hash: &PasswordHash) -> bool {
        &Self::hash_of(raw_password.expose_secret()) == hash
    }
}

#[derive(Clone, Default)]
pub struct MockTokenGenerator;

#[async_trait::async_trait]
impl TokenGenerator for MockTokenGenerator {
    async fn generate(&self, user: &User) -> Result<Secret<String>, TokenGeneratorError> {
        Ok(Secret::new(format!("token-for-{}", user.id())))
    }
}

pub struct MockClock(Mutex<DateTime<Utc>>);

impl MockClock {
    pub fn advance(&self, by: Duration) {
        let mut now = self.0.lock().unwrap();
        *now += by;
    }
}

impl Default for MockClock {
    fn default() -> Self {
        Self(Mutex::new(
            Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap(),
        ))
    }
}

impl Clock for MockClock {
    fn now(&self) -> DateTime<Utc> {
        *self.0.lock().unwrap()
    }
}
