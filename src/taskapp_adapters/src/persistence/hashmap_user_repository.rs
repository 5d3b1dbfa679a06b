use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use taskapp_core::{EmailAddress, User, UserId, UserRepository, UserRepositoryError, UserSnapshot};

#[derive(Default)]
struct Tables {
    users: HashMap<UserId, UserSnapshot>,
    ids_by_email: HashMap<EmailAddress, UserId>,
}

/// In-memory user repository. Stores snapshots so every read hands out a fresh
/// aggregate, the way a database-backed store would.
#[derive(Default, Clone)]
pub struct HashMapUserRepository {
    tables: Arc<RwLock<Tables>>,
}

impl HashMapUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.tables.read().await.users.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait::async_trait]
impl UserRepository for HashMapUserRepository {
    #[tracing::instrument(name = "Saving user to in-memory store", skip_all)]
    async fn save(&self, user: User) -> Result<User, UserRepositoryError> {
        let mut tables = self.tables.write().await;

        if let Some(owner) = tables.ids_by_email.get(user.email()) {
            if *owner != user.id() {
                return Err(UserRepositoryError::EmailAlreadyExists);
            }
        }

        let snapshot = user.snapshot();
        if let Some(previous) = tables.users.insert(user.id(), snapshot) {
            if previous.email != *user.email() {
                tables.ids_by_email.remove(&previous.email);
            }
        }
        tables.ids_by_email.insert(user.email().clone(), user.id());

        Ok(user)
    }

    async fn exists_by_email(&self, email: &EmailAddress) -> Result<bool, UserRepositoryError> {
        Ok(self.tables.read().await.ids_by_email.contains_key(email))
    }

    #[tracing::instrument(name = "Retrieving user from in-memory store", skip_all)]
    async fn find_by_email(&self, email: &EmailAddress) -> Result<User, UserRepositoryError> {
        let tables = self.tables.read().await;
        let snapshot = tables
            .ids_by_email
            .get(email)
            .and_then(|id| tables.users.get(id))
            .ok_or(UserRepositoryError::UserNotFound)?;

        User::restore(snapshot.clone())
            .map_err(|e| UserRepositoryError::UnexpectedError(e.to_string()))
    }
}
