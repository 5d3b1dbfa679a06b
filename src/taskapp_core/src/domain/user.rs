use chrono::{DateTime, Duration, Utc};
use thiserror::Error;

use super::{
    email::EmailAddress,
    password_hash::PasswordHash,
    role::{RoleSet, UserRole},
    status::UserStatus,
    user_id::UserId,
};

/// Consecutive failed logins that put an account into the lock window.
pub const MAX_FAILED_LOGIN_ATTEMPTS: u32 = 3;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UserError {
    #[error("Invalid email format")]
    InvalidEmailFormat,
    #[error("Invalid password hash format")]
    InvalidPasswordFormat,
    #[error("Invalid user id: {0}")]
    InvalidUserId(String),
    #[error("User is deleted")]
    UserIsDeleted,
    #[error("Account is locked")]
    UserIsLocked,
    #[error("A user must keep at least one role")]
    LastRoleRemoval,
    #[error("Inconsistent user record: {0}")]
    InconsistentSnapshot(&'static str),
}

/// Plain field-by-field view of a [`User`], used to persist and rehydrate the
/// aggregate without going through its behavioral operations.
#[derive(Debug, Clone, PartialEq)]
pub struct UserSnapshot {
    pub id: UserId,
    pub email: EmailAddress,
    pub email_verified: bool,
    pub email_updated_at: DateTime<Utc>,
    pub password_hash: PasswordHash,
    pub password_updated_at: DateTime<Utc>,
    pub status: UserStatus,
    pub roles: RoleSet,
    pub failed_login_attempts: u32,
    pub account_locked_until: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub last_login_at: Option<DateTime<Utc>>,
    pub last_active_at: Option<DateTime<Utc>>,
    pub deleted_at: Option<DateTime<Utc>>,
}

/// User account aggregate.
///
/// Every mutation takes the operation's `now` from the caller; the aggregate
/// never reads the clock itself. Lock state is derived from
/// `account_locked_until` and is never stored separately.
#[derive(Debug, Clone)]
pub struct User {
    id: UserId,

    email: EmailAddress,
    email_verified: bool,
    email_updated_at: DateTime<Utc>,

    password_hash: PasswordHash,
    password_updated_at: DateTime<Utc>,

    status: UserStatus,
    roles: RoleSet,

    failed_login_attempts: u32,
    account_locked_until: Option<DateTime<Utc>>,

    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    last_login_at: Option<DateTime<Utc>>,
    last_active_at: Option<DateTime<Utc>>,

    deleted_at: Option<DateTime<Utc>>,
}

impl User {
    /// Registers a brand-new, active account. `roles` falls back to `{USER}`.
    pub fn create(
        email: EmailAddress,
        password_hash: PasswordHash,
        roles: Option<RoleSet>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: UserId::new(),
            email,
            email_verified: false,
            email_updated_at: now,
            password_hash,
            password_updated_at: now,
            status: UserStatus::Active,
            roles: roles.unwrap_or_default(),
            failed_login_attempts: 0,
            account_locked_until: None,
            created_at: now,
            updated_at: now,
            last_login_at: None,
            last_active_at: None,
            deleted_at: None,
        }
    }

    /// Rebuilds an aggregate from stored state.
    pub fn restore(snapshot: UserSnapshot) -> Result<Self, UserError> {
        if snapshot.deleted_at.is_some() != (snapshot.status == UserStatus::Deleted) {
            return Err(UserError::InconsistentSnapshot(
                "deleted_at must be set exactly when status is DELETED",
            ));
        }

        Ok(Self {
            id: snapshot.id,
            email: snapshot.email,
            email_verified: snapshot.email_verified,
            email_updated_at: snapshot.email_updated_at,
            password_hash: snapshot.password_hash,
            password_updated_at: snapshot.password_updated_at,
            status: snapshot.status,
            roles: snapshot.roles,
            failed_login_attempts: snapshot.failed_login_attempts,
            account_locked_until: snapshot.account_locked_until,
            created_at: snapshot.created_at,
            updated_at: snapshot.updated_at,
            last_login_at: snapshot.last_login_at,
            last_active_at: snapshot.last_active_at,
            deleted_at: snapshot.deleted_at,
        })
    }

    pub fn snapshot(&self) -> UserSnapshot {
        UserSnapshot {
            id: self.id,
            email: self.email.clone(),
            email_verified: self.email_verified,
            email_updated_at: self.email_updated_at,
            password_hash: self.password_hash.clone(),
            password_updated_at: self.password_updated_at,
            status: self.status,
            roles: self.roles,
            failed_login_attempts: self.failed_login_attempts,
            account_locked_until: self.account_locked_until,
            created_at: self.created_at,
            updated_at: self.updated_at,
            last_login_at: self.last_login_at,
            last_active_at: self.last_active_at,
            deleted_at: self.deleted_at,
        }
    }

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    pub fn is_email_verified(&self) -> bool {
        self.email_verified
    }

    pub fn email_updated_at(&self) -> DateTime<Utc> {
        self.email_updated_at
    }

    pub fn password_hash(&self) -> &PasswordHash {
        &self.password_hash
    }

    pub fn password_updated_at(&self) -> DateTime<Utc> {
        self.password_updated_at
    }

    pub fn status(&self) -> UserStatus {
        self.status
    }

    pub fn roles(&self) -> RoleSet {
        self.roles
    }

    pub fn failed_login_attempts(&self) -> u32 {
        self.failed_login_attempts
    }

    pub fn account_locked_until(&self) -> Option<DateTime<Utc>> {
        self.account_locked_until
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn last_login_at(&self) -> Option<DateTime<Utc>> {
        self.last_login_at
    }

    pub fn last_active_at(&self) -> Option<DateTime<Utc>> {
        self.last_active_at
    }

    pub fn deleted_at(&self) -> Option<DateTime<Utc>> {
        self.deleted_at
    }

    pub fn change_email(
        &mut self,
        new_email: EmailAddress,
        now: DateTime<Utc>,
    ) -> Result<(), UserError> {
        self.ensure_not_deleted()?;
        if self.email == new_email {
            return Ok(());
        }

        self.email = new_email;
        self.email_verified = false;
        self.email_updated_at = now;
        self.touch(now);
        Ok(())
    }

    pub fn mark_email_verified(&mut self, now: DateTime<Utc>) -> Result<(), UserError> {
        self.ensure_not_deleted()?;
        if self.email_verified {
            return Ok(());
        }

        self.email_verified = true;
        self.email_updated_at = now;
        self.touch(now);
        Ok(())
    }

    /// Replaces the hash and clears any failed-login history and lock.
    pub fn change_password(
        &mut self,
        new_password_hash: PasswordHash,
        now: DateTime<Utc>,
    ) -> Result<(), UserError> {
        self.ensure_not_deleted()?;

        self.password_hash = new_password_hash;
        self.password_updated_at = now;
        self.reset_failed_logins();
        self.touch(now);
        Ok(())
    }

    pub fn add_role(&mut self, role: UserRole, now: DateTime<Utc>) -> Result<(), UserError> {
        self.ensure_not_deleted()?;
        if self.roles.insert(role) {
            self.touch(now);
        }
        Ok(())
    }

    pub fn remove_role(&mut self, role: UserRole, now: DateTime<Utc>) -> Result<(), UserError> {
        self.ensure_not_deleted()?;
        if self.roles.remove(role)? {
            self.touch(now);
        }
        Ok(())
    }

    pub fn has_role(&self, role: UserRole) -> bool {
        self.roles.contains(role)
    }

    pub fn suspend(&mut self, now: DateTime<Utc>) -> Result<(), UserError> {
        self.ensure_not_deleted()?;
        self.status = UserStatus::Suspended;
        self.touch(now);
        Ok(())
    }

    /// Allowed from any status except `Deleted`, which cannot be left.
    pub fn activate(&mut self, now: DateTime<Utc>) -> Result<(), UserError> {
        if self.is_deleted() {
            return Err(UserError::UserIsDeleted);
        }
        self.status = UserStatus::Active;
        self.touch(now);
        Ok(())
    }

    pub fn record_successful_login(&mut self, now: DateTime<Utc>) -> Result<(), UserError> {
        self.ensure_not_deleted()?;
        self.ensure_not_locked(now)?;

        self.reset_failed_logins();
        self.last_login_at = Some(now);
        self.last_active_at = Some(now);
        self.touch(now);
        Ok(())
    }

    /// Counts a failed attempt and opens a lock window of `lock_duration` once
    /// [`MAX_FAILED_LOGIN_ATTEMPTS`] is reached.
    ///
    /// Attempts made while the lock window is open are ignored. A lock whose end
    /// lies strictly before `now` starts a fresh count, and its stale
    /// `account_locked_until` is cleared along with the counter so the account
    /// can lock again. A failure exactly at the end of the window still counts
    /// toward the old streak. No deleted-status guard applies here: the attempt
    /// is recorded whatever the account's status.
    pub fn record_failed_login(&mut self, now: DateTime<Utc>, lock_duration: Duration) {
        if self.is_locked(now) {
            return;
        }
        if self
            .account_locked_until
            .is_some_and(|locked_until| locked_until < now)
        {
            self.reset_failed_logins();
        }

        self.failed_login_attempts = self.failed_login_attempts.saturating_add(1);
        if self.failed_login_attempts >= MAX_FAILED_LOGIN_ATTEMPTS {
            self.account_locked_until = Some(
                now.checked_add_signed(lock_duration)
                    .unwrap_or(DateTime::<Utc>::MAX_UTC),
            );
        }
        self.touch(now);
    }

    pub fn is_locked(&self, now: DateTime<Utc>) -> bool {
        self.account_locked_until
            .is_some_and(|locked_until| locked_until > now)
    }

    /// Soft delete. Calling it again leaves the first `deleted_at` untouched.
    pub fn delete(&mut self, now: DateTime<Utc>) {
        if self.is_deleted() {
            return;
        }

        self.status = UserStatus::Deleted;
        self.deleted_at = Some(now);
        self.email_verified = false;
        self.touch(now);
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }

    fn reset_failed_logins(&mut self) {
        self.failed_login_attempts = 0;
        self.account_locked_until = None;
    }

    fn ensure_not_deleted(&self) -> Result<(), UserError> {
        if self.is_deleted() {
            return Err(UserError::UserIsDeleted);
        }
        Ok(())
    }

    fn ensure_not_locked(&self, now: DateTime<Utc>) -> Result<(), UserError> {
        if self.is_locked(now) {
            return Err(UserError::UserIsLocked);
        }
        Ok(())
    }
}

impl PartialEq for User {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for User {}

impl std::hash::Hash for User {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
