use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use super::user::UserError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum UserRole {
    User,
    Premium,
    Admin,
}

impl UserRole {
    pub const ALL: [UserRole; 3] = [UserRole::User, UserRole::Premium, UserRole::Admin];

    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::User => "USER",
            UserRole::Premium => "PREMIUM",
            UserRole::Admin => "ADMIN",
        }
    }

    const fn bit(self) -> u8 {
        1 << self as u8
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("Unknown role: {0}")]
pub struct UnknownRole(String);

impl FromStr for UserRole {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        UserRole::ALL
            .into_iter()
            .find(|role| role.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownRole(s.to_owned()))
    }
}

/// Set of roles held by a user, stored as a bitset over [`UserRole`].
///
/// A `RoleSet` is never empty: construction from an empty collection yields
/// `None`, and [`RoleSet::remove`] refuses to drop the last role.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct RoleSet(u8);

impl RoleSet {
    pub fn new(roles: impl IntoIterator<Item = UserRole>) -> Option<Self> {
        let bits = roles.into_iter().fold(0, |bits, role| bits | role.bit());
        (bits != 0).then_some(Self(bits))
    }

    pub fn contains(&self, role: UserRole) -> bool {
        self.0 & role.bit() != 0
    }

    /// Returns `true` if the set changed.
    pub fn insert(&mut self, role: UserRole) -> bool {
        let before = self.0;
        self.0 |= role.bit();
        before != self.0
    }

    /// Returns `Ok(true)` if the set changed, `Ok(false)` if the role was absent.
    pub fn remove(&mut self, role: UserRole) -> Result<bool, UserError> {
        if !self.contains(role) {
            return Ok(false);
        }
        let remaining = self.0 & !role.bit();
        if remaining == 0 {
            return Err(UserError::LastRoleRemoval);
        }
        self.0 = remaining;
        Ok(true)
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn iter(&self) -> impl Iterator<Item = UserRole> + '_ {
        UserRole::ALL
            .into_iter()
            .filter(move |role| self.contains(*role))
    }
}

impl Default for RoleSet {
    fn default() -> Self {
        Self(UserRole::User.bit())
    }
}

impl From<UserRole> for RoleSet {
    fn from(role: UserRole) -> Self {
        Self(role.bit())
    }
}

impl fmt::Debug for RoleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
