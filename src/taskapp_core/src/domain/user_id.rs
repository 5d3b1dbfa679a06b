use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::user::UserError;

/// Length of the canonical hyphenated UUID form, e.g. `67e55044-10b1-426f-9247-bb680e5fe0c8`.
const CANONICAL_LENGTH: usize = 36;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    /// Generates a fresh random (v4) identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn parse(id: &str) -> Result<Self, UserError> {
        if id.len() != CANONICAL_LENGTH {
            return Err(UserError::InvalidUserId(id.to_owned()));
        }
        let parsed = Uuid::parse_str(id).map_err(|_| UserError::InvalidUserId(id.to_owned()))?;
        Ok(Self(parsed))
    }

    pub fn is_valid(id: &str) -> bool {
        Self::parse(id).is_ok()
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for UserId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}
