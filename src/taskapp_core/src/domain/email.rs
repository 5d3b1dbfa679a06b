use std::{fmt, sync::LazyLock};

use regex::Regex;

use super::user::UserError;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z0-9._%+-]+@[a-z0-9.-]+\.[a-z]{2,63}$").expect("valid email pattern")
});

/// A validated, normalized (trimmed and lower-cased) email address.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    pub fn parse(raw: &str) -> Result<Self, UserError> {
        let normalized = normalize(raw);
        if !is_format_valid(&normalized) {
            return Err(UserError::InvalidEmailFormat);
        }
        Ok(Self(normalized))
    }

    /// Pre-flight check: same normalization and pattern as [`EmailAddress::parse`],
    /// without building a value.
    pub fn is_valid(raw: &str) -> bool {
        is_format_valid(&normalize(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn normalize(raw: &str) -> String {
    raw.trim().to_lowercase()
}

fn is_format_valid(normalized: &str) -> bool {
    !normalized.is_empty() && EMAIL_PATTERN.is_match(normalized)
}

impl TryFrom<String> for EmailAddress {
    type Error = UserError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
