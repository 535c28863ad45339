//! Normalized email address used as the identity key.

use super::IdentityError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lower-cased email address.
///
/// Ownership and assignment checks compare addresses for equality, so the
/// value is trimmed and ASCII-lowercased on construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Creates a validated email address.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::InvalidEmail`] when the value is empty,
    /// contains whitespace, or does not have exactly one `@` separating a
    /// non-empty local part from a non-empty domain.
    pub fn new(value: impl Into<String>) -> Result<Self, IdentityError> {
        let raw = value.into();
        let normalized = raw.trim().to_ascii_lowercase();
        let mut parts = normalized.split('@');
        let local = parts.next().unwrap_or_default();
        let domain = parts.next().unwrap_or_default();
        let is_valid = !local.is_empty()
            && !domain.is_empty()
            && parts.next().is_none()
            && !normalized.chars().any(char::is_whitespace);

        if !is_valid {
            return Err(IdentityError::InvalidEmail(raw));
        }
        Ok(Self(normalized))
    }

    /// Returns the address as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the part before `@`.
    #[must_use]
    pub fn local_part(&self) -> &str {
        self.0.split('@').next().unwrap_or_default()
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = IdentityError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
