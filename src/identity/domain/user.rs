//! Acting user identity.

use super::{EmailAddress, IdentityError};
use serde::{Deserialize, Serialize};

/// Display name and email of an authenticated user.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserIdentity {
    name: String,
    email: EmailAddress,
}

impl UserIdentity {
    /// Creates an identity, falling back to the email local part when the
    /// display name is blank.
    #[must_use]
    pub fn new(name: impl Into<String>, email: EmailAddress) -> Self {
        let raw_name = name.into();
        let trimmed = raw_name.trim();
        let display_name = if trimmed.is_empty() {
            email.local_part().to_owned()
        } else {
            trimmed.to_owned()
        };
        Self {
            name: display_name,
            email,
        }
    }

    /// Parses the email and creates an identity.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::InvalidEmail`] when the email is malformed.
    pub fn parse(name: impl Into<String>, email: impl Into<String>) -> Result<Self, IdentityError> {
        Ok(Self::new(name, EmailAddress::new(email)?))
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the email address.
    #[must_use]
    pub const fn email(&self) -> &EmailAddress {
        &self.email
    }
}
