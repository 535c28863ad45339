//! Session port exposing the authenticated user.

use crate::identity::domain::{IdentityError, UserIdentity};
use async_trait::async_trait;

/// Source of the current user's identity.
///
/// Only edge code (request handlers, command entry points) should call this.
/// Services receive the resolved identity as an argument.
#[async_trait]
pub trait SessionProvider: Send + Sync {
    /// Returns the identity bound to the current session.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::Unauthenticated`] when no session exists.
    async fn current_identity(&self) -> Result<UserIdentity, IdentityError>;
}
