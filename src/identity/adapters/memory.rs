//! In-memory session provider for tests and embedded use.

use crate::identity::{
    domain::{IdentityError, UserIdentity},
    ports::SessionProvider,
};
use async_trait::async_trait;
use std::sync::{Arc, RwLock};

/// Session holding at most one signed-in identity.
#[derive(Debug, Clone, Default)]
pub struct InMemorySession {
    current: Arc<RwLock<Option<UserIdentity>>>,
}

impl InMemorySession {
    /// Creates a signed-out session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a session already signed in as `identity`.
    #[must_use]
    pub fn signed_in(identity: UserIdentity) -> Self {
        Self {
            current: Arc::new(RwLock::new(Some(identity))),
        }
    }

    /// Replaces the signed-in identity. `None` signs out.
    pub fn set(&self, identity: Option<UserIdentity>) {
        match self.current.write() {
            Ok(mut guard) => *guard = identity,
            Err(poisoned) => *poisoned.into_inner() = identity,
        }
    }
}

#[async_trait]
impl SessionProvider for InMemorySession {
    async fn current_identity(&self) -> Result<UserIdentity, IdentityError> {
        let guard = self
            .current
            .read()
            .map_err(|_| IdentityError::Unauthenticated)?;
        guard.clone().ok_or(IdentityError::Unauthenticated)
    }
}
