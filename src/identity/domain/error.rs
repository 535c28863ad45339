//! Error types for identity values and session lookup.

use thiserror::Error;

/// Errors returned while constructing identities or resolving a session.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IdentityError {
    /// The email address is malformed.
    #[error("invalid email address '{0}'")]
    InvalidEmail(String),

    /// No authenticated session is available.
    #[error("no authenticated session")]
    Unauthenticated,
}
