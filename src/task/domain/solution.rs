//! Assignment and solution values attached to a task.

use super::TaskDomainError;
use crate::identity::domain::{EmailAddress, UserIdentity};
use serde::{Deserialize, Serialize};
use std::fmt;

/// User who claimed a task.
///
/// Name and email travel together so a task is never partially claimed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Assignee {
    name: String,
    email: EmailAddress,
}

impl Assignee {
    /// Creates an assignee from explicit parts.
    #[must_use]
    pub const fn new(name: String, email: EmailAddress) -> Self {
        Self { name, email }
    }

    /// Returns the assignee's display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the assignee's email.
    #[must_use]
    pub const fn email(&self) -> &EmailAddress {
        &self.email
    }
}

impl From<&UserIdentity> for Assignee {
    fn from(identity: &UserIdentity) -> Self {
        Self {
            name: identity.name().to_owned(),
            email: identity.email().clone(),
        }
    }
}

/// Reference to an uploaded solution file, usually a URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SolutionFile(String);

impl SolutionFile {
    /// Creates a validated file reference.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptySolutionFile`] when the value is blank.
    pub fn new(value: impl Into<String>) -> Result<Self, TaskDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(TaskDomainError::EmptySolutionFile);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the reference as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SolutionFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Submitted solution: mandatory text plus optional attachments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Solution {
    text: String,
    files: Vec<SolutionFile>,
}

impl Solution {
    /// Creates a validated solution.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptySolutionText`] when the text is blank
    /// and [`TaskDomainError::EmptySolutionFile`] for blank file entries.
    pub fn new(
        text: impl Into<String>,
        files: impl IntoIterator<Item = String>,
    ) -> Result<Self, TaskDomainError> {
        let raw_text = text.into();
        if raw_text.trim().is_empty() {
            return Err(TaskDomainError::EmptySolutionText);
        }
        let validated_files = files
            .into_iter()
            .map(SolutionFile::new)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            text: raw_text,
            files: validated_files,
        })
    }

    /// Returns the solution text as submitted.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns attached file references.
    #[must_use]
    pub fn files(&self) -> &[SolutionFile] {
        &self.files
    }
}
