//! Repository coordinates.

use std::fmt;
use std::str::FromStr;

use crate::core::validation::validate_repo_segment;
use crate::error::{Error, Result, ValidationError};

/// An `owner/name` repository reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Repo {
    owner: String,
    name: String,
}

impl Repo {
    /// Create a repository reference, validating both segments.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidRepo` if either segment is invalid.
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Result<Self> {
        let owner = owner.into();
        let name = name.into();

        validate_repo_segment(&owner)?;
        validate_repo_segment(&name)?;

        Ok(Self { owner, name })
    }

    /// Repository owner (user or organization)
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Repository name
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl FromStr for Repo {
    type Err = Error;

    /// Parse `owner/name`.
    fn from_str(s: &str) -> Result<Self> {
        let (owner, name) = s.split_once('/').ok_or_else(|| ValidationError::InvalidRepo {
            value: s.to_string(),
            reason: "expected owner/name".to_string(),
        })?;
        Self::new(owner, name)
    }
}

impl fmt::Display for Repo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}
