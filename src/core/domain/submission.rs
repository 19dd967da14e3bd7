//! Collected run inputs.
//!
//! Both the flag adapter and the interactive form produce a [`Submission`];
//! the pipeline consumes it without knowing where it came from.

use std::collections::BTreeMap;

use crate::core::domain::Secret;
use crate::core::types::InputKey;
use crate::core::validation;
use crate::error::Result;

/// Secrets to publish plus the non-secret dispatch inputs.
#[derive(Debug, Clone, Default)]
pub struct Submission {
    secrets: Vec<Secret>,
    inputs: BTreeMap<InputKey, String>,
}

impl Submission {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a secret for publishing. Order is preserved.
    ///
    /// A secret with the same name replaces the earlier one in place.
    pub fn add_secret(&mut self, secret: Secret) {
        match self.secrets.iter_mut().find(|s| s.name() == secret.name()) {
            Some(existing) => *existing = secret,
            None => self.secrets.push(secret),
        }
    }

    /// Set a dispatch input.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidInput` if the key is invalid.
    pub fn set_input(&mut self, key: impl Into<InputKey>, value: impl Into<String>) -> Result<()> {
        let key = key.into();
        validation::validate_input_key(&key)?;
        self.inputs.insert(key, value.into());
        Ok(())
    }

    pub fn secrets(&self) -> &[Secret] {
        &self.secrets
    }

    pub fn inputs(&self) -> &BTreeMap<InputKey, String> {
        &self.inputs
    }
}
