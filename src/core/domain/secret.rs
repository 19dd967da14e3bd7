//! Secret types.
//!
//! [`Secret`] holds a plaintext value between input capture and sealing.
//! [`SealedSecret`] is the upload body once it has been sealed.

use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use crate::core::types::{EncryptedValue, KeyId, SecretName};
use crate::core::validation;
use crate::error::Result;

/// A named plaintext secret.
///
/// The value is wiped on drop and never shows up in `Debug` output.
#[derive(Clone)]
pub struct Secret {
    name: SecretName,
    value: Zeroizing<String>,
}

impl Secret {
    /// Create a secret, validating its name and value.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if the name is not a valid secret name or
    /// the value is empty.
    pub fn new(name: impl Into<SecretName>, value: impl Into<String>) -> Result<Self> {
        let name = name.into();
        let value = Zeroizing::new(value.into());

        validation::validate_secret_name(&name)?;
        validation::validate_value(&name, &value)?;

        Ok(Self { name, value })
    }

    /// Secret's name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Plaintext value. Only the sealer should read this.
    pub fn expose(&self) -> &str {
        &self.value
    }
}

impl std::fmt::Debug for Secret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Secret")
            .field("name", &self.name)
            .field("value", &"<redacted>")
            .finish()
    }
}

impl std::fmt::Display for Secret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Request body for `PUT /repos/{owner}/{repo}/actions/secrets/{name}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SealedSecret {
    /// Base64 sealed box
    pub encrypted_value: EncryptedValue,
    /// Id of the public key the value was sealed with
    pub key_id: KeyId,
}
