//! Repository public key.
//!
//! The key a remote secret store hands out for sealing, paired with the id
//! that must accompany every value sealed under it.

use serde::{Deserialize, Serialize};

use crate::core::seal;
use crate::core::types::KeyId;
use crate::error::Result;

/// Response of `GET /repos/{owner}/{repo}/actions/secrets/public-key`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoPublicKey {
    /// Opaque key version identifier
    pub key_id: KeyId,
    /// Base64 X25519 public key
    pub key: String,
}

impl RepoPublicKey {
    /// Create a key from its id and base64 encoding.
    pub fn new(key_id: impl Into<KeyId>, key: impl Into<String>) -> Self {
        Self {
            key_id: key_id.into(),
            key: key.into(),
        }
    }

    /// Check that the key decodes to a usable public key.
    ///
    /// # Errors
    ///
    /// Returns `SealError::InvalidKeyFormat` if it does not.
    pub fn validate(&self) -> Result<()> {
        seal::parse_public_key(&self.key).map(|_| ())
    }
}
