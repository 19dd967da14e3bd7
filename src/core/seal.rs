//! Sealed-box encryption.
//!
//! Encrypts a value for a recipient that holds only a public key, in the
//! libsodium `crypto_box_seal` format GitHub expects for Actions secrets:
//!
//! ```text
//! ephemeral_pk (32) || XSalsa20-Poly1305(plaintext) (len + 16)
//! ```
//!
//! A fresh ephemeral key pair is generated for every call, so sealing the
//! same plaintext twice never yields the same ciphertext.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use crypto_box::aead::OsRng;
use crypto_box::{PublicKey, SecretKey};
use tracing::trace;

use crate::core::constants::PUBLIC_KEY_LEN;
use crate::error::{Result, SealError};

/// Decode a base64 public key, rejecting anything that is not exactly 32 bytes.
///
/// # Errors
///
/// Returns `SealError::InvalidKeyFormat` if the input is not valid base64 or
/// decodes to the wrong length.
pub fn parse_public_key(public_key_b64: &str) -> Result<PublicKey> {
    let bytes = STANDARD
        .decode(public_key_b64.trim())
        .map_err(|e| SealError::InvalidKeyFormat(format!("not valid base64: {}", e)))?;

    let raw: [u8; PUBLIC_KEY_LEN] = bytes.as_slice().try_into().map_err(|_| {
        SealError::InvalidKeyFormat(format!(
            "expected {} bytes, got {}",
            PUBLIC_KEY_LEN,
            bytes.len()
        ))
    })?;

    Ok(PublicKey::from(raw))
}

/// Seal `plaintext` for the holder of `public_key_b64`.
///
/// Returns the base64-encoded sealed box.
///
/// # Errors
///
/// Returns `SealError::InvalidKeyFormat` for a malformed key, or
/// `SealError::EncryptionFailed` if the cipher rejects the input.
pub fn seal(public_key_b64: &str, plaintext: &[u8]) -> Result<String> {
    let public_key = parse_public_key(public_key_b64)?;
    seal_with_key(&public_key, plaintext)
}

/// Seal `plaintext` for an already parsed public key.
pub fn seal_with_key(public_key: &PublicKey, plaintext: &[u8]) -> Result<String> {
    trace!(plaintext_len = plaintext.len(), "sealing");

    let sealed = public_key
        .seal(&mut OsRng, plaintext)
        .map_err(|e| SealError::EncryptionFailed(e.to_string()))?;

    trace!(ciphertext_len = sealed.len(), "sealed");

    Ok(STANDARD.encode(sealed))
}

/// Open a base64 sealed box with the recipient's secret key.
///
/// # Errors
///
/// Returns `SealError::DecryptionFailed` if the input is not base64, was
/// sealed for another key, or has been tampered with.
pub fn open(secret_key: &SecretKey, sealed_b64: &str) -> Result<Vec<u8>> {
    let sealed = STANDARD
        .decode(sealed_b64.trim())
        .map_err(|e| SealError::DecryptionFailed(format!("not valid base64: {}", e)))?;

    trace!(ciphertext_len = sealed.len(), "opening");

    secret_key
        .unseal(&sealed)
        .map_err(|_| SealError::DecryptionFailed("authentication failed".to_string()).into())
}

/// Base64 encoding of a public key, as the remote store publishes it.
pub fn encode_public_key(public_key: &PublicKey) -> String {
    STANDARD.encode(public_key.as_bytes())
}
