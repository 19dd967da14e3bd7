//! Type aliases for domain concepts.
//!
//! Provides semantic type aliases to make function signatures more descriptive.

/// A repository secret name (e.g., SSH_PASSWORD).
pub type SecretName = String;

/// Identifier the remote store issues alongside its current public key.
pub type KeyId = String;

/// Base64-encoded sealed-box ciphertext.
pub type EncryptedValue = String;

/// Workflow file name or numeric id.
pub type WorkflowId = String;

/// Dispatch input name (e.g., NEW_HOST).
pub type InputKey = String;
