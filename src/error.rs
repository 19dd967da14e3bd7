//! Error types.
//!
//! Each concern gets its own enum; the top-level [`Error`] wraps them so
//! `?` works across module boundaries.

use thiserror::Error;

/// Top-level error type.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Seal(#[from] SealError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Defaults(#[from] DefaultsError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A publish step failed; remaining secrets and the dispatch were skipped.
    #[error("failed to publish {secret}: {source}")]
    Publish {
        secret: String,
        #[source]
        source: Box<Error>,
    },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),
}

/// Sealed-box encryption errors.
#[derive(Error, Debug)]
pub enum SealError {
    #[error("invalid public key: {0}")]
    InvalidKeyFormat(String),

    #[error("encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("decryption failed: {0}")]
    DecryptionFailed(String),
}

/// Remote API errors.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Connection failure or timeout.
    #[error("network error: {0}")]
    Network(String),

    /// 401 or 403 from the remote.
    #[error("not authorized (HTTP {status}): {body}")]
    Auth { status: u16, body: String },

    /// Any other unexpected status.
    #[error("remote returned HTTP {status}: {body}")]
    Remote { status: u16, body: String },

    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl ApiError {
    /// HTTP status attached to the error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Auth { status, .. } | Self::Remote { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Configuration file errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),

    #[error("config file not found: {0}")]
    NotFound(String),

    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

/// Local defaults store errors.
#[derive(Error, Debug)]
pub enum DefaultsError {
    #[error("failed to read defaults: {0}")]
    ReadFailed(#[source] std::io::Error),

    #[error("failed to write defaults: {0}")]
    WriteFailed(#[source] std::io::Error),

    #[error("failed to parse defaults: {0}")]
    Parse(#[source] toml::de::Error),

    #[error("failed to serialize defaults: {0}")]
    Serialize(#[source] toml::ser::Error),

    #[error("unable to determine data directory")]
    NoDataDir,
}

/// Input validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("secret name cannot be empty")]
    EmptySecretName,

    #[error("invalid secret name '{name}': {reason}")]
    InvalidSecretName { name: String, reason: String },

    #[error("value for {0} cannot be empty")]
    EmptyValue(String),

    #[error("invalid repository '{value}': {reason}")]
    InvalidRepo { value: String, reason: String },

    #[error("invalid workflow '{value}': {reason}")]
    InvalidWorkflow { value: String, reason: String },

    #[error("invalid input '{value}': {reason}")]
    InvalidInput { value: String, reason: String },
}

pub type Result<T> = std::result::Result<T, Error>;
