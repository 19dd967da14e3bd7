//! Constants used throughout sealpost.
//!
//! Centralizes magic strings and default values.

/// Configuration file name looked up in the current directory.
pub const CONFIG_FILE: &str = "sealpost.toml";

/// Defaults store directory under the platform data dir.
pub const DATA_DIR: &str = "sealpost";

/// Defaults store file name.
pub const DEFAULTS_FILE: &str = "defaults.toml";

/// Default GitHub REST API base URL.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// REST API version sent in `X-GitHub-Api-Version`.
pub const DEFAULT_API_VERSION: &str = "2022-11-28";

/// Media type sent in `Accept`.
pub const ACCEPT: &str = "application/vnd.github+json";

/// Request timeout applied to every outbound call.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Repository owner the workflow lives in.
pub const DEFAULT_OWNER: &str = "tosin2013";

/// Repository the secrets and workflow belong to.
pub const DEFAULT_REPO: &str = "baremetal-playbooks";

/// Workflow file dispatched after the secrets are published.
pub const DEFAULT_WORKFLOW: &str = "equinix-metal-baremetal-blank-server.yml";

/// Git ref the workflow runs against.
pub const DEFAULT_REF: &str = "main";

/// Secret name the runner registration token is published under.
pub const DEFAULT_RUNNER_TOKEN_SECRET: &str = "KCLI_PIPELINES_RUNNER_TOKEN";

/// Raw X25519 public key length.
pub const PUBLIC_KEY_LEN: usize = 32;

/// Bytes a sealed box adds to the plaintext (ephemeral key + MAC).
pub const SEAL_OVERHEAD: usize = 48;

/// Secret name prefix reserved by GitHub.
pub const RESERVED_SECRET_PREFIX: &str = "GITHUB_";
