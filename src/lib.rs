//! sealpost - Seal secrets for GitHub Actions and dispatch a workflow.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── run           # Flag adapter: publish secrets, dispatch
//! │   ├── form          # Interactive adapter (dialoguer)
//! │   ├── seal          # Seal one value for a public key
//! │   ├── defaults      # Inspect saved form defaults
//! │   └── completions   # Shell completions
//! └── core/             # Core library components
//!     ├── api/          # Remote provider
//!     │   ├── mod       # Provider trait
//!     │   └── github    # GitHub REST implementation
//!     ├── seal          # Sealed-box encryption
//!     ├── publish       # Fetch key, seal, upload one secret
//!     ├── dispatch      # Trigger a workflow run
//!     ├── pipeline      # Publish all secrets, then dispatch
//!     ├── config        # sealpost.toml
//!     ├── defaults      # Saved form defaults
//!     ├── fields        # Form field catalogue
//!     └── domain/       # Secret, Repo, RepoPublicKey, Submission
//! ```
//!
//! # Flow
//!
//! For every secret: fetch the repository public key, seal the value with
//! an anonymous X25519 sealed box, upload the ciphertext with the key id.
//! Once all secrets are stored, dispatch the workflow with the inputs.
//! Plaintext values never leave the process and are zeroized on drop.

pub mod cli;
pub mod core;
pub mod error;
