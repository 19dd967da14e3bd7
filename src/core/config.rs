//! Configuration file management.
//!
//! Handles reading and validating `sealpost.toml`. The file is
//! optional; every field has a default and CLI flags override what it sets.
//! Tokens never live here.
//!
//! ```toml
//! [api]
//! url = "https://api.github.com"
//! timeout_secs = 30
//!
//! [target]
//! owner = "acme"
//! repo = "infra"
//! workflow = "provision.yml"
//! ref = "main"
//! ```

use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::core::constants;
use crate::core::domain::Repo;
use crate::core::validation;
use crate::error::{ConfigError, Result};

/// Project configuration stored in `sealpost.toml`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Config {
    /// Remote API settings
    #[serde(default)]
    pub api: ApiConfig,
    /// Repository and workflow to act on
    #[serde(default)]
    pub target: TargetConfig,
}

/// `[api]` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// REST API base URL
    pub url: String,
    /// Timeout for each request, in seconds
    pub timeout_secs: u64,
    /// Value of the `X-GitHub-Api-Version` header
    pub api_version: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            url: constants::DEFAULT_API_URL.to_string(),
            timeout_secs: constants::DEFAULT_TIMEOUT_SECS,
            api_version: constants::DEFAULT_API_VERSION.to_string(),
        }
    }
}

/// `[target]` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TargetConfig {
    pub owner: String,
    pub repo: String,
    /// Workflow file name or id
    pub workflow: String,
    #[serde(rename = "ref")]
    pub git_ref: String,
    /// Secret name the runner token is published under
    pub runner_token_secret: String,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            owner: constants::DEFAULT_OWNER.to_string(),
            repo: constants::DEFAULT_REPO.to_string(),
            workflow: constants::DEFAULT_WORKFLOW.to_string(),
            git_ref: constants::DEFAULT_REF.to_string(),
            runner_token_secret: constants::DEFAULT_RUNNER_TOKEN_SECRET.to_string(),
        }
    }
}

impl TargetConfig {
    /// Repository as a validated [`Repo`].
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidRepo` if owner or repo is invalid.
    pub fn repo(&self) -> Result<Repo> {
        Repo::new(self.owner.as_str(), self.repo.as_str())
    }
}

impl Config {
    /// Create a configuration with all defaults
    pub fn new() -> Self {
        Self {
            api: ApiConfig::default(),
            target: TargetConfig::default(),
        }
    }

    /// Default path to the configuration file in the current directory
    pub fn default_path() -> PathBuf {
        PathBuf::from(constants::CONFIG_FILE)
    }

    /// Load `path` if given, else `sealpost.toml` if present, else defaults.
    ///
    /// An explicitly given path must exist.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read, parsed, or validated.
    pub fn resolve(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => {
                let default = Self::default_path();
                if default.exists() {
                    Self::load(&default)
                } else {
                    debug!("no config file, using defaults");
                    Ok(Self::new())
                }
            }
        }
    }

    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` if the file doesn't exist,
    /// or `ConfigError::Parse` if the TOML is malformed.
    pub fn load(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "loading config");

        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()).into());
        }
        let contents = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        let config: Self = toml::from_str(&contents).map_err(ConfigError::Parse)?;

        debug!(
            owner = %config.target.owner,
            repo = %config.target.repo,
            workflow = %config.target.workflow,
            "config loaded"
        );

        config.validate()?;

        Ok(config)
    }

    /// Validate the configuration structure and contents
    ///
    /// Checks:
    /// - API URL is http(s) and the timeout is non-zero
    /// - Owner and repo are valid path segments
    /// - Workflow is a non-empty single path segment and ref is non-empty
    /// - Runner token secret name is a valid secret name
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` or `ConfigError::MissingField` on validation failure.
    pub fn validate(&self) -> Result<()> {
        debug!("validating config");

        if self.api.url.is_empty() {
            return Err(ConfigError::MissingField { field: "api.url" }.into());
        }
        if !self.api.url.starts_with("http://") && !self.api.url.starts_with("https://") {
            return Err(ConfigError::InvalidValue {
                field: "api.url",
                reason: format!("not an http(s) URL: {}", self.api.url),
            }
            .into());
        }
        if self.api.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "api.timeout_secs",
                reason: "must be greater than zero".to_string(),
            }
            .into());
        }

        self.target.repo()?;

        if self.target.workflow.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "target.workflow",
            }
            .into());
        }
        validation::validate_workflow_id(&self.target.workflow)?;
        if self.target.git_ref.trim().is_empty() {
            return Err(ConfigError::MissingField { field: "target.ref" }.into());
        }

        validation::validate_secret_name(&self.target.runner_token_secret)?;

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
