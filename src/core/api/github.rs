//! GitHub REST API provider.
//!
//! Uses a blocking `reqwest` client with an explicit timeout on every call.
//!
//! ## Endpoints
//!
//! ```text
//! GET  /repos/{owner}/{repo}/actions/secrets/public-key      -> {key_id, key}
//! PUT  /repos/{owner}/{repo}/actions/secrets/{name}          -> 201 | 204
//! POST /repos/{owner}/{repo}/actions/workflows/{id}/dispatches -> 204
//! ```

use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::ACCEPT;
use reqwest::{StatusCode, Url};
use tracing::{debug, trace};
use zeroize::Zeroizing;

use super::Provider;
use crate::core::config::ApiConfig;
use crate::core::constants;
use crate::core::domain::{Repo, RepoPublicKey, SealedSecret, WorkflowDispatch};
use crate::error::{ApiError, ConfigError, Result};

const API_VERSION_HEADER: &str = "X-GitHub-Api-Version";

/// GitHub Actions provider.
pub struct GitHub {
    client: Client,
    base_url: Url,
    api_version: String,
    token: Zeroizing<String>,
}

/// Builder for [`GitHub`].
pub struct GitHubBuilder {
    base_url: String,
    api_version: String,
    timeout: Duration,
    token: Zeroizing<String>,
}

impl GitHubBuilder {
    /// Override the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Override the `X-GitHub-Api-Version` header value.
    pub fn api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = version.into();
        self
    }

    /// Build the provider.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if the base URL cannot carry a
    /// path, or `ApiError::Network` if the HTTP client cannot be initialized.
    pub fn build(self) -> Result<GitHub> {
        let base_url = Url::parse(&self.base_url)
            .ok()
            .filter(|url| !url.cannot_be_a_base())
            .ok_or_else(|| ConfigError::InvalidValue {
                field: "api.url",
                reason: format!("not a base URL: {}", self.base_url),
            })?;

        let client = Client::builder()
            .timeout(self.timeout)
            .user_agent(concat!("sealpost/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::Network(format!("failed to build HTTP client: {}", e)))?;

        Ok(GitHub {
            client,
            base_url,
            api_version: self.api_version,
            token: self.token,
        })
    }
}

impl GitHub {
    /// Start building a provider for `base_url` authenticated with `token`.
    pub fn builder(base_url: impl Into<String>, token: impl Into<String>) -> GitHubBuilder {
        GitHubBuilder {
            base_url: base_url.into(),
            api_version: constants::DEFAULT_API_VERSION.to_string(),
            timeout: Duration::from_secs(constants::DEFAULT_TIMEOUT_SECS),
            token: Zeroizing::new(token.into()),
        }
    }

    /// Create a provider from the `[api]` config section.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Network` if the HTTP client cannot be initialized.
    pub fn from_config(api: &ApiConfig, token: impl Into<String>) -> Result<Self> {
        Self::builder(api.url.as_str(), token)
            .timeout(Duration::from_secs(api.timeout_secs))
            .api_version(api.api_version.as_str())
            .build()
    }

    /// `{base}/repos/{owner}/{repo}/{tail...}`, each segment percent-encoded.
    fn repo_url(&self, repo: &Repo, tail: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // `build` rejects cannot-be-a-base URLs
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(["repos", repo.owner(), repo.name()])
                .extend(tail);
        }
        url
    }

    /// Attach auth and version headers, then send.
    fn send(&self, request: RequestBuilder, op: &'static str) -> Result<Response> {
        let response = request
            .bearer_auth(self.token.as_str())
            .header(ACCEPT, constants::ACCEPT)
            .header(API_VERSION_HEADER, self.api_version.as_str())
            .send()
            .map_err(|e| network_error(op, e))?;

        trace!(op, status = response.status().as_u16(), "response");
        Ok(response)
    }
}

impl Provider for GitHub {
    fn public_key(&self, repo: &Repo) -> Result<RepoPublicKey> {
        debug!(repo = %repo, "fetching public key");

        let url = self.repo_url(repo, &["actions", "secrets", "public-key"]);
        let response = self.send(self.client.get(url), "fetch public key")?;

        if !response.status().is_success() {
            return Err(status_error(response).into());
        }

        let key: RepoPublicKey = response.json().map_err(|e| {
            if e.is_timeout() {
                network_error("fetch public key", e)
            } else {
                ApiError::InvalidResponse(format!("public key response: {}", e))
            }
        })?;

        debug!(repo = %repo, key_id = %key.key_id, "public key fetched");
        Ok(key)
    }

    fn put_secret(&self, repo: &Repo, name: &str, sealed: &SealedSecret) -> Result<()> {
        debug!(repo = %repo, secret = name, key_id = %sealed.key_id, "uploading secret");

        let url = self.repo_url(repo, &["actions", "secrets", name]);
        let response = self.send(self.client.put(url).json(sealed), "upload secret")?;

        if !response.status().is_success() {
            return Err(status_error(response).into());
        }

        Ok(())
    }

    fn dispatch_workflow(
        &self,
        repo: &Repo,
        workflow_id: &str,
        request: &WorkflowDispatch,
    ) -> Result<()> {
        debug!(
            repo = %repo,
            workflow = workflow_id,
            git_ref = %request.git_ref,
            inputs = request.inputs.len(),
            "dispatching workflow"
        );

        let url = self.repo_url(repo, &["actions", "workflows", workflow_id, "dispatches"]);
        let response = self.send(self.client.post(url).json(request), "dispatch workflow")?;

        if response.status() != StatusCode::NO_CONTENT {
            return Err(status_error(response).into());
        }

        Ok(())
    }

    fn name(&self) -> &'static str {
        "github"
    }
}

impl std::fmt::Debug for GitHub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHub")
            .field("base_url", &self.base_url.as_str())
            .field("api_version", &self.api_version)
            .field("token", &"<redacted>")
            .finish()
    }
}

/// Map a transport failure (connect, timeout, body) to `ApiError::Network`.
fn network_error(op: &str, err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        ApiError::Network(format!("{} timed out: {}", op, err))
    } else {
        ApiError::Network(format!("{} failed: {}", op, err))
    }
}

/// Turn an unexpected status into `Auth` or `Remote`, keeping the body.
///
/// A body that times out while being read is a network failure; any other
/// body read failure is kept in place of the body.
fn status_error(response: Response) -> ApiError {
    let status = response.status().as_u16();
    let body = match response.text() {
        Ok(body) => body,
        Err(e) if e.is_timeout() => return network_error("read error body", e),
        Err(e) => format!("<unreadable body: {}>", e),
    };

    match status {
        401 | 403 => ApiError::Auth { status, body },
        _ => ApiError::Remote { status, body },
    }
}
