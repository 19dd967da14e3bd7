//! Remote secret store and workflow API.
//!
//! The [`Provider`] trait is the seam between the publish/dispatch protocol
//! and the transport. [`GitHub`] talks to the real REST API; tests plug in
//! an in-memory store.
//!
//! ## Adding a New Provider
//!
//! 1. Implement the `Provider` trait
//! 2. Add the implementation in a new file (e.g., `gitea.rs`)
//! 3. Re-export from this module

use crate::core::domain::{Repo, RepoPublicKey, SealedSecret, WorkflowDispatch};
use crate::error::Result;

mod github;

pub use github::GitHub;

/// Remote CI/CD provider operations.
///
/// Every call is a single blocking request. Implementations must not retry
/// and must not cache public keys between calls.
pub trait Provider {
    /// Fetch the repository's current secret-sealing public key.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails or the response is not 2xx.
    fn public_key(&self, repo: &Repo) -> Result<RepoPublicKey>;

    /// Create or replace a repository secret.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails or the response is not 2xx.
    fn put_secret(&self, repo: &Repo, name: &str, sealed: &SealedSecret) -> Result<()>;

    /// Trigger a `workflow_dispatch` run.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` unless the remote answers 204.
    fn dispatch_workflow(
        &self,
        repo: &Repo,
        workflow_id: &str,
        request: &WorkflowDispatch,
    ) -> Result<()>;

    /// Provider name for display.
    fn name(&self) -> &'static str;
}

impl<P: Provider + ?Sized> Provider for &P {
    fn public_key(&self, repo: &Repo) -> Result<RepoPublicKey> {
        (**self).public_key(repo)
    }

    fn put_secret(&self, repo: &Repo, name: &str, sealed: &SealedSecret) -> Result<()> {
        (**self).put_secret(repo, name, sealed)
    }

    fn dispatch_workflow(
        &self,
        repo: &Repo,
        workflow_id: &str,
        request: &WorkflowDispatch,
    ) -> Result<()> {
        (**self).dispatch_workflow(repo, workflow_id, request)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}
