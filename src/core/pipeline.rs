//! Publish-then-dispatch sequencing.
//!
//! Secrets are published one at a time in submission order. The workflow is
//! dispatched only after every secret is in place, so a run never sees stale
//! secrets. The first failure aborts everything after it.

use tracing::{debug, error};

use crate::core::api::Provider;
use crate::core::config::TargetConfig;
use crate::core::domain::{Repo, Submission};
use crate::core::types::WorkflowId;
use crate::core::{dispatch, publish};
use crate::error::{Error, Result};

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// Secrets published, in order
    pub published: Vec<String>,
    /// Repository the workflow was dispatched in
    pub repo: String,
    /// Workflow that was dispatched
    pub workflow: String,
    /// Ref the workflow runs on
    pub git_ref: String,
}

/// Orchestrates a run against one repository and workflow.
pub struct Pipeline<P> {
    provider: P,
    repo: Repo,
    workflow: WorkflowId,
    git_ref: String,
}

impl<P: Provider> Pipeline<P> {
    /// Create a pipeline for `repo`, dispatching `workflow` on `git_ref`.
    pub fn new(
        provider: P,
        repo: Repo,
        workflow: impl Into<WorkflowId>,
        git_ref: impl Into<String>,
    ) -> Self {
        Self {
            provider,
            repo,
            workflow: workflow.into(),
            git_ref: git_ref.into(),
        }
    }

    /// Create a pipeline from the `[target]` config section.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if the configured repository is invalid.
    pub fn from_target(provider: P, target: &TargetConfig) -> Result<Self> {
        Ok(Self::new(
            provider,
            target.repo()?,
            target.workflow.as_str(),
            target.git_ref.as_str(),
        ))
    }

    pub fn repo(&self) -> &Repo {
        &self.repo
    }

    /// Publish every secret, then dispatch the workflow.
    ///
    /// # Errors
    ///
    /// Returns `Error::Publish` naming the first secret that failed (nothing
    /// after it runs), or the dispatch error.
    pub fn run(&self, submission: &Submission) -> Result<RunReport> {
        debug!(
            repo = %self.repo,
            provider = self.provider.name(),
            secrets = submission.secrets().len(),
            inputs = submission.inputs().len(),
            "starting run"
        );

        let mut published = Vec::with_capacity(submission.secrets().len());

        for secret in submission.secrets() {
            if let Err(e) = publish::publish_secret(&self.provider, &self.repo, secret) {
                error!(secret = secret.name(), error = %e, "publish failed, aborting run");
                return Err(Error::Publish {
                    secret: secret.name().to_string(),
                    source: Box::new(e),
                });
            }
            published.push(secret.name().to_string());
        }

        dispatch::dispatch(
            &self.provider,
            &self.repo,
            &self.workflow,
            &self.git_ref,
            submission.inputs(),
        )?;

        Ok(RunReport {
            published,
            repo: self.repo.to_string(),
            workflow: self.workflow.clone(),
            git_ref: self.git_ref.clone(),
        })
    }
}
