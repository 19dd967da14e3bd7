//! Workflow dispatch.
//!
//! One request, fire-and-forget. The caller gets no handle on the run it
//! started; success only means the provider accepted the request.

use std::collections::BTreeMap;

use tracing::info;

use crate::core::api::Provider;
use crate::core::domain::{Repo, WorkflowDispatch};
use crate::core::types::InputKey;
use crate::error::Result;

/// Ask the provider to start `workflow_id` on `git_ref` with `inputs`.
///
/// # Errors
///
/// Returns `ApiError` if the provider does not accept the dispatch.
pub fn dispatch<P: Provider>(
    provider: &P,
    repo: &Repo,
    workflow_id: &str,
    git_ref: &str,
    inputs: &BTreeMap<InputKey, String>,
) -> Result<()> {
    let request = WorkflowDispatch::new(git_ref, inputs.clone());
    provider.dispatch_workflow(repo, workflow_id, &request)?;

    info!(repo = %repo, workflow = workflow_id, git_ref, "workflow dispatched");
    Ok(())
}
