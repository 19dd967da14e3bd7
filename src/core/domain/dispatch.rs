//! Workflow dispatch request.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::types::InputKey;

/// Request body for `POST .../actions/workflows/{id}/dispatches`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowDispatch {
    /// Branch or tag the workflow runs on
    #[serde(rename = "ref")]
    pub git_ref: String,
    /// Workflow inputs; never contains secret values
    pub inputs: BTreeMap<InputKey, String>,
}

impl WorkflowDispatch {
    pub fn new(git_ref: impl Into<String>, inputs: BTreeMap<InputKey, String>) -> Self {
        Self {
            git_ref: git_ref.into(),
            inputs,
        }
    }
}
