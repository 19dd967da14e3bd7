//! Input validation for sealpost operations.
//!
//! Validates secret names, values, repository coordinates and dispatch inputs
//! before anything goes over the wire.

use crate::core::constants::RESERVED_SECRET_PREFIX;
use crate::core::fields;
use crate::error::{Result, ValidationError};

/// Validate a repository secret name.
///
/// GitHub secret names:
/// - Only A-Z, a-z, 0-9, and underscore
/// - Cannot start with a digit
/// - Cannot start with the `GITHUB_` prefix
/// - Cannot be empty
///
/// # Errors
///
/// Returns `ValidationError` if the name is invalid.
pub fn validate_secret_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(ValidationError::EmptySecretName.into());
    }

    if name.starts_with(|c: char| c.is_ascii_digit()) {
        return Err(invalid_name(name, "cannot start with a digit".to_string()));
    }

    if name
        .to_ascii_uppercase()
        .starts_with(RESERVED_SECRET_PREFIX)
    {
        return Err(invalid_name(
            name,
            format!("the {} prefix is reserved", RESERVED_SECRET_PREFIX),
        ));
    }

    for (i, ch) in name.chars().enumerate() {
        if !ch.is_ascii_alphanumeric() && ch != '_' {
            return Err(invalid_name(
                name,
                format!(
                    "invalid character '{}' at position {}. Only letters, digits, and underscore are allowed",
                    ch,
                    i + 1
                ),
            ));
        }
    }

    Ok(())
}

fn invalid_name(name: &str, reason: String) -> crate::error::Error {
    ValidationError::InvalidSecretName {
        name: name.to_string(),
        reason,
    }
    .into()
}

/// Validate a secret value.
///
/// Secret values cannot be empty.
///
/// # Errors
///
/// Returns `ValidationError::EmptyValue` if the value is empty.
pub fn validate_value(name: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(ValidationError::EmptyValue(name.to_string()).into());
    }
    Ok(())
}

/// Why `segment` cannot be used as one URL path segment, if it cannot.
fn path_segment_problem(segment: &str) -> Option<&'static str> {
    if segment.is_empty() {
        Some("cannot be empty")
    } else if segment == "." || segment == ".." {
        Some("cannot be '.' or '..'")
    } else if segment.contains(['/', '?', '#']) {
        Some("cannot contain '/', '?' or '#'")
    } else if segment.chars().any(char::is_whitespace) {
        Some("cannot contain whitespace")
    } else {
        None
    }
}

/// Validate an owner or repository path segment.
///
/// # Errors
///
/// Returns `ValidationError::InvalidRepo` for empty segments, `.`/`..`, or
/// segments containing `/`, `?`, `#` or whitespace.
pub fn validate_repo_segment(segment: &str) -> Result<()> {
    match path_segment_problem(segment) {
        None => Ok(()),
        Some(reason) => Err(ValidationError::InvalidRepo {
            value: segment.to_string(),
            reason: reason.to_string(),
        }
        .into()),
    }
}

/// Validate a workflow file name or numeric id.
///
/// # Errors
///
/// Returns `ValidationError::InvalidWorkflow` under the same rules as
/// [`validate_repo_segment`].
pub fn validate_workflow_id(workflow: &str) -> Result<()> {
    match path_segment_problem(workflow) {
        None => Ok(()),
        Some(reason) => Err(ValidationError::InvalidWorkflow {
            value: workflow.to_string(),
            reason: reason.to_string(),
        }
        .into()),
    }
}

/// Validate a dispatch input name.
///
/// # Errors
///
/// Returns `ValidationError::InvalidInput` for empty names or names
/// containing whitespace.
pub fn validate_input_key(key: &str) -> Result<()> {
    let reason = if key.is_empty() {
        "name cannot be empty"
    } else if key.chars().any(char::is_whitespace) {
        "name cannot contain whitespace"
    } else {
        return Ok(());
    };

    Err(ValidationError::InvalidInput {
        value: key.to_string(),
        reason: reason.to_string(),
    }
    .into())
}

/// Reject a dispatch input that names a secret.
///
/// Both catalogued secrets and the runner token secret are matched
/// case-insensitively.
///
/// # Errors
///
/// Returns `ValidationError::InvalidInput` if `key` names a secret.
pub fn validate_public_input(key: &str, runner_token_secret: &str) -> Result<()> {
    if fields::is_secret(key) || key.eq_ignore_ascii_case(runner_token_secret) {
        return Err(ValidationError::InvalidInput {
            value: key.to_string(),
            reason: "secret values cannot be sent as workflow inputs".to_string(),
        }
        .into());
    }
    Ok(())
}

/// Parse a `KEY=VALUE` dispatch input.
///
/// The value may be empty and may itself contain `=`.
///
/// # Errors
///
/// Returns `ValidationError::InvalidInput` if there is no `=` or the key is invalid.
pub fn parse_input_pair(raw: &str) -> Result<(String, String)> {
    let (key, value) = raw.split_once('=').ok_or_else(|| ValidationError::InvalidInput {
        value: raw.to_string(),
        reason: "expected KEY=VALUE".to_string(),
    })?;

    let key = key.trim();
    validate_input_key(key)?;

    Ok((key.to_string(), value.to_string()))
}
