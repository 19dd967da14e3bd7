//! Interactive form.
//!
//! Prompts for every field, prefilled from flags or the last saved defaults,
//! then lets the user trigger the pipeline, just save the values, or cancel.
//! Secrets are always entered hidden and are never prefilled from disk.

use std::collections::BTreeMap;
use std::io::{self, IsTerminal};

use dialoguer::{Input, Password, Select};
use tracing::debug;
use zeroize::Zeroizing;

use crate::cli::output;
use crate::cli::run::build_submission;
use crate::cli::RunArgs;
use crate::core::config::Config;
use crate::core::defaults::DefaultsStore;
use crate::core::domain::Submission;
use crate::core::fields;
use crate::core::validation;
use crate::error::Result;

const ACTIONS: &[&str] = &["Trigger pipeline", "Save variables", "Cancel"];

/// What the user chose to do with the form.
pub enum FormOutcome {
    /// Run the pipeline with this submission (defaults already saved)
    Trigger(Submission),
    /// Defaults saved under this id; nothing else to do
    Saved(u64),
    Cancelled,
}

/// Prompt for all fields and return the chosen outcome.
///
/// # Errors
///
/// Returns an error if stdin is not a terminal, a prompt fails, the values
/// do not validate, or the defaults cannot be saved.
pub fn collect(args: &RunArgs, config: &Config, store: &DefaultsStore) -> Result<FormOutcome> {
    if !io::stdin().is_terminal() {
        output::error("interactive mode needs a terminal");
        output::hint("pass values as flags instead of --interactive");
        return Err(io::Error::new(io::ErrorKind::Unsupported, "stdin is not a terminal").into());
    }

    let latest = store.latest()?;
    if let Some(record) = &latest {
        debug!(id = record.id, "prefilling from saved defaults");
    }

    output::section(&format!(
        "{} · {}",
        config.target.repo()?,
        config.target.workflow
    ));

    let mut secrets: Vec<(&'static str, Zeroizing<String>)> = Vec::new();
    for (field, flag) in fields::SECRETS.iter().zip(args.secret_flags()) {
        let value = match flag.1 {
            Some(v) => Zeroizing::new(v.to_string()),
            None => Zeroizing::new(
                Password::new()
                    .with_prompt(field.label)
                    .allow_empty_password(true)
                    .interact()?,
            ),
        };
        secrets.push((field.key, value));
    }

    let runner_token = match &args.runner_token {
        Some(token) => Zeroizing::new(token.clone()),
        None => Zeroizing::new(
            Password::new()
                .with_prompt(fields::RUNNER_TOKEN_LABEL)
                .interact()?,
        ),
    };

    let mut inputs = BTreeMap::new();
    for (field, flag) in fields::INPUTS.iter().zip(args.input_flags()) {
        let initial = flag
            .1
            .or_else(|| latest.as_ref().and_then(|r| r.get(field.key)))
            .unwrap_or("");

        let value: String = Input::new()
            .with_prompt(field.label)
            .with_initial_text(initial)
            .allow_empty(true)
            .interact_text()?;

        if !value.is_empty() {
            inputs.insert(field.key.to_string(), value);
        }
    }

    for raw in &args.inputs {
        let (key, value) = validation::parse_input_pair(raw)?;
        validation::validate_public_input(&key, &config.target.runner_token_secret)?;
        inputs.insert(key, value);
    }

    let choice = Select::new()
        .with_prompt("Action")
        .items(ACTIONS)
        .default(0)
        .interact()?;

    match choice {
        0 => {
            let secret_refs: Vec<(&str, Option<&str>)> = secrets
                .iter()
                .map(|(k, v)| (*k, (!v.is_empty()).then_some(v.as_str())))
                .collect();
            let submission = build_submission(
                &secret_refs,
                &config.target.runner_token_secret,
                &runner_token,
                &inputs,
            )?;
            let id = store.save(&inputs)?;
            debug!(id, "defaults saved before trigger");
            Ok(FormOutcome::Trigger(submission))
        }
        1 => Ok(FormOutcome::Saved(store.save(&inputs)?)),
        _ => Ok(FormOutcome::Cancelled),
    }
}
