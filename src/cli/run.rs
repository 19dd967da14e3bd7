//! Run command.
//!
//! Flag adapter: turns command-line flags into a [`Submission`] and hands it
//! to the pipeline. The interactive form lives in [`crate::cli::form`] and
//! feeds the same pipeline.

use std::collections::BTreeMap;

use tracing::{debug, info};

use crate::cli::form::{self, FormOutcome};
use crate::cli::output;
use crate::cli::RunArgs;
use crate::core::api::GitHub;
use crate::core::config::Config;
use crate::core::defaults::DefaultsStore;
use crate::core::domain::{Secret, Submission};
use crate::core::pipeline::{Pipeline, RunReport};
use crate::core::validation;
use crate::error::{Result, ValidationError};

/// Publish secrets and dispatch the workflow.
pub fn execute(args: RunArgs) -> Result<()> {
    let config = resolve_config(&args)?;
    let store = defaults_store(&args)?.with_secret(config.target.runner_token_secret.as_str());

    let submission = if args.interactive {
        match form::collect(&args, &config, &store)? {
            FormOutcome::Trigger(submission) => submission,
            FormOutcome::Saved(id) => {
                output::success(&format!("variables saved (#{})", id));
                return Ok(());
            }
            FormOutcome::Cancelled => {
                output::dimmed("cancelled");
                return Ok(());
            }
        }
    } else {
        let runner_token = args.runner_token.as_deref().ok_or_else(|| {
            output::hint("pass --runner-token or set KCLI_PIPELINES_RUNNER_TOKEN");
            ValidationError::EmptyValue(config.target.runner_token_secret.clone())
        })?;

        let secret_flags = args.secret_flags();
        if secret_flags.iter().all(|(_, v)| v.is_none()) {
            output::warn("no secret values given; only the runner token will be published");
        }

        let inputs = flag_inputs(&args)?;
        let submission = build_submission(
            &secret_flags,
            &config.target.runner_token_secret,
            runner_token,
            &inputs,
        )?;

        if args.save_defaults {
            let id = store.save(&inputs)?;
            debug!(id, "saved defaults from flags");
        }
        submission
    };

    let provider = GitHub::from_config(&config.api, args.token.as_str())?;
    let pipeline = Pipeline::from_target(provider, &config.target)?;

    info!(repo = %pipeline.repo(), "running pipeline");
    let report = pipeline.run(&submission)?;
    print_report(&report);

    Ok(())
}

/// Load the config file and apply flag overrides.
pub(crate) fn resolve_config(args: &RunArgs) -> Result<Config> {
    let mut config = Config::resolve(args.config.as_deref())?;

    if let Some(owner) = &args.owner {
        config.target.owner = owner.clone();
    }
    if let Some(repo) = &args.repo {
        config.target.repo = repo.clone();
    }
    if let Some(workflow) = &args.workflow {
        config.target.workflow = workflow.clone();
    }
    if let Some(git_ref) = &args.git_ref {
        config.target.git_ref = git_ref.clone();
    }
    if let Some(url) = &args.api_url {
        config.api.url = url.clone();
    }
    if let Some(timeout) = args.timeout {
        config.api.timeout_secs = timeout;
    }

    config.validate()?;
    Ok(config)
}

fn defaults_store(args: &RunArgs) -> Result<DefaultsStore> {
    match &args.defaults_file {
        Some(path) => Ok(DefaultsStore::new(path)),
        None => DefaultsStore::open_default(),
    }
}

/// Collect catalogued input flags plus `--input KEY=VALUE` pairs.
fn flag_inputs(args: &RunArgs) -> Result<BTreeMap<String, String>> {
    let mut inputs = BTreeMap::new();

    for (key, value) in args.input_flags() {
        if let Some(v) = value {
            inputs.insert(key.to_string(), v.to_string());
        }
    }

    for raw in &args.inputs {
        let (key, value) = validation::parse_input_pair(raw)?;
        inputs.insert(key, value);
    }

    Ok(inputs)
}

/// Build a submission from secret values, the runner token and inputs.
///
/// Secrets without a value are skipped. Inputs that name a catalogued secret
/// are rejected so secret values never travel as workflow inputs.
pub(crate) fn build_submission(
    secrets: &[(&str, Option<&str>)],
    runner_token_secret: &str,
    runner_token: &str,
    inputs: &BTreeMap<String, String>,
) -> Result<Submission> {
    let mut submission = Submission::new();

    for (name, value) in secrets {
        match value {
            Some(v) => submission.add_secret(Secret::new(*name, *v)?),
            None => debug!(secret = *name, "no value given, skipping"),
        }
    }
    submission.add_secret(Secret::new(runner_token_secret, runner_token)?);

    for (key, value) in inputs {
        validation::validate_public_input(key, runner_token_secret)?;
        submission.set_input(key.as_str(), value.as_str())?;
    }

    Ok(submission)
}

fn print_report(report: &RunReport) {
    output::section("Pipeline triggered");
    output::kv("repository", &report.repo);
    output::kv("workflow  ", &report.workflow);
    output::kv("ref       ", &report.git_ref);
    output::blank();
    output::header("Secrets updated");
    for name in &report.published {
        output::list_item(&output::key(name));
    }
    output::blank();
    output::success("pipeline has been triggered");
}
