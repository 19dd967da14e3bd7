//! sealpost - Seal secrets for GitHub Actions and dispatch a workflow.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use sealpost::cli::output;
use sealpost::cli::{execute, Cli};
use sealpost::error::{ApiError, Error};

fn main() {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_env("SEALPOST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("sealpost=debug")
        } else {
            EnvFilter::new("sealpost=warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time(),
        )
        .init();

    if let Err(e) = execute(cli.command) {
        output::error(&e.to_string());
        if let Some(hint) = suggestion(&e) {
            output::hint(hint);
        }
        std::process::exit(1);
    }
}

fn suggestion(e: &Error) -> Option<&'static str> {
    match e {
        Error::Publish { source, .. } => suggestion(source),
        Error::Api(ApiError::Auth { .. }) => {
            Some("check that the token can write repository secrets and run workflows")
        }
        Error::Api(ApiError::Network(_)) => Some("check connectivity or raise --timeout"),
        Error::Api(ApiError::Remote { status: 404, .. }) => {
            Some("check --owner, --repo and --workflow")
        }
        Error::Api(ApiError::Remote { status: 422, .. }) => {
            Some("check --ref and that the workflow declares these inputs")
        }
        Error::Seal(_) => Some("the public key must be 32 bytes of standard base64"),
        _ => None,
    }
}
