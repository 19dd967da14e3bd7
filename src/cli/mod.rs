//! Command-line interface.

pub mod completions;
pub mod defaults;
pub mod form;
pub mod output;
pub mod run;
pub mod seal;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::core::fields;

/// sealpost - Seal secrets for GitHub Actions and dispatch a workflow.
#[derive(Parser)]
#[command(
    name = "sealpost",
    about = "Seal secrets for GitHub Actions and dispatch a workflow",
    version
)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Command {
    /// Publish secrets, then dispatch the workflow
    Run(Box<RunArgs>),

    /// Seal a value for a base64 public key and print the result
    Seal {
        /// Base64 X25519 public key of the recipient
        #[arg(short, long, env = "PUBLIC_KEY")]
        key: String,
        /// Value to seal (read from stdin if omitted)
        #[arg(env = "SECRET", hide_env_values = true)]
        value: Option<String>,
    },

    /// Inspect saved form defaults
    Defaults {
        /// Defaults file (default: platform data dir)
        #[arg(long, env = "SEALPOST_DEFAULTS", global = true)]
        file: Option<PathBuf>,

        #[command(subcommand)]
        action: DefaultsAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Defaults subcommands.
#[derive(Subcommand)]
pub enum DefaultsAction {
    /// Show the most recently saved defaults
    Show,
    /// List every saved snapshot
    History,
}

/// Supported shells for completions.
#[derive(clap::ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

/// Arguments for `sealpost run`.
///
/// Deliberately not `Debug`: it carries tokens and secret values.
#[derive(Args)]
pub struct RunArgs {
    /// API token with write access to the repository's secrets and workflows
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: String,

    /// Pre-generated runner registration token, published as a secret
    /// (prompted for in interactive mode)
    #[arg(long, env = "KCLI_PIPELINES_RUNNER_TOKEN", hide_env_values = true)]
    pub runner_token: Option<String>,

    /// Prompt for every value instead of reading flags
    #[arg(short, long)]
    pub interactive: bool,

    /// Config file (default: ./sealpost.toml if present)
    #[arg(long, env = "SEALPOST_CONFIG")]
    pub config: Option<PathBuf>,

    /// Repository owner
    #[arg(long)]
    pub owner: Option<String>,

    /// Repository name
    #[arg(long)]
    pub repo: Option<String>,

    /// Workflow file name or id
    #[arg(long)]
    pub workflow: Option<String>,

    /// Git ref to run the workflow on
    #[arg(long = "ref")]
    pub git_ref: Option<String>,

    /// API base URL
    #[arg(long)]
    pub api_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// SSH password to use
    #[arg(long, alias = "ssh_password")]
    pub ssh_password: Option<String>,

    /// AWS access key
    #[arg(long, alias = "aws_access_key")]
    pub aws_access_key: Option<String>,

    /// AWS secret key
    #[arg(long, alias = "aws_secret_key")]
    pub aws_secret_key: Option<String>,

    /// New host name
    #[arg(long, alias = "new_host")]
    pub new_host: Option<String>,

    /// New username
    #[arg(long, alias = "new_username")]
    pub new_username: Option<String>,

    /// New domain
    #[arg(long, alias = "new_domain")]
    pub new_domain: Option<String>,

    /// New forwarder IP
    #[arg(long, alias = "new_forwarder")]
    pub new_forwarder: Option<String>,

    /// FreeIPA server FQDN
    #[arg(long, alias = "freeipa_server_fqdn")]
    pub freeipa_server_fqdn: Option<String>,

    /// FreeIPA server domain
    #[arg(long, alias = "freeipa_server_domain")]
    pub freeipa_server_domain: Option<String>,

    /// GUID
    #[arg(long)]
    pub guid: Option<String>,

    /// OLLAMA
    #[arg(long)]
    pub ollama: Option<String>,

    /// Extra workflow input (repeatable)
    #[arg(long = "input", value_name = "KEY=VALUE")]
    pub inputs: Vec<String>,

    /// Defaults file (default: platform data dir)
    #[arg(long, env = "SEALPOST_DEFAULTS")]
    pub defaults_file: Option<PathBuf>,

    /// Also save the non-secret inputs as form defaults
    #[arg(long)]
    pub save_defaults: bool,
}

impl RunArgs {
    /// Catalogued input flags, keyed by input name.
    pub fn input_flags(&self) -> Vec<(&'static str, Option<&str>)> {
        let values = [
            &self.new_host,
            &self.new_username,
            &self.new_domain,
            &self.new_forwarder,
            &self.freeipa_server_fqdn,
            &self.freeipa_server_domain,
            &self.guid,
            &self.ollama,
        ];
        fields::INPUTS
            .iter()
            .zip(values)
            .map(|(f, v)| (f.key, v.as_deref()))
            .collect()
    }

    /// Catalogued secret flags, keyed by secret name.
    pub fn secret_flags(&self) -> Vec<(&'static str, Option<&str>)> {
        let values = [&self.ssh_password, &self.aws_access_key, &self.aws_secret_key];
        fields::SECRETS
            .iter()
            .zip(values)
            .map(|(f, v)| (f.key, v.as_deref()))
            .collect()
    }
}

/// Execute a command.
pub fn execute(command: Command) -> crate::error::Result<()> {
    match command {
        Command::Run(args) => run::execute(*args),
        Command::Seal { key, value } => seal::execute(&key, value),
        Command::Defaults { file, action } => match action {
            DefaultsAction::Show => defaults::show(file),
            DefaultsAction::History => defaults::history(file),
        },
        Command::Completions { shell } => completions::execute(shell),
    }
}
