//! Field catalogue.
//!
//! The fixed set of values the provisioning workflow takes: non-secret
//! dispatch inputs, and secrets that are published before dispatch.

/// A form/flag field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    /// Input or secret name sent to the remote
    pub key: &'static str,
    /// Prompt label in the interactive form
    pub label: &'static str,
}

/// Non-secret workflow inputs, in form order.
pub const INPUTS: &[Field] = &[
    Field {
        key: "NEW_HOST",
        label: "New Host Name",
    },
    Field {
        key: "NEW_USERNAME",
        label: "New Username",
    },
    Field {
        key: "NEW_DOMAIN",
        label: "New Domain",
    },
    Field {
        key: "NEW_FORWARDER",
        label: "New Forwarder IP",
    },
    Field {
        key: "FREEIPA_SERVER_FQDN",
        label: "FreeIPA Server FQDN",
    },
    Field {
        key: "FREEIPA_SERVER_DOMAIN",
        label: "FreeIPA Server Domain",
    },
    Field {
        key: "GUID",
        label: "GUID",
    },
    Field {
        key: "OLLAMA",
        label: "OLLAMA",
    },
];

/// Secrets published before dispatch, in publish order.
///
/// The runner token is published after these under the configured name.
pub const SECRETS: &[Field] = &[
    Field {
        key: "SSH_PASSWORD",
        label: "SSH Password",
    },
    Field {
        key: "AWS_ACCESS_KEY",
        label: "AWS Access Key",
    },
    Field {
        key: "AWS_SECRET_KEY",
        label: "AWS Secret Key",
    },
];

/// Label for the runner token prompt.
pub const RUNNER_TOKEN_LABEL: &str = "Runner Registration Token";

/// Whether `key` names one of the catalogued secrets.
pub fn is_secret(key: &str) -> bool {
    SECRETS.iter().any(|f| f.key.eq_ignore_ascii_case(key))
}
