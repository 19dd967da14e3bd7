//! Seal command.
//!
//! Seals a value for a base64 public key and prints the base64 ciphertext.
//! Reads the value from `SECRET`, the positional argument, or stdin.

use std::io::{self, IsTerminal, Read};

use dialoguer::Password;
use tracing::debug;
use zeroize::Zeroizing;

use crate::cli::output;
use crate::core::seal;
use crate::error::{Result, ValidationError};

/// Seal `value` (or stdin) for `key` and print it.
pub fn execute(key: &str, value: Option<String>) -> Result<()> {
    let value = match value {
        Some(v) => Zeroizing::new(v),
        None => read_value()?,
    };

    if value.is_empty() {
        output::error("value cannot be empty");
        return Err(ValidationError::EmptyValue("SECRET".to_string()).into());
    }

    let sealed = seal::seal(key, value.as_bytes())?;
    debug!(len = sealed.len(), "value sealed");

    output::data(&sealed);
    Ok(())
}

fn read_value() -> Result<Zeroizing<String>> {
    if io::stdin().is_terminal() {
        return Ok(Zeroizing::new(
            Password::new().with_prompt("Value to seal").interact()?,
        ));
    }

    let mut input = Zeroizing::new(String::new());
    io::stdin().read_to_string(&mut input)?;
    let trimmed = input.trim_end_matches(['\r', '\n']);
    Ok(Zeroizing::new(trimmed.to_string()))
}
