//! Defaults commands.
//!
//! Read-only views of the saved form defaults.

use std::path::PathBuf;

use crate::cli::output;
use crate::core::defaults::{DefaultsRecord, DefaultsStore};
use crate::error::Result;

fn store(file: Option<PathBuf>) -> Result<DefaultsStore> {
    match file {
        Some(path) => Ok(DefaultsStore::new(path)),
        None => DefaultsStore::open_default(),
    }
}

/// Print the most recently saved defaults.
pub fn show(file: Option<PathBuf>) -> Result<()> {
    let store = store(file)?;

    match store.latest()? {
        Some(record) => print_record(&record),
        None => {
            output::dimmed("no defaults saved yet");
            output::hint("run: sealpost run --interactive, then choose \"Save variables\"");
        }
    }
    Ok(())
}

/// Print every saved snapshot, oldest first.
pub fn history(file: Option<PathBuf>) -> Result<()> {
    let store = store(file)?;
    let records = store.history()?;

    if records.is_empty() {
        output::dimmed("no defaults saved yet");
        return Ok(());
    }

    for record in &records {
        print_record(record);
    }
    output::blank();
    output::dimmed(&format!("{} snapshot(s) in {}", records.len(), store.path().display()));
    Ok(())
}

fn print_record(record: &DefaultsRecord) {
    output::section(&format!(
        "#{} · {}",
        record.id,
        record.saved_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    if record.inputs.is_empty() {
        output::dimmed("  (no inputs)");
        return;
    }

    let width = record.inputs.keys().map(String::len).max().unwrap_or(0);
    for (key, value) in &record.inputs {
        output::kv(&format!("{:<width$}", key, width = width), value);
    }
}
