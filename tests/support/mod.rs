//! Test support utilities for sealpost integration tests.
//!
//! Provides an isolated environment for running the binary, an in-memory
//! provider, and a mock GitHub HTTP server.

#![allow(dead_code)]

pub mod assertions;
pub mod commands;
pub mod fixtures;
pub mod server;

#[allow(unused_imports)]
pub use assertions::*;
#[allow(unused_imports)]
pub use fixtures::*;
#[allow(unused_imports)]
pub use server::*;

use std::path::PathBuf;

use tempfile::TempDir;

/// Test environment with isolated temp directories.
///
/// Each test gets its own working dir and home dir. Child processes use
/// `.current_dir()`, so tests can run in parallel.
pub struct Test {
    /// Working directory for the command (where `sealpost.toml` is looked up)
    pub dir: TempDir,
    /// Temporary home directory
    pub home: TempDir,
}

impl Test {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        let home = TempDir::new().expect("failed to create temp home");

        Self { dir, home }
    }

    /// Path of the defaults file used by commands from this environment.
    pub fn defaults_path(&self) -> PathBuf {
        self.home.path().join("defaults.toml")
    }

    /// Write `sealpost.toml` into the working directory.
    pub fn write_config(&self, contents: &str) -> PathBuf {
        let path = self.dir.path().join("sealpost.toml");
        std::fs::write(&path, contents).expect("failed to write config");
        path
    }
}
