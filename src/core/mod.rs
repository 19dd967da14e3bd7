//! Core library components.
//!
//! This module contains the reusable logic for sealing secrets, talking to
//! the remote provider, and sequencing a run. Nothing in here reads the
//! environment or prompts the user.

pub mod api;
pub mod config;
pub mod constants;
pub mod defaults;
pub mod dispatch;
pub mod domain;
pub mod fields;
pub mod pipeline;
pub mod publish;
pub mod seal;
pub mod types;
pub mod validation;
