//! Command implementations for the atomdts CLI.
//!
//! Each command module executes one subcommand and returns an
//! [`ExitCode`](atomdts_core::cli::ExitCode); fatal errors propagate as
//! `anyhow::Error` and are reported by `main`.

pub mod common;
pub mod completions;
pub mod generate;
pub mod patches;
