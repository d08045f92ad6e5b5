//! atomdts CLI library.
//!
//! Exposes the command implementations so they can be exercised without
//! spawning the binary.

#![allow(clippy::format_push_string)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::unnecessary_wraps)] // Every command returns Result<ExitCode>

pub mod commands;
