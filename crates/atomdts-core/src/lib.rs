//! Core types, traits, and errors for atomdts.
//!
//! This crate provides the foundational types shared by the code generator
//! and the command-line interface.
//!
//! # Architecture
//!
//! The core consists of:
//! - Error hierarchy with contextual information
//! - Generator configuration loaded from TOML
//! - The [`traits::Formatter`] abstraction for the final formatting pass
//! - CLI exit codes

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

mod config;
mod error;

pub mod cli;
pub mod traits;

pub use config::{FormatterConfig, FormatterKind, GeneratorConfig};
pub use error::{Error, Result};
