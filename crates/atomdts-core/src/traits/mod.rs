//! Core traits for atomdts.
//!
//! # Module Structure
//!
//! - `formatter` - Final formatting pass over generated declaration text

mod formatter;

pub use formatter::Formatter;
