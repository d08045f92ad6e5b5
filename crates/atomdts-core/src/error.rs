//! Error types for atomdts.
//!
//! Every failure in the pipeline is fatal: a missing or malformed metadata
//! document, a patch whose path no longer resolves, or a formatter that
//! rejects the generated text. Missing type information is never an error;
//! it falls back to `any` during emission.
//!
//! # Examples
//!
//! ```
//! use atomdts_core::{Error, Result};
//!
//! fn check_module_name(name: &str) -> Result<()> {
//!     if name.is_empty() {
//!         return Err(Error::ConfigError {
//!             message: "module name cannot be empty".to_string(),
//!         });
//!     }
//!     Ok(())
//! }
//!
//! let err = check_module_name("").unwrap_err();
//! assert!(err.is_config_error());
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for atomdts.
#[derive(Error, Debug)]
pub enum Error {
    /// The metadata document could not be read or parsed.
    ///
    /// Raised when the input file is missing, unreadable, not valid JSON,
    /// or does not have the expected metadata shape.
    #[error("Failed to load metadata from {}: {message}", path.display())]
    LoadError {
        /// Path of the document that failed to load
        path: PathBuf,
        /// Description of the failure
        message: String,
        /// Underlying cause, if any
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A patch operation did not resolve against the metadata tree.
    ///
    /// This usually means the upstream metadata changed shape and the
    /// hand-maintained patch list needs updating.
    #[error("Patch {index} of pass '{pass}' failed at '{path}': {reason}")]
    PatchError {
        /// Name of the patch pass
        pass: String,
        /// Zero-based position of the operation within its pass
        index: usize,
        /// JSON Pointer the operation targets
        path: String,
        /// Why the operation could not be applied
        reason: String,
    },

    /// The formatter rejected or failed to process the generated text.
    #[error("Formatter '{formatter}' failed: {message}")]
    FormatError {
        /// Name of the formatter that failed
        formatter: String,
        /// Diagnostic reported by the formatter
        message: String,
    },

    /// Configuration error.
    ///
    /// Raised when configuration is invalid, missing required fields,
    /// or contains contradictory settings.
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of the configuration problem
        message: String,
    },

    /// Serialization/deserialization error.
    #[error("Serialization error: {message}")]
    SerializationError {
        /// Description of the serialization failure
        message: String,
        /// Underlying serde error
        #[source]
        source: Option<serde_json::Error>,
    },
}

impl Error {
    /// Returns `true` if this is a metadata load error.
    ///
    /// # Examples
    ///
    /// ```
    /// use atomdts_core::Error;
    ///
    /// let err = Error::LoadError {
    ///     path: "fixture/api.json".into(),
    ///     message: "file not found".to_string(),
    ///     source: None,
    /// };
    /// assert!(err.is_load_error());
    /// ```
    #[must_use]
    pub const fn is_load_error(&self) -> bool {
        matches!(self, Self::LoadError { .. })
    }

    /// Returns `true` if this is a patch error.
    ///
    /// # Examples
    ///
    /// ```
    /// use atomdts_core::Error;
    ///
    /// let err = Error::PatchError {
    ///     pass: "optional-arguments".to_string(),
    ///     index: 0,
    ///     path: "/classes/Config".to_string(),
    ///     reason: "no such member".to_string(),
    /// };
    /// assert!(err.is_patch_error());
    /// ```
    #[must_use]
    pub const fn is_patch_error(&self) -> bool {
        matches!(self, Self::PatchError { .. })
    }

    /// Returns `true` if this is a formatter error.
    #[must_use]
    pub const fn is_format_error(&self) -> bool {
        matches!(self, Self::FormatError { .. })
    }

    /// Returns `true` if this is a configuration error.
    #[must_use]
    pub const fn is_config_error(&self) -> bool {
        matches!(self, Self::ConfigError { .. })
    }
}

/// Type alias for Results using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
