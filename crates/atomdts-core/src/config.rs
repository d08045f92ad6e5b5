//! Configuration types for atomdts.
//!
//! The generator is parameterless by default: every field has a default
//! matching the stock Atom API metadata. A TOML file can override them.
//!
//! # Examples
//!
//! ```
//! use atomdts_core::{FormatterKind, GeneratorConfig};
//!
//! let config = GeneratorConfig::default();
//! assert_eq!(config.module_name, "atom");
//! assert_eq!(config.suppressed_superclass, "Model");
//! assert_eq!(config.formatter.kind, FormatterKind::Builtin);
//!
//! let custom = GeneratorConfig::from_toml_str(r#"
//! module_name = "atom-shell"
//!
//! [formatter]
//! indent_width = 2
//! "#).unwrap();
//! assert_eq!(custom.module_name, "atom-shell");
//! assert_eq!(custom.formatter.indent_width, 2);
//! ```

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Largest indentation width accepted by the built-in formatter.
const MAX_INDENT_WIDTH: usize = 16;

/// Generator configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Name of the ambient module wrapping every class.
    ///
    /// Default: `atom`
    pub module_name: String,

    /// Superclass name that is treated as "no inheritance".
    ///
    /// Default: `Model`
    pub suppressed_superclass: String,

    /// Path of the metadata document, relative to the working directory.
    ///
    /// Default: `fixture/api.json`
    pub metadata_path: PathBuf,

    /// Whether the built-in patch passes are applied after loading.
    ///
    /// Default: true
    pub builtin_patches: bool,

    /// Formatting pass configuration.
    pub formatter: FormatterConfig,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            module_name: "atom".to_string(),
            suppressed_superclass: "Model".to_string(),
            metadata_path: PathBuf::from("fixture/api.json"),
            builtin_patches: true,
            formatter: FormatterConfig::default(),
        }
    }
}

impl GeneratorConfig {
    /// Parses and validates configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if the text is not valid TOML, has
    /// fields of the wrong type, or fails [`validate`](Self::validate).
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(|e| Error::ConfigError {
            message: format!("invalid configuration: {e}"),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and validates configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if the file cannot be read or its
    /// content is invalid.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| Error::ConfigError {
            message: format!("failed to read {}: {e}", path.display()),
        })?;
        tracing::debug!("Loaded configuration from {}", path.display());
        Self::from_toml_str(&content)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if:
    /// - `module_name` is empty
    /// - `formatter.indent_width` is 0 or larger than 16
    /// - a command formatter has no program
    ///
    /// # Examples
    ///
    /// ```
    /// use atomdts_core::GeneratorConfig;
    ///
    /// let mut config = GeneratorConfig::default();
    /// assert!(config.validate().is_ok());
    ///
    /// config.module_name.clear();
    /// assert!(config.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<()> {
        if self.module_name.trim().is_empty() {
            return Err(Error::ConfigError {
                message: "module_name cannot be empty".to_string(),
            });
        }

        self.formatter.validate()
    }
}

/// Which formatter runs over the generated draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatterKind {
    /// In-process whitespace normalisation
    #[default]
    Builtin,
    /// External program reading the draft on stdin
    Command,
}

/// Formatting pass configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatterConfig {
    /// Formatter implementation.
    pub kind: FormatterKind,

    /// Spaces per nesting level (built-in formatter only).
    ///
    /// Default: 4
    pub indent_width: usize,

    /// Program to run (command formatter only).
    pub program: Option<String>,

    /// Arguments passed to the program (command formatter only).
    pub args: Vec<String>,
}

impl Default for FormatterConfig {
    fn default() -> Self {
        Self {
            kind: FormatterKind::Builtin,
            indent_width: 4,
            program: None,
            args: Vec::new(),
        }
    }
}

impl FormatterConfig {
    fn validate(&self) -> Result<()> {
        if self.indent_width == 0 || self.indent_width > MAX_INDENT_WIDTH {
            return Err(Error::ConfigError {
                message: format!(
                    "formatter.indent_width must be between 1 and {MAX_INDENT_WIDTH}, got {}",
                    self.indent_width
                ),
            });
        }

        if self.kind == FormatterKind::Command
            && self.program.as_deref().is_none_or(|p| p.trim().is_empty())
        {
            return Err(Error::ConfigError {
                message: "formatter.program is required when formatter.kind = \"command\""
                    .to_string(),
            });
        }

        Ok(())
    }
}
