//! Helpers shared by several commands.

use anyhow::{Context, Result};
use atomdts_core::GeneratorConfig;
use std::path::Path;
use tracing::debug;

/// Loads the generator configuration.
///
/// Without a path the defaults are used, so the tool stays parameterless.
///
/// # Examples
///
/// ```
/// use atomdts_cli::commands::common::load_config;
///
/// let config = load_config(None).unwrap();
/// assert_eq!(config.module_name, "atom");
/// ```
pub fn load_config(path: Option<&Path>) -> Result<GeneratorConfig> {
    let Some(path) = path else {
        debug!("No config file given, using defaults");
        return Ok(GeneratorConfig::default());
    };

    debug!("Loading config from {}", path.display());
    GeneratorConfig::from_file(path)
        .with_context(|| format!("failed to load config from {}", path.display()))
}
