//! End-to-end declaration generation.
//!
//! Ties the emitter to a formatter. Loading and patching happen before this
//! point (see [`Metadata::load`]); the generator only turns an already
//! patched tree into the final text.
//!
//! # Examples
//!
//! ```
//! use atomdts_codegen::{DeclarationGenerator, Metadata};
//! use serde_json::json;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let metadata = Metadata::from_value(json!({
//!     "classes": {
//!         "Disposable": {
//!             "name": "Disposable",
//!             "filename": "src/disposable.coffee",
//!             "srcUrl": "https://example.com/disposable.coffee",
//!             "instanceMethods": [{"name": "dispose"}]
//!         }
//!     }
//! }))?;
//!
//! let generated = DeclarationGenerator::default().generate(&metadata).await?;
//! assert!(generated.content.contains("        dispose(): void;\n"));
//! assert_eq!(generated.class_count, 1);
//! # Ok(())
//! # }
//! ```

use crate::emitter::{EmitOptions, Emitter};
use crate::format::{BuiltinFormatter, formatter_from_config};
use crate::metadata::Metadata;
use atomdts_core::traits::Formatter;
use atomdts_core::{GeneratorConfig, Result};
use serde::Serialize;
use std::fmt;

/// File name hint passed to the formatter.
pub const DECLARATION_FILE_NAME: &str = "atom.d.ts";

/// Result of declaration generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedDeclaration {
    /// Formatted declaration text
    pub content: String,
    /// Number of classes emitted
    pub class_count: usize,
    /// Name of the formatter that produced `content`
    pub formatter: String,
}

/// Generates a formatted declaration file from metadata.
pub struct DeclarationGenerator {
    options: EmitOptions,
    formatter: Box<dyn Formatter>,
}

impl fmt::Debug for DeclarationGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeclarationGenerator")
            .field("options", &self.options)
            .field("formatter", &self.formatter.name())
            .finish()
    }
}

impl Default for DeclarationGenerator {
    fn default() -> Self {
        Self::new(EmitOptions::default(), Box::new(BuiltinFormatter::default()))
    }
}

impl DeclarationGenerator {
    /// Creates a generator with explicit options and formatter.
    #[must_use]
    pub fn new(options: EmitOptions, formatter: Box<dyn Formatter>) -> Self {
        Self { options, formatter }
    }

    /// Creates a generator from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn from_config(config: &GeneratorConfig) -> Result<Self> {
        config.validate()?;

        let options = EmitOptions {
            module_name: config.module_name.clone(),
            suppressed_superclass: config.suppressed_superclass.clone(),
        };
        Ok(Self::new(options, formatter_from_config(&config.formatter)?))
    }

    /// Returns the emission options.
    #[must_use]
    pub const fn options(&self) -> &EmitOptions {
        &self.options
    }

    /// Renders the unformatted draft.
    #[must_use]
    pub fn render_draft(&self, metadata: &Metadata) -> String {
        Emitter::new(metadata, self.options.clone()).emit()
    }

    /// Renders the draft and runs it through the formatter once.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FormatError`](atomdts_core::Error::FormatError) if the
    /// formatter rejects the draft or cannot run.
    pub async fn generate(&self, metadata: &Metadata) -> Result<GeneratedDeclaration> {
        let draft = self.render_draft(metadata);
        tracing::debug!("Draft is {} bytes", draft.len());

        let content = self
            .formatter
            .format(DECLARATION_FILE_NAME, &draft)
            .await?;

        tracing::info!(
            "Generated declarations for {} classes ({} bytes, formatter: {})",
            metadata.class_count(),
            content.len(),
            self.formatter.name()
        );

        Ok(GeneratedDeclaration {
            content,
            class_count: metadata.class_count(),
            formatter: self.formatter.name().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use atomdts_core::Error;
    use serde_json::json;

    struct RejectingFormatter;

    #[async_trait]
    impl Formatter for RejectingFormatter {
        async fn format(&self, _file_name: &str, _source: &str) -> Result<String> {
            Err(Error::FormatError {
                formatter: "rejecting".to_string(),
                message: "tmp.ts(1,1): error TS1128: Declaration or statement expected.".to_string(),
            })
        }

        fn name(&self) -> &str {
            "rejecting"
        }
    }

    struct UppercaseFormatter;

    #[async_trait]
    impl Formatter for UppercaseFormatter {
        async fn format(&self, _file_name: &str, source: &str) -> Result<String> {
            Ok(source.to_uppercase())
        }

        fn name(&self) -> &str {
            "uppercase"
        }
    }

    fn metadata() -> Metadata {
        Metadata::from_value(json!({
            "classes": {
                "Point": {
                    "name": "Point",
                    "filename": "src/point.coffee",
                    "srcUrl": "https://example.com/point.coffee",
                    "classMethods": [{
                        "name": "fromObject",
                        "arguments": [{"name": "object", "type": "Point"}],
                        "returnValues": [{"type": "Point"}]
                    }],
                    "instanceMethods": [{"name": "constructor", "arguments": [{"name": "row", "type": "Number"}]}]
                }
            }
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_generate_returns_formatted_output() {
        let generator = DeclarationGenerator::default();
        let metadata = metadata();

        let generated = generator.generate(&metadata).await.unwrap();
        let draft = generator.render_draft(&metadata);

        assert_ne!(generated.content, draft);
        assert!(generated.content.contains("    class Point {\n"));
        assert!(generated.content.contains("        static fromObject(object: Point): Point;\n"));
        assert!(generated.content.contains("        constructor(row: number);\n"));
        assert_eq!(generated.formatter, "builtin");
    }

    #[tokio::test]
    async fn test_formatter_result_is_what_gets_returned() {
        let generator = DeclarationGenerator::new(EmitOptions::default(), Box::new(UppercaseFormatter));
        let generated = generator.generate(&metadata()).await.unwrap();
        assert!(generated.content.starts_with("DECLARE MODULE \"ATOM\""));
    }

    #[tokio::test]
    async fn test_formatter_error_propagates() {
        let generator = DeclarationGenerator::new(EmitOptions::default(), Box::new(RejectingFormatter));
        let err = generator.generate(&metadata()).await.unwrap_err();
        assert!(err.is_format_error());
        assert!(err.to_string().contains("TS1128"));
    }

    #[tokio::test]
    async fn test_generate_rejects_unbalanced_summary_type() {
        let metadata = Metadata::from_value(json!({
            "classes": {
                "Workspace": {
                    "name": "Workspace",
                    "filename": "src/workspace.coffee",
                    "srcUrl": "https://example.com/workspace.coffee",
                    "instanceProperties": [
                        {"name": "p", "summary": "Either a {Config} or a {Project}"}
                    ]
                }
            }
        }))
        .unwrap();
        let generator = DeclarationGenerator::default();

        assert!(generator.render_draft(&metadata).contains("\t p: Config} or a {Project;\n"));

        let err = generator.generate(&metadata).await.unwrap_err();
        assert!(err.is_format_error());
        assert!(err.to_string().contains("expected ';', found '}'"));
    }

    #[test]
    fn test_from_config() {
        let config = GeneratorConfig {
            module_name: "atom-shell".to_string(),
            ..Default::default()
        };
        let generator = DeclarationGenerator::from_config(&config).unwrap();
        assert_eq!(generator.options().module_name, "atom-shell");
        assert!(generator.render_draft(&metadata()).starts_with("declare module \"atom-shell\""));

        let invalid = GeneratorConfig {
            module_name: String::new(),
            ..Default::default()
        };
        assert!(DeclarationGenerator::from_config(&invalid).unwrap_err().is_config_error());
    }
}
