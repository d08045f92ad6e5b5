//! Formatter trait.
//!
//! This module defines the `Formatter` trait, the seam between declaration
//! emission and whitespace normalisation. The emitter never formats its own
//! output; it hands the complete draft to a formatter exactly once.

use crate::Result;
use async_trait::async_trait;

/// Reformats generated declaration text.
///
/// Implementations must only change whitespace and indentation. A draft the
/// formatter considers syntactically invalid must be rejected with
/// [`Error::FormatError`](crate::Error::FormatError) carrying the diagnostic,
/// never passed through silently.
///
/// # Type Safety
///
/// All implementations must be `Send + Sync` to work with Tokio's async runtime.
///
/// # Examples
///
/// ```
/// use atomdts_core::traits::Formatter;
/// use atomdts_core::Result;
/// use async_trait::async_trait;
///
/// struct TrimFormatter;
///
/// #[async_trait]
/// impl Formatter for TrimFormatter {
///     async fn format(&self, _file_name: &str, source: &str) -> Result<String> {
///         Ok(format!("{}\n", source.trim_end()))
///     }
///
///     fn name(&self) -> &str {
///         "trim"
///     }
/// }
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let out = TrimFormatter.format("atom.d.ts", "class A {}\n\n\n").await.unwrap();
/// assert_eq!(out, "class A {}\n");
/// # }
/// ```
#[async_trait]
pub trait Formatter: Send + Sync {
    /// Formats `source` and returns the formatted text.
    ///
    /// `file_name` is a hint for formatters that pick rules by extension.
    ///
    /// # Errors
    ///
    /// Returns an error if the formatter rejects the input or cannot run.
    async fn format(&self, file_name: &str, source: &str) -> Result<String>;

    /// Returns a short name used in logs and error messages.
    fn name(&self) -> &str;
}
