//! Formatting pass over the emitted draft.
//!
//! Two [`Formatter`] implementations are provided:
//!
//! - [`BuiltinFormatter`] re-indents the draft in process. It only touches
//!   whitespace. Every line outside comments must be a module header, a
//!   class header, a property or method signature, or closing braces;
//!   anything else, and any unbalanced brace, comment or string, is
//!   rejected.
//! - [`CommandFormatter`] pipes the draft through an external program and
//!   returns its standard output.
//!
//! # Examples
//!
//! ```
//! use atomdts_codegen::BuiltinFormatter;
//!
//! let formatted = BuiltinFormatter::new(4)
//!     .format_text("declare module \"atom\" {\nclass A { \n\t foo(): void;\n}\n\n}\n")
//!     .unwrap();
//!
//! assert_eq!(
//!     formatted,
//!     "declare module \"atom\" {\n    class A {\n        foo(): void;\n    }\n}\n"
//! );
//! ```

use async_trait::async_trait;
use atomdts_core::traits::Formatter;
use crate::syntax::check_line;
use atomdts_core::{Error, FormatterConfig, FormatterKind, Result};
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// Placeholder in [`CommandFormatter`] arguments replaced by the file name.
pub const FILE_PLACEHOLDER: &str = "{file}";

const BUILTIN_NAME: &str = "builtin";

/// In-process whitespace formatter.
///
/// Rules:
/// - each line is re-indented by brace depth, `indent_width` spaces per level
/// - doc comment continuation lines (`* ...`) get one extra space
/// - trailing whitespace is removed
/// - runs of blank lines collapse to one; blank lines directly after an
///   opening brace or before a closing brace are dropped
/// - the output ends with exactly one newline
///
/// Braces inside comments and string literals are ignored. Code outside
/// comments must be one of the declaration shapes the emitter produces:
/// `declare module "name" {`, `class Name [extends Type] {`, a property
/// `[static] name[?]: Type;`, a method `[static] name(arg[?]: Type, ..)[: Type];`,
/// or closing braces. Types are `|` unions of dotted names with optional
/// `<..>` arguments and `[]` suffixes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuiltinFormatter {
    indent_width: usize,
}

impl Default for BuiltinFormatter {
    fn default() -> Self {
        Self { indent_width: 4 }
    }
}

/// Brace counts for a single line, ignoring comments and strings.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct LineScan {
    /// `}` characters before any other code on the line
    leading_closers: usize,
    opens: usize,
    closes: usize,
    /// The line with comments removed
    code: String,
}

impl BuiltinFormatter {
    /// Creates a formatter indenting by `indent_width` spaces per level.
    #[must_use]
    pub const fn new(indent_width: usize) -> Self {
        Self { indent_width }
    }

    /// Formats `source` synchronously.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FormatError`] if a line is not a declaration the
    /// formatter recognises, if a `}` has no matching `{`, or if a block,
    /// comment, or string literal is left open.
    pub fn format_text(&self, source: &str) -> Result<String> {
        let mut out = String::with_capacity(source.len());
        let mut depth = 0usize;
        let mut in_comment = false;
        let mut pending_blank = false;
        // Suppresses blank lines at the start of input and after an opener
        let mut after_opener = true;

        for (index, raw) in source.lines().enumerate() {
            let line_no = index + 1;
            let line = raw.trim();

            if line.is_empty() {
                pending_blank = !after_opener;
                continue;
            }

            let continuation = in_comment && line.starts_with('*');
            let scan = scan_line(line, &mut in_comment)
                .and_then(|scan| check_line(&scan.code).map(|()| scan))
                .map_err(|message| format_error(format!("line {line_no}: {message}")))?;

            if pending_blank && scan.leading_closers == 0 {
                out.push('\n');
            }
            pending_blank = false;

            let level = depth
                .checked_sub(scan.leading_closers)
                .ok_or_else(|| format_error(format!("line {line_no}: unmatched '}}'")))?;

            out.push_str(&" ".repeat(level * self.indent_width));
            if continuation {
                out.push(' ');
            }
            out.push_str(line);
            out.push('\n');

            depth = (depth + scan.opens)
                .checked_sub(scan.closes)
                .ok_or_else(|| format_error(format!("line {line_no}: unmatched '}}'")))?;
            after_opener = scan.opens > scan.closes;
        }

        if in_comment {
            return Err(format_error("unterminated block comment at end of input"));
        }
        if depth != 0 {
            return Err(format_error(format!(
                "{depth} unclosed block(s) at end of input"
            )));
        }

        Ok(out)
    }
}

#[async_trait]
impl Formatter for BuiltinFormatter {
    async fn format(&self, file_name: &str, source: &str) -> Result<String> {
        tracing::debug!("Formatting {file_name} with the builtin formatter");
        self.format_text(source)
    }

    fn name(&self) -> &str {
        BUILTIN_NAME
    }
}

fn format_error(message: impl Into<String>) -> Error {
    Error::FormatError {
        formatter: BUILTIN_NAME.to_string(),
        message: message.into(),
    }
}

/// Counts code braces on one line, tracking block comments across lines.
fn scan_line(line: &str, in_comment: &mut bool) -> std::result::Result<LineScan, String> {
    let mut scan = LineScan::default();
    let mut seen_code = false;
    let mut string: Option<char> = None;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        if *in_comment {
            if c == '*' && chars.peek() == Some(&'/') {
                chars.next();
                *in_comment = false;
            }
            continue;
        }

        scan.code.push(c);
        if let Some(quote) = string {
            if c == '\\' {
                if let Some(escaped) = chars.next() {
                    scan.code.push(escaped);
                }
            } else if c == quote {
                string = None;
            }
            continue;
        }

        match c {
            '/' if chars.peek() == Some(&'*') => {
                chars.next();
                scan.code.pop();
                scan.code.push(' ');
                *in_comment = true;
            }
            '/' if chars.peek() == Some(&'/') => {
                scan.code.pop();
                break;
            }
            '"' | '\'' => {
                string = Some(c);
                seen_code = true;
            }
            '{' => {
                scan.opens += 1;
                seen_code = true;
            }
            '}' => {
                scan.closes += 1;
                if !seen_code {
                    scan.leading_closers += 1;
                }
            }
            c if c.is_whitespace() => {}
            _ => seen_code = true,
        }
    }

    if let Some(quote) = string {
        return Err(format!("unterminated string literal starting with {quote}"));
    }

    Ok(scan)
}

/// Formatter backed by an external program.
///
/// The draft is written to the program's stdin and its stdout is returned.
/// Occurrences of `{file}` in the arguments are replaced with the file name
/// hint, for formatters that choose rules by extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandFormatter {
    program: String,
    args: Vec<String>,
}

impl CommandFormatter {
    /// Creates a formatter running `program` with `args`.
    #[must_use]
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    fn error(&self, message: impl Into<String>) -> Error {
        Error::FormatError {
            formatter: self.program.clone(),
            message: message.into(),
        }
    }
}

#[async_trait]
impl Formatter for CommandFormatter {
    async fn format(&self, file_name: &str, source: &str) -> Result<String> {
        let args: Vec<String> = self
            .args
            .iter()
            .map(|arg| arg.replace(FILE_PLACEHOLDER, file_name))
            .collect();

        tracing::debug!("Running formatter: {} {}", self.program, args.join(" "));

        let mut child = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| self.error(format!("formatter unavailable: {e}")))?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| self.error("formatter stdin was not captured"))?;

        // Feed stdin while collecting output so large drafts cannot deadlock the pipes
        let write = async move {
            stdin.write_all(source.as_bytes()).await?;
            stdin.shutdown().await
        };
        let (written, output) = tokio::join!(write, child.wait_with_output());

        let output = output.map_err(|e| self.error(format!("failed to wait for formatter: {e}")))?;
        let stderr = String::from_utf8_lossy(&output.stderr);

        if !output.status.success() {
            return Err(self.error(format!(
                "exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }
        written.map_err(|e| self.error(format!("failed to write draft: {e}")))?;

        if !stderr.trim().is_empty() {
            tracing::warn!("Formatter {} reported: {}", self.program, stderr.trim());
        }

        String::from_utf8(output.stdout)
            .map_err(|e| self.error(format!("formatter produced invalid UTF-8: {e}")))
    }

    fn name(&self) -> &str {
        &self.program
    }
}

/// Builds the formatter described by `config`.
///
/// # Errors
///
/// Returns [`Error::ConfigError`] if a command formatter has no program.
pub fn formatter_from_config(config: &FormatterConfig) -> Result<Box<dyn Formatter>> {
    match config.kind {
        FormatterKind::Builtin => Ok(Box::new(BuiltinFormatter::new(config.indent_width))),
        FormatterKind::Command => {
            let program = config
                .program
                .clone()
                .filter(|p| !p.trim().is_empty())
                .ok_or_else(|| Error::ConfigError {
                    message: "formatter.program is required for a command formatter".to_string(),
                })?;
            Ok(Box::new(CommandFormatter::new(program, config.args.clone())))
        }
    }
}
