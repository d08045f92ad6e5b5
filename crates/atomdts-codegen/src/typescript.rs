//! Mapping from documentation types to TypeScript types.
//!
//! The documentation uses free-form type names (`String`, `Bool`, `Array`,
//! class names). A small fixed table converts the primitive ones; anything
//! else is assumed to already be a valid type reference, usually another
//! class in the same module.
//!
//! # Examples
//!
//! ```
//! use atomdts_codegen::typescript::{return_type, to_ts_type};
//! use atomdts_codegen::ReturnValue;
//!
//! assert_eq!(to_ts_type(Some("String")), "string");
//! assert_eq!(to_ts_type(Some("TextEditor")), "TextEditor");
//! assert_eq!(to_ts_type(None), "any");
//!
//! assert_eq!(return_type(&[]), "void");
//! ```

use crate::metadata::{Property, ReturnValue};
use indexmap::IndexSet;
use regex::Regex;
use std::sync::LazyLock;

/// Type used whenever no usable type information exists.
pub const ANY: &str = "any";

/// Return type of methods that declare no return values.
pub const VOID: &str = "void";

static SUMMARY_TYPE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{(.*)\}").expect("valid regex"));

/// Converts a documentation type name to a TypeScript type.
///
/// | Documentation         | TypeScript     |
/// |-----------------------|----------------|
/// | missing or empty      | `any`          |
/// | `Array`, `array`      | `any[]`        |
/// | `Promise`             | `Promise<any>` |
/// | `Number`              | `number`       |
/// | `String`              | `string`       |
/// | `Boolean`, `Bool`     | `boolean`      |
/// | anything else         | unchanged      |
#[must_use]
pub fn to_ts_type(type_name: Option<&str>) -> &str {
    match type_name {
        None | Some("") => ANY,
        Some("Array" | "array") => "any[]",
        Some("Promise") => "Promise<any>",
        Some("Number") => "number",
        Some("String") => "string",
        Some("Boolean" | "Bool") => "boolean",
        Some(other) => other,
    }
}

/// Extracts the type embedded in a summary as `{TypeName}`.
///
/// The match is greedy and limited to a single line, so the capture runs
/// from the first `{` to the last `}` on the line that contains them.
///
/// # Examples
///
/// ```
/// use atomdts_codegen::typescript::summary_type;
///
/// assert_eq!(summary_type(Some("A {CommandRegistry} instance")), Some("CommandRegistry"));
/// assert_eq!(summary_type(Some("no type here")), None);
/// assert_eq!(summary_type(None), None);
/// ```
#[must_use]
pub fn summary_type(summary: Option<&str>) -> Option<&str> {
    SUMMARY_TYPE_REGEX
        .captures(summary?)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Resolves the declared type of a property from its summary.
#[must_use]
pub fn property_type(property: &Property) -> &str {
    to_ts_type(summary_type(property.summary.as_deref()))
}

/// Computes a method's return type from its documented return values.
///
/// - no return values: `void`
/// - otherwise the distinct mapped types of the values that carry a type,
///   in first-seen order, joined with ` | `
/// - `any` when none of the values carries a type
///
/// # Examples
///
/// ```
/// use atomdts_codegen::typescript::return_type;
/// use atomdts_codegen::ReturnValue;
///
/// let values = vec![
///     ReturnValue { type_name: Some("String".into()), description: None },
///     ReturnValue { type_name: Some("Range".into()), description: None },
///     ReturnValue { type_name: Some("String".into()), description: None },
/// ];
/// assert_eq!(return_type(&values), "string | Range");
///
/// let untyped = vec![ReturnValue::default()];
/// assert_eq!(return_type(&untyped), "any");
/// ```
#[must_use]
pub fn return_type(return_values: &[ReturnValue]) -> String {
    if return_values.is_empty() {
        return VOID.to_string();
    }

    let types: IndexSet<&str> = return_values
        .iter()
        .filter(|ret| ret.type_name.as_deref().is_some_and(|t| !t.is_empty()))
        .map(|ret| to_ts_type(ret.type_name.as_deref()))
        .collect();

    if types.is_empty() {
        return ANY.to_string();
    }

    types.into_iter().collect::<Vec<_>>().join(" | ")
}

/// Renders free text as doc comment lines, one ` * ` line per source line.
///
/// A literal `*/` is escaped so the text cannot close the comment early.
#[must_use]
pub fn jsdoc_lines(text: &str) -> String {
    text.split('\n')
        .map(|line| format!(" * {}\n", escape_comment(line)))
        .collect()
}

/// Escapes `*/` so `text` can sit inside a block comment.
#[must_use]
pub fn escape_comment(text: &str) -> String {
    text.replace("*/", "*\\/")
}
