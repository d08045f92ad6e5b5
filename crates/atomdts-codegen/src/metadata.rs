//! API documentation metadata model.
//!
//! Mirrors the JSON document produced by the documentation extractor. The
//! schema is loose: almost every field is optional, and sequences may be
//! missing or `null`. Both are normalised to empty sequences here so the
//! emitter never has to distinguish them.
//!
//! Loading happens in two steps. The document is first parsed into a raw
//! [`serde_json::Value`] so patches can address it by JSON Pointer, then
//! converted into the typed [`Metadata`] tree, which is read-only from then on.
//!
//! # Examples
//!
//! ```
//! use atomdts_codegen::Metadata;
//! use serde_json::json;
//!
//! let metadata = Metadata::from_value(json!({
//!     "classes": {
//!         "Disposable": {
//!             "name": "Disposable",
//!             "filename": "src/disposable.coffee",
//!             "srcUrl": "https://example.com/disposable.coffee"
//!         }
//!     }
//! })).unwrap();
//!
//! assert_eq!(metadata.class_count(), 1);
//! assert!(metadata.class("Disposable").is_some());
//! ```

use crate::patch::{PatchPlan, apply_plan};
use atomdts_core::{Error, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::path::Path;

/// Root of the metadata document.
///
/// Class order is the order in the source document and defines emission order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    /// Classes keyed by class name
    #[serde(default)]
    pub classes: IndexMap<String, ClassInfo>,
}

impl Metadata {
    /// Converts a raw (already patched) document into the typed tree.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SerializationError`] if the document does not have
    /// the metadata shape.
    pub fn from_value(document: Value) -> Result<Self> {
        serde_json::from_value(document).map_err(|e| Error::SerializationError {
            message: format!("metadata document has unexpected shape: {e}"),
            source: Some(e),
        })
    }

    /// Loads a metadata document, applies every pass of `plan` in order, and
    /// returns the typed tree.
    ///
    /// # Errors
    ///
    /// Returns:
    /// - [`Error::LoadError`] if the file is missing, unreadable, not JSON,
    ///   or not shaped like metadata
    /// - [`Error::PatchError`] if any patch path does not resolve
    pub fn load(path: impl AsRef<Path>, plan: &PatchPlan) -> Result<Self> {
        let path = path.as_ref();
        let mut document = load_document(path)?;

        apply_plan(&mut document, plan)?;

        let metadata = Self::from_value(document).map_err(|e| Error::LoadError {
            path: path.to_path_buf(),
            message: "document is not API metadata".to_string(),
            source: Some(Box::new(e)),
        })?;

        tracing::info!(
            "Loaded {} classes from {}",
            metadata.class_count(),
            path.display()
        );

        Ok(metadata)
    }

    /// Looks up a class by name.
    #[must_use]
    pub fn class(&self, name: &str) -> Option<&ClassInfo> {
        self.classes.get(name)
    }

    /// Returns the number of classes.
    #[inline]
    #[must_use]
    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    /// Returns an iterator over classes in document order.
    #[inline]
    pub fn classes(&self) -> impl Iterator<Item = &ClassInfo> {
        self.classes.values()
    }
}

/// Reads a UTF-8 file and parses it as JSON, preserving key order.
///
/// # Errors
///
/// Returns [`Error::LoadError`] if the file cannot be read or is not valid JSON.
pub fn load_document(path: impl AsRef<Path>) -> Result<Value> {
    let path = path.as_ref();

    let content = std::fs::read_to_string(path).map_err(|e| Error::LoadError {
        path: path.to_path_buf(),
        message: e.to_string(),
        source: Some(Box::new(e)),
    })?;

    serde_json::from_str(&content).map_err(|e| Error::LoadError {
        path: path.to_path_buf(),
        message: format!("invalid JSON: {e}"),
        source: Some(Box::new(e)),
    })
}

/// A documented class.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassInfo {
    /// Class name
    pub name: String,
    /// Free-text description, possibly spanning several lines
    #[serde(default)]
    pub description: Option<String>,
    /// One-line summary
    #[serde(default)]
    pub summary: Option<String>,
    /// Name of the superclass, if any
    #[serde(default)]
    pub super_class: Option<String>,
    /// Documentation visibility (`Public`, `Extended`, ...)
    #[serde(default)]
    pub visibility: Option<String>,
    /// Source file the class was extracted from
    #[serde(default)]
    pub filename: String,
    /// URL of the class definition in the source repository
    #[serde(default)]
    pub src_url: String,
    /// Static properties
    #[serde(default, deserialize_with = "null_as_empty")]
    pub class_properties: Vec<Property>,
    /// Instance properties
    #[serde(default, deserialize_with = "null_as_empty")]
    pub instance_properties: Vec<Property>,
    /// Static methods
    #[serde(default, deserialize_with = "null_as_empty")]
    pub class_methods: Vec<Method>,
    /// Instance methods
    #[serde(default, deserialize_with = "null_as_empty")]
    pub instance_methods: Vec<Method>,
}

impl ClassInfo {
    /// Returns the superclass to emit in an `extends` clause.
    ///
    /// A missing or empty superclass, or one equal to `suppressed`, yields
    /// `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// use atomdts_codegen::ClassInfo;
    ///
    /// let mut class = ClassInfo {
    ///     name: "Marker".to_string(),
    ///     super_class: Some("Model".to_string()),
    ///     ..Default::default()
    /// };
    /// assert_eq!(class.effective_superclass("Model"), None);
    ///
    /// class.super_class = Some("Emitter".to_string());
    /// assert_eq!(class.effective_superclass("Model"), Some("Emitter"));
    /// ```
    #[must_use]
    pub fn effective_superclass(&self, suppressed: &str) -> Option<&str> {
        self.super_class
            .as_deref()
            .filter(|name| !name.is_empty() && *name != suppressed)
    }
}

/// A documented property.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    /// Property name
    pub name: String,
    /// Free-text description
    #[serde(default)]
    pub description: Option<String>,
    /// Summary, which may embed the type as `{TypeName}`
    #[serde(default)]
    pub summary: Option<String>,
    /// Documentation visibility
    #[serde(default)]
    pub visibility: Option<String>,
}

/// A documented method.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Method {
    /// Method name
    pub name: String,
    /// Free-text description
    #[serde(default)]
    pub description: Option<String>,
    /// One-line summary
    #[serde(default)]
    pub summary: Option<String>,
    /// Documentation visibility
    #[serde(default)]
    pub visibility: Option<String>,
    /// Arguments in declaration order
    #[serde(default, deserialize_with = "null_as_empty")]
    pub arguments: Vec<Argument>,
    /// Documented return values
    #[serde(default, deserialize_with = "null_as_empty")]
    pub return_values: Vec<ReturnValue>,
}

impl Method {
    /// Returns `true` for the constructor, which never gets a return type.
    #[inline]
    #[must_use]
    pub fn is_constructor(&self) -> bool {
        self.name == "constructor"
    }
}

/// A documented method argument.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Argument {
    /// Argument name
    pub name: String,
    /// Documentation-style type name
    #[serde(default, rename = "type")]
    pub type_name: Option<String>,
    /// Free-text description
    #[serde(default)]
    pub description: Option<String>,
    /// Whether the argument may be omitted; absent means required
    #[serde(default)]
    pub is_optional: Option<bool>,
}

impl Argument {
    /// Returns `true` if the argument is marked optional.
    #[inline]
    #[must_use]
    pub fn is_optional(&self) -> bool {
        self.is_optional.unwrap_or(false)
    }
}

/// A documented return value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReturnValue {
    /// Documentation-style type name
    #[serde(default, rename = "type")]
    pub type_name: Option<String>,
    /// Free-text description
    #[serde(default)]
    pub description: Option<String>,
}

fn null_as_empty<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<Vec<T>>::deserialize(deserializer).map(Option::unwrap_or_default)
}
