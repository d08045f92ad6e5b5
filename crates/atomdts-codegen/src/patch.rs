//! Point patches applied to the raw metadata document.
//!
//! The upstream documentation has a few known gaps, most of them optional
//! arguments that are not flagged as such. Each gap is fixed by an RFC 6902
//! operation addressed by JSON Pointer into the raw document, applied with
//! [`json_patch::patch`].
//!
//! Patches are grouped into ordered passes. The built-in plan has two: the
//! optional-argument fixes, and a separate, currently empty, pass reserved for
//! deeper type annotation fixes so the two concerns never interleave.
//!
//! Paths are positional (`/classes/Config/instanceMethods/1/...`). When the
//! upstream document is reordered a path may stop resolving; that is reported
//! as [`Error::PatchError`] and never skipped.
//!
//! # Examples
//!
//! ```
//! use atomdts_codegen::patch::{PatchPlan, apply_plan};
//! use serde_json::json;
//!
//! let mut document = json!({
//!     "classes": {"Config": {"instanceMethods": [{"arguments": [{"name": "keyPath"}]}]}}
//! });
//!
//! let plan = PatchPlan::from_json(r#"[
//!     {"op": "add", "path": "/classes/Config/instanceMethods/0/arguments/0/isOptional", "value": true}
//! ]"#).unwrap();
//!
//! apply_plan(&mut document, &plan).unwrap();
//! assert_eq!(
//!     document.pointer("/classes/Config/instanceMethods/0/arguments/0/isOptional"),
//!     Some(&json!(true))
//! );
//! ```

use atomdts_core::{Error, Result};
use json_patch::AddOperation;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use json_patch::PatchOperation;

/// Name of the built-in pass marking arguments optional.
pub const OPTIONAL_ARGUMENTS_PASS: &str = "optional-arguments";

/// Name of the built-in pass reserved for type annotation fixes.
pub const ANNOTATIONS_PASS: &str = "annotations";

/// Arguments the upstream documentation fails to mark optional.
const OPTIONAL_ARGUMENT_PATHS: [&str; 4] = [
    // Config::onDidChange, 3rd argument
    "/classes/Config/instanceMethods/1/arguments/2/isOptional",
    // TextBuffer::transact, 2nd argument
    "/classes/TextBuffer/instanceMethods/52/arguments/1/isOptional",
    // TextEditor::transact, 2nd argument
    "/classes/TextEditor/instanceMethods/65/arguments/1/isOptional",
    // Workspace::scan, 3rd argument
    "/classes/Workspace/instanceMethods/38/arguments/2/isOptional",
];

/// Creates an `add` operation.
#[must_use]
pub fn add_operation(path: impl Into<String>, value: Value) -> PatchOperation {
    PatchOperation::Add(AddOperation {
        path: path.into(),
        value,
    })
}

/// Returns the JSON Pointer an operation targets.
#[must_use]
pub fn operation_path(operation: &PatchOperation) -> &str {
    match operation {
        PatchOperation::Add(op) => &op.path,
        PatchOperation::Remove(op) => &op.path,
        PatchOperation::Replace(op) => &op.path,
        PatchOperation::Move(op) => &op.path,
        PatchOperation::Copy(op) => &op.path,
        PatchOperation::Test(op) => &op.path,
    }
}

/// Renders an operation on one line, e.g. `add /a/b = true`.
#[must_use]
pub fn describe_operation(operation: &PatchOperation) -> String {
    match operation {
        PatchOperation::Add(op) => format!("add {} = {}", op.path, op.value),
        PatchOperation::Remove(op) => format!("remove {}", op.path),
        PatchOperation::Replace(op) => format!("replace {} = {}", op.path, op.value),
        PatchOperation::Move(op) => format!("move {} -> {}", op.from, op.path),
        PatchOperation::Copy(op) => format!("copy {} -> {}", op.from, op.path),
        PatchOperation::Test(op) => format!("test {} = {}", op.path, op.value),
    }
}

/// An ordered group of patch operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatchPass {
    /// Pass name, used in logs and errors
    pub name: String,
    /// Operations applied in order
    #[serde(default)]
    pub operations: Vec<PatchOperation>,
}

impl PatchPass {
    /// Creates a named pass.
    #[must_use]
    pub fn new(name: impl Into<String>, operations: Vec<PatchOperation>) -> Self {
        Self {
            name: name.into(),
            operations,
        }
    }
}

/// Ordered patch passes applied to the raw document after loading.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PatchPlan {
    /// Passes applied in order
    pub passes: Vec<PatchPass>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PatchFile {
    Plan(PatchPlan),
    Operations(Vec<PatchOperation>),
}

impl PatchPlan {
    /// Returns the plan matching the stock Atom API metadata.
    ///
    /// # Examples
    ///
    /// ```
    /// use atomdts_codegen::PatchPlan;
    ///
    /// let plan = PatchPlan::builtin();
    /// assert_eq!(plan.passes.len(), 2);
    /// assert_eq!(plan.operation_count(), 4);
    /// ```
    #[must_use]
    pub fn builtin() -> Self {
        let optional_arguments = OPTIONAL_ARGUMENT_PATHS
            .iter()
            .map(|path| add_operation(*path, Value::Bool(true)))
            .collect();

        Self {
            passes: vec![
                PatchPass::new(OPTIONAL_ARGUMENTS_PASS, optional_arguments),
                PatchPass::new(ANNOTATIONS_PASS, Vec::new()),
            ],
        }
    }

    /// Returns a plan that applies nothing.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parses a patch file.
    ///
    /// Accepts either `{"passes": [{"name": ..., "operations": [...]}]}` or a
    /// bare array of operations, which becomes a single pass named `custom`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if the text is neither shape.
    pub fn from_json(content: &str) -> Result<Self> {
        let file: PatchFile = serde_json::from_str(content).map_err(|e| Error::ConfigError {
            message: format!("invalid patch file: {e}"),
        })?;

        Ok(match file {
            PatchFile::Plan(plan) => plan,
            PatchFile::Operations(operations) => Self {
                passes: vec![PatchPass::new("custom", operations)],
            },
        })
    }

    /// Appends the passes of `other` after this plan's passes.
    #[must_use]
    pub fn then(mut self, other: Self) -> Self {
        self.passes.extend(other.passes);
        self
    }

    /// Total number of operations across all passes.
    #[must_use]
    pub fn operation_count(&self) -> usize {
        self.passes.iter().map(|p| p.operations.len()).sum()
    }

    /// Returns `true` if the plan contains no operations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.operation_count() == 0
    }
}

/// Applies every pass of `plan` to `document`, in order.
///
/// # Errors
///
/// Returns [`Error::PatchError`] for the first operation that fails. The
/// document may be partially patched at that point and should be discarded.
pub fn apply_plan(document: &mut Value, plan: &PatchPlan) -> Result<()> {
    for pass in &plan.passes {
        apply_pass(document, pass)?;
    }
    Ok(())
}

/// Applies one pass to `document`.
///
/// # Errors
///
/// Returns [`Error::PatchError`] for the first operation that fails.
pub fn apply_pass(document: &mut Value, pass: &PatchPass) -> Result<()> {
    for (index, operation) in pass.operations.iter().enumerate() {
        json_patch::patch(document, std::slice::from_ref(operation)).map_err(|e| {
            Error::PatchError {
                pass: pass.name.clone(),
                index,
                path: operation_path(operation).to_string(),
                reason: e.kind.to_string(),
            }
        })?;
        tracing::debug!(
            "Applied patch [{}#{index}] {}",
            pass.name,
            describe_operation(operation)
        );
    }

    tracing::info!(
        "Applied {} patches in pass '{}'",
        pass.operations.len(),
        pass.name
    );
    Ok(())
}
