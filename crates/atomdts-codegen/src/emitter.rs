//! Declaration emitter.
//!
//! Walks the metadata tree once and appends declaration text to a single
//! owned buffer. The result is an unformatted draft: indentation is a tab
//! before each member and nothing more. Whitespace normalisation is the
//! formatter's job.

use crate::metadata::{ClassInfo, Metadata, Method, Property};
use crate::typescript::{escape_comment, jsdoc_lines, property_type, return_type, to_ts_type};

/// Options controlling declaration emission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitOptions {
    /// Name of the ambient module wrapping every class
    pub module_name: String,
    /// Superclass that never produces an `extends` clause
    pub suppressed_superclass: String,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            module_name: "atom".to_string(),
            suppressed_superclass: "Model".to_string(),
        }
    }
}

/// Member modifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Modifier {
    Static,
    Instance,
}

impl Modifier {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Static => "static",
            Self::Instance => "",
        }
    }
}

/// Renders a [`Metadata`] tree into declaration text.
///
/// # Examples
///
/// ```
/// use atomdts_codegen::{EmitOptions, Emitter, Metadata};
/// use serde_json::json;
///
/// let metadata = Metadata::from_value(json!({
///     "classes": {
///         "Task": {
///             "name": "Task",
///             "superClass": "Model",
///             "filename": "src/task.coffee",
///             "srcUrl": "https://example.com/task.coffee",
///             "instanceMethods": [{"name": "constructor"}]
///         }
///     }
/// })).unwrap();
///
/// let draft = Emitter::new(&metadata, EmitOptions::default()).emit();
/// assert!(draft.starts_with("declare module \"atom\" {\n"));
/// assert!(draft.contains("class Task {"));
/// assert!(draft.contains("constructor();"));
/// ```
#[derive(Debug)]
pub struct Emitter<'a> {
    metadata: &'a Metadata,
    options: EmitOptions,
    /// Output buffer
    def: String,
}

impl<'a> Emitter<'a> {
    /// Creates an emitter over `metadata`.
    #[must_use]
    pub const fn new(metadata: &'a Metadata, options: EmitOptions) -> Self {
        Self {
            metadata,
            options,
            def: String::new(),
        }
    }

    /// Emits the whole module and returns the draft text.
    #[must_use]
    pub fn emit(mut self) -> String {
        tracing::info!(
            "Emitting {} classes into module \"{}\"",
            self.metadata.class_count(),
            self.options.module_name
        );

        self.def
            .push_str(&format!("declare module \"{}\" {{\n", self.options.module_name));

        let metadata = self.metadata;
        for class in metadata.classes() {
            self.emit_class(class);
        }

        self.def.push_str("}\n");
        self.def
    }

    fn emit_class(&mut self, class: &ClassInfo) {
        tracing::debug!("Emitting class {}", class.name);

        self.def.push_str("/**\n");
        if let Some(description) = non_empty(class.description.as_deref()) {
            self.def.push_str(&jsdoc_lines(description));
            self.def.push_str(" *\n");
        }
        self.def.push_str(&jsdoc_lines(&format!("file: {}", class.filename)));
        self.def.push_str(&jsdoc_lines(&format!("srcUrl: {}", class.src_url)));
        self.def.push_str(" */\n");

        self.def.push_str(&format!("class {} ", class.name));
        if let Some(super_class) = class.effective_superclass(&self.options.suppressed_superclass) {
            self.def.push_str(&format!("extends {super_class} "));
        }
        self.def.push_str("{ \n");

        for property in &class.class_properties {
            self.emit_property(property, Modifier::Static);
        }
        if !class.class_properties.is_empty() {
            self.def.push('\n');
        }

        for property in &class.instance_properties {
            self.emit_property(property, Modifier::Instance);
        }
        if !class.instance_properties.is_empty() {
            self.def.push('\n');
        }

        for method in &class.class_methods {
            self.emit_method(method, Modifier::Static);
        }
        if !class.class_methods.is_empty() {
            self.def.push('\n');
        }

        for method in &class.instance_methods {
            self.emit_method(method, Modifier::Instance);
        }

        self.def.push_str("}\n\n");
    }

    fn emit_property(&mut self, property: &Property, modifier: Modifier) {
        self.def.push_str("/**\n");
        if let Some(description) = non_empty(property.description.as_deref()) {
            self.def.push_str(&jsdoc_lines(description));
        }
        self.def.push_str(" */\n");

        self.def.push_str(&format!(
            "\t{} {}: {};\n",
            modifier.as_str(),
            property.name,
            property_type(property)
        ));
    }

    fn emit_method(&mut self, method: &Method, modifier: Modifier) {
        self.def.push_str("/**\n");
        if let Some(description) = non_empty(method.description.as_deref()) {
            self.def.push_str(&jsdoc_lines(description));
        }
        for arg in &method.arguments {
            self.emit_tag("@param", arg.type_name.as_deref(), arg.description.as_deref());
        }
        for ret in &method.return_values {
            self.emit_tag("@returns", ret.type_name.as_deref(), ret.description.as_deref());
        }
        self.def.push_str(" */\n");

        self.def
            .push_str(&format!("\t{} {}(", modifier.as_str(), method.name));
        let params = method
            .arguments
            .iter()
            .map(|arg| {
                format!(
                    "{}{}: {}",
                    arg.name,
                    if arg.is_optional() { "?" } else { "" },
                    to_ts_type(arg.type_name.as_deref())
                )
            })
            .collect::<Vec<_>>()
            .join(", ");
        self.def.push_str(&params);

        if method.is_constructor() {
            self.def.push_str(");\n");
            return;
        }

        self.def
            .push_str(&format!("): {};\n", return_type(&method.return_values)));
    }

    /// Writes one `@param`/`@returns` line; the `{type}` part is omitted for
    /// untyped entries.
    fn emit_tag(&mut self, tag: &str, type_name: Option<&str>, description: Option<&str>) {
        let annotation = type_name
            .filter(|t| !t.is_empty())
            .map(|t| format!("{{{}}}", to_ts_type(Some(t))))
            .unwrap_or_default();
        // Multi-line descriptions continue on following comment lines
        let description = description.unwrap_or_default().replace('\n', "\n * ");
        self.def.push_str(&format!(
            " * {tag} {annotation} {}\n",
            escape_comment(&description)
        ));
    }
}

/// Treats an empty description the same as a missing one.
fn non_empty(text: Option<&str>) -> Option<&str> {
    text.filter(|t| !t.is_empty())
}
