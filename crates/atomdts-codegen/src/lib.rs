//! TypeScript declaration generation for the Atom editor API.
//!
//! Reads the API documentation metadata (classes, properties, methods,
//! argument and return descriptions), corrects known gaps in it with a fixed
//! list of JSON patches, and renders a single ambient module declaration.
//!
//! The pipeline is strictly one-directional:
//!
//! ```text
//! load -> patch -> emit -> format
//! ```
//!
//! # Examples
//!
//! ```
//! use atomdts_codegen::{EmitOptions, Emitter, Metadata};
//! use serde_json::json;
//!
//! let metadata = Metadata::from_value(json!({
//!     "classes": {
//!         "Point": {
//!             "name": "Point",
//!             "filename": "src/point.coffee",
//!             "srcUrl": "https://example.com/point.coffee",
//!             "instanceMethods": [{
//!                 "name": "isZero",
//!                 "returnValues": [{"type": "Boolean"}]
//!             }]
//!         }
//!     }
//! })).unwrap();
//!
//! let draft = Emitter::new(&metadata, EmitOptions::default()).emit();
//! assert!(draft.contains("isZero(): boolean;"));
//! ```

#![deny(unsafe_code)]
#![allow(clippy::format_push_string)]
#![warn(missing_docs, missing_debug_implementations)]

pub mod emitter;
pub mod format;
pub mod generator;
pub mod metadata;
pub mod patch;
mod syntax;
pub mod typescript;

pub use emitter::{EmitOptions, Emitter};
pub use format::{BuiltinFormatter, CommandFormatter, formatter_from_config};
pub use generator::{DeclarationGenerator, GeneratedDeclaration};
pub use metadata::{Argument, ClassInfo, Metadata, Method, Property, ReturnValue};
pub use patch::{PatchOperation, PatchPass, PatchPlan};
