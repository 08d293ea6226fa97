//! # ktf
//!
//! Converts Kubernetes YAML manifests into Terraform HCL.
//!
//! ## How it works
//!
//! Each manifest is looked up in a [`SpecRegistry`] by kind and version.
//!
//! - **Known types** are converted structurally: a [`MappingSpec`] names the
//!   HCL attributes (with their [`CoercionKind`]) and nested blocks of every
//!   level, and the input keys are matched against it by camelCase name.
//!   Keys nothing claims are an error, so no field is ever dropped silently.
//! - **Unknown types** are serialized whole into the `manifest` attribute of a
//!   `kubernetes_manifest` resource.
//!
//! ## Quick Start
//!
//! ```rust
//! use ktf::{convert_str, SpecRegistry};
//!
//! let yaml = r#"
//! apiVersion: v1
//! kind: Namespace
//! metadata:
//!   name: team-a
//!   labels:
//!     owner: platform
//! "#;
//!
//! let hcl = convert_str(yaml, &SpecRegistry::builtin()).unwrap();
//! assert_eq!(
//!     hcl,
//!     r#"resource "kubernetes_namespace_v1" "team_a" {
//!   metadata {
//!     labels = {
//!       "owner" = "platform"
//!     }
//!     name = "team-a"
//!   }
//! }
//! "#
//! );
//! ```
//!
//! ### Custom mapping specs
//!
//! Specs can be built in code or loaded from a YAML table:
//!
//! ```rust
//! use ktf::{convert_str, SpecRegistry};
//!
//! let mut registry = SpecRegistry::builtin();
//! registry
//!     .register_table_yaml(
//!         r#"
//! kubernetes_widget_v1:
//!   resource_name: kubernetes_widget_v1
//!   blocks:
//!     metadata:
//!       attributes:
//!         name: { kind: string }
//!     spec:
//!       attributes:
//!         replicas: { kind: int }
//!         args: { kind: string, repeated: true }
//! "#,
//!     )
//!     .unwrap();
//!
//! let yaml = "apiVersion: example.com/v1\nkind: Widget\nmetadata:\n  name: w\nspec:\n  replicas: 2\n  args: [a, b]\n";
//! let hcl = convert_str(yaml, &registry).unwrap();
//! assert!(hcl.contains("replicas = 2"));
//! assert!(hcl.contains("args = [\"a\", \"b\"]"));
//! ```
//!
//! ## Error handling
//!
//! Conversion is all-or-nothing per document. Errors carry the path to the
//! offending field; see [`Error`].

pub mod block;
pub mod builtin;
pub mod case;
pub mod coerce;
pub mod convert;
pub mod decode;
pub mod driver;
pub mod error;
pub mod fallback;
pub mod macros;
pub mod map;
pub mod options;
pub mod registry;
pub mod resource;
pub mod spec;
pub mod token;
pub mod value;
pub mod writer;

pub use block::{Block, Document, Expression, TypedValue};
pub use coerce::{coerce, Mismatch};
pub use convert::{convert_block, convert_resource};
pub use driver::Converter;
pub use error::{Error, Result};
pub use map::Map;
pub use options::ConvertOptions;
pub use registry::SpecRegistry;
pub use resource::{Resource, TypeKey};
pub use spec::{AttrType, CoercionKind, MappingSpec};
pub use value::{Number, Value};

use std::io;

/// Converts a YAML stream to HCL text with default options.
///
/// # Errors
///
/// Returns the first decoding or conversion error.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn convert_str(input: &str, registry: &SpecRegistry) -> Result<String> {
    convert_str_with_options(input, registry, ConvertOptions::default())
}

/// Converts a YAML stream to HCL text with custom options.
///
/// # Examples
///
/// ```rust
/// use ktf::{convert_str_with_options, ConvertOptions, SpecRegistry};
///
/// let yaml = "apiVersion: v1\nkind: Namespace\nmetadata:\n  name: ns\n";
/// let hcl = convert_str_with_options(yaml, &SpecRegistry::builtin(), ConvertOptions::new().with_indent(4)).unwrap();
/// assert!(hcl.contains("\n        name = \"ns\"\n"));
/// ```
///
/// # Errors
///
/// Returns the first decoding or conversion error.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn convert_str_with_options(
    input: &str,
    registry: &SpecRegistry,
    options: ConvertOptions,
) -> Result<String> {
    let converter = Converter::new(registry, options);
    let document = converter.convert_str(input)?;
    Ok(document.to_hcl(converter.options()))
}

/// Reads a YAML stream from `reader` and writes HCL to `writer`.
///
/// Nothing is written unless every document converts.
///
/// # Examples
///
/// ```rust
/// use ktf::{convert_reader, ConvertOptions, SpecRegistry};
/// use std::io::Cursor;
///
/// let input = Cursor::new("apiVersion: v1\nkind: Namespace\nmetadata:\n  name: ns\n");
/// let mut output = Vec::new();
/// convert_reader(input, &mut output, &SpecRegistry::builtin(), ConvertOptions::default()).unwrap();
/// assert!(String::from_utf8(output).unwrap().starts_with("resource \"kubernetes_namespace_v1\" \"ns\""));
/// ```
///
/// # Errors
///
/// Returns [`Error::Io`] if reading or writing fails, otherwise the first
/// decoding or conversion error.
pub fn convert_reader<R, W>(
    mut reader: R,
    mut writer: W,
    registry: &SpecRegistry,
    options: ConvertOptions,
) -> Result<()>
where
    R: io::Read,
    W: io::Write,
{
    let mut input = String::new();
    reader
        .read_to_string(&mut input)
        .map_err(|e| Error::io(&e.to_string()))?;
    let hcl = convert_str_with_options(&input, registry, options)?;
    writer
        .write_all(hcl.as_bytes())
        .map_err(|e| Error::io(&e.to_string()))?;
    Ok(())
}
