//! Spec-driven conversion of documents into HCL blocks.
//!
//! For each level of the document, the [`MappingSpec`] says which keys are
//! attributes and which are nested blocks. Attributes are visited first, then
//! blocks, each in lexicographic order of their HCL names. Every key of the
//! input must be claimed by some rule; anything left over fails the
//! conversion with [`Error::UnrecognizedKeys`] rather than being dropped.
//!
//! Block rules match either the singular key (`container`) or, failing that,
//! the plural one (`containers`). The value may be a single mapping or a
//! sequence of mappings; each mapping becomes one nested block.
//!
//! ```rust
//! use ktf::{convert_block, doc, AttrType, CoercionKind, MappingSpec};
//!
//! let spec = MappingSpec::nested()
//!     .attribute("restart_policy", AttrType::scalar(CoercionKind::String))
//!     .block("container", MappingSpec::nested().attribute("name", AttrType::scalar(CoercionKind::String)));
//!
//! let data = doc!({
//!     "restartPolicy": "Always",
//!     "containers": [{ "name": "app" }, { "name": "sidecar" }]
//! });
//!
//! let block = convert_block(&spec, "spec", vec![], data.as_mapping().unwrap()).unwrap();
//! assert_eq!(block.blocks_of("container").count(), 2);
//! ```

use crate::case::to_lower_camel;
use crate::{coerce, Block, Error, Map, MappingSpec, Resource, Result, Value};
use indexmap::IndexSet;

/// Converts a whole resource into `resource "<type>" "<label>" { ... }`.
///
/// The document body minus `apiVersion` and `kind` is matched against `spec`,
/// so `metadata` and every other top-level key must be covered by it.
///
/// # Errors
///
/// Any conversion error; no partial block is returned.
pub fn convert_resource(spec: &MappingSpec, resource: &Resource) -> Result<Block> {
    let labels = vec![spec.resource_name.clone(), resource.label()];
    convert_block(spec, "resource", labels, &resource.body())
}

/// Converts one mapping into a block of type `block_type`.
///
/// # Errors
///
/// - [`Error::TypeMismatch`] when an attribute value has the wrong shape
/// - [`Error::MalformedDocument`] when a block value is neither a mapping nor
///   a sequence of mappings
/// - [`Error::UnrecognizedKeys`] when keys are left over at any level
///
/// Errors from nested levels are wrapped in [`Error::Block`].
pub fn convert_block(
    spec: &MappingSpec,
    block_type: &str,
    labels: Vec<String>,
    data: &Map,
) -> Result<Block> {
    let path = if spec.resource_name.is_empty() {
        block_type
    } else {
        spec.resource_name.as_str()
    };
    let mut block = Block::new(block_type, labels);
    write_from_spec(spec, &mut block, data, path)?;
    Ok(block)
}

fn write_from_spec(spec: &MappingSpec, block: &mut Block, data: &Map, path: &str) -> Result<()> {
    let mut leftovers: IndexSet<&str> = data.keys().map(String::as_str).collect();

    for (name, ty) in &spec.attributes {
        // Spec names are snake_case; manifest keys are camelCase.
        let key = to_lower_camel(name);
        let Some(value) = data.get(&key) else {
            continue;
        };
        leftovers.shift_remove(key.as_str());

        let typed = coerce(*ty, value).map_err(|m| m.for_attribute(name))?;
        block.set_attribute(name, typed);
    }

    for (name, sub_spec) in &spec.blocks {
        let singular = to_lower_camel(name);
        let plural = format!("{singular}s");
        let (key, value) = match (data.get(&singular), data.get(&plural)) {
            (Some(v), _) => (singular, v),
            (None, Some(v)) => (plural, v),
            (None, None) => continue,
        };
        leftovers.shift_remove(key.as_str());

        let child_path = format!("{path}.{name}");
        for instance in block_instances(name, value)? {
            let mut child = Block::new(name, Vec::new());
            write_from_spec(sub_spec, &mut child, instance, &child_path)
                .map_err(|e| e.in_block(name))?;
            block.append_block(child);
        }
    }

    if !leftovers.is_empty() {
        return Err(Error::unrecognized_keys(
            path,
            leftovers.into_iter().map(str::to_string).collect(),
        ));
    }
    Ok(())
}

fn block_instances<'a>(name: &str, value: &'a Value) -> Result<Vec<&'a Map>> {
    match value {
        Value::Mapping(map) => Ok(vec![map]),
        Value::Sequence(items) => items
            .iter()
            .map(|item| match item {
                Value::Mapping(map) => Ok(map),
                other => Err(Error::malformed(format!(
                    "unexpected type in list for {name:?}: {} (value {other})",
                    other.type_name()
                ))),
            })
            .collect(),
        other => Err(Error::malformed(format!(
            "unexpected type for {name:?}: {} (value {other})",
            other.type_name()
        ))),
    }
}
