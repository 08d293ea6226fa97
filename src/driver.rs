//! Document routing and whole-stream conversion.
//!
//! The [`Converter`] looks each document up in the [`SpecRegistry`]. Known
//! types go through the spec-driven converter; everything else becomes a
//! fallback `kubernetes_manifest` block, unless fallback is disabled.

use crate::decode::decode_documents;
use crate::{
    convert_resource, fallback, Block, ConvertOptions, Document, Error, Resource, Result,
    SpecRegistry,
};
use std::collections::HashSet;

/// Converts manifests using a borrowed registry.
///
/// # Examples
///
/// ```rust
/// use ktf::{ConvertOptions, Converter, SpecRegistry};
///
/// let registry = SpecRegistry::builtin();
/// let converter = Converter::new(&registry, ConvertOptions::default());
///
/// let doc = converter
///     .convert_str("apiVersion: v1\nkind: Namespace\nmetadata:\n  name: team-a\n")
///     .unwrap();
/// assert_eq!(doc.blocks[0].labels, vec!["kubernetes_namespace_v1", "team_a"]);
/// ```
#[derive(Clone, Debug)]
pub struct Converter<'a> {
    registry: &'a SpecRegistry,
    options: ConvertOptions,
}

impl<'a> Converter<'a> {
    #[must_use]
    pub fn new(registry: &'a SpecRegistry, options: ConvertOptions) -> Self {
        Converter { registry, options }
    }

    #[must_use]
    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    /// Converts one resource into a single top-level block.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownType`] when there is no spec and fallback is
    /// disabled; otherwise whatever the chosen conversion path returns.
    pub fn convert_resource(&self, resource: &Resource) -> Result<Block> {
        match self.registry.find(&resource.type_key) {
            Some(spec) => {
                tracing::debug!(
                    kind = %resource.type_key,
                    name = %resource.name,
                    spec = %spec.resource_name,
                    "converting with mapping spec"
                );
                convert_resource(spec, resource)
            }
            None if self.options.fallback => {
                tracing::debug!(
                    kind = %resource.type_key,
                    name = %resource.name,
                    "no mapping spec, serializing as {}",
                    self.options.manifest_resource
                );
                fallback::manifest_block(resource, &self.options)
            }
            None => Err(Error::UnknownType {
                api_version: resource.type_key.api_version.clone(),
                kind: resource.type_key.kind.clone(),
            }),
        }
    }

    /// Converts a YAML stream into a document with one block per resource.
    ///
    /// Empty documents are skipped. Conversion stops at the first failing
    /// document, whose identity is attached to the error.
    ///
    /// # Errors
    ///
    /// [`Error::Decode`] for unparsable input, [`Error::MalformedDocument`]
    /// for documents without identity, and [`Error::Document`] wrapping any
    /// conversion failure.
    pub fn convert_str(&self, input: &str) -> Result<Document> {
        let mut document = Document::new();
        let mut taken: HashSet<(String, String)> = HashSet::new();

        for (index, value) in decode_documents(input)?.into_iter().enumerate() {
            let Some(resource) = Resource::from_value(value)? else {
                tracing::trace!(index, "skipping empty document");
                continue;
            };

            let mut block = self.convert_resource(&resource).map_err(|e| {
                e.in_document(
                    &resource.type_key.api_version,
                    &resource.type_key.kind,
                    &resource.name,
                )
            })?;
            dedupe_label(&mut block, &mut taken);
            document.append_block(block);
        }

        tracing::debug!(blocks = document.len(), "conversion finished");
        Ok(document)
    }
}

/// Gives a block a `(type, name)` label pair no earlier block holds, by
/// appending `_2`, `_3`, ... to the name.
fn dedupe_label(block: &mut Block, taken: &mut HashSet<(String, String)>) {
    let [resource_type, name] = block.labels.as_mut_slice() else {
        return;
    };

    if !taken.contains(&(resource_type.clone(), name.clone())) {
        taken.insert((resource_type.clone(), name.clone()));
        return;
    }

    let mut suffix = 2;
    let unique = loop {
        let candidate = format!("{name}_{suffix}");
        if !taken.contains(&(resource_type.clone(), candidate.clone())) {
            break candidate;
        }
        suffix += 1;
    };
    tracing::warn!(
        resource = %resource_type,
        label = %name,
        renamed = %unique,
        "duplicate resource label"
    );
    taken.insert((resource_type.clone(), unique.clone()));
    *name = unique;
}
