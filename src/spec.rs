//! Mapping specifications.
//!
//! A [`MappingSpec`] describes, for one nesting level of a document, which
//! keys are typed attributes and which are nested blocks. Names are in HCL
//! casing (lower_snake); the converter translates them to manifest casing
//! when looking keys up.
//!
//! Specs are plain data: they derive `Serialize`/`Deserialize` so that a
//! generated table can be shipped as YAML or JSON and loaded at startup.
//!
//! ```rust
//! use ktf::{AttrType, CoercionKind, MappingSpec};
//!
//! let spec = MappingSpec::new("kubernetes_config_map_v1")
//!     .attribute("data", AttrType::scalar(CoercionKind::StringMap))
//!     .attribute("immutable", AttrType::scalar(CoercionKind::Bool))
//!     .block("metadata", MappingSpec::nested().attribute("name", AttrType::scalar(CoercionKind::String)));
//!
//! assert!(spec.validate().is_ok());
//! ```

use crate::case::to_lower_camel;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// The primitive type an attribute value is coerced to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoercionKind {
    Bool,
    Int,
    Float,
    String,
    StringMap,
}

impl CoercionKind {
    /// Name used in diagnostics and in serialized specs.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            CoercionKind::Bool => "bool",
            CoercionKind::Int => "int",
            CoercionKind::Float => "float",
            CoercionKind::String => "string",
            CoercionKind::StringMap => "string_map",
        }
    }
}

impl fmt::Display for CoercionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A coercion kind plus whether the attribute holds a list of them.
///
/// Terraform list and set attributes both map to `repeated: true`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AttrType {
    pub kind: CoercionKind,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub repeated: bool,
}

impl AttrType {
    /// A single value of `kind`.
    #[must_use]
    pub const fn scalar(kind: CoercionKind) -> Self {
        AttrType {
            kind,
            repeated: false,
        }
    }

    /// A list of values of `kind`.
    #[must_use]
    pub const fn list(kind: CoercionKind) -> Self {
        AttrType {
            kind,
            repeated: true,
        }
    }
}

impl fmt::Display for AttrType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.repeated {
            write!(f, "list of {}", self.kind)
        } else {
            write!(f, "{}", self.kind)
        }
    }
}

/// Conversion rules for one block and, recursively, its children.
///
/// `attributes` and `blocks` are `BTreeMap`s so the converter visits names in
/// lexicographic order. A name must not appear in both.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MappingSpec {
    /// Terraform resource type; empty for nested blocks.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub resource_name: String,
    #[serde(default)]
    pub attributes: BTreeMap<String, AttrType>,
    #[serde(default)]
    pub blocks: BTreeMap<String, MappingSpec>,
}

impl MappingSpec {
    /// Creates an empty top-level spec for the given resource type.
    #[must_use]
    pub fn new(resource_name: &str) -> Self {
        MappingSpec {
            resource_name: resource_name.to_string(),
            ..Default::default()
        }
    }

    /// Creates an empty spec for a nested block.
    #[must_use]
    pub fn nested() -> Self {
        Self::default()
    }

    /// Adds an attribute rule.
    #[must_use]
    pub fn attribute(mut self, name: &str, ty: AttrType) -> Self {
        self.attributes.insert(name.to_string(), ty);
        self
    }

    /// Adds a nested block rule.
    #[must_use]
    pub fn block(mut self, name: &str, spec: MappingSpec) -> Self {
        self.blocks.insert(name.to_string(), spec);
        self
    }

    /// Checks that attributes and blocks never read the same input key, at
    /// any depth. A block reads both its singular and plural key.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSpec`] naming the first offending path.
    pub fn validate(&self) -> Result<()> {
        self.validate_at(if self.resource_name.is_empty() {
            "resource"
        } else {
            self.resource_name.as_str()
        })
    }

    fn validate_at(&self, path: &str) -> Result<()> {
        if let Some(name) = self.attributes.keys().find(|k| self.blocks.contains_key(*k)) {
            return Err(Error::InvalidSpec(format!(
                "{path}.{name} is declared as both an attribute and a block"
            )));
        }
        // A block also claims its plural input key.
        for block in self.blocks.keys() {
            let singular = to_lower_camel(block);
            let plural = format!("{singular}s");
            if let Some(attribute) = self.attributes.keys().find(|a| {
                let key = to_lower_camel(a);
                key == singular || key == plural
            }) {
                return Err(Error::InvalidSpec(format!(
                    "{path}.{attribute} reads the same input key as block {path}.{block}"
                )));
            }
        }
        for (name, child) in &self.blocks {
            child.validate_at(&format!("{path}.{name}"))?;
        }
        Ok(())
    }
}
