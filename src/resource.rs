//! Partially decoded manifests.
//!
//! A [`Resource`] pulls out the few fields needed to pick a converter
//! (`apiVersion`, `kind`, `metadata.name`, `metadata.namespace`) and keeps the
//! whole document alongside them.

use crate::case::to_lower_snake;
use crate::{Error, Map, Result, Value};
use std::fmt;

/// Identifies the type of a manifest.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct TypeKey {
    pub api_version: String,
    pub kind: String,
}

impl TypeKey {
    #[must_use]
    pub fn new(api_version: &str, kind: &str) -> Self {
        TypeKey {
            api_version: api_version.to_string(),
            kind: kind.to_string(),
        }
    }

    /// The version part of `api_version`: whatever follows the last `/`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ktf::TypeKey;
    ///
    /// assert_eq!(TypeKey::new("apps/v1", "Deployment").version(), "v1");
    /// assert_eq!(TypeKey::new("v1", "Namespace").version(), "v1");
    /// ```
    #[must_use]
    pub fn version(&self) -> &str {
        match self.api_version.rsplit_once('/') {
            Some((_, version)) => version,
            None => &self.api_version,
        }
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.api_version, self.kind)
    }
}

/// A manifest with its identifying fields extracted.
#[derive(Clone, Debug, PartialEq)]
pub struct Resource {
    pub type_key: TypeKey,
    pub name: String,
    pub namespace: Option<String>,
    /// The complete document, including the fields above.
    pub raw: Map,
}

impl Resource {
    /// Extracts a resource from a decoded document.
    ///
    /// Returns `Ok(None)` for empty documents (null or `{}`), which show up
    /// regularly between `---` separators.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedDocument`] if the document is not a mapping,
    /// has no `metadata` mapping, or has no non-empty string `metadata.name`.
    pub fn from_value(value: Value) -> Result<Option<Resource>> {
        let raw = match value {
            Value::Null => return Ok(None),
            Value::Mapping(map) if map.is_empty() => return Ok(None),
            Value::Mapping(map) => map,
            other => {
                return Err(Error::malformed(format!(
                    "expected a mapping at the top level, got {}",
                    other.type_name()
                )))
            }
        };

        let api_version = optional_str(&raw, "apiVersion")?.unwrap_or_default();
        let kind = optional_str(&raw, "kind")?.unwrap_or_default();

        let metadata = match raw.get("metadata") {
            Some(Value::Mapping(m)) => m,
            Some(other) => {
                return Err(Error::malformed(format!(
                    "expected \"metadata\" to be a mapping, got {}",
                    other.type_name()
                )))
            }
            None => return Err(Error::malformed("missing \"metadata\"")),
        };
        let name = match optional_str(metadata, "name")? {
            Some(name) if !name.is_empty() => name,
            _ => return Err(Error::malformed(format!("missing \"name\" in metadata {}", Value::Mapping(metadata.clone())))),
        };
        let namespace = optional_str(metadata, "namespace")?.filter(|ns| !ns.is_empty());

        Ok(Some(Resource {
            type_key: TypeKey { api_version, kind },
            name,
            namespace,
            raw,
        }))
    }

    /// The document without `apiVersion` and `kind`.
    #[must_use]
    pub fn body(&self) -> Map {
        self.raw
            .iter()
            .filter(|(k, _)| k.as_str() != "apiVersion" && k.as_str() != "kind")
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Label for a spec-converted block: the snake-cased name.
    #[must_use]
    pub fn label(&self) -> String {
        terraform_label(&self.name)
    }

    /// Label for a fallback block: kind and name joined by `__`.
    #[must_use]
    pub fn manifest_label(&self) -> String {
        terraform_label(&format!("{}__{}", self.type_key.kind, self.name))
    }
}

/// Snake-cases `raw` and replaces dots, which Terraform labels cannot hold.
#[must_use]
pub fn terraform_label(raw: &str) -> String {
    to_lower_snake(raw).replace('.', "_")
}

fn optional_str(map: &Map, key: &str) -> Result<Option<String>> {
    match map.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(Error::malformed(format!(
            "expected {key:?} to be a string, got {} (value {other})",
            other.type_name()
        ))),
    }
}
