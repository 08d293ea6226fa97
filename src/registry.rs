//! Lookup table from manifest type to mapping spec.
//!
//! The registry is built once by the entry point and then only read. It is
//! passed to the converter by reference; there is no global table.
//!
//! ```rust
//! use ktf::{MappingSpec, SpecRegistry, TypeKey};
//!
//! let mut registry = SpecRegistry::new("kubernetes");
//! registry.register("kubernetes_namespace_v1", MappingSpec::new("kubernetes_namespace_v1")).unwrap();
//!
//! let spec = registry.find(&TypeKey::new("v1", "Namespace")).unwrap();
//! assert_eq!(spec.resource_name, "kubernetes_namespace_v1");
//! ```

use crate::case::to_lower_snake;
use crate::{Error, MappingSpec, Result, TypeKey};
use std::collections::{BTreeMap, HashMap};

/// Mapping specs keyed by `<prefix>_<kind>[_<version>]`.
#[derive(Clone, Debug, Default)]
pub struct SpecRegistry {
    prefix: String,
    specs: HashMap<String, MappingSpec>,
}

impl SpecRegistry {
    /// Creates an empty registry whose lookup names start with `prefix`.
    #[must_use]
    pub fn new(prefix: &str) -> Self {
        SpecRegistry {
            prefix: prefix.to_string(),
            specs: HashMap::new(),
        }
    }

    /// Creates a `kubernetes` registry holding the built-in specs.
    #[must_use]
    pub fn builtin() -> Self {
        let mut registry = Self::new("kubernetes");
        for (name, spec) in crate::builtin::specs() {
            registry.specs.insert(name.to_string(), spec);
        }
        registry
    }

    /// Registers `spec` under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateSpec`] if `name` is taken, or
    /// [`Error::InvalidSpec`] if the spec fails [`MappingSpec::validate`].
    pub fn register(&mut self, name: &str, spec: MappingSpec) -> Result<()> {
        if self.specs.contains_key(name) {
            return Err(Error::DuplicateSpec(name.to_string()));
        }
        spec.validate()?;
        tracing::trace!(name, "registered mapping spec");
        self.specs.insert(name.to_string(), spec);
        Ok(())
    }

    /// Registers every entry of a YAML or JSON table of `name: spec`.
    ///
    /// Entries are registered in name order; the first failure stops the load.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decode`] for unparsable input, otherwise the errors of
    /// [`SpecRegistry::register`].
    pub fn register_table_yaml(&mut self, input: &str) -> Result<usize> {
        let table: BTreeMap<String, MappingSpec> = serde_yaml::from_str(input)?;
        let count = table.len();
        for (name, spec) in table {
            self.register(&name, spec)?;
        }
        tracing::debug!(count, "loaded mapping spec table");
        Ok(count)
    }

    /// Finds the spec for a manifest type.
    ///
    /// Tries `<prefix>_<kind>_<version>` first and falls back to the
    /// unversioned `<prefix>_<kind>`.
    #[must_use]
    pub fn find(&self, key: &TypeKey) -> Option<&MappingSpec> {
        let name = format!("{}_{}", self.prefix, to_lower_snake(&key.kind));
        let versioned = format!("{}_{}", name, key.version());
        self.specs
            .get(&versioned)
            .or_else(|| self.specs.get(&name))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.specs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// Registered names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.specs.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AttrType, CoercionKind};

    #[test]
    fn test_duplicate_registration_fails() {
        let mut registry = SpecRegistry::new("kubernetes");
        registry.register("kubernetes_pod", MappingSpec::new("a")).unwrap();
        let err = registry
            .register("kubernetes_pod", MappingSpec::new("b"))
            .unwrap_err();
        assert!(matches!(err, Error::DuplicateSpec(ref n) if n == "kubernetes_pod"));
        assert_eq!(registry.find(&TypeKey::new("v1", "Pod")).unwrap().resource_name, "a");
    }

    #[test]
    fn test_versioned_name_wins() {
        let mut registry = SpecRegistry::new("kubernetes");
        registry
            .register("kubernetes_config_map", MappingSpec::new("unversioned"))
            .unwrap();
        registry
            .register("kubernetes_config_map_v1", MappingSpec::new("versioned"))
            .unwrap();

        let key = TypeKey::new("v1", "ConfigMap");
        assert_eq!(registry.find(&key).unwrap().resource_name, "versioned");

        let key = TypeKey::new("v2", "ConfigMap");
        assert_eq!(registry.find(&key).unwrap().resource_name, "unversioned");

        assert!(registry.find(&TypeKey::new("v1", "Secret")).is_none());
    }

    #[test]
    fn test_group_is_stripped_from_version() {
        let mut registry = SpecRegistry::new("kubernetes");
        registry
            .register("kubernetes_deployment_v1", MappingSpec::new("kubernetes_deployment_v1"))
            .unwrap();
        assert!(registry.find(&TypeKey::new("apps/v1", "Deployment")).is_some());
    }

    #[test]
    fn test_invalid_spec_is_rejected() {
        let mut registry = SpecRegistry::new("kubernetes");
        let spec = MappingSpec::new("x")
            .attribute("spec", AttrType::scalar(CoercionKind::String))
            .block("spec", MappingSpec::nested());
        assert!(matches!(
            registry.register("kubernetes_x", spec),
            Err(Error::InvalidSpec(_))
        ));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_register_table_yaml() {
        let mut registry = SpecRegistry::new("kubernetes");
        let count = registry
            .register_table_yaml(
                "kubernetes_widget_v1:\n  resource_name: kubernetes_widget_v1\n  attributes:\n    size: { kind: int }\n",
            )
            .unwrap();
        assert_eq!(count, 1);
        let spec = registry.find(&TypeKey::new("example.com/v1", "Widget")).unwrap();
        assert_eq!(spec.attributes["size"], AttrType::scalar(CoercionKind::Int));
    }

    #[test]
    fn test_builtin_table() {
        let registry = SpecRegistry::builtin();
        assert!(registry.find(&TypeKey::new("v1", "Namespace")).is_some());
        assert!(registry.find(&TypeKey::new("v1", "ServiceAccount")).is_some());
        assert!(registry.find(&TypeKey::new("apps/v1", "Deployment")).is_none());
        assert!(registry.names().contains(&"kubernetes_config_map_v1"));
    }
}
