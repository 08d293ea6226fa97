//! Configuration options for conversion and output.
//!
//! ## Examples
//!
//! ```rust
//! use ktf::ConvertOptions;
//!
//! let options = ConvertOptions::new().with_indent(4);
//! assert_eq!(options.indent, 4);
//! assert_eq!(options.manifest_resource, "kubernetes_manifest");
//!
//! // Refuse documents that have no mapping spec instead of falling back
//! let options = ConvertOptions::strict();
//! assert!(!options.fallback);
//! ```

/// Configuration for the converter and the HCL writer.
#[derive(Clone, Debug)]
pub struct ConvertOptions {
    /// Spaces per nesting level in the written HCL.
    pub indent: usize,
    /// Resource type used for documents without a mapping spec.
    pub manifest_resource: String,
    /// Attribute that holds the serialized document in fallback blocks.
    pub manifest_attribute: String,
    /// When `false`, documents without a mapping spec are an error.
    pub fallback: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        ConvertOptions {
            indent: 2,
            manifest_resource: "kubernetes_manifest".to_string(),
            manifest_attribute: "manifest".to_string(),
            fallback: true,
        }
    }
}

impl ConvertOptions {
    /// Creates default options (2-space indent, `kubernetes_manifest` fallback).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options with fallback serialization disabled.
    #[must_use]
    pub fn strict() -> Self {
        ConvertOptions {
            fallback: false,
            ..Default::default()
        }
    }

    /// Sets the indentation size (number of spaces per level).
    #[must_use]
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    /// Sets the resource type used for fallback blocks.
    #[must_use]
    pub fn with_manifest_resource(mut self, resource: &str) -> Self {
        self.manifest_resource = resource.to_string();
        self
    }

    /// Sets the attribute name used for fallback blocks.
    #[must_use]
    pub fn with_manifest_attribute(mut self, attribute: &str) -> Self {
        self.manifest_attribute = attribute.to_string();
        self
    }
}
