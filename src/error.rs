//! Error types for manifest conversion.
//!
//! Every failure is fail-fast and aborts the conversion of the current
//! document only. Errors raised deep inside a block tree are wrapped on the
//! way out with the block name ([`Error::Block`]) and finally with the
//! document identity ([`Error::Document`]), so a message such as
//!
//! ```text
//! converting resource v1/Service/web: in block "spec": in block "port": type mismatch for attribute "port": expected int, got string (value "http")
//! ```
//!
//! points at the offending field without needing a debugger.
//!
//! ## Error Categories
//!
//! - **Type Mismatches**: a value does not match its declared coercion kind
//! - **Unrecognized Keys**: input keys no mapping rule accounts for
//! - **Unsupported Shapes**: values the fallback serializer cannot render
//! - **Malformed Documents**: missing metadata, wrong block shapes
//! - **Registry Errors**: duplicate or invalid mapping specs
//!
//! ## Examples
//!
//! ```rust
//! use ktf::Error;
//!
//! let err = Error::unrecognized_keys("resource.metadata", vec!["bogus".to_string()]);
//! assert!(err.to_string().contains("bogus"));
//! ```

use std::fmt;
use thiserror::Error;

/// Represents all possible errors that can occur while converting manifests.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// No mapping spec exists and fallback serialization is disabled
    #[error("no mapping spec for {api_version}/{kind}")]
    UnknownType { api_version: String, kind: String },

    /// An attribute value does not match its declared coercion kind
    #[error("type mismatch for attribute {attribute:?}: expected {expected}, got {found} (value {value})")]
    TypeMismatch {
        attribute: String,
        expected: String,
        found: &'static str,
        value: String,
    },

    /// Input keys that no attribute or block rule consumed
    #[error("unrecognized keys at {path}: {keys:?}")]
    UnrecognizedKeys { path: String, keys: Vec<String> },

    /// A value the fallback serializer cannot render
    #[error("unsupported value in manifest: {found}")]
    UnsupportedValueShape { found: &'static str },

    /// Document is missing a required field or has an unexpected shape
    #[error("malformed document: {0}")]
    MalformedDocument(String),

    /// Failure inside a nested block
    #[error("in block {block:?}: {source}")]
    Block {
        block: String,
        #[source]
        source: Box<Error>,
    },

    /// Failure while converting one document
    #[error("converting resource {api_version}/{kind}/{name}: {source}")]
    Document {
        api_version: String,
        kind: String,
        name: String,
        #[source]
        source: Box<Error>,
    },

    /// A spec was registered twice under the same name
    #[error("attempt to register a spec with name {0:?} for the second time")]
    DuplicateSpec(String),

    /// A spec violates the attribute/block partition
    #[error("invalid mapping spec: {0}")]
    InvalidSpec(String),

    /// Input could not be decoded
    #[error("decode error: {0}")]
    Decode(String),

    /// IO error during reading or writing
    #[error("IO error: {0}")]
    Io(String),
}

impl Error {
    /// Creates a type mismatch error for the named attribute.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ktf::Error;
    ///
    /// let err = Error::type_mismatch("replicas", "int", "string", "\"three\"");
    /// assert!(err.to_string().contains("expected int, got string"));
    /// ```
    pub fn type_mismatch(attribute: &str, expected: &str, found: &'static str, value: &str) -> Self {
        Error::TypeMismatch {
            attribute: attribute.to_string(),
            expected: expected.to_string(),
            found,
            value: value.to_string(),
        }
    }

    /// Creates an unrecognized keys error for the given block path.
    pub fn unrecognized_keys(path: &str, keys: Vec<String>) -> Self {
        Error::UnrecognizedKeys {
            path: path.to_string(),
            keys,
        }
    }

    /// Creates a malformed document error.
    pub fn malformed<T: fmt::Display>(msg: T) -> Self {
        Error::MalformedDocument(msg.to_string())
    }

    /// Wraps this error with the name of the block it occurred in.
    #[must_use]
    pub fn in_block(self, block: &str) -> Self {
        Error::Block {
            block: block.to_string(),
            source: Box::new(self),
        }
    }

    /// Wraps this error with the identity of the document being converted.
    #[must_use]
    pub fn in_document(self, api_version: &str, kind: &str, name: &str) -> Self {
        Error::Document {
            api_version: api_version.to_string(),
            kind: kind.to_string(),
            name: name.to_string(),
            source: Box::new(self),
        }
    }

    /// Returns the innermost error, skipping block and document context.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ktf::Error;
    ///
    /// let err = Error::malformed("missing name").in_block("spec").in_document("v1", "Pod", "p");
    /// assert!(matches!(err.root(), Error::MalformedDocument(_)));
    /// ```
    #[must_use]
    pub fn root(&self) -> &Error {
        match self {
            Error::Block { source, .. } | Error::Document { source, .. } => source.root(),
            other => other,
        }
    }

    /// Creates a decode error from any displayable decoder failure.
    pub fn decode<T: fmt::Display>(msg: T) -> Self {
        Error::Decode(msg.to_string())
    }

    /// Creates an I/O error for file reading/writing failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Self {
        Error::decode(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::io(&err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_chain_message() {
        let err = Error::type_mismatch("port", "int", "string", "\"http\"")
            .in_block("port")
            .in_block("spec")
            .in_document("v1", "Service", "web");
        assert_eq!(
            err.to_string(),
            "converting resource v1/Service/web: in block \"spec\": in block \"port\": \
             type mismatch for attribute \"port\": expected int, got string (value \"http\")"
        );
    }

    #[test]
    fn test_root_unwraps_context() {
        let err = Error::unrecognized_keys("resource.spec", vec!["x".to_string()]).in_block("spec");
        match err.root() {
            Error::UnrecognizedKeys { path, keys } => {
                assert_eq!(path, "resource.spec");
                assert_eq!(keys, &vec!["x".to_string()]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
