//! Multi-document YAML decoding.
//!
//! Input is a stream of YAML documents separated by `---`. JSON is a subset
//! of YAML, so a single JSON object decodes as a one-document stream.

use crate::{Result, Value};
use serde::Deserialize;

/// Decodes every document of a YAML stream, in input order.
///
/// Empty documents are kept as [`Value::Null`]; skipping them is left to the
/// caller.
///
/// # Errors
///
/// Returns [`Error::Decode`](crate::Error::Decode) on the first document that
/// fails to parse.
///
/// # Examples
///
/// ```rust
/// use ktf::decode::decode_documents;
///
/// let docs = decode_documents("a: 1\n---\n---\nb: 2\n").unwrap();
/// assert_eq!(docs.len(), 3);
/// assert!(docs[1].is_null());
/// ```
pub fn decode_documents(input: &str) -> Result<Vec<Value>> {
    let mut documents = Vec::new();
    for document in serde_yaml::Deserializer::from_str(input) {
        documents.push(Value::deserialize(document)?);
    }
    tracing::trace!(count = documents.len(), "decoded yaml documents");
    Ok(documents)
}
