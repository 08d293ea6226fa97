//! Schema-less serialization of whole documents.
//!
//! Used for documents that have no mapping spec: the document becomes the
//! `manifest` attribute of a `kubernetes_manifest` resource, written as an
//! HCL object literal. Mapping keys are sorted so the output is stable.
//!
//! ```rust
//! use ktf::{doc, fallback};
//!
//! let tokens = fallback::serialize(&doc!({ "b": 1, "a": ["x", "y"] })).unwrap();
//! let text: String = tokens.iter().map(|t| t.to_string()).collect();
//! assert_eq!(text, " {\n\"a\" = [\"x\", \"y\"]\n\"b\" = 1\n}");
//! ```

use crate::token::{Token, TokenKind};
use crate::{Block, ConvertOptions, Error, Map, Number, Resource, Result, Value};

/// Serializes a value into HCL literal tokens.
///
/// # Errors
///
/// Returns [`Error::UnsupportedValueShape`] for null and non-finite numbers,
/// which HCL literals cannot express.
pub fn serialize(value: &Value) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();
    write_value(&mut tokens, value, 1)?;
    Ok(tokens)
}

/// Builds the fallback block for a resource.
///
/// # Errors
///
/// See [`serialize`].
pub fn manifest_block(resource: &Resource, options: &ConvertOptions) -> Result<Block> {
    let tokens = serialize(&Value::Mapping(resource.raw.clone()))?;
    let mut block = Block::new(
        "resource",
        vec![options.manifest_resource.clone(), resource.manifest_label()],
    );
    block.set_attribute_raw(&options.manifest_attribute, tokens);
    Ok(block)
}

fn write_value(tokens: &mut Vec<Token>, value: &Value, spaces_before: usize) -> Result<()> {
    match value {
        Value::String(s) => tokens.push(Token::quoted(s, spaces_before)),
        Value::Number(n) => write_number(tokens, n, spaces_before)?,
        Value::Bool(b) => tokens.push(Token::new(TokenKind::Ident, b.to_string(), spaces_before)),
        Value::Mapping(map) => write_map(tokens, map, spaces_before)?,
        Value::Sequence(items) => write_sequence(tokens, items, spaces_before)?,
        Value::Null => {
            return Err(Error::UnsupportedValueShape {
                found: value.type_name(),
            })
        }
    }
    Ok(())
}

fn write_number(tokens: &mut Vec<Token>, n: &Number, spaces_before: usize) -> Result<()> {
    if !n.is_finite() {
        return Err(Error::UnsupportedValueShape {
            found: "non-finite float",
        });
    }
    tokens.push(Token::new(TokenKind::NumberLit, n.to_string(), spaces_before));
    Ok(())
}

fn write_map(tokens: &mut Vec<Token>, map: &Map, spaces_before: usize) -> Result<()> {
    tokens.push(Token::punct(TokenKind::OBrace, spaces_before));
    tokens.push(Token::punct(TokenKind::Newline, 0));
    for (key, value) in map.sorted_entries() {
        // "key" = value
        tokens.push(Token::quoted(key, 0));
        tokens.push(Token::punct(TokenKind::Equal, 1));
        write_value(tokens, value, 1)?;
        tokens.push(Token::punct(TokenKind::Newline, 0));
    }
    tokens.push(Token::punct(TokenKind::CBrace, 0));
    Ok(())
}

fn write_sequence(tokens: &mut Vec<Token>, items: &[Value], spaces_before: usize) -> Result<()> {
    tokens.push(Token::punct(TokenKind::OBrack, spaces_before));
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            tokens.push(Token::punct(TokenKind::Comma, 0));
        }
        write_value(tokens, item, usize::from(i > 0))?;
    }
    tokens.push(Token::punct(TokenKind::CBrack, 0));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::doc;

    fn kinds_and_bytes(tokens: &[Token]) -> Vec<(TokenKind, &str)> {
        tokens.iter().map(|t| (t.kind, t.bytes.as_str())).collect()
    }

    #[test]
    fn test_sorted_keys_and_token_stream() {
        let tokens = serialize(&doc!({ "b": ["x", "y"], "a": 1 })).unwrap();
        use TokenKind::*;
        assert_eq!(
            kinds_and_bytes(&tokens),
            vec![
                (OBrace, "{"),
                (Newline, "\n"),
                (QuotedLit, "\"a\""),
                (Equal, "="),
                (NumberLit, "1"),
                (Newline, "\n"),
                (QuotedLit, "\"b\""),
                (Equal, "="),
                (OBrack, "["),
                (QuotedLit, "\"x\""),
                (Comma, ","),
                (QuotedLit, "\"y\""),
                (CBrack, "]"),
                (Newline, "\n"),
                (CBrace, "}"),
            ]
        );
    }

    #[test]
    fn test_deterministic_across_input_order() {
        let first = serialize(&doc!({ "b": 1, "a": 2 })).unwrap();
        let second = serialize(&doc!({ "a": 2, "b": 1 })).unwrap();
        assert_eq!(first, second);
        assert_eq!(first, serialize(&doc!({ "b": 1, "a": 2 })).unwrap());
    }

    #[test]
    fn test_scalars() {
        let tokens = serialize(&doc!([true, 2.5, "s"])).unwrap();
        assert_eq!(tokens[1], Token::new(TokenKind::Ident, "true", 0));
        assert_eq!(tokens[3], Token::new(TokenKind::NumberLit, "2.5", 1));
        assert_eq!(tokens[5], Token::new(TokenKind::QuotedLit, "\"s\"", 1));
    }

    #[test]
    fn test_null_is_unsupported() {
        let err = serialize(&doc!({ "a": null })).unwrap_err();
        assert!(matches!(err, Error::UnsupportedValueShape { found: "null" }));

        let err = serialize(&Value::from(f64::NAN)).unwrap_err();
        assert!(matches!(err, Error::UnsupportedValueShape { .. }));
    }

    #[test]
    fn test_manifest_block() {
        let resource = Resource::from_value(doc!({
            "apiVersion": "apps/v1",
            "kind": "Deployment",
            "metadata": { "name": "web.app" }
        }))
        .unwrap()
        .unwrap();
        let block = manifest_block(&resource, &ConvertOptions::default()).unwrap();
        assert_eq!(block.block_type, "resource");
        assert_eq!(block.labels, vec!["kubernetes_manifest", "deployment__web_app"]);
        assert!(matches!(
            block.attributes.get("manifest"),
            Some(crate::Expression::Raw(_))
        ));
    }
}
