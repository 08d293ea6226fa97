//! HCL text output.
//!
//! Renders a [`Document`] the way `terraform fmt` would lay it out, minus
//! alignment of `=` signs:
//!
//! ```text
//! resource "kubernetes_namespace_v1" "team_a" {
//!   metadata {
//!     labels = {
//!       "owner" = "team-a"
//!     }
//!     name = "team-a"
//!   }
//! }
//! ```
//!
//! Raw token streams (fallback manifests) are re-indented line by line from
//! their bracket nesting.

use crate::token::{quote, Token, TokenKind};
use crate::{Block, ConvertOptions, Document, Expression, TypedValue};

impl Document {
    /// Renders the document as HCL text.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ktf::{Block, ConvertOptions, Document, TypedValue};
    ///
    /// let mut block = Block::new("resource", vec!["kubernetes_namespace_v1".into(), "ns".into()]);
    /// let mut metadata = Block::new("metadata", vec![]);
    /// metadata.set_attribute("name", TypedValue::String("ns".into()));
    /// block.append_block(metadata);
    ///
    /// let mut doc = Document::new();
    /// doc.append_block(block);
    /// assert_eq!(
    ///     doc.to_hcl(&ConvertOptions::default()),
    ///     "resource \"kubernetes_namespace_v1\" \"ns\" {\n  metadata {\n    name = \"ns\"\n  }\n}\n"
    /// );
    /// ```
    #[must_use]
    pub fn to_hcl(&self, options: &ConvertOptions) -> String {
        let mut output = String::with_capacity(256 * self.blocks.len().max(1));
        for (i, block) in self.blocks.iter().enumerate() {
            if i > 0 {
                output.push('\n');
            }
            write_block(&mut output, block, options, 0);
        }
        output
    }
}

fn push_indent(output: &mut String, options: &ConvertOptions, indent_level: usize) {
    output.push_str(&" ".repeat(indent_level * options.indent));
}

fn write_block(output: &mut String, block: &Block, options: &ConvertOptions, indent_level: usize) {
    push_indent(output, options, indent_level);
    output.push_str(&block.block_type);
    for label in &block.labels {
        output.push(' ');
        output.push_str(&quote(label));
    }
    output.push_str(" {\n");

    for (name, expr) in &block.attributes {
        push_indent(output, options, indent_level + 1);
        output.push_str(name);
        output.push_str(" =");
        match expr {
            Expression::Value(value) => {
                output.push(' ');
                write_typed_value(output, value, options, indent_level + 1);
            }
            Expression::Raw(tokens) => write_raw_tokens(output, tokens, options, indent_level + 1),
        }
        output.push('\n');
    }

    for child in &block.blocks {
        write_block(output, child, options, indent_level + 1);
    }

    push_indent(output, options, indent_level);
    output.push_str("}\n");
}

fn write_typed_value(
    output: &mut String,
    value: &TypedValue,
    options: &ConvertOptions,
    indent_level: usize,
) {
    match value {
        TypedValue::Bool(b) => output.push_str(if *b { "true" } else { "false" }),
        TypedValue::Number(n) => output.push_str(&n.to_string()),
        TypedValue::String(s) => output.push_str(&quote(s)),
        TypedValue::StringMap(map) if map.is_empty() => output.push_str("{}"),
        TypedValue::StringMap(map) => {
            output.push_str("{\n");
            for (k, v) in map {
                push_indent(output, options, indent_level + 1);
                output.push_str(&quote(k));
                output.push_str(" = ");
                output.push_str(&quote(v));
                output.push('\n');
            }
            push_indent(output, options, indent_level);
            output.push('}');
        }
        TypedValue::List(items) => {
            output.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    output.push_str(", ");
                }
                write_typed_value(output, item, options, indent_level);
            }
            output.push(']');
        }
    }
}

/// Writes tokens that continue the current line.
///
/// Every line after the first is indented from the net bracket change of the
/// lines before it: a line that opens brackets adds one level however many it
/// opens, and the level is dropped once those brackets are closed. A line
/// such as `}, {` that closes and reopens stays at its parent's level.
fn write_raw_tokens(
    output: &mut String,
    tokens: &[Token],
    options: &ConvertOptions,
    indent_level: usize,
) {
    let lines: Vec<&[Token]> = tokens.split(|t| t.kind == TokenKind::Newline).collect();
    let mut indents: Vec<i64> = Vec::new();

    for (i, line) in lines.iter().enumerate() {
        let net: i64 = line
            .iter()
            .map(|t| match t.kind {
                k if k.opens() => 1,
                k if k.closes() => -1,
                _ => 0,
            })
            .sum();
        let starts_with_closer = line.first().map(|t| t.kind.closes()).unwrap_or(false);

        let level = if net > 0 {
            let level = indents.len();
            indents.push(net);
            level
        } else if net < 0 {
            let mut closed = -net;
            while closed > 0 {
                let Some(top) = indents.last_mut() else {
                    break;
                };
                if closed >= *top {
                    closed -= *top;
                    indents.pop();
                } else {
                    *top -= closed;
                    closed = 0;
                }
            }
            indents.len()
        } else if starts_with_closer {
            indents.len().saturating_sub(1)
        } else {
            indents.len()
        };

        if i > 0 {
            output.push('\n');
            if line.is_empty() {
                continue;
            }
            push_indent(output, options, indent_level + level);
        }
        for (j, token) in line.iter().enumerate() {
            if i == 0 || j > 0 {
                output.push_str(&" ".repeat(token.spaces_before));
            }
            output.push_str(&token.bytes);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{doc, fallback, Number};
    use std::collections::BTreeMap;

    fn render(block: Block) -> String {
        let mut doc = Document::new();
        doc.append_block(block);
        doc.to_hcl(&ConvertOptions::default())
    }

    #[test]
    fn test_typed_attributes() {
        let mut block = Block::new("resource", vec!["t".into(), "n".into()]);
        let mut labels = BTreeMap::new();
        labels.insert("z".to_string(), "last".to_string());
        labels.insert("a".to_string(), "first".to_string());
        block.set_attribute("labels", TypedValue::StringMap(labels));
        block.set_attribute("count", TypedValue::Number(Number::Integer(3)));
        block.set_attribute(
            "args",
            TypedValue::List(vec![
                TypedValue::String("a".into()),
                TypedValue::String("b".into()),
            ]),
        );
        block.set_attribute("empty", TypedValue::StringMap(BTreeMap::new()));
        block.set_attribute("on", TypedValue::Bool(true));

        assert_eq!(
            render(block),
            "resource \"t\" \"n\" {\n  labels = {\n    \"a\" = \"first\"\n    \"z\" = \"last\"\n  }\n  count = 3\n  args = [\"a\", \"b\"]\n  empty = {}\n  on = true\n}\n"
        );
    }

    #[test]
    fn test_raw_manifest_layout() {
        let tokens = fallback::serialize(&doc!({ "a": 1, "b": ["x", "y"], "c": { "d": "e" } })).unwrap();
        let mut block = Block::new("resource", vec!["kubernetes_manifest".into(), "m".into()]);
        block.set_attribute_raw("manifest", tokens);

        assert_eq!(
            render(block),
            "resource \"kubernetes_manifest\" \"m\" {\n  manifest = {\n    \"a\" = 1\n    \"b\" = [\"x\", \"y\"]\n    \"c\" = {\n      \"d\" = \"e\"\n    }\n  }\n}\n"
        );
    }

    #[test]
    fn test_raw_list_of_maps_layout() {
        let tokens = fallback::serialize(&doc!({ "items": [{ "a": 1 }, { "b": 2 }] })).unwrap();
        let mut block = Block::new("resource", vec!["kubernetes_manifest".into(), "m".into()]);
        block.set_attribute_raw("manifest", tokens);

        assert_eq!(
            render(block),
            "resource \"kubernetes_manifest\" \"m\" {\n  manifest = {\n    \"items\" = [{\n      \"a\" = 1\n    }, {\n      \"b\" = 2\n    }]\n  }\n}\n"
        );
    }

    #[test]
    fn test_blocks_are_separated_by_blank_line() {
        let mut doc = Document::new();
        doc.append_block(Block::new("a", vec![]));
        doc.append_block(Block::new("b", vec![]));
        assert_eq!(doc.to_hcl(&ConvertOptions::default()), "a {\n}\n\nb {\n}\n");
    }

    #[test]
    fn test_custom_indent() {
        let mut outer = Block::new("outer", vec![]);
        let mut inner = Block::new("inner", vec![]);
        inner.set_attribute("x", TypedValue::String("y".into()));
        outer.append_block(inner);
        let mut doc = Document::new();
        doc.append_block(outer);
        assert_eq!(
            doc.to_hcl(&ConvertOptions::new().with_indent(4)),
            "outer {\n    inner {\n        x = \"y\"\n    }\n}\n"
        );
    }
}
