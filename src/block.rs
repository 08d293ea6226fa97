//! Output model: HCL blocks and the values they carry.
//!
//! A [`Block`] is what one document converts to. Attributes keep the order
//! the converter produced them in; nested blocks keep input order.

use crate::token::Token;
use crate::Number;
use indexmap::IndexMap;
use std::collections::BTreeMap;

/// A typed attribute value.
///
/// Narrower than [`Value`](crate::Value): there is no null, and mappings only
/// ever hold strings.
#[derive(Clone, Debug, PartialEq)]
pub enum TypedValue {
    Bool(bool),
    Number(Number),
    String(String),
    StringMap(BTreeMap<String, String>),
    List(Vec<TypedValue>),
}

/// The right-hand side of an attribute.
#[derive(Clone, Debug, PartialEq)]
pub enum Expression {
    Value(TypedValue),
    /// Pre-built tokens, written as is.
    Raw(Vec<Token>),
}

/// One HCL block: `type "label" ... { attributes; blocks }`.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Block {
    pub block_type: String,
    pub labels: Vec<String>,
    pub attributes: IndexMap<String, Expression>,
    pub blocks: Vec<Block>,
}

impl Block {
    /// Creates an empty block.
    #[must_use]
    pub fn new(block_type: &str, labels: Vec<String>) -> Self {
        Block {
            block_type: block_type.to_string(),
            labels,
            ..Default::default()
        }
    }

    /// Sets a typed attribute.
    pub fn set_attribute(&mut self, name: &str, value: TypedValue) {
        self.attributes
            .insert(name.to_string(), Expression::Value(value));
    }

    /// Sets an attribute to a raw token stream.
    pub fn set_attribute_raw(&mut self, name: &str, tokens: Vec<Token>) {
        self.attributes.insert(name.to_string(), Expression::Raw(tokens));
    }

    /// Appends a nested block.
    pub fn append_block(&mut self, block: Block) {
        self.blocks.push(block);
    }

    /// Returns the typed attribute with the given name, if any.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&TypedValue> {
        match self.attributes.get(name) {
            Some(Expression::Value(v)) => Some(v),
            _ => None,
        }
    }

    /// Returns the nested blocks of the given type, in order.
    pub fn blocks_of<'a>(&'a self, block_type: &'a str) -> impl Iterator<Item = &'a Block> + 'a {
        self.blocks.iter().filter(move |b| b.block_type == block_type)
    }
}

/// An ordered list of top-level blocks.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Document {
    pub blocks: Vec<Block>,
}

impl Document {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append_block(&mut self, block: Block) {
        self.blocks.push(block);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}
