//! Syntax tree produced by the [`parser`](super::parser).
//!
//! These types still carry source spans and raw attribute values; the
//! [`elaborate`](super::elaborate) phase validates them into a
//! [`GraphSpec`](trellis_core::semantic::GraphSpec).

use std::fmt;

use trellis_core::identifier::Id;

use crate::span::{Span, Spanned};

/// A literal attribute value as written in the source.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue<'src> {
    String(String),
    /// A bare identifier, accepted wherever a string is, e.g. `color=red`.
    Identifier(&'src str),
    Number(f64),
    Bool(bool),
}

impl AttributeValue<'_> {
    /// The value as text, if it is a string or a bare identifier.
    pub fn as_str(&self) -> Result<&str, &'static str> {
        match self {
            Self::String(text) => Ok(text),
            Self::Identifier(name) => Ok(name),
            Self::Number(_) | Self::Bool(_) => Err("expected a string value"),
        }
    }

    /// The value as a number.
    pub fn as_number(&self) -> Result<f64, &'static str> {
        match self {
            Self::Number(value) => Ok(*value),
            _ => Err("expected a numeric value"),
        }
    }
}

impl fmt::Display for AttributeValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(text) => write!(f, "\"{text}\""),
            Self::Identifier(name) => write!(f, "{name}"),
            Self::Number(value) => write!(f, "{value}"),
            Self::Bool(value) => write!(f, "{value}"),
        }
    }
}

/// `name=value` inside an attribute list.
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute<'src> {
    pub name: Spanned<&'src str>,
    pub value: Spanned<AttributeValue<'src>>,
}

impl Attribute<'_> {
    /// Span covering both the name and the value.
    pub fn span(&self) -> Span {
        self.name.span().union(self.value.span())
    }
}

/// `node ID [attrs];`
#[derive(Debug, Clone, PartialEq)]
pub struct NodeStatement<'src> {
    pub id: Spanned<Id>,
    pub attributes: Vec<Attribute<'src>>,
}

/// `ID -- ID [attrs];` or `ID -> ID [attrs];`
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeStatement<'src> {
    pub source: Spanned<Id>,
    pub target: Spanned<Id>,
    pub directed: bool,
    pub attributes: Vec<Attribute<'src>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Statement<'src> {
    Node(NodeStatement<'src>),
    Edge(EdgeStatement<'src>),
}
