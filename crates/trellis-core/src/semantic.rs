//! Semantic graph description types.
//!
//! A [`GraphSpec`] is what the parser produces and what the engine consumes:
//! an ordered list of node and edge declarations whose recognized attributes
//! have already been validated. Anything the parser did not recognize is kept
//! verbatim in an [`Attributes`] map so callers can carry their own payload.

use std::fmt;

use indexmap::IndexMap;

use crate::{color::Color, identifier::Id};

/// Value of an unrecognized attribute.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    String(String),
    Number(f64),
    Bool(bool),
}

impl AttributeValue {
    /// Returns the string content, if this is a string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the numeric content, if this is a number value.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the boolean content, if this is a boolean value.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            _ => None,
        }
    }

    /// Short name of the value's type, used in diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::String(_) => "string",
            Self::Number(_) => "number",
            Self::Bool(_) => "boolean",
        }
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(value) => write!(f, "\"{value}\""),
            Self::Number(value) => write!(f, "{value}"),
            Self::Bool(value) => write!(f, "{value}"),
        }
    }
}

/// Unrecognized attributes in declaration order.
pub type Attributes = IndexMap<String, AttributeValue>;

/// A `node` statement.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeDecl {
    id: Id,
    label: Option<String>,
    color: Option<Color>,
    attributes: Attributes,
}

impl NodeDecl {
    pub fn new(id: Id) -> Self {
        Self {
            id,
            label: None,
            color: None,
            attributes: Attributes::new(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn with_attributes(mut self, attributes: Attributes) -> Self {
        self.attributes = attributes;
        self
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn color(&self) -> Option<Color> {
        self.color
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }
}

/// An edge statement, `a -- b` or `a -> b`.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeDecl {
    source: Id,
    target: Id,
    directed: bool,
    weight: Option<f64>,
    attraction: Option<f64>,
    label: Option<String>,
    stroke: Option<Color>,
    attributes: Attributes,
}

impl EdgeDecl {
    pub fn new(source: Id, target: Id, directed: bool) -> Self {
        Self {
            source,
            target,
            directed,
            weight: None,
            attraction: None,
            label: None,
            stroke: None,
            attributes: Attributes::new(),
        }
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = Some(weight);
        self
    }

    /// Sets the attraction multiplier. Values must be positive; the parser
    /// rejects anything else before it gets here.
    pub fn with_attraction(mut self, attraction: f64) -> Self {
        self.attraction = Some(attraction);
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_stroke(mut self, stroke: Color) -> Self {
        self.stroke = Some(stroke);
        self
    }

    pub fn with_attributes(mut self, attributes: Attributes) -> Self {
        self.attributes = attributes;
        self
    }

    pub fn source(&self) -> Id {
        self.source
    }

    pub fn target(&self) -> Id {
        self.target
    }

    pub fn is_directed(&self) -> bool {
        self.directed
    }

    pub fn weight(&self) -> Option<f64> {
        self.weight
    }

    pub fn attraction(&self) -> Option<f64> {
        self.attraction
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn stroke(&self) -> Option<Color> {
        self.stroke
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }
}

/// A single statement of a graph description.
#[derive(Debug, Clone, PartialEq)]
pub enum Declaration {
    Node(NodeDecl),
    Edge(EdgeDecl),
}

/// A fully validated graph description.
///
/// Declarations keep their source order, which becomes node insertion order
/// once the description is turned into a graph.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GraphSpec {
    declarations: Vec<Declaration>,
}

impl GraphSpec {
    pub fn new(declarations: Vec<Declaration>) -> Self {
        Self { declarations }
    }

    pub fn declarations(&self) -> &[Declaration] {
        &self.declarations
    }

    pub fn push(&mut self, declaration: Declaration) {
        self.declarations.push(declaration);
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    /// Iterates over the node declarations only.
    pub fn nodes(&self) -> impl Iterator<Item = &NodeDecl> {
        self.declarations.iter().filter_map(|decl| match decl {
            Declaration::Node(node) => Some(node),
            Declaration::Edge(_) => None,
        })
    }

    /// Iterates over the edge declarations only.
    pub fn edges(&self) -> impl Iterator<Item = &EdgeDecl> {
        self.declarations.iter().filter_map(|decl| match decl {
            Declaration::Edge(edge) => Some(edge),
            Declaration::Node(_) => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_value_accessors() {
        let text = AttributeValue::String("x".to_string());
        let number = AttributeValue::Number(2.5);
        let flag = AttributeValue::Bool(true);

        assert_eq!(text.as_str(), Some("x"));
        assert_eq!(text.as_number(), None);
        assert_eq!(number.as_number(), Some(2.5));
        assert_eq!(flag.as_bool(), Some(true));
        assert_eq!(flag.type_name(), "boolean");
    }

    #[test]
    fn test_attribute_value_display() {
        assert_eq!(AttributeValue::String("a b".into()).to_string(), "\"a b\"");
        assert_eq!(AttributeValue::Number(3.0).to_string(), "3");
        assert_eq!(AttributeValue::Bool(false).to_string(), "false");
    }

    #[test]
    fn test_edge_decl_builder() {
        let edge = EdgeDecl::new(Id::new("a"), Id::new("b"), true)
            .with_weight(3.0)
            .with_attraction(4.0)
            .with_label("calls");

        assert_eq!(edge.source(), "a");
        assert_eq!(edge.target(), "b");
        assert!(edge.is_directed());
        assert_eq!(edge.weight(), Some(3.0));
        assert_eq!(edge.attraction(), Some(4.0));
        assert_eq!(edge.label(), Some("calls"));
        assert!(edge.stroke().is_none());
    }

    #[test]
    fn test_graph_spec_filters_keep_order() {
        let spec = GraphSpec::new(vec![
            Declaration::Node(NodeDecl::new(Id::new("n1"))),
            Declaration::Edge(EdgeDecl::new(Id::new("n1"), Id::new("n2"), false)),
            Declaration::Node(NodeDecl::new(Id::new("n3"))),
        ]);

        let nodes: Vec<Id> = spec.nodes().map(NodeDecl::id).collect();
        assert_eq!(nodes, vec![Id::new("n1"), Id::new("n3")]);
        assert_eq!(spec.edges().count(), 1);
        assert!(!spec.is_empty());
    }
}
