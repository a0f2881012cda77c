//! Elaboration: parsed statements to a validated [`GraphSpec`].
//!
//! Recognized attributes are type-checked and moved into the typed fields
//! of [`NodeDecl`] / [`EdgeDecl`]; everything else is kept, in order, in the
//! declaration's [`Attributes`] payload. All problems are collected before
//! failing.

use std::collections::HashMap;

use log::{debug, warn};

use trellis_core::{
    color::Color,
    identifier::Id,
    semantic::{AttributeValue, Attributes, Declaration, EdgeDecl, GraphSpec, NodeDecl},
};

use crate::{
    error::{Diagnostic, DiagnosticCollector, ErrorCode, ParseError},
    parser_types as types,
    span::Span,
};

type Result<T> = std::result::Result<T, Diagnostic>;

#[derive(Default)]
pub struct Builder {
    diagnostics: DiagnosticCollector,
    declared_nodes: HashMap<Id, Span>,
}

impl Builder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn build(
        mut self,
        statements: &[types::Statement<'_>],
    ) -> std::result::Result<GraphSpec, ParseError> {
        debug!(statements = statements.len(); "Elaborating graph description");

        let mut spec = GraphSpec::default();
        for statement in statements {
            let declaration = match statement {
                types::Statement::Node(node) => self.build_node(node).map(Declaration::Node),
                types::Statement::Edge(edge) => self.build_edge(edge).map(Declaration::Edge),
            };
            if let Some(declaration) = declaration {
                spec.push(declaration);
            }
        }

        for warning in self.diagnostics.finish()? {
            warn!(warning:% = warning; "Graph description warning");
        }
        Ok(spec)
    }

    fn build_node(&mut self, node: &types::NodeStatement<'_>) -> Option<NodeDecl> {
        let id = *node.id.inner();
        if let Some(first) = self.declared_nodes.get(&id) {
            self.diagnostics.emit(
                Diagnostic::warning(format!("node `{id}` is declared more than once"))
                    .with_label(node.id.span(), "later declaration is ignored")
                    .with_secondary_label(*first, "first declared here"),
            );
        } else {
            self.declared_nodes.insert(id, node.id.span());
        }

        let mut label = None;
        let mut color = None;
        let mut extra = Attributes::new();
        let mut ok = true;

        for attr in self.check_duplicates(&node.attributes) {
            let result = match *attr.name.inner() {
                "label" => Self::extract_string(attr, "label").map(|value| label = Some(value)),
                "color" => Self::extract_color(attr, "color").map(|value| color = Some(value)),
                name => {
                    extra.insert(name.to_string(), Self::payload_value(attr.value.inner()));
                    Ok(())
                }
            };
            if let Err(diag) = result {
                self.diagnostics.emit(diag);
                ok = false;
            }
        }

        if !ok {
            return None;
        }

        let mut decl = NodeDecl::new(id).with_attributes(extra);
        if let Some(label) = label {
            decl = decl.with_label(label);
        }
        if let Some(color) = color {
            decl = decl.with_color(color);
        }
        Some(decl)
    }

    fn build_edge(&mut self, edge: &types::EdgeStatement<'_>) -> Option<EdgeDecl> {
        let mut weight = None;
        let mut attraction = None;
        let mut label = None;
        let mut stroke = None;
        let mut extra = Attributes::new();
        let mut ok = true;

        for attr in self.check_duplicates(&edge.attributes) {
            let result = match *attr.name.inner() {
                "weight" => Self::extract_weight(attr).map(|value| weight = Some(value)),
                "attraction" => {
                    Self::extract_attraction(attr).map(|value| attraction = Some(value))
                }
                "label" => Self::extract_string(attr, "label").map(|value| label = Some(value)),
                "stroke" => Self::extract_color(attr, "stroke").map(|value| stroke = Some(value)),
                name => {
                    extra.insert(name.to_string(), Self::payload_value(attr.value.inner()));
                    Ok(())
                }
            };
            if let Err(diag) = result {
                self.diagnostics.emit(diag);
                ok = false;
            }
        }

        if !ok {
            return None;
        }

        let mut decl = EdgeDecl::new(*edge.source.inner(), *edge.target.inner(), edge.directed)
            .with_attributes(extra);
        if let Some(weight) = weight {
            decl = decl.with_weight(weight);
        }
        if let Some(attraction) = attraction {
            decl = decl.with_attraction(attraction);
        }
        if let Some(label) = label {
            decl = decl.with_label(label);
        }
        if let Some(stroke) = stroke {
            decl = decl.with_stroke(stroke);
        }
        Some(decl)
    }

    /// Reports repeated attribute names and returns the attributes with
    /// only the first occurrence of each name.
    fn check_duplicates<'a, 'src>(
        &mut self,
        attributes: &'a [types::Attribute<'src>],
    ) -> Vec<&'a types::Attribute<'src>> {
        let mut seen: HashMap<&str, Span> = HashMap::new();
        let mut unique = Vec::with_capacity(attributes.len());

        for attr in attributes {
            let name = *attr.name.inner();
            if let Some(first) = seen.get(name) {
                self.diagnostics.emit(
                    Diagnostic::error(format!("attribute `{name}` is given more than once"))
                        .with_code(ErrorCode::E201)
                        .with_label(attr.span(), "duplicate attribute")
                        .with_secondary_label(*first, "first given here")
                        .with_help("remove one of them"),
                );
            } else {
                seen.insert(name, attr.span());
                unique.push(attr);
            }
        }

        unique
    }

    fn payload_value(value: &types::AttributeValue<'_>) -> AttributeValue {
        match value {
            types::AttributeValue::String(text) => AttributeValue::String(text.clone()),
            types::AttributeValue::Identifier(name) => AttributeValue::String((*name).to_string()),
            types::AttributeValue::Number(value) => AttributeValue::Number(*value),
            types::AttributeValue::Bool(value) => AttributeValue::Bool(*value),
        }
    }

    fn extract_string(attr: &types::Attribute<'_>, key: &str) -> Result<String> {
        attr.value.as_str().map(str::to_string).map_err(|err| {
            Diagnostic::error(format!("invalid {key} {}: {err}", attr.value.inner()))
                .with_code(ErrorCode::E200)
                .with_label(attr.span(), format!("invalid {key} value"))
                .with_help(format!("{key} values must be strings"))
        })
    }

    fn extract_color(attr: &types::Attribute<'_>, key: &str) -> Result<Color> {
        let color_str = attr.value.as_str().map_err(|err| {
            Diagnostic::error(format!("invalid {key} {}: {err}", attr.value.inner()))
                .with_code(ErrorCode::E200)
                .with_label(attr.span(), "invalid color value")
                .with_help("color values must be strings")
        })?;

        Color::new(color_str).map_err(|err| {
            Diagnostic::error(format!("invalid {key} `{color_str}`: {err}"))
                .with_code(ErrorCode::E202)
                .with_label(attr.value.span(), "invalid color")
                .with_help("use a valid CSS color such as `red` or `#336699`")
        })
    }

    fn extract_number(attr: &types::Attribute<'_>, key: &str) -> Result<f64> {
        attr.value.as_number().map_err(|err| {
            Diagnostic::error(format!("invalid {key} {}: {err}", attr.value.inner()))
                .with_code(ErrorCode::E200)
                .with_label(attr.span(), format!("invalid {key} value"))
                .with_help(format!("{key} must be a number"))
        })
    }

    fn extract_weight(attr: &types::Attribute<'_>) -> Result<f64> {
        let weight = Self::extract_number(attr, "weight")?;
        if !weight.is_finite() {
            return Err(Diagnostic::error(format!("weight must be finite, found {weight}"))
                .with_code(ErrorCode::E204)
                .with_label(attr.value.span(), "not a finite number"));
        }
        Ok(weight)
    }

    fn extract_attraction(attr: &types::Attribute<'_>) -> Result<f64> {
        let attraction = Self::extract_number(attr, "attraction")?;
        if !(attraction.is_finite() && attraction > 0.0) {
            return Err(
                Diagnostic::error(format!("attraction must be positive, found {attraction}"))
                    .with_code(ErrorCode::E203)
                    .with_label(attr.value.span(), "not a positive number")
                    .with_help("attraction scales the spring force by `ln(attraction) / 2 + 1`"),
            );
        }
        Ok(attraction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{lexer::tokenize, parser::build_statements};

    fn elaborate(source: &'static str) -> std::result::Result<GraphSpec, ParseError> {
        let tokens = Box::leak(Box::new(tokenize(source).expect("Failed to tokenize")));
        let statements = build_statements(tokens).expect("Failed to parse");
        Builder::new().build(&statements)
    }

    fn error_codes(source: &'static str) -> Vec<ErrorCode> {
        elaborate(source)
            .expect_err("expected elaboration to fail")
            .diagnostics()
            .iter()
            .filter_map(Diagnostic::code)
            .collect()
    }

    #[test]
    fn test_node_attributes() {
        let spec = elaborate("node a [label=\"Alpha\", color=\"steelblue\", tier=2];").unwrap();
        let node = spec.nodes().next().unwrap();

        assert_eq!(node.id(), Id::new("a"));
        assert_eq!(node.label(), Some("Alpha"));
        assert_eq!(node.color(), Some(Color::new("steelblue").unwrap()));
        assert_eq!(
            node.attributes().get("tier"),
            Some(&AttributeValue::Number(2.0))
        );
    }

    #[test]
    fn test_edge_attributes() {
        let spec =
            elaborate("a -> b [weight=3, attraction=4, label=calls, stroke=red, kind=\"rpc\"];")
                .unwrap();
        let edge = spec.edges().next().unwrap();

        assert!(edge.is_directed());
        assert_eq!(edge.weight(), Some(3.0));
        assert_eq!(edge.attraction(), Some(4.0));
        assert_eq!(edge.label(), Some("calls"));
        assert_eq!(edge.stroke(), Some(Color::new("red").unwrap()));
        assert_eq!(
            edge.attributes().get("kind"),
            Some(&AttributeValue::String("rpc".to_string()))
        );
    }

    #[test]
    fn test_unknown_attributes_keep_order() {
        let spec = elaborate("a -- b [zeta=1, alpha=true];").unwrap();
        let keys: Vec<&str> = spec
            .edges()
            .next()
            .unwrap()
            .attributes()
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(keys, vec!["zeta", "alpha"]);
    }

    #[test]
    fn test_weight_must_be_number() {
        assert_eq!(error_codes("a -- b [weight=\"heavy\"];"), vec![ErrorCode::E200]);
    }

    #[test]
    fn test_weight_must_be_finite() {
        assert_eq!(error_codes("a -- b [weight=inf];"), vec![ErrorCode::E204]);
    }

    #[test]
    fn test_attraction_must_be_positive() {
        assert_eq!(error_codes("a -- b [attraction=0];"), vec![ErrorCode::E203]);
        assert_eq!(error_codes("a -- b [attraction=-2];"), vec![ErrorCode::E203]);
    }

    #[test]
    fn test_invalid_color() {
        assert_eq!(error_codes("node a [color=\"nope\"];"), vec![ErrorCode::E202]);
        assert_eq!(error_codes("node a [color=3];"), vec![ErrorCode::E200]);
    }

    #[test]
    fn test_duplicate_attribute() {
        let err = elaborate("a -- b [weight=2, weight=3];").unwrap_err();
        let diag = &err.diagnostics()[0];

        assert_eq!(diag.code(), Some(ErrorCode::E201));
        assert_eq!(diag.labels().len(), 2);
        assert!(diag.labels()[1].is_secondary());
    }

    #[test]
    fn test_all_attribute_errors_are_reported() {
        let codes = error_codes("a -- b [weight=x];\nnode c [color=\"??\"];\nb -> c [attraction=0];");
        assert_eq!(codes, vec![ErrorCode::E200, ErrorCode::E202, ErrorCode::E203]);
    }

    #[test]
    fn test_redeclared_node_is_only_a_warning() {
        let spec = elaborate("node a [label=\"one\"];\nnode a [label=\"two\"];").unwrap();
        assert_eq!(spec.nodes().count(), 2);
    }
}
