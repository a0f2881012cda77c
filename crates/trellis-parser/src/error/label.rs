//! Labeled source spans for diagnostic messages.

use crate::span::Span;

/// A message attached to a location in the source.
///
/// A primary label marks where the problem is; secondary labels add context
/// such as "first given here" for a duplicated attribute.
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    span: Span,
    message: String,
    is_primary: bool,
}

impl Label {
    /// Create a new primary label.
    pub fn primary(span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
            is_primary: true,
        }
    }

    /// Create a new secondary label.
    pub fn secondary(span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
            is_primary: false,
        }
    }

    /// Get the span this label applies to.
    pub fn span(&self) -> Span {
        self.span
    }

    /// Get the label message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Check if this is a primary label.
    pub fn is_primary(&self) -> bool {
        self.is_primary
    }

    /// Check if this is a secondary label.
    pub fn is_secondary(&self) -> bool {
        !self.is_primary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_and_secondary_labels() {
        let primary = Label::primary(Span::new(10..20), "error here");
        let secondary = Label::secondary(Span::new(5..15), "first given here");

        assert_eq!(primary.span().start(), 10);
        assert_eq!(primary.span().end(), 20);
        assert_eq!(primary.message(), "error here");
        assert!(primary.is_primary());
        assert!(secondary.is_secondary());
    }
}
