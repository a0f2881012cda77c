//! Bridges [`TrellisError`] to miette reports.
//!
//! Parse failures carry their own diagnostics with spans into the input
//! text, one report each. Every other failure becomes a single report with
//! a `trellis::*` code and, where there is something useful to say, a hint.

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, SourceCode, SourceSpan};
use thiserror::Error;

use trellis::{TrellisError, algorithms::AlgorithmError};
use trellis_parser::{
    Span,
    error::{Diagnostic, Severity},
};

/// One parser diagnostic together with the text it points into.
#[derive(Debug, Error)]
#[error("{}", .diagnostic.message())]
pub struct DiagnosticAdapter<'a> {
    diagnostic: &'a Diagnostic,
    text: &'a str,
}

impl<'a> DiagnosticAdapter<'a> {
    pub fn new(diagnostic: &'a Diagnostic, text: &'a str) -> Self {
        Self { diagnostic, text }
    }
}

impl MietteDiagnostic for DiagnosticAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn std::fmt::Display + 'a>> {
        let code = self.diagnostic.code()?;
        Some(Box::new(code))
    }

    fn severity(&self) -> Option<miette::Severity> {
        Some(match self.diagnostic.severity() {
            Severity::Error => miette::Severity::Error,
            Severity::Warning => miette::Severity::Warning,
        })
    }

    fn help<'a>(&'a self) -> Option<Box<dyn std::fmt::Display + 'a>> {
        let help = self.diagnostic.help()?;
        Some(Box::new(help))
    }

    fn source_code(&self) -> Option<&dyn SourceCode> {
        Some(&self.text)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let labels = self.diagnostic.labels();
        if labels.is_empty() {
            return None;
        }

        let spans = labels.iter().map(|label| {
            let text = Some(label.message().to_owned());
            let span = source_span(label.span());
            if label.is_primary() {
                LabeledSpan::new_primary_with_span(text, span)
            } else {
                LabeledSpan::new_with_span(text, span)
            }
        });
        Some(Box::new(spans))
    }
}

/// A [`TrellisError`] with no location in the input.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct ErrorAdapter<'a>(pub &'a TrellisError);

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn std::fmt::Display + 'a>> {
        let code = match self.0 {
            TrellisError::Parse { .. } => return None,
            TrellisError::Io(_) => "trellis::io",
            TrellisError::Algorithm(_) => "trellis::algorithm",
            TrellisError::Config(_) => "trellis::config",
            TrellisError::Export(_) => "trellis::export",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn std::fmt::Display + 'a>> {
        let hint = match self.0 {
            TrellisError::Algorithm(AlgorithmError::UnknownNode(_)) => {
                "check the node id passed to --paths-from"
            }
            TrellisError::Algorithm(AlgorithmError::NegativeCycle) => {
                "an undirected edge with negative weight is a negative cycle by itself"
            }
            TrellisError::Config(_) => "pass --config to choose a different TOML file",
            _ => return None,
        };
        Some(Box::new(hint))
    }
}

/// Anything `main` can hand to a miette report handler.
#[derive(Debug, Error)]
pub enum Reportable<'a> {
    #[error(transparent)]
    Diagnostic(DiagnosticAdapter<'a>),
    #[error(transparent)]
    Error(ErrorAdapter<'a>),
}

impl Reportable<'_> {
    fn inner(&self) -> &dyn MietteDiagnostic {
        match self {
            Reportable::Diagnostic(diagnostic) => diagnostic,
            Reportable::Error(error) => error,
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn std::fmt::Display + 'a>> {
        self.inner().code()
    }

    fn severity(&self) -> Option<miette::Severity> {
        self.inner().severity()
    }

    fn help<'a>(&'a self) -> Option<Box<dyn std::fmt::Display + 'a>> {
        self.inner().help()
    }

    fn source_code(&self) -> Option<&dyn SourceCode> {
        self.inner().source_code()
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        self.inner().labels()
    }
}

fn source_span(span: Span) -> SourceSpan {
    (span.start(), span.len()).into()
}

/// Splits `err` into reports: one per parse diagnostic, or a single one.
pub fn to_reportables(err: &TrellisError) -> Vec<Reportable<'_>> {
    match err {
        TrellisError::Parse { err, src } => err
            .diagnostics()
            .iter()
            .map(|diagnostic| Reportable::Diagnostic(DiagnosticAdapter::new(diagnostic, src)))
            .collect(),
        _ => vec![Reportable::Error(ErrorAdapter(err))],
    }
}

#[cfg(test)]
mod tests {
    use trellis::{algorithms::AlgorithmError, identifier::Id};
    use trellis_parser::{
        Span,
        error::{ErrorCode, ParseError},
    };

    use super::*;

    #[test]
    fn test_single_diagnostic() {
        let diag = Diagnostic::error("unexpected token")
            .with_code(ErrorCode::E100)
            .with_label(Span::new(0..5), "here")
            .with_help("try this");
        let err = TrellisError::new_parse_error(ParseError::from(diag), "hello");

        let reportables = to_reportables(&err);
        assert_eq!(reportables.len(), 1);

        match &reportables[0] {
            Reportable::Diagnostic(d) => {
                assert_eq!(d.to_string(), "unexpected token");
                assert_eq!(d.code().unwrap().to_string(), ErrorCode::E100.to_string());
                assert_eq!(d.help().unwrap().to_string(), "try this");
            }
            Reportable::Error(_) => panic!("Expected Diagnostic"),
        }
    }

    #[test]
    fn test_multiple_diagnostics() {
        let diags = vec![
            Diagnostic::error("first error")
                .with_code(ErrorCode::E100)
                .with_label(Span::new(0..5), "first"),
            Diagnostic::error("second error")
                .with_code(ErrorCode::E201)
                .with_label(Span::new(10..15), "second"),
        ];
        let err = TrellisError::new_parse_error(ParseError::from(diags), "source code here...");

        let reportables = to_reportables(&err);
        assert_eq!(reportables.len(), 2);
        assert_eq!(reportables[0].to_string(), "first error");
        assert_eq!(reportables[1].to_string(), "second error");
    }

    #[test]
    fn test_algorithm_error() {
        let err = TrellisError::Algorithm(AlgorithmError::UnknownNode(Id::new("ghost")));

        let reportables = to_reportables(&err);
        assert_eq!(reportables.len(), 1);
        match &reportables[0] {
            Reportable::Error(e) => {
                assert_eq!(e.code().unwrap().to_string(), "trellis::algorithm");
                assert!(e.help().is_some());
                assert!(e.to_string().contains("ghost"));
            }
            Reportable::Diagnostic(_) => panic!("Expected Error"),
        }
    }

    #[test]
    fn test_labels_keep_primary_flag() {
        let diag = Diagnostic::error("duplicate attribute")
            .with_label(Span::new(0..5), "primary")
            .with_secondary_label(Span::new(10..15), "secondary");

        let adapter = DiagnosticAdapter::new(&diag, "some source code");

        let labels: Vec<_> = adapter.labels().unwrap().collect();
        assert_eq!(labels.len(), 2);
        assert!(labels[0].primary());
        assert!(!labels[1].primary());
        assert_eq!(labels[1].label(), Some("secondary"));
    }

    #[test]
    fn test_warning_severity() {
        let diag = Diagnostic::warning("attribute ignored").with_label(Span::new(2..4), "here");
        let adapter = DiagnosticAdapter::new(&diag, "a [x=1];");

        assert_eq!(adapter.severity(), Some(miette::Severity::Warning));
        assert!(adapter.code().is_none());
    }

    #[test]
    fn test_config_error() {
        let err = TrellisError::Config("Invalid edge color in config: nope".to_string());

        let reportables = to_reportables(&err);
        let report = &reportables[0];
        assert_eq!(report.code().unwrap().to_string(), "trellis::config");
        assert!(report.help().is_some());
        assert!(report.to_string().contains("Invalid edge color"));
    }
}
