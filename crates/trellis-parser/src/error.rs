//! Error and diagnostic system for the Trellis parser.
//!
//! Every phase (lexing, parsing, attribute checking) reports problems as
//! [`Diagnostic`]s carrying an [`ErrorCode`], labeled [`Span`](crate::Span)s
//! and optional help text. One or more diagnostics are returned together as
//! a [`ParseError`].
//!
//! # Example
//!
//! ```
//! # use trellis_parser::error::{Diagnostic, ErrorCode};
//! # use trellis_parser::Span;
//!
//! let diag = Diagnostic::error("attribute `label` is given more than once")
//!     .with_code(ErrorCode::E201)
//!     .with_label(Span::new(30..41), "duplicate attribute")
//!     .with_secondary_label(Span::new(10..21), "first given here")
//!     .with_help("remove one of them");
//! ```

mod collector;
mod diagnostic;
mod error_code;
mod label;
mod parse_error;
mod severity;

pub(crate) use collector::DiagnosticCollector;

pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
pub use label::Label;
pub use parse_error::ParseError;
pub use severity::Severity;
