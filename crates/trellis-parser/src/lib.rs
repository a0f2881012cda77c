//! # Trellis Parser
//!
//! Parser for the Trellis graph description language:
//!
//! ```text
//! // comment
//! node a [label="Alpha", color="steelblue"];
//! a -- b [weight=2];
//! b -> c [attraction=4, label="calls"];
//! "quoted id" -- 42;
//! ```
//!
//! ## Usage
//!
//! ```
//! # use trellis_parser::{parse, error::ParseError};
//!
//! fn main() -> Result<(), ParseError> {
//!     let spec = parse("node a; a -- b [weight=2]; b -> c;")?;
//!     assert_eq!(spec.edges().count(), 2);
//!     Ok(())
//! }
//! ```

pub mod error;

mod elaborate;
mod lexer;
mod parser;
mod parser_types;
mod span;
mod tokens;

pub use span::{Span, Spanned};

use log::debug;

use trellis_core::semantic::GraphSpec;

use error::ParseError;

/// Parse source text into a validated graph description.
///
/// The pipeline runs in three phases, each reporting every problem it finds
/// before giving up:
///
/// 1. **Tokenize** - source text to tokens
/// 2. **Parse** - tokens to statements
/// 3. **Elaborate** - check attributes and build the [`GraphSpec`]
///
/// # Errors
///
/// Returns a [`ParseError`] holding one diagnostic per problem, each with an
/// [`ErrorCode`](error::ErrorCode) and a source [`Span`].
///
/// # Example
///
/// ```
/// # use trellis_parser::{parse, error::ErrorCode};
///
/// let err = parse("a -- b [attraction=0];").unwrap_err();
/// assert_eq!(err.diagnostics()[0].code(), Some(ErrorCode::E203));
/// ```
pub fn parse(source: &str) -> Result<GraphSpec, ParseError> {
    debug!(bytes = source.len(); "Parsing graph description");

    let tokens = lexer::tokenize(source)?;
    let statements = parser::build_statements(&tokens)?;
    elaborate::Builder::new().build(&statements)
}
