//! Parser for graph description tokens.
//!
//! Turns the token stream from the [`lexer`](super::lexer) into
//! [`Statement`](types::Statement)s. Parsing recovers at statement
//! boundaries: a broken statement is reported and skipped up to the next
//! `;`, so one run reports every syntax error. The entry point is
//! [`build_statements`].

use log::trace;
use winnow::{
    Parser as _,
    combinator::{cut_err, opt, preceded, repeat, separated, terminated},
    error::{ContextError, ErrMode},
    stream::{Stream, TokenSlice},
    token::any,
};

use trellis_core::identifier::Id;

use crate::{
    error::{Diagnostic, DiagnosticCollector, ErrorCode, ParseError},
    parser_types as types,
    span::{Span, Spanned},
    tokens::{PositionedToken, Token},
};

/// Description of what was being parsed when an error occurred.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Context {
    Label(&'static str),
}

type Input<'src> = TokenSlice<'src, PositionedToken<'src>>;
type IResult<O> = Result<O, ErrMode<ContextError<Context>>>;

/// Integral numbers name the same node as their decimal text, so `1` and
/// `"1"` are one node.
fn number_id(value: f64) -> Id {
    if value.fract() == 0.0 && value.abs() < 9.0e15 {
        Id::from_number(value as i64)
    } else {
        Id::new(&value.to_string())
    }
}

/// Skip whitespace, newlines and comments
fn trivia<'src>(input: &mut Input<'src>) -> IResult<()> {
    repeat(
        0..,
        any.verify(|token: &PositionedToken<'_>| token.token.is_trivia())
            .void(),
    )
    .parse_next(input)
}

/// Match a single punctuation token after optional trivia, returning its span.
fn punct<'src>(
    expected: Token<'static>,
    label: &'static str,
) -> impl FnMut(&mut Input<'src>) -> IResult<Span> {
    move |input: &mut Input<'src>| {
        preceded(
            trivia,
            any.verify_map(|token: &PositionedToken<'_>| {
                (token.token == expected).then_some(token.span)
            }),
        )
        .context(Context::Label(label))
        .parse_next(input)
    }
}

/// A node id: identifier, quoted string or number.
fn node_id<'src>(input: &mut Input<'src>) -> IResult<Spanned<Id>> {
    preceded(
        trivia,
        any.verify_map(|token: &PositionedToken<'_>| {
            let id = match &token.token {
                Token::Identifier(name) => Id::new(name),
                Token::StringLiteral(text) => Id::new(text),
                Token::Number(value) => number_id(*value),
                _ => return None,
            };
            Some(Spanned::new(id, token.span))
        }),
    )
    .context(Context::Label("node id"))
    .parse_next(input)
}

fn attribute_value<'src>(
    input: &mut Input<'src>,
) -> IResult<Spanned<types::AttributeValue<'src>>> {
    preceded(
        trivia,
        any.verify_map(|token: &'src PositionedToken<'src>| {
            let value = match &token.token {
                Token::StringLiteral(text) => types::AttributeValue::String(text.clone()),
                Token::Identifier(name) => types::AttributeValue::Identifier(*name),
                Token::Number(value) => types::AttributeValue::Number(*value),
                Token::True => types::AttributeValue::Bool(true),
                Token::False => types::AttributeValue::Bool(false),
                _ => return None,
            };
            Some(Spanned::new(value, token.span))
        }),
    )
    .context(Context::Label("attribute value"))
    .parse_next(input)
}

fn attribute_name<'src>(input: &mut Input<'src>) -> IResult<Spanned<&'src str>> {
    preceded(
        trivia,
        any.verify_map(|token: &'src PositionedToken<'src>| match &token.token {
            Token::Identifier(name) => Some(Spanned::new(*name, token.span)),
            _ => None,
        }),
    )
    .context(Context::Label("attribute name"))
    .parse_next(input)
}

/// `name = value`
fn attribute<'src>(input: &mut Input<'src>) -> IResult<types::Attribute<'src>> {
    let name = attribute_name.parse_next(input)?;
    punct(Token::Equals, "`=`").parse_next(input)?;
    let value = attribute_value.parse_next(input)?;

    Ok(types::Attribute { name, value })
}

/// `[name=value, ...]`, possibly empty, possibly absent.
fn attributes<'src>(input: &mut Input<'src>) -> IResult<Vec<types::Attribute<'src>>> {
    if opt(punct(Token::LeftBracket, "`[`"))
        .parse_next(input)?
        .is_none()
    {
        return Ok(Vec::new());
    }

    cut_err(terminated(
        separated(0.., attribute, punct(Token::Comma, "`,`")),
        punct(Token::RightBracket, "`,` or `]`"),
    ))
    .parse_next(input)
}

fn edge_operator<'src>(input: &mut Input<'src>) -> IResult<bool> {
    preceded(
        trivia,
        any.verify_map(|token: &PositionedToken<'_>| match token.token {
            Token::UndirectedEdge => Some(false),
            Token::DirectedEdge => Some(true),
            _ => None,
        }),
    )
    .context(Context::Label("`--` or `->`"))
    .parse_next(input)
}

/// `node ID [attrs];`
fn node_statement<'src>(input: &mut Input<'src>) -> IResult<types::Statement<'src>> {
    punct(Token::Node, "`node`").parse_next(input)?;

    cut_err(|input: &mut Input<'src>| {
        let id = node_id.parse_next(input)?;
        let attributes = attributes.parse_next(input)?;
        punct(Token::Semicolon, "`;`").parse_next(input)?;

        Ok(types::Statement::Node(types::NodeStatement { id, attributes }))
    })
    .parse_next(input)
}

/// `ID -- ID [attrs];` or `ID -> ID [attrs];`
fn edge_statement<'src>(input: &mut Input<'src>) -> IResult<types::Statement<'src>> {
    let source = node_id.parse_next(input)?;
    let directed = edge_operator.parse_next(input)?;

    let (target, attributes) = cut_err(|input: &mut Input<'src>| {
        let target = node_id.parse_next(input)?;
        let attributes = attributes.parse_next(input)?;
        punct(Token::Semicolon, "`;`").parse_next(input)?;
        Ok((target, attributes))
    })
    .parse_next(input)?;

    Ok(types::Statement::Edge(types::EdgeStatement {
        source,
        target,
        directed,
        attributes,
    }))
}

/// A statement starting with `node` declares a node; anything else must
/// be an edge.
fn statement<'src>(input: &mut Input<'src>) -> IResult<types::Statement<'src>> {
    let mut probe = input.clone();
    trivia(&mut probe)?;
    match probe.peek_token() {
        Some(token) if token.token == Token::Node => node_statement(input),
        _ => edge_statement(input),
    }
}

/// Returns `true` when only trivia is left.
fn at_end(input: &Input<'_>) -> bool {
    let mut probe = input.clone();
    trivia(&mut probe).is_ok() && probe.eof_offset() == 0
}

/// Skips past the next `;`, or to the end of input.
fn skip_statement(input: &mut Input<'_>) {
    while let Some(token) = input.next_token() {
        if token.token == Token::Semicolon {
            break;
        }
    }
}

/// Converts a parser error into a diagnostic.
///
/// The error is reported at the first meaningful token at or after
/// `position`; running out of tokens means the input is incomplete.
fn convert_error(
    error: ErrMode<ContextError<Context>>,
    tokens: &[PositionedToken<'_>],
    position: usize,
) -> Diagnostic {
    let expected = match &error {
        ErrMode::Backtrack(e) | ErrMode::Cut(e) => e.context().find_map(|ctx| match ctx {
            Context::Label(label) => Some(*label),
        }),
        ErrMode::Incomplete(_) => None,
    };
    let expected_label = expected
        .map(|label| format!("expected {label}"))
        .unwrap_or_else(|| "expected a statement".to_string());

    let offending = tokens[position.min(tokens.len())..]
        .iter()
        .find(|t| !t.token.is_trivia());

    match offending {
        Some(token) => Diagnostic::error(format!("unexpected token `{}`", token.token))
            .with_code(ErrorCode::E100)
            .with_label(token.span, expected_label)
            .with_help("statements look like `node a;`, `a -- b;` or `a -> b [weight=2];`"),
        None => {
            let end = tokens
                .iter()
                .rev()
                .find(|t| !t.token.is_trivia())
                .map(|t| t.span.end())
                .unwrap_or_default();

            Diagnostic::error("incomplete input, more tokens expected")
                .with_code(ErrorCode::E101)
                .with_label(Span::new(end..end), expected_label)
                .with_help("every statement must end with `;`")
        }
    }
}

/// Parse every statement in `tokens`, recovering after syntax errors.
pub fn build_statements<'src>(
    tokens: &'src [PositionedToken<'src>],
) -> Result<Vec<types::Statement<'src>>, ParseError> {
    let mut input = TokenSlice::new(tokens);
    let mut statements = Vec::new();
    let mut diagnostics = DiagnosticCollector::new();

    while !at_end(&input) {
        let start = input.checkpoint();
        match statement.parse_next(&mut input) {
            Ok(statement) => {
                trace!(statement:? = statement; "Parsed statement");
                statements.push(statement);
            }
            Err(e) => {
                let position = tokens.len() - input.eof_offset();
                diagnostics.emit(convert_error(e, tokens, position));

                input.reset(&start);
                skip_statement(&mut input);
            }
        }
    }

    diagnostics.finish()?;
    Ok(statements)
}
