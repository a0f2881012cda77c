//! Token definitions produced by the [`lexer`](super::lexer).

use std::fmt;

use crate::span::Span;

/// A lexical token of the graph description language.
#[derive(Debug, Clone, PartialEq)]
pub enum Token<'a> {
    // Keywords
    Node,
    True,
    False,

    // Literals and names
    Identifier(&'a str),
    StringLiteral(String),
    Number(f64),

    // Edge operators
    /// `--`
    UndirectedEdge,
    /// `->`
    DirectedEdge,

    // Punctuation
    Equals,
    Comma,
    Semicolon,
    LeftBracket,
    RightBracket,

    // Trivia
    LineComment(&'a str),
    Whitespace,
    Newline,
}

impl Token<'_> {
    /// Whitespace, newlines and comments carry no meaning for the parser.
    pub fn is_trivia(&self) -> bool {
        matches!(
            self,
            Token::Whitespace | Token::Newline | Token::LineComment(_)
        )
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Node => write!(f, "node"),
            Token::True => write!(f, "true"),
            Token::False => write!(f, "false"),
            Token::Identifier(name) => write!(f, "{name}"),
            Token::StringLiteral(text) => write!(f, "\"{text}\""),
            Token::Number(value) => write!(f, "{value}"),
            Token::UndirectedEdge => write!(f, "--"),
            Token::DirectedEdge => write!(f, "->"),
            Token::Equals => write!(f, "="),
            Token::Comma => write!(f, ","),
            Token::Semicolon => write!(f, ";"),
            Token::LeftBracket => write!(f, "["),
            Token::RightBracket => write!(f, "]"),
            Token::LineComment(text) => write!(f, "//{text}"),
            Token::Whitespace => write!(f, "whitespace"),
            Token::Newline => write!(f, "newline"),
        }
    }
}

/// A token with its location in the source.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionedToken<'a> {
    pub token: Token<'a>,
    pub span: Span,
}

impl<'a> PositionedToken<'a> {
    pub fn new(token: Token<'a>, span: Span) -> Self {
        Self { token, span }
    }
}
