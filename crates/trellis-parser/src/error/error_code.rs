//! Error codes for Trellis parser diagnostics.
//!
//! Codes are grouped by phase:
//! - `E0xx` - Lexer errors
//! - `E1xx` - Parser errors
//! - `E2xx` - Attribute errors

use std::fmt;

/// Error codes for categorizing diagnostic errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Lexer Errors (E0xx)
    // =========================================================================
    /// Unterminated string literal.
    E001,

    /// Unexpected character.
    E002,

    /// Invalid escape sequence.
    ///
    /// Valid escapes are: `\n`, `\r`, `\t`, `\\`, `\"`, `\0`, `\u{...}`.
    E003,

    /// Invalid unicode escape format; expected `\u{XXXX}` with 1-6 hex digits.
    E004,

    /// Invalid unicode codepoint (out of range or a surrogate).
    E005,

    // =========================================================================
    // Parser Errors (E1xx)
    // =========================================================================
    /// Unexpected token.
    E100,

    /// Incomplete input, usually a missing `;`.
    E101,

    // =========================================================================
    // Attribute Errors (E2xx)
    // =========================================================================
    /// Attribute value has the wrong type, e.g. `weight="heavy"`.
    E200,

    /// The same attribute is given twice on one statement.
    E201,

    /// Not a valid CSS color.
    E202,

    /// Attraction must be a positive finite number.
    E203,

    /// Weight must be a finite number.
    E204,
}

impl ErrorCode {
    /// Returns the code as a string (e.g., "E001").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "E001",
            ErrorCode::E002 => "E002",
            ErrorCode::E003 => "E003",
            ErrorCode::E004 => "E004",
            ErrorCode::E005 => "E005",
            ErrorCode::E100 => "E100",
            ErrorCode::E101 => "E101",
            ErrorCode::E200 => "E200",
            ErrorCode::E201 => "E201",
            ErrorCode::E202 => "E202",
            ErrorCode::E203 => "E203",
            ErrorCode::E204 => "E204",
        }
    }

    /// Returns a short description of what this error code means.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "unterminated string literal",
            ErrorCode::E002 => "unexpected character",
            ErrorCode::E003 => "invalid escape sequence",
            ErrorCode::E004 => "invalid unicode escape",
            ErrorCode::E005 => "invalid unicode codepoint",
            ErrorCode::E100 => "unexpected token",
            ErrorCode::E101 => "incomplete input",
            ErrorCode::E200 => "attribute type mismatch",
            ErrorCode::E201 => "duplicate attribute",
            ErrorCode::E202 => "invalid color",
            ErrorCode::E203 => "invalid attraction",
            ErrorCode::E204 => "invalid weight",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
