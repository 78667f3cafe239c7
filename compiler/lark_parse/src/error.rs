//! Parse error types.
//!
//! The parser does not recover: the first error ends the parse. Every
//! variant carries the span it refers to so drivers can point at the source.

use lark_ir::Span;

/// Error produced while lexing or parsing.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// Characters that do not form any token.
    #[error("invalid token `{text}`")]
    InvalidToken { text: String, span: Span },

    /// A token that the grammar does not allow here.
    #[error("unexpected {found}, expected {expected}")]
    UnexpectedToken {
        found: &'static str,
        expected: &'static str,
        span: Span,
    },

    /// Input ended while the grammar required more.
    #[error("unexpected end of input, expected {expected}")]
    UnexpectedEof { expected: &'static str, span: Span },

    /// Nesting deeper than the configured limit.
    #[error("expression nested too deeply (limit {limit})")]
    NestingTooDeep { limit: usize, span: Span },
}

impl ParseError {
    /// Location the error refers to.
    pub fn span(&self) -> Span {
        match self {
            ParseError::InvalidToken { span, .. }
            | ParseError::UnexpectedToken { span, .. }
            | ParseError::UnexpectedEof { span, .. }
            | ParseError::NestingTooDeep { span, .. } => *span,
        }
    }
}
