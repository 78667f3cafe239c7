//! Tokenizer for lark source text.
//!
//! Keywords and punctuation are anonymous in the grammar and never reach the
//! concrete tree; only the literal and name tokens become terminal nodes.

use std::fmt;

use lark_ir::Span;
use logos::Logos;

use crate::error::ParseError;

/// Raw token from logos.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r]+")] // Skip horizontal whitespace
pub(crate) enum TokenKind {
    #[token("\n")]
    Newline,

    #[token("True")]
    True,
    #[token("False")]
    False,
    #[token("and")]
    And,
    #[token("or")]
    Or,
    #[token("not")]
    Not,

    #[regex(r"[A-Za-z][A-Za-z0-9]*")]
    VarName,

    #[regex(r"[0-9]+")]
    Int,
    #[regex(r"[0-9]+[eE][+-]?[0-9]+")]
    #[regex(r"[0-9]+\.[0-9]*([eE][+-]?[0-9]+)?")]
    #[regex(r"\.[0-9]+([eE][+-]?[0-9]+)?")]
    Float,

    #[token("==")]
    EqEq,
    #[token("!=")]
    NotEq,
    #[token(">=")]
    GtEq,
    #[token("<=")]
    LtEq,
    #[token(">")]
    Gt,
    #[token("<")]
    Lt,
    #[token("=")]
    Assign,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
}

impl TokenKind {
    /// Human-readable description for error messages.
    pub(crate) fn describe(self) -> &'static str {
        match self {
            TokenKind::Newline => "newline",
            TokenKind::True => "`True`",
            TokenKind::False => "`False`",
            TokenKind::And => "`and`",
            TokenKind::Or => "`or`",
            TokenKind::Not => "`not`",
            TokenKind::VarName => "variable name",
            TokenKind::Int => "integer",
            TokenKind::Float => "float",
            TokenKind::EqEq => "`==`",
            TokenKind::NotEq => "`!=`",
            TokenKind::GtEq => "`>=`",
            TokenKind::LtEq => "`<=`",
            TokenKind::Gt => "`>`",
            TokenKind::Lt => "`<`",
            TokenKind::Assign => "`=`",
            TokenKind::Plus => "`+`",
            TokenKind::Minus => "`-`",
            TokenKind::Star => "`*`",
            TokenKind::Slash => "`/`",
            TokenKind::LParen => "`(`",
            TokenKind::RParen => "`)`",
            TokenKind::LBracket => "`[`",
            TokenKind::RBracket => "`]`",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// A token with its location.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Lexeme {
    pub kind: TokenKind,
    pub span: Span,
}

/// Tokenize `source`, failing on the first unrecognized character sequence.
pub(crate) fn lex(source: &str) -> Result<Vec<Lexeme>, ParseError> {
    let mut lexer = TokenKind::lexer(source);
    let mut tokens = Vec::new();
    while let Some(result) = lexer.next() {
        let span = Span::from_range(lexer.span());
        match result {
            Ok(kind) => tokens.push(Lexeme { kind, span }),
            Err(()) => {
                return Err(ParseError::InvalidToken {
                    text: lexer.slice().to_string(),
                    span,
                })
            }
        }
    }
    Ok(tokens)
}
