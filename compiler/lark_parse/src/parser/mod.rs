//! Recursive-descent parser over the token stream.
//!
//! The cursor helpers live here; the grammar rules are in [`grammar`].

mod grammar;

use lark_ir::{CstNode, Span};
use lark_stack::{ensure_sufficient_stack, DepthGuard};

use crate::error::ParseError;
use crate::lexer::{lex, Lexeme, TokenKind};
use crate::Start;

type ParseResult = Result<CstNode, ParseError>;

pub(crate) struct Parser<'src> {
    source: &'src str,
    tokens: Vec<Lexeme>,
    pos: usize,
    depth: DepthGuard,
}

impl<'src> Parser<'src> {
    pub(crate) fn new(source: &'src str, max_depth: usize) -> Result<Self, ParseError> {
        Ok(Parser {
            source,
            tokens: lex(source)?,
            pos: 0,
            depth: DepthGuard::new(max_depth),
        })
    }

    /// Parse the whole input from `start`; trailing tokens are an error.
    pub(crate) fn parse(mut self, start: Start) -> ParseResult {
        let tree = match start {
            Start::Program => self.multi_line_block()?,
            Start::Line => self.line()?,
            Start::Expression => self.logic_expr()?,
            Start::Arith => self.arith_expr()?,
        };
        match self.peek() {
            None => Ok(tree),
            Some(kind) => Err(self.unexpected(kind, "end of input")),
        }
    }

    // Cursor

    #[inline]
    fn peek(&self) -> Option<TokenKind> {
        self.tokens.get(self.pos).map(|t| t.kind)
    }

    #[inline]
    fn peek_nth(&self, n: usize) -> Option<TokenKind> {
        self.tokens.get(self.pos + n).map(|t| t.kind)
    }

    #[inline]
    fn at(&self, kind: TokenKind) -> bool {
        self.peek() == Some(kind)
    }

    /// Consume the current token if it is `kind`.
    fn eat(&mut self, kind: TokenKind) -> bool {
        if self.at(kind) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Consume a token of `kind` or fail with `expected`.
    fn expect(&mut self, kind: TokenKind, expected: &'static str) -> Result<Lexeme, ParseError> {
        match self.tokens.get(self.pos).copied() {
            Some(lexeme) if lexeme.kind == kind => {
                self.pos += 1;
                Ok(lexeme)
            }
            Some(lexeme) => Err(self.unexpected(lexeme.kind, expected)),
            None => Err(self.eof(expected)),
        }
    }

    /// Consume the current token as a named terminal node.
    fn terminal(&mut self, name: &str) -> ParseResult {
        let lexeme = self.tokens.get(self.pos).copied().ok_or_else(|| self.eof(name_of(name)))?;
        self.pos += 1;
        let text = self
            .source
            .get(lexeme.span.to_range())
            .unwrap_or_default();
        Ok(CstNode::terminal_at(name, text, lexeme.span))
    }

    /// Span of the current token, or an empty span at end of input.
    fn current_span(&self) -> Span {
        match self.tokens.get(self.pos) {
            Some(lexeme) => lexeme.span,
            None => {
                let end = u32::try_from(self.source.len()).unwrap_or(u32::MAX);
                Span::new(end, end)
            }
        }
    }

    // Errors

    fn unexpected(&self, found: TokenKind, expected: &'static str) -> ParseError {
        ParseError::UnexpectedToken {
            found: found.describe(),
            expected,
            span: self.current_span(),
        }
    }

    fn eof(&self, expected: &'static str) -> ParseError {
        ParseError::UnexpectedEof {
            expected,
            span: self.current_span(),
        }
    }

    /// Count one nesting level against the limit.
    ///
    /// Every successful call needs a matching `self.depth.exit()`.
    fn enter_level(&mut self) -> Result<(), ParseError> {
        self.depth.enter().map_err(|exceeded| ParseError::NestingTooDeep {
            limit: exceeded.limit,
            span: self.current_span(),
        })
    }

    /// Run a recursive rule one nesting level deeper.
    fn nested(&mut self, f: impl FnOnce(&mut Self) -> ParseResult) -> ParseResult {
        self.enter_level()?;
        let result = ensure_sufficient_stack(|| f(self));
        self.depth.exit();
        result
    }
}

fn name_of(terminal: &str) -> &'static str {
    use lark_ir::grammar::terminal;
    match terminal {
        terminal::INT => "integer",
        terminal::SIGNED_FLOAT => "float",
        terminal::VARNAME => "variable name",
        _ => "a literal",
    }
}
