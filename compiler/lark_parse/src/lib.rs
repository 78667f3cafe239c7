//! Lark Parse - source text to concrete syntax tree.
//!
//! Reproduces the lark grammar as a hand-written recursive-descent parser.
//! The output keeps every precedence rule as its own node (`sum`,
//! `product`, `atom`, ...), so evaluating it requires tunnelling through
//! those wrappers; that is the evaluator's job, not the parser's.
//!
//! # Example
//!
//! ```text
//! let tree = lark_parse::parse("x = 3 + 4", Start::Program)?;
//! println!("{}", tree.pretty());
//! ```

mod error;
mod lexer;
mod parser;

pub use error::ParseError;
pub use lark_stack::DEFAULT_MAX_DEPTH;

use lark_ir::CstNode;

/// Grammar rule to start parsing from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Start {
    /// `multi_line_block`: newline-separated statements.
    #[default]
    Program,
    /// `line`: a single assignment or expression.
    Line,
    /// `logic_expr`: a boolean or arithmetic expression.
    Expression,
    /// `arith_expr`: an arithmetic expression.
    Arith,
}

/// Parse `source` starting from the `start` rule.
pub fn parse(source: &str, start: Start) -> Result<CstNode, ParseError> {
    parse_with_limit(source, start, DEFAULT_MAX_DEPTH)
}

/// Parse with an explicit nesting limit.
#[tracing::instrument(level = "debug", skip(source), fields(len = source.len()))]
pub fn parse_with_limit(source: &str, start: Start, max_depth: usize) -> Result<CstNode, ParseError> {
    parser::Parser::new(source, max_depth)?.parse(start)
}

/// Parse a newline-separated program.
pub fn parse_program(source: &str) -> Result<CstNode, ParseError> {
    parse(source, Start::Program)
}

/// Parse a single expression.
pub fn parse_expression(source: &str) -> Result<CstNode, ParseError> {
    parse(source, Start::Expression)
}
