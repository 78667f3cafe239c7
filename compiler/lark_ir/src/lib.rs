//! Lark IR - concrete syntax tree types.
//!
//! This crate is the boundary between the parser and the evaluator:
//! - [`Span`] for source locations
//! - [`CstNode`] (rule and terminal nodes) with a read-only accessor API
//! - [`grammar`] with the rule and terminal names of the lark grammar
//!
//! The evaluator depends only on this crate, never on the parser, so any
//! parser that emits the same vocabulary can drive it.

mod cst;
pub mod grammar;
mod span;

pub use cst::{CstNode, RuleNode, Token};
pub use span::Span;
