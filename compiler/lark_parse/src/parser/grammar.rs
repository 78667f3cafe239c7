//! Grammar rules.
//!
//! Each method parses one rule and returns the rule node exactly as the
//! grammar names it, without tree shaping: `sum` always wraps either a
//! `product` or an `addition`/`subtraction`, every literal sits inside an
//! `atom`, and so on. Left-recursive rules (`sum: sum "+" product`) are
//! parsed with a loop that re-wraps the accumulated node on each operator
//! and charges the nesting limit for it.
//!
//! ```text
//! multi_line_block: (line _NL? | _NL)*
//! line:             assign_var | logic_expr
//! assign_var:       VARNAME "=" logic_expr
//! logic_expr:       disjunction
//! disjunction:      conjunction | or_op
//! or_op:            disjunction "or" conjunction
//! conjunction:      negation | and_op
//! and_op:           conjunction "and" negation
//! negation:         comparison | not_op
//! not_op:           "not" negation
//! comparison:       arith_expr | greater | greater_equal | equal
//!                 | less_equal | less | not_equal
//! arith_expr:       sum
//! sum:              product | addition | subtraction
//! product:          atom | multiplication | division
//! atom:             SIGNED_FLOAT | INT | TRUE | FALSE | variable
//!                 | neg_atom | bracketed_arith_expr
//! variable:         VARNAME ("[" arith_expr "]")*
//! ```

use lark_ir::grammar::{rule, terminal};
use lark_ir::CstNode;

use super::{ParseResult, Parser};
use crate::lexer::TokenKind;

impl Parser<'_> {
    pub(super) fn multi_line_block(&mut self) -> ParseResult {
        let mut lines = Vec::new();
        loop {
            match self.peek() {
                None => break,
                Some(TokenKind::Newline) => {
                    self.pos += 1;
                }
                Some(_) => {
                    lines.push(self.line()?);
                    match self.peek() {
                        None | Some(TokenKind::Newline) => {}
                        Some(kind) => return Err(self.unexpected(kind, "newline")),
                    }
                }
            }
        }
        tracing::trace!(lines = lines.len(), "parsed multi_line_block");
        Ok(CstNode::rule(rule::MULTI_LINE_BLOCK, lines))
    }

    pub(super) fn line(&mut self) -> ParseResult {
        let is_assignment = self.at(TokenKind::VarName) && self.peek_nth(1) == Some(TokenKind::Assign);
        let child = if is_assignment {
            self.assign_var()?
        } else {
            self.logic_expr()?
        };
        Ok(CstNode::rule(rule::LINE, vec![child]))
    }

    fn assign_var(&mut self) -> ParseResult {
        let name = self.terminal(terminal::VARNAME)?;
        self.expect(TokenKind::Assign, "`=`")?;
        let value = self.logic_expr()?;
        Ok(CstNode::rule(rule::ASSIGN_VAR, vec![name, value]))
    }

    // Logic

    pub(super) fn logic_expr(&mut self) -> ParseResult {
        self.nested(|p| {
            let inner = p.disjunction()?;
            Ok(CstNode::rule(rule::LOGIC_EXPR, vec![inner]))
        })
    }

    fn disjunction(&mut self) -> ParseResult {
        self.left_assoc(rule::DISJUNCTION, Self::conjunction, |kind| match kind {
            TokenKind::Or => Some(rule::OR_OP),
            _ => None,
        })
    }

    fn conjunction(&mut self) -> ParseResult {
        self.left_assoc(rule::CONJUNCTION, Self::negation, |kind| match kind {
            TokenKind::And => Some(rule::AND_OP),
            _ => None,
        })
    }

    fn negation(&mut self) -> ParseResult {
        if self.eat(TokenKind::Not) {
            let operand = self.nested(Self::negation)?;
            let op = CstNode::rule(rule::NOT_OP, vec![operand]);
            return Ok(CstNode::rule(rule::NEGATION, vec![op]));
        }
        let comparison = self.comparison()?;
        Ok(CstNode::rule(rule::NEGATION, vec![comparison]))
    }

    fn comparison(&mut self) -> ParseResult {
        let lhs = self.arith_expr()?;
        let op_name = match self.peek() {
            Some(TokenKind::Gt) => rule::GREATER,
            Some(TokenKind::GtEq) => rule::GREATER_EQUAL,
            Some(TokenKind::EqEq) => rule::EQUAL,
            Some(TokenKind::LtEq) => rule::LESS_EQUAL,
            Some(TokenKind::Lt) => rule::LESS,
            Some(TokenKind::NotEq) => rule::NOT_EQUAL,
            _ => return Ok(CstNode::rule(rule::COMPARISON, vec![lhs])),
        };
        self.pos += 1;
        let rhs = self.arith_expr()?;
        let op = CstNode::rule(op_name, vec![lhs, rhs]);
        Ok(CstNode::rule(rule::COMPARISON, vec![op]))
    }

    // Arithmetic

    pub(super) fn arith_expr(&mut self) -> ParseResult {
        let sum = self.sum()?;
        Ok(CstNode::rule(rule::ARITH_EXPR, vec![sum]))
    }

    fn sum(&mut self) -> ParseResult {
        self.left_assoc(rule::SUM, Self::product, |kind| match kind {
            TokenKind::Plus => Some(rule::ADDITION),
            TokenKind::Minus => Some(rule::SUBTRACTION),
            _ => None,
        })
    }

    fn product(&mut self) -> ParseResult {
        self.left_assoc(rule::PRODUCT, Self::atom, |kind| match kind {
            TokenKind::Star => Some(rule::MULTIPLICATION),
            TokenKind::Slash => Some(rule::DIVISION),
            _ => None,
        })
    }

    fn atom(&mut self) -> ParseResult {
        self.nested(|p| {
            let inner = match p.peek() {
                Some(TokenKind::Int) => p.terminal(terminal::INT)?,
                Some(TokenKind::Float) => p.terminal(terminal::SIGNED_FLOAT)?,
                Some(TokenKind::True) => p.terminal(terminal::TRUE)?,
                Some(TokenKind::False) => p.terminal(terminal::FALSE)?,
                Some(TokenKind::VarName) => p.variable()?,
                Some(TokenKind::Minus) => {
                    p.pos += 1;
                    let operand = p.atom()?;
                    CstNode::rule(rule::NEG_ATOM, vec![operand])
                }
                Some(TokenKind::LParen) => {
                    p.pos += 1;
                    let inner = p.logic_expr()?;
                    p.expect(TokenKind::RParen, "`)`")?;
                    CstNode::rule(rule::BRACKETED_ARITH_EXPR, vec![inner])
                }
                Some(kind) => return Err(p.unexpected(kind, "an expression")),
                None => return Err(p.eof("an expression")),
            };
            Ok(CstNode::rule(rule::ATOM, vec![inner]))
        })
    }

    fn variable(&mut self) -> ParseResult {
        let mut children = vec![self.terminal(terminal::VARNAME)?];
        while self.eat(TokenKind::LBracket) {
            children.push(self.arith_expr()?);
            self.expect(TokenKind::RBracket, "`]`")?;
        }
        Ok(CstNode::rule(rule::VARIABLE, children))
    }

    // Left recursion

    /// Parse `wrapper: operand | op_rule` where every `op_rule` is
    /// `wrapper OPERATOR operand`.
    ///
    /// Each operator wraps the accumulated node two levels deeper, so each
    /// one counts as a nesting level until the whole chain is parsed.
    fn left_assoc(
        &mut self,
        wrapper: &'static str,
        operand: fn(&mut Self) -> ParseResult,
        operator: fn(TokenKind) -> Option<&'static str>,
    ) -> ParseResult {
        let mut levels = 0;
        let result = self.left_assoc_chain(wrapper, operand, operator, &mut levels);
        for _ in 0..levels {
            self.depth.exit();
        }
        result
    }

    fn left_assoc_chain(
        &mut self,
        wrapper: &'static str,
        operand: fn(&mut Self) -> ParseResult,
        operator: fn(TokenKind) -> Option<&'static str>,
        levels: &mut usize,
    ) -> ParseResult {
        let mut node = CstNode::rule(wrapper, vec![operand(self)?]);
        while let Some(op_name) = self.peek().and_then(operator) {
            self.enter_level()?;
            *levels += 1;
            self.pos += 1;
            let rhs = operand(self)?;
            let op = CstNode::rule(op_name, vec![node, rhs]);
            node = CstNode::rule(wrapper, vec![op]);
        }
        if *levels > 0 {
            tracing::trace!(rule = wrapper, operators = *levels, "parsed chain");
        }
        Ok(node)
    }
}
