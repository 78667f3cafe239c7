//! Node compiler: concrete tree to evaluation nodes.
//!
//! The grammar encodes precedence as a ladder of single-alternative rules
//! (`logic_expr` → `disjunction` → ... → `sum` → `product` → `atom`) that
//! carry no meaning of their own. The compiler looks every node's name up
//! in a [`DispatchTable`]; a name with no entry is a pass-through wrapper
//! and must have exactly one child, which is tried in its place. The walk
//! happens once per tree, never during evaluation.
//!
//! Chains of pass-through rules are bounded by [`MAX_PASS_THROUGH`];
//! nesting of mapped nodes is bounded by the compiler's depth limit.

use lark_ir::grammar::{rule, terminal};
use lark_ir::{CstNode, Span};
use lark_stack::{ensure_sufficient_stack, DepthGuard, DEFAULT_MAX_DEPTH};
use rustc_hash::FxHashMap;

use crate::{BinaryOp, CompileError, CompileResult, EvalNode, UnaryOp};

/// Longest chain of unmapped single-child rules the compiler will follow
/// from one node.
pub const MAX_PASS_THROUGH: usize = 64;

/// What a mapped rule or terminal compiles to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Construct {
    /// Every child is a statement.
    Program,
    /// `[name terminal, expression]`.
    Assignment,
    /// `[name terminal, index expression...]`.
    Variable,
    /// Terminal parsed as `i64`.
    IntLiteral,
    /// Terminal parsed as `f64`.
    FloatLiteral,
    /// Terminal whose text is `True` or `False`.
    BoolLiteral,
    /// Exactly one child, compiled in place of the node.
    ///
    /// Unlike an unmapped rule this starts a fresh pass-through chain, so
    /// nested parentheses are bounded by depth rather than by
    /// [`MAX_PASS_THROUGH`].
    Group,
    /// One operand.
    Unary(UnaryOp),
    /// Left and right operands.
    Binary(BinaryOp),
}

/// Mapping from rule and terminal names to constructs.
///
/// Built once and handed to the compiler; there is no process-wide table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DispatchTable {
    entries: FxHashMap<String, Construct>,
}

impl DispatchTable {
    /// A table with no entries.
    pub fn empty() -> Self {
        DispatchTable {
            entries: FxHashMap::default(),
        }
    }

    /// The vocabulary produced by `lark_parse`.
    pub fn lark() -> Self {
        Self::empty()
            .with(rule::MULTI_LINE_BLOCK, Construct::Program)
            .with(rule::ASSIGN_VAR, Construct::Assignment)
            .with(rule::VARIABLE, Construct::Variable)
            .with(rule::BRACKETED_ARITH_EXPR, Construct::Group)
            .with(terminal::INT, Construct::IntLiteral)
            .with(terminal::SIGNED_FLOAT, Construct::FloatLiteral)
            .with(terminal::TRUE, Construct::BoolLiteral)
            .with(terminal::FALSE, Construct::BoolLiteral)
            .with(rule::NEG_ATOM, Construct::Unary(UnaryOp::Neg))
            .with(rule::NOT_OP, Construct::Unary(UnaryOp::Not))
            .with(rule::ADDITION, Construct::Binary(BinaryOp::Add))
            .with(rule::SUBTRACTION, Construct::Binary(BinaryOp::Sub))
            .with(rule::MULTIPLICATION, Construct::Binary(BinaryOp::Mul))
            .with(rule::DIVISION, Construct::Binary(BinaryOp::Div))
            .with(rule::AND_OP, Construct::Binary(BinaryOp::And))
            .with(rule::OR_OP, Construct::Binary(BinaryOp::Or))
            .with(rule::GREATER, Construct::Binary(BinaryOp::Gt))
            .with(rule::GREATER_EQUAL, Construct::Binary(BinaryOp::GtEq))
            .with(rule::EQUAL, Construct::Binary(BinaryOp::Eq))
            .with(rule::LESS_EQUAL, Construct::Binary(BinaryOp::LtEq))
            .with(rule::LESS, Construct::Binary(BinaryOp::Lt))
            .with(rule::NOT_EQUAL, Construct::Binary(BinaryOp::NotEq))
    }

    /// Map `name` to `construct`, returning the previous mapping.
    pub fn insert(&mut self, name: impl Into<String>, construct: Construct) -> Option<Construct> {
        self.entries.insert(name.into(), construct)
    }

    /// Builder form of [`insert`](Self::insert).
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, construct: Construct) -> Self {
        self.insert(name, construct);
        self
    }

    /// Remove the mapping for `name`, making it a pass-through rule.
    pub fn remove(&mut self, name: &str) -> Option<Construct> {
        self.entries.remove(name)
    }

    #[inline]
    pub fn get(&self, name: &str) -> Option<Construct> {
        self.entries.get(name).copied()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for DispatchTable {
    fn default() -> Self {
        Self::lark()
    }
}

/// Compiles concrete trees against a dispatch table.
#[derive(Clone, Debug)]
pub struct NodeCompiler {
    table: DispatchTable,
    max_depth: usize,
}

impl NodeCompiler {
    /// Compiler for the lark vocabulary with the default depth limit.
    pub fn new() -> Self {
        Self::with_table(DispatchTable::lark())
    }

    pub fn with_table(table: DispatchTable) -> Self {
        NodeCompiler {
            table,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Limit on nested mapped nodes.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    #[inline]
    pub fn table(&self) -> &DispatchTable {
        &self.table
    }

    /// Compile `tree` into one evaluation node.
    #[tracing::instrument(level = "debug", skip_all, fields(root = tree.name()))]
    pub fn compile(&self, tree: &CstNode) -> CompileResult<EvalNode> {
        let mut cx = CompileCx {
            table: &self.table,
            depth: DepthGuard::new(self.max_depth),
        };
        let node = cx.compile(tree)?;
        tracing::debug!(nodes = node.node_count(), "compiled");
        Ok(node)
    }
}

impl Default for NodeCompiler {
    fn default() -> Self {
        Self::new()
    }
}

/// State for one compilation.
struct CompileCx<'t> {
    table: &'t DispatchTable,
    depth: DepthGuard,
}

impl CompileCx<'_> {
    fn compile(&mut self, node: &CstNode) -> CompileResult<EvalNode> {
        self.depth.enter()?;
        let result = ensure_sufficient_stack(|| {
            let (mapped, construct) = self.resolve(node)?;
            self.construct(mapped, construct)
        });
        self.depth.exit();
        result
    }

    /// Follow unmapped single-child rules down to the first mapped node.
    fn resolve<'n>(&self, node: &'n CstNode) -> CompileResult<(&'n CstNode, Construct)> {
        let mut current = node;
        for _ in 0..=MAX_PASS_THROUGH {
            if let Some(construct) = self.table.get(current.name()) {
                return Ok((current, construct));
            }
            match current {
                CstNode::Terminal(token) => {
                    return Err(CompileError::UnmappedTerminal {
                        kind: token.kind.clone(),
                        span: token.span,
                    });
                }
                CstNode::Rule(rule) => match rule.children.as_slice() {
                    [only] => {
                        tracing::trace!(rule = %rule.name, child = only.name(), "pass-through");
                        current = only;
                    }
                    children => {
                        return Err(CompileError::AmbiguousPassThrough {
                            rule: rule.name.clone(),
                            children: children.len(),
                            span: current.span(),
                        });
                    }
                },
            }
        }
        Err(CompileError::PassThroughTooDeep {
            rule: current.name().to_string(),
            limit: MAX_PASS_THROUGH,
        })
    }

    fn construct(&mut self, node: &CstNode, construct: Construct) -> CompileResult<EvalNode> {
        match construct {
            Construct::Program => {
                let statements = rule_children(node)?
                    .iter()
                    .map(|child| self.compile(child))
                    .collect::<CompileResult<Vec<_>>>()?;
                Ok(EvalNode::Program(statements))
            }
            Construct::Assignment => match rule_children(node)? {
                [CstNode::Terminal(name), value] => Ok(EvalNode::Assignment {
                    name: name.value.clone(),
                    value: Box::new(self.compile(value)?),
                }),
                _ => Err(malformed(node, "expected a name followed by one expression")),
            },
            Construct::Variable => match rule_children(node)? {
                [CstNode::Terminal(name), indices @ ..] => {
                    let indices = indices
                        .iter()
                        .map(|index| self.compile(index))
                        .collect::<CompileResult<Vec<_>>>()?;
                    Ok(EvalNode::VariableRef {
                        name: name.value.clone(),
                        indices,
                    })
                }
                _ => Err(malformed(node, "expected a name followed by index expressions")),
            },
            Construct::IntLiteral => {
                let (text, span) = literal_text(node)?;
                text.parse::<i64>()
                    .map(EvalNode::int)
                    .map_err(|_| invalid_literal("integer", text, span))
            }
            Construct::FloatLiteral => {
                let (text, span) = literal_text(node)?;
                text.parse::<f64>()
                    .map(EvalNode::float)
                    .map_err(|_| invalid_literal("float", text, span))
            }
            Construct::BoolLiteral => {
                let (text, span) = literal_text(node)?;
                match text {
                    "True" => Ok(EvalNode::bool(true)),
                    "False" => Ok(EvalNode::bool(false)),
                    _ => Err(invalid_literal("boolean", text, span)),
                }
            }
            Construct::Group => match rule_children(node)? {
                [inner] => self.compile(inner),
                _ => Err(malformed(node, "expected exactly one child")),
            },
            Construct::Unary(op) => match rule_children(node)? {
                [operand] => Ok(EvalNode::unary(op, self.compile(operand)?)),
                _ => Err(malformed(node, "expected exactly one operand")),
            },
            Construct::Binary(op) => match rule_children(node)? {
                [left, right] => {
                    let left = self.compile(left)?;
                    let right = self.compile(right)?;
                    Ok(EvalNode::binary(op, left, right))
                }
                _ => Err(malformed(node, "expected exactly two operands")),
            },
        }
    }
}

fn rule_children(node: &CstNode) -> CompileResult<&[CstNode]> {
    match node {
        CstNode::Rule(rule) => Ok(&rule.children),
        CstNode::Terminal(_) => Err(malformed(node, "expected a rule node, found a terminal")),
    }
}

fn literal_text(node: &CstNode) -> CompileResult<(&str, Span)> {
    match node {
        CstNode::Terminal(token) => Ok((&token.value, token.span)),
        CstNode::Rule(_) => Err(malformed(node, "literal must be a terminal")),
    }
}

#[cold]
fn malformed(node: &CstNode, reason: &'static str) -> CompileError {
    CompileError::MalformedNode {
        rule: node.name().to_string(),
        reason,
        span: node.span(),
    }
}

#[cold]
fn invalid_literal(kind: &'static str, text: &str, span: Span) -> CompileError {
    CompileError::InvalidLiteral {
        kind,
        text: text.to_string(),
        span,
    }
}
