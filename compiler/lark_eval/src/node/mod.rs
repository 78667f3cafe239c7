//! Evaluation nodes.
//!
//! The compiled form of a concrete tree. Every variant is self-contained:
//! names are owned strings, literals are parsed values, and operators are
//! tags, so evaluation never looks back at the concrete tree. The root
//! owns the whole tree and nothing mutates it after compilation.

mod operators;

use std::fmt;
use std::mem;

use lark_stack::ensure_sufficient_stack;

pub use operators::{BinaryOp, UnaryOp};

use crate::{Environment, EvalResult, Interpreter, Value};

/// A pre-parsed constant.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Literal {
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl Literal {
    #[inline]
    pub fn to_value(self) -> Value {
        match self {
            Literal::Int(n) => Value::Int(n),
            Literal::Float(f) => Value::Float(f),
            Literal::Bool(b) => Value::Bool(b),
        }
    }
}

/// A compiled, directly executable node.
///
/// A long operator chain compiles to a tree as deep as the chain, so the
/// recursive impls grow the stack and dropping never recurses.
#[derive(Debug)]
pub enum EvalNode {
    /// Statements run in order; the last one's value is the result.
    Program(Vec<EvalNode>),
    /// `name = value`.
    Assignment { name: String, value: Box<EvalNode> },
    /// `name[i][j]...`, indices applied left to right.
    VariableRef { name: String, indices: Vec<EvalNode> },
    Literal(Literal),
    Unary { op: UnaryOp, operand: Box<EvalNode> },
    Binary {
        op: BinaryOp,
        left: Box<EvalNode>,
        right: Box<EvalNode>,
    },
}

impl EvalNode {
    pub fn int(n: i64) -> Self {
        EvalNode::Literal(Literal::Int(n))
    }

    pub fn float(f: f64) -> Self {
        EvalNode::Literal(Literal::Float(f))
    }

    pub fn bool(b: bool) -> Self {
        EvalNode::Literal(Literal::Bool(b))
    }

    pub fn variable(name: impl Into<String>) -> Self {
        EvalNode::VariableRef {
            name: name.into(),
            indices: Vec::new(),
        }
    }

    pub fn assign(name: impl Into<String>, value: EvalNode) -> Self {
        EvalNode::Assignment {
            name: name.into(),
            value: Box::new(value),
        }
    }

    pub fn unary(op: UnaryOp, operand: EvalNode) -> Self {
        EvalNode::Unary {
            op,
            operand: Box::new(operand),
        }
    }

    pub fn binary(op: BinaryOp, left: EvalNode, right: EvalNode) -> Self {
        EvalNode::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Evaluate against `env` with the default limits.
    ///
    /// Assignments inside the tree write to `env`, and those writes stay
    /// even when a later statement fails.
    pub fn evaluate(&self, env: &mut Environment) -> EvalResult {
        Interpreter::new(env).eval(self)
    }

    /// Number of nodes in this tree, including `self`.
    pub fn node_count(&self) -> usize {
        // Iterative so that counting never recurses as deep as the tree.
        let mut count = 0;
        let mut pending = vec![self];
        while let Some(node) = pending.pop() {
            count += 1;
            match node {
                EvalNode::Program(statements) => pending.extend(statements),
                EvalNode::Assignment { value, .. } => pending.push(value),
                EvalNode::VariableRef { indices, .. } => pending.extend(indices),
                EvalNode::Literal(_) => {}
                EvalNode::Unary { operand, .. } => pending.push(operand),
                EvalNode::Binary { left, right, .. } => {
                    pending.push(left);
                    pending.push(right);
                }
            }
        }
        count
    }

    /// Move this node's operands into `out`, leaving it without children.
    fn detach_children(&mut self, out: &mut Vec<EvalNode>) {
        match self {
            EvalNode::Program(statements) => out.append(statements),
            EvalNode::VariableRef { indices, .. } => out.append(indices),
            EvalNode::Literal(_) => {}
            EvalNode::Assignment { value: operand, .. } | EvalNode::Unary { operand, .. } => {
                out.push(mem::replace(&mut **operand, EvalNode::int(0)));
            }
            EvalNode::Binary { left, right, .. } => {
                out.push(mem::replace(&mut **left, EvalNode::int(0)));
                out.push(mem::replace(&mut **right, EvalNode::int(0)));
            }
        }
    }
}

impl Drop for EvalNode {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        self.detach_children(&mut pending);
        while let Some(mut node) = pending.pop() {
            node.detach_children(&mut pending);
        }
    }
}

impl Clone for EvalNode {
    fn clone(&self) -> Self {
        ensure_sufficient_stack(|| match self {
            EvalNode::Program(statements) => EvalNode::Program(statements.clone()),
            EvalNode::Assignment { name, value } => EvalNode::Assignment {
                name: name.clone(),
                value: value.clone(),
            },
            EvalNode::VariableRef { name, indices } => EvalNode::VariableRef {
                name: name.clone(),
                indices: indices.clone(),
            },
            EvalNode::Literal(literal) => EvalNode::Literal(*literal),
            EvalNode::Unary { op, operand } => EvalNode::Unary {
                op: *op,
                operand: operand.clone(),
            },
            EvalNode::Binary { op, left, right } => EvalNode::Binary {
                op: *op,
                left: left.clone(),
                right: right.clone(),
            },
        })
    }
}

impl PartialEq for EvalNode {
    fn eq(&self, other: &Self) -> bool {
        ensure_sufficient_stack(|| match (self, other) {
            (EvalNode::Program(a), EvalNode::Program(b)) => a == b,
            (
                EvalNode::Assignment { name, value },
                EvalNode::Assignment {
                    name: other_name,
                    value: other_value,
                },
            ) => name == other_name && value == other_value,
            (
                EvalNode::VariableRef { name, indices },
                EvalNode::VariableRef {
                    name: other_name,
                    indices: other_indices,
                },
            ) => name == other_name && indices == other_indices,
            (EvalNode::Literal(a), EvalNode::Literal(b)) => a == b,
            (
                EvalNode::Unary { op, operand },
                EvalNode::Unary {
                    op: other_op,
                    operand: other_operand,
                },
            ) => op == other_op && operand == other_operand,
            (
                EvalNode::Binary { op, left, right },
                EvalNode::Binary {
                    op: other_op,
                    left: other_left,
                    right: other_right,
                },
            ) => op == other_op && left == other_left && right == other_right,
            _ => false,
        })
    }
}

/// S-expression form, e.g. `(program (= x 3) (+ x 1.5))`.
impl fmt::Display for EvalNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        ensure_sufficient_stack(|| self.fmt_sexpr(f))
    }
}

impl EvalNode {
    fn fmt_sexpr(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvalNode::Program(statements) => {
                f.write_str("(program")?;
                for statement in statements {
                    write!(f, " {statement}")?;
                }
                f.write_str(")")
            }
            EvalNode::Assignment { name, value } => write!(f, "(= {name} {value})"),
            EvalNode::VariableRef { name, indices } => {
                f.write_str(name)?;
                for index in indices {
                    write!(f, "[{index}]")?;
                }
                Ok(())
            }
            EvalNode::Literal(literal) => write!(f, "{}", literal.to_value()),
            EvalNode::Unary { op, operand } => write!(f, "({} {operand})", op.as_symbol()),
            EvalNode::Binary { op, left, right } => {
                write!(f, "({} {left} {right})", op.as_symbol())
            }
        }
    }
}
