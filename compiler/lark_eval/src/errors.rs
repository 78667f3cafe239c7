//! Error types for compilation and evaluation.
//!
//! Compilation fails when the concrete tree does not fit the dispatch
//! table; evaluation fails on a runtime condition of the program. Both are
//! deterministic for a given input and end the current compile or run.
//! Neither is recovered from: statements that ran before an evaluation
//! error keep their effect on the environment.

use lark_ir::Span;
use lark_stack::DepthExceeded;

/// Result of evaluation.
pub type EvalResult = Result<crate::Value, EvalError>;

/// Result of compilation.
pub type CompileResult<T> = Result<T, CompileError>;

/// The concrete tree could not be turned into evaluation nodes.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CompileError {
    /// A terminal whose kind has no entry in the dispatch table.
    #[error("no evaluation rule for terminal `{kind}`")]
    UnmappedTerminal { kind: String, span: Span },

    /// An unmapped rule that cannot be tunnelled through.
    #[error("rule `{rule}` has no evaluation rule and {children} children; pass-through requires exactly one")]
    AmbiguousPassThrough {
        rule: String,
        children: usize,
        span: Option<Span>,
    },

    /// A chain of pass-through rules longer than the compiler accepts.
    #[error("pass-through chain longer than {limit} rules at `{rule}`")]
    PassThroughTooDeep { rule: String, limit: usize },

    /// A mapped rule whose children do not fit its constructor.
    #[error("malformed `{rule}` node: {reason}")]
    MalformedNode {
        rule: String,
        reason: &'static str,
        span: Option<Span>,
    },

    /// Terminal text that does not parse as its literal kind.
    #[error("invalid {kind} literal `{text}`")]
    InvalidLiteral {
        kind: &'static str,
        text: String,
        span: Span,
    },

    /// The tree is nested deeper than the configured limit.
    #[error("tree nested too deeply to compile (limit {limit})")]
    StackDepthExceeded { limit: usize },
}

impl CompileError {
    /// Source location, when the offending node carries one.
    pub fn span(&self) -> Option<Span> {
        match self {
            CompileError::UnmappedTerminal { span, .. } | CompileError::InvalidLiteral { span, .. } => {
                Some(*span)
            }
            CompileError::AmbiguousPassThrough { span, .. } | CompileError::MalformedNode { span, .. } => {
                *span
            }
            CompileError::PassThroughTooDeep { .. } | CompileError::StackDepthExceeded { .. } => None,
        }
    }
}

impl From<DepthExceeded> for CompileError {
    fn from(exceeded: DepthExceeded) -> Self {
        CompileError::StackDepthExceeded {
            limit: exceeded.limit,
        }
    }
}

/// A program failed while running.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EvalError {
    #[error("undefined variable: {name}")]
    UndefinedVariable { name: String },

    #[error("index {index} out of range for sequence of length {len}")]
    IndexOutOfRange { index: i64, len: usize },

    #[error("cannot index into a value of type {type_name}")]
    NotIndexable { type_name: &'static str },

    /// An operand of the wrong kind; `operator` is the source-level symbol.
    #[error("type mismatch in `{operator}`: expected {expected}, got {found}")]
    TypeMismatch {
        operator: &'static str,
        expected: &'static str,
        found: &'static str,
    },

    #[error("division by zero")]
    DivisionByZero,

    #[error("integer overflow in {operation}")]
    IntegerOverflow { operation: &'static str },

    #[error("evaluation nested too deeply (limit {limit})")]
    StackDepthExceeded { limit: usize },
}

impl From<DepthExceeded> for EvalError {
    fn from(exceeded: DepthExceeded) -> Self {
        EvalError::StackDepthExceeded {
            limit: exceeded.limit,
        }
    }
}

// Constructors used across the evaluator

#[cold]
pub(crate) fn type_mismatch(operator: &'static str, expected: &'static str, found: &crate::Value) -> EvalError {
    EvalError::TypeMismatch {
        operator,
        expected,
        found: found.type_name(),
    }
}

#[cold]
pub(crate) fn undefined_variable(name: &str) -> EvalError {
    EvalError::UndefinedVariable {
        name: name.to_string(),
    }
}

#[cold]
pub(crate) fn integer_overflow(operation: &'static str) -> EvalError {
    EvalError::IntegerOverflow { operation }
}

/// Either stage of running a concrete tree.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Compile(#[from] CompileError),
    #[error(transparent)]
    Eval(#[from] EvalError),
}
