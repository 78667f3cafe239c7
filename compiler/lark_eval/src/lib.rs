//! Lark Eval - evaluation engine for lark concrete syntax trees.
//!
//! Running a tree is two stages:
//!
//! 1. [`NodeCompiler`] walks the concrete tree once, tunnelling through
//!    precedence wrappers, and produces an [`EvalNode`] tree. Which names
//!    mean what is decided by a [`DispatchTable`].
//! 2. [`Interpreter`] evaluates that tree against a caller-owned
//!    [`Environment`], yielding a [`Value`].
//!
//! The compiled tree is immutable and can be evaluated any number of times;
//! only the environment changes between runs.
//!
//! # Example
//!
//! ```text
//! let tree = lark_parse::parse_program("x = 3\ny = x * 2")?;
//! let mut env = Environment::new();
//! let value = lark_eval::execute(&tree, &mut env)?;
//! assert_eq!(value, Value::int(6));
//! ```

mod compiler;
mod environment;
pub mod errors;
mod interpreter;
mod node;
mod operators;
mod value;

pub use compiler::{Construct, DispatchTable, NodeCompiler, MAX_PASS_THROUGH};
pub use environment::Environment;
pub use errors::{CompileError, CompileResult, Error, EvalError, EvalResult};
pub use interpreter::{EvalLimits, Interpreter};
pub use node::{BinaryOp, EvalNode, Literal, UnaryOp};
pub use operators::{evaluate_binary, evaluate_unary, index_value};
pub use value::Value;

use lark_ir::CstNode;

/// Compile `tree` with the lark vocabulary and default limits.
pub fn compile(tree: &CstNode) -> CompileResult<EvalNode> {
    NodeCompiler::new().compile(tree)
}

/// Compile and evaluate `tree` against `env` with default limits.
pub fn execute(tree: &CstNode, env: &mut Environment) -> Result<Value, Error> {
    execute_with_limits(tree, env, EvalLimits::default())
}

/// Compile and evaluate `tree`, applying `limits` to both stages.
pub fn execute_with_limits(
    tree: &CstNode,
    env: &mut Environment,
    limits: EvalLimits,
) -> Result<Value, Error> {
    let program = NodeCompiler::new()
        .with_max_depth(limits.max_depth)
        .compile(tree)?;
    Ok(Interpreter::with_limits(env, limits).run(&program)?)
}

#[cfg(test)]
mod tests;
