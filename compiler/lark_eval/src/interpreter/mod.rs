//! Tree-walking interpreter for evaluation nodes.
//!
//! Evaluation is a synchronous depth-first walk. Every recursive step goes
//! through [`Interpreter::eval`], which enters the depth guard and grows
//! the native stack if needed before dispatching on the node.

use lark_stack::{ensure_sufficient_stack, DepthGuard, DEFAULT_MAX_DEPTH};

use crate::errors::undefined_variable;
use crate::{evaluate_binary, evaluate_unary, index_value, Environment, EvalNode, EvalResult, Value};

/// Resource limits for one run.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct EvalLimits {
    /// Maximum nesting of evaluation steps.
    pub max_depth: usize,
}

impl EvalLimits {
    #[must_use]
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

impl Default for EvalLimits {
    fn default() -> Self {
        EvalLimits {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Evaluates nodes against a borrowed environment.
pub struct Interpreter<'env> {
    env: &'env mut Environment,
    depth: DepthGuard,
}

impl<'env> Interpreter<'env> {
    /// Interpreter with the default limits.
    pub fn new(env: &'env mut Environment) -> Self {
        Self::with_limits(env, EvalLimits::default())
    }

    pub fn with_limits(env: &'env mut Environment, limits: EvalLimits) -> Self {
        Interpreter {
            env,
            depth: DepthGuard::new(limits.max_depth),
        }
    }

    /// The environment as it stands.
    pub fn env(&self) -> &Environment {
        &*self.env
    }

    /// Run a compiled program.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn run(&mut self, program: &EvalNode) -> EvalResult {
        let result = self.eval(program);
        match &result {
            Ok(value) => tracing::debug!(%value, bindings = self.env.len(), "run finished"),
            Err(error) => tracing::debug!(%error, "run failed"),
        }
        result
    }

    /// Evaluate one node.
    pub fn eval(&mut self, node: &EvalNode) -> EvalResult {
        self.depth.enter()?;
        let result = ensure_sufficient_stack(|| self.eval_inner(node));
        self.depth.exit();
        result
    }

    fn eval_inner(&mut self, node: &EvalNode) -> EvalResult {
        match node {
            EvalNode::Program(statements) => {
                let mut last = Value::Void;
                for statement in statements {
                    last = self.eval(statement)?;
                }
                Ok(last)
            }
            EvalNode::Assignment { name, value } => {
                let value = self.eval(value)?;
                tracing::trace!(%name, %value, "assign");
                self.env.assign(name.as_str(), value.clone());
                Ok(value)
            }
            EvalNode::VariableRef { name, indices } => {
                let mut base = self
                    .env
                    .get(name)
                    .cloned()
                    .ok_or_else(|| undefined_variable(name))?;
                for index in indices {
                    let index = self.eval(index)?;
                    base = index_value(&base, &index)?;
                }
                Ok(base)
            }
            EvalNode::Literal(literal) => Ok(literal.to_value()),
            EvalNode::Unary { op, operand } => {
                let operand = self.eval(operand)?;
                evaluate_unary(operand, *op)
            }
            // Both sides always run, including for `and`/`or`.
            EvalNode::Binary { op, left, right } => {
                let left = self.eval(left)?;
                let right = self.eval(right)?;
                evaluate_binary(left, right, *op)
            }
        }
    }
}
