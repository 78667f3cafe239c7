//! End-to-end suites: source text through `lark_parse`, then compile and
//! evaluate.

mod operators_tests;
mod program_tests;
mod property_tests;

use lark_parse::Start;

use crate::{Environment, Error, Value};

/// Evaluate one expression against `env`.
fn eval_in(source: &str, env: &mut Environment) -> Result<Value, Error> {
    run_from(source, Start::Expression, env)
}

/// Evaluate one expression against an empty environment.
fn eval(source: &str) -> Result<Value, Error> {
    eval_in(source, &mut Environment::new())
}

/// Run a newline-separated program against `env`.
fn run_in(source: &str, env: &mut Environment) -> Result<Value, Error> {
    run_from(source, Start::Program, env)
}

fn run_from(source: &str, start: Start, env: &mut Environment) -> Result<Value, Error> {
    let tree = lark_parse::parse(source, start)
        .unwrap_or_else(|e| panic!("parse of {source:?} failed: {e}"));
    crate::execute(&tree, env)
}
