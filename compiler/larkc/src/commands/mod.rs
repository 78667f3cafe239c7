//! Command implementations.
//!
//! Each command takes source text and returns its result as data; printing
//! and exit codes are the caller's concern.

use std::fmt::Write as _;

use lark_eval::{Environment, EvalLimits, Interpreter, NodeCompiler, Value};
use lark_ir::{CstNode, Span};
use lark_parse::{ParseError, Start, DEFAULT_MAX_DEPTH};

/// Flags shared by all commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Options {
    /// Nesting limit for parsing, compiling and evaluating.
    pub max_depth: usize,
    /// Report compiled node counts.
    pub verbose: bool,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            max_depth: DEFAULT_MAX_DEPTH,
            verbose: false,
        }
    }
}

/// Split `args` into options and positional arguments.
pub fn parse_options(args: &[String]) -> Result<(Options, Vec<String>), String> {
    let mut options = Options::default();
    let mut positional = Vec::new();
    for arg in args {
        if let Some(value) = arg.strip_prefix("--max-depth=") {
            options.max_depth = value
                .parse()
                .map_err(|_| format!("invalid value for --max-depth: '{value}'"))?;
        } else if arg == "--verbose" || arg == "-v" {
            options.verbose = true;
        } else if arg.starts_with("--") {
            return Err(format!("unknown option '{arg}'"));
        } else {
            positional.push(arg.clone());
        }
    }
    Ok((options, positional))
}

/// Anything that stops a command.
#[derive(Debug, thiserror::Error)]
pub enum Failure {
    #[error("syntax error: {0}")]
    Parse(#[from] ParseError),
    #[error("compile error: {0}")]
    Compile(#[from] lark_eval::CompileError),
    #[error("runtime error: {0}")]
    Eval(#[from] lark_eval::EvalError),
}

impl Failure {
    /// Source location to highlight, when one is known.
    pub fn span(&self) -> Option<Span> {
        match self {
            Failure::Parse(error) => Some(error.span()),
            Failure::Compile(error) => error.span(),
            Failure::Eval(_) => None,
        }
    }
}

/// Result of running source text.
#[derive(Debug)]
pub struct Outcome {
    pub value: Value,
    pub env: Environment,
    /// Size of the compiled tree.
    pub nodes: usize,
}

impl Outcome {
    /// The value, then each binding as `name = value` sorted by name.
    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", self.value);
        for (name, value) in self.env.sorted() {
            let _ = writeln!(out, "{name} = {value}");
        }
        out
    }
}

/// `larkc run`: execute a program against a fresh environment.
#[tracing::instrument(level = "debug", skip_all)]
pub fn run_source(source: &str, options: &Options) -> Result<Outcome, Failure> {
    execute(source, Start::Program, options)
}

/// `larkc eval`: evaluate a single expression.
#[tracing::instrument(level = "debug", skip_all)]
pub fn eval_source(source: &str, options: &Options) -> Result<Outcome, Failure> {
    execute(source, Start::Expression, options)
}

/// `larkc tree`: the concrete tree in indented form.
pub fn tree_source(source: &str, options: &Options) -> Result<String, Failure> {
    Ok(parse(source, Start::Program, options)?.pretty())
}

fn parse(source: &str, start: Start, options: &Options) -> Result<CstNode, Failure> {
    Ok(lark_parse::parse_with_limit(source, start, options.max_depth)?)
}

fn execute(source: &str, start: Start, options: &Options) -> Result<Outcome, Failure> {
    let tree = parse(source, start, options)?;
    let program = NodeCompiler::new()
        .with_max_depth(options.max_depth)
        .compile(&tree)?;
    let nodes = program.node_count();

    let mut env = Environment::new();
    let limits = EvalLimits::default().with_max_depth(options.max_depth);
    let value = Interpreter::with_limits(&mut env, limits).run(&program)?;
    Ok(Outcome { value, env, nodes })
}

#[cfg(test)]
mod tests;
