//! Multi-statement programs and environment persistence.

use pretty_assertions::assert_eq;

use super::run_in;
use crate::{execute_with_limits, Environment, Error, EvalError, EvalLimits, Value};

#[test]
fn test_assignments_visible_to_caller() {
    let mut env = Environment::new();
    assert_eq!(run_in("x=3\ny=4\nz=x+y", &mut env), Ok(Value::int(7)));
    let bindings: Vec<(&str, &Value)> = env.sorted();
    assert_eq!(
        bindings,
        vec![
            ("x", &Value::int(3)),
            ("y", &Value::int(4)),
            ("z", &Value::int(7)),
        ]
    );
}

#[test]
fn test_last_line_is_the_result() {
    let mut env = Environment::new();
    assert_eq!(run_in("5\n8", &mut env), Ok(Value::int(8)));
    assert_eq!(run_in("5+5\n3+4\n1+2", &mut env), Ok(Value::int(3)));
}

#[test]
fn test_blank_lines_are_skipped() {
    let mut env = Environment::new();
    assert_eq!(run_in("\nx = 1\n\n\nx + 1\n", &mut env), Ok(Value::int(2)));
}

#[test]
fn test_empty_program_yields_void() {
    let mut env = Environment::new();
    assert_eq!(run_in("", &mut env), Ok(Value::Void));
    assert!(env.is_empty());
}

#[test]
fn test_rebinding() {
    let mut env = Environment::new();
    assert_eq!(run_in("x = 1\nx = x + 1\nx = x * 10", &mut env), Ok(Value::int(20)));
    assert_eq!(env.len(), 1);
}

#[test]
fn test_environment_outlives_a_run() {
    let mut env = Environment::new();
    assert_eq!(run_in("total = 10", &mut env), Ok(Value::int(10)));
    assert_eq!(run_in("total = total / 4", &mut env), Ok(Value::float(2.5)));
    assert_eq!(env.get("total"), Some(&Value::float(2.5)));
}

#[test]
fn test_caller_seeded_sequence() {
    let mut env: Environment = [(
        "grid",
        Value::list(vec![
            Value::list(vec![Value::int(1), Value::int(2)]),
            Value::list(vec![Value::int(3), Value::int(4)]),
        ]),
    )]
    .into_iter()
    .collect();
    assert_eq!(
        run_in("row = 1\ngrid[row][0] + grid[0][row]", &mut env),
        Ok(Value::int(5))
    );
}

#[test]
fn test_sequence_assignment_shares_value() {
    let mut env: Environment = [("xs", Value::list(vec![Value::int(1), Value::int(2)]))]
        .into_iter()
        .collect();
    assert_eq!(
        run_in("ys = xs\nys[1]", &mut env),
        Ok(Value::int(2))
    );
    assert_eq!(env.get("ys"), env.get("xs"));
}

#[test]
fn test_partial_mutation_kept_after_error() {
    let mut env = Environment::new();
    let result = run_in("a = 1\nb = missing\nc = 3", &mut env);
    assert_eq!(
        result,
        Err(Error::Eval(EvalError::UndefinedVariable {
            name: "missing".to_string()
        }))
    );
    assert_eq!(env.get("a"), Some(&Value::int(1)));
    assert!(!env.contains("b"));
    assert!(!env.contains("c"));
}

#[test]
fn test_assignment_value_is_the_expression() {
    let mut env = Environment::new();
    assert_eq!(run_in("flag = 1 < 2", &mut env), Ok(Value::Bool(true)));
}

#[test]
fn test_depth_limit_is_reported() {
    let source = format!("{}1{}", "(".repeat(50), ")".repeat(50));
    let tree = lark_parse::parse_program(&source).unwrap_or_else(|e| panic!("{e}"));

    let mut env = Environment::new();
    let limits = EvalLimits::default().with_max_depth(20);
    assert!(matches!(
        execute_with_limits(&tree, &mut env, limits),
        Err(Error::Compile(crate::CompileError::StackDepthExceeded { limit: 20 }))
    ));

    let mut node = crate::EvalNode::int(1);
    for _ in 0..30 {
        node = crate::EvalNode::unary(crate::UnaryOp::Neg, node);
    }
    let result = crate::Interpreter::with_limits(&mut env, limits).run(&node);
    assert_eq!(result, Err(EvalError::StackDepthExceeded { limit: 20 }));
}

#[test]
fn test_deep_nesting_within_default_limit() {
    let source = format!("{}7{}", "(".repeat(200), ")".repeat(200));
    let mut env = Environment::new();
    assert_eq!(run_in(&source, &mut env), Ok(Value::int(7)));
}

/// Parse, compile and run `source` with default limits, then drop both trees.
fn run_and_drop(source: &str) -> Result<Value, Error> {
    let tree = lark_parse::parse_program(source).unwrap_or_else(|e| panic!("{e}"));
    let program = crate::compile(&tree)?;
    drop(tree);
    let value = program.evaluate(&mut Environment::new())?;
    drop(program);
    Ok(value)
}

#[test]
fn test_parentheses_near_default_limit() {
    // Two parser levels per pair of parentheses.
    let source = format!("{}7{}", "(".repeat(4_990), ")".repeat(4_990));
    assert_eq!(run_and_drop(&source), Ok(Value::int(7)));
}

#[test]
fn test_not_chain_near_default_limit() {
    let source = format!("{}True", "not ".repeat(9_990));
    assert_eq!(run_and_drop(&source), Ok(Value::Bool(true)));
}

#[test]
fn test_negated_groups_near_default_limit() {
    // `-(-(...(1)...))`, three parser levels each.
    let source = format!("{}1{}", "-(".repeat(3_301), ")".repeat(3_301));
    assert_eq!(run_and_drop(&source), Ok(Value::int(-1)));
}

#[test]
fn test_long_operator_chain_near_default_limit() {
    let source = vec!["1"; 9_990].join("+");
    assert_eq!(run_and_drop(&source), Ok(Value::int(9_990)));

    // `2 * 1 - 1 + 2 * 1 - 1 + ... + 2`: two sum operators per separator.
    let source = vec!["2"; 3_000].join(" * 1 - 1 + ");
    assert_eq!(run_and_drop(&source), Ok(Value::int(3_001)));
}

#[test]
fn test_operator_chain_beyond_default_limit_is_an_error() {
    let source = vec!["1"; 20_000].join("+");
    assert!(matches!(
        lark_parse::parse_program(&source),
        Err(lark_parse::ParseError::NestingTooDeep {
            limit: lark_parse::DEFAULT_MAX_DEPTH,
            ..
        })
    ));

    let source = vec!["True"; 20_000].join(" and ");
    assert!(matches!(
        lark_parse::parse_program(&source),
        Err(lark_parse::ParseError::NestingTooDeep { .. })
    ));
}

#[test]
fn test_nesting_beyond_default_limit_is_an_error() {
    let source = format!("{}7{}", "(".repeat(5_001), ")".repeat(5_001));
    assert!(matches!(
        lark_parse::parse_program(&source),
        Err(lark_parse::ParseError::NestingTooDeep { .. })
    ));

    // A tree built directly is bounded by the compiler instead.
    let mut tree = lark_ir::CstNode::terminal(lark_ir::grammar::terminal::TRUE, "True");
    for _ in 0..10_001 {
        tree = lark_ir::CstNode::rule(lark_ir::grammar::rule::NOT_OP, vec![tree]);
    }
    assert!(matches!(
        crate::compile(&tree),
        Err(crate::CompileError::StackDepthExceeded { limit: 10_000 })
    ));

    // And a node tree built directly by the interpreter.
    let mut node = crate::EvalNode::bool(true);
    for _ in 0..10_001 {
        node = crate::EvalNode::unary(crate::UnaryOp::Not, node);
    }
    assert_eq!(
        node.evaluate(&mut Environment::new()),
        Err(EvalError::StackDepthExceeded { limit: 10_000 })
    );
}

#[test]
fn test_compiled_tree_is_reusable() {
    let tree = lark_parse::parse_program("n = n + 1").unwrap_or_else(|e| panic!("{e}"));
    let program = crate::compile(&tree).unwrap_or_else(|e| panic!("{e}"));
    let mut env: Environment = [("n", Value::int(0))].into_iter().collect();
    for _ in 0..3 {
        program
            .evaluate(&mut env)
            .unwrap_or_else(|e| panic!("{e}"));
    }
    assert_eq!(env.get("n"), Some(&Value::int(3)));
}
