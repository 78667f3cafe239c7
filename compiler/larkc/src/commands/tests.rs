use super::*;
use pretty_assertions::assert_eq;

fn args(list: &[&str]) -> Vec<String> {
    list.iter().map(ToString::to_string).collect()
}

#[test]
fn test_parse_options() {
    let (options, positional) = parse_options(&args(&["prog.lark", "--max-depth=50", "-v"]))
        .unwrap_or_else(|e| panic!("{e}"));
    assert_eq!(
        options,
        Options {
            max_depth: 50,
            verbose: true
        }
    );
    assert_eq!(positional, vec!["prog.lark".to_string()]);
}

#[test]
fn test_parse_options_rejects_bad_input() {
    assert!(parse_options(&args(&["--max-depth=lots"])).is_err());
    assert!(parse_options(&args(&["--optimize"])).is_err());
    // A leading minus is an expression, not a flag
    let (_, positional) =
        parse_options(&args(&["-5 + 3"])).unwrap_or_else(|e| panic!("{e}"));
    assert_eq!(positional, vec!["-5 + 3".to_string()]);
}

#[test]
fn test_run_renders_value_and_environment() {
    let outcome = run_source("y = 4\nx = 3\nz = x + y", &Options::default())
        .unwrap_or_else(|e| panic!("{e}"));
    assert_eq!(outcome.render(), "7\nx = 3\ny = 4\nz = 7\n");
    assert!(outcome.nodes > 0);
}

#[test]
fn test_eval_expression() {
    let outcome = eval_source("4 / 2 == 2", &Options::default()).unwrap_or_else(|e| panic!("{e}"));
    assert_eq!(outcome.value, Value::Bool(true));
    assert_eq!(outcome.render(), "True\n");
}

#[test]
fn test_empty_program_renders_none() {
    let outcome = run_source("", &Options::default()).unwrap_or_else(|e| panic!("{e}"));
    assert_eq!(outcome.render(), "None\n");
}

#[test]
fn test_tree() {
    let tree = tree_source("7", &Options::default()).unwrap_or_else(|e| panic!("{e}"));
    assert!(tree.starts_with("multi_line_block\n  line\n    logic_expr\n"));
    assert!(tree.ends_with("atom\t7\n"));
}

#[test]
fn test_failures_carry_stage_and_span() {
    let options = Options::default();

    let failure = run_source("x = (1 + ", &options).err();
    assert!(matches!(failure, Some(Failure::Parse(_))));

    let failure = run_source("1 + 99999999999999999999", &options).err();
    assert!(matches!(failure, Some(Failure::Compile(_))));
    assert_eq!(failure.and_then(|f| f.span()), Some(Span::new(4, 24)));

    let failure = run_source("a = 1\nb", &options).err();
    assert!(matches!(
        failure,
        Some(Failure::Eval(lark_eval::EvalError::UndefinedVariable { .. }))
    ));
}

#[test]
fn test_max_depth_applies() {
    let options = Options {
        max_depth: 8,
        verbose: false,
    };
    let source = format!("{}1{}", "(".repeat(10), ")".repeat(10));
    assert!(matches!(
        run_source(&source, &options),
        Err(Failure::Parse(ParseError::NestingTooDeep { limit: 8, .. }))
    ));
}
