//! Property-based tests for evaluation.

use proptest::prelude::*;

use super::{eval, eval_in, run_in};
use crate::{Environment, Value};

const BOUND: i64 = 1_000_000_000_000;

/// Integers small enough that sums and differences never overflow.
fn arb_int() -> impl Strategy<Value = i64> {
    -BOUND..=BOUND
}

/// Variable names that are not keywords.
fn arb_name() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9]{0,6}".prop_filter("keyword", |s| !matches!(s.as_str(), "and" | "or" | "not"))
}

fn arb_number() -> impl Strategy<Value = Value> {
    prop_oneof![
        arb_int().prop_map(Value::int),
        (-1.0e6f64..1.0e6).prop_map(Value::float),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn addition_matches_host(a in arb_int(), b in arb_int()) {
        prop_assert_eq!(eval(&format!("{a} + {b}")), Ok(Value::int(a + b)));
    }

    #[test]
    fn subtraction_matches_host(a in arb_int(), b in arb_int()) {
        prop_assert_eq!(eval(&format!("{a} - {b}")), Ok(Value::int(a - b)));
    }

    #[test]
    fn negation_ignores_grouping(x in arb_number()) {
        let mut env: Environment = [("x", x)].into_iter().collect();
        prop_assert_eq!(eval_in("-(x)", &mut env), eval_in("-x", &mut env));
    }

    #[test]
    fn division_always_yields_float(a in arb_int(), b in arb_int()) {
        prop_assume!(b != 0);
        let result = eval(&format!("{a} / {b}"));
        prop_assert!(matches!(result, Ok(Value::Float(_))), "{:?}", result);
    }

    #[test]
    fn comparisons_are_complementary(a in arb_int(), b in arb_int()) {
        let lt = eval(&format!("{a} < {b}"));
        let ge = eval(&format!("not {a} >= {b}"));
        prop_assert_eq!(lt, ge);
        let eq = eval(&format!("{a} == {b}"));
        let ne = eval(&format!("not {a} != {b}"));
        prop_assert_eq!(eq, ne);
    }

    #[test]
    fn logic_matches_host(a in any::<bool>(), b in any::<bool>()) {
        let text = |v: bool| if v { "True" } else { "False" };
        prop_assert_eq!(eval(&format!("{} and {}", text(a), text(b))), Ok(Value::Bool(a && b)));
        prop_assert_eq!(eval(&format!("{} or {}", text(a), text(b))), Ok(Value::Bool(a || b)));
    }

    #[test]
    fn assignment_round_trips_through_environment(name in arb_name(), n in arb_int()) {
        let mut env = Environment::new();
        prop_assert_eq!(run_in(&format!("{name} = {n}\n{name}"), &mut env), Ok(Value::int(n)));
        prop_assert_eq!(env.get(&name), Some(&Value::int(n)));
    }
}
