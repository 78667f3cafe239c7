//! Tests for operator implementations on values.

use pretty_assertions::assert_eq;

use crate::{evaluate_binary, evaluate_unary, index_value, BinaryOp, EvalError, UnaryOp, Value};

#[test]
fn test_int_operations() {
    assert_eq!(
        evaluate_binary(Value::int(2), Value::int(3), BinaryOp::Add),
        Ok(Value::int(5))
    );
    assert_eq!(
        evaluate_binary(Value::int(5), Value::int(3), BinaryOp::Sub),
        Ok(Value::int(2))
    );
    assert_eq!(
        evaluate_binary(Value::int(2), Value::int(3), BinaryOp::Mul),
        Ok(Value::int(6))
    );
    assert_eq!(
        evaluate_binary(Value::int(7), Value::int(2), BinaryOp::Div),
        Ok(Value::float(3.5))
    );
}

#[test]
fn test_exact_quotient_is_still_float() {
    assert_eq!(
        evaluate_binary(Value::int(4), Value::int(2), BinaryOp::Div),
        Ok(Value::float(2.0))
    );
}

#[test]
fn test_promotion() {
    assert_eq!(
        evaluate_binary(Value::int(1), Value::float(0.5), BinaryOp::Add),
        Ok(Value::float(1.5))
    );
    assert_eq!(
        evaluate_binary(Value::float(2.5), Value::int(2), BinaryOp::Mul),
        Ok(Value::float(5.0))
    );
}

#[test]
fn test_division_by_zero() {
    assert_eq!(
        evaluate_binary(Value::int(1), Value::int(0), BinaryOp::Div),
        Err(EvalError::DivisionByZero)
    );
    assert_eq!(
        evaluate_binary(Value::float(1.0), Value::float(-0.0), BinaryOp::Div),
        Err(EvalError::DivisionByZero)
    );
}

#[test]
fn test_overflow_is_an_error() {
    assert_eq!(
        evaluate_binary(Value::int(i64::MIN), Value::int(1), BinaryOp::Sub),
        Err(EvalError::IntegerOverflow {
            operation: "subtraction"
        })
    );
    assert_eq!(
        evaluate_unary(Value::int(i64::MIN), UnaryOp::Neg),
        Err(EvalError::IntegerOverflow {
            operation: "negation"
        })
    );
}

#[test]
fn test_comparisons() {
    let cases = [
        (BinaryOp::Gt, [false, false, true]),
        (BinaryOp::GtEq, [false, true, true]),
        (BinaryOp::Eq, [false, true, false]),
        (BinaryOp::LtEq, [true, true, false]),
        (BinaryOp::Lt, [true, false, false]),
        (BinaryOp::NotEq, [true, false, true]),
    ];
    for (op, expected) in cases {
        for (rhs, want) in [3, 2, 1].into_iter().zip(expected) {
            assert_eq!(
                evaluate_binary(Value::int(2), Value::int(rhs), op),
                Ok(Value::Bool(want)),
                "2 {} {rhs}",
                op.as_symbol()
            );
        }
    }
}

#[test]
fn test_nan_is_unordered() {
    let nan = Value::float(f64::NAN);
    assert_eq!(
        evaluate_binary(nan.clone(), nan.clone(), BinaryOp::Eq),
        Ok(Value::Bool(false))
    );
    assert_eq!(
        evaluate_binary(nan.clone(), nan, BinaryOp::NotEq),
        Ok(Value::Bool(true))
    );
}

#[test]
fn test_mixed_comparison_is_exact() {
    // 2^53 + 1 has no f64 representation; it must not equal 2^53.
    let big = Value::int(9_007_199_254_740_993);
    let rounded = Value::float(9_007_199_254_740_992.0);
    let check = |left: &Value, right: &Value, op, want| {
        assert_eq!(
            evaluate_binary(left.clone(), right.clone(), op),
            Ok(Value::Bool(want)),
            "{left} {} {right}",
            BinaryOp::as_symbol(op)
        );
    };
    check(&big, &rounded, BinaryOp::Eq, false);
    check(&big, &rounded, BinaryOp::NotEq, true);
    check(&big, &rounded, BinaryOp::Gt, true);
    check(&rounded, &big, BinaryOp::Lt, true);
    check(&rounded, &big, BinaryOp::GtEq, false);

    // 2^63 is just above every int.
    check(&Value::int(i64::MAX), &Value::float(9_223_372_036_854_775_808.0), BinaryOp::Lt, true);
    check(&Value::int(i64::MIN), &Value::float(-9_223_372_036_854_775_808.0), BinaryOp::Eq, true);
    check(&Value::int(3), &Value::float(3.0), BinaryOp::Eq, true);
    check(&Value::int(3), &Value::float(3.5), BinaryOp::Lt, true);
    check(&Value::int(-3), &Value::float(-3.5), BinaryOp::Gt, true);
    check(&Value::int(-4), &Value::float(-3.5), BinaryOp::Lt, true);
    check(&Value::int(0), &Value::float(-0.0), BinaryOp::Eq, true);
    check(&Value::int(0), &Value::float(-0.5), BinaryOp::Gt, true);
    check(&Value::int(i64::MAX), &Value::float(f64::INFINITY), BinaryOp::Lt, true);
    check(&Value::float(f64::NEG_INFINITY), &Value::int(i64::MIN), BinaryOp::Lt, true);
    check(&Value::int(1), &Value::float(f64::NAN), BinaryOp::Eq, false);
    check(&Value::int(1), &Value::float(f64::NAN), BinaryOp::NotEq, true);
    check(&Value::float(f64::NAN), &Value::int(1), BinaryOp::GtEq, false);
}

#[test]
fn test_logic() {
    assert_eq!(
        evaluate_binary(Value::Bool(true), Value::Bool(false), BinaryOp::And),
        Ok(Value::Bool(false))
    );
    assert_eq!(
        evaluate_binary(Value::Bool(true), Value::Bool(false), BinaryOp::Or),
        Ok(Value::Bool(true))
    );
    assert_eq!(
        evaluate_binary(Value::Bool(true), Value::int(1), BinaryOp::Or),
        Err(EvalError::TypeMismatch {
            operator: "or",
            expected: "bool",
            found: "int",
        })
    );
}

#[test]
fn test_mismatch_reports_offending_operand() {
    assert_eq!(
        evaluate_binary(Value::list(vec![]), Value::int(1), BinaryOp::Add),
        Err(EvalError::TypeMismatch {
            operator: "+",
            expected: "number",
            found: "list",
        })
    );
    assert_eq!(
        evaluate_binary(Value::int(1), Value::Void, BinaryOp::Lt),
        Err(EvalError::TypeMismatch {
            operator: "<",
            expected: "number",
            found: "None",
        })
    );
}

#[test]
fn test_unary() {
    assert_eq!(evaluate_unary(Value::int(3), UnaryOp::Neg), Ok(Value::int(-3)));
    assert_eq!(
        evaluate_unary(Value::float(1.5), UnaryOp::Neg),
        Ok(Value::float(-1.5))
    );
    assert_eq!(
        evaluate_unary(Value::Bool(false), UnaryOp::Not),
        Ok(Value::Bool(true))
    );
    assert!(matches!(
        evaluate_unary(Value::float(1.0), UnaryOp::Not),
        Err(EvalError::TypeMismatch { operator: "not", .. })
    ));
}

#[test]
fn test_index_value() {
    let list = Value::list(vec![Value::int(10), Value::int(20)]);
    assert_eq!(index_value(&list, &Value::int(1)), Ok(Value::int(20)));
    assert_eq!(
        index_value(&list, &Value::int(2)),
        Err(EvalError::IndexOutOfRange { index: 2, len: 2 })
    );
    assert_eq!(
        index_value(&list, &Value::int(-1)),
        Err(EvalError::IndexOutOfRange { index: -1, len: 2 })
    );
    assert_eq!(
        index_value(&list, &Value::Bool(true)),
        Err(EvalError::TypeMismatch {
            operator: "[]",
            expected: "int",
            found: "bool",
        })
    );
    assert_eq!(
        index_value(&Value::float(1.0), &Value::int(0)),
        Err(EvalError::NotIndexable { type_name: "float" })
    );
}
