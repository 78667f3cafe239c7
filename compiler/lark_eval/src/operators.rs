//! Operator semantics.
//!
//! Direct enum-based dispatch: the operator and value sets are closed, so
//! every combination is a match arm and anything else is a typed error.
//!
//! - Arithmetic promotes to float when either side is a float. Integer
//!   arithmetic is checked.
//! - `/` is true division and always yields a float.
//! - `and`/`or` take two already-evaluated booleans; there is no
//!   short-circuiting at this level or above it.
//! - Relational operators compare numbers only. Mixed int/float
//!   comparisons are exact, never rounded through `f64`.

use std::cmp::Ordering;

use crate::errors::{integer_overflow, type_mismatch};
use crate::{BinaryOp, EvalError, EvalResult, UnaryOp, Value};

/// Evaluate a binary operation on two evaluated operands.
#[expect(
    clippy::needless_pass_by_value,
    reason = "operands are produced by value by the interpreter"
)]
pub fn evaluate_binary(left: Value, right: Value, op: BinaryOp) -> EvalResult {
    match op {
        BinaryOp::Add | BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div => {
            eval_arithmetic(&left, &right, op)
        }
        BinaryOp::And | BinaryOp::Or => eval_logic(&left, &right, op),
        BinaryOp::Gt
        | BinaryOp::GtEq
        | BinaryOp::Eq
        | BinaryOp::LtEq
        | BinaryOp::Lt
        | BinaryOp::NotEq => eval_relational(&left, &right, op),
    }
}

/// Evaluate a unary operation on an evaluated operand.
pub fn evaluate_unary(value: Value, op: UnaryOp) -> EvalResult {
    match (value, op) {
        (Value::Int(n), UnaryOp::Neg) => n
            .checked_neg()
            .map(Value::Int)
            .ok_or_else(|| integer_overflow("negation")),
        (Value::Float(f), UnaryOp::Neg) => Ok(Value::Float(-f)),
        (Value::Bool(b), UnaryOp::Not) => Ok(Value::Bool(!b)),
        (other, UnaryOp::Neg) => Err(type_mismatch(op.as_symbol(), "number", &other)),
        (other, UnaryOp::Not) => Err(type_mismatch(op.as_symbol(), "bool", &other)),
    }
}

/// Apply one index step: `base[index]`.
pub fn index_value(base: &Value, index: &Value) -> EvalResult {
    let Value::Int(i) = *index else {
        return Err(type_mismatch("[]", "int", index));
    };
    let Value::List(items) = base else {
        return Err(EvalError::NotIndexable {
            type_name: base.type_name(),
        });
    };
    usize::try_from(i)
        .ok()
        .and_then(|i| items.get(i))
        .cloned()
        .ok_or(EvalError::IndexOutOfRange {
            index: i,
            len: items.len(),
        })
}

// Arithmetic

/// A numeric operand after the type check.
#[derive(Copy, Clone, Debug)]
enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    #[inline]
    fn from_value(value: &Value, op: BinaryOp) -> Result<Self, EvalError> {
        match value {
            Value::Int(n) => Ok(Number::Int(*n)),
            Value::Float(f) => Ok(Number::Float(*f)),
            other => Err(type_mismatch(op.as_symbol(), "number", other)),
        }
    }

    #[inline]
    #[expect(
        clippy::cast_precision_loss,
        reason = "int-to-float promotion is the language's numeric tower"
    )]
    fn to_f64(self) -> f64 {
        match self {
            Number::Int(n) => n as f64,
            Number::Float(f) => f,
        }
    }
}

fn eval_arithmetic(left: &Value, right: &Value, op: BinaryOp) -> EvalResult {
    let a = Number::from_value(left, op)?;
    let b = Number::from_value(right, op)?;

    if op == BinaryOp::Div {
        let divisor = b.to_f64();
        if divisor == 0.0 {
            return Err(EvalError::DivisionByZero);
        }
        return Ok(Value::Float(a.to_f64() / divisor));
    }

    match (a, b) {
        (Number::Int(a), Number::Int(b)) => eval_int_arithmetic(a, b, op),
        _ => Ok(Value::Float(eval_float_arithmetic(a.to_f64(), b.to_f64(), op))),
    }
}

fn eval_int_arithmetic(a: i64, b: i64, op: BinaryOp) -> EvalResult {
    let (result, operation) = match op {
        BinaryOp::Add => (a.checked_add(b), "addition"),
        BinaryOp::Sub => (a.checked_sub(b), "subtraction"),
        BinaryOp::Mul => (a.checked_mul(b), "multiplication"),
        _ => unreachable_arithmetic(op),
    };
    result.map(Value::Int).ok_or_else(|| integer_overflow(operation))
}

fn eval_float_arithmetic(a: f64, b: f64, op: BinaryOp) -> f64 {
    match op {
        BinaryOp::Add => a + b,
        BinaryOp::Sub => a - b,
        BinaryOp::Mul => a * b,
        _ => unreachable_arithmetic(op),
    }
}

#[cold]
fn unreachable_arithmetic(op: BinaryOp) -> ! {
    unreachable!("{op:?} is dispatched before integer/float arithmetic")
}

#[cold]
fn unreachable_relational(op: BinaryOp) -> ! {
    unreachable!("{op:?} is not a relational operator")
}

// Logic

fn eval_logic(left: &Value, right: &Value, op: BinaryOp) -> EvalResult {
    let Value::Bool(a) = *left else {
        return Err(type_mismatch(op.as_symbol(), "bool", left));
    };
    let Value::Bool(b) = *right else {
        return Err(type_mismatch(op.as_symbol(), "bool", right));
    };
    Ok(Value::Bool(if op == BinaryOp::And { a && b } else { a || b }))
}

// Relational

fn eval_relational(left: &Value, right: &Value, op: BinaryOp) -> EvalResult {
    let a = Number::from_value(left, op)?;
    let b = Number::from_value(right, op)?;
    let ordering = match (a, b) {
        (Number::Int(a), Number::Int(b)) => Some(a.cmp(&b)),
        (Number::Int(a), Number::Float(b)) => compare_int_float(a, b),
        (Number::Float(a), Number::Int(b)) => compare_int_float(b, a).map(Ordering::reverse),
        // IEEE 754 comparison: NaN is unordered, -0.0 == 0.0
        (Number::Float(a), Number::Float(b)) => a.partial_cmp(&b),
    };
    Ok(Value::Bool(compare(ordering, op)))
}

/// Order an int against a float without rounding the int.
///
/// `None` when `f` is NaN.
fn compare_int_float(i: i64, f: f64) -> Option<Ordering> {
    // 2^63, exactly representable.
    const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;

    if f.is_nan() {
        return None;
    }
    if f >= I64_BOUND {
        return Some(Ordering::Less);
    }
    if f < -I64_BOUND {
        return Some(Ordering::Greater);
    }
    let whole = f.trunc();
    #[expect(
        clippy::cast_possible_truncation,
        reason = "whole is integral and within i64 range"
    )]
    let whole_int = whole as i64;
    match i.cmp(&whole_int) {
        // Same integer part: the fractional part decides.
        Ordering::Equal => 0.0_f64.partial_cmp(&(f - whole)),
        unequal => Some(unequal),
    }
}

fn compare(ordering: Option<Ordering>, op: BinaryOp) -> bool {
    match op {
        BinaryOp::Gt => ordering == Some(Ordering::Greater),
        BinaryOp::GtEq => matches!(ordering, Some(Ordering::Greater | Ordering::Equal)),
        BinaryOp::Eq => ordering == Some(Ordering::Equal),
        BinaryOp::LtEq => matches!(ordering, Some(Ordering::Less | Ordering::Equal)),
        BinaryOp::Lt => ordering == Some(Ordering::Less),
        BinaryOp::NotEq => ordering != Some(Ordering::Equal),
        BinaryOp::Add
        | BinaryOp::Sub
        | BinaryOp::Mul
        | BinaryOp::Div
        | BinaryOp::And
        | BinaryOp::Or => unreachable_relational(op),
    }
}
