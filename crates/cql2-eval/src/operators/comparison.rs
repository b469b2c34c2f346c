//! Comparison Operators
//!
//! Ordering comparisons widen Int64/UInt64/Double operands to double.
//! Equality additionally accepts two Bools or two Strings, and compares
//! numbers with a tolerance of [`EQUALITY_TOLERANCE`].

use super::{expect_arity, negate, numeric_operand};
use crate::error::EvalResult;
use crate::registry::{DispatchTable, OperatorModule};
use cql2_ast::{NodeType, Operator};
use cql2_types::{EQUALITY_TOLERANCE, Value};

/// BinCompPred × {Equal, NotEqual, Greater, GreaterEqual, Lesser, LesserEqual}
#[derive(Debug, Default, Clone, Copy)]
pub struct ComparisonOperators;

impl OperatorModule for ComparisonOperators {
    fn name(&self) -> &'static str {
        "comparison"
    }

    fn register(&self, table: &mut DispatchTable) {
        table.register(NodeType::BinCompPred, Operator::Equal, |_, values, _| {
            equal(values).map(Value::Bool)
        });
        table.register(NodeType::BinCompPred, Operator::NotEqual, |_, values, _| {
            equal(values).map(Value::Bool).map(negate)
        });

        let ordered: [(Operator, &'static str, fn(f64, f64) -> bool); 4] = [
            (Operator::Greater, "GREATER", |l, r| l > r),
            (Operator::GreaterEqual, "GREATER_EQUAL", |l, r| l >= r),
            (Operator::Lesser, "LESSER", |l, r| l < r),
            (Operator::LesserEqual, "LESSER_EQUAL", |l, r| l <= r),
        ];
        for (op, name, cmp) in ordered {
            table.register(NodeType::BinCompPred, op, move |_, values, _| {
                let (lhs, rhs) = numeric_operands(name, values)?;
                Ok(Value::Bool(cmp(lhs, rhs)))
            });
        }
    }
}

/// Two numeric operands widened to double
pub fn numeric_operands(operator: &str, values: &[Value]) -> EvalResult<(f64, f64)> {
    expect_arity(operator, 2, values)?;
    let lhs = numeric_operand(operator, "left hand side", &values[0])?;
    let rhs = numeric_operand(operator, "right hand side", &values[1])?;
    Ok((lhs, rhs))
}

/// Evaluate Equal.
///
/// Two Bools or two Strings compare exactly; anything else must be numeric.
pub fn equal(values: &[Value]) -> EvalResult<bool> {
    expect_arity("EQUAL", 2, values)?;
    match (&values[0], &values[1]) {
        (Value::Bool(l), Value::Bool(r)) => Ok(l == r),
        (Value::String(l), Value::String(r)) => Ok(l == r),
        _ => {
            let (lhs, rhs) = numeric_operands("EQUAL", values)?;
            Ok((lhs - rhs).abs() < EQUALITY_TOLERANCE)
        }
    }
}
