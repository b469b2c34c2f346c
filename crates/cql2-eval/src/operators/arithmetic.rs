//! Arithmetic Operators
//!
//! Two Int64 operands stay integral for Plus, Minus, Mult, DivInt and Mod,
//! with overflow reported as an error. Every other numeric combination is
//! computed in double precision. Div always produces a double.

use super::{expect_arity, numeric_operand};
use crate::error::{EvalError, EvalResult};
use crate::registry::{DispatchTable, OperatorModule};
use cql2_ast::{NodeType, Operator};
use cql2_types::Value;

/// ArithExpr × {Plus, Minus, Mult, Div, DivInt, Mod, Power}
#[derive(Debug, Default, Clone, Copy)]
pub struct ArithmeticOperators;

impl OperatorModule for ArithmeticOperators {
    fn name(&self) -> &'static str {
        "arithmetic"
    }

    fn register(&self, table: &mut DispatchTable) {
        for op in [
            Operator::Plus,
            Operator::Minus,
            Operator::Mult,
            Operator::Div,
            Operator::DivInt,
            Operator::Mod,
            Operator::Power,
        ] {
            table.register(NodeType::ArithExpr, op, move |_, values, _| arithmetic(op, values));
        }
    }
}

/// Evaluate an arithmetic operator on two numeric operands
pub fn arithmetic(op: Operator, values: &[Value]) -> EvalResult<Value> {
    let name = op.name();
    expect_arity(name, 2, values)?;

    if let (Value::Int64(lhs), Value::Int64(rhs)) = (&values[0], &values[1]) {
        if let Some(result) = integer(op, *lhs, *rhs)? {
            return Ok(Value::Int64(result));
        }
    }

    let lhs = numeric_operand(name, "left hand side", &values[0])?;
    let rhs = numeric_operand(name, "right hand side", &values[1])?;
    let result = match op {
        Operator::Plus => lhs + rhs,
        Operator::Minus => lhs - rhs,
        Operator::Mult => lhs * rhs,
        Operator::Div => {
            non_zero(name, rhs)?;
            lhs / rhs
        }
        Operator::DivInt => {
            non_zero(name, rhs)?;
            (lhs / rhs).trunc()
        }
        Operator::Mod => {
            non_zero(name, rhs)?;
            lhs % rhs
        }
        Operator::Power => lhs.powf(rhs),
        other => {
            return Err(EvalError::unsupported(format!("arithmetic operator {other}")));
        }
    };
    Ok(Value::Double(result))
}

/// Integer result, or None when the operator works in double precision
fn integer(op: Operator, lhs: i64, rhs: i64) -> EvalResult<Option<i64>> {
    let name = op.name();
    let checked = match op {
        Operator::Plus => lhs.checked_add(rhs),
        Operator::Minus => lhs.checked_sub(rhs),
        Operator::Mult => lhs.checked_mul(rhs),
        Operator::DivInt => {
            if rhs == 0 {
                return Err(division_by_zero(name));
            }
            lhs.checked_div(rhs)
        }
        Operator::Mod => {
            if rhs == 0 {
                return Err(division_by_zero(name));
            }
            lhs.checked_rem(rhs)
        }
        _ => return Ok(None),
    };
    checked
        .map(Some)
        .ok_or_else(|| EvalError::invalid_argument(name, format!("{lhs} {name} {rhs} overflows int64")))
}

fn non_zero(name: &str, rhs: f64) -> EvalResult<()> {
    if rhs == 0.0 {
        return Err(division_by_zero(name));
    }
    Ok(())
}

fn division_by_zero(name: &str) -> EvalError {
    EvalError::invalid_argument(name, "division by zero")
}
