//! Logical Operators
//!
//! Plain two-valued boolean algebra over Bool operands. Both operands of
//! And/Or are computed before the operator runs, so an error in either side
//! always surfaces.

use super::bool_operands;
use crate::error::EvalResult;
use crate::registry::{DispatchTable, OperatorModule};
use cql2_ast::{NodeType, Operator};
use cql2_types::Value;

/// BoolExpr × {And, Or, Not}
#[derive(Debug, Default, Clone, Copy)]
pub struct LogicalOperators;

impl OperatorModule for LogicalOperators {
    fn name(&self) -> &'static str {
        "logical"
    }

    fn register(&self, table: &mut DispatchTable) {
        table.register(NodeType::BoolExpr, Operator::And, |_, values, _| {
            and(values).map(Value::Bool)
        });
        table.register(NodeType::BoolExpr, Operator::Or, |_, values, _| {
            or(values).map(Value::Bool)
        });
        table.register(NodeType::BoolExpr, Operator::Not, |_, values, _| {
            not(values).map(Value::Bool)
        });
    }
}

/// Evaluate And
pub fn and(values: &[Value]) -> EvalResult<bool> {
    let [lhs, rhs] = bool_operands("AND", values)?;
    Ok(lhs && rhs)
}

/// Evaluate Or
pub fn or(values: &[Value]) -> EvalResult<bool> {
    let [lhs, rhs] = bool_operands("OR", values)?;
    Ok(lhs || rhs)
}

/// Evaluate Not
pub fn not(values: &[Value]) -> EvalResult<bool> {
    let [operand] = bool_operands("NOT", values)?;
    Ok(!operand)
}
