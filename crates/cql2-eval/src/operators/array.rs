//! Array Operators
//!
//! Arrays are compared as sets: duplicates collapse and order is ignored.
//! Set membership uses the cross-variant ordering from `cql2_types`.

use super::expect_arity;
use crate::error::{EvalError, EvalResult};
use crate::registry::{DispatchTable, OperatorModule};
use cql2_ast::{NodeType, Operator};
use cql2_types::{Value, ValueSet};

/// Array constructor and ArrayPred × {A_Equals, A_Contains, A_ContainedBy, A_Overlaps}
#[derive(Debug, Default, Clone, Copy)]
pub struct ArrayOperators;

impl OperatorModule for ArrayOperators {
    fn name(&self) -> &'static str {
        "array"
    }

    fn register(&self, table: &mut DispatchTable) {
        table.register(NodeType::Array, Operator::NullOp, |_, values, _| {
            Ok(Value::Array(values.to_vec()))
        });
        table.register(NodeType::ArrayPred, Operator::ArrayContains, |_, values, _| {
            contains(values).map(Value::Bool)
        });
        table.register(NodeType::ArrayPred, Operator::ArrayContainedBy, |_, values, _| {
            contained_by(values).map(Value::Bool)
        });
        table.register(NodeType::ArrayPred, Operator::ArrayEquals, |_, values, _| {
            equals(values).map(Value::Bool)
        });
        table.register(NodeType::ArrayPred, Operator::ArrayOverlaps, |_, _, _| {
            Err(EvalError::unsupported("array operator A_Overlaps"))
        });
    }
}

fn array_operands<'a>(operator: &str, values: &'a [Value]) -> EvalResult<(&'a [Value], &'a [Value])> {
    expect_arity(operator, 2, values)?;
    let lhs = array_operand(operator, "left hand side", &values[0])?;
    let rhs = array_operand(operator, "right hand side", &values[1])?;
    Ok((lhs, rhs))
}

fn array_operand<'a>(operator: &str, side: &str, value: &'a Value) -> EvalResult<&'a [Value]> {
    value.as_array().ok_or_else(|| {
        EvalError::type_mismatch(
            operator,
            format!("{side} is {} but should be array", value.type_name()),
        )
    })
}

/// Every element of the right array is in the left array
pub fn contains(values: &[Value]) -> EvalResult<bool> {
    let (lhs, rhs) = array_operands("A_Contains", values)?;
    if lhs.len() < rhs.len() {
        return Ok(false);
    }
    let lhs = ValueSet::from_slice(lhs);
    let rhs = ValueSet::from_slice(rhs);
    Ok(rhs.is_subset_of(&lhs))
}

/// Every element of the left array is in the right array
pub fn contained_by(values: &[Value]) -> EvalResult<bool> {
    let (lhs, rhs) = array_operands("A_ContainedBy", values)?;
    if lhs.len() > rhs.len() {
        return Ok(false);
    }
    let lhs = ValueSet::from_slice(lhs);
    let rhs = ValueSet::from_slice(rhs);
    Ok(lhs.is_subset_of(&rhs))
}

/// Both arrays hold the same set of elements
pub fn equals(values: &[Value]) -> EvalResult<bool> {
    let contains = contains(values);
    let contained_by = contained_by(values);
    Ok(contains? && contained_by?)
}
