//! CQL2 Operator Implementations
//!
//! Each submodule is an [`OperatorModule`](crate::registry::OperatorModule)
//! covering one operator family:
//! - Logical operators (And, Or, Not)
//! - Comparison operators (Equal, Lesser, etc.)
//! - List membership (In, NotIn)
//! - Array predicates (A_Contains, A_ContainedBy, A_Equals)
//! - Spatial predicates (S_Intersects)
//! - Property access and literals
//! - Function calls and argument lists
//! - Basic predicates (IsNull, Between, Like)
//! - Arithmetic (Plus, Minus, etc.)
//! - Temporal predicates (registered as unsupported)
//!
//! Negated operators share the pure function of their positive counterpart
//! and negate its result.

pub mod arithmetic;
pub mod array;
pub mod comparison;
pub mod function;
pub mod list;
pub mod logical;
pub mod predicate;
pub mod property;
pub mod spatial;
pub mod temporal;

pub use arithmetic::ArithmeticOperators;
pub use array::ArrayOperators;
pub use comparison::ComparisonOperators;
pub use function::FunctionCalls;
pub use list::ListOperators;
pub use logical::LogicalOperators;
pub use predicate::PredicateOperators;
pub use property::PropertyOperators;
pub use spatial::SpatialOperators;
pub use temporal::TemporalOperators;

use crate::error::{EvalError, EvalResult};
use cql2_types::Value;

/// Fail unless exactly `expected` operand values were computed
pub(crate) fn expect_arity(operator: &str, expected: usize, values: &[Value]) -> EvalResult<()> {
    if values.len() != expected {
        return Err(EvalError::arity_mismatch(operator, expected, values.len()));
    }
    Ok(())
}

/// Exactly `N` Bool operands
pub(crate) fn bool_operands<const N: usize>(operator: &str, values: &[Value]) -> EvalResult<[bool; N]> {
    expect_arity(operator, N, values)?;
    let mut operands = [false; N];
    for (i, value) in values.iter().enumerate() {
        operands[i] = value.as_bool().ok_or_else(|| {
            EvalError::type_mismatch(
                operator,
                format!("value {i} of {operator} should be bool but is {}", value.type_name()),
            )
        })?;
    }
    Ok(operands)
}

/// A numeric operand widened to double; NaN is rejected
pub(crate) fn numeric_operand(operator: &str, side: &str, value: &Value) -> EvalResult<f64> {
    let number = value.as_f64().ok_or_else(|| {
        EvalError::type_mismatch(
            operator,
            format!("{side} is not int or double but {}", value.type_name()),
        )
    })?;
    if number.is_nan() {
        return Err(EvalError::type_mismatch(operator, format!("{side} is nan")));
    }
    Ok(number)
}

/// Negate a Bool; null stays null
pub(crate) fn negate(value: Value) -> Value {
    match value {
        Value::Bool(b) => Value::Bool(!b),
        other => other,
    }
}
