//! Basic predicates: IS NULL, BETWEEN and LIKE

use super::{expect_arity, negate, numeric_operand};
use crate::error::{EvalError, EvalResult};
use crate::registry::{DispatchTable, OperatorModule};
use cql2_ast::{NodeType, Operator};
use cql2_types::Value;
use regex::Regex;

/// IsNullPred, IsBetweenPred and IsLikePred with their negations
#[derive(Debug, Default, Clone, Copy)]
pub struct PredicateOperators;

impl OperatorModule for PredicateOperators {
    fn name(&self) -> &'static str {
        "predicate"
    }

    fn register(&self, table: &mut DispatchTable) {
        table.register(NodeType::IsNullPred, Operator::IsNull, |_, values, _| {
            is_null(values).map(Value::Bool)
        });
        table.register(NodeType::IsNullPred, Operator::IsNotNull, |_, values, _| {
            is_null(values).map(|null| Value::Bool(!null))
        });
        table.register(NodeType::IsBetweenPred, Operator::Between, |_, values, _| {
            between(values).map(Value::Bool)
        });
        table.register(NodeType::IsBetweenPred, Operator::NotBetween, |_, values, _| {
            between(values).map(Value::Bool).map(negate)
        });
        table.register(NodeType::IsLikePred, Operator::Like, |_, values, _| {
            like(values).map(Value::Bool)
        });
        table.register(NodeType::IsLikePred, Operator::NotLike, |_, values, _| {
            like(values).map(Value::Bool).map(negate)
        });
    }
}

/// Evaluate IsNull
pub fn is_null(values: &[Value]) -> EvalResult<bool> {
    expect_arity("IS NULL", 1, values)?;
    Ok(values[0].is_null())
}

/// Evaluate Between; both bounds are inclusive
pub fn between(values: &[Value]) -> EvalResult<bool> {
    expect_arity("BETWEEN", 3, values)?;
    let value = numeric_operand("BETWEEN", "value", &values[0])?;
    let low = numeric_operand("BETWEEN", "lower bound", &values[1])?;
    let high = numeric_operand("BETWEEN", "upper bound", &values[2])?;
    Ok(low <= value && value <= high)
}

/// Evaluate Like
pub fn like(values: &[Value]) -> EvalResult<bool> {
    expect_arity("LIKE", 2, values)?;
    let (Some(text), Some(pattern)) = (values[0].as_str(), values[1].as_str()) else {
        return Err(EvalError::type_mismatch(
            "LIKE",
            format!(
                "operands are {} and {} but should be strings",
                values[0].type_name(),
                values[1].type_name()
            ),
        ));
    };
    Ok(like_regex(pattern)?.is_match(text))
}

/// Translate a LIKE pattern into an anchored regex: `%` matches any run of
/// characters, `_` exactly one
fn like_regex(pattern: &str) -> EvalResult<Regex> {
    let mut source = String::with_capacity(pattern.len() + 8);
    source.push_str("(?s)^");
    let mut buf = [0u8; 4];
    for c in pattern.chars() {
        match c {
            '%' => source.push_str(".*"),
            '_' => source.push('.'),
            other => source.push_str(&regex::escape(other.encode_utf8(&mut buf))),
        }
    }
    source.push('$');
    Regex::new(&source).map_err(|e| EvalError::invalid_argument("LIKE", e.to_string()))
}
