//! List Membership Operators
//!
//! `expr IN (a, b, ...)` is a two-child node: the scalar expression and an
//! InList container whose children are the candidate literals. The container
//! itself evaluates to null; candidates are read from the literals' origin
//! values.

use super::negate;
use crate::error::{EvalError, EvalResult};
use crate::registry::{DispatchTable, OperatorModule};
use cql2_ast::{AstNode, NodeType, Operator};
use cql2_types::{Value, values_equal};

/// IsInListPred × {In, NotIn} and the InList container
#[derive(Debug, Default, Clone, Copy)]
pub struct ListOperators;

impl OperatorModule for ListOperators {
    fn name(&self) -> &'static str {
        "list"
    }

    fn register(&self, table: &mut DispatchTable) {
        table.register(NodeType::InList, Operator::NullOp, |_, _, _| Ok(Value::Null));
        table.register(NodeType::IsInListPred, Operator::In, |node, values, _| {
            in_list(node, values)
        });
        table.register(NodeType::IsInListPred, Operator::NotIn, |node, values, _| {
            in_list(node, values).map(negate)
        });
    }
}

/// Evaluate In.
///
/// Returns null when the tested value is null, otherwise a Bool.
pub fn in_list(node: &AstNode, values: &[Value]) -> EvalResult<Value> {
    if values.len() != 2 {
        return Err(EvalError::arity_mismatch("(NOT)IN", 2, values.len()));
    }
    if !values[1].is_null() {
        return Err(EvalError::type_mismatch(
            "(NOT)IN",
            "right hand side value of (NOT)IN should be null",
        ));
    }
    let [_, list] = node.children() else {
        return Err(EvalError::arity_mismatch(
            "(NOT)IN children",
            2,
            node.children().len(),
        ));
    };

    let needle = &values[0];
    if needle.is_null() {
        return Ok(Value::Null);
    }
    if !needle.is_scalar() {
        return Err(EvalError::type_mismatch(
            "(NOT)IN",
            format!("can not test membership of {} value", needle.type_name()),
        ));
    }

    let found = list
        .children()
        .iter()
        .any(|candidate| values_equal(needle, candidate.origin()));
    Ok(Value::Bool(found))
}
