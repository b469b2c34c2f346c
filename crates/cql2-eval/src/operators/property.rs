//! Property access and literals

use crate::error::{EvalError, EvalResult};
use crate::context::EvaluationContext;
use crate::registry::{DispatchTable, OperatorModule};
use cql2_ast::{AstNode, NodeType, Operator};
use cql2_types::Value;

/// PropertyName and Literal leaves
#[derive(Debug, Default, Clone, Copy)]
pub struct PropertyOperators;

impl OperatorModule for PropertyOperators {
    fn name(&self) -> &'static str {
        "property"
    }

    fn register(&self, table: &mut DispatchTable) {
        table.register(NodeType::PropertyName, Operator::NullOp, |node, _, ctx| {
            property(node, ctx)
        });
        table.register(NodeType::Literal, Operator::NullOp, |node, _, _| {
            Ok(node.origin().clone())
        });
    }
}

/// Resolve the property named by the node's origin value
pub fn property(node: &AstNode, ctx: &EvaluationContext<'_>) -> EvalResult<Value> {
    let path = node.origin().as_str().ok_or_else(|| {
        EvalError::type_mismatch(
            "PropertyName",
            format!("value of property name is {} but should be string", node.origin().type_name()),
        )
    })?;
    Ok(ctx.get_property(path))
}
