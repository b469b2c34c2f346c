//! Spatial Operators
//!
//! Only S_Intersects has an evaluator; the geometry work itself is delegated
//! to the context's [`GeometryEngine`](cql2_types::GeometryEngine).

use super::expect_arity;
use crate::context::EvaluationContext;
use crate::error::{EvalError, EvalResult};
use crate::registry::{DispatchTable, OperatorModule};
use cql2_ast::{NodeType, Operator};
use cql2_types::{GeometryRef, Value};

/// SpatialPred × S_Intersects
#[derive(Debug, Default, Clone, Copy)]
pub struct SpatialOperators;

impl OperatorModule for SpatialOperators {
    fn name(&self) -> &'static str {
        "spatial"
    }

    fn register(&self, table: &mut DispatchTable) {
        table.register(NodeType::SpatialPred, Operator::SpatialIntersects, |_, values, ctx| {
            intersects(values, ctx).map(Value::Bool)
        });
    }
}

/// A geometry operand; bounding boxes are converted by the engine
fn geometry_operand(side: &str, value: &Value, ctx: &EvaluationContext<'_>) -> EvalResult<GeometryRef> {
    match value {
        Value::Geometry(geometry) => Ok(geometry.clone()),
        Value::BBox(bbox) => Ok(ctx.geometry().from_bbox(bbox)),
        other => Err(EvalError::type_mismatch(
            "S_Intersects",
            format!("{side} is {} but should be geometry or bbox", other.type_name()),
        )),
    }
}

/// Evaluate S_Intersects
pub fn intersects(values: &[Value], ctx: &EvaluationContext<'_>) -> EvalResult<bool> {
    expect_arity("S_Intersects", 2, values)?;
    let lhs = geometry_operand("left hand side", &values[0], ctx)?;
    let rhs = geometry_operand("right hand side", &values[1], ctx)?;
    Ok(ctx.geometry().intersects(lhs.as_ref(), rhs.as_ref())?)
}
