//! Temporal predicates
//!
//! The operators are registered so they fail with a clear message instead of
//! an unknown-operator error; no temporal semantics are implemented.

use crate::error::EvalError;
use crate::registry::{DispatchTable, OperatorModule};
use cql2_ast::{NodeType, Operator};

/// TemporalPred × T_*
#[derive(Debug, Default, Clone, Copy)]
pub struct TemporalOperators;

impl OperatorModule for TemporalOperators {
    fn name(&self) -> &'static str {
        "temporal"
    }

    fn register(&self, table: &mut DispatchTable) {
        for op in Operator::TEMPORAL {
            table.register(NodeType::TemporalPred, op, move |_, _, _| {
                Err(EvalError::unsupported(format!("temporal operator {op}")))
            });
        }
    }
}
