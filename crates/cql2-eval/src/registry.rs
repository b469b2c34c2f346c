//! Operator dispatch table for the CQL2 evaluation engine
//!
//! Behavior is selected by the `(NodeType, Operator)` pair of a node. Each
//! operator family lives in its own [`OperatorModule`] that installs its
//! handlers into a [`DispatchTable`] once, before any evaluation.

use crate::context::EvaluationContext;
use crate::error::EvalResult;
use cql2_ast::{AstNode, NodeType, Operator};
use cql2_types::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// Handler invoked with the node, its children's computed values in child
/// order, and the evaluation context
pub type Handler =
    Arc<dyn Fn(&AstNode, &[Value], &EvaluationContext<'_>) -> EvalResult<Value> + Send + Sync>;

/// A family of operators that registers its handlers in one step
pub trait OperatorModule {
    /// Name used in diagnostics
    fn name(&self) -> &'static str;

    /// Install this module's handlers
    fn register(&self, table: &mut DispatchTable);
}

/// Mapping from `(NodeType, Operator)` to a handler.
///
/// Populated before evaluation starts and read-only afterwards; lookups
/// from many threads need no locking.
#[derive(Default, Clone)]
pub struct DispatchTable {
    handlers: HashMap<(NodeType, Operator), Handler>,
}

impl DispatchTable {
    /// Create a new empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler; a later registration for the same pair replaces
    /// the earlier one
    pub fn register<F>(&mut self, kind: NodeType, op: Operator, handler: F)
    where
        F: Fn(&AstNode, &[Value], &EvaluationContext<'_>) -> EvalResult<Value> + Send + Sync + 'static,
    {
        if self.handlers.insert((kind, op), Arc::new(handler)).is_some() {
            log::warn!("Replacing evaluator for operator {op} in node type {kind}");
        }
    }

    /// Install every handler of a module
    pub fn install(&mut self, module: &dyn OperatorModule) {
        log::debug!("Installing operator module {}", module.name());
        module.register(self);
    }

    /// Get the handler for a pair
    pub fn get(&self, kind: NodeType, op: Operator) -> Option<&Handler> {
        self.handlers.get(&(kind, op))
    }

    /// Check if a pair has a handler
    pub fn contains(&self, kind: NodeType, op: Operator) -> bool {
        self.handlers.contains_key(&(kind, op))
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl std::fmt::Debug for DispatchTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut keys: Vec<_> = self.handlers.keys().collect();
        keys.sort();
        f.debug_struct("DispatchTable").field("handlers", &keys).finish()
    }
}
