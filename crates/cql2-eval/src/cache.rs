//! Per-node results of an evaluation

use cql2_ast::NodeId;
use cql2_types::Value;
use std::collections::HashMap;

/// Computed value of every node visited by an evaluation, keyed by node id.
///
/// The cache is owned by the caller so the same tree can be evaluated
/// concurrently against different records, each with its own cache.
#[derive(Debug, Default, Clone)]
pub struct EvaluationCache {
    values: HashMap<NodeId, Value>,
}

impl EvaluationCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Computed value of a node, if it was evaluated
    pub fn get(&self, id: NodeId) -> Option<&Value> {
        self.values.get(&id)
    }

    /// Record the computed value of a node
    pub fn insert(&mut self, id: NodeId, value: Value) {
        self.values.insert(id, value);
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Forget all values before reusing the cache for another record
    pub fn clear(&mut self) {
        self.values.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Value)> {
        self.values.iter().map(|(id, value)| (*id, value))
    }
}
