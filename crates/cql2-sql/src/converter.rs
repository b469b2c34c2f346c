//! The SQL converter dispatch table and tree walk

use crate::error::{SqlError, SqlResult};
use crate::render;
use cql2_ast::{AstNode, NodeType, Operator};
use std::collections::HashMap;
use std::ops::RangeInclusive;
use std::sync::Arc;

/// Default maximum tree depth
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// Renderer invoked with the node and the SQL of its children in child order
pub type Renderer = Arc<dyn Fn(&AstNode, &[String]) -> String + Send + Sync>;

#[derive(Clone)]
struct SqlRule {
    arity: RangeInclusive<usize>,
    render: Renderer,
}

/// Converts a tree into a SQL boolean expression for a `WHERE` clause.
///
/// Rendering is a pure post-order walk: each node's renderer receives the
/// already-rendered SQL of its children. Renderers declare how many children
/// they accept; the count is checked before a renderer runs.
#[derive(Clone)]
pub struct SqlConverter {
    rules: HashMap<(NodeType, Operator), SqlRule>,
    max_depth: usize,
}

impl Default for SqlConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl SqlConverter {
    /// Create a converter with renderers for every supported node
    pub fn new() -> Self {
        let mut converter = Self::empty();
        render::register_standard(&mut converter);
        converter
    }

    /// Create a converter without any renderers
    pub fn empty() -> Self {
        Self {
            rules: HashMap::new(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Limit the depth of trees the converter accepts
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Register a renderer accepting `arity` children; a later registration
    /// for the same pair replaces the earlier one
    pub fn register<F>(&mut self, kind: NodeType, op: Operator, arity: RangeInclusive<usize>, render: F)
    where
        F: Fn(&AstNode, &[String]) -> String + Send + Sync + 'static,
    {
        let rule = SqlRule {
            arity,
            render: Arc::new(render),
        };
        if self.rules.insert((kind, op), rule).is_some() {
            log::warn!("Replacing sql converter for operator {op} in node type {kind}");
        }
    }

    /// Check if a pair has a renderer
    pub fn contains(&self, kind: NodeType, op: Operator) -> bool {
        self.rules.contains_key(&(kind, op))
    }

    /// Render `root` as a SQL boolean expression
    pub fn convert(&self, root: &AstNode) -> SqlResult<String> {
        self.convert_node(root, 0)
    }

    fn convert_node(&self, node: &AstNode, depth: usize) -> SqlResult<String> {
        if depth > self.max_depth {
            return Err(SqlError::RecursionLimit {
                limit: self.max_depth,
            });
        }

        let (kind, op) = (node.kind(), node.op());
        let rule = self
            .rules
            .get(&(kind, op))
            .ok_or(SqlError::UnknownOperator { kind, operator: op })?;
        let found = node.children().len();
        if !rule.arity.contains(&found) {
            return Err(SqlError::ArityMismatch {
                kind,
                operator: op,
                expected: describe_arity(&rule.arity),
                found,
            });
        }

        let children = node
            .children()
            .iter()
            .map(|child| self.convert_node(child, depth + 1))
            .collect::<SqlResult<Vec<_>>>()?;
        Ok((rule.render)(node, &children))
    }
}

impl std::fmt::Debug for SqlConverter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut keys: Vec<_> = self.rules.keys().collect();
        keys.sort();
        f.debug_struct("SqlConverter")
            .field("rules", &keys)
            .field("max_depth", &self.max_depth)
            .finish()
    }
}

fn describe_arity(arity: &RangeInclusive<usize>) -> String {
    match (*arity.start(), *arity.end()) {
        (min, max) if min == max => min.to_string(),
        (min, usize::MAX) => format!("at least {min}"),
        (min, max) => format!("{min} to {max}"),
    }
}
