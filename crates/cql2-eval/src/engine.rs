//! CQL2 Evaluation Engine
//!
//! The engine walks a tree bottom-up: all children are evaluated first, in
//! order, and their values are handed to the handler registered for the
//! node's `(NodeType, Operator)` pair. There is no short-circuiting; both
//! operands of And/Or are always computed. The first error aborts the walk.

use crate::cache::EvaluationCache;
use crate::context::EvaluationContext;
use crate::error::{EvalError, EvalResult};
use crate::functions::FunctionRegistry;
use crate::operators::{
    ArithmeticOperators, ArrayOperators, ComparisonOperators, FunctionCalls, ListOperators,
    LogicalOperators, PredicateOperators, PropertyOperators, SpatialOperators, TemporalOperators,
};
use crate::registry::{DispatchTable, OperatorModule};
use cql2_ast::AstNode;
use cql2_types::Value;
use smallvec::SmallVec;
use std::sync::Arc;

/// Default maximum tree depth
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// Engine configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Deepest node nesting the engine will evaluate
    pub max_depth: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// CQL2 evaluation engine.
///
/// An engine is immutable once built and can be shared between threads;
/// every evaluation brings its own context and cache.
#[derive(Debug, Clone)]
pub struct Cql2Engine {
    table: DispatchTable,
    functions: Arc<FunctionRegistry>,
    config: EngineConfig,
}

impl Default for Cql2Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Cql2Engine {
    /// Create an engine with every operator module and the built-in functions
    pub fn new() -> Self {
        Self::with_functions(FunctionRegistry::with_builtins())
    }

    /// Create an engine with every operator module and the given functions
    pub fn with_functions(functions: FunctionRegistry) -> Self {
        let functions = Arc::new(functions);
        let mut engine = Self {
            table: DispatchTable::new(),
            functions: Arc::clone(&functions),
            config: EngineConfig::default(),
        };
        engine.install(&LogicalOperators);
        engine.install(&ComparisonOperators);
        engine.install(&ListOperators);
        engine.install(&ArrayOperators);
        engine.install(&SpatialOperators);
        engine.install(&PropertyOperators);
        engine.install(&FunctionCalls::new(functions));
        engine.install(&PredicateOperators);
        engine.install(&ArithmeticOperators);
        engine.install(&TemporalOperators);
        engine
    }

    /// Create an engine with a custom dispatch table
    pub fn with_table(table: DispatchTable, functions: FunctionRegistry) -> Self {
        Self {
            table,
            functions: Arc::new(functions),
            config: EngineConfig::default(),
        }
    }

    /// Replace the configuration
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Install an additional operator module; its handlers replace existing
    /// ones for the same pairs
    pub fn install(&mut self, module: &dyn OperatorModule) {
        self.table.install(module);
    }

    pub fn table(&self) -> &DispatchTable {
        &self.table
    }

    /// Get mutable access to the dispatch table
    pub fn table_mut(&mut self) -> &mut DispatchTable {
        &mut self.table
    }

    pub fn functions(&self) -> &FunctionRegistry {
        &self.functions
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Evaluate a tree to a single value
    pub fn evaluate(&self, root: &AstNode, ctx: &EvaluationContext<'_>) -> EvalResult<Value> {
        let mut cache = EvaluationCache::new();
        self.evaluate_with_cache(root, ctx, &mut cache)
    }

    /// Evaluate a tree, recording the computed value of every node in `cache`
    pub fn evaluate_with_cache(
        &self,
        root: &AstNode,
        ctx: &EvaluationContext<'_>,
        cache: &mut EvaluationCache,
    ) -> EvalResult<Value> {
        self.evaluate_node(root, ctx, cache, 0)
    }

    fn evaluate_node(
        &self,
        node: &AstNode,
        ctx: &EvaluationContext<'_>,
        cache: &mut EvaluationCache,
        depth: usize,
    ) -> EvalResult<Value> {
        if depth > self.config.max_depth {
            return Err(EvalError::RecursionLimit {
                limit: self.config.max_depth,
            });
        }

        let mut values: SmallVec<[Value; 4]> = SmallVec::with_capacity(node.children().len());
        for child in node.children() {
            values.push(self.evaluate_node(child, ctx, cache, depth + 1)?);
        }

        let handler = self
            .table
            .get(node.kind(), node.op())
            .ok_or_else(|| EvalError::unknown_operator(node.kind(), node.op()))?;
        let value = handler(node, &values, ctx)?;

        log::debug!("Evaluated {} {}: {}", node.id(), describe(node), value.typed());
        cache.insert(node.id(), value.clone());
        Ok(value)
    }
}

fn describe(node: &AstNode) -> String {
    if node.op() == cql2_ast::Operator::NullOp {
        node.kind().to_string()
    } else {
        format!("{} {}", node.kind(), node.op())
    }
}
