//! CQL2 Evaluation Engine
//!
//! This crate evaluates a CQL2 [`AstNode`](cql2_ast::AstNode) tree against one
//! record at a time. It provides:
//!
//! - **Logical Operators**: And, Or, Not over Bool operands
//! - **Comparison Operators**: Equal, NotEqual, Lesser, Greater, etc. with a
//!   1e-5 tolerance for numeric equality
//! - **List Membership**: In, NotIn with three-valued logic for null
//! - **Array Predicates**: A_Contains, A_ContainedBy, A_Equals with set semantics
//! - **Spatial Predicates**: S_Intersects through a pluggable geometry engine
//! - **Basic Predicates**: IsNull, Between, Like
//! - **Arithmetic**: Plus, Minus, Mult, Div, DivInt, Mod, Power
//! - **Function Calls**: looked up in an explicit [`FunctionRegistry`]
//!
//! # Example
//!
//! ```
//! use cql2_ast::{AstBuilder, Operator};
//! use cql2_eval::{Cql2Engine, EvaluationContext, JsonFeatureSource};
//! use cql2_types::Value;
//!
//! let mut b = AstBuilder::new();
//! let a = b.property("a");
//! let one = b.literal(1i64);
//! let query = b.compare(Operator::Equal, a, one);
//!
//! let record = JsonFeatureSource::new(serde_json::json!({ "a": 1 }));
//! let ctx = EvaluationContext::new(&record);
//! let engine = Cql2Engine::new();
//! assert_eq!(engine.evaluate(&query, &ctx).unwrap(), Value::Bool(true));
//! ```
//!
//! # Architecture
//!
//! - `Cql2Engine`: walks the tree bottom-up and dispatches on `(NodeType, Operator)`
//! - `DispatchTable`: the handler mapping, filled by `OperatorModule`s
//! - `EvaluationContext`: the record under test and the geometry engine
//! - `EvaluationCache`: per-node computed values, owned by the caller
//! - `dot`: Graphviz export of a tree and its computed values

pub mod cache;
pub mod context;
pub mod dot;
pub mod engine;
pub mod error;
pub mod functions;
pub mod operators;
pub mod registry;
pub mod source;

// Re-export main types
pub use cache::EvaluationCache;
pub use context::{EmptySource, EvaluationContext, EvaluationContextBuilder, FeatureSource};
pub use engine::{Cql2Engine, DEFAULT_MAX_DEPTH, EngineConfig};
pub use error::{EvalError, EvalResult};
pub use functions::{FunctionRegistry, ScalarFn};
pub use registry::{DispatchTable, Handler, OperatorModule};
pub use source::{GEOMETRY_PROPERTY, GeoJsonFeatureSource, JsonFeatureSource};
