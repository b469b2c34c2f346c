//! OGC CQL2 filter evaluation and SQL conversion for Rust
//!
//! This crate bundles the CQL2 layers:
//! - The runtime value model and geometry engine seam (`types`)
//! - The AST taxonomy and tree builder (`ast`)
//! - Evaluation of a tree against a record (`eval`)
//! - Conversion of a tree into a SQL `WHERE` expression (`sql`)
//!
//! # Example
//!
//! ```
//! use cql2::{AstBuilder, Cql2Engine, JsonFeatureSource, Operator, SqlConverter, Value};
//!
//! // city IN ('X', 'Y')
//! let mut b = AstBuilder::new();
//! let city = b.property("city");
//! let query = b.in_list(Operator::In, city, [Value::from("X"), Value::from("Y")]);
//!
//! let records = vec![
//!     JsonFeatureSource::new(serde_json::json!({ "city": "X" })),
//!     JsonFeatureSource::new(serde_json::json!({ "city": "Z" })),
//! ];
//! let kept = cql2::filter(&Cql2Engine::new(), &query, &records);
//! assert_eq!(kept.len(), 1);
//!
//! let sql = SqlConverter::new().convert(&query).unwrap();
//! assert_eq!(sql, "\"city\" IN ('X','Y')");
//! ```

mod filter;

// Re-export all public APIs from internal crates
pub use cql2_ast as ast;
pub use cql2_eval as eval;
pub use cql2_sql as sql;
pub use cql2_types as types;

// Convenience re-exports
pub use cql2_ast::{AstBuilder, AstNode, NodeType, Operator};
pub use cql2_eval::{
    Cql2Engine, EngineConfig, EvalError, EvalResult, EvaluationCache, EvaluationContext,
    FeatureSource, FunctionRegistry, GeoJsonFeatureSource, JsonFeatureSource,
};
pub use cql2_sql::{SqlConverter, SqlError};
pub use cql2_types::{BBox, Value};
pub use filter::{filter, matches};
