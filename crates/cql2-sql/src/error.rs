//! SQL conversion errors

use cql2_ast::{NodeType, Operator};
use thiserror::Error;

/// Result type for SQL conversion
pub type SqlResult<T> = Result<T, SqlError>;

/// Errors that can occur while converting a tree to SQL
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SqlError {
    /// No renderer registered for a (node type, operator) pair
    #[error("Can not find sql converter for operator \"{operator}\" in node type \"{kind}\"")]
    UnknownOperator { kind: NodeType, operator: Operator },

    /// A node has a child count its renderer can't handle
    #[error("Sql converter for {operator} in {kind} needs {expected} children but the node has {found}")]
    ArityMismatch {
        kind: NodeType,
        operator: Operator,
        expected: String,
        found: usize,
    },

    /// Tree deeper than the configured limit
    #[error("Maximum recursion depth {limit} exceeded")]
    RecursionLimit { limit: usize },
}
