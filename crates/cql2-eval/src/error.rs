//! Evaluation errors for the CQL2 engine

use cql2_ast::{NodeType, Operator};
use cql2_types::GeometryError;
use thiserror::Error;

/// Result type for evaluation operations
pub type EvalResult<T> = Result<T, EvalError>;

/// Errors that can occur during CQL2 evaluation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EvalError {
    /// No handler registered for a (node type, operator) pair
    #[error("Can not find evaluator for operator {operator} in node type {kind}")]
    UnknownOperator { kind: NodeType, operator: Operator },

    /// Wrong number of operand values
    #[error("{operator} needs {expected} values but we have {found}")]
    ArityMismatch {
        operator: String,
        expected: String,
        found: usize,
    },

    /// Operand variant doesn't match what the operator requires
    #[error("Type mismatch in {operator}: {message}")]
    TypeMismatch { operator: String, message: String },

    /// Function call names an unregistered function
    #[error("Can not find function {name}")]
    UnknownFunction { name: String },

    /// Taxonomy member without a real implementation
    #[error("Unsupported feature: {feature}")]
    UnsupportedFeature { feature: String },

    /// Argument value outside the domain of an operation
    #[error("Invalid argument for {function}: {message}")]
    InvalidArgument { function: String, message: String },

    /// Geometry engine refused a predicate
    #[error("Geometry engine error: {0}")]
    Geometry(#[from] GeometryError),

    /// Tree deeper than the configured limit
    #[error("Maximum recursion depth {limit} exceeded")]
    RecursionLimit { limit: usize },
}

impl EvalError {
    /// Create an unknown operator error
    pub fn unknown_operator(kind: NodeType, operator: Operator) -> Self {
        Self::UnknownOperator { kind, operator }
    }

    /// Create an arity mismatch error
    pub fn arity_mismatch(operator: impl Into<String>, expected: impl ToString, found: usize) -> Self {
        Self::ArityMismatch {
            operator: operator.into(),
            expected: expected.to_string(),
            found,
        }
    }

    /// Create a type mismatch error
    pub fn type_mismatch(operator: impl Into<String>, message: impl Into<String>) -> Self {
        Self::TypeMismatch {
            operator: operator.into(),
            message: message.into(),
        }
    }

    /// Create an unknown function error
    pub fn unknown_function(name: impl Into<String>) -> Self {
        Self::UnknownFunction { name: name.into() }
    }

    /// Create an unsupported feature error
    pub fn unsupported(feature: impl Into<String>) -> Self {
        Self::UnsupportedFeature {
            feature: feature.into(),
        }
    }

    /// Create an invalid argument error
    pub fn invalid_argument(function: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            function: function.into(),
            message: message.into(),
        }
    }
}
