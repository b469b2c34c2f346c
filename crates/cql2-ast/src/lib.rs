//! CQL2 Abstract Syntax Tree definitions
//!
//! This crate defines the closed taxonomy the evaluator and the SQL converter
//! dispatch on ([`NodeType`] and [`Operator`]) and the immutable [`AstNode`]
//! tree produced by a parser.

mod node;
mod node_type;
mod operator;

pub use node::*;
pub use node_type::*;
pub use operator::*;
