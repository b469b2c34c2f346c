//! CQL2 runtime values
//!
//! This crate defines the value model shared by the evaluator and the SQL converter:
//! - [`Value`]: the tagged union of every runtime value (scalars, arrays, geometry and bbox handles)
//! - [`values_equal`] / [`set_cmp`] / [`set_eq`]: tolerance-aware equality, total set ordering and set membership
//! - [`GeometryEngine`]: the collaborator that builds geometries and answers spatial predicates

mod bbox;
mod compare;
mod geometry;
mod json;
mod value;

pub use bbox::*;
pub use compare::*;
pub use geometry::*;
pub use value::*;
