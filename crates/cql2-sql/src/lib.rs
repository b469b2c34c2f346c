//! CQL2 to SQL conversion
//!
//! Renders a CQL2 tree as a boolean SQL expression that can follow a `WHERE`
//! keyword. The conversion is independent of evaluation: it never looks at
//! records, only at the tree.
//!
//! ```
//! use cql2_ast::{AstBuilder, Operator};
//! use cql2_sql::SqlConverter;
//!
//! let mut b = AstBuilder::new();
//! let a = b.property("a");
//! let one = b.literal(1i64);
//! let query = b.compare(Operator::Equal, a, one);
//!
//! assert_eq!(SqlConverter::new().convert(&query).unwrap(), "\"a\" = 1");
//! ```

mod converter;
mod error;
mod render;

pub use converter::{DEFAULT_MAX_DEPTH, Renderer, SqlConverter};
pub use error::{SqlError, SqlResult};
pub use render::literal;
