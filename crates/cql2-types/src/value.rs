//! CQL2 Value types - runtime representation of every value the language manipulates
//!
//! Arrays are ordered sequences in storage but are treated as sets by the array
//! predicates; duplicates are kept here and only removed when an operator
//! materializes a [`crate::ValueSet`].

use std::fmt;
use std::sync::Arc;

use crate::{BBox, GeometryRef};

/// The primary value type for CQL2 runtime values.
#[derive(Debug, Clone, Default)]
pub enum Value {
    /// Null value (missing or unknown)
    #[default]
    Null,
    /// Boolean value
    Bool(bool),
    /// Signed 64-bit integer
    Int64(i64),
    /// Unsigned 64-bit integer
    UInt64(u64),
    /// Double precision float
    Double(f64),
    /// String value
    String(String),
    /// Array value, compared as a set by array predicates
    Array(Vec<Value>),
    /// Opaque geometry handle supplied by a geometry engine
    Geometry(GeometryRef),
    /// Bounding box handle
    BBox(BBox),
}

/// Stable ordering of the variants, used for cross-variant set ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ValueTag {
    Null,
    Bool,
    Int64,
    UInt64,
    Double,
    String,
    Array,
    Geometry,
    BBox,
}

impl ValueTag {
    /// Short type name used in diagnostics
    pub const fn name(self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool => "bool",
            Self::Int64 => "int64",
            Self::UInt64 => "uint64",
            Self::Double => "double",
            Self::String => "string",
            Self::Array => "array",
            Self::Geometry => "geometry",
            Self::BBox => "bbox",
        }
    }
}

impl fmt::Display for ValueTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Value {
    /// Check if this value is null
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Get the variant tag of this value
    pub fn tag(&self) -> ValueTag {
        match self {
            Self::Null => ValueTag::Null,
            Self::Bool(_) => ValueTag::Bool,
            Self::Int64(_) => ValueTag::Int64,
            Self::UInt64(_) => ValueTag::UInt64,
            Self::Double(_) => ValueTag::Double,
            Self::String(_) => ValueTag::String,
            Self::Array(_) => ValueTag::Array,
            Self::Geometry(_) => ValueTag::Geometry,
            Self::BBox(_) => ValueTag::BBox,
        }
    }

    /// Short type name of this value
    pub fn type_name(&self) -> &'static str {
        self.tag().name()
    }

    /// Scalar values are the ones a list-membership test accepts on its left side
    pub fn is_scalar(&self) -> bool {
        matches!(
            self,
            Self::Bool(_) | Self::Int64(_) | Self::UInt64(_) | Self::Double(_) | Self::String(_)
        )
    }

    /// Check if this value is one of the numeric variants
    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Int64(_) | Self::UInt64(_) | Self::Double(_))
    }

    /// Try to get as Bool
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Try to get as String
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get as Array
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Self::Array(elements) => Some(elements),
            _ => None,
        }
    }

    /// Try to get as a geometry handle
    pub fn as_geometry(&self) -> Option<&GeometryRef> {
        match self {
            Self::Geometry(g) => Some(g),
            _ => None,
        }
    }

    /// Try to get as a bounding box
    pub fn as_bbox(&self) -> Option<&BBox> {
        match self {
            Self::BBox(b) => Some(b),
            _ => None,
        }
    }

    /// Widen a numeric variant to f64
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int64(i) => Some(*i as f64),
            Self::UInt64(u) => Some(*u as f64),
            Self::Double(d) => Some(*d),
            _ => None,
        }
    }

    /// Create a string value
    pub fn string(value: impl Into<String>) -> Self {
        Self::String(value.into())
    }

    /// Create an array value
    pub fn array(elements: impl IntoIterator<Item = Value>) -> Self {
        Self::Array(elements.into_iter().collect())
    }

    /// Display adapter that appends the type name, e.g. `3 int64`
    pub fn typed(&self) -> TypedValue<'_> {
        TypedValue(self)
    }
}

/// Renders a value followed by its type name
pub struct TypedValue<'a>(&'a Value);

impl fmt::Display for TypedValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.0, self.0.type_name())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Bool(b) => write!(f, "{}", if *b { "T" } else { "F" }),
            Self::Int64(i) => write!(f, "{}", i),
            Self::UInt64(u) => write!(f, "{}", u),
            Self::Double(d) => write!(f, "{}", d),
            Self::String(s) => write!(f, "{}", s),
            Self::Array(elements) => {
                write!(f, "[")?;
                for (i, element) in elements.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{}", element)?;
                }
                write!(f, "]")
            }
            Self::Geometry(g) => write!(f, "{}", g.to_wkt()),
            Self::BBox(b) => write!(f, "{}", b),
        }
    }
}

/// Structural equality. Doubles compare exactly and geometries by WKT; the
/// tolerance-aware predicate equality lives in [`crate::values_equal`].
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Int64(a), Self::Int64(b)) => a == b,
            (Self::UInt64(a), Self::UInt64(b)) => a == b,
            (Self::Double(a), Self::Double(b)) => a == b,
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Array(a), Self::Array(b)) => a == b,
            (Self::Geometry(a), Self::Geometry(b)) => {
                Arc::ptr_eq(a, b) || a.to_wkt() == b.to_wkt()
            }
            (Self::BBox(a), Self::BBox(b)) => a == b,
            _ => false,
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Int64(i64::from(value))
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Int64(value)
    }
}

impl From<u64> for Value {
    fn from(value: u64) -> Self {
        Self::UInt64(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Double(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Self::Array(value)
    }
}

impl From<BBox> for Value {
    fn from(value: BBox) -> Self {
        Self::BBox(value)
    }
}

impl From<GeometryRef> for Value {
    fn from(value: GeometryRef) -> Self {
        Self::Geometry(value)
    }
}
