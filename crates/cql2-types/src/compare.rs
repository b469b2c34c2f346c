//! Tolerance-aware equality and the set ordering used by array predicates
//!
//! Both functions are total: values of different variants never fail to compare.

use std::cmp::Ordering;

use crate::Value;

/// Tolerance for predicate equality between doubles
pub const EQUALITY_TOLERANCE: f64 = 1e-5;

/// Tolerance for doubles when ordering set members
pub const SET_TOLERANCE: f64 = 1e-9;

/// Predicate equality between two values of the same variant.
///
/// Values of different variants are never equal. Doubles are equal when they
/// differ by less than [`EQUALITY_TOLERANCE`]. Only scalar variants can be
/// equal; null, arrays, geometries and bounding boxes always compare unequal.
pub fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Bool(x), Value::Bool(y)) => x == y,
        (Value::Int64(x), Value::Int64(y)) => x == y,
        (Value::UInt64(x), Value::UInt64(y)) => x == y,
        (Value::Double(x), Value::Double(y)) => (x - y).abs() < EQUALITY_TOLERANCE,
        (Value::String(x), Value::String(y)) => x == y,
        _ => false,
    }
}

/// Total ordering for set materialization.
///
/// Values order by variant tag first, then by content. Doubles use
/// `f64::total_cmp`; closeness is handled by [`set_eq`], not here.
pub fn set_cmp(a: &Value, b: &Value) -> Ordering {
    let by_tag = a.tag().cmp(&b.tag());
    if by_tag != Ordering::Equal {
        return by_tag;
    }

    match (a, b) {
        (Value::Null, Value::Null) => Ordering::Equal,
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::Int64(x), Value::Int64(y)) => x.cmp(y),
        (Value::UInt64(x), Value::UInt64(y)) => x.cmp(y),
        (Value::Double(x), Value::Double(y)) => x.total_cmp(y),
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Array(x), Value::Array(y)) => {
            for (left, right) in x.iter().zip(y.iter()) {
                let ordering = set_cmp(left, right);
                if ordering != Ordering::Equal {
                    return ordering;
                }
            }
            x.len().cmp(&y.len())
        }
        (Value::Geometry(x), Value::Geometry(y)) => x.to_wkt().cmp(&y.to_wkt()),
        (Value::BBox(x), Value::BBox(y)) => x
            .min_x
            .total_cmp(&y.min_x)
            .then(x.min_y.total_cmp(&y.min_y))
            .then(x.max_x.total_cmp(&y.max_x))
            .then(x.max_y.total_cmp(&y.max_y)),
        _ => Ordering::Equal,
    }
}

/// Set membership equality: [`set_cmp`] equality, except that doubles closer
/// than [`SET_TOLERANCE`] are the same element
pub fn set_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Double(x), Value::Double(y)) => {
            (x - y).abs() < SET_TOLERANCE || x.total_cmp(y).is_eq()
        }
        (Value::Array(x), Value::Array(y)) => {
            x.len() == y.len() && x.iter().zip(y.iter()).all(|(l, r)| set_eq(l, r))
        }
        _ => set_cmp(a, b) == Ordering::Equal,
    }
}

/// A de-duplicated, ordered view over the elements of an array value.
#[derive(Debug, Clone)]
pub struct ValueSet<'a> {
    elements: Vec<&'a Value>,
}

impl<'a> ValueSet<'a> {
    /// Materialize a set from array elements, dropping duplicates
    pub fn from_slice(values: &'a [Value]) -> Self {
        let mut elements: Vec<&Value> = values.iter().collect();
        elements.sort_by(|a, b| set_cmp(a, b));
        // `b` is the last kept element, so a chain of close doubles splits
        // wherever it drifts past the tolerance
        elements.dedup_by(|a, b| set_eq(a, b));
        Self { elements }
    }

    /// Number of distinct elements
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Check if the set has no elements
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Check membership using the set ordering.
    ///
    /// A close double can sort on either side of its match, so both
    /// neighbours of the insertion point are checked.
    pub fn contains(&self, value: &Value) -> bool {
        let index = self
            .elements
            .partition_point(|element| set_cmp(element, value) == Ordering::Less);
        let before = index.checked_sub(1).and_then(|i| self.elements.get(i));
        let at = self.elements.get(index);
        [before, at]
            .into_iter()
            .flatten()
            .any(|element| set_eq(element, value))
    }

    /// Check that every element of this set is a member of `other`
    pub fn is_subset_of(&self, other: &ValueSet<'_>) -> bool {
        self.elements.iter().all(|element| other.contains(element))
    }

    /// Iterate over the distinct elements in set order
    pub fn iter(&self) -> impl Iterator<Item = &'a Value> + '_ {
        self.elements.iter().copied()
    }
}
