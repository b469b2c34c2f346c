//! Conversion between JSON documents and CQL2 values

use serde_json::{Number, Value as JsonValue};

use crate::Value;

impl Value {
    /// Convert a JSON value into a CQL2 value.
    ///
    /// Objects have no CQL2 counterpart and become null. Arrays keep their
    /// order but drop elements that convert to null.
    pub fn from_json(json: &JsonValue) -> Self {
        match json {
            JsonValue::Null | JsonValue::Object(_) => Self::Null,
            JsonValue::Bool(b) => Self::Bool(*b),
            JsonValue::Number(n) => Self::from_json_number(n),
            JsonValue::String(s) => Self::String(s.clone()),
            JsonValue::Array(items) => Self::Array(
                items
                    .iter()
                    .map(Self::from_json)
                    .filter(|v| !v.is_null())
                    .collect(),
            ),
        }
    }

    fn from_json_number(n: &Number) -> Self {
        if let Some(i) = n.as_i64() {
            Self::Int64(i)
        } else if let Some(u) = n.as_u64() {
            Self::UInt64(u)
        } else {
            n.as_f64().map(Self::Double).unwrap_or(Self::Null)
        }
    }

    /// Convert this value into JSON for reporting.
    ///
    /// Geometries become their WKT text, bounding boxes a four-element array and
    /// non-finite doubles null.
    pub fn to_json(&self) -> JsonValue {
        match self {
            Self::Null => JsonValue::Null,
            Self::Bool(b) => JsonValue::Bool(*b),
            Self::Int64(i) => JsonValue::from(*i),
            Self::UInt64(u) => JsonValue::from(*u),
            Self::Double(d) => Number::from_f64(*d)
                .map(JsonValue::Number)
                .unwrap_or(JsonValue::Null),
            Self::String(s) => JsonValue::String(s.clone()),
            Self::Array(elements) => JsonValue::Array(elements.iter().map(Self::to_json).collect()),
            Self::Geometry(g) => JsonValue::String(g.to_wkt()),
            Self::BBox(b) => serde_json::json!([b.min_x, b.min_y, b.max_x, b.max_y]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BBox;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_from_json_scalars() {
        assert_eq!(Value::from_json(&json!(null)), Value::Null);
        assert_eq!(Value::from_json(&json!(true)), Value::Bool(true));
        assert_eq!(Value::from_json(&json!(-4)), Value::Int64(-4));
        assert_eq!(Value::from_json(&json!(u64::MAX)), Value::UInt64(u64::MAX));
        assert_eq!(Value::from_json(&json!(2.5)), Value::Double(2.5));
        assert_eq!(Value::from_json(&json!("x")), Value::string("x"));
    }

    #[test]
    fn test_from_json_object_is_null() {
        assert_eq!(Value::from_json(&json!({"a": 1})), Value::Null);
    }

    #[test]
    fn test_from_json_array_drops_nulls_keeps_duplicates() {
        let value = Value::from_json(&json!([1, null, 1, {"a": 2}, "b"]));
        assert_eq!(
            value,
            Value::array([Value::Int64(1), Value::Int64(1), Value::string("b")])
        );
    }

    #[test]
    fn test_to_json() {
        assert_eq!(Value::Double(f64::NAN).to_json(), json!(null));
        assert_eq!(
            Value::BBox(BBox::new(0.0, 1.0, 2.0, 3.0)).to_json(),
            json!([0.0, 1.0, 2.0, 3.0])
        );
        assert_eq!(
            Value::array([Value::Int64(1), Value::string("a")]).to_json(),
            json!([1, "a"])
        );
    }
}
