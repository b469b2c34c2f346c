use crate::context::FeatureSource;
use cql2_types::Value;
use serde_json::Value as JsonValue;

/// A record held as a JSON document.
///
/// Paths are dot-separated; every segment but the last must name an object.
/// Missing members, JSON null and JSON objects all resolve to null.
#[derive(Debug, Clone, Default)]
pub struct JsonFeatureSource {
    document: JsonValue,
}

impl JsonFeatureSource {
    pub fn new(document: JsonValue) -> Self {
        Self { document }
    }

    pub fn document(&self) -> &JsonValue {
        &self.document
    }

    /// The raw JSON member at `path`
    pub fn lookup(&self, path: &str) -> Option<&JsonValue> {
        let mut segments = path.split('.');
        let last = segments.next_back()?;
        let mut current = &self.document;
        for segment in segments {
            current = current.get(segment).filter(|member| member.is_object())?;
        }
        current.as_object()?.get(last)
    }
}

impl From<JsonValue> for JsonFeatureSource {
    fn from(document: JsonValue) -> Self {
        Self::new(document)
    }
}

impl FeatureSource for JsonFeatureSource {
    fn get_property(&self, path: &str) -> Value {
        self.lookup(path).map(Value::from_json).unwrap_or_default()
    }
}
