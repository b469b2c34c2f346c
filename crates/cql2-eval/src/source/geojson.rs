use super::json::JsonFeatureSource;
use crate::context::FeatureSource;
use cql2_types::{BBox, GeometryRef, PlanarGeometry, Value};
use serde_json::Value as JsonValue;

/// Queryable name of the feature geometry
pub const GEOMETRY_PROPERTY: &str = "geom";

/// A GeoJSON `Feature`.
///
/// Properties resolve against the feature's `properties` member. The
/// geometry is exposed as the synthetic [`GEOMETRY_PROPERTY`].
#[derive(Debug, Clone)]
pub struct GeoJsonFeatureSource {
    properties: JsonFeatureSource,
    geometry: Option<GeometryRef>,
}

impl GeoJsonFeatureSource {
    /// Read a feature document
    pub fn from_feature(feature: &JsonValue) -> Self {
        let properties = feature
            .get("properties")
            .filter(|p| p.is_object())
            .cloned()
            .unwrap_or_else(|| JsonValue::Object(Default::default()));
        let geometry = feature
            .get("geometry")
            .filter(|g| !g.is_null())
            .and_then(planar_geometry);
        Self {
            properties: JsonFeatureSource::new(properties),
            geometry,
        }
    }

    pub fn geometry(&self) -> Option<&GeometryRef> {
        self.geometry.as_ref()
    }
}

impl FeatureSource for GeoJsonFeatureSource {
    fn get_property(&self, path: &str) -> Value {
        if path == GEOMETRY_PROPERTY {
            return self.geometry.clone().map(Value::Geometry).unwrap_or_default();
        }
        self.properties.get_property(path)
    }
}

/// Points become planar points; anything carrying a `bbox` member becomes
/// its bounding rectangle
fn planar_geometry(geometry: &JsonValue) -> Option<GeometryRef> {
    let kind = geometry.get("type").and_then(JsonValue::as_str).unwrap_or("");
    if kind == "Point" {
        if let Some([x, y]) = coordinates::<2>(geometry.get("coordinates")) {
            return Some(PlanarGeometry::point(x, y).into_ref());
        }
    }
    if let Some([min_x, min_y, max_x, max_y]) = coordinates::<4>(geometry.get("bbox")) {
        let bbox = BBox::new(min_x, min_y, max_x, max_y);
        return Some(PlanarGeometry::rect(bbox).into_ref());
    }
    log::warn!("Unsupported GeoJSON geometry type {kind:?}, geom resolves to null");
    None
}

/// First `N` numbers of a JSON array
fn coordinates<const N: usize>(json: Option<&JsonValue>) -> Option<[f64; N]> {
    let items = json?.as_array()?;
    if items.len() < N {
        return None;
    }
    let mut out = [0.0; N];
    for (slot, item) in out.iter_mut().zip(items) {
        *slot = item.as_f64()?;
    }
    Some(out)
}
