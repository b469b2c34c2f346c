//! Feature sources backed by JSON documents

mod geojson;
mod json;

pub use geojson::{GEOMETRY_PROPERTY, GeoJsonFeatureSource};
pub use json::JsonFeatureSource;
