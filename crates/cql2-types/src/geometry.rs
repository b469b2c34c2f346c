//! Geometry collaborator interfaces and the default planar engine
//!
//! The evaluator never inspects geometries itself. It holds opaque
//! [`GeometryRef`] handles and asks a [`GeometryEngine`] to convert bounding
//! boxes and to answer spatial predicates.

use std::any::Any;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

use crate::BBox;

/// Shared handle to a geometry
pub type GeometryRef = Arc<dyn Geometry>;

/// A geometry produced by some geometry engine
pub trait Geometry: fmt::Debug + Send + Sync {
    /// Well-known text representation
    fn to_wkt(&self) -> String;

    /// Bounding box of the geometry
    fn envelope(&self) -> BBox;

    /// Access to the concrete type, for engines that downcast their own handles
    fn as_any(&self) -> &dyn Any;
}

/// Errors reported by a geometry engine
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeometryError {
    /// The engine cannot handle a geometry it did not create
    #[error("geometry engine cannot handle {geometry}")]
    ForeignGeometry { geometry: String },
}

/// Geometry construction and spatial predicates
pub trait GeometryEngine: Send + Sync {
    /// Build a polygon geometry equivalent to a bounding box
    fn from_bbox(&self, bbox: &BBox) -> GeometryRef;

    /// Test whether two geometries share at least one point
    fn intersects(&self, lhs: &dyn Geometry, rhs: &dyn Geometry) -> Result<bool, GeometryError>;
}

/// Geometries understood by [`PlanarEngine`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlanarGeometry {
    /// A single point
    Point { x: f64, y: f64 },
    /// An axis-aligned rectangle polygon
    Rect(BBox),
}

impl PlanarGeometry {
    /// Create a point geometry
    pub const fn point(x: f64, y: f64) -> Self {
        Self::Point { x, y }
    }

    /// Create a rectangle geometry
    pub const fn rect(bbox: BBox) -> Self {
        Self::Rect(bbox)
    }

    /// Wrap this geometry into a shared handle
    pub fn into_ref(self) -> GeometryRef {
        Arc::new(self)
    }
}

impl Geometry for PlanarGeometry {
    fn to_wkt(&self) -> String {
        match self {
            Self::Point { x, y } => format!("POINT ({} {})", x, y),
            Self::Rect(b) => format!(
                "POLYGON (({minx} {miny}, {maxx} {miny}, {maxx} {maxy}, {minx} {maxy}, {minx} {miny}))",
                minx = b.min_x,
                miny = b.min_y,
                maxx = b.max_x,
                maxy = b.max_y,
            ),
        }
    }

    fn envelope(&self) -> BBox {
        match self {
            Self::Point { x, y } => BBox::new(*x, *y, *x, *y),
            Self::Rect(b) => *b,
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Default geometry engine over points and rectangles
#[derive(Debug, Clone, Copy, Default)]
pub struct PlanarEngine;

impl PlanarEngine {
    fn downcast(geometry: &dyn Geometry) -> Result<&PlanarGeometry, GeometryError> {
        geometry
            .as_any()
            .downcast_ref::<PlanarGeometry>()
            .ok_or_else(|| GeometryError::ForeignGeometry {
                geometry: geometry.to_wkt(),
            })
    }
}

impl GeometryEngine for PlanarEngine {
    fn from_bbox(&self, bbox: &BBox) -> GeometryRef {
        PlanarGeometry::rect(*bbox).into_ref()
    }

    fn intersects(&self, lhs: &dyn Geometry, rhs: &dyn Geometry) -> Result<bool, GeometryError> {
        let result = match (Self::downcast(lhs)?, Self::downcast(rhs)?) {
            (PlanarGeometry::Point { x: ax, y: ay }, PlanarGeometry::Point { x: bx, y: by }) => {
                ax == bx && ay == by
            }
            (PlanarGeometry::Point { x, y }, PlanarGeometry::Rect(b))
            | (PlanarGeometry::Rect(b), PlanarGeometry::Point { x, y }) => b.contains_point(*x, *y),
            (PlanarGeometry::Rect(a), PlanarGeometry::Rect(b)) => a.intersects(b),
        };
        Ok(result)
    }
}
