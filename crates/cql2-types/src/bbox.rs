//! Bounding boxes and the textual `BBOX(...)` reader

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;
use thiserror::Error;

static BBOX_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^\s*(?i:BBOX)\s*\(\s*([-+]?\d*\.?\d+)[\s,]+([-+]?\d*\.?\d+)[\s,]+([-+]?\d*\.?\d+)[\s,]+([-+]?\d*\.?\d+)\s*\)\s*$",
    )
    .expect("bbox pattern is a valid regex")
});

/// Error returned by [`BBox::parse`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BBoxParseError {
    /// The text is not of the form `BBOX(minx miny maxx maxy)`
    #[error("not a bbox tagged text: {text}")]
    Malformed { text: String },

    /// A coordinate could not be read as a number
    #[error("invalid bbox coordinate: {value}")]
    InvalidCoordinate { value: String },
}

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BBox {
    /// Create a bounding box from its corners
    pub const fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Read a bounding box from `BBOX(minx miny maxx maxy)`; commas are accepted
    /// as separators as well.
    pub fn parse(text: &str) -> Result<Self, BBoxParseError> {
        let captures = BBOX_PATTERN
            .captures(text)
            .ok_or_else(|| BBoxParseError::Malformed {
                text: text.to_string(),
            })?;

        let mut coords = [0.0f64; 4];
        for (slot, coord) in coords.iter_mut().enumerate() {
            let raw = captures
                .get(slot + 1)
                .map(|m| m.as_str())
                .unwrap_or_default();
            *coord = raw
                .parse::<f64>()
                .map_err(|_| BBoxParseError::InvalidCoordinate {
                    value: raw.to_string(),
                })?;
        }

        Ok(Self::new(coords[0], coords[1], coords[2], coords[3]))
    }

    /// Check whether a point lies inside or on the boundary
    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }

    /// Check whether two boxes share at least one point
    pub fn intersects(&self, other: &BBox) -> bool {
        self.min_x <= other.max_x
            && other.min_x <= self.max_x
            && self.min_y <= other.max_y
            && other.min_y <= self.max_y
    }
}

impl fmt::Display for BBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "BBOX({},{},{},{})",
            self.min_x, self.min_y, self.max_x, self.max_y
        )
    }
}
