//! Bounding box type for raster extents.

use serde::{Deserialize, Serialize};

/// A raster bounding box in map coordinates.
///
/// For the usual north-up convention (negative y-resolution), `top` is the
/// y coordinate of the upper edge and `bottom < top`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub left: f64,
    pub bottom: f64,
    pub right: f64,
    pub top: f64,
}

impl Bounds {
    pub fn new(left: f64, bottom: f64, right: f64, top: f64) -> Self {
        Self {
            left,
            bottom,
            right,
            top,
        }
    }

    /// Width of the bounding box in map units.
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    /// Height of the bounding box in map units.
    pub fn height(&self) -> f64 {
        self.top - self.bottom
    }

    /// Check if a map coordinate is contained within this box.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.left && x <= self.right && y >= self.bottom && y <= self.top
    }
}
