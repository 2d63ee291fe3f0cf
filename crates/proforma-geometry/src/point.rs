use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::GeometryError;

/// Upper bound of the normalized coordinate space (percent of the image).
pub const COORD_MAX: f64 = 100.0;

/// A point in normalized image space, both axes in `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Clamp both coordinates into the normalized space.
    pub fn clamped(self) -> Self {
        Self {
            x: self.x.clamp(0.0, COORD_MAX),
            y: self.y.clamp(0.0, COORD_MAX),
        }
    }
}

/// Pixel bounds of the surface the pointer events are reported against.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Surface {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Surface {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Map a pointer position in pixels to normalized coordinates.
    ///
    /// Positions outside the surface are clamped to its edge rather than
    /// rejected, so a drag that leaves the image keeps tracking the border.
    pub fn normalize(&self, pixel_x: f64, pixel_y: f64) -> Result<Point, GeometryError> {
        if !(self.width > 0.0 && self.height > 0.0) {
            return Err(GeometryError::EmptySurface {
                width: self.width,
                height: self.height,
            });
        }

        let x = (pixel_x - self.left) / self.width * COORD_MAX;
        let y = (pixel_y - self.top) / self.height * COORD_MAX;
        Ok(Point::new(x, y).clamped())
    }
}
