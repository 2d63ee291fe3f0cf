use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::path::serialize_path;
use crate::point::{Point, COORD_MAX};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum AreaColor {
    #[default]
    Blue,
    Red,
    Green,
    Yellow,
}

/// A selectable polygon over an image-map question's image.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Area {
    pub points: Vec<Point>,
    #[serde(default)]
    pub color: AreaColor,
    #[serde(default)]
    pub text: String,
    /// Report text pre-filled when the area is chosen.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cr_text: Option<String>,
}

impl Area {
    pub fn new(points: Vec<Point>) -> Self {
        Self {
            points,
            ..Self::default()
        }
    }

    pub fn with_color(mut self, color: AreaColor) -> Self {
        self.color = color;
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_cr_text(mut self, cr_text: impl Into<String>) -> Self {
        self.cr_text = Some(cr_text.into());
        self
    }

    pub fn svg_path(&self) -> String {
        serialize_path(&self.points)
    }

    /// Vertex average of the polygon. `None` for an empty polygon.
    pub fn centroid(&self) -> Option<Point> {
        if self.points.is_empty() {
            return None;
        }
        let n = self.points.len() as f64;
        let (sx, sy) = self
            .points
            .iter()
            .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
        Some(Point::new(sx / n, sy / n))
    }

    /// Even-odd ray casting. Polygons with fewer than three points have no
    /// interior and never contain anything.
    pub fn contains(&self, point: Point) -> bool {
        let pts = &self.points;
        if pts.len() < 3 {
            return false;
        }

        let mut inside = false;
        let mut j = pts.len() - 1;
        for i in 0..pts.len() {
            let (a, b) = (pts[i], pts[j]);
            if (a.y > point.y) != (b.y > point.y) {
                let cross_x = (b.x - a.x) * (point.y - a.y) / (b.y - a.y) + a.x;
                if point.x < cross_x {
                    inside = !inside;
                }
            }
            j = i;
        }
        inside
    }

    /// Shift every point by `(dx, dy)`.
    ///
    /// The offset is shrunk so the whole polygon stays inside the
    /// normalized space; points are never clamped individually, so the
    /// shape is preserved.
    pub fn translated(&self, dx: f64, dy: f64) -> Area {
        let (dx, dy) = self.bounded_offset(dx, dy);
        Area {
            points: self
                .points
                .iter()
                .map(|p| Point::new(p.x + dx, p.y + dy))
                .collect(),
            ..self.clone()
        }
    }

    fn bounded_offset(&self, dx: f64, dy: f64) -> (f64, f64) {
        if self.points.is_empty() {
            return (dx, dy);
        }
        let min_x = self.points.iter().map(|p| p.x).fold(f64::INFINITY, f64::min);
        let max_x = self.points.iter().map(|p| p.x).fold(f64::NEG_INFINITY, f64::max);
        let min_y = self.points.iter().map(|p| p.y).fold(f64::INFINITY, f64::min);
        let max_y = self.points.iter().map(|p| p.y).fold(f64::NEG_INFINITY, f64::max);

        (
            clamp_offset(dx, -min_x, COORD_MAX - max_x),
            clamp_offset(dy, -min_y, COORD_MAX - max_y),
        )
    }
}

// A polygon wider than the space (only possible with hand-edited points)
// has no valid offset on that axis.
fn clamp_offset(delta: f64, low: f64, high: f64) -> f64 {
    if low > high {
        return 0.0;
    }
    delta.clamp(low, high)
}

/// Index of the topmost area containing `point`.
///
/// Later areas are drawn over earlier ones, so the search runs back to front.
pub fn hit_test(areas: &[Area], point: Point) -> Option<usize> {
    areas.iter().rposition(|area| area.contains(point))
}
