use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::point::Point;

/// Minimum distance, in normalized units, between consecutive freehand
/// points.
pub const MIN_POINT_DISTANCE: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum CaptureMode {
    #[default]
    Freehand,
    Rectangle,
}

/// An in-progress polygon capture, alive between pointer-down and
/// pointer-up.
#[derive(Debug, Clone, PartialEq)]
pub struct Capture {
    mode: CaptureMode,
    start: Point,
    points: Vec<Point>,
}

impl Capture {
    pub fn begin(mode: CaptureMode, start: Point) -> Self {
        let start = start.clamped();
        Self {
            mode,
            start,
            points: vec![start],
        }
    }

    pub fn mode(&self) -> CaptureMode {
        self.mode
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Feed a pointer-move position into the capture.
    pub fn extend(&mut self, point: Point) {
        let point = point.clamped();
        match self.mode {
            CaptureMode::Freehand => {
                let far_enough = self
                    .points
                    .last()
                    .is_none_or(|last| last.distance(&point) > MIN_POINT_DISTANCE);
                if far_enough {
                    self.points.push(point);
                }
            }
            CaptureMode::Rectangle => {
                let (min_x, max_x) = (self.start.x.min(point.x), self.start.x.max(point.x));
                let (min_y, max_y) = (self.start.y.min(point.y), self.start.y.max(point.y));
                self.points = vec![
                    Point::new(min_x, min_y),
                    Point::new(max_x, min_y),
                    Point::new(max_x, max_y),
                    Point::new(min_x, max_y),
                ];
            }
        }
    }

    /// Complete the capture on pointer release.
    ///
    /// Returns `None` when fewer than two points were captured: a click
    /// without a drag never produces an area. A rectangle that collapsed to
    /// a line or a point counts as a click.
    pub fn finish(self) -> Option<Vec<Point>> {
        if self.points.len() < 2 || self.is_flat_rectangle() {
            tracing::debug!(
                points = self.points.len(),
                "discarding capture with too few points"
            );
            return None;
        }
        Some(self.points)
    }

    fn is_flat_rectangle(&self) -> bool {
        match (self.mode, self.points.as_slice()) {
            (CaptureMode::Rectangle, [top_left, _, bottom_right, _]) => {
                top_left.x == bottom_right.x || top_left.y == bottom_right.y
            }
            _ => false,
        }
    }
}
