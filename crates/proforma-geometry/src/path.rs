use std::fmt::Write;

use crate::point::Point;

/// Render a point list as a closed SVG path: `M x y L x y ... Z`.
///
/// An empty list renders as an empty string.
pub fn serialize_path(points: &[Point]) -> String {
    let Some((first, rest)) = points.split_first() else {
        return String::new();
    };

    let mut path = format!("M {} {}", first.x, first.y);
    for point in rest {
        // Writing into a String cannot fail.
        let _ = write!(path, " L {} {}", point.x, point.y);
    }
    path.push_str(" Z");
    path
}
