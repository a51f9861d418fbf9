use boardscan_core::{ImageBounds, LineSegment, Point};
use serde::{Deserialize, Serialize};

use crate::IntersectionParams;

/// A crossing of two detected lines.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct IntersectionPoint {
    pub position: Point,
    /// Indices of the two segments that produced this crossing.
    pub segments: [usize; 2],
}

/// Intersect the infinite lines through `a` and `b`.
///
/// Returns `None` when the direction cross product is below `epsilon`.
/// The solve runs in `f64`; the result is rounded back to `f32`.
pub fn intersect_lines(a: &LineSegment, b: &LineSegment, epsilon: f64) -> Option<Point> {
    let (ox1, oy1) = (a.p0.x as f64, a.p0.y as f64);
    let (ox2, oy2) = (b.p0.x as f64, b.p0.y as f64);
    let d1 = a.direction();
    let d2 = b.direction();
    let (d1x, d1y) = (d1.x as f64, d1.y as f64);
    let (d2x, d2y) = (d2.x as f64, d2.y as f64);

    let cross = d1x * d2y - d1y * d2x;
    if cross.abs() < epsilon {
        return None;
    }

    let (wx, wy) = (ox2 - ox1, oy2 - oy1);
    let t = (wx * d2y - wy * d2x) / cross;
    Some(Point::new((ox1 + d1x * t) as f32, (oy1 + d1y * t) as f32))
}

/// All in-bounds crossings over every unordered segment pair, in discovery
/// order (`i < j`, `i` outer).
pub fn find_intersections(
    segments: &[LineSegment],
    bounds: ImageBounds,
    params: &IntersectionParams,
) -> Vec<IntersectionPoint> {
    let mut out = Vec::new();
    for (i, a) in segments.iter().enumerate() {
        for (j, b) in segments.iter().enumerate().skip(i + 1) {
            let Some(p) = intersect_lines(a, b, params.parallel_epsilon) else {
                continue;
            };
            if !bounds.contains(p) {
                continue;
            }
            if params.border_margin > 0.0 && !bounds.contains_with_margin(p, params.border_margin)
            {
                continue;
            }
            out.push(IntersectionPoint {
                position: p,
                segments: [i, j],
            });
        }
    }
    out
}
