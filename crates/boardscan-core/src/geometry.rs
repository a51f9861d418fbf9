use nalgebra::{Point2, Vector2};
use serde::{Deserialize, Serialize};

/// A 2-D image-space coordinate (x to the right, y down).
pub type Point = Point2<f32>;

/// A detected line segment, given by its two endpoints in image space.
///
/// Serialized as a flat `[x0, y0, x1, y1]` array, which is the format line
/// detectors usually emit.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f32; 4]", into = "[f32; 4]")]
pub struct LineSegment {
    pub p0: Point,
    pub p1: Point,
}

impl LineSegment {
    pub fn new(p0: Point, p1: Point) -> Self {
        Self { p0, p1 }
    }

    /// Build a segment from `x0, y0, x1, y1`.
    pub fn from_coords(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self::new(Point2::new(x0, y0), Point2::new(x1, y1))
    }

    /// Direction vector `p1 - p0` (not normalized).
    #[inline]
    pub fn direction(&self) -> Vector2<f32> {
        self.p1 - self.p0
    }

    /// Point on the infinite line through the segment at parameter `t`
    /// (`t = 0` is `p0`, `t = 1` is `p1`).
    #[inline]
    pub fn point_at(&self, t: f32) -> Point {
        self.p0 + self.direction() * t
    }

    pub fn length(&self) -> f32 {
        self.direction().norm()
    }
}

impl From<[f32; 4]> for LineSegment {
    fn from(c: [f32; 4]) -> Self {
        Self::from_coords(c[0], c[1], c[2], c[3])
    }
}

impl From<LineSegment> for [f32; 4] {
    fn from(s: LineSegment) -> Self {
        [s.p0.x, s.p0.y, s.p1.x, s.p1.y]
    }
}

/// Width/height of the image a set of segments was detected in.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ImageBounds {
    pub width: f32,
    pub height: f32,
}

impl ImageBounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// `0 <= x < width && 0 <= y < height`.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= 0.0 && p.y >= 0.0 && p.x < self.width && p.y < self.height
    }

    /// `margin < x < width - margin && margin < y < height - margin`.
    /// Points exactly on the margin are outside.
    #[inline]
    pub fn contains_with_margin(&self, p: Point, margin: f32) -> bool {
        p.x > margin
            && p.y > margin
            && p.x < self.width - margin
            && p.y < self.height - margin
    }
}

/// Integer pixel rectangle `[x, x + width) × [y, y + height)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl PixelRect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle spanned by two opposite corners, rounded to the nearest
    /// pixel. Negative coordinates are clamped to zero.
    pub fn from_corners(a: Point, b: Point) -> Self {
        let x0 = a.x.min(b.x).round().max(0.0) as u32;
        let y0 = a.y.min(b.y).round().max(0.0) as u32;
        let x1 = a.x.max(b.x).round().max(0.0) as u32;
        let y1 = a.y.max(b.y).round().max(0.0) as u32;
        Self::new(x0, y0, x1 - x0, y1 - y0)
    }

    #[inline]
    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Intersect with `[0, width) × [0, height)`.
    pub fn clip(&self, width: u32, height: u32) -> Self {
        let x0 = self.x.min(width);
        let y0 = self.y.min(height);
        let x1 = self.x.saturating_add(self.width).min(width);
        let y1 = self.y.saturating_add(self.height).min(height);
        Self::new(x0, y0, x1 - x0, y1 - y0)
    }

    /// Sub-rectangle covering the `[start, end)` fraction of this rectangle
    /// along both axes, relative to its own origin.
    pub fn inner_fraction(&self, start: f32, end: f32) -> Self {
        let x0 = (self.width as f32 * start) as u32;
        let y0 = (self.height as f32 * start) as u32;
        let x1 = ((self.width as f32 * end) as u32).min(self.width);
        let y1 = ((self.height as f32 * end) as u32).min(self.height);
        Self::new(x0, y0, x1.saturating_sub(x0), y1.saturating_sub(y0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn segment_serializes_as_flat_array() {
        let s = LineSegment::from_coords(1.0, 2.0, 3.0, 4.0);
        let json = serde_json::to_string(&s).expect("serialize");
        assert_eq!(json, "[1.0,2.0,3.0,4.0]");
        let back: LineSegment = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, s);
    }

    #[test]
    fn point_at_walks_the_infinite_line() {
        let s = LineSegment::from_coords(0.0, 0.0, 10.0, 5.0);
        let p = s.point_at(2.0);
        assert_abs_diff_eq!(p.x, 20.0);
        assert_abs_diff_eq!(p.y, 10.0);
    }

    #[test]
    fn bounds_are_half_open() {
        let b = ImageBounds::new(100.0, 50.0);
        assert!(b.contains(Point::new(0.0, 0.0)));
        assert!(!b.contains(Point::new(100.0, 10.0)));
        assert!(!b.contains(Point::new(10.0, -0.1)));
        assert!(!b.contains_with_margin(Point::new(10.0, 10.0), 25.0));

        let wide = ImageBounds::new(100.0, 100.0);
        assert!(wide.contains_with_margin(Point::new(25.5, 74.5), 25.0));
        assert!(!wide.contains_with_margin(Point::new(25.0, 50.0), 25.0));
        assert!(!wide.contains_with_margin(Point::new(50.0, 75.0), 25.0));
    }

    #[test]
    fn rect_from_corners_and_clip() {
        let r = PixelRect::from_corners(Point::new(50.2, 10.0), Point::new(9.6, 60.4));
        assert_eq!(r, PixelRect::new(10, 10, 40, 50));
        assert_eq!(r.clip(30, 40), PixelRect::new(10, 10, 20, 30));
        assert_eq!(r.clip(5, 5).area(), 0);
    }

    #[test]
    fn inner_fraction_takes_the_central_part() {
        let r = PixelRect::new(100, 100, 50, 50);
        assert_eq!(r.inner_fraction(0.2, 0.8), PixelRect::new(10, 10, 30, 30));
    }
}
