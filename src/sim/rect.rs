//! Axis-aligned rectangle geometry for bricks, paddle, and playfield
//!
//! Everything the collision code needs from a rectangle: circle overlap
//! tests and per-edge circle intersection, used to classify a brick
//! contact as vertical (top/bottom edge) or horizontal (left/right edge).

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle (top-left corner + size, +y down)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Build a rect from its center point and size
    pub fn from_center(center: Vec2, w: f32, h: f32) -> Self {
        Self {
            x: center.x - w / 2.0,
            y: center.y - h / 2.0,
            w,
            h,
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Check if a point is inside the rectangle (edges inclusive)
    pub fn contains_point(&self, point: Vec2) -> bool {
        point.x >= self.left()
            && point.x <= self.right()
            && point.y >= self.top()
            && point.y <= self.bottom()
    }

    /// Check if a circle overlaps this rectangle
    ///
    /// Clamps the circle center onto the rect and compares the distance to
    /// the closest point against the radius.
    pub fn overlaps_circle(&self, center: Vec2, radius: f32) -> bool {
        let closest = Vec2::new(
            center.x.clamp(self.left(), self.right()),
            center.y.clamp(self.top(), self.bottom()),
        );
        (center - closest).length_squared() <= radius * radius
    }

    /// Top edge as a horizontal segment: (left end, right end)
    pub fn top_edge(&self) -> (Vec2, Vec2) {
        (
            Vec2::new(self.left(), self.top()),
            Vec2::new(self.right(), self.top()),
        )
    }

    /// Bottom edge as a horizontal segment
    pub fn bottom_edge(&self) -> (Vec2, Vec2) {
        (
            Vec2::new(self.left(), self.bottom()),
            Vec2::new(self.right(), self.bottom()),
        )
    }

    /// Left edge as a vertical segment: (top end, bottom end)
    pub fn left_edge(&self) -> (Vec2, Vec2) {
        (
            Vec2::new(self.left(), self.top()),
            Vec2::new(self.left(), self.bottom()),
        )
    }

    /// Right edge as a vertical segment
    pub fn right_edge(&self) -> (Vec2, Vec2) {
        (
            Vec2::new(self.right(), self.top()),
            Vec2::new(self.right(), self.bottom()),
        )
    }

    /// Does the circle touch the top or bottom edge of this rect?
    ///
    /// Used to classify a brick contact as vertical. Corner overlaps count:
    /// the edge segments include their endpoints, so a corner hit reports
    /// true here and the caller reflects vertically.
    pub fn circle_hits_horizontal_edge(&self, center: Vec2, radius: f32) -> bool {
        let (a, b) = self.top_edge();
        if segment_intersects_circle(a, b, center, radius) {
            return true;
        }
        let (a, b) = self.bottom_edge();
        segment_intersects_circle(a, b, center, radius)
    }

    /// Does the circle touch the left or right edge of this rect?
    pub fn circle_hits_vertical_edge(&self, center: Vec2, radius: f32) -> bool {
        let (a, b) = self.left_edge();
        if segment_intersects_circle(a, b, center, radius) {
            return true;
        }
        let (a, b) = self.right_edge();
        segment_intersects_circle(a, b, center, radius)
    }
}

/// Check if a line segment comes within `radius` of `center`
///
/// Projects the center onto the segment, clamps to the endpoints, and
/// compares the closest distance to the radius.
pub fn segment_intersects_circle(a: Vec2, b: Vec2, center: Vec2, radius: f32) -> bool {
    let seg = b - a;
    let len_sq = seg.length_squared();
    if len_sq < 0.0001 {
        // Degenerate segment, treat as a point
        return (center - a).length_squared() <= radius * radius;
    }

    let t = ((center - a).dot(seg) / len_sq).clamp(0.0, 1.0);
    let closest = a + seg * t;
    (center - closest).length_squared() <= radius * radius
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_accessors() {
        let r = Rect::new(10.0, 20.0, 40.0, 20.0);
        assert_eq!(r.left(), 10.0);
        assert_eq!(r.right(), 50.0);
        assert_eq!(r.top(), 20.0);
        assert_eq!(r.bottom(), 40.0);
        assert_eq!(r.center(), Vec2::new(30.0, 30.0));
    }

    #[test]
    fn test_from_center() {
        let r = Rect::from_center(Vec2::new(100.0, 500.0), 60.0, 10.0);
        assert_eq!(r.x, 70.0);
        assert_eq!(r.y, 495.0);
        assert_eq!(r.center(), Vec2::new(100.0, 500.0));
    }

    #[test]
    fn test_overlaps_circle_inside() {
        let r = Rect::new(0.0, 0.0, 40.0, 20.0);
        // Center inside the rect
        assert!(r.overlaps_circle(Vec2::new(20.0, 10.0), 5.0));
    }

    #[test]
    fn test_overlaps_circle_edge_and_miss() {
        let r = Rect::new(0.0, 0.0, 40.0, 20.0);
        // Touching the bottom edge from below
        assert!(r.overlaps_circle(Vec2::new(20.0, 28.0), 10.0));
        // Clearly below
        assert!(!r.overlaps_circle(Vec2::new(20.0, 35.0), 10.0));
        // Near a corner: distance from (45,25) to corner (40,20) is ~7.07
        assert!(r.overlaps_circle(Vec2::new(45.0, 25.0), 8.0));
        assert!(!r.overlaps_circle(Vec2::new(45.0, 25.0), 7.0));
    }

    #[test]
    fn test_circle_edge_classification() {
        let r = Rect::new(0.0, 0.0, 40.0, 20.0);

        // Ball below the middle of the bottom edge: horizontal edge only
        let below = Vec2::new(20.0, 28.0);
        assert!(r.circle_hits_horizontal_edge(below, 10.0));
        assert!(!r.circle_hits_vertical_edge(below, 10.0));

        // Ball right of the middle of the right edge: vertical edge only
        let beside = Vec2::new(48.0, 10.0);
        assert!(r.circle_hits_vertical_edge(beside, 10.0));
        assert!(!r.circle_hits_horizontal_edge(beside, 10.0));

        // Corner overlap touches both edge families
        let corner = Vec2::new(45.0, 25.0);
        assert!(r.circle_hits_horizontal_edge(corner, 8.0));
        assert!(r.circle_hits_vertical_edge(corner, 8.0));
    }

    #[test]
    fn test_segment_intersects_circle() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(40.0, 0.0);
        // Directly below the middle of the segment
        assert!(segment_intersects_circle(a, b, Vec2::new(20.0, 5.0), 6.0));
        assert!(!segment_intersects_circle(a, b, Vec2::new(20.0, 5.0), 4.0));
        // Past the endpoint, closest point clamps to b
        assert!(segment_intersects_circle(a, b, Vec2::new(44.0, 3.0), 6.0));
        assert!(!segment_intersects_circle(a, b, Vec2::new(44.0, 3.0), 4.0));
    }
}
