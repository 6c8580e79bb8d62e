//! World-space collision primitives
//!
//! These are the temporary geometries a body resolves to when it is tested.
//! They are produced fresh on every query and never cached.

use crate::foundation::math::{line_intercept, Vec2};

/// An axis-aligned rectangle, half-open: `[min, max)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect2D {
    /// Lower-left corner (inclusive)
    pub min: Vec2,
    /// Upper-right corner (exclusive)
    pub max: Vec2,
}

impl Rect2D {
    /// Creates a rectangle from a start corner and its dimensions
    pub fn from_start(start: Vec2, dimensions: Vec2) -> Self {
        Self {
            min: start,
            max: start + dimensions,
        }
    }

    /// Width and height
    pub fn dimensions(&self) -> Vec2 {
        self.max - self.min
    }

    /// Half-open overlap: touching edges do not overlap
    pub fn overlaps(&self, other: &Rect2D) -> bool {
        self.min.x < other.max.x
            && other.min.x < self.max.x
            && self.min.y < other.max.y
            && other.min.y < self.max.y
    }

    /// Half-open point containment
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x && point.x < self.max.x && point.y >= self.min.y && point.y < self.max.y
    }

    /// Closed point containment, used where edges count as solid
    pub fn contains_closed(&self, point: Vec2) -> bool {
        point.x >= self.min.x && point.x <= self.max.x && point.y >= self.min.y && point.y <= self.max.y
    }

    /// The four corners
    pub fn corners(&self) -> [Vec2; 4] {
        [
            self.min,
            Vec2::new(self.max.x, self.min.y),
            Vec2::new(self.min.x, self.max.y),
            self.max,
        ]
    }
}

/// A circle in world space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    /// Center position
    pub center: Vec2,
    /// Radius (>= 0)
    pub radius: f32,
}

impl Circle {
    /// Creates a new circle
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Whether `point` lies on or inside the circle
    pub fn contains(&self, point: Vec2) -> bool {
        (point - self.center).norm() <= self.radius
    }
}

/// A line segment in world space
///
/// `vertical` follows the configured direction (`direction.x == 0`), and is
/// also forced on when the resolved endpoints share an x coordinate, so the
/// narrow phase never divides by a zero run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSegment {
    /// Start point
    pub start: Vec2,
    /// End point
    pub end: Vec2,
    /// Whether the segment has no horizontal run
    pub vertical: bool,
}

impl LineSegment {
    /// Creates a new segment
    ///
    /// A tiny horizontal step can vanish once added to a large start
    /// coordinate; such a segment is treated as vertical.
    pub fn new(start: Vec2, end: Vec2, vertical: bool) -> Self {
        Self {
            start,
            end,
            vertical: vertical || start.x == end.x,
        }
    }

    /// A zero-length segment never collides
    pub fn is_degenerate(&self) -> bool {
        self.start == self.end
    }

    /// Slope of the supporting line (meaningless when vertical)
    pub fn slope(&self) -> f32 {
        let run = self.end - self.start;
        run.y / run.x
    }

    /// Intercept of the supporting line through the start point
    pub fn intercept(&self) -> f32 {
        line_intercept(self.start, self.slope())
    }

    /// Smallest x coordinate
    pub fn min_x(&self) -> f32 {
        self.start.x.min(self.end.x)
    }

    /// Largest x coordinate
    pub fn max_x(&self) -> f32 {
        self.start.x.max(self.end.x)
    }

    /// Smallest y coordinate
    pub fn min_y(&self) -> f32 {
        self.start.y.min(self.end.y)
    }

    /// Largest y coordinate
    pub fn max_y(&self) -> f32 {
        self.start.y.max(self.end.y)
    }

    /// Whether `x` falls within the horizontal span (closed)
    pub fn spans_x(&self, x: f32) -> bool {
        x >= self.min_x() && x <= self.max_x()
    }

    /// Whether `y` falls within the vertical span (closed)
    pub fn spans_y(&self, y: f32) -> bool {
        y >= self.min_y() && y <= self.max_y()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_overlap_is_half_open() {
        let a = Rect2D::from_start(Vec2::new(0.0, 0.0), Vec2::new(2.0, 2.0));
        let touching = Rect2D::from_start(Vec2::new(2.0, 0.0), Vec2::new(2.0, 2.0));
        let inside = Rect2D::from_start(Vec2::new(1.0, 1.0), Vec2::new(2.0, 2.0));

        assert!(!a.overlaps(&touching));
        assert!(a.overlaps(&inside));
        assert!(a.contains(Vec2::new(0.0, 0.0)));
        assert!(!a.contains(Vec2::new(2.0, 1.0)));
        assert!(a.contains_closed(Vec2::new(2.0, 1.0)));
    }

    #[test]
    fn test_collapsed_run_is_vertical() {
        let segment = LineSegment::new(Vec2::new(5.0, 0.0), Vec2::new(5.0, 10.0), false);
        assert!(segment.vertical);

        let sloped = LineSegment::new(Vec2::new(5.0, 0.0), Vec2::new(5.5, 10.0), false);
        assert!(!sloped.vertical);
    }

    #[test]
    fn test_segment_spans() {
        let segment = LineSegment::new(Vec2::new(4.0, 1.0), Vec2::new(0.0, 3.0), false);
        assert_eq!(segment.min_x(), 0.0);
        assert_eq!(segment.max_y(), 3.0);
        assert!(segment.spans_x(2.0));
        assert!(!segment.spans_y(0.5));
        assert_eq!(segment.slope(), -0.5);
        assert_eq!(segment.intercept(), 3.0);
    }
}
