//! Exact pairwise intersection tests
//!
//! One function per unordered pair of world-space primitives. All of them
//! are pure, never fail, and simply return `false` for degenerate input
//! (zero-length segments, zero-radius circles against non-circles).
//!
//! Rectangle-rectangle uses half-open bounds; the circle and segment tests
//! treat rectangle edges as closed.

use super::primitives::{Circle, LineSegment, Rect2D};
use crate::foundation::math::{
    circle_line_solve_x, circle_solve_x, circle_solve_y, line_intersect_x, line_y_at, within, Vec2,
};
use approx::abs_diff_eq;

/// Largest sine of the angle between a segment and a point offset that
/// still counts as lying on the segment's line
const COLLINEAR_EPSILON: f32 = 1e-5;

/// Axis-aligned bounding-box overlap
pub fn rect_rect(a: &Rect2D, b: &Rect2D) -> bool {
    a.overlaps(b)
}

/// Circles collide when their centers are within the sum of their radii
///
/// A center `radius + ε` away is a miss only when the other circle has zero
/// radius; otherwise its radius extends the reach.
///
/// Two zero-radius points never collide, even when coincident.
pub fn circle_circle(a: &Circle, b: &Circle) -> bool {
    let reach = a.radius + b.radius;
    reach > 0.0 && (a.center - b.center).norm() <= reach
}

/// Circle against rectangle by edge root solving
pub fn circle_rect(circle: &Circle, rect: &Rect2D) -> bool {
    let Circle { center, radius } = *circle;
    if radius <= 0.0 {
        return false;
    }

    // Rectangle lies entirely outside the circle's bounding square
    if rect.min.y > center.y + radius
        || rect.max.y < center.y - radius
        || rect.min.x > center.x + radius
        || rect.max.x < center.x - radius
    {
        return false;
    }

    // Circle sits inside the rectangle, or the rectangle inside the circle
    if rect.contains_closed(center) || rect.corners().iter().all(|&corner| circle.contains(corner)) {
        return true;
    }

    // Left and right edges
    for x in [rect.min.x, rect.max.x] {
        if circle_solve_y(x, center, radius).any(|y| y >= rect.min.y && y <= rect.max.y) {
            return true;
        }
    }

    // Bottom and top edges
    for y in [rect.min.y, rect.max.y] {
        if circle_solve_x(y, center, radius).any(|x| x >= rect.min.x && x <= rect.max.x) {
            return true;
        }
    }

    false
}

/// Where a sloped segment crosses a vertical one
fn crosses_vertical(sloped: &LineSegment, vertical: &LineSegment) -> bool {
    let x = vertical.start.x;
    if !sloped.spans_x(x) {
        return false;
    }
    let y = line_y_at(sloped.slope(), sloped.intercept(), x);
    vertical.spans_y(y)
}

/// Whether `point` lies on the line through `segment`
fn on_supporting_line(segment: &LineSegment, point: Vec2) -> bool {
    let run = segment.end - segment.start;
    let offset = point - segment.start;
    let scale = run.norm() * offset.norm();
    scale == 0.0 || abs_diff_eq!(run.perp(&offset) / scale, 0.0, epsilon = COLLINEAR_EPSILON)
}

/// Segment against segment via slope-intercept form
pub fn segment_segment(a: &LineSegment, b: &LineSegment) -> bool {
    if a.is_degenerate() || b.is_degenerate() {
        return false;
    }

    match (a.vertical, b.vertical) {
        (true, true) => {
            a.start.x == b.start.x && a.min_y() < b.max_y() && b.min_y() < a.max_y()
        }
        (true, false) => crosses_vertical(b, a),
        (false, true) => crosses_vertical(a, b),
        (false, false) => {
            // Collinear segments touch when their x ranges overlap
            if on_supporting_line(a, b.start) && on_supporting_line(a, b.end) {
                return a.min_x() <= b.max_x() && b.min_x() <= a.max_x();
            }

            let (m1, c1) = (a.slope(), a.intercept());
            let (m2, c2) = (b.slope(), b.intercept());
            if m1 == m2 {
                return false;
            }

            let x = line_intersect_x(m1, c1, m2, c2);
            a.spans_x(x) && b.spans_x(x)
        }
    }
}

/// Segment against circle
pub fn segment_circle(segment: &LineSegment, circle: &Circle) -> bool {
    if segment.is_degenerate() || circle.radius <= 0.0 {
        return false;
    }

    if circle.contains(segment.start) || circle.contains(segment.end) {
        return true;
    }

    if segment.vertical {
        circle_solve_y(segment.start.x, circle.center, circle.radius).any(|y| segment.spans_y(y))
    } else {
        circle_line_solve_x(circle.center, circle.radius, segment.slope(), segment.intercept())
            .any(|x| segment.spans_x(x))
    }
}

/// Segment against rectangle
pub fn segment_rect(segment: &LineSegment, rect: &Rect2D) -> bool {
    if segment.is_degenerate() {
        return false;
    }

    if rect.contains_closed(segment.start) || rect.contains_closed(segment.end) {
        return true;
    }

    if segment.vertical {
        let x = segment.start.x;
        return within(x, rect.min.x, rect.max.x)
            && segment.min_y() <= rect.max.y
            && rect.min.y <= segment.max_y();
    }

    let m = segment.slope();
    let c = segment.intercept();

    // Left and right edges
    for x in [rect.min.x, rect.max.x] {
        if segment.spans_x(x) && within(line_y_at(m, c, x), rect.min.y, rect.max.y) {
            return true;
        }
    }

    // Bottom and top edges; a horizontal line never crosses them
    if m != 0.0 {
        for y in [rect.min.y, rect.max.y] {
            let x = line_intersect_x(m, c, 0.0, y);
            if segment.spans_x(x) && within(x, rect.min.x, rect.max.x) {
                return true;
            }
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::{safe_normalize, Vec2};

    fn rect(x: f32, y: f32, w: f32, h: f32) -> Rect2D {
        Rect2D::from_start(Vec2::new(x, y), Vec2::new(w, h))
    }

    fn circle(x: f32, y: f32, r: f32) -> Circle {
        Circle::new(Vec2::new(x, y), r)
    }

    fn ray(x: f32, y: f32, dx: f32, dy: f32, length: f32) -> LineSegment {
        let start = Vec2::new(x, y);
        let direction = Vec2::new(dx, dy);
        LineSegment::new(start, start + safe_normalize(direction) * length, dx == 0.0)
    }

    #[test]
    fn test_rect_rect_commutative() {
        let cases = [
            (rect(0.0, 0.0, 2.0, 2.0), rect(1.0, 1.0, 2.0, 2.0)),
            (rect(0.0, 0.0, 2.0, 2.0), rect(2.0, 2.0, 2.0, 2.0)),
            (rect(-5.0, 0.0, 1.0, 9.0), rect(-4.5, 8.0, 0.2, 0.2)),
            (rect(0.0, 0.0, 1.0, 1.0), rect(3.0, 0.0, 1.0, 1.0)),
        ];
        for (a, b) in cases {
            assert_eq!(rect_rect(&a, &b), rect_rect(&b, &a));
        }
        assert!(rect_rect(&cases[0].0, &cases[0].1));
        assert!(!rect_rect(&cases[1].0, &cases[1].1));
        assert!(rect_rect(&cases[2].0, &cases[2].1));
    }

    #[test]
    fn test_circle_circle_boundary() {
        let a = circle(0.0, 0.0, 5.0);
        assert!(circle_circle(&a, &circle(5.0, 0.0, 0.0)));
        assert!(!circle_circle(&a, &circle(5.0001, 0.0, 0.0)));
        assert!(circle_circle(&circle(5.0, 0.0, 0.0), &a));
    }

    #[test]
    fn test_circle_circle_sums_radii() {
        assert!(circle_circle(&circle(0.0, 0.0, 2.0), &circle(5.0, 0.0, 3.0)));
        assert!(!circle_circle(&circle(0.0, 0.0, 2.0), &circle(5.1, 0.0, 3.0)));
    }

    #[test]
    fn test_zero_radius_points_never_collide() {
        let point = circle(1.0, 1.0, 0.0);
        assert!(!circle_circle(&point, &point));
    }

    #[test]
    fn test_circle_rect_corner() {
        let r = rect(0.0, 0.0, 2.0, 2.0);
        assert!(!circle_rect(&circle(0.0, 0.0, 0.0), &r));
        assert!(circle_rect(&circle(0.0, 0.0, 0.5), &r));
        assert!(circle_rect(&circle(2.0, 2.0, 0.1), &r));
    }

    #[test]
    fn test_circle_rect_cases() {
        let r = rect(0.0, 0.0, 2.0, 2.0);
        // Crossing the right edge
        assert!(circle_rect(&circle(3.0, 1.0, 1.5), &r));
        // Just short of the right edge
        assert!(!circle_rect(&circle(3.0, 1.0, 0.9), &r));
        // Near a corner diagonally but outside the circle
        assert!(!circle_rect(&circle(3.0, 3.0, 1.2), &r));
        // Circle inside the rectangle
        assert!(circle_rect(&circle(1.0, 1.0, 0.25), &rect(-5.0, -5.0, 10.0, 10.0)));
        // Rectangle inside the circle
        assert!(circle_rect(&circle(1.0, 1.0, 10.0), &r));
        // Small rectangle in the bounding square's corner but outside the circle
        assert!(!circle_rect(&circle(0.0, 0.0, 5.0), &rect(4.0, 4.0, 0.5, 0.5)));
    }

    #[test]
    fn test_segment_segment_crossing() {
        let a = ray(0.0, 0.0, 1.0, 1.0, 10.0);
        let b = ray(0.0, 4.0, 1.0, -1.0, 10.0);
        assert!(segment_segment(&a, &b));
        assert!(segment_segment(&b, &a));
    }

    #[test]
    fn test_segment_segment_checks_both_spans() {
        // Lines meet at x = 5, beyond the short segment
        let long = ray(0.0, 0.0, 1.0, 1.0, 20.0);
        let short = ray(0.0, 10.0, 1.0, -1.0, 2.0);
        assert!(!segment_segment(&long, &short));
        assert!(!segment_segment(&short, &long));
    }

    #[test]
    fn test_segment_segment_vertical_cases() {
        let vertical = ray(2.0, -1.0, 0.0, 1.0, 4.0);
        let horizontal = ray(0.0, 1.0, 1.0, 0.0, 5.0);
        assert!(segment_segment(&vertical, &horizontal));
        assert!(segment_segment(&horizontal, &vertical));

        // Horizontal segment ends before reaching x = 2
        let short = ray(0.0, 1.0, 1.0, 0.0, 1.0);
        assert!(!segment_segment(&vertical, &short));

        let same_line = ray(2.0, 2.0, 0.0, 1.0, 4.0);
        let other_line = ray(2.5, 0.0, 0.0, 1.0, 4.0);
        assert!(segment_segment(&vertical, &same_line));
        assert!(!segment_segment(&vertical, &other_line));
    }

    #[test]
    fn test_segment_segment_parallel() {
        let a = ray(0.0, 0.0, 1.0, 1.0, 4.0);
        let collinear = ray(2.0, 2.0, 1.0, 1.0, 4.0);
        let offset = ray(0.0, 1.0, 1.0, 1.0, 4.0);
        assert!(segment_segment(&a, &collinear));
        assert!(!segment_segment(&a, &offset));
    }

    #[test]
    fn test_segment_segment_collinear_off_axis() {
        let a = ray(0.0, 0.0, 1.0, 3.0, 10.0);
        let overlapping = ray(1.0, 3.0, 1.0, 3.0, 10.0);
        let disjoint = ray(10.0, 30.0, 1.0, 3.0, 10.0);
        assert!(segment_segment(&a, &overlapping));
        assert!(segment_segment(&overlapping, &a));
        assert!(!segment_segment(&a, &disjoint));
    }

    #[test]
    fn test_near_vertical_ray_away_from_origin() {
        let direction = Vec2::new(1e-9, 1.0);
        let start = Vec2::new(5.0, 0.0);
        let segment = LineSegment::new(start, start + safe_normalize(direction) * 10.0, false);

        assert!(segment_rect(&segment, &rect(4.0, 2.0, 2.0, 2.0)));
        assert!(segment_circle(&segment, &circle(5.0, 5.0, 1.0)));
        assert!(segment_segment(&segment, &ray(0.0, 5.0, 1.0, 0.0, 10.0)));
        assert!(!segment_rect(&segment, &rect(6.5, 2.0, 2.0, 2.0)));
    }

    #[test]
    fn test_zero_length_segment_never_collides() {
        let point = ray(1.0, 1.0, 1.0, 0.0, 0.0);
        assert!(!segment_segment(&point, &point));
        assert!(!segment_circle(&point, &circle(1.0, 1.0, 5.0)));
        assert!(!segment_rect(&point, &rect(0.0, 0.0, 4.0, 4.0)));
    }

    #[test]
    fn test_segment_circle() {
        let c = circle(5.0, 0.0, 1.0);
        // Passes straight through
        assert!(segment_circle(&ray(0.0, 0.0, 1.0, 0.0, 10.0), &c));
        // Endpoint inside
        assert!(segment_circle(&ray(0.0, 0.0, 1.0, 0.0, 4.5), &c));
        // Stops short
        assert!(!segment_circle(&ray(0.0, 0.0, 1.0, 0.0, 3.0), &c));
        // Misses above
        assert!(!segment_circle(&ray(0.0, 2.0, 1.0, 0.0, 10.0), &c));
        // Vertical through the circle
        assert!(segment_circle(&ray(5.0, -5.0, 0.0, 1.0, 10.0), &c));
        assert!(!segment_circle(&ray(6.5, -5.0, 0.0, 1.0, 10.0), &c));
    }

    #[test]
    fn test_segment_circle_diagonal() {
        let c = circle(5.0, 5.0, 1.0);
        // Through the center, endpoints far outside
        assert!(segment_circle(&ray(0.0, 0.0, 1.0, 1.0, 20.0), &c));
        // Parallel line about 1.41 from the center
        assert!(!segment_circle(&ray(0.0, 2.0, 1.0, 1.0, 20.0), &c));
        // Right line, but stops before the circle
        assert!(!segment_circle(&ray(0.0, 0.0, 1.0, 1.0, 3.0), &c));
        // Descending diagonal crossing the circle
        assert!(segment_circle(&ray(0.0, 10.0, 1.0, -1.0, 20.0), &c));
    }

    #[test]
    fn test_segment_rect_through() {
        let r = Rect2D {
            min: Vec2::new(3.0, -1.0),
            max: Vec2::new(7.0, 1.0),
        };
        assert!(segment_rect(&ray(0.0, 0.0, 1.0, 0.0, 10.0), &r));
        assert!(!segment_rect(&ray(0.0, 2.0, 1.0, 0.0, 10.0), &r));
        assert!(!segment_rect(&ray(0.0, 0.0, 1.0, 0.0, 2.0), &r));
    }

    #[test]
    fn test_segment_rect_endpoint_inside() {
        let r = rect(0.0, 0.0, 4.0, 4.0);
        assert!(segment_rect(&ray(2.0, 2.0, 1.0, 1.0, 0.5), &r));
    }

    #[test]
    fn test_segment_rect_sloped_and_vertical() {
        let r = rect(0.0, 0.0, 2.0, 2.0);
        // Shallow slope entering through the left edge
        assert!(segment_rect(&ray(-1.0, 0.5, 2.0, 1.0, 10.0), &r));
        // Steep negative slope passing beside the rectangle
        assert!(!segment_rect(&ray(3.0, 3.0, 1.0, -1.0, 5.0), &r));
        // Vertical through the middle
        assert!(segment_rect(&ray(1.0, -3.0, 0.0, 1.0, 10.0), &r));
        // Vertical beside it
        assert!(!segment_rect(&ray(2.5, -3.0, 0.0, 1.0, 10.0), &r));
    }

    #[test]
    fn test_segment_rect_steep_through_top_and_bottom() {
        let r = rect(0.0, 0.0, 4.0, 4.0);
        // Slope 8: spans x 1.5..2.5, so only the bottom and top edges are crossed
        let steep = LineSegment::new(Vec2::new(1.5, -2.0), Vec2::new(2.5, 6.0), false);
        assert!(segment_rect(&steep, &r));

        let beside = LineSegment::new(Vec2::new(6.5, -2.0), Vec2::new(7.5, 6.0), false);
        assert!(!segment_rect(&beside, &r));
    }
}
