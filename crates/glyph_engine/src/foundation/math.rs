//! Math utilities and types
//!
//! Provides the 2D vector types used by the character grid and the
//! line/circle equation solvers the narrow phase is built on.

pub use nalgebra::Vector2;

/// 2D vector type (world space, unrounded)
pub type Vec2 = Vector2<f32>;

/// 2D integer vector type (grid cells)
pub type Vec2i = Vector2<i32>;

/// Round a world position to the nearest grid cell
pub fn to_grid(position: Vec2) -> Vec2i {
    // Saturating float-to-int casts are the intended behaviour for far-off positions
    #[allow(clippy::cast_possible_truncation)]
    Vec2i::new(position.x.round() as i32, position.y.round() as i32)
}

/// Convert a grid cell back to world space
pub fn from_grid(cell: Vec2i) -> Vec2 {
    #[allow(clippy::cast_precision_loss)]
    Vec2::new(cell.x as f32, cell.y as f32)
}

/// Normalize a vector, mapping the zero vector to itself instead of NaN
pub fn safe_normalize(v: Vec2) -> Vec2 {
    let length = v.norm();
    if length == 0.0 {
        Vec2::zeros()
    } else {
        v / length
    }
}

/// Real roots of a quadratic, in ascending order
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Roots {
    /// No real solution
    None,
    /// One (double) root
    One(f32),
    /// Two distinct roots
    Two(f32, f32),
}

impl Roots {
    /// Iterate the roots in ascending order
    pub fn iter(self) -> impl Iterator<Item = f32> {
        let (first, second) = match self {
            Self::None => (None, None),
            Self::One(r) => (Some(r), None),
            Self::Two(a, b) => (Some(a), Some(b)),
        };
        first.into_iter().chain(second)
    }

    /// Whether any root satisfies `predicate`
    pub fn any(self, predicate: impl FnMut(f32) -> bool) -> bool {
        self.iter().any(predicate)
    }

    /// Number of real roots
    pub fn count(self) -> usize {
        match self {
            Self::None => 0,
            Self::One(_) => 1,
            Self::Two(..) => 2,
        }
    }
}

/// Solve `a*t^2 + b*t + c = 0` for real `t`
///
/// A zero `a` falls back to the linear solution.
pub fn solve_quadratic(a: f32, b: f32, c: f32) -> Roots {
    if a == 0.0 {
        if b == 0.0 {
            return Roots::None;
        }
        return Roots::One(-c / b);
    }

    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        Roots::None
    } else if discriminant == 0.0 {
        Roots::One(-b / (2.0 * a))
    } else {
        let sqrt_discriminant = discriminant.sqrt();
        let t1 = (-b - sqrt_discriminant) / (2.0 * a);
        let t2 = (-b + sqrt_discriminant) / (2.0 * a);
        Roots::Two(t1.min(t2), t1.max(t2))
    }
}

/// Solve the circle equation for `y` on the vertical line `x`
pub fn circle_solve_y(x: f32, center: Vec2, radius: f32) -> Roots {
    let dx = x - center.x;
    let remainder = radius * radius - dx * dx;
    if remainder < 0.0 {
        Roots::None
    } else if remainder == 0.0 {
        Roots::One(center.y)
    } else {
        let h = remainder.sqrt();
        Roots::Two(center.y - h, center.y + h)
    }
}

/// Solve the circle equation for `x` on the horizontal line `y`
pub fn circle_solve_x(y: f32, center: Vec2, radius: f32) -> Roots {
    let dy = y - center.y;
    let remainder = radius * radius - dy * dy;
    if remainder < 0.0 {
        Roots::None
    } else if remainder == 0.0 {
        Roots::One(center.x)
    } else {
        let w = remainder.sqrt();
        Roots::Two(center.x - w, center.x + w)
    }
}

/// Solve for the `x` coordinates where the line `y = m*x + c` meets a circle
pub fn circle_line_solve_x(center: Vec2, radius: f32, m: f32, c: f32) -> Roots {
    // (x - cx)^2 + (m*x + c - cy)^2 = r^2
    let k = c - center.y;
    let a = 1.0 + m * m;
    let b = 2.0 * (m * k - center.x);
    let constant = center.x * center.x + k * k - radius * radius;
    solve_quadratic(a, b, constant)
}

/// Intercept of the line with slope `m` through `point`
pub fn line_intercept(point: Vec2, m: f32) -> f32 {
    point.y - m * point.x
}

/// Evaluate `y = m*x + c`
pub fn line_y_at(m: f32, c: f32, x: f32) -> f32 {
    m * x + c
}

/// `x` coordinate where two non-parallel lines meet
pub fn line_intersect_x(m1: f32, c1: f32, m2: f32, c2: f32) -> f32 {
    (c2 - c1) / (m1 - m2)
}

/// Closed interval membership with unordered bounds
pub fn within(value: f32, a: f32, b: f32) -> bool {
    value >= a.min(b) && value <= a.max(b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_to_grid_rounds_to_nearest() {
        assert_eq!(to_grid(Vec2::new(1.4, -1.6)), Vec2i::new(1, -2));
        assert_eq!(to_grid(Vec2::new(2.5, 0.49)), Vec2i::new(3, 0));
    }

    #[test]
    fn test_safe_normalize_zero() {
        assert_eq!(safe_normalize(Vec2::zeros()), Vec2::zeros());
        assert_relative_eq!(safe_normalize(Vec2::new(3.0, 4.0)), Vec2::new(0.6, 0.8), epsilon = 1e-6);
    }

    #[test]
    fn test_solve_quadratic_root_counts() {
        assert_eq!(solve_quadratic(1.0, 0.0, 1.0), Roots::None);
        assert_eq!(solve_quadratic(1.0, -2.0, 1.0), Roots::One(1.0));
        assert_eq!(solve_quadratic(1.0, 0.0, -4.0), Roots::Two(-2.0, 2.0));
        assert_eq!(solve_quadratic(0.0, 2.0, -4.0), Roots::One(2.0));
    }

    #[test]
    fn test_circle_solvers() {
        let center = Vec2::new(1.0, 1.0);
        assert_eq!(circle_solve_y(4.0, center, 2.0).count(), 0);
        assert_eq!(circle_solve_y(3.0, center, 2.0), Roots::One(1.0));
        assert_eq!(circle_solve_x(1.0, center, 2.0), Roots::Two(-1.0, 3.0));
    }

    #[test]
    fn test_circle_line_solve_horizontal_chord() {
        // y = 0 through a unit circle at the origin
        let roots = circle_line_solve_x(Vec2::zeros(), 1.0, 0.0, 0.0);
        let xs: Vec<f32> = roots.iter().collect();
        assert_eq!(xs.len(), 2);
        assert_relative_eq!(xs[0], -1.0, epsilon = 1e-6);
        assert_relative_eq!(xs[1], 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_line_helpers() {
        let c1 = line_intercept(Vec2::new(0.0, 0.0), 1.0);
        let c2 = line_intercept(Vec2::new(0.0, 4.0), -1.0);
        let x = line_intersect_x(1.0, c1, -1.0, c2);
        assert_relative_eq!(x, 2.0);
        assert_relative_eq!(line_y_at(1.0, c1, x), 2.0);
        assert!(within(1.0, 2.0, 0.0));
        assert!(!within(2.1, 2.0, 0.0));
    }
}
