//! High-level collision shape abstractions
//!
//! Shapes store their geometry relative to the owning entity and are
//! resolved to world space on demand during collision tests. Nothing here
//! caches a world position: the owner may move between two queries in the
//! same tick.

use super::narrow_phase;
use super::primitives::{Circle, LineSegment, Rect2D};
use crate::foundation::math::{from_grid, safe_normalize, to_grid, Vec2};
use crate::physics::error::CollisionError;
use serde::{Deserialize, Serialize};

/// Which point of a rectangle sits on its owner's grid position
///
/// Y grows upward, so `Top*` anchors hang the rectangle below the owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Anchor {
    /// Lower-left corner on the owner
    #[default]
    BottomLeft,
    /// Lower-right corner on the owner
    BottomRight,
    /// Upper-left corner on the owner
    TopLeft,
    /// Upper-right corner on the owner
    TopRight,
    /// Center on the owner
    Center,
}

impl Anchor {
    /// Offset from the owner position to the rectangle's lower-left corner
    pub fn correction(self, dimensions: Vec2) -> Vec2 {
        match self {
            Self::BottomLeft => Vec2::zeros(),
            Self::BottomRight => Vec2::new(-dimensions.x, 0.0),
            Self::TopLeft => Vec2::new(0.0, -dimensions.y),
            Self::TopRight => -dimensions,
            Self::Center => -dimensions * 0.5,
        }
    }
}

/// Axis-aligned rectangle snapped to the owner's grid cell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RectangleDef")]
pub struct RectangleShape {
    offset: Vec2,
    dimensions: Vec2,
    anchor: Anchor,
}

#[derive(Deserialize)]
struct RectangleDef {
    #[serde(default = "Vec2::zeros")]
    offset: Vec2,
    dimensions: Vec2,
    #[serde(default)]
    anchor: Anchor,
}

impl TryFrom<RectangleDef> for RectangleShape {
    type Error = CollisionError;

    fn try_from(def: RectangleDef) -> Result<Self, Self::Error> {
        Self::new(def.offset, def.dimensions, def.anchor)
    }
}

fn check_dimensions(dimensions: Vec2) -> Result<Vec2, CollisionError> {
    // Written so NaN fails too
    if dimensions.x > 0.0 && dimensions.y > 0.0 {
        Ok(dimensions)
    } else {
        Err(CollisionError::InvalidDimensions {
            width: dimensions.x,
            height: dimensions.y,
        })
    }
}

impl RectangleShape {
    /// Creates a rectangle; both dimensions must be positive
    pub fn new(offset: Vec2, dimensions: Vec2, anchor: Anchor) -> Result<Self, CollisionError> {
        Ok(Self {
            offset,
            dimensions: check_dimensions(dimensions)?,
            anchor,
        })
    }

    /// Local offset
    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    /// Set the local offset
    pub fn set_offset(&mut self, offset: Vec2) {
        self.offset = offset;
    }

    /// Width and height
    pub fn dimensions(&self) -> Vec2 {
        self.dimensions
    }

    /// Set width and height; both must be positive
    pub fn set_dimensions(&mut self, dimensions: Vec2) -> Result<(), CollisionError> {
        self.dimensions = check_dimensions(dimensions)?;
        Ok(())
    }

    /// Anchor mode
    pub fn anchor(&self) -> Anchor {
        self.anchor
    }

    /// Set the anchor mode
    pub fn set_anchor(&mut self, anchor: Anchor) {
        self.anchor = anchor;
    }

    /// World-space bounds for an owner at `owner_position`
    ///
    /// The owner position is rounded to its grid cell first.
    pub fn global_bounds(&self, owner_position: Vec2) -> Rect2D {
        let start = from_grid(to_grid(owner_position)) + self.anchor.correction(self.dimensions) + self.offset;
        Rect2D::from_start(start, self.dimensions)
    }
}

/// Circle centered on the owner's unrounded position plus an offset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CircleDef")]
pub struct CircleShape {
    offset: Vec2,
    radius: f32,
}

#[derive(Deserialize)]
struct CircleDef {
    #[serde(default = "Vec2::zeros")]
    offset: Vec2,
    radius: f32,
}

impl TryFrom<CircleDef> for CircleShape {
    type Error = CollisionError;

    fn try_from(def: CircleDef) -> Result<Self, Self::Error> {
        Self::new(def.offset, def.radius)
    }
}

fn check_radius(radius: f32) -> Result<f32, CollisionError> {
    if radius >= 0.0 {
        Ok(radius)
    } else {
        Err(CollisionError::InvalidRadius(radius))
    }
}

impl CircleShape {
    /// Creates a circle; radius 0 is a legal point probe
    pub fn new(offset: Vec2, radius: f32) -> Result<Self, CollisionError> {
        Ok(Self {
            offset,
            radius: check_radius(radius)?,
        })
    }

    /// Local offset
    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    /// Set the local offset
    pub fn set_offset(&mut self, offset: Vec2) {
        self.offset = offset;
    }

    /// Radius
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Set the radius; must be >= 0
    pub fn set_radius(&mut self, radius: f32) -> Result<(), CollisionError> {
        self.radius = check_radius(radius)?;
        Ok(())
    }

    /// World-space circle for an owner at `owner_position`
    pub fn global_circle(&self, owner_position: Vec2) -> Circle {
        Circle::new(owner_position + self.offset, self.radius)
    }
}

/// A ray of fixed length cast from the owner along `direction`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SegmentDef")]
pub struct SegmentShape {
    offset: Vec2,
    direction: Vec2,
    length: f32,
}

#[derive(Deserialize)]
struct SegmentDef {
    #[serde(default = "Vec2::zeros")]
    offset: Vec2,
    direction: Vec2,
    length: f32,
}

impl TryFrom<SegmentDef> for SegmentShape {
    type Error = CollisionError;

    fn try_from(def: SegmentDef) -> Result<Self, Self::Error> {
        Self::new(def.offset, def.direction, def.length)
    }
}

fn check_length(length: f32) -> Result<f32, CollisionError> {
    if length >= 0.0 {
        Ok(length)
    } else {
        Err(CollisionError::InvalidLength(length))
    }
}

impl SegmentShape {
    /// Creates a segment; the direction need not be normalized
    pub fn new(offset: Vec2, direction: Vec2, length: f32) -> Result<Self, CollisionError> {
        Ok(Self {
            offset,
            direction,
            length: check_length(length)?,
        })
    }

    /// Local offset
    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    /// Set the local offset
    pub fn set_offset(&mut self, offset: Vec2) {
        self.offset = offset;
    }

    /// Configured direction
    pub fn direction(&self) -> Vec2 {
        self.direction
    }

    /// Set the direction; a zero vector makes the segment degenerate
    pub fn set_direction(&mut self, direction: Vec2) {
        self.direction = direction;
    }

    /// Length along the normalized direction
    pub fn length(&self) -> f32 {
        self.length
    }

    /// Set the length; must be >= 0
    pub fn set_length(&mut self, length: f32) -> Result<(), CollisionError> {
        self.length = check_length(length)?;
        Ok(())
    }

    /// Whether the direction has no horizontal component
    pub fn is_vertical(&self) -> bool {
        self.direction.x == 0.0
    }

    /// Whether the segment can never collide
    pub fn is_degenerate(&self) -> bool {
        self.length == 0.0 || self.direction == Vec2::zeros()
    }

    /// World-space endpoints for an owner at `owner_position`
    pub fn global_segment(&self, owner_position: Vec2) -> LineSegment {
        let start = owner_position + self.offset;
        let end = start + safe_normalize(self.direction) * self.length;
        LineSegment::new(start, end, self.is_vertical())
    }
}

/// Collision shape types (stored relative to the owner)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CollisionShape {
    /// Grid-snapped axis-aligned rectangle
    Rectangle(RectangleShape),
    /// Circle
    Circle(CircleShape),
    /// Line segment / ray
    Segment(SegmentShape),
}

impl CollisionShape {
    /// Creates a rectangle shape
    pub fn rectangle(offset: Vec2, dimensions: Vec2, anchor: Anchor) -> Result<Self, CollisionError> {
        RectangleShape::new(offset, dimensions, anchor).map(Self::Rectangle)
    }

    /// Creates a circle shape
    pub fn circle(offset: Vec2, radius: f32) -> Result<Self, CollisionError> {
        CircleShape::new(offset, radius).map(Self::Circle)
    }

    /// Creates a segment shape
    pub fn segment(offset: Vec2, direction: Vec2, length: f32) -> Result<Self, CollisionError> {
        SegmentShape::new(offset, direction, length).map(Self::Segment)
    }

    /// Whether the shape can never satisfy any overlap test
    ///
    /// Zero-radius circles are not included: they still hit other circles.
    pub fn is_degenerate(&self) -> bool {
        match self {
            Self::Segment(segment) => segment.is_degenerate(),
            Self::Rectangle(_) | Self::Circle(_) => false,
        }
    }

    /// Resolve to world space for an owner at `owner_position`
    pub fn to_world_space(&self, owner_position: Vec2) -> WorldSpaceShape {
        match self {
            Self::Rectangle(rectangle) => WorldSpaceShape::Rectangle(rectangle.global_bounds(owner_position)),
            Self::Circle(circle) => WorldSpaceShape::Circle(circle.global_circle(owner_position)),
            Self::Segment(segment) => WorldSpaceShape::Segment(segment.global_segment(owner_position)),
        }
    }
}

/// World-space collision shape (temporary, for testing only)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WorldSpaceShape {
    /// World-space rectangle
    Rectangle(Rect2D),
    /// World-space circle
    Circle(Circle),
    /// World-space segment
    Segment(LineSegment),
}

impl WorldSpaceShape {
    /// Test if this shape intersects with another shape
    ///
    /// Every unordered pair maps to exactly one test, so the result is the
    /// same whichever side asks.
    pub fn intersects(&self, other: &WorldSpaceShape) -> bool {
        match (self, other) {
            (Self::Rectangle(a), Self::Rectangle(b)) => narrow_phase::rect_rect(a, b),

            (Self::Circle(a), Self::Circle(b)) => narrow_phase::circle_circle(a, b),

            (Self::Circle(circle), Self::Rectangle(rect)) |
            (Self::Rectangle(rect), Self::Circle(circle)) => narrow_phase::circle_rect(circle, rect),

            (Self::Segment(a), Self::Segment(b)) => narrow_phase::segment_segment(a, b),

            (Self::Segment(segment), Self::Circle(circle)) |
            (Self::Circle(circle), Self::Segment(segment)) => narrow_phase::segment_circle(segment, circle),

            (Self::Segment(segment), Self::Rectangle(rect)) |
            (Self::Rectangle(rect), Self::Segment(segment)) => narrow_phase::segment_rect(segment, rect),
        }
    }
}
