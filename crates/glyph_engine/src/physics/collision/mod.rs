//! Collision geometry and narrow-phase tests
//!
//! # Architecture
//!
//! - **Owner-relative Storage**: Shapes keep offsets relative to their owning entity
//! - **On-Demand Resolution**: Shapes are resolved to world space only during tests
//! - **Closed Shape Set**: Rectangle, circle and segment, dispatched by one match table
//!
//! # Module Organization
//!
//! - [`primitives`] - World-space rectangles, circles and segments
//! - [`shape`] - Owner-relative shapes attached to bodies
//! - [`narrow_phase`] - The pairwise intersection algorithms
//!
//! # Key Types
//!
//! - [`CollisionShape`] - Owner-relative shape (component data)
//! - [`WorldSpaceShape`] - Temporary world-space shape for collision testing

pub mod primitives;
pub mod shape;
pub mod narrow_phase;

// Re-export commonly used types
pub use primitives::{Rect2D, Circle, LineSegment};
pub use shape::{Anchor, CollisionShape, RectangleShape, CircleShape, SegmentShape, WorldSpaceShape};
