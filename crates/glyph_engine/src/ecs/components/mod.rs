//! ECS Components module

pub mod collision;

pub use collision::{Body, BodyHandle, CollisionCallback};
