//! Entity-Component-System implementation
//!
//! Provides the entity hierarchy that collision bodies attach to.

pub mod world;
pub mod entity;
pub mod components;

pub use world::{World, WorldError};
pub use entity::Entity;
pub use components::{Body, BodyHandle, CollisionCallback};
