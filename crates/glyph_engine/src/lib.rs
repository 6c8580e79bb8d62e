//! # Glyph Engine
//!
//! An entity framework for character-grid game worlds with layered 2D
//! collision detection.
//!
//! ## Features
//!
//! - **Entity Hierarchy**: Parented entities with derived global positions
//! - **Layer/Mask Filtering**: 16 layer bits and 16 mask bits per body
//! - **Shape Geometry**: Grid-snapped rectangles, circles and segments
//! - **Collision Callbacks**: Receivers are notified with mutable world access
//! - **Data-Driven Config**: TOML or RON, chosen by file extension
//!
//! ## Quick Start
//!
//! ```rust
//! use glyph_engine::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut world = World::new();
//!
//!     let player = world.create_entity(Vec2::new(0.0, 0.0));
//!     let wall = world.create_entity(Vec2::new(1.0, 1.0));
//!
//!     let shape = CollisionShape::rectangle(Vec2::zeros(), Vec2::new(2.0, 2.0), Anchor::BottomLeft)?;
//!     world.attach_body(player, Body::new(shape.clone(), LayerMask::MASK_1))?;
//!     world.attach_body(
//!         wall,
//!         Body::new(shape, LayerMask::LAYER_1).with_callback(|event, _world| {
//!             println!("{:?} was hit by {:?}", event.receiver(), event.collider());
//!             Ok(())
//!         }),
//!     )?;
//!
//!     let mut handler = CollisionHandler::new();
//!     let stats = handler.update(&mut world, 1.0 / 60.0)?;
//!     assert_eq!(stats.collisions, 1);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments, clippy::float_cmp)]

pub mod foundation;
pub mod config;
pub mod ecs;
pub mod physics;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        config::{Config, CollisionConfig, LimiterConfig},
        ecs::{Body, BodyHandle, Entity, World, WorldError},
        foundation::math::{Vec2, Vec2i},
        physics::{
            Anchor, CollisionError, CollisionEvent, CollisionHandler, CollisionShape, LayerMask,
            TickStats,
        },
    };
}
