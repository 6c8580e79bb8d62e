//! Physics module for 2D collision detection
//!
//! Provides layer/mask filtering, rectangle, circle and segment shapes, and
//! a per-tick handler that notifies bodies when they are hit. There is no
//! collision response: callbacks decide what a hit means.

pub mod collision;
pub mod collision_handler;
pub mod error;
pub mod layer_mask;
pub mod limiter;

#[cfg(test)]
mod tests;

pub use collision::{
    Anchor,
    CollisionShape,
    WorldSpaceShape,
};
pub use collision_handler::{CollisionEvent, CollisionHandler, TickStats};
pub use error::{CallbackError, CollisionError};
pub use layer_mask::{LayerMask, LAYER_COUNT};
pub use limiter::{FrameLimiter, RateLimiter, RateMode, UpdateLimit};
