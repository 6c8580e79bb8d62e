//! Collision subsystem errors

use crate::ecs::components::BodyHandle;
use thiserror::Error;

/// Error returned by a collision callback
pub type CallbackError = Box<dyn std::error::Error + Send + Sync>;

/// Collision-level errors
///
/// Configuration variants are raised when a value is set, never when a tick
/// runs; nothing is ever clamped into range.
#[derive(Error, Debug)]
pub enum CollisionError {
    /// Layer or mask id outside `1..=16`
    #[error("Invalid layer id {0}: expected 1..=16")]
    InvalidLayerId(u8),

    /// Rectangle dimensions must be positive on both axes
    #[error("Invalid rectangle dimensions {width}x{height}: both must be > 0")]
    InvalidDimensions {
        /// Requested width
        width: f32,
        /// Requested height
        height: f32,
    },

    /// Circle radius must be >= 0
    #[error("Invalid radius {0}: must be >= 0")]
    InvalidRadius(f32),

    /// Segment length must be >= 0
    #[error("Invalid segment length {0}: must be >= 0")]
    InvalidLength(f32),

    /// Update limiter parameters out of range
    #[error("Invalid update limiter: {0}")]
    InvalidLimiter(String),

    /// A receiving body's callback failed; the rest of the tick was aborted
    #[error("Collision callback for body {receiver:?} failed: {source}")]
    Callback {
        /// Body whose callback failed
        receiver: BodyHandle,
        /// Error returned by the callback
        source: CallbackError,
    },
}
