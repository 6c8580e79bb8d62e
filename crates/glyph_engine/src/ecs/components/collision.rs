//! Collision body component
//!
//! A [`Body`] is a collidable shape attached to an entity. It carries the
//! owner-relative [`CollisionShape`], the [`LayerMask`] used by the broad
//! phase, an active flag and an optional callback invoked whenever another
//! body's mask finds it.

use crate::ecs::{Entity, World};
use crate::physics::collision::CollisionShape;
use crate::physics::collision_handler::CollisionEvent;
use crate::physics::error::CallbackError;
use crate::physics::LayerMask;
use std::fmt;

slotmap::new_key_type! {
    /// Handle to a body stored in a [`World`]
    pub struct BodyHandle;
}

/// Callback invoked on the receiving body of a collision
///
/// The world is passed mutably so a callback can move entities, toggle
/// bodies or edit masks; later pair tests in the same tick observe those
/// edits.
pub type CollisionCallback =
    Box<dyn FnMut(&CollisionEvent<'_>, &mut World) -> Result<(), CallbackError>>;

/// Component that makes an entity collidable
pub struct Body {
    owner: Option<Entity>,
    shape: CollisionShape,
    layers: LayerMask,
    is_active: bool,
    callback: Option<CollisionCallback>,
}

impl Body {
    /// Create an active body with no callback
    pub fn new(shape: CollisionShape, layers: LayerMask) -> Self {
        Self {
            owner: None,
            shape,
            layers,
            is_active: true,
            callback: None,
        }
    }

    /// Register the callback run when this body receives a collision
    pub fn with_callback<F>(mut self, callback: F) -> Self
    where
        F: FnMut(&CollisionEvent<'_>, &mut World) -> Result<(), CallbackError> + 'static,
    {
        self.callback = Some(Box::new(callback));
        self
    }

    /// Start inactive
    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }

    /// Owning entity, `None` until attached
    pub fn owner(&self) -> Option<Entity> {
        self.owner
    }

    pub(crate) fn set_owner(&mut self, owner: Entity) {
        self.owner = Some(owner);
    }

    /// Owner-relative shape
    pub fn shape(&self) -> &CollisionShape {
        &self.shape
    }

    /// Mutable shape access
    pub fn shape_mut(&mut self) -> &mut CollisionShape {
        &mut self.shape
    }

    /// Layer and mask bits
    pub fn layers(&self) -> LayerMask {
        self.layers
    }

    /// Mutable layer and mask bits
    pub fn layers_mut(&mut self) -> &mut LayerMask {
        &mut self.layers
    }

    /// Replace the layer and mask bits
    pub fn set_layers(&mut self, layers: LayerMask) {
        self.layers = layers;
    }

    /// Whether the broad phase should consider this body
    pub fn is_active(&self) -> bool {
        self.is_active
    }

    /// Enable or disable the body
    pub fn set_active(&mut self, active: bool) {
        self.is_active = active;
    }

    /// Whether a callback is installed
    pub fn has_callback(&self) -> bool {
        self.callback.is_some()
    }

    /// Install or replace the callback
    pub fn set_callback(&mut self, callback: Option<CollisionCallback>) {
        self.callback = callback;
    }

    /// Remove the callback, leaving `None` behind
    pub fn take_callback(&mut self) -> Option<CollisionCallback> {
        self.callback.take()
    }
}

impl fmt::Debug for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Body")
            .field("owner", &self.owner)
            .field("shape", &self.shape)
            .field("layers", &self.layers)
            .field("is_active", &self.is_active)
            .field("has_callback", &self.callback.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec2;

    fn unit_circle() -> CollisionShape {
        CollisionShape::circle(Vec2::zeros(), 1.0).unwrap()
    }

    #[test]
    fn test_new_body_defaults() {
        let body = Body::new(unit_circle(), LayerMask::LAYER_1);
        assert!(body.is_active());
        assert!(!body.has_callback());
        assert!(body.owner().is_none());
        assert_eq!(body.layers(), LayerMask::LAYER_1);
    }

    #[test]
    fn test_builder_and_callback_take() {
        let mut body = Body::new(unit_circle(), LayerMask::empty())
            .with_callback(|_, _| Ok(()))
            .inactive();
        assert!(!body.is_active());
        assert!(body.has_callback());

        let callback = body.take_callback();
        assert!(callback.is_some());
        assert!(!body.has_callback());

        body.set_callback(callback);
        assert!(body.has_callback());
    }

    #[test]
    fn test_layers_mut() {
        let mut body = Body::new(unit_circle(), LayerMask::empty());
        body.layers_mut().add_mask(2).unwrap();
        assert!(body.layers().has_mask(2).unwrap());
    }
}
