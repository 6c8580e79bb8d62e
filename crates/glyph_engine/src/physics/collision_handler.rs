//! Per-tick broad phase and collision dispatch
//!
//! Every tick the handler buckets active bodies by layer id and by mask id,
//! then pairs each mask bucket with the layer bucket of the same id. Each
//! ordered `(initiator, receiver)` pair runs the narrow phase, and a hit is
//! delivered to the receiver's callback.
//!
//! Buckets are rebuilt from scratch on every tick; nothing about bodies is
//! remembered between ticks. A pair that matches on several ids is
//! dispatched once per matching id.
//!
//! Geometry is resolved from the world at the moment each pair is tested,
//! so a callback that moves an entity changes the outcome of later tests in
//! the same tick. Dispatch order is ascending id, then initiators and
//! receivers in enumeration order.

use super::collision::{CollisionShape, WorldSpaceShape};
use super::error::CollisionError;
use super::layer_mask::{LayerMask, LAYER_COUNT};
use super::limiter::{build_limiter, UpdateLimit};
use crate::config::CollisionConfig;
use crate::ecs::{BodyHandle, World};
use crate::foundation::math::Vec2;

/// Notification delivered to a receiving body's callback
#[derive(Debug, Clone, Copy)]
pub struct CollisionEvent<'a> {
    handler: &'a CollisionHandler,
    collider: BodyHandle,
    receiver: BodyHandle,
}

impl<'a> CollisionEvent<'a> {
    /// Handler running the tick
    pub fn handler(&self) -> &'a CollisionHandler {
        self.handler
    }

    /// Body whose mask found the receiver
    pub fn collider(&self) -> BodyHandle {
        self.collider
    }

    /// Body whose callback is being run
    pub fn receiver(&self) -> BodyHandle {
        self.receiver
    }
}

/// Counters for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickStats {
    /// Active bodies enumerated
    pub bodies: usize,
    /// Ordered pairs produced by the bucket join
    pub candidate_pairs: usize,
    /// Narrow-phase tests actually run
    pub narrow_phase_tests: usize,
    /// Positive tests (one per dispatch)
    pub collisions: usize,
}

/// Collision handler driven once per frame by the world update loop
#[derive(Debug)]
pub struct CollisionHandler {
    enabled: bool,
    limiter: Option<Box<dyn UpdateLimit>>,
    last_stats: TickStats,
}

impl Default for CollisionHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl CollisionHandler {
    /// Create an enabled handler that runs every frame
    pub fn new() -> Self {
        Self {
            enabled: true,
            limiter: None,
            last_stats: TickStats::default(),
        }
    }

    /// Create a handler from configuration
    pub fn from_config(config: &CollisionConfig) -> Result<Self, CollisionError> {
        let limiter = config.limiter.as_ref().map(build_limiter).transpose()?;
        Ok(Self {
            enabled: config.enabled,
            limiter,
            last_stats: TickStats::default(),
        })
    }

    /// Run only when `limiter` allows
    pub fn with_limiter(mut self, limiter: impl UpdateLimit + 'static) -> Self {
        self.limiter = Some(Box::new(limiter));
        self
    }

    /// Replace or clear the limiter
    pub fn set_limiter(&mut self, limiter: Option<Box<dyn UpdateLimit>>) {
        self.limiter = limiter;
    }

    /// Whether ticks run at all
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Enable or disable the handler
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Counters from the most recent tick that ran
    pub fn last_stats(&self) -> TickStats {
        self.last_stats
    }

    /// Run one tick: bucket, test, dispatch
    ///
    /// A disabled handler, or one whose limiter skips this frame, does
    /// nothing and returns empty stats. A callback error aborts the rest of
    /// the tick and is returned as [`CollisionError::Callback`]; the failing
    /// callback stays installed on its body.
    pub fn update(&mut self, world: &mut World, delta_time: f32) -> Result<TickStats, CollisionError> {
        if !self.enabled {
            return Ok(TickStats::default());
        }
        if let Some(limiter) = self.limiter.as_mut() {
            if !limiter.on_update(delta_time) {
                log::debug!("Collision tick skipped by limiter");
                return Ok(TickStats::default());
            }
        }

        let mut stats = TickStats::default();
        let result = self.run_tick(world, &mut stats);
        self.last_stats = stats;

        log::debug!(
            "Collision tick: {} bodies, {} candidates, {} tests, {} collisions",
            stats.bodies,
            stats.candidate_pairs,
            stats.narrow_phase_tests,
            stats.collisions
        );

        result.map(|()| stats)
    }

    /// Test `shape` placed at `at` against every active body that `mask`
    /// looks for, without running callbacks
    ///
    /// Hits come back in enumeration order.
    pub fn query_shape(world: &World, shape: &CollisionShape, at: Vec2, mask: LayerMask) -> Vec<BodyHandle> {
        let probe = shape.to_world_space(at);
        world
            .enumerate_active_bodies()
            .into_iter()
            .filter(|&handle| {
                world.body(handle).is_some_and(|body| mask.looks_for(body.layers()))
                    && world_shape(world, handle).is_some_and(|target| probe.intersects(&target))
            })
            .collect()
    }

    fn run_tick(&self, world: &mut World, stats: &mut TickStats) -> Result<(), CollisionError> {
        let bodies = world.enumerate_active_bodies();
        stats.bodies = bodies.len();

        let mut layer_buckets: [Vec<BodyHandle>; LAYER_COUNT as usize] = Default::default();
        let mut mask_buckets: [Vec<BodyHandle>; LAYER_COUNT as usize] = Default::default();

        for &handle in &bodies {
            let Some(body) = world.body(handle) else {
                continue;
            };
            let layers = body.layers();
            for id in layers.layers() {
                layer_buckets[usize::from(id - 1)].push(handle);
            }
            for id in layers.masks() {
                mask_buckets[usize::from(id - 1)].push(handle);
            }
        }

        for (initiators, receivers) in mask_buckets.iter().zip(&layer_buckets) {
            for &initiator in initiators {
                for &receiver in receivers {
                    if initiator == receiver {
                        continue;
                    }
                    stats.candidate_pairs += 1;

                    // Bodies destroyed by an earlier callback drop out here
                    let (Some(a), Some(b)) = (world_shape(world, initiator), world_shape(world, receiver)) else {
                        continue;
                    };
                    stats.narrow_phase_tests += 1;
                    if !a.intersects(&b) {
                        continue;
                    }

                    stats.collisions += 1;
                    log::trace!("Collision: {:?} -> {:?}", initiator, receiver);
                    self.dispatch(world, initiator, receiver)?;
                }
            }
        }

        Ok(())
    }

    fn dispatch(&self, world: &mut World, collider: BodyHandle, receiver: BodyHandle) -> Result<(), CollisionError> {
        let Some(mut callback) = world.body_mut(receiver).and_then(|body| body.take_callback()) else {
            return Ok(());
        };

        let event = CollisionEvent {
            handler: self,
            collider,
            receiver,
        };
        let result = callback(&event, world);

        // The callback may have replaced itself or removed its body
        if let Some(body) = world.body_mut(receiver) {
            if !body.has_callback() {
                body.set_callback(Some(callback));
            }
        }

        result.map_err(|source| CollisionError::Callback { receiver, source })
    }
}

fn world_shape(world: &World, handle: BodyHandle) -> Option<WorldSpaceShape> {
    let body = world.body(handle)?;
    let position = world.global_position(body.owner()?).ok()?;
    Some(body.shape().to_world_space(position))
}
