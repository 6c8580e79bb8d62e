//! ECS World implementation
//!
//! The world owns the entity hierarchy and every collision body. Entities
//! carry a local position, an active flag and an optional parent; global
//! values are derived by walking up the parent chain on demand.

use super::components::{Body, BodyHandle};
use super::Entity;
use crate::foundation::math::{to_grid, Vec2, Vec2i};
use slotmap::SlotMap;
use thiserror::Error;

/// World-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WorldError {
    /// Entity id is stale or was never created here
    #[error("Unknown entity {0:?}")]
    UnknownEntity(Entity),

    /// Body handle is stale or was never created here
    #[error("Unknown body {0:?}")]
    UnknownBody(BodyHandle),

    /// Reparenting would make an entity its own ancestor
    #[error("Entity {entity:?} cannot be parented to its descendant {parent:?}")]
    RecursiveParent {
        /// Entity being moved
        entity: Entity,
        /// Requested parent
        parent: Entity,
    },
}

#[derive(Debug)]
struct EntityNode {
    position: Vec2,
    is_active: bool,
    parent: Option<Entity>,
    children: Vec<Entity>,
    bodies: Vec<BodyHandle>,
}

impl EntityNode {
    fn new(position: Vec2, parent: Option<Entity>) -> Self {
        Self {
            position,
            is_active: true,
            parent,
            children: Vec::new(),
            bodies: Vec::new(),
        }
    }
}

/// ECS World containing all entities and bodies
#[derive(Debug, Default)]
pub struct World {
    entities: SlotMap<Entity, EntityNode>,
    roots: Vec<Entity>,
    bodies: SlotMap<BodyHandle, Body>,
}

impl World {
    /// Create a new world
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new root entity at `position`
    pub fn create_entity(&mut self, position: Vec2) -> Entity {
        let entity = self.entities.insert(EntityNode::new(position, None));
        self.roots.push(entity);
        entity
    }

    /// Create an entity under `parent`; `position` is relative to the parent
    pub fn create_child(&mut self, parent: Entity, position: Vec2) -> Result<Entity, WorldError> {
        if !self.entities.contains_key(parent) {
            return Err(WorldError::UnknownEntity(parent));
        }
        let entity = self.entities.insert(EntityNode::new(position, Some(parent)));
        self.node_mut(parent)?.children.push(entity);
        Ok(entity)
    }

    /// Move `entity` under `parent`, or to the root list when `None`
    ///
    /// The local position is kept, so the global position changes with the
    /// new parent.
    pub fn set_parent(&mut self, entity: Entity, parent: Option<Entity>) -> Result<(), WorldError> {
        let old_parent = self.node(entity)?.parent;

        if let Some(parent) = parent {
            self.node(parent)?;
            let mut cursor = Some(parent);
            while let Some(ancestor) = cursor {
                if ancestor == entity {
                    return Err(WorldError::RecursiveParent { entity, parent });
                }
                cursor = self.node(ancestor)?.parent;
            }
        }

        match old_parent {
            Some(old) => self.node_mut(old)?.children.retain(|&child| child != entity),
            None => self.roots.retain(|&root| root != entity),
        }
        match parent {
            Some(new) => self.node_mut(new)?.children.push(entity),
            None => self.roots.push(entity),
        }
        self.node_mut(entity)?.parent = parent;
        Ok(())
    }

    /// Destroy `entity`, its descendants and every body attached to them
    pub fn destroy_entity(&mut self, entity: Entity) -> Result<(), WorldError> {
        let parent = self.node(entity)?.parent;
        match parent {
            Some(parent) => self.node_mut(parent)?.children.retain(|&child| child != entity),
            None => self.roots.retain(|&root| root != entity),
        }

        let mut pending = vec![entity];
        while let Some(current) = pending.pop() {
            if let Some(node) = self.entities.remove(current) {
                for handle in node.bodies {
                    self.bodies.remove(handle);
                }
                pending.extend(node.children);
            }
        }
        Ok(())
    }

    /// Whether `entity` is alive
    pub fn contains(&self, entity: Entity) -> bool {
        self.entities.contains_key(entity)
    }

    /// Number of live entities
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Parent of `entity`, if any
    pub fn parent(&self, entity: Entity) -> Result<Option<Entity>, WorldError> {
        Ok(self.node(entity)?.parent)
    }

    /// Children of `entity` in creation order
    pub fn children(&self, entity: Entity) -> Result<&[Entity], WorldError> {
        Ok(&self.node(entity)?.children)
    }

    /// Local position relative to the parent
    pub fn position(&self, entity: Entity) -> Result<Vec2, WorldError> {
        Ok(self.node(entity)?.position)
    }

    /// Set the local position
    pub fn set_position(&mut self, entity: Entity, position: Vec2) -> Result<(), WorldError> {
        self.node_mut(entity)?.position = position;
        Ok(())
    }

    /// Move by `delta` in local space
    pub fn translate(&mut self, entity: Entity, delta: Vec2) -> Result<(), WorldError> {
        self.node_mut(entity)?.position += delta;
        Ok(())
    }

    /// Sum of local positions up the parent chain
    pub fn global_position(&self, entity: Entity) -> Result<Vec2, WorldError> {
        let mut node = self.node(entity)?;
        let mut position = node.position;
        while let Some(parent) = node.parent {
            node = self.node(parent)?;
            position += node.position;
        }
        Ok(position)
    }

    /// Global position rounded to the nearest grid cell
    pub fn global_grid_position(&self, entity: Entity) -> Result<Vec2i, WorldError> {
        self.global_position(entity).map(to_grid)
    }

    /// Local active flag
    pub fn is_active(&self, entity: Entity) -> Result<bool, WorldError> {
        Ok(self.node(entity)?.is_active)
    }

    /// Set the local active flag
    pub fn set_active(&mut self, entity: Entity, active: bool) -> Result<(), WorldError> {
        self.node_mut(entity)?.is_active = active;
        Ok(())
    }

    /// Active iff the entity and every ancestor are active
    pub fn is_globally_active(&self, entity: Entity) -> Result<bool, WorldError> {
        let mut cursor = Some(entity);
        while let Some(current) = cursor {
            let node = self.node(current)?;
            if !node.is_active {
                return Ok(false);
            }
            cursor = node.parent;
        }
        Ok(true)
    }

    /// Attach `body` to `entity`
    pub fn attach_body(&mut self, entity: Entity, mut body: Body) -> Result<BodyHandle, WorldError> {
        self.node(entity)?;

        for warning in attach_warnings(&body) {
            log::warn!("Body attached to {:?} {}", entity, warning);
        }

        body.set_owner(entity);
        let handle = self.bodies.insert(body);
        self.node_mut(entity)?.bodies.push(handle);
        Ok(handle)
    }

    /// Detach a body and hand it back
    pub fn detach_body(&mut self, handle: BodyHandle) -> Result<Body, WorldError> {
        let body = self.bodies.remove(handle).ok_or(WorldError::UnknownBody(handle))?;
        if let Some(owner) = body.owner() {
            if let Some(node) = self.entities.get_mut(owner) {
                node.bodies.retain(|&attached| attached != handle);
            }
        }
        Ok(body)
    }

    /// Body lookup
    pub fn body(&self, handle: BodyHandle) -> Option<&Body> {
        self.bodies.get(handle)
    }

    /// Mutable body lookup
    pub fn body_mut(&mut self, handle: BodyHandle) -> Option<&mut Body> {
        self.bodies.get_mut(handle)
    }

    /// Bodies attached to `entity` in attach order
    pub fn bodies_of(&self, entity: Entity) -> Result<&[BodyHandle], WorldError> {
        Ok(&self.node(entity)?.bodies)
    }

    /// Number of attached bodies
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Every active body on a globally active entity
    ///
    /// Depth-first pre-order over root entities in creation order; inactive
    /// entities hide their whole subtree. Each entity yields its bodies in
    /// attach order.
    pub fn enumerate_active_bodies(&self) -> Vec<BodyHandle> {
        let mut found = Vec::new();
        let mut stack: Vec<Entity> = self.roots.iter().rev().copied().collect();

        while let Some(entity) = stack.pop() {
            let Some(node) = self.entities.get(entity) else {
                continue;
            };
            if !node.is_active {
                continue;
            }
            found.extend(
                node.bodies
                    .iter()
                    .copied()
                    .filter(|&handle| self.bodies.get(handle).is_some_and(Body::is_active)),
            );
            stack.extend(node.children.iter().rev().copied());
        }

        found
    }

    fn node(&self, entity: Entity) -> Result<&EntityNode, WorldError> {
        self.entities.get(entity).ok_or(WorldError::UnknownEntity(entity))
    }

    fn node_mut(&mut self, entity: Entity) -> Result<&mut EntityNode, WorldError> {
        self.entities.get_mut(entity).ok_or(WorldError::UnknownEntity(entity))
    }
}

/// Reasons a body can never take part in a collision
fn attach_warnings(body: &Body) -> Vec<&'static str> {
    let mut warnings = Vec::new();
    if body.layers().is_inert() {
        warnings.push("has no layer or mask bits and will never collide");
    }
    if body.shape().is_degenerate() {
        warnings.push("is a zero-length segment and will never collide");
    }
    warnings
}
