//! ECS resources owned by the clatter plugin.

use std::collections::HashMap;

use bevy::prelude::*;
use clatter_core::{ControlAction, FrameReport, SimulationContext};
use clatter_types::{ProxyId, ShapeKind, SimulationConfig, SpawnConfig};

/// The simulation context, owned by the ECS.
///
/// Physics, pools, feedback and the proxy scene all live in here. Systems
/// reach them through [`context`](Self::context) and
/// [`context_mut`](Self::context_mut).
#[derive(Resource, Debug)]
pub struct SimulationResource(SimulationContext);

impl SimulationResource {
    /// Wrap a context.
    #[must_use]
    pub fn new(context: SimulationContext) -> Self {
        Self(context)
    }

    /// Borrow the context.
    #[must_use]
    pub fn context(&self) -> &SimulationContext {
        &self.0
    }

    /// Mutably borrow the context.
    pub fn context_mut(&mut self) -> &mut SimulationContext {
        &mut self.0
    }
}

/// Configuration the plugin builds its context from.
#[derive(Resource, Debug, Clone, Default)]
pub struct ClatterConfig {
    /// Physics and stepping configuration.
    pub simulation: SimulationConfig,
    /// Spawn placement configuration.
    pub spawn: SpawnConfig,
}

/// Pending control actions, applied once per frame before stepping.
///
/// Anything may push here: the keyboard system, UI code, tests.
#[derive(Resource, Debug, Default)]
pub struct ControlQueue {
    actions: Vec<ControlAction>,
}

impl ControlQueue {
    /// Queue an action for the next frame.
    pub fn push(&mut self, action: ControlAction) {
        self.actions.push(action);
    }

    /// Take every queued action, in order.
    pub fn drain(&mut self) -> Vec<ControlAction> {
        std::mem::take(&mut self.actions)
    }

    /// Number of queued actions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Whether nothing is queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

/// Bidirectional mapping between proxies and their Bevy entities.
#[derive(Resource, Debug, Default)]
pub struct ProxyEntityMap {
    proxy_to_entity: HashMap<ProxyId, Entity>,
    entity_to_proxy: HashMap<Entity, ProxyId>,
}

impl ProxyEntityMap {
    /// Record a proxy/entity pair.
    pub fn insert(&mut self, proxy: ProxyId, entity: Entity) {
        self.proxy_to_entity.insert(proxy, entity);
        self.entity_to_proxy.insert(entity, proxy);
    }

    /// Forget a proxy, returning the entity it was bound to.
    pub fn remove_proxy(&mut self, proxy: ProxyId) -> Option<Entity> {
        let entity = self.proxy_to_entity.remove(&proxy)?;
        self.entity_to_proxy.remove(&entity);
        Some(entity)
    }

    /// Entity for a proxy.
    #[must_use]
    pub fn entity(&self, proxy: ProxyId) -> Option<Entity> {
        self.proxy_to_entity.get(&proxy).copied()
    }

    /// Proxy for an entity.
    #[must_use]
    pub fn proxy(&self, entity: Entity) -> Option<ProxyId> {
        self.entity_to_proxy.get(&entity).copied()
    }

    /// Number of mapped proxies.
    #[must_use]
    pub fn len(&self) -> usize {
        self.proxy_to_entity.len()
    }

    /// Whether no proxies are mapped.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.proxy_to_entity.is_empty()
    }
}

/// Shared mesh and material handles for proxy entities.
///
/// Meshes are unit sized; each entity's transform scale carries the
/// shape's real extent.
#[derive(Resource, Debug, Clone)]
pub struct ProxyAssets {
    /// Unit-radius sphere.
    pub sphere_mesh: Handle<Mesh>,
    /// Unit-edge cube.
    pub cube_mesh: Handle<Mesh>,
    /// Sphere material.
    pub sphere_material: Handle<StandardMaterial>,
    /// Box material.
    pub box_material: Handle<StandardMaterial>,
}

impl ProxyAssets {
    /// Mesh handle for a shape.
    #[must_use]
    pub fn mesh(&self, shape: ShapeKind) -> Handle<Mesh> {
        match shape {
            ShapeKind::Sphere { .. } => self.sphere_mesh.clone(),
            ShapeKind::Box { .. } => self.cube_mesh.clone(),
        }
    }

    /// Material handle for a shape.
    #[must_use]
    pub fn material(&self, shape: ShapeKind) -> Handle<StandardMaterial> {
        match shape {
            ShapeKind::Sphere { .. } => self.sphere_material.clone(),
            ShapeKind::Box { .. } => self.box_material.clone(),
        }
    }
}

/// Report from the most recent simulation tick.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct LastFrameReport(pub FrameReport);
