//! ECS components linking entities to the simulation.

use bevy::prelude::*;
use clatter_types::ProxyId;

/// Links an entity to a visual proxy in the simulation scene.
///
/// The entity's transform is overwritten from the proxy every frame by
/// [`sync_proxy_transforms`](crate::systems::sync_proxy_transforms).
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProxyVisual(pub ProxyId);

impl ProxyVisual {
    /// Create a proxy link.
    #[must_use]
    pub const fn new(id: ProxyId) -> Self {
        Self(id)
    }

    /// The linked proxy.
    #[must_use]
    pub const fn id(self) -> ProxyId {
        self.0
    }
}

/// Marker for static scenery (camera, lights, floor).
#[derive(Component, Debug, Default, Clone, Copy)]
pub struct Scenery;
