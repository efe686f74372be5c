//! Visual side of the scene.
//!
//! The core never renders. It talks to whatever owns the visuals through
//! the [`Scene`] trait: add a proxy, move it, remove it. [`ProxyScene`] is
//! the in-memory implementation used headless and by the Bevy layer, which
//! reconciles its entities from the [`SceneChange`] journal.

use clatter_types::{Point3, ProxyId, ShapeKind, UnitQuaternion, Vector3};
use hashbrown::HashMap;

/// A visual stand-in for one dynamic object.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisualProxy {
    /// Shape to draw.
    pub shape: ShapeKind,
    /// World position.
    pub position: Point3<f64>,
    /// World orientation.
    pub orientation: UnitQuaternion<f64>,
    /// Scale applied to the unit mesh for `shape`.
    pub scale: Vector3<f64>,
}

impl VisualProxy {
    /// Proxy for `shape` at `position`, scaled to the shape's size.
    #[must_use]
    pub fn new(shape: ShapeKind, position: Point3<f64>) -> Self {
        Self {
            shape,
            position,
            orientation: UnitQuaternion::identity(),
            scale: shape.visual_scale(),
        }
    }
}

/// Receiver of visual updates.
pub trait Scene {
    /// Add a proxy and return its handle.
    fn add_proxy(&mut self, proxy: VisualProxy) -> ProxyId;

    /// Detach a proxy. Returns `false` if it was not present.
    fn remove_proxy(&mut self, id: ProxyId) -> bool;

    /// Move a proxy.
    fn set_position(&mut self, id: ProxyId, position: Point3<f64>);

    /// Rotate a proxy.
    fn set_orientation(&mut self, id: ProxyId, orientation: UnitQuaternion<f64>);
}

/// Structural change recorded by [`ProxyScene`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneChange {
    /// A proxy was added.
    Added(ProxyId),
    /// A proxy was removed.
    Removed(ProxyId),
}

/// In-memory scene holding proxy transforms.
#[derive(Debug, Default)]
pub struct ProxyScene {
    proxies: HashMap<ProxyId, VisualProxy>,
    next_id: u64,
    changes: Vec<SceneChange>,
}

impl ProxyScene {
    /// Create an empty scene.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a proxy.
    #[must_use]
    pub fn proxy(&self, id: ProxyId) -> Option<&VisualProxy> {
        self.proxies.get(&id)
    }

    /// Number of live proxies.
    #[must_use]
    pub fn len(&self) -> usize {
        self.proxies.len()
    }

    /// Whether the scene has no proxies.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.proxies.is_empty()
    }

    /// Take the additions and removals recorded since the last drain.
    pub fn drain_changes(&mut self) -> Vec<SceneChange> {
        std::mem::take(&mut self.changes)
    }
}

impl Scene for ProxyScene {
    fn add_proxy(&mut self, proxy: VisualProxy) -> ProxyId {
        let id = ProxyId::new(self.next_id);
        self.next_id += 1;
        self.proxies.insert(id, proxy);
        self.changes.push(SceneChange::Added(id));
        id
    }

    fn remove_proxy(&mut self, id: ProxyId) -> bool {
        let removed = self.proxies.remove(&id).is_some();
        if removed {
            self.changes.push(SceneChange::Removed(id));
        }
        removed
    }

    fn set_position(&mut self, id: ProxyId, position: Point3<f64>) {
        if let Some(proxy) = self.proxies.get_mut(&id) {
            proxy.position = position;
        }
    }

    fn set_orientation(&mut self, id: ProxyId, orientation: UnitQuaternion<f64>) {
        if let Some(proxy) = self.proxies.get_mut(&id) {
            proxy.orientation = orientation;
        }
    }
}
