//! Paired physics body / visual proxy bookkeeping.
//!
//! Every dynamic object lives in exactly one place: a body in the
//! [`World`], a proxy in the [`Scene`], a listener in the
//! [`FeedbackHandler`], and one entry here tying the three together.
//! Objects are only ever added one at a time and removed all at once.

use clatter_types::{BodyId, Point3, ProxyId, ShapeKind};
use tracing::{debug, info, warn};

use crate::feedback::FeedbackHandler;
use crate::scene::{Scene, VisualProxy};
use crate::world::World;

/// One active dynamic object.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DynamicObject {
    shape: ShapeKind,
    body: BodyId,
    proxy: ProxyId,
}

impl DynamicObject {
    /// Collision shape.
    #[must_use]
    pub fn shape(&self) -> ShapeKind {
        self.shape
    }

    /// Mass, fixed by shape kind.
    #[must_use]
    pub fn mass(&self) -> f64 {
        self.shape.mass()
    }

    /// Physics handle.
    #[must_use]
    pub fn body(&self) -> BodyId {
        self.body
    }

    /// Visual handle.
    #[must_use]
    pub fn proxy(&self) -> ProxyId {
        self.proxy
    }
}

/// Spheres and boxes currently in the scene, each in insertion order.
#[derive(Debug, Default)]
pub struct ObjectPool {
    spheres: Vec<DynamicObject>,
    boxes: Vec<DynamicObject>,
}

impl ObjectPool {
    /// Create an empty pool.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn a sphere of `radius` at `position`.
    ///
    /// `radius` must be positive.
    pub fn spawn_sphere(
        &mut self,
        world: &mut World,
        scene: &mut dyn Scene,
        feedback: &mut FeedbackHandler,
        radius: f64,
        position: Point3<f64>,
    ) -> DynamicObject {
        let object = Self::spawn(world, scene, feedback, ShapeKind::sphere(radius), position);
        self.spheres.push(object);
        object
    }

    /// Spawn a cube with edge `size` at `position`.
    ///
    /// `size` must be positive.
    pub fn spawn_box(
        &mut self,
        world: &mut World,
        scene: &mut dyn Scene,
        feedback: &mut FeedbackHandler,
        size: f64,
        position: Point3<f64>,
    ) -> DynamicObject {
        let object = Self::spawn(world, scene, feedback, ShapeKind::cube(size), position);
        self.boxes.push(object);
        object
    }

    fn spawn(
        world: &mut World,
        scene: &mut dyn Scene,
        feedback: &mut FeedbackHandler,
        shape: ShapeKind,
        position: Point3<f64>,
    ) -> DynamicObject {
        debug_assert!(shape.is_valid(), "spawn size must be positive");

        let proxy = scene.add_proxy(VisualProxy::new(shape, position));
        let body = world.add_dynamic_body(shape, position);
        feedback.subscribe(body);

        debug!(%body, %proxy, shape = shape.name(), "spawned");
        DynamicObject { shape, body, proxy }
    }

    /// Remove every object from the scene, the feedback handler and the world.
    ///
    /// Returns how many objects were removed. Calling it on an empty pool
    /// does nothing.
    pub fn reset_all(
        &mut self,
        world: &mut World,
        scene: &mut dyn Scene,
        feedback: &mut FeedbackHandler,
    ) -> usize {
        let removed = self.len();
        for object in self.spheres.drain(..).chain(self.boxes.drain(..)) {
            scene.remove_proxy(object.proxy);
            feedback.unsubscribe(object.body);
            if let Err(err) = world.remove_body(object.body) {
                warn!(body = %object.body, %err, "pooled body missing from world");
            }
        }
        if removed > 0 {
            info!(removed, "pool reset");
        }
        removed
    }

    /// Copy physics state to the visual proxies.
    ///
    /// Positions are copied for every object, orientations for boxes only.
    /// Returns the number of proxies updated.
    pub fn sync(&self, world: &World, scene: &mut dyn Scene) -> usize {
        let mut synced = 0;
        for object in &self.spheres {
            if let Some(position) = world.body_position(object.body) {
                scene.set_position(object.proxy, position);
                synced += 1;
            }
        }
        for object in &self.boxes {
            if let Some(pose) = world.body_pose(object.body) {
                scene.set_position(object.proxy, pose.position);
                scene.set_orientation(object.proxy, pose.rotation);
                synced += 1;
            }
        }
        synced
    }

    /// Active spheres.
    #[must_use]
    pub fn spheres(&self) -> &[DynamicObject] {
        &self.spheres
    }

    /// Active boxes.
    #[must_use]
    pub fn boxes(&self) -> &[DynamicObject] {
        &self.boxes
    }

    /// Total number of active objects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.spheres.len() + self.boxes.len()
    }

    /// Whether both collections are empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.spheres.is_empty() && self.boxes.is_empty()
    }
}
