//! Simulation world.
//!
//! [`World`] owns the rigid-body sets and the physics pipeline, holds the
//! global parameters (gravity, broad phase, default contact material) and
//! advances everything by a fixed step. Rendering code never touches it
//! directly: the object pool reads poses out of it after each step.
//!
//! # Stepping
//!
//! ```text
//!   frame delta ──► accumulator ──► up to max_substeps fixed steps
//!                        │
//!                        └─► lag past the cap is dropped
//! ```
//!
//! Contacts sampled during the fixed steps are queued as [`ImpactEvent`]s
//! and handed out by [`World::drain_impacts`].

use std::f64::consts::FRAC_PI_2;
use std::fmt;

use clatter_types::{
    BodyId, BroadPhaseStrategy, ContactMaterial, Pose, Result, ShapeKind, SimError,
    SimulationConfig,
};
use hashbrown::HashMap;
use nalgebra::{Isometry3, Point3, Translation3, Unit, UnitQuaternion, Vector3};
use rapier3d_f64::prelude::*;
use tracing::{debug, info, trace};

use crate::events::{ImpactCollector, ImpactEvent};

/// Id of the static floor. Dynamic bodies start at 1.
pub const FLOOR_ID: BodyId = BodyId::new(0);

/// Half the side length of the square floor slab (m).
const FLOOR_HALF_EXTENT: f64 = 50.0;

/// Half the thickness of the floor slab (m). Its top face sits at y = 0.
const FLOOR_HALF_THICKNESS: f64 = 0.1;

/// What one call to [`World::step`] did.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StepOutcome {
    /// Number of fixed steps taken.
    pub substeps: u32,
    /// Simulated time discarded because the sub-step cap was hit (s).
    pub dropped: f64,
}

impl StepOutcome {
    /// Whether lag was discarded this call.
    #[must_use]
    pub fn hit_cap(&self) -> bool {
        self.dropped > 0.0
    }
}

#[derive(Debug, Clone, Copy)]
struct BodyEntry {
    body: RigidBodyHandle,
    shape: ShapeKind,
}

/// The rapier sets and pipeline, grouped so they can be borrowed together.
struct PhysicsSets {
    pipeline: PhysicsPipeline,
    params: IntegrationParameters,
    islands: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
}

impl PhysicsSets {
    fn new(broad_phase: BroadPhaseStrategy) -> Self {
        let broad_phase = match broad_phase {
            BroadPhaseStrategy::SweepAndPrune => DefaultBroadPhase::new(),
        };
        Self {
            pipeline: PhysicsPipeline::new(),
            params: IntegrationParameters::default(),
            islands: IslandManager::new(),
            broad_phase,
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
        }
    }
}

/// Rigid-body world with a permanent floor and a set of dynamic bodies.
///
/// # Example
///
/// ```
/// use clatter_core::World;
/// use clatter_types::{Point3, ShapeKind, SimulationConfig};
///
/// let mut world = World::new(&SimulationConfig::default()).unwrap();
/// let ball = world.add_dynamic_body(ShapeKind::sphere(0.5), Point3::new(0.0, 3.0, 0.0));
///
/// world.step(1.0 / 60.0, 1.0 / 60.0, 3);
/// assert!(world.body_position(ball).unwrap().y < 3.0);
/// ```
pub struct World {
    sets: PhysicsSets,
    collector: ImpactCollector,
    gravity: Vector3<f64>,
    broad_phase: BroadPhaseStrategy,
    material: ContactMaterial,
    allow_sleeping: bool,
    floor: RigidBodyHandle,
    entries: HashMap<BodyId, BodyEntry>,
    next_body_id: u64,
    accumulator: f64,
    time: f64,
    step_count: u64,
}

impl fmt::Debug for World {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("World")
            .field("gravity", &self.gravity)
            .field("broad_phase", &self.broad_phase)
            .field("material", &self.material)
            .field("bodies", &self.body_count())
            .field("time", &self.time)
            .field("step_count", &self.step_count)
            .finish_non_exhaustive()
    }
}

impl World {
    /// Build a world with the static floor in place.
    ///
    /// The floor is a thin square slab whose top face is the plane y = 0.
    /// Its fixed body is turned a quarter turn about -X, so the slab's
    /// local +Z face points up.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration fails validation.
    pub fn new(config: &SimulationConfig) -> Result<Self> {
        config.validate()?;

        let mut sets = PhysicsSets::new(config.broad_phase);
        sets.params.dt = config.fixed_timestep;

        let floor_axis = Unit::new_normalize(Vector3::new(-1.0, 0.0, 0.0));
        let floor_rotation = UnitQuaternion::from_axis_angle(&floor_axis, FRAC_PI_2);
        let floor_body = RigidBodyBuilder::fixed()
            .position(Isometry3::from_parts(Translation3::identity(), floor_rotation))
            .user_data(u128::from(FLOOR_ID.raw()))
            .build();
        let floor_handle = sets.bodies.insert(floor_body);
        let floor_collider = ColliderBuilder::cuboid(
            FLOOR_HALF_EXTENT,
            FLOOR_HALF_EXTENT,
            FLOOR_HALF_THICKNESS,
        )
        .translation(vector![0.0, 0.0, -FLOOR_HALF_THICKNESS])
        .friction(config.contact.friction)
        .restitution(config.contact.restitution)
        .build();
        sets.colliders
            .insert_with_parent(floor_collider, floor_handle, &mut sets.bodies);

        info!(
            gravity = ?config.gravity,
            broad_phase = ?config.broad_phase,
            friction = config.contact.friction,
            restitution = config.contact.restitution,
            "world initialized"
        );

        Ok(Self {
            sets,
            collector: ImpactCollector::default(),
            gravity: config.gravity,
            broad_phase: config.broad_phase,
            material: config.contact,
            allow_sleeping: config.allow_sleeping,
            floor: floor_handle,
            entries: HashMap::new(),
            next_body_id: FLOOR_ID.raw() + 1,
            accumulator: 0.0,
            time: 0.0,
            step_count: 0,
        })
    }

    // ========================================================================
    // Bodies
    // ========================================================================

    /// Add a dynamic body with the shape's fixed mass at `position`.
    ///
    /// The collider uses the current default contact material and has its
    /// contacts sampled for impacts every step.
    pub fn add_dynamic_body(&mut self, shape: ShapeKind, position: Point3<f64>) -> BodyId {
        debug_assert!(shape.is_valid(), "shape dimensions must be positive");

        let id = BodyId::new(self.next_body_id);
        self.next_body_id += 1;

        let body = RigidBodyBuilder::dynamic()
            .translation(position.coords)
            .can_sleep(self.allow_sleeping)
            .user_data(u128::from(id.raw()))
            .build();
        let body_handle = self.sets.bodies.insert(body);

        let collider = match shape {
            ShapeKind::Sphere { radius } => ColliderBuilder::ball(radius),
            ShapeKind::Box { half_extent } => {
                ColliderBuilder::cuboid(half_extent, half_extent, half_extent)
            }
        }
        .mass(shape.mass())
        .friction(self.material.friction)
        .restitution(self.material.restitution)
        .active_hooks(ActiveHooks::MODIFY_SOLVER_CONTACTS)
        .build();
        self.sets
            .colliders
            .insert_with_parent(collider, body_handle, &mut self.sets.bodies);

        self.entries.insert(
            id,
            BodyEntry {
                body: body_handle,
                shape,
            },
        );
        debug!(%id, shape = shape.name(), ?position, "body added");
        id
    }

    /// Remove a dynamic body and its collider.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::FloorIsPermanent`] for the floor and
    /// [`SimError::BodyNotFound`] for unknown ids.
    pub fn remove_body(&mut self, id: BodyId) -> Result<()> {
        if id == FLOOR_ID {
            return Err(SimError::FloorIsPermanent);
        }
        let entry = self
            .entries
            .remove(&id)
            .ok_or_else(|| SimError::body_not_found(id.to_string()))?;

        let sets = &mut self.sets;
        sets.bodies.remove(
            entry.body,
            &mut sets.islands,
            &mut sets.colliders,
            &mut sets.impulse_joints,
            &mut sets.multibody_joints,
            true,
        );
        debug!(%id, "body removed");
        Ok(())
    }

    /// Id of the static floor.
    #[must_use]
    pub fn floor(&self) -> BodyId {
        FLOOR_ID
    }

    /// Whether the world holds a body with this id. The floor always counts.
    #[must_use]
    pub fn contains(&self, id: BodyId) -> bool {
        id == FLOOR_ID || self.entries.contains_key(&id)
    }

    /// Number of bodies, floor included.
    #[must_use]
    pub fn body_count(&self) -> usize {
        self.entries.len() + 1
    }

    /// Number of dynamic bodies.
    #[must_use]
    pub fn dynamic_body_count(&self) -> usize {
        self.entries.len()
    }

    /// Shape of a dynamic body.
    #[must_use]
    pub fn shape(&self, id: BodyId) -> Option<ShapeKind> {
        self.entries.get(&id).map(|e| e.shape)
    }

    // ========================================================================
    // Stepping
    // ========================================================================

    /// Advance by `delta` seconds of wall time using fixed steps.
    ///
    /// `delta` is added to an accumulator and up to `max_substeps` steps of
    /// `fixed_timestep` are taken while the accumulator holds a whole step.
    /// Negative or non-finite deltas count as zero. When the cap is hit the
    /// whole-step part of the remaining lag is dropped and reported.
    pub fn step(&mut self, fixed_timestep: f64, delta: f64, max_substeps: u32) -> StepOutcome {
        if !fixed_timestep.is_finite() || fixed_timestep <= 0.0 {
            return StepOutcome::default();
        }
        let delta = if delta.is_finite() { delta.max(0.0) } else { 0.0 };
        if delta == 0.0 && self.accumulator < fixed_timestep {
            return StepOutcome::default();
        }

        self.sets.params.dt = fixed_timestep;
        self.accumulator += delta;

        let mut substeps = 0;
        while self.accumulator >= fixed_timestep && substeps < max_substeps {
            self.internal_step();
            self.accumulator -= fixed_timestep;
            substeps += 1;
        }

        let mut dropped = 0.0;
        if self.accumulator >= fixed_timestep {
            let kept = self.accumulator % fixed_timestep;
            dropped = self.accumulator - kept;
            self.accumulator = kept;
            debug!(dropped, substeps, "sub-step cap hit, dropping lag");
        }

        StepOutcome { substeps, dropped }
    }

    fn internal_step(&mut self) {
        let sets = &mut self.sets;
        sets.pipeline.step(
            &self.gravity,
            &sets.params,
            &mut sets.islands,
            &mut sets.broad_phase,
            &mut sets.narrow_phase,
            &mut sets.bodies,
            &mut sets.colliders,
            &mut sets.impulse_joints,
            &mut sets.multibody_joints,
            &mut sets.ccd_solver,
            None,
            &self.collector,
            &(),
        );
        self.collector.finish_step();
        self.time += sets.params.dt;
        self.step_count += 1;
        trace!(time = self.time, "fixed step");
    }

    /// Take the impacts queued since the last drain.
    pub fn drain_impacts(&mut self) -> Vec<ImpactEvent> {
        self.collector.drain()
    }

    // ========================================================================
    // Contact material
    // ========================================================================

    /// Change the restitution of every contact from the next step on.
    ///
    /// Existing colliders are updated in place and new bodies pick the
    /// value up as their default.
    pub fn set_contact_restitution(&mut self, restitution: f64) {
        self.material.restitution = restitution;
        for (_, collider) in self.sets.colliders.iter_mut() {
            collider.set_restitution(restitution);
        }
        debug!(restitution, "contact restitution changed");
    }

    /// Current default contact material.
    #[must_use]
    pub fn contact_material(&self) -> ContactMaterial {
        self.material
    }

    // ========================================================================
    // Queries
    // ========================================================================

    fn rigid_body(&self, id: BodyId) -> Option<&RigidBody> {
        let handle = if id == FLOOR_ID {
            self.floor
        } else {
            self.entries.get(&id)?.body
        };
        self.sets.bodies.get(handle)
    }

    /// World pose of a body.
    #[must_use]
    pub fn body_pose(&self, id: BodyId) -> Option<Pose> {
        self.rigid_body(id).map(|b| Pose::from_isometry(b.position()))
    }

    /// World position of a body.
    #[must_use]
    pub fn body_position(&self, id: BodyId) -> Option<Point3<f64>> {
        self.rigid_body(id).map(|b| Point3::from(*b.translation()))
    }

    /// World orientation of a body.
    #[must_use]
    pub fn body_orientation(&self, id: BodyId) -> Option<UnitQuaternion<f64>> {
        self.rigid_body(id).map(|b| *b.rotation())
    }

    /// Linear velocity of a body.
    #[must_use]
    pub fn linear_velocity(&self, id: BodyId) -> Option<Vector3<f64>> {
        self.rigid_body(id).map(|b| *b.linvel())
    }

    /// Whether a body is asleep.
    #[must_use]
    pub fn is_sleeping(&self, id: BodyId) -> Option<bool> {
        self.rigid_body(id).map(RigidBody::is_sleeping)
    }

    /// Gravity vector.
    #[must_use]
    pub fn gravity(&self) -> Vector3<f64> {
        self.gravity
    }

    /// Broad phase selected at construction.
    #[must_use]
    pub fn broad_phase(&self) -> BroadPhaseStrategy {
        self.broad_phase
    }

    /// Simulated time (s).
    #[must_use]
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Number of fixed steps taken.
    #[must_use]
    pub fn step_count(&self) -> u64 {
        self.step_count
    }

    /// Wall time waiting in the accumulator (s).
    #[must_use]
    pub fn accumulator(&self) -> f64 {
        self.accumulator
    }
}
