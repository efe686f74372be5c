//! The simulation context.
//!
//! [`SimulationContext`] owns everything one session needs: the world, the
//! object pool, the scene, the frame timer, the feedback handler and the
//! control surface. There are no globals; hosts hold a context and call
//! [`SimulationContext::tick`] once per frame.
//!
//! # Frame
//!
//! ```text
//! elapsed ─► FrameTimer ─► delta
//!                            │
//!                 World::step(fixed, delta, max_substeps)
//!                            │
//!                   drain impacts ─► FeedbackHandler ─► AudioDevice
//!                            │
//!                  ObjectPool::sync ─► Scene
//! ```
//!
//! Control actions are applied with [`SimulationContext::apply`] between
//! ticks.

use clatter_types::{Point3, Result, ShapeKind, SimulationConfig, SpawnConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, trace, warn};

use crate::clock::FrameTimer;
use crate::control::{ControlAction, ControlSurface};
use crate::feedback::{AudioDevice, FeedbackHandler};
use crate::pool::{DynamicObject, ObjectPool};
use crate::scene::{ProxyScene, Scene};
use crate::world::World;

/// Whether the context has started ticking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoopState {
    /// Built, no frame run yet.
    #[default]
    Idle,
    /// At least one frame has run.
    Running,
}

/// What one tick did.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameReport {
    /// Wall time since the previous tick (s), as measured.
    pub delta: f64,
    /// Fixed steps taken.
    pub substeps: u32,
    /// Lag dropped by the sub-step cap (s).
    pub dropped: f64,
    /// Impact events delivered to the feedback handler.
    pub impacts: usize,
    /// Cues accepted by the audio device.
    pub cues: usize,
    /// Proxies updated by the sync pass.
    pub synced: usize,
}

/// One session of the drop scene.
#[derive(Debug)]
pub struct SimulationContext<S: Scene = ProxyScene> {
    config: SimulationConfig,
    world: World,
    pool: ObjectPool,
    scene: S,
    timer: FrameTimer,
    feedback: FeedbackHandler,
    controls: ControlSurface,
    state: LoopState,
    frames: u64,
}

impl SimulationContext<ProxyScene> {
    /// Create a context with an in-memory scene.
    ///
    /// # Errors
    ///
    /// Returns an error if either configuration is invalid.
    pub fn new(config: SimulationConfig, spawn: SpawnConfig) -> Result<Self> {
        Self::with_scene(config, spawn, ProxyScene::new())
    }
}

impl<S: Scene> SimulationContext<S> {
    /// Create a context that drives `scene`.
    ///
    /// When [`SpawnConfig::initial_sphere`] is set, one sphere is dropped
    /// straight down from the drop height.
    ///
    /// # Errors
    ///
    /// Returns an error if either configuration is invalid.
    pub fn with_scene(config: SimulationConfig, spawn: SpawnConfig, scene: S) -> Result<Self> {
        config.validate()?;
        spawn.validate()?;

        let (feedback_rng, control_rng) = match config.seed {
            Some(seed) => (
                StdRng::seed_from_u64(seed),
                StdRng::seed_from_u64(seed.wrapping_add(1)),
            ),
            None => (StdRng::from_entropy(), StdRng::from_entropy()),
        };

        let world = World::new(&config)?;
        let feedback = FeedbackHandler::new(config.impact_threshold, feedback_rng);
        let controls = ControlSurface::new(spawn.clone(), config.contact.restitution, control_rng);

        let mut ctx = Self {
            config,
            world,
            pool: ObjectPool::new(),
            scene,
            timer: FrameTimer::new(),
            feedback,
            controls,
            state: LoopState::Idle,
            frames: 0,
        };

        if spawn.initial_sphere {
            ctx.spawn_sphere(spawn.sphere_radius, Point3::new(0.0, spawn.drop_height, 0.0));
        }

        info!(objects = ctx.pool.len(), "simulation context ready");
        Ok(ctx)
    }

    /// Run one frame at wall time `elapsed`.
    pub fn tick(&mut self, elapsed: f64, audio: &mut dyn AudioDevice) -> FrameReport {
        self.state = LoopState::Running;
        self.frames += 1;

        let delta = self.timer.delta(elapsed);
        let outcome = self
            .world
            .step(self.config.fixed_timestep, delta, self.config.max_substeps);

        let impacts = self.world.drain_impacts();
        let cues = self.feedback.handle(&impacts, audio);
        let synced = self.pool.sync(&self.world, &mut self.scene);

        let report = FrameReport {
            delta,
            substeps: outcome.substeps,
            dropped: outcome.dropped,
            impacts: impacts.len(),
            cues,
            synced,
        };
        trace!(frame = self.frames, ?report, "tick");
        report
    }

    /// Apply a control action. Must be called between ticks.
    pub fn apply(&mut self, action: ControlAction) {
        match action {
            ControlAction::SpawnSphere { radius, position } => {
                if ShapeKind::sphere(radius).is_valid() {
                    self.spawn_sphere(radius, position);
                } else {
                    warn!(radius, "ignoring sphere with non-positive radius");
                }
            }
            ControlAction::SpawnBox { size, position } => {
                if ShapeKind::cube(size).is_valid() {
                    self.spawn_box(size, position);
                } else {
                    warn!(size, "ignoring box with non-positive size");
                }
            }
            ControlAction::Reset => {
                self.reset_all();
            }
            ControlAction::SetRestitution(value) => self.set_restitution(value),
        }
    }

    /// Drop a sphere. `radius` must be positive.
    pub fn spawn_sphere(&mut self, radius: f64, position: Point3<f64>) -> DynamicObject {
        self.pool.spawn_sphere(
            &mut self.world,
            &mut self.scene,
            &mut self.feedback,
            radius,
            position,
        )
    }

    /// Drop a cube. `size` must be positive.
    pub fn spawn_box(&mut self, size: f64, position: Point3<f64>) -> DynamicObject {
        self.pool.spawn_box(
            &mut self.world,
            &mut self.scene,
            &mut self.feedback,
            size,
            position,
        )
    }

    /// Remove every dynamic object. Returns how many were removed.
    pub fn reset_all(&mut self) -> usize {
        self.pool
            .reset_all(&mut self.world, &mut self.scene, &mut self.feedback)
    }

    /// Set contact restitution, clamped to `[0, 1]`, from the next step on.
    pub fn set_restitution(&mut self, value: f64) {
        if value.is_nan() {
            warn!("ignoring NaN restitution");
            return;
        }
        self.world.set_contact_restitution(value.clamp(0.0, 1.0));
    }

    /// Idle until the first tick, then running.
    #[must_use]
    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Number of ticks run.
    #[must_use]
    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    /// Configuration the context was built with.
    #[must_use]
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// The physics world.
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// The object pool.
    #[must_use]
    pub fn pool(&self) -> &ObjectPool {
        &self.pool
    }

    /// The scene.
    #[must_use]
    pub fn scene(&self) -> &S {
        &self.scene
    }

    /// Mutable scene access, for hosts that drain scene state.
    pub fn scene_mut(&mut self) -> &mut S {
        &mut self.scene
    }

    /// The feedback handler.
    #[must_use]
    pub fn feedback(&self) -> &FeedbackHandler {
        &self.feedback
    }

    /// The control surface.
    pub fn controls(&mut self) -> &mut ControlSurface {
        &mut self.controls
    }
}
