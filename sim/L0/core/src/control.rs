//! User-facing controls.
//!
//! The [`ControlSurface`] turns button presses and slider moves into
//! [`ControlAction`]s. Actions are queued by the host and applied to the
//! simulation between two ticks, never during one.

use clatter_types::{Point3, SpawnConfig};
use rand::rngs::StdRng;
use rand::Rng;

/// Resolution of the restitution control.
pub const RESTITUTION_STEP: f64 = 0.01;

/// A change requested by the user.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlAction {
    /// Drop a sphere.
    SpawnSphere {
        /// Radius (m), positive.
        radius: f64,
        /// Drop point.
        position: Point3<f64>,
    },
    /// Drop a cube.
    SpawnBox {
        /// Edge length (m), positive.
        size: f64,
        /// Drop point.
        position: Point3<f64>,
    },
    /// Remove every dynamic object.
    Reset,
    /// Change contact restitution. Always in `[0, 1]` on a 0.01 grid.
    SetRestitution(f64),
}

/// Clamp to `[0, 1]` and snap to the control's resolution.
#[must_use]
pub fn quantize_restitution(value: f64) -> f64 {
    let steps = (value.clamp(0.0, 1.0) / RESTITUTION_STEP).round();
    steps * RESTITUTION_STEP
}

/// Produces validated actions with randomised drop points.
#[derive(Debug)]
pub struct ControlSurface {
    spawn: SpawnConfig,
    restitution: f64,
    rng: StdRng,
}

impl ControlSurface {
    /// Create a surface showing `restitution` as the current value.
    #[must_use]
    pub fn new(spawn: SpawnConfig, restitution: f64, rng: StdRng) -> Self {
        Self {
            spawn,
            restitution: quantize_restitution(restitution),
            rng,
        }
    }

    /// Spawn settings in use.
    #[must_use]
    pub fn spawn_config(&self) -> &SpawnConfig {
        &self.spawn
    }

    /// Restitution currently shown on the control.
    #[must_use]
    pub fn restitution(&self) -> f64 {
        self.restitution
    }

    fn drop_point(&mut self) -> Point3<f64> {
        let u = self.rng.gen::<f64>();
        let v = self.rng.gen::<f64>();
        self.spawn.drop_point(u, v)
    }

    /// Sphere of the configured radius at a random drop point.
    pub fn spawn_sphere(&mut self) -> ControlAction {
        ControlAction::SpawnSphere {
            radius: self.spawn.sphere_radius,
            position: self.drop_point(),
        }
    }

    /// Box of random size at a random drop point.
    pub fn spawn_box(&mut self) -> ControlAction {
        let size = self.spawn.box_size(self.rng.gen::<f64>());
        ControlAction::SpawnBox {
            size,
            position: self.drop_point(),
        }
    }

    /// Clear the scene.
    #[must_use]
    pub fn reset(&self) -> ControlAction {
        ControlAction::Reset
    }

    /// Move the restitution control to `value`.
    ///
    /// Out-of-range values are clamped, NaN keeps the current value.
    pub fn set_restitution(&mut self, value: f64) -> ControlAction {
        if !value.is_nan() {
            self.restitution = quantize_restitution(value);
        }
        ControlAction::SetRestitution(self.restitution)
    }

    /// Move the restitution control by `steps` increments of 0.01.
    pub fn nudge_restitution(&mut self, steps: i32) -> ControlAction {
        self.set_restitution(self.restitution + f64::from(steps) * RESTITUTION_STEP)
    }
}
