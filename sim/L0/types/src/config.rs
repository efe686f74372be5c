//! Configuration types for the simulation.
//!
//! [`SimulationConfig`] controls how the world steps: the fixed timestep and
//! sub-step cap, gravity, broad phase, contact material, sleeping and the
//! impact threshold. [`SpawnConfig`] controls where and how big the objects
//! created by the control surface are.

use nalgebra::{Point3, Vector3};

use crate::material::ContactMaterial;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Standard gravity used by the scene (m/s²).
pub const EARTH_GRAVITY: f64 = 9.82;

/// Broad-phase algorithm used to find candidate contact pairs.
///
/// Chosen once when the world is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BroadPhaseStrategy {
    /// Sweep-and-prune over axis-aligned bounding boxes.
    #[default]
    SweepAndPrune,
}

/// Main configuration for a simulation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SimulationConfig {
    /// Fixed internal step (seconds).
    pub fixed_timestep: f64,
    /// Maximum number of fixed steps taken per frame. Lag beyond this is dropped.
    pub max_substeps: u32,
    /// Gravity acceleration (m/s²), Y-up.
    pub gravity: Vector3<f64>,
    /// Broad-phase strategy.
    pub broad_phase: BroadPhaseStrategy,
    /// Default contact material.
    pub contact: ContactMaterial,
    /// Whether resting bodies may fall asleep.
    pub allow_sleeping: bool,
    /// Impacts must be strictly above this closing speed (m/s) to play a cue.
    pub impact_threshold: f64,
    /// Seed for cue volumes and drop points. `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            fixed_timestep: 1.0 / 60.0,
            max_substeps: 3,
            gravity: Vector3::new(0.0, -EARTH_GRAVITY, 0.0),
            broad_phase: BroadPhaseStrategy::SweepAndPrune,
            contact: ContactMaterial::default(),
            allow_sleeping: true,
            impact_threshold: 1.5,
            seed: None,
        }
    }
}

impl SimulationConfig {
    /// Create a config with the given fixed timestep.
    #[must_use]
    pub fn with_timestep(fixed_timestep: f64) -> Self {
        Self {
            fixed_timestep,
            ..Default::default()
        }
    }

    /// Real-time preset (60 Hz, 3 sub-steps). Same as the default.
    #[must_use]
    pub fn realtime() -> Self {
        Self::default()
    }

    /// Finer stepping for slow machines that still want smooth contact (240 Hz).
    #[must_use]
    pub fn high_fidelity() -> Self {
        Self {
            fixed_timestep: 1.0 / 240.0,
            max_substeps: 12,
            ..Default::default()
        }
    }

    /// Reproducible preset: seeded RNG and no sleeping.
    #[must_use]
    pub fn deterministic(seed: u64) -> Self {
        Self {
            allow_sleeping: false,
            seed: Some(seed),
            ..Default::default()
        }
    }

    /// Set gravity.
    #[must_use]
    pub fn gravity(mut self, gravity: Vector3<f64>) -> Self {
        self.gravity = gravity;
        self
    }

    /// Disable gravity.
    #[must_use]
    pub fn zero_gravity(mut self) -> Self {
        self.gravity = Vector3::zeros();
        self
    }

    /// Set the sub-step cap.
    #[must_use]
    pub fn max_substeps(mut self, max_substeps: u32) -> Self {
        self.max_substeps = max_substeps;
        self
    }

    /// Set the contact material.
    #[must_use]
    pub fn contact(mut self, contact: ContactMaterial) -> Self {
        self.contact = contact;
        self
    }

    /// Set the initial restitution.
    #[must_use]
    pub fn restitution(mut self, restitution: f64) -> Self {
        self.contact.restitution = restitution;
        self
    }

    /// Set the impact threshold.
    #[must_use]
    pub fn impact_threshold(mut self, threshold: f64) -> Self {
        self.impact_threshold = threshold;
        self
    }

    /// Seed the RNG.
    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Keep every body awake.
    #[must_use]
    pub fn without_sleeping(mut self) -> Self {
        self.allow_sleeping = false;
        self
    }

    /// Validate the configuration.
    pub fn validate(&self) -> crate::Result<()> {
        if !self.fixed_timestep.is_finite() || self.fixed_timestep <= 0.0 {
            return Err(crate::SimError::InvalidTimestep(self.fixed_timestep));
        }

        if self.fixed_timestep > 1.0 {
            return Err(crate::SimError::invalid_config(
                "fixed timestep > 1 second is likely an error",
            ));
        }

        if self.max_substeps == 0 {
            return Err(crate::SimError::invalid_config(
                "max_substeps must be at least 1",
            ));
        }

        if !self.gravity.iter().all(|g| g.is_finite()) {
            return Err(crate::SimError::invalid_config("gravity must be finite"));
        }

        if !self.impact_threshold.is_finite() || self.impact_threshold < 0.0 {
            return Err(crate::SimError::invalid_config(
                "impact_threshold must be finite and non-negative",
            ));
        }

        self.contact.validate()?;

        Ok(())
    }

    /// Step frequency in Hz.
    #[must_use]
    pub fn frequency(&self) -> f64 {
        1.0 / self.fixed_timestep
    }
}

/// Where and how big spawned objects are.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SpawnConfig {
    /// Radius of spawned spheres (m).
    pub sphere_radius: f64,
    /// Height objects are dropped from (m).
    pub drop_height: f64,
    /// Width of the square drop area centered on the origin (m).
    pub horizontal_spread: f64,
    /// Half-open range `[min, max)` for box edge lengths (m).
    pub box_size_range: (f64, f64),
    /// Whether a sphere is dropped at `(0, drop_height, 0)` when the session starts.
    pub initial_sphere: bool,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            sphere_radius: 0.5,
            drop_height: 3.0,
            horizontal_spread: 3.0,
            box_size_range: (0.1, 1.0),
            initial_sphere: true,
        }
    }
}

impl SpawnConfig {
    /// Start with an empty scene.
    #[must_use]
    pub fn without_initial_sphere(mut self) -> Self {
        self.initial_sphere = false;
        self
    }

    /// Set the sphere radius.
    #[must_use]
    pub fn sphere_radius(mut self, radius: f64) -> Self {
        self.sphere_radius = radius;
        self
    }

    /// Set the drop height.
    #[must_use]
    pub fn drop_height(mut self, height: f64) -> Self {
        self.drop_height = height;
        self
    }

    /// Set the box edge range.
    #[must_use]
    pub fn box_size_range(mut self, min: f64, max: f64) -> Self {
        self.box_size_range = (min, max);
        self
    }

    /// Drop point for two uniform samples `u, v` in `[0, 1)`.
    #[must_use]
    pub fn drop_point(&self, u: f64, v: f64) -> Point3<f64> {
        Point3::new(
            (u - 0.5) * self.horizontal_spread,
            self.drop_height,
            (v - 0.5) * self.horizontal_spread,
        )
    }

    /// Box edge length for a uniform sample `u` in `[0, 1)`.
    #[must_use]
    pub fn box_size(&self, u: f64) -> f64 {
        let (min, max) = self.box_size_range;
        min + u * (max - min)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> crate::Result<()> {
        if !self.sphere_radius.is_finite() || self.sphere_radius <= 0.0 {
            return Err(crate::SimError::invalid_config(
                "sphere_radius must be positive",
            ));
        }

        if !self.drop_height.is_finite() {
            return Err(crate::SimError::invalid_config("drop_height must be finite"));
        }

        if !self.horizontal_spread.is_finite() || self.horizontal_spread < 0.0 {
            return Err(crate::SimError::invalid_config(
                "horizontal_spread must be finite and non-negative",
            ));
        }

        let (min, max) = self.box_size_range;
        if !min.is_finite() || !max.is_finite() || min <= 0.0 || max <= min {
            return Err(crate::SimError::invalid_config(
                "box_size_range must satisfy 0 < min < max",
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_config_default() {
        let config = SimulationConfig::default();
        assert!(config.validate().is_ok());
        assert_relative_eq!(config.fixed_timestep, 1.0 / 60.0, epsilon = 1e-12);
        assert_eq!(config.max_substeps, 3);
        assert_relative_eq!(config.gravity.y, -9.82);
        assert_eq!(config.broad_phase, BroadPhaseStrategy::SweepAndPrune);
        assert!(config.allow_sleeping);
        assert_relative_eq!(config.impact_threshold, 1.5);
    }

    #[test]
    fn test_config_presets() {
        let realtime = SimulationConfig::realtime();
        assert_eq!(realtime, SimulationConfig::default());

        let hifi = SimulationConfig::high_fidelity();
        assert_relative_eq!(hifi.frequency(), 240.0, epsilon = 1e-9);
        assert!(hifi.validate().is_ok());

        let det = SimulationConfig::deterministic(42);
        assert_eq!(det.seed, Some(42));
        assert!(!det.allow_sleeping);
    }

    #[test]
    fn test_config_builder() {
        let config = SimulationConfig::with_timestep(0.01)
            .zero_gravity()
            .restitution(0.2)
            .impact_threshold(3.0)
            .seed(5);

        assert_relative_eq!(config.fixed_timestep, 0.01);
        assert_relative_eq!(config.gravity.norm(), 0.0);
        assert_relative_eq!(config.contact.restitution, 0.2);
        assert_relative_eq!(config.impact_threshold, 3.0);
        assert_eq!(config.seed, Some(5));
    }

    #[test]
    fn test_config_validation() {
        let mut config = SimulationConfig::default();
        assert!(config.validate().is_ok());

        config.fixed_timestep = -0.01;
        assert_eq!(
            config.validate(),
            Err(crate::SimError::InvalidTimestep(-0.01))
        );

        config.fixed_timestep = f64::NAN;
        assert!(config.validate().is_err());

        config.fixed_timestep = 2.0;
        assert!(config.validate().is_err());

        let config = SimulationConfig::default().max_substeps(0);
        assert!(config.validate().is_err());

        let config = SimulationConfig::default().restitution(1.2);
        assert!(config.validate().is_err());

        let config = SimulationConfig::default().gravity(Vector3::new(0.0, f64::INFINITY, 0.0));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_spawn_defaults() {
        let spawn = SpawnConfig::default();
        assert!(spawn.validate().is_ok());
        assert_relative_eq!(spawn.sphere_radius, 0.5);
        assert!(spawn.initial_sphere);
    }

    #[test]
    fn test_drop_point_is_centered() {
        let spawn = SpawnConfig::default();
        let center = spawn.drop_point(0.5, 0.5);
        assert_relative_eq!(center, Point3::new(0.0, 3.0, 0.0));

        let corner = spawn.drop_point(0.0, 0.0);
        assert_relative_eq!(corner, Point3::new(-1.5, 3.0, -1.5));
    }

    #[test]
    fn test_box_size_stays_positive() {
        let spawn = SpawnConfig::default();
        assert_relative_eq!(spawn.box_size(0.0), 0.1);
        assert!(spawn.box_size(0.999_999) < 1.0);
    }

    #[test]
    fn test_spawn_validation() {
        assert!(SpawnConfig::default().sphere_radius(0.0).validate().is_err());
        assert!(SpawnConfig::default()
            .box_size_range(0.0, 1.0)
            .validate()
            .is_err());
        assert!(SpawnConfig::default()
            .box_size_range(0.5, 0.5)
            .validate()
            .is_err());
    }
}
