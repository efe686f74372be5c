//! Shared fixtures.

use clatter_core::{AudioDevice, FrameReport, SimulationContext};
use clatter_types::{SimulationConfig, SpawnConfig};

/// 60 Hz frame.
pub const FRAME: f64 = 1.0 / 60.0;

/// Seeded context, no initial sphere.
pub fn empty_context() -> SimulationContext {
    SimulationContext::new(
        SimulationConfig::default().seed(2024),
        SpawnConfig::default().without_initial_sphere(),
    )
    .expect("default config is valid")
}

/// Seeded context with the initial sphere and the given restitution.
pub fn drop_context(restitution: f64) -> SimulationContext {
    SimulationContext::new(
        SimulationConfig::default().seed(2024).restitution(restitution),
        SpawnConfig::default(),
    )
    .expect("config is valid")
}

/// Drives a context at a steady frame rate.
#[derive(Default)]
pub struct Driver {
    frame: u32,
}

impl Driver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Elapsed time of the last frame run.
    pub fn elapsed(&self) -> f64 {
        f64::from(self.frame) * FRAME
    }

    /// Run one frame.
    pub fn frame(
        &mut self,
        ctx: &mut SimulationContext,
        audio: &mut dyn AudioDevice,
    ) -> FrameReport {
        self.frame += 1;
        ctx.tick(self.elapsed(), audio)
    }

    /// Run `n` frames, collecting reports.
    pub fn frames(
        &mut self,
        ctx: &mut SimulationContext,
        audio: &mut dyn AudioDevice,
        n: u32,
    ) -> Vec<FrameReport> {
        (0..n).map(|_| self.frame(ctx, audio)).collect()
    }
}
