//! Headless drop scene.
//!
//! Drops the initial sphere plus a few random boxes and spheres, runs the
//! frame loop at 60 Hz for five seconds, resets halfway through and logs
//! each impact cue.
//!
//! Run with:
//! ```sh
//! RUST_LOG=clatter_core=debug cargo run -p clatter-core --example headless_drop
//! ```

#![allow(clippy::unwrap_used, clippy::expect_used)] // Example code

use clatter_core::{
    AudioDevice, AudioError, ControlAction, Cue, FixedRateScheduler, FrameLoop, MonotonicClock,
    SimulationContext,
};
use clatter_types::{SimulationConfig, SpawnConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Logs cues instead of playing them.
struct LogAudio;

impl AudioDevice for LogAudio {
    fn play(&mut self, cue: Cue) -> Result<(), AudioError> {
        info!(volume = cue.volume, "clack");
        Ok(())
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = SimulationConfig::default().seed(7);
    let mut ctx = SimulationContext::new(config, SpawnConfig::default())
        .expect("default configuration is valid");

    for _ in 0..3 {
        let action = ctx.controls().spawn_box();
        ctx.apply(action);
        let action = ctx.controls().spawn_sphere();
        ctx.apply(action);
    }

    let mut frame_loop = FrameLoop::new();
    let mut clock = MonotonicClock::start();
    let mut scheduler = FixedRateScheduler::new(60.0).with_frame_limit(300);

    let frames = frame_loop.run(
        &mut ctx,
        &mut clock,
        &mut scheduler,
        &mut LogAudio,
        |ctx, report| {
            if report.dropped > 0.0 {
                info!(dropped = report.dropped, "frame ran late");
            }
            if ctx.frame_count() == 150 {
                ctx.apply(ControlAction::Reset);
                let action = ctx.controls().set_restitution(0.9);
                ctx.apply(action);
                let action = ctx.controls().spawn_sphere();
                ctx.apply(action);
            }
        },
    );

    let stats = ctx.feedback().stats();
    info!(
        frames,
        simulated = ctx.world().time(),
        cues = stats.triggered,
        suppressed = stats.suppressed,
        bodies = ctx.world().body_count(),
        "done"
    );
}
