//! Explicit frame loop for hosts without their own scheduler.
//!
//! Windowed hosts (the Bevy layer) call [`SimulationContext::tick`] from
//! their own update. Headless hosts use [`FrameLoop`]: it reads the clock,
//! ticks the context, runs a between-frames hook for control actions and
//! yields to a [`FrameScheduler`], until a [`StopHandle`] asks it to stop.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::clock::Clock;
use crate::context::{FrameReport, SimulationContext};
use crate::feedback::AudioDevice;
use crate::scene::Scene;

/// Decides when the next frame starts.
pub trait FrameScheduler {
    /// Block until the next frame is due. Returning `false` ends the loop.
    fn wait_for_next_frame(&mut self) -> bool;
}

/// Paces frames at a fixed rate using `thread::sleep`.
#[derive(Debug, Clone)]
pub struct FixedRateScheduler {
    period: Duration,
    next: Option<Instant>,
    remaining: Option<u64>,
}

impl FixedRateScheduler {
    /// Frames every `1 / hz` seconds.
    #[must_use]
    pub fn new(hz: f64) -> Self {
        let hz = if hz.is_finite() && hz > 0.0 { hz } else { 60.0 };
        Self {
            period: Duration::from_secs_f64(1.0 / hz),
            next: None,
            remaining: None,
        }
    }

    /// Stop after `frames` frames.
    #[must_use]
    pub fn with_frame_limit(mut self, frames: u64) -> Self {
        self.remaining = Some(frames);
        self
    }
}

impl FrameScheduler for FixedRateScheduler {
    fn wait_for_next_frame(&mut self) -> bool {
        if let Some(remaining) = self.remaining.as_mut() {
            if *remaining == 0 {
                return false;
            }
            *remaining -= 1;
        }

        let now = Instant::now();
        let next = self.next.unwrap_or(now);
        if next > now {
            thread::sleep(next - now);
        }
        // Re-anchor instead of catching up after a stall.
        self.next = Some(next.max(now) + self.period);
        true
    }
}

/// Cloneable request to stop a [`FrameLoop`], usable from other threads.
///
/// A request is consumed by the run it stops. Issued before `run`, it makes
/// that run return without ticking.
#[derive(Debug, Clone, Default)]
pub struct StopHandle {
    requested: Arc<AtomicBool>,
}

impl StopHandle {
    /// Ask the loop to stop before its next frame.
    pub fn stop(&self) {
        self.requested.store(true, Ordering::Release);
    }

    /// Whether a stop is pending.
    #[must_use]
    pub fn is_stop_requested(&self) -> bool {
        self.requested.load(Ordering::Acquire)
    }

    fn take(&self) -> bool {
        self.requested.swap(false, Ordering::AcqRel)
    }
}

/// Runs ticks until stopped.
#[derive(Debug, Default)]
pub struct FrameLoop {
    running: Arc<AtomicBool>,
    stop: StopHandle,
}

impl FrameLoop {
    /// Create a stopped loop.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle for stopping the loop from a hook or another thread.
    #[must_use]
    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    /// Whether the loop is currently running.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Request a stop before the next frame.
    pub fn stop(&self) {
        self.stop.stop();
    }

    /// Run frames until stopped or the scheduler ends. Returns frames run.
    ///
    /// `between_frames` runs after every tick with the context and the
    /// frame's report; use it to apply queued control actions or to stop
    /// the loop through a [`StopHandle`]. A stop requested before the call
    /// is honoured: no frame runs and the request is cleared.
    pub fn run<S, F>(
        &mut self,
        ctx: &mut SimulationContext<S>,
        clock: &mut dyn Clock,
        scheduler: &mut dyn FrameScheduler,
        audio: &mut dyn AudioDevice,
        mut between_frames: F,
    ) -> u64
    where
        S: Scene,
        F: FnMut(&mut SimulationContext<S>, &FrameReport),
    {
        if self.stop.take() {
            debug!("stop requested before start, frame loop not run");
            return 0;
        }
        self.running.store(true, Ordering::Release);
        info!("frame loop started");

        let mut frames = 0;
        while scheduler.wait_for_next_frame() {
            if self.stop.take() {
                break;
            }
            let report = ctx.tick(clock.elapsed(), audio);
            frames += 1;
            between_frames(ctx, &report);
            if self.stop.take() {
                break;
            }
        }

        self.running.store(false, Ordering::Release);
        debug!(frames, "frame loop stopped");
        frames
    }
}
