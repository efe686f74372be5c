//! Fixed-step drop simulation with impact feedback.
//!
//! This crate is the core of the clatter scene: spheres and boxes are
//! dropped onto a static floor, simulated at a fixed cadence regardless of
//! frame rate, mirrored into a visual scene after every step, and turned
//! into audio cues when they hit something hard enough.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    SimulationContext                        │
//! │  FrameTimer · World · ObjectPool · FeedbackHandler · Scene  │
//! └───────┬───────────────────┬──────────────────────┬──────────┘
//!         │ step              │ impacts              │ sync
//!         ▼                   ▼                      ▼
//! ┌──────────────┐   ┌─────────────────┐   ┌─────────────────┐
//! │    World     │   │ FeedbackHandler │   │  Scene (trait)  │
//! │ rapier sets  │   │  threshold 1.5  │   │   ProxyScene    │
//! └──────────────┘   └────────┬────────┘   └─────────────────┘
//!                             ▼
//!                     AudioDevice (trait)
//! ```
//!
//! # Layer 0 Crate
//!
//! This is a Layer 0 crate with **zero Bevy dependencies**. Rendering and
//! audio output live in Layer 1 crates that implement [`Scene`] and
//! [`AudioDevice`].
//!
//! # Quick Start
//!
//! ```
//! use clatter_core::{NullAudio, SimulationContext};
//! use clatter_types::{SimulationConfig, SpawnConfig};
//!
//! let mut ctx = SimulationContext::new(SimulationConfig::default(), SpawnConfig::default())?;
//!
//! for frame in 1..=120 {
//!     let elapsed = f64::from(frame) / 60.0;
//!     ctx.tick(elapsed, &mut NullAudio);
//! }
//!
//! let sphere = ctx.pool().spheres()[0];
//! let y = ctx.world().body_position(sphere.body()).map_or(0.0, |p| p.y);
//! assert!(y < 1.0);
//! # Ok::<(), clatter_types::SimError>(())
//! ```

#![deny(clippy::unwrap_used, clippy::expect_used)]
#![warn(missing_docs)]
#![allow(
    clippy::missing_const_for_fn,  // Many methods can't be const due to nalgebra
    clippy::module_name_repetitions,
    clippy::doc_markdown,          // Not all technical terms need backticks
)]

pub mod clock;
pub mod context;
pub mod control;
mod events;
pub mod feedback;
pub mod pool;
pub mod runner;
pub mod scene;
pub mod world;

pub use clock::{Clock, FrameTimer, ManualClock, MonotonicClock};
pub use context::{FrameReport, LoopState, SimulationContext};
pub use control::{quantize_restitution, ControlAction, ControlSurface, RESTITUTION_STEP};
pub use events::ImpactEvent;
pub use feedback::{
    AudioDevice, AudioError, Cue, FeedbackHandler, FeedbackStats, NullAudio, RecordingAudio,
    DEFAULT_IMPACT_THRESHOLD,
};
pub use pool::{DynamicObject, ObjectPool};
pub use runner::{FixedRateScheduler, FrameLoop, FrameScheduler, StopHandle};
pub use scene::{ProxyScene, Scene, SceneChange, VisualProxy};
pub use world::{StepOutcome, World, FLOOR_ID};
