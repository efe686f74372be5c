//! Audio output for impact cues.
//!
//! This crate is **Layer 1**: it implements the core
//! [`AudioDevice`](clatter_core::AudioDevice) seam on top of a cpal output
//! stream. The impact sound is synthesized procedurally, so there is no
//! asset to load.
//!
//! ```text
//! FeedbackHandler ──play(Cue)──► AudioEngine ──lock──► Mixer ◄──callback── cpal stream
//! ```
//!
//! There is exactly one impact sound. A new cue rewinds it to the start at
//! the cue's volume, the way a single media element would.
//!
//! If no output device is available the engine starts disabled and every
//! cue fails; the feedback handler logs and drops those failures.

#![deny(clippy::unwrap_used, clippy::expect_used)]
#![warn(missing_docs)]

mod engine;
mod mixer;
mod voice;

pub use engine::AudioEngine;
pub use mixer::{soft_clip, Mixer};
pub use voice::ImpactVoice;
