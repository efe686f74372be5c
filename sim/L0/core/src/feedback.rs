//! Collision feedback: from impacts to audio cues.
//!
//! Every dynamic body is subscribed when it is spawned and unsubscribed when
//! it is reset. After each world step the [`FeedbackHandler`] walks the
//! drained impacts, drops those for unsubscribed bodies and plays a cue for
//! each impact strictly above the threshold.
//!
//! Playback goes through the [`AudioDevice`] seam. Devices must return
//! promptly; a failed cue is logged and counted, never propagated.

use clatter_types::BodyId;
use hashbrown::HashSet;
use rand::rngs::StdRng;
use rand::Rng;
use thiserror::Error;
use tracing::{debug, trace};

use crate::events::ImpactEvent;

/// Default impact threshold (m/s).
pub const DEFAULT_IMPACT_THRESHOLD: f64 = 1.5;

/// A one-shot sound request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cue {
    /// Playback volume in `[0, 1)`.
    pub volume: f32,
    /// Offset into the sample to start from (s). Always 0: every cue
    /// restarts the sound from the beginning.
    pub start_offset: f32,
}

impl Cue {
    /// Cue that starts from the beginning at `volume`.
    #[must_use]
    pub fn from_start(volume: f32) -> Self {
        Self {
            volume,
            start_offset: 0.0,
        }
    }
}

/// Errors from an audio device.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AudioError {
    /// No output device could be opened.
    #[error("audio unavailable: {0}")]
    Unavailable(String),

    /// The device refused the cue.
    #[error("playback failed: {0}")]
    Playback(String),
}

impl AudioError {
    /// Create an unavailable error.
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }

    /// Create a playback error.
    pub fn playback(msg: impl Into<String>) -> Self {
        Self::Playback(msg.into())
    }
}

/// Sink for impact cues.
///
/// `play` must not block on playback. Starting a cue while the previous one
/// is still sounding restarts the sound.
pub trait AudioDevice {
    /// Start a cue.
    ///
    /// # Errors
    ///
    /// Returns an error if the device cannot play. Callers discard it.
    fn play(&mut self, cue: Cue) -> Result<(), AudioError>;
}

/// Device that accepts and discards every cue.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullAudio;

impl AudioDevice for NullAudio {
    fn play(&mut self, _cue: Cue) -> Result<(), AudioError> {
        Ok(())
    }
}

/// Device that records cues, optionally failing every call.
#[derive(Debug, Clone, Default)]
pub struct RecordingAudio {
    /// Cues received, in order.
    pub cues: Vec<Cue>,
    /// When set, every `play` fails after recording the cue.
    pub fail: bool,
}

impl RecordingAudio {
    /// Device that records and succeeds.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Device that records and fails.
    #[must_use]
    pub fn failing() -> Self {
        Self {
            cues: Vec::new(),
            fail: true,
        }
    }
}

impl AudioDevice for RecordingAudio {
    fn play(&mut self, cue: Cue) -> Result<(), AudioError> {
        self.cues.push(cue);
        if self.fail {
            Err(AudioError::playback("recording device set to fail"))
        } else {
            Ok(())
        }
    }
}

/// Counters kept by the handler.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeedbackStats {
    /// Cues handed to the device successfully.
    pub triggered: u64,
    /// Impacts at or below the threshold.
    pub suppressed: u64,
    /// Cues the device rejected.
    pub failed: u64,
    /// Impacts for bodies with no listener.
    pub ignored: u64,
}

/// Turns impacts into cues for subscribed bodies.
#[derive(Debug)]
pub struct FeedbackHandler {
    listeners: HashSet<BodyId>,
    threshold: f64,
    rng: StdRng,
    stats: FeedbackStats,
}

impl FeedbackHandler {
    /// Create a handler with the given threshold and volume RNG.
    #[must_use]
    pub fn new(threshold: f64, rng: StdRng) -> Self {
        Self {
            listeners: HashSet::new(),
            threshold,
            rng,
            stats: FeedbackStats::default(),
        }
    }

    /// Register the listener for a body.
    pub fn subscribe(&mut self, body: BodyId) {
        self.listeners.insert(body);
    }

    /// Remove the listener for a body. Returns `false` if none was registered.
    pub fn unsubscribe(&mut self, body: BodyId) -> bool {
        self.listeners.remove(&body)
    }

    /// Whether a body has a listener.
    #[must_use]
    pub fn is_subscribed(&self, body: BodyId) -> bool {
        self.listeners.contains(&body)
    }

    /// Number of registered listeners.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Impact threshold (m/s).
    #[must_use]
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Whether an impact of this strength plays a cue.
    #[must_use]
    pub fn should_play(&self, strength: f64) -> bool {
        strength > self.threshold
    }

    /// Deliver impacts. Returns the number of cues the device accepted.
    pub fn handle(&mut self, impacts: &[ImpactEvent], audio: &mut dyn AudioDevice) -> usize {
        let mut played = 0;
        for impact in impacts {
            if !self.is_subscribed(impact.body) {
                self.stats.ignored += 1;
                continue;
            }
            if !self.should_play(impact.strength) {
                self.stats.suppressed += 1;
                continue;
            }

            let cue = Cue::from_start(self.rng.gen::<f32>());
            match audio.play(cue) {
                Ok(()) => {
                    trace!(
                        body = %impact.body,
                        strength = impact.strength,
                        volume = cue.volume,
                        "cue"
                    );
                    self.stats.triggered += 1;
                    played += 1;
                }
                Err(err) => {
                    debug!(body = %impact.body, %err, "cue dropped");
                    self.stats.failed += 1;
                }
            }
        }
        played
    }

    /// Counters so far.
    #[must_use]
    pub fn stats(&self) -> FeedbackStats {
        self.stats
    }
}
