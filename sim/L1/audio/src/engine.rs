//! cpal output stream.

use std::sync::{Arc, Mutex};

use clatter_core::{AudioDevice, AudioError, Cue};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use tracing::{error, info, warn};

use crate::mixer::Mixer;

/// Fallback rate reported by a disabled engine.
const DEFAULT_SAMPLE_RATE: f32 = 44_100.0;

/// Owns the output stream and the mixer it reads from.
///
/// `cpal::Stream` is not `Send` on every platform, so the engine stays on
/// the thread that created it.
pub struct AudioEngine {
    mixer: Arc<Mutex<Mixer>>,
    _stream: Option<cpal::Stream>,
    enabled: bool,
}

impl std::fmt::Debug for AudioEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AudioEngine")
            .field("enabled", &self.enabled)
            .field("active_voices", &self.active_voice_count())
            .finish_non_exhaustive()
    }
}

impl Default for AudioEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioEngine {
    /// Open the default output device.
    ///
    /// Falls back to a disabled engine when no device can be opened.
    #[must_use]
    pub fn new() -> Self {
        match Self::try_init() {
            Ok(engine) => engine,
            Err(err) => {
                warn!(%err, "running without audio");
                Self::disabled()
            }
        }
    }

    /// An engine with no output. Every cue fails with
    /// [`AudioError::Unavailable`].
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            mixer: Arc::new(Mutex::new(Mixer::new(DEFAULT_SAMPLE_RATE))),
            _stream: None,
            enabled: false,
        }
    }

    /// Open the default output device and start the stream.
    ///
    /// # Errors
    ///
    /// Returns [`AudioError::Unavailable`] if there is no device, no usable
    /// stream format, or the stream fails to start.
    pub fn try_init() -> Result<Self, AudioError> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| AudioError::unavailable("no audio output device found"))?;

        let config = device
            .default_output_config()
            .map_err(|e| AudioError::unavailable(format!("no default output config: {e}")))?;

        #[allow(clippy::cast_precision_loss)]
        let sample_rate = config.sample_rate().0 as f32;
        let channels = usize::from(config.channels());

        let mixer = Arc::new(Mutex::new(Mixer::new(sample_rate)));
        let callback_mixer = Arc::clone(&mixer);

        let stream = match config.sample_format() {
            cpal::SampleFormat::F32 => device
                .build_output_stream(
                    &config.into(),
                    move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                        if let Ok(mut mixer) = callback_mixer.lock() {
                            mixer.fill_f32(data, channels);
                        } else {
                            data.fill(0.0);
                        }
                    },
                    |err| error!(%err, "audio stream error"),
                    None,
                )
                .map_err(|e| AudioError::unavailable(format!("failed to build f32 stream: {e}")))?,
            cpal::SampleFormat::I16 => device
                .build_output_stream(
                    &config.into(),
                    move |data: &mut [i16], _: &cpal::OutputCallbackInfo| {
                        if let Ok(mut mixer) = callback_mixer.lock() {
                            mixer.fill_i16(data, channels);
                        } else {
                            data.fill(0);
                        }
                    },
                    |err| error!(%err, "audio stream error"),
                    None,
                )
                .map_err(|e| AudioError::unavailable(format!("failed to build i16 stream: {e}")))?,
            format => {
                return Err(AudioError::unavailable(format!(
                    "unsupported sample format: {format:?}"
                )))
            }
        };

        stream
            .play()
            .map_err(|e| AudioError::unavailable(format!("failed to play stream: {e}")))?;

        info!(sample_rate, channels, "audio output started");
        Ok(Self {
            mixer,
            _stream: Some(stream),
            enabled: true,
        })
    }

    /// Start a cue without waiting for it to play.
    ///
    /// # Errors
    ///
    /// Fails when the engine is disabled or the mixer lock is poisoned.
    pub fn play_cue(&self, cue: Cue) -> Result<(), AudioError> {
        if !self.enabled {
            return Err(AudioError::unavailable("audio engine disabled"));
        }
        let mut mixer = self
            .mixer
            .lock()
            .map_err(|_| AudioError::playback("mixer lock poisoned"))?;
        mixer.trigger(cue);
        Ok(())
    }

    /// Whether an output stream is running.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Number of voices currently sounding.
    #[must_use]
    pub fn active_voice_count(&self) -> usize {
        self.mixer.lock().map_or(0, |m| m.active_voices())
    }

    /// Output sample rate.
    #[must_use]
    pub fn sample_rate(&self) -> f32 {
        self.mixer
            .lock()
            .map_or(DEFAULT_SAMPLE_RATE, |m| m.sample_rate())
    }
}

impl AudioDevice for AudioEngine {
    fn play(&mut self, cue: Cue) -> Result<(), AudioError> {
        self.play_cue(cue)
    }
}
