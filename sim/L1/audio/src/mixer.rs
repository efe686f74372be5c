//! Sample mixing shared between the game thread and the audio callback.

use clatter_core::Cue;

use crate::voice::ImpactVoice;

/// Gain applied to the mix before clipping.
const MASTER_VOLUME: f32 = 0.8;

/// State behind the engine's lock.
#[derive(Debug, Clone)]
pub struct Mixer {
    impact: ImpactVoice,
    sample_rate: f32,
}

impl Mixer {
    /// Create a mixer for a stream at `sample_rate`.
    #[must_use]
    pub fn new(sample_rate: f32) -> Self {
        Self {
            impact: ImpactVoice::new(),
            sample_rate,
        }
    }

    /// Start a cue. The offset is ignored: the sound always rewinds to the start.
    pub fn trigger(&mut self, cue: Cue) {
        self.impact.restart(cue.volume);
    }

    /// Stream sample rate.
    #[must_use]
    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Number of voices sounding (0 or 1).
    #[must_use]
    pub fn active_voices(&self) -> usize {
        usize::from(self.impact.is_playing())
    }

    /// Fill an interleaved f32 buffer. Extra channels past stereo get silence.
    pub fn fill_f32(&mut self, data: &mut [f32], channels: usize) {
        self.fill(data, channels, 0.0, |sample| sample);
    }

    /// Fill an interleaved i16 buffer.
    pub fn fill_i16(&mut self, data: &mut [i16], channels: usize) {
        self.fill(data, channels, 0, sample_to_i16);
    }

    fn fill<T: Copy>(
        &mut self,
        data: &mut [T],
        channels: usize,
        silence: T,
        convert: impl Fn(f32) -> T,
    ) {
        data.fill(silence);
        if channels == 0 {
            return;
        }

        for frame in data.chunks_mut(channels) {
            let Some(sample) = self.impact.next_sample(self.sample_rate) else {
                break;
            };
            let sample = convert(soft_clip(sample * MASTER_VOLUME));
            for out in frame.iter_mut().take(2) {
                *out = sample;
            }
        }
    }
}

#[allow(clippy::cast_possible_truncation)] // clamped to i16 range
fn sample_to_i16(sample: f32) -> i16 {
    (sample * 32_767.0).clamp(-32_768.0, 32_767.0) as i16
}

/// Soft clipping to keep peaks from distorting harshly.
#[must_use]
pub fn soft_clip(x: f32) -> f32 {
    if x.abs() < 0.5 {
        x
    } else {
        x.signum() * (1.0 - (-2.0 * (x.abs() - 0.5)).exp() * 0.5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn idle_mixer_outputs_silence() {
        let mut mixer = Mixer::new(48_000.0);
        let mut data = vec![1.0_f32; 256];
        mixer.fill_f32(&mut data, 2);
        assert!(data.iter().all(|s| *s == 0.0));
        assert_eq!(mixer.active_voices(), 0);
    }

    #[test]
    fn cue_produces_sound_on_both_channels() {
        let mut mixer = Mixer::new(48_000.0);
        mixer.trigger(Cue::from_start(0.9));
        assert_eq!(mixer.active_voices(), 1);

        let mut data = vec![0.0_f32; 512];
        mixer.fill_f32(&mut data, 2);
        assert!(data.iter().any(|s| s.abs() > 1e-3));
        for frame in data.chunks(2) {
            assert_relative_eq!(frame[0], frame[1]);
        }
    }

    #[test]
    fn extra_channels_are_silent() {
        let mut mixer = Mixer::new(48_000.0);
        mixer.trigger(Cue::from_start(0.9));
        let mut data = vec![0.0_f32; 600];
        mixer.fill_f32(&mut data, 6);
        for frame in data.chunks(6) {
            assert!(frame[2..].iter().all(|s| *s == 0.0));
        }
    }

    #[test]
    fn soft_clip_bounds_output() {
        assert_relative_eq!(soft_clip(0.25), 0.25);
        assert!(soft_clip(10.0) < 1.0);
        assert!(soft_clip(-10.0) > -1.0);
    }

    #[test]
    fn i16_output_follows_f32() {
        let mut float_mixer = Mixer::new(48_000.0);
        let mut int_mixer = Mixer::new(48_000.0);
        float_mixer.trigger(Cue::from_start(0.9));
        int_mixer.trigger(Cue::from_start(0.9));

        let mut floats = vec![0.0_f32; 512];
        let mut ints = vec![0_i16; 512];
        float_mixer.fill_f32(&mut floats, 2);
        int_mixer.fill_i16(&mut ints, 2);

        assert!(ints.iter().any(|s| *s != 0));
        for (f, i) in floats.iter().zip(&ints) {
            assert_eq!(*i, sample_to_i16(*f));
        }
    }

    #[test]
    fn i16_conversion_saturates() {
        assert_eq!(sample_to_i16(0.0), 0);
        assert_eq!(sample_to_i16(1.0), 32_767);
        assert_eq!(sample_to_i16(-2.0), -32_768);
    }
}
