//! The procedural impact sound.

use std::f32::consts::TAU;

/// Length of the impact sound (s).
pub const IMPACT_DURATION: f32 = 0.25;

/// A short "clack": two damped partials over a noise transient.
///
/// The voice is a single playhead. [`ImpactVoice::restart`] rewinds it,
/// so overlapping cues cut each other off instead of stacking.
#[derive(Debug, Clone)]
pub struct ImpactVoice {
    time: f32,
    phase_low: f32,
    phase_high: f32,
    volume: f32,
    playing: bool,
    noise_state: u32,
}

impl Default for ImpactVoice {
    fn default() -> Self {
        Self {
            time: 0.0,
            phase_low: 0.0,
            phase_high: 0.0,
            volume: 0.0,
            playing: false,
            noise_state: 22_222,
        }
    }
}

impl ImpactVoice {
    /// A silent voice.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rewind to the start and play at `volume`.
    pub fn restart(&mut self, volume: f32) {
        self.time = 0.0;
        self.phase_low = 0.0;
        self.phase_high = 0.0;
        self.volume = volume.clamp(0.0, 1.0);
        self.playing = true;
    }

    /// Whether the sound is currently playing.
    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Playhead position (s).
    #[must_use]
    pub fn time(&self) -> f32 {
        self.time
    }

    /// Volume of the current cue.
    #[must_use]
    pub fn volume(&self) -> f32 {
        self.volume
    }

    fn noise(&mut self) -> f32 {
        self.noise_state = self
            .noise_state
            .wrapping_mul(1_103_515_245)
            .wrapping_add(12_345);
        #[allow(clippy::cast_precision_loss)]
        let n = (self.noise_state >> 16) as f32;
        n / 32_768.0 - 1.0
    }

    /// Next mono sample, or `None` when silent.
    pub fn next_sample(&mut self, sample_rate: f32) -> Option<f32> {
        if !self.playing {
            return None;
        }
        if self.time >= IMPACT_DURATION {
            self.playing = false;
            return None;
        }

        let dt = 1.0 / sample_rate;
        self.time += dt;

        // Body of the hit: wooden-ish low partial plus a bright overtone.
        self.phase_low = (self.phase_low + 190.0 * dt).fract();
        self.phase_high = (self.phase_high + 1_370.0 * dt).fract();
        let low = (self.phase_low * TAU).sin() * (-self.time / 0.045).exp();
        let high = (self.phase_high * TAU).sin() * (-self.time / 0.012).exp();

        // Click at the contact instant.
        let click = self.noise() * (-self.time / 0.003).exp();

        Some((low * 0.6 + high * 0.3 + click * 0.25) * self.volume)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RATE: f32 = 48_000.0;

    #[test]
    fn silent_until_restarted() {
        let mut voice = ImpactVoice::new();
        assert!(!voice.is_playing());
        assert!(voice.next_sample(RATE).is_none());

        voice.restart(0.5);
        assert!(voice.is_playing());
        assert!(voice.next_sample(RATE).is_some());
    }

    #[test]
    fn finishes_after_duration() {
        let mut voice = ImpactVoice::new();
        voice.restart(1.0);
        let mut samples = 0;
        while voice.next_sample(RATE).is_some() {
            samples += 1;
            assert!(samples < 20_000, "voice never finished");
        }
        assert!(!voice.is_playing());
        assert!(samples >= 11_900 && samples <= 12_100, "{samples} samples");
    }

    #[test]
    fn restart_rewinds_playhead() {
        let mut voice = ImpactVoice::new();
        voice.restart(1.0);
        for _ in 0..1000 {
            voice.next_sample(RATE);
        }
        assert!(voice.time() > 0.02);

        voice.restart(0.25);
        assert!(voice.time().abs() < f32::EPSILON);
        assert!((voice.volume() - 0.25).abs() < f32::EPSILON);
    }

    #[test]
    fn zero_volume_is_silent_and_output_is_bounded() {
        let mut voice = ImpactVoice::new();
        voice.restart(0.0);
        assert!(voice.next_sample(RATE).unwrap_or(1.0).abs() < f32::EPSILON);

        voice.restart(1.0);
        while let Some(s) = voice.next_sample(RATE) {
            assert!(s.abs() <= 1.2);
        }
    }
}
