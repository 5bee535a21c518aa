//! Procedurally generated sound effects.
//!
//! Every effect is a closed-form function of the sample index, rendered once
//! into a stereo 16-bit PCM buffer before the game loop starts.

use fundsp::math::{lerp, sin_hz};
use tracing::debug;

/// Audio trigger emitted by the simulation. The host decides how to play it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cue {
    Flap,
    Coin,
    Crash,
}

/// Interleaved stereo PCM.
#[derive(Debug, Clone, PartialEq)]
pub struct Waveform {
    pub sample_rate: u32,
    pub channels: u16,
    pub samples: Vec<i16>,
}

impl Waveform {
    /// Scales a mono signal in `[-1, 1]` to 16-bit and duplicates it into
    /// both channels.
    fn stereo(sample_rate: u32, amplitude: f32, mono: impl Iterator<Item = f32>) -> Self {
        let samples = mono
            .map(|x| (x * amplitude * i16::MAX as f32) as i16)
            .flat_map(|s| [s, s])
            .collect();
        Self {
            sample_rate,
            channels: 2,
            samples,
        }
    }

    /// Samples per channel.
    pub fn frames(&self) -> usize {
        self.samples.len() / self.channels as usize
    }

    pub fn channel(&self, ch: usize) -> impl Iterator<Item = i16> + '_ {
        self.samples
            .iter()
            .skip(ch)
            .step_by(self.channels as usize)
            .copied()
    }
}

fn frame_count(sample_rate: u32, secs: f64) -> usize {
    (secs * sample_rate as f64).round() as usize
}

// ── Flap ────────────────────────────────────────────────────────────────────

const FLAP_SECS: f64 = 0.1;
const FLAP_START_HZ: f32 = 300.0;
const FLAP_END_HZ: f32 = 150.0;
const FLAP_DECAY: f32 = 0.05;
const FLAP_AMPLITUDE: f32 = 0.3;

/// Instantaneous frequency of the flap sweep at sample `i` of `n`.
pub fn flap_sweep_hz(i: usize, n: usize) -> f32 {
    let t = if n > 1 {
        i as f32 / (n - 1) as f32
    } else {
        0.0
    };
    lerp(FLAP_START_HZ, FLAP_END_HZ, t)
}

/// Downward chirp, 300 Hz to 150 Hz, with a fast exponential decay.
pub fn flap(sample_rate: u32) -> Waveform {
    let n = frame_count(sample_rate, FLAP_SECS);
    let sr = sample_rate as f32;
    let mono = (0..n).map(|i| {
        let t = i as f32 / sr;
        sin_hz(flap_sweep_hz(i, n), t) * (-t / FLAP_DECAY).exp()
    });
    Waveform::stereo(sample_rate, FLAP_AMPLITUDE, mono)
}

// ── Coin ────────────────────────────────────────────────────────────────────

const COIN_SECS: f64 = 0.2;
const COIN_LOW_HZ: f32 = 800.0;
const COIN_HIGH_HZ: f32 = 1200.0;
const COIN_HIGH_DELAY: f32 = 0.05;
const COIN_DECAY: f32 = 0.1;
const COIN_AMPLITUDE: f32 = 0.4;

/// Two-tone chime: the higher tone enters 50ms after the lower one.
pub fn coin(sample_rate: u32) -> Waveform {
    let n = frame_count(sample_rate, COIN_SECS);
    let sr = sample_rate as f32;
    let mono = (0..n).map(|i| {
        let t = i as f32 / sr;
        let low = 0.5 * sin_hz(COIN_LOW_HZ, t);
        let high = if t >= COIN_HIGH_DELAY {
            0.5 * sin_hz(COIN_HIGH_HZ, t - COIN_HIGH_DELAY)
        } else {
            0.0
        };
        (low + high) * (-t / COIN_DECAY).exp()
    });
    Waveform::stereo(sample_rate, COIN_AMPLITUDE, mono)
}

// ── Crash ───────────────────────────────────────────────────────────────────

const CRASH_SECS: f64 = 0.5;
const CRASH_SWEEP_SECS: f32 = 0.4;
const CRASH_START_HZ: f32 = 400.0;
const CRASH_END_HZ: f32 = 80.0;
const CRASH_GAIN: f32 = 0.15;

/// Sawtooth falling from 400 Hz to 80 Hz while the gain fades to silence.
pub fn crash(sample_rate: u32) -> Waveform {
    let n = frame_count(sample_rate, CRASH_SECS);
    let sr = sample_rate as f32;
    let fade_secs = CRASH_SECS as f32;
    // Start mid-ramp so the first sample is silent.
    let mut phase = 0.5f32;
    let mono = (0..n).map(move |i| {
        let t = i as f32 / sr;
        let sweep = (t / CRASH_SWEEP_SECS).min(1.0);
        let hz = lerp(CRASH_START_HZ, CRASH_END_HZ, sweep);
        let gain = lerp(CRASH_GAIN, 0.0, (t / fade_secs).min(1.0));
        let saw = 2.0 * phase - 1.0;
        phase = (phase + hz / sr).fract();
        saw * gain
    });
    Waveform::stereo(sample_rate, 1.0, mono)
}

// ── Bank ────────────────────────────────────────────────────────────────────

/// All effects, generated once at startup.
#[derive(Debug, Clone)]
pub struct SoundBank {
    pub flap: Waveform,
    pub coin: Waveform,
    pub crash: Waveform,
}

impl SoundBank {
    pub fn new(sample_rate: u32) -> Self {
        let bank = Self {
            flap: flap(sample_rate),
            coin: coin(sample_rate),
            crash: crash(sample_rate),
        };
        debug!(
            sample_rate,
            flap = bank.flap.frames(),
            coin = bank.coin.frames(),
            crash = bank.crash.frames(),
            "generated sound bank"
        );
        bank
    }

    pub fn get(&self, cue: Cue) -> &Waveform {
        match cue {
            Cue::Flap => &self.flap,
            Cue::Coin => &self.coin,
            Cue::Crash => &self.crash,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn rate() -> u32 {
        Config::default().sample_rate
    }

    fn peak(samples: impl Iterator<Item = i16>) -> i16 {
        samples.map(|s| s.saturating_abs()).max().unwrap_or(0)
    }

    fn energy(samples: impl Iterator<Item = i16>) -> f64 {
        samples.map(|s| (s as f64).powi(2)).sum()
    }

    fn zero_crossings(samples: &[i16]) -> usize {
        samples.windows(2).filter(|w| (w[0] < 0) != (w[1] < 0)).count()
    }

    /// Magnitude of the `hz` component of `samples`, read at `sample_rate`.
    fn tone_magnitude(samples: &[i16], sample_rate: u32, hz: f64) -> f64 {
        let (mut re, mut im) = (0.0, 0.0);
        for (i, &s) in samples.iter().enumerate() {
            let angle = std::f64::consts::TAU * hz * i as f64 / sample_rate as f64;
            re += s as f64 * angle.cos();
            im += s as f64 * angle.sin();
        }
        re.hypot(im)
    }

    #[test]
    fn test_flap_length() {
        let w = flap(rate());
        assert_eq!(w.frames(), 2205);
        assert_eq!(w.samples.len(), 4410);
        assert_eq!(w.sample_rate, 22050);
    }

    #[test]
    fn test_flap_sweep_endpoints() {
        let n = 2205;
        assert!((flap_sweep_hz(0, n) - 300.0).abs() < 1e-3);
        assert!((flap_sweep_hz(n - 1, n) - 150.0).abs() < 1e-3);
        assert!(flap_sweep_hz(n / 2, n) < 300.0);
        assert!(flap_sweep_hz(n / 2, n) > 150.0);
    }

    #[test]
    fn test_flap_pitch_falls() {
        // A downward sweep crosses zero more often at the start than the end.
        let w = flap(rate());
        let left: Vec<i16> = w.channel(0).collect();
        let third = left.len() / 3;
        let head = zero_crossings(&left[..third]);
        let tail = zero_crossings(&left[left.len() - third..]);
        assert!(head > tail, "head {head} crossings, tail {tail}");
    }

    #[test]
    fn test_flap_starts_silent_and_decays() {
        let w = flap(rate());
        assert_eq!(w.samples[0], 0);
        let left: Vec<i16> = w.channel(0).collect();
        let head = energy(left[..220].iter().copied());
        let tail = energy(left[left.len() - 220..].iter().copied());
        assert!(tail < head);
    }

    #[test]
    fn test_flap_peak_within_amplitude() {
        let w = flap(rate());
        let limit = (0.3 * i16::MAX as f32) as i16 + 1;
        let p = peak(w.samples.iter().copied());
        assert!(p <= limit);
        assert!(p > 0);
    }

    #[test]
    fn test_coin_length_and_amplitude() {
        let w = coin(rate());
        assert_eq!(w.frames(), 4410);
        let limit = (0.4 * i16::MAX as f32) as i16 + 1;
        assert!(peak(w.samples.iter().copied()) <= limit);
    }

    #[test]
    fn test_coin_single_tone_before_delay() {
        // Before 50ms only the 800 Hz tone sounds, so each sample stays under
        // half the full coin amplitude.
        let w = coin(rate());
        let before = frame_count(rate(), 0.05);
        let half = (0.2 * i16::MAX as f32) as i16 + 1;
        assert!(peak(w.channel(0).take(before)) <= half);
    }

    #[test]
    fn test_coin_second_tone_after_delay() {
        let w = coin(rate());
        let left: Vec<i16> = w.channel(0).collect();
        let start = frame_count(rate(), 0.05);
        let end = frame_count(rate(), 0.1);

        // Both tones together overshoot what the 800 Hz tone reaches alone.
        let half = (0.2 * i16::MAX as f32) as i16 + 1;
        assert!(peak(left[start..].iter().copied()) > half);

        let window = &left[start..end];
        let high = tone_magnitude(window, rate(), 1200.0);
        let low = tone_magnitude(window, rate(), 800.0);
        let off = tone_magnitude(window, rate(), 1000.0);
        assert!(high > 20.0 * off, "1200 Hz {high}, 1000 Hz {off}");
        assert!(low > 20.0 * off, "800 Hz {low}, 1000 Hz {off}");
    }

    #[test]
    fn test_channels_identical() {
        for w in [flap(rate()), coin(rate()), crash(rate())] {
            assert_eq!(w.channels, 2);
            assert!(w.channel(0).eq(w.channel(1)));
        }
    }

    #[test]
    fn test_crash_fades_out() {
        let w = crash(rate());
        assert_eq!(w.frames(), 11025);
        assert_eq!(w.samples[0], 0);
        let limit = (0.15 * i16::MAX as f32) as i16 + 1;
        assert!(peak(w.samples.iter().copied()) <= limit);
        let last = w.channel(0).last().unwrap_or(i16::MAX);
        assert!(last.saturating_abs() < 10);
    }

    #[test]
    fn test_generation_is_deterministic() {
        assert_eq!(flap(rate()), flap(rate()));
        assert_eq!(coin(rate()), coin(rate()));
    }

    #[test]
    fn test_bank_lookup() {
        let bank = SoundBank::new(rate());
        assert_eq!(bank.get(Cue::Flap).frames(), 2205);
        assert_eq!(bank.get(Cue::Coin).frames(), 4410);
        assert_eq!(bank.get(Cue::Crash).frames(), 11025);
    }
}
