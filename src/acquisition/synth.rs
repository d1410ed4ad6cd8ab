use std::f64::consts::PI;
use crate::acquisition::ScopeError;
use crate::types::{ChannelConfig, SampleClock, Wave, WaveformKind};
/// Frequency multiplier of the ripple added by [`WaveformKind::SawtoothSine`].
pub const SAWTOOTH_SINE_HARMONIC: f64 = 7.0;
/// Relative amplitude of that ripple.
pub const SAWTOOTH_SINE_RIPPLE: f64 = 0.1;
/// Synthesize `length` samples of a base waveform.
///
/// Phase shifts every shape by `phase / (2π)` of a period. Sample values are
/// computed in `f64` and narrowed to `f32` once.
pub fn synthesize(
    kind: WaveformKind,
    length: usize,
    clock: &SampleClock,
    frequency: f64,
    amplitude: f64,
    phase: f64,
) -> Result<Wave, ScopeError> {
    if !(clock.sample_period > 0.0) {
        return Err(ScopeError::InvalidSamplePeriod);
    }
    if !(frequency > 0.0) {
        return Err(ScopeError::InvalidFrequency);
    }
    let wave = match kind {
        WaveformKind::Sine => sine(length, clock, frequency, amplitude, phase),
        WaveformKind::Square => square(length, clock, frequency, amplitude, phase),
        WaveformKind::Sawtooth => sawtooth(length, clock, frequency, amplitude, phase),
        WaveformKind::Triangle => triangle(length, clock, frequency, amplitude, phase),
        WaveformKind::SawtoothSine => sawtooth_sine(length, clock, frequency, amplitude, phase),
        WaveformKind::MultiSine => {
            return Err(ScopeError::UnsupportedWaveform(format!("{kind:?}")));
        }
    };
    Ok(wave)
}
/// Synthesize the configured waveform and add its DC offset.
pub fn generate_wave(
    config: &ChannelConfig,
    length: usize,
    clock: &SampleClock,
) -> Result<Wave, ScopeError> {
    let mut wave = synthesize(
        config.waveform,
        length,
        clock,
        config.frequency_hz,
        config.amplitude,
        config.phase_radians,
    )?;
    crate::acquisition::noise::apply_offset(&mut wave, config.dc_offset);
    Ok(wave)
}
fn sine(length: usize, clock: &SampleClock, frequency: f64, amplitude: f64, phase: f64) -> Wave {
    (0..length)
        .map(|i| (amplitude * (2.0 * PI * frequency * clock.time_at(i) + phase).sin()) as f32)
        .collect()
}
/// Position inside the current period, in `[0, 1)`.
fn period_fraction(t: f64, frequency: f64, phase: f64) -> f64 {
    let period = 1.0 / frequency;
    (t + phase / (2.0 * PI * frequency)).rem_euclid(period) * frequency
}
fn square(length: usize, clock: &SampleClock, frequency: f64, amplitude: f64, phase: f64) -> Wave {
    let high = amplitude as f32;
    (0..length)
        .map(|i| {
            if period_fraction(clock.time_at(i), frequency, phase) > 0.5 {
                high
            } else {
                -high
            }
        })
        .collect()
}
fn sawtooth(length: usize, clock: &SampleClock, frequency: f64, amplitude: f64, phase: f64) -> Wave {
    (0..length)
        .map(|i| (period_fraction(clock.time_at(i), frequency, phase) * amplitude) as f32)
        .collect()
}
fn triangle(length: usize, clock: &SampleClock, frequency: f64, amplitude: f64, phase: f64) -> Wave {
    (0..length)
        .map(|i| {
            let section = (clock.time_at(i) * frequency + phase / (2.0 * PI)).rem_euclid(1.0);
            let scaler = if section < 0.5 {
                (section - 0.25) * 4.0
            } else {
                (section - 0.75) * -4.0
            };
            (scaler * amplitude) as f32
        })
        .collect()
}
fn sawtooth_sine(
    length: usize,
    clock: &SampleClock,
    frequency: f64,
    amplitude: f64,
    phase: f64,
) -> Wave {
    let ramp = sawtooth(length, clock, frequency, amplitude, phase);
    let ripple = sine(
        length,
        clock,
        frequency * SAWTOOTH_SINE_HARMONIC,
        amplitude * SAWTOOTH_SINE_RIPPLE,
        phase,
    );
    ramp.iter().zip(&ripple).map(|(a, b)| a + b).collect()
}
