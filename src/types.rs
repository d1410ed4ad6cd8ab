// src/types.rs
use serde::{Deserialize, Serialize};

use crate::acquisition::ScopeError;

/// Owned, fixed-length sample buffer.
pub type Wave = Vec<f32>;

/// Shape produced by the synthesizer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WaveformKind {
    Sine,
    Square,
    Sawtooth,
    Triangle,
    /// Sawtooth with a 7th-harmonic sine ripple on top.
    SawtoothSine,
    /// Reserved. Selecting it is valid, synthesizing it is not.
    MultiSine,
}

impl WaveformKind {
    pub fn is_supported(self) -> bool {
        !matches!(self, WaveformKind::MultiSine)
    }
    /// Register encoding, the inverse of `TryFrom<u8>`.
    pub fn code(self) -> u8 {
        match self {
            WaveformKind::Sine => 0,
            WaveformKind::Square => 1,
            WaveformKind::Sawtooth => 2,
            WaveformKind::Triangle => 3,
            WaveformKind::SawtoothSine => 4,
            WaveformKind::MultiSine => 5,
        }
    }
}

impl TryFrom<u8> for WaveformKind {
    type Error = ScopeError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(WaveformKind::Sine),
            1 => Ok(WaveformKind::Square),
            2 => Ok(WaveformKind::Sawtooth),
            3 => Ok(WaveformKind::Triangle),
            4 => Ok(WaveformKind::SawtoothSine),
            5 => Ok(WaveformKind::MultiSine),
            other => Err(ScopeError::UnsupportedWaveform(format!("code {other}"))),
        }
    }
}

// 单通道信号参数
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChannelConfig {
    pub waveform: WaveformKind,
    pub frequency_hz: f64,
    pub amplitude: f64,
    pub phase_radians: f64,
    pub dc_offset: f64,
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            waveform: WaveformKind::Sine,
            frequency_hz: 1_000.0,
            amplitude: 1.0,
            phase_radians: 0.0,
            dc_offset: 0.0,
        }
    }
}

/// Time base: sample `i` sits at `i * sample_period + time_offset` seconds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SampleClock {
    pub sample_period: f64,
    pub time_offset: f64,
}

impl SampleClock {
    pub fn new(sample_period: f64, time_offset: f64) -> Result<Self, ScopeError> {
        if !(sample_period > 0.0) {
            return Err(ScopeError::InvalidSamplePeriod);
        }
        Ok(Self {
            sample_period,
            time_offset,
        })
    }
    pub fn time_at(&self, index: usize) -> f64 {
        index as f64 * self.sample_period + self.time_offset
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TriggerSettings {
    /// Channel whose wave is searched for the edge.
    pub channel: usize,
    pub level: f32,
    /// Samples kept before the trigger. Positive also delays the search start;
    /// negative moves the window to samples after the trigger.
    pub holdoff: i32,
    /// Samples the rising edge must span.
    pub width: usize,
}

impl Default for TriggerSettings {
    fn default() -> Self {
        Self {
            channel: 0,
            level: 0.0,
            holdoff: 0,
            width: 10,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AcquisitionSettings {
    /// Samples returned per channel.
    pub output_length: usize,
    /// Samples generated per channel before triggering and cropping.
    pub source_length: usize,
    pub sample_period: f64,
    pub noise_amplitude: f64,
    /// Return an untriggered window when no edge is found.
    pub auto_trigger: bool,
    pub trigger: TriggerSettings,
}

impl Default for AcquisitionSettings {
    fn default() -> Self {
        Self {
            output_length: 2_048,
            source_length: 8_192,
            sample_period: 1.0e-6,
            noise_amplitude: 0.0,
            auto_trigger: true,
            trigger: TriggerSettings::default(),
        }
    }
}

impl AcquisitionSettings {
    pub fn validate(&self, channel_count: usize) -> Result<(), ScopeError> {
        if !(self.sample_period > 0.0) {
            return Err(ScopeError::InvalidSamplePeriod);
        }
        if self.output_length == 0 {
            return Err(ScopeError::InvalidSettings(
                "output length must be greater than zero".into(),
            ));
        }
        if self.source_length < self.output_length {
            return Err(ScopeError::InvalidSettings(format!(
                "source length {} shorter than output length {}",
                self.source_length, self.output_length
            )));
        }
        if self.trigger.channel >= channel_count {
            return Err(ScopeError::ChannelOutOfRange {
                index: self.trigger.channel,
                count: channel_count,
            });
        }
        Ok(())
    }
}

/// Top-level configuration file for the demo binary.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ScopeConfig {
    pub channels: Vec<ChannelConfig>,
    pub acquisition: AcquisitionSettings,
    /// Fixed noise seed; entropy-seeded when absent.
    pub seed: Option<u64>,
    /// Number of acquisitions to run.
    pub captures: usize,
}

impl Default for ScopeConfig {
    fn default() -> Self {
        Self {
            channels: vec![
                ChannelConfig::default(),
                ChannelConfig {
                    waveform: WaveformKind::SawtoothSine,
                    frequency_hz: 2_000.0,
                    amplitude: 0.5,
                    ..ChannelConfig::default()
                },
            ],
            acquisition: AcquisitionSettings::default(),
            seed: None,
            captures: 4,
        }
    }
}
