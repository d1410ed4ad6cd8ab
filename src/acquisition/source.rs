use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::Rng;
use crate::acquisition::crop::CropRequest;
use crate::acquisition::noise::NoiseInjector;
use crate::acquisition::synth::generate_wave;
use crate::acquisition::trigger::{detect_trigger, TriggerOutcome};
use crate::acquisition::ScopeError;
use crate::registers::{ByteRegister, RegisterValue};
use crate::types::{AcquisitionSettings, ChannelConfig, SampleClock, Wave, WaveformKind};
/// One captured frame: an equally long window per channel, aligned on the trigger.
#[derive(Clone, Debug)]
pub struct Acquisition {
    pub channels: Vec<Wave>, // channel -> samples
    /// Trigger position inside the generated source wave.
    pub trigger_index: usize,
    /// Index in the source wave of the first returned sample.
    pub window_start: usize,
    /// `false` when the window was taken by auto-trigger without an edge.
    pub triggered: bool,
    pub sample_period: f64,
    /// Time of the first returned sample.
    pub time_offset: f64,
}
impl Acquisition {
    pub fn num_channels(&self) -> usize {
        self.channels.len()
    }
    pub fn samples_per_channel(&self) -> Option<usize> {
        self.channels.first().map(|c| c.len())
    }
    pub fn duration_seconds(&self) -> f64 {
        self.samples_per_channel().unwrap_or(0) as f64 * self.sample_period
    }
    /// Trigger position inside the returned window, if it falls inside it.
    pub fn trigger_offset(&self) -> Option<usize> {
        self.trigger_index
            .checked_sub(self.window_start)
            .filter(|&offset| offset < self.samples_per_channel().unwrap_or(0))
    }
}
/// Something that can be polled for acquisitions.
///
/// `Ok(None)` means no frame is ready yet, which callers should treat as transient.
pub trait AcquisitionSource {
    fn next_acquisition(&mut self) -> Result<Option<Acquisition>, ScopeError>;
}
/// Emulated scope front end producing synthetic multi-channel acquisitions.
pub struct ScopeDummy<R: Rng = StdRng> {
    channels: Vec<ChannelConfig>,
    /// Waveform selector per channel, as seen on the register bus.
    waveform_select: Vec<ByteRegister>,
    settings: AcquisitionSettings,
    noise: NoiseInjector<R>,
    time_offset: f64,
}
impl ScopeDummy<StdRng> {
    pub fn new(
        channels: Vec<ChannelConfig>,
        settings: AcquisitionSettings,
    ) -> Result<Self, ScopeError> {
        Self::with_noise(channels, settings, NoiseInjector::from_entropy())
    }
    pub fn with_seed(
        channels: Vec<ChannelConfig>,
        settings: AcquisitionSettings,
        seed: u64,
    ) -> Result<Self, ScopeError> {
        Self::with_noise(channels, settings, NoiseInjector::from_seed(seed))
    }
}
impl<R: Rng> ScopeDummy<R> {
    pub fn with_noise(
        channels: Vec<ChannelConfig>,
        settings: AcquisitionSettings,
        noise: NoiseInjector<R>,
    ) -> Result<Self, ScopeError> {
        settings.validate(channels.len())?;
        let waveform_select = channels
            .iter()
            .enumerate()
            .map(|(idx, c)| ByteRegister::with_value(format!("ch{idx}.waveform"), c.waveform.code()))
            .collect();
        Ok(Self {
            channels,
            waveform_select,
            settings,
            noise,
            time_offset: 0.0,
        })
    }
    pub fn serial(&self) -> &'static str {
        "DUMMY"
    }
    pub fn settings(&self) -> &AcquisitionSettings {
        &self.settings
    }
    pub fn set_settings(&mut self, settings: AcquisitionSettings) -> Result<(), ScopeError> {
        settings.validate(self.channels.len())?;
        self.settings = settings;
        Ok(())
    }
    pub fn channel(&self, index: usize) -> Result<&ChannelConfig, ScopeError> {
        self.channels.get(index).ok_or(ScopeError::ChannelOutOfRange {
            index,
            count: self.channels.len(),
        })
    }
    pub fn set_channel(&mut self, index: usize, config: ChannelConfig) -> Result<(), ScopeError> {
        let count = self.channels.len();
        let slot = self
            .channels
            .get_mut(index)
            .ok_or(ScopeError::ChannelOutOfRange { index, count })?;
        *slot = config;
        let register = &mut self.waveform_select[index];
        if register.get() != config.waveform.code() {
            register.set(config.waveform.code());
        }
        Ok(())
    }
    /// Waveform selector of a channel, e.g. to watch it with `on_change`.
    pub fn waveform_register_mut(&mut self, index: usize) -> Result<&mut ByteRegister, ScopeError> {
        let count = self.waveform_select.len();
        self.waveform_select
            .get_mut(index)
            .ok_or(ScopeError::ChannelOutOfRange { index, count })
    }
    /// Select a channel's waveform from a raw register value.
    ///
    /// The value is decoded before the register is written, so a rejected
    /// value leaves both the register and the channel unchanged.
    pub fn assign_waveform(&mut self, index: usize, raw: i64) -> Result<(), ScopeError> {
        self.channel(index)?;
        let code = u8::from_raw(self.waveform_select[index].name(), raw)?;
        let waveform = WaveformKind::try_from(code).map_err(|err| {
            warn!("rejected waveform code {code} for channel {index}");
            err
        })?;
        self.channels[index].waveform = waveform;
        self.waveform_select[index].set(code);
        Ok(())
    }
    /// Time of the first sample of the next generated source wave.
    pub fn time_offset(&self) -> f64 {
        self.time_offset
    }
    /// Generate, trigger and crop one frame, then advance the time base.
    pub fn acquire(&mut self) -> Result<Option<Acquisition>, ScopeError> {
        let settings = self.settings;
        let clock = SampleClock::new(settings.sample_period, self.time_offset)?;
        let mut sources = Vec::with_capacity(self.channels.len());
        for config in &self.channels {
            let mut wave = generate_wave(config, settings.source_length, &clock)?;
            self.noise.apply(&mut wave, settings.noise_amplitude);
            sources.push(wave);
        }
        self.time_offset += settings.source_length as f64 * settings.sample_period;
        let trigger = settings.trigger;
        let outcome = detect_trigger(
            &sources[trigger.channel],
            trigger.holdoff,
            trigger.level,
            trigger.width,
            settings.output_length,
        );
        let (trigger_index, triggered) = match outcome {
            TriggerOutcome::Found(index) => (index, true),
            TriggerOutcome::NotFound if settings.auto_trigger => {
                (trigger.holdoff.max(0) as usize, false)
            }
            TriggerOutcome::NotFound => {
                debug!("no trigger on channel {} at level {}", trigger.channel, trigger.level);
                return Ok(None);
            }
        };
        let request = CropRequest {
            output_length: settings.output_length,
            trigger_index,
            holdoff: trigger.holdoff,
        };
        let mut channels = Vec::with_capacity(sources.len());
        for source in &sources {
            match request.apply(source) {
                Ok(window) => channels.push(window),
                Err(err) => {
                    info!("{err}");
                    return Ok(None);
                }
            }
        }
        debug!(
            "acquired {} channels x {} samples, trigger at {} ({})",
            channels.len(),
            settings.output_length,
            trigger_index,
            if triggered { "edge" } else { "auto" }
        );
        let window_start = request.start() as usize;
        Ok(Some(Acquisition {
            channels,
            trigger_index,
            window_start,
            triggered,
            sample_period: settings.sample_period,
            time_offset: clock.time_at(window_start),
        }))
    }
}
impl<R: Rng> AcquisitionSource for ScopeDummy<R> {
    fn next_acquisition(&mut self) -> Result<Option<Acquisition>, ScopeError> {
        self.acquire()
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TriggerSettings;
    fn settings() -> AcquisitionSettings {
        AcquisitionSettings {
            output_length: 500,
            source_length: 2_000,
            sample_period: 1.0e-6,
            noise_amplitude: 0.0,
            auto_trigger: false,
            trigger: TriggerSettings {
                channel: 0,
                level: 0.0,
                holdoff: 0,
                width: 4,
            },
        }
    }
    fn sine() -> ChannelConfig {
        ChannelConfig::default()
    }
    #[test]
    fn acquires_aligned_window_on_rising_edge() {
        let mut scope = ScopeDummy::with_seed(vec![sine(), sine()], settings(), 1).unwrap();
        let acq = scope.acquire().unwrap().unwrap();
        assert!(acq.triggered);
        assert_eq!(acq.num_channels(), 2);
        assert_eq!(acq.samples_per_channel(), Some(500));
        // 1 kHz sine at 1 MS/s rises through zero every 1000 samples.
        assert!(acq.trigger_index.abs_diff(1_000) <= 2, "{}", acq.trigger_index);
        assert!(acq.channels[0][0].abs() < 0.02);
        assert!(acq.channels[0][1] > acq.channels[0][0]);
        assert_eq!(acq.channels[0], acq.channels[1]);
        assert_eq!(acq.window_start, acq.trigger_index);
        assert_eq!(acq.trigger_offset(), Some(0));
        assert!((acq.duration_seconds() - 5.0e-4).abs() < 1e-12);
    }
    #[test]
    fn time_base_advances_between_acquisitions() {
        let mut scope = ScopeDummy::with_seed(vec![sine()], settings(), 1).unwrap();
        assert_eq!(scope.time_offset(), 0.0);
        scope.acquire().unwrap();
        assert!((scope.time_offset() - 2.0e-3).abs() < 1e-12);
    }
    #[test]
    fn flat_signal_without_auto_trigger_yields_nothing() {
        let flat = ChannelConfig {
            amplitude: 0.0,
            dc_offset: -1.0,
            ..sine()
        };
        let mut scope = ScopeDummy::with_seed(vec![flat], settings(), 1).unwrap();
        assert!(scope.acquire().unwrap().is_none());
    }
    #[test]
    fn auto_trigger_returns_untriggered_window() {
        let flat = ChannelConfig {
            amplitude: 0.0,
            dc_offset: -1.0,
            ..sine()
        };
        let mut config = settings();
        config.auto_trigger = true;
        config.trigger.holdoff = 20;
        let mut scope = ScopeDummy::with_seed(vec![flat], config, 1).unwrap();
        let acq = scope.acquire().unwrap().unwrap();
        assert!(!acq.triggered);
        assert_eq!(acq.trigger_index, 20);
        assert_eq!(acq.window_start, 0);
        assert_eq!(acq.trigger_offset(), Some(20));
        assert_eq!(acq.time_offset, 0.0);
        assert!(acq.channels[0].iter().all(|&v| v == -1.0));
    }
    #[test]
    fn window_past_source_end_is_reported_as_no_frame() {
        let mut config = settings();
        // Negative holdoff pushes the window right, past the end of the source.
        config.trigger.holdoff = -1_200;
        let mut scope = ScopeDummy::with_seed(vec![sine()], config, 1).unwrap();
        assert!(scope.next_acquisition().unwrap().is_none());
    }
    #[test]
    fn seeded_noise_reproduces_frames() {
        let mut config = settings();
        config.noise_amplitude = 0.05;
        let mut a = ScopeDummy::with_seed(vec![sine()], config, 9).unwrap();
        let mut b = ScopeDummy::with_seed(vec![sine()], config, 9).unwrap();
        let fa = a.acquire().unwrap().unwrap();
        let fb = b.acquire().unwrap().unwrap();
        assert_eq!(fa.trigger_index, fb.trigger_index);
        assert_eq!(fa.channels, fb.channels);
    }
    #[test]
    fn unsupported_waveform_fails_acquisition() {
        let reserved = ChannelConfig {
            waveform: WaveformKind::MultiSine,
            ..sine()
        };
        let mut scope = ScopeDummy::with_seed(vec![sine(), reserved], settings(), 1).unwrap();
        assert!(matches!(
            scope.acquire(),
            Err(ScopeError::UnsupportedWaveform(_))
        ));
        // A failed frame leaves the time base where it was.
        assert_eq!(scope.time_offset(), 0.0);
    }
    #[test]
    fn waveform_assignment_is_range_checked() {
        let mut scope = ScopeDummy::with_seed(vec![sine()], settings(), 1).unwrap();
        scope.assign_waveform(0, 1).unwrap();
        assert_eq!(scope.channel(0).unwrap().waveform, WaveformKind::Square);
        assert!(matches!(
            scope.assign_waveform(0, 300),
            Err(ScopeError::InvalidRegisterAssignment { value: 300, .. })
        ));
        assert!(matches!(
            scope.assign_waveform(0, 9),
            Err(ScopeError::UnsupportedWaveform(_))
        ));
        assert!(matches!(
            scope.assign_waveform(3, 0),
            Err(ScopeError::ChannelOutOfRange { index: 3, count: 1 })
        ));
        assert_eq!(scope.channel(0).unwrap().waveform, WaveformKind::Square);
        assert_eq!(scope.waveform_register_mut(0).unwrap().get(), 1);
    }
    #[test]
    fn waveform_register_notifies_on_device_writes() {
        use std::sync::{Arc, Mutex};
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let mut scope = ScopeDummy::with_seed(vec![sine(), sine()], settings(), 1).unwrap();
        let register = scope.waveform_register_mut(1).unwrap();
        assert_eq!(register.name(), "ch1.waveform");
        assert_eq!(register.get(), WaveformKind::Sine.code());
        register.on_change(move |_, code| sink.lock().unwrap().push(code));
        scope.assign_waveform(1, 3).unwrap();
        scope.assign_waveform(1, 3).unwrap();
        assert!(scope.assign_waveform(1, 256).is_err());
        assert!(scope.assign_waveform(1, 7).is_err());
        scope
            .set_channel(
                1,
                ChannelConfig {
                    waveform: WaveformKind::SawtoothSine,
                    ..sine()
                },
            )
            .unwrap();
        assert_eq!(*seen.lock().unwrap(), vec![3, 3, 4]);
        assert_eq!(scope.channel(1).unwrap().waveform, WaveformKind::SawtoothSine);
        assert!(scope.waveform_register_mut(2).is_err());
    }
    #[test]
    fn invalid_settings_are_rejected_up_front() {
        let mut config = settings();
        config.trigger.channel = 1;
        assert!(ScopeDummy::with_seed(vec![sine()], config, 1).is_err());
        let mut scope = ScopeDummy::with_seed(vec![sine()], settings(), 1).unwrap();
        config.trigger.channel = 0;
        config.output_length = 0;
        assert!(scope.set_settings(config).is_err());
        assert_eq!(scope.settings().output_length, 500);
    }
}
