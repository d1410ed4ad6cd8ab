use rustfft::{num_complex::Complex32, FftPlanner};
use crate::acquisition::Acquisition;
/// Magnitude spectrum for each channel.
#[derive(Clone, Debug)]
pub struct FrequencySpectrum {
    pub sample_rate_hz: f64,
    pub frequencies_hz: Vec<f64>,
    pub magnitudes: Vec<Vec<f32>>, // channel -> bins
}
impl FrequencySpectrum {
    /// Frequency of the strongest non-DC bin of a channel.
    pub fn peak_frequency(&self, channel: usize) -> Option<f64> {
        let mags = self.magnitudes.get(channel)?;
        mags.iter()
            .enumerate()
            .skip(1)
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(k, _)| self.frequencies_hz[k])
    }
}
/// Helper that computes FFTs of acquired windows for a given size.
pub struct SpectrumBuilder {
    fft_size: usize,
}
impl SpectrumBuilder {
    pub fn with_size(fft_size: usize) -> Self {
        Self { fft_size }
    }
    /// Windows shorter than the FFT size are zero padded, longer ones truncated.
    pub fn compute(&self, acquisition: &Acquisition) -> FrequencySpectrum {
        let sample_rate_hz = 1.0 / acquisition.sample_period;
        let frequencies = (0..self.fft_size / 2)
            .map(|k| k as f64 * sample_rate_hz / self.fft_size as f64)
            .collect();
        if self.fft_size == 0 {
            return FrequencySpectrum {
                sample_rate_hz,
                frequencies_hz: frequencies,
                magnitudes: vec![Vec::new(); acquisition.channels.len()],
            };
        }
        let mut planner = FftPlanner::<f32>::new();
        let fft = planner.plan_fft_forward(self.fft_size);
        let magnitudes = acquisition
            .channels
            .iter()
            .map(|channel| {
                let mut buffer: Vec<Complex32> = channel
                    .iter()
                    .copied()
                    .take(self.fft_size)
                    .map(|v| Complex32::new(v, 0.0))
                    .collect();
                buffer.resize(self.fft_size, Complex32::new(0.0, 0.0));
                fft.process(&mut buffer);
                buffer
                    .iter()
                    .take(self.fft_size / 2)
                    .map(|c| c.norm() / self.fft_size as f32)
                    .collect()
            })
            .collect();
        FrequencySpectrum {
            sample_rate_hz,
            frequencies_hz: frequencies,
            magnitudes,
        }
    }
}
