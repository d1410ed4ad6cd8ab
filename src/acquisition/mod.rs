// src/acquisition/mod.rs
pub mod crop;
pub mod error;
pub mod fft;
pub mod noise;
pub mod plot;
pub mod source;
pub mod synth;
pub mod trigger;
// Flatten the public surface for the rest of the crate.
pub use crop::{crop, CropRequest};
pub use error::{CropOutOfBounds, ScopeError};
pub use fft::{FrequencySpectrum, SpectrumBuilder};
pub use noise::{apply_noise, apply_offset, NoiseInjector};
pub use plot::{render_acquisition_png, PlotStyle};
pub use source::{Acquisition, AcquisitionSource, ScopeDummy};
pub use synth::{generate_wave, synthesize};
pub use trigger::{detect_trigger, TriggerOutcome};
