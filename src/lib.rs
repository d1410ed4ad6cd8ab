//! Software stand-in for the acquisition front end of a sampled oscilloscope.
//!
//! Channels are synthesized from their [`ChannelConfig`], searched for a rising
//! level crossing and cropped to a fixed window around it:
//!
//! ```
//! use scope_dummy::{crop, detect_trigger, generate_wave, ChannelConfig, SampleClock};
//!
//! let clock = SampleClock::new(1.0e-6, 0.0).unwrap();
//! let wave = generate_wave(&ChannelConfig::default(), 4_000, &clock).unwrap();
//! let index = detect_trigger(&wave, 0, 0.0, 4, 1_000).index().unwrap();
//! let window = crop(&wave, 1_000, index, 0).unwrap();
//! assert_eq!(window.len(), 1_000);
//! ```
pub mod acquisition;
pub mod registers;
pub mod types;
pub use acquisition::{
    crop, detect_trigger, generate_wave, synthesize, Acquisition, AcquisitionSource,
    CropOutOfBounds, ScopeDummy, ScopeError, TriggerOutcome,
};
pub use registers::{ByteRegister, Register, RegisterValue};
pub use types::{
    AcquisitionSettings, ChannelConfig, SampleClock, ScopeConfig, TriggerSettings, Wave,
    WaveformKind,
};
