use thiserror::Error;
#[derive(Debug, Error)]
pub enum ScopeError {
    #[error("waveform {0} has no implemented formula")]
    UnsupportedWaveform(String),
    #[error("sample period must be greater than zero")]
    InvalidSamplePeriod,
    #[error("frequency must be greater than zero")]
    InvalidFrequency,
    #[error("invalid acquisition settings: {0}")]
    InvalidSettings(String),
    #[error("channel {index} out of range: device has {count} channels")]
    ChannelOutOfRange { index: usize, count: usize },
    #[error("register {name} cannot hold {value} (max {max})")]
    InvalidRegisterAssignment {
        name: String,
        value: i64,
        max: i64,
    },
    #[error(transparent)]
    Crop(#[from] CropOutOfBounds),
    #[error("failed to render plot: {0}")]
    Plot(String),
}
/// Window requested around a trigger does not fit inside the source wave.
///
/// This is an expected outcome near buffer edges, not a fault.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error(
    "trigger too close to source wave edge to return wave \
     (start {start}, length {output_length}, source {source_length})"
)]
pub struct CropOutOfBounds {
    pub start: i64,
    pub output_length: usize,
    pub source_length: usize,
}
impl<E: std::error::Error + Send + Sync + 'static> From<plotters::drawing::DrawingAreaErrorKind<E>>
    for ScopeError
{
    fn from(value: plotters::drawing::DrawingAreaErrorKind<E>) -> Self {
        ScopeError::Plot(format!("{value:?}"))
    }
}
impl From<image::ImageError> for ScopeError {
    fn from(value: image::ImageError) -> Self {
        ScopeError::Plot(value.to_string())
    }
}
