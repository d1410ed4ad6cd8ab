use crate::acquisition::error::CropOutOfBounds;
use crate::types::Wave;
/// Window to extract from a source wave.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CropRequest {
    pub output_length: usize,
    pub trigger_index: usize,
    /// Samples kept before the trigger; negative moves the window past it.
    pub holdoff: i32,
}
impl CropRequest {
    pub fn start(&self) -> i64 {
        self.trigger_index as i64 - self.holdoff as i64
    }
    pub fn apply(&self, source: &[f32]) -> Result<Wave, CropOutOfBounds> {
        crop(source, self.output_length, self.trigger_index, self.holdoff)
    }
}
/// Copy `output_length` samples starting at `trigger_index - holdoff`.
///
/// The window must be non-empty and lie entirely inside `source`; nothing is
/// padded or truncated.
pub fn crop(
    source: &[f32],
    output_length: usize,
    trigger_index: usize,
    holdoff: i32,
) -> Result<Wave, CropOutOfBounds> {
    let start = trigger_index as i64 - holdoff as i64;
    let out_of_bounds = CropOutOfBounds {
        start,
        output_length,
        source_length: source.len(),
    };
    if start < 0 || output_length == 0 {
        return Err(out_of_bounds);
    }
    let start = start as usize;
    let end = start
        .checked_add(output_length)
        .filter(|&end| end <= source.len())
        .ok_or(out_of_bounds)?;
    Ok(source[start..end].to_vec())
}
