/// Result of scanning a wave for a rising level crossing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TriggerOutcome {
    Found(usize),
    NotFound,
}
impl TriggerOutcome {
    pub fn found(&self) -> bool {
        matches!(self, TriggerOutcome::Found(_))
    }
    pub fn index(&self) -> Option<usize> {
        match self {
            TriggerOutcome::Found(index) => Some(*index),
            TriggerOutcome::NotFound => None,
        }
    }
}
/// Find the first rising edge through `level` that spans `trigger_width` samples.
///
/// Scanning starts at `max(0, holdoff)` and stops early enough that
/// `output_length` samples still follow every candidate, so a reported index
/// can always be cropped with a non-negative holdoff. The reported index is the
/// middle of the edge.
pub fn detect_trigger(
    wave: &[f32],
    holdoff: i32,
    level: f32,
    trigger_width: usize,
    output_length: usize,
) -> TriggerOutcome {
    let start = holdoff.max(0) as usize;
    let end = wave
        .len()
        .saturating_sub(trigger_width)
        .saturating_sub(output_length);
    for i in start..end {
        if wave[i] < level && wave[i + trigger_width] > level {
            return TriggerOutcome::Found(i + trigger_width / 2);
        }
    }
    TriggerOutcome::NotFound
}
