use std::io::Cursor;
use image::{DynamicImage, ImageBuffer, ImageFormat, Rgb};
use plotters::prelude::*;
use crate::acquisition::Acquisition;
use crate::acquisition::ScopeError;
#[derive(Clone, Debug)]
pub struct PlotStyle {
    pub width: u32,
    pub height: u32,
    pub background: RGBColor,
    pub palette: Vec<RGBColor>,
    pub trigger_marker: RGBColor,
}
impl Default for PlotStyle {
    fn default() -> Self {
        Self {
            width: 900,
            height: 400,
            background: RGBColor(10, 10, 10),
            palette: vec![YELLOW, CYAN, MAGENTA, GREEN, BLUE, RED, WHITE],
            trigger_marker: RGBColor(255, 128, 0),
        }
    }
}
/// Render every channel of an acquisition as a PNG, with the trigger point marked.
///
/// Only lines are drawn, so no font backend is needed.
pub fn render_acquisition_png(
    acquisition: &Acquisition,
    style: PlotStyle,
) -> Result<Vec<u8>, ScopeError> {
    let samples = acquisition.samples_per_channel().unwrap_or(0);
    if samples == 0 {
        return Err(ScopeError::Plot("acquisition has no samples".into()));
    }
    if style.palette.is_empty() {
        return Err(ScopeError::Plot("empty palette".into()));
    }
    let mut buffer = vec![0u8; (style.width * style.height * 3) as usize];
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (style.width, style.height))
            .into_drawing_area();
        root.fill(&style.background)?;
        let (y_min, y_max) = acquisition
            .channels
            .iter()
            .flat_map(|c| c.iter().copied())
            .fold((f32::MAX, f32::MIN), |(lo, hi), v| (lo.min(v), hi.max(v)));
        let y_bounds = if (y_max - y_min).abs() < f32::EPSILON {
            (y_min - 1.0, y_max + 1.0)
        } else {
            let pad = (y_max - y_min) * 0.05;
            (y_min - pad, y_max + pad)
        };
        let mut chart = ChartBuilder::on(&root)
            .margin(10)
            .build_cartesian_2d(0f32..samples as f32, y_bounds.0..y_bounds.1)?;
        for (idx, channel) in acquisition.channels.iter().enumerate() {
            let color = style.palette[idx % style.palette.len()];
            let series = channel.iter().enumerate().map(|(i, v)| (i as f32, *v));
            chart.draw_series(LineSeries::new(series, &color))?;
        }
        if let Some(offset) = acquisition.trigger_offset().filter(|_| acquisition.triggered) {
            let x = offset as f32;
            chart.draw_series(LineSeries::new(
                vec![(x, y_bounds.0), (x, y_bounds.1)],
                &style.trigger_marker,
            ))?;
        }
        root.present()?;
    }
    encode_png(&buffer, style.width, style.height)
}
fn encode_png(buffer: &[u8], width: u32, height: u32) -> Result<Vec<u8>, ScopeError> {
    let image = ImageBuffer::<Rgb<u8>, _>::from_raw(width, height, buffer.to_vec())
        .ok_or_else(|| ScopeError::Plot("failed to allocate image buffer".into()))?;
    let mut output = Vec::new();
    let dynamic = DynamicImage::ImageRgb8(image);
    dynamic.write_to(&mut Cursor::new(&mut output), ImageFormat::Png)?;
    Ok(output)
}
