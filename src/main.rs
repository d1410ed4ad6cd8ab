// src/main.rs
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{info, warn};
use scope_dummy::acquisition::{render_acquisition_png, PlotStyle, SpectrumBuilder};
use scope_dummy::{Acquisition, AcquisitionSource, ScopeConfig, ScopeDummy};

const FFT_SIZE: usize = 1_024;

fn load_config(path: Option<&Path>) -> Result<ScopeConfig> {
    let Some(path) = path else {
        info!("no config given, using built-in defaults");
        return Ok(ScopeConfig::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("invalid config {}", path.display()))
}

fn run_captures<S: AcquisitionSource>(source: &mut S, captures: usize) -> Result<Option<Acquisition>> {
    let mut last = None;
    for n in 0..captures {
        match source.next_acquisition()? {
            Some(acq) => {
                let spectrum = SpectrumBuilder::with_size(FFT_SIZE).compute(&acq);
                info!(
                    "capture {n}: {} ch x {} samples, trigger {} ({}), peak {:.1} Hz",
                    acq.num_channels(),
                    acq.samples_per_channel().unwrap_or(0),
                    acq.trigger_index,
                    if acq.triggered { "edge" } else { "auto" },
                    spectrum.peak_frequency(0).unwrap_or(0.0)
                );
                last = Some(acq);
            }
            // 没有触发不算错误，继续下一次采集
            None => info!("capture {n}: no frame"),
        }
    }
    Ok(last)
}

// 入口函数
fn main() -> Result<()> {
    env_logger::init();
    let mut args = std::env::args().skip(1);
    let config_path = args.next().map(PathBuf::from);
    let png_path = args.next().map(PathBuf::from);

    let config = load_config(config_path.as_deref())?;
    let mut scope = match config.seed {
        Some(seed) => ScopeDummy::with_seed(config.channels, config.acquisition, seed),
        None => ScopeDummy::new(config.channels, config.acquisition),
    }
    .context("failed to set up scope")?;
    info!("scope {} ready", scope.serial());

    let last = run_captures(&mut scope, config.captures)?;
    match (last, png_path) {
        (Some(acq), Some(path)) => {
            let png = render_acquisition_png(&acq, PlotStyle::default())?;
            fs::write(&path, png).with_context(|| format!("failed to write {}", path.display()))?;
            info!("wrote {}", path.display());
        }
        (None, Some(_)) => warn!("nothing captured, no image written"),
        _ => {}
    }
    Ok(())
}
