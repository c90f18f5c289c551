use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use glint_renderer::GridShape;
use log::LevelFilter;

/// Log levels usable as a clap value.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Footprint of the antialiasing sample pattern.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SampleShape {
    Square,
    Disk,
}

impl From<SampleShape> for GridShape {
    fn from(shape: SampleShape) -> Self {
        match shape {
            SampleShape::Square => GridShape::Square,
            SampleShape::Disk => GridShape::Disk,
        }
    }
}

/// Command line arguments.
#[derive(Parser)]
#[command(name = "glint")]
#[command(about = "A Whitted-style ray tracer")]
pub struct Args {
    /// Scene file to render (JSON)
    pub scene: PathBuf,

    /// Output image path
    #[arg(short, long, default_value = "render.png")]
    pub output: PathBuf,

    /// Image width in pixels
    #[arg(long, default_value = "400")]
    pub width: u32,

    /// Image height in pixels
    #[arg(long, default_value = "400")]
    pub height: u32,

    /// Samples per axis for antialiasing and depth of field
    #[arg(long, short = 's', default_value = "1")]
    pub samples: u32,

    /// Spread each pixel's rays over its footprint
    #[arg(long, short = 'a')]
    pub antialiasing: bool,

    /// Shape of the antialiasing sample pattern
    #[arg(long, value_enum, default_value = "square")]
    pub sample_shape: SampleShape,

    /// Shade every sample instead of subdividing adaptively
    #[arg(long)]
    pub no_adaptive: bool,

    /// Focal-plane distance for depth of field, overriding the scene file
    #[arg(long)]
    pub focal_distance: Option<f64>,

    /// Worker threads (0 renders on the main thread)
    #[arg(long, short = 't', default_value = "0")]
    pub threads: u32,

    /// Maximum recursion depth for reflection and transmission
    #[arg(long, default_value = "10")]
    pub max_depth: u32,

    /// Shadow rays per axis toward wide lights (1 gives hard shadows)
    #[arg(long, default_value = "1")]
    pub shadow_samples: u32,

    /// Attenuation below which recursive rays are dropped
    #[arg(long, default_value = "0.001")]
    pub min_attenuation: f64,

    /// Offset applied to secondary-ray origins to escape their surface
    #[arg(long, default_value = "0.1")]
    pub surface_bias: f64,

    /// Percent of the frame between progress log lines (0 disables)
    #[arg(long, default_value = "10")]
    pub progress: u32,

    /// Set the logging level
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,
}
