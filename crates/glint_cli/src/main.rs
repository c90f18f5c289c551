//! glint - render a JSON scene file to an image.

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use glint_core::{load_scene, LoadedScene};
use glint_renderer::{Camera, CameraSettings, TraceSettings, WhittedTracer};

mod cli;

use cli::Args;

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_default_env()
        .filter_level(args.log_level.into())
        .init();

    let LoadedScene { scene, camera } = load_scene(&args.scene)?;
    let Some(spec) = camera else {
        anyhow::bail!("scene file {} has no camera block", args.scene.display());
    };

    log::info!(
        "rendering '{}' at {}x{}",
        scene.name,
        args.width,
        args.height
    );

    let mut settings = CameraSettings::new()
        .with_position(spec.position)
        .with_view_size(spec.width, spec.height)
        .with_view_distance(spec.distance)
        .with_samples(args.samples)
        .with_antialiasing(args.antialiasing)
        .with_sample_shape(args.sample_shape.into())
        .with_adaptive(!args.no_adaptive)
        .with_focal_distance(args.focal_distance.unwrap_or(spec.focal_distance))
        .with_threads(args.threads)
        .with_progress_interval(args.progress);
    settings = if let Some(target) = spec.look_at {
        settings.with_look_at(target, spec.up)
    } else if let Some(direction) = spec.direction {
        settings.with_direction(direction, spec.up)
    } else {
        anyhow::bail!("camera block needs either a look_at target or a direction");
    };

    let trace_settings = TraceSettings::new()
        .with_max_depth(args.max_depth)
        .with_min_attenuation(args.min_attenuation)
        .with_surface_bias(args.surface_bias)
        .with_shadow_samples(args.shadow_samples);
    let tracer = WhittedTracer::new(Arc::new(scene)).with_settings(trace_settings);

    let camera = Camera::new(settings, Box::new(tracer), args.width, args.height)?;
    let frame = camera.render_image();

    image::save_buffer(
        &args.output,
        &frame.to_rgb8(),
        frame.width(),
        frame.height(),
        image::ColorType::Rgb8,
    )?;
    log::info!("wrote {}", args.output.display());

    Ok(())
}
