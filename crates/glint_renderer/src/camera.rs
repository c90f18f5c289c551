//! Camera: view geometry, per-pixel sampling, and frame assembly.
//!
//! The camera owns the view basis, the sampling configuration, and the
//! illumination engine behind the [`RayTracer`] trait. Rendering walks a
//! shared pixel queue, so the same code path serves a single thread or a
//! worker pool; per-pixel jitter is seeded from the pixel index, which
//! keeps renders identical regardless of thread count.

use std::sync::mpsc;
use std::thread;
use std::time::Instant;

use glint_core::Color;
use glint_math::{align_zero, is_zero, Point3, Ray, Vec3};
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::error::{CameraError, CameraResult};
use crate::frame::Frame;
use crate::pixel_queue::PixelQueue;
use crate::sample_grid::{GridShape, SampleGrid};
use crate::supersample::{adaptive_average, valid_sample_count};
use crate::tracer::RayTracer;

/// Aperture edge length for depth of field, in pixel widths.
const APERTURE_PIXELS: f64 = 8.0;

/// How the camera's viewing basis is specified.
#[derive(Debug, Clone, Copy)]
pub enum Orientation {
    /// Explicit view and up vectors; both must be unit length and mutually
    /// orthogonal.
    Vectors { to: Vec3, up: Vec3 },
    /// Aim at a target point. `up` is a hint that gets re-orthogonalized
    /// against the derived view direction.
    LookAt { target: Point3, up: Vec3 },
}

/// Everything a [`Camera`] needs besides the tracer and the resolution.
///
/// The defaults describe no usable view plane; width, height, and distance
/// must be set before construction succeeds.
#[derive(Debug, Clone, Copy)]
pub struct CameraSettings {
    pub position: Point3,
    pub orientation: Orientation,
    pub view_width: f64,
    pub view_height: f64,
    pub view_distance: f64,
    /// Samples per axis for antialiasing and aperture beams.
    pub samples: u32,
    /// Spread primary rays over each pixel instead of tracing its center.
    pub antialiasing: bool,
    pub sample_shape: GridShape,
    /// Subdivide sample lattices only where corner colors disagree.
    pub adaptive: bool,
    /// Distance from the view plane to the focal plane; 0 disables depth
    /// of field.
    pub focal_distance: f64,
    /// Worker threads; 0 renders on the calling thread.
    pub threads: u32,
    /// Percent of the frame between progress log lines; 0 disables.
    pub progress_interval: u32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            position: Point3::ZERO,
            orientation: Orientation::Vectors {
                to: Vec3::NEG_Z,
                up: Vec3::Y,
            },
            view_width: 0.0,
            view_height: 0.0,
            view_distance: 0.0,
            samples: 1,
            antialiasing: false,
            sample_shape: GridShape::Square,
            adaptive: true,
            focal_distance: 0.0,
            threads: 0,
            progress_interval: 10,
        }
    }
}

impl CameraSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_position(mut self, position: Point3) -> Self {
        self.position = position;
        self
    }

    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn with_direction(self, to: Vec3, up: Vec3) -> Self {
        self.with_orientation(Orientation::Vectors { to, up })
    }

    pub fn with_look_at(self, target: Point3, up: Vec3) -> Self {
        self.with_orientation(Orientation::LookAt { target, up })
    }

    pub fn with_view_size(mut self, width: f64, height: f64) -> Self {
        self.view_width = width;
        self.view_height = height;
        self
    }

    pub fn with_view_distance(mut self, distance: f64) -> Self {
        self.view_distance = distance;
        self
    }

    pub fn with_samples(mut self, samples: u32) -> Self {
        self.samples = samples;
        self
    }

    pub fn with_antialiasing(mut self, antialiasing: bool) -> Self {
        self.antialiasing = antialiasing;
        self
    }

    pub fn with_sample_shape(mut self, sample_shape: GridShape) -> Self {
        self.sample_shape = sample_shape;
        self
    }

    pub fn with_adaptive(mut self, adaptive: bool) -> Self {
        self.adaptive = adaptive;
        self
    }

    pub fn with_focal_distance(mut self, focal_distance: f64) -> Self {
        self.focal_distance = focal_distance;
        self
    }

    pub fn with_threads(mut self, threads: u32) -> Self {
        self.threads = threads;
        self
    }

    pub fn with_progress_interval(mut self, progress_interval: u32) -> Self {
        self.progress_interval = progress_interval;
        self
    }
}

/// A validated camera ready to render.
///
/// Construction checks the whole configuration up front; rendering itself
/// cannot fail, it can only produce darker or brighter pixels.
pub struct Camera {
    position: Point3,
    to: Vec3,
    up: Vec3,
    right: Vec3,
    view_center: Point3,
    nx: u32,
    ny: u32,
    settings: CameraSettings,
    tracer: Box<dyn RayTracer>,
    /// Aperture sample points, fixed for the whole render when depth of
    /// field is enabled.
    aperture: Option<Vec<Point3>>,
}

impl Camera {
    /// Builds a camera rendering `width` x `height` pixels through the
    /// given tracer.
    pub fn new(
        settings: CameraSettings,
        tracer: Box<dyn RayTracer>,
        width: u32,
        height: u32,
    ) -> CameraResult<Self> {
        if width == 0 || height == 0 {
            return Err(CameraError::MissingArgument("image resolution"));
        }
        check_extent(settings.view_width, "view-plane width")?;
        check_extent(settings.view_height, "view-plane height")?;
        check_extent(settings.view_distance, "view-plane distance")?;
        let (to, up, right) = resolve_basis(settings.position, settings.orientation)?;
        if settings.samples == 0 {
            return Err(CameraError::InvalidConfiguration(
                "sample count must be at least 1".into(),
            ));
        }
        if settings.focal_distance < 0.0 {
            return Err(CameraError::InvalidConfiguration(
                "focal distance must not be negative".into(),
            ));
        }

        let antialiased = settings.antialiasing && settings.samples > 1;
        let depth_of_field = settings.focal_distance > 0.0;
        if antialiased || depth_of_field {
            let pixel_width = settings.view_width / f64::from(width);
            let pixel_height = settings.view_height / f64::from(height);
            if !is_zero(pixel_width - pixel_height) {
                return Err(CameraError::InvalidConfiguration(
                    "beam sampling requires square pixels".into(),
                ));
            }
        }
        if settings.adaptive && (antialiased || depth_of_field) {
            if !valid_sample_count(settings.samples) {
                return Err(CameraError::InvalidConfiguration(format!(
                    "adaptive supersampling needs 1, 2, or 2^k+1 samples per axis, got {}",
                    settings.samples
                )));
            }
            if antialiased && settings.sample_shape == GridShape::Disk {
                return Err(CameraError::InvalidConfiguration(
                    "adaptive supersampling works on square sample grids only".into(),
                ));
            }
        }

        let view_center = settings.position + to * settings.view_distance;
        let aperture = if depth_of_field {
            let edge = settings.view_width / f64::from(width) * APERTURE_PIXELS;
            let grid = SampleGrid::new(settings.position, up, right, edge)
                .with_jitter(!settings.adaptive);
            let mut rng = StdRng::seed_from_u64(0);
            Some(grid.points(settings.samples as usize, &mut rng))
        } else {
            None
        };

        Ok(Self {
            position: settings.position,
            to,
            up,
            right,
            view_center,
            nx: width,
            ny: height,
            settings,
            tracer,
            aperture,
        })
    }

    pub fn width(&self) -> u32 {
        self.nx
    }

    pub fn height(&self) -> u32 {
        self.ny
    }

    pub fn position(&self) -> Point3 {
        self.position
    }

    pub fn direction(&self) -> Vec3 {
        self.to
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    pub fn right(&self) -> Vec3 {
        self.right
    }

    /// Center of pixel (`row`, `col`) on the view plane.
    fn pixel_center(&self, row: u32, col: u32) -> Point3 {
        let x = align_zero(
            (f64::from(col) - (f64::from(self.nx) - 1.0) / 2.0)
                * (self.settings.view_width / f64::from(self.nx)),
        );
        let y = align_zero(
            -(f64::from(row) - (f64::from(self.ny) - 1.0) / 2.0)
                * (self.settings.view_height / f64::from(self.ny)),
        );
        let mut point = self.view_center;
        if x != 0.0 {
            point += self.right * x;
        }
        if y != 0.0 {
            point += self.up * y;
        }
        point
    }

    /// The single ray through the center of pixel (`row`, `col`).
    pub fn pixel_ray(&self, row: u32, col: u32) -> Ray {
        Ray::new(self.position, self.pixel_center(row, col) - self.position)
    }

    /// Renders the full frame and returns it.
    ///
    /// With worker threads, results flow back over a channel and only this
    /// thread writes the frame; a panicking worker aborts the render and
    /// the panic resurfaces here.
    pub fn render_image(&self) -> Frame {
        let mut frame = Frame::new(self.nx, self.ny);
        let queue = PixelQueue::new(self.ny, self.nx, self.settings.progress_interval);
        let started = Instant::now();
        info!(
            "rendering {}x{} ({} threads, {} samples per axis)",
            self.nx, self.ny, self.settings.threads, self.settings.samples
        );

        if self.settings.threads == 0 {
            while let Some(pixel) = queue.claim() {
                frame.set(pixel.row, pixel.col, self.pixel_color(pixel.row, pixel.col));
                queue.complete();
            }
        } else {
            let (sender, receiver) = mpsc::channel();
            thread::scope(|scope| {
                for _ in 0..self.settings.threads {
                    let sender = sender.clone();
                    let queue = &queue;
                    scope.spawn(move || {
                        while let Some(pixel) = queue.claim() {
                            let color = self.pixel_color(pixel.row, pixel.col);
                            if sender.send((pixel, color)).is_err() {
                                break;
                            }
                        }
                    });
                }
                drop(sender);
                for (pixel, color) in receiver {
                    frame.set(pixel.row, pixel.col, color);
                    queue.complete();
                }
            });
        }

        info!(
            "rendered {} pixels in {:.2?}",
            queue.completed(),
            started.elapsed()
        );
        frame
    }

    /// Color of one pixel: a center ray, or an antialiasing beam over the
    /// pixel's footprint.
    fn pixel_color(&self, row: u32, col: u32) -> Color {
        let center = self.pixel_center(row, col);
        if !self.settings.antialiasing || self.settings.samples == 1 {
            return self.target_color(center);
        }

        let samples = self.settings.samples as usize;
        let mut rng = StdRng::seed_from_u64(u64::from(row) * u64::from(self.nx) + u64::from(col));
        let grid = SampleGrid::new(
            center,
            self.up,
            self.right,
            self.settings.view_width / f64::from(self.nx),
        )
        .with_shape(self.settings.sample_shape)
        .with_jitter(!self.settings.adaptive);
        let points = grid.points(samples, &mut rng);

        if self.settings.adaptive {
            adaptive_average(&points, samples, &mut |point| self.target_color(point))
        } else {
            let sum = points
                .iter()
                .fold(Color::ZERO, |acc, &point| acc + self.target_color(point));
            sum / points.len() as f64
        }
    }

    /// Color seen toward a point on the view plane: one ray from the
    /// camera, or an aperture beam converging on the target's focal point.
    fn target_color(&self, target: Point3) -> Color {
        let Some(aperture) = &self.aperture else {
            return self
                .tracer
                .trace_ray(&Ray::new(self.position, target - self.position));
        };

        let focal_point = target + self.to * self.settings.focal_distance;
        if self.settings.adaptive {
            adaptive_average(aperture, self.settings.samples as usize, &mut |origin| {
                self.tracer.trace_ray(&Ray::new(origin, focal_point - origin))
            })
        } else {
            let sum = aperture.iter().fold(Color::ZERO, |acc, &origin| {
                acc + self.tracer.trace_ray(&Ray::new(origin, focal_point - origin))
            });
            sum / aperture.len() as f64
        }
    }
}

fn check_extent(value: f64, name: &'static str) -> CameraResult<()> {
    if is_zero(value) {
        return Err(CameraError::MissingArgument(name));
    }
    if value < 0.0 {
        return Err(CameraError::InvalidConfiguration(format!(
            "{name} must be positive"
        )));
    }
    Ok(())
}

/// Resolves an orientation into the orthonormal (to, up, right) basis.
fn resolve_basis(position: Point3, orientation: Orientation) -> CameraResult<(Vec3, Vec3, Vec3)> {
    match orientation {
        Orientation::Vectors { to, up } => {
            if to == Vec3::ZERO {
                return Err(CameraError::MissingArgument("view direction"));
            }
            if up == Vec3::ZERO {
                return Err(CameraError::MissingArgument("up vector"));
            }
            if !is_zero(to.dot(up)) {
                return Err(CameraError::InvalidConfiguration(
                    "view and up vectors must be orthogonal".into(),
                ));
            }
            if !is_zero(to.length_squared() - 1.0) {
                return Err(CameraError::InvalidConfiguration(
                    "view direction must be a unit vector".into(),
                ));
            }
            if !is_zero(up.length_squared() - 1.0) {
                return Err(CameraError::InvalidConfiguration(
                    "up vector must be a unit vector".into(),
                ));
            }
            Ok((to, up, to.cross(up)))
        }
        Orientation::LookAt { target, up } => {
            if up == Vec3::ZERO {
                return Err(CameraError::MissingArgument("up vector"));
            }
            if target == position {
                return Err(CameraError::InvalidConfiguration(
                    "look-at target coincides with the camera position".into(),
                ));
            }
            let to = (target - position).normalize();
            let right = to.cross(up);
            if is_zero(right.length_squared()) {
                return Err(CameraError::InvalidConfiguration(
                    "up vector is parallel to the view direction".into(),
                ));
            }
            let right = right.normalize();
            Ok((to, right.cross(to), right))
        }
    }
}
