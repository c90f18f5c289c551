//! Whitted-style CPU renderer.
//!
//! The crate splits rendering into two halves: [`WhittedTracer`] computes
//! the color seen along a single ray (recursive reflection, transmission,
//! and shadowed local illumination over a [`glint_core::Scene`]), and
//! [`Camera`] turns pixels into rays: view-plane geometry, antialiasing
//! and depth-of-field beams, and a multi-threaded pixel queue feeding a
//! [`Frame`].

mod camera;
mod error;
mod frame;
mod pixel_queue;
mod sample_grid;
mod supersample;
mod tracer;

pub use camera::{Camera, CameraSettings, Orientation};
pub use error::{CameraError, CameraResult};
pub use frame::Frame;
pub use pixel_queue::{Pixel, PixelQueue};
pub use sample_grid::{GridShape, SampleGrid};
pub use supersample::{adaptive_average, valid_sample_count};
pub use tracer::{RayTracer, TraceSettings, WhittedTracer};
