//! Glint core - scene model for the glint ray tracer.
//!
//! This crate provides:
//!
//! - **Shapes**: `Sphere`, `Plane`, `Triangle`, `Tube`, `Cylinder` behind the
//!   [`Shape`] trait, plus the [`ShapeList`] aggregate
//! - **Lighting**: `DirectionalLight`, `PointLight`, `SpotLight`,
//!   `AmbientLight` behind the [`LightSource`] trait
//! - **Scene assembly**: the [`Scene`] container and a JSON scene-file loader
//!
//! # Example
//!
//! ```ignore
//! use glint_core::load_scene;
//!
//! let file = load_scene("scene.json")?;
//! println!("Loaded {} shapes, {} lights",
//!     file.scene.geometry.len(),
//!     file.scene.lights.len());
//! ```

pub mod cylinder;
pub mod error;
pub mod light;
pub mod loader;
pub mod material;
pub mod plane;
pub mod scene;
pub mod shape;
pub mod sphere;
pub mod triangle;
pub mod tube;

// Re-export commonly used types
pub use cylinder::Cylinder;
pub use error::{CoreError, CoreResult};
pub use light::{AmbientLight, DirectionalLight, LightSource, PointLight, SpotLight};
pub use loader::{load_scene, load_scene_from_str, CameraSpec, LoadedScene};
pub use material::{Color, Material};
pub use plane::Plane;
pub use scene::Scene;
pub use shape::{closest_hit, intersection_points, intersections, HitRecord, Shape, ShapeList};
pub use sphere::Sphere;
pub use triangle::Triangle;
pub use tube::Tube;
