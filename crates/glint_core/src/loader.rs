//! JSON scene-file loading.
//!
//! Scene files carry geometry, lights, background/ambient colors, and an
//! optional camera block. Vectors are `[x, y, z]` triplets; colors follow
//! the 0-255 convention used across the renderer.

use std::fs;
use std::path::Path;

use glint_math::{Point3, Ray, Vec3};
use serde::{Deserialize, Serialize};

use crate::cylinder::Cylinder;
use crate::error::{CoreError, CoreResult};
use crate::light::{AmbientLight, DirectionalLight, LightSource, PointLight, SpotLight};
use crate::material::{Color, Material};
use crate::plane::Plane;
use crate::scene::Scene;
use crate::shape::Shape;
use crate::sphere::Sphere;
use crate::triangle::Triangle;
use crate::tube::Tube;

/// Camera parameters carried by a scene file.
///
/// Kept as plain data here; the renderer crate interprets them. Exactly one
/// of `look_at` and `direction` should be present.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraSpec {
    /// Camera position
    pub position: Point3,
    /// Target point the camera looks at
    #[serde(default)]
    pub look_at: Option<Point3>,
    /// Explicit view direction, alternative to `look_at`
    #[serde(default)]
    pub direction: Option<Vec3>,
    /// Approximate up vector
    #[serde(default = "default_up")]
    pub up: Vec3,
    /// View-plane width in scene units
    pub width: f64,
    /// View-plane height in scene units
    pub height: f64,
    /// Distance from the camera to the view plane
    pub distance: f64,
    /// Distance to the focal plane; zero disables depth of field
    #[serde(default)]
    pub focal_distance: f64,
}

/// A scene plus the optional camera block that came with it.
pub struct LoadedScene {
    pub scene: Scene,
    pub camera: Option<CameraSpec>,
}

#[derive(Debug, Serialize, Deserialize)]
struct SceneFile {
    #[serde(default)]
    name: String,
    #[serde(default)]
    background: Color,
    #[serde(default)]
    ambient: Option<AmbientSpec>,
    #[serde(default)]
    shapes: Vec<ShapeSpec>,
    #[serde(default)]
    lights: Vec<LightSpec>,
    #[serde(default)]
    camera: Option<CameraSpec>,
}

#[derive(Debug, Serialize, Deserialize)]
struct AmbientSpec {
    color: Color,
    #[serde(default = "one")]
    ka: f64,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ShapeSpec {
    Sphere {
        center: Point3,
        radius: f64,
        #[serde(default)]
        emission: Color,
        #[serde(default)]
        material: Material,
    },
    Plane {
        point: Point3,
        normal: Vec3,
        #[serde(default)]
        emission: Color,
        #[serde(default)]
        material: Material,
    },
    Triangle {
        vertices: [Point3; 3],
        #[serde(default)]
        emission: Color,
        #[serde(default)]
        material: Material,
    },
    Tube {
        origin: Point3,
        direction: Vec3,
        radius: f64,
        #[serde(default)]
        emission: Color,
        #[serde(default)]
        material: Material,
    },
    Cylinder {
        origin: Point3,
        direction: Vec3,
        radius: f64,
        height: f64,
        #[serde(default)]
        emission: Color,
        #[serde(default)]
        material: Material,
    },
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum LightSpec {
    Directional {
        intensity: Color,
        direction: Vec3,
    },
    Point {
        intensity: Color,
        position: Point3,
        #[serde(default = "one")]
        kc: f64,
        #[serde(default)]
        kl: f64,
        #[serde(default)]
        kq: f64,
        #[serde(default)]
        radius: f64,
    },
    Spot {
        intensity: Color,
        position: Point3,
        direction: Vec3,
        #[serde(default = "one")]
        kc: f64,
        #[serde(default)]
        kl: f64,
        #[serde(default)]
        kq: f64,
        #[serde(default)]
        radius: f64,
        #[serde(default = "one_beam")]
        narrow_beam: i32,
    },
}

fn default_up() -> Vec3 {
    Vec3::Y
}

fn one() -> f64 {
    1.0
}

fn one_beam() -> i32 {
    1
}

fn axis_direction(direction: Vec3) -> CoreResult<Vec3> {
    direction
        .try_normalize()
        .ok_or_else(|| CoreError::InvalidGeometry("direction must not be zero-length".into()))
}

impl ShapeSpec {
    fn build(self) -> CoreResult<Box<dyn Shape>> {
        Ok(match self {
            ShapeSpec::Sphere {
                center,
                radius,
                emission,
                material,
            } => Box::new(
                Sphere::new(center, radius)?
                    .with_emission(emission)
                    .with_material(material),
            ),
            ShapeSpec::Plane {
                point,
                normal,
                emission,
                material,
            } => Box::new(
                Plane::new(point, normal)?
                    .with_emission(emission)
                    .with_material(material),
            ),
            ShapeSpec::Triangle {
                vertices: [p1, p2, p3],
                emission,
                material,
            } => Box::new(
                Triangle::new(p1, p2, p3)?
                    .with_emission(emission)
                    .with_material(material),
            ),
            ShapeSpec::Tube {
                origin,
                direction,
                radius,
                emission,
                material,
            } => Box::new(
                Tube::new(Ray::new(origin, axis_direction(direction)?), radius)?
                    .with_emission(emission)
                    .with_material(material),
            ),
            ShapeSpec::Cylinder {
                origin,
                direction,
                radius,
                height,
                emission,
                material,
            } => Box::new(
                Cylinder::new(Ray::new(origin, axis_direction(direction)?), radius, height)?
                    .with_emission(emission)
                    .with_material(material),
            ),
        })
    }
}

impl LightSpec {
    fn build(self) -> CoreResult<Box<dyn LightSource>> {
        Ok(match self {
            LightSpec::Directional {
                intensity,
                direction,
            } => Box::new(DirectionalLight::new(intensity, axis_direction(direction)?)),
            LightSpec::Point {
                intensity,
                position,
                kc,
                kl,
                kq,
                radius,
            } => Box::new(
                PointLight::new(intensity, position)
                    .with_kc(kc)
                    .with_kl(kl)
                    .with_kq(kq)
                    .with_radius(radius),
            ),
            LightSpec::Spot {
                intensity,
                position,
                direction,
                kc,
                kl,
                kq,
                radius,
                narrow_beam,
            } => Box::new(
                SpotLight::new(intensity, position, axis_direction(direction)?)
                    .with_kc(kc)
                    .with_kl(kl)
                    .with_kq(kq)
                    .with_radius(radius)
                    .with_narrow_beam(narrow_beam),
            ),
        })
    }
}

/// Build a scene from JSON text.
pub fn load_scene_from_str(json: &str) -> CoreResult<LoadedScene> {
    let file: SceneFile = serde_json::from_str(json)?;

    let mut scene = Scene::new(file.name).with_background(file.background);
    if let Some(ambient) = file.ambient {
        scene = scene.with_ambient(AmbientLight::new(ambient.color, ambient.ka));
    }
    for spec in file.shapes {
        scene = scene.with_shape(spec.build()?);
    }
    for spec in file.lights {
        scene = scene.with_light(spec.build()?);
    }

    log::debug!(
        "loaded scene '{}': {} shapes, {} lights",
        scene.name,
        scene.geometry.len(),
        scene.lights.len()
    );
    Ok(LoadedScene {
        scene,
        camera: file.camera,
    })
}

/// Read and build a scene from a JSON file. A file without a `name` field
/// is named after its file stem.
pub fn load_scene<P: AsRef<Path>>(path: P) -> CoreResult<LoadedScene> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    let mut loaded = load_scene_from_str(&text)?;
    if loaded.scene.name.is_empty() {
        loaded.scene.name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("scene")
            .to_string();
    }
    Ok(loaded)
}
