//! Scene container.

use crate::light::{AmbientLight, LightSource};
use crate::material::Color;
use crate::shape::{Shape, ShapeList};

/// A complete scene: geometry, lights, background color, and ambient term.
///
/// Scenes are assembled once through the `with_*` methods and treated as
/// read-only afterwards; the renderer shares them behind an `Arc`.
pub struct Scene {
    /// Scene name, used in logs only
    pub name: String,
    /// Color returned for rays that hit nothing
    pub background: Color,
    /// Ambient illumination added once per traced ray
    pub ambient: AmbientLight,
    /// Every shape in the scene
    pub geometry: ShapeList,
    /// Every light in the scene
    pub lights: Vec<Box<dyn LightSource>>,
}

impl Scene {
    /// Create an empty scene with a black background and no ambient light.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            background: Color::ZERO,
            ambient: AmbientLight::NONE,
            geometry: ShapeList::new(),
            lights: Vec::new(),
        }
    }

    /// Set the background color.
    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    /// Set the ambient light.
    pub fn with_ambient(mut self, ambient: AmbientLight) -> Self {
        self.ambient = ambient;
        self
    }

    /// Add a shape to the scene geometry.
    pub fn with_shape(mut self, shape: Box<dyn Shape>) -> Self {
        self.geometry.add(shape);
        self
    }

    /// Add a light source.
    pub fn with_light(mut self, light: Box<dyn LightSource>) -> Self {
        self.lights.push(light);
        self
    }
}
