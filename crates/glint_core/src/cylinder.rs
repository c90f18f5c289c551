//! Capped cylinder primitive.

use glint_math::{align_zero, is_zero, Point3, Ray, Vec3};

use crate::error::{CoreError, CoreResult};
use crate::material::{Color, Material};
use crate::shape::{HitRecord, Shape};
use crate::tube::Tube;

/// A cylinder of finite height: a tube bounded along its axis, with flat
/// caps at both ends.
///
/// The lateral surface and its quadratic are shared with [`Tube`] by value
/// composition; only the axial bound and the cap normals live here.
pub struct Cylinder {
    tube: Tube,
    height: f64,
}

impl Cylinder {
    /// Create a new cylinder around `axis`, spanning `[0, height]` along it.
    /// Radius and height must be positive.
    pub fn new(axis: Ray, radius: f64, height: f64) -> CoreResult<Self> {
        if align_zero(height) <= 0.0 {
            return Err(CoreError::InvalidGeometry(format!(
                "cylinder height must be positive, got {height}"
            )));
        }
        Ok(Self {
            tube: Tube::new(axis, radius)?,
            height,
        })
    }

    /// Set the surface's own emission color.
    pub fn with_emission(mut self, emission: Color) -> Self {
        self.tube = self.tube.with_emission(emission);
        self
    }

    /// Set the surface material.
    pub fn with_material(mut self, material: Material) -> Self {
        self.tube = self.tube.with_material(material);
        self
    }

    /// The cylinder height.
    pub fn height(&self) -> f64 {
        self.height
    }
}

impl Shape for Cylinder {
    fn intersect(&self, ray: &Ray, max_distance: f64) -> Option<Vec<HitRecord<'_>>> {
        let base = self.tube.axis().origin;
        let axis_dir = self.tube.axis().direction;

        let hits: Vec<HitRecord> = self
            .tube
            .lateral_crossings(ray, max_distance)
            .into_iter()
            .filter_map(|t| {
                let point = ray.at(t);
                // Keep lateral hits whose axial projection is inside the
                // [0, height] span, both ends included.
                let along = align_zero((point - base).dot(axis_dir));
                (along >= 0.0 && align_zero(along - self.height) <= 0.0).then_some(HitRecord {
                    shape: self,
                    point,
                })
            })
            .collect();

        if hits.is_empty() {
            None
        } else {
            Some(hits)
        }
    }

    fn normal_at(&self, point: Point3) -> Vec3 {
        let base = self.tube.axis().origin;
        let axis_dir = self.tube.axis().direction;

        // Base cap, its center included.
        if point == base || is_zero((point - base).dot(axis_dir)) {
            return -axis_dir;
        }
        // Top cap, its center included.
        let top = self.tube.axis().at(self.height);
        if point == top || is_zero((point - top).dot(axis_dir)) {
            return axis_dir;
        }
        self.tube.lateral_normal(point)
    }

    fn emission(&self) -> Color {
        self.tube.emission()
    }

    fn material(&self) -> &Material {
        self.tube.material()
    }
}
