//! Sphere primitive.

use glint_math::{align_zero, Point3, Ray, Vec3};

use crate::error::{CoreError, CoreResult};
use crate::material::{Color, Material};
use crate::shape::{HitRecord, Shape};

/// A sphere given by center and radius.
pub struct Sphere {
    center: Point3,
    radius: f64,
    emission: Color,
    material: Material,
}

impl Sphere {
    /// Create a new sphere. The radius must be positive.
    pub fn new(center: Point3, radius: f64) -> CoreResult<Self> {
        if align_zero(radius) <= 0.0 {
            return Err(CoreError::InvalidGeometry(format!(
                "sphere radius must be positive, got {radius}"
            )));
        }
        Ok(Self {
            center,
            radius,
            emission: Color::ZERO,
            material: Material::default(),
        })
    }

    /// Set the surface's own emission color.
    pub fn with_emission(mut self, emission: Color) -> Self {
        self.emission = emission;
        self
    }

    /// Set the surface material.
    pub fn with_material(mut self, material: Material) -> Self {
        self.material = material;
        self
    }
}

impl Shape for Sphere {
    fn intersect(&self, ray: &Ray, max_distance: f64) -> Option<Vec<HitRecord<'_>>> {
        if self.center == ray.origin {
            // Ray starts at the center: one crossing, one radius away.
            return Some(vec![HitRecord {
                shape: self,
                point: ray.at(self.radius),
            }]);
        }

        let to_center = self.center - ray.origin;
        // Distance along the ray to the projection of the center onto it.
        let tm = align_zero(ray.direction.dot(to_center));
        // Distance from the center to the ray's line.
        let d = align_zero((to_center.length_squared() - tm * tm).sqrt());

        // Tangent rays count as misses, as do rays leaving an exterior origin.
        if d >= self.radius
            || (tm < 0.0 && to_center.length_squared() >= self.radius * self.radius)
        {
            return None;
        }

        // Half the chord between the two crossings.
        let th = align_zero((self.radius * self.radius - d * d).sqrt());
        let near = tm - th;
        let far = tm + th;

        if near > 0.0 && align_zero(near - max_distance) <= 0.0 {
            let mut hits = vec![HitRecord {
                shape: self,
                point: ray.at(near),
            }];
            if align_zero(far - max_distance) <= 0.0 {
                hits.push(HitRecord {
                    shape: self,
                    point: ray.at(far),
                });
            }
            return Some(hits);
        }

        // Origin inside the sphere, or on it heading inward.
        if align_zero(far - max_distance) <= 0.0 {
            return Some(vec![HitRecord {
                shape: self,
                point: ray.at(far),
            }]);
        }
        None
    }

    fn normal_at(&self, point: Point3) -> Vec3 {
        (point - self.center).normalize()
    }

    fn emission(&self) -> Color {
        self.emission
    }

    fn material(&self) -> &Material {
        &self.material
    }
}
