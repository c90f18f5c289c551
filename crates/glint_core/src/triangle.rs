//! Triangle primitive.

use glint_math::{align_zero, same_sign, Point3, Ray, Vec3};

use crate::error::{CoreError, CoreResult};
use crate::material::{Color, Material};
use crate::shape::{HitRecord, Shape};

/// A flat triangle given by three vertices.
pub struct Triangle {
    vertices: [Point3; 3],
    normal: Vec3,
    emission: Color,
    material: Material,
}

impl Triangle {
    /// Create a triangle from three vertices. The vertices must be distinct
    /// and not collinear.
    pub fn new(p1: Point3, p2: Point3, p3: Point3) -> CoreResult<Self> {
        if p1 == p2 || p2 == p3 || p1 == p3 {
            return Err(CoreError::InvalidGeometry(
                "triangle vertices must be distinct".into(),
            ));
        }
        let normal = (p1 - p2).cross(p2 - p3).try_normalize().ok_or_else(|| {
            CoreError::InvalidGeometry("triangle vertices must not be collinear".into())
        })?;
        Ok(Self {
            vertices: [p1, p2, p3],
            normal,
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

    /// Crossing distance of `ray` with the supporting plane, if any, within
    /// `(0, max_distance]`.
    fn plane_crossing(&self, ray: &Ray, max_distance: f64) -> Option<f64> {
        let nv = align_zero(self.normal.dot(ray.direction));
        if nv == 0.0 {
            return None;
        }
        if ray.origin == self.vertices[0] {
            return None;
        }
        let to_plane = align_zero(self.normal.dot(self.vertices[0] - ray.origin));
        if to_plane == 0.0 {
            return None;
        }
        let t = align_zero(to_plane / nv);
        if t <= 0.0 || align_zero(t - max_distance) > 0.0 {
            return None;
        }
        Some(t)
    }
}

impl Shape for Triangle {
    fn intersect(&self, ray: &Ray, max_distance: f64) -> Option<Vec<HitRecord<'_>>> {
        let t = self.plane_crossing(ray, max_distance)?;

        // Containment: the direction must see all three origin-to-vertex
        // cross products on the same side. A zero product is an edge or
        // vertex graze and counts as a miss.
        let v1 = self.vertices[0] - ray.origin;
        let v2 = self.vertices[1] - ray.origin;
        let v3 = self.vertices[2] - ray.origin;
        let s1 = align_zero(ray.direction.dot(v1.cross(v2)));
        let s2 = align_zero(ray.direction.dot(v2.cross(v3)));
        let s3 = align_zero(ray.direction.dot(v3.cross(v1)));
        if !same_sign(s1, s2) || !same_sign(s2, s3) {
            return None;
        }

        Some(vec![HitRecord {
            shape: self,
            point: ray.at(t),
        }])
    }

    fn normal_at(&self, _point: Point3) -> Vec3 {
        self.normal
    }

    fn emission(&self) -> Color {
        self.emission
    }

    fn material(&self) -> &Material {
        &self.material
    }
}
