//! Infinite plane primitive.

use glint_math::{align_zero, Point3, Ray, Vec3};

use crate::error::{CoreError, CoreResult};
use crate::material::{Color, Material};
use crate::shape::{HitRecord, Shape};

/// An infinite plane given by a reference point and a unit normal.
pub struct Plane {
    point: Point3,
    normal: Vec3,
    emission: Color,
    material: Material,
}

impl Plane {
    /// Create a plane from a point on it and a normal vector. The normal is
    /// normalized and must not be zero-length.
    pub fn new(point: Point3, normal: Vec3) -> CoreResult<Self> {
        let normal = normal.try_normalize().ok_or_else(|| {
            CoreError::InvalidGeometry("plane normal must not be zero-length".into())
        })?;
        Ok(Self {
            point,
            normal,
            emission: Color::ZERO,
            material: Material::default(),
        })
    }

    /// Create a plane through three points. The points must be distinct and
    /// not collinear.
    pub fn from_points(p1: Point3, p2: Point3, p3: Point3) -> CoreResult<Self> {
        if p1 == p2 || p2 == p3 || p1 == p3 {
            return Err(CoreError::InvalidGeometry(
                "plane points must be distinct".into(),
            ));
        }
        let normal = (p1 - p2).cross(p2 - p3).try_normalize().ok_or_else(|| {
            CoreError::InvalidGeometry("plane points must not be collinear".into())
        })?;
        Ok(Self {
            point: p1,
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

    /// The plane's unit normal.
    pub fn normal(&self) -> Vec3 {
        self.normal
    }
}

impl Shape for Plane {
    fn intersect(&self, ray: &Ray, max_distance: f64) -> Option<Vec<HitRecord<'_>>> {
        let nv = align_zero(self.normal.dot(ray.direction));
        // Parallel rays never cross, including rays lying in the plane.
        if nv == 0.0 {
            return None;
        }

        // A ray starting on the plane (reference point included) does not
        // report its own origin as a hit.
        if ray.origin == self.point {
            return None;
        }
        let to_plane = align_zero(self.normal.dot(self.point - ray.origin));
        if to_plane == 0.0 {
            return None;
        }

        let t = align_zero(to_plane / nv);
        if t <= 0.0 || align_zero(t - max_distance) > 0.0 {
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
