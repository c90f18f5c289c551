use crate::{is_zero, Point3, Vec3};

/// A ray in 3D space: a half-line starting at `origin` and traveling along
/// the unit vector `direction`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Point3,
    pub direction: Vec3,
}

impl Ray {
    /// Create a new ray. The direction is normalized.
    pub fn new(origin: Point3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    /// Create a secondary ray whose origin is nudged `delta` along `normal`
    /// so it does not immediately re-hit the surface it starts on.
    ///
    /// The nudge goes toward the side of the surface the direction points
    /// to; a direction lying in the surface gets no nudge at all.
    pub fn offset(origin: Point3, direction: Vec3, normal: Vec3, delta: f64) -> Self {
        let direction = direction.normalize();
        let side = direction.dot(normal);
        let origin = if is_zero(side) {
            origin
        } else if side > 0.0 {
            origin + normal * delta
        } else {
            origin - normal * delta
        };
        Self { origin, direction }
    }

    /// Point along the ray at parameter `t`.
    ///
    /// Parameters within epsilon of zero return the origin exactly, with no
    /// floating-point drift from the scaled-direction addition.
    pub fn at(&self, t: f64) -> Point3 {
        if is_zero(t) {
            self.origin
        } else {
            self.origin + self.direction * t
        }
    }
}
