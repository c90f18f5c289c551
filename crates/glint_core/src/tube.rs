//! Infinite tube primitive.

use glint_math::{align_zero, is_zero, Point3, Ray, Vec3};

use crate::error::{CoreError, CoreResult};
use crate::material::{Color, Material};
use crate::shape::{HitRecord, Shape};

/// An infinite tube around an axis ray.
pub struct Tube {
    axis: Ray,
    radius: f64,
    emission: Color,
    material: Material,
}

impl Tube {
    /// Create a new tube around `axis`. The radius must be positive.
    pub fn new(axis: Ray, radius: f64) -> CoreResult<Self> {
        if align_zero(radius) <= 0.0 {
            return Err(CoreError::InvalidGeometry(format!(
                "tube radius must be positive, got {radius}"
            )));
        }
        Ok(Self {
            axis,
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

    /// The axis ray.
    pub fn axis(&self) -> &Ray {
        &self.axis
    }

    /// The tube radius.
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Crossing distances of `ray` with the lateral surface, unbounded and
    /// in ascending order, filtered to `(0, max_distance]`.
    ///
    /// Solves the quadratic of the ray's axis-orthogonal component; rays
    /// parallel to the axis and tangent grazes yield nothing.
    pub(crate) fn lateral_crossings(&self, ray: &Ray, max_distance: f64) -> Vec<f64> {
        let axis_dir = self.axis.direction;
        let dir_perp = ray.direction - axis_dir * ray.direction.dot(axis_dir);
        let a = dir_perp.length_squared();
        if is_zero(a) {
            // Parallel to the axis.
            return Vec::new();
        }

        let to_origin = ray.origin - self.axis.origin;
        let origin_perp = to_origin - axis_dir * to_origin.dot(axis_dir);
        let b = 2.0 * dir_perp.dot(origin_perp);
        let c = origin_perp.length_squared() - self.radius * self.radius;

        let discriminant = align_zero(b * b - 4.0 * a * c);
        if discriminant <= 0.0 {
            // Miss, or a tangent graze.
            return Vec::new();
        }

        let sqrt_disc = discriminant.sqrt();
        [
            align_zero((-b - sqrt_disc) / (2.0 * a)),
            align_zero((-b + sqrt_disc) / (2.0 * a)),
        ]
        .into_iter()
        .filter(|&t| t > 0.0 && align_zero(t - max_distance) <= 0.0)
        .collect()
    }

    /// Lateral surface normal shared with the capped cylinder.
    pub(crate) fn lateral_normal(&self, point: Point3) -> Vec3 {
        let to_point = point - self.axis.origin;
        let t = to_point.dot(self.axis.direction);
        // At zero projection the axis origin itself is the foot point.
        if is_zero(t) {
            return to_point.normalize();
        }
        (point - self.axis.at(t)).normalize()
    }
}

impl Shape for Tube {
    fn intersect(&self, ray: &Ray, max_distance: f64) -> Option<Vec<HitRecord<'_>>> {
        let hits: Vec<HitRecord> = self
            .lateral_crossings(ray, max_distance)
            .into_iter()
            .map(|t| HitRecord {
                shape: self,
                point: ray.at(t),
            })
            .collect();
        if hits.is_empty() {
            None
        } else {
            Some(hits)
        }
    }

    fn normal_at(&self, point: Point3) -> Vec3 {
        self.lateral_normal(point)
    }

    fn emission(&self) -> Color {
        self.emission
    }

    fn material(&self) -> &Material {
        &self.material
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::intersection_points;

    const TOLERANCE: f64 = 1e-9;

    fn unit_tube() -> Tube {
        // Radius 1 around the vertical line through (1, 0, 0).
        Tube::new(Ray::new(Point3::new(1.0, 0.0, 0.0), Vec3::Z), 1.0).unwrap()
    }

    fn assert_points_eq(actual: &[Point3], expected: &[Point3]) {
        assert_eq!(actual.len(), expected.len(), "hit count mismatch");
        for (a, e) in actual.iter().zip(expected) {
            assert!(
                a.distance(*e) < TOLERANCE,
                "point {a:?} differs from expected {e:?}"
            );
        }
    }

    #[test]
    fn test_rejects_non_positive_radius() {
        let axis = Ray::new(Point3::ZERO, Vec3::Z);
        assert!(Tube::new(axis, 0.0).is_err());
        assert!(Tube::new(axis, -2.0).is_err());
    }

    #[test]
    fn test_normal_on_lateral_surface() {
        let tube = Tube::new(Ray::new(Point3::new(0.0, 0.0, -1.0), Vec3::Z), 3.0).unwrap();
        assert_eq!(tube.normal_at(Point3::new(3.0, 0.0, 0.0)), Vec3::X);

        // Point level with the axis origin.
        let tube = Tube::new(Ray::new(Point3::ZERO, Vec3::Z), 3.0).unwrap();
        assert_eq!(tube.normal_at(Point3::new(3.0, 0.0, 0.0)), Vec3::X);
    }

    #[test]
    fn test_skew_ray_crosses_twice() {
        let tube = unit_tube();
        let ray = Ray::new(Point3::new(3.0, 0.5, 1.0), Vec3::new(-4.0, -0.5, -1.0));
        let points = intersection_points(&tube, &ray).expect("ray crosses the tube");
        // Exact quadratic roots: s = (33 -+ 2*sqrt(61)) / 65 along the
        // unnormalized direction.
        let root = 61.0_f64.sqrt();
        assert_points_eq(
            &points,
            &[
                Point3::new(
                    (63.0 + 8.0 * root) / 65.0,
                    (16.0 + root) / 65.0,
                    (32.0 + 2.0 * root) / 65.0,
                ),
                Point3::new(
                    (63.0 - 8.0 * root) / 65.0,
                    (16.0 - root) / 65.0,
                    (32.0 - 2.0 * root) / 65.0,
                ),
            ],
        );
    }

    #[test]
    fn test_outside_ray_heading_away_misses() {
        let tube = unit_tube();
        let ray = Ray::new(Point3::new(2.5, 0.0, 2.0), Vec3::new(1.0, 1.0, 0.0));
        assert!(intersection_points(&tube, &ray).is_none());
    }

    #[test]
    fn test_inside_diagonal_ray_crosses_once() {
        let tube = unit_tube();
        let ray = Ray::new(Point3::new(1.5, 0.0, 2.0), Vec3::new(1.0, 1.0, 0.0));
        let points = intersection_points(&tube, &ray).expect("origin is inside");
        assert_points_eq(
            &points,
            &[Point3::new(1.9114378277661477, 0.4114378277661476, 2.0)],
        );
    }

    #[test]
    fn test_rays_parallel_to_axis_miss() {
        let tube = unit_tube();
        for origin in [
            Point3::new(0.5, 0.0, 0.0),  // inside
            Point3::new(4.0, 0.0, 2.0),  // outside
            Point3::new(2.0, 0.0, 0.0),  // on the surface
            Point3::new(1.0, 0.0, 2.0),  // on the axis
            Point3::new(1.0, 0.0, 0.0),  // at the axis origin
        ] {
            let ray = Ray::new(origin, Vec3::Z);
            assert!(
                intersection_points(&tube, &ray).is_none(),
                "parallel ray from {origin:?} should miss"
            );
        }
    }

    #[test]
    fn test_orthogonal_crossings() {
        let tube = unit_tube();

        // From outside, straight through: two hits, near first.
        let ray = Ray::new(Point3::new(4.0, 0.0, 2.0), Vec3::new(-1.0, 0.0, 0.0));
        let points = intersection_points(&tube, &ray).unwrap();
        assert_points_eq(
            &points,
            &[Point3::new(2.0, 0.0, 2.0), Point3::new(0.0, 0.0, 2.0)],
        );

        // From the surface inward: one hit.
        let ray = Ray::new(Point3::new(2.0, 0.0, 2.0), Vec3::new(-1.0, 0.0, 0.0));
        let points = intersection_points(&tube, &ray).unwrap();
        assert_points_eq(&points, &[Point3::new(0.0, 0.0, 2.0)]);

        // From the surface outward: none.
        let ray = Ray::new(Point3::new(2.0, 0.0, 2.0), Vec3::new(1.0, 0.0, 0.0));
        assert!(intersection_points(&tube, &ray).is_none());

        // From inside: one hit either way.
        let ray = Ray::new(Point3::new(1.5, 0.0, 2.0), Vec3::new(1.0, 0.0, 0.0));
        assert_points_eq(
            &intersection_points(&tube, &ray).unwrap(),
            &[Point3::new(2.0, 0.0, 2.0)],
        );
        let ray = Ray::new(Point3::new(1.5, 0.0, 2.0), Vec3::new(-1.0, 0.0, 0.0));
        assert_points_eq(
            &intersection_points(&tube, &ray).unwrap(),
            &[Point3::new(0.0, 0.0, 2.0)],
        );

        // From a point on the axis itself: one hit.
        let ray = Ray::new(Point3::new(1.0, 0.0, 2.0), Vec3::new(1.0, 0.0, 0.0));
        assert_points_eq(
            &intersection_points(&tube, &ray).unwrap(),
            &[Point3::new(2.0, 0.0, 2.0)],
        );
    }

    #[test]
    fn test_crossings_through_axis_origin() {
        let tube = unit_tube();

        // Orthogonal, through the axis origin.
        let ray = Ray::new(Point3::new(4.0, 0.0, 0.0), Vec3::new(-1.0, 0.0, 0.0));
        assert_points_eq(
            &intersection_points(&tube, &ray).unwrap(),
            &[Point3::new(2.0, 0.0, 0.0), Point3::new(0.0, 0.0, 0.0)],
        );

        // Skew, through the axis origin.
        let ray = Ray::new(Point3::new(3.0, 0.0, 2.0), Vec3::new(-2.0, 0.0, -2.0));
        assert_points_eq(
            &intersection_points(&tube, &ray).unwrap(),
            &[Point3::new(2.0, 0.0, 1.0), Point3::new(0.0, 0.0, -1.0)],
        );

        // Starting at the axis origin.
        let ray = Ray::new(Point3::new(1.0, 0.0, 0.0), Vec3::new(2.0, 0.0, 2.0));
        assert_points_eq(
            &intersection_points(&tube, &ray).unwrap(),
            &[Point3::new(2.0, 0.0, 1.0)],
        );
    }

    #[test]
    fn test_tangent_rays_miss() {
        let tube = unit_tube();
        let origin = Point3::new(2.0, -1.0, 0.0);
        for direction in [
            Vec3::new(0.0, 1.0, 1.0),
            Vec3::new(0.0, -1.0, -1.0),
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(0.0, -1.0, 0.0),
        ] {
            let ray = Ray::new(origin, direction);
            assert!(
                intersection_points(&tube, &ray).is_none(),
                "tangent ray along {direction:?} should miss"
            );
        }
    }

    #[test]
    fn test_max_distance_bound() {
        let tube = unit_tube();
        // Crossings at t = 2 and t = 4.
        let ray = Ray::new(Point3::new(4.0, 0.0, 2.0), Vec3::new(-1.0, 0.0, 0.0));
        assert!(tube.intersect(&ray, 1.0).is_none());
        assert_eq!(tube.intersect(&ray, 2.0).map(|v| v.len()), Some(1));
        assert_eq!(tube.intersect(&ray, 3.0).map(|v| v.len()), Some(1));
        assert_eq!(tube.intersect(&ray, 4.0).map(|v| v.len()), Some(2));
    }
}
