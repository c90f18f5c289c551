//! Shape trait, hit records, and the shape aggregate.

use std::fmt;
use std::ptr;

use glint_math::{Point3, Ray, Vec3};

use crate::material::{Color, Material};

/// Record of a single ray-shape intersection: the shape that was hit and the
/// point where the ray meets its surface.
#[derive(Clone, Copy)]
pub struct HitRecord<'a> {
    /// Shape that was hit
    pub shape: &'a dyn Shape,
    /// Point of intersection
    pub point: Point3,
}

impl PartialEq for HitRecord<'_> {
    /// Two records are equal when they reference the same shape instance and
    /// carry the same point.
    fn eq(&self, other: &Self) -> bool {
        ptr::addr_eq(self.shape, other.shape) && self.point == other.point
    }
}

impl fmt::Debug for HitRecord<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HitRecord")
            .field("shape", &(self.shape as *const dyn Shape))
            .field("point", &self.point)
            .finish()
    }
}

/// A surface that rays can intersect.
///
/// Implementations are value types carrying their own emission color and
/// Phong material; shading code reaches both through the hit record's shape
/// reference.
pub trait Shape: Send + Sync {
    /// All intersections of `ray` with this shape at distances in
    /// `(0, max_distance]`, in unspecified order.
    ///
    /// `None` means no intersection; a returned list is never empty. The
    /// upper bound is closed: a hit whose distance equals `max_distance`
    /// (within epsilon) is included.
    fn intersect(&self, ray: &Ray, max_distance: f64) -> Option<Vec<HitRecord<'_>>>;

    /// Unit surface normal at `point`, which is assumed to lie on the shape.
    fn normal_at(&self, point: Point3) -> Vec3;

    /// Light emitted by the surface itself.
    fn emission(&self) -> Color;

    /// Phong coefficients of the surface.
    fn material(&self) -> &Material;
}

/// Intersections of `ray` with `shape`, with no distance bound.
pub fn intersections<'a>(shape: &'a dyn Shape, ray: &Ray) -> Option<Vec<HitRecord<'a>>> {
    shape.intersect(ray, f64::INFINITY)
}

/// Intersection points of `ray` with `shape`, with no distance bound,
/// stripped of their shape references.
pub fn intersection_points(shape: &dyn Shape, ray: &Ray) -> Option<Vec<Point3>> {
    intersections(shape, ray).map(|hits| hits.iter().map(|hit| hit.point).collect())
}

/// The hit whose point lies closest to the ray origin, by squared distance.
/// Earlier entries win ties.
pub fn closest_hit<'a, 'h>(ray: &Ray, hits: &'h [HitRecord<'a>]) -> Option<&'h HitRecord<'a>> {
    let mut best: Option<(&HitRecord, f64)> = None;
    for hit in hits {
        let distance = ray.origin.distance_squared(hit.point);
        match best {
            Some((_, best_distance)) if distance >= best_distance => {}
            _ => best = Some((hit, distance)),
        }
    }
    best.map(|(hit, _)| hit)
}

/// Aggregate of shapes queried as one unit.
///
/// Intersection takes the union of the children's hit sets; nothing is
/// deduplicated or sorted.
#[derive(Default)]
pub struct ShapeList {
    shapes: Vec<Box<dyn Shape>>,
}

impl ShapeList {
    /// Create a new empty shape list.
    pub fn new() -> Self {
        Self { shapes: Vec::new() }
    }

    /// Add a shape to the list.
    pub fn add(&mut self, shape: Box<dyn Shape>) {
        self.shapes.push(shape);
    }

    /// Get the number of shapes.
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// Check if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// All intersections of `ray` with every contained shape, at distances
    /// in `(0, max_distance]`.
    ///
    /// An empty list, or a ray missing every child, yields `None` rather
    /// than an empty set.
    pub fn intersect(&self, ray: &Ray, max_distance: f64) -> Option<Vec<HitRecord<'_>>> {
        let mut found: Option<Vec<HitRecord>> = None;
        for shape in &self.shapes {
            if let Some(hits) = shape.intersect(ray, max_distance) {
                found.get_or_insert_with(Vec::new).extend(hits);
            }
        }
        found
    }

    /// Intersection points with no distance bound, without shape references.
    pub fn intersection_points(&self, ray: &Ray) -> Option<Vec<Point3>> {
        self.intersect(ray, f64::INFINITY)
            .map(|hits| hits.iter().map(|hit| hit.point).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plane::Plane;
    use crate::sphere::Sphere;
    use crate::triangle::Triangle;

    fn sample_shapes() -> ShapeList {
        let mut shapes = ShapeList::new();
        shapes.add(Box::new(
            Plane::new(Point3::new(1.0, -5.0, 0.0), Vec3::new(25.0, -27.5, -20.0)).unwrap(),
        ));
        shapes.add(Box::new(Sphere::new(Point3::new(4.0, 1.0, 0.0), 1.0).unwrap()));
        shapes.add(Box::new(
            Triangle::new(
                Point3::new(1.0, 2.0, -1.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.5, 1.0, 2.0),
            )
            .unwrap(),
        ));
        shapes
    }

    #[test]
    fn test_union_counts_over_mixed_shapes() {
        let shapes = sample_shapes();

        // Sphere twice plus triangle once.
        let ray = Ray::new(Point3::new(6.0, 1.5, 0.0), Vec3::new(-1.0, 0.0, 0.0));
        assert_eq!(shapes.intersection_points(&ray).map(|v| v.len()), Some(3));

        // All three shapes hit, the sphere twice.
        let ray = Ray::new(Point3::new(0.0, 1.5, 0.0), Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(shapes.intersection_points(&ray).map(|v| v.len()), Some(4));

        // Only the plane.
        let ray = Ray::new(Point3::new(2.0, 0.0, 0.0), Vec3::new(0.0, -6.0, 0.0));
        assert_eq!(shapes.intersection_points(&ray).map(|v| v.len()), Some(1));

        // Everything behind the ray.
        let ray = Ray::new(Point3::new(0.0, 3.0, 0.0), Vec3::new(-4.0, -3.0, 0.0));
        assert!(shapes.intersect(&ray, f64::INFINITY).is_none());
    }

    #[test]
    fn test_empty_list_misses() {
        let shapes = ShapeList::new();
        let ray = Ray::new(Point3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 1.0, 0.0));
        assert!(shapes.intersect(&ray, f64::INFINITY).is_none());
        assert!(shapes.is_empty());
    }

    #[test]
    fn test_max_distance_filters_union() {
        let shapes = sample_shapes();
        let ray = Ray::new(Point3::new(6.0, 1.5, 0.0), Vec3::new(-1.0, 0.0, 0.0));

        // Sphere hits at ~1.13 and ~2.87, triangle at 5.15.
        assert_eq!(shapes.intersect(&ray, 4.0).map(|v| v.len()), Some(2));
        assert_eq!(shapes.intersect(&ray, 6.0).map(|v| v.len()), Some(3));
        assert!(shapes.intersect(&ray, 1.0).is_none());
    }

    #[test]
    fn test_max_distance_upper_bound_is_closed() {
        let shapes = sample_shapes();
        let ray = Ray::new(Point3::new(6.0, 1.5, 0.0), Vec3::new(-1.0, 0.0, 0.0));

        // The triangle hit sits exactly on the bound.
        let hits = shapes.intersect(&ray, 5.150000000000001);
        assert_eq!(hits.map(|v| v.len()), Some(3));
    }

    #[test]
    fn test_closest_hit_picks_minimum_and_first_tie() {
        let sphere = Sphere::new(Point3::new(4.0, 1.0, 0.0), 1.0).unwrap();
        let ray = Ray::new(Point3::ZERO, Vec3::X);
        let far = HitRecord {
            shape: &sphere,
            point: Point3::new(5.0, 0.0, 0.0),
        };
        let near = HitRecord {
            shape: &sphere,
            point: Point3::new(2.0, 0.0, 0.0),
        };
        let near_twin = HitRecord {
            shape: &sphere,
            point: Point3::new(2.0, 0.0, 0.0),
        };

        let hits = [far, near, near_twin];
        let best = closest_hit(&ray, &hits).unwrap();
        assert_eq!(best.point, Point3::new(2.0, 0.0, 0.0));
        // First of the tied pair wins.
        assert!(std::ptr::eq(best, &hits[1]));

        assert!(closest_hit(&ray, &[]).is_none());
    }

    #[test]
    fn test_hit_record_equality_uses_shape_identity() {
        let a = Sphere::new(Point3::ZERO, 1.0).unwrap();
        let b = Sphere::new(Point3::ZERO, 1.0).unwrap();
        let point = Point3::new(1.0, 0.0, 0.0);

        let on_a = HitRecord { shape: &a, point };
        let on_a_again = HitRecord { shape: &a, point };
        let on_b = HitRecord { shape: &b, point };

        assert_eq!(on_a, on_a_again);
        assert_ne!(on_a, on_b);
    }
}
