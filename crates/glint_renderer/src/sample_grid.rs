//! Sample point generation over square and disk patches.
//!
//! A grid carries the target geometry only: the patch center, the two
//! spanning directions, and the edge length. Callers decide how many
//! points to draw and supply the randomness, so the same grid serves
//! pixel antialiasing, aperture sampling, and area-light shadows.

use glint_math::Point3;
use glint_math::Vec3;
use rand::{Rng, RngCore};

/// Per-axis oversampling factor that compensates for corner rejection
/// when a square grid is cut down to a disk.
const DISK_OVERSAMPLE: f64 = 1.27324;

/// Footprint of the sampled patch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridShape {
    Square,
    Disk,
}

/// An `n` x `n` point lattice over a patch of the plane spanned by
/// `up` and `right`.
///
/// Points are produced row-major from the top-left, matching pixel
/// ordering. Jittered grids displace each point uniformly within its own
/// cell; non-jittered grids return the exact cell centers, which is what
/// the adaptive sampler needs for its corner bookkeeping.
#[derive(Debug, Clone, Copy)]
pub struct SampleGrid {
    center: Point3,
    up: Vec3,
    right: Vec3,
    edge: f64,
    shape: GridShape,
    jitter: bool,
}

impl SampleGrid {
    /// Creates a jittered square grid centered at `center` with side
    /// length `edge`.
    pub fn new(center: Point3, up: Vec3, right: Vec3, edge: f64) -> Self {
        Self {
            center,
            up,
            right,
            edge,
            shape: GridShape::Square,
            jitter: true,
        }
    }

    pub fn with_shape(mut self, shape: GridShape) -> Self {
        self.shape = shape;
        self
    }

    pub fn with_jitter(mut self, jitter: bool) -> Self {
        self.jitter = jitter;
        self
    }

    pub fn center(&self) -> Point3 {
        self.center
    }

    /// Generates the sample points for a `samples` x `samples` lattice.
    ///
    /// A disk grid oversamples the underlying square and rejects points
    /// outside the inscribed circle, so its count varies around
    /// `samples * samples`. The list is never empty: if rejection were to
    /// discard every candidate the patch center stands in.
    pub fn points(&self, samples: usize, rng: &mut dyn RngCore) -> Vec<Point3> {
        match self.shape {
            GridShape::Square => self.lattice(samples, rng),
            GridShape::Disk => {
                let oversampled = (samples as f64 * DISK_OVERSAMPLE) as usize;
                let radius_squared = (self.edge / 2.0) * (self.edge / 2.0);
                let mut points: Vec<Point3> = self
                    .lattice(oversampled.max(samples), rng)
                    .into_iter()
                    .filter(|point| point.distance_squared(self.center) < radius_squared)
                    .collect();
                if points.is_empty() {
                    points.push(self.center);
                }
                points
            }
        }
    }

    fn lattice(&self, samples: usize, rng: &mut dyn RngCore) -> Vec<Point3> {
        let cell = self.edge / samples as f64;
        let half = (samples as f64 - 1.0) / 2.0;
        let mut points = Vec::with_capacity(samples * samples);
        for i in 0..samples {
            for j in 0..samples {
                let mut x = (j as f64 - half) * cell;
                let mut y = -(i as f64 - half) * cell;
                if self.jitter {
                    x += (rng.gen::<f64>() - 0.5) * cell;
                    y += (rng.gen::<f64>() - 0.5) * cell;
                }
                points.push(self.center + self.right * x + self.up * y);
            }
        }
        points
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glint_math::Vec3;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn axis_grid(edge: f64) -> SampleGrid {
        SampleGrid::new(Point3::ZERO, Vec3::Y, Vec3::X, edge)
    }

    #[test]
    fn test_deterministic_grid_hits_cell_centers() {
        let mut rng = StdRng::seed_from_u64(42);
        let points = axis_grid(3.0).with_jitter(false).points(3, &mut rng);
        assert_eq!(points.len(), 9);
        assert_eq!(points[0], Point3::new(-1.0, 1.0, 0.0));
        assert_eq!(points[2], Point3::new(1.0, 1.0, 0.0));
        assert_eq!(points[4], Point3::ZERO);
        assert_eq!(points[8], Point3::new(1.0, -1.0, 0.0));
    }

    #[test]
    fn test_single_sample_is_patch_center() {
        let mut rng = StdRng::seed_from_u64(42);
        let center = Point3::new(2.0, -1.0, 5.0);
        let grid = SampleGrid::new(center, Vec3::Y, Vec3::X, 4.0).with_jitter(false);
        assert_eq!(grid.points(1, &mut rng), vec![center]);
    }

    #[test]
    fn test_jitter_stays_within_cells() {
        let mut rng = StdRng::seed_from_u64(42);
        let samples = 4;
        let edge = 2.0;
        let cell = edge / samples as f64;
        let points = axis_grid(edge).points(samples, &mut rng);
        assert_eq!(points.len(), 16);
        for (index, point) in points.iter().enumerate() {
            let i = index / samples;
            let j = index % samples;
            let cx = (j as f64 - 1.5) * cell;
            let cy = -(i as f64 - 1.5) * cell;
            assert!((point.x - cx).abs() <= cell / 2.0 + 1e-12);
            assert!((point.y - cy).abs() <= cell / 2.0 + 1e-12);
            assert_eq!(point.z, 0.0);
        }
    }

    #[test]
    fn test_jitter_is_seed_deterministic() {
        let mut first = StdRng::seed_from_u64(7);
        let mut second = StdRng::seed_from_u64(7);
        let grid = axis_grid(1.0);
        assert_eq!(grid.points(3, &mut first), grid.points(3, &mut second));
    }

    #[test]
    fn test_disk_rejects_corners() {
        let mut rng = StdRng::seed_from_u64(42);
        let edge = 2.0;
        let points = axis_grid(edge)
            .with_shape(GridShape::Disk)
            .points(9, &mut rng);
        assert!(!points.is_empty());
        for point in &points {
            assert!(point.distance_squared(Point3::ZERO) < 1.0);
        }
    }

    #[test]
    fn test_disk_oversamples_before_rejection() {
        let mut rng = StdRng::seed_from_u64(42);
        let points = axis_grid(2.0)
            .with_shape(GridShape::Disk)
            .with_jitter(false)
            .points(9, &mut rng);
        // 9 samples oversample to an 11 x 11 lattice; the inscribed disk
        // keeps roughly pi/4 of it.
        assert!(points.len() > 81);
        assert!(points.len() < 121);
    }

    #[test]
    fn test_grid_spans_arbitrary_basis() {
        let mut rng = StdRng::seed_from_u64(42);
        let center = Point3::new(0.0, 0.0, 10.0);
        let grid = SampleGrid::new(center, Vec3::Z, Vec3::Y, 2.0).with_jitter(false);
        let points = grid.points(2, &mut rng);
        assert_eq!(points.len(), 4);
        for point in &points {
            assert_eq!(point.x, 0.0);
        }
        assert_eq!(points[0], Point3::new(0.0, -0.5, 10.5));
        assert_eq!(points[3], Point3::new(0.0, 0.5, 9.5));
    }
}
