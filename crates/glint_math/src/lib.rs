//! Double-precision math layer shared by every glint crate.
//!
//! Geometry is built on [`glam::DVec3`]; the aliases below name the three
//! roles a vector plays in the renderer. All boundary comparisons in the
//! intersection and shading code go through [`align_zero`] / [`is_zero`] so
//! that near-boundary results are classified consistently.

pub use glam::DVec3;

/// A direction or displacement in 3D space.
pub type Vec3 = DVec3;

/// A position in 3D space.
pub type Point3 = DVec3;

/// Tolerance under which a floating-point value is treated as zero.
pub const EPSILON: f64 = 1e-10;

/// Snap values within [`EPSILON`] of zero to exactly zero.
#[inline]
pub fn align_zero(value: f64) -> f64 {
    if value.abs() < EPSILON {
        0.0
    } else {
        value
    }
}

/// True when `value` lies within [`EPSILON`] of zero.
#[inline]
pub fn is_zero(value: f64) -> bool {
    value.abs() < EPSILON
}

/// True when `a` and `b` are both nonzero and share a sign.
#[inline]
pub fn same_sign(a: f64, b: f64) -> bool {
    a * b > 0.0
}

mod ray;
pub use ray::Ray;
