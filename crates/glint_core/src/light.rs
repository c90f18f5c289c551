//! Light sources.

use glint_math::{Point3, Vec3};

use crate::material::Color;

/// A light source contributing to local shading.
///
/// `direction_to` points from the light toward the shaded point, matching
/// the shading loop's convention.
pub trait LightSource: Send + Sync {
    /// Intensity arriving at `point`, after distance attenuation.
    fn intensity_at(&self, point: Point3) -> Color;

    /// Unit vector from the light toward `point`.
    fn direction_to(&self, point: Point3) -> Vec3;

    /// Distance from the light to `point`; infinite for directional lights.
    fn distance_to(&self, point: Point3) -> f64;

    /// Area radius for soft shadows; zero means a pure point source.
    fn radius(&self) -> f64 {
        0.0
    }

    /// Position of the light, if it has one.
    fn position(&self) -> Option<Point3> {
        None
    }
}

/// A light infinitely far away, shining in one fixed direction.
pub struct DirectionalLight {
    intensity: Color,
    direction: Vec3,
}

impl DirectionalLight {
    /// Create a directional light. The direction is normalized.
    pub fn new(intensity: Color, direction: Vec3) -> Self {
        Self {
            intensity,
            direction: direction.normalize(),
        }
    }
}

impl LightSource for DirectionalLight {
    fn intensity_at(&self, _point: Point3) -> Color {
        self.intensity
    }

    fn direction_to(&self, _point: Point3) -> Vec3 {
        self.direction
    }

    fn distance_to(&self, _point: Point3) -> f64 {
        f64::INFINITY
    }
}

/// A point light radiating in all directions, attenuated with distance by
/// `1 / (kc + kl * d + kq * d^2)`.
pub struct PointLight {
    intensity: Color,
    position: Point3,
    kc: f64,
    kl: f64,
    kq: f64,
    radius: f64,
}

impl PointLight {
    /// Create a point light with no distance attenuation beyond the
    /// constant term and no area radius.
    pub fn new(intensity: Color, position: Point3) -> Self {
        Self {
            intensity,
            position,
            kc: 1.0,
            kl: 0.0,
            kq: 0.0,
            radius: 0.0,
        }
    }

    /// Set the constant attenuation coefficient.
    pub fn with_kc(mut self, kc: f64) -> Self {
        self.kc = kc;
        self
    }

    /// Set the linear attenuation coefficient.
    pub fn with_kl(mut self, kl: f64) -> Self {
        self.kl = kl;
        self
    }

    /// Set the quadratic attenuation coefficient.
    pub fn with_kq(mut self, kq: f64) -> Self {
        self.kq = kq;
        self
    }

    /// Set the area radius used for soft shadows.
    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }
}

impl LightSource for PointLight {
    fn intensity_at(&self, point: Point3) -> Color {
        let distance = self.distance_to(point);
        self.intensity / (self.kc + self.kl * distance + self.kq * distance * distance)
    }

    fn direction_to(&self, point: Point3) -> Vec3 {
        (point - self.position).normalize()
    }

    fn distance_to(&self, point: Point3) -> f64 {
        point.distance(self.position)
    }

    fn radius(&self) -> f64 {
        self.radius
    }

    fn position(&self) -> Option<Point3> {
        Some(self.position)
    }
}

/// A spot light: point-light attenuation narrowed into a beam around a
/// direction.
pub struct SpotLight {
    point: PointLight,
    direction: Vec3,
    narrow_beam: i32,
}

impl SpotLight {
    /// Create a spot light at `position` aimed along `direction`.
    pub fn new(intensity: Color, position: Point3, direction: Vec3) -> Self {
        Self {
            point: PointLight::new(intensity, position),
            direction: direction.normalize(),
            narrow_beam: 1,
        }
    }

    /// Set the constant attenuation coefficient.
    pub fn with_kc(mut self, kc: f64) -> Self {
        self.point = self.point.with_kc(kc);
        self
    }

    /// Set the linear attenuation coefficient.
    pub fn with_kl(mut self, kl: f64) -> Self {
        self.point = self.point.with_kl(kl);
        self
    }

    /// Set the quadratic attenuation coefficient.
    pub fn with_kq(mut self, kq: f64) -> Self {
        self.point = self.point.with_kq(kq);
        self
    }

    /// Set the area radius used for soft shadows.
    pub fn with_radius(mut self, radius: f64) -> Self {
        self.point = self.point.with_radius(radius);
        self
    }

    /// Set the beam-narrowing exponent. Higher values concentrate the light
    /// around its direction.
    pub fn with_narrow_beam(mut self, narrow_beam: i32) -> Self {
        self.narrow_beam = narrow_beam;
        self
    }
}

impl LightSource for SpotLight {
    fn intensity_at(&self, point: Point3) -> Color {
        let deflection = self.direction_to(point).dot(self.direction);
        if deflection <= 0.0 {
            return Color::ZERO;
        }
        self.point.intensity_at(point) * deflection.powi(self.narrow_beam)
    }

    fn direction_to(&self, point: Point3) -> Vec3 {
        self.point.direction_to(point)
    }

    fn distance_to(&self, point: Point3) -> f64 {
        self.point.distance_to(point)
    }

    fn radius(&self) -> f64 {
        self.point.radius()
    }

    fn position(&self) -> Option<Point3> {
        self.point.position()
    }
}

/// Uniform background illumination added once per traced ray.
pub struct AmbientLight {
    intensity: Color,
}

impl AmbientLight {
    /// No ambient light at all.
    pub const NONE: AmbientLight = AmbientLight {
        intensity: Color::ZERO,
    };

    /// Create an ambient light from a base color and a scalar attenuation.
    pub fn new(color: Color, ka: f64) -> Self {
        Self {
            intensity: color * ka,
        }
    }

    /// Create an ambient light with per-channel attenuation.
    pub fn scaled(color: Color, ka: Color) -> Self {
        Self {
            intensity: color * ka,
        }
    }

    /// The pre-scaled ambient intensity.
    pub fn intensity(&self) -> Color {
        self.intensity
    }
}
