//! Phong material coefficients.

use glint_math::Vec3;
use serde::{Deserialize, Serialize};

/// Color type alias - RGB stored as unclamped linear f64 components.
///
/// Scene files and tests follow the 0-255 convention for light and emission
/// intensities; the value is only clamped when a frame is encoded to 8-bit.
pub type Color = Vec3;

/// Phong shading coefficients of a surface.
///
/// All attenuation factors are per-channel RGB. Nothing here enforces energy
/// conservation; coefficients are applied exactly as given.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Material {
    /// Diffuse attenuation factor
    pub kd: Color,

    /// Specular attenuation factor
    pub ks: Color,

    /// Specular exponent (shininess)
    pub shininess: i32,

    /// Transparency attenuation factor, applied to refracted light
    pub kt: Color,

    /// Reflection attenuation factor, applied to mirrored light
    pub kr: Color,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            kd: Color::ZERO,
            ks: Color::ZERO,
            shininess: 1,
            kt: Color::ZERO,
            kr: Color::ZERO,
        }
    }
}

impl Material {
    /// Create a material with every coefficient at its default.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the diffuse attenuation, same factor for all channels.
    pub fn with_kd(mut self, kd: f64) -> Self {
        self.kd = Color::splat(kd);
        self
    }

    /// Set the diffuse attenuation per channel.
    pub fn with_kd_rgb(mut self, kd: Color) -> Self {
        self.kd = kd;
        self
    }

    /// Set the specular attenuation, same factor for all channels.
    pub fn with_ks(mut self, ks: f64) -> Self {
        self.ks = Color::splat(ks);
        self
    }

    /// Set the specular attenuation per channel.
    pub fn with_ks_rgb(mut self, ks: Color) -> Self {
        self.ks = ks;
        self
    }

    /// Set the specular exponent.
    pub fn with_shininess(mut self, shininess: i32) -> Self {
        self.shininess = shininess;
        self
    }

    /// Set the transparency attenuation, same factor for all channels.
    pub fn with_kt(mut self, kt: f64) -> Self {
        self.kt = Color::splat(kt);
        self
    }

    /// Set the transparency attenuation per channel.
    pub fn with_kt_rgb(mut self, kt: Color) -> Self {
        self.kt = kt;
        self
    }

    /// Set the reflection attenuation, same factor for all channels.
    pub fn with_kr(mut self, kr: f64) -> Self {
        self.kr = Color::splat(kr);
        self
    }

    /// Set the reflection attenuation per channel.
    pub fn with_kr_rgb(mut self, kr: Color) -> Self {
        self.kr = kr;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_material_is_inert() {
        let material = Material::default();
        assert_eq!(material.kd, Color::ZERO);
        assert_eq!(material.ks, Color::ZERO);
        assert_eq!(material.kt, Color::ZERO);
        assert_eq!(material.kr, Color::ZERO);
        assert_eq!(material.shininess, 1);
    }

    #[test]
    fn test_builder_setters() {
        let material = Material::new()
            .with_kd(0.5)
            .with_ks_rgb(Color::new(0.2, 0.3, 0.4))
            .with_shininess(100)
            .with_kt(0.3)
            .with_kr(0.1);
        assert_eq!(material.kd, Color::splat(0.5));
        assert_eq!(material.ks, Color::new(0.2, 0.3, 0.4));
        assert_eq!(material.shininess, 100);
        assert_eq!(material.kt, Color::splat(0.3));
        assert_eq!(material.kr, Color::splat(0.1));
    }

    #[test]
    fn test_deserialize_partial_fields() {
        let material: Material = serde_json::from_str(r#"{"kd": [0.4, 0.4, 0.4], "shininess": 50}"#)
            .expect("material should parse");
        assert_eq!(material.kd, Color::splat(0.4));
        assert_eq!(material.shininess, 50);
        assert_eq!(material.ks, Color::ZERO);
    }
}
