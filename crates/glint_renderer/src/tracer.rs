//! Whitted-style recursive illumination.
//!
//! Shading at a hit combines a local Phong term per light with recursive
//! reflection and refraction. Recursion is bounded two ways: a fixed depth
//! cap, and pruning of branches whose accumulated attenuation can no
//! longer contribute visibly. Shadows attenuate by the transparency of
//! every occluder between the surface and the light, so tinted glass
//! throws tinted shadows.

use std::cell::RefCell;
use std::sync::Arc;

use glint_core::{closest_hit, Color, HitRecord, LightSource, Material, Scene};
use glint_math::{align_zero, is_zero, same_sign, Point3, Ray, Vec3};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::sample_grid::{GridShape, SampleGrid};

thread_local! {
    static SHADOW_RNG: RefCell<StdRng> = RefCell::new(StdRng::from_entropy());
}

/// Maps a primary ray to the color seen along it.
///
/// Implementations must be shareable across render threads.
pub trait RayTracer: Send + Sync {
    fn trace_ray(&self, ray: &Ray) -> Color;
}

/// Tuning knobs for the illumination recursion.
#[derive(Debug, Clone, Copy)]
pub struct TraceSettings {
    /// Maximum recursion depth for reflection and refraction; values below
    /// 1 behave as 1 (local shading only).
    pub max_depth: u32,
    /// Branches whose attenuation drops below this in every channel are
    /// pruned.
    pub min_attenuation: f64,
    /// Distance secondary rays start off the surface that spawned them.
    pub surface_bias: f64,
    /// Shadow rays per axis toward an area light; 1 keeps hard shadows.
    pub shadow_samples: u32,
}

impl Default for TraceSettings {
    fn default() -> Self {
        Self {
            max_depth: 10,
            min_attenuation: 0.001,
            surface_bias: 0.1,
            shadow_samples: 1,
        }
    }
}

impl TraceSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_min_attenuation(mut self, min_attenuation: f64) -> Self {
        self.min_attenuation = min_attenuation;
        self
    }

    pub fn with_surface_bias(mut self, surface_bias: f64) -> Self {
        self.surface_bias = surface_bias;
        self
    }

    pub fn with_shadow_samples(mut self, shadow_samples: u32) -> Self {
        self.shadow_samples = shadow_samples;
        self
    }
}

/// The standard tracer: local Phong shading plus recursive mirror
/// reflection and unbent transparency.
pub struct WhittedTracer {
    scene: Arc<Scene>,
    settings: TraceSettings,
}

impl WhittedTracer {
    pub fn new(scene: Arc<Scene>) -> Self {
        Self {
            scene,
            settings: TraceSettings::default(),
        }
    }

    pub fn with_settings(mut self, settings: TraceSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn settings(&self) -> &TraceSettings {
        &self.settings
    }

    fn closest_intersection(&self, ray: &Ray) -> Option<HitRecord<'_>> {
        let hits = self.scene.geometry.intersect(ray, f64::INFINITY)?;
        closest_hit(ray, &hits).copied()
    }

    /// Full shading at a hit: local term now, global term unless the depth
    /// budget is spent.
    fn color_at(&self, hit: &HitRecord, ray: &Ray, level: u32, k: Color) -> Color {
        let color = self.local_effects(hit, ray, k);
        if level <= 1 {
            color
        } else {
            color + self.global_effects(hit, ray, level, k)
        }
    }

    /// Emission plus the diffuse and specular contribution of every light
    /// that reaches the hit.
    fn local_effects(&self, hit: &HitRecord, ray: &Ray, k: Color) -> Color {
        let normal = hit.shape.normal_at(hit.point);
        let view = ray.direction;
        let nv = align_zero(normal.dot(view));
        let mut color = hit.shape.emission();
        if nv == 0.0 {
            return color;
        }
        let material = hit.shape.material();
        for light in &self.scene.lights {
            let to_point = light.direction_to(hit.point);
            let nl = align_zero(normal.dot(to_point));
            // Light and viewer must face the same side of the surface.
            if !same_sign(nl, nv) {
                continue;
            }
            let transparency = self.transparency(hit.point, light.as_ref(), to_point, normal);
            if below_min(transparency * k, self.settings.min_attenuation) {
                continue;
            }
            let intensity = light.intensity_at(hit.point) * transparency;
            color += intensity * (diffuse(material, nl) + specular(material, normal, to_point, nl, view));
        }
        color
    }

    /// Reflected and refracted contributions, each attenuated by its own
    /// material coefficient.
    fn global_effects(&self, hit: &HitRecord, ray: &Ray, level: u32, k: Color) -> Color {
        let normal = hit.shape.normal_at(hit.point);
        let material = hit.shape.material();
        let bias = self.settings.surface_bias;
        let nd = align_zero(normal.dot(ray.direction));
        let reflected = Ray::offset(
            hit.point,
            ray.direction - normal * (2.0 * nd),
            normal,
            bias,
        );
        // Refraction is unbent: the ray continues straight through.
        let refracted = Ray::offset(hit.point, ray.direction, normal, bias);
        self.global_contribution(&refracted, material.kt, level, k)
            + self.global_contribution(&reflected, material.kr, level, k)
    }

    fn global_contribution(&self, ray: &Ray, kx: Color, level: u32, k: Color) -> Color {
        let kkx = kx * k;
        if below_min(kkx, self.settings.min_attenuation) {
            return Color::ZERO;
        }
        match self.closest_intersection(ray) {
            None => self.scene.background * kx,
            Some(hit) => self.color_at(&hit, ray, level - 1, kkx) * kx,
        }
    }

    /// Combined transparency of everything between `point` and the light;
    /// `Color::ONE` means an unobstructed path.
    fn transparency(
        &self,
        point: Point3,
        light: &dyn LightSource,
        to_point: Vec3,
        normal: Vec3,
    ) -> Color {
        if self.settings.shadow_samples > 1 && light.radius() > 0.0 {
            if let Some(position) = light.position() {
                return self.area_transparency(point, position, light.radius(), to_point, normal);
            }
        }
        self.shadow_ray_transparency(point, -to_point, normal, light.distance_to(point))
    }

    fn shadow_ray_transparency(
        &self,
        point: Point3,
        toward_light: Vec3,
        normal: Vec3,
        distance: f64,
    ) -> Color {
        let shadow_ray = Ray::offset(point, toward_light, normal, self.settings.surface_bias);
        let mut transparency = Color::ONE;
        if let Some(hits) = self.scene.geometry.intersect(&shadow_ray, distance) {
            for hit in &hits {
                transparency *= hit.shape.material().kt;
                if below_min(transparency, self.settings.min_attenuation) {
                    return Color::ZERO;
                }
            }
        }
        transparency
    }

    /// Average transparency over jittered points on the light's disk,
    /// softening the shadow edge in proportion to the light's radius.
    fn area_transparency(
        &self,
        point: Point3,
        light_position: Point3,
        radius: f64,
        to_point: Vec3,
        normal: Vec3,
    ) -> Color {
        let (up, right) = orthonormal_basis(to_point);
        let grid = SampleGrid::new(light_position, up, right, radius * 2.0)
            .with_shape(GridShape::Disk);
        let samples = self.settings.shadow_samples as usize;
        let points = SHADOW_RNG.with(|rng| grid.points(samples, &mut *rng.borrow_mut()));
        let mut sum = Color::ZERO;
        for &sample in &points {
            let toward_light = sample - point;
            if is_zero(toward_light.length_squared()) {
                sum += Color::ONE;
                continue;
            }
            sum += self.shadow_ray_transparency(point, toward_light, normal, toward_light.length());
        }
        sum / points.len() as f64
    }
}

impl RayTracer for WhittedTracer {
    fn trace_ray(&self, ray: &Ray) -> Color {
        match self.closest_intersection(ray) {
            None => self.scene.background,
            Some(hit) => {
                self.scene.ambient.intensity()
                    + self.color_at(&hit, ray, self.settings.max_depth, Color::ONE)
            }
        }
    }
}

fn diffuse(material: &Material, nl: f64) -> Color {
    material.kd * nl.abs()
}

fn specular(material: &Material, normal: Vec3, to_point: Vec3, nl: f64, view: Vec3) -> Color {
    let reflected = to_point - normal * (2.0 * nl);
    let deflection = align_zero(-view.dot(reflected));
    if deflection <= 0.0 {
        return Color::ZERO;
    }
    material.ks * deflection.powi(material.shininess)
}

/// True when every channel of `k` is below `min`.
fn below_min(k: Color, min: f64) -> bool {
    k.x < min && k.y < min && k.z < min
}

/// Unit vectors spanning the plane orthogonal to `axis`.
fn orthonormal_basis(axis: Vec3) -> (Vec3, Vec3) {
    let pick = if axis.x.abs() > 0.9 { Vec3::Y } else { Vec3::X };
    let right = axis.cross(pick).normalize();
    let up = right.cross(axis);
    (up, right)
}
