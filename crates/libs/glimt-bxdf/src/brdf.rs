//! Cook-Torrance reflectance with a single point light.

use crate::{distro::TrowbridgeReitzDistribution, fresnel, material::MaterialParams};
use glam::Vec3;
use std::f32::consts::PI;

/// Epsilon guarding the specular denominator when both N·V and N·L
/// approach zero.
pub const SPECULAR_DENOM_EPS: f32 = 1.0e-3;

/// A point light with a position and an RGB colour.
#[derive(Debug, Clone, Copy)]
pub struct PointLight {
    /// Position of the light in the surface's space.
    pub position: Vec3,
    /// Linear RGB colour of the light.
    pub colour: Vec3,
}

/// Cook-Torrance specular plus an energy-conserving Lambertian-like
/// diffuse lobe; single point light, no ambient and no image-based
/// lighting.
#[derive(Debug, Clone, Copy)]
pub struct CookTorranceBrdf {
    distro: TrowbridgeReitzDistribution,
    metallic: f32,
}

impl CookTorranceBrdf {
    /// Creates a new evaluator for the given material parameters.
    pub fn new(params: MaterialParams) -> Self {
        Self {
            distro: TrowbridgeReitzDistribution::new(params.roughness),
            metallic: params.metallic,
        }
    }

    /// Evaluates the outgoing radiance at a surface point lit by `light`
    /// and seen from `cam_pos`.
    ///
    /// The result is linear radiance: non-negative and finite in all three
    /// channels, neither tone-mapped nor gamma-corrected.
    pub fn eval(&self, frag_pos: Vec3, normal: Vec3, cam_pos: Vec3, light: &PointLight) -> Vec3 {
        let n = normal.normalize();
        let v = (cam_pos - frag_pos).normalize();
        let l = (light.position - frag_pos).normalize();
        let h = (v + l).normalize();

        let n_dot_v = n.dot(v).max(0.0);
        let n_dot_l = n.dot(l).max(0.0);

        let d = self.distro.eval_ndf(n.dot(h));
        let g = self.distro.eval_geometry(n_dot_v, n_dot_l);
        let f = fresnel::schlick(h.dot(v).max(0.0), fresnel::f0(self.metallic));

        let specular = f * (d * g) / (4.0 * n_dot_v * n_dot_l + SPECULAR_DENOM_EPS);
        // Whatever is reflected specularly is not refracted into the
        // diffuse lobe, and conductors have no diffuse lobe at all.
        let diffuse = (Vec3::ONE - f) * (1.0 - self.metallic) * light.colour / PI;
        (diffuse + specular) * light.colour * n_dot_l
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use proptest::prelude::*;

    const CAM_POS: Vec3 = Vec3::new(0.0, 0.0, 3.0);
    const LIGHT: PointLight = PointLight {
        position: Vec3::new(10.0, 10.0, 10.0),
        colour: Vec3::ONE,
    };

    proptest! {
        #[test]
        fn radiance_is_finite_and_non_negative(
            roughness in 0.0f32..=1.0,
            metallic in 0.0f32..=1.0,
            x in -1.0f32..=1.0,
            y in -1.0f32..=1.0,
        ) {
            let brdf = CookTorranceBrdf::new(MaterialParams::new(roughness, metallic));
            let out = brdf.eval(Vec3::new(x, y, 0.0), Vec3::Z, CAM_POS, &LIGHT);
            for channel in out.to_array() {
                prop_assert!(channel.is_finite());
                prop_assert!(channel >= 0.0);
            }
        }
    }

    #[test]
    fn fully_metallic_radiance_is_pure_specular() {
        // With metallic = 1 the diffuse weight (1 - F)(1 - metallic) is
        // exactly zero, so the radiance reduces to D·G·F weighted by the
        // light colour and N·L.
        for i in 0..=10 {
            let roughness = i as f32 / 10.0;
            let brdf = CookTorranceBrdf::new(MaterialParams::new(roughness, 1.0));
            let out = brdf.eval(Vec3::ZERO, Vec3::Z, CAM_POS, &LIGHT);

            let n = Vec3::Z;
            let v = (CAM_POS - Vec3::ZERO).normalize();
            let l = (LIGHT.position - Vec3::ZERO).normalize();
            let h = (v + l).normalize();
            let n_dot_v = n.dot(v).max(0.0);
            let n_dot_l = n.dot(l).max(0.0);
            let distro = TrowbridgeReitzDistribution::new(roughness);
            let specular = fresnel::schlick(h.dot(v).max(0.0), fresnel::f0(1.0))
                * (distro.eval_ndf(n.dot(h)) * distro.eval_geometry(n_dot_v, n_dot_l))
                / (4.0 * n_dot_v * n_dot_l + SPECULAR_DENOM_EPS);
            let expected = specular * LIGHT.colour * n_dot_l;

            assert_abs_diff_eq!(out.x, expected.x, epsilon = 1e-6);
            assert_abs_diff_eq!(out.y, expected.y, epsilon = 1e-6);
            assert_abs_diff_eq!(out.z, expected.z, epsilon = 1e-6);
        }
    }

    #[test]
    fn fully_metallic_radiance_scales_linearly_with_light_colour() {
        // The diffuse lobe is quadratic in the light colour while the
        // specular lobe is linear; with no diffuse left the doubling of the
        // light must exactly double the radiance.
        let brdf = CookTorranceBrdf::new(MaterialParams::new(0.4, 1.0));
        let doubled = PointLight {
            position: LIGHT.position,
            colour: LIGHT.colour * 2.0,
        };
        let single = brdf.eval(Vec3::ZERO, Vec3::Z, CAM_POS, &LIGHT);
        let double = brdf.eval(Vec3::ZERO, Vec3::Z, CAM_POS, &doubled);
        assert_relative_eq!(double.x, 2.0 * single.x, max_relative = 1e-5);
        assert_relative_eq!(double.y, 2.0 * single.y, max_relative = 1e-5);
        assert_relative_eq!(double.z, 2.0 * single.z, max_relative = 1e-5);
    }

    #[test]
    fn light_behind_the_surface_contributes_nothing() {
        let brdf = CookTorranceBrdf::new(MaterialParams::default());
        let behind = PointLight {
            position: Vec3::new(3.0, 0.0, -10.0),
            colour: Vec3::ONE,
        };
        assert_eq!(brdf.eval(Vec3::ZERO, Vec3::Z, CAM_POS, &behind), Vec3::ZERO);
    }
}
