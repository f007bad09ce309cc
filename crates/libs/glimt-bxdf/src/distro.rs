//! Microfacet distribution and masking-shadowing terms.

use std::f32::consts::PI;

/// Smallest roughness accepted by the distribution.
///
/// A roughness of zero collapses the GGX lobe to a delta and the NDF
/// denominator to zero; the constructor clamps against it.
pub const MIN_ROUGHNESS: f32 = 1.0e-3;

/// Isotropic Trowbridge-Reitz (GGX) microfacet distribution.
///
/// $$ D(\mathbf{h}) = \frac{\alpha^2}{\pi((\mathbf{n}\cdot\mathbf{h})^2
/// (\alpha^2 - 1) + 1)^2} $$
///
/// where $\alpha$ = roughness².
#[derive(Debug, Clone, Copy)]
pub struct TrowbridgeReitzDistribution {
    /// Perceptual roughness in `[MIN_ROUGHNESS, 1]`.
    pub roughness: f32,
}

impl TrowbridgeReitzDistribution {
    /// Creates a new distribution with the given roughness, clamped away
    /// from zero.
    pub fn new(roughness: f32) -> Self {
        Self {
            roughness: roughness.clamp(MIN_ROUGHNESS, 1.0),
        }
    }

    /// Evaluates the normal distribution function for the given cosine of
    /// the angle between the macro normal and the half vector.
    pub fn eval_ndf(&self, n_dot_h: f32) -> f32 {
        let alpha2 = sqr(sqr(self.roughness));
        let n_dot_h = n_dot_h.max(0.0);
        let denom = sqr(n_dot_h) * (alpha2 - 1.0) + 1.0;
        alpha2 / (PI * sqr(denom))
    }

    /// Evaluates the Smith masking-shadowing term as the product of the
    /// Schlick-GGX approximations for the view and light directions, with
    /// k = (roughness + 1)² / 8.
    pub fn eval_geometry(&self, n_dot_v: f32, n_dot_l: f32) -> f32 {
        let k = sqr(self.roughness + 1.0) / 8.0;
        eval_geometry_schlick_ggx(n_dot_v.max(0.0), k)
            * eval_geometry_schlick_ggx(n_dot_l.max(0.0), k)
    }
}

/// Schlick-GGX approximation of the geometry term for a single direction.
fn eval_geometry_schlick_ggx(n_dot_x: f32, k: f32) -> f32 { n_dot_x / (n_dot_x * (1.0 - k) + k) }

/// Squares the given value.
pub(crate) fn sqr(x: f32) -> f32 { x * x }
