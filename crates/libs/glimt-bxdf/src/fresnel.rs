//! Schlick approximation of the Fresnel reflectance.

use glam::Vec3;

/// Base reflectance at normal incidence of a dielectric.
pub const DIELECTRIC_F0: Vec3 = Vec3::splat(0.04);

/// Reflectance at normal incidence for the given metalness, blending the
/// dielectric baseline towards full reflectance as metallic goes to 1.
pub fn f0(metallic: f32) -> Vec3 { DIELECTRIC_F0.lerp(Vec3::ONE, metallic) }

/// Schlick's approximation of the Fresnel term.
///
/// `cos_theta` is the cosine of the angle between the half vector and the
/// view direction; negative values are treated as grazing incidence.
pub fn schlick(cos_theta: f32, f0: Vec3) -> Vec3 {
    f0 + (Vec3::ONE - f0) * (1.0 - cos_theta.max(0.0)).powi(5)
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn dielectric_f0_is_exactly_four_percent() {
        assert_eq!(f0(0.0), Vec3::splat(0.04));
    }

    #[test]
    fn fully_metallic_f0_approaches_one() {
        let f = f0(1.0);
        assert_abs_diff_eq!(f.x, 1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(f.y, 1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(f.z, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn reflectance_at_normal_incidence_is_f0() {
        let f0 = f0(0.3);
        assert_eq!(schlick(1.0, f0), f0);
    }

    #[test]
    fn reflectance_at_grazing_incidence_is_total() {
        let f = schlick(0.0, f0(0.0));
        assert_abs_diff_eq!(f.x, 1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(f.y, 1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(f.z, 1.0, epsilon = 1e-6);
    }
}
