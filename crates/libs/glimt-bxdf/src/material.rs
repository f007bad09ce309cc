//! Material parameters driving the shading model.

/// Parameters of the previewed material.
///
/// Both values live in `[0, 1]`; the constructor clamps, so code past this
/// boundary never has to re-validate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaterialParams {
    /// Perceptual roughness of the surface.
    pub roughness: f32,
    /// Metalness of the surface; 1 is a pure conductor.
    pub metallic: f32,
}

impl MaterialParams {
    /// Creates new material parameters, clamping both values to `[0, 1]`.
    pub fn new(roughness: f32, metallic: f32) -> Self {
        Self {
            roughness: roughness.clamp(0.0, 1.0),
            metallic: metallic.clamp(0.0, 1.0),
        }
    }
}

impl Default for MaterialParams {
    fn default() -> Self {
        Self {
            roughness: 0.5,
            metallic: 0.5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_range_values_are_clamped() {
        let params = MaterialParams::new(-0.25, 1.75);
        assert_eq!(params.roughness, 0.0);
        assert_eq!(params.metallic, 1.0);
    }

    #[test]
    fn default_is_half_rough_half_metallic() {
        assert_eq!(MaterialParams::default(), MaterialParams::new(0.5, 0.5));
    }
}
