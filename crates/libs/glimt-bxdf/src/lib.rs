//! Microfacet BRDF models and utilities for the glimt material preview.
//!
//! The crate hosts the CPU side of the shading model: the
//! Trowbridge-Reitz (GGX) distribution with the Smith geometry term, the
//! Schlick Fresnel approximation and the combined Cook-Torrance
//! evaluator. The WGSL shader in the application crate mirrors this math
//! term for term.

pub mod brdf;
pub mod distro;
pub mod fresnel;
pub mod material;

pub use brdf::{CookTorranceBrdf, PointLight};
pub use material::MaterialParams;
