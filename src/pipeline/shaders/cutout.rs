use crate::core::geometry::Fragment;
use crate::core::pipeline::FragmentShader;
use crate::scene::material::CutoutMaterial;
use nalgebra::Vector3;

/// Unlit alpha-tested surface, used for overlays such as fire.
#[derive(Debug, Clone, Copy)]
pub struct CutoutShader<'a> {
    pub material: &'a CutoutMaterial,
}

impl FragmentShader for CutoutShader<'_> {
    fn shade(&self, fragment: &Fragment) -> Option<Vector3<f32>> {
        let Some(texture) = &self.material.diffuse else {
            return Some(fragment.color);
        };
        let rgba = texture.sample_rgba(&fragment.texcoord);
        if rgba.w < self.material.alpha_threshold {
            return None;
        }
        Some(rgba.xyz())
    }
}
