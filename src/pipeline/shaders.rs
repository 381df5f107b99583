pub mod cutout;
pub mod lit;

use crate::core::geometry::Fragment;
use crate::core::pipeline::FragmentShader;
use crate::pipeline::modes::ShadingMode;
use crate::scene::light::Light;
use crate::scene::material::Material;
use nalgebra::{Point3, Vector3};

pub use cutout::CutoutShader;
pub use lit::LitShader;

/// Per-frame state every material shader reads.
#[derive(Debug, Clone, Copy)]
pub struct ShadingContext<'a> {
    pub light: &'a Light,
    pub camera_origin: Point3<f32>,
    pub mode: ShadingMode,
    pub normal_mapping: bool,
}

/// Picks the shader matching a material kind.
#[derive(Debug, Clone, Copy)]
pub enum MaterialShader<'a> {
    Lit(LitShader<'a>),
    Cutout(CutoutShader<'a>),
}

impl<'a> MaterialShader<'a> {
    pub fn for_material(material: &'a Material, context: ShadingContext<'a>) -> Self {
        match material {
            Material::Textured(textured) => MaterialShader::Lit(LitShader {
                material: textured,
                light: context.light,
                camera_origin: context.camera_origin,
                mode: context.mode,
                normal_mapping: context.normal_mapping,
            }),
            Material::Cutout(cutout) => MaterialShader::Cutout(CutoutShader { material: cutout }),
        }
    }
}

impl FragmentShader for MaterialShader<'_> {
    #[inline]
    fn shade(&self, fragment: &Fragment) -> Option<Vector3<f32>> {
        match self {
            MaterialShader::Lit(shader) => shader.shade(fragment),
            MaterialShader::Cutout(shader) => shader.shade(fragment),
        }
    }
}
