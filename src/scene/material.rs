use crate::scene::texture::Texture;
use std::sync::Arc;

/// Defines how a mesh is shaded. A closed set of kinds dispatched by the
/// shader.
#[derive(Debug, Clone)]
pub enum Material {
    /// Fully lit surface with optional diffuse, normal, specular and
    /// glossiness maps.
    Textured(TexturedMaterial),
    /// Unlit surface whose diffuse alpha cuts fragments out.
    Cutout(CutoutMaterial),
}

impl Default for Material {
    fn default() -> Self {
        Material::Textured(TexturedMaterial::default())
    }
}

/// Any map may be missing: diffuse falls back to vertex color, specular and
/// gloss to zero, and the normal map to the interpolated normal.
#[derive(Debug, Clone, Default)]
pub struct TexturedMaterial {
    pub diffuse: Option<Arc<Texture>>,
    pub normal: Option<Arc<Texture>>,
    pub specular: Option<Arc<Texture>>,
    pub glossiness: Option<Arc<Texture>>,
}

#[derive(Debug, Clone)]
pub struct CutoutMaterial {
    pub diffuse: Option<Arc<Texture>>,
    /// Fragments with alpha strictly below this are discarded.
    pub alpha_threshold: f32,
}

impl Default for CutoutMaterial {
    fn default() -> Self {
        Self {
            diffuse: None,
            alpha_threshold: 0.5,
        }
    }
}
