use crate::core::color;
use crate::core::geometry::Fragment;
use crate::core::pipeline::FragmentShader;
use crate::pipeline::modes::ShadingMode;
use crate::scene::light::Light;
use crate::scene::material::TexturedMaterial;
use nalgebra::{Point3, Vector3};

const NORMALIZE_EPS: f32 = 1e-6;

/// Lambert diffuse plus Blinn-Phong specular under one directional light.
///
/// The active `ShadingMode` selects which terms reach the output.
#[derive(Debug, Clone, Copy)]
pub struct LitShader<'a> {
    pub material: &'a TexturedMaterial,
    pub light: &'a Light,
    pub camera_origin: Point3<f32>,
    pub mode: ShadingMode,
    pub normal_mapping: bool,
}

impl<'a> LitShader<'a> {
    /// World-space shading normal, perturbed by the normal map when enabled.
    pub fn surface_normal(&self, fragment: &Fragment) -> Vector3<f32> {
        let normal = fragment
            .normal
            .try_normalize(NORMALIZE_EPS)
            .unwrap_or(-Vector3::z());

        if !self.normal_mapping {
            return normal;
        }
        let Some(map) = &self.material.normal else {
            return normal;
        };
        // Without a usable tangent there is no TBN basis to map into.
        let Some(tangent) = fragment.tangent.try_normalize(NORMALIZE_EPS) else {
            return normal;
        };

        // [0, 1] -> [-1, 1]
        let sample = map.sample(&fragment.texcoord) * 2.0 - Vector3::repeat(1.0);
        let bitangent = normal.cross(&tangent);
        (tangent * sample.x + bitangent * sample.y + normal * sample.z)
            .try_normalize(NORMALIZE_EPS)
            .unwrap_or(normal)
    }

    fn albedo(&self, fragment: &Fragment) -> Vector3<f32> {
        match &self.material.diffuse {
            Some(texture) => texture.sample(&fragment.texcoord),
            None => fragment.color,
        }
    }

    pub fn diffuse(&self, fragment: &Fragment, observed_area: f32) -> Vector3<f32> {
        self.albedo(fragment) * (self.light.diffuse_intensity() * observed_area)
    }

    /// Zero unless both the specular and the glossiness map are bound.
    pub fn specular(&self, fragment: &Fragment, normal: &Vector3<f32>, observed_area: f32) -> Vector3<f32> {
        let (Some(specular_map), Some(gloss_map)) = (&self.material.specular, &self.material.glossiness) else {
            return Vector3::zeros();
        };
        let ks = specular_map.sample(&fragment.texcoord);
        let gloss = gloss_map.sample(&fragment.texcoord).x;

        let to_eye = (self.camera_origin - fragment.world_position)
            .try_normalize(NORMALIZE_EPS)
            .unwrap_or(-Vector3::z());
        let half_vector = (self.light.to_light() + to_eye)
            .try_normalize(NORMALIZE_EPS)
            .unwrap_or(*normal);

        let strength = normal.dot(&half_vector).max(0.0).powf(gloss * self.light.shininess);
        ks * (strength * observed_area)
    }
}

impl FragmentShader for LitShader<'_> {
    fn shade(&self, fragment: &Fragment) -> Option<Vector3<f32>> {
        let normal = self.surface_normal(fragment);
        let observed_area = self.light.observed_area(&normal);

        let color = match self.mode {
            ShadingMode::ObservedArea => color::gray(observed_area),
            ShadingMode::Diffuse => self.diffuse(fragment, observed_area),
            ShadingMode::Specular => self.specular(fragment, &normal, observed_area),
            ShadingMode::Combined => color::saturate(
                self.light.ambient
                    + self.diffuse(fragment, observed_area)
                    + self.specular(fragment, &normal, observed_area),
            ),
        };
        Some(color)
    }
}
