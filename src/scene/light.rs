use nalgebra::Vector3;
use std::f32::consts::PI;

/// The fixed lighting environment of the software shader: one directional
/// light plus a constant ambient term.
#[derive(Debug, Clone)]
pub struct Light {
    /// Direction the light travels in (normalized).
    pub direction: Vector3<f32>,
    /// Radiant intensity fed through a Lambert BRDF.
    pub intensity: f32,
    pub ambient: Vector3<f32>,
    /// Base specular exponent, scaled per pixel by the glossiness map.
    pub shininess: f32,
}

impl Default for Light {
    fn default() -> Self {
        Self::new(Vector3::new(0.577, -0.577, 0.577), 7.0)
    }
}

impl Light {
    pub fn new(direction: Vector3<f32>, intensity: f32) -> Self {
        Self {
            direction: direction.normalize(),
            intensity,
            ambient: Vector3::new(0.03, 0.03, 0.03),
            shininess: 25.0,
        }
    }

    /// Direction FROM a surface point TO the light.
    #[inline]
    pub fn to_light(&self) -> Vector3<f32> {
        -self.direction
    }

    /// Clamped cosine between a surface normal and the incoming light.
    #[inline]
    pub fn observed_area(&self, normal: &Vector3<f32>) -> f32 {
        normal.dot(&self.to_light()).clamp(0.0, 1.0)
    }

    /// Lambert-normalized light intensity used by the diffuse term.
    #[inline]
    pub fn diffuse_intensity(&self) -> f32 {
        self.intensity / PI
    }
}
