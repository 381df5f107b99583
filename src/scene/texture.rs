use anyhow::Context;
use image::{DynamicImage, RgbaImage};
use log::info;
use nalgebra::{Vector2, Vector3, Vector4};
use std::path::Path;

/// Represents a 2D texture map held in CPU memory.
#[derive(Debug, Clone)]
pub struct Texture {
    pub image: RgbaImage,
    pub width: u32,
    pub height: u32,
}

impl Texture {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let img = image::open(path_ref)
            .with_context(|| format!("Failed to load texture {}", path_ref.display()))?;
        let texture = Self::from_image(img);

        info!(
            "Loaded texture: {:?} ({}x{})",
            path_ref, texture.width, texture.height
        );

        Ok(texture)
    }

    pub fn from_image(img: DynamicImage) -> Self {
        let image = img.into_rgba8();
        Self {
            width: image.width(),
            height: image.height(),
            image,
        }
    }

    /// A texture where every texel has the same RGBA value.
    pub fn solid(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        Self::from_image(DynamicImage::ImageRgba8(RgbaImage::from_pixel(
            width,
            height,
            image::Rgba(rgba),
        )))
    }

    /// Nearest-texel lookup. UVs outside `[0, 1]` clamp to the border texel.
    #[inline]
    fn texel(&self, uv: &Vector2<f32>) -> [u8; 4] {
        let max_x = self.width.saturating_sub(1) as f32;
        let max_y = self.height.saturating_sub(1) as f32;
        let x = (uv.x * self.width as f32).floor().clamp(0.0, max_x) as u32;
        let y = (uv.y * self.height as f32).floor().clamp(0.0, max_y) as u32;
        self.image.get_pixel(x, y).0
    }

    /// Samples RGB in `[0, 1]`.
    pub fn sample(&self, uv: &Vector2<f32>) -> Vector3<f32> {
        let [r, g, b, _] = self.texel(uv);
        Vector3::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
    }

    /// Samples RGBA in `[0, 1]`.
    pub fn sample_rgba(&self, uv: &Vector2<f32>) -> Vector4<f32> {
        let [r, g, b, a] = self.texel(uv);
        Vector4::new(
            r as f32 / 255.0,
            g as f32 / 255.0,
            b as f32 / 255.0,
            a as f32 / 255.0,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn checker() -> Texture {
        // 2x2: red, green / blue, transparent white
        let mut img = RgbaImage::new(2, 2);
        img.put_pixel(0, 0, image::Rgba([255, 0, 0, 255]));
        img.put_pixel(1, 0, image::Rgba([0, 255, 0, 255]));
        img.put_pixel(0, 1, image::Rgba([0, 0, 255, 255]));
        img.put_pixel(1, 1, image::Rgba([255, 255, 255, 0]));
        Texture::from_image(DynamicImage::ImageRgba8(img))
    }

    #[test]
    fn sampling_picks_the_nearest_texel() {
        let tex = checker();
        assert_eq!(tex.sample(&Vector2::new(0.25, 0.25)), Vector3::new(1.0, 0.0, 0.0));
        assert_eq!(tex.sample(&Vector2::new(0.75, 0.25)), Vector3::new(0.0, 1.0, 0.0));
        assert_eq!(tex.sample(&Vector2::new(0.25, 0.75)), Vector3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn out_of_range_uvs_clamp_to_the_border() {
        let tex = checker();
        assert_eq!(tex.sample(&Vector2::new(-3.0, -0.5)), Vector3::new(1.0, 0.0, 0.0));
        assert_eq!(tex.sample(&Vector2::new(1.0, 0.0)), Vector3::new(0.0, 1.0, 0.0));
        assert_relative_eq!(tex.sample_rgba(&Vector2::new(5.0, 5.0)).w, 0.0);
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(Texture::load("does/not/exist.png").is_err());
    }
}
