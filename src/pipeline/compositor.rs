use crate::core::color;
use crate::core::framebuffer::PixelBuffer;
use crate::core::rasterizer::BoundingBox;
use crate::pipeline::modes::DisplayMode;
use nalgebra::Vector3;

/// Decides what reaches the pixel buffer for the active display mode.
#[derive(Debug, Clone, Copy)]
pub struct FrameCompositor {
    pub display_mode: DisplayMode,
    /// Depth range stretched to full gray in depth-buffer display.
    pub depth_range: (f32, f32),
    /// Fill color of bounding-box display.
    pub highlight: Vector3<f32>,
}

impl Default for FrameCompositor {
    fn default() -> Self {
        Self {
            display_mode: DisplayMode::ShadingMode,
            depth_range: (0.985, 1.0),
            highlight: color::WHITE,
        }
    }
}

impl FrameCompositor {
    pub fn new(display_mode: DisplayMode, depth_range: (f32, f32)) -> Self {
        Self {
            display_mode,
            depth_range,
            ..Self::default()
        }
    }

    /// Gray level visualizing a depth value. Values at or below the range
    /// start become black.
    #[inline]
    pub fn depth_color(&self, depth: f32) -> Vector3<f32> {
        let (lo, hi) = self.depth_range;
        color::gray(color::remap(depth, lo, hi))
    }

    /// Fills the whole (inclusive) box with the highlight color.
    pub fn paint_bounding_box(&self, pixels: &mut PixelBuffer, bbox: &BoundingBox) {
        for y in bbox.min_y..=bbox.max_y {
            for x in bbox.min_x..=bbox.max_x {
                pixels.set_pixel(x, y, self.highlight);
            }
        }
    }
}
