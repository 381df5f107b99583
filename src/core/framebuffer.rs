use crate::core::color;
use nalgebra::Vector3;

/// Dense per-pixel color storage for the frame being rendered.
///
/// Colors are linear RGB in `[0, 1]`; conversion to packed pixels happens
/// once at presentation time.
#[derive(Debug, Clone)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    colors: Vec<Vector3<f32>>,
}

impl PixelBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            colors: vec![Vector3::zeros(); width * height],
        }
    }

    #[inline(always)]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline(always)]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline(always)]
    fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    pub fn clear(&mut self, color: Vector3<f32>) {
        self.colors.fill(color);
    }

    /// Writes a pixel. Out-of-bounds writes are ignored.
    #[inline]
    pub fn set_pixel(&mut self, x: usize, y: usize, color: Vector3<f32>) {
        if x < self.width && y < self.height {
            let idx = self.index(x, y);
            self.colors[idx] = color;
        }
    }

    pub fn get_pixel(&self, x: usize, y: usize) -> Option<Vector3<f32>> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.colors[self.index(x, y)])
    }

    pub fn colors(&self) -> &[Vector3<f32>] {
        &self.colors
    }

    /// Packs the buffer into ARGB8888 words, row-major.
    pub fn write_argb(&self, out: &mut [u32]) {
        for (pixel, color) in out.iter_mut().zip(&self.colors) {
            *pixel = color::to_argb(*color);
        }
    }

    pub fn to_argb(&self) -> Vec<u32> {
        let mut out = vec![0u32; self.colors.len()];
        self.write_argb(&mut out);
        out
    }
}

/// Per-pixel record of the nearest depth accepted so far this frame.
#[derive(Debug, Clone)]
pub struct DepthBuffer {
    width: usize,
    height: usize,
    depths: Vec<f32>,
}

impl DepthBuffer {
    /// Value every pixel holds right after a reset.
    pub const CLEAR_DEPTH: f32 = f32::MAX;

    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            depths: vec![Self::CLEAR_DEPTH; width * height],
        }
    }

    pub fn reset(&mut self) {
        self.depths.fill(Self::CLEAR_DEPTH);
    }

    #[inline(always)]
    fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    /// True if `depth` is strictly nearer than what is stored at `(x, y)`.
    /// Ties and out-of-bounds pixels fail.
    #[inline]
    pub fn passes(&self, x: usize, y: usize, depth: f32) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        depth < self.depths[self.index(x, y)]
    }

    #[inline]
    pub fn write(&mut self, x: usize, y: usize, depth: f32) {
        if x < self.width && y < self.height {
            let idx = self.index(x, y);
            self.depths[idx] = depth;
        }
    }

    pub fn get(&self, x: usize, y: usize) -> Option<f32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.depths[self.index(x, y)])
    }

    pub fn depths(&self) -> &[f32] {
        &self.depths
    }
}

/// The render target of the software path: color plus depth, same size.
#[derive(Debug, Clone)]
pub struct FrameBuffer {
    pub pixels: PixelBuffer,
    pub depth: DepthBuffer,
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            pixels: PixelBuffer::new(width, height),
            depth: DepthBuffer::new(width, height),
        }
    }

    #[inline(always)]
    pub fn width(&self) -> usize {
        self.pixels.width()
    }

    #[inline(always)]
    pub fn height(&self) -> usize {
        self.pixels.height()
    }

    /// Start-of-frame reset: background color everywhere, depth at the sentinel.
    pub fn clear(&mut self, color: Vector3<f32>) {
        self.pixels.clear(color);
        self.depth.reset();
    }
}

/// The surface a finished software frame is handed to, once per frame.
pub trait Presenter {
    fn present(&mut self, frame: &PixelBuffer) -> anyhow::Result<()>;
}
