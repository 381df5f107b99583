use crate::core::framebuffer::{PixelBuffer, Presenter};
use anyhow::Context;
use image::{ImageBuffer, Rgb, RgbImage};
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

/// Converts a pixel buffer to an 8-bit RGB image.
pub fn to_rgb_image(frame: &PixelBuffer) -> RgbImage {
    let width = frame.width();
    let argb = frame.to_argb();
    ImageBuffer::from_fn(width as u32, frame.height() as u32, |x, y| {
        let color_u32 = argb[(y as usize) * width + (x as usize)];
        let r = ((color_u32 >> 16) & 0xFF) as u8;
        let g = ((color_u32 >> 8) & 0xFF) as u8;
        let b = (color_u32 & 0xFF) as u8;
        Rgb([r, g, b])
    })
}

/// Saves a pixel buffer to a PNG file, creating parent directories.
pub fn save_buffer_to_image(frame: &PixelBuffer, path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    to_rgb_image(frame)
        .save(path)
        .with_context(|| format!("Failed to save image to {}", path.display()))
}

/// Headless presentation surface: writes frames as numbered PNG files.
///
/// Every `save_every`-th frame is written, and `finish` writes the last
/// presented frame to the plain output path.
pub struct PngPresenter {
    output: PathBuf,
    save_every: usize,
    frame_index: usize,
    last_frame: Option<PixelBuffer>,
}

impl PngPresenter {
    pub fn new<P: Into<PathBuf>>(output: P, save_every: usize) -> Self {
        Self {
            output: output.into(),
            save_every,
            frame_index: 0,
            last_frame: None,
        }
    }

    pub fn frames_presented(&self) -> usize {
        self.frame_index
    }

    /// `frame.png` -> `frame_0042.png`
    pub fn numbered_path(&self, index: usize) -> PathBuf {
        let stem = self
            .output
            .file_stem()
            .map_or("frame".into(), |s| s.to_string_lossy().into_owned());
        let ext = self
            .output
            .extension()
            .map_or("png".into(), |s| s.to_string_lossy().into_owned());
        self.output.with_file_name(format!("{}_{:04}.{}", stem, index, ext))
    }

    /// Writes the final frame, if any frame was presented.
    pub fn finish(&mut self) -> anyhow::Result<Option<PathBuf>> {
        let Some(frame) = self.last_frame.take() else {
            return Ok(None);
        };
        save_buffer_to_image(&frame, &self.output)?;
        info!("Final frame saved to {}", self.output.display());
        Ok(Some(self.output.clone()))
    }
}

impl Presenter for PngPresenter {
    fn present(&mut self, frame: &PixelBuffer) -> anyhow::Result<()> {
        let index = self.frame_index;
        self.frame_index += 1;

        if self.save_every > 0 && index % self.save_every == 0 {
            let path = self.numbered_path(index);
            save_buffer_to_image(frame, &path)?;
            info!("Frame {} saved to {}", index, path.display());
        }

        match self.last_frame.as_mut() {
            Some(last) if last.width() == frame.width() && last.height() == frame.height() => {
                last.clone_from(frame)
            }
            _ => self.last_frame = Some(frame.clone()),
        }
        Ok(())
    }
}
