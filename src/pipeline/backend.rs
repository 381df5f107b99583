//! The seam to the hardware-accelerated path.
//!
//! The renderer never talks to a graphics API directly: it hands a
//! `HardwareFrame` to whatever implements `HardwareBackend` and reacts to the
//! typed errors that come back.

use crate::core::rasterizer::CullMode;
use crate::pipeline::modes::FilteringTechnique;
use nalgebra::{Matrix4, Point3, Vector3};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    /// Device, swap chain or pipeline state could not be created.
    InitializationFailed(String),
    /// The device was removed or reset mid-frame. Recoverable by
    /// releasing and initializing again.
    DeviceLost,
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendError::InitializationFailed(reason) => {
                write!(f, "hardware backend initialization failed: {}", reason)
            }
            BackendError::DeviceLost => write!(f, "hardware device lost"),
        }
    }
}

impl std::error::Error for BackendError {}

/// Everything the hardware path needs to draw one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HardwareFrame {
    pub world: Matrix4<f32>,
    pub world_view_projection: Matrix4<f32>,
    pub camera_origin: Point3<f32>,
    pub clear_color: Vector3<f32>,
    pub draw_overlay: bool,
}

/// A GPU implementation of the same scene.
///
/// Resources belong to the implementor and must be freed by `release` (or
/// on drop). After `release`, `initialize` must be callable again.
pub trait HardwareBackend {
    fn initialize(&mut self, width: usize, height: usize) -> Result<(), BackendError>;
    fn render(&mut self, frame: &HardwareFrame) -> Result<(), BackendError>;
    fn set_filtering(&mut self, filtering: FilteringTechnique);
    fn set_cull_mode(&mut self, cull_mode: CullMode);
    fn release(&mut self);
}
