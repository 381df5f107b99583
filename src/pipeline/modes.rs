//! Closed sets of renderer states and their cycling order.

use serde::Deserialize;
use std::fmt;

/// Which pipeline renders the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderingBackend {
    #[default]
    Software,
    Hardware,
}

impl RenderingBackend {
    pub fn next(self) -> Self {
        match self {
            Self::Software => Self::Hardware,
            Self::Hardware => Self::Software,
        }
    }
}

/// Lighting model used by the software shader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShadingMode {
    ObservedArea,
    Diffuse,
    Specular,
    #[default]
    Combined,
}

impl ShadingMode {
    pub fn next(self) -> Self {
        match self {
            Self::ObservedArea => Self::Diffuse,
            Self::Diffuse => Self::Specular,
            Self::Specular => Self::Combined,
            Self::Combined => Self::ObservedArea,
        }
    }
}

/// What the compositor writes for an accepted fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayMode {
    #[default]
    ShadingMode,
    DepthBuffer,
    BoundingBox,
}

impl DisplayMode {
    pub fn next(self) -> Self {
        match self {
            Self::ShadingMode => Self::DepthBuffer,
            Self::DepthBuffer => Self::BoundingBox,
            Self::BoundingBox => Self::ShadingMode,
        }
    }
}

/// Sampler filter of the hardware path. The software path always samples
/// the nearest texel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilteringTechnique {
    Point,
    Linear,
    #[default]
    Anisotropic,
}

impl FilteringTechnique {
    pub fn next(self) -> Self {
        match self {
            Self::Point => Self::Linear,
            Self::Linear => Self::Anisotropic,
            Self::Anisotropic => Self::Point,
        }
    }
}

macro_rules! upper_display {
    ($($ty:ty),*) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    let name = format!("{:?}", self);
                    write!(f, "{}", name.to_uppercase())
                }
            }
        )*
    };
}

upper_display!(RenderingBackend, ShadingMode, DisplayMode, FilteringTechnique);
