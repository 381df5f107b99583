//! A dual-backend real-time renderer.
//!
//! The software path in this crate reimplements every fixed-function stage a
//! GPU normally performs: vertex transformation, perspective-correct triangle
//! rasterization, depth testing, per-pixel shading, texture and normal-map
//! sampling and the depth / bounding-box visualizations. The hardware path is
//! an external collaborator reached through [`pipeline::backend::HardwareBackend`].

pub mod app;
pub mod core;
pub mod io;
pub mod pipeline;
pub mod scene;
pub mod ui;
