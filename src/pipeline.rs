pub mod backend;
pub mod compositor;
pub mod modes;
pub mod renderer;
pub mod shaders;
