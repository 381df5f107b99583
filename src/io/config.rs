use crate::core::rasterizer::CullMode;
use crate::pipeline::modes::{DisplayMode, FilteringTechnique, RenderingBackend, ShadingMode};
use crate::pipeline::renderer::RenderState;
use crate::scene::camera::{Camera, CameraInput};
use crate::scene::light::Light;
use anyhow::Context;
use nalgebra::{Point3, Vector3};
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub camera: CameraConfig,
    #[serde(default)]
    pub light: LightConfig,
    #[serde(default)]
    pub vehicle: VehicleConfig,
    #[serde(default)]
    pub overlay: OverlayConfig,
    /// Scripted input, replayed by frame index.
    #[serde(default)]
    pub script: Vec<ScriptEntry>,
}

#[derive(Debug, Deserialize)]
pub struct RenderConfig {
    // --- Output ---
    #[serde(default = "default_width")]
    pub width: usize,
    #[serde(default = "default_height")]
    pub height: usize,
    #[serde(default = "default_frames")]
    pub frames: usize,
    /// Simulated seconds per frame.
    #[serde(default = "default_frame_time")]
    pub frame_time: f32,
    #[serde(default = "default_output")]
    pub output: String,
    /// Every N-th frame is written; the last frame always is. 0 keeps only
    /// the last one.
    #[serde(default = "default_save_every")]
    pub save_every: usize,

    // --- Initial Toggle States ---
    #[serde(default)]
    pub backend: RenderingBackend,
    #[serde(default = "default_true")]
    pub rotating: bool,
    #[serde(default = "default_true")]
    pub show_overlay: bool,
    #[serde(default)]
    pub filtering: FilteringTechnique,
    #[serde(default)]
    pub shading: ShadingMode,
    #[serde(default = "default_true")]
    pub normal_mapping: bool,
    #[serde(default)]
    pub display: DisplayMode,
    #[serde(default = "default_false")]
    pub uniform_clear: bool,
    #[serde(default)]
    pub cull_mode: CullMode,

    // --- Debug Views ---
    #[serde(default = "default_depth_remap")]
    pub depth_remap: [f32; 2],
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            frames: default_frames(),
            frame_time: default_frame_time(),
            output: default_output(),
            save_every: default_save_every(),
            backend: RenderingBackend::default(),
            rotating: true,
            show_overlay: true,
            filtering: FilteringTechnique::default(),
            shading: ShadingMode::default(),
            normal_mapping: true,
            display: DisplayMode::default(),
            uniform_clear: false,
            cull_mode: CullMode::default(),
            depth_remap: default_depth_remap(),
        }
    }
}

impl RenderConfig {
    pub fn initial_state(&self) -> RenderState {
        RenderState {
            backend: self.backend,
            rotating: self.rotating,
            show_overlay: self.show_overlay,
            filtering: self.filtering,
            shading: self.shading,
            normal_mapping: self.normal_mapping,
            display: self.display,
            uniform_clear: self.uniform_clear,
            cull_mode: self.cull_mode,
        }
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }
}

fn default_width() -> usize {
    640
}
fn default_height() -> usize {
    480
}
fn default_frames() -> usize {
    120
}
fn default_frame_time() -> f32 {
    1.0 / 60.0
}
fn default_output() -> String {
    "output/frame.png".to_string()
}
fn default_save_every() -> usize {
    30
}
fn default_depth_remap() -> [f32; 2] {
    [0.985, 1.0]
}
fn default_false() -> bool {
    false
}
fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize)]
pub struct CameraConfig {
    #[serde(default = "default_camera_position")]
    pub position: [f32; 3],
    #[serde(default = "default_fov")]
    pub fov: f32,
    #[serde(default = "default_near")]
    pub near: f32,
    #[serde(default = "default_far")]
    pub far: f32,
    #[serde(default = "default_speed")]
    pub speed: f32,
    #[serde(default = "default_sensitivity")]
    pub sensitivity: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: default_camera_position(),
            fov: default_fov(),
            near: default_near(),
            far: default_far(),
            speed: default_speed(),
            sensitivity: default_sensitivity(),
        }
    }
}

impl CameraConfig {
    pub fn build(&self, aspect_ratio: f32) -> Camera {
        let [x, y, z] = self.position;
        let mut camera = Camera::new(Point3::new(x, y, z), self.fov, aspect_ratio, self.near, self.far);
        camera.speed = self.speed;
        camera.sensitivity = self.sensitivity;
        camera
    }
}

fn default_camera_position() -> [f32; 3] {
    [0.0, 0.0, -50.0]
}
fn default_fov() -> f32 {
    45.0
}
fn default_near() -> f32 {
    0.1
}
fn default_far() -> f32 {
    100.0
}
fn default_speed() -> f32 {
    10.0
}
fn default_sensitivity() -> f32 {
    0.005
}

#[derive(Debug, Deserialize)]
pub struct LightConfig {
    #[serde(default = "default_light_direction")]
    pub direction: [f32; 3],
    #[serde(default = "default_light_intensity")]
    pub intensity: f32,
    #[serde(default = "default_ambient")]
    pub ambient: [f32; 3],
    #[serde(default = "default_shininess")]
    pub shininess: f32,
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            direction: default_light_direction(),
            intensity: default_light_intensity(),
            ambient: default_ambient(),
            shininess: default_shininess(),
        }
    }
}

impl LightConfig {
    pub fn build(&self) -> Light {
        let mut light = Light::new(Vector3::from(self.direction), self.intensity);
        light.ambient = Vector3::from(self.ambient);
        light.shininess = self.shininess;
        light
    }
}

fn default_light_direction() -> [f32; 3] {
    [0.577, -0.577, 0.577]
}
fn default_light_intensity() -> f32 {
    7.0
}
fn default_ambient() -> [f32; 3] {
    [0.03, 0.03, 0.03]
}
fn default_shininess() -> f32 {
    25.0
}

#[derive(Debug, Deserialize)]
pub struct VehicleConfig {
    #[serde(default = "default_vehicle_mesh")]
    pub mesh: String,
    pub diffuse: Option<String>,
    pub normal: Option<String>,
    pub specular: Option<String>,
    pub glossiness: Option<String>,
    /// Converts right-handed OBJ data to the renderer's left-handed space.
    #[serde(default = "default_true")]
    pub flip_handedness: bool,
}

impl Default for VehicleConfig {
    fn default() -> Self {
        Self {
            mesh: default_vehicle_mesh(),
            diffuse: Some("resources/vehicle_diffuse.png".to_string()),
            normal: Some("resources/vehicle_normal.png".to_string()),
            specular: Some("resources/vehicle_specular.png".to_string()),
            glossiness: Some("resources/vehicle_gloss.png".to_string()),
            flip_handedness: true,
        }
    }
}

fn default_vehicle_mesh() -> String {
    "resources/vehicle.obj".to_string()
}

#[derive(Debug, Deserialize)]
pub struct OverlayConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_overlay_mesh")]
    pub mesh: String,
    pub diffuse: Option<String>,
    #[serde(default = "default_alpha_cutoff")]
    pub alpha_cutoff: f32,
    #[serde(default = "default_true")]
    pub flip_handedness: bool,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            mesh: default_overlay_mesh(),
            diffuse: Some("resources/fireFX_diffuse.png".to_string()),
            alpha_cutoff: default_alpha_cutoff(),
            flip_handedness: true,
        }
    }
}

fn default_overlay_mesh() -> String {
    "resources/fireFX.obj".to_string()
}
fn default_alpha_cutoff() -> f32 {
    0.5
}

/// Key presses and camera input injected at one frame.
#[derive(Debug, Clone, Deserialize)]
pub struct ScriptEntry {
    pub frame: usize,
    /// Key names such as `"F5"`, applied in order.
    #[serde(default)]
    pub keys: Vec<String>,
    #[serde(default)]
    pub input: CameraInput,
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    pub fn parse(content: &str) -> anyhow::Result<Self> {
        let config: Config = toml::from_str(content)?;
        if config.render.width == 0 || config.render.height == 0 {
            anyhow::bail!(
                "Render size must be non-zero, got {}x{}",
                config.render.width,
                config.render.height
            );
        }
        if Vector3::from(config.light.direction).norm() < 1e-6 {
            anyhow::bail!("Light direction must be non-zero, got {:?}", config.light.direction);
        }
        let (near, far) = (config.camera.near, config.camera.far);
        if !(near > 0.0 && near < far) {
            anyhow::bail!("Clip planes must satisfy 0 < near < far, got near {near}, far {far}");
        }
        Ok(config)
    }

    /// Script entries for one frame, in file order.
    pub fn script_for_frame(&self, frame: usize) -> impl Iterator<Item = &ScriptEntry> {
        self.script.iter().filter(move |entry| entry.frame == frame)
    }
}
