use crate::pipeline::renderer::Toggle;
use log::info;

/// Function-key bindings of the toggle surface.
pub const KEY_BINDINGS: [(&str, Toggle, &str); 11] = [
    ("F1", Toggle::Backend, "Toggle software / hardware backend"),
    ("F2", Toggle::Rotation, "Toggle vehicle rotation"),
    ("F3", Toggle::Overlay, "Toggle fire overlay"),
    ("F4", Toggle::Filtering, "Cycle sampler filter (hardware)"),
    ("F5", Toggle::ShadingMode, "Cycle shading mode (software)"),
    ("F6", Toggle::NormalMapping, "Toggle normal map (software)"),
    ("F7", Toggle::DepthBufferDisplay, "Toggle depth buffer display (software)"),
    ("F8", Toggle::BoundingBoxDisplay, "Toggle bounding box display (software)"),
    ("F9", Toggle::CullMode, "Cycle cull mode"),
    ("F10", Toggle::ClearColor, "Toggle uniform clear color"),
    ("F11", Toggle::DisplayMode, "Cycle display mode (software)"),
];

/// Looks up the toggle bound to a key name, ignoring case.
pub fn toggle_for_key(key: &str) -> Option<Toggle> {
    let key = key.trim();
    KEY_BINDINGS
        .iter()
        .find(|(name, _, _)| name.eq_ignore_ascii_case(key))
        .map(|(_, toggle, _)| *toggle)
}

pub fn log_controls() {
    info!("Controls:");
    for (key, _, description) in KEY_BINDINGS {
        info!("  [{}] {}", key, description);
    }
}
