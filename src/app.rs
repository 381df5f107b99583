use crate::io::config::Config;
use crate::io::image::PngPresenter;
use crate::io::obj_loader::load_obj;
use crate::pipeline::modes::RenderingBackend;
use crate::pipeline::renderer::Renderer;
use crate::scene::camera::CameraInput;
use crate::scene::material::{CutoutMaterial, Material, TexturedMaterial};
use crate::scene::mesh::Mesh;
use crate::scene::texture::Texture;
use crate::ui::input::{log_controls, toggle_for_key};
use log::{error, info, warn};
use std::sync::Arc;
use std::time::Instant;

/// Loads an optional texture. A missing or broken file only disables the map.
fn load_texture(path: Option<&str>) -> Option<Arc<Texture>> {
    let path = path?;
    match Texture::load(path) {
        Ok(texture) => Some(Arc::new(texture)),
        Err(e) => {
            warn!("{:#}. Falling back to material defaults.", e);
            None
        }
    }
}

/// Loads the vehicle mesh, or the built-in test triangle if it cannot be read.
pub fn load_vehicle(config: &Config) -> Mesh {
    let vehicle = &config.vehicle;
    let material = Material::Textured(TexturedMaterial {
        diffuse: load_texture(vehicle.diffuse.as_deref()),
        normal: load_texture(vehicle.normal.as_deref()),
        specular: load_texture(vehicle.specular.as_deref()),
        glossiness: load_texture(vehicle.glossiness.as_deref()),
    });

    match load_obj(&vehicle.mesh, vehicle.flip_handedness) {
        Ok((vertices, indices)) => Mesh::new(vertices, indices, material),
        Err(e) => {
            error!("Failed to load vehicle: {:#}. Using test triangle.", e);
            Mesh::create_test_triangle(material)
        }
    }
}

/// Loads the alpha-tested overlay. Without its mesh the overlay is simply
/// absent.
pub fn load_overlay(config: &Config) -> Option<Mesh> {
    let overlay = &config.overlay;
    if !overlay.enabled {
        return None;
    }
    let material = Material::Cutout(CutoutMaterial {
        diffuse: load_texture(overlay.diffuse.as_deref()),
        alpha_threshold: overlay.alpha_cutoff,
    });

    match load_obj(&overlay.mesh, overlay.flip_handedness) {
        Ok((vertices, indices)) => Some(Mesh::new(vertices, indices, material)),
        Err(e) => {
            error!("Failed to load overlay: {:#}. Overlay disabled.", e);
            None
        }
    }
}

pub fn build_renderer(config: &Config) -> Renderer {
    let render = &config.render;
    let [depth_lo, depth_hi] = render.depth_remap;
    Renderer::new(
        render.width,
        render.height,
        config.camera.build(render.aspect_ratio()),
        config.light.build(),
        load_vehicle(config),
        load_overlay(config),
        render.initial_state(),
    )
    .with_depth_range(depth_lo, depth_hi)
}

/// Runs the scripted, fixed-timestep frame loop and writes the frames.
pub fn run(config: &Config) -> anyhow::Result<()> {
    let render = &config.render;
    info!(
        "Starting headless run: {} frames at {}x{}",
        render.frames, render.width, render.height
    );
    log_controls();

    let mut renderer = build_renderer(config);
    if renderer.state().backend == RenderingBackend::Hardware {
        warn!("No hardware backend is attached; hardware frames draw nothing");
    }
    let mut presenter = PngPresenter::new(&render.output, render.save_every);

    let start = Instant::now();
    let mut last_fps_update = Instant::now();
    let mut frames_since_update = 0usize;

    for frame in 0..render.frames {
        let mut input = CameraInput::default();
        for entry in config.script_for_frame(frame) {
            for key in &entry.keys {
                match toggle_for_key(key) {
                    Some(toggle) => renderer.apply_toggle(toggle),
                    None => warn!("Unknown key '{}' in script at frame {}", key, frame),
                }
            }
            if !entry.input.is_idle() {
                input = entry.input;
            }
        }

        renderer.update(render.frame_time, &input);
        renderer.render(&mut presenter)?;

        frames_since_update += 1;
        let elapsed = last_fps_update.elapsed().as_secs_f32();
        if elapsed >= 1.0 {
            info!("FPS: {:.1}", frames_since_update as f32 / elapsed);
            frames_since_update = 0;
            last_fps_update = Instant::now();
        }
    }

    let total = start.elapsed().as_secs_f32();
    info!(
        "Rendered {} frames in {:.2}s ({:.1} FPS)",
        render.frames,
        total,
        render.frames as f32 / total.max(f32::EPSILON)
    );

    if presenter.finish()?.is_none() {
        warn!("No software frame was presented, nothing written");
    }
    Ok(())
}
