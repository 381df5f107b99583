use crate::core::color;
use crate::core::framebuffer::{FrameBuffer, Presenter};
use crate::core::math::transform::TransformFactory;
use crate::core::pipeline::{ScreenSpace, VertexProcessor};
use crate::core::rasterizer::{CullMode, RasterStats, Rasterizer};
use crate::pipeline::backend::{BackendError, HardwareBackend, HardwareFrame};
use crate::pipeline::compositor::FrameCompositor;
use crate::pipeline::modes::{DisplayMode, FilteringTechnique, RenderingBackend, ShadingMode};
use crate::pipeline::shaders::{MaterialShader, ShadingContext};
use crate::scene::camera::{Camera, CameraInput};
use crate::scene::light::Light;
use crate::scene::mesh::Mesh;
use log::{debug, error, info, warn};
use nalgebra::{Matrix4, Vector3};
use std::f32::consts::FRAC_PI_4;

/// One state change of the renderer, as triggered by a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    Backend,
    Rotation,
    Overlay,
    Filtering,
    ShadingMode,
    NormalMapping,
    DisplayMode,
    DepthBufferDisplay,
    BoundingBoxDisplay,
    ClearColor,
    CullMode,
}

/// Every user-switchable setting of the renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderState {
    pub backend: RenderingBackend,
    pub rotating: bool,
    pub show_overlay: bool,
    pub filtering: FilteringTechnique,
    pub shading: ShadingMode,
    pub normal_mapping: bool,
    pub display: DisplayMode,
    pub uniform_clear: bool,
    pub cull_mode: CullMode,
}

impl Default for RenderState {
    fn default() -> Self {
        Self {
            backend: RenderingBackend::Software,
            rotating: true,
            show_overlay: true,
            filtering: FilteringTechnique::Anisotropic,
            shading: ShadingMode::Combined,
            normal_mapping: true,
            display: DisplayMode::ShadingMode,
            uniform_clear: false,
            cull_mode: CullMode::Back,
        }
    }
}

impl RenderState {
    pub fn clear_color(&self) -> Vector3<f32> {
        if self.uniform_clear {
            color::CLEAR_UNIFORM
        } else {
            color::CLEAR_BLUE
        }
    }

    /// The overlay joins the software frame only in full shading.
    pub fn software_overlay_visible(&self) -> bool {
        self.show_overlay
            && self.shading == ShadingMode::Combined
            && self.display == DisplayMode::ShadingMode
    }
}

/// A mesh together with its per-frame screen-space arena.
struct SceneMesh {
    mesh: Mesh,
    screen: ScreenSpace,
}

impl SceneMesh {
    fn new(mesh: Mesh) -> Self {
        Self {
            mesh,
            screen: ScreenSpace::new(),
        }
    }
}

fn on_off(flag: bool) -> &'static str {
    if flag { "ON" } else { "OFF" }
}

/// Owns the scene, the frame buffer and both rendering paths.
pub struct Renderer {
    camera: Camera,
    light: Light,
    vehicle: SceneMesh,
    overlay: Option<SceneMesh>,
    world: Matrix4<f32>,

    framebuffer: FrameBuffer,
    vertex_processor: VertexProcessor,
    rasterizer: Rasterizer,
    depth_range: (f32, f32),
    state: RenderState,

    hardware: Option<Box<dyn HardwareBackend>>,
    initialized: bool,
}

impl Renderer {
    pub fn new(
        width: usize,
        height: usize,
        camera: Camera,
        light: Light,
        vehicle: Mesh,
        overlay: Option<Mesh>,
        state: RenderState,
    ) -> Self {
        info!(
            "Renderer {}x{}: vehicle {} triangles, overlay {}",
            width,
            height,
            vehicle.triangle_count(),
            overlay
                .as_ref()
                .map_or("none".to_string(), |m| format!("{} triangles", m.triangle_count()))
        );

        Self {
            camera,
            light,
            vehicle: SceneMesh::new(vehicle),
            overlay: overlay.map(SceneMesh::new),
            world: Matrix4::identity(),
            framebuffer: FrameBuffer::new(width, height),
            vertex_processor: VertexProcessor::new(width, height),
            rasterizer: Rasterizer::new(state.cull_mode),
            depth_range: (0.985, 1.0),
            state,
            hardware: None,
            initialized: true,
        }
    }

    pub fn with_depth_range(mut self, lo: f32, hi: f32) -> Self {
        self.depth_range = (lo, hi);
        self
    }

    pub fn state(&self) -> &RenderState {
        &self.state
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn world(&self) -> &Matrix4<f32> {
        &self.world
    }

    pub fn framebuffer(&self) -> &FrameBuffer {
        &self.framebuffer
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Attaches and initializes the hardware path. On failure the renderer
    /// is left uninitialized and renders nothing until `recover` succeeds.
    pub fn attach_hardware(&mut self, mut backend: Box<dyn HardwareBackend>) -> Result<(), BackendError> {
        let (width, height) = (self.framebuffer.width(), self.framebuffer.height());
        let result = backend.initialize(width, height);
        if result.is_ok() {
            backend.set_filtering(self.state.filtering);
            backend.set_cull_mode(self.state.cull_mode);
            info!("Hardware backend initialized");
        } else {
            self.initialized = false;
        }
        self.hardware = Some(backend);
        result
    }

    /// Re-creates the hardware resources after a failed initialization.
    pub fn recover(&mut self) -> Result<(), BackendError> {
        let (width, height) = (self.framebuffer.width(), self.framebuffer.height());
        if let Some(backend) = self.hardware.as_mut() {
            backend.release();
            backend.initialize(width, height)?;
            backend.set_filtering(self.state.filtering);
            backend.set_cull_mode(self.state.cull_mode);
        }
        self.initialized = true;
        info!("Renderer recovered");
        Ok(())
    }

    /// Releases and re-initializes the hardware path. The software path keeps
    /// running whatever the outcome.
    pub fn on_device_lost(&mut self) {
        warn!("Hardware device lost, recreating resources");
        if let Err(e) = self.recover() {
            error!("Failed to recreate hardware resources: {}", e);
            self.initialized = false;
        }
    }

    /// Advances camera and world rotation by `elapsed` seconds.
    pub fn update(&mut self, elapsed: f32, input: &CameraInput) {
        self.camera.update(elapsed, input);
        if self.state.rotating {
            self.world *= TransformFactory::rotation_y(elapsed * FRAC_PI_4);
        }
    }

    /// Renders one frame on the active backend. Software frames are handed
    /// to `presenter` exactly once.
    pub fn render<P: Presenter + ?Sized>(&mut self, presenter: &mut P) -> anyhow::Result<()> {
        if !self.initialized {
            debug!("Renderer not initialized, skipping frame");
            return Ok(());
        }

        match self.state.backend {
            RenderingBackend::Software => {
                let stats = self.render_software();
                debug!("Software frame: {:?}", stats);
                presenter.present(&self.framebuffer.pixels)
            }
            RenderingBackend::Hardware => {
                self.render_hardware();
                Ok(())
            }
        }
    }

    /// Runs the full software pipeline into the frame buffer.
    pub fn render_software(&mut self) -> RasterStats {
        self.framebuffer.clear(self.state.clear_color());

        let compositor = FrameCompositor::new(self.state.display, self.depth_range);
        let mut context = ShadingContext {
            light: &self.light,
            camera_origin: self.camera.origin,
            mode: self.state.shading,
            normal_mapping: self.state.normal_mapping,
        };

        let vehicle = &mut self.vehicle;
        self.vertex_processor.transform(
            &vehicle.mesh.vertices,
            &vehicle.mesh.indices,
            &self.world,
            &self.camera,
            &mut vehicle.screen,
        );
        let shader = MaterialShader::for_material(&vehicle.mesh.material, context);
        let mut stats = self
            .rasterizer
            .draw(&vehicle.screen, &mut self.framebuffer, &compositor, &shader);

        if self.state.software_overlay_visible()
            && let Some(overlay) = self.overlay.as_mut()
        {
            self.vertex_processor.transform(
                &overlay.mesh.vertices,
                &overlay.mesh.indices,
                &self.world,
                &self.camera,
                &mut overlay.screen,
            );
            context.normal_mapping = false;
            let shader = MaterialShader::for_material(&overlay.mesh.material, context);
            stats += Rasterizer::new(CullMode::None).draw(
                &overlay.screen,
                &mut self.framebuffer,
                &compositor,
                &shader,
            );
        }

        stats
    }

    fn render_hardware(&mut self) {
        let Some(backend) = self.hardware.as_mut() else {
            debug!("No hardware backend attached, nothing drawn");
            return;
        };

        let frame = HardwareFrame {
            world: self.world,
            world_view_projection: self.camera.projection_matrix() * self.camera.view_matrix() * self.world,
            camera_origin: self.camera.origin,
            clear_color: self.state.clear_color(),
            draw_overlay: self.state.show_overlay,
        };

        match backend.render(&frame) {
            Ok(()) => {}
            Err(BackendError::DeviceLost) => self.on_device_lost(),
            Err(e) => {
                error!("Hardware frame failed: {}", e);
                self.initialized = false;
            }
        }
    }

    /// Applies a single state change and logs the new value.
    pub fn apply_toggle(&mut self, toggle: Toggle) {
        let state = &mut self.state;
        match toggle {
            Toggle::Backend => {
                state.backend = state.backend.next();
                info!("(SHARED) Rendering backend: {}", state.backend);
            }
            Toggle::Rotation => {
                state.rotating = !state.rotating;
                info!("(SHARED) Vehicle rotation: {}", on_off(state.rotating));
            }
            Toggle::Overlay => {
                state.show_overlay = !state.show_overlay;
                info!("(SHARED) Fire overlay: {}", on_off(state.show_overlay));
            }
            Toggle::Filtering => {
                state.filtering = state.filtering.next();
                if let Some(backend) = self.hardware.as_mut() {
                    backend.set_filtering(state.filtering);
                }
                info!("(HARDWARE) Sampler filter: {}", state.filtering);
            }
            Toggle::ShadingMode => {
                // Leaving an alternate display restores shading without cycling.
                if state.display != DisplayMode::ShadingMode {
                    state.display = DisplayMode::ShadingMode;
                    info!("(SOFTWARE) Display mode: {}", state.display);
                } else {
                    state.shading = state.shading.next();
                    info!("(SOFTWARE) Shading mode: {}", state.shading);
                }
            }
            Toggle::NormalMapping => {
                state.normal_mapping = !state.normal_mapping;
                info!("(SOFTWARE) Normal map: {}", on_off(state.normal_mapping));
            }
            Toggle::DisplayMode => {
                state.display = state.display.next();
                info!("(SOFTWARE) Display mode: {}", state.display);
            }
            Toggle::DepthBufferDisplay => {
                state.display = match state.display {
                    DisplayMode::DepthBuffer => DisplayMode::ShadingMode,
                    _ => DisplayMode::DepthBuffer,
                };
                info!("(SOFTWARE) Display mode: {}", state.display);
            }
            Toggle::BoundingBoxDisplay => {
                state.display = match state.display {
                    DisplayMode::BoundingBox => DisplayMode::ShadingMode,
                    _ => DisplayMode::BoundingBox,
                };
                info!("(SOFTWARE) Display mode: {}", state.display);
            }
            Toggle::ClearColor => {
                state.uniform_clear = !state.uniform_clear;
                info!("(SHARED) Uniform clear color: {}", on_off(state.uniform_clear));
            }
            Toggle::CullMode => {
                state.cull_mode = state.cull_mode.next();
                self.rasterizer.set_cull_mode(state.cull_mode);
                if let Some(backend) = self.hardware.as_mut() {
                    backend.set_cull_mode(state.cull_mode);
                }
                info!("(SHARED) Cull mode: {}", state.cull_mode);
            }
        }
    }
}

impl Drop for Renderer {
    fn drop(&mut self) {
        if let Some(backend) = self.hardware.as_mut() {
            backend.release();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::framebuffer::{DepthBuffer, PixelBuffer};
    use crate::core::geometry::Vertex;
    use crate::core::math::transform::{apply_perspective_division, ndc_to_screen};
    use crate::scene::material::{CutoutMaterial, Material};
    use crate::scene::texture::Texture;
    use approx::assert_relative_eq;
    use nalgebra::{Point3, Vector2};
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::sync::Arc;

    #[derive(Default)]
    struct Calls {
        initialize: usize,
        render: usize,
        release: usize,
        filtering: Option<FilteringTechnique>,
        cull_mode: Option<CullMode>,
    }

    /// Fails `initialize` while `fail_init` is set, and loses the device on
    /// the next `render` while `lose_device` is set.
    struct FakeBackend {
        calls: Rc<RefCell<Calls>>,
        fail_init: Rc<RefCell<bool>>,
        lose_device: bool,
    }

    impl HardwareBackend for FakeBackend {
        fn initialize(&mut self, _width: usize, _height: usize) -> Result<(), BackendError> {
            self.calls.borrow_mut().initialize += 1;
            if *self.fail_init.borrow() {
                return Err(BackendError::InitializationFailed("no adapter".into()));
            }
            Ok(())
        }

        fn render(&mut self, _frame: &HardwareFrame) -> Result<(), BackendError> {
            self.calls.borrow_mut().render += 1;
            if std::mem::take(&mut self.lose_device) {
                return Err(BackendError::DeviceLost);
            }
            Ok(())
        }

        fn set_filtering(&mut self, filtering: FilteringTechnique) {
            self.calls.borrow_mut().filtering = Some(filtering);
        }

        fn set_cull_mode(&mut self, cull_mode: CullMode) {
            self.calls.borrow_mut().cull_mode = Some(cull_mode);
        }

        fn release(&mut self) {
            self.calls.borrow_mut().release += 1;
        }
    }

    #[derive(Default)]
    struct CountingPresenter {
        frames: usize,
        center: Option<Vector3<f32>>,
    }

    impl Presenter for CountingPresenter {
        fn present(&mut self, frame: &PixelBuffer) -> anyhow::Result<()> {
            self.frames += 1;
            self.center = frame.get_pixel(frame.width() / 2, frame.height() / 2);
            Ok(())
        }
    }

    fn renderer(state: RenderState) -> Renderer {
        let camera = Camera::new(Point3::new(0.0, 0.0, -50.0), 45.0, 640.0 / 480.0, 0.1, 100.0);
        Renderer::new(
            640,
            480,
            camera,
            Light::default(),
            Mesh::create_test_triangle(Material::default()),
            None,
            state,
        )
    }

    #[test]
    fn software_frame_is_presented_once_and_covers_the_center() {
        let mut renderer = renderer(RenderState::default());
        let mut presenter = CountingPresenter::default();

        renderer.render(&mut presenter).unwrap();

        assert_eq!(presenter.frames, 1);
        let center = presenter.center.unwrap();
        assert_ne!(center, color::CLEAR_BLUE);
    }

    #[test]
    fn shading_toggle_leaves_alternate_display_without_cycling() {
        let mut renderer = renderer(RenderState::default());
        renderer.apply_toggle(Toggle::DepthBufferDisplay);
        assert_eq!(renderer.state().display, DisplayMode::DepthBuffer);

        renderer.apply_toggle(Toggle::ShadingMode);
        assert_eq!(renderer.state().display, DisplayMode::ShadingMode);
        assert_eq!(renderer.state().shading, ShadingMode::Combined);

        renderer.apply_toggle(Toggle::ShadingMode);
        assert_eq!(renderer.state().shading, ShadingMode::ObservedArea);
    }

    #[test]
    fn shading_toggle_from_any_alternate_display_only_restores_it() {
        for display in [DisplayMode::DepthBuffer, DisplayMode::BoundingBox] {
            let mut renderer = renderer(RenderState {
                display,
                shading: ShadingMode::Diffuse,
                ..RenderState::default()
            });
            renderer.apply_toggle(Toggle::ShadingMode);
            assert_eq!(renderer.state().display, DisplayMode::ShadingMode);
            assert_eq!(renderer.state().shading, ShadingMode::Diffuse);
        }
    }

    /// Two back-facing triangles in front of the vehicle: the left one samples
    /// an opaque red texel, the one over the screen center a transparent one.
    fn cutout_overlay() -> Mesh {
        let texels = image::RgbaImage::from_fn(2, 1, |x, _| {
            if x == 0 {
                image::Rgba([255, 0, 0, 255])
            } else {
                image::Rgba([0, 255, 0, 0])
            }
        });
        let texture = Texture::from_image(image::DynamicImage::ImageRgba8(texels));
        let normal = -Vector3::z();
        let opaque = Vector2::new(0.25, 0.5);
        let clear = Vector2::new(0.75, 0.5);
        let vertices = vec![
            Vertex::new(Point3::new(-16.0, 4.0, -10.0), normal, opaque),
            Vertex::new(Point3::new(-20.0, -4.0, -10.0), normal, opaque),
            Vertex::new(Point3::new(-12.0, -4.0, -10.0), normal, opaque),
            Vertex::new(Point3::new(0.0, 3.0, -10.0), normal, clear),
            Vertex::new(Point3::new(-3.0, -3.0, -10.0), normal, clear),
            Vertex::new(Point3::new(3.0, -3.0, -10.0), normal, clear),
        ];
        let material = Material::Cutout(CutoutMaterial {
            diffuse: Some(Arc::new(texture)),
            alpha_threshold: 0.5,
        });
        Mesh::new(vertices, vec![0, 1, 2, 3, 4, 5], material)
    }

    fn overlay_renderer(state: RenderState) -> Renderer {
        let camera = Camera::new(Point3::new(0.0, 0.0, -50.0), 45.0, 640.0 / 480.0, 0.1, 100.0);
        Renderer::new(
            640,
            480,
            camera,
            Light::default(),
            Mesh::create_test_triangle(Material::default()),
            Some(cutout_overlay()),
            RenderState {
                rotating: false,
                ..state
            },
        )
    }

    fn pixel_of(renderer: &Renderer, point: Point3<f32>) -> (usize, usize) {
        let camera = renderer.camera();
        let world_view_projection = camera.projection_matrix() * camera.view_matrix() * renderer.world();
        let clip = world_view_projection * point.to_homogeneous();
        let ndc = apply_perspective_division(&clip);
        let screen = ndc_to_screen(ndc.x, ndc.y, 640.0, 480.0);
        (screen.x as usize, screen.y as usize)
    }

    #[test]
    fn overlay_is_drawn_unculled_in_combined_shading() {
        let mut renderer = overlay_renderer(RenderState::default());
        let stats = renderer.render_software();

        // Vehicle plus both overlay triangles, despite their back-facing winding.
        assert_eq!(stats.drawn, 3);
        assert_eq!(stats.culled, 0);
        assert!(stats.discarded > 0);

        let (x, y) = pixel_of(&renderer, Point3::new(-16.0, -4.0 / 3.0, -10.0));
        let framebuffer = renderer.framebuffer();
        assert_relative_eq!(framebuffer.pixels.get_pixel(x, y).unwrap(), Vector3::new(1.0, 0.0, 0.0));
        assert!(framebuffer.depth.get(x, y).unwrap() < DepthBuffer::CLEAR_DEPTH);
    }

    #[test]
    fn cut_out_texels_leave_color_and_depth_untouched() {
        let mut reference = overlay_renderer(RenderState {
            show_overlay: false,
            ..RenderState::default()
        });
        reference.render_software();
        let mut renderer = overlay_renderer(RenderState::default());
        renderer.render_software();

        let (x, y) = pixel_of(&renderer, Point3::new(0.0, -1.0, -10.0));
        let expected = reference.framebuffer();
        let actual = renderer.framebuffer();
        // The vehicle is behind the transparent triangle here.
        assert!(expected.depth.get(x, y).unwrap() < DepthBuffer::CLEAR_DEPTH);
        assert_eq!(actual.pixels.get_pixel(x, y), expected.pixels.get_pixel(x, y));
        assert_eq!(actual.depth.get(x, y), expected.depth.get(x, y));
    }

    #[test]
    fn overlay_is_skipped_outside_combined_shading_mode() {
        let states = [
            RenderState {
                shading: ShadingMode::ObservedArea,
                ..RenderState::default()
            },
            RenderState {
                display: DisplayMode::DepthBuffer,
                ..RenderState::default()
            },
            RenderState {
                display: DisplayMode::BoundingBox,
                ..RenderState::default()
            },
            RenderState {
                show_overlay: false,
                ..RenderState::default()
            },
        ];
        for state in states {
            let mut renderer = overlay_renderer(state);
            let stats = renderer.render_software();
            assert_eq!(stats.drawn, 1, "{state:?}");

            let (x, y) = pixel_of(&renderer, Point3::new(-16.0, -4.0 / 3.0, -10.0));
            let framebuffer = renderer.framebuffer();
            assert_eq!(framebuffer.pixels.get_pixel(x, y), Some(state.clear_color()));
            assert_eq!(framebuffer.depth.get(x, y), Some(DepthBuffer::CLEAR_DEPTH));
        }
    }

    #[test]
    fn display_shortcuts_toggle_back_to_shading() {
        let mut renderer = renderer(RenderState::default());
        renderer.apply_toggle(Toggle::BoundingBoxDisplay);
        assert_eq!(renderer.state().display, DisplayMode::BoundingBox);
        renderer.apply_toggle(Toggle::DepthBufferDisplay);
        assert_eq!(renderer.state().display, DisplayMode::DepthBuffer);
        renderer.apply_toggle(Toggle::DepthBufferDisplay);
        assert_eq!(renderer.state().display, DisplayMode::ShadingMode);
    }

    #[test]
    fn rotation_advances_the_world_only_when_enabled() {
        let mut renderer = renderer(RenderState::default());
        renderer.update(2.0, &CameraInput::default());
        // Two seconds at PI/4 per second: a quarter turn around Y.
        assert_relative_eq!(
            *renderer.world(),
            TransformFactory::rotation_y(std::f32::consts::FRAC_PI_2),
            epsilon = 1e-5
        );

        renderer.apply_toggle(Toggle::Rotation);
        let before = *renderer.world();
        renderer.update(1.0, &CameraInput::default());
        assert_eq!(*renderer.world(), before);
    }

    #[test]
    fn failed_initialization_skips_rendering_until_recovered() {
        let calls = Rc::new(RefCell::new(Calls::default()));
        let fail_init = Rc::new(RefCell::new(true));
        let mut renderer = renderer(RenderState::default());

        let result = renderer.attach_hardware(Box::new(FakeBackend {
            calls: calls.clone(),
            fail_init: fail_init.clone(),
            lose_device: false,
        }));
        assert!(matches!(result, Err(BackendError::InitializationFailed(_))));
        assert!(!renderer.is_initialized());

        let mut presenter = CountingPresenter::default();
        renderer.render(&mut presenter).unwrap();
        assert_eq!(presenter.frames, 0);

        *fail_init.borrow_mut() = false;
        renderer.recover().unwrap();
        assert!(renderer.is_initialized());
        renderer.render(&mut presenter).unwrap();
        assert_eq!(presenter.frames, 1);
        assert_eq!(calls.borrow().initialize, 2);
    }

    #[test]
    fn device_lost_recreates_hardware_resources() {
        let calls = Rc::new(RefCell::new(Calls::default()));
        let mut renderer = renderer(RenderState {
            backend: RenderingBackend::Hardware,
            ..RenderState::default()
        });
        renderer
            .attach_hardware(Box::new(FakeBackend {
                calls: calls.clone(),
                fail_init: Rc::new(RefCell::new(false)),
                lose_device: true,
            }))
            .unwrap();

        let mut presenter = CountingPresenter::default();
        renderer.render(&mut presenter).unwrap();
        renderer.render(&mut presenter).unwrap();

        let calls = calls.borrow();
        assert_eq!(calls.render, 2);
        assert_eq!(calls.release, 1);
        assert_eq!(calls.initialize, 2);
        assert!(renderer.is_initialized());
        // Hardware frames never reach the software presenter.
        assert_eq!(presenter.frames, 0);
    }

    #[test]
    fn toggles_forward_sampler_and_culling_to_the_backend() {
        let calls = Rc::new(RefCell::new(Calls::default()));
        let mut renderer = renderer(RenderState::default());
        renderer
            .attach_hardware(Box::new(FakeBackend {
                calls: calls.clone(),
                fail_init: Rc::new(RefCell::new(false)),
                lose_device: false,
            }))
            .unwrap();

        renderer.apply_toggle(Toggle::Filtering);
        renderer.apply_toggle(Toggle::CullMode);

        assert_eq!(calls.borrow().filtering, Some(FilteringTechnique::Point));
        assert_eq!(calls.borrow().cull_mode, Some(CullMode::Front));
    }
}
