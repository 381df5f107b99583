use crate::core::framebuffer::FrameBuffer;
use crate::core::geometry::{Fragment, ScreenVertex};
use crate::core::math::interpolation::{
    edge_values, is_inside_triangle, perspective_correct_weights, signed_area, EPSILON,
};
use crate::core::pipeline::{FragmentShader, ScreenSpace};
use crate::pipeline::compositor::FrameCompositor;
use crate::pipeline::modes::DisplayMode;
use nalgebra::{Point2, Point3, Vector3};
use serde::Deserialize;
use std::fmt;
use std::ops::AddAssign;

/// Which screen-space winding gets rejected before scan conversion.
///
/// Clockwise on screen (positive signed area) is the front face.
#[derive(PartialEq, Eq, Copy, Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CullMode {
    #[default]
    Back,
    Front,
    None,
}

impl CullMode {
    pub fn next(self) -> Self {
        match self {
            CullMode::Back => CullMode::Front,
            CullMode::Front => CullMode::None,
            CullMode::None => CullMode::Back,
        }
    }

    /// True if a triangle with this signed area must be skipped.
    #[inline]
    pub fn culls(self, signed_area: f32) -> bool {
        match self {
            CullMode::Back => signed_area < 0.0,
            CullMode::Front => signed_area > 0.0,
            CullMode::None => false,
        }
    }
}

impl fmt::Display for CullMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CullMode::Back => "BACK",
            CullMode::Front => "FRONT",
            CullMode::None => "NONE",
        };
        f.write_str(name)
    }
}

/// Inclusive pixel rectangle, already clamped to the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub min_x: usize,
    pub min_y: usize,
    pub max_x: usize,
    pub max_y: usize,
}

impl BoundingBox {
    /// Floor of the minimum and ceil of the maximum corner, clamped to
    /// `[0, width) x [0, height)`. `None` if the box misses the target.
    pub fn of_points(points: &[Point2<f32>; 3], width: usize, height: usize) -> Option<Self> {
        if width == 0 || height == 0 {
            return None;
        }
        let min_x = points[0].x.min(points[1].x).min(points[2].x).floor();
        let min_y = points[0].y.min(points[1].y).min(points[2].y).floor();
        let max_x = points[0].x.max(points[1].x).max(points[2].x).ceil();
        let max_y = points[0].y.max(points[1].y).max(points[2].y).ceil();

        // Scissor Test
        if max_x < 0.0 || max_y < 0.0 || min_x >= width as f32 || min_y >= height as f32 {
            return None;
        }

        Some(Self {
            min_x: min_x.max(0.0) as usize,
            min_y: min_y.max(0.0) as usize,
            max_x: (max_x as usize).min(width - 1),
            max_y: (max_y as usize).min(height - 1),
        })
    }
}

/// Counters of one rasterization pass, for debug logging.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RasterStats {
    pub drawn: usize,
    pub culled: usize,
    pub degenerate: usize,
    pub fragments: usize,
    pub discarded: usize,
}

impl AddAssign for RasterStats {
    fn add_assign(&mut self, rhs: Self) {
        self.drawn += rhs.drawn;
        self.culled += rhs.culled;
        self.degenerate += rhs.degenerate;
        self.fragments += rhs.fragments;
        self.discarded += rhs.discarded;
    }
}

/// The Rasterizer is responsible for drawing triangles onto the FrameBuffer.
#[derive(Debug, Clone, Default)]
pub struct Rasterizer {
    pub cull_mode: CullMode,
}

impl Rasterizer {
    pub fn new(cull_mode: CullMode) -> Self {
        Self { cull_mode }
    }

    pub fn set_cull_mode(&mut self, mode: CullMode) {
        self.cull_mode = mode;
    }

    /// Rasterizes every triangle of one mesh's screen-space data.
    pub fn draw<S: FragmentShader>(
        &self,
        screen: &ScreenSpace,
        framebuffer: &mut FrameBuffer,
        compositor: &FrameCompositor,
        shader: &S,
    ) -> RasterStats {
        let mut stats = RasterStats::default();
        for triangle in &screen.triangles {
            stats += self.rasterize_triangle(screen.corners(triangle), framebuffer, compositor, shader);
        }
        stats
    }

    /// Scan-converts a single triangle.
    ///
    /// Coverage uses the three edge functions at each pixel center of the
    /// bounding box. Attributes are interpolated perspective-correctly, while
    /// depth is interpolated linearly in screen space.
    pub fn rasterize_triangle<S: FragmentShader>(
        &self,
        corners: [&ScreenVertex; 3],
        framebuffer: &mut FrameBuffer,
        compositor: &FrameCompositor,
        shader: &S,
    ) -> RasterStats {
        let mut stats = RasterStats::default();
        let [v0, v1, v2] = corners;
        let points = [v0.position, v1.position, v2.position];

        // 1. Degenerate & Backface Culling
        let area = signed_area(points[0], points[1], points[2]);
        if area.abs() < EPSILON {
            stats.degenerate = 1;
            return stats;
        }
        if self.cull_mode.culls(area) {
            stats.culled = 1;
            return stats;
        }

        // 2. Bounding Box
        let Some(bbox) = BoundingBox::of_points(&points, framebuffer.width(), framebuffer.height())
        else {
            return stats;
        };
        stats.drawn = 1;

        if compositor.display_mode == DisplayMode::BoundingBox {
            compositor.paint_bounding_box(&mut framebuffer.pixels, &bbox);
            return stats;
        }

        let inv_area = 1.0 / area;
        let inv_w = [v0.inv_w, v1.inv_w, v2.inv_w];
        let depths = Vector3::new(v0.depth, v1.depth, v2.depth);

        // 3. Pixel Loop
        for y in bbox.min_y..=bbox.max_y {
            for x in bbox.min_x..=bbox.max_x {
                let pixel_center = Point2::new(x as f32 + 0.5, y as f32 + 0.5);
                let edges = edge_values(pixel_center, points[0], points[1], points[2]);
                if !is_inside_triangle(edges, area) {
                    continue;
                }
                let weights = edges * inv_area;

                // Screen-space linear depth, standard z-buffer convention.
                let depth = weights.dot(&depths);
                if !(0.0..=1.0).contains(&depth) || !framebuffer.depth.passes(x, y, depth) {
                    continue;
                }

                let color = if compositor.display_mode == DisplayMode::DepthBuffer {
                    compositor.depth_color(depth)
                } else {
                    let Some(corrected) = perspective_correct_weights(weights, inv_w) else {
                        continue;
                    };
                    let fragment = interpolate_fragment(x, y, depth, corrected, &corners);
                    match shader.shade(&fragment) {
                        Some(color) => color,
                        None => {
                            stats.discarded += 1;
                            continue;
                        }
                    }
                };

                framebuffer.depth.write(x, y, depth);
                framebuffer.pixels.set_pixel(x, y, color);
                stats.fragments += 1;
            }
        }

        stats
    }
}

/// Blends the three vertices' attributes with already perspective-corrected
/// weights.
#[inline]
fn interpolate_fragment(
    x: usize,
    y: usize,
    depth: f32,
    w: Vector3<f32>,
    corners: &[&ScreenVertex; 3],
) -> Fragment {
    let [a, b, c] = *corners;
    Fragment {
        x,
        y,
        depth,
        normal: a.normal * w.x + b.normal * w.y + c.normal * w.z,
        tangent: a.tangent * w.x + b.tangent * w.y + c.tangent * w.z,
        texcoord: a.texcoord * w.x + b.texcoord * w.y + c.texcoord * w.z,
        color: a.color * w.x + b.color * w.y + c.color * w.z,
        world_position: Point3::from(
            a.world_position.coords * w.x + b.world_position.coords * w.y + c.world_position.coords * w.z,
        ),
    }
}
