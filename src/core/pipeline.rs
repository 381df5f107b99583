use crate::core::geometry::{Fragment, ScreenVertex, Triangle, Vertex};
use crate::core::math::transform::{apply_perspective_division, ndc_to_screen};
use crate::scene::camera::Camera;
use log::debug;
use nalgebra::{Matrix4, Point3, Vector3};

/// The programmable per-pixel stage of the software pipeline.
///
/// Returning `None` discards the fragment: neither color nor depth is
/// written for it.
pub trait FragmentShader {
    fn shade(&self, fragment: &Fragment) -> Option<Vector3<f32>>;
}

impl<F> FragmentShader for F
where
    F: Fn(&Fragment) -> Option<Vector3<f32>>,
{
    fn shade(&self, fragment: &Fragment) -> Option<Vector3<f32>> {
        self(fragment)
    }
}

/// Per-mesh, per-frame screen-space data.
///
/// Entirely re-derived every frame; the vectors are cleared rather than
/// dropped so their allocations are reused.
#[derive(Debug, Default)]
pub struct ScreenSpace {
    pub vertices: Vec<ScreenVertex>,
    pub triangles: Vec<Triangle>,
}

impl ScreenSpace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
        self.triangles.clear();
    }

    /// The three screen vertices of a triangle produced by the same frame.
    #[inline]
    pub fn corners(&self, triangle: &Triangle) -> [&ScreenVertex; 3] {
        let [i0, i1, i2] = triangle.indices;
        [
            &self.vertices[i0 as usize],
            &self.vertices[i1 as usize],
            &self.vertices[i2 as usize],
        ]
    }
}

/// Model space -> screen space, once per vertex per frame.
#[derive(Debug, Clone, Copy)]
pub struct VertexProcessor {
    pub width: usize,
    pub height: usize,
}

impl VertexProcessor {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// Transforms every vertex of the mesh and assembles the triangles that
    /// survive the behind-the-camera test into `out`.
    pub fn transform(
        &self,
        vertices: &[Vertex],
        indices: &[u32],
        world: &Matrix4<f32>,
        camera: &Camera,
        out: &mut ScreenSpace,
    ) {
        out.clear();
        out.vertices.reserve(vertices.len());

        let view_projection = camera.projection_matrix() * camera.view_matrix();
        let world_view_projection = view_projection * world;
        // Rigid transforms only: the upper 3x3 rotates normals and tangents.
        let rotation = world.fixed_view::<3, 3>(0, 0);
        let width = self.width as f32;
        let height = self.height as f32;

        for vertex in vertices {
            let world_pos_homo = world * vertex.position.to_homogeneous();
            let world_position = Point3::new(world_pos_homo.x, world_pos_homo.y, world_pos_homo.z);
            let clip = world_view_projection * vertex.position.to_homogeneous();

            let normal = rotation * vertex.normal;
            let tangent = rotation * vertex.tangent;

            let screen = if clip.w > 0.0 {
                let ndc = apply_perspective_division(&clip);
                let pixel = ndc_to_screen(ndc.x, ndc.y, width, height);
                ScreenVertex {
                    position: pixel,
                    depth: ndc.z,
                    inv_w: 1.0 / clip.w,
                    normal,
                    tangent,
                    texcoord: vertex.texcoord,
                    color: vertex.color,
                    world_position,
                }
            } else {
                // Behind the camera: inv_w = 0 marks it for triangle rejection.
                ScreenVertex {
                    inv_w: 0.0,
                    normal,
                    tangent,
                    texcoord: vertex.texcoord,
                    color: vertex.color,
                    world_position,
                    ..ScreenVertex::new(0.0, 0.0, 0.0, 0.0)
                }
            };
            out.vertices.push(screen);
        }

        let vertex_count = out.vertices.len();
        let mut dropped_behind = 0usize;
        let mut dropped_invalid = 0usize;

        for chunk in indices.chunks_exact(3) {
            let triangle = Triangle::new(chunk[0], chunk[1], chunk[2]);
            if triangle.indices.iter().any(|&i| i as usize >= vertex_count) {
                dropped_invalid += 1;
                continue;
            }
            let all_in_front = out.corners(&triangle).iter().all(|v| v.is_in_front());
            if !all_in_front {
                dropped_behind += 1;
                continue;
            }
            out.triangles.push(triangle);
        }

        if dropped_behind > 0 || dropped_invalid > 0 {
            debug!(
                "Vertex stage dropped {} triangles behind the camera and {} with invalid indices",
                dropped_behind, dropped_invalid
            );
        }
    }
}
