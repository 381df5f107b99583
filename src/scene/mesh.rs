use crate::core::geometry::Vertex;
use crate::scene::material::Material;
use nalgebra::{Point3, Vector2, Vector3};

/// A collection of vertices and indices representing a 3D object.
///
/// Logically immutable once loaded; rigid motion is applied through the
/// world matrix, never by editing vertices.
#[derive(Debug, Clone)]
pub struct Mesh {
    /// List of vertices.
    pub vertices: Vec<Vertex>,
    /// List of indices defining triangles (3 indices per triangle).
    pub indices: Vec<u32>,
    pub material: Material,
}

impl Mesh {
    pub fn new(vertices: Vec<Vertex>, indices: Vec<u32>, material: Material) -> Self {
        Self {
            vertices,
            indices,
            material,
        }
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Creates a simple triangle mesh for testing purposes.
    ///
    /// Vertices are arranged clockwise as seen from -Z, facing the default
    /// camera.
    pub fn create_test_triangle(material: Material) -> Self {
        let normal = Vector3::new(0.0, 0.0, -1.0);
        let vertices = vec![
            Vertex::new(Point3::new(0.0, 10.0, 0.0), normal, Vector2::new(0.5, 0.0))
                .with_tangent(Vector3::x()),
            Vertex::new(Point3::new(10.0, -10.0, 0.0), normal, Vector2::new(1.0, 1.0))
                .with_tangent(Vector3::x()),
            Vertex::new(Point3::new(-10.0, -10.0, 0.0), normal, Vector2::new(0.0, 1.0))
                .with_tangent(Vector3::x()),
        ];

        Self::new(vertices, vec![0, 1, 2], material)
    }
}
