use crate::core::geometry::Vertex;
use anyhow::Context;
use log::{info, warn};
use nalgebra::{Point3, Vector2, Vector3};
use std::path::Path;

const TANGENT_EPS: f32 = 1e-8;

/// Loads an OBJ file into one flat vertex array and a triangle index list.
///
/// All models in the file are merged. With `flip_handedness` the data is
/// converted from right-handed OBJ space: z is negated, the winding of every
/// triangle is swapped and `v` is flipped. Tangents are always generated.
pub fn load_obj<P: AsRef<Path>>(path: P, flip_handedness: bool) -> anyhow::Result<(Vec<Vertex>, Vec<u32>)> {
    let path = path.as_ref();
    info!("Loading OBJ file: {}", path.display());

    let load_options = tobj::LoadOptions {
        triangulate: true,
        single_index: true, // Important: Unifies indices for Position/Normal/UV
        ..Default::default()
    };

    let (models, _materials) = tobj::load_obj(path, &load_options)
        .with_context(|| format!("Failed to load OBJ {}", path.display()))?;

    let (vertices, indices) = merge_models(&models, flip_handedness);
    if indices.is_empty() {
        anyhow::bail!("OBJ {} contains no triangles", path.display());
    }

    info!(
        "OBJ loaded successfully. Total vertices: {}, Total triangles: {}",
        vertices.len(),
        indices.len() / 3
    );

    Ok((vertices, indices))
}

fn merge_models(models: &[tobj::Model], flip_handedness: bool) -> (Vec<Vertex>, Vec<u32>) {
    let mut vertices = Vec::new();
    let mut indices = Vec::new();

    for model in models {
        let mesh = &model.mesh;
        let index_offset = vertices.len() as u32;
        let num_vertices = mesh.positions.len() / 3;
        let has_normals = mesh.normals.len() == mesh.positions.len();
        let has_texcoords = mesh.texcoords.len() / 2 == num_vertices;
        let has_colors = mesh.vertex_color.len() == mesh.positions.len();

        if !has_normals {
            warn!(
                "Mesh '{}' is missing normals. Using default (0, 0, -1).",
                model.name
            );
        }

        let z_sign = if flip_handedness { -1.0 } else { 1.0 };

        for i in 0..num_vertices {
            let position = Point3::new(
                mesh.positions[i * 3],
                mesh.positions[i * 3 + 1],
                mesh.positions[i * 3 + 2] * z_sign,
            );
            let normal = if has_normals {
                Vector3::new(
                    mesh.normals[i * 3],
                    mesh.normals[i * 3 + 1],
                    mesh.normals[i * 3 + 2] * z_sign,
                )
            } else {
                -Vector3::z()
            };
            let texcoord = if has_texcoords {
                let (u, v) = (mesh.texcoords[i * 2], mesh.texcoords[i * 2 + 1]);
                Vector2::new(u, if flip_handedness { 1.0 - v } else { v })
            } else {
                Vector2::zeros()
            };

            let mut vertex = Vertex::new(position, normal, texcoord);
            if has_colors {
                vertex = vertex.with_color(Vector3::new(
                    mesh.vertex_color[i * 3],
                    mesh.vertex_color[i * 3 + 1],
                    mesh.vertex_color[i * 3 + 2],
                ));
            }
            vertices.push(vertex);
        }

        for tri in mesh.indices.chunks_exact(3) {
            let (a, b, c) = (tri[0] + index_offset, tri[1] + index_offset, tri[2] + index_offset);
            if flip_handedness {
                indices.extend_from_slice(&[a, c, b]);
            } else {
                indices.extend_from_slice(&[a, b, c]);
            }
        }
    }

    compute_tangents(&mut vertices, &indices);
    (vertices, indices)
}

/// Per-vertex tangents from UV derivatives, accumulated over the adjacent
/// triangles and Gram-Schmidt orthogonalized against the normal.
pub fn compute_tangents(vertices: &mut [Vertex], indices: &[u32]) {
    let mut accumulated = vec![Vector3::<f32>::zeros(); vertices.len()];

    for tri in indices.chunks_exact(3) {
        let [i0, i1, i2] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
        if i0 >= vertices.len() || i1 >= vertices.len() || i2 >= vertices.len() {
            continue;
        }
        let (v0, v1, v2) = (&vertices[i0], &vertices[i1], &vertices[i2]);

        let edge1 = v1.position - v0.position;
        let edge2 = v2.position - v0.position;
        let duv1 = v1.texcoord - v0.texcoord;
        let duv2 = v2.texcoord - v0.texcoord;

        let det = duv1.x * duv2.y - duv2.x * duv1.y;
        if det.abs() < TANGENT_EPS {
            continue;
        }
        let tangent = (edge1 * duv2.y - edge2 * duv1.y) / det;

        accumulated[i0] += tangent;
        accumulated[i1] += tangent;
        accumulated[i2] += tangent;
    }

    for (vertex, tangent) in vertices.iter_mut().zip(accumulated) {
        let normal = vertex.normal;
        let orthogonal = tangent - normal * normal.dot(&tangent);
        vertex.tangent = orthogonal
            .try_normalize(TANGENT_EPS)
            .unwrap_or_else(|| fallback_tangent(&normal));
    }
}

/// Any unit vector perpendicular to `normal`.
fn fallback_tangent(normal: &Vector3<f32>) -> Vector3<f32> {
    let helper = if normal.x.abs() < 0.9 { Vector3::x() } else { Vector3::y() };
    let tangent = helper - normal * normal.dot(&helper);
    tangent.try_normalize(TANGENT_EPS).unwrap_or(helper)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::fs;
    use std::path::PathBuf;

    const TRIANGLE_OBJ: &str = "\
v 0 0 0
v 1 0 0
v 0 1 0
vt 0 0
vt 1 0
vt 0 1
vn 0 0 1
f 1/1/1 2/2/1 3/3/1
";

    fn write_temp(name: &str, content: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("dual_rasterizer_{}_{}.obj", name, std::process::id()));
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn right_handed_data_is_converted() {
        let path = write_temp("flip", TRIANGLE_OBJ);
        let (vertices, indices) = load_obj(&path, true).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(vertices.len(), 3);
        assert_eq!(indices, vec![0, 2, 1]);
        assert_relative_eq!(vertices[0].normal, Vector3::new(0.0, 0.0, -1.0));
        assert_relative_eq!(vertices[0].texcoord, Vector2::new(0.0, 1.0));
        // u still grows along +x after the mirror.
        for v in &vertices {
            assert_relative_eq!(v.tangent, Vector3::x(), epsilon = 1e-5);
        }
    }

    #[test]
    fn data_is_kept_without_conversion() {
        let path = write_temp("keep", TRIANGLE_OBJ);
        let (vertices, indices) = load_obj(&path, false).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(indices, vec![0, 1, 2]);
        assert_relative_eq!(vertices[0].normal, Vector3::new(0.0, 0.0, 1.0));
        assert_relative_eq!(vertices[2].texcoord, Vector2::new(0.0, 1.0));
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(load_obj("does/not/exist.obj", true).is_err());
    }

    #[test]
    fn tangents_are_orthogonal_to_the_normal() {
        let normal = Vector3::new(0.0, 1.0, 1.0).normalize();
        let mut vertices = vec![
            Vertex::new(Point3::new(0.0, 0.0, 0.0), normal, Vector2::new(0.0, 0.0)),
            Vertex::new(Point3::new(1.0, 0.0, 0.0), normal, Vector2::new(1.0, 0.0)),
            Vertex::new(Point3::new(0.0, 1.0, -1.0), normal, Vector2::new(0.0, 1.0)),
        ];
        compute_tangents(&mut vertices, &[0, 1, 2]);
        for v in &vertices {
            assert_relative_eq!(v.tangent.dot(&v.normal), 0.0, epsilon = 1e-5);
            assert_relative_eq!(v.tangent.norm(), 1.0, epsilon = 1e-5);
        }
    }

    #[test]
    fn degenerate_uvs_fall_back_to_a_perpendicular_tangent() {
        let normal = -Vector3::z();
        let mut vertices = vec![
            Vertex::new(Point3::new(0.0, 0.0, 0.0), normal, Vector2::zeros()),
            Vertex::new(Point3::new(1.0, 0.0, 0.0), normal, Vector2::zeros()),
            Vertex::new(Point3::new(0.0, 1.0, 0.0), normal, Vector2::zeros()),
        ];
        compute_tangents(&mut vertices, &[0, 1, 2]);
        assert_relative_eq!(vertices[0].tangent, Vector3::x());
    }
}
