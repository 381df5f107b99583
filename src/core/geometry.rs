use nalgebra::{Point2, Point3, Vector2, Vector3};

/// Represents a single vertex in model space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    /// Position in local object space.
    pub position: Point3<f32>,
    /// Normal vector for lighting calculations.
    pub normal: Vector3<f32>,
    /// Tangent vector (xyz) for Normal Mapping.
    pub tangent: Vector3<f32>,
    /// Texture coordinates (UV).
    pub texcoord: Vector2<f32>,
    /// Base color, used when no diffuse texture is bound.
    pub color: Vector3<f32>,
}

impl Vertex {
    pub fn new(position: Point3<f32>, normal: Vector3<f32>, texcoord: Vector2<f32>) -> Self {
        Self {
            position,
            normal,
            tangent: Vector3::zeros(),
            texcoord,
            color: Vector3::new(1.0, 1.0, 1.0),
        }
    }

    pub fn with_tangent(mut self, tangent: Vector3<f32>) -> Self {
        self.tangent = tangent;
        self
    }

    pub fn with_color(mut self, color: Vector3<f32>) -> Self {
        self.color = color;
        self
    }
}

/// A vertex after the full model -> screen transform of the current frame.
///
/// Attributes are stored undivided; the rasterizer weights them by `inv_w`
/// so that interpolation stays perspective-correct.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenVertex {
    /// Pixel coordinates, +Y pointing down.
    pub position: Point2<f32>,
    /// NDC depth in `[0, 1]`, nearer is smaller.
    pub depth: f32,
    /// `1 / clip_w`. Zero marks a vertex that was behind the camera.
    pub inv_w: f32,
    pub normal: Vector3<f32>,
    pub tangent: Vector3<f32>,
    pub texcoord: Vector2<f32>,
    pub color: Vector3<f32>,
    pub world_position: Point3<f32>,
}

impl ScreenVertex {
    /// A screen vertex with neutral attributes, mostly useful to feed the
    /// rasterizer directly.
    pub fn new(x: f32, y: f32, depth: f32, inv_w: f32) -> Self {
        Self {
            position: Point2::new(x, y),
            depth,
            inv_w,
            normal: Vector3::new(0.0, 0.0, -1.0),
            tangent: Vector3::x(),
            texcoord: Vector2::zeros(),
            color: Vector3::new(1.0, 1.0, 1.0),
            world_position: Point3::origin(),
        }
    }

    pub fn with_color(mut self, color: Vector3<f32>) -> Self {
        self.color = color;
        self
    }

    /// True if the source vertex ended up in front of the camera (clip w > 0).
    #[inline]
    pub fn is_in_front(&self) -> bool {
        self.inv_w > 0.0
    }
}

/// One face of a mesh: three indices into its vertex array.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Triangle {
    pub indices: [u32; 3],
}

impl Triangle {
    pub fn new(i0: u32, i1: u32, i2: u32) -> Self {
        Self {
            indices: [i0, i1, i2],
        }
    }
}

/// Interpolated attributes of one covered, depth-accepted pixel.
#[derive(Debug, Clone, Copy)]
pub struct Fragment {
    pub x: usize,
    pub y: usize,
    pub depth: f32,
    pub normal: Vector3<f32>,
    pub tangent: Vector3<f32>,
    pub texcoord: Vector2<f32>,
    pub color: Vector3<f32>,
    pub world_position: Point3<f32>,
}
