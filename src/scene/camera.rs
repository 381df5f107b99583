use crate::core::math::transform::TransformFactory;
use nalgebra::{Matrix4, Point3, Vector3, Vector4};
use serde::Deserialize;
use std::f32::consts::FRAC_PI_2;

/// Movement and look input gathered by the host for one frame.
///
/// Axes are in `[-1, 1]`; look deltas are raw (e.g. mouse pixels) and get
/// scaled by the camera sensitivity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CameraInput {
    pub forward: f32,
    pub right: f32,
    pub up: f32,
    pub yaw_delta: f32,
    pub pitch_delta: f32,
    /// Field-of-view change in degrees.
    pub fov_delta: f32,
}

impl CameraInput {
    pub fn is_idle(&self) -> bool {
        *self == Self::default()
    }
}

/// Free-look perspective camera (Left-Handed, +Z forward).
#[derive(Debug, Clone)]
pub struct Camera {
    pub origin: Point3<f32>,
    pub near: f32,
    pub far: f32,
    pub aspect_ratio: f32,
    /// Units per second.
    pub speed: f32,
    /// Radians per unit of look delta.
    pub sensitivity: f32,

    fov_degrees: f32,
    total_yaw: f32,
    total_pitch: f32,

    forward: Vector3<f32>,
    right: Vector3<f32>,
    up: Vector3<f32>,

    view_matrix: Matrix4<f32>,
    projection_matrix: Matrix4<f32>,
}

impl Camera {
    pub const MIN_FOV: f32 = 10.0;
    pub const MAX_FOV: f32 = 120.0;
    const PITCH_LIMIT: f32 = FRAC_PI_2 - 0.01;

    pub fn new(origin: Point3<f32>, fov_degrees: f32, aspect_ratio: f32, near: f32, far: f32) -> Self {
        let mut cam = Self {
            origin,
            near,
            far,
            aspect_ratio,
            speed: 10.0,
            sensitivity: 0.005,
            fov_degrees: fov_degrees.clamp(Self::MIN_FOV, Self::MAX_FOV),
            total_yaw: 0.0,
            total_pitch: 0.0,
            forward: Vector3::z(),
            right: Vector3::x(),
            up: Vector3::y(),
            view_matrix: Matrix4::identity(),
            projection_matrix: Matrix4::identity(),
        };
        cam.update_basis();
        cam.update_matrices();
        cam
    }

    /// Integrates one frame of input into position and orientation.
    pub fn update(&mut self, elapsed: f32, input: &CameraInput) {
        if input.fov_delta != 0.0 {
            self.fov_degrees =
                (self.fov_degrees + input.fov_delta).clamp(Self::MIN_FOV, Self::MAX_FOV);
        }

        self.total_yaw += input.yaw_delta * self.sensitivity;
        self.total_pitch = (self.total_pitch + input.pitch_delta * self.sensitivity)
            .clamp(-Self::PITCH_LIMIT, Self::PITCH_LIMIT);

        // Movement follows the new heading.
        self.update_basis();

        let step = self.speed * elapsed;
        self.origin += self.forward * (input.forward * step)
            + self.right * (input.right * step)
            + Vector3::y() * (input.up * step);

        self.update_matrices();
    }

    fn update_basis(&mut self) {
        let rotation = TransformFactory::rotation_pitch_yaw(self.total_pitch, self.total_yaw);
        let forward = rotation * Vector4::new(0.0, 0.0, 1.0, 0.0);
        self.forward = Vector3::new(forward.x, forward.y, forward.z).normalize();
        self.right = Vector3::y().cross(&self.forward).normalize();
        self.up = self.forward.cross(&self.right).normalize();
    }

    /// Recalculates View and Projection matrices from the current basis.
    pub fn update_matrices(&mut self) {
        self.view_matrix = TransformFactory::view(&self.origin, &self.right, &self.up, &self.forward);
        self.projection_matrix = TransformFactory::perspective(
            self.aspect_ratio,
            self.fov_degrees.to_radians(),
            self.near,
            self.far,
        );
    }

    pub fn view_matrix(&self) -> Matrix4<f32> {
        self.view_matrix
    }

    pub fn projection_matrix(&self) -> Matrix4<f32> {
        self.projection_matrix
    }

    pub fn forward(&self) -> Vector3<f32> {
        self.forward
    }

    pub fn right(&self) -> Vector3<f32> {
        self.right
    }

    pub fn up(&self) -> Vector3<f32> {
        self.up
    }

    pub fn fov_degrees(&self) -> f32 {
        self.fov_degrees
    }
}
