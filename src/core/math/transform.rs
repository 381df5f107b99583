use nalgebra::{Matrix4, Point2, Point3, Vector3, Vector4};

//=================================
// Transform Matrix Factory
//=================================

/// Factory for the transformation matrices used by the software pipeline.
///
/// Everything is Left-Handed (+X right, +Y up, +Z forward) and uses column
/// vectors: `clip = projection * view * world * position`.
pub struct TransformFactory;

#[rustfmt::skip]
impl TransformFactory {
    /// Creates a rotation matrix around the X-axis.
    pub fn rotation_x(angle_rad: f32) -> Matrix4<f32> {
        let c = angle_rad.cos();
        let s = angle_rad.sin();
        Matrix4::new(
            1.0, 0.0, 0.0, 0.0,
            0.0, c,  -s,   0.0,
            0.0, s,   c,   0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Creates a rotation matrix around the Y-axis.
    pub fn rotation_y(angle_rad: f32) -> Matrix4<f32> {
        let c = angle_rad.cos();
        let s = angle_rad.sin();
        Matrix4::new(
            c,   0.0, s,   0.0,
            0.0, 1.0, 0.0, 0.0,
           -s,   0.0, c,   0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Pitch (X) then yaw (Y), the order a free-look camera accumulates them in.
    pub fn rotation_pitch_yaw(pitch_rad: f32, yaw_rad: f32) -> Matrix4<f32> {
        Self::rotation_y(yaw_rad) * Self::rotation_x(pitch_rad)
    }

    /// Creates a View matrix from an orthonormal camera basis (Left-Handed).
    ///
    /// This is the inverse of the camera's own world transform: the basis is
    /// transposed and the eye position is folded into the translation column.
    pub fn view(
        eye: &Point3<f32>,
        right: &Vector3<f32>,
        up: &Vector3<f32>,
        forward: &Vector3<f32>,
    ) -> Matrix4<f32> {
        let eye = eye.coords;
        Matrix4::new(
            right.x,   right.y,   right.z,   -right.dot(&eye),
            up.x,      up.y,      up.z,      -up.dot(&eye),
            forward.x, forward.y, forward.z, -forward.dot(&eye),
            0.0,       0.0,       0.0,       1.0,
        )
    }

    /// Creates a Perspective Projection matrix (Left-Handed).
    ///
    /// View depth `[near, far]` maps to NDC z `[0, 1]` and clip w equals the
    /// view-space depth, so `1 / w` is the perspective-correct weight.
    pub fn perspective(aspect_ratio: f32, fov_y_rad: f32, near: f32, far: f32) -> Matrix4<f32> {
        let y_scale = 1.0 / (fov_y_rad / 2.0).tan();
        let x_scale = y_scale / aspect_ratio;
        let depth_scale = far / (far - near);

        Matrix4::new(
            x_scale, 0.0,     0.0,         0.0,
            0.0,     y_scale, 0.0,         0.0,
            0.0,     0.0,     depth_scale, -near * depth_scale,
            0.0,     0.0,     1.0,         0.0,
        )
    }
}

//=================================
// Core Transformation Functions
//=================================

/// Performs perspective division: Clip Space -> NDC.
///
/// Callers must have rejected `w <= 0` before dividing.
#[inline]
pub fn apply_perspective_division(clip: &Vector4<f32>) -> Point3<f32> {
    let inv_w = 1.0 / clip.w;
    Point3::new(clip.x * inv_w, clip.y * inv_w, clip.z * inv_w)
}

/// Converts NDC coordinates to Screen coordinates (Viewport Transform).
/// Note: Y-axis is flipped (NDC +Y is up, Screen +Y is down).
#[inline]
pub fn ndc_to_screen(ndc_x: f32, ndc_y: f32, width: f32, height: f32) -> Point2<f32> {
    Point2::new(
        (ndc_x + 1.0) * 0.5 * width,
        (1.0 - ndc_y) * 0.5 * height,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn perspective_maps_near_and_far_to_unit_depth() {
        let proj = TransformFactory::perspective(4.0 / 3.0, 45f32.to_radians(), 0.1, 100.0);

        let near = proj * Vector4::new(0.0, 0.0, 0.1, 1.0);
        let far = proj * Vector4::new(0.0, 0.0, 100.0, 1.0);

        assert_relative_eq!(near.z / near.w, 0.0, epsilon = 1e-5);
        assert_relative_eq!(far.z / far.w, 1.0, epsilon = 1e-5);
        assert_relative_eq!(far.w, 100.0, epsilon = 1e-4);
    }

    #[test]
    fn view_moves_eye_to_origin() {
        let eye = Point3::new(0.0, 0.0, -50.0);
        let view = TransformFactory::view(&eye, &Vector3::x(), &Vector3::y(), &Vector3::z());

        let origin = view * Point3::<f32>::origin().to_homogeneous();
        assert_relative_eq!(origin.z, 50.0, epsilon = 1e-5);

        let at_eye = view * eye.to_homogeneous();
        assert_relative_eq!(at_eye.z, 0.0, epsilon = 1e-5);
    }

    #[test]
    fn ndc_corners_map_to_screen_corners() {
        let top_left = ndc_to_screen(-1.0, 1.0, 640.0, 480.0);
        let bottom_right = ndc_to_screen(1.0, -1.0, 640.0, 480.0);

        assert_relative_eq!(top_left.x, 0.0);
        assert_relative_eq!(top_left.y, 0.0);
        assert_relative_eq!(bottom_right.x, 640.0);
        assert_relative_eq!(bottom_right.y, 480.0);
    }

    #[test]
    fn rotation_y_quarter_turn_maps_z_to_x() {
        let rotated = TransformFactory::rotation_y(std::f32::consts::FRAC_PI_2)
            * Vector4::new(0.0, 0.0, 1.0, 0.0);
        assert_relative_eq!(rotated.x, 1.0, epsilon = 1e-6);
        assert_relative_eq!(rotated.z, 0.0, epsilon = 1e-6);
    }
}
