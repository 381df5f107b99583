use nalgebra::Vector3;

pub const WHITE: Vector3<f32> = Vector3::new(1.0, 1.0, 1.0);
pub const BLACK: Vector3<f32> = Vector3::new(0.0, 0.0, 0.0);

/// Uniform gray background.
pub const CLEAR_UNIFORM: Vector3<f32> = Vector3::new(0.1, 0.1, 0.1);
/// Cornflower-blue background.
pub const CLEAR_BLUE: Vector3<f32> = Vector3::new(0.39, 0.59, 0.93);

/// Clamps every channel to `[0, 1]`.
#[inline]
pub fn saturate(color: Vector3<f32>) -> Vector3<f32> {
    Vector3::new(
        color.x.clamp(0.0, 1.0),
        color.y.clamp(0.0, 1.0),
        color.z.clamp(0.0, 1.0),
    )
}

/// Same value on all three channels.
#[inline]
pub fn gray(value: f32) -> Vector3<f32> {
    Vector3::repeat(value)
}

/// Linearly maps `value` from `[min, max]` to `[0, 1]`, clamped.
#[inline]
pub fn remap(value: f32, min: f32, max: f32) -> f32 {
    let range = max - min;
    if range.abs() < f32::EPSILON {
        return if value >= max { 1.0 } else { 0.0 };
    }
    ((value - min) / range).clamp(0.0, 1.0)
}

/// Packs a linear color into an opaque ARGB8888 word.
pub fn to_argb(color: Vector3<f32>) -> u32 {
    let c = saturate(color);
    let r = (c.x * 255.0) as u32;
    let g = (c.y * 255.0) as u32;
    let b = (c.z * 255.0) as u32;
    (255 << 24) | (r << 16) | (g << 8) | b
}
