use nalgebra::{Point2, Vector3};

/// Signed areas below this are treated as degenerate triangles.
pub const EPSILON: f32 = 1e-5;

/// 2D cross product of `(b - a)` and `(p - a)`.
///
/// This is the edge function of edge `a -> b` evaluated at `p`. With +Y
/// pointing down, a positive value means `p` lies clockwise of the edge.
#[inline(always)]
pub fn edge_function(a: Point2<f32>, b: Point2<f32>, p: Point2<f32>) -> f32 {
    let ab = b - a;
    let ap = p - a;
    ab.x * ap.y - ab.y * ap.x
}

/// Twice the signed area of triangle `(v0, v1, v2)` in screen space.
///
/// Positive for clockwise winding on screen, negative for counter-clockwise.
#[inline]
pub fn signed_area(v0: Point2<f32>, v1: Point2<f32>, v2: Point2<f32>) -> f32 {
    edge_function(v0, v1, v2)
}

/// Raw edge values `(w0, w1, w2)` for `p`; `wi` belongs to the edge opposite
/// vertex `i`, so the three always sum to the signed area.
#[inline(always)]
pub fn edge_values(
    p: Point2<f32>,
    v0: Point2<f32>,
    v1: Point2<f32>,
    v2: Point2<f32>,
) -> Vector3<f32> {
    Vector3::new(
        edge_function(v1, v2, p),
        edge_function(v2, v0, p),
        edge_function(v0, v1, p),
    )
}

/// Inclusive containment: every edge value shares the sign of the area or is
/// exactly zero.
#[inline(always)]
pub fn is_inside_triangle(edges: Vector3<f32>, area: f32) -> bool {
    if area > 0.0 {
        edges.x >= 0.0 && edges.y >= 0.0 && edges.z >= 0.0
    } else {
        edges.x <= 0.0 && edges.y <= 0.0 && edges.z <= 0.0
    }
}

/// Calculates the barycentric weights of `p` with respect to `(v0, v1, v2)`.
///
/// Returns `None` if the triangle is degenerate (area is near zero).
pub fn barycentric_coordinates(
    p: Point2<f32>,
    v0: Point2<f32>,
    v1: Point2<f32>,
    v2: Point2<f32>,
) -> Option<Vector3<f32>> {
    let area = signed_area(v0, v1, v2);
    if area.abs() < EPSILON {
        return None;
    }
    Some(edge_values(p, v0, v1, v2) / area)
}

/// Interpolated `1 / w` of a fragment.
#[inline(always)]
pub fn interpolate_inv_w(weights: Vector3<f32>, inv_w: [f32; 3]) -> f32 {
    weights.x * inv_w[0] + weights.y * inv_w[1] + weights.z * inv_w[2]
}

/// Perspective-correct weights: `wi * inv_wi / inv_w`.
///
/// Any attribute interpolated with these weights equals
/// `(Σ wi·Ai·inv_wi) / inv_w`. Returns `None` when `inv_w` collapses to zero.
pub fn perspective_correct_weights(weights: Vector3<f32>, inv_w: [f32; 3]) -> Option<Vector3<f32>> {
    let interpolated = interpolate_inv_w(weights, inv_w);
    if interpolated.abs() < f32::EPSILON {
        return None;
    }
    let scale = 1.0 / interpolated;
    Some(Vector3::new(
        weights.x * inv_w[0] * scale,
        weights.y * inv_w[1] * scale,
        weights.z * inv_w[2] * scale,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn triangle() -> [Point2<f32>; 3] {
        [
            Point2::new(10.0, 10.0),
            Point2::new(110.0, 10.0),
            Point2::new(10.0, 110.0),
        ]
    }

    #[test]
    fn clockwise_screen_triangle_has_positive_area() {
        let [v0, v1, v2] = triangle();
        assert!(signed_area(v0, v1, v2) > 0.0);
        assert!(signed_area(v0, v2, v1) < 0.0);
    }

    #[test]
    fn interior_weights_are_in_unit_range_and_sum_to_one() {
        let [v0, v1, v2] = triangle();
        for &(x, y) in &[(40.5, 40.5), (11.0, 11.0), (60.0, 20.0), (15.5, 90.5)] {
            let bary = barycentric_coordinates(Point2::new(x, y), v0, v1, v2).unwrap();
            for w in bary.iter() {
                assert!(*w > 0.0 && *w < 1.0, "weight {} out of (0,1) at ({}, {})", w, x, y);
            }
            assert_relative_eq!(bary.sum(), 1.0, epsilon = 1e-5);
        }
    }

    #[test]
    fn weights_are_one_at_their_own_vertex() {
        let [v0, v1, v2] = triangle();
        let bary = barycentric_coordinates(v1, v0, v1, v2).unwrap();
        assert_relative_eq!(bary.y, 1.0, epsilon = 1e-6);
        assert_relative_eq!(bary.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(bary.z, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn containment_works_for_both_windings() {
        let [v0, v1, v2] = triangle();
        let inside = Point2::new(30.0, 30.0);
        let outside = Point2::new(100.0, 100.0);

        for (a, b, c) in [(v0, v1, v2), (v0, v2, v1)] {
            let area = signed_area(a, b, c);
            assert!(is_inside_triangle(edge_values(inside, a, b, c), area));
            assert!(!is_inside_triangle(edge_values(outside, a, b, c), area));
        }
    }

    #[test]
    fn points_on_an_edge_are_inside() {
        let [v0, v1, v2] = triangle();
        let on_edge = Point2::new(50.0, 10.0);
        let area = signed_area(v0, v1, v2);
        assert!(is_inside_triangle(edge_values(on_edge, v0, v1, v2), area));
    }

    #[test]
    fn degenerate_triangle_has_no_barycentrics() {
        let v0 = Point2::new(0.0, 0.0);
        let v1 = Point2::new(5.0, 5.0);
        let v2 = Point2::new(10.0, 10.0);
        assert!(barycentric_coordinates(Point2::new(2.0, 2.0), v0, v1, v2).is_none());
    }

    #[test]
    fn perspective_correction_is_identity_for_equal_w() {
        let bary = Vector3::new(0.2, 0.3, 0.5);
        let corrected = perspective_correct_weights(bary, [0.25, 0.25, 0.25]).unwrap();
        assert_relative_eq!(corrected, bary, epsilon = 1e-6);
    }

    #[test]
    fn perspective_correction_favours_nearer_vertex() {
        let bary = Vector3::new(0.5, 0.5, 0.0);
        // Vertex 0 is four times nearer than vertex 1.
        let corrected = perspective_correct_weights(bary, [1.0, 0.25, 0.5]).unwrap();
        assert!(corrected.x > corrected.y);
        assert_relative_eq!(corrected.sum(), 1.0, epsilon = 1e-6);
        assert_relative_eq!(corrected.x, 0.8, epsilon = 1e-6);
    }
}
