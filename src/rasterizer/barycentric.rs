use crate::{convention::CoordinateConvention, math::cross_2d};
use vek::Vec2;

/// The barycentric weights of a point inside a triangle.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TriangleResult {
    /// Normalised weights of the three vertices. These sum to 1.
    pub weights: [f32; 3],
    /// The unnormalised edge function values, in vertex order. Their sum is the doubled triangle area.
    pub edges: [f32; 3],
}

/// The edge functions of a screen-space triangle under a coordinate convention.
///
/// Each edge function is the 2D cross product of a point relative to one vertex with the edge leaving that vertex,
/// scaled by the convention's winding sign so that front-facing triangles have non-negative values inside.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct EdgeFunctions {
    vertices: [Vec2<f32>; 3],
    sign: f32,
}

impl EdgeFunctions {
    pub fn new(vertices: [Vec2<f32>; 3], convention: &CoordinateConvention) -> Self {
        Self {
            vertices,
            sign: convention.edge_sign(),
        }
    }

    /// The doubled signed area of the triangle. Positive for triangles that face the camera under this convention.
    #[inline]
    pub fn signed_area(&self) -> f32 {
        let [v0, v1, v2] = self.vertices;
        cross_2d(v0 - v1, v2 - v1) * self.sign
    }

    /// Whether any pixel of this triangle could pass the membership test.
    #[inline]
    pub fn is_front_facing(&self) -> bool {
        self.signed_area() > 0.0
    }

    /// Evaluate the triangle at `p`, returning its weights if `p` lies inside.
    ///
    /// Points exactly on an edge are inside, so adjacent triangles sharing an edge leave no gaps. Degenerate and
    /// back-facing triangles contain no points.
    #[inline]
    pub fn evaluate(&self, p: Vec2<f32>) -> Option<TriangleResult> {
        let [v0, v1, v2] = self.vertices;

        // Each edge value is the weight of the vertex opposite to it
        let e2 = cross_2d(p - v0, v1 - v0) * self.sign;
        if e2 < 0.0 {
            return None;
        }
        let e0 = cross_2d(p - v1, v2 - v1) * self.sign;
        if e0 < 0.0 {
            return None;
        }
        let e1 = cross_2d(p - v2, v0 - v2) * self.sign;
        if e1 < 0.0 {
            return None;
        }

        let area = e0 + e1 + e2;
        if !(area > 0.0) || !area.is_finite() {
            return None;
        }

        Some(TriangleResult {
            weights: [e0 / area, e1 / area, e2 / area],
            edges: [e0, e1, e2],
        })
    }
}

/// Test whether `p` lies inside the triangle `vertices` under `convention`, returning its barycentric weights if so.
#[inline]
pub fn point_in_triangle(
    p: Vec2<f32>,
    vertices: [Vec2<f32>; 3],
    convention: &CoordinateConvention,
) -> Option<TriangleResult> {
    EdgeFunctions::new(vertices, convention).evaluate(p)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Clockwise on screen (y points down)
    const CW: [Vec2<f32>; 3] = [
        Vec2 { x: 10.0, y: 10.0 },
        Vec2 { x: 20.0, y: 10.0 },
        Vec2 { x: 10.0, y: 20.0 },
    ];

    fn ccw() -> [Vec2<f32>; 3] {
        [CW[0], CW[2], CW[1]]
    }

    #[test]
    fn enclosed_points_are_inside_with_unit_weights() {
        let c = CoordinateConvention::DIRECTX;
        for y in 11..19 {
            for x in 11..19 {
                if x + y >= 30 {
                    continue;
                }
                let p = Vec2::new(x as f32 + 0.25, y as f32 + 0.25);
                let r = point_in_triangle(p, CW, &c).expect("point should be inside");
                let sum: f32 = r.weights.iter().sum();
                assert!((sum - 1.0).abs() < 1e-5);
                assert!(r.weights.iter().all(|w| *w >= 0.0));
            }
        }
    }

    #[test]
    fn outside_points_are_outside() {
        let c = CoordinateConvention::DIRECTX;
        for p in [[9.0, 15.0], [15.0, 9.5], [16.0, 15.0], [25.0, 25.0], [-1.0, -1.0]] {
            assert!(point_in_triangle(Vec2::from(p), CW, &c).is_none(), "{:?}", p);
        }
    }

    #[test]
    fn edges_and_corners_are_inside() {
        let c = CoordinateConvention::DIRECTX;
        for p in [[10.0, 10.0], [20.0, 10.0], [10.0, 20.0], [15.0, 15.0], [15.0, 10.0], [10.0, 15.0]] {
            assert!(point_in_triangle(Vec2::from(p), CW, &c).is_some(), "{:?}", p);
        }
    }

    #[test]
    fn weights_reproduce_vertices() {
        let c = CoordinateConvention::DIRECTX;
        assert_eq!(point_in_triangle(CW[0], CW, &c).unwrap().weights, [1.0, 0.0, 0.0]);
        assert_eq!(point_in_triangle(CW[1], CW, &c).unwrap().weights, [0.0, 1.0, 0.0]);
        assert_eq!(point_in_triangle(CW[2], CW, &c).unwrap().weights, [0.0, 0.0, 1.0]);
    }

    #[test]
    fn winding_follows_convention() {
        let p = Vec2::new(12.0, 12.0);
        assert!(point_in_triangle(p, CW, &CoordinateConvention::SOFTWARE).is_none());
        assert!(point_in_triangle(p, ccw(), &CoordinateConvention::SOFTWARE).is_some());
        assert!(point_in_triangle(p, ccw(), &CoordinateConvention::DIRECTX).is_none());

        assert!(EdgeFunctions::new(CW, &CoordinateConvention::DIRECTX).is_front_facing());
        assert!(!EdgeFunctions::new(CW, &CoordinateConvention::SOFTWARE).is_front_facing());
    }

    #[test]
    fn degenerate_triangles_contain_nothing() {
        let line = [Vec2::new(0.0, 0.0), Vec2::new(5.0, 5.0), Vec2::new(10.0, 10.0)];
        for c in [CoordinateConvention::SOFTWARE, CoordinateConvention::DIRECTX] {
            assert!(point_in_triangle(Vec2::new(5.0, 5.0), line, &c).is_none());
            assert!(!EdgeFunctions::new(line, &c).is_front_facing());
        }
    }

    #[test]
    fn signed_area_matches_edge_sum() {
        let e = EdgeFunctions::new(CW, &CoordinateConvention::DIRECTX);
        let r = e.evaluate(Vec2::new(12.0, 13.0)).unwrap();
        assert_eq!(r.edges.iter().sum::<f32>(), e.signed_area());
        assert_eq!(e.signed_area(), 100.0);
    }
}
