use crate::vertex::VertexOutput;
use vek::Vec2;

/// A trait used to enable types to be interpolated across the surface of a triangle.
pub trait Interpolate {
    /// Linearly scale three items of this type and sum them
    fn lerp3(a: Self, b: Self, c: Self, x: f32, y: f32, z: f32) -> Self;
}

// Default impls for certain types
macro_rules! impl_interpolate_for {
    ($t:ty) => {
        impl Interpolate for $t {
            #[inline(always)]
            fn lerp3(a: Self, b: Self, c: Self, x: f32, y: f32, z: f32) -> Self {
                a * x + b * y + c * z
            }
        }
    };
}
impl_interpolate_for!(f32);
impl_interpolate_for!(vek::Vec2<f32>);
impl_interpolate_for!(vek::Vec3<f32>);
impl_interpolate_for!(vek::Vec4<f32>);
impl_interpolate_for!(vek::Rgb<f32>);

impl<T: Interpolate, U: Interpolate> Interpolate for (T, U) {
    #[inline(always)]
    fn lerp3(a: Self, b: Self, c: Self, x: f32, y: f32, z: f32) -> Self {
        (
            T::lerp3(a.0, b.0, c.0, x, y, z),
            U::lerp3(a.1, b.1, c.1, x, y, z),
        )
    }
}

impl Interpolate for VertexOutput {
    #[inline]
    fn lerp3(a: Self, b: Self, c: Self, x: f32, y: f32, z: f32) -> Self {
        Self {
            clip: Interpolate::lerp3(a.clip, b.clip, c.clip, x, y, z),
            position: Interpolate::lerp3(a.position, b.position, c.position, x, y, z),
            world_position: Interpolate::lerp3(a.world_position, b.world_position, c.world_position, x, y, z),
            uv: Interpolate::lerp3(a.uv, b.uv, c.uv, x, y, z),
            normal: Interpolate::lerp3(a.normal, b.normal, c.normal, x, y, z),
            tangent: Interpolate::lerp3(a.tangent, b.tangent, c.tangent, x, y, z),
            view_direction: Interpolate::lerp3(a.view_direction, b.view_direction, c.view_direction, x, y, z),
            culled: false,
        }
    }
}

/// Perspective-correct vertex factors for the barycentric `weights` of a fragment whose triangle has the clip-space
/// `w` values `w`.
///
/// Returns the factor to apply to each vertex attribute along with the interpolated `w` of the fragment. The factors
/// are `(weight_i / w_i) * interpolated_w` where `interpolated_w = 1 / sum(weight_j / w_j)`, computed as a quotient
/// so that a fragment sitting exactly on a vertex reproduces that vertex's attributes bit-for-bit.
#[inline]
pub fn perspective_factors(weights: [f32; 3], w: [f32; 3]) -> ([f32; 3], f32) {
    let scaled = [weights[0] / w[0], weights[1] / w[1], weights[2] / w[2]];
    let sum = scaled[0] + scaled[1] + scaled[2];
    (
        [scaled[0] / sum, scaled[1] / sum, scaled[2] / sum],
        1.0 / sum,
    )
}

/// Interpolate three vertex attributes in a perspective-correct manner.
#[inline]
pub fn perspective_correct<T: Interpolate>(attrs: [T; 3], weights: [f32; 3], w: [f32; 3]) -> T {
    let ([f0, f1, f2], _) = perspective_factors(weights, w);
    let [a, b, c] = attrs;
    T::lerp3(a, b, c, f0, f1, f2)
}

/// Interpolate the non-linear device depth of a fragment from the device depths of its triangle.
///
/// The weights need not be normalised.
///
/// The result may be non-finite for triangles touching the camera plane; callers must treat that as a failed depth
/// test.
#[inline]
pub fn interpolate_depth(weights: [f32; 3], depth: [f32; 3]) -> f32 {
    let sum = weights[0] + weights[1] + weights[2];
    sum / (weights[0] / depth[0] + weights[1] / depth[1] + weights[2] / depth[2])
}

/// Interpolate the device depth of a point `p` lying on the segment between two screen-space vertices, given as
/// `(position, depth)` pairs.
///
/// The result depends only on the segment, not on the order its endpoints are passed in, so every triangle sharing
/// an edge computes the same depth for the pixels on it.
#[inline]
pub fn interpolate_edge_depth(p: Vec2<f32>, a: (Vec2<f32>, f32), b: (Vec2<f32>, f32)) -> f32 {
    let ((a, a_depth), (b, b_depth)) = if (a.0.x, a.0.y) <= (b.0.x, b.0.y) { (a, b) } else { (b, a) };
    let d = b - a;
    // Parameterise along the longer axis
    let t = if d.x.abs() >= d.y.abs() {
        (p.x - a.x) / d.x
    } else {
        (p.y - a.y) / d.y
    };
    interpolate_depth([1.0 - t, t, 0.0], [a_depth, b_depth, 1.0])
}
