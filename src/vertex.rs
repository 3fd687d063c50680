use vek::{Vec2, Vec3, Vec4};

/// A local-space vertex, as produced by the mesh loader.
///
/// These are created once when a mesh is built and never mutated afterwards.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct VertexInput {
    pub position: Vec3<f32>,
    pub uv: Vec2<f32>,
    pub normal: Vec3<f32>,
    pub tangent: Vec3<f32>,
}

impl VertexInput {
    pub fn new(position: Vec3<f32>, uv: Vec2<f32>, normal: Vec3<f32>) -> Self {
        Self {
            position,
            uv,
            normal,
            tangent: Vec3::zero(),
        }
    }

    pub fn with_tangent(self, tangent: Vec3<f32>) -> Self {
        Self { tangent, ..self }
    }
}

/// A vertex after the camera transform, ready to be rasterized.
///
/// One array of these is produced per mesh per frame and consumed by the rasterizer of the same frame.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct VertexOutput {
    /// Homogeneous clip-space position, before the perspective divide.
    pub clip: Vec4<f32>,
    /// Screen-space `x` and `y` (in pixels), device depth `z` (`clip.z / clip.w`) and the undivided `clip.w`.
    pub position: Vec4<f32>,
    pub world_position: Vec3<f32>,
    pub uv: Vec2<f32>,
    pub normal: Vec3<f32>,
    pub tangent: Vec3<f32>,
    /// Normalised direction from the camera to this vertex.
    pub view_direction: Vec3<f32>,
    /// Whether the vertex lies outside the view volume. Triangles using a culled vertex are never rasterized.
    pub culled: bool,
}

impl VertexOutput {
    /// Create a vertex that is already in screen space, at pixel position (`x`, `y`) with the given device depth and
    /// clip-space `w`.
    ///
    /// The clip-space position is reconstructed so that near-plane rejection behaves as it would for a transformed
    /// vertex. All other attributes are zeroed.
    pub fn screen_space(x: f32, y: f32, depth: f32, w: f32) -> Self {
        Self {
            clip: Vec4::new(x * w, y * w, depth * w, w),
            position: Vec4::new(x, y, depth, w),
            ..Self::default()
        }
    }

    #[inline(always)]
    pub fn screen(&self) -> Vec2<f32> {
        Vec2::new(self.position.x, self.position.y)
    }

    /// The non-linear device depth of this vertex.
    #[inline(always)]
    pub fn depth(&self) -> f32 {
        self.position.z
    }

    /// The clip-space `w` of this vertex, kept for perspective-correct interpolation.
    #[inline(always)]
    pub fn w(&self) -> f32 {
        self.position.w
    }

    /// Whether the vertex lies behind the near plane, judged by the sign of its undivided clip-space depth.
    #[inline(always)]
    pub fn behind_near_plane(&self) -> bool {
        self.clip.z < 0.0
    }
}
