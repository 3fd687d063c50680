use core::ops::RangeInclusive;
use serde::{Deserialize, Serialize};
use vek::{Mat4, Vec3};

/// The handedness of the coordinate space used by a render system.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Handedness {
    /// Left-handed coordinate space (used by DirectX)
    Left,
    /// Right-handed coordinate space (used by the software path and OpenGL)
    Right,
}

/// The visual orientation of a triangle's screen-space vertices (in y-down pixel space) that counts as front-facing.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Winding {
    Clockwise,
    CounterClockwise,
}

impl Winding {
    /// The sign applied to every edge function so that front-facing triangles produce non-negative values.
    #[inline(always)]
    pub fn edge_sign(self) -> f32 {
        match self {
            Winding::CounterClockwise => 1.0,
            Winding::Clockwise => -1.0,
        }
    }
}

/// The configuration of the coordinate system used by a render system.
///
/// This is consumed by the camera (projection and view handedness), the screen-space transform (depth cull range)
/// and the barycentric evaluator (edge function sign), so that the conventions of the software and hardware paths
/// never have to be special-cased anywhere else.
#[derive(Clone, Debug, PartialEq)]
pub struct CoordinateConvention {
    pub handedness: Handedness,
    pub front_face: Winding,
    /// The range of device depths that survive culling. Inclusive on both ends.
    pub z_clip_range: RangeInclusive<f32>,
}

impl CoordinateConvention {
    /// The software path's coordinates (right-handed, counter-clockwise front faces, 0 to 1 depth).
    pub const SOFTWARE: Self = Self {
        handedness: Handedness::Right,
        front_face: Winding::CounterClockwise,
        z_clip_range: 0.0..=1.0,
    };

    /// DirectX-like coordinates (left-handed, clockwise front faces, 0 to 1 depth).
    pub const DIRECTX: Self = Self {
        handedness: Handedness::Left,
        front_face: Winding::Clockwise,
        z_clip_range: 0.0..=1.0,
    };

    pub fn with_front_face(self, front_face: Winding) -> Self {
        Self { front_face, ..self }
    }

    #[inline(always)]
    pub fn edge_sign(&self) -> f32 {
        self.front_face.edge_sign()
    }

    #[inline(always)]
    pub(crate) fn passes_z_clip(&self, z: f32) -> bool {
        self.z_clip_range.contains(&z)
    }

    /// Build a perspective projection matrix matching this convention's handedness and depth range.
    pub fn projection(&self, fov_y: f32, aspect_ratio: f32, near: f32, far: f32) -> Mat4<f32> {
        let zero_to_one = *self.z_clip_range.start() >= 0.0;
        match (self.handedness, zero_to_one) {
            (Handedness::Right, true) => Mat4::perspective_rh_zo(fov_y, aspect_ratio, near, far),
            (Handedness::Right, false) => Mat4::perspective_rh_no(fov_y, aspect_ratio, near, far),
            (Handedness::Left, true) => Mat4::perspective_lh_zo(fov_y, aspect_ratio, near, far),
            (Handedness::Left, false) => Mat4::perspective_lh_no(fov_y, aspect_ratio, near, far),
        }
    }

    /// Build a view matrix looking from `eye` towards `target`, matching this convention's handedness.
    pub fn look_at(&self, eye: Vec3<f32>, target: Vec3<f32>, up: Vec3<f32>) -> Mat4<f32> {
        match self.handedness {
            Handedness::Right => Mat4::look_at_rh(eye, target, up),
            Handedness::Left => Mat4::look_at_lh(eye, target, up),
        }
    }
}

impl Default for CoordinateConvention {
    fn default() -> Self {
        Self::SOFTWARE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vek::Vec4;

    fn project(convention: &CoordinateConvention, view_z: f32) -> f32 {
        let proj = convention.projection(1.0, 1.0, 0.1, 100.0);
        let clip = proj * Vec4::new(0.0, 0.0, view_z, 1.0);
        clip.z / clip.w
    }

    #[test]
    fn right_handed_projection_maps_near_and_far_to_unit_range() {
        let c = CoordinateConvention::SOFTWARE;
        assert!(project(&c, -0.1).abs() < 1e-5);
        assert!((project(&c, -100.0) - 1.0).abs() < 1e-5);
    }

    #[test]
    fn left_handed_projection_looks_down_positive_z() {
        let c = CoordinateConvention::DIRECTX;
        assert!(project(&c, 0.1).abs() < 1e-5);
        assert!((project(&c, 100.0) - 1.0).abs() < 1e-5);
    }

    #[test]
    fn z_clip_is_inclusive() {
        let c = CoordinateConvention::SOFTWARE;
        assert!(c.passes_z_clip(0.0));
        assert!(c.passes_z_clip(1.0));
        assert!(!c.passes_z_clip(-0.0001));
        assert!(!c.passes_z_clip(1.0001));
        assert!(!c.passes_z_clip(f32::NAN));
    }

    #[test]
    fn winding_signs_are_opposite() {
        assert_eq!(CoordinateConvention::SOFTWARE.edge_sign(), 1.0);
        assert_eq!(CoordinateConvention::DIRECTX.edge_sign(), -1.0);
    }
}
