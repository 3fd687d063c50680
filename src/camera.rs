use crate::{convention::CoordinateConvention, mesh::Mesh, transform::ScreenTransform};
use core::f32::consts::{PI, TAU};
use vek::{Mat4, Vec3};

const MAX_PITCH: f32 = 80.0 * PI / 180.0;

/// A first-person camera that produces the per-frame screen-space transform.
#[derive(Clone, Debug)]
pub struct Camera {
    origin: Vec3<f32>,
    yaw: f32,
    pitch: f32,
    fov_y: f32,
    near: f32,
    far: f32,
    size: [usize; 2],
    convention: CoordinateConvention,
}

impl Camera {
    /// Create a camera at `origin`, looking down -z, with the given vertical field of view in degrees.
    pub fn new(origin: Vec3<f32>, [width, height]: [usize; 2], fov_degrees: f32) -> Self {
        Self {
            origin,
            yaw: 0.0,
            pitch: 0.0,
            fov_y: fov_degrees.to_radians(),
            near: 0.1,
            far: 100.0,
            size: [width, height],
            convention: CoordinateConvention::default(),
        }
    }

    pub fn with_planes(self, near: f32, far: f32) -> Self {
        Self { near, far, ..self }
    }

    pub fn with_convention(self, convention: CoordinateConvention) -> Self {
        Self { convention, ..self }
    }

    pub fn origin(&self) -> Vec3<f32> {
        self.origin
    }

    pub fn size(&self) -> [usize; 2] {
        self.size
    }

    pub fn convention(&self) -> &CoordinateConvention {
        &self.convention
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.size[0] as f32 / self.size[1].max(1) as f32
    }

    pub fn set_resolution(&mut self, width: usize, height: usize) {
        self.size = [width, height];
    }

    pub fn set_fov(&mut self, fov_degrees: f32) {
        self.fov_y = fov_degrees.to_radians();
    }

    /// Switch the coordinate convention, e.g. when toggling between render systems.
    pub fn set_convention(&mut self, convention: CoordinateConvention) {
        self.convention = convention;
    }

    /// The direction the camera is looking in, in world space.
    pub fn forward(&self) -> Vec3<f32> {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        Vec3::new(sin_yaw * cos_pitch, -sin_pitch, -cos_pitch * cos_yaw).normalized()
    }

    /// The camera's right vector, in world space.
    pub fn right(&self) -> Vec3<f32> {
        self.forward().cross(Vec3::unit_y()).normalized()
    }

    /// Rotate the camera. Pitch is clamped to avoid flipping over the poles and yaw wraps around.
    pub fn rotate(&mut self, delta_yaw: f32, delta_pitch: f32) {
        self.yaw = (self.yaw + delta_yaw) % TAU;
        self.pitch = (self.pitch + delta_pitch).clamp(-MAX_PITCH, MAX_PITCH);
    }

    /// Move the camera relative to its own orientation: `x` is right, `y` is world up and `z` is forward.
    pub fn translate_local(&mut self, movement: Vec3<f32>) {
        self.origin += self.right() * movement.x + Vec3::unit_y() * movement.y + self.forward() * movement.z;
    }

    /// Move the camera in world space.
    pub fn translate(&mut self, movement: Vec3<f32>) {
        self.origin += movement;
    }

    pub fn view_matrix(&self) -> Mat4<f32> {
        self.convention
            .look_at(self.origin, self.origin + self.forward(), Vec3::unit_y())
    }

    pub fn projection_matrix(&self) -> Mat4<f32> {
        self.convention
            .projection(self.fov_y, self.aspect_ratio(), self.near, self.far)
    }

    /// The transform that takes mesh vertices into this frame's screen space.
    pub fn screen_transform(&self) -> ScreenTransform {
        ScreenTransform::new(
            self.projection_matrix() * self.view_matrix(),
            self.origin,
            self.convention.clone(),
            self.size,
        )
    }

    /// Transform the vertices of `mesh` into screen space and attach them to the mesh for rasterization.
    pub fn make_screen_space(&self, mesh: &mut Mesh) {
        mesh.update_screen_space(&self.screen_transform());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vek::Vec4;

    #[test]
    fn default_camera_looks_down_negative_z() {
        let cam = Camera::new(Vec3::zero(), [640, 480], 45.0);
        assert!((cam.forward() - -Vec3::unit_z()).magnitude() < 1e-6);
        assert!((cam.right() - Vec3::unit_x()).magnitude() < 1e-6);
    }

    #[test]
    fn pitch_is_clamped_and_yaw_wraps() {
        let mut cam = Camera::new(Vec3::zero(), [640, 480], 45.0);
        cam.rotate(3.0 * PI, 10.0);
        assert!(cam.pitch <= MAX_PITCH);
        assert!(cam.yaw.abs() < TAU);
    }

    #[test]
    fn point_in_front_projects_to_centre_within_depth_range() {
        let cam = Camera::new(Vec3::new(0.0, 0.0, 5.0), [640, 480], 45.0);
        let clip = cam.projection_matrix() * cam.view_matrix() * Vec4::new(0.0, 0.0, 0.0, 1.0);
        assert!(clip.w > 0.0);
        let ndc = Vec3::from(clip) / clip.w;
        assert!(ndc.x.abs() < 1e-5 && ndc.y.abs() < 1e-5);
        assert!(ndc.z > 0.0 && ndc.z < 1.0);
    }

    #[test]
    fn point_behind_camera_has_negative_clip_depth() {
        let cam = Camera::new(Vec3::new(0.0, 0.0, 5.0), [640, 480], 45.0);
        let clip = cam.projection_matrix() * cam.view_matrix() * Vec4::new(0.0, 0.0, 10.0, 1.0);
        assert!(clip.z < 0.0);
    }

    #[test]
    fn both_conventions_see_the_same_target() {
        let mut cam = Camera::new(Vec3::new(0.0, 0.0, 5.0), [640, 480], 45.0);
        cam.set_convention(CoordinateConvention::DIRECTX);
        let clip = cam.projection_matrix() * cam.view_matrix() * Vec4::new(0.0, 0.0, 0.0, 1.0);
        let ndc = Vec3::from(clip) / clip.w;
        assert!(clip.w > 0.0);
        assert!(ndc.z > 0.0 && ndc.z < 1.0);
    }

    #[test]
    fn translate_local_moves_along_forward() {
        let mut cam = Camera::new(Vec3::zero(), [640, 480], 45.0);
        cam.translate_local(Vec3::new(0.0, 0.0, 2.0));
        assert!((cam.origin() - Vec3::new(0.0, 0.0, -2.0)).magnitude() < 1e-6);
    }
}
