use crate::{
    convention::CoordinateConvention,
    vertex::{VertexInput, VertexOutput},
};
use vek::{Mat4, Vec3, Vec4};

/// Transforms local-space vertices into screen space for one frame.
///
/// This captures everything about the camera that the transform needs: the combined projection and view matrix, the
/// camera's world position (for view directions), the coordinate convention (for the depth cull range) and the size
/// of the render target.
#[derive(Clone, Debug, PartialEq)]
pub struct ScreenTransform {
    pub view_projection: Mat4<f32>,
    pub camera_position: Vec3<f32>,
    pub convention: CoordinateConvention,
    pub size: [usize; 2],
}

impl ScreenTransform {
    pub fn new(
        view_projection: Mat4<f32>,
        camera_position: Vec3<f32>,
        convention: CoordinateConvention,
        size: [usize; 2],
    ) -> Self {
        Self {
            view_projection,
            camera_position,
            convention,
            size,
        }
    }

    /// Transform a single vertex of a mesh with the given world matrix.
    pub fn transform_vertex(&self, world: &Mat4<f32>, vertex: &VertexInput) -> VertexOutput {
        let world_position = Vec3::from(*world * Vec4::from_point(vertex.position));
        let clip = self.view_projection * Vec4::from_point(world_position);

        // Perspective divide, keeping the undivided w around for interpolation
        let ndc = Vec3::new(clip.x / clip.w, clip.y / clip.w, clip.z / clip.w);

        let culled = !(-1.0..=1.0).contains(&ndc.x)
            || !(-1.0..=1.0).contains(&ndc.y)
            || !self.convention.passes_z_clip(ndc.z);

        let [width, height] = self.size;
        let screen_x = (ndc.x + 1.0) * 0.5 * width as f32;
        let screen_y = (1.0 - ndc.y) * 0.5 * height as f32;

        VertexOutput {
            clip,
            position: Vec4::new(screen_x, screen_y, ndc.z, clip.w),
            world_position,
            uv: vertex.uv,
            normal: Vec3::from(*world * Vec4::from_direction(vertex.normal)),
            tangent: Vec3::from(*world * Vec4::from_direction(vertex.tangent)),
            view_direction: (world_position - self.camera_position).normalized(),
            culled,
        }
    }

    /// Transform every vertex of a mesh, replacing the contents of `output`.
    pub fn transform_vertices(&self, world: &Mat4<f32>, vertices: &[VertexInput], output: &mut Vec<VertexOutput>) {
        output.clear();
        output.extend(vertices.iter().map(|v| self.transform_vertex(world, v)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vek::Vec2;

    fn identity_transform() -> ScreenTransform {
        ScreenTransform::new(Mat4::identity(), Vec3::new(0.0, 0.0, -1.0), CoordinateConvention::SOFTWARE, [100, 50])
    }

    fn vertex_at(p: Vec3<f32>) -> VertexInput {
        VertexInput::new(p, Vec2::new(0.25, 0.75), Vec3::unit_z()).with_tangent(Vec3::unit_x())
    }

    #[test]
    fn remaps_ndc_to_top_left_pixel_space() {
        let t = identity_transform();
        let world = Mat4::identity();

        let top_left = t.transform_vertex(&world, &vertex_at(Vec3::new(-1.0, 1.0, 0.5)));
        assert_eq!(top_left.screen(), Vec2::new(0.0, 0.0));

        let bottom_right = t.transform_vertex(&world, &vertex_at(Vec3::new(1.0, -1.0, 0.5)));
        assert_eq!(bottom_right.screen(), Vec2::new(100.0, 50.0));

        let centre = t.transform_vertex(&world, &vertex_at(Vec3::new(0.0, 0.0, 0.5)));
        assert_eq!(centre.screen(), Vec2::new(50.0, 25.0));
        assert_eq!(centre.depth(), 0.5);
        assert_eq!(centre.w(), 1.0);
        assert!(!centre.culled);
    }

    #[test]
    fn culls_outside_ndc_bounds() {
        let t = identity_transform();
        let world = Mat4::identity();
        for p in [
            Vec3::new(1.01, 0.0, 0.5),
            Vec3::new(0.0, -1.01, 0.5),
            Vec3::new(0.0, 0.0, -0.01),
            Vec3::new(0.0, 0.0, 1.01),
        ] {
            assert!(t.transform_vertex(&world, &vertex_at(p)).culled, "{:?}", p);
        }
        // Depth range is [0, 1], not [-1, 1]
        assert!(!t.transform_vertex(&world, &vertex_at(Vec3::new(1.0, -1.0, 0.0))).culled);
    }

    #[test]
    fn normals_rotate_but_do_not_translate() {
        let t = identity_transform();
        let world =
            Mat4::<f32>::translation_3d(Vec3::new(0.0, 0.0, 0.25)) * Mat4::<f32>::rotation_y(core::f32::consts::FRAC_PI_2);
        let v = t.transform_vertex(&world, &vertex_at(Vec3::zero()));

        assert!((v.normal - Vec3::unit_x()).magnitude() < 1e-6);
        assert!((v.tangent - -Vec3::unit_z()).magnitude() < 1e-6);
        assert!((v.world_position - Vec3::new(0.0, 0.0, 0.25)).magnitude() < 1e-6);
        assert_eq!(v.uv, Vec2::new(0.25, 0.75));
    }

    #[test]
    fn view_direction_points_from_camera_to_vertex() {
        let t = identity_transform();
        let v = t.transform_vertex(&Mat4::identity(), &vertex_at(Vec3::new(0.0, 0.0, 0.5)));
        assert!((v.view_direction - Vec3::unit_z()).magnitude() < 1e-6);
    }

    #[test]
    fn transform_vertices_replaces_previous_frame() {
        let t = identity_transform();
        let mut out = vec![VertexOutput::default(); 5];
        t.transform_vertices(&Mat4::identity(), &[vertex_at(Vec3::zero()), vertex_at(Vec3::one() * 0.5)], &mut out);
        assert_eq!(out.len(), 2);
    }
}
