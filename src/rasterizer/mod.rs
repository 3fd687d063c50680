//! The triangle rasterization engine.
//!
//! A [`FrameContext`] bundles everything one frame of rasterization needs: the color and depth targets, the render
//! mode and light read by the shading dispatch, and the coordinate convention read by the barycentric evaluator.
//! Meshes are rasterized one at a time, triangle by triangle, in index-buffer order.

mod barycentric;
mod bounding_box;
mod triangles;

pub use self::{
    barycentric::{point_in_triangle, EdgeFunctions, TriangleResult},
    bounding_box::BoundingBox,
};

use crate::{
    convention::CoordinateConvention,
    material::{FilterMode, Material},
    mesh::Mesh,
    shading::{Light, PixelFormat, RenderMode},
    texture::Target,
    vertex::VertexOutput,
};
use core::ops::{Add, AddAssign};

/// Counters describing the work done by the rasterizer.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct RasterStats {
    /// Triangles submitted for rasterization.
    pub submitted: usize,
    /// Triangles rejected because a vertex was culled or behind the near plane.
    pub rejected: usize,
    /// Triangles that were back-facing or degenerate under the active convention.
    pub back_facing: usize,
    /// Pixels that passed the depth test and were written.
    pub pixels_written: usize,
}

impl AddAssign for RasterStats {
    fn add_assign(&mut self, other: Self) {
        self.submitted += other.submitted;
        self.rejected += other.rejected;
        self.back_facing += other.back_facing;
        self.pixels_written += other.pixels_written;
    }
}

impl Add for RasterStats {
    type Output = Self;

    fn add(mut self, other: Self) -> Self {
        self += other;
        self
    }
}

/// The state shared by every triangle rasterized during one frame.
#[derive(Debug)]
pub struct FrameContext<C, D> {
    pub mode: RenderMode,
    pub light: Light,
    pub convention: CoordinateConvention,
    pub pixel_format: PixelFormat,
    pub filter: FilterMode,
    /// Color target, one packed pixel per cell.
    pub color: C,
    /// Depth target, one device depth per cell.
    pub depth: D,
}

impl<C, D> FrameContext<C, D>
where
    C: Target<Texel = u32>,
    D: Target<Texel = f32>,
{
    /// Create a frame context writing to the given targets, with default shading settings.
    ///
    /// # Panics
    ///
    /// Panics if the color and depth targets are not the same size.
    pub fn new(color: C, depth: D) -> Self {
        assert_eq!(
            color.size(),
            depth.size(),
            "Color and depth buffers are not similarly sized!"
        );
        Self {
            mode: RenderMode::default(),
            light: Light::default(),
            convention: CoordinateConvention::default(),
            pixel_format: PixelFormat::default(),
            filter: FilterMode::default(),
            color,
            depth,
        }
    }

    pub fn with_mode(self, mode: RenderMode) -> Self {
        Self { mode, ..self }
    }

    pub fn with_light(self, light: Light) -> Self {
        Self { light, ..self }
    }

    pub fn with_convention(self, convention: CoordinateConvention) -> Self {
        Self { convention, ..self }
    }

    pub fn with_pixel_format(self, pixel_format: PixelFormat) -> Self {
        Self { pixel_format, ..self }
    }

    pub fn with_filter(self, filter: FilterMode) -> Self {
        Self { filter, ..self }
    }

    /// The size of the render targets, as `[width, height]`.
    #[inline(always)]
    pub fn size(&self) -> [usize; 2] {
        self.color.size()
    }

    /// Rasterize the given index triples of a screen-space vertex array, in order.
    ///
    /// # Panics
    ///
    /// Panics if an index is out of range for `vertices`.
    pub fn rasterize_triangles<M, I>(&mut self, vertices: &[VertexOutput], triangles: I, material: &M) -> RasterStats
    where
        M: Material + ?Sized,
        I: IntoIterator<Item = [u32; 3]>,
    {
        triangles
            .into_iter()
            .map(|[i0, i1, i2]| {
                let tri = [&vertices[i0 as usize], &vertices[i1 as usize], &vertices[i2 as usize]];
                self.rasterize_triangle(tri, material)
            })
            .fold(RasterStats::default(), Add::add)
    }

    /// Rasterize every triangle of a mesh using the screen-space vertices of its latest camera transform.
    ///
    /// Transparent materials are skipped entirely, since no blending is performed.
    pub fn rasterize_mesh<M: Material + ?Sized>(&mut self, mesh: &Mesh, material: &M) -> RasterStats {
        if material.has_transparency() {
            log::debug!("Skipping mesh with transparent material {:?}", mesh.material());
            return RasterStats::default();
        }
        let vertices = mesh.screen_space_vertices();
        if vertices.len() != mesh.vertices().len() {
            log::warn!(
                "Mesh has {} screen-space vertices for {} vertices, was it transformed this frame?",
                vertices.len(),
                mesh.vertices().len()
            );
            return RasterStats::default();
        }

        let stats = self.rasterize_triangles(vertices, mesh.triangles(), material);
        log::trace!(
            "Rasterized mesh: {} triangles submitted, {} rejected, {} back-facing, {} pixels written",
            stats.submitted,
            stats.rejected,
            stats.back_facing,
            stats.pixels_written,
        );
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{buffer::Buffer2d, material::MaterialId, material::SolidColor, vertex::VertexInput};
    use vek::{Rgb, Vec2, Vec3};

    fn quad_mesh() -> Mesh {
        let vertices = [[-1.0, -1.0], [1.0, -1.0], [1.0, 1.0], [-1.0, 1.0]]
            .iter()
            .map(|&[x, y]| VertexInput::new(Vec3::new(x, y, 0.0), Vec2::zero(), Vec3::unit_z()))
            .collect();
        Mesh::new(vertices, vec![0, 1, 2, 0, 2, 3], MaterialId(0)).unwrap()
    }

    #[test]
    fn stats_accumulate() {
        let a = RasterStats { submitted: 1, rejected: 1, back_facing: 0, pixels_written: 0 };
        let b = RasterStats { submitted: 2, rejected: 0, back_facing: 1, pixels_written: 7 };
        assert_eq!(a + b, RasterStats { submitted: 3, rejected: 1, back_facing: 1, pixels_written: 7 });
    }

    #[test]
    fn untransformed_mesh_is_skipped() {
        let mut color = Buffer2d::fill([8, 8], 0u32);
        let mut depth = Buffer2d::fill([8, 8], f32::INFINITY);
        let mut ctx = FrameContext::new(&mut color, &mut depth);
        let stats = ctx.rasterize_mesh(&quad_mesh(), &SolidColor::new(Rgb::red()));
        assert_eq!(stats, RasterStats::default());
    }

    #[test]
    fn transparent_mesh_is_skipped() {
        let mut mesh = quad_mesh();
        let screen = mesh
            .vertices()
            .iter()
            .map(|v| VertexOutput::screen_space((v.position.x + 1.0) * 3.0, (1.0 - v.position.y) * 3.0, 0.5, 1.0))
            .collect();
        mesh.set_screen_space_vertices(screen).unwrap();

        let mut color = Buffer2d::fill([8, 8], 0u32);
        let mut depth = Buffer2d::fill([8, 8], f32::INFINITY);
        let mut ctx = FrameContext::new(&mut color, &mut depth);
        let stats = ctx.rasterize_mesh(&mesh, &SolidColor::new(Rgb::red()).transparent());
        assert_eq!(stats.submitted, 0);

        let stats = ctx.rasterize_mesh(&mesh, &SolidColor::new(Rgb::red()));
        assert_eq!(stats.submitted, 2);
        assert!(stats.pixels_written > 0);
    }

    #[test]
    #[should_panic]
    fn mismatched_targets_panic() {
        let _ = FrameContext::new(Buffer2d::fill([8, 8], 0u32), Buffer2d::fill([8, 4], 0.0f32));
    }
}
