use super::{BoundingBox, EdgeFunctions, FrameContext, RasterStats};
use crate::{
    interpolate::{interpolate_depth, interpolate_edge_depth, perspective_correct},
    material::{Fragment, Material},
    shading::{shade_fragment, to_rgb8},
    texture::Target,
    vertex::VertexOutput,
};
use vek::Vec2;

impl<C, D> FrameContext<C, D>
where
    C: Target<Texel = u32>,
    D: Target<Texel = f32>,
{
    /// Rasterize a single screen-space triangle into the color and depth targets.
    ///
    /// The triangle is rejected as a whole if any of its vertices was culled by the camera transform or lies behind
    /// the near plane. Triangles that do not face the camera under the frame's coordinate convention cover no pixels.
    pub fn rasterize_triangle<M: Material + ?Sized>(
        &mut self,
        [a, b, c]: [&VertexOutput; 3],
        material: &M,
    ) -> RasterStats {
        let mut stats = RasterStats {
            submitted: 1,
            ..RasterStats::default()
        };

        // Reject triangles leaving the view volume, judging the near plane by the undivided depth
        if a.culled || b.culled || c.culled {
            stats.rejected = 1;
            return stats;
        }
        if a.behind_near_plane() || b.behind_near_plane() || c.behind_near_plane() {
            stats.rejected = 1;
            return stats;
        }

        let screen = [a.screen(), b.screen(), c.screen()];
        let edges = EdgeFunctions::new(screen, &self.convention);

        // Every pixel of a back-facing or degenerate triangle would fail the membership test
        if !edges.is_front_facing() {
            stats.back_facing = 1;
            return stats;
        }

        let bounds = match BoundingBox::of_triangle(screen, self.size()) {
            Some(bounds) => bounds,
            None => return stats,
        };

        let depths = [a.depth(), b.depth(), c.depth()];
        let ws = [a.w(), b.w(), c.w()];

        for [x, y] in bounds.pixels() {
            // Pixel centres lie on integer coordinates
            let p = Vec2::new(x as f32, y as f32);

            let tri = match edges.evaluate(p) {
                Some(tri) => tri,
                None => continue,
            };

            // Depth test. Ties keep the existing fragment.
            let z = fragment_depth(p, screen, depths, tri.edges);
            if !z.is_finite() || !(z < self.depth.read([x, y])) {
                continue;
            }

            let attributes = perspective_correct([*a, *b, *c], tri.weights, ws);
            let fragment = Fragment::new(attributes, self.filter);
            let color = shade_fragment(self.mode, material, &fragment, z, &self.light);

            self.depth.write([x, y], z);
            self.color.write([x, y], self.pixel_format.pack(to_rgb8(color)));
            stats.pixels_written += 1;
        }

        stats
    }
}

/// The device depth of a pixel at `p` inside a triangle, given its edge function values.
///
/// Pixels on a vertex take that vertex's depth and pixels on an edge are interpolated along that edge alone, so
/// triangles sharing the vertex or edge agree on the depth bit for bit.
fn fragment_depth(p: Vec2<f32>, screen: [Vec2<f32>; 3], depths: [f32; 3], edges: [f32; 3]) -> f32 {
    match edges.map(|e| e == 0.0) {
        [false, true, true] => depths[0],
        [true, false, true] => depths[1],
        [true, true, false] => depths[2],
        // An edge value is the weight of the opposite vertex, so a zero puts `p` on the edge between the other two
        [true, _, _] => interpolate_edge_depth(p, (screen[1], depths[1]), (screen[2], depths[2])),
        [_, true, _] => interpolate_edge_depth(p, (screen[2], depths[2]), (screen[0], depths[0])),
        [_, _, true] => interpolate_edge_depth(p, (screen[0], depths[0]), (screen[1], depths[1])),
        _ => interpolate_depth(edges, depths),
    }
}
