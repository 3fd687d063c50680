use crate::{math::Denormalize, texture::Texture};
use core::ops::{Add, Mul};
use vek::Vec2;

/// A trait that describes a sampler of a texture.
///
/// Samplers use normalised coordinates (between 0 and 1) to sample textures. Coordinates outside that range are
/// clamped to the texture's edge.
pub trait Sampler {
    /// The type the sampler emits when sampled.
    type Sample: Clone;

    /// Sample the texture at the given normalised coordinate.
    fn sample(&self, uv: Vec2<f32>) -> Self::Sample;
}

#[inline(always)]
fn clamp_uv(uv: Vec2<f32>) -> [f32; 2] {
    // `clamp` would propagate NaN, `max`/`min` pick the non-NaN side
    [uv.x.max(0.0).min(1.0), uv.y.max(0.0).min(1.0)]
}

/// A sampler that uses nearest-neighbor sampling.
#[derive(Clone, Debug)]
pub struct Nearest<T>(T);

impl<T: Texture> Nearest<T> {
    /// # Panics
    ///
    /// Panics if the texture has no texels.
    pub fn new(texture: T) -> Self {
        let [width, height] = texture.size();
        assert!(width >= 1 && height >= 1, "Nearest-neighbour texture cannot have no size");
        Self(texture)
    }
}

impl<T: Texture> Sampler for Nearest<T> {
    type Sample = T::Texel;

    #[inline(always)]
    fn sample(&self, uv: Vec2<f32>) -> Self::Sample {
        self.0.read(f32::denormalize_array(clamp_uv(uv), self.0.size()))
    }
}

/// A sampler that uses bilinear filtering between the four closest texels.
#[derive(Clone, Debug)]
pub struct Linear<T>(T);

impl<T: Texture> Linear<T> {
    /// # Panics
    ///
    /// Panics if the texture has no texels.
    pub fn new(texture: T) -> Self {
        let [width, height] = texture.size();
        assert!(width >= 1 && height >= 1, "Linearly-interpolated texture cannot have no size");
        Self(texture)
    }
}

impl<T> Sampler for Linear<T>
where
    T: Texture,
    T::Texel: Mul<f32, Output = T::Texel> + Add<Output = T::Texel>,
{
    type Sample = T::Texel;

    fn sample(&self, uv: Vec2<f32>) -> Self::Sample {
        let size = self.0.size();
        let uv = clamp_uv(uv);
        // Index in texel coordinates, with texel centres at half-integers
        let index_tex = [
            (uv[0] * size[0] as f32 - 0.5).max(0.0),
            (uv[1] * size[1] as f32 - 0.5).max(0.0),
        ];
        let posi = index_tex.map(|e| e.trunc() as usize);
        let fract = index_tex.map(|e| e.fract());

        let p0x = posi[0].min(size[0].saturating_sub(1));
        let p0y = posi[1].min(size[1].saturating_sub(1));
        let p1x = (posi[0] + 1).min(size[0].saturating_sub(1));
        let p1y = (posi[1] + 1).min(size[1].saturating_sub(1));

        let t00 = self.0.read([p0x, p0y]);
        let t10 = self.0.read([p1x, p0y]);
        let t01 = self.0.read([p0x, p1y]);
        let t11 = self.0.read([p1x, p1y]);

        let t0 = t00 * (1.0 - fract[1]) + t01 * fract[1];
        let t1 = t10 * (1.0 - fract[1]) + t11 * fract[1];

        t0 * (1.0 - fract[0]) + t1 * fract[0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::Buffer2d;

    fn checker() -> Buffer2d<f32> {
        Buffer2d::fill_with([2, 2], |[x, y]| ((x + y) % 2) as f32)
    }

    #[test]
    fn nearest_picks_containing_texel() {
        let tex = checker();
        let s = (&tex).nearest();
        assert_eq!(s.sample(Vec2::new(0.1, 0.1)), 0.0);
        assert_eq!(s.sample(Vec2::new(0.9, 0.1)), 1.0);
        assert_eq!(s.sample(Vec2::new(0.9, 0.9)), 0.0);
    }

    #[test]
    fn nearest_clamps_out_of_range_coordinates() {
        let tex = checker();
        let s = (&tex).nearest();
        assert_eq!(s.sample(Vec2::new(1.0, 0.0)), 1.0);
        assert_eq!(s.sample(Vec2::new(7.0, -3.0)), 1.0);
        assert_eq!(s.sample(Vec2::new(f32::NAN, 0.0)), 0.0);
    }

    #[test]
    #[should_panic]
    fn empty_texture_cannot_be_sampled() {
        let tex = Buffer2d::<f32>::fill([0, 4], 0.0);
        let _ = tex.linear();
    }

    #[test]
    fn linear_blends_between_texels() {
        let tex = Buffer2d::fill_with([2, 1], |[x, _]| x as f32);
        let s = tex.linear();
        assert_eq!(s.sample(Vec2::new(0.25, 0.5)), 0.0);
        assert_eq!(s.sample(Vec2::new(0.75, 0.5)), 1.0);
        assert!((s.sample(Vec2::new(0.5, 0.5)) - 0.5).abs() < 1e-6);
    }
}
