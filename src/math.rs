use vek::{Rgb, Vec2};

/// The 2D cross product of `a` and `b` (the z component of their 3D cross product at z = 0).
#[inline(always)]
pub fn cross_2d(a: Vec2<f32>, b: Vec2<f32>) -> f32 {
    a.x * b.y - a.y * b.x
}

/// Linearly remap `x` so that `min` maps to 0 and `max` maps to 1. The result is not clamped.
#[inline(always)]
pub fn remap(x: f32, min: f32, max: f32) -> f32 {
    (x - min) / (max - min)
}

/// Uniformly rescale a color so that its brightest channel does not exceed 1.
///
/// Unlike per-channel clamping, this preserves the hue of over-exposed colors.
#[inline]
pub fn max_to_one(color: Rgb<f32>) -> Rgb<f32> {
    let max = color.r.max(color.g).max(color.b);
    if max > 1.0 {
        color.map(|e| e / max)
    } else {
        color
    }
}

/// Conversion of normalised coordinates (between 0 and 1) into indices of a discrete range.
pub trait Denormalize<T>: Sized {
    fn denormalize_to(self, scale: T) -> T;
    fn denormalize_array<const N: usize>(this: [Self; N], other: [T; N]) -> [T; N];
}

impl Denormalize<usize> for f32 {
    #[inline(always)]
    fn denormalize_to(self, scale: usize) -> usize {
        ((self * scale as f32).max(0.0) as usize).min(scale.saturating_sub(1))
    }

    #[inline(always)]
    fn denormalize_array<const N: usize>(this: [Self; N], other: [usize; N]) -> [usize; N] {
        let mut out = [0; N];
        (0..N).for_each(|i| out[i] = this[i].denormalize_to(other[i]));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cross_2d_sign_follows_orientation() {
        assert_eq!(cross_2d(Vec2::new(1.0, 0.0), Vec2::new(0.0, 1.0)), 1.0);
        assert_eq!(cross_2d(Vec2::new(0.0, 1.0), Vec2::new(1.0, 0.0)), -1.0);
        assert_eq!(cross_2d(Vec2::new(2.0, 2.0), Vec2::new(4.0, 4.0)), 0.0);
    }

    #[test]
    fn remap_narrow_depth_range() {
        assert_eq!(remap(0.985, 0.985, 1.0), 0.0);
        assert_eq!(remap(1.0, 0.985, 1.0), 1.0);
        assert!(remap(0.5, 0.985, 1.0) < 0.0);
    }

    #[test]
    fn max_to_one_preserves_hue() {
        let c = max_to_one(Rgb::new(2.0, 1.0, 0.5));
        assert_eq!(c, Rgb::new(1.0, 0.5, 0.25));

        let untouched = Rgb::new(0.2, 0.9, 1.0);
        assert_eq!(max_to_one(untouched), untouched);
    }

    #[test]
    fn denormalize_clamps_to_last_index() {
        assert_eq!(0.0f32.denormalize_to(4usize), 0);
        assert_eq!(0.5f32.denormalize_to(4usize), 2);
        assert_eq!(1.0f32.denormalize_to(4usize), 3);
        assert_eq!((-0.5f32).denormalize_to(4usize), 0);
        assert_eq!(f32::denormalize_array([0.99, 0.0], [10usize, 3]), [9, 0]);
    }
}
