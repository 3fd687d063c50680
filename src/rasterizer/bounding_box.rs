use vek::Vec2;

/// An inclusive rectangle of pixels.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BoundingBox {
    pub min: [usize; 2],
    pub max: [usize; 2],
}

impl BoundingBox {
    /// The pixels a triangle may cover: the bounds of its screen positions grown by a 1-pixel margin and clamped to a
    /// target of the given size.
    ///
    /// Returns `None` when the target is empty or the triangle lies entirely off-screen.
    pub fn of_triangle([a, b, c]: [Vec2<f32>; 3], [width, height]: [usize; 2]) -> Option<Self> {
        if width == 0 || height == 0 {
            return None;
        }
        let max_px = Vec2::new((width - 1) as f32, (height - 1) as f32);

        let min = Vec2::<f32>::partial_min(Vec2::<f32>::partial_min(a, b), c) - 1.0;
        let max = Vec2::<f32>::partial_max(Vec2::<f32>::partial_max(a, b), c) + 1.0;

        // Entirely off one side of the screen
        if max.x < 0.0 || max.y < 0.0 || min.x > max_px.x || min.y > max_px.y {
            return None;
        }
        // NaN positions fail every comparison above, so reject them here
        if !(min.x <= max.x && min.y <= max.y) {
            return None;
        }

        let min = Vec2::<f32>::partial_min(Vec2::<f32>::partial_max(min, Vec2::zero()), max_px);
        let max = Vec2::<f32>::partial_min(Vec2::<f32>::partial_max(max, Vec2::zero()), max_px);

        Some(Self {
            min: [min.x as usize, min.y as usize],
            max: [max.x as usize, max.y as usize],
        })
    }

    /// The number of pixels in the box.
    pub fn area(&self) -> usize {
        (self.max[0] + 1 - self.min[0]) * (self.max[1] + 1 - self.min[1])
    }

    /// Every pixel in the box, row by row.
    pub fn pixels(&self) -> impl Iterator<Item = [usize; 2]> {
        let (min, max) = (self.min, self.max);
        (min[1]..=max[1]).flat_map(move |y| (min[0]..=max[0]).map(move |x| [x, y]))
    }
}
