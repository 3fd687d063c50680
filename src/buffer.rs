use crate::texture::{Target, Texture};
use core::fmt;

/// A 2-dimensional, row-major buffer that may be used both as a texture and as a render target.
///
/// This type may be used to contain colour data, depth data, or arbitrary pixel data. The item at `[x, y]` lives at
/// linear index `x + y * width`.
#[derive(Clone, PartialEq)]
pub struct Buffer2d<T> {
    size: [usize; 2],
    items: Vec<T>,
}

impl<T> Buffer2d<T> {
    /// Create a new buffer with the given size, filled with duplicates of the given element.
    #[inline]
    pub fn fill([width, height]: [usize; 2], item: T) -> Self
    where
        T: Clone,
    {
        Self {
            size: [width, height],
            items: vec![item; width * height],
        }
    }

    /// Create a new buffer with the given size, filled by calling the function for each position.
    pub fn fill_with<F: FnMut([usize; 2]) -> T>([width, height]: [usize; 2], mut f: F) -> Self {
        Self {
            size: [width, height],
            items: (0..height)
                .flat_map(|y| (0..width).map(move |x| [x, y]))
                .map(|pos| f(pos))
                .collect(),
        }
    }

    /// Wrap existing row-major items, returning them back if their count does not match the size.
    pub fn from_raw([width, height]: [usize; 2], items: Vec<T>) -> Result<Self, Vec<T>> {
        if items.len() == width * height {
            Ok(Self {
                size: [width, height],
                items,
            })
        } else {
            Err(items)
        }
    }

    #[inline(always)]
    pub fn width(&self) -> usize {
        self.size[0]
    }

    #[inline(always)]
    pub fn height(&self) -> usize {
        self.size[1]
    }

    /// Convert the given index into a linear index that can be used to index into the raw data of this buffer.
    #[inline(always)]
    pub fn linear_index(&self, [x, y]: [usize; 2]) -> usize {
        x + y * self.size[0]
    }

    /// View this buffer as a linear slice of elements.
    #[inline]
    pub fn raw(&self) -> &[T] {
        &self.items
    }

    /// View this buffer as a linear mutable slice of elements.
    #[inline]
    pub fn raw_mut(&mut self) -> &mut [T] {
        &mut self.items
    }

    /// Get a reference to the item at the given index, if it is within bounds.
    #[inline]
    pub fn get(&self, [x, y]: [usize; 2]) -> Option<&T> {
        if x < self.size[0] && y < self.size[1] {
            self.items.get(self.linear_index([x, y]))
        } else {
            None
        }
    }

    /// Get a mutable reference to the item at the given index.
    ///
    /// # Panics
    ///
    /// This function will panic if the index is not within bounds.
    #[inline]
    pub fn get_mut(&mut self, index: [usize; 2]) -> &mut T {
        let size = self.size;
        assert!(
            index[0] < size[0] && index[1] < size[1],
            "Attempted to access buffer of size {:?} at out-of-bounds location {:?}",
            size,
            index
        );
        let idx = self.linear_index(index);
        &mut self.items[idx]
    }

    /// Reallocate the buffer at a new size, filling every item with `item`.
    pub fn resize(&mut self, [width, height]: [usize; 2], item: T)
    where
        T: Clone,
    {
        self.size = [width, height];
        self.items.clear();
        self.items.resize(width * height, item);
    }
}

impl<T: Clone> Texture for Buffer2d<T> {
    type Texel = T;

    #[inline(always)]
    fn size(&self) -> [usize; 2] {
        self.size
    }

    #[inline]
    fn read(&self, index: [usize; 2]) -> Self::Texel {
        self.get(index)
            .unwrap_or_else(|| {
                panic!(
                    "Attempted to read buffer of size {:?} at out-of-bounds location {:?}",
                    self.size, index
                )
            })
            .clone()
    }
}

impl<T: Clone> Target for Buffer2d<T> {
    #[inline]
    fn write(&mut self, index: [usize; 2], texel: Self::Texel) {
        *self.get_mut(index) = texel;
    }

    #[inline]
    fn clear(&mut self, texel: Self::Texel) {
        self.items.iter_mut().for_each(|item| *item = texel.clone());
    }
}

impl<T> fmt::Debug for Buffer2d<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Buffer2d(dimensions: {:?})", self.size)
    }
}

#[cfg(feature = "image")]
mod image_support {
    use super::*;
    use crate::error::Result;
    use std::path::Path;
    use vek::Rgb;

    impl Buffer2d<Rgb<f32>> {
        /// Convert an 8-bit RGB image into a texture of normalised colors.
        pub fn from_image(image: &image::RgbImage) -> Self {
            Self::fill_with([image.width() as usize, image.height() as usize], |[x, y]| {
                let [r, g, b] = image.get_pixel(x as u32, y as u32).0;
                Rgb::new(r, g, b).map(|e| e as f32 / 255.0)
            })
        }

        /// Load a texture from an image file on disk.
        pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
            let image = image::open(path)?.to_rgb8();
            Ok(Self::from_image(&image))
        }
    }

    /// Save a packed color buffer as an image, unpacking each pixel with `unpack`.
    pub(crate) fn save_packed<P: AsRef<Path>>(
        buffer: &Buffer2d<u32>,
        path: P,
        unpack: impl Fn(u32) -> Rgb<u8>,
    ) -> Result<()> {
        let image = image::RgbImage::from_fn(buffer.width() as u32, buffer.height() as u32, |x, y| {
            let c = unpack(buffer.raw()[buffer.linear_index([x as usize, y as usize])]);
            image::Rgb([c.r, c.g, c.b])
        });
        image.save(path)?;
        Ok(())
    }
}

#[cfg(feature = "image")]
pub(crate) use image_support::save_packed;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_major_layout() {
        let buf = Buffer2d::fill_with([3, 2], |[x, y]| x + y * 10);
        assert_eq!(buf.raw(), &[0, 1, 2, 10, 11, 12]);
        assert_eq!(buf.linear_index([2, 1]), 5);
        assert_eq!(buf.read([1, 1]), 11);
    }

    #[test]
    fn clear_and_write() {
        let mut buf = Buffer2d::fill([4, 4], f32::INFINITY);
        buf.write([1, 2], 0.5);
        assert_eq!(buf.read([1, 2]), 0.5);
        buf.clear(f32::INFINITY);
        assert!(buf.raw().iter().all(|d| *d == f32::INFINITY));
    }

    #[test]
    fn out_of_bounds_get_is_none() {
        let buf = Buffer2d::fill([2, 2], 0u32);
        assert!(buf.get([2, 0]).is_none());
        assert!(buf.get([0, 2]).is_none());
    }

    #[test]
    fn from_raw_checks_length() {
        assert!(Buffer2d::from_raw([2, 2], vec![0u8; 4]).is_ok());
        assert_eq!(Buffer2d::from_raw([2, 2], vec![0u8; 3]).unwrap_err().len(), 3);
    }

    #[test]
    fn resize_reallocates() {
        let mut buf = Buffer2d::fill([2, 2], 1u32);
        buf.resize([3, 1], 7);
        assert_eq!(buf.size(), [3, 1]);
        assert_eq!(buf.raw(), &[7, 7, 7]);
    }
}
