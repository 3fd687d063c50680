use crate::sampler::{Linear, Nearest};

/// A trait implemented by 2-dimensional types that may be treated as textures.
pub trait Texture {
    /// The type of texture elements.
    type Texel: Clone;

    /// Get the size of the texture in texels, as `[width, height]`.
    fn size(&self) -> [usize; 2];

    /// Read a texel at the given index.
    ///
    /// # Panics
    ///
    /// The behaviour of this function is *unspecified* (but not *undefined*) when the index is out of bounds. The
    /// implementation is free to panic, return an entirely different texel, or return texel data not in the texture at
    /// all.
    fn read(&self, index: [usize; 2]) -> Self::Texel;

    /// Create a bilinearly interpolated (i.e: filtered) sampler from this texture.
    ///
    /// See [`Linear`].
    fn linear(self) -> Linear<Self>
    where
        Self: Sized,
    {
        Linear::new(self)
    }

    /// Create a nearest-neighbour (i.e: unfiltered) sampler from this texture.
    ///
    /// See [`Nearest`].
    fn nearest(self) -> Nearest<Self>
    where
        Self: Sized,
    {
        Nearest::new(self)
    }
}

impl<'a, T: Texture> Texture for &'a T {
    type Texel = T::Texel;
    #[inline(always)]
    fn size(&self) -> [usize; 2] {
        (**self).size()
    }
    #[inline(always)]
    fn read(&self, index: [usize; 2]) -> Self::Texel {
        (**self).read(index)
    }
}

/// A trait implemented by textures that may be written to as render targets.
///
/// The rasterizer only ever touches individual cells: it reads a cell to perform the depth test and conditionally
/// overwrites it.
pub trait Target: Texture {
    /// Write a texel at the given index.
    ///
    /// # Panics
    ///
    /// The behaviour of this function is *unspecified* (but not *undefined*) when the index is out of bounds. The
    /// implementation is free to panic, write to an entirely different texel, or do nothing.
    fn write(&mut self, index: [usize; 2], texel: Self::Texel);

    /// Clears the entire target with the given texel.
    fn clear(&mut self, texel: Self::Texel) {
        let [width, height] = self.size();
        for y in 0..height {
            for x in 0..width {
                self.write([x, y], texel.clone());
            }
        }
    }
}

impl<T: Target> Texture for &mut T {
    type Texel = T::Texel;
    #[inline(always)]
    fn size(&self) -> [usize; 2] {
        (**self).size()
    }
    #[inline(always)]
    fn read(&self, index: [usize; 2]) -> Self::Texel {
        (**self).read(index)
    }
}

impl<T: Target> Target for &mut T {
    #[inline(always)]
    fn write(&mut self, index: [usize; 2], texel: Self::Texel) {
        T::write(self, index, texel);
    }
    #[inline(always)]
    fn clear(&mut self, texel: Self::Texel) {
        T::clear(self, texel);
    }
}
