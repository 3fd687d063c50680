use super::{Fragment, Material};
use crate::buffer::Buffer2d;
use vek::{Rgb, Vec3};

/// A material that reflects its diffuse texture, without any specular highlights.
#[derive(Clone, Debug)]
pub struct FlatMaterial {
    diffuse: Buffer2d<Rgb<f32>>,
    transparent: bool,
}

impl FlatMaterial {
    pub fn new(diffuse: Buffer2d<Rgb<f32>>) -> Self {
        Self {
            diffuse,
            transparent: false,
        }
    }

    /// Mark this material as transparent (for example, a fire or glass overlay).
    pub fn transparent(self) -> Self {
        Self {
            transparent: true,
            ..self
        }
    }

    pub fn diffuse(&self) -> &Buffer2d<Rgb<f32>> {
        &self.diffuse
    }
}

impl Material for FlatMaterial {
    fn shade(&self, fragment: &Fragment, _: Vec3<f32>, _: Vec3<f32>, _: Vec3<f32>) -> Rgb<f32> {
        fragment.sample(&self.diffuse)
    }

    fn has_transparency(&self) -> bool {
        self.transparent
    }
}
