//! Surface materials consumed by the shading dispatch.
//!
//! The rasterizer only ever needs the [`Material`] capability: a shading function, an optional normal-mapping
//! function and a transparency predicate. Concrete materials are stored in a [`MaterialLibrary`] and referenced by
//! meshes through their [`MaterialId`].

pub mod brdf;
mod flat;
mod mapped;

pub use self::{flat::FlatMaterial, mapped::MappedMaterial};

use crate::{
    buffer::Buffer2d,
    error::{Error, Result},
    sampler::Sampler,
    texture::Texture,
    vertex::VertexOutput,
};
use core::fmt;
use fxhash::FxHashMap;
use serde::{Deserialize, Serialize};
use vek::{Rgb, Vec2, Vec3};

/// The identifier of a material within a [`MaterialLibrary`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MaterialId(pub u32);

/// The texture filter that materials sample with.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FilterMode {
    /// Nearest-neighbour (point) sampling.
    #[default]
    Nearest,
    /// Bilinear sampling.
    Linear,
}

impl FilterMode {
    /// The next filter mode in the cycle.
    pub fn next(self) -> Self {
        match self {
            FilterMode::Nearest => FilterMode::Linear,
            FilterMode::Linear => FilterMode::Nearest,
        }
    }

    /// Sample a color texture at `uv` with this filter.
    #[inline]
    pub fn sample(self, texture: &Buffer2d<Rgb<f32>>, uv: Vec2<f32>) -> Rgb<f32> {
        match self {
            FilterMode::Nearest => texture.nearest().sample(uv),
            FilterMode::Linear => texture.linear().sample(uv),
        }
    }
}

/// A single fragment: the perspective-correct interpolated attributes of a pixel, along with the filter its material
/// should sample textures with.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Fragment {
    pub attributes: VertexOutput,
    pub filter: FilterMode,
}

impl Fragment {
    pub fn new(attributes: VertexOutput, filter: FilterMode) -> Self {
        Self { attributes, filter }
    }

    #[inline(always)]
    pub fn uv(&self) -> Vec2<f32> {
        self.attributes.uv
    }

    #[inline(always)]
    pub fn normal(&self) -> Vec3<f32> {
        self.attributes.normal
    }

    /// Sample a color texture at this fragment's uv coordinate.
    #[inline(always)]
    pub fn sample(&self, texture: &Buffer2d<Rgb<f32>>) -> Rgb<f32> {
        self.filter.sample(texture, self.attributes.uv)
    }
}

/// The shading capability of a surface.
pub trait Material {
    /// Compute the reflected color of a fragment, before lighting intensity and the Lambert term are applied.
    fn shade(
        &self,
        fragment: &Fragment,
        light_direction: Vec3<f32>,
        view_direction: Vec3<f32>,
        normal: Vec3<f32>,
    ) -> Rgb<f32>;

    /// The surface normal of a fragment after normal mapping, if the material supports it.
    fn mapped_normal(&self, fragment: &Fragment) -> Vec3<f32> {
        fragment.normal()
    }

    /// Transparent materials are skipped entirely by the software path, since it performs no blending.
    fn has_transparency(&self) -> bool {
        false
    }
}

impl<'a, M: Material + ?Sized> Material for &'a M {
    #[inline(always)]
    fn shade(&self, fragment: &Fragment, light_direction: Vec3<f32>, view_direction: Vec3<f32>, normal: Vec3<f32>) -> Rgb<f32> {
        (**self).shade(fragment, light_direction, view_direction, normal)
    }
    #[inline(always)]
    fn mapped_normal(&self, fragment: &Fragment) -> Vec3<f32> {
        (**self).mapped_normal(fragment)
    }
    #[inline(always)]
    fn has_transparency(&self) -> bool {
        (**self).has_transparency()
    }
}

/// A material that reflects a single constant color.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SolidColor {
    pub color: Rgb<f32>,
    pub transparent: bool,
}

impl SolidColor {
    pub fn new(color: Rgb<f32>) -> Self {
        Self {
            color,
            transparent: false,
        }
    }

    pub fn transparent(self) -> Self {
        Self {
            transparent: true,
            ..self
        }
    }
}

impl Material for SolidColor {
    #[inline]
    fn shade(&self, _: &Fragment, _: Vec3<f32>, _: Vec3<f32>, _: Vec3<f32>) -> Rgb<f32> {
        self.color
    }

    fn has_transparency(&self) -> bool {
        self.transparent
    }
}

/// A store of materials, keyed by [`MaterialId`].
///
/// The library also owns the texture filter mode that every material samples with.
#[derive(Default)]
pub struct MaterialLibrary {
    materials: FxHashMap<MaterialId, Box<dyn Material>>,
    next_id: u32,
    filter: FilterMode,
}

impl MaterialLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a material, returning the identifier it was assigned.
    pub fn add<M: Material + 'static>(&mut self, material: M) -> MaterialId {
        while self.materials.contains_key(&MaterialId(self.next_id)) {
            self.next_id += 1;
        }
        let id = MaterialId(self.next_id);
        self.next_id += 1;
        self.materials.insert(id, Box::new(material));
        id
    }

    /// Store a material under a specific identifier, replacing and returning any previous material with that id.
    pub fn insert<M: Material + 'static>(&mut self, id: MaterialId, material: M) -> Option<Box<dyn Material>> {
        self.materials.insert(id, Box::new(material))
    }

    pub fn get(&self, id: MaterialId) -> Option<&dyn Material> {
        self.materials.get(&id).map(|m| &**m)
    }

    /// Like [`MaterialLibrary::get`], but reports a missing material as an error.
    pub fn try_get(&self, id: MaterialId) -> Result<&dyn Material> {
        self.get(id).ok_or(Error::UnknownMaterial(id))
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    pub fn filter(&self) -> FilterMode {
        self.filter
    }

    pub fn set_filter(&mut self, filter: FilterMode) {
        self.filter = filter;
    }

    /// Switch to the next texture filter, returning the new one.
    pub fn cycle_filter(&mut self) -> FilterMode {
        self.filter = self.filter.next();
        log::info!("Texture filter set to {:?}", self.filter);
        self.filter
    }
}

impl fmt::Debug for MaterialLibrary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("MaterialLibrary")
            .field("materials", &self.materials.len())
            .field("filter", &self.filter)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn library_assigns_fresh_ids() {
        let mut lib = MaterialLibrary::new();
        lib.insert(MaterialId(0), SolidColor::new(Rgb::red()));
        let a = lib.add(SolidColor::new(Rgb::green()));
        let b = lib.add(SolidColor::new(Rgb::blue()));
        assert_ne!(a, MaterialId(0));
        assert_ne!(a, b);
        assert_eq!(lib.len(), 3);

        let frag = Fragment::default();
        let shade = |id| lib.get(id).unwrap().shade(&frag, Vec3::zero(), Vec3::zero(), Vec3::zero());
        assert_eq!(shade(a), Rgb::green());
        assert_eq!(shade(b), Rgb::blue());
    }

    #[test]
    fn unknown_material_is_an_error() {
        let lib = MaterialLibrary::new();
        assert!(matches!(lib.try_get(MaterialId(3)), Err(Error::UnknownMaterial(MaterialId(3)))));
    }

    #[test]
    fn filter_cycles() {
        let mut lib = MaterialLibrary::new();
        assert_eq!(lib.filter(), FilterMode::Nearest);
        assert_eq!(lib.cycle_filter(), FilterMode::Linear);
        assert_eq!(lib.cycle_filter(), FilterMode::Nearest);
    }

    #[test]
    fn default_mapped_normal_is_interpolated_normal() {
        let mut frag = Fragment::default();
        frag.attributes.normal = Vec3::unit_y();
        let m = SolidColor::new(Rgb::white());
        assert_eq!(m.mapped_normal(&frag), Vec3::unit_y());
        assert!(!m.has_transparency());
        assert!(m.transparent().has_transparency());
    }
}
