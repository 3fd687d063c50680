use super::{brdf, Fragment, Material};
use crate::buffer::Buffer2d;
use vek::{Rgb, Vec3};

/// A material with diffuse, normal, glossiness and specular maps.
///
/// Shading adds a Phong highlight to the diffuse texel, with the exponent taken from the glossiness map (red channel)
/// scaled by `shininess`. Normals are perturbed by the tangent-space normal map.
#[derive(Clone, Debug)]
pub struct MappedMaterial {
    pub diffuse: Buffer2d<Rgb<f32>>,
    pub normal: Option<Buffer2d<Rgb<f32>>>,
    pub glossiness: Option<Buffer2d<Rgb<f32>>>,
    pub specular: Option<Buffer2d<Rgb<f32>>>,
    pub shininess: f32,
    pub transparent: bool,
}

impl MappedMaterial {
    pub fn new(diffuse: Buffer2d<Rgb<f32>>, shininess: f32) -> Self {
        Self {
            diffuse,
            normal: None,
            glossiness: None,
            specular: None,
            shininess,
            transparent: false,
        }
    }

    pub fn with_normal_map(self, normal: Buffer2d<Rgb<f32>>) -> Self {
        Self {
            normal: Some(normal),
            ..self
        }
    }

    pub fn with_specular(self, specular: Buffer2d<Rgb<f32>>, glossiness: Buffer2d<Rgb<f32>>) -> Self {
        Self {
            specular: Some(specular),
            glossiness: Some(glossiness),
            ..self
        }
    }
}

impl Material for MappedMaterial {
    fn shade(
        &self,
        fragment: &Fragment,
        light_direction: Vec3<f32>,
        view_direction: Vec3<f32>,
        normal: Vec3<f32>,
    ) -> Rgb<f32> {
        let mut color = fragment.sample(&self.diffuse);
        if let (Some(specular), Some(gloss)) = (&self.specular, &self.glossiness) {
            color += brdf::phong(
                fragment.sample(specular),
                fragment.sample(gloss).r * self.shininess,
                light_direction,
                view_direction,
                normal,
            );
        }
        color
    }

    fn mapped_normal(&self, fragment: &Fragment) -> Vec3<f32> {
        let normal_map = match &self.normal {
            Some(map) => map,
            None => return fragment.normal(),
        };

        let normal = fragment.attributes.normal;
        let tangent = fragment.attributes.tangent;
        let binormal = tangent.cross(normal);

        let sample = Vec3::from(fragment.sample(normal_map)) * 2.0 - Vec3::one();
        tangent * sample.x + binormal * sample.y + normal * sample.z
    }

    fn has_transparency(&self) -> bool {
        self.transparent
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vek::Vec2;

    fn fragment() -> Fragment {
        let mut frag = Fragment::default();
        frag.attributes.uv = Vec2::new(0.5, 0.5);
        frag.attributes.normal = Vec3::unit_z();
        frag.attributes.tangent = Vec3::unit_x();
        frag
    }

    #[test]
    fn flat_normal_map_keeps_normal() {
        // (0.5, 0.5, 1.0) encodes the unperturbed tangent-space normal
        let m = MappedMaterial::new(Buffer2d::fill([1, 1], Rgb::white()), 25.0)
            .with_normal_map(Buffer2d::fill([1, 1], Rgb::new(0.5, 0.5, 1.0)));
        assert_eq!(m.mapped_normal(&fragment()), Vec3::unit_z());
    }

    #[test]
    fn normal_map_tilts_along_tangent() {
        let m = MappedMaterial::new(Buffer2d::fill([1, 1], Rgb::white()), 25.0)
            .with_normal_map(Buffer2d::fill([1, 1], Rgb::new(1.0, 0.5, 0.5)));
        assert_eq!(m.mapped_normal(&fragment()), Vec3::unit_x());
    }

    #[test]
    fn without_normal_map_uses_interpolated_normal() {
        let m = MappedMaterial::new(Buffer2d::fill([1, 1], Rgb::white()), 25.0);
        assert_eq!(m.mapped_normal(&fragment()), Vec3::unit_z());
    }

    #[test]
    fn specular_adds_to_diffuse() {
        let diffuse = Rgb::new(0.2, 0.1, 0.0);
        let plain = MappedMaterial::new(Buffer2d::fill([1, 1], diffuse), 10.0);
        let shiny = plain
            .clone()
            .with_specular(Buffer2d::fill([1, 1], Rgb::one()), Buffer2d::fill([1, 1], Rgb::one()));

        let frag = fragment();
        let l = -Vec3::unit_z();
        let n = Vec3::unit_z();
        let v = -Vec3::unit_z();
        assert_eq!(plain.shade(&frag, l, v, n), diffuse);
        assert_eq!(shiny.shade(&frag, l, v, n), diffuse + Rgb::one());
    }
}
