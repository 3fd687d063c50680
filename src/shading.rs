use crate::{
    material::{Fragment, Material},
    math::{max_to_one, remap},
};
use core::f32::consts::PI;
use serde::{Deserialize, Serialize};
use vek::{Rgb, Vec3};

/// The near end of the device depth range shown by [`RenderMode::Depth`].
///
/// Most of the projection's depth precision sits just below 1, so visualising the full range would show a flat
/// white image.
pub const DEPTH_VIEW_MIN: f32 = 0.985;

/// What the shading dispatch writes into the color buffer.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RenderMode {
    /// Full material shading under the scene light.
    #[default]
    Color,
    /// Device depth as grayscale.
    Depth,
    /// Absolute value of the interpolated normal.
    Normal,
    /// Absolute value of the normal after normal mapping.
    NormalMapped,
}

impl RenderMode {
    /// The next render mode in the cycle.
    pub fn next(self) -> Self {
        match self {
            RenderMode::Color => RenderMode::Depth,
            RenderMode::Depth => RenderMode::Normal,
            RenderMode::Normal => RenderMode::NormalMapped,
            RenderMode::NormalMapped => RenderMode::Color,
        }
    }
}

/// A directional light.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Light {
    /// The direction the light travels in.
    pub direction: Vec3<f32>,
    pub color: Rgb<f32>,
    pub intensity: f32,
}

impl Default for Light {
    fn default() -> Self {
        Self {
            direction: Vec3::new(0.577, -0.577, -0.577),
            color: Rgb::white(),
            intensity: 7.0,
        }
    }
}

/// The layout of the 32-bit pixels in the color buffer.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PixelFormat {
    /// `0xAARRGGBB`
    #[default]
    Argb8888,
    /// Bytes `[r, g, b, a]` in memory order.
    Rgba8888,
}

impl PixelFormat {
    /// Pack an opaque 8-bit color into a pixel.
    #[inline]
    pub fn pack(self, color: Rgb<u8>) -> u32 {
        match self {
            PixelFormat::Argb8888 => {
                0xFF00_0000 | (color.r as u32) << 16 | (color.g as u32) << 8 | color.b as u32
            }
            PixelFormat::Rgba8888 => u32::from_le_bytes([color.r, color.g, color.b, 0xFF]),
        }
    }

    /// Unpack a pixel into its 8-bit color, dropping alpha.
    #[inline]
    pub fn unpack(self, pixel: u32) -> Rgb<u8> {
        match self {
            PixelFormat::Argb8888 => Rgb::new((pixel >> 16) as u8, (pixel >> 8) as u8, pixel as u8),
            PixelFormat::Rgba8888 => {
                let [r, g, b, _] = pixel.to_le_bytes();
                Rgb::new(r, g, b)
            }
        }
    }
}

/// Convert a color to 8 bits per channel, clamping each channel to `[0, 1]` first.
#[inline]
pub fn to_rgb8(color: Rgb<f32>) -> Rgb<u8> {
    color.map(|e| (e.max(0.0).min(1.0) * 255.0) as u8)
}

/// Compute the color of a fragment under the given render mode.
///
/// `depth` is the fragment's interpolated device depth.
pub fn shade_fragment<M: Material + ?Sized>(
    mode: RenderMode,
    material: &M,
    fragment: &Fragment,
    depth: f32,
    light: &Light,
) -> Rgb<f32> {
    match mode {
        RenderMode::Color => {
            let normal = material.mapped_normal(fragment);
            let lambert = (-normal).dot(light.direction);
            if lambert < 0.0 {
                return Rgb::black();
            }
            let irradiance = light.color * (light.intensity / PI);
            let reflected = material.shade(
                fragment,
                light.direction,
                fragment.attributes.view_direction,
                normal,
            );
            max_to_one(irradiance * reflected * lambert)
        }
        RenderMode::Depth => Rgb::broadcast(remap(depth, DEPTH_VIEW_MIN, 1.0)),
        RenderMode::Normal => Rgb::from(fragment.normal().map(f32::abs)),
        RenderMode::NormalMapped => Rgb::from(material.mapped_normal(fragment).map(f32::abs)),
    }
}
