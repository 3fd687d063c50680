use crate::{
    error::Result,
    material::FilterMode,
    renderer::RenderSystem,
    shading::{Light, PixelFormat, RenderMode},
};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};
use vek::Rgb;

/// User-facing renderer settings, stored as RON.
///
/// Every field is optional in the serialized form; missing fields take their default values.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    pub width: usize,
    pub height: usize,
    /// Vertical field of view, in degrees.
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub render_mode: RenderMode,
    pub render_system: RenderSystem,
    pub rotate_objects: bool,
    /// Mesh rotation speed, in radians per second.
    pub rotation_speed: f32,
    pub clear_color: Rgb<u8>,
    pub light: Light,
    pub pixel_format: PixelFormat,
    /// The texture filter a [`MaterialLibrary`](crate::material::MaterialLibrary) should start with.
    pub filter: FilterMode,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            fov_degrees: 45.0,
            near: 0.1,
            far: 100.0,
            render_mode: RenderMode::default(),
            render_system: RenderSystem::default(),
            rotate_objects: true,
            rotation_speed: 0.5,
            clear_color: Rgb::new(128, 128, 128),
            light: Light::default(),
            pixel_format: PixelFormat::default(),
            filter: FilterMode::default(),
        }
    }
}

impl RenderSettings {
    /// Parse settings from RON text.
    pub fn from_ron(s: &str) -> Result<Self> {
        Ok(ron::from_str(s)?)
    }

    /// Load settings from a RON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        let settings = Self::from_ron(&contents)?;
        log::info!("Loaded render settings from {}", path.display());
        Ok(settings)
    }

    /// Serialize the settings as pretty-printed RON.
    pub fn to_ron(&self) -> Result<String> {
        let config = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .indentor("  ".to_string());
        Ok(ron::ser::to_string_pretty(self, config)?)
    }

    /// Save the settings to a RON file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        fs::write(path, self.to_ron()?)?;
        Ok(())
    }
}
