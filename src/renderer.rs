use crate::{
    buffer::Buffer2d,
    convention::CoordinateConvention,
    material::MaterialLibrary,
    rasterizer::{FrameContext, RasterStats},
    scene::SceneGraph,
    shading::PixelFormat,
    texture::{Target, Texture},
};
use serde::{Deserialize, Serialize};
use vek::Rgb;

/// The rendering path that produces a frame. Exactly one is active at a time.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RenderSystem {
    /// The CPU rasterizer.
    #[default]
    Software,
    /// A GPU backend, driven elsewhere. The software path writes nothing while it is active.
    Hardware,
}

impl RenderSystem {
    pub fn next(self) -> Self {
        match self {
            RenderSystem::Software => RenderSystem::Hardware,
            RenderSystem::Hardware => RenderSystem::Software,
        }
    }

    /// The coordinate convention used by this render system.
    pub fn convention(self) -> CoordinateConvention {
        match self {
            RenderSystem::Software => CoordinateConvention::SOFTWARE,
            RenderSystem::Hardware => CoordinateConvention::DIRECTX,
        }
    }
}

/// The software frame driver: owns the color and depth buffers and renders scenes into them.
#[derive(Debug)]
pub struct Renderer {
    color: Buffer2d<u32>,
    depth: Buffer2d<f32>,
}

impl Renderer {
    pub fn new(size: [usize; 2]) -> Self {
        Self {
            color: Buffer2d::fill(size, 0),
            depth: Buffer2d::fill(size, f32::INFINITY),
        }
    }

    pub fn size(&self) -> [usize; 2] {
        self.color.size()
    }

    /// The packed pixels of the last rendered frame.
    pub fn color_buffer(&self) -> &Buffer2d<u32> {
        &self.color
    }

    /// The device depths of the last rendered frame.
    pub fn depth_buffer(&self) -> &Buffer2d<f32> {
        &self.depth
    }

    /// Reallocate both buffers at a new size.
    pub fn resize(&mut self, size: [usize; 2]) {
        log::debug!("Resizing frame buffers to {:?}", size);
        self.color.resize(size, 0);
        self.depth.resize(size, f32::INFINITY);
    }

    /// Reset the buffers to their frame-start state: depth to +∞ and color to `clear_color`.
    pub fn clear(&mut self, clear_color: Rgb<u8>, pixel_format: PixelFormat) {
        self.color.clear(pixel_format.pack(clear_color));
        self.depth.clear(f32::INFINITY);
    }

    /// Render the current scene of `scene` with the software rasterizer.
    ///
    /// Every mesh of the scene is transformed by the camera and then rasterized, in order. Meshes whose material is
    /// missing from `materials` are skipped. Nothing is written while the hardware system is active.
    pub fn render(&mut self, scene: &mut SceneGraph, materials: &MaterialLibrary) -> RasterStats {
        let settings = scene.settings().clone();
        if settings.render_system != RenderSystem::Software {
            return RasterStats::default();
        }

        let size = scene.camera().size();
        if size != self.size() {
            self.resize(size);
        }

        self.clear(settings.clear_color, settings.pixel_format);
        log::debug!("Cleared {}x{} frame", size[0], size[1]);

        scene.transform_current_scene();

        let mut ctx = FrameContext::new(&mut self.color, &mut self.depth)
            .with_mode(settings.render_mode)
            .with_light(settings.light)
            .with_convention(scene.camera().convention().clone())
            .with_pixel_format(settings.pixel_format)
            .with_filter(materials.filter());

        let mut stats = RasterStats::default();
        for mesh in scene.current_meshes() {
            match materials.try_get(mesh.material()) {
                Ok(material) => stats += ctx.rasterize_mesh(mesh, material),
                Err(err) => log::warn!("Skipping mesh: {}", err),
            }
        }

        log::debug!(
            "Frame done: {} triangles submitted, {} rejected, {} back-facing, {} pixels written",
            stats.submitted,
            stats.rejected,
            stats.back_facing,
            stats.pixels_written,
        );
        stats
    }

    /// Save the color buffer as an image file, in a format chosen by the path's extension.
    #[cfg(feature = "image")]
    pub fn save_image<P: AsRef<std::path::Path>>(&self, path: P, pixel_format: PixelFormat) -> crate::error::Result<()> {
        crate::buffer::save_packed(&self.color, path, |pixel| pixel_format.unpack(pixel))
    }
}
