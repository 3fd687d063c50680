//! The software rasterization path of a hybrid renderer.
//!
//! A scene can be displayed either by a hardware backend or by the CPU rasterizer in this crate. The software path
//! transforms each mesh's vertices into screen space with a [`Camera`], then rasterizes its triangles into a shared
//! color and depth buffer, using edge functions for coverage, perspective-correct attribute interpolation and a
//! closest-wins depth test, before handing every fragment to the shading dispatch.
//!
//! The handedness, depth range and winding rules that differ between the software and hardware paths all live in a
//! single [`CoordinateConvention`].
//!
//! ```
//! use hybrid_raster::*;
//! use vek::{Rgb, Vec2, Vec3};
//!
//! let mut materials = MaterialLibrary::new();
//! let red = materials.add(SolidColor::new(Rgb::red()));
//!
//! let vertices = vec![
//!     VertexInput::new(Vec3::new(-1.0, -1.0, 0.0), Vec2::zero(), Vec3::unit_z()),
//!     VertexInput::new(Vec3::new(1.0, -1.0, 0.0), Vec2::zero(), Vec3::unit_z()),
//!     VertexInput::new(Vec3::new(0.0, 1.0, 0.0), Vec2::zero(), Vec3::unit_z()),
//! ];
//! let mesh = Mesh::new(vertices, vec![0, 1, 2], red).unwrap();
//!
//! let mut scene = SceneGraph::from_settings(Vec3::new(0.0, 0.0, 5.0), RenderSettings::default());
//! let main = scene.add_scene();
//! scene.add_mesh(mesh, main).unwrap();
//!
//! let mut renderer = Renderer::new([640, 480]);
//! let stats = renderer.render(&mut scene, &materials);
//! assert!(stats.pixels_written > 0);
//! ```

#[cfg(feature = "image")]
extern crate image_ as image;

pub mod buffer;
pub mod camera;
pub mod config;
pub mod convention;
pub mod error;
pub mod interpolate;
pub mod material;
pub mod math;
pub mod mesh;
pub mod rasterizer;
pub mod renderer;
pub mod sampler;
pub mod scene;
pub mod shading;
pub mod texture;
pub mod topology;
pub mod transform;
pub mod vertex;

// Reexports
pub use self::{
    buffer::Buffer2d,
    camera::Camera,
    config::RenderSettings,
    convention::{CoordinateConvention, Handedness, Winding},
    error::{Error, Result},
    interpolate::Interpolate,
    material::{FilterMode, FlatMaterial, Fragment, MappedMaterial, Material, MaterialId, MaterialLibrary, SolidColor},
    mesh::Mesh,
    rasterizer::{FrameContext, RasterStats},
    renderer::{RenderSystem, Renderer},
    sampler::{Linear, Nearest, Sampler},
    scene::SceneGraph,
    shading::{Light, PixelFormat, RenderMode},
    texture::{Target, Texture},
    topology::PrimitiveTopology,
    transform::ScreenTransform,
    vertex::{VertexInput, VertexOutput},
};
