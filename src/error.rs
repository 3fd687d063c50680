use crate::material::MaterialId;
use thiserror::Error;

/// Errors produced while building meshes, loading resources or reading configuration.
///
/// Rasterization itself never fails: degenerate triangles are skipped and non-finite depths fail the depth test.
#[derive(Debug, Error)]
pub enum Error {
    #[error("index {index} is out of range for a mesh with {vertex_count} vertices")]
    IndexOutOfRange { index: u32, vertex_count: usize },
    #[error("index buffer of length {len} does not describe whole triangles")]
    IncompleteTriangle { len: usize },
    #[error("no material registered under {0:?}")]
    UnknownMaterial(MaterialId),
    #[error("scene {scene} does not exist (there are {count} scenes)")]
    UnknownScene { scene: usize, count: usize },
    #[error("mesh {mesh} does not exist (there are {count} meshes)")]
    UnknownMesh { mesh: usize, count: usize },
    #[error("buffer holds {actual} items but {expected} were expected")]
    BufferSize { expected: usize, actual: usize },
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse settings: {0}")]
    Config(#[from] ron::error::SpannedError),
    #[error("failed to serialize settings: {0}")]
    ConfigSerialize(#[from] ron::Error),
    #[cfg(feature = "image")]
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}

pub type Result<T, E = Error> = core::result::Result<T, E>;
