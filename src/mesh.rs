use crate::{
    error::{Error, Result},
    material::MaterialId,
    topology::{PrimitiveTopology, Triangles},
    transform::ScreenTransform,
    vertex::{VertexInput, VertexOutput},
};
use core::f32::consts::TAU;
use vek::{Mat4, Vec3};

/// A renderable mesh instance.
///
/// The local-space vertices and the index buffer never change after construction. Each frame, the camera transform
/// replaces the mesh's screen-space vertices, which the rasterizer then reads.
#[derive(Clone, Debug)]
pub struct Mesh {
    vertices: Vec<VertexInput>,
    indices: Vec<u32>,
    topology: PrimitiveTopology,
    material: MaterialId,
    origin: Vec3<f32>,
    rotation: f32,
    world: Mat4<f32>,
    screen_space: Vec<VertexOutput>,
}

impl Mesh {
    /// Create a triangle-list mesh. Every index must refer to one of `vertices`.
    pub fn new(vertices: Vec<VertexInput>, indices: Vec<u32>, material: MaterialId) -> Result<Self> {
        Self::with_topology(vertices, indices, PrimitiveTopology::TriangleList, material)
    }

    pub fn with_topology(
        vertices: Vec<VertexInput>,
        indices: Vec<u32>,
        topology: PrimitiveTopology,
        material: MaterialId,
    ) -> Result<Self> {
        if !topology.is_complete(indices.len()) {
            return Err(Error::IncompleteTriangle { len: indices.len() });
        }
        if let Some(&index) = indices.iter().find(|&&i| i as usize >= vertices.len()) {
            return Err(Error::IndexOutOfRange {
                index,
                vertex_count: vertices.len(),
            });
        }

        Ok(Self {
            vertices,
            indices,
            topology,
            material,
            origin: Vec3::zero(),
            rotation: 0.0,
            world: Mat4::identity(),
            screen_space: Vec::new(),
        })
    }

    /// Place the mesh at `origin` in world space.
    pub fn with_origin(mut self, origin: Vec3<f32>) -> Self {
        self.origin = origin;
        self.rebuild_world();
        self
    }

    pub fn vertices(&self) -> &[VertexInput] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn topology(&self) -> PrimitiveTopology {
        self.topology
    }

    pub fn material(&self) -> MaterialId {
        self.material
    }

    pub fn origin(&self) -> Vec3<f32> {
        self.origin
    }

    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    pub fn world(&self) -> &Mat4<f32> {
        &self.world
    }

    /// Override the world matrix directly. It is rebuilt from the origin and rotation on the next [`Mesh::update`].
    pub fn set_world(&mut self, world: Mat4<f32>) {
        self.world = world;
    }

    /// Advance the mesh's rotation about the world +y axis.
    pub fn update(&mut self, dt: f32, rotation_speed: f32) {
        self.rotation = (self.rotation + rotation_speed * dt).rem_euclid(TAU);
        self.rebuild_world();
    }

    fn rebuild_world(&mut self) {
        self.world = Mat4::<f32>::translation_3d(self.origin) * Mat4::<f32>::rotation_y(self.rotation);
    }

    /// The index triples of this mesh's triangles, in index-buffer order.
    pub fn triangles(&self) -> Triangles<'_> {
        self.topology.triangles(&self.indices)
    }

    /// The screen-space vertices produced by the most recent camera transform.
    pub fn screen_space_vertices(&self) -> &[VertexOutput] {
        &self.screen_space
    }

    /// Replace the screen-space vertices with ones computed elsewhere. There must be one per local-space vertex.
    pub fn set_screen_space_vertices(&mut self, vertices: Vec<VertexOutput>) -> Result<()> {
        if vertices.len() != self.vertices.len() {
            return Err(Error::BufferSize {
                expected: self.vertices.len(),
                actual: vertices.len(),
            });
        }
        self.screen_space = vertices;
        Ok(())
    }

    /// Run the camera transform over this mesh's vertices, replacing last frame's screen-space vertices.
    pub fn update_screen_space(&mut self, transform: &ScreenTransform) {
        transform.transform_vertices(&self.world, &self.vertices, &mut self.screen_space);
    }
}
