use serde::{Deserialize, Serialize};

/// The way a mesh's index buffer is grouped into triangles.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PrimitiveTopology {
    /// Every three consecutive indices form a triangle.
    #[default]
    TriangleList,
    /// Every index after the first two forms a triangle with the two before it, alternating winding so that all
    /// triangles share the orientation of the first.
    TriangleStrip,
}

impl PrimitiveTopology {
    /// Whether an index buffer of the given length describes whole triangles in this topology.
    pub fn is_complete(self, len: usize) -> bool {
        match self {
            PrimitiveTopology::TriangleList => len % 3 == 0,
            PrimitiveTopology::TriangleStrip => len == 0 || len >= 3,
        }
    }

    /// Iterate over the index triples of the triangles described by `indices`, in index-buffer order.
    ///
    /// Strip triangles that reference the same index twice are degenerate and are not emitted.
    pub fn triangles(self, indices: &[u32]) -> Triangles<'_> {
        Triangles {
            topology: self,
            indices,
            next: 0,
        }
    }
}

/// An iterator over the triangles of an index buffer. See [`PrimitiveTopology::triangles`].
#[derive(Clone, Debug)]
pub struct Triangles<'a> {
    topology: PrimitiveTopology,
    indices: &'a [u32],
    next: usize,
}

impl<'a> Iterator for Triangles<'a> {
    type Item = [u32; 3];

    fn next(&mut self) -> Option<Self::Item> {
        match self.topology {
            PrimitiveTopology::TriangleList => {
                let i = self.next;
                let tri = self.indices.get(i..i + 3)?;
                self.next += 3;
                Some([tri[0], tri[1], tri[2]])
            }
            PrimitiveTopology::TriangleStrip => loop {
                let i = self.next;
                let tri = self.indices.get(i..i + 3)?;
                self.next += 1;

                if tri[0] == tri[1] || tri[1] == tri[2] || tri[2] == tri[0] {
                    continue;
                }

                // Odd triangles swap their last two vertices to keep a consistent winding
                let odd = i % 2;
                break Some([self.indices[i], self.indices[i + 1 + odd], self.indices[i + 2 - odd]]);
            },
        }
    }
}
