use glamx::Vec3;

/// Geometric description of an indexed triangle mesh with per-vertex normals.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderMesh {
    /// Coordinates of the mesh vertices.
    pub coords: Vec<Vec3>,
    /// Normals of the mesh vertices.
    pub normals: Vec<Vec3>,
    /// Index buffer of the mesh, one entry per triangle.
    pub indices: Vec<[u32; 3]>,
}

impl RenderMesh {
    /// Creates a new mesh.
    ///
    /// # Panics
    /// Panics if `coords` and `normals` have different lengths.
    pub fn new(coords: Vec<Vec3>, normals: Vec<Vec3>, indices: Vec<[u32; 3]>) -> RenderMesh {
        assert_eq!(
            coords.len(),
            normals.len(),
            "every vertex needs exactly one normal"
        );

        RenderMesh {
            coords,
            normals,
            indices,
        }
    }

    /// The number of triangles on this mesh.
    #[inline]
    pub fn num_triangles(&self) -> usize {
        self.indices.len()
    }

    /// Returns the index buffer as a flat list of vertex ids.
    #[inline]
    pub fn flat_indices(&self) -> Vec<u32> {
        self.indices.iter().flatten().copied().collect()
    }
}
