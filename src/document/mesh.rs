use crate::math::{Point3, Vector3};

slotmap::new_key_type! {
    /// Unique identifier for a mesh entity in a document.
    pub struct MeshId;
}

/// A triangulated surface as read from one solid.
#[derive(Debug, Clone, Default)]
pub struct SurfaceMesh {
    /// Vertex positions.
    pub vertices: Vec<Point3>,
    /// Facet normals, one per triangle, as stored in the source file.
    pub normals: Vec<Vector3>,
    /// Triangle indices (each triple defines a triangle).
    pub indices: Vec<[u32; 3]>,
}

impl SurfaceMesh {
    /// Returns the number of vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the number of triangles.
    #[must_use]
    pub fn face_count(&self) -> usize {
        self.indices.len()
    }

    /// Returns `true` if the mesh has no triangles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Returns the axis-aligned bounds as `(min, max)`, or `None` for a mesh
    /// without vertices.
    #[must_use]
    pub fn bounds(&self) -> Option<(Point3, Point3)> {
        let (first, rest) = self.vertices.split_first()?;
        Some(
            rest.iter()
                .fold((*first, *first), |(min, max), v| (min.inf(v), max.sup(v))),
        )
    }
}

/// A mesh object owned by a [`Document`](super::Document).
#[derive(Debug, Clone)]
pub struct MeshEntity {
    name: String,
    /// Display label, usually the name of the solid it was read from.
    pub label: String,
    /// The surface geometry.
    pub mesh: SurfaceMesh,
}

impl MeshEntity {
    pub(super) fn new(name: String, label: String, mesh: SurfaceMesh) -> Self {
        Self { name, label, mesh }
    }

    /// The document-unique identifier of this entity.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}
