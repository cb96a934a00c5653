use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use tracing::debug;

use super::Materializer;
use crate::document::{Document, MeshId, SurfaceMesh};
use crate::error::{ImportError, ResourceError, Result};
use crate::math::{Point3, Vector3};

/// Default materializer: reads one STL solid (ASCII or binary) with `stl_io`.
#[derive(Debug, Clone, Copy, Default)]
pub struct StlMaterializer;

impl StlMaterializer {
    /// Creates a new `StlMaterializer`.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Reads the file into a [`SurfaceMesh`] without touching any document.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Open`] if the file cannot be opened and an
    /// [`ImportError`] if its content is not a valid solid.
    pub fn read(&self, path: &Path, label: &str) -> Result<SurfaceMesh> {
        let file = File::open(path).map_err(|source| ResourceError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let mut reader = BufReader::new(file);

        let stl = stl_io::read_stl(&mut reader).map_err(|e| ImportError::Parse {
            name: label.to_owned(),
            details: e.to_string(),
        })?;

        let mut mesh = SurfaceMesh {
            vertices: Vec::with_capacity(stl.vertices.len()),
            normals: Vec::with_capacity(stl.faces.len()),
            indices: Vec::with_capacity(stl.faces.len()),
        };

        for (i, v) in stl.vertices.iter().enumerate() {
            let point = Point3::new(f64::from(v.0[0]), f64::from(v.0[1]), f64::from(v.0[2]));
            if !point.coords.iter().all(|c| c.is_finite()) {
                return Err(ImportError::InvalidGeometry {
                    name: label.to_owned(),
                    details: format!("vertex {i} has a non-finite coordinate"),
                }
                .into());
            }
            mesh.vertices.push(point);
        }

        for face in &stl.faces {
            let mut indices = [0_u32; 3];
            for (slot, &index) in indices.iter_mut().zip(&face.vertices) {
                *slot = u32::try_from(index).map_err(|_| ImportError::InvalidGeometry {
                    name: label.to_owned(),
                    details: format!("vertex index {index} exceeds u32 range"),
                })?;
            }
            mesh.indices.push(indices);
            mesh.normals.push(Vector3::new(
                f64::from(face.normal.0[0]),
                f64::from(face.normal.0[1]),
                f64::from(face.normal.0[2]),
            ));
        }

        debug!(
            "Solid '{}': {} vertices, {} triangles",
            label,
            mesh.vertex_count(),
            mesh.face_count()
        );
        Ok(mesh)
    }
}

impl Materializer for StlMaterializer {
    fn insert_single_solid(
        &mut self,
        path: &Path,
        label: &str,
        document: &mut Document,
    ) -> Result<MeshId> {
        let mesh = self.read(path, label)?;
        Ok(document.add_mesh(label, mesh))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::MultiStlError;
    use approx::assert_relative_eq;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn stl_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::with_suffix(".stl").unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    const TRIANGLE: &str = "solid tri
  facet normal 0 0 1
    outer loop
      vertex 0 0 0
      vertex 10 0 0
      vertex 0 2.5 0
    endloop
  endfacet
endsolid tri
";

    #[test]
    fn reads_ascii_triangle() {
        let file = stl_file(TRIANGLE);
        let mesh = StlMaterializer::new().read(file.path(), "tri").unwrap();

        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.face_count(), 1);
        assert_relative_eq!(mesh.normals[0].z, 1.0);

        let (min, max) = mesh.bounds().unwrap();
        assert_relative_eq!(min.x, 0.0);
        assert_relative_eq!(max.x, 10.0);
        assert_relative_eq!(max.y, 2.5);
    }

    #[test]
    fn inserts_into_document_under_label() {
        let file = stl_file(TRIANGLE);
        let mut doc = Document::new("doc");

        let id = StlMaterializer::new()
            .insert_single_solid(file.path(), "Triangle", &mut doc)
            .unwrap();

        let entity = doc.mesh(id).unwrap();
        assert_eq!(entity.label, "Triangle");
        assert_eq!(entity.mesh.face_count(), 1);
    }

    #[test]
    fn malformed_facet_is_an_import_error() {
        let file = stl_file("solid bad\nfacet garbage\nendsolid bad\n");
        let mut doc = Document::new("doc");

        let err = StlMaterializer::new()
            .insert_single_solid(file.path(), "bad", &mut doc)
            .unwrap_err();

        match err {
            MultiStlError::Import(ImportError::Parse { name, .. }) => assert_eq!(name, "bad"),
            other => panic!("expected parse error, got {other:?}"),
        }
        assert!(doc.is_empty());
    }

    #[test]
    fn missing_file_is_a_resource_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = StlMaterializer::new()
            .read(&dir.path().join("absent.stl"), "absent")
            .unwrap_err();

        assert!(matches!(
            err,
            MultiStlError::Resource(ResourceError::Open { .. })
        ));
    }
}
