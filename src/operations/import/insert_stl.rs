use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use tracing::info;

use super::ImportOptions;
use crate::document::{Document, DocumentId, MeshId, Session};
use crate::error::{ResourceError, Result};
use crate::materialize::{materialize, Materializer, StlMaterializer};
use crate::split::SolidBlocks;

/// Imports every solid of a multi-solid STL file into an existing document.
///
/// Each `solid <name>` ... `endsolid` block becomes its own mesh entity
/// labeled with the solid's name, in file order. The first format or import
/// error aborts the import; entities inserted before it stay in the document.
pub struct InsertStl {
    path: PathBuf,
    options: ImportOptions,
}

impl InsertStl {
    /// Creates a new `InsertStl` operation with default options.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            options: ImportOptions::default(),
        }
    }

    /// Sets custom import options.
    #[must_use]
    pub fn with_options(mut self, options: ImportOptions) -> Self {
        self.options = options;
        self
    }

    /// The file this operation reads.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Executes the import using the default [`StlMaterializer`].
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, its block structure is
    /// malformed, or any solid fails to import.
    pub fn execute(&self, document: &mut Document) -> Result<Vec<MeshId>> {
        self.execute_with(document, &mut StlMaterializer::new())
    }

    /// Executes the import, handing each solid to `materializer`.
    ///
    /// Returns the IDs of the inserted entities in file order.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, its block structure is
    /// malformed, or the materializer rejects a solid.
    pub fn execute_with<M: Materializer + ?Sized>(
        &self,
        document: &mut Document,
        materializer: &mut M,
    ) -> Result<Vec<MeshId>> {
        let file = File::open(&self.path).map_err(|source| ResourceError::Open {
            path: self.path.clone(),
            source,
        })?;
        info!(
            "Importing solids from {:?} into document '{}'",
            self.path,
            document.name()
        );

        let inserted = import_blocks(
            BufReader::new(file),
            self.options,
            document,
            materializer,
        )?;

        info!("Imported {:?}: {} solid(s)", self.path, inserted.len());
        Ok(inserted)
    }

    /// Executes the import into the session document called `docname`,
    /// creating that document if it is not open yet.
    ///
    /// # Errors
    ///
    /// Returns an error under the same conditions as [`execute`](Self::execute).
    pub fn execute_in(&self, session: &mut Session, docname: &str) -> Result<DocumentId> {
        let id = session.get_or_create(docname);
        self.execute(session.document_mut(id)?)?;
        Ok(id)
    }
}

/// Splits `reader` into solids and materializes each into `document`, one at
/// a time and in stream order.
///
/// # Errors
///
/// Returns the first error from splitting or materializing. Solids already
/// inserted remain in the document.
pub fn import_blocks<R: BufRead, M: Materializer + ?Sized>(
    reader: R,
    options: ImportOptions,
    document: &mut Document,
    materializer: &mut M,
) -> Result<Vec<MeshId>> {
    let mut inserted = Vec::new();
    for block in SolidBlocks::new(reader).allow_truncated(options.allow_truncated) {
        let block = block?;
        inserted.push(materialize(materializer, &block, document)?);
    }
    Ok(inserted)
}
