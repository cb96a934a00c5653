use std::path::{Path, PathBuf};

use super::{ImportOptions, InsertStl};
use crate::document::{Document, DocumentId, Session};
use crate::error::Result;
use crate::materialize::{Materializer, StlMaterializer};

const FALLBACK_NAME: &str = "Unnamed";

/// Opens a multi-solid STL file as a new document named after the file.
pub struct OpenStl {
    path: PathBuf,
    options: ImportOptions,
}

impl OpenStl {
    /// Creates a new `OpenStl` operation with default options.
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

    /// Name of the document to create: the file name without its extension.
    #[must_use]
    pub fn document_name(&self) -> String {
        self.path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .filter(|stem| !stem.is_empty())
            .unwrap_or_else(|| FALLBACK_NAME.to_owned())
    }

    /// Executes the operation using the default [`StlMaterializer`].
    ///
    /// # Errors
    ///
    /// Returns an error if the import fails; see [`InsertStl::execute`].
    pub fn execute(&self) -> Result<Document> {
        self.execute_with(&mut StlMaterializer::new())
    }

    /// Executes the operation, handing each solid to `materializer`.
    ///
    /// # Errors
    ///
    /// Returns an error if the import fails; see [`InsertStl::execute_with`].
    pub fn execute_with<M: Materializer + ?Sized>(&self, materializer: &mut M) -> Result<Document> {
        let mut document = Document::new(self.document_name());
        self.insert().execute_with(&mut document, materializer)?;
        Ok(document)
    }

    /// Executes the operation inside a session.
    ///
    /// The document is registered before any solid is read, so the solids
    /// imported before a failure remain reachable through the session.
    ///
    /// # Errors
    ///
    /// Returns an error if the import fails; see [`InsertStl::execute`].
    pub fn execute_in(&self, session: &mut Session) -> Result<DocumentId> {
        let id = session.new_document(&self.document_name());
        self.insert().execute(session.document_mut(id)?)?;
        Ok(id)
    }

    fn insert(&self) -> InsertStl {
        InsertStl::new(self.path.clone()).with_options(self.options)
    }
}
