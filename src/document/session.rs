use slotmap::SlotMap;

use super::{unique_identifier, Document};
use crate::error::DocumentError;

slotmap::new_key_type! {
    /// Unique identifier for an open document in a session.
    pub struct DocumentId;
}

/// Registry of open documents, addressable by ID or by name.
#[derive(Debug, Default)]
pub struct Session {
    documents: SlotMap<DocumentId, Document>,
}

impl Session {
    /// Creates a new session with no documents.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty document and returns its ID.
    ///
    /// The document name is made unique among the open documents; its label
    /// keeps the requested name verbatim.
    pub fn new_document(&mut self, name: &str) -> DocumentId {
        let unique = unique_identifier(name, |candidate| self.find(candidate).is_some());
        let mut document = Document::new(unique);
        document.set_label(name);
        self.documents.insert(document)
    }

    /// Returns the ID of the document with the given name, if open.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<DocumentId> {
        self.documents
            .iter()
            .find(|(_, doc)| doc.name() == name)
            .map(|(id, _)| id)
    }

    /// Returns the document with the given name, creating it if needed.
    ///
    /// A document whose label matches is reused when no name matches, so a
    /// name that was sanitized on creation still finds its document.
    pub fn get_or_create(&mut self, name: &str) -> DocumentId {
        let existing = self.find(name).or_else(|| {
            self.documents
                .iter()
                .find(|(_, doc)| doc.label() == name)
                .map(|(id, _)| id)
        });
        match existing {
            Some(id) => id,
            None => self.new_document(name),
        }
    }

    /// Returns a reference to the document, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is not open in this session.
    pub fn document(&self, id: DocumentId) -> Result<&Document, DocumentError> {
        self.documents
            .get(id)
            .ok_or_else(|| DocumentError::DocumentNotFound(format!("{id:?}")))
    }

    /// Returns a mutable reference to the document, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is not open in this session.
    pub fn document_mut(&mut self, id: DocumentId) -> Result<&mut Document, DocumentError> {
        self.documents
            .get_mut(id)
            .ok_or_else(|| DocumentError::DocumentNotFound(format!("{id:?}")))
    }

    /// Returns the number of open documents.
    #[must_use]
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Returns `true` if no documents are open.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}
