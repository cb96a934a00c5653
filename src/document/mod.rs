pub mod mesh;
pub mod session;

pub use mesh::{MeshEntity, MeshId, SurfaceMesh};
pub use session::{DocumentId, Session};

use std::collections::HashMap;

use crate::error::DocumentError;
use slotmap::SlotMap;

/// Container that accumulates mesh entities.
///
/// Entities live in an arena keyed by [`MeshId`]; the insertion order is kept
/// separately so iteration mirrors the order entities were added in.
#[derive(Debug, Default)]
pub struct Document {
    name: String,
    label: String,
    meshes: SlotMap<MeshId, MeshEntity>,
    order: Vec<MeshId>,
    names: HashMap<String, MeshId>,
}

impl Document {
    /// Creates a new, empty document. The label starts out equal to the name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            label: name.clone(),
            name,
            ..Self::default()
        }
    }

    /// The document identifier.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The display label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Replaces the display label.
    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    /// Inserts a mesh entity and returns its ID.
    ///
    /// The label is stored verbatim. The entity's internal name is derived
    /// from it and made unique within the document, so two entities may share
    /// a label but never a name.
    pub fn add_mesh(&mut self, label: impl Into<String>, mesh: SurfaceMesh) -> MeshId {
        let label = label.into();
        let name = unique_identifier(&label, |candidate| self.names.contains_key(candidate));
        let id = self
            .meshes
            .insert(MeshEntity::new(name.clone(), label, mesh));
        self.names.insert(name, id);
        self.order.push(id);
        id
    }

    /// Returns a reference to the mesh entity, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the document.
    pub fn mesh(&self, id: MeshId) -> Result<&MeshEntity, DocumentError> {
        self.meshes
            .get(id)
            .ok_or_else(|| DocumentError::EntityNotFound("mesh".into()))
    }

    /// Returns a mutable reference to the mesh entity, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the document.
    pub fn mesh_mut(&mut self, id: MeshId) -> Result<&mut MeshEntity, DocumentError> {
        self.meshes
            .get_mut(id)
            .ok_or_else(|| DocumentError::EntityNotFound("mesh".into()))
    }

    /// Removes a mesh entity and returns it.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the document.
    pub fn remove_mesh(&mut self, id: MeshId) -> Result<MeshEntity, DocumentError> {
        let entity = self
            .meshes
            .remove(id)
            .ok_or_else(|| DocumentError::EntityNotFound("mesh".into()))?;
        self.names.remove(entity.name());
        self.order.retain(|&other| other != id);
        Ok(entity)
    }

    /// Looks up an entity by its internal name.
    #[must_use]
    pub fn mesh_by_name(&self, name: &str) -> Option<(MeshId, &MeshEntity)> {
        let id = *self.names.get(name)?;
        self.meshes.get(id).map(|entity| (id, entity))
    }

    /// Iterates over all entities carrying the given label, in insertion order.
    pub fn meshes_labeled<'a>(
        &'a self,
        label: &'a str,
    ) -> impl Iterator<Item = (MeshId, &'a MeshEntity)> + 'a {
        self.meshes().filter(move |(_, entity)| entity.label == label)
    }

    /// Iterates over all entities in insertion order.
    pub fn meshes(&self) -> impl Iterator<Item = (MeshId, &MeshEntity)> + '_ {
        self.order
            .iter()
            .filter_map(|&id| self.meshes.get(id).map(|entity| (id, entity)))
    }

    /// Returns the number of entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.meshes.len()
    }

    /// Returns `true` if the document holds no entities.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }
}

/// Turns a label into an identifier that `is_taken` rejects as little as
/// possible: `Part1`, then `Part1001`, `Part1002`, ...
pub(crate) fn unique_identifier(label: &str, is_taken: impl Fn(&str) -> bool) -> String {
    let mut base: String = label
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    if base.is_empty() {
        base.push_str("Unnamed");
    } else if base.starts_with(|c: char| c.is_ascii_digit()) {
        base.insert(0, '_');
    }

    if !is_taken(&base) {
        return base;
    }
    let mut counter = 1_usize;
    loop {
        let candidate = format!("{base}{counter:03}");
        if !is_taken(&candidate) {
            return candidate;
        }
        counter += 1;
    }
}
