mod scratch;
mod stl;

pub use scratch::ScratchFile;
pub use stl::StlMaterializer;

use std::path::Path;

use tracing::{debug, warn};

use crate::document::{Document, MeshId};
use crate::error::Result;
use crate::split::SolidBlock;

/// Reads a file holding exactly one solid and inserts it into a document.
///
/// This is the seam to the mesh-format reader: the importer only isolates
/// solids and hands each one over as a standalone file.
pub trait Materializer {
    /// Parses the single-solid file at `path` and adds the resulting mesh to
    /// `document` under `label`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid solid.
    fn insert_single_solid(
        &mut self,
        path: &Path,
        label: &str,
        document: &mut Document,
    ) -> Result<MeshId>;
}

impl<F> Materializer for F
where
    F: FnMut(&Path, &str, &mut Document) -> Result<MeshId>,
{
    fn insert_single_solid(
        &mut self,
        path: &Path,
        label: &str,
        document: &mut Document,
    ) -> Result<MeshId> {
        self(path, label, document)
    }
}

/// Writes `block` to a scratch file, runs `materializer` on it and removes the
/// file again.
///
/// The scratch file is removed on every exit path. If the materializer failed,
/// a cleanup failure is only logged and the materializer's error is returned.
///
/// # Errors
///
/// Returns the materializer's error, or a resource error if the scratch file
/// cannot be written or removed.
pub fn materialize<M: Materializer + ?Sized>(
    materializer: &mut M,
    block: &SolidBlock,
    document: &mut Document,
) -> Result<MeshId> {
    let scratch = ScratchFile::write(block)?;
    debug!(
        "Materializing solid '{}' ({} lines) from {:?}",
        block.name(),
        block.lines().len(),
        scratch.path()
    );

    match materializer.insert_single_solid(scratch.path(), block.name(), document) {
        Ok(id) => {
            scratch.close()?;
            Ok(id)
        }
        Err(err) => {
            if let Err(cleanup) = scratch.close() {
                warn!("{cleanup} (after failing to import '{}')", block.name());
            }
            Err(err)
        }
    }
}
