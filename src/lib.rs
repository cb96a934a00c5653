pub mod document;
pub mod error;
pub mod materialize;
pub mod math;
pub mod operations;
pub mod split;

pub use document::{Document, DocumentId, MeshEntity, MeshId, Session, SurfaceMesh};
pub use error::{DocumentError, FormatError, ImportError, MultiStlError, ResourceError, Result};
pub use materialize::{materialize, Materializer, ScratchFile, StlMaterializer};
pub use operations::import::{import_blocks, ImportOptions, InsertStl, OpenStl};
pub use split::{SolidBlock, SolidBlocks};
