mod insert_stl;
mod open_stl;
mod options;

pub use insert_stl::{import_blocks, InsertStl};
pub use open_stl::OpenStl;
pub use options::ImportOptions;
