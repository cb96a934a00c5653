use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for multi-solid STL imports.
///
/// The variants separate bad input grammar from bad mesh content from
/// environment failures, so callers can report each differently.
#[derive(Debug, Error)]
pub enum MultiStlError {
    #[error(transparent)]
    Format(#[from] FormatError),

    #[error(transparent)]
    Import(#[from] ImportError),

    #[error(transparent)]
    Resource(#[from] ResourceError),

    #[error(transparent)]
    Document(#[from] DocumentError),
}

/// Errors in the block structure of the input stream.
///
/// These are fatal: once a header is missing the stream position cannot be
/// resynchronized without re-reading from the top.
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("line {line}: expected line of the form 'solid <name>', found {found:?}")]
    ExpectedSolidHeader { line: usize, found: String },

    #[error("solid '{name}' starting at line {line} is not terminated by 'endsolid'")]
    UnterminatedSolid { name: String, line: usize },
}

/// Errors raised while turning one isolated solid into a mesh entity.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("failed to parse solid '{name}': {details}")]
    Parse { name: String, details: String },

    #[error("solid '{name}' has invalid geometry: {details}")]
    InvalidGeometry { name: String, details: String },
}

/// Errors in the environment: input files and temporary storage.
#[derive(Debug, Error)]
pub enum ResourceError {
    #[error("failed to open {}: {source}", .path.display())]
    Open { path: PathBuf, source: io::Error },

    #[error("failed to read source stream: {0}")]
    Read(#[source] io::Error),

    #[error("failed to create temporary storage: {0}")]
    TempCreate(#[source] io::Error),

    #[error("failed to write temporary file {}: {source}", .path.display())]
    TempWrite { path: PathBuf, source: io::Error },

    #[error("failed to remove temporary storage {}: {source}", .path.display())]
    TempCleanup { path: PathBuf, source: io::Error },
}

/// Errors related to document lookups.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("entity not found: {0}")]
    EntityNotFound(String),

    #[error("document not found: {0}")]
    DocumentNotFound(String),
}

/// Convenience type alias for results using [`MultiStlError`].
pub type Result<T> = std::result::Result<T, MultiStlError>;
