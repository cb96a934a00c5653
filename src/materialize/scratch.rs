use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::error::{ResourceError, Result};
use crate::split::SolidBlock;

const DIR_PREFIX: &str = "multistl-";

/// A single solid written to its own temporary directory.
///
/// The directory name is unique per process and call, so concurrent imports
/// never share a file. [`close`](Self::close) removes it and reports failure;
/// dropping without closing also removes it, ignoring errors.
#[derive(Debug)]
pub struct ScratchFile {
    dir: TempDir,
    path: PathBuf,
}

impl ScratchFile {
    /// Writes the block verbatim to `<dir>/<name>.stl`.
    ///
    /// # Errors
    ///
    /// Returns a [`ResourceError`] if the directory or file cannot be created
    /// or written. Nothing is left behind in that case.
    pub fn write(block: &SolidBlock) -> Result<Self> {
        let dir = tempfile::Builder::new()
            .prefix(DIR_PREFIX)
            .tempdir()
            .map_err(ResourceError::TempCreate)?;
        let path = dir.path().join(format!("{}.stl", file_stem(block.name())));

        let write = |path: &Path| -> std::io::Result<()> {
            let mut writer = BufWriter::new(File::create(path)?);
            block.write_to(&mut writer)?;
            writer.flush()
        };
        write(&path).map_err(|source| ResourceError::TempWrite {
            path: path.clone(),
            source,
        })?;

        Ok(Self { dir, path })
    }

    /// Path of the written file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Removes the file and its directory.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::TempCleanup`] if removal fails.
    pub fn close(self) -> Result<()> {
        let dir_path = self.dir.path().to_path_buf();
        self.dir
            .close()
            .map_err(|source| ResourceError::TempCleanup {
                path: dir_path,
                source,
            })?;
        Ok(())
    }
}

/// Maps a solid name onto a portable file stem.
fn file_stem(name: &str) -> String {
    let stem: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if stem.is_empty() {
        "solid".to_owned()
    } else {
        stem
    }
}
