//! Archive packaging and scratch directory management
//!
//! Packages a staging directory into one compressed zip archive and
//! extracts archives back out. `ScratchDir` is the guaranteed-release
//! guard used for both staging and extraction: the directory is removed
//! when the guard drops, on success and failure paths alike.

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::error::{EnvmonError, EnvmonResult};

/// A scratch directory removed on drop
///
/// Named with a fresh UUID under the given parent, so concurrent
/// operations never share staging space.
#[derive(Debug)]
pub struct ScratchDir {
    path: PathBuf,
}

impl ScratchDir {
    /// Create a fresh scratch directory under `parent`
    pub fn new(parent: &Path) -> EnvmonResult<Self> {
        let path = parent.join(Uuid::new_v4().to_string());
        fs::create_dir_all(&path)
            .map_err(|e| EnvmonError::Io(format!("Failed to create scratch directory: {}", e)))?;
        Ok(Self { path })
    }

    /// Path to the scratch directory
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for ScratchDir {
    fn drop(&mut self) {
        // Best-effort; cleanup errors are ignored
        let _ = fs::remove_dir_all(&self.path);
    }
}

/// Package a flat staging directory into one zip archive
///
/// Only regular files at the top level of `src_dir` are packaged; staging
/// directories are flat by construction.
pub fn pack_directory(src_dir: &Path, archive_path: &Path) -> EnvmonResult<()> {
    let file = File::create(archive_path)
        .map_err(|e| EnvmonError::Io(format!("Failed to create archive: {}", e)))?;

    let mut writer = zip::ZipWriter::new(file);
    let options = zip::write::SimpleFileOptions::default();

    let entries = fs::read_dir(src_dir)
        .map_err(|e| EnvmonError::Io(format!("Failed to read staging directory: {}", e)))?;

    for entry in entries {
        let entry = entry
            .map_err(|e| EnvmonError::Io(format!("Failed to read staging entry: {}", e)))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let name = entry.file_name().to_string_lossy().to_string();
        writer
            .start_file(name, options)
            .map_err(|e| EnvmonError::Io(format!("Failed to add archive entry: {}", e)))?;

        let mut source = File::open(&path)
            .map_err(|e| EnvmonError::Io(format!("Failed to open staged file: {}", e)))?;
        io::copy(&mut source, &mut writer)
            .map_err(|e| EnvmonError::Io(format!("Failed to write archive entry: {}", e)))?;
    }

    writer
        .finish()
        .map_err(|e| EnvmonError::Io(format!("Failed to finish archive: {}", e)))?;

    Ok(())
}

/// Extract a snapshot archive into a destination directory
pub fn extract_archive(archive_path: &Path, dest: &Path) -> EnvmonResult<()> {
    let file = File::open(archive_path)
        .map_err(|e| EnvmonError::Io(format!("Failed to open archive: {}", e)))?;

    let mut archive = zip::ZipArchive::new(file).map_err(|e| {
        EnvmonError::InvalidFormat(format!(
            "{} is not a readable snapshot archive: {}",
            archive_path.display(),
            e
        ))
    })?;

    archive
        .extract(dest)
        .map_err(|e| EnvmonError::InvalidFormat(format!("Failed to extract archive: {}", e)))
}
