//! Local filesystem adapter using std::fs and walkdir.

use std::io;
use std::path::{Path, PathBuf};

use plinth_core::{
    application::ports::{DirEntry, Filesystem},
    error::{Context as _, PlinthError, PlinthResult},
};
use walkdir::WalkDir;

/// Production filesystem implementation using `std::fs`.
#[derive(Debug, Clone, Copy)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for LocalFilesystem {
    fn exists(&self, path: &Path) -> PlinthResult<bool> {
        path.try_exists()
            .map_err(|e| map_io_error(path, e, "check existence of"))
    }

    fn create_dir_all(&self, path: &Path) -> PlinthResult<()> {
        std::fs::create_dir_all(path).map_err(|e| map_io_error(path, e, "create directory"))
    }

    fn write_file(&self, path: &Path, content: &str) -> PlinthResult<()> {
        std::fs::write(path, content).map_err(|e| map_io_error(path, e, "write file"))
    }

    fn read_to_string(&self, path: &Path) -> PlinthResult<String> {
        std::fs::read_to_string(path).map_err(|e| map_io_error(path, e, "read file"))
    }

    fn remove_path(&self, path: &Path) -> PlinthResult<()> {
        let metadata = match std::fs::symlink_metadata(path) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(map_io_error(path, e, "inspect")),
        };

        if metadata.is_dir() {
            std::fs::remove_dir_all(path).map_err(|e| map_io_error(path, e, "remove directory"))
        } else {
            std::fs::remove_file(path).map_err(|e| map_io_error(path, e, "remove file"))
        }
    }

    fn read_dir(&self, path: &Path) -> PlinthResult<Vec<DirEntry>> {
        let reader = std::fs::read_dir(path).map_err(|e| map_io_error(path, e, "read directory"))?;

        let mut entries = Vec::new();
        for entry in reader {
            let entry = entry.map_err(|e| map_io_error(path, e, "read directory"))?;
            let file_type = entry
                .file_type()
                .map_err(|e| map_io_error(&entry.path(), e, "inspect"))?;
            entries.push(DirEntry {
                path: entry.path(),
                name: entry.file_name().to_string_lossy().into_owned(),
                is_dir: file_type.is_dir(),
            });
        }

        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    fn list_files(&self, root: &Path) -> PlinthResult<Vec<PathBuf>> {
        let mut files = Vec::new();
        for entry in WalkDir::new(root).min_depth(1).sort_by_file_name() {
            let entry = entry.map_err(|e| {
                let path = e.path().unwrap_or(root).to_path_buf();
                PlinthError::access(path, e)
            })?;

            if entry.file_type().is_file() {
                let relative = entry.path().strip_prefix(root).at_path(entry.path())?;
                files.push(relative.to_path_buf());
            }
        }
        Ok(files)
    }
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> PlinthError {
    PlinthError::access(path, format!("Failed to {}: {}", operation, e))
}
