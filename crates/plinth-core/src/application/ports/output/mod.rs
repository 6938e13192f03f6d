//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the services need from external systems.
//! The `plinth-adapters` crate provides implementations.

use std::path::{Path, PathBuf};

use crate::domain::Project;
use crate::error::PlinthResult;

/// One immediate child of a directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub path: PathBuf,
    pub name: String,
    pub is_dir: bool,
}

/// Port for filesystem operations.
///
/// Implemented by:
/// - `plinth_adapters::filesystem::LocalFilesystem` (production)
/// - `plinth_adapters::filesystem::MemoryFilesystem` (testing)
///
/// Every failure maps to `ApplicationError::AccessError` carrying the path.
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Whether `path` exists. An error means existence could not be decided
    /// (permissions), which is different from "does not exist".
    fn exists(&self, path: &Path) -> PlinthResult<bool>;

    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> PlinthResult<()>;

    /// Create or truncate a file and write `content` to it. The parent
    /// directory must already exist.
    fn write_file(&self, path: &Path, content: &str) -> PlinthResult<()>;

    fn read_to_string(&self, path: &Path) -> PlinthResult<String>;

    /// Remove a file or a directory tree. Missing paths are not an error.
    fn remove_path(&self, path: &Path) -> PlinthResult<()>;

    /// Immediate children of `path`, sorted by name.
    fn read_dir(&self, path: &Path) -> PlinthResult<Vec<DirEntry>>;

    /// Every file under `root`, recursively, as paths relative to `root`.
    ///
    /// Directories are walked in file-name order so the enumeration order is
    /// stable across runs.
    fn list_files(&self, root: &Path) -> PlinthResult<Vec<PathBuf>>;
}

/// Port for template rendering.
///
/// Implemented by:
/// - `plinth_adapters::renderer::TeraRenderer`
#[cfg_attr(test, mockall::automock)]
pub trait TemplateRenderer: Send + Sync {
    /// Render `source` against `project`.
    ///
    /// # Arguments
    ///
    /// * `name` - Template name, used in error messages
    /// * `source` - Raw template text
    /// * `project` - Rendering context
    ///
    /// # Errors
    ///
    /// `DomainError::MalformedTemplate` when the source does not parse or
    /// references something the context does not provide.
    fn render(&self, name: &str, source: &str, project: &Project) -> PlinthResult<String>;
}

/// Port for backup archives.
///
/// Implemented by:
/// - `plinth_adapters::archive::ZipArchiver`
#[cfg_attr(test, mockall::automock)]
pub trait Archiver: Send + Sync {
    /// Pack `sources` (files or directories) into `destination`. Each source
    /// is stored under its own base name at the top of the archive.
    fn archive(&self, sources: &[PathBuf], destination: &Path) -> PlinthResult<()>;

    /// Unpack `archive` into `destination`, creating missing directories and
    /// overwriting existing files.
    fn extract(&self, archive: &Path, destination: &Path) -> PlinthResult<()>;
}

