//! Centralized path routing for the configuration root.
//!
//! # Storage Layout
//!
//! ```text
//! <root>/config.json          flat string map
//! <root>/templates/files/     file-template pool
//! <root>/templates/projects/  project-structure pool
//! <root>/data/                named data files
//! <root>/backups/             archives of {templates, config.json, data}
//! ```
//!
//! No code outside this module should compute `root.join(..)` paths.

use std::path::{Path, PathBuf};

use super::TemplateKind;

pub const CONFIG_FILE_NAME: &str = "config.json";
pub const TEMPLATES_DIR_NAME: &str = "templates";
pub const DATA_DIR_NAME: &str = "data";
pub const BACKUPS_DIR_NAME: &str = "backups";
/// Per-project config file written by project-structure templates.
pub const PROJECT_CONFIG_FILE_NAME: &str = ".config.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigLayout {
    root: PathBuf,
}

impl ConfigLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_file(&self) -> PathBuf {
        self.root.join(CONFIG_FILE_NAME)
    }

    pub fn templates_dir(&self) -> PathBuf {
        self.root.join(TEMPLATES_DIR_NAME)
    }

    /// The dedicated directory of a pool in the split layout.
    ///
    /// Callers resolving templates should go through the registry, which
    /// falls back to [`templates_dir`](Self::templates_dir) for the flat
    /// layout when this directory is absent.
    pub fn pool_dir(&self, kind: TemplateKind) -> PathBuf {
        self.templates_dir().join(kind.dir_name())
    }

    pub fn data_dir(&self) -> PathBuf {
        self.root.join(DATA_DIR_NAME)
    }

    pub fn backups_dir(&self) -> PathBuf {
        self.root.join(BACKUPS_DIR_NAME)
    }

    /// Everything a backup archives, in archive order.
    pub fn backup_sources(&self) -> Vec<PathBuf> {
        vec![self.templates_dir(), self.data_dir(), self.config_file()]
    }

    /// Directories `deploy` creates.
    pub fn skeleton(&self) -> Vec<PathBuf> {
        vec![
            self.pool_dir(TemplateKind::File),
            self.pool_dir(TemplateKind::Project),
            self.data_dir(),
            self.backups_dir(),
        ]
    }
}
