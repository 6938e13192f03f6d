//! Template Registry - named lookup over the two template pools.
//!
//! File templates live in `templates/files`, project-structure templates in
//! `templates/projects`. Configurations written before the split keep every
//! template directly under `templates/`; when a pool directory is missing the
//! flat directory is used for both kinds.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::{
    application::{ApplicationError, ports::Filesystem},
    domain::{ConfigLayout, DomainError, TemplateIndex, TemplateKind, template_name},
    error::PlinthResult,
};

/// Lists, resolves, reads and adds templates.
#[derive(Clone)]
pub struct TemplateRegistry {
    layout: ConfigLayout,
    filesystem: Arc<dyn Filesystem>,
}

impl TemplateRegistry {
    pub fn new(layout: ConfigLayout, filesystem: Arc<dyn Filesystem>) -> Self {
        Self { layout, filesystem }
    }

    /// Directory the templates of `kind` are read from and written to.
    ///
    /// # Errors
    ///
    /// `NotConfigured` when neither the pool nor the flat `templates/`
    /// directory exists.
    pub fn pool_dir(&self, kind: TemplateKind) -> PlinthResult<PathBuf> {
        let pool = self.layout.pool_dir(kind);
        if self.filesystem.exists(&pool)? {
            return Ok(pool);
        }

        let flat = self.layout.templates_dir();
        if self.filesystem.exists(&flat)? {
            debug!(pool = %pool.display(), "Pool missing, using flat template directory");
            return Ok(flat);
        }

        Err(ApplicationError::NotConfigured { path: flat }.into())
    }

    /// Enumerate the pool of `kind`.
    ///
    /// Names are the file base names without extension. When two files share
    /// a name the one enumerated last wins.
    #[instrument(skip(self))]
    pub fn list(&self, kind: TemplateKind) -> PlinthResult<TemplateIndex> {
        let dir = self.pool_dir(kind)?;
        let files = self.filesystem.list_files(&dir)?;
        let index = TemplateIndex::from_files(&dir, files);
        debug!(count = index.len(), "Templates enumerated");
        Ok(index)
    }

    /// Full path of the template `name`, if it exists. `name` may carry an
    /// extension.
    pub fn resolve(&self, kind: TemplateKind, name: &str) -> PlinthResult<Option<PathBuf>> {
        Ok(self.list(kind)?.get(name).map(Path::to_path_buf))
    }

    /// Raw source of the template `name`.
    pub fn read(&self, kind: TemplateKind, name: &str) -> PlinthResult<String> {
        let path = self
            .resolve(kind, name)?
            .ok_or_else(|| ApplicationError::TemplateNotFound {
                name: name.to_string(),
                kind,
            })?;
        self.filesystem.read_to_string(&path)
    }

    /// Add a template to the pool of `kind`.
    ///
    /// New templates are written as `<name>.json`. With `overwrite`, an
    /// existing template is replaced in place at its current path.
    ///
    /// # Errors
    ///
    /// - `InvalidTemplateName` if `name` reduces to nothing
    /// - `AlreadyExists` if the name is taken and `overwrite` is false
    #[instrument(skip(self, content), fields(bytes = content.len()))]
    pub fn add(
        &self,
        kind: TemplateKind,
        name: &str,
        content: &str,
        overwrite: bool,
    ) -> PlinthResult<PathBuf> {
        let name = template_name(name).ok_or_else(|| DomainError::InvalidTemplateName {
            name: name.to_string(),
        })?;

        let dir = self.pool_dir(kind)?;
        let target = match self.list(kind)?.get(&name) {
            Some(existing) if !overwrite => {
                return Err(ApplicationError::AlreadyExists {
                    name,
                    path: existing.to_path_buf(),
                }
                .into());
            }
            Some(existing) => existing.to_path_buf(),
            None => dir.join(format!("{name}.json")),
        };

        self.filesystem.write_file(&target, content)?;
        info!(path = %target.display(), "Template saved");
        Ok(target)
    }
}
