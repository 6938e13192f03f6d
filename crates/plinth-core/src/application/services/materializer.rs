//! Materializer - writes a [`TreeNode`] to disk.
//!
//! Nodes are visited in document order (parent first, then children in
//! order). The first failing operation stops the walk and whatever was
//! already created stays on disk.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, instrument, warn};

use crate::{
    application::{ApplicationError, ports::Filesystem},
    domain::TreeNode,
    error::PlinthResult,
};

/// What a successful walk created.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaterializeReport {
    /// Directories created by this walk (pre-existing ones are not listed).
    pub directories: Vec<PathBuf>,
    /// Files written, in visiting order.
    pub files: Vec<PathBuf>,
}

impl MaterializeReport {
    pub fn total(&self) -> usize {
        self.directories.len() + self.files.len()
    }
}

pub struct Materializer {
    filesystem: Arc<dyn Filesystem>,
}

impl Materializer {
    pub fn new(filesystem: Arc<dyn Filesystem>) -> Self {
        Self { filesystem }
    }

    /// Create `root` under `base`.
    ///
    /// `content` produces the body of a file node from its template name.
    /// When it fails the file is still created, empty, and the walk goes on.
    ///
    /// # Errors
    ///
    /// - `PathExists` for the first existing node when `overwrite` is false
    /// - `AccessError` for any filesystem failure
    #[instrument(skip_all, fields(base = %base.display(), overwrite = overwrite))]
    pub fn materialize<F>(
        &self,
        root: &TreeNode,
        base: &Path,
        overwrite: bool,
        content: F,
    ) -> PlinthResult<MaterializeReport>
    where
        F: Fn(&str) -> PlinthResult<String>,
    {
        let mut report = MaterializeReport::default();
        let path = root.resolve_under(base);
        self.create_node(root, &path, overwrite, &content, &mut report)?;
        debug!(
            directories = report.directories.len(),
            files = report.files.len(),
            "Tree materialized"
        );
        Ok(report)
    }

    fn create_node(
        &self,
        node: &TreeNode,
        path: &Path,
        overwrite: bool,
        content: &dyn Fn(&str) -> PlinthResult<String>,
        report: &mut MaterializeReport,
    ) -> PlinthResult<()> {
        let exists = self.filesystem.exists(path)?;
        if exists && !overwrite {
            return Err(ApplicationError::PathExists {
                path: path.to_path_buf(),
            }
            .into());
        }

        if node.is_dir() {
            if !exists {
                self.filesystem.create_dir_all(path)?;
                report.directories.push(path.to_path_buf());
            }
        } else {
            let body = match node.template() {
                Some(template) => content(template).unwrap_or_else(|e| {
                    warn!(
                        path = %path.display(),
                        template,
                        error = %e,
                        "Could not generate content, leaving file empty"
                    );
                    String::new()
                }),
                None => String::new(),
            };
            self.filesystem.write_file(path, &body)?;
            report.files.push(path.to_path_buf());
        }

        for child in &node.children {
            let child_path = child.resolve_under(path);
            self.create_node(child, &child_path, overwrite, content, report)?;
        }

        Ok(())
    }
}
