//! Project Builder - main application orchestrator.
//!
//! This service coordinates the project creation workflow:
//! 1. Resolve the project-structure template
//! 2. Render it against the project
//! 3. Parse the result into a [`TreeNode`]
//! 4. Materialize the tree, rendering file templates for each leaf
//! 5. Load the project's own `.config.json` back

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{Filesystem, TemplateRenderer},
        services::{ConfigStore, MaterializeReport, Materializer, TemplateRegistry},
    },
    domain::{DomainError, PROJECT_CONFIG_FILE_NAME, Project, TemplateKind, TreeNode, keys},
    error::{PlinthError, PlinthResult},
};

/// A project directory found in the workspace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectSummary {
    pub name: String,
    pub path: PathBuf,
}

/// Creates projects from project-structure templates.
#[derive(Clone)]
pub struct ProjectBuilder {
    config: ConfigStore,
    registry: TemplateRegistry,
    renderer: Arc<dyn TemplateRenderer>,
    filesystem: Arc<dyn Filesystem>,
}

impl ProjectBuilder {
    pub fn new(config: ConfigStore, renderer: Arc<dyn TemplateRenderer>) -> Self {
        Self {
            registry: config.registry(),
            filesystem: config.filesystem(),
            config,
            renderer,
        }
    }

    /// Bind `name` to the currently configured workspace.
    ///
    /// # Errors
    ///
    /// Whatever reading the configuration fails with, `NotConfigured` in
    /// particular.
    #[instrument(skip(self))]
    pub fn new_project(&self, name: &str) -> PlinthResult<Project> {
        let config = self.config.read()?;
        Ok(Project::new(name, config))
    }

    /// Render a single template of `kind` against `project`.
    pub fn render(&self, project: &Project, kind: TemplateKind, name: &str) -> PlinthResult<String> {
        let source = self.registry.read(kind, name)?;
        self.renderer.render(name, &source, project)
    }

    /// Render and parse a project-structure template without touching disk.
    ///
    /// An empty `template_name` selects the configured default structure.
    #[instrument(skip(self, project), fields(project = %project.project_name))]
    pub fn preview(&self, project: &Project, template_name: &str) -> PlinthResult<TreeNode> {
        project.validate()?;

        let name = if template_name.is_empty() {
            project.default_structure()
        } else {
            template_name
        };
        debug!(template = name, "Rendering project structure");

        let rendered = self.render(project, TemplateKind::Project, name)?;
        Ok(TreeNode::parse(name, &rendered)?)
    }

    /// Create `project` on disk from a project-structure template.
    ///
    /// On success `project.project_config` holds the content of the new
    /// project's `.config.json`, when there is one.
    #[instrument(
        skip(self, project),
        fields(project = %project.project_name, template = template_name)
    )]
    pub fn create(
        &self,
        project: &mut Project,
        template_name: &str,
        overwrite: bool,
    ) -> PlinthResult<MaterializeReport> {
        let root = self.preview(project, template_name)?;

        let report = {
            let project: &Project = project;
            Materializer::new(self.filesystem()).materialize(
                &root,
                project.workspace_path(),
                overwrite,
                |template| self.render(project, TemplateKind::File, template),
            )?
        };

        self.reload_project_config(project);
        info!(
            directories = report.directories.len(),
            files = report.files.len(),
            "Project created"
        );
        Ok(report)
    }

    /// Top-level directories of the workspace. The workspace is created
    /// when missing.
    #[instrument(skip(self))]
    pub fn list_projects(&self) -> PlinthResult<Vec<ProjectSummary>> {
        let config = self.config.read()?;
        let workspace = config.key(keys::WORKSPACE);
        if workspace.is_empty() {
            return Err(DomainError::InvalidProject {
                reason: format!("'{}' is not set in the configuration", keys::WORKSPACE),
            }
            .into());
        }

        let workspace = Path::new(workspace);
        if !self.filesystem.exists(workspace)? {
            info!(path = %workspace.display(), "Creating workspace");
            self.filesystem.create_dir_all(workspace)?;
        }

        Ok(self
            .filesystem
            .read_dir(workspace)?
            .into_iter()
            .filter(|entry| entry.is_dir)
            .map(|entry| ProjectSummary {
                name: entry.name,
                path: entry.path,
            })
            .collect())
    }

    /// Snapshot an existing directory as a tree. File nodes carry no
    /// template and children use paths relative to their parent.
    #[instrument(skip(self))]
    pub fn capture(&self, path: &Path) -> PlinthResult<TreeNode> {
        if !self.filesystem.exists(path)? {
            return Err(ApplicationError::NotFound {
                path: path.to_path_buf(),
            }
            .into());
        }
        self.capture_dir(TreeNode::dir(path), path)
    }

    fn capture_dir(&self, mut node: TreeNode, path: &Path) -> PlinthResult<TreeNode> {
        for entry in self.filesystem.read_dir(path)? {
            let child = if entry.is_dir {
                self.capture_dir(TreeNode::dir(&entry.name), &entry.path)?
            } else {
                TreeNode::file(&entry.name, "")
            };
            node.children.push(child);
        }
        Ok(node)
    }

    fn filesystem(&self) -> Arc<dyn Filesystem> {
        Arc::clone(&self.filesystem)
    }

    fn reload_project_config(&self, project: &mut Project) {
        let path = project.root().join(PROJECT_CONFIG_FILE_NAME);
        let loaded = self
            .filesystem
            .read_to_string(&path)
            .and_then(|raw| {
                serde_json::from_str::<BTreeMap<String, String>>(&raw).map_err(|e| {
                    PlinthError::from(DomainError::MalformedConfig {
                        path: path.clone(),
                        reason: e.to_string(),
                    })
                })
            });

        match loaded {
            Ok(config) => project.project_config = config,
            Err(e) => warn!(path = %path.display(), error = %e, "Project config not loaded"),
        }
    }
}
