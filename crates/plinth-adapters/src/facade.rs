//! The `Plinth` facade: every operation a shell needs, wired to the local
//! adapters.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use plinth_core::{
    application::{
        ConfigStore, MaterializeReport, ProjectBuilder, ProjectSummary, TemplateRegistry,
        ports::{Archiver, Filesystem, TemplateRenderer},
    },
    domain::{ConfigLayout, ConfigMap, DefaultTemplates, Project, TemplateKind, TreeEntry},
    error::PlinthResult,
};
use tracing::instrument;

use crate::{
    archive::ZipArchiver, builtin_templates, filesystem::LocalFilesystem, paths,
    renderer::TeraRenderer,
};

/// Path of the root node of a captured project structure.
const CAPTURED_ROOT: &str = "{{ workspace }}/{{ project_name }}";

/// Configuration store, template registry and project builder over one
/// configuration root.
#[derive(Clone)]
pub struct Plinth {
    store: ConfigStore,
    registry: TemplateRegistry,
    builder: ProjectBuilder,
}

impl Plinth {
    /// Local filesystem, zip backups, Tera rendering and the built-in
    /// defaults, rooted at `root`.
    pub fn open(root: impl Into<PathBuf>) -> Self {
        Self::with_adapters(
            ConfigLayout::new(root),
            builtin_templates::builtin(),
            Arc::new(LocalFilesystem::new()),
            Arc::new(ZipArchiver::new()),
            Arc::new(TeraRenderer::new()),
        )
    }

    /// [`Plinth::open`] at the discovered configuration root.
    pub fn from_env() -> PlinthResult<Self> {
        Ok(Self::open(paths::default_config_root()?))
    }

    pub fn with_adapters(
        layout: ConfigLayout,
        defaults: DefaultTemplates,
        filesystem: Arc<dyn Filesystem>,
        archiver: Arc<dyn Archiver>,
        renderer: Arc<dyn TemplateRenderer>,
    ) -> Self {
        let store = ConfigStore::new(layout, defaults, filesystem, archiver);
        Self {
            registry: store.registry(),
            builder: ProjectBuilder::new(store.clone(), renderer),
            store,
        }
    }

    pub fn root(&self) -> &Path {
        self.store.layout().root()
    }

    // -------------------------------------------------------------------------
    // Configuration
    // -------------------------------------------------------------------------

    pub fn deploy(&self) -> PlinthResult<()> {
        self.store.deploy()
    }

    /// Re-initialize from the defaults; returns the safety backup, if taken.
    pub fn reset(&self, create_backup: bool, backup_name: &str) -> PlinthResult<Option<PathBuf>> {
        self.store.reset(create_backup, backup_name)
    }

    pub fn backup(&self, filename: &str) -> PlinthResult<PathBuf> {
        self.store.backup(filename)
    }

    pub fn restore(&self, filename: &str) -> PlinthResult<()> {
        self.store.restore(filename)
    }

    pub fn list_backups(&self) -> PlinthResult<Vec<String>> {
        self.store.list_backups()
    }

    pub fn read(&self) -> PlinthResult<ConfigMap> {
        self.store.read()
    }

    pub fn write(&self, config: &ConfigMap) -> PlinthResult<()> {
        self.store.write(config)
    }

    pub fn set(&self, key: &str, value: &str) -> PlinthResult<ConfigMap> {
        self.store.set(key, value)
    }

    pub fn create_default(&self) -> PlinthResult<()> {
        self.store.create_default()
    }

    // -------------------------------------------------------------------------
    // Templates
    // -------------------------------------------------------------------------

    /// Name to path map of the pool, plus the names in lexicographic order.
    pub fn template_list(
        &self,
        kind: TemplateKind,
    ) -> PlinthResult<(HashMap<String, PathBuf>, Vec<String>)> {
        let index = self.registry.list(kind)?;
        let names = index.names();
        Ok((index.into_map(), names))
    }

    pub fn template_path(&self, kind: TemplateKind, name: &str) -> PlinthResult<Option<PathBuf>> {
        self.registry.resolve(kind, name)
    }

    pub fn read_template(&self, kind: TemplateKind, name: &str) -> PlinthResult<String> {
        self.registry.read(kind, name)
    }

    pub fn add_template(
        &self,
        kind: TemplateKind,
        name: &str,
        content: &str,
        overwrite: bool,
    ) -> PlinthResult<PathBuf> {
        self.registry.add(kind, name, content, overwrite)
    }

    /// Save the directory tree under `source` as a project-structure
    /// template named `name`. The root becomes
    /// `{{ workspace }}/{{ project_name }}`; files get no content template.
    #[instrument(skip(self))]
    pub fn capture_template(
        &self,
        name: &str,
        source: &Path,
        overwrite: bool,
    ) -> PlinthResult<PathBuf> {
        let mut tree = self.builder.capture(source)?;
        tree.path = PathBuf::from(CAPTURED_ROOT);
        self.registry
            .add(TemplateKind::Project, name, &tree.to_json_pretty(), overwrite)
    }

    // -------------------------------------------------------------------------
    // Projects
    // -------------------------------------------------------------------------

    pub fn new_project(&self, name: &str) -> PlinthResult<Project> {
        self.builder.new_project(name)
    }

    /// Materialize `project`. An empty `template` selects the configured
    /// default structure.
    pub fn create_project(
        &self,
        project: &mut Project,
        template: &str,
        overwrite: bool,
    ) -> PlinthResult<MaterializeReport> {
        self.builder.create(project, template, overwrite)
    }

    /// What `create_project` would create, in creation order.
    pub fn preview_project(&self, project: &Project, template: &str) -> PlinthResult<Vec<TreeEntry>> {
        let tree = self.builder.preview(project, template)?;
        Ok(tree.entries(project.workspace_path()))
    }

    pub fn list_projects(&self) -> PlinthResult<Vec<ProjectSummary>> {
        self.builder.list_projects()
    }

    // -------------------------------------------------------------------------
    // Data files
    // -------------------------------------------------------------------------

    pub fn add_data(&self, name: &str, content: &str, overwrite: bool) -> PlinthResult<PathBuf> {
        self.store.add_data(name, content, overwrite)
    }

    pub fn data_files(&self) -> PlinthResult<Vec<String>> {
        self.store.data_files()
    }

    pub fn data_path(&self, name: &str) -> PlinthResult<PathBuf> {
        self.store.data_path(name)
    }

    pub fn read_data(&self, name: &str) -> PlinthResult<String> {
        self.store.read_data(name)
    }
}
