use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Serialize;

use super::{ConfigMap, DomainError, config_map::keys};

/// The rendering environment of one project.
///
/// Serialized as the template context, so every field is reachable from a
/// template: `{{ project_name }}`, `{{ workspace }}`, `{{ project_root }}`,
/// `{{ workspace_config.yourname }}`, ...
///
/// `project_name`, `workspace` and `project_root` have their backslashes
/// doubled so that interpolating them inside a JSON string literal keeps the
/// document valid on Windows paths. The unescaped root is kept privately for
/// filesystem access.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Project {
    /// Name of the project directory inside the workspace.
    pub project_name: String,
    /// Path to the current workspace.
    pub workspace: String,
    /// `workspace/project_name`.
    pub project_root: String,
    /// Copy of the configuration the project was created with.
    pub workspace_config: ConfigMap,
    /// Project-specific config read back from `.config.json` after creation.
    pub project_config: BTreeMap<String, String>,
    #[serde(skip)]
    root: PathBuf,
    #[serde(skip)]
    workspace_path: PathBuf,
}

impl Project {
    /// Bind `name` to the workspace configured in `config`.
    pub fn new(name: &str, config: ConfigMap) -> Self {
        let workspace = config.key(keys::WORKSPACE).to_string();
        let workspace_path = PathBuf::from(&workspace);
        let root = workspace_path.join(name);
        Self {
            project_name: escape(name),
            workspace: escape(&workspace),
            project_root: escape(&root.to_string_lossy()),
            workspace_config: config,
            project_config: BTreeMap::new(),
            root,
            workspace_path,
        }
    }

    /// Unescaped project root, for I/O.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Unescaped workspace path, for I/O.
    pub fn workspace_path(&self) -> &Path {
        &self.workspace_path
    }

    /// A project needs both a name and a workspace before anything is created.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.project_name.is_empty() {
            return Err(DomainError::InvalidProject {
                reason: "project name is empty".into(),
            });
        }
        if self.workspace.is_empty() {
            return Err(DomainError::InvalidProject {
                reason: format!("'{}' is not set in the configuration", keys::WORKSPACE),
            });
        }
        Ok(())
    }

    /// Template used when the caller does not name one.
    pub fn default_structure(&self) -> &str {
        self.workspace_config.key(keys::PROJECT_STRUCTURE)
    }
}

/// Double every backslash.
pub fn escape(input: &str) -> String {
    input.replace('\\', "\\\\")
}
