//! Config Store - owns the configuration root.
//!
//! The root holds `config.json`, the template pools, the data area and the
//! backups directory. This service creates it (`deploy`), re-creates it
//! (`reset`), persists the key/value configuration and moves the whole thing
//! in and out of zip archives.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{Local, NaiveDateTime};
use tracing::{debug, info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{Archiver, Filesystem},
        services::TemplateRegistry,
    },
    domain::{ConfigLayout, ConfigMap, DefaultTemplates, DomainError, template_name},
    error::{PlinthError, PlinthResult},
};

/// Format of generated backup names.
pub const BACKUP_TIMESTAMP_FORMAT: &str = "%Y-%m-%d-%H-%M-%S";

/// Persistent configuration and its backups.
#[derive(Clone)]
pub struct ConfigStore {
    layout: ConfigLayout,
    defaults: Arc<DefaultTemplates>,
    filesystem: Arc<dyn Filesystem>,
    archiver: Arc<dyn Archiver>,
}

impl ConfigStore {
    pub fn new(
        layout: ConfigLayout,
        defaults: DefaultTemplates,
        filesystem: Arc<dyn Filesystem>,
        archiver: Arc<dyn Archiver>,
    ) -> Self {
        Self {
            layout,
            defaults: Arc::new(defaults),
            filesystem,
            archiver,
        }
    }

    pub fn layout(&self) -> &ConfigLayout {
        &self.layout
    }

    pub fn filesystem(&self) -> Arc<dyn Filesystem> {
        Arc::clone(&self.filesystem)
    }

    /// Template registry over this configuration root.
    pub fn registry(&self) -> TemplateRegistry {
        TemplateRegistry::new(self.layout.clone(), self.filesystem())
    }

    // -------------------------------------------------------------------------
    // Lifecycle
    // -------------------------------------------------------------------------

    /// Create the configuration root with the default templates and config.
    ///
    /// # Errors
    ///
    /// `AlreadyConfigured` if the root already exists. Nothing is touched in
    /// that case.
    #[instrument(skip(self), fields(root = %self.layout.root().display()))]
    pub fn deploy(&self) -> PlinthResult<()> {
        self.initiate(false)
    }

    /// Re-create the configuration from the defaults.
    ///
    /// With `create_backup`, a backup named `backup_name` (or
    /// `<timestamp>-reset` when empty) is written first and its path is
    /// returned. The backups directory survives the reset. A root that was
    /// never deployed has nothing to back up, so no backup is taken.
    #[instrument(skip(self), fields(root = %self.layout.root().display()))]
    pub fn reset(&self, create_backup: bool, backup_name: &str) -> PlinthResult<Option<PathBuf>> {
        let backup = if create_backup && self.filesystem.exists(self.layout.root())? {
            let name = if backup_name.is_empty() {
                format!("{}-reset", Local::now().format(BACKUP_TIMESTAMP_FORMAT))
            } else {
                backup_name.to_string()
            };
            Some(self.backup(&name)?)
        } else {
            None
        };

        self.initiate(true)?;
        Ok(backup)
    }

    fn initiate(&self, overwrite: bool) -> PlinthResult<()> {
        let root = self.layout.root();
        let exists = self.filesystem.exists(root)?;

        if exists && !overwrite {
            return Err(ApplicationError::AlreadyConfigured {
                root: root.to_path_buf(),
            }
            .into());
        }

        if exists {
            for path in [
                self.layout.config_file(),
                self.layout.templates_dir(),
                self.layout.data_dir(),
            ] {
                debug!(path = %path.display(), "Removing");
                self.filesystem.remove_path(&path)?;
            }
        }

        for dir in self.layout.skeleton() {
            self.filesystem.create_dir_all(&dir)?;
        }

        let registry = self.registry();
        for template in self.defaults.templates() {
            registry.add(template.kind, &template.name, &template.content, true)?;
        }

        self.create_default()?;
        info!(
            templates = self.defaults.templates().len(),
            "Configuration initialized"
        );
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Key/value configuration
    // -------------------------------------------------------------------------

    /// Overwrite `config.json` with the default configuration.
    pub fn create_default(&self) -> PlinthResult<()> {
        self.write(self.defaults.config())
    }

    /// Load `config.json`.
    ///
    /// # Errors
    ///
    /// - `NotConfigured` if the file does not exist
    /// - `MalformedConfig` if it is not a flat JSON object of strings
    #[instrument(skip(self))]
    pub fn read(&self) -> PlinthResult<ConfigMap> {
        let path = self.layout.config_file();
        if !self.filesystem.exists(&path)? {
            return Err(ApplicationError::NotConfigured { path }.into());
        }

        let raw = self.filesystem.read_to_string(&path)?;
        let config: ConfigMap =
            serde_json::from_str(&raw).map_err(|e| DomainError::MalformedConfig {
                path: path.clone(),
                reason: e.to_string(),
            })?;

        debug!(keys = config.len(), "Configuration loaded");
        Ok(config)
    }

    /// Persist `config` as pretty-printed JSON.
    #[instrument(skip(self, config), fields(keys = config.len()))]
    pub fn write(&self, config: &ConfigMap) -> PlinthResult<()> {
        if config.is_empty() {
            return Err(DomainError::EmptyConfig.into());
        }

        let root = self.layout.root();
        if !self.filesystem.exists(root)? {
            return Err(ApplicationError::NotConfigured {
                path: root.to_path_buf(),
            }
            .into());
        }

        let mut json = serde_json::to_string_pretty(config).map_err(|e| PlinthError::Internal {
            message: format!("serializing configuration: {e}"),
        })?;
        json.push('\n');

        self.filesystem
            .write_file(&self.layout.config_file(), &json)
    }

    /// Read, update one key, write back.
    pub fn set(&self, key: &str, value: &str) -> PlinthResult<ConfigMap> {
        let mut config = self.read()?;
        config.set(key, value);
        self.write(&config)?;
        Ok(config)
    }

    // -------------------------------------------------------------------------
    // Backups
    // -------------------------------------------------------------------------

    /// Archive templates, data and config into the backups directory.
    ///
    /// Sources that do not exist are skipped. Returns the archive path.
    ///
    /// # Errors
    ///
    /// - `NotConfigured` if the configuration root does not exist
    #[instrument(skip(self))]
    pub fn backup(&self, filename: &str) -> PlinthResult<PathBuf> {
        let root = self.layout.root();
        if !self.filesystem.exists(root)? {
            return Err(ApplicationError::NotConfigured {
                path: root.to_path_buf(),
            }
            .into());
        }

        let name = backup_file_name(filename, Local::now().naive_local());
        let backups = self.layout.backups_dir();
        self.filesystem.create_dir_all(&backups)?;

        let mut sources = Vec::new();
        for source in self.layout.backup_sources() {
            if self.filesystem.exists(&source)? {
                sources.push(source);
            } else {
                debug!(path = %source.display(), "Nothing to back up");
            }
        }

        let destination = backups.join(name);
        self.archiver.archive(&sources, &destination)?;
        info!(path = %destination.display(), sources = sources.len(), "Backup written");
        Ok(destination)
    }

    /// Unpack a backup over the configuration root.
    ///
    /// `filename` is either absolute or relative to the backups directory.
    #[instrument(skip(self))]
    pub fn restore(&self, filename: &str) -> PlinthResult<()> {
        let archive = if Path::new(filename).is_absolute() {
            PathBuf::from(filename)
        } else {
            self.layout.backups_dir().join(filename)
        };

        if !self.filesystem.exists(&archive)? {
            return Err(ApplicationError::NotFound { path: archive }.into());
        }

        self.archiver.extract(&archive, self.layout.root())?;
        info!(path = %archive.display(), "Backup restored");
        Ok(())
    }

    /// Names of every file in the backups directory, sorted.
    pub fn list_backups(&self) -> PlinthResult<Vec<String>> {
        let dir = self.layout.backups_dir();
        if !self.filesystem.exists(&dir)? {
            return Ok(Vec::new());
        }

        let mut names: Vec<String> = self
            .filesystem
            .list_files(&dir)?
            .iter()
            .map(|p| p.to_string_lossy().into_owned())
            .collect();
        names.sort();
        Ok(names)
    }

    // -------------------------------------------------------------------------
    // Data files
    // -------------------------------------------------------------------------

    /// Path a data file named `name` is stored at.
    pub fn data_path(&self, name: &str) -> PlinthResult<PathBuf> {
        let name = template_name(name).ok_or_else(|| DomainError::InvalidTemplateName {
            name: name.to_string(),
        })?;
        Ok(self.layout.data_dir().join(format!("{name}.json")))
    }

    /// Store `content` as a data file.
    #[instrument(skip(self, content))]
    pub fn add_data(&self, name: &str, content: &str, overwrite: bool) -> PlinthResult<PathBuf> {
        let path = self.data_path(name)?;
        if self.filesystem.exists(&path)? && !overwrite {
            return Err(ApplicationError::AlreadyExists {
                name: name.to_string(),
                path,
            }
            .into());
        }

        self.filesystem.create_dir_all(&self.layout.data_dir())?;
        self.filesystem.write_file(&path, content)?;
        Ok(path)
    }

    /// Data files, relative to the data directory, sorted.
    pub fn data_files(&self) -> PlinthResult<Vec<String>> {
        let dir = self.layout.data_dir();
        if !self.filesystem.exists(&dir)? {
            warn!(path = %dir.display(), "Data directory missing");
            return Ok(Vec::new());
        }

        let mut files: Vec<String> = self
            .filesystem
            .list_files(&dir)?
            .iter()
            .map(|p| p.to_string_lossy().into_owned())
            .collect();
        files.sort();
        Ok(files)
    }

    pub fn read_data(&self, name: &str) -> PlinthResult<String> {
        let path = self.data_path(name)?;
        if !self.filesystem.exists(&path)? {
            return Err(ApplicationError::NotFound { path }.into());
        }
        self.filesystem.read_to_string(&path)
    }
}

/// Final file name of a backup requested as `filename` at time `now`.
///
/// - empty: `<timestamp>.zip`
/// - no extension: `.zip` appended
/// - anything else is kept as given
pub fn backup_file_name(filename: &str, now: NaiveDateTime) -> String {
    if filename.is_empty() {
        return format!("{}.zip", now.format(BACKUP_TIMESTAMP_FORMAT));
    }
    if Path::new(filename).extension().is_none() {
        return format!("{filename}.zip");
    }
    filename.to_string()
}
