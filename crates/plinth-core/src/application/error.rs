//! Application layer errors.
//!
//! These errors represent failures while talking to the outside world
//! (filesystem, archives, template pools), not rule violations. Rule
//! violations are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::TemplateKind;
use crate::error::ErrorCategory;

/// Errors that occur during service orchestration.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApplicationError {
    /// `deploy` found an existing configuration root.
    #[error("Configuration already exists at {root}")]
    AlreadyConfigured { root: PathBuf },

    /// The configuration was read before it was deployed.
    #[error("Not configured: {path} does not exist")]
    NotConfigured { path: PathBuf },

    /// A template or data file with the same name already exists.
    #[error("'{name}' already exists at {path}")]
    AlreadyExists { name: String, path: PathBuf },

    /// No template with this name in the pool.
    #[error("{kind} template '{name}' not found")]
    TemplateNotFound { name: String, kind: TemplateKind },

    /// Materialization hit an existing path without overwrite.
    #[error("{path} already exists")]
    PathExists { path: PathBuf },

    /// I/O or permission failure.
    #[error("Cannot access {path}: {reason}")]
    AccessError { path: PathBuf, reason: String },

    /// A file the caller named (backup, data file) is missing.
    #[error("{path} not found")]
    NotFound { path: PathBuf },

    /// Creating or extracting an archive failed.
    #[error("Archive {path} failed: {reason}")]
    ArchiveFailed { path: PathBuf, reason: String },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::AlreadyConfigured { root } => vec![
                format!("A configuration already lives in {}", root.display()),
                "Use reset to re-initialize it (a backup is taken first)".into(),
            ],
            Self::NotConfigured { .. } => vec![
                "Run deploy to create the configuration".into(),
                "Or restore a previous backup".into(),
            ],
            Self::AlreadyExists { name, path } => vec![
                format!("'{}' is already defined at {}", name, path.display()),
                "Pass overwrite to replace it".into(),
                "Choose a different name".into(),
            ],
            Self::TemplateNotFound { kind, .. } => vec![
                format!("List the available {} templates", kind),
                "Template names are matched without their extension".into(),
            ],
            Self::PathExists { path } => vec![
                format!("Directory or file already exists: {}", path.display()),
                "Pass overwrite to reuse it (existing files are truncated)".into(),
                "Choose a different project name".into(),
            ],
            Self::AccessError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have read and write permissions".into(),
            ],
            Self::NotFound { path } => vec![
                format!("Nothing exists at {}", path.display()),
                "List the backups or data files to see what is available".into(),
            ],
            Self::ArchiveFailed { .. } => vec!["Check the archive path and free disk space".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::AlreadyConfigured { .. } | Self::NotConfigured { .. } => {
                ErrorCategory::Configuration
            }
            Self::AlreadyExists { .. } | Self::PathExists { .. } => ErrorCategory::Conflict,
            Self::TemplateNotFound { .. } | Self::NotFound { .. } => ErrorCategory::NotFound,
            Self::AccessError { .. } | Self::ArchiveFailed { .. } => ErrorCategory::Internal,
        }
    }
}
