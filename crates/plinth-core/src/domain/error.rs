// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by pure domain rules (no I/O involved).
///
/// All errors are:
/// - Cloneable (so services can log and return the same value)
/// - Categorizable (for shell display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    #[error("Refusing to write an empty configuration")]
    EmptyConfig,

    #[error("Invalid project: {reason}")]
    InvalidProject { reason: String },

    #[error("Invalid template name '{name}'")]
    InvalidTemplateName { name: String },

    // ========================================================================
    // Parse Errors
    // ========================================================================
    #[error("Malformed template '{name}': {reason}")]
    MalformedTemplate { name: String, reason: String },

    #[error("Malformed configuration at {path}: {reason}")]
    MalformedConfig { path: PathBuf, reason: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::EmptyConfig => vec![
                "The configuration must contain at least one key".into(),
                "Reset the configuration to regenerate the defaults".into(),
            ],
            Self::InvalidProject { reason } => vec![
                format!("Details: {}", reason),
                "Set the 'workspace' key in config.json".into(),
                "Provide a non-empty project name".into(),
            ],
            Self::InvalidTemplateName { name } => vec![
                format!("'{}' does not contain a usable file name", name),
                "Template names are file base names without extension".into(),
            ],
            Self::MalformedTemplate { name, .. } => vec![
                format!("Check the syntax of template '{}'", name),
                "Project templates must render to a JSON tree".into(),
                "Placeholders use {{ project_name }} and {{ workspace }}".into(),
            ],
            Self::MalformedConfig { path, .. } => vec![
                format!("Fix or remove {}", path.display()),
                "The config file must be a flat JSON object of strings".into(),
            ],
        }
    }

    /// Error category for shell display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::EmptyConfig | Self::InvalidProject { .. } | Self::InvalidTemplateName { .. } => {
                ErrorCategory::Validation
            }
            Self::MalformedTemplate { .. } => ErrorCategory::Validation,
            Self::MalformedConfig { .. } => ErrorCategory::Configuration,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Configuration,
}
