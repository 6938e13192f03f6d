//! Unified error handling for Plinth Core.
//!
//! This module provides a unified error type that wraps domain and application
//! errors, with rich context and user-actionable suggestions.

use std::path::PathBuf;
use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for Plinth Core operations.
///
/// Every operation of the collaborator contract returns this type. None of
/// the variants are fatal to the process; the calling shell decides whether
/// to continue the session.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PlinthError {
    /// Errors from the domain layer (rule violations, parse failures).
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Errors from the application layer (I/O, pools, archives).
    #[error(transparent)]
    Application(#[from] ApplicationError),

    /// Unexpected internal errors (bugs).
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl PlinthError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Internal { .. } => vec!["This appears to be a bug in Plinth".into()],
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::Configuration => ErrorCategory::Configuration,
            },
            Self::Application(e) => e.category(),
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }

    /// The path this error is about, when it has one.
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::Domain(DomainError::MalformedConfig { path, .. }) => Some(path),
            Self::Application(
                ApplicationError::AlreadyConfigured { root: path }
                | ApplicationError::NotConfigured { path }
                | ApplicationError::AlreadyExists { path, .. }
                | ApplicationError::PathExists { path }
                | ApplicationError::AccessError { path, .. }
                | ApplicationError::NotFound { path }
                | ApplicationError::ArchiveFailed { path, .. },
            ) => Some(path),
            _ => None,
        }
    }

    /// Shorthand for an [`ApplicationError::AccessError`].
    pub fn access(path: impl Into<PathBuf>, reason: impl std::fmt::Display) -> Self {
        ApplicationError::AccessError {
            path: path.into(),
            reason: reason.to_string(),
        }
        .into()
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Conflict,
    NotFound,
    Configuration,
    Internal,
}

/// Convenient result type alias.
pub type PlinthResult<T> = Result<T, PlinthError>;

/// Extension trait for turning foreign errors into an access error on a path.
pub trait Context<T> {
    /// Attach the path the failing operation was working on.
    fn at_path(self, path: impl Into<PathBuf>) -> PlinthResult<T>;
}

impl<T, E> Context<T> for Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn at_path(self, path: impl Into<PathBuf>) -> PlinthResult<T> {
        self.map_err(|e| PlinthError::access(path, e))
    }
}
