//! Application layer for Plinth.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (ConfigStore, TemplateRegistry, ProjectBuilder)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! Services coordinate the domain layer through the ports. Path rules,
//! tree parsing and name normalization live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

// Re-export main services
pub use services::{
    ConfigStore, MaterializeReport, Materializer, ProjectBuilder, ProjectSummary,
    TemplateRegistry, backup_file_name,
};

// Re-export port traits (for adapter implementation)
pub use ports::{Archiver, DirEntry, Filesystem, TemplateRenderer};

pub use error::ApplicationError;
