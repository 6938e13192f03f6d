//! Ports (interfaces) for hexagonal architecture.
//!
//! - **Driven ports** (output): what the services need from the outside world

pub mod output;

// Re-export driven ports
pub use output::{Archiver, DirEntry, Filesystem, TemplateRenderer};

#[cfg(test)]
pub use output::{MockArchiver, MockFilesystem, MockTemplateRenderer};
