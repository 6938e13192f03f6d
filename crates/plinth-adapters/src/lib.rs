//! Infrastructure adapters for Plinth.
//!
//! This crate implements the ports defined in `plinth-core::application::ports`
//! and wires them into the [`Plinth`] facade. It contains all external
//! dependencies and I/O operations.

pub mod archive;
pub mod builtin_templates;
pub mod facade;
pub mod filesystem;
pub mod logging;
pub mod paths;
pub mod renderer;

// Re-export commonly used adapters
pub use archive::ZipArchiver;
pub use facade::Plinth;
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use logging::{LogSettings, init_logging};
pub use renderer::TeraRenderer;
