//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "deploy the configuration" or "create a project".

pub mod config_store;
pub mod materializer;
pub mod project_builder;
pub mod template_registry;

pub use config_store::{ConfigStore, backup_file_name};
pub use materializer::{MaterializeReport, Materializer};
pub use project_builder::{ProjectBuilder, ProjectSummary};
pub use template_registry::TemplateRegistry;
