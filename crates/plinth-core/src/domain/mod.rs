//! Core domain layer for Plinth.
//!
//! This module contains pure values and rules with no I/O. Reading and
//! writing the filesystem, rendering and archiving are reached through the
//! ports in [`crate::application::ports`].
//!
//! - **No I/O**: paths are computed, never touched
//! - **No globals**: default templates are a value passed in by the caller
//! - **Owned trees**: [`TreeNode`] children are owned; there is no parent link

pub mod config_map;
pub mod defaults;
pub mod error;
pub mod layout;
pub mod project;
pub mod template;
pub mod tree;

pub use config_map::{ConfigMap, keys};
pub use defaults::{DefaultTemplate, DefaultTemplates};
pub use error::{DomainError, ErrorCategory};
pub use layout::{ConfigLayout, PROJECT_CONFIG_FILE_NAME};
pub use project::Project;
pub use template::{TemplateEntry, TemplateIndex, TemplateKind, strip_extension, template_name};
pub use tree::{NodeInfo, TreeEntry, TreeNode};
