//! Plinth Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for Plinth, a
//! configuration store and project generator: a workspace configuration, two
//! pools of named templates, and project directory trees materialized from
//! JSON structure templates.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │        Shell (not part of Plinth)       │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     plinth-adapters  (Plinth facade)    │
//! └──────────────────┬──────────────────────┘
//!                    │ wires
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │          Application Services           │
//! │ (ConfigStore, TemplateRegistry,         │
//! │  ProjectBuilder, Materializer)          │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │       Application Ports (Traits)        │
//! │ (Filesystem, TemplateRenderer, Archiver)│
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     plinth-adapters (Infrastructure)    │
//! │ (LocalFilesystem, TeraRenderer, Zip...) │
//! └─────────────────────────────────────────┘
//!
//! ┌─────────────────────────────────────────┐
//! │        Domain Layer (Pure Logic)        │
//! │  (ConfigMap, TreeNode, Project, ...)    │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use plinth_core::prelude::*;
//!
//! # fn wire(fs: Arc<dyn Filesystem>, zip: Arc<dyn Archiver>, tera: Arc<dyn TemplateRenderer>) -> PlinthResult<()> {
//! let store = ConfigStore::new(ConfigLayout::new("/home/me/plinth"), DefaultTemplates::default(), fs, zip);
//! let builder = ProjectBuilder::new(store, tera);
//!
//! let mut project = builder.new_project("demo")?;
//! builder.create(&mut project, "", false)?;
//! # Ok(())
//! # }
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        ConfigStore, MaterializeReport, ProjectBuilder, ProjectSummary, TemplateRegistry,
        ports::{Archiver, DirEntry, Filesystem, TemplateRenderer},
    };
    pub use crate::domain::{
        ConfigLayout, ConfigMap, DefaultTemplates, Project, TemplateIndex, TemplateKind,
        TreeEntry, TreeNode,
    };
    pub use crate::error::{PlinthError, PlinthResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
