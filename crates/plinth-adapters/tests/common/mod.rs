//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use plinth_adapters::{LocalFilesystem, Plinth, TeraRenderer, ZipArchiver, builtin_templates};
use plinth_core::domain::ConfigLayout;
use tempfile::TempDir;

/// A configuration root and a workspace inside one temporary directory.
pub struct Fixture {
    pub dir: TempDir,
    pub plinth: Plinth,
}

impl Fixture {
    /// Not yet deployed.
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let workspace = dir.path().join("ws");
        let plinth = Plinth::with_adapters(
            ConfigLayout::new(dir.path().join("cfg")),
            builtin_templates::with_workspace(&workspace.to_string_lossy()),
            Arc::new(LocalFilesystem::new()),
            Arc::new(ZipArchiver::new()),
            Arc::new(TeraRenderer::new()),
        );
        Self { dir, plinth }
    }

    pub fn deployed() -> Self {
        let fixture = Self::new();
        fixture.plinth.deploy().unwrap();
        fixture
    }

    pub fn root(&self) -> PathBuf {
        self.dir.path().join("cfg")
    }

    pub fn workspace(&self) -> PathBuf {
        self.dir.path().join("ws")
    }
}
