//! In-memory filesystem adapter for testing.

use std::{
    collections::{BTreeMap, BTreeSet},
    path::{Path, PathBuf},
    sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use plinth_core::{
    application::ports::{DirEntry, Filesystem},
    error::{PlinthError, PlinthResult},
};

/// In-memory filesystem for testing.
///
/// Clones share the same tree, so a test can keep a handle after passing
/// one to a service.
#[derive(Debug, Clone, Default)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<MemoryFilesystemInner>>,
}

#[derive(Debug, Default)]
struct MemoryFilesystemInner {
    files: BTreeMap<PathBuf, String>,
    directories: BTreeSet<PathBuf>,
}

impl MemoryFilesystemInner {
    fn exists(&self, path: &Path) -> bool {
        self.files.contains_key(path) || self.directories.contains(path)
    }
}

impl MemoryFilesystem {
    /// Create a new empty memory filesystem.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a file's content (testing helper).
    pub fn read_file(&self, path: &Path) -> Option<String> {
        let inner = self.inner.read().ok()?;
        inner.files.get(path).cloned()
    }

    /// Every file path, sorted.
    pub fn files(&self) -> Vec<PathBuf> {
        self.inner
            .read()
            .map(|inner| inner.files.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Clear all contents.
    pub fn clear(&self) {
        if let Ok(mut inner) = self.inner.write() {
            inner.files.clear();
            inner.directories.clear();
        }
    }

    fn read(&self) -> PlinthResult<RwLockReadGuard<'_, MemoryFilesystemInner>> {
        self.inner.read().map_err(|_| poisoned())
    }

    fn write(&self) -> PlinthResult<RwLockWriteGuard<'_, MemoryFilesystemInner>> {
        self.inner.write().map_err(|_| poisoned())
    }
}

fn poisoned() -> PlinthError {
    PlinthError::Internal {
        message: "memory filesystem lock poisoned".into(),
    }
}

impl Filesystem for MemoryFilesystem {
    fn exists(&self, path: &Path) -> PlinthResult<bool> {
        Ok(self.read()?.exists(path))
    }

    fn create_dir_all(&self, path: &Path) -> PlinthResult<()> {
        let mut inner = self.write()?;
        if inner.files.contains_key(path) {
            return Err(PlinthError::access(path, "a file exists at this path"));
        }

        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            inner.directories.insert(current.clone());
        }

        Ok(())
    }

    fn write_file(&self, path: &Path, content: &str) -> PlinthResult<()> {
        let mut inner = self.write()?;

        if inner.directories.contains(path) {
            return Err(PlinthError::access(path, "is a directory"));
        }
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !inner.directories.contains(parent) {
                return Err(PlinthError::access(path, "Parent directory does not exist"));
            }
        }

        inner.files.insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn read_to_string(&self, path: &Path) -> PlinthResult<String> {
        self.read()?
            .files
            .get(path)
            .cloned()
            .ok_or_else(|| PlinthError::access(path, "No such file"))
    }

    fn remove_path(&self, path: &Path) -> PlinthResult<()> {
        let mut inner = self.write()?;
        inner.directories.retain(|p| !p.starts_with(path));
        inner.files.retain(|p, _| !p.starts_with(path));
        Ok(())
    }

    fn read_dir(&self, path: &Path) -> PlinthResult<Vec<DirEntry>> {
        let inner = self.read()?;
        if !inner.directories.contains(path) {
            return Err(PlinthError::access(path, "No such directory"));
        }

        let child = |p: &PathBuf, is_dir: bool| {
            (p.parent() == Some(path)).then(|| DirEntry {
                path: p.clone(),
                name: p
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default(),
                is_dir,
            })
        };

        let mut entries: Vec<DirEntry> = inner
            .directories
            .iter()
            .filter_map(|p| child(p, true))
            .chain(inner.files.keys().filter_map(|p| child(p, false)))
            .collect();
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    fn list_files(&self, root: &Path) -> PlinthResult<Vec<PathBuf>> {
        let inner = self.read()?;
        if !inner.directories.contains(root) {
            return Err(PlinthError::access(root, "No such directory"));
        }

        Ok(inner
            .files
            .keys()
            .filter_map(|p| p.strip_prefix(root).ok())
            .map(Path::to_path_buf)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_requires_parent_directory() {
        let fs = MemoryFilesystem::new();
        assert!(fs.write_file(Path::new("/a/b.txt"), "x").is_err());

        fs.create_dir_all(Path::new("/a")).unwrap();
        fs.write_file(Path::new("/a/b.txt"), "x").unwrap();
        assert_eq!(fs.read_file(Path::new("/a/b.txt")).as_deref(), Some("x"));
        assert!(fs.exists(Path::new("/")).unwrap());
    }

    #[test]
    fn read_dir_lists_immediate_children() {
        let fs = MemoryFilesystem::new();
        fs.create_dir_all(Path::new("/ws/alpha/deep")).unwrap();
        fs.write_file(Path::new("/ws/notes.md"), "").unwrap();

        let names: Vec<String> = fs
            .read_dir(Path::new("/ws"))
            .unwrap()
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(names, vec!["alpha", "notes.md"]);
    }

    #[test]
    fn remove_path_drops_the_whole_subtree() {
        let fs = MemoryFilesystem::new();
        fs.create_dir_all(Path::new("/cfg/templates/files")).unwrap();
        fs.write_file(Path::new("/cfg/templates/files/n.json"), "").unwrap();

        fs.remove_path(Path::new("/cfg/templates")).unwrap();
        assert!(!fs.exists(Path::new("/cfg/templates/files")).unwrap());
        assert!(fs.files().is_empty());
        assert!(fs.exists(Path::new("/cfg")).unwrap());
    }
}
