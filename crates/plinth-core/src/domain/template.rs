//! Template pools and name→path indexing.
//!
//! A template's *name* is its file base name with the last extension
//! stripped: `templates/files/notes.md` is the template `notes`. Names are
//! matched exactly; there is no fuzzy or prefix matching.
//!
//! ## Duplicate names
//!
//! A pool is walked recursively, so two files in different sub-directories
//! can share a name. The index keeps the **last** one seen in enumeration
//! order. This is defined behaviour: users shadow a template by dropping a
//! file with the same name deeper in the tree.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use tracing::debug;

/// Which pool a template lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateKind {
    /// Plain-text templates rendered into a single file's content.
    File,
    /// JSON tree templates describing a whole project layout.
    Project,
}

impl TemplateKind {
    /// Directory name of the pool under `templates/`.
    pub const fn dir_name(self) -> &'static str {
        match self {
            Self::File => "files",
            Self::Project => "projects",
        }
    }
}

impl fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File => f.write_str("file"),
            Self::Project => f.write_str("project"),
        }
    }
}

/// One template file in a pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateEntry {
    pub name: String,
    pub full_path: PathBuf,
}

/// Remove the last extension of the final path component.
///
/// A leading dot is not an extension: `.gitignore` stays `.gitignore`.
pub fn strip_extension(name: &str) -> &str {
    let base_start = name.rfind(['/', '\\']).map_or(0, |i| i + 1);
    match name[base_start..].rfind('.') {
        None | Some(0) => name,
        Some(dot) => &name[..base_start + dot],
    }
}

/// Normalize user input into a template name: base name, extension removed.
///
/// Returns `None` when nothing usable is left (e.g. `"dir/"`).
pub fn template_name(input: &str) -> Option<String> {
    let base = input.rsplit(['/', '\\']).next().unwrap_or(input);
    let name = strip_extension(base);
    (!name.is_empty()).then(|| name.to_string())
}

/// Name → path map of one pool, rebuilt from disk on every lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateIndex {
    entries: HashMap<String, PathBuf>,
}

impl TemplateIndex {
    /// Build an index from paths relative to `root`, in enumeration order.
    pub fn from_files(root: &Path, files: impl IntoIterator<Item = PathBuf>) -> Self {
        let mut entries = HashMap::new();
        for relative in files {
            let Some(file_name) = relative.file_name() else {
                continue;
            };
            let name = strip_extension(&file_name.to_string_lossy()).to_string();
            let full_path = root.join(&relative);
            if let Some(previous) = entries.insert(name.clone(), full_path) {
                debug!(
                    template = %name,
                    shadowed = %previous.display(),
                    "template name shadowed by a later file"
                );
            }
        }
        Self { entries }
    }

    /// Look up a template, ignoring any extension in `name`.
    pub fn get(&self, name: &str) -> Option<&Path> {
        self.entries.get(strip_extension(name)).map(PathBuf::as_path)
    }

    /// Names in lexicographic order.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.entries.keys().cloned().collect();
        names.sort();
        names
    }

    /// Entries sorted by name.
    pub fn entries(&self) -> Vec<TemplateEntry> {
        self.names()
            .into_iter()
            .map(|name| TemplateEntry {
                full_path: self.entries[&name].clone(),
                name,
            })
            .collect()
    }

    pub fn into_map(self) -> HashMap<String, PathBuf> {
        self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_extension_cases() {
        assert_eq!(strip_extension("notes.json"), "notes");
        assert_eq!(strip_extension("notes"), "notes");
        assert_eq!(strip_extension("archive.tar.gz"), "archive.tar");
        assert_eq!(strip_extension(".gitignore"), ".gitignore");
        assert_eq!(strip_extension("sub.d/notes"), "sub.d/notes");
        assert_eq!(strip_extension("sub/notes.md"), "sub/notes");
    }

    #[test]
    fn template_name_takes_the_base_name() {
        assert_eq!(template_name("/tmp/x/creds.md").as_deref(), Some("creds"));
        assert_eq!(template_name(r"C:\t\todo.txt").as_deref(), Some("todo"));
        assert_eq!(template_name("plain").as_deref(), Some("plain"));
        assert_eq!(template_name("dir/"), None);
        assert_eq!(template_name(""), None);
    }

    #[test]
    fn lookup_ignores_extension() {
        let index = TemplateIndex::from_files(Path::new("/t"), vec![PathBuf::from("notes.json")]);
        assert_eq!(index.get("notes"), Some(Path::new("/t/notes.json")));
        assert_eq!(index.get("notes.json"), index.get("notes"));
        assert_eq!(index.get("note"), None);
    }

    #[test]
    fn later_files_shadow_earlier_ones() {
        let index = TemplateIndex::from_files(
            Path::new("/t"),
            vec![PathBuf::from("a/notes.md"), PathBuf::from("b/notes.json")],
        );
        assert_eq!(index.len(), 1);
        assert_eq!(index.get("notes"), Some(Path::new("/t/b/notes.json")));
    }

    #[test]
    fn names_are_sorted() {
        let index = TemplateIndex::from_files(
            Path::new("/t"),
            ["todo.md", "creds.md", "notes.md"].map(PathBuf::from),
        );
        assert_eq!(index.names(), vec!["creds", "notes", "todo"]);
        assert_eq!(index.entries()[0].full_path, PathBuf::from("/t/creds.md"));
    }
}
