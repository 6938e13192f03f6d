use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer, Serialize};

use super::DomainError;

/// One node of a project-structure template.
///
/// ```json
/// { "path": "@notes.md", "info": { "isdir": false, "template": "notes" }, "children": [] }
/// ```
///
/// `path` is either absolute (used verbatim) or relative to the parent
/// node's resolved path. Both forms appear in real templates, so both are
/// accepted at every depth.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeNode {
    pub path: PathBuf,
    pub info: NodeInfo,
    #[serde(default, deserialize_with = "null_as_default")]
    pub children: Vec<TreeNode>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeInfo {
    #[serde(rename = "isdir")]
    pub is_dir: bool,
    /// File template used for the content of a file node; empty for none.
    #[serde(default, deserialize_with = "null_as_default")]
    pub template: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A flattened node with its resolved path, produced by [`TreeNode::entries`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeEntry {
    pub path: PathBuf,
    pub is_dir: bool,
    pub template: Option<String>,
    pub depth: usize,
}

impl TreeNode {
    pub fn dir(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            info: NodeInfo {
                is_dir: true,
                template: String::new(),
            },
            children: Vec::new(),
        }
    }

    pub fn file(path: impl Into<PathBuf>, template: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            info: NodeInfo {
                is_dir: false,
                template: template.into(),
            },
            children: Vec::new(),
        }
    }

    pub fn with_child(mut self, child: TreeNode) -> Self {
        self.children.push(child);
        self
    }

    /// Parse a rendered project-structure template.
    ///
    /// `name` is only used for error messages.
    pub fn parse(name: &str, rendered: &str) -> Result<Self, DomainError> {
        let root: TreeNode =
            serde_json::from_str(rendered).map_err(|e| DomainError::MalformedTemplate {
                name: name.to_string(),
                reason: e.to_string(),
            })?;
        root.validate(name)?;
        Ok(root)
    }

    /// Check structural invariants of the whole tree.
    ///
    /// - every node has a non-empty path
    /// - directories never name a file template
    pub fn validate(&self, name: &str) -> Result<(), DomainError> {
        let malformed = |reason: String| DomainError::MalformedTemplate {
            name: name.to_string(),
            reason,
        };
        if self.path.as_os_str().is_empty() {
            return Err(malformed("node with an empty path".into()));
        }
        if self.info.is_dir && !self.info.template.is_empty() {
            return Err(malformed(format!(
                "directory '{}' cannot use file template '{}'",
                self.path.display(),
                self.info.template
            )));
        }
        self.children.iter().try_for_each(|c| c.validate(name))
    }

    pub fn is_dir(&self) -> bool {
        self.info.is_dir
    }

    /// The file template this node is rendered from, if any.
    pub fn template(&self) -> Option<&str> {
        Some(self.info.template.as_str()).filter(|t| !t.is_empty())
    }

    /// Where this node lands when its parent resolved to `parent`.
    ///
    /// Absolute paths replace `parent`; relative paths are joined under it.
    pub fn resolve_under(&self, parent: &Path) -> PathBuf {
        parent.join(&self.path)
    }

    /// Flatten the tree in document order (parent first, siblings in order).
    pub fn entries(&self, base: &Path) -> Vec<TreeEntry> {
        let mut out = Vec::with_capacity(self.node_count());
        self.collect_entries(base, 0, &mut out);
        out
    }

    fn collect_entries(&self, parent: &Path, depth: usize, out: &mut Vec<TreeEntry>) {
        let path = self.resolve_under(parent);
        out.push(TreeEntry {
            path: path.clone(),
            is_dir: self.info.is_dir,
            template: self.template().map(str::to_string),
            depth,
        });
        for child in &self.children {
            child.collect_entries(&path, depth + 1, out);
        }
    }

    /// Number of nodes including this one.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(TreeNode::node_count).sum::<usize>()
    }

    pub fn to_json_pretty(&self) -> String {
        // A tree of strings, bools and vectors always serializes.
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}
