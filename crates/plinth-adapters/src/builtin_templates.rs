//! Templates and configuration written by `deploy` and `reset`.
//!
//! | Kind    | Name                | Used for                                  |
//! |---------|---------------------|-------------------------------------------|
//! | file    | `notes`             | `@notes.md`                               |
//! | file    | `creds`             | `@creds.md`                               |
//! | file    | `todo`              | `@TODO.md`                                |
//! | file    | `project-config`    | `.config.json`, the per-project path map  |
//! | project | `project-structure` | default project layout                    |
//!
//! The default workspace is `<home>/projects`.

use std::path::PathBuf;

use plinth_core::domain::{ConfigMap, DefaultTemplates, TemplateKind, keys};
use tracing::warn;

pub const NOTES: &str = "# {{ project_name }} Notes\n\n## ";

pub const CREDS: &str = "# {{ project_name }} Credentials\n\n";

pub const TODO: &str = "# {{ project_name }} TODO\n\n## ";

pub const PROJECT_CONFIG: &str = r#"{
  "pix": "{{ project_root }}/@pix",
  "findings": "{{ project_root }}/@findings.md",
  "notes": "{{ project_root }}/@notes.md",
  "root": "{{ project_root }}",
  "report": "{{ project_root }}/@report",
  "reportconfig": "{{ project_root }}/@report/report.json"
}
"#;

pub const PROJECT_STRUCTURE_NAME: &str = "project-structure";

pub const PROJECT_STRUCTURE: &str = r#"{
  "path": "{{ workspace }}/{{ project_name }}",
  "info": { "isdir": true, "template": "" },
  "children": [
    { "path": ".config.json",  "info": { "isdir": false, "template": "project-config" }, "children": [] },
    { "path": "@notes.md",     "info": { "isdir": false, "template": "notes" },          "children": [] },
    { "path": "@findings.md",  "info": { "isdir": false, "template": "" },               "children": [] },
    { "path": "@creds.md",     "info": { "isdir": false, "template": "creds" },          "children": [] },
    { "path": "@pix",          "info": { "isdir": true,  "template": "" },               "children": [] },
    { "path": "@report",       "info": { "isdir": true,  "template": "" },               "children": [
      { "path": "report.json", "info": { "isdir": false, "template": "report" },         "children": [] }
    ]},
    { "path": "@clientFiles",  "info": { "isdir": true,  "template": "" },               "children": [] },
    { "path": "@TODO.md",      "info": { "isdir": false, "template": "todo" },           "children": [] },
    { "path": ".gitignore",    "info": { "isdir": false, "template": "" },               "children": [] }
  ]
}
"#;

/// Built-in defaults with the workspace under the user's home directory.
pub fn builtin() -> DefaultTemplates {
    let workspace = match dirs::home_dir() {
        Some(home) => home.join("projects"),
        None => {
            warn!("No home directory, leaving the default workspace relative");
            PathBuf::from("projects")
        }
    };
    with_workspace(&workspace.to_string_lossy())
}

/// Built-in defaults with an explicit workspace.
pub fn with_workspace(workspace: &str) -> DefaultTemplates {
    DefaultTemplates::new(default_config(workspace))
        .with_template(TemplateKind::File, "notes.md", NOTES)
        .with_template(TemplateKind::File, "creds.md", CREDS)
        .with_template(TemplateKind::File, "todo.md", TODO)
        .with_template(TemplateKind::File, "project-config.json", PROJECT_CONFIG)
        .with_template(
            TemplateKind::Project,
            PROJECT_STRUCTURE_NAME,
            PROJECT_STRUCTURE,
        )
}

fn default_config(workspace: &str) -> ConfigMap {
    let mut config = ConfigMap::new();
    config.set(keys::EDITOR, "");
    config.set(keys::WORKSPACE, workspace);
    config.set(keys::PROJECT_STRUCTURE, PROJECT_STRUCTURE_NAME);
    config.set("burppath", "");
    config.set("yourname", "");
    config
}
