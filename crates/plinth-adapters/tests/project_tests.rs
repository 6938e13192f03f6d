//! Integration tests for project creation.

mod common;

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use common::Fixture;
use plinth_adapters::{MemoryFilesystem, Plinth, TeraRenderer, ZipArchiver, builtin_templates};
use plinth_core::{
    application::ApplicationError,
    domain::{ConfigLayout, DomainError, TemplateKind},
    error::PlinthError,
};

const DEMO_STRUCTURE: &str = r#"{
  "path": "{{ workspace }}/{{ project_name }}",
  "info": { "isdir": true, "template": "" },
  "children": [
    { "path": ".config.json", "info": { "isdir": false, "template": "project-config" } }
  ]
}"#;

#[test]
fn test_demo_project_gets_rendered_config() {
    let fx = Fixture::deployed();
    fx.plinth
        .add_template(TemplateKind::Project, "demo-structure", DEMO_STRUCTURE, false)
        .unwrap();

    let mut project = fx.plinth.new_project("demo").unwrap();
    let report = fx
        .plinth
        .create_project(&mut project, "demo-structure", false)
        .unwrap();

    let root = fx.workspace().join("demo");
    let config_path = root.join(".config.json");
    assert_eq!(report.directories, vec![root.clone()]);
    assert_eq!(report.files, vec![config_path.clone()]);

    let expected = fx
        .plinth
        .read_template(TemplateKind::File, "project-config")
        .unwrap()
        .replace("{{ project_root }}", &root.to_string_lossy());
    assert_eq!(fs::read_to_string(&config_path).unwrap(), expected);

    assert_eq!(
        project.project_config.get("root").map(String::as_str),
        Some(&*root.to_string_lossy())
    );
}

#[test]
fn test_template_names_with_markup_extensions_are_not_escaped() {
    let fx = Fixture::deployed();
    fx.plinth
        .add_template(TemplateKind::File, "greet", "{{ workspace }}|{{ project_name }}", false)
        .unwrap();
    fx.plinth
        .add_template(
            TemplateKind::Project,
            "site",
            r#"{
  "path": "{{ workspace }}/{{ project_name }}",
  "info": { "isdir": true, "template": "" },
  "children": [
    { "path": "one.txt", "info": { "isdir": false, "template": "greet" } },
    { "path": "two.txt", "info": { "isdir": false, "template": "greet.html" } }
  ]
}"#,
            false,
        )
        .unwrap();

    let mut project = fx.plinth.new_project("a&b").unwrap();
    fx.plinth.create_project(&mut project, "site.xml", false).unwrap();

    let root = fx.workspace().join("a&b");
    let expected = format!("{}|a&b", fx.workspace().display());
    assert_eq!(fs::read_to_string(root.join("one.txt")).unwrap(), expected);
    assert_eq!(fs::read_to_string(root.join("two.txt")).unwrap(), expected);
}

#[test]
fn test_default_structure_is_used_for_empty_name() {
    let fx = Fixture::deployed();
    let mut project = fx.plinth.new_project("acme").unwrap();
    fx.plinth.create_project(&mut project, "", false).unwrap();

    let root = fx.workspace().join("acme");
    for dir in ["@pix", "@report", "@clientFiles"] {
        assert!(root.join(dir).is_dir(), "{dir}");
    }
    assert_eq!(
        fs::read_to_string(root.join("@notes.md")).unwrap(),
        "# acme Notes\n\n## "
    );
    // no "report" template ships, so the file is created empty
    assert_eq!(fs::read_to_string(root.join("@report/report.json")).unwrap(), "");
    assert_eq!(fs::read_to_string(root.join(".gitignore")).unwrap(), "");
}

#[test]
fn test_existing_project_is_not_touched_without_overwrite() {
    let fx = Fixture::deployed();
    let root = fx.workspace().join("demo");
    fs::create_dir_all(&root).unwrap();
    fs::write(root.join("@notes.md"), "my precious notes").unwrap();

    let mut project = fx.plinth.new_project("demo").unwrap();
    let err = fx.plinth.create_project(&mut project, "", false).unwrap_err();

    assert_eq!(
        err,
        PlinthError::Application(ApplicationError::PathExists { path: root.clone() })
    );
    assert_eq!(
        fs::read_to_string(root.join("@notes.md")).unwrap(),
        "my precious notes"
    );
    assert!(!root.join(".config.json").exists());
}

#[test]
fn test_overwrite_truncates_templated_files() {
    let fx = Fixture::deployed();
    let mut project = fx.plinth.new_project("demo").unwrap();
    fx.plinth.create_project(&mut project, "", false).unwrap();

    let notes = fx.workspace().join("demo/@notes.md");
    fs::write(&notes, "scribbles").unwrap();

    let report = fx.plinth.create_project(&mut project, "", true).unwrap();
    assert!(report.directories.is_empty());
    assert_eq!(fs::read_to_string(&notes).unwrap(), "# demo Notes\n\n## ");
}

#[test]
fn test_missing_file_template_leaves_empty_file() {
    let fx = Fixture::deployed();
    fx.plinth
        .add_template(
            TemplateKind::Project,
            "sparse",
            r#"{"path": "{{ project_name }}", "info": {"isdir": true}, "children": [
                {"path": "a.md", "info": {"isdir": false, "template": "does-not-exist"}},
                {"path": "b.md", "info": {"isdir": false, "template": "notes"}}
            ]}"#,
            false,
        )
        .unwrap();

    let mut project = fx.plinth.new_project("sparse").unwrap();
    fx.plinth
        .create_project(&mut project, "sparse", false)
        .unwrap();

    // relative root lands in the workspace
    let root = fx.workspace().join("sparse");
    assert_eq!(fs::read_to_string(root.join("a.md")).unwrap(), "");
    assert_eq!(
        fs::read_to_string(root.join("b.md")).unwrap(),
        "# sparse Notes\n\n## "
    );
    assert!(project.project_config.is_empty());
}

#[test]
fn test_broken_structure_template_is_malformed() {
    let fx = Fixture::deployed();
    fx.plinth
        .add_template(TemplateKind::Project, "broken", "{ not json", false)
        .unwrap();

    let mut project = fx.plinth.new_project("demo").unwrap();
    assert!(matches!(
        fx.plinth
            .create_project(&mut project, "broken", false)
            .unwrap_err(),
        PlinthError::Domain(DomainError::MalformedTemplate { .. })
    ));
    assert!(!fx.workspace().join("demo").exists());
}

#[test]
fn test_preview_does_not_touch_disk() {
    let fx = Fixture::deployed();
    let project = fx.plinth.new_project("dry").unwrap();

    let entries = fx.plinth.preview_project(&project, "").unwrap();
    let root = fx.workspace().join("dry");
    assert_eq!(entries[0].path, root);
    assert!(entries.iter().any(|e| e.path == root.join("@report/report.json")));
    assert!(!root.exists());
}

#[test]
fn test_list_projects_creates_workspace() {
    let fx = Fixture::deployed();
    assert!(fx.plinth.list_projects().unwrap().is_empty());
    assert!(fx.workspace().is_dir());

    for name in ["beta", "alpha"] {
        let mut project = fx.plinth.new_project(name).unwrap();
        fx.plinth.create_project(&mut project, "", false).unwrap();
    }
    fs::write(fx.workspace().join("stray.txt"), "").unwrap();

    let names: Vec<String> = fx
        .plinth
        .list_projects()
        .unwrap()
        .into_iter()
        .map(|p| p.name)
        .collect();
    assert_eq!(names, vec!["alpha", "beta"]);
}

#[test]
fn test_full_workflow_in_memory() {
    let filesystem = MemoryFilesystem::new();
    let plinth = Plinth::with_adapters(
        ConfigLayout::new("/cfg"),
        builtin_templates::with_workspace("/ws"),
        Arc::new(filesystem.clone()),
        Arc::new(ZipArchiver::new()),
        Arc::new(TeraRenderer::new()),
    );

    plinth.deploy().unwrap();
    let mut project = plinth.new_project("demo").unwrap();
    plinth.create_project(&mut project, "", false).unwrap();

    assert_eq!(
        filesystem.read_file(Path::new("/ws/demo/@creds.md")).as_deref(),
        Some("# demo Credentials\n\n")
    );
    assert_eq!(
        project.project_config.get("pix").map(PathBuf::from),
        Some(PathBuf::from("/ws/demo/@pix"))
    );
}
