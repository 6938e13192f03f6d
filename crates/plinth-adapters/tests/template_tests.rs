//! Integration tests for the template pools.

mod common;

use std::fs;

use common::Fixture;
use plinth_core::{application::ApplicationError, domain::TemplateKind, error::PlinthError};

#[test]
fn test_resolve_ignores_extension() {
    let fx = Fixture::deployed();
    let bare = fx.plinth.template_path(TemplateKind::File, "notes").unwrap();
    let dotted = fx
        .plinth
        .template_path(TemplateKind::File, "notes.json")
        .unwrap();

    assert!(bare.is_some());
    assert_eq!(bare, dotted);
}

#[test]
fn test_template_list_is_sorted() {
    let fx = Fixture::deployed();
    let (map, names) = fx.plinth.template_list(TemplateKind::File).unwrap();

    assert_eq!(names, vec!["creds", "notes", "project-config", "todo"]);
    assert_eq!(map.len(), names.len());
    assert_eq!(
        map["notes"],
        fx.root().join("templates/files/notes.json")
    );
}

#[test]
fn test_add_duplicate_then_overwrite() {
    let fx = Fixture::deployed();
    fx.plinth
        .add_template(TemplateKind::File, "scope.md", "first", false)
        .unwrap();

    let err = fx
        .plinth
        .add_template(TemplateKind::File, "scope", "second", false)
        .unwrap_err();
    assert!(matches!(
        err,
        PlinthError::Application(ApplicationError::AlreadyExists { ref name, .. }) if name == "scope"
    ));
    assert_eq!(
        fx.plinth.read_template(TemplateKind::File, "scope").unwrap(),
        "first"
    );

    fx.plinth
        .add_template(TemplateKind::File, "scope", "second", true)
        .unwrap();
    assert_eq!(
        fx.plinth.read_template(TemplateKind::File, "scope").unwrap(),
        "second"
    );
}

#[test]
fn test_overwrite_keeps_existing_path() {
    let fx = Fixture::deployed();
    let legacy = fx.root().join("templates/files/nested/legacy.md");
    fs::create_dir_all(legacy.parent().unwrap()).unwrap();
    fs::write(&legacy, "old").unwrap();

    let path = fx
        .plinth
        .add_template(TemplateKind::File, "legacy", "new", true)
        .unwrap();

    assert_eq!(path, legacy);
    assert_eq!(fs::read_to_string(&legacy).unwrap(), "new");
}

#[test]
fn test_flat_layout_is_still_read() {
    let fx = Fixture::deployed();
    let templates = fx.root().join("templates");
    fs::remove_dir_all(templates.join("files")).unwrap();
    fs::remove_dir_all(templates.join("projects")).unwrap();
    fs::write(templates.join("notes.md"), "flat notes").unwrap();

    assert_eq!(
        fx.plinth.read_template(TemplateKind::File, "notes").unwrap(),
        "flat notes"
    );
}

#[test]
fn test_unknown_template_is_not_found() {
    let fx = Fixture::deployed();
    assert_eq!(
        fx.plinth
            .read_template(TemplateKind::Project, "nope")
            .unwrap_err(),
        PlinthError::Application(ApplicationError::TemplateNotFound {
            name: "nope".into(),
            kind: TemplateKind::Project,
        })
    );
}

#[test]
fn test_capture_template_round_trips_a_directory() {
    let fx = Fixture::deployed();
    let source = fx.dir.path().join("existing");
    fs::create_dir_all(source.join("evidence")).unwrap();
    fs::write(source.join("readme.md"), "keep me").unwrap();

    fx.plinth
        .capture_template("captured", &source, false)
        .unwrap();

    let mut project = fx.plinth.new_project("copy").unwrap();
    fx.plinth
        .create_project(&mut project, "captured", false)
        .unwrap();

    let created = fx.workspace().join("copy");
    assert!(created.join("evidence").is_dir());
    assert_eq!(fs::read_to_string(created.join("readme.md")).unwrap(), "");
}
