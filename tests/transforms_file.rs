use assert_fs::prelude::*;
use assert_fs::TempDir;
use std::path::Path;

use sonarr_auto_import::config::{load_settings, load_transforms_file};
use sonarr_auto_import::{validate_service, ImportError, Transform};

#[test]
fn pipe_delimited_rules_load_in_line_order() {
    let td = TempDir::new().unwrap();
    let f = td.child("rules.txt");
    f.write_str("# tidy release names\n\n\\.WEB-DL|\n(?i)s(\\d+)e(\\d+)|${1}x${2}\n").unwrap();

    let rules = load_transforms_file(f.path()).unwrap();
    assert_eq!(
        rules,
        vec![
            Transform::new(0, r"\.WEB-DL", ""),
            Transform::new(1, r"(?i)s(\d+)e(\d+)", "${1}x${2}"),
        ]
    );
}

#[test]
fn missing_rules_file_is_a_typed_error() {
    let err = load_transforms_file(Path::new("/definitely/not/here.txt")).unwrap_err();
    assert!(matches!(err, ImportError::TransformsFile { .. }));
}

#[test]
fn settings_reference_a_rules_file_next_to_them() {
    let td = TempDir::new().unwrap();
    td.child("tv.rules").write_str("S01E01|1x01\n").unwrap();
    let settings = td.child("settings.json");
    settings
        .write_str(
            r#"{ "sonarr": { "url": "http://localhost:8989", "apiKey": "k",
                 "downloadsFolder": "/dl", "mappingPath": "/tv",
                 "transformsFile": "tv.rules" } }"#,
        )
        .unwrap();

    let s = load_settings(settings.path()).unwrap();
    let (validated, warnings) = validate_service(s.sonarr.as_ref().unwrap(), &[]);
    assert!(warnings.is_empty());
    assert_eq!(
        validated.transformer.apply(Path::new("/dl/Show.S01E01.mkv")),
        "Show.1x01.mkv"
    );
}

#[test]
fn unreadable_rules_file_leaves_service_without_rules() {
    let td = TempDir::new().unwrap();
    let settings = td.child("settings.json");
    settings
        .write_str(
            r#"{ "sonarr": { "url": "u", "apiKey": "k", "downloadsFolder": "/dl",
                 "mappingPath": "/tv", "transformsFile": "missing.rules" } }"#,
        )
        .unwrap();

    let s = load_settings(settings.path()).unwrap();
    assert!(s.sonarr.unwrap().transforms.is_none());
}
