use serial_test::serial;
use std::fs;
use std::process::Command;
use tempfile::tempdir;

#[test]
fn binary_print_config_succeeds() {
    let me = assert_cmd::cargo::cargo_bin!("sonarr_auto_import");
    let out = Command::new(me)
        .arg("--print-config")
        .output()
        .expect("spawn binary");
    assert!(out.status.success(), "binary should succeed with --print-config");
}

#[test]
#[serial]
fn missing_explicit_settings_exit_cleanly() {
    let td = tempdir().unwrap();
    let me = assert_cmd::cargo::cargo_bin!("sonarr_auto_import");
    let out = Command::new(me)
        .arg("--config")
        .arg(td.path().join("absent.json"))
        .arg("--log-file")
        .arg(td.path().join("run.log"))
        .output()
        .expect("spawn binary");
    assert!(out.status.success());
    assert!(!td.path().join("absent.json").exists());
}

#[test]
#[serial]
fn dry_run_over_settings_file_leaves_files_alone() {
    let td = tempdir().unwrap();
    let downloads = td.path().join("downloads");
    fs::create_dir_all(&downloads).unwrap();
    let video = downloads.join("Show.S01E01.mkv");
    fs::write(&video, "video").unwrap();
    filetime::set_file_mtime(&video, filetime::FileTime::from_unix_time(1_000_000, 0)).unwrap();

    let settings = td.path().join("settings.json");
    let json = serde_json::json!({
        "sonarr": {
            // Nothing listens here; dry-run must not try to connect anyway.
            "url": "http://127.0.0.1:9",
            "apiKey": "k",
            "downloadsFolder": downloads,
            "mappingPath": "/tv",
            "transforms": [ { "order": 1, "search": "S01E01", "replace": "1x01" } ]
        }
    });
    fs::write(&settings, serde_json::to_string(&json).unwrap()).unwrap();

    let me = assert_cmd::cargo::cargo_bin!("sonarr_auto_import");
    let out = Command::new(me)
        .arg("--config")
        .arg(&settings)
        .arg("--dry-run")
        .arg("--log-file")
        .arg(td.path().join("run.log"))
        .output()
        .expect("spawn binary");
    assert!(out.status.success());
    assert!(video.exists());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("Show.S01E01.mkv"), "stdout: {stdout}");
}
