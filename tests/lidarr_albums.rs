mod common;

use assert_fs::TempDir;
use std::path::Path;

use common::{write_aged, RecordingNotifier};
use sonarr_auto_import::media::ServiceKind;
use sonarr_auto_import::{validate_service, Importer, ServiceConfig};

#[test]
fn disc_folders_collapse_to_one_album_notification() {
    let td = TempDir::new().unwrap();
    write_aged(td.path(), "Album/cd1/track1.mp3", "a");
    write_aged(td.path(), "Album/cd2/track2.mp3", "b");

    let svc = ServiceConfig::new("http://lidarr:8686", "key", td.path(), "/music");
    let (validated, _) = validate_service(&svc, &[]);
    let importer = Importer::new(RecordingNotifier::default(), false);
    let summary = importer.run(&ServiceKind::Lidarr.profile(), &validated);

    assert_eq!(summary.discovered, 1);
    assert_eq!(summary.notified, 1);
    let sent = importer.notifier().sent.borrow();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].remote_path, Path::new("/music").join("Album").to_string_lossy());
    assert_eq!(sent[0].command, "DownloadedAlbumsScan");
}

#[test]
fn separate_albums_are_notified_in_walk_order() {
    let td = TempDir::new().unwrap();
    write_aged(td.path(), "Artist - B/01.flac", "b");
    write_aged(td.path(), "Artist - A/Disc 1/01.flac", "a");
    write_aged(td.path(), "Artist - A/Disc 2/01.flac", "a");
    // Video files are not part of the audio profile.
    write_aged(td.path(), "Artist - C/clip.mkv", "c");

    let svc = ServiceConfig::new("http://lidarr:8686", "key", td.path(), "/music");
    let (validated, _) = validate_service(&svc, &[]);
    let importer = Importer::new(RecordingNotifier::default(), false);
    importer.run(&ServiceKind::Lidarr.profile(), &validated);

    let music = Path::new("/music");
    assert_eq!(
        importer.notifier().paths(),
        vec![
            music.join("Artist - A").to_string_lossy().into_owned(),
            music.join("Artist - B").to_string_lossy().into_owned(),
        ]
    );
}

#[test]
fn album_files_are_never_renamed() {
    let td = TempDir::new().unwrap();
    let track = write_aged(td.path(), "Album/01 - Intro.mp3", "a");

    let mut svc = ServiceConfig::new("http://lidarr:8686", "key", td.path(), "/music");
    svc.transforms = Some(sonarr_auto_import::TransformList::Flat(vec![
        sonarr_auto_import::Transform::new(1, "Intro", "Opening"),
    ]));
    let (validated, _) = validate_service(&svc, &[]);
    let importer = Importer::new(RecordingNotifier::default(), false);
    let summary = importer.run(&ServiceKind::Lidarr.profile(), &validated);

    assert!(track.exists());
    assert_eq!(summary.renamed, 0);
}

#[test]
fn track_in_downloads_root_notifies_mapping_root() {
    let td = TempDir::new().unwrap();
    write_aged(td.path(), "track.mp3", "a");

    let svc = ServiceConfig::new("http://lidarr:8686", "key", td.path(), "/music");
    let (validated, _) = validate_service(&svc, &[]);
    let importer = Importer::new(RecordingNotifier::default(), false);
    importer.run(&ServiceKind::Lidarr.profile(), &validated);

    assert_eq!(importer.notifier().paths(), vec!["/music".to_string()]);
}

#[test]
fn disc_named_downloads_folder_is_not_climbed() {
    let td = TempDir::new().unwrap();
    let root = td.path().join("CD1");
    write_aged(&root, "track.mp3", "a");

    let svc = ServiceConfig::new("http://lidarr:8686", "key", &root, "/music");
    let (validated, _) = validate_service(&svc, &[]);
    let importer = Importer::new(RecordingNotifier::default(), false);
    let summary = importer.run(&ServiceKind::Lidarr.profile(), &validated);

    assert_eq!(summary.notified, 1);
    assert_eq!(importer.notifier().paths(), vec!["/music".to_string()]);
}
