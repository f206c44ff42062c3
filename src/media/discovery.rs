//! Discovery of finished media files under a downloads folder.
//!
//! The walk is rebuilt on every run; nothing is remembered between runs.
//! Entries that cannot be read (permission, vanished mid-walk) are skipped.

use regex::Regex;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use std::time::SystemTime;
use tracing::debug;
use walkdir::WalkDir;

use super::partial::is_partial_download;
use super::profile::MediaProfile;

/// A media file found during this run's walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredFile {
    pub path: PathBuf,
    /// Lowercased extension without the dot.
    pub extension: String,
    pub modified: SystemTime,
}

impl DiscoveredFile {
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// Recursively list files under `root` that match `profile`'s extensions and
/// are not partial downloads as of `now`. Entries are visited in file-name order.
pub fn discover(root: &Path, profile: &MediaProfile, now: SystemTime) -> Vec<DiscoveredFile> {
    WalkDir::new(root)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(e) => Some(e),
            Err(err) => {
                debug!(error = %err, "Skipping unreadable entry");
                None
            }
        })
        .filter(|e| e.file_type().is_file())
        .filter(|e| profile.matches(e.path()))
        .filter_map(|e| {
            let modified = e.metadata().ok()?.modified().ok()?;
            let name = e.file_name().to_string_lossy();
            if is_partial_download(&name, modified, now) {
                debug!(path = %e.path().display(), "Skipping partial download");
                return None;
            }
            let extension = e
                .path()
                .extension()
                .map(|x| x.to_string_lossy().to_lowercase())
                .unwrap_or_default();
            Some(DiscoveredFile {
                path: e.into_path(),
                extension,
                modified,
            })
        })
        .collect()
}

static DISC_FOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:cd|disc|disk)\s*\d+").expect("static disc-folder pattern")
});

/// True for multi-disc subfolder names such as `CD1`, `Disc 2`, `disk03`.
pub fn is_disc_folder(name: &str) -> bool {
    DISC_FOLDER.is_match(name)
}

/// The album folder a track belongs to: its parent directory, or the
/// grandparent when the parent is a disc subfolder. Never climbs above `root`.
pub fn album_folder(root: &Path, track: &Path) -> Option<PathBuf> {
    let parent = track.parent()?;
    let is_disc = parent != root
        && parent
            .file_name()
            .map(|n| is_disc_folder(&n.to_string_lossy()))
            .unwrap_or(false);
    if is_disc {
        parent.parent().map(Path::to_path_buf)
    } else {
        Some(parent.to_path_buf())
    }
}

/// Distinct album folders for `files` under `root`, in first-seen order.
pub fn album_groups(root: &Path, files: &[DiscoveredFile]) -> Vec<PathBuf> {
    let mut seen = HashSet::new();
    files
        .iter()
        .filter_map(|f| album_folder(root, &f.path))
        .filter(|dir| seen.insert(dir.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::ServiceKind;
    use assert_fs::prelude::*;
    use filetime::{set_file_mtime, FileTime};
    use std::time::Duration;

    fn age_file(p: &Path, secs: i64) {
        let now = FileTime::now();
        set_file_mtime(p, FileTime::from_unix_time(now.unix_seconds() - secs, 0)).unwrap();
    }

    #[test]
    fn disc_folder_names() {
        for yes in ["CD1", "cd2", "Disc 1", "disc01", "DISK3"] {
            assert!(is_disc_folder(yes), "{yes}");
        }
        for no in ["Album", "Discography", "abcd1", "cd"] {
            assert!(!is_disc_folder(no), "{no}");
        }
    }

    #[test]
    fn multi_disc_tracks_collapse_to_album() {
        let mk = |p: &str| DiscoveredFile {
            path: PathBuf::from(p),
            extension: "mp3".into(),
            modified: SystemTime::UNIX_EPOCH,
        };
        let files = vec![
            mk("/m/Album/cd1/track1.mp3"),
            mk("/m/Album/cd2/track2.mp3"),
            mk("/m/Other/01.mp3"),
            mk("/m/Other/02.mp3"),
        ];
        assert_eq!(
            album_groups(Path::new("/m"), &files),
            vec![PathBuf::from("/m/Album"), PathBuf::from("/m/Other")]
        );
    }

    #[test]
    fn disc_named_root_is_not_climbed() {
        let root = Path::new("/dl/CD1");
        assert_eq!(
            album_folder(root, Path::new("/dl/CD1/track1.mp3")),
            Some(PathBuf::from("/dl/CD1"))
        );
        assert_eq!(
            album_folder(root, Path::new("/dl/CD1/Album/cd2/track2.mp3")),
            Some(PathBuf::from("/dl/CD1/Album"))
        );
    }

    #[test]
    fn discover_filters_extension_and_partials() {
        let td = assert_fs::TempDir::new().unwrap();
        let done = td.child("Show/Show.S01E01.MKV");
        done.touch().unwrap();
        age_file(done.path(), 3600);
        let fresh = td.child("Show/Show.S01E02.mkv");
        fresh.touch().unwrap();
        let marked = td.child("incoming.partial.mkv");
        marked.touch().unwrap();
        age_file(marked.path(), 3600);
        let nfo = td.child("Show/info.nfo");
        nfo.touch().unwrap();
        age_file(nfo.path(), 3600);

        let found = discover(
            td.path(),
            &ServiceKind::Sonarr.profile(),
            SystemTime::now() + Duration::from_secs(1),
        );
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].file_name(), "Show.S01E01.MKV");
        assert_eq!(found[0].extension, "mkv");
    }
}
