//! Shared helpers for importer integration tests.
#![allow(dead_code)]

use filetime::{set_file_mtime, FileTime};
use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use sonarr_auto_import::config::ImportMode;
use sonarr_auto_import::media::ServiceKind;
use sonarr_auto_import::{ImportError, MediaProfile, Notifier, ValidatedService};

/// One captured notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sent {
    pub kind: ServiceKind,
    pub command: &'static str,
    pub remote_path: String,
    pub import_mode: ImportMode,
}

/// Notifier that records calls instead of talking HTTP. Paths containing
/// `fail_on` are rejected.
#[derive(Default)]
pub struct RecordingNotifier {
    pub sent: RefCell<Vec<Sent>>,
    pub fail_on: Option<String>,
}

impl RecordingNotifier {
    pub fn failing_on(fragment: &str) -> Self {
        Self {
            fail_on: Some(fragment.to_string()),
            ..Default::default()
        }
    }

    pub fn paths(&self) -> Vec<String> {
        self.sent.borrow().iter().map(|s| s.remote_path.clone()).collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(
        &self,
        service: &ValidatedService,
        profile: &MediaProfile,
        remote_path: &str,
    ) -> Result<(), ImportError> {
        if let Some(frag) = &self.fail_on
            && remote_path.contains(frag.as_str())
        {
            return Err(ImportError::NotifyFailed {
                url: service.url.clone(),
                path: remote_path.to_string(),
                reason: "HTTP 500 Internal Server Error".into(),
            });
        }
        self.sent.borrow_mut().push(Sent {
            kind: profile.kind,
            command: profile.command,
            remote_path: remote_path.to_string(),
            import_mode: service.import_mode,
        });
        Ok(())
    }
}

/// Write `contents` to `root/rel` (creating parents) and age it by an hour.
pub fn write_aged(root: &Path, rel: &str, contents: &str) -> PathBuf {
    let p = root.join(rel);
    if let Some(parent) = p.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&p, contents).unwrap();
    let old = SystemTime::now() - Duration::from_secs(3600);
    set_file_mtime(&p, FileTime::from_system_time(old)).unwrap();
    p
}

/// Sorted file names directly inside `dir`.
pub fn names_in(dir: &Path) -> Vec<String> {
    let mut v: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    v.sort();
    v
}
