//! Post-run cleanup of the downloads folder.
//!
//! Walks depth-first. Directories that are hidden or whose names start with
//! `.` or `@` (Synology `@eaDir` and friends) are left alone entirely. In every
//! other directory, files that are not media, not dot-named and not hidden are
//! deleted; a directory left with no files and no subdirectories is then
//! removed. The scan root itself is never removed. Failures are recorded per
//! entry and never stop the walk.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

use crate::errors::ImportError;
use crate::media::has_extension_in;
use crate::platform::is_hidden;

use super::helpers::describe_io_error;

/// What a trim pass did (or, in dry-run, would do).
#[derive(Debug, Default)]
pub struct TrimReport {
    pub files_removed: Vec<PathBuf>,
    pub dirs_removed: Vec<PathBuf>,
    pub failures: Vec<ImportError>,
}

/// Trims a folder tree, keeping files whose extension is in `keep`.
#[derive(Debug, Clone, Copy)]
pub struct FolderTrimmer<'a> {
    keep: &'a [&'a str],
    dry_run: bool,
}

impl<'a> FolderTrimmer<'a> {
    pub fn new(keep: &'a [&'a str], dry_run: bool) -> Self {
        Self { keep, dry_run }
    }

    /// Trim everything below `root`.
    pub fn trim(&self, root: &Path) -> TrimReport {
        let mut report = TrimReport::default();
        info!(root = %root.display(), dry_run = self.dry_run, "Trimming folders");
        self.trim_dir(root, true, &mut report);
        info!(
            files = report.files_removed.len(),
            dirs = report.dirs_removed.len(),
            failures = report.failures.len(),
            "Trim complete"
        );
        report
    }

    fn record(&self, report: &mut TrimReport, path: &Path, reason: String) {
        let err = ImportError::TrimFailed {
            path: path.to_path_buf(),
            reason,
        };
        error!(code = err.code(), kind = err.kind(), "{err}");
        report.failures.push(err);
    }

    fn skip_dir(path: &Path, meta: &fs::Metadata) -> bool {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        name.starts_with('.') || name.starts_with('@') || is_hidden(path, meta)
    }

    fn trim_dir(&self, dir: &Path, is_root: bool, report: &mut TrimReport) {
        let entries = match fs::read_dir(dir) {
            Ok(it) => it,
            Err(e) => {
                self.record(report, dir, describe_io_error("read directory", dir, &e));
                return;
            }
        };

        let mut subdirs = Vec::new();
        let mut files = Vec::new();
        for entry in entries {
            match entry {
                Ok(ent) => {
                    let path = ent.path();
                    match fs::symlink_metadata(&path) {
                        Ok(meta) if meta.is_dir() => subdirs.push((path, meta)),
                        Ok(meta) => files.push((path, meta)),
                        Err(e) => self.record(report, &path, describe_io_error("stat", &path, &e)),
                    }
                }
                Err(e) => self.record(report, dir, describe_io_error("list directory", dir, &e)),
            }
        }

        for (sub, meta) in &subdirs {
            if Self::skip_dir(sub, meta) {
                debug!(dir = %sub.display(), "Skipping hidden/system folder");
                continue;
            }
            self.trim_dir(sub, false, report);
        }

        let mut remaining_files = 0usize;
        for (file, meta) in &files {
            if has_extension_in(file, self.keep) || is_hidden(file, meta) {
                remaining_files += 1;
                continue;
            }
            if self.dry_run {
                info!("Dry run: would delete {}", file.display());
                report.files_removed.push(file.clone());
                continue;
            }
            match fs::remove_file(file) {
                Ok(()) => {
                    debug!("Deleted {}", file.display());
                    report.files_removed.push(file.clone());
                }
                Err(e) => {
                    remaining_files += 1;
                    self.record(report, file, describe_io_error("delete file", file, &e));
                }
            }
        }

        if is_root || remaining_files > 0 {
            return;
        }
        // A subdirectory counts as gone only if this pass removed it.
        let remaining_dirs = subdirs
            .iter()
            .filter(|(p, _)| !report.dirs_removed.contains(p))
            .count();
        if remaining_dirs > 0 {
            return;
        }

        if self.dry_run {
            info!("Dry run: would remove empty folder {}", dir.display());
            report.dirs_removed.push(dir.to_path_buf());
            return;
        }
        match fs::remove_dir(dir) {
            Ok(()) => {
                info!("Removed empty folder {}", dir.display());
                report.dirs_removed.push(dir.to_path_buf());
            }
            Err(e) => self.record(report, dir, describe_io_error("remove folder", dir, &e)),
        }
    }
}
