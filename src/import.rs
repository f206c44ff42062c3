//! Import orchestration.
//!
//! One `Importer::run` processes one service end to end: discover → (rename)
//! → map → notify → throttle, then optionally trim. Every per-item failure is
//! logged and counted; nothing aborts the batch. Services are processed one
//! after another by the caller, never concurrently.

use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use tracing::{debug, error, info, info_span, warn};

use crate::config::{ConfigWarning, ValidatedService};
use crate::errors::ImportError;
use crate::fs_ops::{relocate, FolderTrimmer, Relocation};
use crate::media::{
    album_groups, discover, map_to_remote, normalize, DiscoveredFile, Grouping, MediaProfile,
};
use crate::notify::Notifier;

/// Counters for one service run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Downloads folder missing; nothing was attempted.
    pub skipped: bool,
    /// Files (or album folders) that passed discovery.
    pub discovered: usize,
    pub renamed: usize,
    pub rename_failures: usize,
    pub notified: usize,
    pub notify_failures: usize,
    /// Remote paths computed; in dry-run these are logged instead of sent.
    pub remote_paths: Vec<String>,
    pub trimmed_files: usize,
    pub trimmed_dirs: usize,
    pub trim_failures: usize,
}

/// Runs import passes using a given notifier.
pub struct Importer<N: Notifier> {
    notifier: N,
    dry_run: bool,
}

impl<N: Notifier> Importer<N> {
    pub fn new(notifier: N, dry_run: bool) -> Self {
        Self { notifier, dry_run }
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Log validation warnings for a service (import mode coercion etc).
    pub fn report_warnings(&self, profile: &MediaProfile, warnings: &[ConfigWarning]) {
        for w in warnings {
            warn!(service = %profile.kind, "{w}");
        }
    }

    /// Process one service according to `profile`.
    pub fn run(&self, profile: &MediaProfile, service: &ValidatedService) -> RunSummary {
        let span = info_span!("service", name = %profile.kind);
        let _enter = span.enter();
        let mut summary = RunSummary::default();

        if !service.downloads_folder.is_dir() {
            let err = ImportError::DownloadsFolderMissing(service.downloads_folder.clone());
            info!(code = err.code(), kind = err.kind(), "{err}; skipping");
            summary.skipped = true;
            return summary;
        }
        let root = normalize(&service.downloads_folder);

        info!("Starting {} processing for: {}", profile.kind, root.display());
        debug!(" Base Url:   {}", service.url);
        debug!(" API Key:    {}", mask_key(&service.api_key));
        debug!(" Mapping:    {}", service.mapping_path.display());
        debug!(" Mode:       {}", service.import_mode);
        debug!(" Dry Run:    {}", self.dry_run);

        let files = discover(&root, profile, SystemTime::now());
        match profile.grouping {
            Grouping::PerFile => self.run_per_file(profile, service, &root, files, &mut summary),
            Grouping::PerAlbumFolder => {
                let albums = album_groups(&root, &files);
                self.run_per_album(profile, service, &root, albums, &mut summary)
            }
        }

        if service.trim_folders {
            let report = FolderTrimmer::new(profile.extensions, self.dry_run).trim(&root);
            summary.trimmed_files = report.files_removed.len();
            summary.trimmed_dirs = report.dirs_removed.len();
            summary.trim_failures = report.failures.len();
        }
        summary
    }

    fn run_per_file(
        &self,
        profile: &MediaProfile,
        service: &ValidatedService,
        root: &Path,
        files: Vec<DiscoveredFile>,
        summary: &mut RunSummary,
    ) {
        if files.is_empty() {
            info!("No videos found. Nothing to do!");
            return;
        }
        summary.discovered = files.len();
        info!("Processing {} video files...", files.len());

        for file in files {
            let new_name = service.transformer.apply(&file.path);
            let current = if self.dry_run {
                file.path
            } else {
                match relocate(&file.path, &new_name) {
                    r @ Relocation::Renamed(_) => {
                        summary.renamed += 1;
                        r.into_path()
                    }
                    r @ Relocation::Failed { .. } => {
                        summary.rename_failures += 1;
                        r.into_path()
                    }
                    r @ Relocation::Unchanged(_) => r.into_path(),
                }
            };
            self.dispatch(profile, service, root, &current, summary);
        }
        info!("All processing complete.");
    }

    fn run_per_album(
        &self,
        profile: &MediaProfile,
        service: &ValidatedService,
        root: &Path,
        albums: Vec<PathBuf>,
        summary: &mut RunSummary,
    ) {
        if albums.is_empty() {
            info!("No music found. Nothing to do!");
            return;
        }
        summary.discovered = albums.len();
        info!("Processing {} album folders...", albums.len());

        for album in albums {
            self.dispatch(profile, service, root, &album, summary);
        }
        info!("All processing complete.");
    }

    /// Map, notify (or log in dry-run), then throttle.
    fn dispatch(
        &self,
        profile: &MediaProfile,
        service: &ValidatedService,
        root: &Path,
        local: &Path,
        summary: &mut RunSummary,
    ) {
        let remote = map_to_remote(root, local, &service.mapping_path)
            .to_string_lossy()
            .into_owned();

        if self.dry_run {
            info!(" => {remote}");
        } else {
            match self.notifier.notify(service, profile, &remote) {
                Ok(()) => summary.notified += 1,
                Err(e) => {
                    error!(code = e.code(), kind = e.kind(), "{e}");
                    summary.notify_failures += 1;
                }
            }
        }
        summary.remote_paths.push(remote);

        // Also applies in dry-run.
        throttle(service.delay);
    }
}

fn throttle(delay: Duration) {
    if delay.is_zero() {
        return;
    }
    info!("Sleeping for {} seconds...", delay.as_secs());
    std::thread::sleep(delay);
}

/// Keep only the last four characters of an API key for logs.
fn mask_key(key: &str) -> String {
    let count = key.chars().count();
    if count <= 4 {
        return "*".repeat(count);
    }
    let tail: String = key.chars().skip(count - 4).collect();
    format!("{}{tail}", "*".repeat(count - 4))
}
