//! Core library for `sonarr_auto_import`.
//!
//! Scans a downloads folder for finished media, optionally renames files with
//! regex rules, maps their paths onto the root a downstream service sees, and
//! asks Sonarr/Radarr/Lidarr to rescan them. Leftover junk and empty folders
//! can be trimmed afterwards. Every step is best-effort: failures are logged
//! and the run carries on.

pub mod cli;
pub mod config;
pub mod errors;
pub mod fs_ops;
pub mod import;
pub mod media;
pub mod notify;
pub mod output;
pub mod platform;

pub use config::{
    default_config_path, default_log_path, path_has_symlink_ancestor, validate_service, Config,
    ConfigWarning, ImportMode, LogLevel, ServiceConfig, Settings, Transform, TransformList,
    ValidatedService,
};
pub use errors::ImportError;
pub use import::{Importer, RunSummary};
pub use media::{MediaProfile, ServiceKind};
pub use notify::{Notifier, NotificationPayload, RestNotifier};
