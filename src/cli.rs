//! CLI definition and parsing.
//!
//! Notes:
//! - `--verbose` is a shorthand for `--log-level verbose`.
//! - Passing `--downloads-folder` and `--api-key` describes a single service
//!   on the command line; no settings file is read in that case.

use clap::{Parser, ValueHint};
use std::path::PathBuf;

use crate::config::types::{Config, LogLevel, ServiceConfig, Settings};
use crate::media::ServiceKind;

pub const DEFAULT_SERVICE_URL: &str = "http://localhost:8989";

/// Import finished downloads into Sonarr, Radarr or Lidarr.
#[derive(Parser, Debug, Clone)]
#[command(
    author,
    version,
    about = "Rename finished downloads and trigger Sonarr/Radarr/Lidarr rescans"
)]
pub struct Args {
    /// Settings file (JSON). Defaults to $SONARR_AUTO_IMPORT_CONFIG or the OS config dir.
    #[arg(short = 'c', long = "config", value_name = "PATH", value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Dry run: change nothing, log the remote paths that would be sent.
    #[arg(short = 'd', long)]
    pub dry_run: bool,

    /// Verbose logging (shorthand for --log-level verbose).
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Set log level. One of: quiet, normal, verbose, debug.
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Write logs to this file as well as stdout.
    #[arg(long, value_name = "PATH", value_hint = ValueHint::FilePath)]
    pub log_file: Option<PathBuf>,

    /// Emit logs in structured JSON.
    #[arg(long)]
    pub json: bool,

    /// Print where the settings file is looked up, then exit.
    #[arg(long)]
    pub print_config: bool,

    /// Only process this configured service (sonarr, radarr, lidarr).
    #[arg(long, value_name = "SERVICE")]
    pub only: Option<ServiceKind>,

    /// Downloads folder to scan for a single command-line service.
    #[arg(long, value_name = "DIR", value_hint = ValueHint::DirPath, requires = "api_key")]
    pub downloads_folder: Option<PathBuf>,

    /// API key for the command-line service.
    #[arg(long, value_name = "KEY", requires = "downloads_folder")]
    pub api_key: Option<String>,

    /// Base URL of the command-line service.
    #[arg(long, value_name = "URL", default_value = DEFAULT_SERVICE_URL)]
    pub url: String,

    /// Root under which the service sees the downloads folder (defaults to the folder itself).
    #[arg(long, value_name = "PATH")]
    pub mapping_path: Option<PathBuf>,

    /// Pipe-delimited `search|replace` transforms for the command-line service.
    #[arg(long, value_name = "PATH", value_hint = ValueHint::FilePath)]
    pub transforms_file: Option<PathBuf>,

    /// Service family for the command-line service.
    #[arg(long, value_name = "SERVICE", default_value = "sonarr")]
    pub service: ServiceKind,

    /// Import mode sent to the command-line service (Move or Copy).
    #[arg(long, value_name = "MODE")]
    pub import_mode: Option<String>,

    /// Seconds to wait after each notification for the command-line service.
    #[arg(long, value_name = "SECS", default_value_t = 0)]
    pub timeout_secs: i64,

    /// Trim junk files and empty folders afterwards (command-line service).
    #[arg(long)]
    pub trim_folders: bool,
}

impl Args {
    /// Effective log level derived from flags.
    /// Precedence: --log-level value > --verbose > None (use settings/default).
    pub fn effective_log_level(&self) -> Option<LogLevel> {
        if let Some(level) = self.log_level.as_deref().and_then(LogLevel::parse) {
            return Some(level);
        }
        self.verbose.then_some(LogLevel::Verbose)
    }

    /// Apply CLI overrides to a Config (in-place). No-ops for unset flags.
    pub fn apply_overrides(&self, cfg: &mut Config) {
        if let Some(p) = &self.config {
            cfg.settings_path = Some(p.clone());
        }
        if let Some(level) = self.effective_log_level() {
            cfg.log_level = level;
        }
        if let Some(f) = &self.log_file {
            cfg.log_file = Some(f.clone());
        }
        if self.dry_run {
            cfg.dry_run = true;
        }
        if self.only.is_some() {
            cfg.only = self.only;
        }
    }

    /// Settings describing the single command-line service, if one was given.
    pub fn adhoc_settings(&self) -> Option<Settings> {
        let folder = self.downloads_folder.as_ref()?;
        let key = self.api_key.as_ref()?;
        let mapping = self.mapping_path.clone().unwrap_or_else(|| folder.clone());

        let mut svc = ServiceConfig::new(self.url.clone(), key.clone(), folder.clone(), mapping);
        svc.import_mode = self.import_mode.clone();
        svc.timeout_secs = self.timeout_secs;
        svc.trim_folders = self.trim_folders;
        svc.transforms_file = self.transforms_file.clone();

        let mut settings = Settings::default();
        match self.service {
            ServiceKind::Sonarr => settings.sonarr = Some(svc),
            ServiceKind::Radarr => settings.radarr = Some(svc),
            ServiceKind::Lidarr => settings.lidarr = Some(svc),
        }
        Some(settings)
    }
}

pub fn parse() -> Args {
    Args::parse()
}
