//! Core configuration types.
//! - `Settings` mirrors the JSON settings file (one block per downstream service).
//! - `Config` holds runtime options for one invocation of the binary.
//! - `LogLevel` / `ImportMode` are small enums with tolerant parsing.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::media::ServiceKind;

use super::paths;

/// Program-defined verbosity levels exposed to users/config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Only errors
    Quiet,
    /// Informational output (default)
    #[default]
    Normal,
    /// Per-rule transform steps, request bodies and responses
    Verbose,
    /// Everything, including dependency internals
    Debug,
}

impl LogLevel {
    /// Parse common string names into our LogLevel (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "quiet" | "error" | "none" => Some(LogLevel::Quiet),
            "normal" | "info" => Some(LogLevel::Normal),
            "verbose" | "detailed" => Some(LogLevel::Verbose),
            "debug" | "trace" => Some(LogLevel::Debug),
            _ => None,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LogLevel::Quiet => "quiet",
            LogLevel::Normal => "normal",
            LogLevel::Verbose => "verbose",
            LogLevel::Debug => "debug",
        };
        f.write_str(s)
    }
}

impl FromStr for LogLevel {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("invalid log level: '{s}'"))
    }
}

/// How the downstream service should take ownership of the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum ImportMode {
    #[default]
    Move,
    Copy,
}

impl ImportMode {
    /// Exact-match parse; anything else is the caller's to coerce.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Move" => Some(ImportMode::Move),
            "Copy" => Some(ImportMode::Copy),
            _ => None,
        }
    }
}

impl fmt::Display for ImportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ImportMode::Move => "Move",
            ImportMode::Copy => "Copy",
        })
    }
}

/// One filename search/replace rule. Lower `order` runs first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transform {
    #[serde(default)]
    pub order: i32,
    pub search: String,
    #[serde(default)]
    pub replace: String,
}

impl Transform {
    pub fn new(order: i32, search: impl Into<String>, replace: impl Into<String>) -> Self {
        Self {
            order,
            search: search.into(),
            replace: replace.into(),
        }
    }
}

/// Transform lists appear either flat or wrapped as `{"transforms": [...]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TransformList {
    Flat(Vec<Transform>),
    Nested { transforms: Vec<Transform> },
}

impl TransformList {
    pub fn rules(&self) -> &[Transform] {
        match self {
            TransformList::Flat(v) => v,
            TransformList::Nested { transforms } => transforms,
        }
    }
}

/// Settings block for one downstream service, exactly as read from disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceConfig {
    pub url: String,
    pub api_key: String,
    pub downloads_folder: PathBuf,
    pub mapping_path: PathBuf,
    /// Raw value; validation coerces unknown values to Move.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub import_mode: Option<String>,
    /// Seconds to wait after each notified item (0 = none).
    #[serde(default)]
    pub timeout_secs: i64,
    #[serde(default)]
    pub trim_folders: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transforms: Option<TransformList>,
    /// Pipe-delimited `search|replace` file, used when `transforms` is absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transforms_file: Option<PathBuf>,
}

impl ServiceConfig {
    /// Minimal service block; optional fields left at their defaults.
    pub fn new(
        url: impl Into<String>,
        api_key: impl Into<String>,
        downloads_folder: impl Into<PathBuf>,
        mapping_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            url: url.into(),
            api_key: api_key.into(),
            downloads_folder: downloads_folder.into(),
            mapping_path: mapping_path.into(),
            import_mode: None,
            timeout_secs: 0,
            trim_folders: false,
            transforms: None,
            transforms_file: None,
        }
    }
}

/// Whole settings file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sonarr: Option<ServiceConfig>,
    #[serde(default, alias = "radar", skip_serializing_if = "Option::is_none")]
    pub radarr: Option<ServiceConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lidarr: Option<ServiceConfig>,
    /// Shared rules for services that configure none of their own.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transforms: Option<TransformList>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_location: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
}

impl Settings {
    /// Configured services in processing order.
    pub fn services(&self) -> Vec<(ServiceKind, &ServiceConfig)> {
        [
            (ServiceKind::Sonarr, self.sonarr.as_ref()),
            (ServiceKind::Radarr, self.radarr.as_ref()),
            (ServiceKind::Lidarr, self.lidarr.as_ref()),
        ]
        .into_iter()
        .filter_map(|(kind, svc)| svc.map(|s| (kind, s)))
        .collect()
    }

    /// Shared transform rules (empty slice when none configured).
    pub fn global_transforms(&self) -> &[Transform] {
        self.transforms.as_ref().map(TransformList::rules).unwrap_or(&[])
    }

    pub fn service_mut(&mut self, kind: ServiceKind) -> Option<&mut ServiceConfig> {
        match kind {
            ServiceKind::Sonarr => self.sonarr.as_mut(),
            ServiceKind::Radarr => self.radarr.as_mut(),
            ServiceKind::Lidarr => self.lidarr.as_mut(),
        }
    }
}

/// Runtime options for one invocation.
#[derive(Debug, Clone)]
pub struct Config {
    /// Explicit settings file; None means env override or OS default
    pub settings_path: Option<PathBuf>,
    /// Console verbosity
    pub log_level: LogLevel,
    /// Optional path to a log file
    pub log_file: Option<PathBuf>,
    /// If true, compute and log everything but do not touch files or services
    pub dry_run: bool,
    /// Restrict the run to a single configured service
    pub only: Option<ServiceKind>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            settings_path: None,
            log_level: LogLevel::Normal,
            log_file: paths::default_log_path(),
            dry_run: false,
            only: None,
        }
    }
}

impl Config {
    /// Config pointing at an explicit settings file; other fields use defaults.
    pub fn new(settings_path: impl Into<PathBuf>) -> Self {
        Self {
            settings_path: Some(settings_path.into()),
            ..Default::default()
        }
    }

    /// Fill unset options from the settings file (CLI values already applied win).
    pub fn merge_settings(&mut self, settings: &Settings, cli_set_level: bool, cli_set_log: bool) {
        if !cli_set_level
            && let Some(level) = settings.log_level.as_deref().and_then(LogLevel::parse)
        {
            self.log_level = level;
        }
        if !cli_set_log && let Some(loc) = &settings.log_location {
            self.log_file = Some(loc.clone());
        }
    }
}
