//! Service validation.
//! Turns a raw `ServiceConfig` into a `ValidatedService` without mutating the
//! input or touching the filesystem. Anything that can be corrected safely is
//! corrected and reported as a warning for the caller to log.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use crate::errors::ImportError;
use crate::media::FilenameTransformer;

use super::types::{ImportMode, ServiceConfig, Transform, TransformList};

/// Something validation corrected or dropped.
#[derive(Debug)]
pub enum ConfigWarning {
    /// importMode was neither "Move" nor "Copy"; Move was used instead.
    InvalidImportMode(String),
    /// timeoutSecs was negative; no delay is applied.
    NegativeTimeout(i64),
    /// A transform rule failed to compile and was skipped.
    InvalidTransform(ImportError),
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigWarning::InvalidImportMode(v) => {
                write!(f, "Invalid importMode '{v}', defaulting to 'Move'")
            }
            ConfigWarning::NegativeTimeout(v) => {
                write!(f, "Negative timeoutSecs {v} ignored; no delay between items")
            }
            ConfigWarning::InvalidTransform(e) => write!(f, "Skipping transform: {e}"),
        }
    }
}

/// A service block ready to drive an import run.
#[derive(Debug, Clone)]
pub struct ValidatedService {
    pub url: String,
    pub api_key: String,
    pub downloads_folder: PathBuf,
    pub mapping_path: PathBuf,
    pub import_mode: ImportMode,
    /// Pause after each notified item.
    pub delay: Duration,
    pub trim_folders: bool,
    pub transformer: FilenameTransformer,
}

/// Validate one service. `shared` rules apply when the service has none of its own.
pub fn validate_service(
    svc: &ServiceConfig,
    shared: &[Transform],
) -> (ValidatedService, Vec<ConfigWarning>) {
    let mut warnings = Vec::new();

    let import_mode = match svc.import_mode.as_deref() {
        None => ImportMode::Move,
        Some(raw) => ImportMode::parse(raw).unwrap_or_else(|| {
            warnings.push(ConfigWarning::InvalidImportMode(raw.to_string()));
            ImportMode::Move
        }),
    };

    let delay = if svc.timeout_secs < 0 {
        warnings.push(ConfigWarning::NegativeTimeout(svc.timeout_secs));
        Duration::ZERO
    } else {
        Duration::from_secs(svc.timeout_secs as u64)
    };

    let rules = svc
        .transforms
        .as_ref()
        .map(TransformList::rules)
        .unwrap_or(shared);
    let (transformer, bad_rules) = FilenameTransformer::compile(rules);
    warnings.extend(bad_rules.into_iter().map(ConfigWarning::InvalidTransform));

    let validated = ValidatedService {
        url: svc.url.clone(),
        api_key: svc.api_key.clone(),
        downloads_folder: svc.downloads_folder.clone(),
        mapping_path: svc.mapping_path.clone(),
        import_mode,
        delay,
        trim_folders: svc.trim_folders,
        transformer,
    };
    (validated, warnings)
}
