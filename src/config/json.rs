//! JSON settings support.
//! - Loads settings.json (serde_json).
//! - Creates a secure template if missing (unless the path came from
//!   `$SONARR_AUTO_IMPORT_CONFIG` or `--config`).
//! - Resolves `transformsFile` references into inline rules.
//!
//! Notes:
//! - This module only reads/writes the settings file; service validation happens elsewhere.
//! - A missing or malformed file is reported to the caller, who treats it as "nothing to do".

use anyhow::Result;
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

use crate::errors::ImportError;
use crate::media::ServiceKind;
use crate::platform::{set_dir_mode_0700, write_config_secure_new_0600};

use super::paths::{config_path_from_env, default_config_path, path_has_symlink_ancestor};
use super::transforms_file::load_transforms_file;
use super::types::{ServiceConfig, Settings, Transform, TransformList};

/// Outcome of locating the settings file.
#[derive(Debug)]
pub enum LoadResult {
    Loaded(PathBuf, Settings),
    /// No settings existed at the default path; a template was written there.
    CreatedTemplate(PathBuf),
    /// Settings could not be used; the run has nothing to process.
    Unavailable(ImportError),
}

/// Settings file as read from disk; service blocks are parsed one by one so a
/// broken block only costs that service.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSettings {
    #[serde(default)]
    sonarr: Option<Value>,
    #[serde(default, alias = "radar")]
    radarr: Option<Value>,
    #[serde(default)]
    lidarr: Option<Value>,
    #[serde(default)]
    transforms: Option<TransformList>,
    #[serde(default)]
    log_location: Option<PathBuf>,
    #[serde(default)]
    log_level: Option<String>,
}

/// Parse one service block; failures are logged and drop only that service.
fn service_block(kind: ServiceKind, raw: Option<Value>, path: &Path) -> Option<ServiceConfig> {
    match serde_json::from_value(raw?) {
        Ok(svc) => Some(svc),
        Err(e) => {
            let err = ImportError::SettingsParse {
                path: path.to_path_buf(),
                reason: format!("{kind} block: {e}"),
            };
            error!(code = err.code(), kind = err.kind(), service = %kind, "{err}; skipping service");
            None
        }
    }
}

/// Read and parse a settings file, inlining any `transformsFile` rules.
/// A malformed service block is logged and left out; the others still load.
pub fn load_settings(path: &Path) -> Result<Settings, ImportError> {
    let contents = fs::read_to_string(path).map_err(|e| {
        if e.kind() == io::ErrorKind::NotFound {
            ImportError::SettingsNotFound(path.to_path_buf())
        } else {
            ImportError::SettingsParse {
                path: path.to_path_buf(),
                reason: e.to_string(),
            }
        }
    })?;
    let raw: RawSettings =
        serde_json::from_str(&contents).map_err(|e| ImportError::SettingsParse {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
    let mut settings = Settings {
        sonarr: service_block(ServiceKind::Sonarr, raw.sonarr, path),
        radarr: service_block(ServiceKind::Radarr, raw.radarr, path),
        lidarr: service_block(ServiceKind::Lidarr, raw.lidarr, path),
        transforms: raw.transforms,
        log_location: raw.log_location,
        log_level: raw.log_level,
    };

    inline_transform_files(&mut settings, path.parent().unwrap_or_else(|| Path::new(".")));
    debug!(path = %path.display(), "Loaded settings");
    Ok(settings)
}

/// Inline every service's `transformsFile`; relative paths resolve against `base`.
pub fn inline_transform_files(settings: &mut Settings, base: &Path) {
    for kind in ServiceKind::ALL {
        if let Some(svc) = settings.service_mut(kind) {
            inline_transforms_file(kind, svc, base);
        }
    }
}

/// Replace a service's `transformsFile` with the rules it contains. Relative
/// paths resolve against the settings file's directory. Unreadable files are
/// logged and leave the service without rules.
fn inline_transforms_file(kind: ServiceKind, svc: &mut ServiceConfig, base: &Path) {
    if svc.transforms.is_some() {
        return;
    }
    let Some(file) = svc.transforms_file.as_ref() else {
        return;
    };
    let file = if file.is_relative() {
        base.join(file)
    } else {
        file.clone()
    };
    match load_transforms_file(&file) {
        Ok(rules) => {
            debug!(service = %kind, count = rules.len(), file = %file.display(), "Loaded transforms file");
            svc.transforms = Some(TransformList::Flat(rules));
        }
        Err(e) => {
            warn!(code = e.code(), kind = e.kind(), service = %kind, "{e}");
        }
    }
}

/// Locate and load settings.
///
/// Precedence: explicit path, `$SONARR_AUTO_IMPORT_CONFIG`, OS default. Only
/// the OS default gets a template written when missing; if that write fails
/// the settings are reported unavailable.
pub fn load_or_init(explicit: Option<&Path>) -> Result<LoadResult> {
    let (path, may_create) = match explicit {
        Some(p) => (p.to_path_buf(), false),
        None => match default_config_path() {
            Some(p) => (p, !config_path_from_env()),
            None => {
                return Ok(LoadResult::Unavailable(ImportError::SettingsNotFound(
                    PathBuf::from("<no config dir>"),
                )));
            }
        },
    };

    if may_create && !path.exists() {
        return Ok(match create_template_settings(&path) {
            Ok(()) => LoadResult::CreatedTemplate(path),
            Err(e) => {
                let err = ImportError::TemplateFailed {
                    path,
                    reason: format!("{e:#}"),
                };
                warn!(code = err.code(), kind = err.kind(), "{err}");
                LoadResult::Unavailable(err)
            }
        });
    }

    Ok(match load_settings(&path) {
        Ok(settings) => LoadResult::Loaded(path, settings),
        Err(e) => LoadResult::Unavailable(e),
    })
}

/// Example settings written on first run.
pub fn template_settings() -> Settings {
    let mut sonarr = ServiceConfig::new(
        "http://localhost:8989",
        "your-sonarr-api-key",
        "/path/to/downloads/tv",
        "/downloads/tv",
    );
    sonarr.import_mode = Some("Move".into());
    sonarr.transforms = Some(TransformList::Flat(vec![Transform::new(
        1,
        "\\.(720p|1080p)\\.WEB-DL",
        ".$1",
    )]));
    let mut radarr = ServiceConfig::new(
        "http://localhost:7878",
        "your-radarr-api-key",
        "/path/to/downloads/movies",
        "/downloads/movies",
    );
    radarr.import_mode = Some("Move".into());
    radarr.timeout_secs = 5;
    Settings {
        sonarr: Some(sonarr),
        radarr: Some(radarr),
        ..Default::default()
    }
}

/// Create the template settings file and parent directory (best-effort permissions).
/// Uses secure creation to avoid following attacker-controlled symlinks on Unix.
pub fn create_template_settings(path: &Path) -> Result<()> {
    if path_has_symlink_ancestor(path)? {
        return Err(anyhow::anyhow!(
            "Refusing to create settings: ancestor of {} is a symlink",
            path.display()
        ));
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
        let _ = set_dir_mode_0700(parent);
    }

    let mut content = serde_json::to_string_pretty(&template_settings())?;
    content.push('\n');
    write_config_secure_new_0600(path, content.as_bytes())?;

    info!("Created template settings at {}", path.display());
    Ok(())
}
