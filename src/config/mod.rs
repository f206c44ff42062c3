//! Config module.
//! Provides settings types, default paths, JSON/transforms-file loading, and validation.

pub mod json;
pub mod paths;
pub mod transforms_file;
pub mod types;
mod validate;

pub use json::{
    create_template_settings, inline_transform_files, load_or_init, load_settings, LoadResult,
};
pub use paths::{default_config_path, default_log_path, path_has_symlink_ancestor};
pub use transforms_file::{load_transforms_file, parse_transforms};
pub use types::{Config, ImportMode, LogLevel, ServiceConfig, Settings, Transform, TransformList};
pub use validate::{validate_service, ConfigWarning, ValidatedService};

/// Environment variable naming an explicit settings file.
pub const CONFIG_ENV: &str = "SONARR_AUTO_IMPORT_CONFIG";
pub const APP_DIR: &str = "sonarr_auto_import";
pub const SETTINGS_FILE_NAME: &str = "settings.json";
pub const LOG_FILE_NAME: &str = "sonarr_auto_import.log";
