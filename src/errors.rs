//! Typed failure reasons for sonarr_auto_import.
//! Every fallible step of an import run returns one of these; the orchestrator
//! logs it (with a stable `code`) and moves on to the next item.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Settings file not found: {0}")]
    SettingsNotFound(PathBuf),

    #[error("Could not parse settings {path}: {reason}")]
    SettingsParse { path: PathBuf, reason: String },

    #[error("Downloads folder does not exist: {0}")]
    DownloadsFolderMissing(PathBuf),

    #[error("Invalid transform pattern '{pattern}': {reason}")]
    InvalidTransform { pattern: String, reason: String },

    #[error("Could not write template settings {path}: {reason}")]
    TemplateFailed { path: PathBuf, reason: String },

    #[error("Could not read transforms file {path}: {reason}")]
    TransformsFile { path: PathBuf, reason: String },

    #[error("Unable to rename file {path}: {reason}")]
    RenameFailed { path: PathBuf, reason: String },

    #[error("Notification to {url} failed for {path}: {reason}")]
    NotifyFailed {
        url: String,
        path: String,
        reason: String,
    },

    #[error("Unable to trim {path}: {reason}")]
    TrimFailed { path: PathBuf, reason: String },
}

impl ImportError {
    /// Stable numeric code, emitted as a structured log field.
    pub fn code(&self) -> u16 {
        match self {
            ImportError::SettingsNotFound(_) => 10,
            ImportError::SettingsParse { .. } => 11,
            ImportError::DownloadsFolderMissing(_) => 12,
            ImportError::InvalidTransform { .. } => 13,
            ImportError::TransformsFile { .. } => 14,
            ImportError::TemplateFailed { .. } => 15,
            ImportError::RenameFailed { .. } => 20,
            ImportError::NotifyFailed { .. } => 30,
            ImportError::TrimFailed { .. } => 40,
        }
    }

    /// Short machine-friendly kind label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            ImportError::SettingsNotFound(_) => "settings_not_found",
            ImportError::SettingsParse { .. } => "settings_parse",
            ImportError::DownloadsFolderMissing(_) => "downloads_folder_missing",
            ImportError::InvalidTransform { .. } => "invalid_transform",
            ImportError::TransformsFile { .. } => "transforms_file",
            ImportError::TemplateFailed { .. } => "template_failed",
            ImportError::RenameFailed { .. } => "rename_failed",
            ImportError::NotifyFailed { .. } => "notify_failed",
            ImportError::TrimFailed { .. } => "trim_failed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_distinct_per_kind() {
        let errs = [
            ImportError::SettingsNotFound(PathBuf::from("a")),
            ImportError::DownloadsFolderMissing(PathBuf::from("b")),
            ImportError::TemplateFailed {
                path: PathBuf::from("t"),
                reason: "x".into(),
            },
            ImportError::RenameFailed {
                path: PathBuf::from("c"),
                reason: "x".into(),
            },
            ImportError::NotifyFailed {
                url: "http://h".into(),
                path: "p".into(),
                reason: "x".into(),
            },
            ImportError::TrimFailed {
                path: PathBuf::from("d"),
                reason: "x".into(),
            },
        ];
        let mut codes: Vec<u16> = errs.iter().map(ImportError::code).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), errs.len());
    }

    #[test]
    fn rename_message_mentions_path() {
        let e = ImportError::RenameFailed {
            path: PathBuf::from("/dl/Show.mkv"),
            reason: "already exists".into(),
        };
        let msg = e.to_string();
        assert!(msg.contains("/dl/Show.mkv"));
        assert!(msg.contains("already exists"));
        assert_eq!(e.kind(), "rename_failed");
    }
}
