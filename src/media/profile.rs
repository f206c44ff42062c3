//! Media profiles: what each downstream service family imports and how it is told.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

pub const VIDEO_EXTENSIONS: &[&str] = &[
    ".mkv", ".avi", ".wmv", ".mov", ".amv", ".mp4", ".m4a", ".m4v", ".f4v", ".f4a", ".m4b", ".m4r",
    ".f4b", ".mpg", ".mp2", ".mpeg", ".mpe", ".mpv",
];

pub const AUDIO_EXTENSIONS: &[&str] = &[
    ".mp3", ".flac", ".m4a", ".m4b", ".aac", ".ogg", ".oga", ".opus", ".wav", ".wma", ".alac",
    ".ape", ".aiff", ".wv",
];

/// Downstream service families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceKind {
    Sonarr,
    Radarr,
    Lidarr,
}

impl ServiceKind {
    pub const ALL: [ServiceKind; 3] = [ServiceKind::Sonarr, ServiceKind::Radarr, ServiceKind::Lidarr];

    pub fn profile(self) -> MediaProfile {
        match self {
            ServiceKind::Sonarr => MediaProfile {
                kind: self,
                extensions: VIDEO_EXTENSIONS,
                grouping: Grouping::PerFile,
                api: ApiVariant::Legacy,
                command: "DownloadedEpisodesScan",
            },
            ServiceKind::Radarr => MediaProfile {
                kind: self,
                extensions: VIDEO_EXTENSIONS,
                grouping: Grouping::PerFile,
                api: ApiVariant::Legacy,
                command: "DownloadedMoviesScan",
            },
            ServiceKind::Lidarr => MediaProfile {
                kind: self,
                extensions: AUDIO_EXTENSIONS,
                grouping: Grouping::PerAlbumFolder,
                api: ApiVariant::V1,
                command: "DownloadedAlbumsScan",
            },
        }
    }
}

impl fmt::Display for ServiceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ServiceKind::Sonarr => "sonarr",
            ServiceKind::Radarr => "radarr",
            ServiceKind::Lidarr => "lidarr",
        })
    }
}

impl FromStr for ServiceKind {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sonarr" => Ok(ServiceKind::Sonarr),
            "radarr" | "radar" => Ok(ServiceKind::Radarr),
            "lidarr" => Ok(ServiceKind::Lidarr),
            other => Err(format!("unknown service '{other}' (expected sonarr, radarr or lidarr)")),
        }
    }
}

/// What one notification covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grouping {
    /// One notification per media file, after optional rename.
    PerFile,
    /// One notification per album folder; disc subfolders fold into their parent.
    PerAlbumFolder,
}

/// REST command endpoint flavour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiVariant {
    /// `api/command` (Sonarr/Radarr)
    Legacy,
    /// `api/v1/command` (Lidarr)
    V1,
}

impl ApiVariant {
    pub fn resource(self) -> &'static str {
        match self {
            ApiVariant::Legacy => "api/command",
            ApiVariant::V1 => "api/v1/command",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MediaProfile {
    pub kind: ServiceKind,
    pub extensions: &'static [&'static str],
    pub grouping: Grouping,
    pub api: ApiVariant,
    /// Rescan command name sent in the payload.
    pub command: &'static str,
}

impl MediaProfile {
    /// Case-insensitive extension match against this profile's set.
    pub fn matches(&self, path: &Path) -> bool {
        has_extension_in(path, self.extensions)
    }
}

/// True when `path`'s extension (with leading dot) is in `set`, ignoring case.
pub fn has_extension_in(path: &Path, set: &[&str]) -> bool {
    let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
        return false;
    };
    set.iter()
        .any(|candidate| candidate.strip_prefix('.').is_some_and(|c| c.eq_ignore_ascii_case(ext)))
}
