//! Rescan notifications.
//!
//! POSTs a command to `<url>/api/command` (or `<url>/api/v1/command` for the
//! Lidarr family) telling the service to import a path. The response body is
//! only logged; success means the transport worked and the status was 2xx.
//! There are no retries.

use reqwest::blocking::Client;
use serde::Serialize;
use tracing::{debug, info};

use crate::config::{ImportMode, ValidatedService};
use crate::errors::ImportError;
use crate::media::{ApiVariant, MediaProfile};

pub const CLIENT_USER_AGENT: &str = "Sonarr Auto-Import";
pub const DOWNLOAD_CLIENT_ID: &str = "SonarrAutoImporter";
pub const API_KEY_HEADER: &str = "X-Api-Key";

/// JSON body of a rescan command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationPayload {
    pub path: String,
    pub name: String,
    pub import_mode: ImportMode,
    pub download_client_id: &'static str,
}

impl NotificationPayload {
    pub fn new(path: impl Into<String>, command: &str, import_mode: ImportMode) -> Self {
        Self {
            path: path.into(),
            name: command.to_string(),
            import_mode,
            download_client_id: DOWNLOAD_CLIENT_ID,
        }
    }
}

/// `<base>/<resource>` with exactly one slash between them.
pub fn command_url(base: &str, api: ApiVariant) -> String {
    format!("{}/{}", base.trim_end_matches('/'), api.resource())
}

/// Something that can tell a downstream service to rescan a path.
pub trait Notifier {
    fn notify(
        &self,
        service: &ValidatedService,
        profile: &MediaProfile,
        remote_path: &str,
    ) -> Result<(), ImportError>;
}

/// reqwest-backed notifier using the client's default timeouts.
#[derive(Debug, Clone)]
pub struct RestNotifier {
    client: Client,
}

impl RestNotifier {
    pub fn new() -> Result<Self, ImportError> {
        let client = Client::builder()
            .user_agent(CLIENT_USER_AGENT)
            .build()
            .map_err(|e| ImportError::NotifyFailed {
                url: String::new(),
                path: String::new(),
                reason: format!("building HTTP client: {e}"),
            })?;
        Ok(Self { client })
    }
}

impl Notifier for RestNotifier {
    fn notify(
        &self,
        service: &ValidatedService,
        profile: &MediaProfile,
        remote_path: &str,
    ) -> Result<(), ImportError> {
        let url = command_url(&service.url, profile.api);
        let payload = NotificationPayload::new(remote_path, profile.command, service.import_mode);
        let fail = |reason: String| ImportError::NotifyFailed {
            url: url.clone(),
            path: remote_path.to_string(),
            reason,
        };

        debug!(%url, payload = ?payload, "Sending rescan command");
        let response = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, &service.api_key)
            .json(&payload)
            .send()
            .map_err(|e| fail(e.to_string()))?;

        let status = response.status();
        let body = response.text().unwrap_or_default();
        debug!(%status, body = %body, "Rescan response");
        if !status.is_success() {
            return Err(fail(format!("HTTP {status}")));
        }

        info!(" - Executed {} command for {remote_path}", profile.kind);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_url_joins_once() {
        assert_eq!(
            command_url("http://localhost:8989/", ApiVariant::Legacy),
            "http://localhost:8989/api/command"
        );
        assert_eq!(
            command_url("http://host:8686", ApiVariant::V1),
            "http://host:8686/api/v1/command"
        );
    }

    #[test]
    fn payload_serializes_with_wire_names() {
        let p = NotificationPayload::new("/tv/Show", "DownloadedEpisodesScan", ImportMode::Copy);
        let v = serde_json::to_value(&p).unwrap();
        assert_eq!(
            v,
            serde_json::json!({
                "path": "/tv/Show",
                "name": "DownloadedEpisodesScan",
                "importMode": "Copy",
                "downloadClientId": "SonarrAutoImporter"
            })
        );
    }
}
