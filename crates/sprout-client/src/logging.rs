//! Sprout logging relay emitter.
//!
//! Best-effort: one POST per entry, no retry, no queue. Failures are logged
//! locally and reported as `false`.

use reqwest::Client;
use sprout_types::{LogEntry, LogLevel};

use crate::error::ClientError;

/// Posts log entries to the relay's per-service `Logs/Create` endpoint.
#[derive(Debug, Clone)]
pub struct LogRelay {
    http: Client,
    relay_base: String,
}

impl LogRelay {
    pub fn new(http: Client, relay_base: &str) -> Self {
        Self { http, relay_base: relay_base.trim_end_matches('/').to_string() }
    }

    pub fn endpoint(&self, service_uid: &str) -> String {
        format!("{}/API/Services/{}/Logs/Create", self.relay_base, service_uid)
    }

    /// Returns `true` only when the relay answered with a success status.
    pub async fn log(&self, service_uid: &str, level: LogLevel, title: &str, content: &str) -> bool {
        match self.try_log(service_uid, &LogEntry::new(level, title, content)).await {
            Ok(()) => true,
            Err(e) => {
                tracing::error!(service = service_uid, error = %e, "Failed to send log to relay");
                false
            },
        }
    }

    pub async fn try_log(&self, service_uid: &str, entry: &LogEntry) -> Result<(), ClientError> {
        let resp = self.http.post(self.endpoint(service_uid)).json(entry).send().await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ClientError::HttpStatus {
                route: "logging relay".to_string(),
                status: status.as_u16(),
            });
        }
        Ok(())
    }
}
