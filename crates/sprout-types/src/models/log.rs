//! Logging relay entry model.

use serde::{Deserialize, Serialize};

/// Severity of a relay log entry. Serialized as its numeric value.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(into = "u8", try_from = "u8")]
pub enum LogLevel {
    /// Normal operation
    Info = 0,
    /// Needs attention, not critical
    Warning = 1,
    /// Failure the service may recover from
    Error = 2,
}

impl From<LogLevel> for u8 {
    fn from(level: LogLevel) -> Self {
        level as u8
    }
}

impl TryFrom<u8> for LogLevel {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, String> {
        match value {
            0 => Ok(LogLevel::Info),
            1 => Ok(LogLevel::Warning),
            2 => Ok(LogLevel::Error),
            other => Err(format!("invalid log level: {other}")),
        }
    }
}

/// Body of a relay `Logs/Create` request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct LogEntry {
    pub level: LogLevel,
    /// Short summary
    pub title: String,
    /// Detailed description
    pub content: String,
}

impl LogEntry {
    pub fn new(level: LogLevel, title: impl Into<String>, content: impl Into<String>) -> Self {
        Self { level, title: title.into(), content: content.into() }
    }
}
