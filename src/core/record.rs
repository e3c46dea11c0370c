//! Log record structure

use super::context::Fields;
use super::level::Level;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

/// One formatted, leveled, timestamped log entry with caller location.
///
/// Records are created per accepted log call, handed to the provider
/// chain once, and never mutated after creation.
#[derive(Debug, Clone, Serialize)]
pub struct Record {
    pub level: Level,
    pub timestamp: DateTime<Utc>,
    pub location: SourceLocation,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<Fields>,
}

impl Record {
    /// Sanitize log message to prevent log injection attacks
    ///
    /// Replaces newlines, carriage returns, and tabs with escape sequences
    /// so a crafted message cannot forge additional log lines.
    fn sanitize_message(message: &str) -> String {
        message
            .replace('\n', "\\n")
            .replace('\r', "\\r")
            .replace('\t', "\\t")
    }

    pub fn new(level: Level, location: SourceLocation, message: String) -> Self {
        Self {
            level,
            timestamp: Utc::now(),
            location,
            message: Self::sanitize_message(&message),
            fields: None,
        }
    }

    pub fn with_fields(mut self, fields: Fields) -> Self {
        if !fields.is_empty() {
            self.fields = Some(fields);
        }
        self
    }

    /// Render the record as a single text line.
    ///
    /// `[2025-01-08T10:30:45.123Z] [INFO ] src/main.rs:42 - message k=v`
    pub fn format_line(&self) -> String {
        let mut line = format!(
            "[{}] [{:5}] {}:{} - {}",
            self.timestamp.format("%Y-%m-%dT%H:%M:%S%.3fZ"),
            self.level.as_str(),
            self.location.file,
            self.location.line,
            self.message
        );
        if let Some(ref fields) = self.fields {
            if !fields.is_empty() {
                line.push(' ');
                line.push_str(&fields.to_string());
            }
        }
        line
    }
}

/// Call-site capture for accurate source-location reporting.
///
/// Replaces stack-frame-skip counting: the location is taken explicitly,
/// either from `file!()`/`line!()` in the logging macros or from
/// [`SourceLocation::caller`] behind `#[track_caller]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SourceLocation {
    pub file: &'static str,
    pub line: u32,
}

impl SourceLocation {
    pub const fn new(file: &'static str, line: u32) -> Self {
        Self { file, line }
    }

    /// Capture the location of the caller of the enclosing
    /// `#[track_caller]` function.
    #[track_caller]
    pub fn caller() -> Self {
        let location = std::panic::Location::caller();
        Self {
            file: location.file(),
            line: location.line(),
        }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}
