//! Console provider implementation

use super::parse_options;
use crate::core::{Level, Provider, Record, Result};
use serde::Deserialize;
use std::io::Write;

#[derive(Debug, Deserialize)]
#[serde(default)]
struct ConsoleOptions {
    tostderrlevel: Level,
}

impl Default for ConsoleOptions {
    fn default() -> Self {
        Self {
            tostderrlevel: Level::Error,
        }
    }
}

/// Writes records to stdout, routing records at or above a configurable
/// level to stderr instead.
///
/// Registered as both `console` and `colored_console`; the colored
/// variant paints the level tag (requires the `console` feature, plain
/// output otherwise).
pub struct ConsoleProvider {
    to_stderr_level: Level,
    colored: bool,
    type_name: &'static str,
}

impl ConsoleProvider {
    pub fn new(to_stderr_level: Level) -> Self {
        Self {
            to_stderr_level,
            colored: false,
            type_name: "console",
        }
    }

    pub fn colored(to_stderr_level: Level) -> Self {
        Self {
            to_stderr_level,
            colored: true,
            type_name: "colored_console",
        }
    }

    /// Construct from the opaque JSON options payload
    /// (`{"tostderrlevel": <level name or index>}`).
    pub fn from_options(opts: &str, colored: bool) -> Result<Self> {
        let options: ConsoleOptions = parse_options(
            if colored { "colored_console" } else { "console" },
            opts,
        )?;
        Ok(if colored {
            Self::colored(options.tostderrlevel)
        } else {
            Self::new(options.tostderrlevel)
        })
    }

    #[cfg(feature = "console")]
    fn level_tag(&self, level: Level) -> String {
        use colored::Colorize;
        let tag = format!("{:5}", level.as_str());
        if self.colored {
            tag.color(level.color_code()).to_string()
        } else {
            tag
        }
    }

    #[cfg(not(feature = "console"))]
    fn level_tag(&self, level: Level) -> String {
        format!("{:5}", level.as_str())
    }

    fn format_line(&self, record: &Record) -> String {
        let mut line = format!(
            "[{}] [{}] {}:{} - {}",
            record.timestamp.format("%Y-%m-%dT%H:%M:%S%.3fZ"),
            self.level_tag(record.level),
            record.location.file,
            record.location.line,
            record.message
        );
        if let Some(ref fields) = record.fields {
            if !fields.is_empty() {
                line.push(' ');
                line.push_str(&fields.to_string());
            }
        }
        line
    }
}

impl Provider for ConsoleProvider {
    fn write(&mut self, record: &Record) -> Result<()> {
        let line = self.format_line(record);
        if record.level >= self.to_stderr_level {
            eprintln!("{}", line);
        } else {
            println!("{}", line);
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        std::io::stdout().flush()?;
        std::io::stderr().flush()?;
        Ok(())
    }

    fn type_name(&self) -> &'static str {
        self.type_name
    }
}
