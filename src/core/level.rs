//! Log level definitions

use crate::core::error::DispatchError;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Ordered severity threshold controlling which records are delivered.
///
/// Ordering follows declaration order: `Trace < Debug < Info < Warn <
/// Error < Fatal`. A logger at threshold `L` delivers records at `L` or
/// above and filters everything below.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Level {
    Trace = 0,
    Debug = 1,
    #[default]
    Info = 2,
    Warn = 3,
    Error = 4,
    Fatal = 5,
}

/// All levels in ascending severity order.
pub const ALL_LEVELS: [Level; 6] = [
    Level::Trace,
    Level::Debug,
    Level::Info,
    Level::Warn,
    Level::Error,
    Level::Fatal,
];

impl Level {
    /// Canonical upper-case name, the inverse of [`Level::parse`].
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Trace => "TRACE",
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
            Level::Fatal => "FATAL",
        }
    }

    /// Parse a level name case-insensitively.
    ///
    /// Accepts the six canonical names plus the `WARNING` alias. Returns
    /// `None` for anything else.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "TRACE" => Some(Level::Trace),
            "DEBUG" => Some(Level::Debug),
            "INFO" => Some(Level::Info),
            "WARN" | "WARNING" => Some(Level::Warn),
            "ERROR" => Some(Level::Error),
            "FATAL" => Some(Level::Fatal),
            _ => None,
        }
    }

    /// Like [`Level::parse`], but panics on failure.
    ///
    /// Intended only for startup-time configuration paths where a bad
    /// level name is unrecoverable.
    ///
    /// # Panics
    ///
    /// Panics if `s` is not a valid level name.
    pub fn must_parse(s: &str) -> Self {
        match Self::parse(s) {
            Some(level) => level,
            None => panic!("invalid log level: '{}'", s),
        }
    }

    /// Map an integer index back to a level (`0` = Trace .. `5` = Fatal).
    pub fn from_index(index: u64) -> Option<Self> {
        match index {
            0 => Some(Level::Trace),
            1 => Some(Level::Debug),
            2 => Some(Level::Info),
            3 => Some(Level::Warn),
            4 => Some(Level::Error),
            5 => Some(Level::Fatal),
            _ => None,
        }
    }

    pub(crate) fn as_lower_str(&self) -> &'static str {
        match self {
            Level::Trace => "trace",
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Warn => "warn",
            Level::Error => "error",
            Level::Fatal => "fatal",
        }
    }

    #[cfg(feature = "console")]
    pub fn color_code(&self) -> colored::Color {
        use colored::Color::*;
        match self {
            Level::Trace => BrightBlack,
            Level::Debug => Blue,
            Level::Info => Green,
            Level::Warn => Yellow,
            Level::Error => Red,
            Level::Fatal => BrightRed,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Level {
    type Err = DispatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| DispatchError::InvalidLevel(s.to_string()))
    }
}

impl Serialize for Level {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

// Provider options historically carry levels either as names or as raw
// integers (e.g. `{"tostderrlevel":4}`), so accept both.
impl<'de> Deserialize<'de> for Level {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct LevelVisitor;

        impl Visitor<'_> for LevelVisitor {
            type Value = Level;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a log level name or an integer in 0..=5")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Level, E> {
                Level::parse(v).ok_or_else(|| E::custom(format!("invalid log level: '{}'", v)))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Level, E> {
                Level::from_index(v).ok_or_else(|| E::custom(format!("invalid log level: {}", v)))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Level, E> {
                u64::try_from(v)
                    .ok()
                    .and_then(Level::from_index)
                    .ok_or_else(|| E::custom(format!("invalid log level: {}", v)))
            }
        }

        deserializer.deserialize_any(LevelVisitor)
    }
}
