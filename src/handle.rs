//! Convenience leveled wrapper
//!
//! [`LogHandle`] gives ordinary callers a leveled API with automatic
//! call-site capture: each method is `#[track_caller]`, so records report
//! the caller's own file and line without any stack-depth bookkeeping.

use crate::core::{Fields, Level, Logger, SourceLocation};
use crate::providers::ConsoleProvider;
use std::path::Path;
use std::sync::Arc;

/// Shareable leveled logging handle around a [`Logger`].
#[derive(Clone)]
pub struct LogHandle {
    logger: Arc<Logger>,
}

impl LogHandle {
    pub fn new(logger: Logger) -> Self {
        Self {
            logger: Arc::new(logger),
        }
    }

    /// Build and start a file-backed async logger writing to `path`.
    ///
    /// On initialization failure this still returns a usable handle: it
    /// degrades to a synchronous console logger and immediately emits an
    /// error record describing the failure. Callers never receive a null
    /// object.
    pub fn from_file(path: impl AsRef<Path>) -> Self {
        match crate::init::init_file(&path) {
            Ok(logger) => Self::new(logger),
            Err(e) => {
                let mut fallback = Logger::new(Box::new(ConsoleProvider::new(Level::Error)));
                fallback.run();
                let handle = Self::new(fallback);
                handle.error(format!(
                    "failed to initialize file logger at '{}': {}",
                    path.as_ref().display(),
                    e
                ));
                handle
            }
        }
    }

    /// Borrow the underlying logger (e.g. to hand to the HTTP control
    /// handlers).
    pub fn logger(&self) -> &Arc<Logger> {
        &self.logger
    }

    pub fn level(&self) -> Level {
        self.logger.level()
    }

    pub fn set_level(&self, level: Level) {
        self.logger.set_level(level);
    }

    /// Shut the logger down if this is the last handle to it; clones
    /// still holding the logger keep it running.
    pub fn quit(self) {
        if let Ok(mut logger) = Arc::try_unwrap(self.logger) {
            logger.quit();
        }
    }

    #[track_caller]
    pub fn trace(&self, message: impl AsRef<str>) {
        self.logger
            .trace(SourceLocation::caller(), format_args!("{}", message.as_ref()));
    }

    #[track_caller]
    pub fn debug(&self, message: impl AsRef<str>) {
        self.logger
            .debug(SourceLocation::caller(), format_args!("{}", message.as_ref()));
    }

    #[track_caller]
    pub fn info(&self, message: impl AsRef<str>) {
        self.logger
            .info(SourceLocation::caller(), format_args!("{}", message.as_ref()));
    }

    #[track_caller]
    pub fn warn(&self, message: impl AsRef<str>) {
        self.logger
            .warn(SourceLocation::caller(), format_args!("{}", message.as_ref()));
    }

    #[track_caller]
    pub fn error(&self, message: impl AsRef<str>) {
        self.logger
            .error(SourceLocation::caller(), format_args!("{}", message.as_ref()));
    }

    /// Logs at `Fatal` and terminates the process after durable hand-off.
    #[track_caller]
    pub fn fatal(&self, message: impl AsRef<str>) {
        self.logger
            .fatal(SourceLocation::caller(), format_args!("{}", message.as_ref()));
    }

    /// Log with structured fields attached.
    #[track_caller]
    pub fn log_with_fields(&self, level: Level, message: impl AsRef<str>, fields: Fields) {
        self.logger.log_with_fields(
            level,
            SourceLocation::caller(),
            format_args!("{}", message.as_ref()),
            fields,
        );
    }
}
