//! Logging macros with call-site capture and deferred formatting.
//!
//! The macros take the call site from `file!()`/`line!()` and pass the
//! message as `format_args!`, so a record filtered out by the level
//! threshold never pays the formatting cost.
//!
//! # Examples
//!
//! ```
//! use log_dispatch::prelude::*;
//! use log_dispatch::info;
//! # use log_dispatch::core::{Record, Result};
//! # struct Null;
//! # impl Provider for Null {
//! #     fn write(&mut self, _r: &Record) -> Result<()> { Ok(()) }
//! #     fn flush(&mut self) -> Result<()> { Ok(()) }
//! #     fn type_name(&self) -> &'static str { "null" }
//! # }
//!
//! let mut logger = Logger::new(Box::new(Null));
//! logger.run();
//!
//! let port = 8080;
//! info!(logger, "server listening on port {}", port);
//! ```

/// Log a message at an explicit level.
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.log(
            $level,
            $crate::core::SourceLocation::new(file!(), line!()),
            format_args!($($arg)+),
        )
    };
}

/// Log a trace-level message.
#[macro_export]
macro_rules! trace {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Trace, $($arg)+)
    };
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Debug, $($arg)+)
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Info, $($arg)+)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Warn, $($arg)+)
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Error, $($arg)+)
    };
}

/// Log a fatal-level message. The process terminates after the record is
/// durably handed off.
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Fatal, $($arg)+)
    };
}
