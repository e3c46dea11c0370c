//! Provider trait for log output destinations

use super::{error::Result, record::Record};
use std::fmt;

/// Pluggable sink capable of accepting a formatted log record.
///
/// A provider is configured once at construction (from a typed options
/// payload) and never re-configured; replacing configuration means
/// constructing a new provider and swapping it into the logger.
pub trait Provider: Send + Sync {
    /// Deliver one record to the sink.
    fn write(&mut self, record: &Record) -> Result<()>;

    /// Flush any buffered output.
    fn flush(&mut self) -> Result<()>;

    /// Registered type name of this provider (e.g. `"file"`).
    fn type_name(&self) -> &'static str;
}

impl fmt::Debug for dyn Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Provider")
            .field("type_name", &self.type_name())
            .finish_non_exhaustive()
    }
}
