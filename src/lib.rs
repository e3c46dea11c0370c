//! # Log Dispatch
//!
//! A pluggable logging dispatch core: a level-filtered, provider-composable
//! logger that runs synchronously or asynchronously, fans out to multiple
//! output destinations, and has its verbosity adjusted at runtime
//! (including over HTTP).
//!
//! ## Features
//!
//! - **Pluggable Providers**: console, file, per-level multifile, network,
//!   and anything registered in a [`ProviderRegistry`]
//! - **Sync or Async**: direct delivery on the calling thread, or a
//!   bounded queue drained by one background worker
//! - **Runtime Tunable**: level threshold readable/writable at any time,
//!   with optional HTTP control handlers (`http` feature)
//! - **Thread Safe**: one logger shared by many concurrent callers

pub mod core;
pub mod handle;
pub mod init;
pub mod macros;
pub mod providers;

#[cfg(feature = "http")]
pub mod http;

pub mod prelude {
    pub use crate::core::{
        DispatchError, DispatchMetrics, FieldValue, Fields, Level, Logger, MixProvider,
        OverflowPolicy, Provider, ProviderRegistry, Result, SourceLocation,
        DEFAULT_QUEUE_CAPACITY, DEFAULT_QUIT_TIMEOUT,
    };
    pub use crate::handle::LogHandle;
    pub use crate::providers::{ConsoleProvider, FileProvider, MultiFileProvider, NetworkProvider};
}

pub use core::{
    DispatchError, DispatchMetrics, FieldValue, Fields, Level, Logger, MixProvider,
    OverflowPolicy, Provider, ProviderConstructor, ProviderRegistry, Record, Result,
    SourceLocation, ALL_LEVELS, DEFAULT_QUEUE_CAPACITY, DEFAULT_QUIT_TIMEOUT,
};
pub use handle::LogHandle;
pub use init::{
    init, init_colored_console, init_console, init_file, init_file_and_console, init_multi_file,
    init_multi_file_and_console, OptionsPayload,
};
pub use providers::{ConsoleProvider, FileProvider, MultiFileProvider, NetworkProvider};
