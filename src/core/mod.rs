//! Core dispatch types and traits

pub mod context;
pub mod error;
pub mod level;
pub mod logger;
pub mod metrics;
pub mod mix;
pub mod overflow;
pub mod provider;
pub mod record;
pub mod registry;

pub use context::{FieldValue, Fields};
pub use error::{DispatchError, Result};
pub use level::{Level, ALL_LEVELS};
pub use logger::{Logger, DEFAULT_QUEUE_CAPACITY, DEFAULT_QUIT_TIMEOUT};
pub use metrics::DispatchMetrics;
pub use mix::MixProvider;
pub use overflow::OverflowPolicy;
pub use provider::Provider;
pub use record::{Record, SourceLocation};
pub use registry::{ProviderConstructor, ProviderRegistry};
