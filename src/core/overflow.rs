//! Overflow policies for the async dispatch queue
//!
//! When the bounded async queue is full, the policy determines what
//! happens to new records: block the producer, block with a deadline, or
//! drop and count. Dropping never reorders records that were accepted.

use std::fmt;
use std::time::Duration;

/// Policy applied when the async queue is full.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverflowPolicy {
    /// Block the producer until space is available.
    ///
    /// Backpressure from a slow provider is transmitted to the caller.
    /// This is the default: no record accepted by the filter is lost.
    Block,

    /// Block up to the given duration, then drop and count the record.
    BlockWithTimeout(Duration),

    /// Drop the new record immediately and count it.
    ///
    /// For high-throughput paths where losing records under load is
    /// preferable to stalling the caller.
    DropNewest,
}

impl Default for OverflowPolicy {
    fn default() -> Self {
        OverflowPolicy::Block
    }
}

impl fmt::Display for OverflowPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OverflowPolicy::Block => write!(f, "Block"),
            OverflowPolicy::BlockWithTimeout(d) => write!(f, "BlockWithTimeout({:?})", d),
            OverflowPolicy::DropNewest => write!(f, "DropNewest"),
        }
    }
}
