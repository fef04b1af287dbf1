//! Error types for shard splitting.

use splinter_types::InvalidConfig;

/// Errors that can occur while splitting an input into shards.
#[derive(Debug, thiserror::Error)]
pub enum SplitError {
    /// The request or the effective shard size is not usable.
    #[error("invalid configuration: {0}")]
    InvalidConfig(#[from] InvalidConfig),

    /// The padding arena could not be allocated.
    #[error("failed to allocate {bytes} bytes for shard buffers")]
    Allocation {
        /// Size of the backing buffer that was requested.
        bytes: usize,
    },
}
