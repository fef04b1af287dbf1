//! Error types for erasure coding operations.

use splinter_types::{BackendKind, InvalidConfig};

/// Errors that can occur while opening a backend or encoding parity.
#[derive(Debug, thiserror::Error)]
pub enum ErasureError {
    /// Shard counts the backend cannot work with.
    #[error("invalid configuration: {0}")]
    InvalidConfig(#[from] InvalidConfig),

    /// The backend could not acquire its state.
    #[error("{backend} backend initialization failed: {reason}")]
    BackendInit {
        /// Backend being opened.
        backend: BackendKind,
        /// What went wrong.
        reason: String,
    },

    /// The buffers handed to `encode` do not match the backend's layout.
    #[error("shard layout mismatch: {0}")]
    ShardLayout(String),

    /// The backend failed after a successful initialization.
    #[error("{backend} backend encode failed: {reason}")]
    Encode {
        /// Backend that failed.
        backend: BackendKind,
        /// What went wrong.
        reason: String,
    },
}
