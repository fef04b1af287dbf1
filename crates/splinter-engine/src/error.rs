//! Error types for the engine.

use std::fmt;

use splinter_erasure::ErasureError;
use splinter_split::SplitError;
use splinter_types::InvalidConfig;

/// Errors that can occur while encoding an input.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// The request is not usable.
    #[error("invalid configuration: {0}")]
    InvalidConfig(#[from] InvalidConfig),

    /// Splitting the input failed.
    #[error("split error: {0}")]
    Split(#[from] SplitError),

    /// Opening the backend or encoding parity failed.
    #[error("erasure error: {0}")]
    Erasure(#[from] ErasureError),

    /// A caller-supplied backend was opened for different shard counts.
    #[error("backend encodes {backend_k}+{backend_m} shards, request needs {k}+{m}")]
    BackendMismatch {
        /// Data shards in the request.
        k: usize,
        /// Parity shards in the request.
        m: usize,
        /// Data shards the backend was opened for.
        backend_k: usize,
        /// Parity shards the backend was opened for.
        backend_m: usize,
    },
}

/// Coarse classification of an [`EngineError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Bad shard counts, sizes or shard shapes; nothing was allocated.
    InvalidConfiguration,
    /// Shard buffers could not be allocated.
    AllocationFailure,
    /// The backend could not acquire its state. Callers may choose to
    /// retry with another backend.
    BackendInitialization,
    /// A backend failed after initialization. Indicates a defect.
    EncodeFailure,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::InvalidConfiguration => "invalid configuration",
            ErrorKind::AllocationFailure => "allocation failure",
            ErrorKind::BackendInitialization => "backend initialization error",
            ErrorKind::EncodeFailure => "encode failure",
        };
        f.write_str(name)
    }
}

impl EngineError {
    /// Which kind of failure this is.
    pub fn kind(&self) -> ErrorKind {
        match self {
            EngineError::InvalidConfig(_)
            | EngineError::Split(SplitError::InvalidConfig(_))
            | EngineError::Erasure(ErasureError::InvalidConfig(_))
            | EngineError::BackendMismatch { .. } => ErrorKind::InvalidConfiguration,
            EngineError::Split(SplitError::Allocation { .. }) => ErrorKind::AllocationFailure,
            EngineError::Erasure(ErasureError::BackendInit { .. }) => {
                ErrorKind::BackendInitialization
            }
            EngineError::Erasure(ErasureError::ShardLayout(_) | ErasureError::Encode { .. }) => {
                ErrorKind::EncodeFailure
            }
        }
    }
}
