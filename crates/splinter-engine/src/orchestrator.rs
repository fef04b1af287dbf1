//! Split-then-encode pipeline.

use bytes::Bytes;
use splinter_erasure::{ErasureBackend, open_backend};
use splinter_split::{ShardSet, ShardSplitter};
use splinter_types::{BackendKind, EncodeRequest};
use tracing::debug;

use crate::error::EngineError;

/// Splits inputs and fills their parity with one erasure backend.
///
/// The backend is opened once in [`new`](Self::new) and released when the
/// orchestrator is dropped. `encode` takes `&self`, so one orchestrator can
/// serve several threads, each encoding its own input.
pub struct EncodeOrchestrator {
    request: EncodeRequest,
    splitter: ShardSplitter,
    backend: Box<dyn ErasureBackend>,
}

impl EncodeOrchestrator {
    /// Validate `request` and open the backend it selects.
    pub fn new(request: EncodeRequest) -> Result<Self, EngineError> {
        request.validate()?;
        let splitter = ShardSplitter::new(request)?;
        let backend = open_backend(request.backend, request.data_shards, request.parity_shards)?;
        Ok(Self {
            request,
            splitter,
            backend,
        })
    }

    /// Use an already opened backend instead of the one `request` selects.
    ///
    /// The backend must have been opened for the request's shard counts.
    pub fn with_backend(
        request: EncodeRequest,
        backend: Box<dyn ErasureBackend>,
    ) -> Result<Self, EngineError> {
        request.validate()?;
        if backend.data_shards() != request.data_shards
            || backend.parity_shards() != request.parity_shards
        {
            return Err(EngineError::BackendMismatch {
                k: request.data_shards,
                m: request.parity_shards,
                backend_k: backend.data_shards(),
                backend_m: backend.parity_shards(),
            });
        }
        let splitter = ShardSplitter::new(request)?;
        Ok(Self {
            request,
            splitter,
            backend,
        })
    }

    /// The request this orchestrator encodes with.
    pub fn request(&self) -> &EncodeRequest {
        &self.request
    }

    /// The backend actually computing parity.
    pub fn backend_kind(&self) -> BackendKind {
        self.backend.kind()
    }

    /// Split `input` and compute its parity.
    pub fn encode(&self, input: impl Into<Bytes>) -> Result<ShardSet, EngineError> {
        let mut set = self.splitter.split(input)?;
        {
            let (data, mut parity) = set.buffers_mut();
            self.backend.encode(&data, &mut parity)?;
        }

        debug!(
            backend = %self.backend.kind(),
            k = set.data_shards(),
            m = set.parity_shards(),
            shard_size = set.shard_size(),
            input_len = set.input_len(),
            "encoded shard set"
        );
        Ok(set)
    }
}

impl std::fmt::Debug for EncodeOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EncodeOrchestrator")
            .field("request", &self.request)
            .field("backend", &self.backend.kind())
            .finish()
    }
}

/// Encode `input` once with a freshly opened backend.
pub fn encode(input: impl Into<Bytes>, request: EncodeRequest) -> Result<ShardSet, EngineError> {
    EncodeOrchestrator::new(request)?.encode(input)
}
