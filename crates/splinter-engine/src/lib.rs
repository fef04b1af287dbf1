//! Encode orchestration for splinter.
//!
//! [`EncodeOrchestrator`] runs the two stages of an encode:
//!
//! 1. split the input into `k` data shards and `m` zeroed parity shards
//!    ([`splinter_split::ShardSplitter`]);
//! 2. fill the parity shards with the selected erasure backend
//!    ([`splinter_erasure::ErasureBackend`]).
//!
//! Either a complete [`ShardSet`] comes back or an [`EngineError`]; there is
//! no partial output.

mod error;
mod orchestrator;


pub use error::{EngineError, ErrorKind};
pub use orchestrator::{EncodeOrchestrator, encode};
pub use splinter_erasure::ErasureError;
pub use splinter_split::{ShardKind, ShardRef, ShardSet, SplitError};
pub use splinter_types::{BackendKind, EncodeRequest, ShardSizePolicy};
