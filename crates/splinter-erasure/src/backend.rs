//! The erasure backend capability and backend selection.

use splinter_types::{BackendKind, validate_shard_counts};
use tracing::info;

use crate::error::ErasureError;
use crate::native::NativeBackend;
use crate::reference::ReferenceBackend;

/// Computes parity shards from data shards for a fixed `(k, m)`.
///
/// A backend is opened once per configuration and may then encode any
/// number of shard sets, from several threads at once. Dropping it
/// releases whatever state it acquired when opened.
pub trait ErasureBackend: Send + Sync {
    /// Which implementation this is.
    fn kind(&self) -> BackendKind;

    /// Number of data shards `k`.
    fn data_shards(&self) -> usize;

    /// Number of parity shards `m`.
    fn parity_shards(&self) -> usize;

    /// Overwrite `parity` with the parity of `data`.
    ///
    /// `data` must hold `k` shards and `parity` `m` shards, all of the same
    /// length. Zero-length shards are valid and leave nothing to compute.
    fn encode(&self, data: &[&[u8]], parity: &mut [&mut [u8]]) -> Result<(), ErasureError>;
}

/// Open the backend `kind` for `data_shards` data and `parity_shards`
/// parity shards.
///
/// # Errors
///
/// [`ErasureError::InvalidConfig`] for unusable shard counts,
/// [`ErasureError::BackendInit`] if the backend cannot acquire its state.
pub fn open_backend(
    kind: BackendKind,
    data_shards: usize,
    parity_shards: usize,
) -> Result<Box<dyn ErasureBackend>, ErasureError> {
    validate_shard_counts(data_shards, parity_shards)?;
    let backend: Box<dyn ErasureBackend> = match kind {
        BackendKind::Reference => Box::new(ReferenceBackend::new(data_shards, parity_shards)?),
        BackendKind::Native => Box::new(NativeBackend::new(data_shards, parity_shards)?),
    };
    info!(backend = %kind, k = data_shards, m = parity_shards, "opened erasure backend");
    Ok(backend)
}

/// Check the buffers against the backend's shard counts and return the
/// common shard length.
pub(crate) fn check_layout(
    backend: &dyn ErasureBackend,
    data: &[&[u8]],
    parity: &[&mut [u8]],
) -> Result<usize, ErasureError> {
    if data.len() != backend.data_shards() || parity.len() != backend.parity_shards() {
        return Err(ErasureError::ShardLayout(format!(
            "expected {} data and {} parity shards, got {} and {}",
            backend.data_shards(),
            backend.parity_shards(),
            data.len(),
            parity.len()
        )));
    }
    let len = data.first().map_or(0, |s| s.len());
    let uneven = data.iter().map(|s| s.len()).chain(parity.iter().map(|s| s.len()));
    for (i, shard_len) in uneven.enumerate() {
        if shard_len != len {
            return Err(ErasureError::ShardLayout(format!(
                "shard {i} is {shard_len} bytes, expected {len}"
            )));
        }
    }
    Ok(len)
}
