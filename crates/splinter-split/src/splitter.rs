//! Fixed-size splitter that turns an input into a [`ShardSet`].

use bytes::Bytes;
use splinter_types::EncodeRequest;
use tracing::{debug, warn};

use crate::arena::ShardArena;
use crate::error::SplitError;
use crate::set::ShardSet;

/// Splits inputs into `k` data shards plus `m` zeroed parity shards.
///
/// The effective shard size is `min(input_len, shard_size)` under the
/// default size policy. Data shards that can be filled completely are
/// sliced out of the input without copying. The rest (a short tail shard,
/// any empty data slots, all parity shards) come from one aligned arena;
/// the leftover input bytes go to the start of the first arena shard.
#[derive(Debug, Clone)]
pub struct ShardSplitter {
    request: EncodeRequest,
}

impl ShardSplitter {
    /// Create a splitter for `request`, validating its shard counts and size.
    pub fn new(request: EncodeRequest) -> Result<Self, SplitError> {
        request.validate()?;
        Ok(Self { request })
    }

    /// The request this splitter was built for.
    pub fn request(&self) -> &EncodeRequest {
        &self.request
    }

    /// Split `input` into a shard set.
    ///
    /// Input beyond `data_shards * shard_size` is not placed in any shard;
    /// [`ShardSet::consumed_len`] reports how much was used.
    pub fn split(&self, input: impl Into<Bytes>) -> Result<ShardSet, SplitError> {
        let input: Bytes = input.into();
        let input_len = input.len();
        let data_shards = self.request.data_shards;
        let parity_shards = self.request.parity_shards;
        let shard_size = self.request.effective_shard_size(input_len)?;

        let mut direct = Vec::with_capacity(data_shards);
        let mut offset = 0;
        if shard_size > 0 {
            while direct.len() < data_shards && input_len - offset >= shard_size {
                direct.push(input.slice(offset..offset + shard_size));
                offset += shard_size;
            }
        }

        let padded_data = data_shards - direct.len();
        let mut arena = ShardArena::allocate(padded_data + parity_shards, shard_size)?;

        let mut consumed = offset;
        if padded_data > 0 && offset < input_len {
            // Loop stopped on a short tail, so it fits in one shard.
            let tail = &input[offset..];
            arena.region_mut(0)[..tail.len()].copy_from_slice(tail);
            consumed += tail.len();
        }

        if consumed < input_len {
            warn!(
                input_len,
                consumed,
                data_shards,
                shard_size,
                "input longer than data_shards * shard_size, trailing bytes not sharded"
            );
        }

        debug!(
            data_shards,
            parity_shards,
            shard_size,
            input_len,
            direct = direct.len(),
            padded = arena.len(),
            "split input into shards"
        );

        Ok(ShardSet::new(
            data_shards,
            parity_shards,
            shard_size,
            input_len,
            consumed,
            direct,
            arena,
        ))
    }
}
