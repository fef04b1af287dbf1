//! The ordered shard set produced by the splitter.

use bytes::Bytes;

use crate::arena::ShardArena;

/// Whether a shard carries input bytes or parity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShardKind {
    /// A fragment of the input (possibly zero padded).
    Data,
    /// Computed by an erasure backend.
    Parity,
}

/// Borrowed view of one shard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShardRef<'a> {
    /// Position in the set (0..k for data, k..k+m for parity).
    pub index: u8,
    /// Data or parity.
    pub kind: ShardKind,
    /// Logical shard contents.
    pub data: &'a [u8],
    /// Bytes reserved for the shard, `>= data.len()`.
    pub capacity: usize,
}

/// `k` data shards followed by `m` parity shards, all of one length.
///
/// The first `direct` data shards are slices of the input. The remaining
/// data shards and all parity shards are regions of a single
/// [`ShardArena`], in shard order.
#[derive(Debug)]
pub struct ShardSet {
    data_shards: usize,
    parity_shards: usize,
    shard_size: usize,
    input_len: usize,
    consumed: usize,
    direct: Vec<Bytes>,
    arena: ShardArena,
}

impl ShardSet {
    pub(crate) fn new(
        data_shards: usize,
        parity_shards: usize,
        shard_size: usize,
        input_len: usize,
        consumed: usize,
        direct: Vec<Bytes>,
        arena: ShardArena,
    ) -> Self {
        debug_assert!(direct.len() <= data_shards);
        debug_assert_eq!(direct.len() + arena.len(), data_shards + parity_shards);
        debug_assert!(direct.iter().all(|s| s.len() == shard_size));
        debug_assert_eq!(arena.region_len(), shard_size);
        Self {
            data_shards,
            parity_shards,
            shard_size,
            input_len,
            consumed,
            direct,
            arena,
        }
    }

    /// Total number of shards.
    pub fn len(&self) -> usize {
        self.data_shards + self.parity_shards
    }

    /// Always false: a set holds at least one data shard.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of data shards.
    pub fn data_shards(&self) -> usize {
        self.data_shards
    }

    /// Number of parity shards.
    pub fn parity_shards(&self) -> usize {
        self.parity_shards
    }

    /// Logical length of every shard.
    pub fn shard_size(&self) -> usize {
        self.shard_size
    }

    /// Length of the input the set was split from.
    pub fn input_len(&self) -> usize {
        self.input_len
    }

    /// Number of input bytes placed into data shards.
    ///
    /// Less than [`input_len`](Self::input_len) when the input is longer
    /// than `data_shards * shard_size`.
    pub fn consumed_len(&self) -> usize {
        self.consumed
    }

    /// Number of data shards that are zero-copy slices of the input.
    pub fn direct_shards(&self) -> usize {
        self.direct.len()
    }

    /// Shard at `index`, or `None` past the end.
    pub fn shard(&self, index: usize) -> Option<ShardRef<'_>> {
        if index >= self.len() {
            return None;
        }
        let kind = if index < self.data_shards {
            ShardKind::Data
        } else {
            ShardKind::Parity
        };
        let (data, capacity) = match self.direct.get(index) {
            Some(slice) => (&slice[..], slice.len()),
            None => {
                let region = index - self.direct.len();
                (self.arena.region(region), self.arena.stride())
            }
        };
        Some(ShardRef {
            index: index as u8,
            kind,
            data,
            capacity,
        })
    }

    /// All shards in order, data shards first.
    pub fn iter(&self) -> impl Iterator<Item = ShardRef<'_>> + '_ {
        (0..self.len()).filter_map(|i| self.shard(i))
    }

    /// Contents of data shard `i`.
    pub fn data_shard(&self, i: usize) -> Option<&[u8]> {
        if i >= self.data_shards {
            return None;
        }
        self.shard(i).map(|s| s.data)
    }

    /// Contents of parity shard `i`.
    pub fn parity_shard(&self, i: usize) -> Option<&[u8]> {
        if i >= self.parity_shards {
            return None;
        }
        self.shard(self.data_shards + i).map(|s| s.data)
    }

    /// Shared views of the data shards and mutable views of the parity
    /// shards, in the layout erasure backends consume.
    pub fn buffers_mut(&mut self) -> (Vec<&[u8]>, Vec<&mut [u8]>) {
        let padded_data = self.data_shards - self.direct.len();
        let (padded, parity) = self.arena.split_regions_mut(padded_data);
        let mut data: Vec<&[u8]> = Vec::with_capacity(self.data_shards);
        data.extend(self.direct.iter().map(|b| &b[..]));
        data.extend(padded);
        (data, parity)
    }

    /// Copy every shard out as an owned buffer, in order.
    pub fn to_bytes(&self) -> Vec<Bytes> {
        self.iter().map(|s| Bytes::copy_from_slice(s.data)).collect()
    }
}
