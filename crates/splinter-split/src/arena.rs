//! Aligned shard arena.
//!
//! All padded shards of one request share a single zeroed allocation. The
//! allocation is carved into `count` regions placed `stride` bytes apart,
//! where `stride` is the region length rounded up to [`SHARD_ALIGNMENT`].
//! The first region starts on an aligned address, so every region does.

use splinter_types::{SHARD_ALIGNMENT, aligned_stride};
use tracing::trace;

use crate::error::SplitError;

/// Position of one region inside the arena's backing buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlignedRegion {
    /// Byte offset of the region inside the backing buffer.
    pub offset: usize,
    /// Logical length (the shard size).
    pub len: usize,
    /// Bytes a backend may write, `len` rounded up to the alignment.
    pub capacity: usize,
}

/// One backing allocation sliced into equally sized, aligned regions.
pub struct ShardArena {
    buf: Vec<u8>,
    /// Offset of the first aligned byte in `buf`.
    base: usize,
    count: usize,
    region_len: usize,
    stride: usize,
}

impl ShardArena {
    /// Allocate `count` zeroed regions of `region_len` bytes each.
    ///
    /// The backing buffer is `stride * count + 63` bytes: the slack is
    /// enough to find an aligned start wherever the allocator placed it.
    ///
    /// # Errors
    ///
    /// Returns [`SplitError::Allocation`] if the size overflows or the
    /// allocator cannot satisfy the request.
    pub fn allocate(count: usize, region_len: usize) -> Result<Self, SplitError> {
        let stride = aligned_stride(region_len);
        let total = stride
            .checked_mul(count)
            .and_then(|n| n.checked_add(SHARD_ALIGNMENT - 1))
            .ok_or(SplitError::Allocation { bytes: usize::MAX })?;

        let mut buf = Vec::new();
        buf.try_reserve_exact(total)
            .map_err(|_| SplitError::Allocation { bytes: total })?;
        buf.resize(total, 0);

        let base = match buf.as_ptr().align_offset(SHARD_ALIGNMENT) {
            offset if offset < SHARD_ALIGNMENT => offset,
            // No alignment information available, keep the allocator's.
            _ => 0,
        };

        trace!(count, region_len, stride, total, base, "allocated shard arena");

        Ok(Self {
            buf,
            base,
            count,
            region_len,
            stride,
        })
    }

    /// Number of regions.
    pub fn len(&self) -> usize {
        self.count
    }

    /// Whether the arena holds no regions.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Logical length of every region.
    pub fn region_len(&self) -> usize {
        self.region_len
    }

    /// Distance in bytes between the starts of consecutive regions.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Descriptor of region `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.len()`.
    pub fn bounds(&self, index: usize) -> AlignedRegion {
        assert!(
            index < self.count,
            "region {index} out of range ({} regions)",
            self.count
        );
        AlignedRegion {
            offset: self.base + index * self.stride,
            len: self.region_len,
            capacity: self.stride,
        }
    }

    /// Descriptors of all regions, in order.
    pub fn regions(&self) -> impl Iterator<Item = AlignedRegion> + '_ {
        (0..self.count).map(|i| self.bounds(i))
    }

    /// Logical contents of region `index`.
    pub fn region(&self, index: usize) -> &[u8] {
        let r = self.bounds(index);
        &self.buf[r.offset..r.offset + r.len]
    }

    /// Mutable logical contents of region `index`.
    pub fn region_mut(&mut self, index: usize) -> &mut [u8] {
        let r = self.bounds(index);
        &mut self.buf[r.offset..r.offset + r.len]
    }

    /// Region `index` including its alignment padding.
    ///
    /// Writes past `len` stay inside this region and never reach the next
    /// one; they are not part of the shard contents.
    pub fn region_capacity_mut(&mut self, index: usize) -> &mut [u8] {
        let r = self.bounds(index);
        &mut self.buf[r.offset..r.offset + r.capacity]
    }

    /// Split the regions into shared views of `0..at` and mutable views of
    /// `at..len`.
    ///
    /// # Panics
    ///
    /// Panics if `at > self.len()`.
    pub fn split_regions_mut(&mut self, at: usize) -> (Vec<&[u8]>, Vec<&mut [u8]>) {
        assert!(at <= self.count, "split point {at} past {} regions", self.count);
        let len = self.region_len;

        if self.stride == 0 {
            let head = (0..at).map(|_| &[][..]).collect();
            let tail = (at..self.count).map(|_| <&mut [u8]>::default()).collect();
            return (head, tail);
        }

        let end = self.base + self.count * self.stride;
        let (head, tail) = self.buf[..end].split_at_mut(self.base + at * self.stride);
        let head: &[u8] = head;

        let shared = head[self.base..]
            .chunks_exact(self.stride)
            .map(|region| &region[..len])
            .collect();
        let exclusive = tail
            .chunks_exact_mut(self.stride)
            .map(|region| &mut region[..len])
            .collect();
        (shared, exclusive)
    }
}

impl std::fmt::Debug for ShardArena {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShardArena")
            .field("count", &self.count)
            .field("region_len", &self.region_len)
            .field("stride", &self.stride)
            .field("base", &self.base)
            .finish()
    }
}
