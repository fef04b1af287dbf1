//! Shard partitioning for splinter.
//!
//! This crate provides:
//! - [`ShardArena`]: one zeroed backing allocation sliced into fixed-stride,
//!   64-byte aligned regions.
//! - [`ShardSplitter`]: cuts an input into `k` equally sized data shards
//!   and reserves `m` zeroed parity shards.
//! - [`ShardSet`]: the ordered result, data shards first.
//!
//! Full data shards are zero-copy slices of the input; every shard that
//! needs padding, and every parity shard, lives in the arena.

mod arena;
mod error;
mod set;
mod splitter;

pub use arena::{AlignedRegion, ShardArena};
pub use error::SplitError;
pub use set::{ShardKind, ShardRef, ShardSet};
pub use splitter::ShardSplitter;
