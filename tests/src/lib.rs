//! Shared helpers for splinter integration tests.
//!
//! [`rebuild_data`] recovers lost data shards of a reference-encoded
//! [`ShardSet`] by inverting the Cauchy encoding matrix, which checks parity
//! the way a decoder would use it rather than by comparing bytes.

use splinter_engine::ShardSet;
use splinter_erasure::{Matrix, gf};

/// Generate deterministic, non-repeating test data.
pub fn test_data(size: usize) -> Vec<u8> {
    let mut data = Vec::with_capacity(size);
    let mut state: u32 = 0xDEAD_BEEF;
    for _ in 0..size {
        state = state.wrapping_mul(1103515245).wrapping_add(12345);
        data.push((state >> 16) as u8);
    }
    data
}

/// Concatenate the data shards of `set` and cut the padding off.
pub fn reassemble(set: &ShardSet) -> Vec<u8> {
    let mut out = Vec::with_capacity(set.data_shards() * set.shard_size());
    for i in 0..set.data_shards() {
        out.extend_from_slice(set.data_shard(i).unwrap());
    }
    out.truncate(set.consumed_len());
    out
}

/// Rebuild every data shard of a reference-encoded `set` using only the
/// shards whose indices are in `keep`.
///
/// `keep` must hold exactly `set.data_shards()` distinct indices.
pub fn rebuild_data(set: &ShardSet, keep: &[usize]) -> Vec<Vec<u8>> {
    let k = set.data_shards();
    assert_eq!(keep.len(), k, "need exactly k surviving shards");

    let decode = Matrix::cauchy_encoding(k, set.parity_shards())
        .select_rows(keep)
        .invert()
        .expect("cauchy rows are always invertible");

    let mut rebuilt = vec![vec![0u8; set.shard_size()]; k];
    for (row, out) in rebuilt.iter_mut().enumerate() {
        for (col, &index) in keep.iter().enumerate() {
            let shard = set.shard(index).unwrap();
            gf::mul_slice_xor(decode.get(row, col), shard.data, out);
        }
    }
    rebuilt
}
