//! Reference Reed-Solomon backend: Cauchy matrix over GF(2^8).
//!
//! Parity shard `j` is `sum_c M[k + j][c] * data[c]` byte by byte, where `M`
//! is [`Matrix::cauchy_encoding`]. Each output byte depends only on the
//! bytes at the same offset in the data shards, so large shards are cut
//! into byte ranges and encoded on the rayon pool.

use rayon::prelude::*;
use splinter_types::{BackendKind, SHARD_ALIGNMENT, validate_shard_counts};
use tracing::debug;

use crate::backend::{ErasureBackend, check_layout};
use crate::error::ErasureError;
use crate::gf;
use crate::matrix::Matrix;

/// Bytes per worker below which splitting is not worth the join.
const MIN_SPLIT_BYTES: usize = 16 * 1024;

/// Pure Rust Cauchy Reed-Solomon encoder.
pub struct ReferenceBackend {
    data_shards: usize,
    parity_shards: usize,
    matrix: Matrix,
}

impl ReferenceBackend {
    /// Build the encoding matrix for `data_shards` + `parity_shards`.
    pub fn new(data_shards: usize, parity_shards: usize) -> Result<Self, ErasureError> {
        validate_shard_counts(data_shards, parity_shards)?;
        let matrix = Matrix::cauchy_encoding(data_shards, parity_shards);
        debug!(k = data_shards, m = parity_shards, "built cauchy encoding matrix");
        Ok(Self {
            data_shards,
            parity_shards,
            matrix,
        })
    }

    /// The full `(k + m) x k` encoding matrix.
    pub fn matrix(&self) -> &Matrix {
        &self.matrix
    }

    fn parity_row(&self, j: usize) -> &[u8] {
        self.matrix.row(self.data_shards + j)
    }

    /// Encode bytes `start..start + outputs[_].len()` of every parity shard.
    fn encode_range(&self, data: &[&[u8]], start: usize, outputs: &mut [&mut [u8]]) {
        for (j, out) in outputs.iter_mut().enumerate() {
            let row = self.parity_row(j);
            let end = start + out.len();
            gf::mul_slice(row[0], &data[0][start..end], out);
            for (c, shard) in data.iter().enumerate().skip(1) {
                gf::mul_slice_xor(row[c], &shard[start..end], out);
            }
        }
    }
}

/// How many workers to spread a shard of `len` bytes over.
fn worker_count(len: usize) -> usize {
    (len / MIN_SPLIT_BYTES).clamp(1, rayon::current_num_threads())
}

impl ErasureBackend for ReferenceBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Reference
    }

    fn data_shards(&self) -> usize {
        self.data_shards
    }

    fn parity_shards(&self) -> usize {
        self.parity_shards
    }

    fn encode(&self, data: &[&[u8]], parity: &mut [&mut [u8]]) -> Result<(), ErasureError> {
        let len = check_layout(self, data, parity)?;
        if len == 0 || parity.is_empty() {
            return Ok(());
        }

        let workers = worker_count(len);
        if workers == 1 {
            self.encode_range(data, 0, parity);
            return Ok(());
        }

        // Aligned spans keep each worker on its own cache lines.
        let span = len.div_ceil(workers).next_multiple_of(SHARD_ALIGNMENT);
        let mut jobs: Vec<Vec<&mut [u8]>> = (0..len.div_ceil(span))
            .map(|_| Vec::with_capacity(parity.len()))
            .collect();
        for out in parity.iter_mut() {
            for (job, piece) in jobs.iter_mut().zip(out.chunks_mut(span)) {
                job.push(piece);
            }
        }

        debug!(len, workers, span, "encoding parity in parallel");
        jobs.into_par_iter()
            .enumerate()
            .for_each(|(i, mut outputs)| self.encode_range(data, i * span, &mut outputs));
        Ok(())
    }
}
