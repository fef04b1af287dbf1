//! Native SIMD backend built on `reed-solomon-simd`.
//!
//! The engine picks its kernel (AVX2, SSSE3, NEON or scalar) at runtime and
//! builds shared lookup tables the first time it is used; [`NativeBackend::new`]
//! forces that to happen once per process, up front.
//!
//! The engine works on 16-bit symbols and only takes even shard lengths. For
//! an odd length `n`, bytes `0..n-1` are encoded by the engine and the last
//! byte of every parity shard is the Cauchy GF(2^8) combination of the last
//! data bytes, as in the reference backend. Both parts are MDS, so any `k`
//! shards still recover the data.
//!
//! This is not the Cauchy construction of the reference backend: parity
//! from the two backends is not interchangeable.

use std::sync::{Mutex, OnceLock};

use reed_solomon_simd::ReedSolomonEncoder;
use splinter_types::{BackendKind, validate_shard_counts};
use tracing::debug;

use crate::backend::{ErasureBackend, check_layout};
use crate::error::ErasureError;
use crate::gf;
use crate::matrix::Matrix;

/// Outcome of the one-time engine warm-up.
static ENGINE_INIT: OnceLock<Result<(), String>> = OnceLock::new();

/// Run the engine once so CPU detection and table setup are done before
/// the first real encode, and report whether it works at all.
fn init_engine() -> Result<(), ErasureError> {
    ENGINE_INIT
        .get_or_init(|| {
            let mut probe = ReedSolomonEncoder::new(1, 1, 64).map_err(|e| e.to_string())?;
            probe.add_original_shard([0u8; 64]).map_err(|e| e.to_string())?;
            probe.encode().map_err(|e| e.to_string())?;
            debug!("native erasure engine initialized");
            Ok(())
        })
        .clone()
        .map_err(|reason| ErasureError::BackendInit {
            backend: BackendKind::Native,
            reason,
        })
}

/// SIMD-accelerated Reed-Solomon encoder.
///
/// The encoder session is acquired in [`new`](Self::new) and released when
/// the backend is dropped, which drops the `ReedSolomonEncoder` and its
/// work buffers. Concurrent `encode` calls on one backend are serialized on
/// the session.
pub struct NativeBackend {
    data_shards: usize,
    parity_shards: usize,
    /// `None` when there are no parity shards to compute.
    session: Mutex<Option<ReedSolomonEncoder>>,
    /// Encodes the trailing byte of odd-length shards.
    tail: Matrix,
}

impl NativeBackend {
    /// Initialize the engine (once per process) and acquire an encoder
    /// session for `data_shards` + `parity_shards`.
    pub fn new(data_shards: usize, parity_shards: usize) -> Result<Self, ErasureError> {
        validate_shard_counts(data_shards, parity_shards)?;
        init_engine()?;

        let session = if parity_shards == 0 {
            None
        } else {
            // Placeholder shard size; reset to the real one on each encode.
            let encoder = ReedSolomonEncoder::new(data_shards, parity_shards, 2).map_err(|e| {
                ErasureError::BackendInit {
                    backend: BackendKind::Native,
                    reason: e.to_string(),
                }
            })?;
            Some(encoder)
        };
        debug!(k = data_shards, m = parity_shards, "acquired native encoder session");

        Ok(Self {
            data_shards,
            parity_shards,
            session: Mutex::new(session),
            tail: Matrix::cauchy_encoding(data_shards, parity_shards),
        })
    }

    fn encode_failed(reason: impl ToString) -> ErasureError {
        ErasureError::Encode {
            backend: BackendKind::Native,
            reason: reason.to_string(),
        }
    }

    /// Fill bytes `0..len` of every parity shard with the engine. `len` is
    /// even and non-zero.
    fn encode_symbols(
        &self,
        data: &[&[u8]],
        parity: &mut [&mut [u8]],
        len: usize,
    ) -> Result<(), ErasureError> {
        let mut session = self
            .session
            .lock()
            .map_err(|_| Self::encode_failed("encoder session lock poisoned"))?;
        let encoder = session
            .as_mut()
            .ok_or_else(|| Self::encode_failed("no encoder session"))?;

        encoder
            .reset(self.data_shards, self.parity_shards, len)
            .map_err(Self::encode_failed)?;
        for shard in data {
            encoder.add_original_shard(&shard[..len]).map_err(Self::encode_failed)?;
        }
        let result = encoder.encode().map_err(Self::encode_failed)?;

        for (out, recovery) in parity.iter_mut().zip(result.recovery_iter()) {
            out[..len].copy_from_slice(recovery);
        }
        Ok(())
    }

    /// Fill byte `at` of every parity shard with its Cauchy combination.
    fn encode_tail_byte(&self, data: &[&[u8]], parity: &mut [&mut [u8]], at: usize) {
        for (j, out) in parity.iter_mut().enumerate() {
            let row = self.tail.row(self.data_shards + j);
            out[at] = data
                .iter()
                .zip(row)
                .fold(0, |acc, (shard, &coef)| acc ^ gf::mul(coef, shard[at]));
        }
    }
}

impl ErasureBackend for NativeBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Native
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

        let even = len & !1;
        if even > 0 {
            self.encode_symbols(data, parity, even)?;
        }
        if even < len {
            self.encode_tail_byte(data, parity, even);
        }
        Ok(())
    }
}
