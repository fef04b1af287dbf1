//! Shared types and limits for splinter.
//!
//! This crate defines the request that drives one encode operation
//! ([`EncodeRequest`]), the backend selector ([`BackendKind`]), the shard
//! size policy ([`ShardSizePolicy`]) and the validation error
//! ([`InvalidConfig`]) every other crate reports configuration problems with.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Limits
// ---------------------------------------------------------------------------

/// Maximum number of shards (data + parity) in one shard set.
///
/// Shard indices are a single byte, which is also the size of the field
/// the erasure codes work over.
pub const MAX_TOTAL_SHARDS: usize = 256;

/// Alignment, in bytes, of every padded shard region.
pub const SHARD_ALIGNMENT: usize = 64;

/// Round a shard size up to the next multiple of [`SHARD_ALIGNMENT`].
pub fn aligned_stride(shard_size: usize) -> usize {
    shard_size.div_ceil(SHARD_ALIGNMENT) * SHARD_ALIGNMENT
}

/// Check a data/parity shard count pair.
///
/// At least one data shard is required and the total may not exceed
/// [`MAX_TOTAL_SHARDS`]. Zero parity shards is allowed.
pub fn validate_shard_counts(data_shards: usize, parity_shards: usize) -> Result<(), InvalidConfig> {
    if data_shards == 0 {
        return Err(InvalidConfig::NoDataShards);
    }
    let total = data_shards.saturating_add(parity_shards);
    if total > MAX_TOTAL_SHARDS {
        return Err(InvalidConfig::TooManyShards { total });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Backend selector
// ---------------------------------------------------------------------------

/// Which erasure coding backend computes parity.
///
/// The two backends use different code constructions. Shards produced by
/// one can only be reconstructed with the matching decoder, so a deployment
/// should pick one and keep it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Pure Rust Cauchy-matrix Reed-Solomon over GF(2^8).
    #[default]
    Reference,
    /// SIMD-accelerated Reed-Solomon (`reed-solomon-simd`).
    Native,
}

impl BackendKind {
    /// Stable lowercase name, as used in config files and on the CLI.
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendKind::Reference => "reference",
            BackendKind::Native => "native",
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BackendKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reference" | "ref" => Ok(BackendKind::Reference),
            "native" | "simd" => Ok(BackendKind::Native),
            other => Err(format!(
                "unknown backend {other:?} (expected \"reference\" or \"native\")"
            )),
        }
    }
}

// ---------------------------------------------------------------------------
// Shard size policy
// ---------------------------------------------------------------------------

/// What to do when the requested shard size is larger than the input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ShardSizePolicy {
    /// Shrink the effective shard size to the input length, so a small input
    /// becomes a single full data shard.
    #[default]
    ShrinkToInput,
    /// Reject the request with [`InvalidConfig::ShardLargerThanInput`].
    Strict,
}

// ---------------------------------------------------------------------------
// Encode request
// ---------------------------------------------------------------------------

/// Parameters of one encode operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodeRequest {
    /// Number of data shards (`>= 1`).
    pub data_shards: usize,
    /// Number of parity shards (`data_shards + parity_shards <= 256`).
    pub parity_shards: usize,
    /// Requested logical shard size in bytes (`> 0`).
    pub shard_size: usize,
    /// Backend that computes parity.
    #[serde(default)]
    pub backend: BackendKind,
    /// Behaviour when `shard_size` exceeds the input length.
    #[serde(default)]
    pub size_policy: ShardSizePolicy,
}

impl EncodeRequest {
    /// Create a request with the default backend and size policy.
    pub fn new(data_shards: usize, parity_shards: usize, shard_size: usize) -> Self {
        Self {
            data_shards,
            parity_shards,
            shard_size,
            backend: BackendKind::default(),
            size_policy: ShardSizePolicy::default(),
        }
    }

    /// Select the backend.
    pub fn with_backend(mut self, backend: BackendKind) -> Self {
        self.backend = backend;
        self
    }

    /// Select the shard size policy.
    pub fn with_size_policy(mut self, size_policy: ShardSizePolicy) -> Self {
        self.size_policy = size_policy;
        self
    }

    /// Total number of shards the request produces.
    pub fn total_shards(&self) -> usize {
        self.data_shards + self.parity_shards
    }

    /// Validate shard counts and shard size.
    pub fn validate(&self) -> Result<(), InvalidConfig> {
        validate_shard_counts(self.data_shards, self.parity_shards)?;
        if self.shard_size == 0 {
            return Err(InvalidConfig::ZeroShardSize);
        }
        Ok(())
    }

    /// Shard size actually used for an input of `input_len` bytes.
    ///
    /// Under [`ShardSizePolicy::ShrinkToInput`] this is
    /// `min(input_len, shard_size)`; under [`ShardSizePolicy::Strict`] a
    /// shard size larger than the input is an error.
    pub fn effective_shard_size(&self, input_len: usize) -> Result<usize, InvalidConfig> {
        match self.size_policy {
            ShardSizePolicy::ShrinkToInput => Ok(input_len.min(self.shard_size)),
            ShardSizePolicy::Strict if self.shard_size > input_len => {
                Err(InvalidConfig::ShardLargerThanInput {
                    requested: self.shard_size,
                    input_len,
                })
            }
            ShardSizePolicy::Strict => Ok(self.shard_size),
        }
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// A request that cannot be encoded.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidConfig {
    /// Zero data shards were requested.
    #[error("data shard count must be at least 1")]
    NoDataShards,

    /// More than 256 shards in total.
    #[error("sum of data and parity shards cannot exceed 256, got {total}")]
    TooManyShards {
        /// Requested data + parity shards.
        total: usize,
    },

    /// The requested shard size was zero.
    #[error("shard size must be greater than 0")]
    ZeroShardSize,

    /// Strict policy and the shard size is larger than the whole input.
    #[error("shard size {requested} exceeds input length {input_len}")]
    ShardLargerThanInput {
        /// Requested shard size.
        requested: usize,
        /// Length of the input.
        input_len: usize,
    },
}
