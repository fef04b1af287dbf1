//! Pluggable erasure coding for splinter.
//!
//! This crate provides:
//! - [`ErasureBackend`]: the capability every parity encoder implements.
//! - [`ReferenceBackend`]: Cauchy-matrix Reed-Solomon over GF(2^8) in pure
//!   Rust, parallelized with rayon.
//! - [`NativeBackend`]: SIMD-accelerated Reed-Solomon via
//!   `reed-solomon-simd`, with one-time engine initialization.
//! - [`open_backend`]: opens the backend selected by a [`BackendKind`].
//!
//! The two backends use different code constructions. Their parity is not
//! interchangeable, so shards must be decoded with the backend family that
//! produced them.

mod backend;
mod error;
pub mod gf;
mod matrix;
mod native;
mod reference;

pub use backend::{ErasureBackend, open_backend};
pub use error::ErasureError;
pub use matrix::Matrix;
pub use native::NativeBackend;
pub use reference::ReferenceBackend;
pub use splinter_types::BackendKind;
