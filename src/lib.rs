//! `loglogbeta` is a Rust crate designed to estimate the number of distinct elements in a stream or dataset
//! using a fixed amount of memory.
//!
//! This library implements the LogLog-Beta sketch: `2^P` one-byte registers (16 KiB for the default `P = 14`),
//! a single bias-correction polynomial for the whole cardinality range, lossless merges and a compact binary format.
mod beta;
pub mod codec;
pub mod estimator;
mod registers;
#[cfg(feature = "with_serde")]
mod serde;

pub use codec::{DecodeError, EncodeError, FORMAT_VERSION, HEADER_LEN};
pub use estimator::{LogLogBeta, HASH_SEED};
