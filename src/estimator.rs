//! LogLog-Beta cardinality estimator allows to estimate number of distinct elements
//! in the stream or dataset and is defined with const `P` parameter:
//! - `P`: precision parameter in [4..18] range, which defines
//!   number of hash bits to use for register indices (`M = 2^P` registers).
//!
//! # Data-structure design rationale
//!
//! ## Fixed memory footprint
//! Every sketch owns exactly `M` one-byte registers regardless of stream size,
//! e.g. 16 KiB for the default `P = 14`. Registers never resize.
//!
//! ## Accuracy
//! LogLog-Beta replaces HyperLogLog's small/large range corrections with a single
//! bias-correction polynomial `beta(ez)` of the number of empty registers `ez`:
//!
//! `E = alpha * M * (M - ez) / (beta(ez) + sum(2^-register))`
//!
//! Expected relative error:
//!   P = 10: 1.04 / sqrt(2^10) = 3.25%
//!   P = 12: 1.04 / sqrt(2^12) = 1.62%
//!   P = 14: 1.04 / sqrt(2^14) = 0.81%
//!   P = 18: 1.04 / sqrt(2^18) = 0.20%
//!
//! ## Composability
//! Merging two sketches takes the register-wise maximum, which is equivalent to
//! ingesting the concatenation of both streams. Both sketches must use the same
//! precision (enforced by the type) and the same hash function and seed (the
//! caller's responsibility when using `insert_hash`).
//!
//! Paper: https://arxiv.org/pdf/1612.02284.pdf

use std::fmt::{Debug, Formatter};
use std::hash::{Hash, Hasher};
use std::mem::size_of;

use wyhash::WyHash;

use crate::beta::{alpha, beta_horner};
use crate::registers::Registers;

/// Seed used for hashing inserted values. Sketches are only mergeable when
/// they were fed through the same hash function and seed.
pub const HASH_SEED: u64 = 1337;

/// LogLog-Beta sketch with `2^P` one-byte registers.
pub struct LogLogBeta<const P: usize = 14> {
    pub(crate) registers: Registers<P>,
    /// Bias correction constant, derived from `M` once at construction
    pub(crate) alpha: f64,
}

impl<const P: usize> LogLogBeta<P> {
    /// Ensure that `P` is in correct range at compile time
    const VALID_PARAMS: () = assert!(P >= 4 && P <= 18);
    /// Number of registers
    pub const M: usize = 1 << P;

    /// Creates new empty instance of `LogLogBeta`
    #[inline]
    pub fn new() -> Self {
        // compile time check of params
        _ = Self::VALID_PARAMS;

        Self {
            registers: Registers::new(),
            alpha: alpha(Self::M),
        }
    }

    /// Insert a byte value into `LogLogBeta`
    #[inline]
    pub fn insert(&mut self, value: &[u8]) {
        self.insert_hash(wyhash::wyhash(value, HASH_SEED));
    }

    /// Insert a hashable item into `LogLogBeta`.
    ///
    /// Uses `Hash` encoding of the item, so `insert_item(&[1u8, 2])` and
    /// `insert(&[1, 2])` land in different registers.
    #[inline]
    pub fn insert_item<T: Hash + ?Sized>(&mut self, item: &T) {
        let mut hasher = WyHash::with_seed(HASH_SEED);
        item.hash(&mut hasher);
        self.insert_hash(hasher.finish());
    }

    /// Insert precomputed 64-bit hash into `LogLogBeta`.
    ///
    /// Useful to hash once upstream and feed the same hash into several sketches.
    #[inline]
    pub fn insert_hash(&mut self, hash: u64) {
        let (idx, rank) = Registers::<P>::split_hash(hash);
        self.registers.update(idx, rank);
    }

    /// Return cardinality estimate, truncated towards zero.
    ///
    /// Estimates that exceed `u64::MAX` (only reachable with saturated
    /// registers) saturate at `u64::MAX`.
    #[inline]
    pub fn cardinality(&self) -> u64 {
        self.raw_estimate() as u64
    }

    /// Return cardinality estimate before truncation
    fn raw_estimate(&self) -> f64 {
        let (zeros, sum) = self.registers.zeros_and_sum();
        let m = Self::M as f64;
        let zeros = f64::from(zeros);
        self.alpha * m * (m - zeros) / (beta_horner(zeros, P) + sum)
    }

    /// Merge `rhs` into `self`, making `self` the union of both sketches.
    #[inline]
    pub fn merge(&mut self, rhs: &Self) {
        tracing::trace!(precision = P, "merging loglog-beta sketches");
        self.registers.merge(&rhs.registers);
    }

    /// Return register values
    #[inline]
    pub fn registers(&self) -> &[u8] {
        self.registers.as_slice()
    }

    /// Return bias correction constant
    #[inline]
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Return precision `P`
    #[inline]
    pub const fn precision(&self) -> usize {
        P
    }

    /// Return whether no value was inserted yet
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.registers().iter().all(|&r| r == 0)
    }

    /// Return memory size of `LogLogBeta`
    pub fn size_of(&self) -> usize {
        size_of::<Self>() + self.registers.size_of()
    }
}

impl<const P: usize> Default for LogLogBeta<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const P: usize> Clone for LogLogBeta<P> {
    fn clone(&self) -> Self {
        Self {
            registers: self.registers.clone(),
            alpha: self.alpha,
        }
    }
}

impl<const P: usize> PartialEq for LogLogBeta<P> {
    /// Compare registers and bit representation of alpha
    fn eq(&self, rhs: &Self) -> bool {
        self.alpha.to_bits() == rhs.alpha.to_bits() && self.registers == rhs.registers
    }
}

impl<const P: usize> Eq for LogLogBeta<P> {}

impl<const P: usize> Debug for LogLogBeta<P> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{{ estimate: {}, size: {} }}",
            self.cardinality(),
            self.size_of()
        )
    }
}
