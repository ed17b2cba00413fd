//! ## Register array
//! Fixed-length array of `M = 2^P` one-byte registers. Each register holds the
//! maximum rank observed among all hashes routed to it, so values only ever grow.
//!
//! Hash layout (`P` = precision):
//! - bits 63..(64 - P)   - register index
//! - bits (63 - P)..0    - suffix whose leading zero run (plus one) is the rank
//!
//! Rank is computed on `(hash << P) ^ (u64::MAX >> (64 - P))`: the low `P` bits
//! are forced to one, so the leading zero count stops at `64 - P` even for an
//! all-zero suffix and the rank stays within `[1, 64 - P + 1]`.

use std::mem::size_of_val;

#[derive(Clone, PartialEq, Eq)]
pub(crate) struct Registers<const P: usize> {
    data: Box<[u8]>,
}

impl<const P: usize> Registers<P> {
    /// Number of registers
    pub(crate) const M: usize = 1 << P;
    /// Largest rank a register can hold
    pub(crate) const MAX_RANK: u8 = (64 - P + 1) as u8;
    /// Mask with the low `P` bits set, applied after shifting out the index bits
    const SUFFIX_GUARD: u64 = u64::MAX >> (64 - P);

    /// Create register array with all registers set to zero
    #[inline]
    pub(crate) fn new() -> Self {
        Self {
            data: vec![0u8; Self::M].into_boxed_slice(),
        }
    }

    /// Create register array from raw register values.
    /// Caller must ensure `data` holds exactly `M` registers.
    #[inline]
    pub(crate) fn from_boxed(data: Box<[u8]>) -> Self {
        debug_assert_eq!(data.len(), Self::M);
        Self { data }
    }

    /// Split 64-bit hash into register index and rank
    #[inline]
    pub(crate) fn split_hash(hash: u64) -> (usize, u8) {
        let idx = (hash >> (64 - P)) as usize;
        let rank = ((hash << P) ^ Self::SUFFIX_GUARD).leading_zeros() + 1;
        (idx, rank as u8)
    }

    /// Raise register `idx` to `rank` if it is currently lower
    #[inline]
    pub(crate) fn update(&mut self, idx: usize, rank: u8) {
        let reg = &mut self.data[idx];
        if *reg < rank {
            *reg = rank;
        }
    }

    /// Merge two register arrays by taking register-wise maximum.
    #[inline]
    pub(crate) fn merge(&mut self, rhs: &Registers<P>) {
        // equal lengths let the compiler drop bounds checks and vectorize
        for (l, &r) in self.data.iter_mut().zip(rhs.data.iter()) {
            *l = (*l).max(r);
        }
    }

    /// Return number of zero registers and harmonic sum of `2^-rank` over all registers
    #[inline]
    pub(crate) fn zeros_and_sum(&self) -> (u32, f64) {
        self.data.iter().fold((0u32, 0.0f64), |(zeros, sum), &rank| {
            (
                zeros + u32::from(rank == 0),
                sum + 1.0 / ((1u64 << rank) as f64),
            )
        })
    }

    /// Return raw register values
    #[inline]
    pub(crate) fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Return memory size of registers' heap allocation
    #[inline]
    pub(crate) fn size_of(&self) -> usize {
        size_of_val(&*self.data)
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use test_case::test_case;

    type Regs = Registers<14>;

    #[test_case(0 => (0, 51); "all zero hash")]
    #[test_case(u64::MAX => ((1 << 14) - 1, 1); "all ones hash")]
    #[test_case(1 => (0, 50); "lowest bit set")]
    #[test_case(1 << 49 => (0, 1); "highest suffix bit set")]
    #[test_case(1 << 48 => (0, 2); "second suffix bit set")]
    #[test_case(1 << 50 => (1, 51); "lowest index bit set")]
    #[test_case(0x8000_0000_0000_0000 => (1 << 13, 51); "highest index bit set")]
    #[test_case(0xFFFC_0000_0000_0001 => ((1 << 14) - 1, 50); "full index with last suffix bit")]
    fn test_split_hash(hash: u64) -> (usize, u8) {
        Regs::split_hash(hash)
    }

    #[test]
    fn test_rank_bounds() {
        assert_eq!(Regs::MAX_RANK, 51);
        assert_eq!(Registers::<4>::MAX_RANK, 61);
        assert_eq!(Registers::<18>::MAX_RANK, 47);
        let mut hash = 0x9E37_79B9_7F4A_7C15u64;
        for _ in 0..10_000 {
            hash = hash.rotate_left(7).wrapping_mul(0x2545_F491_4F6C_DD1D);
            let (idx, rank) = Regs::split_hash(hash);
            assert!(idx < Regs::M);
            assert!((1..=Regs::MAX_RANK).contains(&rank));
        }
    }

    #[test]
    fn test_update_is_monotonic() {
        let mut regs = Regs::new();
        regs.update(7, 5);
        assert_eq!(regs.as_slice()[7], 5);
        regs.update(7, 3);
        assert_eq!(regs.as_slice()[7], 5);
        regs.update(7, 9);
        assert_eq!(regs.as_slice()[7], 9);
        assert_eq!(regs.as_slice().iter().filter(|&&r| r != 0).count(), 1);
    }

    #[test]
    fn test_merge_takes_max() {
        let mut lhs = Regs::new();
        let mut rhs = Regs::new();
        lhs.update(0, 4);
        lhs.update(1, 1);
        rhs.update(1, 6);
        rhs.update(2, 2);

        lhs.merge(&rhs);

        assert_eq!(&lhs.as_slice()[..4], &[4, 6, 2, 0]);
    }

    #[test]
    fn test_zeros_and_sum() {
        let mut regs = Regs::new();
        assert_eq!(regs.zeros_and_sum(), (Regs::M as u32, Regs::M as f64));

        regs.update(0, 1);
        regs.update(1, 2);
        let (zeros, sum) = regs.zeros_and_sum();
        assert_eq!(zeros, Regs::M as u32 - 2);
        assert_eq!(sum, (Regs::M - 2) as f64 + 0.5 + 0.25);
    }

    #[test]
    fn test_size_of() {
        assert_eq!(Regs::new().size_of(), 16384);
        assert_eq!(Registers::<4>::new().size_of(), 16);
    }
}
