//! The draw oracle abstraction (spec §5, §6, §9 "Oracle as coroutine").
//!
//! Purpose
//! - Every random choice this crate makes goes through a `DrawOracle`
//!   instead of a bare `rand::Rng`. That is the seam a real property-testing
//!   host (e.g. a `proptest`/`quickcheck` strategy) plugs into: same oracle
//!   replayed step-for-step produces the same output (spec §8 property 11),
//!   and an oracle may legitimately refuse a draw when its budget is spent
//!   (`ExhaustionSignal`), which the core propagates rather than retrying
//!   internally (spec §7).
//!
//! `StdRngOracle` is the one concrete implementation this crate ships,
//! wrapping `rand::rngs::StdRng`. It exists so this crate's own tests and
//! the `cli` demo have something to hand to the generators without
//! depending on an external test framework.

use crate::error::{GenError, GenResult};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Injected source of randomness, described purely in terms of the
/// sub-distributions spec §6 lists: `integer`, `choice`, `permutation`,
/// `list` (length only — element generation is left to the caller, which
/// then calls back into the oracle per element).
pub trait DrawOracle {
    /// Draw an integer in `[lo, hi]` inclusive.
    fn integer(&mut self, lo: i64, hi: i64) -> GenResult<i64>;

    /// Draw an index in `[0, len)`, used to pick among `len` alternatives.
    fn choice(&mut self, len: usize) -> GenResult<usize>;

    /// Draw a permutation of `0..len` as a `Vec<usize>`.
    fn permutation(&mut self, len: usize) -> GenResult<Vec<usize>>;

    /// Draw a length in `[min, max]` for a variable-size list.
    fn list_len(&mut self, min: usize, max: usize) -> GenResult<usize>;

    /// Draw a single uniform bit, used by the Valtr up/down assignment
    /// (spec §4.10).
    fn bit(&mut self) -> GenResult<bool> {
        Ok(self.integer(0, 1)? == 1)
    }
}

/// A `DrawOracle` backed by `rand::rngs::StdRng`. Never exhausts (an
/// in-process RNG has no budget to run out of); provided for this crate's
/// own tests/benches and for the `cli` demo, which have no host test
/// framework supplying a real oracle.
pub struct StdRngOracle {
    rng: StdRng,
}

impl StdRngOracle {
    pub fn seed_from_u64(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_rng(rng: StdRng) -> Self {
        Self { rng }
    }
}

impl DrawOracle for StdRngOracle {
    fn integer(&mut self, lo: i64, hi: i64) -> GenResult<i64> {
        if lo > hi {
            return Err(GenError::exhaustion(format!(
                "empty integer range [{lo}, {hi}]"
            )));
        }
        Ok(self.rng.gen_range(lo..=hi))
    }

    fn choice(&mut self, len: usize) -> GenResult<usize> {
        if len == 0 {
            return Err(GenError::exhaustion("choice over an empty sequence"));
        }
        Ok(self.rng.gen_range(0..len))
    }

    fn permutation(&mut self, len: usize) -> GenResult<Vec<usize>> {
        let mut indices: Vec<usize> = (0..len).collect();
        // Fisher-Yates, driven by this same oracle so replays stay
        // deterministic under a fixed seed.
        for i in (1..indices.len()).rev() {
            let j = self.rng.gen_range(0..=i);
            indices.swap(i, j);
        }
        Ok(indices)
    }

    fn list_len(&mut self, min: usize, max: usize) -> GenResult<usize> {
        if min > max {
            return Err(GenError::exhaustion(format!(
                "empty length range [{min}, {max}]"
            )));
        }
        Ok(self.rng.gen_range(min..=max))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_replays_identically() {
        let mut a = StdRngOracle::seed_from_u64(7);
        let mut b = StdRngOracle::seed_from_u64(7);
        for _ in 0..20 {
            assert_eq!(a.integer(0, 1000).unwrap(), b.integer(0, 1000).unwrap());
        }
    }

    #[test]
    fn permutation_is_a_bijection() {
        let mut o = StdRngOracle::seed_from_u64(1);
        let perm = o.permutation(6).unwrap();
        let mut sorted = perm.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, vec![0, 1, 2, 3, 4, 5]);
    }
}
