//! Probabilistic primality testing.
//!
//! Trial division by the primes below 256, then Miller-Rabin rounds.
//!
//! [`is_probable_prime`] derives round bases from SHA-256 of the candidate
//! and the round index, so a verdict is reproducible for a given candidate
//! and round count. Anyone can compute those bases offline, so a composite
//! that passes them can be found ahead of time. Values arriving from other
//! parties are therefore tested with [`is_probable_prime_with`], which draws
//! fresh bases from the caller's rng.

use alloc::vec::Vec;

use num_bigint::BigUint;
use num_traits::{One as _, Zero as _};
use rand::{CryptoRng, RngCore};
use sha2::{Digest as _, Sha256};

use crate::primitives::bignum;

const SMALL_PRIMES: [u32; 54] = [
    2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67, 71, 73, 79, 83, 89,
    97, 101, 103, 107, 109, 113, 127, 131, 137, 139, 149, 151, 157, 163, 167, 173, 179, 181, 191,
    193, 197, 199, 211, 223, 227, 229, 233, 239, 241, 251,
];

/// Whether `candidate` is prime, with error probability at most
/// $4^{-\text{rounds}}$ for candidates not chosen against the fixed bases.
pub(crate) fn is_probable_prime(candidate: &BigUint, rounds: usize) -> bool {
    MillerRabin::new(candidate).is_some_and(|test| {
        (0u64..)
            .take(rounds)
            .all(|round| test.passes(&round_base(candidate, round, &test.span)))
    })
}

/// Whether `candidate` is prime, with bases drawn from `rng`. The error
/// probability is at most $4^{-\text{rounds}}$ for any candidate.
pub(crate) fn is_probable_prime_with(
    candidate: &BigUint,
    rounds: usize,
    rng: &mut (impl RngCore + CryptoRng),
) -> bool {
    MillerRabin::new(candidate).is_some_and(|test| {
        (0..rounds).all(|_| test.passes(&(bignum::random_below(rng, &test.span) + 2u32)))
    })
}

/// Decomposition `candidate - 1 = odd * 2^twos` of a candidate that survived
/// trial division.
struct MillerRabin<'num> {
    candidate: &'num BigUint,
    minus_one: BigUint,
    odd: BigUint,
    twos: u64,
    /// Bases are drawn from `[2, candidate - 2]`, i.e. `2 + [0, span)`.
    span: BigUint,
}

impl<'num> MillerRabin<'num> {
    /// `None` when trial division already decides: composite, or below 2.
    /// Small primes short-circuit to a test with no rounds to fail.
    fn new(candidate: &'num BigUint) -> Option<Self> {
        if *candidate < BigUint::from(2u32) {
            return None;
        }
        for &small in &SMALL_PRIMES {
            if *candidate == BigUint::from(small) {
                return Some(Self::trivial(candidate));
            }
            if (candidate % small).is_zero() {
                return None;
            }
        }

        let minus_one = candidate - 1u32;
        let twos = minus_one.trailing_zeros().unwrap_or(0);
        let odd = &minus_one >> twos;
        // candidate > 251, so the span is non-empty
        let span = candidate - 3u32;
        Some(Self {
            candidate,
            minus_one,
            odd,
            twos,
            span,
        })
    }

    /// A known small prime: every round passes.
    fn trivial(candidate: &'num BigUint) -> Self {
        Self {
            candidate,
            minus_one: BigUint::ZERO,
            odd: BigUint::ZERO,
            twos: 0,
            span: BigUint::one(),
        }
    }

    fn passes(&self, base: &BigUint) -> bool {
        if self.odd.is_zero() {
            return true;
        }
        let mut power = base.modpow(&self.odd, self.candidate);
        if power.is_one() || power == self.minus_one {
            return true;
        }
        for _ in 1..self.twos {
            power = &power * &power % self.candidate;
            if power == self.minus_one {
                return true;
            }
        }
        false
    }
}

fn round_base(candidate: &BigUint, round: u64, span: &BigUint) -> BigUint {
    let blocks = span.bits().div_ceil(256).saturating_add(1);
    let mut bytes = Vec::new();
    for block in 0..blocks {
        bytes.extend(
            Sha256::new()
                .chain_update(candidate.to_bytes_le())
                .chain_update(round.to_le_bytes())
                .chain_update(block.to_le_bytes())
                .finalize(),
        );
    }
    BigUint::from_bytes_le(&bytes) % span + 2u32
}
