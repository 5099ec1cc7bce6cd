//! Signature of knowledge binding a serial to a coin commitment.
//!
//! The serial group has order $p_{\text{coin}}$, so a commitment
//! $C' = g^{C_{\text{coin}}} h^{r'} \bmod P$ can carry the coin commitment
//! value in its exponent. With $(a, b)$ the coin group generators and
//! $C_{\text{coin}} = a^S b^r \bmod p_{\text{coin}}$, each round $i$ draws
//! $r_i$ and an expanded seed $v_i$ and commits
//!
//! $$c_i = g^{a^S b^{r_i} \bmod p_{\text{coin}}} h^{v_i} \bmod P$$
//!
//! The hash of the context, $C'$, $S$, the message hash and every $c_i$
//! yields one challenge bit per round:
//!
//! - bit 1: reveal $(r_i, \text{seed}_i)$, and the verifier recomputes $c_i$
//!   directly from $S$
//! - bit 0: reveal $(r_i - r, v_i - r' b^{r_i - r})$, and the verifier
//!   recomputes $c_i = C'^{b^{r_i - r}} h^{v_i - r' b^{r_i - r}}$
//!
//! Answering both branches requires knowing the opening of both
//! commitments. Round values may be computed independently, but the hash
//! absorbs them strictly in round order.

use alloc::vec::Vec;

use num_bigint::{BigInt, BigUint, Sign};
use num_traits::One as _;
use rand::{CryptoRng, RngCore};
use tracing::{debug, trace};

use crate::{
    coin::Coin,
    commitment::Commitment,
    error::{ConstructionFailure, VerificationFailure, ZerocoinError},
    params::ZerocoinContext,
    primitives::{Hash256, bignum, transcript::Transcript},
    seed::seed_bytes,
    wire::{Encoder, Reader},
};

/// Per-round responses and the challenge hash.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[expect(
    clippy::module_name_repetitions,
    reason = "serial number signature of knowledge is the established protocol name"
)]
pub struct SerialNumberSignatureOfKnowledge {
    s_notprime: Vec<BigInt>,
    sprime: Vec<BigInt>,
    hash: Hash256,
}

/// $g^{a^S b^{x} \bmod o} h^{v} \bmod P$, with $o$ the serial group order.
fn challenge_calculation(
    ctx: &ZerocoinContext,
    serial: &BigUint,
    exponent: &BigInt,
    blind: &BigInt,
) -> Option<BigUint> {
    let coin = ctx.coin_group();
    let group = ctx.serial_group();
    let order = group.order();
    let inner = coin.g().modpow(serial, order) * bignum::pow_mod(coin.h(), exponent, order)? % order;
    let blinding = bignum::pow_mod(group.h(), blind, group.modulus())?;
    Some(group.g().modpow(&inner, group.modulus()) * blinding % group.modulus())
}

/// Transcript over the context, commitment value, serial and message hash.
fn prefix(
    ctx: &ZerocoinContext,
    commitment: &BigUint,
    serial: &BigUint,
    msghash: &Hash256,
) -> Transcript {
    let mut transcript = Transcript::new();
    ctx.encode(&mut transcript);
    transcript.put_biguint(commitment);
    transcript.put_biguint(serial);
    transcript.put_hash(msghash);
    transcript
}

impl SerialNumberSignatureOfKnowledge {
    /// Sign `msghash`, proving that `serial_commitment` (in the serial
    /// group) commits to the commitment of `coin`.
    pub fn prove(
        ctx: &ZerocoinContext,
        coin: &Coin,
        serial_commitment: &Commitment,
        msghash: &Hash256,
        rng: &mut (impl RngCore + CryptoRng),
    ) -> Result<Self, ZerocoinError> {
        let iterations = ctx.zkp_iterations();
        let order = ctx.serial_group().order();
        let seed_bound = (BigUint::one() << 256u32) - 1u32;

        let mut randomness = Vec::with_capacity(iterations);
        let mut seeds = Vec::with_capacity(iterations);
        let mut expanded = Vec::with_capacity(iterations);
        for _ in 0..iterations {
            randomness.push(BigInt::from(bignum::random_below(rng, ctx.coin_group().order())));
            let (seed, value) = loop {
                let candidate = bignum::random_below(rng, &seed_bound);
                let expansion = ctx.expander().expand(&seed_bytes(&candidate));
                if expansion < *order {
                    break (candidate, expansion);
                }
            };
            seeds.push(BigInt::from(seed));
            expanded.push(BigInt::from(value));
        }

        let mut transcript = prefix(ctx, serial_commitment.value(), coin.serial(), msghash);
        for (r_i, v_i) in randomness.iter().zip(&expanded) {
            let round = challenge_calculation(ctx, coin.serial(), r_i, v_i)
                .ok_or(ConstructionFailure::NonInvertible)?;
            transcript.put_biguint(&round);
        }
        let hash = transcript.finalize();

        let coin_randomness = BigInt::from(coin.commitment().randomness().clone());
        let serial_randomness = BigInt::from(serial_commitment.randomness().clone());
        let mut s_notprime = Vec::with_capacity(iterations);
        let mut sprime = Vec::with_capacity(iterations);
        for (index, ((r_i, seed), v_i)) in randomness.into_iter().zip(seeds).zip(expanded).enumerate() {
            if hash.bit(index) {
                s_notprime.push(r_i);
                sprime.push(seed);
            } else {
                let shifted = r_i - &coin_randomness;
                let exponent = bignum::pow_mod(ctx.coin_group().h(), &shifted, order)
                    .ok_or(ConstructionFailure::NonInvertible)?;
                let unblinded = v_i - &serial_randomness * BigInt::from(exponent);
                s_notprime.push(shifted);
                sprime.push(unblinded);
            }
        }
        trace!(%hash, rounds = iterations, "serial proof challenge");

        Ok(Self {
            s_notprime,
            sprime,
            hash,
        })
    }

    /// Check the proof that `commitment` (in the serial group) commits to a
    /// coin with serial `serial`, signing `msghash`.
    pub fn verify(
        &self,
        ctx: &ZerocoinContext,
        serial: &BigUint,
        commitment: &BigUint,
        msghash: &Hash256,
    ) -> Result<(), VerificationFailure> {
        self.check(ctx, serial, commitment, msghash)
            .inspect_err(|failure| debug!(%failure, "serial proof rejected"))
    }

    fn check(
        &self,
        ctx: &ZerocoinContext,
        serial: &BigUint,
        commitment: &BigUint,
        msghash: &Hash256,
    ) -> Result<(), VerificationFailure> {
        let iterations = ctx.zkp_iterations();
        if self.s_notprime.len() != iterations || self.sprime.len() != iterations {
            return Err(VerificationFailure::SerialRoundCount);
        }
        let group = ctx.serial_group();
        let order = group.order();

        let mut transcript = prefix(ctx, commitment, serial, msghash);
        for (index, (s_notprime, sprime)) in self.s_notprime.iter().zip(&self.sprime).enumerate() {
            let round = if self.hash.bit(index) {
                if sprime.sign() == Sign::Minus {
                    return Err(VerificationFailure::SerialSeedRange);
                }
                let expanded = ctx.expander().expand(&seed_bytes(sprime.magnitude()));
                challenge_calculation(ctx, serial, s_notprime, &BigInt::from(expanded))
            } else {
                bignum::pow_mod(ctx.coin_group().h(), s_notprime, order).and_then(|exponent| {
                    let blinding = bignum::pow_mod(group.h(), sprime, group.modulus())?;
                    Some(commitment.modpow(&exponent, group.modulus()) * blinding % group.modulus())
                })
            }
            .ok_or(VerificationFailure::NonInvertible)?;
            transcript.put_biguint(&round);
        }

        if transcript.finalize() != self.hash {
            return Err(VerificationFailure::SerialChallengeMismatch);
        }
        Ok(())
    }

    /// The challenge hash selecting each round's branch.
    #[must_use]
    pub const fn hash(&self) -> &Hash256 {
        &self.hash
    }

    /// Number of rounds carried.
    #[must_use]
    pub fn rounds(&self) -> usize {
        self.s_notprime.len()
    }

    pub(crate) fn encode(&self, out: &mut impl Encoder) {
        out.put_bignums(&self.s_notprime);
        out.put_bignums(&self.sprime);
        out.put_hash(&self.hash);
    }

    pub(crate) fn decode(reader: &mut Reader<'_>) -> Result<Self, ZerocoinError> {
        Ok(Self {
            s_notprime: reader.read_bignums()?,
            sprime: reader.read_bignums()?,
            hash: reader.read_hash()?,
        })
    }

    /// Canonical encoding: both response lists, then the hash.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::new();
        self.encode(&mut out);
        out
    }

    /// Parse [`Self::to_bytes`] output, consuming every byte.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ZerocoinError> {
        let mut reader = Reader::new(bytes);
        let proof = Self::decode(&mut reader)?;
        reader.finish()?;
        Ok(proof)
    }
}
