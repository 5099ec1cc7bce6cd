//! Proof that two commitments in different groups open to the same value.
//!
//! For $A = g_a^m h_a^x \bmod p_a$ and $B = g_b^m h_b^y \bmod p_b$ the
//! prover samples $r_1, r_2, r_3$ of $\ell$ bits, where
//! $\ell = 256 + 512 + \max(|p_a|, |p_b|, |q_a|, |q_b|)$, and commits
//!
//! $$T_1 = g_a^{r_1} h_a^{r_2} \bmod p_a \qquad T_2 = g_b^{r_1} h_b^{r_3} \bmod p_b$$
//!
//! With $c = H(A, B, T_1, T_2, \text{params})$ the responses are the plain
//! integers
//!
//! $$S_1 = r_1 + mc \qquad S_2 = r_2 + xc \qquad S_3 = r_3 + yc$$
//!
//! The verifier recomputes $T_1 = g_a^{S_1} h_a^{S_2} A^{-c}$ and
//! $T_2 = g_b^{S_1} h_b^{S_3} B^{-c}$ and checks the challenge.

use alloc::vec::Vec;

use num_bigint::{BigInt, BigUint, Sign};
use rand::{CryptoRng, RngCore};
use tracing::debug;

use crate::{
    commitment::Commitment,
    constants::{
        COMMITMENT_EQUALITY_CHALLENGE_SIZE, COMMITMENT_EQUALITY_SECMARGIN,
        COMMITMENT_EQUALITY_TAG, TRANSCRIPT_SEPARATOR,
    },
    error::{ConstructionFailure, VerificationFailure, ZerocoinError},
    params::GroupParams,
    primitives::{bignum, transcript::Transcript},
    wire::{Encoder, Reader},
};

/// The responses and challenge of an equality proof.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CommitmentProofOfKnowledge {
    s1: BigInt,
    s2: BigInt,
    s3: BigInt,
    challenge: BigInt,
}

/// Bit length $\ell$ of the blinding values.
fn random_size(group_a: &GroupParams, group_b: &GroupParams) -> u64 {
    let widest = [
        group_a.modulus().bits(),
        group_b.modulus().bits(),
        group_a.order().bits(),
        group_b.order().bits(),
    ]
    .into_iter()
    .max()
    .unwrap_or(0);
    COMMITMENT_EQUALITY_CHALLENGE_SIZE + COMMITMENT_EQUALITY_SECMARGIN + widest
}

fn challenge(
    group_a: &GroupParams,
    group_b: &GroupParams,
    a: &BigUint,
    b: &BigUint,
    t1: &BigUint,
    t2: &BigUint,
) -> BigUint {
    let mut transcript = Transcript::new();
    transcript.put_str(COMMITMENT_EQUALITY_TAG);
    transcript.put_biguint(t1);
    transcript.put_str(TRANSCRIPT_SEPARATOR);
    transcript.put_biguint(t2);
    transcript.put_str(TRANSCRIPT_SEPARATOR);
    transcript.put_biguint(a);
    transcript.put_str(TRANSCRIPT_SEPARATOR);
    transcript.put_biguint(b);
    transcript.put_str(TRANSCRIPT_SEPARATOR);
    group_a.encode(&mut transcript);
    transcript.put_str(TRANSCRIPT_SEPARATOR);
    group_b.encode(&mut transcript);
    transcript.finalize().to_uint()
}

/// $g^{s} h^{t} C^{-c} \bmod p$.
fn reconstruct(
    group: &GroupParams,
    commitment: &BigUint,
    challenge: &BigUint,
    s: &BigUint,
    t: &BigUint,
) -> Result<BigUint, VerificationFailure> {
    let modulus = group.modulus();
    let unblind = commitment
        .modpow(challenge, modulus)
        .modinv(modulus)
        .ok_or(VerificationFailure::NonInvertible)?;
    Ok(unblind * group.commit(s, t) % modulus)
}

impl CommitmentProofOfKnowledge {
    /// Prove that `a` (in `group_a`) and `b` (in `group_b`) share content.
    ///
    /// Refuses commitments with identical values.
    pub fn prove(
        group_a: &GroupParams,
        group_b: &GroupParams,
        a: &Commitment,
        b: &Commitment,
        rng: &mut (impl RngCore + CryptoRng),
    ) -> Result<Self, ZerocoinError> {
        if a.value() == b.value() {
            return Err(ConstructionFailure::EqualCommitmentValues.into());
        }

        let size = random_size(group_a, group_b);
        let r1 = bignum::random_bits(rng, size);
        let r2 = bignum::random_bits(rng, size);
        let r3 = bignum::random_bits(rng, size);

        let t1 = group_a.commit(&r1, &r2);
        let t2 = group_b.commit(&r1, &r3);
        let challenge = challenge(group_a, group_b, a.value(), b.value(), &t1, &t2);

        Ok(Self {
            s1: BigInt::from(r1 + a.content() * &challenge),
            s2: BigInt::from(r2 + a.randomness() * &challenge),
            s3: BigInt::from(r3 + b.randomness() * &challenge),
            challenge: BigInt::from(challenge),
        })
    }

    /// Check the proof against commitment values `a` and `b`.
    pub fn verify(
        &self,
        group_a: &GroupParams,
        group_b: &GroupParams,
        a: &BigUint,
        b: &BigUint,
    ) -> Result<(), VerificationFailure> {
        let max_bits = 64 * random_size(group_a, group_b);
        let responses = [&self.s1, &self.s2, &self.s3];
        if responses
            .iter()
            .any(|response| response.sign() == Sign::Minus || response.bits() > max_bits)
        {
            debug!(failure = %VerificationFailure::EqualityResponseRange, "equality proof rejected");
            return Err(VerificationFailure::EqualityResponseRange);
        }
        if self.challenge.sign() == Sign::Minus
            || self.challenge.bits() > COMMITMENT_EQUALITY_CHALLENGE_SIZE
        {
            debug!(failure = %VerificationFailure::EqualityChallengeRange, "equality proof rejected");
            return Err(VerificationFailure::EqualityChallengeRange);
        }

        let challenge_value = self.challenge.magnitude();
        let s1 = self.s1.magnitude();
        let t1 = reconstruct(group_a, a, challenge_value, s1, self.s2.magnitude())?;
        let t2 = reconstruct(group_b, b, challenge_value, s1, self.s3.magnitude())?;

        if challenge(group_a, group_b, a, b, &t1, &t2) != *challenge_value {
            debug!(failure = %VerificationFailure::EqualityChallengeMismatch, "equality proof rejected");
            return Err(VerificationFailure::EqualityChallengeMismatch);
        }
        Ok(())
    }

    /// The response $S_1$, binding the shared content.
    #[must_use]
    pub const fn s1(&self) -> &BigInt {
        &self.s1
    }

    /// The response $S_2$.
    #[must_use]
    pub const fn s2(&self) -> &BigInt {
        &self.s2
    }

    /// The response $S_3$.
    #[must_use]
    pub const fn s3(&self) -> &BigInt {
        &self.s3
    }

    /// The Fiat-Shamir challenge $c$.
    #[must_use]
    pub const fn challenge(&self) -> &BigInt {
        &self.challenge
    }

    pub(crate) fn encode(&self, out: &mut impl Encoder) {
        out.put_bignum(&self.s1);
        out.put_bignum(&self.s2);
        out.put_bignum(&self.s3);
        out.put_bignum(&self.challenge);
    }

    pub(crate) fn decode(reader: &mut Reader<'_>) -> Result<Self, ZerocoinError> {
        Ok(Self {
            s1: reader.read_bignum()?,
            s2: reader.read_bignum()?,
            s3: reader.read_bignum()?,
            challenge: reader.read_bignum()?,
        })
    }

    /// Canonical encoding: $S_1, S_2, S_3, c$.
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

#[cfg(test)]
mod tests {
    use num_traits::One as _;
    use rand::{SeedableRng as _, rngs::StdRng};

    use super::*;
    use crate::testing;

    fn commitments(rng: &mut StdRng) -> (GroupParams, GroupParams, Commitment, Commitment) {
        let ctx = testing::context();
        let serial_group = ctx.serial_group().clone();
        let pok_group = ctx.accumulator_params().pok_group().clone();
        let content = bignum::random_below(rng, ctx.coin_group().modulus());
        let a = Commitment::new(content.clone(), &serial_group, rng);
        let b = Commitment::new(content, &pok_group, rng);
        (serial_group, pok_group, a, b)
    }

    /// Honest proofs verify across many independent trials.
    #[test]
    fn honest_proofs_verify() {
        let mut rng = StdRng::seed_from_u64(0);
        let ctx = testing::context();
        let serial_group = ctx.serial_group();
        let pok_group = ctx.accumulator_params().pok_group();
        for _ in 0u8..100 {
            let content = bignum::random_below(&mut rng, ctx.coin_group().modulus());
            let a = Commitment::new(content.clone(), serial_group, &mut rng);
            let b = Commitment::new(content, pok_group, &mut rng);
            let proof =
                CommitmentProofOfKnowledge::prove(serial_group, pok_group, &a, &b, &mut rng)
                    .unwrap();
            proof
                .verify(serial_group, pok_group, a.value(), b.value())
                .unwrap();
        }
    }

    /// Flipping one bit of either commitment value breaks the proof.
    #[test]
    fn corrupted_commitment_rejected() {
        let mut rng = StdRng::seed_from_u64(1);
        let (group_a, group_b, a, b) = commitments(&mut rng);
        let proof = CommitmentProofOfKnowledge::prove(&group_a, &group_b, &a, &b, &mut rng).unwrap();

        let flipped_a = a.value() ^ BigUint::one();
        let flipped_b = b.value() ^ (BigUint::one() << 17u32);
        assert!(proof.verify(&group_a, &group_b, &flipped_a, b.value()).is_err());
        assert!(proof.verify(&group_a, &group_b, a.value(), &flipped_b).is_err());
    }

    /// Commitments to different contents cannot be proven equal.
    #[test]
    fn different_contents_rejected() {
        let mut rng = StdRng::seed_from_u64(2);
        let (group_a, group_b, a, _b) = commitments(&mut rng);
        let other = Commitment::new(a.content() + 1u32, &group_b, &mut rng);
        let proof =
            CommitmentProofOfKnowledge::prove(&group_a, &group_b, &a, &other, &mut rng).unwrap();
        assert_eq!(
            proof.verify(&group_a, &group_b, a.value(), other.value()),
            Err(VerificationFailure::EqualityChallengeMismatch)
        );
    }

    #[test]
    fn identical_values_refused() {
        let mut rng = StdRng::seed_from_u64(3);
        let (group_a, _group_b, a, _b) = commitments(&mut rng);
        assert_eq!(
            CommitmentProofOfKnowledge::prove(&group_a, &group_a, &a, &a, &mut rng),
            Err(ZerocoinError::ProofConstruction(
                ConstructionFailure::EqualCommitmentValues
            ))
        );
    }

    /// Negative or oversized fields fail the range checks.
    #[test]
    fn range_checks() {
        let mut rng = StdRng::seed_from_u64(4);
        let (group_a, group_b, a, b) = commitments(&mut rng);
        let proof = CommitmentProofOfKnowledge::prove(&group_a, &group_b, &a, &b, &mut rng).unwrap();

        let mut negative = proof.clone();
        negative.s2 = -negative.s2;
        assert_eq!(
            negative.verify(&group_a, &group_b, a.value(), b.value()),
            Err(VerificationFailure::EqualityResponseRange)
        );

        let mut wide = proof.clone();
        wide.challenge = BigInt::one() << 256u32;
        assert_eq!(
            wide.verify(&group_a, &group_b, a.value(), b.value()),
            Err(VerificationFailure::EqualityChallengeRange)
        );
    }

    #[test]
    fn wire_round_trip() {
        let mut rng = StdRng::seed_from_u64(5);
        let (group_a, group_b, a, b) = commitments(&mut rng);
        let proof = CommitmentProofOfKnowledge::prove(&group_a, &group_b, &a, &b, &mut rng).unwrap();
        let bytes = proof.to_bytes();
        let parsed = CommitmentProofOfKnowledge::from_bytes(&bytes).unwrap();
        assert_eq!(parsed.to_bytes(), bytes);
        parsed
            .verify(&group_a, &group_b, a.value(), b.value())
            .unwrap();
    }
}
