//! Proof that a committed value is accumulated.
//!
//! Given $C = s_g^e s_h^r \bmod P_a$ in the accumulator proof group and a
//! witness $w$ with $w^e = A \bmod N$, the prover shows knowledge of
//! $(e, r, w)$ without revealing them. The value is re-committed in the
//! quadratic residues modulo $N$:
//!
//! $$C_e = g_n^e h_n^{r_1} \qquad C_u = w h_n^{r_2} \qquad C_r = g_n^{r_2} h_n^{r_3}$$
//!
//! and seven sigma-protocol equations link them:
//!
//! | check | relation |
//! |---|---|
//! | $st_1$ | $C$ opens to $(e, r)$ |
//! | $st_2$ | $e - 1$ is invertible modulo $q_a$ |
//! | $st_3$ | $e + 1$ is invertible modulo $q_a$ |
//! | $t_1$ | $C_r$ opens to $(r_2, r_3)$ |
//! | $t_2$ | $C_e$ commits to $e$ |
//! | $t_3$ | $C_u^e h_n^{-r_2 e} = A$ |
//! | $t_4$ | $C_r^e = g_n^{r_2 e} h_n^{r_3 e}$ |
//!
//! Blinding values are drawn $k' + k''$ bits wider than what they hide, and
//! the signed ones have a random sign, for statistical zero knowledge. The
//! verifier also bounds $|s_\alpha| \le \max \cdot 2^{k'+k''+1}$.

#![allow(clippy::similar_names, reason = "names follow the protocol notation")]

use alloc::vec::Vec;

use num_bigint::{BigInt, BigUint};
use rand::{CryptoRng, RngCore};
use tracing::debug;

use crate::{
    accumulator::Accumulator,
    commitment::Commitment,
    error::{ConstructionFailure, MembershipCheck, VerificationFailure, ZerocoinError},
    params::AccumulatorParams,
    primitives::{bignum, transcript::Transcript},
    wire::{Encoder, Reader},
    witness::AccumulatorWitness,
};

/// Commitments and responses of a membership proof.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AccumulatorProofOfKnowledge {
    c_e: BigInt,
    c_u: BigInt,
    c_r: BigInt,
    st_1: BigInt,
    st_2: BigInt,
    st_3: BigInt,
    t_1: BigInt,
    t_2: BigInt,
    t_3: BigInt,
    t_4: BigInt,
    s_alpha: BigInt,
    s_beta: BigInt,
    s_zeta: BigInt,
    s_sigma: BigInt,
    s_eta: BigInt,
    s_epsilon: BigInt,
    s_delta: BigInt,
    s_xi: BigInt,
    s_phi: BigInt,
    s_gamma: BigInt,
    s_psi: BigInt,
}

/// $c = H(\text{params}, s_g, s_h, g_n, h_n, C, C_e, C_u, C_r, st_{1..3}, t_{1..4})$.
fn challenge(params: &AccumulatorParams, commitment: &BigUint, published: [&BigInt; 10]) -> BigInt {
    let mut transcript = Transcript::new();
    params.encode(&mut transcript);
    transcript.put_biguint(params.pok_group().g());
    transcript.put_biguint(params.pok_group().h());
    transcript.put_biguint(params.qrn_group().g());
    transcript.put_biguint(params.qrn_group().h());
    transcript.put_biguint(commitment);
    for value in published {
        transcript.put_bignum(value);
    }
    BigInt::from(transcript.finalize().to_uint())
}

impl AccumulatorProofOfKnowledge {
    /// Prove that `commitment`, in the accumulator proof group, opens to a
    /// value accumulated under `witness`.
    pub fn prove(
        params: &AccumulatorParams,
        commitment: &Commitment,
        witness: &AccumulatorWitness,
        rng: &mut (impl RngCore + CryptoRng),
    ) -> Result<Self, ZerocoinError> {
        let modulus = params.modulus();
        let (sg, sh) = (params.pok_group().g(), params.pok_group().h());
        let (pok_modulus, pok_order) = (params.pok_group().modulus(), params.pok_group().order());
        let (g_n, h_n) = (params.qrn_group().g(), params.qrn_group().h());
        let non_invertible = ConstructionFailure::NonInvertible;
        let prove_pow = |group_modulus: &BigUint, terms: &[(&BigUint, &BigInt)]| {
            bignum::multi_pow(terms, group_modulus).ok_or(non_invertible)
        };

        let e = BigInt::from(commitment.content().clone());
        let r = BigInt::from(commitment.randomness().clone());
        let value = commitment.value();

        let quarter = modulus >> 2u32;
        let r_1 = BigInt::from(bignum::random_up_to(rng, &quarter));
        let r_2 = BigInt::from(bignum::random_up_to(rng, &quarter));
        let r_3 = BigInt::from(bignum::random_up_to(rng, &quarter));

        let c_e = prove_pow(modulus, &[(g_n, &e)])? * prove_pow(modulus, &[(h_n, &r_1)])?;
        let c_u = witness.value() * prove_pow(modulus, &[(h_n, &r_2)])?;
        let c_r = prove_pow(modulus, &[(g_n, &r_2)])? * prove_pow(modulus, &[(h_n, &r_3)])?;

        let slack = params.k_prime() + params.k_dprime();
        let r_alpha = bignum::random_signed_up_to(rng, &(params.max_coin_value() << slack));
        let r_gamma = BigInt::from(bignum::random_up_to(rng, pok_modulus));
        let r_phi = BigInt::from(bignum::random_up_to(rng, pok_modulus));
        let r_psi = BigInt::from(bignum::random_up_to(rng, pok_modulus));
        let r_sigma = BigInt::from(bignum::random_up_to(rng, pok_modulus));
        let r_xi = BigInt::from(bignum::random_up_to(rng, pok_modulus));
        let small_bound = &quarter << slack;
        let r_epsilon = bignum::random_signed_up_to(rng, &small_bound);
        let r_eta = bignum::random_signed_up_to(rng, &small_bound);
        let r_zeta = bignum::random_signed_up_to(rng, &small_bound);
        let large_bound = (&quarter * pok_modulus) << slack;
        let r_beta = bignum::random_signed_up_to(rng, &large_bound);
        let r_delta = bignum::random_signed_up_to(rng, &large_bound);

        let sg_inverse = sg.modinv(pok_modulus).ok_or(non_invertible)?;
        let value_over_sg = value * &sg_inverse % pok_modulus;
        let value_times_sg = value * sg % pok_modulus;

        let st_1 = prove_pow(pok_modulus, &[(sg, &r_alpha), (sh, &r_phi)])?;
        let st_2 = prove_pow(pok_modulus, &[(&value_over_sg, &r_gamma), (sh, &r_psi)])?;
        let st_3 = prove_pow(pok_modulus, &[(&value_times_sg, &r_sigma), (sh, &r_xi)])?;

        let c_u_reduced = &c_u % modulus;
        let c_r_reduced = &c_r % modulus;
        let t_1 = prove_pow(modulus, &[(h_n, &r_zeta), (g_n, &r_epsilon)])?;
        let t_2 = prove_pow(modulus, &[(h_n, &r_eta), (g_n, &r_alpha)])?;
        let t_3 = prove_pow(modulus, &[(&c_u_reduced, &r_alpha), (h_n, &-&r_beta)])?;
        let t_4 = prove_pow(
            modulus,
            &[(&c_r_reduced, &r_alpha), (h_n, &-&r_delta), (g_n, &-&r_beta)],
        )?;

        let mut proof = Self {
            c_e: BigInt::from(c_e),
            c_u: BigInt::from(c_u),
            c_r: BigInt::from(c_r),
            st_1: BigInt::from(st_1),
            st_2: BigInt::from(st_2),
            st_3: BigInt::from(st_3),
            t_1: BigInt::from(t_1),
            t_2: BigInt::from(t_2),
            t_3: BigInt::from(t_3),
            t_4: BigInt::from(t_4),
            ..Self::empty()
        };
        let c = challenge(params, value, proof.commitments());

        let inverse_plus = bignum::inverse(&(&e + 1u32), pok_order).ok_or(non_invertible)?;
        let inverse_minus = bignum::inverse(&(&e - 1u32), pok_order).ok_or(non_invertible)?;

        proof.s_alpha = r_alpha - &c * &e;
        proof.s_beta = r_beta - &c * &r_2 * &e;
        proof.s_zeta = r_zeta - &c * &r_3;
        proof.s_sigma = r_sigma - &c * &inverse_plus;
        proof.s_eta = r_eta - &c * &r_1;
        proof.s_epsilon = r_epsilon - &c * &r_2;
        proof.s_delta = r_delta - &c * &r_3 * &e;
        proof.s_xi = r_xi + &c * &r * &inverse_plus;
        proof.s_phi = BigInt::from(bignum::reduce(&(r_phi - &c * &r), pok_order));
        proof.s_gamma = r_gamma - &c * &inverse_minus;
        proof.s_psi = r_psi + &c * &r * &inverse_minus;
        Ok(proof)
    }

    /// Check the proof for commitment value `commitment` against
    /// `accumulator`.
    pub fn verify(
        &self,
        params: &AccumulatorParams,
        accumulator: &Accumulator,
        commitment: &BigUint,
    ) -> Result<(), VerificationFailure> {
        self.check(params, accumulator, commitment)
            .inspect_err(|failure| debug!(%failure, "accumulator proof rejected"))
    }

    fn check(
        &self,
        params: &AccumulatorParams,
        accumulator: &Accumulator,
        commitment: &BigUint,
    ) -> Result<(), VerificationFailure> {
        let modulus = params.modulus();
        let (sg, sh) = (params.pok_group().g(), params.pok_group().h());
        let pok_modulus = params.pok_group().modulus();
        let (g_n, h_n) = (params.qrn_group().g(), params.qrn_group().h());

        let c = challenge(params, commitment, self.commitments());
        let verify_pow = |group_modulus: &BigUint, terms: &[(&BigUint, &BigInt)]| {
            bignum::multi_pow(terms, group_modulus).ok_or(VerificationFailure::NonInvertible)
        };

        let sg_inverse = sg
            .modinv(pok_modulus)
            .ok_or(VerificationFailure::NonInvertible)?;
        let value_over_sg = commitment * &sg_inverse % pok_modulus;
        let value_times_sg = commitment * sg % pok_modulus;
        let c_e = bignum::reduce(&self.c_e, modulus);
        let c_u = bignum::reduce(&self.c_u, modulus);
        let c_r = bignum::reduce(&self.c_r, modulus);

        let checks = [
            (
                MembershipCheck::St1,
                &self.st_1,
                verify_pow(
                    pok_modulus,
                    &[(commitment, &c), (sg, &self.s_alpha), (sh, &self.s_phi)],
                )?,
            ),
            (
                MembershipCheck::St2,
                &self.st_2,
                verify_pow(
                    pok_modulus,
                    &[(sg, &c), (&value_over_sg, &self.s_gamma), (sh, &self.s_psi)],
                )?,
            ),
            (
                MembershipCheck::St3,
                &self.st_3,
                verify_pow(
                    pok_modulus,
                    &[(sg, &c), (&value_times_sg, &self.s_sigma), (sh, &self.s_xi)],
                )?,
            ),
            (
                MembershipCheck::T1,
                &self.t_1,
                verify_pow(
                    modulus,
                    &[(&c_r, &c), (h_n, &self.s_zeta), (g_n, &self.s_epsilon)],
                )?,
            ),
            (
                MembershipCheck::T2,
                &self.t_2,
                verify_pow(
                    modulus,
                    &[(&c_e, &c), (h_n, &self.s_eta), (g_n, &self.s_alpha)],
                )?,
            ),
            (
                MembershipCheck::T3,
                &self.t_3,
                verify_pow(
                    modulus,
                    &[
                        (accumulator.value(), &c),
                        (&c_u, &self.s_alpha),
                        (h_n, &-&self.s_beta),
                    ],
                )?,
            ),
            (
                MembershipCheck::T4,
                &self.t_4,
                verify_pow(
                    modulus,
                    &[
                        (&c_r, &self.s_alpha),
                        (h_n, &-&self.s_delta),
                        (g_n, &-&self.s_beta),
                    ],
                )?,
            ),
        ];
        for (check, published, recomputed) in checks {
            if *published != BigInt::from(recomputed) {
                return Err(VerificationFailure::Membership(check));
            }
        }

        let bound = params.max_coin_value() << (params.k_prime() + params.k_dprime() + 1);
        if *self.s_alpha.magnitude() > bound {
            return Err(VerificationFailure::MembershipRange);
        }
        Ok(())
    }

    const fn empty() -> Self {
        Self {
            c_e: BigInt::ZERO,
            c_u: BigInt::ZERO,
            c_r: BigInt::ZERO,
            st_1: BigInt::ZERO,
            st_2: BigInt::ZERO,
            st_3: BigInt::ZERO,
            t_1: BigInt::ZERO,
            t_2: BigInt::ZERO,
            t_3: BigInt::ZERO,
            t_4: BigInt::ZERO,
            s_alpha: BigInt::ZERO,
            s_beta: BigInt::ZERO,
            s_zeta: BigInt::ZERO,
            s_sigma: BigInt::ZERO,
            s_eta: BigInt::ZERO,
            s_epsilon: BigInt::ZERO,
            s_delta: BigInt::ZERO,
            s_xi: BigInt::ZERO,
            s_phi: BigInt::ZERO,
            s_gamma: BigInt::ZERO,
            s_psi: BigInt::ZERO,
        }
    }

    /// $C_e, C_u, C_r, st_{1..3}, t_{1..4}$ in transcript order.
    const fn commitments(&self) -> [&BigInt; 10] {
        [
            &self.c_e, &self.c_u, &self.c_r, &self.st_1, &self.st_2, &self.st_3, &self.t_1,
            &self.t_2, &self.t_3, &self.t_4,
        ]
    }

    /// The eleven responses in wire order.
    const fn responses(&self) -> [&BigInt; 11] {
        [
            &self.s_alpha,
            &self.s_beta,
            &self.s_zeta,
            &self.s_sigma,
            &self.s_eta,
            &self.s_epsilon,
            &self.s_delta,
            &self.s_xi,
            &self.s_phi,
            &self.s_gamma,
            &self.s_psi,
        ]
    }

    /// The response $s_\alpha$ hiding the coin value.
    #[must_use]
    pub const fn s_alpha(&self) -> &BigInt {
        &self.s_alpha
    }

    pub(crate) fn encode(&self, out: &mut impl Encoder) {
        for value in self.commitments().into_iter().chain(self.responses()) {
            out.put_bignum(value);
        }
    }

    pub(crate) fn decode(reader: &mut Reader<'_>) -> Result<Self, ZerocoinError> {
        Ok(Self {
            c_e: reader.read_bignum()?,
            c_u: reader.read_bignum()?,
            c_r: reader.read_bignum()?,
            st_1: reader.read_bignum()?,
            st_2: reader.read_bignum()?,
            st_3: reader.read_bignum()?,
            t_1: reader.read_bignum()?,
            t_2: reader.read_bignum()?,
            t_3: reader.read_bignum()?,
            t_4: reader.read_bignum()?,
            s_alpha: reader.read_bignum()?,
            s_beta: reader.read_bignum()?,
            s_zeta: reader.read_bignum()?,
            s_sigma: reader.read_bignum()?,
            s_eta: reader.read_bignum()?,
            s_epsilon: reader.read_bignum()?,
            s_delta: reader.read_bignum()?,
            s_xi: reader.read_bignum()?,
            s_phi: reader.read_bignum()?,
            s_gamma: reader.read_bignum()?,
            s_psi: reader.read_bignum()?,
        })
    }

    /// Canonical encoding: the ten commitments, then the eleven responses.
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
    use rand::{SeedableRng as _, rngs::StdRng};

    use super::*;
    use crate::{coin::PublicCoin, denomination::Denomination, params::ZerocoinContext, testing};

    struct Setup {
        ctx: ZerocoinContext,
        accumulator: Accumulator,
        witness: AccumulatorWitness,
        commitment: Commitment,
    }

    /// Three coins accumulated, a witness for the first, and a commitment
    /// to it in the accumulator proof group.
    fn setup(rng: &mut StdRng) -> Setup {
        let ctx = testing::context();
        let params = ctx.accumulator_params();
        let coins: Vec<PublicCoin> = (0u8..3)
            .map(|_| testing::mint(&ctx, Denomination::One, rng).public_coin())
            .collect();
        let mut accumulator = Accumulator::new(params, Denomination::One);
        let mut witness =
            AccumulatorWitness::new(Accumulator::new(params, Denomination::One), coins[0].clone());
        for coin in &coins {
            accumulator.accumulate(&ctx, coin).unwrap();
            witness.add_element(&ctx, coin).unwrap();
        }
        let commitment = Commitment::new(coins[0].value().clone(), params.pok_group(), rng);
        Setup {
            ctx,
            accumulator,
            witness,
            commitment,
        }
    }

    #[test]
    fn honest_proof_verifies() {
        let mut rng = StdRng::seed_from_u64(0);
        let setup = setup(&mut rng);
        let params = setup.ctx.accumulator_params();
        let proof =
            AccumulatorProofOfKnowledge::prove(params, &setup.commitment, &setup.witness, &mut rng)
                .unwrap();
        proof
            .verify(params, &setup.accumulator, setup.commitment.value())
            .unwrap();
    }

    /// Against any other accumulator value the witness relation fails.
    #[test]
    fn wrong_accumulator_rejected() {
        let mut rng = StdRng::seed_from_u64(1);
        let setup = setup(&mut rng);
        let params = setup.ctx.accumulator_params();
        let proof =
            AccumulatorProofOfKnowledge::prove(params, &setup.commitment, &setup.witness, &mut rng)
                .unwrap();

        let mut other = setup.accumulator.clone();
        other.increment(&BigUint::from(3u32));
        assert_eq!(
            proof.verify(params, &other, setup.commitment.value()),
            Err(VerificationFailure::Membership(MembershipCheck::T3))
        );
    }

    /// A response edited after the fact no longer satisfies its equation.
    #[test]
    fn tampered_response_rejected() {
        let mut rng = StdRng::seed_from_u64(2);
        let setup = setup(&mut rng);
        let params = setup.ctx.accumulator_params();
        let proof =
            AccumulatorProofOfKnowledge::prove(params, &setup.commitment, &setup.witness, &mut rng)
                .unwrap();

        let mut tampered = proof.clone();
        tampered.s_zeta += 1u32;
        assert_eq!(
            tampered.verify(params, &setup.accumulator, setup.commitment.value()),
            Err(VerificationFailure::Membership(MembershipCheck::T1))
        );

        let mut wide = proof;
        wide.s_alpha = BigInt::from(params.max_coin_value().clone()) << 400u32;
        assert!(
            wide.verify(params, &setup.accumulator, setup.commitment.value())
                .is_err()
        );
    }

    #[test]
    fn wire_round_trip() {
        let mut rng = StdRng::seed_from_u64(3);
        let setup = setup(&mut rng);
        let params = setup.ctx.accumulator_params();
        let proof =
            AccumulatorProofOfKnowledge::prove(params, &setup.commitment, &setup.witness, &mut rng)
                .unwrap();
        let bytes = proof.to_bytes();
        let parsed = AccumulatorProofOfKnowledge::from_bytes(&bytes).unwrap();
        assert_eq!(parsed, proof);
        assert_eq!(parsed.to_bytes(), bytes);
        assert!(AccumulatorProofOfKnowledge::from_bytes(&bytes[..bytes.len() - 1]).is_err());
    }
}
