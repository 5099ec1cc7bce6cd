//! Group and protocol parameters.
//!
//! ## Groups
//!
//! Four groups take part in a spend:
//!
//! - the coin commitment group, a prime-order-$q$ subgroup of
//!   $\mathbb{Z}_p^*$ in which coins are Pedersen commitments to serials
//! - the serial group, whose order is the coin commitment modulus $p$, so
//!   coin commitment values can serve as exponents
//! - the accumulator proof group, whose order exceeds every coin value
//! - the quadratic residues modulo the RSA modulus $N$, hidden order
//!
//! Parameters are generated elsewhere and loaded once.
//! [`ZerocoinContext::new`] checks that the pieces fit together, not that
//! they were generated honestly.

use alloc::sync::Arc;

use num_bigint::BigUint;
use num_traits::Zero as _;

use crate::{
    constants::{
        ACCPROOF_KDPRIME, ACCPROOF_KPRIME, DEFAULT_ZKP_ITERATIONS, MAX_ZKP_ITERATIONS, ZKP_HASH_LEN,
    },
    error::ZerocoinError,
    seed::SeedExpander,
    wire::Encoder,
};

/// Generators and moduli of a group used for Pedersen commitments.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[expect(
    clippy::module_name_repetitions,
    reason = "group parameters is the established protocol name"
)]
pub struct GroupParams {
    g: BigUint,
    h: BigUint,
    modulus: BigUint,
    order: BigUint,
}

impl GroupParams {
    /// Describe the order-`order` subgroup of $\mathbb{Z}_{\text{modulus}}^*$
    /// generated by both `g` and `h`.
    #[must_use]
    pub const fn new(g: BigUint, h: BigUint, modulus: BigUint, order: BigUint) -> Self {
        Self {
            g,
            h,
            modulus,
            order,
        }
    }

    /// First generator.
    #[must_use]
    pub const fn g(&self) -> &BigUint {
        &self.g
    }

    /// Second generator, with unknown discrete log base `g`.
    #[must_use]
    pub const fn h(&self) -> &BigUint {
        &self.h
    }

    /// The modulus $p$.
    #[must_use]
    pub const fn modulus(&self) -> &BigUint {
        &self.modulus
    }

    /// The group order $q$.
    #[must_use]
    pub const fn order(&self) -> &BigUint {
        &self.order
    }

    /// $g^m h^r \bmod p$.
    pub(crate) fn commit(&self, content: &BigUint, randomness: &BigUint) -> BigUint {
        self.g.modpow(content, &self.modulus) * self.h.modpow(randomness, &self.modulus)
            % &self.modulus
    }

    fn check(&self, name: &'static str) -> Result<(), ZerocoinError> {
        if self.modulus.is_zero() || self.order.is_zero() {
            return Err(ZerocoinError::InvalidParameters(name));
        }
        Ok(())
    }

    pub(crate) fn encode(&self, out: &mut impl Encoder) {
        out.put_bool(false);
        out.put_biguint(&self.g);
        out.put_biguint(&self.h);
        out.put_biguint(&self.modulus);
        out.put_biguint(&self.order);
    }
}

/// Parameters of the RSA accumulator and its membership proof.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[expect(
    clippy::module_name_repetitions,
    reason = "accumulator parameters is the established protocol name"
)]
pub struct AccumulatorParams {
    modulus: BigUint,
    base: BigUint,
    pok_group: GroupParams,
    qrn_group: GroupParams,
    min_coin_value: BigUint,
    max_coin_value: BigUint,
    k_prime: u32,
    k_dprime: u32,
}

impl AccumulatorParams {
    /// Accumulator parameters with the default statistical margins
    /// $k' = 160$ and $k'' = 128$.
    #[must_use]
    pub const fn new(
        modulus: BigUint,
        base: BigUint,
        pok_group: GroupParams,
        qrn_group: GroupParams,
        min_coin_value: BigUint,
        max_coin_value: BigUint,
    ) -> Self {
        Self {
            modulus,
            base,
            pok_group,
            qrn_group,
            min_coin_value,
            max_coin_value,
            k_prime: ACCPROOF_KPRIME,
            k_dprime: ACCPROOF_KDPRIME,
        }
    }

    /// Override the statistical margins $k'$ and $k''$.
    #[must_use]
    pub fn with_security(mut self, k_prime: u32, k_dprime: u32) -> Self {
        self.k_prime = k_prime;
        self.k_dprime = k_dprime;
        self
    }

    /// The RSA modulus $N$.
    #[must_use]
    pub const fn modulus(&self) -> &BigUint {
        &self.modulus
    }

    /// The value every empty accumulator starts from.
    #[must_use]
    pub const fn base(&self) -> &BigUint {
        &self.base
    }

    /// Group of the commitment the membership proof is about.
    #[must_use]
    pub const fn pok_group(&self) -> &GroupParams {
        &self.pok_group
    }

    /// Quadratic residue generators modulo $N$. The order is unknown and
    /// left zero.
    #[must_use]
    pub const fn qrn_group(&self) -> &GroupParams {
        &self.qrn_group
    }

    /// Smallest admissible coin value.
    #[must_use]
    pub const fn min_coin_value(&self) -> &BigUint {
        &self.min_coin_value
    }

    /// Largest admissible coin value.
    #[must_use]
    pub const fn max_coin_value(&self) -> &BigUint {
        &self.max_coin_value
    }

    /// $k'$.
    #[must_use]
    pub const fn k_prime(&self) -> u32 {
        self.k_prime
    }

    /// $k''$.
    #[must_use]
    pub const fn k_dprime(&self) -> u32 {
        self.k_dprime
    }

    pub(crate) fn encode(&self, out: &mut impl Encoder) {
        out.put_bool(true);
        out.put_biguint(&self.modulus);
        out.put_biguint(&self.base);
        self.pok_group.encode(out);
        self.qrn_group.encode(out);
        out.put_biguint(&self.min_coin_value);
        out.put_biguint(&self.max_coin_value);
        out.put_u32(self.k_prime);
        out.put_u32(self.k_dprime);
    }
}

/// Everything a prover or verifier needs: the parameter sets, the proof
/// iteration count and the seed expansion capability.
///
/// Built once, then shared read-only.
#[derive(Clone, Debug)]
pub struct ZerocoinContext {
    accumulator: AccumulatorParams,
    coin_group: GroupParams,
    serial_group: GroupParams,
    zkp_iterations: usize,
    expander: Arc<dyn SeedExpander>,
}

impl ZerocoinContext {
    /// Assemble and check a context with the default 20 proof iterations.
    ///
    /// Fails when the coin commitment modulus is not the serial group order,
    /// when a modulus or order is zero, when $0 < \min < \max$ does not hold,
    /// or when the accumulator proof group order does not exceed $\max$.
    pub fn new(
        accumulator: AccumulatorParams,
        coin_group: GroupParams,
        serial_group: GroupParams,
        expander: Arc<dyn SeedExpander>,
    ) -> Result<Self, ZerocoinError> {
        coin_group.check("coin commitment group is degenerate")?;
        serial_group.check("serial group is degenerate")?;
        accumulator
            .pok_group
            .check("accumulator proof group is degenerate")?;
        if accumulator.modulus.is_zero() || accumulator.qrn_group.modulus != accumulator.modulus {
            return Err(ZerocoinError::InvalidParameters(
                "quadratic residue group must use the accumulator modulus",
            ));
        }
        if coin_group.modulus != serial_group.order {
            return Err(ZerocoinError::InvalidParameters(
                "coin commitment modulus must equal the serial group order",
            ));
        }
        if accumulator.min_coin_value.is_zero()
            || accumulator.min_coin_value >= accumulator.max_coin_value
        {
            return Err(ZerocoinError::InvalidParameters(
                "coin value bounds must satisfy 0 < min < max",
            ));
        }
        if accumulator.pok_group.order <= accumulator.max_coin_value {
            return Err(ZerocoinError::InvalidParameters(
                "accumulator proof group order must exceed the largest coin value",
            ));
        }
        Ok(Self {
            accumulator,
            coin_group,
            serial_group,
            zkp_iterations: DEFAULT_ZKP_ITERATIONS,
            expander,
        })
    }

    /// Override the number of serial proof rounds, at most one per
    /// challenge hash bit.
    pub fn with_zkp_iterations(mut self, iterations: usize) -> Result<Self, ZerocoinError> {
        if !(1..=MAX_ZKP_ITERATIONS).contains(&iterations) {
            return Err(ZerocoinError::InvalidParameters(
                "proof iterations must lie in 1..=256",
            ));
        }
        self.zkp_iterations = iterations;
        Ok(self)
    }

    /// Accumulator and membership proof parameters.
    #[must_use]
    pub const fn accumulator_params(&self) -> &AccumulatorParams {
        &self.accumulator
    }

    /// The group coins are committed in.
    #[must_use]
    pub const fn coin_group(&self) -> &GroupParams {
        &self.coin_group
    }

    /// The group of the serial number proof, of order $p_{\text{coin}}$.
    #[must_use]
    pub const fn serial_group(&self) -> &GroupParams {
        &self.serial_group
    }

    /// Rounds of the serial number proof, also the Miller-Rabin rounds used
    /// when validating coins.
    #[must_use]
    pub const fn zkp_iterations(&self) -> usize {
        self.zkp_iterations
    }

    /// The injected seed expansion.
    #[must_use]
    pub fn expander(&self) -> &dyn SeedExpander {
        &*self.expander
    }

    pub(crate) fn encode(&self, out: &mut impl Encoder) {
        out.put_bool(true);
        self.accumulator.encode(out);
        self.coin_group.encode(out);
        self.serial_group.encode(out);
        out.put_u32(u32::try_from(self.zkp_iterations).unwrap_or(u32::MAX));
        out.put_u32(ZKP_HASH_LEN);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::ZerocoinError, testing};

    #[test]
    fn fixture_is_consistent() {
        let ctx = testing::context();
        assert_eq!(ctx.zkp_iterations(), DEFAULT_ZKP_ITERATIONS);
        assert_eq!(ctx.coin_group().modulus().bits(), 1024);
        assert_eq!(ctx.coin_group().order().bits(), 256);
        assert_eq!(ctx.serial_group().order(), ctx.coin_group().modulus());
        assert_eq!(ctx.accumulator_params().modulus().bits(), 2047);
    }

    /// The serial group must have the coin modulus as its order.
    #[test]
    fn rejects_mismatched_serial_group() {
        let ctx = testing::context();
        let serial = ctx.serial_group();
        let skewed = GroupParams::new(
            serial.g().clone(),
            serial.h().clone(),
            serial.modulus().clone(),
            serial.order() + 2u32,
        );
        let err = ZerocoinContext::new(
            ctx.accumulator_params().clone(),
            ctx.coin_group().clone(),
            skewed,
            testing::expander(),
        )
        .unwrap_err();
        assert!(matches!(err, ZerocoinError::InvalidParameters(_)));
    }

    #[test]
    fn rejects_inverted_bounds() {
        let ctx = testing::context();
        let acc = ctx.accumulator_params();
        let inverted = AccumulatorParams::new(
            acc.modulus().clone(),
            acc.base().clone(),
            acc.pok_group().clone(),
            acc.qrn_group().clone(),
            acc.max_coin_value().clone(),
            acc.min_coin_value().clone(),
        );
        assert!(
            ZerocoinContext::new(
                inverted,
                ctx.coin_group().clone(),
                ctx.serial_group().clone(),
                testing::expander(),
            )
            .is_err()
        );
    }

    #[test]
    fn iteration_bounds() {
        let ctx = testing::context();
        assert!(ctx.clone().with_zkp_iterations(0).is_err());
        assert!(ctx.clone().with_zkp_iterations(257).is_err());
        assert_eq!(
            ctx.with_zkp_iterations(256).unwrap().zkp_iterations(),
            256
        );
    }

    /// Group encodings lead with a `false` flag, context encodings with
    /// `true`, and the context ends with the iteration count and hash length.
    #[test]
    fn transcript_framing() {
        let ctx = testing::context().with_zkp_iterations(7).unwrap();
        let mut group = Vec::new();
        ctx.coin_group().encode(&mut group);
        assert_eq!(group.first(), Some(&0));

        let mut full = Vec::new();
        ctx.encode(&mut full);
        assert_eq!(full.first(), Some(&1));
        assert_eq!(full[full.len() - 8..], [7, 0, 0, 0, 80, 0, 0, 0]);
    }
}
