//! Accumulator witnesses.
//!
//! A witness for coin $c$ is the accumulator of every other coin,
//! $w = u^{\prod_{i \ne c} c_i}$, so that $w^c = A$.

use num_bigint::BigUint;

use crate::{
    accumulator::Accumulator, coin::PublicCoin, error::ZerocoinError, params::ZerocoinContext,
};

/// A witness tracking one designated coin.
#[derive(Clone, Debug, PartialEq, Eq)]
#[expect(
    clippy::module_name_repetitions,
    reason = "accumulator witness is the established protocol name"
)]
pub struct AccumulatorWitness {
    witness: Accumulator,
    element: PublicCoin,
}

impl AccumulatorWitness {
    /// Start from `checkpoint`, an accumulator state that excludes `element`.
    #[must_use]
    pub const fn new(checkpoint: Accumulator, element: PublicCoin) -> Self {
        Self {
            witness: checkpoint,
            element,
        }
    }

    /// Restart from a new checkpoint and designated coin.
    pub fn reset(&mut self, checkpoint: Accumulator, element: PublicCoin) {
        self.witness = checkpoint;
        self.element = element;
    }

    /// Fold in another coin. The designated coin itself is skipped.
    pub fn add_element(
        &mut self,
        ctx: &ZerocoinContext,
        coin: &PublicCoin,
    ) -> Result<(), ZerocoinError> {
        if coin.value() != self.element.value() {
            self.witness.accumulate(ctx, coin)?;
        }
        Ok(())
    }

    /// Fold in a raw value without validating it. A value equal to the
    /// designated coin is still skipped.
    pub fn add_element_unchecked(&mut self, value: &BigUint) {
        if value != self.element.value() {
            self.witness.increment(value);
        }
    }

    /// The witness value $w$.
    #[must_use]
    pub const fn value(&self) -> &BigUint {
        self.witness.value()
    }

    /// The designated coin.
    #[must_use]
    pub const fn element(&self) -> &PublicCoin {
        &self.element
    }

    /// Whether folding the designated coin into the witness reproduces
    /// `target`, and the designated coin is `coin`.
    #[must_use]
    pub fn verify(&self, ctx: &ZerocoinContext, target: &Accumulator, coin: &PublicCoin) -> bool {
        let mut completed = self.witness.clone();
        completed.accumulate(ctx, &self.element).is_ok()
            && completed == *target
            && self.element == *coin
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use rand::{SeedableRng as _, rngs::StdRng};

    use super::*;
    use crate::{denomination::Denomination, testing};

    /// Ten coins accumulated in different traversals agree, and a witness
    /// omitting the first coin completes to the full accumulator.
    #[test]
    fn traversal_orders_agree() {
        let mut rng = StdRng::seed_from_u64(0);
        let ctx = testing::context();
        let params = ctx.accumulator_params();
        let coins: Vec<PublicCoin> = (0u8..10)
            .map(|_| testing::mint(&ctx, Denomination::One, &mut rng).public_coin())
            .collect();

        let mut forward = Accumulator::new(params, Denomination::One);
        let mut reverse = Accumulator::new(params, Denomination::One);
        let mut without_first = Accumulator::new(params, Denomination::One);
        let mut first_last = Accumulator::new(params, Denomination::One);
        let mut witness = AccumulatorWitness::new(
            Accumulator::new(params, Denomination::One),
            coins[0].clone(),
        );

        for coin in &coins {
            forward.accumulate(&ctx, coin).unwrap();
            witness.add_element(&ctx, coin).unwrap();
        }
        for coin in coins.iter().rev() {
            reverse.accumulate(&ctx, coin).unwrap();
        }
        for coin in &coins[1..] {
            without_first.accumulate(&ctx, coin).unwrap();
            first_last.accumulate(&ctx, coin).unwrap();
        }
        first_last.accumulate(&ctx, &coins[0]).unwrap();

        assert_eq!(forward, reverse);
        assert_eq!(forward, first_last);
        assert_ne!(forward, without_first);
        assert_eq!(witness.value(), without_first.value());
        assert!(witness.verify(&ctx, &forward, &coins[0]));
        assert!(!witness.verify(&ctx, &forward, &coins[1]));
        assert!(!witness.verify(&ctx, &without_first, &coins[0]));
    }

    /// Unchecked additions still exclude the designated coin, so the
    /// witness keeps completing to the accumulator of that coin alone.
    #[test]
    fn unchecked_and_reset() {
        let mut rng = StdRng::seed_from_u64(1);
        let ctx = testing::context();
        let params = ctx.accumulator_params();
        let coin = testing::mint(&ctx, Denomination::Ten, &mut rng).public_coin();
        let other = testing::mint(&ctx, Denomination::Ten, &mut rng).public_coin();
        let empty = Accumulator::new(params, Denomination::Ten);
        let mut single = empty.clone();
        single.accumulate(&ctx, &coin).unwrap();

        let mut witness = AccumulatorWitness::new(empty.clone(), coin.clone());
        witness.add_element(&ctx, &coin).unwrap();
        assert_eq!(witness.value(), empty.value(), "checked add skips own coin");

        witness.add_element_unchecked(coin.value());
        assert_eq!(witness.value(), empty.value(), "unchecked add skips own coin");
        assert!(
            witness.verify(&ctx, &single, &coin),
            "witness completes to the single-coin accumulator"
        );

        witness.add_element_unchecked(other.value());
        assert_ne!(witness.value(), empty.value(), "other coins are folded in");

        witness.reset(empty.clone(), coin.clone());
        assert_eq!(witness.value(), empty.value());
        assert_eq!(witness.element(), &coin);
    }
}
