//! Pedersen commitments.
//!
//! $$C = g^m h^r \bmod p$$
//!
//! Perfectly hiding, and binding as long as $\log_g h$ is unknown.

use num_bigint::BigUint;
use rand::{CryptoRng, RngCore};

use crate::{params::GroupParams, primitives::bignum};

/// A commitment together with its opening.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Commitment {
    content: BigUint,
    randomness: BigUint,
    value: BigUint,
}

impl Commitment {
    /// Commit to `content` under randomness drawn uniformly from $[0, q)$.
    pub fn new(content: BigUint, group: &GroupParams, rng: &mut (impl RngCore + CryptoRng)) -> Self {
        let randomness = bignum::random_below(rng, group.order());
        Self::with_randomness(content, randomness, group)
    }

    /// Recompute the commitment for a known opening.
    #[must_use]
    pub fn with_randomness(content: BigUint, randomness: BigUint, group: &GroupParams) -> Self {
        let value = group.commit(&content, &randomness);
        Self {
            content,
            randomness,
            value,
        }
    }

    /// Reassemble a commitment from stored parts without recomputing it.
    #[must_use]
    pub const fn from_parts(content: BigUint, randomness: BigUint, value: BigUint) -> Self {
        Self {
            content,
            randomness,
            value,
        }
    }

    /// The committed value $m$.
    #[must_use]
    pub const fn content(&self) -> &BigUint {
        &self.content
    }

    /// The blinding factor $r$.
    #[must_use]
    pub const fn randomness(&self) -> &BigUint {
        &self.randomness
    }

    /// The public commitment $C$.
    #[must_use]
    pub const fn value(&self) -> &BigUint {
        &self.value
    }
}
