//! RSA accumulators.
//!
//! An accumulator for one denomination starts at the base $u$ and folds in
//! every coin value $c_i$:
//!
//! $$A = u^{\prod_i c_i} \bmod N$$
//!
//! Folding is order independent but not idempotent: accumulating a coin
//! twice corrupts the set. Callers own that bookkeeping, and must serialize
//! concurrent updates.

use alloc::vec::Vec;

use num_bigint::BigUint;
use tracing::debug;

use crate::{
    coin::PublicCoin,
    denomination::Denomination,
    error::{WireError, ZerocoinError},
    params::{AccumulatorParams, ZerocoinContext},
    primitives::{Hash256, bignum},
    wire::{Encoder as _, Reader},
};

/// The running accumulator value for one denomination.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Accumulator {
    denomination: Denomination,
    modulus: BigUint,
    value: BigUint,
}

impl Accumulator {
    /// An empty accumulator, holding the base.
    #[must_use]
    pub fn new(params: &AccumulatorParams, denomination: Denomination) -> Self {
        Self::with_value(params, denomination, params.base().clone())
    }

    /// An accumulator resumed from a stored value.
    #[must_use]
    pub fn with_value(
        params: &AccumulatorParams,
        denomination: Denomination,
        value: BigUint,
    ) -> Self {
        Self {
            denomination,
            modulus: params.modulus().clone(),
            value,
        }
    }

    /// Fold a coin in: $A \gets A^c \bmod N$.
    ///
    /// Rejects coins of another denomination and coins whose value is out
    /// of range or composite.
    pub fn accumulate(
        &mut self,
        ctx: &ZerocoinContext,
        coin: &PublicCoin,
    ) -> Result<(), ZerocoinError> {
        if coin.denomination() != self.denomination {
            debug!(
                expected = %self.denomination,
                found = %coin.denomination(),
                "coin denomination does not match accumulator"
            );
            return Err(ZerocoinError::DenominationMismatch {
                expected: self.denomination,
                found: coin.denomination(),
            });
        }
        if !coin.validate(ctx) {
            return Err(ZerocoinError::InvalidCoin);
        }
        self.increment(coin.value());
        Ok(())
    }

    /// Fold a raw value in without any checks.
    pub fn increment(&mut self, value: &BigUint) {
        self.value = self.value.modpow(value, &self.modulus);
    }

    /// The accumulator's denomination.
    #[must_use]
    pub const fn denomination(&self) -> Denomination {
        self.denomination
    }

    /// The current value $A$.
    #[must_use]
    pub const fn value(&self) -> &BigUint {
        &self.value
    }

    /// See [`checksum`].
    #[must_use]
    pub fn checksum(&self) -> u32 {
        checksum(&self.value)
    }

    /// Value bignum, then the u32 denomination code.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::new();
        out.put_biguint(&self.value);
        out.put_u32(self.denomination.value());
        out
    }

    /// Parse an accumulator encoded by [`Self::to_bytes`].
    pub fn from_bytes(params: &AccumulatorParams, bytes: &[u8]) -> Result<Self, ZerocoinError> {
        let mut reader = Reader::new(bytes);
        let value = reader.read_biguint()?;
        let denomination = Denomination::try_from(reader.read_u32()?)?;
        reader.finish()?;
        Ok(Self::with_value(params, denomination, value))
    }
}

/// Equal denomination and value.
impl PartialEq for Accumulator {
    fn eq(&self, other: &Self) -> bool {
        self.denomination == other.denomination && self.value == other.value
    }
}

impl Eq for Accumulator {}

/// The first four bytes of $\text{SHA256d}$ over the length-prefixed value
/// encoding, read little-endian.
#[must_use]
pub fn checksum(value: &BigUint) -> u32 {
    let mut encoded = Vec::new();
    encoded.put_var_bytes(&bignum::to_vch_unsigned(value));
    let digest = Hash256::double_sha256(&encoded);
    let [b0, b1, b2, b3, ..] = *digest.as_bytes();
    u32::from_le_bytes([b0, b1, b2, b3])
}

/// Pick one denomination's checksum out of a block's concatenated checksum
/// blob: the big-endian u32 at byte offset $4 \cdot (\text{ordinal} - 1)$.
#[expect(clippy::big_endian_bytes, reason = "checksum blobs are big-endian")]
pub fn parse_checksum(checksums_hex: &str, denomination: Denomination) -> Result<u32, ZerocoinError> {
    let slot = denomination
        .ordinal()
        .checked_sub(1)
        .ok_or(ZerocoinError::InvalidParameters(
            "unset denomination has no checksum",
        ))?;
    let bytes = hex::decode(checksums_hex).map_err(|_err| WireError::InvalidHex)?;
    let offset = slot * 4;
    let word: [u8; 4] = bytes
        .get(offset..offset + 4)
        .and_then(|window| window.try_into().ok())
        .ok_or(WireError::UnexpectedEnd {
            offset,
            needed: 4,
            remaining: bytes.len().saturating_sub(offset),
        })?;
    Ok(u32::from_be_bytes(word))
}
