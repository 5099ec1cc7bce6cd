//! Coins: minting, serial derivation and validation.
//!
//! ## Serials
//!
//! A version 2 serial is derived from the coin owner's public key:
//!
//! $$S = (\text{SHA256d}(\mathsf{pk}) \gg 4) \mathbin{|} (\texttt{0xF} \ll 252)$$
//!
//! The top nibble marks the version. Keys whose shifted hash has bits
//! 248..252 above `0xC` are rejected, and minting retries with a new key.
//!
//! ## Commitments
//!
//! The public coin is a Pedersen commitment to $S$ in the coin group. It
//! must be a probable prime inside the accumulator's coin value range, so
//! minting rerandomizes the commitment, multiplying by $h^\delta$, until it
//! is.

use num_bigint::BigUint;
use num_traits::ToPrimitive as _;
use rand::{CryptoRng, RngCore, thread_rng};
use tracing::debug;

use crate::{
    commitment::Commitment,
    constants::{
        CURRENT_VERSION, MAX_COINMINT_ATTEMPTS, MAX_SERIAL_HIGH_BITS, PUBKEY_VERSION,
        SERIAL_RANGE_SHIFT, V2_BITSHIFT, VERSION_MARKER, VERSION_MARKER_SHIFT,
        ZEROCOIN_MINT_PRIME_PARAM,
    },
    denomination::Denomination,
    error::{SerialRejection, ZerocoinError},
    keys::{CoinSigningKey, CoinVerificationKey},
    params::ZerocoinContext,
    primitives::{Hash256, bignum, prime},
};

/// The public half of a coin: what gets accumulated.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[expect(
    clippy::module_name_repetitions,
    reason = "public coin is the established protocol name"
)]
pub struct PublicCoin {
    value: BigUint,
    denomination: Denomination,
}

impl PublicCoin {
    /// Wrap a commitment value.
    #[must_use]
    pub const fn new(value: BigUint, denomination: Denomination) -> Self {
        Self {
            value,
            denomination,
        }
    }

    /// The coin commitment value.
    #[must_use]
    pub const fn value(&self) -> &BigUint {
        &self.value
    }

    /// The coin's denomination.
    #[must_use]
    pub const fn denomination(&self) -> Denomination {
        self.denomination
    }

    /// Whether the value may be accumulated. See [`is_coin_value_valid`].
    #[must_use]
    pub fn validate(&self, ctx: &ZerocoinContext) -> bool {
        is_coin_value_valid(ctx, &self.value)
    }
}

/// A minted coin with its secrets.
#[derive(Clone, Debug)]
pub struct Coin {
    serial: BigUint,
    commitment: Commitment,
    denomination: Denomination,
    key: Option<CoinSigningKey>,
    parent_tx: Option<Hash256>,
    height: Option<u32>,
}

impl Coin {
    /// Mint a coin owned by `key`.
    ///
    /// Fails with [`ZerocoinError::InvalidSerial`] when the key's hash falls
    /// outside the serial range (retry with a fresh key), and with
    /// [`ZerocoinError::MintExhaustion`] when no prime commitment turns up.
    pub fn mint(
        ctx: &ZerocoinContext,
        key: CoinSigningKey,
        denomination: Denomination,
        rng: &mut (impl RngCore + CryptoRng),
    ) -> Result<Self, ZerocoinError> {
        let serial = generate_serial(&key.verification_key())?;
        let commitment = generate_commitment(ctx, &serial, rng)?;
        Ok(Self::assemble(serial, commitment, denomination, Some(key)))
    }

    /// Mint around an existing commitment, which must commit to the serial
    /// derived from `key`.
    pub fn mint_with_commitment(
        key: CoinSigningKey,
        denomination: Denomination,
        commitment: Commitment,
    ) -> Result<Self, ZerocoinError> {
        let serial = generate_serial(&key.verification_key())?;
        if serial != *commitment.content() {
            return Err(SerialRejection::CommitmentMismatch.into());
        }
        Ok(Self::assemble(serial, commitment, denomination, Some(key)))
    }

    /// Rebuild a coin from stored parts, taking the serial from the
    /// commitment content without any check.
    #[must_use]
    pub fn mint_unchecked(
        key: Option<CoinSigningKey>,
        denomination: Denomination,
        commitment: Commitment,
    ) -> Self {
        Self::assemble(commitment.content().clone(), commitment, denomination, key)
    }

    const fn assemble(
        serial: BigUint,
        commitment: Commitment,
        denomination: Denomination,
        key: Option<CoinSigningKey>,
    ) -> Self {
        Self {
            serial,
            commitment,
            denomination,
            key,
            parent_tx: None,
            height: None,
        }
    }

    /// Serial version, read from the marker nibble.
    #[must_use]
    pub fn version(&self) -> u32 {
        extract_version(&self.serial)
    }

    /// The serial number, revealed when the coin is spent.
    #[must_use]
    pub const fn serial(&self) -> &BigUint {
        &self.serial
    }

    /// The commitment to the serial, with its opening.
    #[must_use]
    pub const fn commitment(&self) -> &Commitment {
        &self.commitment
    }

    /// The coin's denomination.
    #[must_use]
    pub const fn denomination(&self) -> Denomination {
        self.denomination
    }

    /// The key authorizing version 2 spends.
    #[must_use]
    pub const fn signing_key(&self) -> Option<&CoinSigningKey> {
        self.key.as_ref()
    }

    /// Hash of the minting transaction, once known.
    #[must_use]
    pub const fn parent_tx(&self) -> Option<&Hash256> {
        self.parent_tx.as_ref()
    }

    /// Height of the minting block, once known.
    #[must_use]
    pub const fn height(&self) -> Option<u32> {
        self.height
    }

    /// The accumulable public part.
    #[must_use]
    pub fn public_coin(&self) -> PublicCoin {
        PublicCoin::new(self.commitment.value().clone(), self.denomination)
    }

    /// Assign the denomination of a coin minted without one.
    pub fn set_denomination(&mut self, denomination: Denomination) -> Result<(), ZerocoinError> {
        if self.denomination != Denomination::Unset {
            return Err(ZerocoinError::DenominationAlreadySet);
        }
        self.denomination = denomination;
        Ok(())
    }

    /// Record the minting transaction.
    pub const fn set_parent_tx(&mut self, parent_tx: Hash256) {
        self.parent_tx = Some(parent_tx);
    }

    /// Record the minting block height.
    pub const fn set_height(&mut self, height: u32) {
        self.height = Some(height);
    }

    /// Whether the commitment value may be accumulated.
    #[must_use]
    pub fn validate(&self, ctx: &ZerocoinContext) -> bool {
        is_coin_value_valid(ctx, self.commitment.value())
    }

    /// Same commitment value and denomination.
    #[must_use]
    pub fn public_equals(&self, other: &Self) -> bool {
        self.commitment.value() == other.commitment.value()
            && self.denomination == other.denomination
    }
}

/// Inclusive range check against the accumulator bounds, then a probable
/// prime test with `zkp_iterations` rounds on freshly drawn bases.
#[must_use]
pub fn is_coin_value_valid(ctx: &ZerocoinContext, value: &BigUint) -> bool {
    let params = ctx.accumulator_params();
    if value < params.min_coin_value() {
        debug!("coin value below minimum");
        return false;
    }
    if value > params.max_coin_value() {
        debug!("coin value above maximum");
        return false;
    }
    if !prime::is_probable_prime_with(value, ctx.zkp_iterations(), &mut thread_rng()) {
        debug!("coin value is not prime");
        return false;
    }
    true
}

/// Derive the version 2 serial for a public key.
pub fn generate_serial(key: &CoinVerificationKey) -> Result<BigUint, ZerocoinError> {
    generate_serial_from(&key.hash())
}

/// Derive a version 2 serial from an already computed 256-bit key hash.
pub fn generate_serial_from(hash: &BigUint) -> Result<BigUint, ZerocoinError> {
    let shifted = hash >> V2_BITSHIFT;
    if (&shifted >> SERIAL_RANGE_SHIFT) > BigUint::from(MAX_SERIAL_HIGH_BITS) {
        debug!("public key hash outside the serial range");
        return Err(SerialRejection::OutOfRange.into());
    }
    let serial = shifted | version_mask();
    if extract_version(&serial) != CURRENT_VERSION {
        return Err(SerialRejection::VersionMismatch.into());
    }
    Ok(serial)
}

/// 2 when the marker nibble is set, 1 otherwise.
#[must_use]
pub fn extract_version(serial: &BigUint) -> u32 {
    let marker = (serial >> VERSION_MARKER_SHIFT) & BigUint::from(VERSION_MARKER);
    if marker.to_u8() == Some(VERSION_MARKER) {
        PUBKEY_VERSION
    } else {
        1
    }
}

/// The serial with its version marker cleared: what the public key hash,
/// shifted, must equal.
#[must_use]
pub fn adjusted_serial(serial: &BigUint) -> BigUint {
    serial ^ (serial & version_mask())
}

fn version_mask() -> BigUint {
    BigUint::from(VERSION_MARKER) << VERSION_MARKER_SHIFT
}

/// Commit to `serial` in the coin group and search for a prime value.
pub fn generate_commitment(
    ctx: &ZerocoinContext,
    serial: &BigUint,
    rng: &mut (impl RngCore + CryptoRng),
) -> Result<Commitment, ZerocoinError> {
    let start = Commitment::new(serial.clone(), ctx.coin_group(), rng);
    search_commitment(ctx, &start, rng)
}

/// Rerandomize `start` until its value is a prime strictly between the
/// accumulator bounds.
pub fn search_commitment(
    ctx: &ZerocoinContext,
    start: &Commitment,
    rng: &mut (impl RngCore + CryptoRng),
) -> Result<Commitment, ZerocoinError> {
    let group = ctx.coin_group();
    let params = ctx.accumulator_params();
    let mut value = start.value().clone();
    let mut randomness = start.randomness().clone();

    for attempt in 0..MAX_COINMINT_ATTEMPTS {
        if value > *params.min_coin_value()
            && value < *params.max_coin_value()
            && prime::is_probable_prime(&value, ZEROCOIN_MINT_PRIME_PARAM)
        {
            debug!(attempt, "found prime coin commitment");
            return Ok(Commitment::from_parts(
                start.content().clone(),
                randomness,
                value,
            ));
        }
        let delta = bignum::random_below(rng, group.order());
        randomness = (randomness + &delta) % group.order();
        value = value * group.h().modpow(&delta, group.modulus()) % group.modulus();
    }

    debug!(attempts = MAX_COINMINT_ATTEMPTS, "coin commitment search exhausted");
    Err(ZerocoinError::MintExhaustion {
        attempts: MAX_COINMINT_ATTEMPTS,
    })
}
