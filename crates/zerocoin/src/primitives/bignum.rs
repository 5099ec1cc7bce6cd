//! Big-integer helpers shared by the commitment schemes and proofs.
//!
//! Group elements are [`BigUint`]s in `[0, p)`. Proof responses are signed,
//! unreduced [`BigInt`]s. Exponentiation follows the convention that a
//! negative exponent denotes the inverse:
//!
//! $$x^{-k} \bmod p = (x^{-1})^{k} \bmod p$$
//!
//! ## Byte encoding
//!
//! Integers travel as sign-magnitude little-endian byte strings: the minimal
//! magnitude, an extra `0x00` when the top bit of the last byte is set, and
//! the sign carried in that top bit. Zero is the empty string.

use alloc::vec::Vec;

use num_bigint::{BigInt, BigUint, RandBigInt as _, Sign};
use num_integer::Integer as _;
use num_traits::{One as _, Zero as _};
use rand::{CryptoRng, RngCore};

/// $\text{base}^{\text{exponent}} \bmod \text{modulus}$ for a signed exponent.
///
/// Returns `None` when the exponent is negative and `base` has no inverse.
pub(crate) fn pow_mod(base: &BigUint, exponent: &BigInt, modulus: &BigUint) -> Option<BigUint> {
    let reduced = base % modulus;
    match exponent.sign() {
        Sign::Minus => reduced
            .modinv(modulus)
            .map(|inverse| inverse.modpow(exponent.magnitude(), modulus)),
        Sign::NoSign | Sign::Plus => Some(reduced.modpow(exponent.magnitude(), modulus)),
    }
}

/// $\prod_i b_i^{e_i} \bmod \text{modulus}$, see [`pow_mod`].
pub(crate) fn multi_pow(terms: &[(&BigUint, &BigInt)], modulus: &BigUint) -> Option<BigUint> {
    terms
        .iter()
        .try_fold(BigUint::one() % modulus, |acc, &(base, exponent)| {
            Some(acc * pow_mod(base, exponent, modulus)? % modulus)
        })
}

/// Floor reduction of a signed integer into `[0, modulus)`.
pub(crate) fn reduce(value: &BigInt, modulus: &BigUint) -> BigUint {
    let (_sign, magnitude) = value
        .mod_floor(&BigInt::from(modulus.clone()))
        .into_parts();
    magnitude
}

/// Inverse of a signed integer modulo `modulus`, as a signed integer.
pub(crate) fn inverse(value: &BigInt, modulus: &BigUint) -> Option<BigInt> {
    reduce(value, modulus).modinv(modulus).map(BigInt::from)
}

/// Uniform sample from `[0, bound)`.
pub(crate) fn random_below(rng: &mut (impl RngCore + CryptoRng), bound: &BigUint) -> BigUint {
    rng.gen_biguint_below(bound)
}

/// Uniform sample from `[0, max]`.
pub(crate) fn random_up_to(rng: &mut (impl RngCore + CryptoRng), max: &BigUint) -> BigUint {
    rng.gen_biguint_below(&(max + BigUint::one()))
}

/// Uniform sample from `[0, max]`, negated on a fair coin flip.
pub(crate) fn random_signed_up_to(rng: &mut (impl RngCore + CryptoRng), max: &BigUint) -> BigInt {
    let magnitude = BigInt::from(random_up_to(rng, max));
    if rng.next_u32() & 1 == 1 {
        -magnitude
    } else {
        magnitude
    }
}

/// Uniform sample from `[0, 2^bits)`.
pub(crate) fn random_bits(rng: &mut (impl RngCore + CryptoRng), bits: u64) -> BigUint {
    rng.gen_biguint(bits)
}

/// Encode a signed integer as sign-magnitude little-endian bytes.
pub(crate) fn to_vch(value: &BigInt) -> Vec<u8> {
    encode_magnitude(value.sign() == Sign::Minus, value.magnitude())
}

/// Encode a non-negative integer as sign-magnitude little-endian bytes.
pub(crate) fn to_vch_unsigned(value: &BigUint) -> Vec<u8> {
    encode_magnitude(false, value)
}

/// Decode sign-magnitude little-endian bytes.
pub(crate) fn from_vch(bytes: &[u8]) -> BigInt {
    let Some((&last, rest)) = bytes.split_last() else {
        return BigInt::zero();
    };
    let mut magnitude = rest.to_vec();
    magnitude.push(last & 0x7f);
    let sign = if last & 0x80 == 0 {
        Sign::Plus
    } else {
        Sign::Minus
    };
    BigInt::from_biguint(sign, BigUint::from_bytes_le(&magnitude))
}

fn encode_magnitude(negative: bool, magnitude: &BigUint) -> Vec<u8> {
    if magnitude.is_zero() {
        return Vec::new();
    }
    let mut bytes = magnitude.to_bytes_le();
    if bytes.last().is_some_and(|&last| last & 0x80 != 0) {
        bytes.push(0);
    }
    if negative {
        if let Some(last) = bytes.last_mut() {
            *last |= 0x80;
        }
    }
    bytes
}
