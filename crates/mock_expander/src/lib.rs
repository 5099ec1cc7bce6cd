//! # mock_expander
//!
//! A SHA-256 reproduction of the native 256-to-1024-bit seed expansion that
//! the serial-number signature of knowledge consumes through its
//! `SeedExpander` interface.
//!
//! The native routine keeps a single streaming double-SHA256 writer alive
//! across four rounds:
//!
//! ```text
//! writer <- seed (32 bytes, little-endian)
//! for i in 0..4:
//!     h_i    = writer.hash()          // SHA256(SHA256(stream))
//!     result = result || vch(h_i)
//!     writer <- compact_size(|result|) || result
//! return result as a little-endian integer
//! ```
//!
//! Finalizing the writer does not reset it. The inner SHA-256 context is
//! reused to hash the first digest and is left holding that digest plus its
//! padding block, so every later round hashes
//! `inner_digest || padding || new data` rather than a fresh stream. This
//! crate reproduces that quirk exactly, since proofs are only valid when
//! prover and verifier expand seeds identically.

use num_bigint::BigUint;
use sha2::{Digest as _, Sha256};

/// Number of 256-bit digests concatenated into one expansion.
pub const ROUNDS: usize = 4;

/// The SHA-256 padding of a 32-byte message: `0x80`, zero fill and the
/// 64-bit big-endian bit length (256).
const DIGEST_PADDING: [u8; 32] = [
    0x80, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, //
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0x01, 0x00,
];

/// Expand a 256-bit seed into the raw sign-magnitude byte string returned by
/// the native routine.
#[must_use]
pub fn compute_1024_seed(seed: &[u8; 32]) -> Vec<u8> {
    let mut stream: Vec<u8> = seed.to_vec();
    let mut result = Vec::new();

    for _ in 0..ROUNDS {
        let inner = Sha256::digest(&stream);
        let outer = Sha256::digest(inner);

        stream.clear();
        stream.extend_from_slice(&inner);
        stream.extend_from_slice(&DIGEST_PADDING);

        result.extend(minimal_magnitude(&outer));
        write_compact_size(&mut stream, result.len());
        stream.extend_from_slice(&result);
    }

    result
}

/// Expand a 256-bit seed into its (roughly 1024-bit) integer.
#[must_use]
pub fn expand(seed: &[u8; 32]) -> BigUint {
    BigUint::from_bytes_le(&compute_1024_seed(seed))
}

/// Minimal little-endian encoding of a non-negative 256-bit integer, with a
/// zero byte appended when the top bit would read as a sign.
fn minimal_magnitude(digest: &[u8]) -> Vec<u8> {
    let len = digest
        .iter()
        .rposition(|&byte| byte != 0)
        .map_or(0, |pos| pos + 1);
    let mut out: Vec<u8> = digest.iter().take(len).copied().collect();
    if out.last().is_some_and(|&last| last & 0x80 != 0) {
        out.push(0);
    }
    out
}

#[expect(clippy::little_endian_bytes, reason = "specified behavior")]
fn write_compact_size(out: &mut Vec<u8>, len: usize) {
    let value = u64::try_from(len).unwrap_or(u64::MAX);
    let le = value.to_le_bytes();
    match value {
        0..=252 => out.extend(le.iter().take(1)),
        253..=0xffff => {
            out.push(0xfd);
            out.extend(le.iter().take(2));
        },
        0x1_0000..=0xffff_ffff => {
            out.push(0xfe);
            out.extend(le.iter().take(4));
        },
        _ => {
            out.push(0xff);
            out.extend_from_slice(&le);
        },
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn hex_int(digits: &str) -> BigUint {
        BigUint::parse_bytes(digits.as_bytes(), 16).unwrap()
    }

    /// Pinned expansion of the all-zero seed.
    #[test]
    fn zero_seed_vector() {
        let expected = hex_int(concat!(
            "40c60f0e4320e1f8db9f163f24a5315d99e243b97a78fc9dc250f5b181d5cb6f",
            "51dabe10b93467699b99efc373b237220f7926e3008e7f22e48ea50c00662b22",
            "00addcd98d021739fba6210a4da940549c79f96fab0425438cc3cdca0ed48bd5",
            "1a1e1567e6e0bdcc16006d127b8c6e0e0f5ea85e22e89713fb35620a2c6cdb322b",
        ));
        assert_eq!(expand(&[0u8; 32]), expected);
        assert_eq!(compute_1024_seed(&[0u8; 32]).len(), 129);
    }

    /// Pinned expansion of the seed `1` (little-endian).
    #[test]
    fn unit_seed_vector() {
        let mut seed = [0u8; 32];
        seed[0] = 1;
        let expected = hex_int(concat!(
            "7da3f38cfe051f5b7974c270e1e869c30f43df5f789de3c69b4439ffe541c934",
            "2ca6a5cb197ba008091ddf139f562b1cef2f794a658dd318198efe37e27095fc",
            "00f061d7d015b343312a42d011fec4adb0319a69832f134b7f0d16fdf51b9466",
            "3a14abf5ed107ff58bf844ee7f447bec317c276b00905c09a45434f8848599597e",
        ));
        assert_eq!(expand(&seed), expected);
    }

    /// The padding block is the standard SHA-256 tail for a 32-byte message.
    #[test]
    fn padding_encodes_bit_length() {
        assert_eq!(DIGEST_PADDING[0], 0x80);
        assert_eq!(DIGEST_PADDING[30..], [0x01, 0x00]);
    }

    #[test]
    fn magnitude_appends_sign_byte() {
        let mut digest = [0u8; 32];
        digest[0] = 0x01;
        digest[1] = 0x80;
        assert_eq!(minimal_magnitude(&digest), vec![0x01, 0x80, 0x00]);
        assert!(minimal_magnitude(&[0u8; 32]).is_empty());
    }

    proptest! {
        /// Every expansion is four minimal digests (at most 4 * 33 bytes),
        /// never negative, and deterministic.
        #[test]
        fn expansion_is_bounded_and_deterministic(seed in any::<[u8; 32]>()) {
            let bytes = compute_1024_seed(&seed);
            prop_assert!(bytes.len() <= ROUNDS * 33);
            prop_assert_eq!(bytes.last().map(|&last| last & 0x80), Some(0));
            prop_assert_eq!(expand(&seed), expand(&seed));
        }
    }
}
