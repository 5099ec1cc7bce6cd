//! 256-bit digests.

use alloc::string::String;
use core::fmt;

use num_bigint::BigUint;
use sha2::{Digest as _, Sha256};

use crate::error::WireError;

/// A double-SHA256 digest, held in the byte order the hash function emits.
///
/// Displayed byte-reversed, the way block explorers print transaction
/// hashes. Interpreted as an integer, the held bytes are little-endian.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[expect(
    clippy::module_name_repetitions,
    reason = "Hash256 is the established digest name"
)]
pub struct Hash256([u8; 32]);

impl Hash256 {
    /// The all-zero digest.
    pub const ZERO: Self = Self([0u8; 32]);

    /// $\text{SHA256}(\text{SHA256}(\text{data}))$.
    #[must_use]
    pub fn double_sha256(data: &[u8]) -> Self {
        Self(Sha256::digest(Sha256::digest(data)).into())
    }

    /// Parse the byte-reversed hex form produced by [`fmt::Display`].
    pub fn from_display_hex(text: &str) -> Result<Self, WireError> {
        let mut bytes: [u8; 32] = hex::decode(text)
            .ok()
            .and_then(|decoded| decoded.try_into().ok())
            .ok_or(WireError::InvalidHex)?;
        bytes.reverse();
        Ok(Self(bytes))
    }

    /// The digest as stored, in hash-output order.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// The digest read as a little-endian unsigned integer.
    #[must_use]
    pub fn to_uint(&self) -> BigUint {
        BigUint::from_bytes_le(&self.0)
    }

    /// Bit `index` of the digest, counting from the low bit of byte 0.
    #[must_use]
    pub fn bit(&self, index: usize) -> bool {
        self.0
            .get(index >> 3)
            .is_some_and(|byte| (byte >> (index & 7)) & 1 == 1)
    }

    fn display_hex(&self) -> String {
        let mut reversed = self.0;
        reversed.reverse();
        hex::encode(reversed)
    }
}

impl From<[u8; 32]> for Hash256 {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl From<Hash256> for [u8; 32] {
    fn from(hash: Hash256) -> Self {
        hash.0
    }
}

impl fmt::Display for Hash256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_hex())
    }
}

impl fmt::Debug for Hash256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hash256({})", self.display_hex())
    }
}
