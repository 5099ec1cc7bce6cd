//! Signatures bridging private (sign) and public (verify) keys.

use alloc::vec::Vec;

/// A DER-encoded ECDSA signature over a spend's signature hash.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[expect(
    clippy::module_name_repetitions,
    reason = "spend signature is the established protocol name"
)]
pub struct SpendSignature(Vec<u8>);

impl SpendSignature {
    /// The DER bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl From<Vec<u8>> for SpendSignature {
    fn from(der: Vec<u8>) -> Self {
        Self(der)
    }
}

impl From<SpendSignature> for Vec<u8> {
    fn from(signature: SpendSignature) -> Self {
        signature.0
    }
}
