//! Public (verification) keys.

use alloc::vec::Vec;

use k256::ecdsa::{Signature, VerifyingKey, signature::hazmat::PrehashVerifier as _};
use num_bigint::BigUint;

use super::signature::SpendSignature;
use crate::{
    error::{VerificationFailure, WireError},
    primitives::Hash256,
};

/// A secp256k1 public key, published compressed in version 2 spends.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CoinVerificationKey(VerifyingKey);

impl From<VerifyingKey> for CoinVerificationKey {
    fn from(key: VerifyingKey) -> Self {
        Self(key)
    }
}

impl CoinVerificationKey {
    /// Parse a SEC1 point, compressed or not.
    pub fn from_sec1_bytes(bytes: &[u8]) -> Result<Self, WireError> {
        VerifyingKey::from_sec1_bytes(bytes)
            .map(Self)
            .map_err(|_err| WireError::InvalidPublicKey)
    }

    /// The 33-byte compressed SEC1 encoding.
    #[must_use]
    pub fn to_sec1_bytes(&self) -> Vec<u8> {
        self.0.to_encoded_point(true).as_bytes().to_vec()
    }

    /// $\text{SHA256d}(\mathsf{pk})$ as a little-endian integer, the
    /// starting point of serial derivation.
    #[must_use]
    pub fn hash(&self) -> BigUint {
        Hash256::double_sha256(&self.to_sec1_bytes()).to_uint()
    }

    /// Check a DER signature over the raw digest bytes.
    pub fn verify(
        &self,
        digest: &Hash256,
        signature: &SpendSignature,
    ) -> Result<(), VerificationFailure> {
        let parsed = Signature::from_der(signature.as_bytes())
            .map_err(|_err| VerificationFailure::SignatureInvalid)?;
        self.0
            .verify_prehash(digest.as_bytes(), &parsed)
            .map_err(|_err| VerificationFailure::SignatureInvalid)
    }
}
