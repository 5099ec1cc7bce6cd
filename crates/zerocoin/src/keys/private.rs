//! Private (signing) keys.

use core::fmt;

use k256::ecdsa::{Signature, SigningKey, signature::hazmat::PrehashSigner as _};
use rand::{CryptoRng, RngCore};

use super::{public::CoinVerificationKey, signature::SpendSignature};
use crate::{
    error::{ConstructionFailure, ZerocoinError},
    primitives::Hash256,
};

/// The secp256k1 key that owns a version 2 coin.
///
/// Its public key determines the coin's serial; it signs the spend.
#[derive(Clone)]
pub struct CoinSigningKey(SigningKey);

impl CoinSigningKey {
    /// Draw a fresh key.
    pub fn random(rng: &mut (impl RngCore + CryptoRng)) -> Self {
        Self(SigningKey::random(rng))
    }

    /// Load a big-endian secret scalar. Fails for zero or values at or above
    /// the curve order.
    pub fn from_bytes(bytes: &[u8; 32]) -> Result<Self, ZerocoinError> {
        SigningKey::from_slice(bytes)
            .map(Self)
            .map_err(|_err| ZerocoinError::InvalidKey)
    }

    /// The big-endian secret scalar.
    #[must_use]
    pub fn to_bytes(&self) -> [u8; 32] {
        self.0.to_bytes().into()
    }

    /// The matching public key.
    #[must_use]
    pub fn verification_key(&self) -> CoinVerificationKey {
        CoinVerificationKey::from(self.0.verifying_key().clone())
    }

    /// ECDSA over the raw digest bytes, DER encoded.
    pub fn sign(&self, digest: &Hash256) -> Result<SpendSignature, ZerocoinError> {
        let signature: Signature = self
            .0
            .sign_prehash(digest.as_bytes())
            .map_err(|_err| ConstructionFailure::Signing)?;
        Ok(SpendSignature::from(signature.to_der().as_bytes().to_vec()))
    }
}

impl fmt::Debug for CoinSigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CoinSigningKey(..)")
    }
}
