//! Error types.
//!
//! Construction and parsing failures are [`ZerocoinError`]s. Verification
//! never fails with an error: verifiers return
//! `Result<(), VerificationFailure>`, where the failure names the check that
//! rejected and carries no secret material.

use core::fmt;

use thiserror::Error;

use crate::denomination::Denomination;

/// Errors raised while minting coins, building spends, or parsing wire data.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[expect(
    clippy::module_name_repetitions,
    reason = "the crate error is named after the protocol"
)]
pub enum ZerocoinError {
    /// Serial derivation rejected the public key. Recoverable by retrying
    /// with a fresh keypair.
    #[error("invalid serial: {0}")]
    InvalidSerial(#[from] SerialRejection),

    /// A spend could not be assembled. Signals inconsistent inputs rather
    /// than untrusted data.
    #[error("proof construction failed: {0}")]
    ProofConstruction(#[from] ConstructionFailure),

    /// The prime commitment search ran out of attempts.
    #[error("no prime coin commitment found in {attempts} attempts")]
    MintExhaustion {
        /// Attempts made before giving up.
        attempts: u32,
    },

    /// Wire bytes could not be decoded.
    #[error("malformed wire data: {0}")]
    MalformedWireData(#[from] WireError),

    /// A coin was offered to an accumulator of another denomination.
    #[error("denomination mismatch: expected {expected}, found {found}")]
    DenominationMismatch {
        /// Denomination of the accumulator.
        expected: Denomination,
        /// Denomination of the coin.
        found: Denomination,
    },

    /// The coin value is out of range or not a probable prime.
    #[error("coin value is out of range or not prime")]
    InvalidCoin,

    /// The coin's denomination may only be assigned while unset.
    #[error("coin denomination is already set")]
    DenominationAlreadySet,

    /// Key bytes are not a valid secp256k1 scalar.
    #[error("invalid signing key")]
    InvalidKey,

    /// Parameters are structurally inconsistent.
    #[error("invalid parameters: {0}")]
    InvalidParameters(&'static str),
}

/// Reasons a public key cannot yield a serial.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum SerialRejection {
    /// The shifted key hash lies above the valid serial range.
    #[error("shifted public key hash exceeds the serial range")]
    OutOfRange,

    /// The marked serial did not extract back to the current version.
    #[error("version marker does not round-trip")]
    VersionMismatch,

    /// A supplied commitment does not commit to the key's serial.
    #[error("serial does not match the commitment content")]
    CommitmentMismatch,
}

/// Reasons spend construction stops.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum ConstructionFailure {
    /// The witness does not reproduce the accumulator for this coin.
    #[error("accumulator witness does not verify")]
    WitnessMismatch,

    /// The equality prover refuses commitments with identical values.
    #[error("commitment values must differ")]
    EqualCommitmentValues,

    /// The fresh equality proof did not verify.
    #[error("commitment equality proof failed its self-check: {0}")]
    EqualitySelfCheck(VerificationFailure),

    /// The fresh accumulator proof did not verify.
    #[error("accumulator proof failed its self-check: {0}")]
    MembershipSelfCheck(VerificationFailure),

    /// A secret value has no inverse modulo a group order.
    #[error("value is not invertible modulo the group order")]
    NonInvertible,

    /// The coin version requires a key the coin does not hold.
    #[error("version {0} coins require a signing key")]
    MissingSigningKey(u32),

    /// ECDSA signing of the signature hash failed.
    #[error("ECDSA signing failed")]
    Signing,
}

/// Wire decoding failures.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
#[expect(
    clippy::module_name_repetitions,
    reason = "wire errors are re-exported beside the other error kinds"
)]
pub enum WireError {
    /// The buffer ended inside a field.
    #[error("needed {needed} bytes at offset {offset}, {remaining} remaining")]
    UnexpectedEnd {
        /// Cursor position of the failed read.
        offset: usize,
        /// Bytes the field requires.
        needed: usize,
        /// Bytes left in the buffer.
        remaining: usize,
    },

    /// Bytes remained after the last field.
    #[error("{0} trailing bytes")]
    TrailingBytes(usize),

    /// A denomination code outside the known set.
    #[error("unknown denomination code {0}")]
    UnknownDenomination(u32),

    /// A spend type tag outside the known set.
    #[error("unknown spend type {0}")]
    UnknownSpendType(u64),

    /// A length or version prefix too large for this platform.
    #[error("prefix {0} out of range")]
    Overflow(u64),

    /// A field that must be non-negative decoded as negative.
    #[error("negative value in unsigned field")]
    NegativeValue,

    /// A public key that is not a valid SEC1 secp256k1 point.
    #[error("invalid public key encoding")]
    InvalidPublicKey,

    /// Text that is not valid hexadecimal.
    #[error("invalid hex")]
    InvalidHex,
}

/// The check that rejected a proof or spend.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum VerificationFailure {
    /// The serial's version marker disagrees with the spend version.
    #[error("serial version does not match spend version")]
    VersionMismatch,

    /// The spend's denomination differs from the accumulator's.
    #[error("spend denomination does not match accumulator")]
    DenominationMismatch,

    /// An equality response is negative or too long.
    #[error("commitment equality response out of range")]
    EqualityResponseRange,

    /// The equality challenge is negative or wider than its hash.
    #[error("commitment equality challenge out of range")]
    EqualityChallengeRange,

    /// The recomputed equality challenge differs.
    #[error("commitment equality challenge mismatch")]
    EqualityChallengeMismatch,

    /// One of the seven accumulator proof equations does not hold.
    #[error("accumulator proof check {0} failed")]
    Membership(MembershipCheck),

    /// `s_alpha` lies outside the coin value range.
    #[error("accumulator proof response out of range")]
    MembershipRange,

    /// The serial proof carries the wrong number of rounds.
    #[error("serial proof round count mismatch")]
    SerialRoundCount,

    /// A revealed seed is negative.
    #[error("serial proof seed out of range")]
    SerialSeedRange,

    /// The recomputed serial proof hash differs.
    #[error("serial proof challenge mismatch")]
    SerialChallengeMismatch,

    /// The public key does not hash to the spent serial.
    #[error("public key does not match serial")]
    SerialKeyMismatch,

    /// A version-2 spend without a public key and signature.
    #[error("missing spend signature")]
    MissingSignature,

    /// The ECDSA signature does not verify.
    #[error("invalid spend signature")]
    SignatureInvalid,

    /// A published element has no inverse in its group.
    #[error("non-invertible group element")]
    NonInvertible,
}

/// The accumulator proof equations, in transcript order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MembershipCheck {
    /// `st_1`: knowledge of the commitment opening.
    St1,
    /// `st_2`: the committed value minus one is invertible.
    St2,
    /// `st_3`: the committed value plus one is invertible.
    St3,
    /// `t_1`: opening of `C_r`.
    T1,
    /// `t_2`: `C_e` commits to the committed value.
    T2,
    /// `t_3`: the witness raised to the value reaches the accumulator.
    T3,
    /// `t_4`: consistency of `C_r` with the witness blinding.
    T4,
}

impl fmt::Display for MembershipCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match *self {
            Self::St1 => "st_1",
            Self::St2 => "st_2",
            Self::St3 => "st_3",
            Self::T1 => "t_1",
            Self::T2 => "t_2",
            Self::T3 => "t_3",
            Self::T4 => "t_4",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Failure messages name the check without any values.
    #[test]
    fn membership_failure_names_equation() {
        let failure = VerificationFailure::Membership(MembershipCheck::T3);
        assert_eq!(failure.to_string(), "accumulator proof check t_3 failed");
    }

    /// Nested causes surface through the top-level message.
    #[test]
    fn construction_wraps_verification_reason() {
        let err = ZerocoinError::from(ConstructionFailure::MembershipSelfCheck(
            VerificationFailure::MembershipRange,
        ));
        assert_eq!(
            err.to_string(),
            "proof construction failed: accumulator proof failed its self-check: accumulator proof response out of range"
        );
    }
}
