//! Coin spends.
//!
//! A [`CoinSpend`] reveals a coin's serial and proves, against the public
//! accumulator of its denomination, that the serial belongs to some
//! accumulated coin:
//!
//! ```mermaid
//! flowchart LR
//!     coin[Coin commitment]
//!     sc["C' (serial group)"]
//!     ac["C'' (accumulator proof group)"]
//!     acc[Accumulator]
//!     coin --> sc & ac
//!     sc <-- equality --> ac
//!     ac -- membership --> acc
//!     sc -- serial SoK --> sighash[Signature hash]
//! ```
//!
//! The serial proof signs the spend's signature hash, so it also binds the
//! transaction hash, accumulator checksum, denomination and spend type.
//! Version 2 spends additionally carry the coin's public key and an ECDSA
//! signature over the same hash; [`CoinSpend::has_valid_signature`] checks
//! that the key hashes to the serial.

use alloc::vec::Vec;

use num_bigint::BigUint;
use rand::{CryptoRng, RngCore};
use tracing::{debug, warn};

use crate::{
    accumulator::Accumulator,
    coin::{Coin, adjusted_serial, extract_version},
    commitment::Commitment,
    constants::{PUBKEY_VERSION, V2_BITSHIFT},
    denomination::Denomination,
    error::{ConstructionFailure, VerificationFailure, WireError, ZerocoinError},
    keys::{CoinVerificationKey, SpendSignature},
    params::ZerocoinContext,
    primitives::{Hash256, transcript::Transcript},
    proof::{
        AccumulatorProofOfKnowledge, CommitmentProofOfKnowledge, SerialNumberSignatureOfKnowledge,
    },
    wire::{Encoder as _, Reader},
    witness::AccumulatorWitness,
};

/// The purpose of a spend, signed into version 2 spends.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[expect(
    clippy::module_name_repetitions,
    reason = "spend type is the established protocol name"
)]
pub enum SpendType {
    /// An ordinary transfer.
    #[default]
    Spend,
    /// A stake input.
    Stake,
    /// Masternode collateral.
    MasternodeCollateral,
    /// A signed message rather than a transfer.
    SignMessage,
}

impl TryFrom<u64> for SpendType {
    type Error = WireError;

    fn try_from(tag: u64) -> Result<Self, Self::Error> {
        match tag {
            0 => Ok(Self::Spend),
            1 => Ok(Self::Stake),
            2 => Ok(Self::MasternodeCollateral),
            3 => Ok(Self::SignMessage),
            unknown => Err(WireError::UnknownSpendType(unknown)),
        }
    }
}

impl From<SpendType> for u64 {
    fn from(spend_type: SpendType) -> Self {
        match spend_type {
            SpendType::Spend => 0,
            SpendType::Stake => 1,
            SpendType::MasternodeCollateral => 2,
            SpendType::SignMessage => 3,
        }
    }
}

/// Caller-supplied context bound into the signature hash.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[expect(
    clippy::module_name_repetitions,
    reason = "spend metadata is the established protocol name"
)]
pub struct SpendMetadata {
    /// Hash of the spending transaction.
    pub tx_hash: Hash256,
    /// Checksum of the accumulator the spend proves against.
    pub accumulator_checksum: u32,
    /// The spend's purpose.
    pub spend_type: SpendType,
}

/// Everything the signature hash covers.
#[derive(Clone, Debug)]
struct SpendStatement {
    version: u32,
    denomination: Denomination,
    metadata: SpendMetadata,
    serial: BigUint,
    serial_commitment: BigUint,
    accumulator_commitment: BigUint,
    equality_proof: CommitmentProofOfKnowledge,
    membership_proof: AccumulatorProofOfKnowledge,
}

impl SpendStatement {
    /// $\text{SHA256d}$ over the commitments, both commitment proofs and the
    /// metadata.
    fn signature_hash(&self) -> Hash256 {
        let mut transcript = Transcript::new();
        transcript.put_biguint(&self.serial_commitment);
        transcript.put_biguint(&self.accumulator_commitment);
        self.equality_proof.encode(&mut transcript);
        self.membership_proof.encode(&mut transcript);
        transcript.put_hash(&self.metadata.tx_hash);
        transcript.put_biguint(&self.serial);
        transcript.put_u32(self.metadata.accumulator_checksum);
        transcript.put_u32(self.denomination.value());
        if self.version >= PUBKEY_VERSION {
            transcript.put_compact_size(self.metadata.spend_type.into());
        }
        transcript.finalize()
    }
}

/// The version 2 public key and its signature over the signature hash.
#[derive(Clone, Debug)]
struct SpendAuthorization {
    public_key: CoinVerificationKey,
    signature: SpendSignature,
}

impl SpendAuthorization {
    /// Sign `sighash` with the coin key; version 1 spends carry nothing.
    fn sign(coin: &Coin, version: u32, sighash: &Hash256) -> Result<Option<Self>, ZerocoinError> {
        if version < PUBKEY_VERSION {
            return Ok(None);
        }
        let key = coin
            .signing_key()
            .ok_or(ConstructionFailure::MissingSigningKey(version))?;
        Ok(Some(Self {
            public_key: key.verification_key(),
            signature: key.sign(sighash)?,
        }))
    }
}

/// A spend of one coin against one accumulator.
#[derive(Clone, Debug)]
#[expect(
    clippy::module_name_repetitions,
    reason = "coin spend is the established protocol name"
)]
pub struct CoinSpend {
    statement: SpendStatement,
    serial_proof: SerialNumberSignatureOfKnowledge,
    authorization: Option<SpendAuthorization>,
}

impl CoinSpend {
    /// Prove that `coin` is in `accumulator`, witnessed by `witness`, and
    /// sign `metadata`.
    ///
    /// Both commitment proofs are verified before use; a failure here means
    /// inconsistent inputs.
    pub fn build(
        ctx: &ZerocoinContext,
        coin: &Coin,
        accumulator: &Accumulator,
        witness: &AccumulatorWitness,
        metadata: SpendMetadata,
        rng: &mut (impl RngCore + CryptoRng),
    ) -> Result<Self, ZerocoinError> {
        if !witness.verify(ctx, accumulator, &coin.public_coin()) {
            return Err(ConstructionFailure::WitnessMismatch.into());
        }

        let params = ctx.accumulator_params();
        let coin_value = coin.commitment().value();
        let serial_commitment = Commitment::new(coin_value.clone(), ctx.serial_group(), rng);
        let accumulator_commitment = Commitment::new(coin_value.clone(), params.pok_group(), rng);

        let equality_proof = CommitmentProofOfKnowledge::prove(
            ctx.serial_group(),
            params.pok_group(),
            &serial_commitment,
            &accumulator_commitment,
            rng,
        )?;
        equality_proof
            .verify(
                ctx.serial_group(),
                params.pok_group(),
                serial_commitment.value(),
                accumulator_commitment.value(),
            )
            .map_err(|failure| {
                warn!(%failure, "fresh equality proof does not verify");
                ConstructionFailure::EqualitySelfCheck(failure)
            })?;

        let membership_proof =
            AccumulatorProofOfKnowledge::prove(params, &accumulator_commitment, witness, rng)?;
        membership_proof
            .verify(params, accumulator, accumulator_commitment.value())
            .map_err(|failure| {
                warn!(%failure, "fresh accumulator proof does not verify");
                ConstructionFailure::MembershipSelfCheck(failure)
            })?;

        let version = coin.version();
        let statement = SpendStatement {
            version,
            denomination: coin.denomination(),
            metadata,
            serial: coin.serial().clone(),
            serial_commitment: serial_commitment.value().clone(),
            accumulator_commitment: accumulator_commitment.value().clone(),
            equality_proof,
            membership_proof,
        };
        let sighash = statement.signature_hash();
        let serial_proof =
            SerialNumberSignatureOfKnowledge::prove(ctx, coin, &serial_commitment, &sighash, rng)?;

        let authorization = SpendAuthorization::sign(coin, version, &sighash)?;

        Ok(Self {
            statement,
            serial_proof,
            authorization,
        })
    }

    /// Verify the spend against `accumulator`.
    ///
    /// Checks the serial's version marker and the denomination, then the
    /// equality, membership and serial proofs in that order. The ECDSA
    /// authorization is checked separately by
    /// [`Self::has_valid_signature`].
    pub fn verify(
        &self,
        ctx: &ZerocoinContext,
        accumulator: &Accumulator,
    ) -> Result<(), VerificationFailure> {
        let statement = &self.statement;
        if extract_version(&statement.serial) != statement.version {
            debug!(version = statement.version, "serial version mismatch");
            return Err(VerificationFailure::VersionMismatch);
        }
        if statement.denomination != accumulator.denomination() {
            debug!(
                spend = %statement.denomination,
                accumulator = %accumulator.denomination(),
                "denomination mismatch"
            );
            return Err(VerificationFailure::DenominationMismatch);
        }

        let params = ctx.accumulator_params();
        statement.equality_proof.verify(
            ctx.serial_group(),
            params.pok_group(),
            &statement.serial_commitment,
            &statement.accumulator_commitment,
        )?;
        statement
            .membership_proof
            .verify(params, accumulator, &statement.accumulator_commitment)?;
        self.serial_proof.verify(
            ctx,
            &statement.serial,
            &statement.serial_commitment,
            &statement.signature_hash(),
        )
    }

    /// Check the version 2 authorization: the public key must hash to the
    /// serial, and its signature must cover the signature hash.
    ///
    /// Always passes for version 1 spends, which carry no key.
    pub fn has_valid_signature(&self) -> Result<(), VerificationFailure> {
        if self.statement.version < PUBKEY_VERSION {
            return Ok(());
        }
        let authorization = self
            .authorization
            .as_ref()
            .ok_or(VerificationFailure::MissingSignature)?;
        if authorization.public_key.hash() >> V2_BITSHIFT != adjusted_serial(&self.statement.serial)
        {
            debug!("public key does not hash to the serial");
            return Err(VerificationFailure::SerialKeyMismatch);
        }
        authorization
            .public_key
            .verify(&self.statement.signature_hash(), &authorization.signature)
            .inspect_err(|failure| debug!(%failure, "spend signature rejected"))
    }

    /// The digest signed by the serial proof and the ECDSA signature.
    #[must_use]
    pub fn signature_hash(&self) -> Hash256 {
        self.statement.signature_hash()
    }

    /// Spend version: 2 when authorized by a public key.
    #[must_use]
    pub const fn version(&self) -> u32 {
        self.statement.version
    }

    /// The revealed serial.
    #[must_use]
    pub const fn serial(&self) -> &BigUint {
        &self.statement.serial
    }

    /// The spent coin's denomination.
    #[must_use]
    pub const fn denomination(&self) -> Denomination {
        self.statement.denomination
    }

    /// Transaction hash, accumulator checksum and spend type.
    #[must_use]
    pub const fn metadata(&self) -> &SpendMetadata {
        &self.statement.metadata
    }

    /// Commitment to the coin value in the serial group.
    #[must_use]
    pub const fn serial_commitment(&self) -> &BigUint {
        &self.statement.serial_commitment
    }

    /// Commitment to the coin value in the accumulator proof group.
    #[must_use]
    pub const fn accumulator_commitment(&self) -> &BigUint {
        &self.statement.accumulator_commitment
    }

    /// The commitment equality proof.
    #[must_use]
    pub const fn equality_proof(&self) -> &CommitmentProofOfKnowledge {
        &self.statement.equality_proof
    }

    /// The accumulator membership proof.
    #[must_use]
    pub const fn membership_proof(&self) -> &AccumulatorProofOfKnowledge {
        &self.statement.membership_proof
    }

    /// The serial-number signature of knowledge.
    #[must_use]
    pub const fn serial_proof(&self) -> &SerialNumberSignatureOfKnowledge {
        &self.serial_proof
    }

    /// The version 2 public key, if any.
    #[must_use]
    pub fn public_key(&self) -> Option<&CoinVerificationKey> {
        self.authorization
            .as_ref()
            .map(|authorization| &authorization.public_key)
    }

    /// The version 2 signature, if any.
    #[must_use]
    pub fn signature(&self) -> Option<&SpendSignature> {
        self.authorization
            .as_ref()
            .map(|authorization| &authorization.signature)
    }

    /// Canonical encoding.
    ///
    /// Authorized spends append the version, public key, signature and
    /// spend type; version 1 spends end after the equality proof.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        let statement = &self.statement;
        let mut out = Vec::new();
        out.put_u32(statement.denomination.value());
        out.put_hash(&statement.metadata.tx_hash);
        out.put_u32(statement.metadata.accumulator_checksum);
        out.put_biguint(&statement.accumulator_commitment);
        out.put_biguint(&statement.serial_commitment);
        out.put_biguint(&statement.serial);
        statement.membership_proof.encode(&mut out);
        self.serial_proof.encode(&mut out);
        statement.equality_proof.encode(&mut out);
        if let Some(authorization) = self.authorization.as_ref() {
            out.put_compact_size(statement.version.into());
            out.put_var_bytes(&authorization.public_key.to_sec1_bytes());
            out.put_var_bytes(authorization.signature.as_bytes());
            out.put_compact_size(statement.metadata.spend_type.into());
        }
        out
    }

    /// Parse [`Self::to_bytes`] output, consuming every byte.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ZerocoinError> {
        let mut reader = Reader::new(bytes);
        let denomination = Denomination::try_from(reader.read_u32()?)?;
        let tx_hash = reader.read_hash()?;
        let accumulator_checksum = reader.read_u32()?;
        let accumulator_commitment = reader.read_biguint()?;
        let serial_commitment = reader.read_biguint()?;
        let serial = reader.read_biguint()?;
        let membership_proof = AccumulatorProofOfKnowledge::decode(&mut reader)?;
        let serial_proof = SerialNumberSignatureOfKnowledge::decode(&mut reader)?;
        let equality_proof = CommitmentProofOfKnowledge::decode(&mut reader)?;

        let (version, spend_type, authorization) = if reader.is_empty() {
            (1, SpendType::Spend, None)
        } else {
            let tag = reader.read_compact_size()?;
            let version = u32::try_from(tag).map_err(|_err| WireError::Overflow(tag))?;
            let public_key = CoinVerificationKey::from_sec1_bytes(reader.read_var_bytes()?)?;
            let signature = SpendSignature::from(reader.read_var_bytes()?.to_vec());
            let spend_type = SpendType::try_from(reader.read_compact_size()?)?;
            let authorization = SpendAuthorization {
                public_key,
                signature,
            };
            (version, spend_type, Some(authorization))
        };
        reader.finish()?;

        Ok(Self {
            statement: SpendStatement {
                version,
                denomination,
                metadata: SpendMetadata {
                    tx_hash,
                    accumulator_checksum,
                    spend_type,
                },
                serial,
                serial_commitment,
                accumulator_commitment,
                equality_proof,
                membership_proof,
            },
            serial_proof,
            authorization,
        })
    }
}

/// Equal canonical encodings.
impl PartialEq for CoinSpend {
    fn eq(&self, other: &Self) -> bool {
        self.to_bytes() == other.to_bytes()
    }
}

impl Eq for CoinSpend {}
