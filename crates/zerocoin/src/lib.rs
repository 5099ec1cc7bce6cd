//! # zerocoin
//!
//! The Zerocoin anonymous coin protocol over integer groups and an RSA
//! accumulator.
//!
//! A coin is a prime Pedersen commitment to a serial number derived from
//! its owner's public key. Minted coins are folded into a per-denomination
//! accumulator; spending reveals the serial and proves, in zero knowledge,
//! that it opens some accumulated coin:
//!
//! - [`CommitmentProofOfKnowledge`]: two commitments in different groups
//!   hold the same coin value
//! - [`AccumulatorProofOfKnowledge`]: that value is in the accumulator
//! - [`SerialNumberSignatureOfKnowledge`]: that value commits to the
//!   revealed serial, signing the spend's metadata
//!
//! ## Flow
//!
//! ```text
//! mint ─► accumulate ─► witness ─► CoinSpend::build
//!                                        │
//!         CoinSpend::verify ◄─ from_bytes ◄─ to_bytes
//! ```
//!
//! All randomness is drawn from a caller-supplied `RngCore + CryptoRng`.
//! The 256-to-1024-bit seed expansion used by the serial proof is injected
//! through [`SeedExpander`] in the [`ZerocoinContext`].
//!
//! ## Nomenclature
//!
//! Group names follow the protocol: the coin commitment group, the serial
//! number group (whose order is the coin modulus), the accumulator proof
//! group and the quadratic residues modulo the RSA modulus $N$.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(clippy::pub_use, reason = "exporting items for consumers")]

extern crate alloc;

pub mod accumulator;
pub mod coin;
pub mod commitment;
pub mod constants;
pub mod denomination;
pub mod error;
pub mod keys;
pub mod params;
pub mod proof;
pub mod seed;
pub mod spend;
pub mod witness;

mod primitives;
mod wire;

#[cfg(test)]
mod testing;

pub use accumulator::Accumulator;
pub use coin::{Coin, PublicCoin};
pub use commitment::Commitment;
pub use denomination::Denomination;
pub use error::{VerificationFailure, ZerocoinError};
pub use params::{AccumulatorParams, GroupParams, ZerocoinContext};
pub use primitives::Hash256;
pub use proof::{
    AccumulatorProofOfKnowledge, CommitmentProofOfKnowledge, SerialNumberSignatureOfKnowledge,
};
pub use seed::SeedExpander;
pub use spend::{CoinSpend, SpendMetadata, SpendType};
pub use witness::AccumulatorWitness;
