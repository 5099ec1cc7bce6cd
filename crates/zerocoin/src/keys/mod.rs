//! ## Spend Authorization Keys
//!
//! Version 2 coins derive their serial from a secp256k1 public key, and a
//! spend of such a coin carries an ECDSA signature over the spend's
//! signature hash.
//!
//! ```mermaid
//! flowchart LR
//!     sk[CoinSigningKey]
//!     pk[CoinVerificationKey]
//!     serial["serial = SHA256d(pk) >> 4 | 0xF << 252"]
//!     sig[SpendSignature]
//!     sk --> pk --> serial
//!     sk -- "sign(sighash)" --> sig
//! ```
//!
//! ### Private keys ([`private`])
//!
//! - [`CoinSigningKey`]: held with the coin, signs the raw 32-byte digest
//!
//! ### Public keys ([`public`])
//!
//! - [`CoinVerificationKey`]: 33-byte compressed SEC1 point published in the
//!   spend; hashing it must reproduce the spent serial

pub mod private;
pub mod public;

mod signature;

// Re-exports: public API surface.
pub use private::CoinSigningKey;
pub use public::CoinVerificationKey;
pub use signature::SpendSignature;
