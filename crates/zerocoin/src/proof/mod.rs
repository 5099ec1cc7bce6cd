//! Zero-knowledge proofs composing a coin spend.
//!
//! A spend reveals the coin's serial $S$ and proves, without revealing the
//! coin commitment $C_{\text{coin}} = g^S h^r$:
//!
//! 1. [`CommitmentProofOfKnowledge`]: two fresh commitments, one in the
//!    serial group and one in the accumulator proof group, open to the same
//!    value $C_{\text{coin}}$.
//! 2. [`AccumulatorProofOfKnowledge`]: the value committed in the
//!    accumulator proof group is accumulated.
//! 3. [`SerialNumberSignatureOfKnowledge`]: the value committed in the
//!    serial group is a coin commitment to $S$, signing the spend's
//!    signature hash.
//!
//! All three are Fiat-Shamir transforms of sigma protocols. Responses are
//! plain integers, never reduced, and are published as signed big integers.

mod equality;
mod membership;
mod serial;

pub use equality::CommitmentProofOfKnowledge;
pub use membership::AccumulatorProofOfKnowledge;
pub use serial::SerialNumberSignatureOfKnowledge;
