//! The seed-expansion capability consumed by the serial number proof.
//!
//! Each proof round draws a 256-bit seed and needs its deterministic
//! expansion to roughly 1024 bits. Provers and verifiers must expand
//! identically, so the routine is injected through [`ZerocoinContext`]
//! rather than chosen here.
//!
//! [`ZerocoinContext`]: crate::params::ZerocoinContext

use core::fmt;

use num_bigint::BigUint;

/// Deterministic expansion of a 256-bit seed.
#[expect(
    clippy::module_name_repetitions,
    reason = "seed expander is the established protocol name"
)]
pub trait SeedExpander: Send + Sync + fmt::Debug {
    /// Expand `seed`, a little-endian 256-bit integer.
    fn expand(&self, seed: &[u8; 32]) -> BigUint;
}

/// The low 256 bits of `seed` as little-endian bytes.
pub(crate) fn seed_bytes(seed: &BigUint) -> [u8; 32] {
    let mut bytes = [0u8; 32];
    for (slot, byte) in bytes.iter_mut().zip(seed.to_bytes_le()) {
        *slot = byte;
    }
    bytes
}
