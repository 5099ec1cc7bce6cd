//! Protocol-wide constants.
//!
//! Values here are consensus-relevant: changing any of them changes the
//! transcripts, the serial layout, or the set of coins that validate.

/// Serial version that binds a coin to a secp256k1 public key.
///
/// Coins at or above this version carry a version marker in the top nibble
/// of the serial and authorize spends with an ECDSA signature.
pub const PUBKEY_VERSION: u32 = 2;

/// Version assigned to newly minted coins.
pub const CURRENT_VERSION: u32 = 2;

/// Width of the version marker, in bits.
///
/// A version-2 serial is `(SHA256d(pk) >> V2_BITSHIFT) | (0xF << 252)`.
pub const V2_BITSHIFT: u32 = 4;

/// Bit position of the version marker nibble.
pub const VERSION_MARKER_SHIFT: u32 = 256 - V2_BITSHIFT;

/// The version marker nibble value.
pub const VERSION_MARKER: u8 = 0xF;

/// Largest value of bits 248..252 of a shifted public-key hash.
///
/// Hashes above this produce serials outside the valid serial range and are
/// rejected rather than reduced.
pub const MAX_SERIAL_HIGH_BITS: u8 = 0x0C;

/// Position of the range-checked bits of a shifted public-key hash.
pub const SERIAL_RANGE_SHIFT: u32 = 248;

/// Bound on the commitment search loop in coin minting.
pub const MAX_COINMINT_ATTEMPTS: u32 = 10_000;

/// Miller-Rabin rounds used while searching for a prime coin commitment.
pub const ZEROCOIN_MINT_PRIME_PARAM: usize = 20;

/// Default number of serial-number signature of knowledge rounds.
pub const DEFAULT_ZKP_ITERATIONS: usize = 20;

/// Upper bound on rounds: each round consumes one bit of a 256-bit hash.
pub const MAX_ZKP_ITERATIONS: usize = 256;

/// Hash length parameter committed into every context transcript.
pub const ZKP_HASH_LEN: u32 = 80;

/// Accumulator proof statistical security parameter `k'`.
pub const ACCPROOF_KPRIME: u32 = 160;

/// Accumulator proof statistical security parameter `k''`.
pub const ACCPROOF_KDPRIME: u32 = 128;

/// Challenge size, in bits, of the commitment equality proof.
pub const COMMITMENT_EQUALITY_CHALLENGE_SIZE: u64 = 256;

/// Statistical hiding margin, in bits, of the commitment equality proof.
pub const COMMITMENT_EQUALITY_SECMARGIN: u64 = 512;

/// Leading transcript tag of the commitment equality proof.
pub const COMMITMENT_EQUALITY_TAG: &str = "COMMITMENT_EQUALITY_PROOF";

/// Separator written between commitment equality transcript fields.
pub const TRANSCRIPT_SEPARATOR: &str = "||";
