//! Fiat-Shamir transcripts.

use core::fmt;

use sha2::{Digest as _, Sha256};

use super::Hash256;
use crate::wire::Encoder;

/// A streaming Fiat-Shamir transcript.
///
/// Absorbs the same canonical encoding the wire format uses and finalizes to
/// a double-SHA256 digest.
#[derive(Clone, Default)]
pub(crate) struct Transcript(Sha256);

impl Transcript {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn finalize(self) -> Hash256 {
        Hash256::from(<[u8; 32]>::from(Sha256::digest(self.0.finalize())))
    }
}

impl Encoder for Transcript {
    fn put(&mut self, bytes: &[u8]) {
        self.0.update(bytes);
    }
}

impl fmt::Debug for Transcript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Transcript")
    }
}
