//! Arithmetic and hashing building blocks.

pub(crate) mod bignum;
mod hash;
pub(crate) mod prime;
pub(crate) mod transcript;

pub use hash::Hash256;
