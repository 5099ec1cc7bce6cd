//! Canonical byte encoding.
//!
//! Wire serialization and Fiat-Shamir transcripts share one encoding, so
//! both sinks implement [`Encoder`]. Integers are little-endian, lengths and
//! counts are compact sizes, big integers are length-prefixed
//! sign-magnitude byte strings, and strings are length-prefixed bytes.

use alloc::vec::Vec;

use num_bigint::{BigInt, BigUint, Sign};

use crate::{
    error::WireError,
    primitives::{Hash256, bignum},
};

/// A sink for canonically encoded values.
pub(crate) trait Encoder {
    /// Append raw bytes.
    fn put(&mut self, bytes: &[u8]);

    fn put_bool(&mut self, value: bool) {
        self.put(&[u8::from(value)]);
    }

    fn put_u32(&mut self, value: u32) {
        self.put(&value.to_le_bytes());
    }

    /// Bitcoin-style variable-length integer.
    fn put_compact_size(&mut self, value: u64) {
        let le = value.to_le_bytes();
        match value {
            0..=0xfc => self.put(le.get(..1).unwrap_or_default()),
            0xfd..=0xffff => {
                self.put(&[0xfd]);
                self.put(le.get(..2).unwrap_or_default());
            },
            0x1_0000..=0xffff_ffff => {
                self.put(&[0xfe]);
                self.put(le.get(..4).unwrap_or_default());
            },
            _ => {
                self.put(&[0xff]);
                self.put(&le);
            },
        }
    }

    fn put_var_bytes(&mut self, bytes: &[u8]) {
        self.put_compact_size(u64::try_from(bytes.len()).unwrap_or(u64::MAX));
        self.put(bytes);
    }

    fn put_str(&mut self, text: &str) {
        self.put_var_bytes(text.as_bytes());
    }

    fn put_bignum(&mut self, value: &BigInt) {
        self.put_var_bytes(&bignum::to_vch(value));
    }

    fn put_biguint(&mut self, value: &BigUint) {
        self.put_var_bytes(&bignum::to_vch_unsigned(value));
    }

    fn put_bignums(&mut self, values: &[BigInt]) {
        self.put_compact_size(u64::try_from(values.len()).unwrap_or(u64::MAX));
        for value in values {
            self.put_bignum(value);
        }
    }

    fn put_hash(&mut self, hash: &Hash256) {
        self.put(hash.as_bytes());
    }
}

impl Encoder for Vec<u8> {
    fn put(&mut self, bytes: &[u8]) {
        self.extend_from_slice(bytes);
    }
}

/// A cursor over an encoded buffer.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Reader<'buf> {
    bytes: &'buf [u8],
    offset: usize,
}

impl<'buf> Reader<'buf> {
    pub(crate) const fn new(bytes: &'buf [u8]) -> Self {
        Self { bytes, offset: 0 }
    }

    pub(crate) fn remaining(&self) -> usize {
        self.bytes.len().saturating_sub(self.offset)
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    fn take(&mut self, needed: usize) -> Result<&'buf [u8], WireError> {
        let end = self.offset.saturating_add(needed);
        let taken = self
            .bytes
            .get(self.offset..end)
            .ok_or(WireError::UnexpectedEnd {
                offset: self.offset,
                needed,
                remaining: self.remaining(),
            })?;
        self.offset = end;
        Ok(taken)
    }

    pub(crate) fn read_array<const N: usize>(&mut self) -> Result<[u8; N], WireError> {
        let mut array = [0u8; N];
        array.copy_from_slice(self.take(N)?);
        Ok(array)
    }

    pub(crate) fn read_u8(&mut self) -> Result<u8, WireError> {
        let [byte] = self.read_array()?;
        Ok(byte)
    }

    pub(crate) fn read_u32(&mut self) -> Result<u32, WireError> {
        Ok(u32::from_le_bytes(self.read_array()?))
    }

    pub(crate) fn read_compact_size(&mut self) -> Result<u64, WireError> {
        Ok(match self.read_u8()? {
            0xfd => u64::from(u16::from_le_bytes(self.read_array()?)),
            0xfe => u64::from(u32::from_le_bytes(self.read_array()?)),
            0xff => u64::from_le_bytes(self.read_array()?),
            small => u64::from(small),
        })
    }

    pub(crate) fn read_len(&mut self) -> Result<usize, WireError> {
        let len = self.read_compact_size()?;
        usize::try_from(len).map_err(|_err| WireError::Overflow(len))
    }

    pub(crate) fn read_var_bytes(&mut self) -> Result<&'buf [u8], WireError> {
        let len = self.read_len()?;
        self.take(len)
    }

    pub(crate) fn read_bignum(&mut self) -> Result<BigInt, WireError> {
        Ok(bignum::from_vch(self.read_var_bytes()?))
    }

    /// A big integer that must not be negative.
    pub(crate) fn read_biguint(&mut self) -> Result<BigUint, WireError> {
        let (sign, magnitude) = self.read_bignum()?.into_parts();
        if sign == Sign::Minus {
            return Err(WireError::NegativeValue);
        }
        Ok(magnitude)
    }

    /// A compact-size count followed by that many big integers.
    pub(crate) fn read_bignums(&mut self) -> Result<Vec<BigInt>, WireError> {
        let count = self.read_len()?;
        // each element occupies at least its length byte
        if count > self.remaining() {
            return Err(WireError::UnexpectedEnd {
                offset: self.offset,
                needed: count,
                remaining: self.remaining(),
            });
        }
        (0..count).map(|_| self.read_bignum()).collect()
    }

    pub(crate) fn read_hash(&mut self) -> Result<Hash256, WireError> {
        Ok(Hash256::from(self.read_array::<32>()?))
    }

    /// Consume the reader, rejecting unread bytes.
    pub(crate) fn finish(self) -> Result<(), WireError> {
        match self.remaining() {
            0 => Ok(()),
            trailing => Err(WireError::TrailingBytes(trailing)),
        }
    }
}
