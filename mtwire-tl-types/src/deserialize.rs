//! The [`Deserializable`] trait, [`Cursor`] buffer, and primitive impls.

use std::fmt;

use num_bigint::BigUint;

use crate::registry::Registry;
use crate::wire::{self, LONG_PREFIX, MAX_SHORT_LEN, VECTOR_ID};

// ─── Error ───────────────────────────────────────────────────────────────────

/// Errors that can occur during deserialization.
#[derive(Clone, Debug, PartialEq)]
pub enum Error {
    /// Ran out of bytes before the value was fully read.
    UnexpectedEof,
    /// A fixed command id (e.g. the vector header) had the wrong value.
    TypeMismatch { expected: u32, got: u32 },
    /// Decoded a command id that doesn't match any variant of a boxed type.
    UnexpectedConstructor { id: u32 },
    /// Alignment padding after a byte string was not all zeroes.
    NonZeroPadding { pos: usize },
    /// A byte-string length prefix the encoder never produces: the reserved
    /// byte `0xff`, or a long prefix holding a length that fits the short one.
    NonCanonicalLength { pos: usize },
    /// A `string` field held invalid UTF-8.
    InvalidUtf8,
}

impl Error {
    /// Like `Display`, but renders command ids through `registry`.
    pub fn describe(&self, registry: &Registry) -> String {
        match self {
            Self::TypeMismatch { expected, got } => format!(
                "type mismatch: expected {}, got {}",
                registry.describe(*expected),
                registry.describe(*got)
            ),
            Self::UnexpectedConstructor { id } => {
                format!("unexpected constructor {}", registry.describe(*id))
            }
            other => other.to_string(),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedEof => write!(f, "unexpected end of buffer"),
            Self::TypeMismatch { expected, got } => {
                write!(f, "type mismatch: expected #{expected:08x}, got #{got:08x}")
            }
            Self::UnexpectedConstructor { id } => {
                write!(f, "unexpected constructor id: #{id:08x}")
            }
            Self::NonZeroPadding { pos } => write!(f, "non-zero padding byte at offset {pos}"),
            Self::NonCanonicalLength { pos } => {
                write!(f, "non-canonical length prefix at offset {pos}")
            }
            Self::InvalidUtf8 => write!(f, "string is not valid UTF-8"),
        }
    }
}

impl std::error::Error for Error {}

/// Specialized `Result` for deserialization.
pub type Result<T> = std::result::Result<T, Error>;

// ─── Cursor ──────────────────────────────────────────────────────────────────

/// A zero-copy cursor over an in-memory byte slice.
///
/// Every read checks the remaining length first; a failed read leaves the
/// position unspecified, so a cursor that returned an error should be dropped.
#[derive(Clone, Debug)]
pub struct Cursor<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    /// Create a cursor positioned at the start of `buf`.
    pub fn from_slice(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Current byte offset.
    pub fn pos(&self) -> usize { self.pos }

    /// Remaining bytes.
    pub fn remaining(&self) -> usize { self.buf.len() - self.pos }

    /// Borrow the next `n` bytes and advance past them.
    pub fn take(&mut self, n: usize) -> Result<&'a [u8]> {
        if n > self.remaining() {
            return Err(Error::UnexpectedEof);
        }
        let slice = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut out = [0u8; N];
        self.read_exact(&mut out)?;
        Ok(out)
    }

    /// Read a single byte.
    pub fn read_byte(&mut self) -> Result<u8> {
        Ok(self.read_array::<1>()?[0])
    }

    /// Read exactly `out.len()` bytes.
    pub fn read_exact(&mut self, out: &mut [u8]) -> Result<()> {
        out.copy_from_slice(self.take(out.len())?);
        Ok(())
    }

    /// Consume all remaining bytes.
    pub fn read_to_end(&mut self) -> &'a [u8] {
        let slice = &self.buf[self.pos..];
        self.pos = self.buf.len();
        slice
    }

    pub fn read_u24(&mut self) -> Result<u32> {
        let [a, b, c] = self.read_array::<3>()?;
        Ok(u32::from_le_bytes([a, b, c, 0]))
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        self.read_array().map(u32::from_le_bytes)
    }

    pub fn read_i32(&mut self) -> Result<i32> {
        self.read_array().map(i32::from_le_bytes)
    }

    pub fn read_u64(&mut self) -> Result<u64> {
        self.read_array().map(u64::from_le_bytes)
    }

    pub fn read_i64(&mut self) -> Result<i64> {
        self.read_array().map(i64::from_le_bytes)
    }

    pub fn read_f64(&mut self) -> Result<f64> {
        self.read_array().map(f64::from_le_bytes)
    }

    pub fn read_int128(&mut self) -> Result<[u8; 16]> {
        self.read_array()
    }

    pub fn read_int256(&mut self) -> Result<[u8; 32]> {
        self.read_array()
    }

    pub fn read_command(&mut self) -> Result<u32> {
        self.read_u32()
    }

    /// The next command id, without consuming it.
    pub fn peek_command(&self) -> Result<u32> {
        self.clone().read_command()
    }

    /// Consume a command id and check it is `expected`.
    pub fn expect_command(&mut self, expected: u32) -> Result<()> {
        match self.read_command()? {
            got if got == expected => Ok(()),
            got => Err(Error::TypeMismatch { expected, got }),
        }
    }

    /// Length-prefixed byte string, borrowed from the input.
    ///
    /// The declared length is checked against the remaining input before
    /// anything is copied, and the alignment padding must be all zeroes.
    pub fn read_bytes(&mut self) -> Result<&'a [u8]> {
        let start = self.pos;
        let first = self.read_byte()?;
        let (prefix, len) = match first {
            LONG_PREFIX => (4, self.read_u24()? as usize),
            b if b as usize <= MAX_SHORT_LEN => (1, b as usize),
            _ => return Err(Error::NonCanonicalLength { pos: start }),
        };
        if wire::prefix_len(len) != prefix {
            return Err(Error::NonCanonicalLength { pos: start });
        }

        let data = self.take(len)?;

        let pad_start = self.pos;
        let padding = self.take(wire::padding_of(prefix + len))?;
        if let Some(i) = padding.iter().position(|&b| b != 0) {
            return Err(Error::NonZeroPadding { pos: pad_start + i });
        }

        Ok(data)
    }

    pub fn read_string(&mut self) -> Result<&'a str> {
        std::str::from_utf8(self.read_bytes()?).map_err(|_| Error::InvalidUtf8)
    }

    pub fn read_bigint(&mut self) -> Result<BigUint> {
        self.read_bytes().map(BigUint::from_bytes_be)
    }

    /// Boxed `Vector<long>`.
    pub fn read_vector_u64(&mut self) -> Result<Vec<u64>> {
        let count = self.read_vector_header()?;
        let mut out = Vec::with_capacity(count.min(self.remaining() / 8));
        for _ in 0..count {
            out.push(self.read_u64()?);
        }
        Ok(out)
    }

    fn read_vector_header(&mut self) -> Result<usize> {
        self.expect_command(VECTOR_ID)?;
        Ok(self.read_u32()? as usize)
    }
}

/// Alias used by the combinator impls: `crate::deserialize::Buffer<'_, '_>`.
pub type Buffer<'a, 'b> = &'a mut Cursor<'b>;

// ─── Deserializable ──────────────────────────────────────────────────────────

/// Deserialize a value from TL binary format.
pub trait Deserializable: Sized {
    /// Read `Self` from `buf`, advancing its position.
    fn deserialize(buf: Buffer) -> Result<Self>;

    /// Convenience: deserialize from the start of a byte slice.
    fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let mut cursor = Cursor::from_slice(bytes);
        Self::deserialize(&mut cursor)
    }

    /// Deserialize from the start of `bytes`, also returning how many bytes
    /// were consumed so a caller can find the next value in a stream.
    fn from_bytes_prefix(bytes: &[u8]) -> Result<(Self, usize)> {
        let mut cursor = Cursor::from_slice(bytes);
        let value = Self::deserialize(&mut cursor)?;
        Ok((value, cursor.pos()))
    }
}

impl Deserializable for bool {
    fn deserialize(buf: Buffer) -> Result<Self> {
        match buf.read_command()? {
            wire::BOOL_TRUE_ID => Ok(true),
            wire::BOOL_FALSE_ID => Ok(false),
            id => Err(Error::UnexpectedConstructor { id }),
        }
    }
}

macro_rules! fixed_width {
    ($($ty:ty => $method:ident),* $(,)?) => {$(
        impl Deserializable for $ty {
            fn deserialize(buf: Buffer) -> Result<Self> {
                buf.$method()
            }
        }
    )*};
}

fixed_width! {
    i32 => read_i32,
    u32 => read_u32,
    i64 => read_i64,
    u64 => read_u64,
    f64 => read_f64,
    [u8; 16] => read_int128,
    [u8; 32] => read_int256,
}

impl Deserializable for Vec<u8> {
    fn deserialize(buf: Buffer) -> Result<Self> {
        buf.read_bytes().map(<[u8]>::to_vec)
    }
}

impl Deserializable for String {
    fn deserialize(buf: Buffer) -> Result<Self> {
        buf.read_string().map(str::to_owned)
    }
}

impl Deserializable for BigUint {
    fn deserialize(buf: Buffer) -> Result<Self> {
        buf.read_bigint()
    }
}

// The count comes off the wire; capacity is capped by what could possibly fit.
fn read_items<T: Deserializable>(buf: Buffer, count: usize) -> Result<Vec<T>> {
    let mut out = Vec::with_capacity(count.min(buf.remaining()));
    for _ in 0..count {
        out.push(T::deserialize(buf)?);
    }
    Ok(out)
}

impl<T: Deserializable> Deserializable for Vec<T> {
    fn deserialize(buf: Buffer) -> Result<Self> {
        let count = buf.read_vector_header()?;
        read_items(buf, count)
    }
}

impl<T: Deserializable> Deserializable for crate::RawVec<T> {
    fn deserialize(buf: Buffer) -> Result<Self> {
        let count = buf.read_u32()? as usize;
        read_items(buf, count).map(crate::RawVec)
    }
}

impl Deserializable for crate::Blob {
    fn deserialize(buf: Buffer) -> Result<Self> {
        Ok(crate::Blob(buf.read_to_end().to_vec()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declared_length_past_end_is_eof() {
        // claims 200 bytes, provides 3
        let mut cur = Cursor::from_slice(&[200, 1, 2, 3]);
        assert_eq!(cur.read_bytes(), Err(Error::UnexpectedEof));
    }

    #[test]
    fn long_prefix_past_end_is_eof() {
        let mut cur = Cursor::from_slice(&[0xfe, 0xff, 0xff, 0x00, 0xaa]);
        assert_eq!(cur.read_bytes(), Err(Error::UnexpectedEof));
    }

    #[test]
    fn missing_padding_is_eof() {
        // one-byte payload needs two padding bytes
        let mut cur = Cursor::from_slice(&[1, 0x42, 0]);
        assert_eq!(cur.read_bytes(), Err(Error::UnexpectedEof));
    }

    #[test]
    fn non_zero_padding_is_rejected() {
        let mut cur = Cursor::from_slice(&[1, 0x42, 0, 7]);
        assert_eq!(cur.read_bytes(), Err(Error::NonZeroPadding { pos: 3 }));
    }

    #[test]
    fn long_prefix_for_short_length_is_rejected() {
        let mut cur = Cursor::from_slice(&[0, 0, 0, 0, 0xfe, 1, 0, 0, 0x42, 0, 0, 0]);
        cur.read_u32().unwrap();
        assert_eq!(cur.read_bytes(), Err(Error::NonCanonicalLength { pos: 4 }));
    }

    #[test]
    fn reserved_prefix_byte_is_rejected() {
        let mut data = vec![0xffu8];
        data.extend_from_slice(&[0u8; 256]);
        let mut cur = Cursor::from_slice(&data);
        assert_eq!(cur.read_bytes(), Err(Error::NonCanonicalLength { pos: 0 }));
    }

    #[test]
    fn read_exact_fills_and_advances() {
        let mut cur = Cursor::from_slice(&[1, 2, 3, 4, 5]);
        let mut out = [0u8; 3];
        cur.read_exact(&mut out).unwrap();
        assert_eq!(out, [1, 2, 3]);
        assert_eq!(cur.pos(), 3);
        assert_eq!(cur.read_exact(&mut [0u8; 3]), Err(Error::UnexpectedEof));
    }

    #[test]
    fn peek_does_not_advance() {
        let cur = Cursor::from_slice(&[0x15, 0xc4, 0xb5, 0x1c]);
        assert_eq!(cur.peek_command(), Ok(VECTOR_ID));
        assert_eq!(cur.pos(), 0);
    }

    #[test]
    fn huge_vector_count_fails_without_allocating() {
        let mut bytes = VECTOR_ID.to_le_bytes().to_vec();
        bytes.extend(u32::MAX.to_le_bytes());
        assert_eq!(Vec::<i64>::from_bytes(&bytes), Err(Error::UnexpectedEof));
    }
}
