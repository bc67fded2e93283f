//! The [`Writer`] buffer, the [`Serializable`] trait, and primitive impls.
//!
//! Encoding follows the [MTProto Binary Serialization] rules.
//!
//! [MTProto Binary Serialization]: https://core.telegram.org/mtproto/serialize

use std::fmt;

use num_bigint::BigUint;

use crate::wire::{self, LONG_PREFIX, MAX_BYTES_LEN, VECTOR_ID};

// ─── Error ───────────────────────────────────────────────────────────────────

/// Errors that can occur during serialization.
#[derive(Clone, Debug, PartialEq)]
pub enum Error {
    /// A fixed-width field was handed the wrong number of bytes.
    InvalidLength { expected: usize, got: usize },
    /// A length or count does not fit the width of its wire field.
    ContractViolation { field: &'static str, value: u64, max: u64 },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidLength { expected, got } => {
                write!(f, "invalid length: expected {expected} bytes, got {got}")
            }
            Self::ContractViolation { field, value, max } => {
                write!(f, "{field} {value} exceeds wire maximum {max}")
            }
        }
    }
}

impl std::error::Error for Error {}

/// Specialized `Result` for serialization.
pub type Result<T> = std::result::Result<T, Error>;

// ─── Writer ──────────────────────────────────────────────────────────────────

/// Append-only TL encoder.
///
/// One writer per outgoing message; [`Writer::clear`] allows strictly
/// sequential reuse without giving back the allocation.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Writer {
    buf: Vec<u8>,
}

impl Writer {
    /// Create an empty writer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty writer with room for `capacity` bytes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self { buf: Vec::with_capacity(capacity) }
    }

    /// Create a writer that already holds the command id `id`.
    pub fn with_command(id: u32) -> Self {
        let mut w = Self::new();
        w.write_command(id);
        w
    }

    /// Reset to empty, keeping capacity.
    pub fn clear(&mut self) {
        self.buf.clear();
    }

    /// The bytes written so far. Valid until the next mutating call.
    pub fn bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Consume the writer, returning its buffer.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    /// Bytes written so far.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// True if nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Zero bytes needed to bring the buffer to a multiple of `align`.
    pub fn padding_to(&self, align: usize) -> usize {
        match self.buf.len() % align {
            0 => 0,
            r => align - r,
        }
    }

    pub fn write_byte(&mut self, v: u8) {
        self.buf.push(v);
    }

    /// Append `v` verbatim, without a length prefix.
    pub fn write_raw(&mut self, v: &[u8]) {
        self.buf.extend_from_slice(v);
    }

    pub fn zero_pad(&mut self, n: usize) {
        self.buf.resize(self.buf.len() + n, 0);
    }

    /// Low three bytes of `v`, little-endian.
    pub fn write_u24(&mut self, v: u32) -> Result<()> {
        if v as usize > MAX_BYTES_LEN {
            return Err(Error::ContractViolation {
                field: "uint24",
                value: u64::from(v),
                max: MAX_BYTES_LEN as u64,
            });
        }
        self.buf.extend_from_slice(&v.to_le_bytes()[..3]);
        Ok(())
    }

    pub fn write_u32(&mut self, v: u32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    pub fn write_i32(&mut self, v: i32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    pub fn write_u64(&mut self, v: u64) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    pub fn write_i64(&mut self, v: i64) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    pub fn write_f64(&mut self, v: f64) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    /// Command ids are plain little-endian `u32`s.
    pub fn write_command(&mut self, id: u32) {
        self.write_u32(id);
    }

    /// Exactly 16 raw bytes (`int128`, used for nonces).
    pub fn write_int128(&mut self, v: &[u8]) -> Result<()> {
        self.write_fixed(v, 16)
    }

    /// Exactly 32 raw bytes (`int256`).
    pub fn write_int256(&mut self, v: &[u8]) -> Result<()> {
        self.write_fixed(v, 32)
    }

    fn write_fixed(&mut self, v: &[u8], expected: usize) -> Result<()> {
        if v.len() != expected {
            return Err(Error::InvalidLength { expected, got: v.len() });
        }
        self.write_raw(v);
        Ok(())
    }

    /// Writes the `bytes`/`string` length prefix and returns the padding the
    /// caller owes after the payload.
    ///
    /// * `len ≤ 253`: `[len as u8]`
    /// * `len ≥ 254`: `[0xfe][len as 3 LE bytes]`
    fn write_length_prefix(&mut self, len: usize) -> Result<usize> {
        if len > MAX_BYTES_LEN {
            return Err(Error::ContractViolation {
                field: "bytes length",
                value: len as u64,
                max: MAX_BYTES_LEN as u64,
            });
        }
        let prefix = wire::prefix_len(len);
        if prefix == 1 {
            self.write_byte(len as u8);
        } else {
            self.write_byte(LONG_PREFIX);
            self.write_u24(len as u32)?;
        }
        Ok(wire::padding_of(prefix + len))
    }

    /// Length-prefixed, zero-padded byte string. The padding is derived from
    /// prefix + payload, so an aligned buffer stays aligned.
    pub fn write_bytes(&mut self, v: &[u8]) -> Result<()> {
        let pad = self.write_length_prefix(v.len())?;
        self.write_raw(v);
        self.zero_pad(pad);
        Ok(())
    }

    pub fn write_string(&mut self, v: &str) -> Result<()> {
        self.write_bytes(v.as_bytes())
    }

    /// Minimal big-endian magnitude as `bytes`; zero is a single `0x00`.
    pub fn write_bigint(&mut self, v: &BigUint) -> Result<()> {
        // `to_bytes_be` already yields `[0]` for zero
        self.write_bytes(&v.to_bytes_be())
    }

    /// Boxed `Vector<long>`.
    pub fn write_vector_u64(&mut self, v: &[u64]) -> Result<()> {
        self.write_vector_header(v.len())?;
        for el in v {
            self.write_u64(*el);
        }
        Ok(())
    }

    fn write_vector_header(&mut self, len: usize) -> Result<()> {
        let count = vector_count(len)?;
        self.write_command(VECTOR_ID);
        self.write_u32(count);
        Ok(())
    }
}

fn vector_count(len: usize) -> Result<u32> {
    u32::try_from(len).map_err(|_| Error::ContractViolation {
        field: "vector count",
        value: len as u64,
        max: u64::from(u32::MAX),
    })
}

impl AsRef<[u8]> for Writer {
    fn as_ref(&self) -> &[u8] {
        &self.buf
    }
}

// ─── Serializable ────────────────────────────────────────────────────────────

/// Serialize `self` into TL binary format.
pub trait Serializable {
    /// Appends the serialized form of `self` to `w`.
    fn serialize(&self, w: &mut Writer) -> Result<()>;

    /// Convenience: serialize into a fresh buffer.
    fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut w = Writer::new();
        self.serialize(&mut w)?;
        Ok(w.into_bytes())
    }
}

/// `true`  → `boolTrue#997275b5`
/// `false` → `boolFalse#bc799737`
impl Serializable for bool {
    fn serialize(&self, w: &mut Writer) -> Result<()> {
        w.write_command(if *self { wire::BOOL_TRUE_ID } else { wire::BOOL_FALSE_ID });
        Ok(())
    }
}

macro_rules! fixed_width {
    ($($ty:ty => $method:ident),* $(,)?) => {$(
        impl Serializable for $ty {
            fn serialize(&self, w: &mut Writer) -> Result<()> {
                w.$method(*self);
                Ok(())
            }
        }
    )*};
}

fixed_width! {
    i32 => write_i32,
    u32 => write_u32,
    i64 => write_i64,
    u64 => write_u64,
    f64 => write_f64,
}

impl Serializable for [u8; 16] {
    fn serialize(&self, w: &mut Writer) -> Result<()> {
        w.write_int128(self)
    }
}

impl Serializable for [u8; 32] {
    fn serialize(&self, w: &mut Writer) -> Result<()> {
        w.write_int256(self)
    }
}

impl Serializable for [u8] {
    fn serialize(&self, w: &mut Writer) -> Result<()> {
        w.write_bytes(self)
    }
}

impl Serializable for Vec<u8> {
    fn serialize(&self, w: &mut Writer) -> Result<()> {
        w.write_bytes(self)
    }
}

impl Serializable for str {
    fn serialize(&self, w: &mut Writer) -> Result<()> {
        w.write_string(self)
    }
}

impl Serializable for String {
    fn serialize(&self, w: &mut Writer) -> Result<()> {
        w.write_string(self)
    }
}

impl Serializable for BigUint {
    fn serialize(&self, w: &mut Writer) -> Result<()> {
        w.write_bigint(self)
    }
}

/// Boxed `Vector<T>`: prefixed with command id `0x1cb5c415`.
impl<T: Serializable> Serializable for Vec<T> {
    fn serialize(&self, w: &mut Writer) -> Result<()> {
        w.write_vector_header(self.len())?;
        for item in self {
            item.serialize(w)?;
        }
        Ok(())
    }
}

/// Bare `vector<T>`: just a count followed by items, no command id.
impl<T: Serializable> Serializable for crate::RawVec<T> {
    fn serialize(&self, w: &mut Writer) -> Result<()> {
        w.write_u32(vector_count(self.0.len())?);
        for item in &self.0 {
            item.serialize(w)?;
        }
        Ok(())
    }
}

/// Already-encoded `Object`: written verbatim.
impl Serializable for crate::Blob {
    fn serialize(&self, w: &mut Writer) -> Result<()> {
        w.write_raw(&self.0);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn u24_rejects_values_above_three_bytes() {
        let mut w = Writer::new();
        w.write_u24(0xff_ffff).unwrap();
        assert_eq!(w.bytes(), &[0xff, 0xff, 0xff]);
        assert_eq!(
            w.write_u24(0x100_0000),
            Err(Error::ContractViolation { field: "uint24", value: 0x100_0000, max: 0xff_ffff })
        );
        assert_eq!(w.len(), 3, "nothing written on failure");
    }

    #[test]
    fn oversized_bytes_write_nothing() {
        let big = vec![0u8; MAX_BYTES_LEN + 1];
        let mut w = Writer::new();
        assert!(matches!(w.write_bytes(&big), Err(Error::ContractViolation { .. })));
        assert!(w.is_empty());
    }

    #[test]
    fn padding_to_reports_remainder() {
        let mut w = Writer::new();
        assert_eq!(w.padding_to(4), 0);
        w.write_byte(1);
        assert_eq!(w.padding_to(4), 3);
        assert_eq!(w.padding_to(16), 15);
    }

    #[test]
    fn with_command_primes_buffer() {
        let w = Writer::with_command(0x60469778);
        assert_eq!(w.bytes(), &[0x78, 0x97, 0x46, 0x60]);
    }
}
