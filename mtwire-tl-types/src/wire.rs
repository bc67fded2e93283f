//! Constants and length arithmetic shared by [`crate::Writer`] and [`crate::Cursor`].

/// Command id of the boxed `Vector<T>` header.
pub const VECTOR_ID: u32 = 0x1cb5c415;

/// `boolTrue#997275b5 = Bool`
pub const BOOL_TRUE_ID: u32 = 0x997275b5;

/// `boolFalse#bc799737 = Bool`
pub const BOOL_FALSE_ID: u32 = 0xbc799737;

/// Largest payload a `bytes`/`string` field can carry (3-byte length).
pub const MAX_BYTES_LEN: usize = 0xff_ffff;

/// First byte of the 4-byte long-form length prefix.
pub(crate) const LONG_PREFIX: u8 = 0xfe;

/// Longest payload that still fits the 1-byte prefix.
pub(crate) const MAX_SHORT_LEN: usize = 253;

/// Zero bytes needed after `len` bytes to reach a 4-byte boundary.
pub const fn padding_of(len: usize) -> usize {
    (4 - len % 4) % 4
}

/// Size of the length prefix written before a `len`-byte payload.
pub(crate) const fn prefix_len(len: usize) -> usize {
    if len <= MAX_SHORT_LEN { 1 } else { 4 }
}

/// Leading command id of an encoded boxed value, or `0` when `payload` is
/// shorter than four bytes.
pub fn command_of_payload(payload: &[u8]) -> u32 {
    match payload.first_chunk::<4>() {
        Some(b) => u32::from_le_bytes(*b),
        None => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn padding_rounds_up_to_four() {
        assert_eq!(padding_of(0), 0);
        assert_eq!(padding_of(1), 3);
        assert_eq!(padding_of(4), 0);
        assert_eq!(padding_of(258), 2);
    }

    #[test]
    fn prefix_switches_at_254() {
        assert_eq!(prefix_len(253), 1);
        assert_eq!(prefix_len(254), 4);
    }

    #[test]
    fn short_payload_has_no_command() {
        assert_eq!(command_of_payload(&[0xec, 0x77]), 0);
        assert_eq!(command_of_payload(&[0xec, 0x77, 0xbe, 0x7a, 0xff]), 0x7abe77ec);
    }
}
