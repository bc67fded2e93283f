//! `SHA1(data) ‖ data ‖ padding` payloads.
//!
//! The key exchange wraps inner data (`p_q_inner_data`, `client_DH_inner_data`,
//! the server's `server_DH_inner_data`) this way before encryption. The
//! padding is random and brings the total to a multiple of 16 bytes, so a
//! reader must decode the inner value to learn where the hashed part ends.

use mtwire_tl_types::{Cursor, Deserializable, Serializable};
use sha1::{Digest, Sha1};

use crate::errors::{Error, Result};
use crate::nonce;

/// Length of the SHA-1 prefix.
pub const HASH_LEN: usize = 20;

fn sha1(data: &[u8]) -> [u8; HASH_LEN] {
    let mut sha = Sha1::new();
    sha.update(data);
    sha.finalize().into()
}

/// Prefix `data` with its SHA-1 and append random padding up to a multiple
/// of 16 bytes.
pub fn with_hash(data: &[u8]) -> Result<Vec<u8>> {
    let pad_len = (16 - (HASH_LEN + data.len()) % 16) % 16;

    let mut out = Vec::with_capacity(HASH_LEN + data.len() + pad_len);
    out.extend_from_slice(&sha1(data));
    out.extend_from_slice(data);

    let mut padding = [0u8; 16];
    nonce::fill(&mut padding[..pad_len])?;
    out.extend_from_slice(&padding[..pad_len]);
    Ok(out)
}

/// [`with_hash`] applied to the encoding of `value`.
pub fn encode_hashed<T: Serializable>(value: &T) -> Result<Vec<u8>> {
    with_hash(&value.to_bytes()?)
}

/// Decode a `T` that follows a SHA-1 prefix and check the hash against
/// exactly the bytes `T` occupied. Trailing padding is ignored.
pub fn decode_hashed<T: Deserializable>(bytes: &[u8]) -> Result<T> {
    if bytes.len() < HASH_LEN {
        return Err(Error::LengthMismatch { declared: HASH_LEN, available: bytes.len() });
    }
    let (got, rest) = bytes.split_at(HASH_LEN);

    let mut cursor = Cursor::from_slice(rest);
    let value = T::deserialize(&mut cursor)?;

    let expected = sha1(&rest[..cursor.pos()]);
    if got != expected {
        let mut got_arr = [0u8; HASH_LEN];
        got_arr.copy_from_slice(got);
        return Err(Error::HashMismatch { got: got_arr, expected });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_is_block_aligned() {
        for len in 0..40 {
            let out = with_hash(&vec![7u8; len]).unwrap();
            assert_eq!(out.len() % 16, 0, "len {len}");
            assert!(out.len() >= HASH_LEN + len);
            assert_eq!(&out[HASH_LEN..HASH_LEN + len], vec![7u8; len].as_slice());
        }
    }

    #[test]
    fn short_input_is_length_mismatch() {
        assert!(matches!(
            decode_hashed::<i64>(&[0u8; 10]),
            Err(Error::LengthMismatch { declared: 20, available: 10 })
        ));
    }
}
