//! The plaintext MTProto envelope.

use std::time::{SystemTime, UNIX_EPOCH};

use mtwire_tl_types::{Cursor, Writer, serialize};

use crate::errors::{Error, Result};

/// A 64-bit MTProto message identifier.
///
/// The upper 32 bits are the Unix time the message was created; the lower 32
/// bits distinguish messages created within the same second. Client message
/// ids have their two least significant bits clear.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct MessageId(pub i64);

impl MessageId {
    /// A client message id for the current time.
    ///
    /// `counter` must differ between calls within one second; the caller
    /// (normally a session) owns it.
    pub fn from_clock(counter: u32) -> Self {
        let unix_secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();
        Self(((unix_secs << 32) | (u64::from(counter) << 2)) as i64)
    }

    /// Seconds since the Unix epoch encoded in the id.
    pub fn unix_secs(self) -> u32 {
        (self.0 as u64 >> 32) as u32
    }
}

/// A message sent before an auth key exists:
///
/// ```text
/// auth_key_id:long  (always 0)
/// message_id:long
/// message_data_length:int
/// message_data:bytes
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct PlainMessage {
    /// Identifier of this message.
    pub msg_id: MessageId,
    /// The serialized TL body (command id + fields).
    pub body: Vec<u8>,
}

impl PlainMessage {
    /// Size of the fixed header before the body.
    pub const HEADER_LEN: usize = 8 + 8 + 4;

    /// Wrap an encoded body.
    pub fn new(msg_id: MessageId, body: Vec<u8>) -> Self {
        Self { msg_id, body }
    }

    /// Encode the envelope.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let len = u32::try_from(self.body.len()).map_err(|_| serialize::Error::ContractViolation {
            field: "message body length",
            value: self.body.len() as u64,
            max: u64::from(u32::MAX),
        })?;
        let mut w = Writer::with_capacity(Self::HEADER_LEN + self.body.len());
        w.write_i64(0);
        w.write_i64(self.msg_id.0);
        w.write_u32(len);
        w.write_raw(&self.body);
        Ok(w.into_bytes())
    }

    /// Decode an envelope from the start of `bytes`, returning it together
    /// with the number of bytes it occupied.
    pub fn from_bytes(bytes: &[u8]) -> Result<(Self, usize)> {
        let mut cur = Cursor::from_slice(bytes);

        let auth_key_id = cur.read_i64()?;
        if auth_key_id != 0 {
            return Err(Error::InvalidAuthKeyId { got: auth_key_id });
        }
        let msg_id = MessageId(cur.read_i64()?);

        let declared = cur.read_u32()? as usize;
        if declared > cur.remaining() {
            return Err(Error::LengthMismatch { declared, available: cur.remaining() });
        }
        let body = cur.take(declared)?.to_vec();

        log::trace!("[mtwire] plaintext message {:#x}: {declared} byte body", msg_id.0);
        Ok((Self { msg_id, body }, cur.pos()))
    }

    /// Leading command id of the body, `0` if the body is too short.
    pub fn body_id(&self) -> u32 {
        mtwire_tl_types::command_of_payload(&self.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_ids_are_client_ids() {
        let id = MessageId::from_clock(5);
        assert_eq!(id.0 & 0b11, 0);
        assert_eq!(id.0 as u32, 5 << 2);
        assert!(id.unix_secs() > 1_600_000_000);
    }

    #[test]
    fn header_layout() {
        let msg = PlainMessage::new(MessageId(0x0102030405060708), vec![0xaa, 0xbb]);
        let wire = msg.to_bytes().unwrap();
        assert_eq!(wire.len(), PlainMessage::HEADER_LEN + 2);
        assert_eq!(&wire[..8], &[0u8; 8]);
        assert_eq!(&wire[8..16], &0x0102030405060708i64.to_le_bytes());
        assert_eq!(&wire[16..20], &2u32.to_le_bytes());
        assert_eq!(&wire[20..], &[0xaa, 0xbb]);
    }
}
