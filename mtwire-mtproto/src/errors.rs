use std::{fmt, io};

use mtwire_tl_types::{Registry, deserialize, serialize};

/// Errors produced while building or taking apart MTProto messages.
#[allow(missing_docs)]
#[derive(Debug)]
pub enum Error {
    /// The TL body could not be decoded.
    Decode(deserialize::Error),
    /// A value could not be encoded.
    Encode(serialize::Error),
    /// A plaintext envelope carried a non-zero `auth_key_id`.
    InvalidAuthKeyId { got: i64 },
    /// A length field claims more bytes than the input holds.
    LengthMismatch { declared: usize, available: usize },
    /// The SHA-1 prefix of a hashed payload does not match its contents.
    HashMismatch { got: [u8; 20], expected: [u8; 20] },
    /// Compressing or inflating a `gzip_packed` body failed.
    Gzip(io::Error),
    /// The system random source is unavailable.
    Random(getrandom::Error),
}

impl Error {
    /// Like `Display`, but renders command ids through `registry`.
    pub fn describe(&self, registry: &Registry) -> String {
        match self {
            Self::Decode(e) => e.describe(registry),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Decode(e) => write!(f, "decode: {e}"),
            Self::Encode(e) => write!(f, "encode: {e}"),
            Self::InvalidAuthKeyId { got } => {
                write!(f, "plaintext message has auth_key_id {got:#018x}, expected 0")
            }
            Self::LengthMismatch { declared, available } => {
                write!(f, "length field says {declared} bytes but only {available} remain")
            }
            Self::HashMismatch { got, expected } => {
                write!(f, "payload hash mismatch: got {got:02x?}, expected {expected:02x?}")
            }
            Self::Gzip(e) => write!(f, "gzip: {e}"),
            Self::Random(e) => write!(f, "random source: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Decode(e) => Some(e),
            Self::Encode(e) => Some(e),
            Self::Gzip(e) => Some(e),
            Self::Random(e) => Some(e),
            _ => None,
        }
    }
}

impl From<deserialize::Error> for Error {
    fn from(e: deserialize::Error) -> Self { Self::Decode(e) }
}

impl From<serialize::Error> for Error {
    fn from(e: serialize::Error) -> Self { Self::Encode(e) }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self { Self::Gzip(e) }
}

impl From<getrandom::Error> for Error {
    fn from(e: getrandom::Error) -> Self { Self::Random(e) }
}

/// Specialized `Result` for this crate.
pub type Result<T> = std::result::Result<T, Error>;
