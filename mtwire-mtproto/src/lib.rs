//! MTProto message-level shapes built on the TL codec.
//!
//! This crate handles:
//! * The plaintext envelope used before an auth key exists
//! * `msg_container` and `gzip_packed` bodies
//! * SHA-1 hashed payloads as used by the key exchange
//! * Decoding any service message into a typed value
//!
//! It performs no I/O: every function takes and returns byte slices.

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod container;
mod errors;
pub mod gzip;
pub mod hashed;
pub mod message;
pub mod nonce;
pub mod service;

pub use errors::{Error, Result};
pub use message::{MessageId, PlainMessage};
pub use service::ServiceMessage;
