//! MTProto TL wire codec and command-id registry.
//!
//! # Overview
//!
//! | Item            | Contents                                                   |
//! |-----------------|------------------------------------------------------------|
//! | [`Writer`]      | Append-only encoder for every TL primitive                 |
//! | [`Cursor`]      | Strict decoder, the exact mirror of [`Writer`]             |
//! | [`Registry`]    | Command id → combinator name table built from schema text  |
//! | [`types`]       | Bare constructors of the MTProto service schema            |
//! | [`enums`]       | Boxed types as `enum`s dispatching on the command id       |
//! | [`functions`]   | RPC methods implementing [`RemoteCall`]                    |
//!
//! # Usage
//!
//! ```rust
//! use mtwire_tl_types::{functions, Deserializable, Registry, Serializable};
//!
//! let registry = Registry::mtproto().expect("built-in schema");
//!
//! let bytes = functions::Ping { ping_id: 42 }.to_bytes().unwrap();
//! assert_eq!(registry.describe_payload(&bytes), "ping#7abe77ec");
//!
//! let back = functions::Ping::from_bytes(&bytes).unwrap();
//! assert_eq!(back.ping_id, 42);
//! ```

#![deny(unsafe_code)]
#![allow(clippy::large_enum_variant)]

#[macro_use]
mod macros;

pub mod deserialize;
pub mod registry;
pub mod serialize;
mod wire;

#[cfg(feature = "tl-mtproto")]
pub mod enums;
#[cfg(feature = "tl-mtproto")]
pub mod functions;
#[cfg(feature = "tl-mtproto")]
pub mod types;

pub use deserialize::{Cursor, Deserializable};
pub use registry::{Combinator, Registry, SchemaError, SharedRegistry};
pub use serialize::{Serializable, Writer};
pub use wire::{BOOL_FALSE_ID, BOOL_TRUE_ID, MAX_BYTES_LEN, VECTOR_ID, command_of_payload, padding_of};

/// The built-in MTProto service schema text.
#[cfg(feature = "tl-mtproto")]
pub const MTPROTO_SCHEMA: &str = include_str!("../tl/mtproto.tl");

/// Bare vector, `vector` (lowercase) as opposed to the boxed `Vector`.
///
/// A count followed by the items, without the `0x1cb5c415` header.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RawVec<T>(pub Vec<T>);

/// An already-encoded `Object` (e.g. the `result` of `rpc_result`).
///
/// Decoding takes every remaining byte; encoding writes them verbatim.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Blob(pub Vec<u8>);

impl From<Vec<u8>> for Blob {
    fn from(v: Vec<u8>) -> Self { Self(v) }
}

impl Blob {
    /// Leading command id of the wrapped object, `0` if too short.
    pub fn command_id(&self) -> u32 {
        command_of_payload(&self.0)
    }
}

// ─── Core traits ──────────────────────────────────────────────────────────────

/// Every schema combinator with a `#id` has a unique 32-bit command id.
pub trait Identifiable {
    /// The command id as written in the schema.
    const CONSTRUCTOR_ID: u32;
    /// The combinator name as written in the schema.
    const NAME: &'static str;
}

/// Marks a function type that can be sent as an RPC call.
///
/// `Return` is the type the server responds with.
pub trait RemoteCall: Serializable {
    /// The deserialized response type.
    type Return: Deserializable;
}
