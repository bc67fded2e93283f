//! # mtwire, MTProto TL wire codec
//!
//! `mtwire` encodes and decodes the MTProto Type Language binary format and
//! keeps a registry of command ids built from schema text. It is made of
//! focused sub-crates wired together here for convenience:
//!
//! | Sub-crate          | Role                                                  |
//! |--------------------|-------------------------------------------------------|
//! | `mtwire-tl-parser` | Parse `.tl` schema text into definitions              |
//! | `mtwire-tl-types`  | `Writer`/`Cursor` codec, `Registry`, typed combinators |
//! | `mtwire-mtproto`   | Plaintext envelope, containers, gzip, hashed payloads |
//!
//! ## Quick start
//!
//! ```rust
//! use mtwire::tl::{functions, Registry, Serializable};
//! use mtwire::mtproto::{MessageId, PlainMessage};
//!
//! let registry = Registry::mtproto().expect("built-in schema");
//!
//! let body = functions::ReqPq { nonce: [0; 16] }.to_bytes().unwrap();
//! let wire = PlainMessage::new(MessageId::from_clock(1), body).to_bytes().unwrap();
//!
//! let (msg, _) = PlainMessage::from_bytes(&wire).unwrap();
//! assert_eq!(registry.describe_payload(&msg.body), "req_pq#60469778");
//! ```
//!
//! ## Extending the registry
//!
//! Load additional schema text with [`tl::Registry::load`]; ids that are
//! already known are shadowed by the newer line.

#![deny(unsafe_code)]
#![warn(missing_docs)]

/// Re-export of [`mtwire_tl_types`]: codec, registry and typed combinators.
pub use mtwire_tl_types as tl;

/// Re-export of [`mtwire_mtproto`]: message-level shapes.
pub use mtwire_mtproto as mtproto;

/// Re-export of [`mtwire_tl_parser`] (requires `feature = "parser"`).
#[cfg(feature = "parser")]
pub use mtwire_tl_parser as parser;

pub use mtwire_tl_types::{Cursor, Deserializable, Registry, Serializable, Writer};
