//! Parser for MTProto [Type Language] (TL) schema text.
//!
//! Turns schema lines such as
//!
//! ```text
//! ping#7abe77ec ping_id:long = Pong;
//! ```
//!
//! into structured [`Definition`]s. The command id after `#` is optional;
//! lines without one (abstract or built-in types like `int ? = Int;`) still
//! parse, they just carry `id: None` and are never indexed by a registry.
//!
//! # Quick start
//!
//! ```rust
//! use mtwire_tl_parser::parse_tl_file;
//!
//! let src = "pong#347773c5 msg_id:long ping_id:long = Pong;";
//! for def in parse_tl_file(src) {
//!     println!("{:#?}", def.unwrap());
//! }
//! ```
//!
//! [Type Language]: https://core.telegram.org/mtproto/TL

#![deny(unsafe_code)]
#![warn(missing_docs)]

/// Parse error types for TL schema parsing.
pub mod errors;
pub mod tl;
mod iterator;

use errors::LineError;
use tl::Definition;

/// Parses a complete TL schema, yielding [`Definition`]s one line at a time.
///
/// Blank lines and lines starting with `//` are skipped. Lines starting with
/// `---` are section markers; `---functions---` and `---types---` switch the
/// [`tl::Category`] applied to the following definitions.
///
/// Returns an iterator of `Result<Definition, LineError>` so callers can
/// decide whether to skip or hard-fail on bad lines.
pub fn parse_tl_file(contents: &str) -> impl Iterator<Item = Result<Definition, LineError>> + '_ {
    iterator::TlIterator::new(contents)
}
