//! Command-id registry populated from TL schema text.
//!
//! The registry maps 32-bit command ids to combinator names. It is used to
//! render payloads for diagnostics and is the source of truth for which ids
//! exist in the loaded protocol version.
//!
//! ```rust
//! use mtwire_tl_types::Registry;
//!
//! let mut reg = Registry::new();
//! reg.load("ping#7abe77ec ping_id:long = Pong;").unwrap();
//! assert_eq!(reg.describe(0x7abe77ec), "ping#7abe77ec");
//! assert_eq!(reg.describe(0xdeadbeef), "#deadbeef");
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard};

use mtwire_tl_parser::errors::LineError;
use mtwire_tl_parser::parse_tl_file;
use mtwire_tl_parser::tl::{Category, Definition};

use crate::wire::command_of_payload;

// ─── SchemaError ─────────────────────────────────────────────────────────────

/// Malformed schema text. For the built-in schema this is a defect in the
/// crate itself; callers should refuse to start rather than continue with a
/// half-loaded registry.
#[derive(Clone, Debug, PartialEq)]
pub struct SchemaError(pub LineError);

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid schema: {}", self.0)
    }
}

impl std::error::Error for SchemaError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.0)
    }
}

impl From<LineError> for SchemaError {
    fn from(e: LineError) -> Self { Self(e) }
}

// ─── Combinator ──────────────────────────────────────────────────────────────

/// One registered `name#id` pair.
#[derive(Clone, Debug, PartialEq)]
pub struct Combinator {
    pub id: u32,
    pub name: String,
    /// The parsed schema line, when registered from schema text.
    pub definition: Option<Definition>,
}

impl Combinator {
    /// Constructor or RPC method, when known.
    pub fn category(&self) -> Option<Category> {
        self.definition.as_ref().map(|d| d.category)
    }
}

impl fmt::Display for Combinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{:08x}", self.name, self.id)
    }
}

// ─── Registry ────────────────────────────────────────────────────────────────

/// Append-only table of known combinators.
///
/// Build it once at startup ([`Registry::mtproto`] or [`Registry::load`]) and
/// pass `&Registry` to whatever needs lookups. Mutation needs `&mut self`, so
/// a shared registry is read-only unless wrapped in a [`SharedRegistry`].
#[derive(Clone, Debug, Default)]
pub struct Registry {
    /// Every registration in order, duplicates included.
    combinators: Vec<Combinator>,
    /// id → index of the latest registration for that id.
    by_id: HashMap<u32, usize>,
}

impl Registry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry loaded with the built-in MTProto service schema.
    #[cfg(feature = "tl-mtproto")]
    pub fn mtproto() -> Result<Self, SchemaError> {
        Self::from_schema(crate::MTPROTO_SCHEMA)
    }

    /// A registry loaded with `schema`.
    pub fn from_schema(schema: &str) -> Result<Self, SchemaError> {
        let mut reg = Self::new();
        reg.load(schema)?;
        Ok(reg)
    }

    /// Parse `schema` and register every identified combinator in it.
    ///
    /// The whole text is parsed before anything is registered: on error the
    /// registry is left untouched. Returns how many combinators were added.
    pub fn load(&mut self, schema: &str) -> Result<usize, SchemaError> {
        let defs = parse_tl_file(schema).collect::<Result<Vec<_>, _>>()?;

        let mut added = 0;
        for def in defs {
            let Some(id) = def.id else { continue };
            self.insert(Combinator { id, name: def.full_name(), definition: Some(def) });
            added += 1;
        }
        log::debug!("[mtwire] loaded {added} combinators ({} total)", self.len());
        Ok(added)
    }

    /// Register `name` for `id` without a schema line.
    ///
    /// Returns the descriptor this registration shadows, if `id` was already
    /// known. Later lookups see the newest registration.
    pub fn register(&mut self, id: u32, name: impl Into<String>) -> Option<Combinator> {
        self.insert(Combinator { id, name: name.into(), definition: None })
    }

    fn insert(&mut self, combinator: Combinator) -> Option<Combinator> {
        let id = combinator.id;
        let idx = self.combinators.len();
        self.combinators.push(combinator);
        let prev = self.by_id.insert(id, idx).map(|old| self.combinators[old].clone());
        if let Some(old) = &prev {
            log::warn!(
                "[mtwire] duplicate command id #{id:08x}: {} replaces {}",
                self.combinators[idx].name,
                old.name
            );
        }
        prev
    }

    /// The latest combinator registered under `id`.
    pub fn get(&self, id: u32) -> Option<&Combinator> {
        self.by_id.get(&id).map(|&i| &self.combinators[i])
    }

    pub fn contains(&self, id: u32) -> bool {
        self.by_id.contains_key(&id)
    }

    /// All registrations in registration order, including shadowed ones.
    pub fn iter(&self) -> impl Iterator<Item = &Combinator> {
        self.combinators.iter()
    }

    /// Number of registrations, including shadowed ones.
    pub fn len(&self) -> usize {
        self.combinators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.combinators.is_empty()
    }

    /// Human-readable form of a command id:
    ///
    /// * `0` → `"none"`
    /// * known → `"name#xxxxxxxx"`
    /// * unknown → `"#xxxxxxxx"`
    pub fn describe(&self, id: u32) -> String {
        if id == 0 {
            return "none".to_owned();
        }
        match self.get(id) {
            Some(c) => c.to_string(),
            None => format!("#{id:08x}"),
        }
    }

    /// [`Registry::describe`] applied to the leading command id of `payload`.
    pub fn describe_payload(&self, payload: &[u8]) -> String {
        self.describe(command_of_payload(payload))
    }
}

// ─── SharedRegistry ──────────────────────────────────────────────────────────

/// A [`Registry`] that can still be extended after it has been shared
/// between threads.
#[derive(Clone, Debug, Default)]
pub struct SharedRegistry(Arc<RwLock<Registry>>);

impl SharedRegistry {
    pub fn new(registry: Registry) -> Self {
        Self(Arc::new(RwLock::new(registry)))
    }

    /// See [`Registry::load`]. Parsing happens before the write lock is taken.
    pub fn load(&self, schema: &str) -> Result<usize, SchemaError> {
        let staged = Registry::from_schema(schema)?;
        let added = staged.len();
        let mut reg = self.0.write().unwrap_or_else(PoisonError::into_inner);
        for c in staged.combinators {
            reg.insert(c);
        }
        Ok(added)
    }

    /// See [`Registry::register`].
    pub fn register(&self, id: u32, name: impl Into<String>) -> Option<Combinator> {
        self.0.write().unwrap_or_else(PoisonError::into_inner).register(id, name)
    }

    pub fn describe(&self, id: u32) -> String {
        self.read().describe(id)
    }

    pub fn describe_payload(&self, payload: &[u8]) -> String {
        self.read().describe_payload(payload)
    }

    /// Read access for several lookups under one lock.
    pub fn read(&self) -> RwLockReadGuard<'_, Registry> {
        self.0.read().unwrap_or_else(PoisonError::into_inner)
    }
}

impl From<Registry> for SharedRegistry {
    fn from(registry: Registry) -> Self { Self::new(registry) }
}
