use std::fmt;
use std::str::FromStr;

use crate::errors::{ParamParseError, ParseError};
use crate::tl::{Category, Parameter, Type};

/// A single schema line: a constructor, an RPC method or an abstract type.
///
/// For example:
/// ```text
/// pong#347773c5 msg_id:long ping_id:long = Pong;
/// ```
/// becomes a `Definition` with `name = "pong"`, `id = Some(0x347773c5)`,
/// `params = [msg_id:long, ping_id:long]` and `ty = Some(Pong)`.
///
/// Lines without `#id` (`long ? = Long;`, `vector {t:Type} # [ t ] = Vector t;`)
/// only record their name and result type; their parameter section uses
/// syntax the wire codec never needs and is not interpreted.
#[derive(Clone, Debug, PartialEq)]
pub struct Definition {
    /// Namespace parts.  Empty when the definition is in the global namespace.
    pub namespace: Vec<String>,

    /// The combinator name without namespace (e.g. `"req_pq"`).
    pub name: String,

    /// 32-bit command id from `#xxxxxxxx`, if the line declares one.
    pub id: Option<u32>,

    /// Ordered list of parameters (identified combinators only).
    pub params: Vec<Parameter>,

    /// The type after `=`.
    pub ty: Option<Type>,

    /// Whether this is a data constructor or an RPC function.
    pub category: Category,
}

impl Definition {
    /// Returns `namespace.name` joined with dots.
    pub fn full_name(&self) -> String {
        let cap = self.namespace.iter().map(|ns| ns.len() + 1).sum::<usize>() + self.name.len();
        let mut s = String::with_capacity(cap);
        for ns in &self.namespace {
            s.push_str(ns);
            s.push('.');
        }
        s.push_str(&self.name);
        s
    }
}

impl fmt::Display for Definition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.full_name())?;
        if let Some(id) = self.id {
            write!(f, "#{id:08x}")?;
        }

        let mut generics: Vec<&str> = Vec::new();
        for p in &self.params {
            p.ty.collect_generic_refs(&mut generics);
        }
        generics.sort_unstable();
        generics.dedup();
        for g in generics {
            write!(f, " {{{g}:Type}}")?;
        }

        for p in &self.params {
            write!(f, " {p}")?;
        }
        if let Some(ty) = &self.ty {
            write!(f, " = {ty}")?;
        }
        Ok(())
    }
}

fn parse_id(hex: &str) -> Result<u32, ParseError> {
    if hex.len() != 8 {
        return Err(ParseError::InvalidIdLength { id: hex.to_owned() });
    }
    // `from_str_radix` alone would also accept a leading `+`
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(ParseError::InvalidId { id: hex.to_owned() });
    }
    u32::from_str_radix(hex, 16).map_err(|_| ParseError::InvalidId { id: hex.to_owned() })
}

impl FromStr for Definition {
    type Err = ParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(ParseError::Empty);
        }

        // Split head (name + optional id) from the rest
        let (head, rest) = match raw.split_once(char::is_whitespace) {
            Some((h, r)) => (h, r.trim_start()),
            None => (raw, ""),
        };

        let (full_name, explicit_id) = match head.split_once('#') {
            Some((n, id)) => (n, Some(id)),
            None => (head, None),
        };

        let (namespace, name) = match full_name.rsplit_once('.') {
            Some((ns_part, n)) => (
                ns_part.split('.').map(String::from).collect::<Vec<_>>(),
                n,
            ),
            None => (Vec::new(), full_name),
        };

        if namespace.iter().any(|p| p.is_empty()) || name.is_empty() {
            return Err(ParseError::MissingName);
        }

        let id = explicit_id.map(parse_id).transpose()?;

        let (params_str, ty_str) = rest.split_once('=').unwrap_or((rest, ""));
        let mut ty: Option<Type> = ty_str.split_whitespace().next().and_then(|t| t.parse().ok());

        if id.is_none() {
            return Ok(Definition {
                namespace,
                name: name.to_owned(),
                id: None,
                params: Vec::new(),
                ty,
                category: Category::Types,
            });
        }

        // Only the head is binding for an identified line. Parameter syntax
        // this parser does not model (`#`, `[ t ]`, ...) leaves `params` empty.
        let (params, type_defs) = parse_params(params_str).unwrap_or_default();

        // If the result type is itself a declared generic, mark it
        if let Some(ty) = ty.as_mut() {
            if type_defs.contains(&ty.name) {
                ty.generic_ref = true;
            }
        }

        Ok(Definition {
            namespace,
            name: name.to_owned(),
            id,
            params,
            ty,
            category: Category::Types, // caller sets the real category
        })
    }
}

/// Parse the parameter section, returning the parameters and the names of
/// the `{X:Type}` generics it declares.
fn parse_params(src: &str) -> Result<(Vec<Parameter>, Vec<String>), ParamParseError> {
    let mut type_defs: Vec<String> = Vec::new();
    let mut params = Vec::new();
    for token in src.split_whitespace() {
        match Parameter::from_str(token) {
            // `{X:Type}` → record the generic name and skip
            Err(ParamParseError::TypeDef { name }) => type_defs.push(name),
            Ok(p) => {
                let mut refs = Vec::new();
                p.ty.collect_generic_refs(&mut refs);
                if refs.iter().any(|r| !type_defs.iter().any(|d| d == r)) {
                    return Err(ParamParseError::MissingDef);
                }
                params.push(p);
            }
            Err(e) => return Err(e),
        }
    }
    Ok((params, type_defs))
}
