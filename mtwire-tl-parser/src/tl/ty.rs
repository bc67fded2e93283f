use std::fmt;
use std::str::FromStr;

use crate::errors::ParamParseError;

/// The type of a definition or a parameter, e.g. `Vector<long>` or `%Message`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Type {
    /// Namespace components, e.g. `["help"]` for `help.Config`.
    pub namespace: Vec<String>,

    /// The type name without namespace or markers, e.g. `"Vector"`.
    pub name: String,

    /// `true` for bare types: a lowercase first letter, or an explicit `%` prefix.
    pub bare: bool,

    /// `true` when this type is a generic parameter reference (prefixed with `!`).
    pub generic_ref: bool,

    /// The generic argument, e.g. `long` in `Vector<long>`.
    pub generic_arg: Option<Box<Type>>,
}

impl Type {
    pub(crate) fn collect_generic_refs<'a>(&'a self, output: &mut Vec<&'a str>) {
        if self.generic_ref {
            output.push(&self.name);
        }
        if let Some(arg) = &self.generic_arg {
            arg.collect_generic_refs(output);
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.generic_ref {
            write!(f, "!")?;
        }
        // `%` is only needed when the name alone would read as boxed
        if self.bare && self.name.starts_with(|c: char| !c.is_ascii_lowercase()) {
            write!(f, "%")?;
        }
        for ns in &self.namespace {
            write!(f, "{ns}.")?;
        }
        write!(f, "{}", self.name)?;
        if let Some(arg) = &self.generic_arg {
            write!(f, "<{arg}>")?;
        }
        Ok(())
    }
}

impl FromStr for Type {
    type Err = ParamParseError;

    /// Parses a TL type expression such as `Vector<long>`, `%Message` or `!X`.
    ///
    /// # Examples
    /// ```
    /// use mtwire_tl_parser::tl::Type;
    /// assert!("Vector<long>".parse::<Type>().is_ok());
    /// assert!("%Message".parse::<Type>().unwrap().bare);
    /// ```
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let (raw, generic_ref) = match raw.strip_prefix('!') {
            Some(r) => (r, true),
            None => (raw, false),
        };

        let (raw, forced_bare) = match raw.strip_prefix('%') {
            Some(r) => (r, true),
            None => (raw, false),
        };

        let (name_part, generic_arg) = match raw.split_once('<') {
            Some((name, rest)) => match rest.strip_suffix('>') {
                Some(arg) => (name, Some(Box::new(Type::from_str(arg)?))),
                None => return Err(ParamParseError::InvalidGeneric),
            },
            None => (raw, None),
        };

        let (namespace, name) = match name_part.rsplit_once('.') {
            Some((ns_part, n)) => (
                ns_part.split('.').map(String::from).collect::<Vec<_>>(),
                n,
            ),
            None => (Vec::new(), name_part),
        };

        if namespace.iter().any(|p| p.is_empty()) {
            return Err(ParamParseError::Empty);
        }

        let first = name.chars().next().ok_or(ParamParseError::Empty)?;

        Ok(Self {
            namespace,
            name: name.to_owned(),
            bare: forced_bare || first.is_ascii_lowercase(),
            generic_ref,
            generic_arg,
        })
    }
}
