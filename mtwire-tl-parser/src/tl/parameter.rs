use std::fmt;
use std::str::FromStr;

use crate::errors::ParamParseError;
use crate::tl::Type;

/// A single `name:Type` field of a combinator, in declaration order.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Parameter {
    /// The field name as it appears in the schema.
    pub name: String,
    /// The declared field type.
    pub ty: Type,
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.name, self.ty)
    }
}

impl FromStr for Parameter {
    type Err = ParamParseError;

    /// Parses a single parameter token such as `nonce:int128` or
    /// `messages:vector<%Message>`.
    ///
    /// Returns `Err(ParamParseError::TypeDef { name })` for the `{X:Type}`
    /// generic definition syntax so the caller can record it.
    fn from_str(token: &str) -> Result<Self, Self::Err> {
        if let Some(inner) = token.strip_prefix('{') {
            return Err(match inner.strip_suffix(":Type}") {
                Some(name) => ParamParseError::TypeDef { name: name.into() },
                None => ParamParseError::MissingDef,
            });
        }

        let (name, ty_str) = token.split_once(':').ok_or(ParamParseError::NotImplemented)?;

        if name.is_empty() || ty_str.is_empty() {
            return Err(ParamParseError::Empty);
        }

        Ok(Self {
            name: name.to_owned(),
            ty: ty_str.parse()?,
        })
    }
}
