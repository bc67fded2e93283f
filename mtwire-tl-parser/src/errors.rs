use std::fmt;

/// Errors produced while parsing a single parameter token.
#[derive(Clone, Debug, PartialEq)]
pub enum ParamParseError {
    /// An empty string was encountered where a name/type was expected.
    Empty,
    /// A `{X:Type}` generic type definition (not a real error; used as a signal).
    TypeDef {
        /// The name of the generic type parameter (e.g. `"X"` from `{X:Type}`).
        name: String,
    },
    /// A `{…}` block that isn't a valid type definition, or a `!X` reference
    /// to a generic that was never declared.
    MissingDef,
    /// A generic `<…>` argument was malformed (missing closing `>`).
    InvalidGeneric,
    /// A bare token with no `:type`.
    NotImplemented,
}

impl fmt::Display for ParamParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "empty token"),
            Self::TypeDef { name } => write!(f, "generic type definition: {name}"),
            Self::MissingDef => write!(f, "unknown generic definition"),
            Self::InvalidGeneric => write!(f, "invalid generic argument (unclosed `<`)"),
            Self::NotImplemented => write!(f, "parameter without `:type` is not supported"),
        }
    }
}

impl std::error::Error for ParamParseError {}

/// Errors produced while parsing a complete TL definition.
#[derive(Clone, Debug, PartialEq)]
pub enum ParseError {
    /// The input was blank.
    Empty,
    /// The name (before `#`) was missing or had empty namespace components.
    MissingName,
    /// The `#id` part is not exactly eight characters long.
    InvalidIdLength {
        /// The text after `#`.
        id: String,
    },
    /// The `#id` part contains something other than hex digits.
    InvalidId {
        /// The text after `#`.
        id: String,
    },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "empty definition"),
            Self::MissingName => write!(f, "missing or malformed name"),
            Self::InvalidIdLength { id } => {
                write!(f, "command id {id:?} must be exactly 8 hex digits, got {}", id.len())
            }
            Self::InvalidId { id } => write!(f, "command id {id:?} is not hexadecimal"),
        }
    }
}

impl std::error::Error for ParseError {}

/// A [`ParseError`] located in the schema text it came from.
#[derive(Clone, Debug, PartialEq)]
pub struct LineError {
    /// 1-based line number.
    pub line: usize,
    /// The trimmed source line.
    pub text: String,
    /// What went wrong.
    pub error: ParseError,
}

impl fmt::Display for LineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {} in {:?}", self.line, self.error, self.text)
    }
}

impl std::error::Error for LineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}
