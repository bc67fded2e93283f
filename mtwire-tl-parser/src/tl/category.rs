/// Which section of the schema a [`super::Definition`] was declared in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Category {
    /// Data constructors (before `---functions---`).
    #[default]
    Types,
    /// RPC methods (after `---functions---`).
    Functions,
}
