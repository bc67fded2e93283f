//! Declarative generators for schema combinators.
//!
//! * `tl_constructor!` generates a bare constructor: the struct, its
//!   [`crate::Identifiable`] impl and field-by-field (de)serialization
//!   without the command id.
//! * `tl_enum!` generates a boxed type as an enum over its constructors that
//!   writes and dispatches on the command id.
//! * `tl_function!` generates an RPC method whose encoding starts with its
//!   command id, plus its [`crate::RemoteCall`] impl.

macro_rules! tl_constructor {
    (
        $(#[$meta:meta])*
        $name:ident = $id:literal, $tl:literal {
            $( $(#[$fmeta:meta])* $field:ident : $ty:ty ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq)]
        pub struct $name {
            $( $(#[$fmeta])* pub $field: $ty, )*
        }

        impl $crate::Identifiable for $name {
            const CONSTRUCTOR_ID: u32 = $id;
            const NAME: &'static str = $tl;
        }

        impl $crate::Serializable for $name {
            #[allow(unused_variables)]
            fn serialize(&self, w: &mut $crate::Writer) -> $crate::serialize::Result<()> {
                $( $crate::Serializable::serialize(&self.$field, w)?; )*
                Ok(())
            }
        }

        impl $crate::Deserializable for $name {
            #[allow(unused_variables)]
            fn deserialize(buf: $crate::deserialize::Buffer) -> $crate::deserialize::Result<Self> {
                Ok(Self {
                    $( $field: <$ty as $crate::Deserializable>::deserialize(buf)?, )*
                })
            }
        }
    };
}

macro_rules! tl_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $( $variant:ident ( $inner:ty ) ),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq)]
        pub enum $name {
            $( $variant($inner), )+
        }

        impl $name {
            /// Command id of the contained constructor.
            pub fn constructor_id(&self) -> u32 {
                match self {
                    $( Self::$variant(_) => <$inner as $crate::Identifiable>::CONSTRUCTOR_ID, )+
                }
            }
        }

        impl $crate::Serializable for $name {
            fn serialize(&self, w: &mut $crate::Writer) -> $crate::serialize::Result<()> {
                w.write_command(self.constructor_id());
                match self {
                    $( Self::$variant(x) => $crate::Serializable::serialize(x, w), )+
                }
            }
        }

        impl $crate::Deserializable for $name {
            fn deserialize(buf: $crate::deserialize::Buffer) -> $crate::deserialize::Result<Self> {
                let id = buf.read_command()?;
                $(
                    if id == <$inner as $crate::Identifiable>::CONSTRUCTOR_ID {
                        return <$inner as $crate::Deserializable>::deserialize(buf).map(Self::$variant);
                    }
                )+
                Err($crate::deserialize::Error::UnexpectedConstructor { id })
            }
        }

        $(
            impl From<$inner> for $name {
                fn from(x: $inner) -> Self { Self::$variant(x) }
            }
        )+
    };
}

macro_rules! tl_function {
    (
        $(#[$meta:meta])*
        $name:ident = $id:literal, $tl:literal {
            $( $(#[$fmeta:meta])* $field:ident : $ty:ty ),* $(,)?
        } -> $ret:ty
    ) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq)]
        pub struct $name {
            $( $(#[$fmeta])* pub $field: $ty, )*
        }

        impl $crate::Identifiable for $name {
            const CONSTRUCTOR_ID: u32 = $id;
            const NAME: &'static str = $tl;
        }

        impl $crate::Serializable for $name {
            fn serialize(&self, w: &mut $crate::Writer) -> $crate::serialize::Result<()> {
                w.write_command($id);
                $( $crate::Serializable::serialize(&self.$field, w)?; )*
                Ok(())
            }
        }

        /// Server-side view: expects the leading command id.
        impl $crate::Deserializable for $name {
            fn deserialize(buf: $crate::deserialize::Buffer) -> $crate::deserialize::Result<Self> {
                buf.expect_command($id)?;
                Ok(Self {
                    $( $field: <$ty as $crate::Deserializable>::deserialize(buf)?, )*
                })
            }
        }

        impl $crate::RemoteCall for $name {
            type Return = $ret;
        }
    };
}
