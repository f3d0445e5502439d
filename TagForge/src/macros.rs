//! Declarative helpers for on-disk enumerations

/// Declare a closed `u16` enumeration with strict decoding.
///
/// The first variant is the `Default`. `from_u16` rejects every value
/// without a variant with [`Error::UnknownEnum`] naming `$field`.
///
/// [`Error::UnknownEnum`]: crate::Error::UnknownEnum
macro_rules! tag_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident as $field:literal {
            $(#[$first_meta:meta])*
            $first:ident = $first_value:literal
            $(, $(#[$variant_meta:meta])* $variant:ident = $value:literal)* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[repr(u16)]
        pub enum $name {
            $(#[$first_meta])*
            $first = $first_value,
            $($(#[$variant_meta])* $variant = $value,)*
        }

        impl $name {
            /// Every variant in declaration order.
            pub const ALL: &'static [$name] = &[$name::$first, $($name::$variant,)*];

            pub fn from_u16(value: u16) -> $crate::error::Result<Self> {
                match value {
                    $first_value => Ok($name::$first),
                    $($value => Ok($name::$variant),)*
                    _ => Err($crate::error::Error::unknown_enum($field, value)),
                }
            }

            pub fn to_u16(self) -> u16 {
                self as u16
            }
        }

        impl Default for $name {
            fn default() -> Self {
                $name::$first
            }
        }
    };
}

pub(crate) use tag_enum;
