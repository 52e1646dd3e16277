//! Enumerations generated from the VISA constant tables.
//!
//! Variant names come from the `VI_*` constants through
//! [`visa_bind_proc::rusty_ident!`]. Value enums also publish their domain so
//! the attribute registry can validate raw integers against them.

macro_rules! consts_to_enum {
    {
        #[format=$fmt:ident $(, prefix=$prefix:literal)?]
        $(#[$metas:meta])*
        pub enum $enum_id:ident: $repr:ident {
            $($status:ident $value:literal $($des:literal)?)*
        }
    } => {
        visa_bind_proc::rusty_ident!{
            $(prefix = $prefix;)?
            consts_to_enum!{
                $fmt
                $(#[$metas])*
                pub enum $enum_id: $repr {
                    $($status $value $($des)?)*
                }
            }
        }
    };

    {   value
        $(#[$metas:meta])*
        pub enum $enum_id:ident: $repr:ident {
            $($status:ident $value:literal $($des:literal)?)*
        }
    } => {
        $(#[$metas])*
        #[repr($repr)]
        #[derive(num_enum::TryFromPrimitive, num_enum::IntoPrimitive, Debug, Clone, Copy, PartialEq, PartialOrd, Eq, Ord, Hash)]
        pub enum $enum_id {
            $(
                $(#[doc=$des])?
                $status = $value as _
            ),*
        }

        impl $enum_id {
            /// Values accepted on the wire for this enumeration.
            pub const DOMAIN: crate::attributes::EnumDomain = crate::attributes::EnumDomain {
                name: stringify!($enum_id),
                values: &[$((Self::$status as $repr) as i64),*],
            };
        }

        impl ::std::convert::TryFrom<crate::attributes::AttrValue> for $enum_id {
            type Error = crate::Error;
            fn try_from(value: crate::attributes::AttrValue) -> crate::Result<Self> {
                let raw = value.as_i128().ok_or_else(|| crate::Error::TypeMismatch {
                    name: stringify!($enum_id),
                    expected: "an enumeration value",
                    found: value.kind_name().to_string(),
                })?;
                let narrowed = raw as $repr;
                if narrowed as i128 != raw {
                    return Err(crate::Error::NotInDomain {
                        name: stringify!($enum_id),
                        domain: stringify!($enum_id),
                        value: raw,
                    });
                }
                <Self as num_enum::TryFromPrimitive>::try_from_primitive(narrowed).map_err(|_| {
                    crate::Error::NotInDomain {
                        name: stringify!($enum_id),
                        domain: stringify!($enum_id),
                        value: raw,
                    }
                })
            }
        }

        impl ::std::convert::From<$enum_id> for crate::attributes::AttrValue {
            fn from(e: $enum_id) -> Self {
                crate::attributes::AttrValue::Enum(crate::attributes::EnumValue {
                    domain: &$enum_id::DOMAIN,
                    value: (e as $repr) as i64,
                })
            }
        }
    };

    {   doc
        $(#[$metas:meta])*
        pub enum $enum_id:ident: $repr:ident {
            $($status:ident $value:literal $des:literal)*
        }
    } => {
        $(#[$metas])*
        #[repr($repr)]
        #[derive(num_enum::TryFromPrimitive, num_enum::IntoPrimitive, Clone, Copy, PartialEq, PartialOrd, Eq, Ord, Hash)]
        pub enum $enum_id {
            $(
                #[doc=$des]
                $status = $value as _
            ),*
        }

        impl $enum_id {
            /// Human readable description of the code.
            pub fn description(&self) -> &'static str {
                match self {
                    $(Self::$status => $des),*
                }
            }
        }

        impl ::std::fmt::Display for $enum_id {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                write!(f, "{}", self.description())
            }
        }

        impl ::std::fmt::Debug for $enum_id {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                match self {
                    $(Self::$status => write!(f, "{:#010X}: {}", $value, $des)),*
                }
            }
        }
    };
}

pub mod assert;
pub mod attribute;
pub mod event;
pub mod gpib;
pub mod interface;
pub mod status;
