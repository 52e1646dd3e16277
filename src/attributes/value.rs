use std::fmt;

/// Numeric id of an attribute, `ViAttr` on the wire.
pub type AttrId = u32;

/// Width and signedness of an integer attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntKind {
    I8,
    U8,
    I16,
    U16,
    I32,
    U32,
    I64,
    U64,
}

impl IntKind {
    /// Integer of the size of a bus address, `ViBusAddress` or `ViBusSize`.
    #[cfg(target_pointer_width = "64")]
    pub const ADDR: IntKind = IntKind::U64;
    #[cfg(not(target_pointer_width = "64"))]
    pub const ADDR: IntKind = IntKind::U32;

    /// Bytes the native library writes for this kind.
    pub fn size(&self) -> usize {
        match self {
            Self::I8 | Self::U8 => 1,
            Self::I16 | Self::U16 => 2,
            Self::I32 | Self::U32 => 4,
            Self::I64 | Self::U64 => 8,
        }
    }

    pub fn signed(&self) -> bool {
        matches!(self, Self::I8 | Self::I16 | Self::I32 | Self::I64)
    }

    pub fn min(&self) -> i128 {
        match self {
            Self::I8 => i8::MIN as i128,
            Self::I16 => i16::MIN as i128,
            Self::I32 => i32::MIN as i128,
            Self::I64 => i64::MIN as i128,
            _ => 0,
        }
    }

    pub fn max(&self) -> i128 {
        match self {
            Self::I8 => i8::MAX as i128,
            Self::U8 => u8::MAX as i128,
            Self::I16 => i16::MAX as i128,
            Self::U16 => u16::MAX as i128,
            Self::I32 => i32::MAX as i128,
            Self::U32 => u32::MAX as i128,
            Self::I64 => i64::MAX as i128,
            Self::U64 => u64::MAX as i128,
        }
    }

    /// Decodes a native-endian integer of this kind.
    pub(crate) fn read(&self, buf: &[u8]) -> Option<i128> {
        let bytes = buf.get(..self.size())?;
        Some(match self {
            Self::I8 => bytes[0] as i8 as i128,
            Self::U8 => bytes[0] as i128,
            Self::I16 => i16::from_ne_bytes(bytes.try_into().ok()?) as i128,
            Self::U16 => u16::from_ne_bytes(bytes.try_into().ok()?) as i128,
            Self::I32 => i32::from_ne_bytes(bytes.try_into().ok()?) as i128,
            Self::U32 => u32::from_ne_bytes(bytes.try_into().ok()?) as i128,
            Self::I64 => i64::from_ne_bytes(bytes.try_into().ok()?) as i128,
            Self::U64 => u64::from_ne_bytes(bytes.try_into().ok()?) as i128,
        })
    }

    /// Widens an in-range value to the `ViAttrState` passed to `viSetAttribute`.
    ///
    /// Signed values are sign extended from their own width, matching what a
    /// C caller passing e.g. a `ViInt16` would produce.
    pub(crate) fn to_state(&self, v: i128) -> u64 {
        match self {
            Self::I8 => v as i8 as i64 as u64,
            Self::I16 => v as i16 as i64 as u64,
            Self::I32 => v as i32 as i64 as u64,
            Self::I64 => v as i64 as u64,
            Self::U8 | Self::U16 | Self::U32 | Self::U64 => v as u64,
        }
    }
}

/// Values an enum-backed attribute can take.
#[derive(Debug, PartialEq, Eq)]
pub struct EnumDomain {
    pub name: &'static str,
    pub values: &'static [i64],
}

impl EnumDomain {
    pub fn contains(&self, v: i128) -> bool {
        self.values.iter().any(|x| *x as i128 == v)
    }
}

/// Bits a flag-backed attribute can carry.
#[derive(Debug, PartialEq, Eq)]
pub struct FlagDomain {
    pub name: &'static str,
    pub mask: u64,
}

impl FlagDomain {
    pub fn contains(&self, v: i128) -> bool {
        v >= 0 && (v as u64) & !self.mask == 0
    }
}

/// A raw value known to belong to an [`EnumDomain`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnumValue {
    pub domain: &'static EnumDomain,
    pub value: i64,
}

/// Decoded value of an attribute.
///
/// Typed enums and flag sets convert to and from this with `From`/`TryFrom`,
/// e.g. `Parity::try_from(value)`.
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    Int(i64),
    UInt(u64),
    Bool(bool),
    Enum(EnumValue),
    Flags(u64),
    /// Timeouts in milliseconds. `f64::INFINITY` stands for `VI_TMO_INFINITE`.
    Float(f64),
    Str(String),
    Char(u8),
    Bytes(Vec<u8>),
}

impl AttrValue {
    /// Integer view of the value, if it has one.
    pub fn as_i128(&self) -> Option<i128> {
        match self {
            Self::Int(v) => Some(*v as i128),
            Self::UInt(v) => Some(*v as i128),
            Self::Char(v) => Some(*v as i128),
            Self::Bool(v) => Some(*v as i128),
            Self::Enum(e) => Some(e.value as i128),
            Self::Flags(v) => Some(*v as i128),
            Self::Float(_) | Self::Str(_) | Self::Bytes(_) => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            other => other.as_i128().map(|v| v as f64),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Short name of the variant, used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Int(_) => "int",
            Self::UInt(_) => "uint",
            Self::Bool(_) => "bool",
            Self::Enum(e) => e.domain.name,
            Self::Flags(_) => "flags",
            Self::Float(_) => "float",
            Self::Str(_) => "string",
            Self::Char(_) => "char",
            Self::Bytes(_) => "bytes",
        }
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::UInt(v) => write!(f, "{v}"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::Enum(e) => write!(f, "{}({})", e.domain.name, e.value),
            Self::Flags(v) => write!(f, "{v:#x}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Str(s) => f.write_str(s),
            Self::Char(c) => write!(f, "{:?}", *c as char),
            Self::Bytes(b) => write!(f, "{b:?}"),
        }
    }
}

macro_rules! impl_from_int {
    ($($t:ty => $var:ident),* $(,)?) => {
        $(
            impl From<$t> for AttrValue {
                fn from(v: $t) -> Self {
                    Self::$var(v as _)
                }
            }

            impl TryFrom<AttrValue> for $t {
                type Error = crate::Error;
                fn try_from(value: AttrValue) -> crate::Result<Self> {
                    let raw = value.as_i128().ok_or_else(|| crate::Error::TypeMismatch {
                        name: stringify!($t),
                        expected: "an integer",
                        found: value.kind_name().to_string(),
                    })?;
                    <$t>::try_from(raw).map_err(|_| crate::Error::OutOfRange {
                        name: stringify!($t),
                        value: raw,
                        min: <$t>::MIN as i128,
                        max: <$t>::MAX as i128,
                    })
                }
            }
        )*
    };
}

impl_from_int! {
    i8 => Int,
    i16 => Int,
    i32 => Int,
    i64 => Int,
    u16 => Int,
    u32 => Int,
    u64 => UInt,
}

impl From<u8> for AttrValue {
    fn from(v: u8) -> Self {
        Self::Char(v)
    }
}

impl TryFrom<AttrValue> for u8 {
    type Error = crate::Error;
    fn try_from(value: AttrValue) -> crate::Result<Self> {
        match value {
            AttrValue::Char(c) => Ok(c),
            other => {
                let raw = other.as_i128().ok_or_else(|| crate::Error::TypeMismatch {
                    name: "u8",
                    expected: "a character",
                    found: other.kind_name().to_string(),
                })?;
                u8::try_from(raw).map_err(|_| crate::Error::OutOfRange {
                    name: "u8",
                    value: raw,
                    min: 0,
                    max: u8::MAX as i128,
                })
            }
        }
    }
}

impl From<bool> for AttrValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl TryFrom<AttrValue> for bool {
    type Error = crate::Error;
    fn try_from(value: AttrValue) -> crate::Result<Self> {
        match value {
            AttrValue::Bool(b) => Ok(b),
            other => Err(crate::Error::TypeMismatch {
                name: "bool",
                expected: "a boolean",
                found: other.kind_name().to_string(),
            }),
        }
    }
}

impl From<f64> for AttrValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl TryFrom<AttrValue> for f64 {
    type Error = crate::Error;
    fn try_from(value: AttrValue) -> crate::Result<Self> {
        value.as_f64().ok_or_else(|| crate::Error::TypeMismatch {
            name: "f64",
            expected: "a number",
            found: value.kind_name().to_string(),
        })
    }
}

impl From<&str> for AttrValue {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

impl TryFrom<AttrValue> for String {
    type Error = crate::Error;
    fn try_from(value: AttrValue) -> crate::Result<Self> {
        match value {
            AttrValue::Str(s) => Ok(s),
            other => Err(crate::Error::TypeMismatch {
                name: "String",
                expected: "a string",
                found: other.kind_name().to_string(),
            }),
        }
    }
}

impl TryFrom<AttrValue> for Vec<u8> {
    type Error = crate::Error;
    fn try_from(value: AttrValue) -> crate::Result<Self> {
        match value {
            AttrValue::Bytes(b) => Ok(b),
            AttrValue::Str(s) => Ok(s.into_bytes()),
            other => Err(crate::Error::TypeMismatch {
                name: "Vec<u8>",
                expected: "a buffer",
                found: other.kind_name().to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signed_kinds_sign_extend() {
        assert_eq!(IntKind::I16.to_state(-1), 0xFFFF_FFFF_FFFF_FFFF);
        assert_eq!(IntKind::U16.to_state(0xFFFF), 0xFFFF);
        assert_eq!(IntKind::I16.read(&(-2i16).to_ne_bytes()), Some(-2));
        assert_eq!(IntKind::U32.read(&[0, 0]), None);
    }

    #[test]
    fn integer_conversions_check_width() {
        assert_eq!(u16::try_from(AttrValue::Int(0xFFFF)).ok(), Some(0xFFFF));
        assert!(u16::try_from(AttrValue::Int(0x1_0000)).is_err());
        assert!(i32::try_from(AttrValue::Str("1".into())).is_err());
        assert_eq!(u8::try_from(AttrValue::Char(b'\n')).ok(), Some(b'\n'));
    }

    #[test]
    fn flag_domain_masks() {
        let d = FlagDomain { name: "t", mask: 0b101 };
        assert!(d.contains(0b100));
        assert!(!d.contains(0b010));
        assert!(!d.contains(-1));
    }
}
