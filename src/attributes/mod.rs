//! Attribute descriptors and the registry used to marshal `viGetAttribute` and
//! `viSetAttribute` calls.
//!
//! Every VISA attribute is described once in [`table`] with the resources it
//! applies to, how it travels over the C ABI and what may be done with it.
//! [`AttributeRegistry::get`] and [`AttributeRegistry::set`] use that
//! description to size buffers and to reject bad values before the native
//! library sees them.
//!
//! ```
//! use visa_bind::attributes::{self, AttrValue};
//! let tmo = attributes::builtin().by_name("VI_ATTR_TMO_VALUE").unwrap();
//! assert_eq!(tmo.id, attributes::VI_ATTR_TMO_VALUE);
//! assert!(tmo.encode(&AttrValue::Float(-1.0)).is_err());
//! ```

use crate::{
    enums::{
        event::EventType,
        interface::{InterfaceType, ResourceClass},
    },
    flags::AttrAccess,
    library::VisaLibrary,
    sys as vs, Error, Result,
};
use indexmap::{IndexMap, IndexSet};
use once_cell::sync::Lazy;

mod table;
mod value;

pub use table::*;
pub use value::*;

/// Interface type and resource class of a resource, e.g. `GPIB INSTR`.
pub type ResourcePair = (InterfaceType, ResourceClass);

/// Which objects an attribute can be queried on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Applicability {
    AllSessions,
    Resources(&'static [ResourcePair]),
    Events(&'static [EventType]),
}

/// How an attribute value travels over the C ABI.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WireType {
    Int(IntKind),
    /// `ViBoolean`.
    Bool,
    Enum(IntKind, &'static EnumDomain),
    Flags(IntKind, &'static FlagDomain),
    /// Integer restricted to `min..=max`, plus a few special values outside of
    /// it (e.g. `VI_NO_SEC_ADDR`).
    Range {
        kind: IntKind,
        min: i64,
        max: i64,
        extra: &'static [i64],
    },
    /// `ViUInt32` milliseconds where `0xFFFFFFFF` means infinite.
    Timeout,
    Str,
    Char,
    /// Opaque buffer whose length is held by another attribute.
    Buffer { len_attr: AttrId },
}

/// Static description of one VISA attribute.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeDescriptor {
    /// VISA constant name, e.g. `VI_ATTR_TMO_VALUE`.
    pub name: &'static str,
    /// Property exposing the attribute on resource wrappers, if any.
    pub property: Option<&'static str>,
    pub id: AttrId,
    pub applies: Applicability,
    pub wire: WireType,
    pub access: AttrAccess,
    pub default: Option<i64>,
}

impl AttributeDescriptor {
    /// Bytes to hand to `viGetAttribute`, `None` for dynamically sized buffers.
    pub fn buffer_len(&self) -> Option<usize> {
        match self.wire {
            WireType::Int(k)
            | WireType::Enum(k, _)
            | WireType::Flags(k, _)
            | WireType::Range { kind: k, .. } => Some(k.size()),
            WireType::Bool => Some(2),
            WireType::Timeout => Some(4),
            WireType::Char => Some(1),
            WireType::Str => Some(vs::VI_FIND_BUFLEN),
            WireType::Buffer { .. } => None,
        }
    }

    pub fn applies_to(&self, intf: InterfaceType, class: ResourceClass) -> bool {
        match self.applies {
            Applicability::AllSessions => true,
            Applicability::Resources(pairs) => pairs.contains(&(intf, class)),
            Applicability::Events(_) => false,
        }
    }

    pub fn applies_to_event(&self, event: EventType) -> bool {
        match self.applies {
            Applicability::Events(events) => events.contains(&event),
            _ => false,
        }
    }

    fn mismatch(&self, expected: &'static str, found: impl ToString) -> Error {
        Error::TypeMismatch {
            name: self.name,
            expected,
            found: found.to_string(),
        }
    }

    /// Turns what the native library wrote into a value.
    pub fn decode(&self, buf: &[u8]) -> Result<AttrValue> {
        let short = || self.mismatch("a complete value", format!("{} bytes", buf.len()));
        Ok(match self.wire {
            WireType::Int(k) | WireType::Range { kind: k, .. } => {
                let v = k.read(buf).ok_or_else(short)?;
                match i64::try_from(v) {
                    Ok(v) if k != IntKind::U64 => AttrValue::Int(v),
                    _ => AttrValue::UInt(v as u64),
                }
            }
            WireType::Bool => {
                let v = IntKind::U16.read(buf).ok_or_else(short)?;
                AttrValue::Bool(v != vs::VI_FALSE as i128)
            }
            WireType::Enum(k, domain) => {
                let v = k.read(buf).ok_or_else(short)?;
                if !domain.contains(v) {
                    return Err(self.mismatch(domain.name, v));
                }
                AttrValue::Enum(EnumValue {
                    domain,
                    value: v as i64,
                })
            }
            WireType::Flags(k, domain) => {
                let v = k.read(buf).ok_or_else(short)?;
                if !domain.contains(v) {
                    return Err(self.mismatch(domain.name, format!("{v:#x}")));
                }
                AttrValue::Flags(v as u64)
            }
            WireType::Timeout => match IntKind::U32.read(buf).ok_or_else(short)? {
                v if v == vs::VI_TMO_INFINITE as i128 => AttrValue::Float(f64::INFINITY),
                v => AttrValue::Float(v as f64),
            },
            WireType::Str => AttrValue::Str(vs::buf_to_string(buf)),
            WireType::Char => AttrValue::Char(*buf.first().ok_or_else(short)?),
            WireType::Buffer { .. } => AttrValue::Bytes(buf.to_vec()),
        })
    }

    /// Validates `value` and turns it into the state passed to `viSetAttribute`.
    ///
    /// Nothing is sent to the library when this fails.
    pub fn encode(&self, value: &AttrValue) -> Result<u64> {
        if !self.access.writable() {
            return Err(Error::ReadOnly { name: self.name });
        }
        let int = |expected: &'static str| {
            value
                .as_i128()
                .ok_or_else(|| self.mismatch(expected, value.kind_name()))
        };
        match self.wire {
            WireType::Bool => match value {
                AttrValue::Bool(b) => Ok(u64::from(if *b { vs::VI_TRUE } else { vs::VI_FALSE })),
                other => Err(self.mismatch("a boolean", other.kind_name())),
            },
            WireType::Int(k) => {
                let v = int("an integer")?;
                self.check_range(v, k.min(), k.max())?;
                Ok(k.to_state(v))
            }
            WireType::Range {
                kind,
                min,
                max,
                extra,
            } => {
                let v = int("an integer")?;
                if !extra.iter().any(|e| *e as i128 == v) {
                    self.check_range(v, min as i128, max as i128)?;
                }
                Ok(kind.to_state(v))
            }
            WireType::Enum(k, domain) => {
                if let AttrValue::Enum(e) = value {
                    if e.domain != domain {
                        return Err(self.mismatch(domain.name, e.domain.name));
                    }
                }
                let v = int(domain.name)?;
                if !domain.contains(v) {
                    return Err(Error::NotInDomain {
                        name: self.name,
                        domain: domain.name,
                        value: v,
                    });
                }
                Ok(k.to_state(v))
            }
            WireType::Flags(k, domain) => {
                let v = int(domain.name)?;
                if !domain.contains(v) {
                    return Err(Error::NotInDomain {
                        name: self.name,
                        domain: domain.name,
                        value: v,
                    });
                }
                Ok(k.to_state(v))
            }
            WireType::Timeout => {
                let ms = match value {
                    AttrValue::Float(f) if f.is_infinite() && *f > 0.0 => {
                        return Ok(vs::VI_TMO_INFINITE as u64)
                    }
                    AttrValue::Float(f) if f.is_nan() => {
                        return Err(self.mismatch("a number of milliseconds", "NaN"))
                    }
                    AttrValue::Float(f) => f.round() as i128,
                    _ => int("a number of milliseconds")?,
                };
                self.check_range(ms, 0, vs::VI_TMO_INFINITE as i128 - 1)?;
                Ok(ms as u64)
            }
            WireType::Char => {
                let v = int("a character")?;
                self.check_range(v, 0, u8::MAX as i128)?;
                Ok(v as u64)
            }
            WireType::Str | WireType::Buffer { .. } => {
                Err(self.mismatch("a value passed by state", value.kind_name()))
            }
        }
    }

    fn check_range(&self, value: i128, min: i128, max: i128) -> Result<()> {
        if value < min || value > max {
            return Err(Error::OutOfRange {
                name: self.name,
                value,
                min,
                max,
            });
        }
        Ok(())
    }
}

/// Key of the "by resource" side of the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKey {
    AllSessions,
    Resource(InterfaceType, ResourceClass),
    Event(EventType),
}

/// Lookup tables over attribute descriptors, by id, by name and by resource.
#[derive(Debug, Default)]
pub struct AttributeRegistry {
    by_id: IndexMap<AttrId, AttributeDescriptor>,
    by_name: IndexMap<&'static str, AttrId>,
    by_resource: IndexMap<ResourceKey, IndexSet<AttrId>>,
}

impl AttributeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a descriptor.
    ///
    /// Registering the same descriptor twice is a no-op, registering another
    /// descriptor under a known id or name fails.
    pub fn register(&mut self, desc: AttributeDescriptor) -> Result<()> {
        if let Some(known) = self.by_id.get(&desc.id) {
            if *known == desc {
                return Ok(());
            }
            return Err(Error::DuplicateAttribute {
                name: desc.name,
                id: desc.id,
            });
        }
        if self.by_name.contains_key(desc.name) {
            return Err(Error::DuplicateAttribute {
                name: desc.name,
                id: desc.id,
            });
        }
        let keys: Vec<ResourceKey> = match desc.applies {
            Applicability::AllSessions => vec![ResourceKey::AllSessions],
            Applicability::Resources(pairs) => pairs
                .iter()
                .map(|(i, c)| ResourceKey::Resource(*i, *c))
                .collect(),
            Applicability::Events(events) => {
                events.iter().map(|e| ResourceKey::Event(*e)).collect()
            }
        };
        if keys.is_empty() {
            return Err(Error::InvalidDescriptor {
                name: desc.name,
                reason: "empty applicability list",
            });
        }
        if let WireType::Range { min, max, .. } = desc.wire {
            if min > max {
                return Err(Error::InvalidDescriptor {
                    name: desc.name,
                    reason: "range minimum above maximum",
                });
            }
        }
        for key in keys {
            self.by_resource.entry(key).or_default().insert(desc.id);
        }
        self.by_name.insert(desc.name, desc.id);
        log::trace!("registered attribute {} ({:#010X})", desc.name, desc.id);
        self.by_id.insert(desc.id, desc);
        Ok(())
    }

    pub fn descriptor(&self, id: AttrId) -> Result<&AttributeDescriptor> {
        self.by_id.get(&id).ok_or(Error::UnknownAttribute(id))
    }

    pub fn by_name(&self, name: &str) -> Option<&AttributeDescriptor> {
        self.by_name.get(name).and_then(|id| self.by_id.get(id))
    }

    /// Attributes specific to a resource pair, without the all-sessions ones.
    pub fn for_resource(
        &self,
        intf: InterfaceType,
        class: ResourceClass,
    ) -> impl Iterator<Item = &AttributeDescriptor> + '_ {
        self.for_key(ResourceKey::Resource(intf, class))
    }

    pub fn all_sessions(&self) -> impl Iterator<Item = &AttributeDescriptor> + '_ {
        self.for_key(ResourceKey::AllSessions)
    }

    pub fn for_event(&self, event: EventType) -> impl Iterator<Item = &AttributeDescriptor> + '_ {
        self.for_key(ResourceKey::Event(event))
    }

    fn for_key(&self, key: ResourceKey) -> impl Iterator<Item = &AttributeDescriptor> + '_ {
        self.by_resource
            .get(&key)
            .into_iter()
            .flatten()
            .filter_map(|id| self.by_id.get(id))
    }

    /// Properties a wrapper for `intf`/`class` has to expose.
    pub fn required_properties(
        &self,
        intf: InterfaceType,
        class: ResourceClass,
    ) -> IndexSet<&'static str> {
        self.all_sessions()
            .chain(self.for_resource(intf, class))
            .filter_map(|d| d.property)
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AttributeDescriptor> + '_ {
        self.by_id.values()
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    /// Reads an attribute of `vi`, sized and decoded after its descriptor.
    pub fn get(&self, lib: &VisaLibrary, vi: vs::ViObject, id: AttrId) -> Result<AttrValue> {
        let desc = self.descriptor(id)?;
        let len = match (desc.buffer_len(), desc.wire) {
            (Some(len), _) => len,
            (None, WireType::Buffer { len_attr }) => {
                let n = self.get(lib, vi, len_attr)?;
                n.as_i128()
                    .and_then(|n| usize::try_from(n).ok())
                    .ok_or_else(|| desc.mismatch("a buffer length", n))?
            }
            (None, _) => return Err(desc.mismatch("a sized value", "unsized wire type")),
        };
        // integers are written in place of a ViAttrState by some implementations
        let mut buf = vec![0u8; len.max(std::mem::size_of::<u64>())];
        lib.get_attribute(vi, id, &mut buf)?;
        buf.truncate(len);
        desc.decode(&buf)
    }

    /// Validates `value` then writes it to `vi`.
    pub fn set(
        &self,
        lib: &VisaLibrary,
        vi: vs::ViObject,
        id: AttrId,
        value: AttrValue,
    ) -> Result<()> {
        let desc = self.descriptor(id)?;
        let state = desc.encode(&value)?;
        log::trace!("set {} = {}", desc.name, value);
        lib.set_attribute(vi, id, state as vs::ViAttrState)?;
        Ok(())
    }
}

static BUILTIN_REGISTRY: Lazy<AttributeRegistry> = Lazy::new(|| {
    let mut registry = AttributeRegistry::new();
    for desc in table::BUILTIN {
        registry
            .register(desc.clone())
            .expect("built-in attribute table has unique ids and names");
    }
    registry
});

/// Registry holding every attribute known to this crate.
pub fn builtin() -> &'static AttributeRegistry {
    &BUILTIN_REGISTRY
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enums::attribute::Parity;

    fn desc(id: AttrId, wire: WireType) -> AttributeDescriptor {
        AttributeDescriptor {
            name: "VI_ATTR_TEST",
            property: None,
            id,
            applies: Applicability::AllSessions,
            wire,
            access: AttrAccess::RW,
            default: None,
        }
    }

    #[test]
    fn same_descriptor_twice_is_accepted() {
        let mut r = AttributeRegistry::new();
        r.register(desc(1, WireType::Bool)).unwrap();
        r.register(desc(1, WireType::Bool)).unwrap();
        assert_eq!(r.len(), 1);
        assert!(matches!(
            r.register(desc(1, WireType::Char)),
            Err(Error::DuplicateAttribute { id: 1, .. })
        ));
    }

    #[test]
    fn empty_applicability_is_rejected() {
        let mut d = desc(2, WireType::Bool);
        d.applies = Applicability::Resources(&[]);
        assert!(matches!(
            AttributeRegistry::new().register(d),
            Err(Error::InvalidDescriptor { .. })
        ));
    }

    #[test]
    fn timeout_sentinel_becomes_infinity() {
        let d = desc(3, WireType::Timeout);
        assert_eq!(
            d.decode(&u32::MAX.to_ne_bytes()).unwrap(),
            AttrValue::Float(f64::INFINITY)
        );
        assert_eq!(d.encode(&AttrValue::Float(f64::INFINITY)).unwrap(), 0xFFFF_FFFF);
        assert_eq!(d.encode(&AttrValue::Float(2500.4)).unwrap(), 2500);
        assert!(d.encode(&AttrValue::Int(-5)).is_err());
    }

    #[test]
    fn enum_out_of_domain_is_a_type_mismatch() {
        let d = desc(4, WireType::Enum(IntKind::U16, &Parity::DOMAIN));
        assert!(matches!(
            d.decode(&9u16.to_ne_bytes()),
            Err(Error::TypeMismatch { .. })
        ));
        assert_eq!(
            d.decode(&2u16.to_ne_bytes()).unwrap(),
            AttrValue::from(Parity::Even)
        );
        assert!(matches!(
            d.encode(&AttrValue::Int(9)),
            Err(Error::NotInDomain { value: 9, .. })
        ));
    }

    #[test]
    fn read_only_rejects_writes() {
        let mut d = desc(5, WireType::Int(IntKind::U8));
        d.access = AttrAccess::R;
        assert!(matches!(
            d.encode(&AttrValue::Int(1)),
            Err(Error::ReadOnly { .. })
        ));
    }

    #[test]
    fn builtin_table_loads() {
        let r = builtin();
        assert!(r.len() > 150);
        assert!(r
            .required_properties(InterfaceType::Gpib, ResourceClass::Instr)
            .contains("timeout"));
    }
}
