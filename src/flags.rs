use crate::attributes::{AttrValue, FlagDomain};
use crate::sys as vs;
use bitflags::bitflags;

bitflags! {
    /// Access mode passed to `viOpen` and `viLock`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct AccessMode: vs::ViAccessMode {
        const NO_LOCK = vs::VI_NO_LOCK;
        const EXCLUSIVE_LOCK = vs::VI_EXCLUSIVE_LOCK;
        const SHARED_LOCK = vs::VI_SHARED_LOCK;
        const LOAD_CONFIG = vs::VI_LOAD_CONFIG;
    }
}

impl Default for AccessMode {
    fn default() -> Self {
        Self::NO_LOCK
    }
}

bitflags! {
    /// Buffers touched by `viFlush`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct FlushMode: vs::ViUInt16 {
        const READ_BUF = vs::VI_READ_BUF;
        const READ_BUF_DISCARD = vs::VI_READ_BUF_DISCARD;
        const WRITE_BUF = vs::VI_WRITE_BUF;
        const WRITE_BUF_DISCARD = vs::VI_WRITE_BUF_DISCARD;
        const IO_IN_BUF = vs::VI_IO_IN_BUF;
        const IO_IN_BUF_DISCARD = vs::VI_IO_IN_BUF_DISCARD;
        const IO_OUT_BUF = vs::VI_IO_OUT_BUF;
        const IO_OUT_BUF_DISCARD = vs::VI_IO_OUT_BUF_DISCARD;
    }
}

bitflags! {
    /// Permissions of an attribute.
    ///
    /// `LOCAL` attributes only affect the session they are set on, the others
    /// are global to the resource.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct AttrAccess: u8 {
        const READ = 0b001;
        const WRITE = 0b010;
        const LOCAL = 0b100;

        const R = Self::READ.bits();
        const RW = Self::READ.bits() | Self::WRITE.bits();
        const R_LOCAL = Self::READ.bits() | Self::LOCAL.bits();
        const RW_LOCAL = Self::RW.bits() | Self::LOCAL.bits();
    }
}

impl AttrAccess {
    pub fn readable(&self) -> bool {
        self.contains(Self::READ)
    }

    pub fn writable(&self) -> bool {
        self.contains(Self::WRITE)
    }

    pub fn local(&self) -> bool {
        self.contains(Self::LOCAL)
    }
}

bitflags! {
    /// Serial flow control, `VI_ATTR_ASRL_FLOW_CNTRL`. An empty set means no
    /// flow control.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct FlowControl: vs::ViUInt16 {
        const XON_XOFF = vs::VI_ASRL_FLOW_XON_XOFF;
        const RTS_CTS = vs::VI_ASRL_FLOW_RTS_CTS;
        const DTR_DSR = vs::VI_ASRL_FLOW_DTR_DSR;
    }
}

impl FlowControl {
    pub const DOMAIN: FlagDomain = FlagDomain {
        name: "FlowControl",
        mask: Self::all().bits() as u64,
    };
}

impl From<FlowControl> for AttrValue {
    fn from(f: FlowControl) -> Self {
        AttrValue::Flags(f.bits() as u64)
    }
}

impl TryFrom<AttrValue> for FlowControl {
    type Error = crate::Error;
    fn try_from(value: AttrValue) -> crate::Result<Self> {
        let raw = value.as_i128().ok_or_else(|| crate::Error::TypeMismatch {
            name: "FlowControl",
            expected: "a flag set",
            found: value.kind_name().to_string(),
        })?;
        u16::try_from(raw)
            .ok()
            .and_then(FlowControl::from_bits)
            .ok_or(crate::Error::NotInDomain {
                name: "FlowControl",
                domain: Self::DOMAIN.name,
                value: raw,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn access_shorthands() {
        assert!(AttrAccess::RW_LOCAL.writable());
        assert!(AttrAccess::RW_LOCAL.local());
        assert!(!AttrAccess::R.writable());
        assert_eq!(AccessMode::default(), AccessMode::NO_LOCK);
    }

    #[test]
    fn flow_control_rejects_unknown_bits() {
        let both = FlowControl::XON_XOFF | FlowControl::DTR_DSR;
        assert_eq!(FlowControl::try_from(AttrValue::from(both)).ok(), Some(both));
        assert!(FlowControl::try_from(AttrValue::Flags(8)).is_err());
        assert_eq!(FlowControl::DOMAIN.mask, 7);
    }
}
