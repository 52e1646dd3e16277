//! Interface types and resource classes, the two halves of a resource key.

use std::{fmt, str::FromStr};

consts_to_enum! {
    #[format=value, prefix="VI_INTF_"]
    /// Value of `VI_ATTR_INTF_TYPE`.
    pub enum InterfaceType: u16 {
        VI_INTF_GPIB        1   "GPIB"
        VI_INTF_VXI         2   "VXI"
        VI_INTF_GPIB_VXI    3   "GPIB-VXI"
        VI_INTF_ASRL        4   "Serial"
        VI_INTF_PXI         5   "PXI"
        VI_INTF_TCPIP       6   "TCPIP"
        VI_INTF_USB         7   "USB"
        VI_INTF_RIO         8   "RIO"
        VI_INTF_FIREWIRE    9   "Firewire"
        Unknown             0xFFFF
    }
}

impl InterfaceType {
    /// Prefix used in canonical resource names.
    pub fn resource_prefix(&self) -> &'static str {
        match self {
            Self::Gpib => "GPIB",
            Self::Vxi => "VXI",
            Self::GpibVxi => "GPIB-VXI",
            Self::Asrl => "ASRL",
            Self::Pxi => "PXI",
            Self::Tcpip => "TCPIP",
            Self::Usb => "USB",
            Self::Rio => "RIO",
            Self::Firewire => "FIREWIRE",
            Self::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for InterfaceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.resource_prefix())
    }
}

/// Resource class, as found at the end of a resource name and in
/// `VI_ATTR_RSRC_CLASS`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Eq, Ord, Hash)]
pub enum ResourceClass {
    Instr,
    Intfc,
    Backplane,
    Memacc,
    Socket,
    Raw,
    Servant,
    Unknown,
}

impl ResourceClass {
    pub const ALL: &'static [ResourceClass] = &[
        Self::Instr,
        Self::Intfc,
        Self::Backplane,
        Self::Memacc,
        Self::Socket,
        Self::Raw,
        Self::Servant,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Instr => "INSTR",
            Self::Intfc => "INTFC",
            Self::Backplane => "BACKPLANE",
            Self::Memacc => "MEMACC",
            Self::Socket => "SOCKET",
            Self::Raw => "RAW",
            Self::Servant => "SERVANT",
            Self::Unknown => "",
        }
    }
}

impl fmt::Display for ResourceClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceClass {
    type Err = crate::Error;
    fn from_str(s: &str) -> crate::Result<Self> {
        Self::ALL
            .iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
            .copied()
            .ok_or_else(|| crate::Error::InvalidArgument(format!("unknown resource class `{s}`")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interface_values_match_visa() {
        assert_eq!(u16::from(InterfaceType::Gpib), 1);
        assert_eq!(u16::from(InterfaceType::Tcpip), 6);
        assert_eq!(InterfaceType::try_from(9u16).ok(), Some(InterfaceType::Firewire));
        assert!(InterfaceType::DOMAIN.values.contains(&7));
    }

    #[test]
    fn class_parsing_ignores_case() {
        assert_eq!("instr".parse::<ResourceClass>().ok(), Some(ResourceClass::Instr));
        assert_eq!("BACKPLANE".parse::<ResourceClass>().ok(), Some(ResourceClass::Backplane));
        assert!("nope".parse::<ResourceClass>().is_err());
    }
}
