//! Parser for VISA resource names, e.g. `GPIB0::12::INSTR` or
//! `TCPIP::192.168.0.1::5025::SOCKET`.
//!
//! Prefixes and classes are matched without regard to case, a missing board
//! number means `0` and a missing class means `INSTR`. [`ResourceName`]
//! prints itself in canonical form, with defaulted fields filled in:
//!
//! ```
//! use visa_bind::rname::ResourceName;
//! let name: ResourceName = "tcpip::10.0.0.2".parse().unwrap();
//! assert_eq!(name.to_string(), "TCPIP0::10.0.0.2::inst0::INSTR");
//! assert_eq!(name.field("host_address"), Some("10.0.0.2"));
//! ```
//!
//! PXI names in the `CHASSISn::SLOTm` form are left to the native parser.

use crate::{
    enums::interface::{InterfaceType, ResourceClass},
    Error, Result,
};
use std::{fmt, str::FromStr};

const SEP: &str = "::";

#[derive(Debug, Clone, Copy)]
struct Field {
    name: &'static str,
    /// `None` for required fields.
    optional: Option<Option<&'static str>>,
}

const fn required(name: &'static str) -> Field {
    Field {
        name,
        optional: None,
    }
}

const fn optional(name: &'static str, default: Option<&'static str>) -> Field {
    Field {
        name,
        optional: Some(default),
    }
}

/// Layout of one kind of resource name.
#[derive(Debug)]
struct Format {
    interface: InterfaceType,
    class: ResourceClass,
    fields: &'static [Field],
    /// The class may be left out of the name.
    implicit_class: bool,
}

macro_rules! formats {
    ($($intf:ident $class:ident $implicit:literal [$($field:expr),* $(,)?];)*) => {
        const FORMATS: &[Format] = &[
            $(Format {
                interface: InterfaceType::$intf,
                class: ResourceClass::$class,
                fields: &[$($field),*],
                implicit_class: $implicit,
            },)*
        ];
    };
}

formats! {
    Gpib Instr true [required("primary_address"), optional("secondary_address", None)];
    Gpib Intfc false [];
    Asrl Instr true [];
    Tcpip Instr true [required("host_address"), optional("lan_device_name", Some("inst0"))];
    Tcpip Socket false [required("host_address"), required("port")];
    Usb Instr true [
        required("manufacturer_id"),
        required("model_code"),
        required("serial_number"),
        optional("usb_interface_number", None),
    ];
    Usb Raw false [
        required("manufacturer_id"),
        required("model_code"),
        required("serial_number"),
        optional("usb_interface_number", None),
    ];
    Vxi Instr true [required("vxi_logical_address")];
    Vxi Backplane false [optional("vxi_logical_address", Some("0"))];
    Vxi Memacc false [];
    Vxi Servant false [];
    GpibVxi Instr true [required("vxi_logical_address")];
    GpibVxi Memacc false [];
    GpibVxi Backplane false [optional("vxi_logical_address", Some("0"))];
    Pxi Instr true [required("device"), optional("function", None)];
    Pxi Backplane false [required("chassis_number")];
    Pxi Memacc false [];
}

/// Prefixes in matching order, `GPIB-VXI` before `GPIB`.
const PREFIXES: &[(&str, InterfaceType)] = &[
    ("GPIB-VXI", InterfaceType::GpibVxi),
    ("GPIB", InterfaceType::Gpib),
    ("ASRL", InterfaceType::Asrl),
    ("TCPIP", InterfaceType::Tcpip),
    ("USB", InterfaceType::Usb),
    ("VXI", InterfaceType::Vxi),
    ("PXI", InterfaceType::Pxi),
];

/// A parsed resource name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceName {
    interface: InterfaceType,
    class: ResourceClass,
    board: String,
    /// Field values in format order, `None` for absent optional fields.
    fields: Vec<(&'static str, Option<String>)>,
    /// PXI bus given in `bus-device.function` form.
    pxi_bus: Option<String>,
}

impl ResourceName {
    pub fn parse(name: &str) -> Result<Self> {
        let invalid = |reason: &str| Error::InvalidResourceName {
            name: name.to_string(),
            reason: reason.to_string(),
        };
        let mut parts: Vec<&str> = name.trim().split(SEP).collect();
        let head = parts.remove(0);
        let (prefix, interface) = PREFIXES
            .iter()
            .find(|(p, _)| {
                head.len() >= p.len()
                    && head.is_char_boundary(p.len())
                    && head[..p.len()].eq_ignore_ascii_case(p)
            })
            .ok_or_else(|| invalid("unknown interface prefix"))?;
        let board = &head[prefix.len()..];
        let board = match board {
            "" => "0".to_string(),
            b if b.bytes().all(|c| c.is_ascii_digit()) => b.to_string(),
            // serial ports may be named after their device path
            b if *interface == InterfaceType::Asrl => b.to_string(),
            _ => return Err(invalid("board must be a number")),
        };

        let explicit = parts
            .last()
            .and_then(|last| last.parse::<ResourceClass>().ok())
            .filter(|class| {
                FORMATS
                    .iter()
                    .any(|f| f.interface == *interface && f.class == *class)
            });
        let class = match explicit {
            Some(class) => {
                parts.pop();
                class
            }
            None => ResourceClass::Instr,
        };
        let format = FORMATS
            .iter()
            .find(|f| f.interface == *interface && f.class == class)
            .ok_or_else(|| invalid("unsupported resource class for this interface"))?;
        if explicit.is_none() && !format.implicit_class {
            return Err(invalid("missing resource class"));
        }
        if parts.iter().any(|p| p.is_empty()) {
            return Err(invalid("empty field"));
        }

        let mut pxi_bus = None;
        if *interface == InterfaceType::Pxi && class == ResourceClass::Instr && parts.len() == 1 {
            // PXI[interface]::bus-device[.function]
            if let Some((bus, rest)) = parts[0].split_once('-') {
                let (device, function) = match rest.split_once('.') {
                    Some((d, f)) => (d, Some(f)),
                    None => (rest, None),
                };
                if bus.is_empty() || device.is_empty() || function == Some("") {
                    return Err(invalid("expected bus-device[.function]"));
                }
                pxi_bus = Some(bus.to_string());
                parts = std::iter::once(device).chain(function).collect();
            }
        }

        let min = format
            .fields
            .iter()
            .filter(|f| f.optional.is_none())
            .count();
        if parts.len() < min {
            return Err(invalid("missing fields"));
        }
        if parts.len() > format.fields.len() {
            return Err(invalid("too many fields"));
        }
        let fields = format
            .fields
            .iter()
            .enumerate()
            .map(|(i, f)| {
                let value = match parts.get(i) {
                    Some(v) => Some(v.to_string()),
                    None => f.optional.flatten().map(str::to_string),
                };
                (f.name, value)
            })
            .collect();
        Ok(Self {
            interface: *interface,
            class,
            board,
            fields,
            pxi_bus,
        })
    }

    pub fn interface_type(&self) -> InterfaceType {
        self.interface
    }

    pub fn resource_class(&self) -> ResourceClass {
        self.class
    }

    pub fn board(&self) -> &str {
        &self.board
    }

    /// Board as a number, `None` for serial ports named by path.
    pub fn board_number(&self) -> Option<u16> {
        self.board.parse().ok()
    }

    /// Value of a named field, e.g. `primary_address` or `port`.
    pub fn field(&self, name: &str) -> Option<&str> {
        if name == "bus" {
            return self.pxi_bus.as_deref();
        }
        self.fields
            .iter()
            .find(|(n, _)| *n == name)
            .and_then(|(_, v)| v.as_deref())
    }
}

impl FromStr for ResourceName {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for ResourceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.interface.resource_prefix(), self.board)?;
        let mut values = self.fields.iter().filter_map(|(_, v)| v.as_deref());
        if let Some(bus) = &self.pxi_bus {
            let device = values.next().unwrap_or_default();
            write!(f, "{SEP}{bus}-{device}")?;
            if let Some(function) = values.next() {
                write!(f, ".{function}")?;
            }
        }
        for v in values {
            write!(f, "{SEP}{v}")?;
        }
        write!(f, "{SEP}{}", self.class)
    }
}
