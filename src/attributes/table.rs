//! The VISA attribute table.
//!
//! Row layout:
//!
//! ```text
//! NAME = id, property | _, { ALL | pair, .. | @GROUP | event Kind .. }, wire, ACCESS [, default];
//! ```
//!
//! Attributes with a property are exposed as getters (and setters when
//! writable) on every resource wrapper they apply to. Those marked `_` are
//! reached through `get_attribute`/`set_attribute` or used internally.

use super::{Applicability, AttrId, AttributeDescriptor, IntKind, ResourcePair, WireType};
use crate::{
    enums::{
        attribute::*,
        event::EventType,
        interface::{InterfaceType, ResourceClass},
    },
    flags::{AttrAccess, FlowControl},
};

macro_rules! property {
    (_) => {
        None
    };
    ($p:ident) => {
        Some(stringify!($p))
    };
}

macro_rules! applies {
    (ALL) => {
        Applicability::AllSessions
    };
    (@ $group:ident) => {
        Applicability::Resources($group)
    };
    (event $($e:ident)+) => {
        Applicability::Events(&[$(EventType::$e),+])
    };
    ($($pair:ident),+ $(,)?) => {
        Applicability::Resources(&[$($pair),+])
    };
}

macro_rules! wire {
    (bool) => {
        WireType::Bool
    };
    (string) => {
        WireType::Str
    };
    (char) => {
        WireType::Char
    };
    (timeout) => {
        WireType::Timeout
    };
    (addr) => {
        WireType::Int(IntKind::ADDR)
    };
    (int($k:ident)) => {
        WireType::Int(IntKind::$k)
    };
    (range($k:ident, $min:expr, $max:expr $(, [$($extra:expr),* $(,)?])?)) => {
        WireType::Range {
            kind: IntKind::$k,
            min: $min,
            max: $max,
            extra: &[$($($extra),*)?],
        }
    };
    (choice($k:ident, $e:ident)) => {
        WireType::Enum(IntKind::$k, &$e::DOMAIN)
    };
    (flags($k:ident, $f:ident)) => {
        WireType::Flags(IntKind::$k, &$f::DOMAIN)
    };
    (buffer($len:ident)) => {
        WireType::Buffer { len_attr: $len }
    };
}

macro_rules! default {
    () => {
        None
    };
    ($d:expr) => {
        Some($d as i64)
    };
}

macro_rules! attributes {
    ($(
        $(#[$metas:meta])*
        $name:ident = $id:literal, $prop:tt, { $($applies:tt)* },
            $wire:ident $(($($wargs:tt)*))?, $access:ident $(, $default:expr)?;
    )*) => {
        $(
            $(#[$metas])*
            pub const $name: AttrId = $id;
        )*

        pub(crate) static BUILTIN: &[AttributeDescriptor] = &[
            $(
                AttributeDescriptor {
                    name: stringify!($name),
                    property: property!($prop),
                    id: $id,
                    applies: applies!($($applies)*),
                    wire: wire!($wire $(($($wargs)*))?),
                    access: AttrAccess::$access,
                    default: default!($($default)?),
                },
            )*
        ];
    };
}

macro_rules! pairs {
    ($($name:ident = $intf:ident $class:ident;)*) => {
        $(
            pub const $name: ResourcePair = (InterfaceType::$intf, ResourceClass::$class);
        )*
    };
}

pairs! {
    GPIB_INSTR = Gpib Instr;
    GPIB_INTFC = Gpib Intfc;
    ASRL_INSTR = Asrl Instr;
    TCPIP_INSTR = Tcpip Instr;
    TCPIP_SOCKET = Tcpip Socket;
    USB_INSTR = Usb Instr;
    USB_RAW = Usb Raw;
    VXI_INSTR = Vxi Instr;
    VXI_MEMACC = Vxi Memacc;
    VXI_BACKPLANE = Vxi Backplane;
    GPIB_VXI_INSTR = GpibVxi Instr;
    PXI_INSTR = Pxi Instr;
    PXI_MEMACC = Pxi Memacc;
    PXI_BACKPLANE = Pxi Backplane;
}

/// Resources doing message-based I/O.
pub const MESSAGE_BASED: &[ResourcePair] = &[
    GPIB_INSTR,
    GPIB_INTFC,
    ASRL_INSTR,
    TCPIP_INSTR,
    TCPIP_SOCKET,
    USB_INSTR,
    USB_RAW,
    VXI_INSTR,
    GPIB_VXI_INSTR,
];

/// Resources doing register-based I/O.
pub const REGISTER_BASED: &[ResourcePair] = &[
    VXI_INSTR,
    VXI_MEMACC,
    GPIB_VXI_INSTR,
    PXI_INSTR,
    PXI_MEMACC,
];

const GPIB: &[ResourcePair] = &[GPIB_INSTR, GPIB_INTFC];
const TCPIP: &[ResourcePair] = &[TCPIP_INSTR, TCPIP_SOCKET];
const USB: &[ResourcePair] = &[USB_INSTR, USB_RAW];
const VME: &[ResourcePair] = &[VXI_INSTR, VXI_MEMACC, GPIB_VXI_INSTR];
const VXI_DEVICE: &[ResourcePair] = &[VXI_INSTR, GPIB_VXI_INSTR];
const IDENTIFIED: &[ResourcePair] = &[USB_INSTR, USB_RAW, VXI_INSTR, GPIB_VXI_INSTR, PXI_INSTR];
const TRIGGERED: &[ResourcePair] = &[
    GPIB_INSTR,
    GPIB_INTFC,
    ASRL_INSTR,
    TCPIP_INSTR,
    USB_INSTR,
    VXI_INSTR,
    GPIB_VXI_INSTR,
    VXI_BACKPLANE,
];

attributes! {
    // every session

    VI_ATTR_RSRC_CLASS = 0xBFFF0001, resource_class, {ALL}, string, R;
    VI_ATTR_RSRC_NAME = 0xBFFF0002, resource_name, {ALL}, string, R;
    VI_ATTR_RSRC_IMPL_VERSION = 0x3FFF0003, implementation_version, {ALL}, int(U32), R;
    VI_ATTR_RSRC_LOCK_STATE = 0x3FFF0004, lock_state, {ALL}, choice(U32, LockState), R, 0;
    VI_ATTR_MAX_QUEUE_LENGTH = 0x3FFF0005, _, {ALL}, range(U32, 1, 0xFFFF_FFFF), RW_LOCAL, 50;
    VI_ATTR_USER_DATA = 0x3FFF0007, _, {ALL}, addr, RW_LOCAL;
    /// Timeout of I/O operations, in milliseconds.
    VI_ATTR_TMO_VALUE = 0x3FFF001A, timeout, {ALL}, timeout, RW_LOCAL, 2000;
    VI_ATTR_RM_SESSION = 0x3FFF00C4, _, {ALL}, int(U32), R_LOCAL;
    VI_ATTR_INTF_INST_NAME = 0xBFFF00E9, _, {ALL}, string, R;
    VI_ATTR_RSRC_SPEC_VERSION = 0x3FFF0170, spec_version, {ALL}, int(U32), R;
    VI_ATTR_INTF_TYPE = 0x3FFF0171, interface_type, {ALL}, choice(U16, InterfaceType), R;
    VI_ATTR_RSRC_MANF_NAME = 0xBFFF0174, resource_manufacturer_name, {ALL}, string, R;
    VI_ATTR_RSRC_MANF_ID = 0x3FFF0175, resource_manufacturer_id, {ALL}, range(U16, 0, 0x3FFF), R;
    VI_ATTR_INTF_NUM = 0x3FFF0176, interface_number, {ALL}, range(U16, 0, 0xFFFF), R, 0;

    // message based

    VI_ATTR_SEND_END_EN = 0x3FFF0016, send_end, {@MESSAGE_BASED}, bool, RW_LOCAL, 1;
    /// Termination character, used when `VI_ATTR_TERMCHAR_EN` is set.
    VI_ATTR_TERMCHAR = 0x3FFF0018, _, {@MESSAGE_BASED}, char, RW_LOCAL, 0x0A;
    VI_ATTR_TERMCHAR_EN = 0x3FFF0038, _, {@MESSAGE_BASED}, bool, RW_LOCAL, 0;
    VI_ATTR_IO_PROT = 0x3FFF001C, io_protocol, {@MESSAGE_BASED}, choice(U16, IoProtocol), RW_LOCAL, 1;
    VI_ATTR_RD_BUF_OPER_MODE = 0x3FFF002A, _, {@MESSAGE_BASED}, choice(U16, BufferOperation), RW_LOCAL, 2;
    VI_ATTR_RD_BUF_SIZE = 0x3FFF002B, _, {@MESSAGE_BASED}, int(U32), R_LOCAL;
    VI_ATTR_WR_BUF_OPER_MODE = 0x3FFF002D, _, {@MESSAGE_BASED}, choice(U16, BufferOperation), RW_LOCAL, 2;
    VI_ATTR_WR_BUF_SIZE = 0x3FFF002E, _, {@MESSAGE_BASED}, int(U32), R_LOCAL;
    VI_ATTR_FILE_APPEND_EN = 0x3FFF0192, _, {@MESSAGE_BASED}, bool, RW_LOCAL, 0;
    VI_ATTR_SUPPRESS_END_EN = 0x3FFF0036, suppress_end_enabled,
        {ASRL_INSTR, TCPIP_SOCKET, USB_INSTR, USB_RAW, VXI_INSTR}, bool, RW_LOCAL, 0;
    VI_ATTR_DMA_ALLOW_EN = 0x3FFF001E, allow_dma,
        {GPIB_INSTR, GPIB_INTFC, VXI_INSTR, VXI_MEMACC, GPIB_VXI_INSTR}, bool, RW_LOCAL;
    VI_ATTR_TRIG_ID = 0x3FFF0177, _, {@TRIGGERED}, choice(I16, TriggerId), RW_LOCAL, -1;

    // fast data channel

    VI_ATTR_FDC_CHNL = 0x3FFF000D, _, {@VXI_DEVICE}, range(U16, 0, 7), RW_LOCAL;
    VI_ATTR_FDC_MODE = 0x3FFF000F, _, {@VXI_DEVICE}, range(U16, 1, 2), RW_LOCAL, 1;
    VI_ATTR_FDC_GEN_SIGNAL_EN = 0x3FFF0011, _, {@VXI_DEVICE}, bool, RW_LOCAL;
    VI_ATTR_FDC_USE_PAIR = 0x3FFF0013, _, {@VXI_DEVICE}, bool, RW_LOCAL, 0;
    VI_ATTR_IMMEDIATE_SERV = 0x3FFF0100, _, {@VXI_DEVICE}, bool, R;

    // GPIB

    VI_ATTR_GPIB_PRIMARY_ADDR = 0x3FFF0172, primary_address, {@GPIB}, range(U16, 0, 30), RW;
    /// `VI_NO_SEC_ADDR` (0xFFFF) when no secondary address is in use.
    VI_ATTR_GPIB_SECONDARY_ADDR = 0x3FFF0173, secondary_address, {@GPIB},
        range(U16, 0, 30, [0xFFFF]), RW;
    VI_ATTR_GPIB_REN_STATE = 0x3FFF0181, remote_enabled, {@GPIB}, choice(I16, LineState), R;
    VI_ATTR_GPIB_READDR_EN = 0x3FFF001B, enable_repeat_addressing, {GPIB_INSTR}, bool, RW_LOCAL, 1;
    VI_ATTR_GPIB_UNADDR_EN = 0x3FFF0184, enable_unaddressing, {GPIB_INSTR}, bool, RW_LOCAL, 0;
    VI_ATTR_GPIB_ATN_STATE = 0x3FFF0057, atn_state, {GPIB_INTFC}, choice(I16, LineState), R;
    VI_ATTR_GPIB_ADDR_STATE = 0x3FFF005C, address_state, {GPIB_INTFC}, choice(I16, AddressState), R;
    VI_ATTR_GPIB_CIC_STATE = 0x3FFF005E, is_controller_in_charge, {GPIB_INTFC}, bool, R;
    VI_ATTR_GPIB_NDAC_STATE = 0x3FFF0062, ndac_state, {GPIB_INTFC}, choice(I16, LineState), R;
    VI_ATTR_GPIB_SRQ_STATE = 0x3FFF0067, srq_state, {GPIB_INTFC}, choice(I16, LineState), R;
    VI_ATTR_GPIB_SYS_CNTRL_STATE = 0x3FFF0068, is_system_controller, {GPIB_INTFC}, bool, RW;
    /// Cable length in meters, 0 disables HS488 and -1 means it is not implemented.
    VI_ATTR_GPIB_HS488_CBL_LEN = 0x3FFF0069, _, {GPIB_INTFC}, range(I16, 1, 15, [-1, 0]), RW;
    VI_ATTR_DEV_STATUS_BYTE = 0x3FFF0189, _, {GPIB_INTFC}, int(U8), RW;

    // serial

    VI_ATTR_ASRL_BAUD = 0x3FFF0021, baud_rate, {ASRL_INSTR}, int(U32), RW, 9600;
    VI_ATTR_ASRL_DATA_BITS = 0x3FFF0022, data_bits, {ASRL_INSTR}, range(U16, 5, 8), RW, 8;
    VI_ATTR_ASRL_PARITY = 0x3FFF0023, parity, {ASRL_INSTR}, choice(U16, Parity), RW, 0;
    VI_ATTR_ASRL_STOP_BITS = 0x3FFF0024, stop_bits, {ASRL_INSTR}, choice(U16, StopBits), RW, 10;
    VI_ATTR_ASRL_FLOW_CNTRL = 0x3FFF0025, flow_control, {ASRL_INSTR}, flags(U16, FlowControl), RW, 0;
    VI_ATTR_ASRL_AVAIL_NUM = 0x3FFF00AC, bytes_in_buffer, {ASRL_INSTR}, int(U32), R;
    VI_ATTR_ASRL_CTS_STATE = 0x3FFF00AE, cts_state, {ASRL_INSTR}, choice(I16, LineState), R;
    VI_ATTR_ASRL_DCD_STATE = 0x3FFF00AF, dcd_state, {ASRL_INSTR}, choice(I16, LineState), R;
    VI_ATTR_ASRL_DISCARD_NULL = 0x3FFF00B0, discard_null, {ASRL_INSTR}, bool, RW, 0;
    VI_ATTR_ASRL_DSR_STATE = 0x3FFF00B1, dsr_state, {ASRL_INSTR}, choice(I16, LineState), R;
    VI_ATTR_ASRL_DTR_STATE = 0x3FFF00B2, dtr_state, {ASRL_INSTR}, choice(I16, LineState), RW;
    VI_ATTR_ASRL_END_IN = 0x3FFF00B3, end_input, {ASRL_INSTR}, choice(U16, SerialTermination), RW_LOCAL, 2;
    VI_ATTR_ASRL_END_OUT = 0x3FFF00B4, end_output, {ASRL_INSTR}, choice(U16, SerialTermination), RW_LOCAL, 0;
    VI_ATTR_ASRL_REPLACE_CHAR = 0x3FFF00BE, replace_char, {ASRL_INSTR}, char, RW_LOCAL, 0;
    VI_ATTR_ASRL_RI_STATE = 0x3FFF00BF, ri_state, {ASRL_INSTR}, choice(I16, LineState), R;
    VI_ATTR_ASRL_RTS_STATE = 0x3FFF00C0, rts_state, {ASRL_INSTR}, choice(I16, LineState), RW;
    VI_ATTR_ASRL_XON_CHAR = 0x3FFF00C1, xon_char, {ASRL_INSTR}, char, RW_LOCAL, 0x11;
    VI_ATTR_ASRL_XOFF_CHAR = 0x3FFF00C2, xoff_char, {ASRL_INSTR}, char, RW_LOCAL, 0x13;
    VI_ATTR_ASRL_CONNECTED = 0x3FFF01BB, connected, {ASRL_INSTR}, bool, R;
    VI_ATTR_ASRL_BREAK_STATE = 0x3FFF01BC, break_state, {ASRL_INSTR}, choice(I16, LineState), RW;
    /// Break duration in milliseconds.
    VI_ATTR_ASRL_BREAK_LEN = 0x3FFF01BD, break_length, {ASRL_INSTR}, range(I16, 1, 500), RW_LOCAL, 250;
    VI_ATTR_ASRL_ALLOW_TRANSMIT = 0x3FFF01BE, allow_transmit, {ASRL_INSTR}, bool, RW, 1;
    VI_ATTR_ASRL_WIRE_MODE = 0x3FFF01BF, wire_mode, {ASRL_INSTR}, choice(I16, WireMode), RW;

    // TCPIP

    VI_ATTR_TCPIP_ADDR = 0xBFFF0195, address, {@TCPIP}, string, R;
    VI_ATTR_TCPIP_HOSTNAME = 0xBFFF0196, hostname, {@TCPIP}, string, R;
    VI_ATTR_TCPIP_PORT = 0x3FFF0197, port, {TCPIP_SOCKET}, int(U16), R;
    VI_ATTR_TCPIP_DEVICE_NAME = 0xBFFF0199, lan_device_name, {TCPIP_INSTR}, string, R;
    VI_ATTR_TCPIP_NODELAY = 0x3FFF019A, tcp_nodelay, {TCPIP_SOCKET}, bool, RW, 1;
    VI_ATTR_TCPIP_KEEPALIVE = 0x3FFF019B, tcp_keepalive, {TCPIP_SOCKET}, bool, RW, 0;
    VI_ATTR_TCPIP_SERVER_CERT_ISSUER_NAME = 0xBFFF0270, _, {TCPIP_INSTR}, string, R;
    VI_ATTR_TCPIP_SERVER_CERT_SUBJECT_NAME = 0xBFFF0271, _, {TCPIP_INSTR}, string, R;
    VI_ATTR_TCPIP_SERVER_CERT_EXPIRATION_DATE = 0xBFFF0272, _, {TCPIP_INSTR}, string, R;
    VI_ATTR_TCPIP_SERVER_CERT_IS_PERPETUAL = 0x3FFF0273, _, {TCPIP_INSTR}, bool, R;
    VI_ATTR_TCPIP_SASL_MECHANISM = 0xBFFF0274, _, {TCPIP_INSTR}, string, R;
    VI_ATTR_TCPIP_TLS_CIPHER_SUITE = 0xBFFF0275, _, {TCPIP_INSTR}, string, R;
    VI_ATTR_TCPIP_HISLIP_OVERLAP_EN = 0x3FFF0300, hislip_overlap_enabled, {TCPIP_INSTR}, bool, RW;
    VI_ATTR_TCPIP_HISLIP_VERSION = 0x3FFF0301, hislip_version, {TCPIP_INSTR}, int(U32), R;
    VI_ATTR_TCPIP_HISLIP_MAX_MESSAGE_KB = 0x3FFF0302, hislip_max_message_kb, {TCPIP_INSTR}, int(U32), RW_LOCAL;
    VI_ATTR_TCPIP_IS_HISLIP = 0x3FFF0303, is_hislip, {TCPIP_INSTR}, bool, R;
    VI_ATTR_TCPIP_HISLIP_ENCRYPTION_EN = 0x3FFF0304, _, {TCPIP_INSTR}, bool, RW;

    // device identity

    VI_ATTR_MANF_NAME = 0xBFFF0072, manufacturer_name, {@IDENTIFIED}, string, R;
    VI_ATTR_MODEL_NAME = 0xBFFF0077, model_name, {@IDENTIFIED}, string, R;
    VI_ATTR_MANF_ID = 0x3FFF00D9, manufacturer_id, {@IDENTIFIED}, range(U16, 0, 0xFFFF), R;
    VI_ATTR_MODEL_CODE = 0x3FFF00DF, model_code, {@IDENTIFIED}, int(U16), R;
    VI_ATTR_4882_COMPLIANT = 0x3FFF019F, is_4882_compliant, {USB_INSTR, VXI_INSTR}, bool, R;

    // USB

    VI_ATTR_USB_SERIAL_NUM = 0xBFFF01A0, serial_number, {@USB}, string, R;
    VI_ATTR_USB_INTFC_NUM = 0x3FFF01A1, usb_interface_number, {@USB}, range(I16, 0, 0xFE), R, 0;
    VI_ATTR_USB_PROTOCOL = 0x3FFF01A7, usb_protocol, {@USB}, range(I16, 0, 0xFF), R;
    VI_ATTR_USB_MAX_INTR_SIZE = 0x3FFF01AF, maximum_interrupt_size, {@USB}, int(U16), RW_LOCAL;
    VI_ATTR_USB_BULK_OUT_PIPE = 0x3FFF01A2, bulk_out_pipe, {USB_RAW}, range(I16, 0x01, 0x0F, [-1]), RW_LOCAL;
    VI_ATTR_USB_BULK_IN_PIPE = 0x3FFF01A3, bulk_in_pipe, {USB_RAW}, range(I16, 0x81, 0x8F, [-1]), RW_LOCAL;
    VI_ATTR_USB_INTR_IN_PIPE = 0x3FFF01A4, interrupt_in_pipe, {USB_RAW}, range(I16, 0x81, 0x8F, [-1]), RW_LOCAL;
    VI_ATTR_USB_CLASS = 0x3FFF01A5, usb_class, {USB_RAW}, range(I16, 0, 0xFF), R;
    VI_ATTR_USB_SUBCLASS = 0x3FFF01A6, usb_subclass, {USB_RAW}, range(I16, 0, 0xFF), R;
    VI_ATTR_USB_ALT_SETTING = 0x3FFF01A8, alternate_setting, {USB_RAW}, range(I16, 0, 0xFF), RW, 0;
    VI_ATTR_USB_END_IN = 0x3FFF01A9, usb_end_input, {USB_RAW}, choice(U16, UsbEndInput), RW_LOCAL, 5;
    VI_ATTR_USB_NUM_INTFCS = 0x3FFF01AA, interface_count, {USB_RAW}, range(I16, 1, 0xFE), R;
    VI_ATTR_USB_NUM_PIPES = 0x3FFF01AB, pipe_count, {USB_RAW}, range(I16, 0, 30), R;
    VI_ATTR_USB_BULK_OUT_STATUS = 0x3FFF01AC, bulk_out_status, {USB_RAW}, choice(I16, UsbPipeState), RW_LOCAL;
    VI_ATTR_USB_BULK_IN_STATUS = 0x3FFF01AD, bulk_in_status, {USB_RAW}, choice(I16, UsbPipeState), RW_LOCAL;
    VI_ATTR_USB_INTR_IN_STATUS = 0x3FFF01AE, interrupt_in_status, {USB_RAW}, choice(I16, UsbPipeState), RW_LOCAL;
    VI_ATTR_USB_CTRL_PIPE = 0x3FFF01B0, control_pipe, {USB_RAW}, range(I16, 0x00, 0x0F), RW_LOCAL, 0;

    // register based

    VI_ATTR_SRC_INCREMENT = 0x3FFF0040, source_increment, {@REGISTER_BASED}, range(I32, 0, 1), RW_LOCAL, 1;
    VI_ATTR_DEST_INCREMENT = 0x3FFF0041, destination_increment, {@REGISTER_BASED}, range(I32, 0, 1), RW_LOCAL, 1;
    VI_ATTR_WIN_ACCESS = 0x3FFF00C3, window_access, {@REGISTER_BASED}, choice(U16, WindowAccess), R_LOCAL, 1;
    VI_ATTR_WIN_BASE_ADDR_32 = 0x3FFF0098, _, {@REGISTER_BASED}, int(U32), R_LOCAL;
    VI_ATTR_WIN_SIZE_32 = 0x3FFF009A, _, {@REGISTER_BASED}, int(U32), R_LOCAL;
    VI_ATTR_WIN_BASE_ADDR_64 = 0x3FFF009B, window_base_address, {@REGISTER_BASED}, int(U64), R_LOCAL;
    VI_ATTR_WIN_SIZE_64 = 0x3FFF009C, window_size, {@REGISTER_BASED}, int(U64), R_LOCAL;
    VI_ATTR_SRC_ACCESS_PRIV = 0x3FFF003C, source_access_privilege, {@VME}, choice(U16, AccessPrivilege), RW_LOCAL, 0;
    VI_ATTR_DEST_ACCESS_PRIV = 0x3FFF0039, destination_access_privilege, {@VME}, choice(U16, AccessPrivilege), RW_LOCAL, 0;
    VI_ATTR_WIN_ACCESS_PRIV = 0x3FFF0045, window_access_privilege, {@VME}, choice(U16, AccessPrivilege), RW_LOCAL, 0;
    VI_ATTR_SRC_BYTE_ORDER = 0x3FFF003D, source_byte_order, {@VME}, choice(U16, ByteOrder), RW_LOCAL, 0;
    VI_ATTR_DEST_BYTE_ORDER = 0x3FFF003A, destination_byte_order, {@VME}, choice(U16, ByteOrder), RW_LOCAL, 0;
    VI_ATTR_WIN_BYTE_ORDER = 0x3FFF0047, window_byte_order, {@VME}, choice(U16, ByteOrder), RW_LOCAL, 0;

    // VXI

    VI_ATTR_VXI_LA = 0x3FFF00D5, logical_address, {@VXI_DEVICE}, range(I16, 0, 511), R;
    VI_ATTR_CMDR_LA = 0x3FFF006B, commander_logical_address, {@VXI_DEVICE}, range(I16, 0, 255, [-1]), R;
    VI_ATTR_VXI_DEV_CLASS = 0x3FFF006C, device_class, {@VXI_DEVICE}, choice(U16, VxiClass), R;
    VI_ATTR_MEM_SPACE = 0x3FFF00DE, memory_space, {@VXI_DEVICE}, choice(U16, AddressSpace), R, 1;
    VI_ATTR_MEM_BASE_32 = 0x3FFF00AD, _, {@VXI_DEVICE}, int(U32), R;
    VI_ATTR_MEM_SIZE_32 = 0x3FFF00DD, _, {@VXI_DEVICE}, int(U32), R;
    VI_ATTR_MEM_BASE_64 = 0x3FFF00D0, memory_base, {@VXI_DEVICE}, int(U64), R;
    VI_ATTR_MEM_SIZE_64 = 0x3FFF00D1, memory_size, {@VXI_DEVICE}, int(U64), R;
    VI_ATTR_VXI_TRIG_SUPPORT = 0x3FFF0194, _, {@VXI_DEVICE}, int(U32), R;
    VI_ATTR_SLOT = 0x3FFF00E8, slot, {VXI_INSTR, GPIB_VXI_INSTR, PXI_INSTR}, range(I16, 0, 18, [-1]), R;
    VI_ATTR_MAINFRAME_LA = 0x3FFF0070, mainframe_logical_address,
        {VXI_INSTR, VXI_BACKPLANE, GPIB_VXI_INSTR}, range(I16, 0, 255, [-1]), R;
    VI_ATTR_INTF_PARENT_NUM = 0x3FFF0101, _, {GPIB_VXI_INSTR}, int(U16), R;
    VI_ATTR_VXI_VME_INTR_STATUS = 0x3FFF008B, vme_interrupt_status, {VXI_BACKPLANE}, int(U16), R;
    VI_ATTR_VXI_TRIG_STATUS = 0x3FFF008D, trigger_status, {VXI_BACKPLANE}, int(U32), R;
    VI_ATTR_VXI_VME_SYSFAIL_STATE = 0x3FFF0094, vme_sysfail_state, {VXI_BACKPLANE}, choice(I16, LineState), R;

    // PXI

    VI_ATTR_PXI_DEV_NUM = 0x3FFF0201, device_number, {PXI_INSTR}, range(U16, 0, 31), R;
    VI_ATTR_PXI_FUNC_NUM = 0x3FFF0202, function_number, {PXI_INSTR}, range(U16, 0, 7), R, 0;
    VI_ATTR_PXI_BUS_NUM = 0x3FFF0205, bus_number, {PXI_INSTR}, range(U16, 0, 255), R, 0;
    VI_ATTR_PXI_CHASSIS = 0x3FFF0206, chassis, {PXI_INSTR, PXI_BACKPLANE}, range(I16, 0, 255, [-1]), R;
    VI_ATTR_PXI_SLOTPATH = 0xBFFF0207, slot_path, {PXI_INSTR}, string, R;
    VI_ATTR_PXI_SLOT_LBUS_LEFT = 0x3FFF0208, slot_local_bus_left, {PXI_INSTR}, range(I16, 1, 18, [-1]), R;
    VI_ATTR_PXI_SLOT_LBUS_RIGHT = 0x3FFF0209, slot_local_bus_right, {PXI_INSTR}, range(I16, 1, 18, [-1]), R;
    VI_ATTR_PXI_TRIG_BUS = 0x3FFF020A, trigger_bus, {PXI_INSTR}, range(I16, 1, 3, [-1]), R;
    VI_ATTR_PXI_STAR_TRIG_BUS = 0x3FFF020B, star_trigger_bus, {PXI_INSTR}, range(I16, 1, 3, [-1]), R;
    VI_ATTR_PXI_STAR_TRIG_LINE = 0x3FFF020C, star_trigger_line, {PXI_INSTR}, range(I16, 0, 18, [-1]), R;
    VI_ATTR_PXI_SRC_TRIG_BUS = 0x3FFF020D, source_trigger_bus, {PXI_BACKPLANE}, range(I16, 1, 3, [-1]), RW_LOCAL, -1;
    VI_ATTR_PXI_DEST_TRIG_BUS = 0x3FFF020E, destination_trigger_bus, {PXI_BACKPLANE}, range(I16, 1, 3, [-1]), RW_LOCAL, -1;
    VI_ATTR_PXI_MEM_TYPE_BAR0 = 0x3FFF0211, _, {PXI_INSTR}, choice(U16, PxiMemoryType), R;
    VI_ATTR_PXI_MEM_TYPE_BAR1 = 0x3FFF0212, _, {PXI_INSTR}, choice(U16, PxiMemoryType), R;
    VI_ATTR_PXI_MEM_TYPE_BAR2 = 0x3FFF0213, _, {PXI_INSTR}, choice(U16, PxiMemoryType), R;
    VI_ATTR_PXI_MEM_TYPE_BAR3 = 0x3FFF0214, _, {PXI_INSTR}, choice(U16, PxiMemoryType), R;
    VI_ATTR_PXI_MEM_TYPE_BAR4 = 0x3FFF0215, _, {PXI_INSTR}, choice(U16, PxiMemoryType), R;
    VI_ATTR_PXI_MEM_TYPE_BAR5 = 0x3FFF0216, _, {PXI_INSTR}, choice(U16, PxiMemoryType), R;
    VI_ATTR_PXI_MEM_BASE_BAR0_32 = 0x3FFF0221, _, {PXI_INSTR}, int(U32), R;
    VI_ATTR_PXI_MEM_BASE_BAR1_32 = 0x3FFF0222, _, {PXI_INSTR}, int(U32), R;
    VI_ATTR_PXI_MEM_BASE_BAR2_32 = 0x3FFF0223, _, {PXI_INSTR}, int(U32), R;
    VI_ATTR_PXI_MEM_BASE_BAR3_32 = 0x3FFF0224, _, {PXI_INSTR}, int(U32), R;
    VI_ATTR_PXI_MEM_BASE_BAR4_32 = 0x3FFF0225, _, {PXI_INSTR}, int(U32), R;
    VI_ATTR_PXI_MEM_BASE_BAR5_32 = 0x3FFF0226, _, {PXI_INSTR}, int(U32), R;
    VI_ATTR_PXI_MEM_BASE_BAR0_64 = 0x3FFF0228, _, {PXI_INSTR}, int(U64), R;
    VI_ATTR_PXI_MEM_BASE_BAR1_64 = 0x3FFF0229, _, {PXI_INSTR}, int(U64), R;
    VI_ATTR_PXI_MEM_BASE_BAR2_64 = 0x3FFF022A, _, {PXI_INSTR}, int(U64), R;
    VI_ATTR_PXI_MEM_BASE_BAR3_64 = 0x3FFF022B, _, {PXI_INSTR}, int(U64), R;
    VI_ATTR_PXI_MEM_BASE_BAR4_64 = 0x3FFF022C, _, {PXI_INSTR}, int(U64), R;
    VI_ATTR_PXI_MEM_BASE_BAR5_64 = 0x3FFF022D, _, {PXI_INSTR}, int(U64), R;
    VI_ATTR_PXI_MEM_SIZE_BAR0_32 = 0x3FFF0231, _, {PXI_INSTR}, int(U32), R;
    VI_ATTR_PXI_MEM_SIZE_BAR1_32 = 0x3FFF0232, _, {PXI_INSTR}, int(U32), R;
    VI_ATTR_PXI_MEM_SIZE_BAR2_32 = 0x3FFF0233, _, {PXI_INSTR}, int(U32), R;
    VI_ATTR_PXI_MEM_SIZE_BAR3_32 = 0x3FFF0234, _, {PXI_INSTR}, int(U32), R;
    VI_ATTR_PXI_MEM_SIZE_BAR4_32 = 0x3FFF0235, _, {PXI_INSTR}, int(U32), R;
    VI_ATTR_PXI_MEM_SIZE_BAR5_32 = 0x3FFF0236, _, {PXI_INSTR}, int(U32), R;
    VI_ATTR_PXI_MEM_SIZE_BAR0_64 = 0x3FFF0238, _, {PXI_INSTR}, int(U64), R;
    VI_ATTR_PXI_MEM_SIZE_BAR1_64 = 0x3FFF0239, _, {PXI_INSTR}, int(U64), R;
    VI_ATTR_PXI_MEM_SIZE_BAR2_64 = 0x3FFF023A, _, {PXI_INSTR}, int(U64), R;
    VI_ATTR_PXI_MEM_SIZE_BAR3_64 = 0x3FFF023B, _, {PXI_INSTR}, int(U64), R;
    VI_ATTR_PXI_MEM_SIZE_BAR4_64 = 0x3FFF023C, _, {PXI_INSTR}, int(U64), R;
    VI_ATTR_PXI_MEM_SIZE_BAR5_64 = 0x3FFF023D, _, {PXI_INSTR}, int(U64), R;
    VI_ATTR_PXI_IS_EXPRESS = 0x3FFF0240, is_express, {PXI_INSTR}, bool, R;
    VI_ATTR_PXI_SLOT_LWIDTH = 0x3FFF0241, slot_link_width, {PXI_INSTR}, range(I16, 1, 16, [-1]), R;
    VI_ATTR_PXI_MAX_LWIDTH = 0x3FFF0242, max_link_width, {PXI_INSTR}, range(I16, 1, 16, [-1]), R;
    VI_ATTR_PXI_ACTUAL_LWIDTH = 0x3FFF0243, actual_link_width, {PXI_INSTR}, range(I16, 1, 16, [-1]), R;
    VI_ATTR_PXI_DSTAR_BUS = 0x3FFF0244, dstar_bus, {PXI_INSTR}, int(I16), R;
    VI_ATTR_PXI_DSTAR_SET = 0x3FFF0245, dstar_set, {PXI_INSTR}, int(I16), R;
    VI_ATTR_PXI_ALLOW_WRITE_COMBINE = 0x3FFF0246, allow_write_combine, {PXI_INSTR}, bool, RW_LOCAL;

    // event contexts

    VI_ATTR_JOB_ID = 0x3FFF4006, _, {event IoCompletion}, int(U32), R;
    VI_ATTR_EVENT_TYPE = 0x3FFF4010, _, {
        event IoCompletion Trig ServiceReq Clear Exception GpibCic GpibTalk GpibListen
        VxiVmeSysfail VxiVmeSysreset VxiSigp VxiVmeIntr PxiIntr TcpipConnect UsbIntr
    }, choice(U32, EventType), R;
    VI_ATTR_SIGP_STATUS_ID = 0x3FFF4011, _, {event VxiSigp}, int(U16), R;
    VI_ATTR_RECV_TRIG_ID = 0x3FFF4012, _, {event Trig}, choice(I16, TriggerId), R;
    VI_ATTR_INTR_STATUS_ID = 0x3FFF4023, _, {event VxiVmeIntr}, int(U32), R;
    VI_ATTR_STATUS = 0x3FFF4025, _, {event IoCompletion Exception}, int(I32), R;
    VI_ATTR_RET_COUNT_32 = 0x3FFF4026, _, {event IoCompletion}, int(U32), R;
    VI_ATTR_BUFFER = 0x3FFF4027, _, {event IoCompletion}, addr, R;
    VI_ATTR_RET_COUNT_64 = 0x3FFF4028, _, {event IoCompletion}, int(U64), R;
    VI_ATTR_RECV_INTR_LEVEL = 0x3FFF4041, _, {event VxiVmeIntr}, range(I16, 1, 7, [-1]), R;
    VI_ATTR_OPER_NAME = 0xBFFF4042, _, {event IoCompletion Exception}, string, R;
    VI_ATTR_GPIB_RECV_CIC_STATE = 0x3FFF4193, _, {event GpibCic}, bool, R;
    VI_ATTR_RECV_TCPIP_ADDR = 0xBFFF4198, _, {event TcpipConnect}, string, R;
    VI_ATTR_USB_RECV_INTR_SIZE = 0x3FFF41B0, _, {event UsbIntr}, int(U16), R;
    VI_ATTR_USB_RECV_INTR_DATA = 0xBFFF41B1, _, {event UsbIntr}, buffer(VI_ATTR_USB_RECV_INTR_SIZE), R;
    VI_ATTR_PXI_RECV_INTR_SEQ = 0x3FFF4240, _, {event PxiIntr}, int(U32), R;
    VI_ATTR_PXI_RECV_INTR_DATA = 0x3FFF4241, _, {event PxiIntr}, int(U32), R;
}

/// `VI_ATTR_WIN_BASE_ADDR` as resolved by `visa.h` for this target.
#[cfg(target_pointer_width = "64")]
pub const VI_ATTR_WIN_BASE_ADDR: AttrId = VI_ATTR_WIN_BASE_ADDR_64;
#[cfg(not(target_pointer_width = "64"))]
pub const VI_ATTR_WIN_BASE_ADDR: AttrId = VI_ATTR_WIN_BASE_ADDR_32;

/// `VI_ATTR_RET_COUNT` as resolved by `visa.h` for this target.
#[cfg(target_pointer_width = "64")]
pub const VI_ATTR_RET_COUNT: AttrId = VI_ATTR_RET_COUNT_64;
#[cfg(not(target_pointer_width = "64"))]
pub const VI_ATTR_RET_COUNT: AttrId = VI_ATTR_RET_COUNT_32;
