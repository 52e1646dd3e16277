//! Resource wrappers, one per `(interface type, resource class)` pair.
//!
//! Attribute properties are grouped in traits after the resources the
//! attributes apply to, e.g. [`GpibAttributes`] for GPIB INSTR and INTFC. A
//! wrapper implements every group that applies to its pair, which is what
//! [`crate::registry::ClassRegistry::register`] checks.
//!
//! Operations beyond attributes live in [`MessageBased`], [`GpibControl`],
//! [`UsbControl`] and [`RegisterBased`], or on the wrappers themselves.

use crate::{
    attributes,
    enums::{attribute::*, interface::InterfaceType},
    flags::FlowControl,
    session::Session,
    Result,
};
use std::{any::Any, fmt};

mod gpib;
mod messagebased;
mod registerbased;
mod serial;
mod tcpip;
mod usb;

pub use gpib::*;
pub use messagebased::*;
pub use registerbased::*;
pub use serial::*;
pub use tcpip::*;
pub use usb::*;

/// An open resource of any type.
pub trait VisaResource: fmt::Debug + Send + Any {
    fn session(&self) -> &Session;

    fn into_session(self: Box<Self>) -> Session;

    /// Name of the wrapper type, e.g. `GpibInstrument`.
    fn type_name(&self) -> &'static str;

    fn as_message_based(&mut self) -> Option<&mut dyn MessageBased> {
        None
    }

    fn as_any(&self) -> &dyn Any;

    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

impl dyn VisaResource {
    pub fn downcast_ref<T: VisaResource>(&self) -> Option<&T> {
        self.as_any().downcast_ref()
    }

    pub fn downcast<T: VisaResource>(self: Box<Self>) -> std::result::Result<Box<T>, Box<dyn Any>> {
        self.into_any().downcast()
    }

    /// Closes the session, see [`Session::close`].
    pub fn close(self: Box<Self>) -> Result<()> {
        self.into_session().close()
    }
}

/// A wrapper the class registry can build from an open session.
pub trait FromSession: VisaResource + Sized {
    const NAME: &'static str;
    /// Properties defined by the wrapper, one slice per attribute group.
    const PROPERTIES: &'static [&'static [&'static str]];

    fn from_session(session: Session) -> Self;
}

macro_rules! attribute_group {
    {
        $(#[$meta:meta])*
        pub trait $group:ident {
            $(
                $(#[$pmeta:meta])*
                $prop:ident $(| $setter:ident)?: $ty:ty = $id:ident;
            )*
        }
    } => {
        $(#[$meta])*
        pub trait $group: VisaResource {
            const PROPERTIES: &'static [&'static str] = &[$(stringify!($prop)),*];

            $(
                #[doc = concat!("Reads `", stringify!($id), "`.")]
                $(#[$pmeta])*
                fn $prop(&self) -> Result<$ty> {
                    self.session().attribute(attributes::$id)
                }

                $(
                    #[doc = concat!("Writes `", stringify!($id), "`.")]
                    fn $setter(&self, value: $ty) -> Result<()> {
                        self.session().set_attribute(attributes::$id, value)
                    }
                )?
            )*
        }
    };
}

/// Declares a wrapper type over a [`Session`] with the attribute groups it
/// implements. `message_based` wrappers also carry [`IoSettings`].
macro_rules! resource_wrapper {
    (@common $name:ident [$($group:ident),+] { $($init:tt)* }) => {
        $(impl $crate::resources::$group for $name {})+

        impl $crate::resources::FromSession for $name {
            const NAME: &'static str = stringify!($name);
            const PROPERTIES: &'static [&'static [&'static str]] =
                &[$(<$name as $crate::resources::$group>::PROPERTIES),+];

            fn from_session(session: $crate::session::Session) -> Self {
                Self { session, $($init)* }
            }
        }

        impl $name {
            /// Closes the session, see [`Session::close`]($crate::session::Session::close).
            pub fn close(self) -> $crate::Result<()> {
                self.session.close()
            }
        }

        impl ::std::ops::Deref for $name {
            type Target = $crate::session::Session;
            fn deref(&self) -> &$crate::session::Session {
                &self.session
            }
        }
    };
    {
        $(#[$meta:meta])*
        pub struct $name:ident: $($group:ident),+; message_based
    } => {
        $(#[$meta])*
        #[derive(Debug)]
        pub struct $name {
            session: $crate::session::Session,
            io: $crate::resources::IoSettings,
        }

        $crate::resources::resource_wrapper!(@common $name [$($group),+] { io: Default::default() });
        $crate::resources::impl_visa_resource!($name, MessageBased);
    };
    {
        $(#[$meta:meta])*
        pub struct $name:ident: $($group:ident),+
    } => {
        $(#[$meta])*
        #[derive(Debug)]
        pub struct $name {
            session: $crate::session::Session,
        }

        $crate::resources::resource_wrapper!(@common $name [$($group),+] {});
        $crate::resources::impl_visa_resource!($name);
    };
}

/// Implements [`VisaResource`] for a wrapper, with the message-based view
/// when the wrapper does message-based I/O.
macro_rules! impl_visa_resource {
    ($name:ident $(, $msg:ident)?) => {
        impl $crate::resources::VisaResource for $name {
            fn session(&self) -> &$crate::session::Session {
                &self.session
            }

            fn into_session(self: Box<Self>) -> $crate::session::Session {
                self.session
            }

            fn type_name(&self) -> &'static str {
                <Self as $crate::resources::FromSession>::NAME
            }

            $(
                fn as_message_based(&mut self) -> Option<&mut dyn $crate::resources::$msg> {
                    Some(self)
                }
            )?

            fn as_any(&self) -> &dyn ::std::any::Any {
                self
            }

            fn into_any(self: Box<Self>) -> Box<dyn ::std::any::Any> {
                self
            }
        }
    };
}

pub(crate) use {impl_visa_resource, resource_wrapper};

attribute_group! {
    /// Attributes of every session.
    pub trait ResourceAttributes {
        resource_class: String = VI_ATTR_RSRC_CLASS;
        resource_name: String = VI_ATTR_RSRC_NAME;
        implementation_version: u32 = VI_ATTR_RSRC_IMPL_VERSION;
        lock_state: LockState = VI_ATTR_RSRC_LOCK_STATE;
        /// In milliseconds, `f64::INFINITY` for no timeout.
        timeout | set_timeout: f64 = VI_ATTR_TMO_VALUE;
        spec_version: u32 = VI_ATTR_RSRC_SPEC_VERSION;
        interface_type: InterfaceType = VI_ATTR_INTF_TYPE;
        resource_manufacturer_name: String = VI_ATTR_RSRC_MANF_NAME;
        resource_manufacturer_id: u16 = VI_ATTR_RSRC_MANF_ID;
        interface_number: u16 = VI_ATTR_INTF_NUM;
    }
}

attribute_group! {
    /// Attributes of message-based resources.
    pub trait MessageBasedAttributes {
        send_end | set_send_end: bool = VI_ATTR_SEND_END_EN;
        io_protocol | set_io_protocol: IoProtocol = VI_ATTR_IO_PROT;
    }
}

attribute_group! {
    pub trait SuppressEndAttributes {
        suppress_end_enabled | set_suppress_end_enabled: bool = VI_ATTR_SUPPRESS_END_EN;
    }
}

attribute_group! {
    pub trait DmaAttributes {
        allow_dma | set_allow_dma: bool = VI_ATTR_DMA_ALLOW_EN;
    }
}

attribute_group! {
    /// Attributes of devices reporting their identity (USB, VXI, PXI).
    pub trait IdentityAttributes {
        manufacturer_name: String = VI_ATTR_MANF_NAME;
        model_name: String = VI_ATTR_MODEL_NAME;
        manufacturer_id: u16 = VI_ATTR_MANF_ID;
        model_code: u16 = VI_ATTR_MODEL_CODE;
    }
}

attribute_group! {
    pub trait Ieee4882Attributes {
        is_4882_compliant: bool = VI_ATTR_4882_COMPLIANT;
    }
}

attribute_group! {
    pub trait SlotAttributes {
        /// `-1` when unknown.
        slot: i16 = VI_ATTR_SLOT;
    }
}

attribute_group! {
    pub trait MainframeAttributes {
        mainframe_logical_address: i16 = VI_ATTR_MAINFRAME_LA;
    }
}

attribute_group! {
    pub trait ChassisAttributes {
        chassis: i16 = VI_ATTR_PXI_CHASSIS;
    }
}

attribute_group! {
    pub trait GpibAttributes {
        primary_address | set_primary_address: u16 = VI_ATTR_GPIB_PRIMARY_ADDR;
        /// `VI_NO_SEC_ADDR` when not in use.
        secondary_address | set_secondary_address: u16 = VI_ATTR_GPIB_SECONDARY_ADDR;
        remote_enabled: LineState = VI_ATTR_GPIB_REN_STATE;
    }
}

attribute_group! {
    pub trait GpibInstrAttributes {
        enable_repeat_addressing | set_enable_repeat_addressing: bool = VI_ATTR_GPIB_READDR_EN;
        enable_unaddressing | set_enable_unaddressing: bool = VI_ATTR_GPIB_UNADDR_EN;
    }
}

attribute_group! {
    pub trait GpibIntfcAttributes {
        atn_state: LineState = VI_ATTR_GPIB_ATN_STATE;
        address_state: AddressState = VI_ATTR_GPIB_ADDR_STATE;
        is_controller_in_charge: bool = VI_ATTR_GPIB_CIC_STATE;
        ndac_state: LineState = VI_ATTR_GPIB_NDAC_STATE;
        srq_state: LineState = VI_ATTR_GPIB_SRQ_STATE;
        is_system_controller | set_is_system_controller: bool = VI_ATTR_GPIB_SYS_CNTRL_STATE;
    }
}

attribute_group! {
    pub trait SerialAttributes {
        baud_rate | set_baud_rate: u32 = VI_ATTR_ASRL_BAUD;
        data_bits | set_data_bits: u16 = VI_ATTR_ASRL_DATA_BITS;
        parity | set_parity: Parity = VI_ATTR_ASRL_PARITY;
        stop_bits | set_stop_bits: StopBits = VI_ATTR_ASRL_STOP_BITS;
        flow_control | set_flow_control: FlowControl = VI_ATTR_ASRL_FLOW_CNTRL;
        bytes_in_buffer: u32 = VI_ATTR_ASRL_AVAIL_NUM;
        cts_state: LineState = VI_ATTR_ASRL_CTS_STATE;
        dcd_state: LineState = VI_ATTR_ASRL_DCD_STATE;
        discard_null | set_discard_null: bool = VI_ATTR_ASRL_DISCARD_NULL;
        dsr_state: LineState = VI_ATTR_ASRL_DSR_STATE;
        dtr_state | set_dtr_state: LineState = VI_ATTR_ASRL_DTR_STATE;
        end_input | set_end_input: SerialTermination = VI_ATTR_ASRL_END_IN;
        end_output | set_end_output: SerialTermination = VI_ATTR_ASRL_END_OUT;
        replace_char | set_replace_char: u8 = VI_ATTR_ASRL_REPLACE_CHAR;
        ri_state: LineState = VI_ATTR_ASRL_RI_STATE;
        rts_state | set_rts_state: LineState = VI_ATTR_ASRL_RTS_STATE;
        xon_char | set_xon_char: u8 = VI_ATTR_ASRL_XON_CHAR;
        xoff_char | set_xoff_char: u8 = VI_ATTR_ASRL_XOFF_CHAR;
        connected: bool = VI_ATTR_ASRL_CONNECTED;
        break_state | set_break_state: LineState = VI_ATTR_ASRL_BREAK_STATE;
        break_length | set_break_length: i16 = VI_ATTR_ASRL_BREAK_LEN;
        allow_transmit | set_allow_transmit: bool = VI_ATTR_ASRL_ALLOW_TRANSMIT;
        wire_mode | set_wire_mode: WireMode = VI_ATTR_ASRL_WIRE_MODE;
    }
}

attribute_group! {
    pub trait TcpipAttributes {
        address: String = VI_ATTR_TCPIP_ADDR;
        hostname: String = VI_ATTR_TCPIP_HOSTNAME;
    }
}

attribute_group! {
    pub trait TcpipInstrAttributes {
        lan_device_name: String = VI_ATTR_TCPIP_DEVICE_NAME;
        hislip_overlap_enabled | set_hislip_overlap_enabled: bool = VI_ATTR_TCPIP_HISLIP_OVERLAP_EN;
        hislip_version: u32 = VI_ATTR_TCPIP_HISLIP_VERSION;
        hislip_max_message_kb | set_hislip_max_message_kb: u32 = VI_ATTR_TCPIP_HISLIP_MAX_MESSAGE_KB;
        is_hislip: bool = VI_ATTR_TCPIP_IS_HISLIP;
    }
}

attribute_group! {
    pub trait TcpipSocketAttributes {
        port: u16 = VI_ATTR_TCPIP_PORT;
        tcp_nodelay | set_tcp_nodelay: bool = VI_ATTR_TCPIP_NODELAY;
        tcp_keepalive | set_tcp_keepalive: bool = VI_ATTR_TCPIP_KEEPALIVE;
    }
}

attribute_group! {
    pub trait UsbAttributes {
        serial_number: String = VI_ATTR_USB_SERIAL_NUM;
        usb_interface_number: i16 = VI_ATTR_USB_INTFC_NUM;
        usb_protocol: i16 = VI_ATTR_USB_PROTOCOL;
        maximum_interrupt_size | set_maximum_interrupt_size: u16 = VI_ATTR_USB_MAX_INTR_SIZE;
    }
}

attribute_group! {
    pub trait UsbRawAttributes {
        bulk_out_pipe | set_bulk_out_pipe: i16 = VI_ATTR_USB_BULK_OUT_PIPE;
        bulk_in_pipe | set_bulk_in_pipe: i16 = VI_ATTR_USB_BULK_IN_PIPE;
        interrupt_in_pipe | set_interrupt_in_pipe: i16 = VI_ATTR_USB_INTR_IN_PIPE;
        usb_class: i16 = VI_ATTR_USB_CLASS;
        usb_subclass: i16 = VI_ATTR_USB_SUBCLASS;
        alternate_setting | set_alternate_setting: i16 = VI_ATTR_USB_ALT_SETTING;
        usb_end_input | set_usb_end_input: UsbEndInput = VI_ATTR_USB_END_IN;
        interface_count: i16 = VI_ATTR_USB_NUM_INTFCS;
        pipe_count: i16 = VI_ATTR_USB_NUM_PIPES;
        bulk_out_status | set_bulk_out_status: UsbPipeState = VI_ATTR_USB_BULK_OUT_STATUS;
        bulk_in_status | set_bulk_in_status: UsbPipeState = VI_ATTR_USB_BULK_IN_STATUS;
        interrupt_in_status | set_interrupt_in_status: UsbPipeState = VI_ATTR_USB_INTR_IN_STATUS;
        control_pipe | set_control_pipe: i16 = VI_ATTR_USB_CTRL_PIPE;
    }
}

attribute_group! {
    pub trait RegisterBasedAttributes {
        source_increment | set_source_increment: i32 = VI_ATTR_SRC_INCREMENT;
        destination_increment | set_destination_increment: i32 = VI_ATTR_DEST_INCREMENT;
        window_access: WindowAccess = VI_ATTR_WIN_ACCESS;
        window_base_address: u64 = VI_ATTR_WIN_BASE_ADDR_64;
        window_size: u64 = VI_ATTR_WIN_SIZE_64;
    }
}

attribute_group! {
    /// Bus access settings of VME based resources.
    pub trait VmeAttributes {
        source_access_privilege | set_source_access_privilege: AccessPrivilege = VI_ATTR_SRC_ACCESS_PRIV;
        destination_access_privilege | set_destination_access_privilege: AccessPrivilege = VI_ATTR_DEST_ACCESS_PRIV;
        window_access_privilege | set_window_access_privilege: AccessPrivilege = VI_ATTR_WIN_ACCESS_PRIV;
        source_byte_order | set_source_byte_order: ByteOrder = VI_ATTR_SRC_BYTE_ORDER;
        destination_byte_order | set_destination_byte_order: ByteOrder = VI_ATTR_DEST_BYTE_ORDER;
        window_byte_order | set_window_byte_order: ByteOrder = VI_ATTR_WIN_BYTE_ORDER;
    }
}

attribute_group! {
    pub trait VxiDeviceAttributes {
        logical_address: i16 = VI_ATTR_VXI_LA;
        commander_logical_address: i16 = VI_ATTR_CMDR_LA;
        device_class: VxiClass = VI_ATTR_VXI_DEV_CLASS;
        memory_space: AddressSpace = VI_ATTR_MEM_SPACE;
        memory_base: u64 = VI_ATTR_MEM_BASE_64;
        memory_size: u64 = VI_ATTR_MEM_SIZE_64;
    }
}

attribute_group! {
    pub trait VxiBackplaneAttributes {
        vme_interrupt_status: u16 = VI_ATTR_VXI_VME_INTR_STATUS;
        trigger_status: u32 = VI_ATTR_VXI_TRIG_STATUS;
        vme_sysfail_state: LineState = VI_ATTR_VXI_VME_SYSFAIL_STATE;
    }
}

attribute_group! {
    pub trait PxiAttributes {
        device_number: u16 = VI_ATTR_PXI_DEV_NUM;
        function_number: u16 = VI_ATTR_PXI_FUNC_NUM;
        bus_number: u16 = VI_ATTR_PXI_BUS_NUM;
        slot_path: String = VI_ATTR_PXI_SLOTPATH;
        slot_local_bus_left: i16 = VI_ATTR_PXI_SLOT_LBUS_LEFT;
        slot_local_bus_right: i16 = VI_ATTR_PXI_SLOT_LBUS_RIGHT;
        trigger_bus: i16 = VI_ATTR_PXI_TRIG_BUS;
        star_trigger_bus: i16 = VI_ATTR_PXI_STAR_TRIG_BUS;
        star_trigger_line: i16 = VI_ATTR_PXI_STAR_TRIG_LINE;
        is_express: bool = VI_ATTR_PXI_IS_EXPRESS;
        slot_link_width: i16 = VI_ATTR_PXI_SLOT_LWIDTH;
        max_link_width: i16 = VI_ATTR_PXI_MAX_LWIDTH;
        actual_link_width: i16 = VI_ATTR_PXI_ACTUAL_LWIDTH;
        dstar_bus: i16 = VI_ATTR_PXI_DSTAR_BUS;
        dstar_set: i16 = VI_ATTR_PXI_DSTAR_SET;
        allow_write_combine | set_allow_write_combine: bool = VI_ATTR_PXI_ALLOW_WRITE_COMBINE;
    }
}

attribute_group! {
    pub trait PxiBackplaneAttributes {
        source_trigger_bus | set_source_trigger_bus: i16 = VI_ATTR_PXI_SRC_TRIG_BUS;
        destination_trigger_bus | set_destination_trigger_bus: i16 = VI_ATTR_PXI_DEST_TRIG_BUS;
    }
}

resource_wrapper! {
    /// Any resource without a dedicated wrapper. Attributes and raw
    /// reads/writes through the [`Session`] still work.
    pub struct Resource: ResourceAttributes
}
