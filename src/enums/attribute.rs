//! Value sets of enum-backed attributes.
//!
//! Each enum publishes a `DOMAIN` used by the attribute table, so reading a
//! raw value outside of it is reported instead of silently truncated.

consts_to_enum! {
    #[format=value, prefix="VI_STATE_"]
    /// State of a hardware line, e.g. `VI_ATTR_GPIB_REN_STATE`.
    pub enum LineState: i16 {
        VI_STATE_ASSERTED       1
        VI_STATE_UNASSERTED     0
        VI_STATE_UNKNOWN        -1
    }
}

consts_to_enum! {
    #[format=value]
    /// Lock currently held on a resource, `VI_ATTR_RSRC_LOCK_STATE`.
    pub enum LockState: u32 {
        VI_NO_LOCK          0
        VI_EXCLUSIVE_LOCK   1
        VI_SHARED_LOCK      2
    }
}

consts_to_enum! {
    #[format=value, prefix="VI_ASRL_PAR_"]
    pub enum Parity: u16 {
        VI_ASRL_PAR_NONE    0
        VI_ASRL_PAR_ODD     1
        VI_ASRL_PAR_EVEN    2
        VI_ASRL_PAR_MARK    3
        VI_ASRL_PAR_SPACE   4
    }
}

consts_to_enum! {
    #[format=value, prefix="VI_ASRL_STOP_"]
    /// Number of stop bits, in tenths.
    pub enum StopBits: u16 {
        VI_ASRL_STOP_ONE    10
        VI_ASRL_STOP_ONE5   15
        VI_ASRL_STOP_TWO    20
    }
}

consts_to_enum! {
    #[format=value, prefix="VI_ASRL_END_"]
    /// How a serial transfer is terminated, `VI_ATTR_ASRL_END_IN`/`END_OUT`.
    pub enum SerialTermination: u16 {
        VI_ASRL_END_NONE        0   "Nothing terminates the transfer."
        VI_ASRL_END_LAST_BIT    1   "The last bit of each byte is used as the END marker."
        VI_ASRL_END_TERMCHAR    2   "The termination character terminates the transfer."
        VI_ASRL_END_BREAK       3   "A break terminates the transfer (output only)."
    }
}

consts_to_enum! {
    #[format=value]
    /// Electrical wiring of a serial port, NI extension `VI_ATTR_ASRL_WIRE_MODE`.
    pub enum WireMode: i16 {
        Rs485FourWire       0
        Rs485TwoWireDtrEcho 1
        Rs485TwoWireDtrCtrl 2
        Rs485TwoWireAuto    3
        Rs232Dte            128
        Rs232Dce            129
        Rs232Auto           130
        Unknown             -1
    }
}

consts_to_enum! {
    #[format=value, prefix="VI_PROT_"]
    /// Protocol used for message-based transfers, `VI_ATTR_IO_PROT`.
    pub enum IoProtocol: u16 {
        VI_PROT_NORMAL          1
        VI_PROT_FDC             2
        VI_PROT_HS488           3
        VI_PROT_4882_STRS       4
        VI_PROT_USBTMC_VENDOR   5
    }
}

consts_to_enum! {
    #[format=value, prefix="VI_GPIB_"]
    /// Addressing state of a GPIB interface.
    pub enum AddressState: i16 {
        VI_GPIB_UNADDRESSED 0
        VI_GPIB_TALKER      1
        VI_GPIB_LISTENER    2
    }
}

consts_to_enum! {
    #[format=value]
    pub enum ByteOrder: u16 {
        VI_BIG_ENDIAN       0
        VI_LITTLE_ENDIAN    1
    }
}

consts_to_enum! {
    #[format=value]
    /// VXI/VME address modifier used for register accesses.
    pub enum AccessPrivilege: u16 {
        VI_DATA_PRIV    0
        VI_DATA_NPRIV   1
        VI_PROG_PRIV    2
        VI_PROG_NPRIV   3
        VI_BLCK_PRIV    4
        VI_BLCK_NPRIV   5
        VI_D64_PRIV     6
        VI_D64_NPRIV    7
    }
}

consts_to_enum! {
    #[format=value]
    /// Whether a memory window is mapped, `VI_ATTR_WIN_ACCESS`.
    pub enum WindowAccess: u16 {
        VI_NMAPPED      1
        VI_USE_OPERS    2
        VI_DEREF_ADDR   3
    }
}

consts_to_enum! {
    #[format=value, prefix="VI_VXI_CLASS_"]
    pub enum VxiClass: u16 {
        VI_VXI_CLASS_MEMORY     0
        VI_VXI_CLASS_EXTENDED   1
        VI_VXI_CLASS_MESSAGE    2
        VI_VXI_CLASS_REGISTER   3
        VI_VXI_CLASS_OTHER      4
    }
}

consts_to_enum! {
    #[format=value]
    /// Address space of a register-based access.
    pub enum AddressSpace: u16 {
        VI_LOCAL_SPACE      0
        VI_A16_SPACE        1
        VI_A24_SPACE        2
        VI_A32_SPACE        3
        VI_A64_SPACE        4
        VI_PXI_ALLOC_SPACE  9
        VI_PXI_CFG_SPACE    10
        VI_PXI_BAR0_SPACE   11
        VI_PXI_BAR1_SPACE   12
        VI_PXI_BAR2_SPACE   13
        VI_PXI_BAR3_SPACE   14
        VI_PXI_BAR4_SPACE   15
        VI_PXI_BAR5_SPACE   16
        VI_OPAQUE_SPACE     0xFFFF
    }
}

consts_to_enum! {
    #[format=value, prefix="VI_TRIG_"]
    /// Trigger line, `VI_ATTR_TRIG_ID` and `VI_ATTR_RECV_TRIG_ID`.
    pub enum TriggerId: i16 {
        VI_TRIG_ALL         -2
        VI_TRIG_SW          -1
        VI_TRIG_TTL0        0
        VI_TRIG_TTL1        1
        VI_TRIG_TTL2        2
        VI_TRIG_TTL3        3
        VI_TRIG_TTL4        4
        VI_TRIG_TTL5        5
        VI_TRIG_TTL6        6
        VI_TRIG_TTL7        7
        VI_TRIG_ECL0        8
        VI_TRIG_ECL1        9
        VI_TRIG_PANEL_IN    27
        VI_TRIG_PANEL_OUT   28
    }
}

consts_to_enum! {
    #[format=value, prefix="VI_USB_END_"]
    /// How a USB RAW bulk-in transfer ends, `VI_ATTR_USB_END_IN`.
    pub enum UsbEndInput: u16 {
        VI_USB_END_NONE             0
        VI_USB_END_SHORT            4
        VI_USB_END_SHORT_OR_COUNT   5
    }
}

consts_to_enum! {
    #[format=value, prefix="VI_USB_PIPE_"]
    pub enum UsbPipeState: i16 {
        VI_USB_PIPE_STATE_UNKNOWN   -1
        VI_USB_PIPE_READY           0
        VI_USB_PIPE_STALLED         1
    }
}

consts_to_enum! {
    #[format=value, prefix="VI_PXI_ADDR_"]
    /// Kind of memory behind a PXI BAR.
    pub enum PxiMemoryType: u16 {
        VI_PXI_ADDR_NONE    0
        VI_PXI_ADDR_MEM     1
        VI_PXI_ADDR_IO      2
        VI_PXI_ADDR_CFG     3
    }
}

consts_to_enum! {
    #[format=value]
    /// Flushing policy of the formatted I/O buffers.
    pub enum BufferOperation: u16 {
        VI_FLUSH_ON_ACCESS  1
        VI_FLUSH_WHEN_FULL  2
    }
}
