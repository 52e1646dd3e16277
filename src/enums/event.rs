//!
//! [EventType] defined in VISA Library 7.1 specification,
//! corresponding attributes are registered with an `Events` applicability in
//! [attributes](crate::attributes).
//!

#![allow(overflowing_literals)]

consts_to_enum! {
    #[format=value, prefix="VI_EVENT_"]
    /// Logical identifier of an event, value of `VI_ATTR_EVENT_TYPE`.
    pub enum EventType: u32 {
        VI_EVENT_IO_COMPLETION      0x3FFF2009  "An asynchronous operation has completed."
        VI_EVENT_TRIG               0xBFFF200A  "A trigger interrupt was received from the device."
        VI_EVENT_SERVICE_REQ        0x3FFF200B  "A service request was received from the device or interface."
        VI_EVENT_CLEAR              0x3FFF200D  "The local controller has been sent a device clear message."
        VI_EVENT_EXCEPTION          0xBFFF200E  "An error condition has occurred during an operation invocation."
        VI_EVENT_GPIB_CIC           0x3FFF2012  "The GPIB controller has gained or lost CIC status."
        VI_EVENT_GPIB_TALK          0x3FFF2013  "The GPIB controller has been addressed to talk."
        VI_EVENT_GPIB_LISTEN        0x3FFF2014  "The GPIB controller has been addressed to listen."
        VI_EVENT_VXI_VME_SYSFAIL    0x3FFF201D  "The VXI/VME SYSFAIL* line has been asserted."
        VI_EVENT_VXI_VME_SYSRESET   0x3FFF201E  "The VXI/VME SYSRESET* line has been asserted."
        VI_EVENT_VXI_SIGP           0x3FFF2020  "A VXIbus signal or VXIbus interrupt was received from the device."
        VI_EVENT_VXI_VME_INTR       0xBFFF2021  "A VXIbus interrupt was received from the device."
        VI_EVENT_PXI_INTR           0x3FFF2022  "The PXI/PCI device has asserted an interrupt."
        VI_EVENT_TCPIP_CONNECT      0x3FFF2036  "A TCP/IP connection has been made."
        VI_EVENT_USB_INTR           0x3FFF2037  "An interrupt was received from the USB device."
        VI_ALL_ENABLED_EVENTS       0x3FFF7FFF  "Every event enabled on the session."
    }
}

consts_to_enum! {
    #[format=value]
    /// How an enabled event is delivered. Only the queue is serviced by this
    /// crate, see [`Session::wait_on_event`](crate::session::Session::wait_on_event).
    pub enum Mechanism: u16 {
        VI_QUEUE            1
        VI_HNDLR            2
        VI_SUSPEND_HNDLR    4
        VI_ALL_MECH         0xFFFF
    }
}
