consts_to_enum! {
    #[format=value, prefix="VI_ASSERT_"]
    /// This specifies how to assert the interrupt.
    ///
    /// See [`assert_interrupt_signal`](crate::resources::VxiBackplane::assert_interrupt_signal)
    ///
    pub enum AssertIntrHow: i16 {
        VI_ASSERT_SIGNAL            -1  "Send the notification via a VXI signal."
        VI_ASSERT_USE_ASSIGNED      0   "Use whatever notification method that has been assigned to the local device."
        VI_ASSERT_IRQ1              1   "Send the interrupt via VXI/VME IRQ line 1 using the ROAK mechanism."
        VI_ASSERT_IRQ2              2   "Send the interrupt via VXI/VME IRQ line 2 using the ROAK mechanism."
        VI_ASSERT_IRQ3              3   "Send the interrupt via VXI/VME IRQ line 3 using the ROAK mechanism."
        VI_ASSERT_IRQ4              4   "Send the interrupt via VXI/VME IRQ line 4 using the ROAK mechanism."
        VI_ASSERT_IRQ5              5   "Send the interrupt via VXI/VME IRQ line 5 using the ROAK mechanism."
        VI_ASSERT_IRQ6              6   "Send the interrupt via VXI/VME IRQ line 6 using the ROAK mechanism."
        VI_ASSERT_IRQ7              7   "Send the interrupt via VXI/VME IRQ line 7 using the ROAK mechanism."
    }
}

consts_to_enum! {
    #[format=value, prefix="VI_TRIG_PROT_"]
    /// Trigger protocol to use during assertion.
    /// * GPIB, Serial, TCPIP, USB
    ///
    /// VI_TRIG_PROT_DEFAULT (0)
    ///
    /// * VXI
    ///
    /// VI_TRIG_PROT_DEFAULT (0),
    /// VI_TRIG_PROT_ON (1),
    /// VI_TRIG_PROT_OFF (2), and
    /// VI_TRIG_PROT_SYNC (5)
    ///
    /// * PXI
    ///
    /// VI_TRIG_PROT_RESERVE (6)
    /// VI_TRIG_PROT_UNRESERVE (7)
    ///
    /// See [`Session::assert_trigger`](crate::session::Session::assert_trigger)
    ///
    pub enum AssertTrigPro: u16 {
        VI_TRIG_PROT_DEFAULT    0
        VI_TRIG_PROT_ON         1
        VI_TRIG_PROT_OFF        2
        VI_TRIG_PROT_SYNC       5
        VI_TRIG_PROT_RESERVE    6
        VI_TRIG_PROT_UNRESERVE  7
    }
}

consts_to_enum! {
    #[format=value, prefix="VI_UTIL_"]
    /// Specifies the utility bus signal to assert.
    ///
    /// See [`assert_utility_signal`](crate::resources::VxiBackplane::assert_utility_signal)
    ///
    pub enum AssertBusSignal: u16 {
        VI_UTIL_ASSERT_SYSRESET    1
        VI_UTIL_ASSERT_SYSFAIL     2
        VI_UTIL_DEASSERT_SYSFAIL   3
    }
}
