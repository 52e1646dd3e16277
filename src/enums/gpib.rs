consts_to_enum! {
    #[format=value, prefix="VI_GPIB_ATN_"]
    /// Specify whether the local interface should acquire or release Controller Active status
    ///
    /// See [`control_atn`](crate::resources::GpibControl::control_atn)
    ///
    pub enum AtnMode: u16 {
        VI_GPIB_ATN_DEASSERT            0   "Deassert ATN line. The GPIB interface corresponding to the VISA session goes to standby."
        VI_GPIB_ATN_ASSERT              1   "Assert ATN line and take control synchronously without corrupting transferred data. If a data handshake is in progress, ATN is not asserted until the handshake is complete."
        VI_GPIB_ATN_DEASSERT_HANDSHAKE  2   "Deassert ATN line, and enter shadow handshake mode. The local board participates in data handshake as an Acceptor without actually reading the data."
        VI_GPIB_ATN_ASSERT_IMMEDIATE    3   "Assert ATN line and take control asynchronously and immediately without regard for any data transfer currently in progress. Generally, this should be used only under error conditions."
    }
}

consts_to_enum! {
    #[format=value, prefix="VI_GPIB_REN_"]
    /// Asserts or unasserts the GPIB REN interface line
    ///
    /// See [`control_ren`](crate::resources::GpibControl::control_ren)
    ///
    pub enum RenMode: u16 {
        VI_GPIB_REN_DEASSERT            0   "Deassert REN line."
        VI_GPIB_REN_ASSERT              1   "Assert REN line."
        VI_GPIB_REN_DEASSERT_GTL        2   "Send the Go To Local (GTL) command and deassert REN line."
        VI_GPIB_REN_ASSERT_ADDRESS      3   "Assert REN line and address device."
        VI_GPIB_REN_ASSERT_LLO          4   "Send LLO to any devices that are addressed to listen."
        VI_GPIB_REN_ASSERT_ADDRESS_LLO  5   "Address this device and send it LLO, putting it in RWLS."
        VI_GPIB_REN_ADDRESS_GTL         6   "Send the Go To Local command (GTL) to this device."
    }
}
