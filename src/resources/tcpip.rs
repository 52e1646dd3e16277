//! LAN instruments: VXI-11 and HiSLIP (`TCPIP::host::INSTR`) and raw
//! sockets (`TCPIP::host::port::SOCKET`).

use super::{impl_message_based, resource_wrapper};
use crate::{enums::gpib::RenMode, Result};

resource_wrapper! {
    pub struct TcpipInstrument:
        ResourceAttributes,
        MessageBasedAttributes,
        TcpipAttributes,
        TcpipInstrAttributes;
    message_based
}
impl_message_based!(TcpipInstrument);

impl TcpipInstrument {
    /// Controls the remote/local state of the device, the VXI-11 and HiSLIP
    /// counterpart of the GPIB REN line.
    pub fn control_ren(&self, mode: RenMode) -> Result<()> {
        self.session
            .call(|raw, vi| raw.gpib_control_ren(vi, mode.into()))?;
        Ok(())
    }
}

resource_wrapper! {
    /// A raw TCP socket. Messages usually end with `\n` and no END.
    pub struct TcpipSocket:
        ResourceAttributes,
        MessageBasedAttributes,
        SuppressEndAttributes,
        TcpipAttributes,
        TcpipSocketAttributes;
    message_based
}
impl_message_based!(TcpipSocket);
