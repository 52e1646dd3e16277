//! GPIB instruments and interfaces.

use super::{
    impl_message_based, resource_wrapper, GpibAttributes, GpibIntfcAttributes, VisaResource,
};
use crate::{
    enums::{
        event::{EventType, Mechanism},
        gpib::{AtnMode, RenMode},
        status::ErrorCode,
    },
    sys as vs, Error, Result, TIMEOUT_INFINITE,
};
use std::time::{Duration, Instant};

/// Unlisten.
const UNL: u8 = 0x3F;
/// Group execute trigger.
const GET: u8 = 0x08;
const MTA_BASE: u8 = 0x40;
const MLA_BASE: u8 = 0x20;
const MSA_BASE: u8 = 0x60;
/// Request service bit of the status byte.
const RQS: u16 = 0x40;

resource_wrapper! {
    /// A device on a GPIB bus, `GPIB[board]::primary[::secondary]::INSTR`.
    pub struct GpibInstrument:
        ResourceAttributes,
        MessageBasedAttributes,
        DmaAttributes,
        GpibAttributes,
        GpibInstrAttributes;
    message_based
}
impl_message_based!(GpibInstrument);

resource_wrapper! {
    /// A GPIB board, `GPIB[board]::INTFC`, for raw bus control.
    pub struct GpibInterface:
        ResourceAttributes,
        MessageBasedAttributes,
        DmaAttributes,
        GpibAttributes,
        GpibIntfcAttributes;
    message_based
}
impl_message_based!(GpibInterface);

/// Bus-level GPIB operations.
pub trait GpibControl: VisaResource {
    /// Controls the state of the GPIB Remote Enable (REN) interface line, and
    /// optionally the remote/local state of the device.
    fn control_ren(&self, mode: RenMode) -> Result<()> {
        self.session()
            .call(|raw, vi| raw.gpib_control_ren(vi, mode.into()))?;
        Ok(())
    }

    /// Specifies the state of the ATN line and the local active controller
    /// state.
    fn control_atn(&self, mode: AtnMode) -> Result<()> {
        self.session()
            .call(|raw, vi| raw.gpib_control_atn(vi, mode.into()))?;
        Ok(())
    }

    /// Tells the GPIB device at the given address to become controller in
    /// charge (CIC).
    fn pass_control(&self, primary: u16, secondary: Option<u16>) -> Result<()> {
        let secondary = secondary.unwrap_or(vs::VI_NO_SEC_ADDR);
        self.session()
            .call(|raw, vi| raw.gpib_pass_control(vi, primary, secondary))?;
        Ok(())
    }

    /// Pulses the interface clear line (IFC) for at least 100 microseconds.
    fn send_ifc(&self) -> Result<()> {
        self.session().call(|raw, vi| raw.gpib_send_ifc(vi))?;
        Ok(())
    }

    /// Writes GPIB command bytes on the bus, returning how many were sent.
    fn send_command(&self, data: &[u8]) -> Result<usize> {
        let mut ret = 0;
        self.session()
            .call(|raw, vi| raw.gpib_command(vi, data, &mut ret))?;
        Ok(ret as usize)
    }

    /// Waits for a service request, i.e. until the RQS bit of the status
    /// byte is set.
    ///
    /// Service request events are enabled on the queue for the wait and the
    /// queue is emptied afterwards. Running out of time is
    /// [`ErrorCode::ErrorTmo`].
    fn wait_for_srq(&self, timeout: Duration) -> Result<()> {
        let session = self.session();
        session.enable_event(EventType::ServiceReq, Mechanism::Queue)?;
        let deadline = Instant::now().checked_add(timeout);
        let waited = (|| -> Result<()> {
            loop {
                let left = match deadline {
                    Some(d) => d.saturating_duration_since(Instant::now()),
                    None => TIMEOUT_INFINITE,
                };
                if session.wait_on_event(EventType::ServiceReq, left)?.timed_out {
                    return Err(Error::Visa(ErrorCode::ErrorTmo));
                }
                if session.read_stb()? & RQS != 0 {
                    return Ok(());
                }
            }
        })();
        session.discard_events(EventType::ServiceReq, Mechanism::Queue)?;
        waited
    }
}

fn bus_address(address: u16) -> Result<u8> {
    match u8::try_from(address) {
        Ok(a) if a <= 30 => Ok(a),
        _ => Err(Error::InvalidArgument(format!("bad GPIB address {address}"))),
    }
}

impl GpibControl for GpibInstrument {}
impl GpibControl for GpibInterface {}

impl GpibInterface {
    /// Triggers all `instruments` at once with a group execute trigger.
    ///
    /// Takes control of the bus first if this board is not controller in
    /// charge, then addresses the instruments to listen and sends GET.
    pub fn group_execute_trigger(&self, instruments: &[&GpibInstrument]) -> Result<usize> {
        let board = self.session.info().interface_board_number;
        let mut command = vec![MTA_BASE, UNL];
        for instr in instruments {
            if instr.info().interface_board_number != board {
                return Err(Error::InvalidArgument(format!(
                    "{} is not on the same board as {}",
                    instr.info().resource_name,
                    self.session.info().resource_name
                )));
            }
            command.push(MLA_BASE + bus_address(instr.primary_address()?)?);
            let secondary = instr.secondary_address()?;
            if secondary != vs::VI_NO_SEC_ADDR {
                command.push(MSA_BASE + bus_address(secondary)?);
            }
        }
        command.push(GET);

        if !self.is_controller_in_charge()? {
            log::debug!(
                "{} is not controller in charge, sending IFC",
                self.session.info().resource_name
            );
            self.send_ifc()?;
        }
        self.send_command(&command)
    }
}
