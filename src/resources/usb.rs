//! USB instruments: USBTMC devices (`INSTR`) and raw USB devices (`RAW`).

use super::{impl_message_based, resource_wrapper, VisaResource};
use crate::{Error, Result};
use bytes::Bytes;

resource_wrapper! {
    /// A USBTMC device.
    pub struct UsbInstrument:
        ResourceAttributes,
        MessageBasedAttributes,
        SuppressEndAttributes,
        IdentityAttributes,
        Ieee4882Attributes,
        UsbAttributes;
    message_based
}
impl_message_based!(UsbInstrument);

resource_wrapper! {
    /// A USB device driven through its bulk and interrupt pipes.
    pub struct UsbRaw:
        ResourceAttributes,
        MessageBasedAttributes,
        SuppressEndAttributes,
        IdentityAttributes,
        UsbAttributes,
        UsbRawAttributes;
    message_based
}
impl_message_based!(UsbRaw);

/// Control pipe transfers.
pub trait UsbControl: VisaResource {
    /// Performs a USB control pipe transfer from the device, returning at
    /// most `length` bytes.
    fn control_in(
        &self,
        request_type: i16,
        request: i16,
        value: u16,
        index: u16,
        length: u16,
    ) -> Result<Bytes> {
        let mut buf = vec![0u8; usize::from(length)];
        let mut ret = 0;
        self.session().call(|raw, vi| {
            raw.usb_control_in(vi, request_type, request, value, index, &mut buf, &mut ret)
        })?;
        buf.truncate(usize::from(ret));
        Ok(buf.into())
    }

    /// Performs a USB control pipe transfer to the device.
    fn control_out(
        &self,
        request_type: i16,
        request: i16,
        value: u16,
        index: u16,
        data: &[u8],
    ) -> Result<()> {
        if data.len() > usize::from(u16::MAX) {
            return Err(Error::InvalidArgument(format!(
                "control transfer of {} bytes is too large",
                data.len()
            )));
        }
        self.session().call(|raw, vi| {
            raw.usb_control_out(vi, request_type, request, value, index, data)
        })?;
        Ok(())
    }
}

impl UsbControl for UsbInstrument {}
impl UsbControl for UsbRaw {}
