//! Register-based resources: VXI and PXI devices, their memory access
//! sessions and backplanes.

use super::{resource_wrapper, impl_message_based, VisaResource};
use crate::{
    enums::{
        assert::{AssertBusSignal, AssertIntrHow, AssertTrigPro},
        attribute::AddressSpace,
    },
    library::MemWidth,
    Error, Result,
};

/// `viInXX`/`viOutXX` access to the memory of a device.
pub trait RegisterBased: VisaResource {
    /// Reads one `width` wide value at `offset` in `space`.
    fn read_memory(&self, space: AddressSpace, offset: u64, width: MemWidth) -> Result<u64> {
        let mut value = 0;
        self.session()
            .call(|raw, vi| raw.read_memory(vi, space.into(), offset, width, &mut value))?;
        Ok(value)
    }

    /// Writes `value` at `offset` in `space`. The value has to fit in
    /// `width`.
    fn write_memory(
        &self,
        space: AddressSpace,
        offset: u64,
        width: MemWidth,
        value: u64,
    ) -> Result<()> {
        let bits = width.bytes() * 8;
        if bits < 64 && value >> bits != 0 {
            return Err(Error::OutOfRange {
                name: "value",
                value: value.into(),
                min: 0,
                max: (1i128 << bits) - 1,
            });
        }
        self.session()
            .call(|raw, vi| raw.write_memory(vi, space.into(), offset, width, value))?;
        Ok(())
    }
}

resource_wrapper! {
    /// A VXI device, on a VXI bus or behind a GPIB-VXI controller
    /// (`VXI::la::INSTR`, `GPIB-VXI::la::INSTR`).
    pub struct VxiInstrument:
        ResourceAttributes,
        MessageBasedAttributes,
        SuppressEndAttributes,
        DmaAttributes,
        IdentityAttributes,
        Ieee4882Attributes,
        RegisterBasedAttributes,
        VmeAttributes,
        VxiDeviceAttributes,
        SlotAttributes,
        MainframeAttributes;
    message_based
}
impl_message_based!(VxiInstrument);
impl RegisterBased for VxiInstrument {}

resource_wrapper! {
    /// Direct access to VXI/VME memory, `VXI::MEMACC`.
    pub struct VxiMemacc:
        ResourceAttributes,
        DmaAttributes,
        RegisterBasedAttributes,
        VmeAttributes
}
impl RegisterBased for VxiMemacc {}

resource_wrapper! {
    /// The backplane of a VXI mainframe, `VXI::la::BACKPLANE`.
    pub struct VxiBackplane:
        ResourceAttributes,
        MainframeAttributes,
        VxiBackplaneAttributes
}

impl VxiBackplane {
    /// Asserts a trigger line of the mainframe.
    pub fn assert_trigger(&self, protocol: AssertTrigPro) -> Result<()> {
        self.session.assert_trigger(protocol)
    }

    /// Asserts or deasserts a utility bus signal (SYSRESET, SYSFAIL).
    pub fn assert_utility_signal(&self, signal: AssertBusSignal) -> Result<()> {
        self.session
            .call(|raw, vi| raw.assert_util_signal(vi, signal.into()))?;
        Ok(())
    }

    /// Asserts an interrupt or signal with the given status/ID value.
    pub fn assert_interrupt_signal(&self, how: AssertIntrHow, status_id: u32) -> Result<()> {
        self.session
            .call(|raw, vi| raw.assert_intr_signal(vi, how.into(), status_id))?;
        Ok(())
    }
}

resource_wrapper! {
    /// A PXI/PCI device, `PXI::device[::function]::INSTR`.
    pub struct PxiInstrument:
        ResourceAttributes,
        IdentityAttributes,
        RegisterBasedAttributes,
        SlotAttributes,
        PxiAttributes,
        ChassisAttributes
}
impl RegisterBased for PxiInstrument {}

resource_wrapper! {
    /// Direct access to PXI memory, `PXI::MEMACC`.
    pub struct PxiMemacc:
        ResourceAttributes,
        RegisterBasedAttributes
}
impl RegisterBased for PxiMemacc {}

resource_wrapper! {
    /// The backplane of a PXI chassis, `PXI::chassis::BACKPLANE`.
    pub struct PxiBackplane:
        ResourceAttributes,
        ChassisAttributes,
        PxiBackplaneAttributes
}
