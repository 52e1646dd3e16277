mod common;

use anyhow::Result;
use common::{mock, Call, MockVisa};
use rstest::rstest;
use visa_bind::{
    attributes::{
        VI_ATTR_ASRL_BAUD, VI_ATTR_ASRL_DATA_BITS, VI_ATTR_ASRL_PARITY, VI_ATTR_GPIB_PRIMARY_ADDR,
        VI_ATTR_GPIB_SECONDARY_ADDR, VI_ATTR_RSRC_MANF_NAME, VI_ATTR_RSRC_NAME, VI_ATTR_TMO_VALUE,
    },
    enums::attribute::{Parity, StopBits},
    resources::*,
    sys::{self as vs, VI_NO_SEC_ADDR},
    AttrValue, Error,
};

fn set_calls(mock: &MockVisa, attr: vs::ViAttr) -> usize {
    mock.calls()
        .iter()
        .filter(|c| matches!(c, Call::SetAttribute(_, a, _) if *a == attr))
        .count()
}

#[rstest]
#[case(Parity::None)]
#[case(Parity::Odd)]
#[case(Parity::Even)]
#[case(Parity::Mark)]
#[case(Parity::Space)]
fn parity_roundtrip(mock: MockVisa, #[case] parity: Parity) -> Result<()> {
    let rm = mock.rm()?;
    let serial: SerialInstrument = rm.open_as("ASRL1::INSTR")?;
    serial.set_parity(parity)?;
    assert_eq!(
        mock.attr(serial.vi(), VI_ATTR_ASRL_PARITY),
        Some(u16::from(parity) as u64)
    );
    assert_eq!(serial.parity()?, parity);
    Ok(())
}

#[rstest]
fn stop_bits_are_tenths(mock: MockVisa) -> Result<()> {
    let rm = mock.rm()?;
    let serial: SerialInstrument = rm.open_as("ASRL1::INSTR")?;
    serial.set_stop_bits(StopBits::One5)?;
    assert_eq!(serial.stop_bits()?, StopBits::One5);
    Ok(())
}

#[rstest]
fn unknown_enum_value_is_reported(mock: MockVisa) -> Result<()> {
    let rm = mock.rm()?;
    let serial: SerialInstrument = rm.open_as("ASRL1::INSTR")?;
    mock.set_attr(serial.vi(), VI_ATTR_ASRL_PARITY, 9);
    assert!(matches!(
        serial.parity(),
        Err(Error::TypeMismatch { name: "VI_ATTR_ASRL_PARITY", .. })
    ));
    Ok(())
}

#[rstest]
#[case(5, true)]
#[case(8, true)]
#[case(4, false)]
#[case(9, false)]
fn data_bits_bounds(mock: MockVisa, #[case] bits: u16, #[case] accepted: bool) -> Result<()> {
    let rm = mock.rm()?;
    let serial: SerialInstrument = rm.open_as("ASRL1::INSTR")?;
    let ret = serial.set_data_bits(bits);
    if accepted {
        ret?;
        assert_eq!(serial.data_bits()?, bits);
        assert_eq!(set_calls(&mock, VI_ATTR_ASRL_DATA_BITS), 1);
    } else {
        assert!(matches!(
            ret,
            Err(Error::OutOfRange { min: 5, max: 8, .. })
        ));
        assert_eq!(set_calls(&mock, VI_ATTR_ASRL_DATA_BITS), 0);
    }
    Ok(())
}

#[rstest]
fn gpib_addresses_stop_at_30(mock: MockVisa) -> Result<()> {
    let rm = mock.rm()?;
    let instr: GpibInstrument = rm.open_as("GPIB0::12::INSTR")?;
    instr.set_primary_address(0)?;
    instr.set_primary_address(30)?;
    assert!(matches!(
        instr.set_primary_address(31),
        Err(Error::OutOfRange { value: 31, .. })
    ));
    assert_eq!(set_calls(&mock, VI_ATTR_GPIB_PRIMARY_ADDR), 2);
    assert_eq!(instr.primary_address()?, 30);
    Ok(())
}

#[rstest]
fn secondary_address_can_be_unused(mock: MockVisa) -> Result<()> {
    let rm = mock.rm()?;
    let instr: GpibInstrument = rm.open_as("GPIB0::12::INSTR")?;
    instr.set_secondary_address(VI_NO_SEC_ADDR)?;
    assert_eq!(instr.secondary_address()?, VI_NO_SEC_ADDR);
    instr.set_secondary_address(3)?;
    assert_eq!(
        mock.attr(instr.vi(), VI_ATTR_GPIB_SECONDARY_ADDR),
        Some(3)
    );
    Ok(())
}

#[rstest]
fn attributes_of_other_interfaces_never_reach_the_library(mock: MockVisa) -> Result<()> {
    let rm = mock.rm()?;
    let session = rm.open_bare_resource("GPIB0::12::INSTR")?;
    mock.clear_calls();
    assert!(matches!(
        session.get_attribute(VI_ATTR_ASRL_BAUD),
        Err(Error::NotApplicable { name: "VI_ATTR_ASRL_BAUD", .. })
    ));
    assert!(matches!(
        session.set_attribute(VI_ATTR_ASRL_BAUD, 9600u32),
        Err(Error::NotApplicable { .. })
    ));
    assert!(mock.calls().is_empty());
    Ok(())
}

#[rstest]
fn read_only_attributes_are_refused(mock: MockVisa) -> Result<()> {
    let rm = mock.rm()?;
    let session = rm.open_bare_resource("TCPIP::10.0.0.5::INSTR")?;
    mock.clear_calls();
    assert!(matches!(
        session.set_attribute(VI_ATTR_RSRC_NAME, "TCPIP0::other::INSTR"),
        Err(Error::ReadOnly { .. })
    ));
    assert!(mock.calls().is_empty());
    Ok(())
}

#[rstest]
fn unsupported_attribute_is_a_visa_error(mock: MockVisa) -> Result<()> {
    let rm = mock.rm()?;
    let instr: TcpipInstrument = rm.open_as("TCPIP::10.0.0.5::INSTR")?;
    let err = instr.resource_manufacturer_name().unwrap_err();
    assert_eq!(
        err.code(),
        Some(visa_bind::enums::status::ErrorCode::ErrorNsupAttr)
    );
    mock.set_str(instr.vi(), VI_ATTR_RSRC_MANF_NAME, "Acme Instruments");
    assert_eq!(instr.resource_manufacturer_name()?, "Acme Instruments");
    Ok(())
}

#[rstest]
#[case(2500.0, 2500)]
#[case(0.4, 0)]
#[case(f64::INFINITY, 0xFFFF_FFFF)]
fn timeouts(mock: MockVisa, #[case] timeout: f64, #[case] wire: u64) -> Result<()> {
    let rm = mock.rm()?;
    let instr: TcpipInstrument = rm.open_as("TCPIP::10.0.0.5::INSTR")?;
    instr.set_timeout(timeout)?;
    assert_eq!(mock.attr(instr.vi(), VI_ATTR_TMO_VALUE), Some(wire));
    assert_eq!(instr.timeout()?, timeout.round());
    Ok(())
}

#[rstest]
fn wrong_value_kind_is_a_mismatch(mock: MockVisa) -> Result<()> {
    let rm = mock.rm()?;
    let session = rm.open_bare_resource("ASRL1::INSTR")?;
    assert!(matches!(
        session.set_attribute(VI_ATTR_ASRL_BAUD, AttrValue::from("fast")),
        Err(Error::TypeMismatch { .. })
    ));
    Ok(())
}
