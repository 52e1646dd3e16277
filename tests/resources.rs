mod common;

use std::time::Duration;

use anyhow::Result;
use common::{mock, Call, MockVisa};
use rstest::rstest;
use visa_bind::{
    attributes::{
        VI_ATTR_GPIB_CIC_STATE, VI_ATTR_GPIB_PRIMARY_ADDR, VI_ATTR_GPIB_SECONDARY_ADDR,
    },
    enums::{
        attribute::AddressSpace,
        event::EventType,
        interface::{InterfaceType, ResourceClass},
        status::ErrorCode,
    },
    library::MemWidth,
    registry::{ClassRegistry, ResourceType},
    resources::*,
    sys::VI_NO_SEC_ADDR,
    Error,
};

#[rstest]
#[case("GPIB0::12::INSTR", "GpibInstrument")]
#[case("GPIB::INTFC", "GpibInterface")]
#[case("ASRL3::INSTR", "SerialInstrument")]
#[case("TCPIP::192.168.0.7::INSTR", "TcpipInstrument")]
#[case("TCPIP0::192.168.0.7::5025::SOCKET", "TcpipSocket")]
#[case("USB0::0x1234::0x5678::SN01::INSTR", "UsbInstrument")]
#[case("USB0::0x1234::0x5678::SN01::RAW", "UsbRaw")]
#[case("VXI0::4::INSTR", "VxiInstrument")]
#[case("GPIB-VXI0::4::INSTR", "VxiInstrument")]
#[case("VXI::MEMACC", "VxiMemacc")]
#[case("VXI0::0::BACKPLANE", "VxiBackplane")]
#[case("PXI0::3-18.2::INSTR", "PxiInstrument")]
#[case("PXI0::MEMACC", "PxiMemacc")]
#[case("PXI0::1::BACKPLANE", "PxiBackplane")]
#[case("VXI0::SERVANT", "Resource")]
fn open_resource_dispatches(
    mock: MockVisa,
    #[case] name: &str,
    #[case] expected: &str,
) -> Result<()> {
    let rm = mock.rm()?;
    let resource = rm.open_resource(name)?;
    assert_eq!(resource.type_name(), expected);
    Ok(())
}

#[rstest]
fn opened_resources_downcast(mock: MockVisa) -> Result<()> {
    let rm = mock.rm()?;
    let mut resource = rm.open_resource("ASRL3::INSTR")?;
    assert!(resource.as_message_based().is_some());
    assert!(resource.downcast_ref::<GpibInstrument>().is_none());
    let serial = resource
        .downcast::<SerialInstrument>()
        .map_err(|_| anyhow::anyhow!("ASRL3::INSTR is not a serial instrument"))?;
    serial.set_baud_rate(115_200)?;
    assert_eq!(serial.baud_rate()?, 115_200);

    let mut backplane = rm.open_resource("PXI0::1::BACKPLANE")?;
    assert!(backplane.as_message_based().is_none());
    backplane.close()?;
    Ok(())
}

#[rstest]
fn open_as_checks_properties(mock: MockVisa) -> Result<()> {
    let rm = mock.rm()?;
    let opened = rm.open_as::<Resource>("GPIB0::12::INSTR");
    assert!(matches!(
        opened,
        Err(Error::MissingProperty {
            wrapper: "Resource",
            interface: InterfaceType::Gpib,
            class: ResourceClass::Instr,
            ..
        })
    ));
    // GPIB-VXI devices share the VXI wrapper, extra properties are allowed
    rm.open_as::<VxiInstrument>("GPIB-VXI0::4::INSTR")?;
    Ok(())
}

#[rstest]
fn custom_registry(mock: MockVisa) -> Result<()> {
    let rm = mock.rm()?;
    let registry = ClassRegistry::new();
    registry.register(
        InterfaceType::Tcpip,
        ResourceClass::Instr,
        ResourceType::of::<TcpipInstrument>(),
    )?;
    assert!(registry
        .register(
            InterfaceType::Tcpip,
            ResourceClass::Socket,
            ResourceType::of::<TcpipInstrument>(),
        )
        .is_err());
    let instr = rm.open_resource_in("TCPIP::10.0.0.1::INSTR", &registry)?;
    assert_eq!(instr.type_name(), "TcpipInstrument");
    let fallback = rm.open_resource_in("ASRL1::INSTR", &registry)?;
    assert_eq!(fallback.type_name(), "Resource");
    Ok(())
}

fn gpib_bus(
    mock: &MockVisa,
    rm: &visa_bind::ResourceManager,
) -> Result<(GpibInterface, GpibInstrument, GpibInstrument)> {
    let board: GpibInterface = rm.open_as("GPIB0::INTFC")?;
    let dmm: GpibInstrument = rm.open_as("GPIB0::5::INSTR")?;
    let scope: GpibInstrument = rm.open_as("GPIB0::7::2::INSTR")?;
    mock.set_attr(dmm.vi(), VI_ATTR_GPIB_PRIMARY_ADDR, 5);
    mock.set_attr(dmm.vi(), VI_ATTR_GPIB_SECONDARY_ADDR, VI_NO_SEC_ADDR.into());
    mock.set_attr(scope.vi(), VI_ATTR_GPIB_PRIMARY_ADDR, 7);
    mock.set_attr(scope.vi(), VI_ATTR_GPIB_SECONDARY_ADDR, 2);
    Ok((board, dmm, scope))
}

#[rstest]
#[case(true)]
#[case(false)]
fn group_execute_trigger(mock: MockVisa, #[case] in_charge: bool) -> Result<()> {
    let rm = mock.rm()?;
    let (board, dmm, scope) = gpib_bus(&mock, &rm)?;
    mock.set_attr(board.vi(), VI_ATTR_GPIB_CIC_STATE, in_charge.into());
    mock.clear_calls();

    assert_eq!(board.group_execute_trigger(&[&dmm, &scope])?, 6);
    let bus: Vec<Call> = mock
        .calls()
        .into_iter()
        .filter(|c| matches!(c, Call::SendIfc(_) | Call::GpibCommand(..)))
        .collect();
    let command = Call::GpibCommand(board.vi(), vec![0x40, 0x3F, 0x25, 0x27, 0x62, 0x08]);
    if in_charge {
        assert_eq!(bus, [command]);
    } else {
        assert_eq!(bus, [Call::SendIfc(board.vi()), command]);
    }
    Ok(())
}

#[rstest]
fn group_trigger_stays_on_one_board(mock: MockVisa) -> Result<()> {
    let rm = mock.rm()?;
    let (board, dmm, _) = gpib_bus(&mock, &rm)?;
    let other: GpibInstrument = rm.open_as("GPIB1::3::INSTR")?;
    mock.clear_calls();
    assert!(matches!(
        board.group_execute_trigger(&[&dmm, &other]),
        Err(Error::InvalidArgument(_))
    ));
    assert!(!mock
        .calls()
        .iter()
        .any(|c| matches!(c, Call::GpibCommand(..))));
    Ok(())
}

#[rstest]
fn wait_for_srq(mock: MockVisa) -> Result<()> {
    let rm = mock.rm()?;
    let instr: GpibInstrument = rm.open_as("GPIB0::12::INSTR")?;
    let service_req = u32::from(EventType::ServiceReq);

    assert!(matches!(
        instr.wait_for_srq(Duration::from_millis(10)),
        Err(Error::Visa(ErrorCode::ErrorTmo))
    ));

    // a request while the RQS bit is clear came from another device
    mock.push_event(EventType::ServiceReq, &[]);
    mock.set_stb(0x00);
    assert!(instr.wait_for_srq(Duration::from_millis(10)).is_err());

    mock.push_event(EventType::ServiceReq, &[]);
    mock.set_stb(0x50);
    mock.clear_calls();
    instr.wait_for_srq(Duration::from_secs(1))?;

    let calls = mock.calls();
    assert!(calls.contains(&Call::ReadStb(instr.vi())));
    assert!(calls.contains(&Call::EnableEvent(instr.vi(), service_req)));
    assert_eq!(
        calls.last(),
        Some(&Call::DiscardEvents(instr.vi(), service_req))
    );
    Ok(())
}

#[rstest]
fn register_access(mock: MockVisa) -> Result<()> {
    let rm = mock.rm()?;
    let memacc: VxiMemacc = rm.open_as("VXI0::MEMACC")?;
    memacc.write_memory(AddressSpace::A16Space, 0xC000, MemWidth::W16, 0xBEEF)?;
    assert_eq!(
        memacc.read_memory(AddressSpace::A16Space, 0xC000, MemWidth::W16)?,
        0xBEEF
    );
    mock.clear_calls();
    assert!(matches!(
        memacc.write_memory(AddressSpace::A16Space, 0xC000, MemWidth::W8, 0x100),
        Err(Error::OutOfRange { max: 0xFF, .. })
    ));
    assert!(mock.calls().is_empty());
    Ok(())
}

#[rstest]
fn unsupported_operations_report_the_status(mock: MockVisa) -> Result<()> {
    let rm = mock.rm()?;
    let raw: UsbRaw = rm.open_as("USB0::0x1234::0x5678::SN01::RAW")?;
    let err = raw.control_in(0xC0, 0x01, 0, 0, 8).unwrap_err();
    assert_eq!(err.code(), Some(ErrorCode::ErrorNsupOper));
    assert!(raw.control_out(0x40, 0x01, 0, 0, &[0; 70_000]).is_err());
    Ok(())
}
