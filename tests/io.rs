mod common;

use std::{
    io::{BufRead, BufReader, Read, Write},
    time::Duration,
};

use anyhow::Result;
use common::{mock, Call, MockVisa};
use rstest::rstest;
use visa_bind::{
    attributes::{
        VI_ATTR_ASRL_END_IN, VI_ATTR_JOB_ID, VI_ATTR_RET_COUNT, VI_ATTR_SEND_END_EN,
        VI_ATTR_STATUS, VI_ATTR_TERMCHAR, VI_ATTR_TERMCHAR_EN,
    },
    enums::{
        attribute::SerialTermination,
        event::{EventType, Mechanism},
        status::{CompletionCode, ErrorCode},
    },
    resources::*,
    Error,
};

fn reads(mock: &MockVisa) -> Vec<usize> {
    mock.calls()
        .into_iter()
        .filter_map(|c| match c {
            Call::Read(_, len) => Some(len),
            _ => None,
        })
        .collect()
}

#[rstest]
fn list_instr(mock: MockVisa) -> Result<()> {
    for name in [
        "GPIB0::12::INSTR",
        "ASRL1::INSTR",
        "TCPIP0::10.0.0.5::5025::SOCKET",
        "USB0::0x0957::0x1796::MY1234::INSTR",
    ] {
        mock.add_resource(name);
    }
    let rm = mock.rm()?;
    assert_eq!(
        rm.list_resources("?*INSTR")?,
        [
            "GPIB0::12::INSTR",
            "ASRL1::INSTR",
            "USB0::0x0957::0x1796::MY1234::INSTR"
        ]
    );
    // the find list is released
    let list = mock.calls().into_iter().find_map(|c| match c {
        Call::FindNext(list) => Some(list),
        _ => None,
    });
    let list = list.expect("more than one resource was listed");
    assert!(mock.calls().contains(&Call::Close(list)));
    Ok(())
}

#[rstest]
fn nothing_found_is_empty(mock: MockVisa) -> Result<()> {
    mock.add_resource("ASRL1::INSTR");
    let rm = mock.rm()?;
    assert!(rm.list_resources("PXI?*")?.is_empty());
    Ok(())
}

#[rstest]
fn send_idn(mock: MockVisa) -> Result<()> {
    let rm = mock.rm()?;
    let mut instr = rm.open_resource("TCPIP::10.0.0.5::INSTR")?;
    let vi = instr.session().vi();
    mock.respond(b"ACME,DSO1000,0,1.0\n");
    let instr = instr
        .as_message_based()
        .expect("TCPIP INSTR is message based");
    instr.write_all(b"*IDN?\n")?;
    let mut reader = BufReader::new(instr);
    let mut buf = String::new();
    reader.read_line(&mut buf)?;
    assert_eq!(buf, "ACME,DSO1000,0,1.0\n");
    assert!(mock.calls().contains(&Call::Write(vi, b"*IDN?\n".to_vec())));
    Ok(())
}

#[rstest]
fn query_strips_read_termination(mock: MockVisa) -> Result<()> {
    let rm = mock.rm()?;
    let mut instr: TcpipInstrument = rm.open_as("TCPIP::10.0.0.5::INSTR")?;
    instr.set_read_termination(Some("\n"))?;
    instr.set_write_termination("\n");
    assert_eq!(mock.attr(instr.vi(), VI_ATTR_TERMCHAR), Some(b'\n' as u64));
    assert_eq!(mock.attr(instr.vi(), VI_ATTR_TERMCHAR_EN), Some(1));

    mock.respond(b"ACME,DSO1000,0,1.0\n+1.5E-3\n");
    assert_eq!(instr.query("*IDN?", None)?, "ACME,DSO1000,0,1.0");
    assert_eq!(instr.query("MEAS:VOLT?", None)?, "+1.5E-3");
    assert!(mock
        .calls()
        .contains(&Call::Write(instr.vi(), b"*IDN?\n".to_vec())));
    Ok(())
}

#[rstest]
fn missing_termination_is_tolerated(mock: MockVisa) -> Result<()> {
    let rm = mock.rm()?;
    let mut instr: TcpipInstrument = rm.open_as("TCPIP::10.0.0.5::INSTR")?;
    instr.set_read_termination(Some("\n"))?;
    mock.respond(b"no newline");
    assert_eq!(instr.read()?, "no newline");
    Ok(())
}

#[rstest]
fn reads_are_chunked(mock: MockVisa) -> Result<()> {
    let rm = mock.rm()?;
    let mut instr: TcpipInstrument = rm.open_as("TCPIP::10.0.0.5::INSTR")?;
    instr.set_chunk_size(4)?;
    mock.respond(b"0123456789");
    assert_eq!(&instr.read_raw(None)?[..], b"0123456789");
    assert_eq!(reads(&mock), [4, 4, 4]);
    assert_eq!(
        instr.last_status(),
        Some(CompletionCode::Success.into())
    );
    assert!(instr.set_chunk_size(0).is_err());
    Ok(())
}

#[rstest]
fn read_bytes_counts_exactly(mock: MockVisa) -> Result<()> {
    let rm = mock.rm()?;
    let mut instr: TcpipInstrument = rm.open_as("TCPIP::10.0.0.5::INSTR")?;
    instr.set_chunk_size(3)?;
    mock.respond(b"#15abcdeXYZ");
    assert_eq!(&instr.read_bytes(2, false)?[..], b"#1");
    assert_eq!(&instr.read_bytes(6, false)?[..], b"5abcde");
    assert_eq!(reads(&mock), [2, 3, 3]);
    Ok(())
}

#[rstest]
fn writes_continue_after_partial_transfers(mock: MockVisa) -> Result<()> {
    let rm = mock.rm()?;
    let instr: TcpipSocket = rm.open_as("TCPIP0::10.0.0.5::5025::SOCKET")?;
    mock.set_write_chunk(4);
    assert_eq!(instr.write("SYST:ERR?")?, 11);
    let written: Vec<u8> = mock
        .calls()
        .into_iter()
        .filter_map(|c| match c {
            Call::Write(_, data) => Some(data),
            _ => None,
        })
        .flatten()
        .collect();
    assert_eq!(written, b"SYST:ERR?\r\n");
    Ok(())
}

#[rstest]
fn timeouts_surface_as_io_errors(mock: MockVisa) -> Result<()> {
    let rm = mock.rm()?;
    let mut instr = rm.open_resource("TCPIP::10.0.0.5::INSTR")?;
    let instr = instr.as_message_based().expect("message based");
    let mut buf = [0u8; 8];
    let err = instr.read(&mut buf).unwrap_err();
    assert_eq!(err.kind(), std::io::ErrorKind::TimedOut);
    Ok(())
}

#[rstest]
fn termination_spec_configures_the_session(mock: MockVisa) -> Result<()> {
    let rm = mock.rm()?;
    let mut instr: GpibInstrument = rm.open_as("GPIB0::12::INSTR")?;
    let spec = instr.set_termination(r"\r NOEND DELAY 0.5")?;
    assert_eq!(spec.terminator.as_deref(), Some("\r"));
    assert_eq!(instr.read_termination(), Some("\r"));
    assert_eq!(instr.write_termination(), "\r");
    assert_eq!(instr.write_delay(), Duration::from_millis(500));
    assert_eq!(mock.attr(instr.vi(), VI_ATTR_SEND_END_EN), Some(0));
    assert_eq!(mock.attr(instr.vi(), VI_ATTR_TERMCHAR), Some(b'\r' as u64));
    assert!(instr.set_termination("DELAY soon").is_err());
    Ok(())
}

#[rstest]
fn ambiguous_read_termination_is_refused(mock: MockVisa) -> Result<()> {
    let rm = mock.rm()?;
    let mut instr: TcpipInstrument = rm.open_as("TCPIP::10.0.0.5::INSTR")?;
    assert!(matches!(
        instr.set_read_termination(Some("\n\n")),
        Err(Error::InvalidArgument(_))
    ));
    assert_eq!(instr.read_termination(), None);
    instr.set_read_termination(Some("\r\n"))?;
    instr.set_read_termination(None)?;
    assert_eq!(mock.attr(instr.vi(), VI_ATTR_TERMCHAR_EN), Some(0));
    Ok(())
}

#[rstest]
fn non_ascii_read_termination_is_refused(mock: MockVisa) -> Result<()> {
    let rm = mock.rm()?;
    let mut instr: TcpipInstrument = rm.open_as("TCPIP::10.0.0.5::INSTR")?;
    mock.clear_calls();
    assert!(matches!(
        instr.set_read_termination(Some("\u{e9}")),
        Err(Error::InvalidArgument(_))
    ));
    assert!(mock.calls().is_empty());
    assert!(instr.set_termination(r"\xE9 END").is_err());
    Ok(())
}

#[rstest]
fn serial_read_termination_sets_end_input(mock: MockVisa) -> Result<()> {
    let rm = mock.rm()?;
    let mut serial: SerialInstrument = rm.open_as("ASRL1::INSTR")?;
    serial.set_read_termination(Some("\r\n"))?;
    assert_eq!(serial.end_input()?, SerialTermination::Termchar);
    serial.set_read_termination(None)?;
    assert_eq!(
        mock.attr(serial.vi(), VI_ATTR_ASRL_END_IN),
        Some(u16::from(SerialTermination::None) as u64)
    );
    Ok(())
}

#[rstest]
fn async_read_completes(mock: MockVisa) -> Result<()> {
    let rm = mock.rm()?;
    let session = rm.open_bare_resource("TCPIP::10.0.0.5::INSTR")?;
    session.enable_event(EventType::IoCompletion, Mechanism::Queue)?;
    // a stale completion of someone else's job is skipped
    mock.push_event(
        EventType::IoCompletion,
        &[(VI_ATTR_JOB_ID, 999), (VI_ATTR_RET_COUNT, 0), (VI_ATTR_STATUS, 0)],
    );
    mock.respond(b"waveform");
    let job = session.read_async(64)?;
    assert_eq!(&job.finish(Duration::from_secs(1))?[..], b"waveform");
    // both event contexts are closed
    let closed = mock
        .calls()
        .into_iter()
        .filter(|c| matches!(c, Call::Close(_)))
        .count();
    assert_eq!(closed, 2);
    Ok(())
}

#[rstest]
fn failed_job_stays_failed(mock: MockVisa) -> Result<()> {
    let rm = mock.rm()?;
    let session = rm.open_bare_resource("TCPIP::10.0.0.5::INSTR")?;
    session.enable_event(EventType::IoCompletion, Mechanism::Queue)?;
    // nothing to read, the transfer completes with a timeout status
    let mut job = session.read_async(8)?;
    let id = job.id().into_inner();
    for _ in 0..2 {
        assert!(matches!(
            job.wait(Duration::from_secs(1)),
            Err(Error::Visa(ErrorCode::ErrorTmo))
        ));
    }
    assert!(job.is_done());
    drop(job);
    assert!(!mock.calls().contains(&Call::Terminate(session.vi(), id)));
    Ok(())
}

#[rstest]
fn stale_completions_do_not_extend_the_wait(mock: MockVisa) -> Result<()> {
    let rm = mock.rm()?;
    let session = rm.open_bare_resource("TCPIP::10.0.0.5::INSTR")?;
    session.enable_event(EventType::IoCompletion, Mechanism::Queue)?;
    for job in 900..903 {
        mock.push_event(
            EventType::IoCompletion,
            &[(VI_ATTR_JOB_ID, job), (VI_ATTR_RET_COUNT, 0), (VI_ATTR_STATUS, 0)],
        );
    }
    mock.set_event_latency(Duration::from_millis(30));
    mock.respond(b"late");
    let mut job = session.read_async(8)?;
    assert!(matches!(
        job.wait(Duration::from_millis(50)),
        Err(Error::Visa(ErrorCode::ErrorTmo))
    ));
    assert!(!job.is_done());
    let timeouts = mock.wait_timeouts();
    assert_eq!(timeouts[0], 50);
    assert!(timeouts.len() <= 2);
    assert!(timeouts[1..].iter().all(|&t| t < 50));
    Ok(())
}

#[rstest]
fn dropped_job_is_terminated(mock: MockVisa) -> Result<()> {
    let rm = mock.rm()?;
    let session = rm.open_bare_resource("TCPIP::10.0.0.5::INSTR")?;
    mock.respond(b"late");
    let job = session.read_async(16)?;
    let id = job.id().into_inner();
    drop(job);
    assert!(mock.calls().contains(&Call::Terminate(session.vi(), id)));
    Ok(())
}

#[rstest]
fn waiting_without_events_times_out(mock: MockVisa) -> Result<()> {
    let rm = mock.rm()?;
    let session = rm.open_bare_resource("TCPIP::10.0.0.5::INSTR")?;
    let resp = session.wait_on_event(EventType::ServiceReq, Duration::from_millis(10))?;
    assert!(resp.timed_out);
    assert!(resp.event.is_none());

    mock.push_event(EventType::ServiceReq, &[]);
    let resp = session.wait_on_event(EventType::AllEnabledEvents, Duration::ZERO)?;
    assert_eq!(resp.kind(), Some(EventType::ServiceReq));
    Ok(())
}

#[rstest]
fn sessions_close_once(mock: MockVisa) -> Result<()> {
    let rm = mock.rm()?;
    let rm_vi = rm.session();
    let session = rm.open_bare_resource("ASRL1::INSTR")?;
    let vi = session.vi();
    session.close()?;
    rm.close()?;
    let calls = mock.calls();
    assert_eq!(calls.iter().filter(|c| **c == Call::Close(vi)).count(), 1);
    assert_eq!(calls.iter().filter(|c| **c == Call::Close(rm_vi)).count(), 1);
    Ok(())
}
