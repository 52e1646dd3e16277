mod common;

use std::{io::Read, sync::Mutex};

use anyhow::Result;
use common::MockVisa;
use log::{Level, Log, Metadata, Record};
use visa_bind::enums::status::CompletionCode;

static WARNINGS: Mutex<Vec<String>> = Mutex::new(Vec::new());

struct Capture;

impl Log for Capture {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= Level::Warn
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            WARNINGS.lock().unwrap().push(record.args().to_string());
        }
    }

    fn flush(&self) {}
}

static LOGGER: Capture = Capture;

fn warnings() -> Vec<String> {
    WARNINGS.lock().unwrap().clone()
}

// the only test of this binary, it owns the global logger
#[test]
fn partial_byte_reads_stay_quiet() -> Result<()> {
    log::set_logger(&LOGGER).expect("no other logger in this binary");
    log::set_max_level(log::LevelFilter::Warn);

    let mock = MockVisa::default();
    let rm = mock.rm()?;
    let mut instr = rm.open_resource("TCPIP::10.0.0.5::INSTR")?;
    mock.respond(b"0123456789");
    WARNINGS.lock().unwrap().clear();
    let vi = instr.session().vi();
    let io = instr.as_message_based().expect("message based");
    let mut buf = [0u8; 4];
    assert_eq!(io.read(&mut buf)?, 4);
    assert_eq!(&buf, b"0123");
    assert_eq!(
        instr.session().last_status(),
        Some(CompletionCode::SuccessMaxCnt.into())
    );
    assert!(warnings().is_empty(), "{:?}", warnings());

    // outside a read the same status is still reported
    instr
        .session()
        .library()
        .check(vi, CompletionCode::SuccessMaxCnt.into())?;
    assert_eq!(warnings().len(), 1);
    Ok(())
}
