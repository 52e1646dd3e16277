//!
//! Typed bindings over a VISA (Virtual Instrument Software Architecture) library
//! loaded at runtime.
//!
//! Most documentation comes from [NI-VISA Product Documentation](https://www.ni.com/docs/en-US/bundle/ni-visa-20.0/page/ni-visa/help_file_title.html)
//!
//! # Requirements
//! An installed VISA implementation, for example [NI-VISA](https://www.ni.com/en-us/support/downloads/drivers/download.ni-visa.html)
//! or Keysight IO Libraries. The library is found at runtime, see [`config`]
//! for the lookup order. Nothing is linked at build time.
//!
//! # Layout
//! * [`attributes`] describes every VISA attribute: where it applies, how it is
//!   passed through the C ABI and which values it accepts.
//! * [`registry`] maps `(interface type, resource class)` pairs to the
//!   wrapper types of [`resources`], checking that each wrapper exposes every
//!   property its pair requires.
//! * [`rm::ResourceManager`] finds, parses and opens resources.
//!
//! # Example
//! ```no_run
//! # fn main() -> visa_bind::Result<()>{
//!     use std::io::{BufRead, BufReader};
//!     use visa_bind::{resources::MessageBased, rm::ResourceManager};
//!     let rm = ResourceManager::new()?; //open default resource manager
//!     let rsc = rm.list_resources("?*KEYSIGH?*INSTR")?; //resources matching the expression
//!     let mut instr = rm.open_resource(&rsc[0])?; //open a session, typed after its resource class
//!     let instr = instr.as_message_based().expect("instruments are message based");
//!     println!("{}", instr.query("*IDN?", None)?); //write message and read response
//!     instr.write("*IDN?")?;
//!     let mut reader = BufReader::new(instr);
//!     let mut buf = String::new();
//!     reader.read_line(&mut buf)?; //std::io adapters work on message based sessions
//!     Ok(())
//! # }
//! ```

use enums::status::ErrorCode;
use std::time::Duration;

pub mod attributes;
pub mod config;
pub mod enums;
pub mod event;
pub mod flags;
pub mod library;
pub mod native;
pub mod registry;
pub mod resources;
pub mod rm;
pub mod rname;
pub mod session;
pub mod sys;
pub mod termination;

mod async_io;

pub use async_io::{AsyncJob, JobId};
pub use attributes::AttrValue;
pub use library::{RawVisa, VisaLibrary};
pub use rm::{ResourceInfo, ResourceManager};
pub use session::Session;

use sys as vs;

pub const TIMEOUT_IMMEDIATE: Duration = Duration::from_millis(vs::VI_TMO_IMMEDIATE as _);
pub const TIMEOUT_INFINITE: Duration = Duration::MAX;

/// Converts a timeout to the milliseconds VISA expects, saturating to
/// `VI_TMO_INFINITE`.
pub fn timeout_ms(timeout: Duration) -> u32 {
    match u32::try_from(timeout.as_millis()) {
        Ok(ms) if ms < vs::VI_TMO_INFINITE => ms,
        _ => vs::VI_TMO_INFINITE,
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Error status returned by the native library.
    #[error("{0}")]
    Visa(ErrorCode),
    #[error("unknown VISA status {0:#010X}")]
    UnknownStatus(vs::ViStatus),
    #[error("unknown attribute {0:#010X}")]
    UnknownAttribute(attributes::AttrId),
    #[error("attribute {name} ({id:#010X}) registered twice with different descriptions")]
    DuplicateAttribute {
        name: &'static str,
        id: attributes::AttrId,
    },
    #[error("invalid descriptor for {name}: {reason}")]
    InvalidDescriptor {
        name: &'static str,
        reason: &'static str,
    },
    #[error("{name} does not apply to {target}")]
    NotApplicable { name: &'static str, target: String },
    #[error("{name} is read only")]
    ReadOnly { name: &'static str },
    #[error("{value} is out of range for {name}, expected {min}..={max}")]
    OutOfRange {
        name: &'static str,
        value: i128,
        min: i128,
        max: i128,
    },
    #[error("{value} is not a {domain} value for {name}")]
    NotInDomain {
        name: &'static str,
        domain: &'static str,
        value: i128,
    },
    #[error("{name} expects {expected}, found {found}")]
    TypeMismatch {
        name: &'static str,
        expected: &'static str,
        found: String,
    },
    #[error("{wrapper} is registered for {interface} {class} but does not define `{property}`")]
    MissingProperty {
        wrapper: &'static str,
        property: &'static str,
        interface: enums::interface::InterfaceType,
        class: enums::interface::ResourceClass,
    },
    #[error("invalid resource name `{name}`: {reason}")]
    InvalidResourceName { name: String, reason: String },
    #[error("invalid termination `{spec}`: {reason}")]
    InvalidTermination { spec: String, reason: String },
    #[error("{0}")]
    InvalidArgument(String),
    #[error("no usable VISA library, tried {0}")]
    LibraryNotFound(String),
    #[error("VISA library does not export {0}")]
    MissingSymbol(&'static str),
    #[error(transparent)]
    Load(#[from] libloading::Error),
    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<ErrorCode> for Error {
    fn from(code: ErrorCode) -> Self {
        Self::Visa(code)
    }
}

impl Error {
    /// Native status code, if the error came from the library.
    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            Self::Visa(code) => Some(*code),
            _ => None,
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

pub(crate) fn map_to_io_err(err: Error) -> std::io::Error {
    use std::io::ErrorKind::*;
    use ErrorCode::*;
    let code = match err {
        Error::Visa(code) => code,
        Error::Io(e) => return e,
        _ => return std::io::Error::new(InvalidInput, err),
    };
    std::io::Error::new(
        match code {
            ErrorInvObject => AddrNotAvailable,
            ErrorNsupOper => Unsupported,
            ErrorRsrcLocked => ConnectionRefused,
            ErrorTmo => TimedOut,
            ErrorRawWrProtViol | ErrorRawRdProtViol => InvalidData,
            ErrorInpProtViol | ErrorOutpProtViol => BrokenPipe,
            ErrorBerr => BrokenPipe,
            ErrorInvSetup => InvalidInput,
            ErrorNcic => PermissionDenied,
            ErrorConnLost => BrokenPipe,
            ErrorInvMask => InvalidInput,
            ErrorAbort => Interrupted,
            ErrorIo => return std::io::Error::last_os_error(),
            _ => Other,
        },
        err,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeouts_saturate() {
        assert_eq!(timeout_ms(TIMEOUT_IMMEDIATE), 0);
        assert_eq!(timeout_ms(Duration::from_millis(2500)), 2500);
        assert_eq!(timeout_ms(TIMEOUT_INFINITE), vs::VI_TMO_INFINITE);
        assert_eq!(
            timeout_ms(Duration::from_millis(u32::MAX as u64)),
            vs::VI_TMO_INFINITE
        );
    }

    #[test]
    fn io_errors_keep_their_kind() {
        let e = map_to_io_err(Error::Visa(ErrorCode::ErrorTmo));
        assert_eq!(e.kind(), std::io::ErrorKind::TimedOut);
        let e = map_to_io_err(Error::Visa(ErrorCode::ErrorRsrcNfound));
        assert_eq!(e.kind(), std::io::ErrorKind::Other);
        let e = map_to_io_err(Error::ReadOnly { name: "VI_ATTR_RSRC_NAME" });
        assert_eq!(e.kind(), std::io::ErrorKind::InvalidInput);
    }
}
