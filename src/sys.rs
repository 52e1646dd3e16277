//! Raw VISA types and constants, as declared in `visa.h` (VPP-4.3.2).
//!
//! Only what the crate needs at the native boundary lives here; attribute
//! ids are declared next to their descriptors in [`crate::attributes`].

#![allow(non_camel_case_types)]

use std::os::raw::{c_char, c_void};

pub type ViStatus = i32;
pub type ViObject = u32;
pub type ViSession = ViObject;
pub type ViFindList = ViObject;
pub type ViEvent = ViObject;
pub type ViEventType = u32;
pub type ViEventFilter = u32;
pub type ViAttr = u32;
pub type ViAccessMode = u32;
pub type ViJobId = u32;
pub type ViBoolean = u16;
pub type ViUInt8 = u8;
pub type ViInt8 = i8;
pub type ViUInt16 = u16;
pub type ViInt16 = i16;
pub type ViUInt32 = u32;
pub type ViInt32 = i32;
pub type ViUInt64 = u64;
pub type ViInt64 = i64;
pub type ViChar = c_char;
pub type ViAddr = *mut c_void;

#[cfg(target_pointer_width = "64")]
pub type ViAttrState = u64;
#[cfg(not(target_pointer_width = "64"))]
pub type ViAttrState = u32;

#[cfg(target_pointer_width = "64")]
pub type ViBusAddress = u64;
#[cfg(not(target_pointer_width = "64"))]
pub type ViBusAddress = u32;

pub const VI_NULL: u32 = 0;
pub const VI_TRUE: ViBoolean = 1;
pub const VI_FALSE: ViBoolean = 0;
pub const VI_SUCCESS: ViStatus = 0;

pub const VI_FIND_BUFLEN: usize = 256;

pub const VI_TMO_IMMEDIATE: u32 = 0;
pub const VI_TMO_INFINITE: u32 = 0xFFFF_FFFF;

pub const VI_NO_LOCK: ViAccessMode = 0;
pub const VI_EXCLUSIVE_LOCK: ViAccessMode = 1;
pub const VI_SHARED_LOCK: ViAccessMode = 2;
pub const VI_LOAD_CONFIG: ViAccessMode = 4;

pub const VI_NO_SEC_ADDR: u16 = 0xFFFF;

pub const VI_READ_BUF: u16 = 1;
pub const VI_WRITE_BUF: u16 = 2;
pub const VI_READ_BUF_DISCARD: u16 = 4;
pub const VI_WRITE_BUF_DISCARD: u16 = 8;
pub const VI_IO_IN_BUF: u16 = 16;
pub const VI_IO_OUT_BUF: u16 = 32;
pub const VI_IO_IN_BUF_DISCARD: u16 = 64;
pub const VI_IO_OUT_BUF_DISCARD: u16 = 128;

pub const VI_ASRL_FLOW_NONE: u16 = 0;
pub const VI_ASRL_FLOW_XON_XOFF: u16 = 1;
pub const VI_ASRL_FLOW_RTS_CTS: u16 = 2;
pub const VI_ASRL_FLOW_DTR_DSR: u16 = 4;

/// Fixed-size string buffer used by `viFindRsrc`, `viParseRsrcEx` and friends.
pub type VisaBuf = [u8; VI_FIND_BUFLEN];

pub const fn new_visa_buf() -> VisaBuf {
    [0; VI_FIND_BUFLEN]
}

/// Reads a NUL terminated string out of a VISA buffer.
pub fn buf_to_string(buf: &[u8]) -> String {
    let end = buf.iter().position(|b| *b == 0).unwrap_or(buf.len());
    String::from_utf8_lossy(&buf[..end]).into_owned()
}
