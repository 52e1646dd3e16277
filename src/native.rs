//! [`RawVisa`] over a VISA shared library loaded at runtime.

use crate::{
    config::LibraryConfig,
    library::{MemWidth, RawVisa, NSUP_OPER},
    sys::{self as vs, VisaBuf},
    Error, Result,
};
use libloading::Library;
use std::{
    ffi::CStr,
    os::raw::{c_char, c_void},
    path::{Path, PathBuf},
    ptr,
};

macro_rules! visa_symbols {
    ($($field:ident: $sym:literal fn($($arg:ty),* $(,)?);)*) => {
        struct Symbols {
            $($field: Option<unsafe extern "system" fn($($arg),*) -> vs::ViStatus>,)*
        }

        impl Symbols {
            /// # Safety
            /// `lib` must be a VISA library, so that the symbols have the
            /// declared signatures, and must outlive the returned pointers.
            unsafe fn load(lib: &Library) -> Self {
                Self {
                    $(
                        $field: lib
                            .get::<unsafe extern "system" fn($($arg),*) -> vs::ViStatus>(
                                concat!($sym, "\0").as_bytes(),
                            )
                            .ok()
                            .map(|s| *s),
                    )*
                }
            }

            fn missing(&self) -> impl Iterator<Item = &'static str> + '_ {
                [$((self.$field.is_none(), $sym)),*]
                    .into_iter()
                    .filter(|(missing, _)| *missing)
                    .map(|(_, name)| name)
            }
        }
    };
}

visa_symbols! {
    open_default_rm: "viOpenDefaultRM" fn(*mut vs::ViSession);
    open: "viOpen" fn(vs::ViSession, *const c_char, vs::ViAccessMode, u32, *mut vs::ViSession);
    close: "viClose" fn(vs::ViObject);
    get_attribute: "viGetAttribute" fn(vs::ViObject, vs::ViAttr, *mut c_void);
    set_attribute: "viSetAttribute" fn(vs::ViObject, vs::ViAttr, vs::ViAttrState);
    read: "viRead" fn(vs::ViSession, *mut u8, u32, *mut u32);
    write: "viWrite" fn(vs::ViSession, *const u8, u32, *mut u32);
    find_rsrc: "viFindRsrc" fn(vs::ViSession, *const c_char, *mut vs::ViFindList, *mut u32, *mut c_char);
    find_next: "viFindNext" fn(vs::ViFindList, *mut c_char);
    parse_rsrc_ex: "viParseRsrcEx" fn(
        vs::ViSession, *const c_char, *mut u16, *mut u16, *mut c_char, *mut c_char, *mut c_char,
    );
    status_desc: "viStatusDesc" fn(vs::ViObject, vs::ViStatus, *mut c_char);
    read_async: "viReadAsync" fn(vs::ViSession, *mut u8, u32, *mut vs::ViJobId);
    write_async: "viWriteAsync" fn(vs::ViSession, *const u8, u32, *mut vs::ViJobId);
    terminate: "viTerminate" fn(vs::ViObject, u16, vs::ViJobId);
    flush: "viFlush" fn(vs::ViSession, u16);
    clear: "viClear" fn(vs::ViSession);
    read_stb: "viReadSTB" fn(vs::ViSession, *mut u16);
    assert_trigger: "viAssertTrigger" fn(vs::ViSession, u16);
    assert_util_signal: "viAssertUtilSignal" fn(vs::ViSession, u16);
    assert_intr_signal: "viAssertIntrSignal" fn(vs::ViSession, i16, u32);
    lock: "viLock" fn(vs::ViSession, vs::ViAccessMode, u32, *const c_char, *mut c_char);
    unlock: "viUnlock" fn(vs::ViSession);
    enable_event: "viEnableEvent" fn(vs::ViSession, vs::ViEventType, u16, vs::ViEventFilter);
    disable_event: "viDisableEvent" fn(vs::ViSession, vs::ViEventType, u16);
    discard_events: "viDiscardEvents" fn(vs::ViSession, vs::ViEventType, u16);
    wait_on_event: "viWaitOnEvent" fn(vs::ViSession, vs::ViEventType, u32, *mut vs::ViEventType, *mut vs::ViEvent);
    gpib_command: "viGpibCommand" fn(vs::ViSession, *const u8, u32, *mut u32);
    gpib_control_atn: "viGpibControlATN" fn(vs::ViSession, u16);
    gpib_control_ren: "viGpibControlREN" fn(vs::ViSession, u16);
    gpib_pass_control: "viGpibPassControl" fn(vs::ViSession, u16, u16);
    gpib_send_ifc: "viGpibSendIFC" fn(vs::ViSession);
    usb_control_out: "viUsbControlOut" fn(vs::ViSession, i16, i16, u16, u16, u16, *const u8);
    usb_control_in: "viUsbControlIn" fn(vs::ViSession, i16, i16, u16, u16, u16, *mut u8, *mut u16);
    in8: "viIn8Ex" fn(vs::ViSession, u16, u64, *mut u8);
    in16: "viIn16Ex" fn(vs::ViSession, u16, u64, *mut u16);
    in32: "viIn32Ex" fn(vs::ViSession, u16, u64, *mut u32);
    in64: "viIn64Ex" fn(vs::ViSession, u16, u64, *mut u64);
    out8: "viOut8Ex" fn(vs::ViSession, u16, u64, u8);
    out16: "viOut16Ex" fn(vs::ViSession, u16, u64, u16);
    out32: "viOut32Ex" fn(vs::ViSession, u16, u64, u32);
    out64: "viOut64Ex" fn(vs::ViSession, u16, u64, u64);
}

/// Symbols every usable library exports.
const REQUIRED: &[&str] = &[
    "viOpenDefaultRM",
    "viOpen",
    "viClose",
    "viGetAttribute",
    "viSetAttribute",
    "viRead",
    "viWrite",
];

/// Calls an optional symbol, `VI_ERROR_NSUP_OPER` when the library lacks it.
macro_rules! native {
    ($self:ident.$f:ident($($arg:expr),* $(,)?)) => {
        match $self.sym.$f {
            // SAFETY: the symbol was resolved from the library held by `self`
            // with the signature declared in `visa.h`.
            Some(f) => unsafe { f($($arg),*) },
            None => NSUP_OPER,
        }
    };
}

/// A VISA implementation loaded with `libloading`.
pub struct NativeVisa {
    sym: Symbols,
    path: PathBuf,
    // keeps the symbols above valid
    _lib: Library,
}

impl std::fmt::Debug for NativeVisa {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NativeVisa").field("path", &self.path).finish()
    }
}

impl NativeVisa {
    /// Loads the library at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        // SAFETY: loading runs the library initialisers, which is what any
        // VISA user has to accept.
        let lib = unsafe { Library::new(path) }?;
        // SAFETY: the symbols keep the signatures of `visa.h` and `lib` is
        // stored next to them.
        let sym = unsafe { Symbols::load(&lib) };
        if let Some(name) = sym.missing().find(|name| REQUIRED.contains(name)) {
            return Err(Error::MissingSymbol(name));
        }
        for name in sym.missing() {
            log::debug!("{} does not export {name}", path.display());
        }
        log::debug!("loaded VISA library {}", path.display());
        Ok(Self {
            sym,
            path: path.to_path_buf(),
            _lib: lib,
        })
    }

    /// Loads the first candidate of `config` that works.
    pub fn from_config(config: &LibraryConfig) -> Result<Self> {
        let mut tried = Vec::new();
        for candidate in config.candidates() {
            match Self::load(&candidate) {
                Ok(lib) => return Ok(lib),
                Err(e) => {
                    log::debug!("cannot use {}: {e}", candidate.display());
                    tried.push(candidate.display().to_string());
                }
            }
        }
        Err(Error::LibraryNotFound(tried.join(", ")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn key_ptr(key: Option<&CStr>) -> *const c_char {
    key.map_or(ptr::null(), CStr::as_ptr)
}

impl RawVisa for NativeVisa {
    fn open_default_rm(&self, rm: &mut vs::ViSession) -> vs::ViStatus {
        native!(self.open_default_rm(rm))
    }

    fn open(
        &self,
        rm: vs::ViSession,
        name: &CStr,
        mode: vs::ViAccessMode,
        timeout: u32,
        vi: &mut vs::ViSession,
    ) -> vs::ViStatus {
        native!(self.open(rm, name.as_ptr(), mode, timeout, vi))
    }

    fn close(&self, vi: vs::ViObject) -> vs::ViStatus {
        native!(self.close(vi))
    }

    fn get_attribute(&self, vi: vs::ViObject, attr: vs::ViAttr, value: &mut [u8]) -> vs::ViStatus {
        native!(self.get_attribute(vi, attr, value.as_mut_ptr() as *mut c_void))
    }

    fn set_attribute(
        &self,
        vi: vs::ViObject,
        attr: vs::ViAttr,
        state: vs::ViAttrState,
    ) -> vs::ViStatus {
        native!(self.set_attribute(vi, attr, state))
    }

    fn read(&self, vi: vs::ViSession, buf: &mut [u8], ret: &mut u32) -> vs::ViStatus {
        native!(self.read(vi, buf.as_mut_ptr(), buf.len() as u32, ret))
    }

    fn write(&self, vi: vs::ViSession, buf: &[u8], ret: &mut u32) -> vs::ViStatus {
        native!(self.write(vi, buf.as_ptr(), buf.len() as u32, ret))
    }

    fn find_rsrc(
        &self,
        rm: vs::ViSession,
        expr: &CStr,
        list: &mut vs::ViFindList,
        count: &mut u32,
        desc: &mut VisaBuf,
    ) -> vs::ViStatus {
        native!(self.find_rsrc(rm, expr.as_ptr(), list, count, desc.as_mut_ptr() as *mut c_char))
    }

    fn find_next(&self, list: vs::ViFindList, desc: &mut VisaBuf) -> vs::ViStatus {
        native!(self.find_next(list, desc.as_mut_ptr() as *mut c_char))
    }

    fn parse_rsrc_ex(
        &self,
        rm: vs::ViSession,
        name: &CStr,
        intf_type: &mut u16,
        intf_num: &mut u16,
        class: &mut VisaBuf,
        expanded: &mut VisaBuf,
        alias: &mut VisaBuf,
    ) -> vs::ViStatus {
        native!(self.parse_rsrc_ex(
            rm,
            name.as_ptr(),
            intf_type,
            intf_num,
            class.as_mut_ptr() as *mut c_char,
            expanded.as_mut_ptr() as *mut c_char,
            alias.as_mut_ptr() as *mut c_char,
        ))
    }

    fn status_desc(&self, vi: vs::ViObject, status: vs::ViStatus, desc: &mut VisaBuf) -> vs::ViStatus {
        native!(self.status_desc(vi, status, desc.as_mut_ptr() as *mut c_char))
    }

    unsafe fn read_async(
        &self,
        vi: vs::ViSession,
        buf: *mut u8,
        len: u32,
        job: &mut vs::ViJobId,
    ) -> vs::ViStatus {
        native!(self.read_async(vi, buf, len, job))
    }

    unsafe fn write_async(
        &self,
        vi: vs::ViSession,
        buf: *const u8,
        len: u32,
        job: &mut vs::ViJobId,
    ) -> vs::ViStatus {
        native!(self.write_async(vi, buf, len, job))
    }

    fn terminate(&self, vi: vs::ViObject, degree: u16, job: vs::ViJobId) -> vs::ViStatus {
        native!(self.terminate(vi, degree, job))
    }

    fn flush(&self, vi: vs::ViSession, mask: u16) -> vs::ViStatus {
        native!(self.flush(vi, mask))
    }

    fn clear(&self, vi: vs::ViSession) -> vs::ViStatus {
        native!(self.clear(vi))
    }

    fn read_stb(&self, vi: vs::ViSession, stb: &mut u16) -> vs::ViStatus {
        native!(self.read_stb(vi, stb))
    }

    fn assert_trigger(&self, vi: vs::ViSession, protocol: u16) -> vs::ViStatus {
        native!(self.assert_trigger(vi, protocol))
    }

    fn assert_util_signal(&self, vi: vs::ViSession, line: u16) -> vs::ViStatus {
        native!(self.assert_util_signal(vi, line))
    }

    fn assert_intr_signal(&self, vi: vs::ViSession, mode: i16, status_id: u32) -> vs::ViStatus {
        native!(self.assert_intr_signal(vi, mode, status_id))
    }

    fn lock(
        &self,
        vi: vs::ViSession,
        mode: vs::ViAccessMode,
        timeout: u32,
        requested_key: Option<&CStr>,
        access_key: Option<&mut VisaBuf>,
    ) -> vs::ViStatus {
        let out = access_key.map_or(ptr::null_mut(), |k| k.as_mut_ptr() as *mut c_char);
        native!(self.lock(vi, mode, timeout, key_ptr(requested_key), out))
    }

    fn unlock(&self, vi: vs::ViSession) -> vs::ViStatus {
        native!(self.unlock(vi))
    }

    fn enable_event(
        &self,
        vi: vs::ViSession,
        event: vs::ViEventType,
        mechanism: u16,
        filter: vs::ViEventFilter,
    ) -> vs::ViStatus {
        native!(self.enable_event(vi, event, mechanism, filter))
    }

    fn disable_event(&self, vi: vs::ViSession, event: vs::ViEventType, mechanism: u16) -> vs::ViStatus {
        native!(self.disable_event(vi, event, mechanism))
    }

    fn discard_events(&self, vi: vs::ViSession, event: vs::ViEventType, mechanism: u16) -> vs::ViStatus {
        native!(self.discard_events(vi, event, mechanism))
    }

    fn wait_on_event(
        &self,
        vi: vs::ViSession,
        in_event: vs::ViEventType,
        timeout: u32,
        out_event: &mut vs::ViEventType,
        context: &mut vs::ViEvent,
    ) -> vs::ViStatus {
        native!(self.wait_on_event(vi, in_event, timeout, out_event, context))
    }

    fn gpib_command(&self, vi: vs::ViSession, cmd: &[u8], ret: &mut u32) -> vs::ViStatus {
        native!(self.gpib_command(vi, cmd.as_ptr(), cmd.len() as u32, ret))
    }

    fn gpib_control_atn(&self, vi: vs::ViSession, mode: u16) -> vs::ViStatus {
        native!(self.gpib_control_atn(vi, mode))
    }

    fn gpib_control_ren(&self, vi: vs::ViSession, mode: u16) -> vs::ViStatus {
        native!(self.gpib_control_ren(vi, mode))
    }

    fn gpib_pass_control(&self, vi: vs::ViSession, primary: u16, secondary: u16) -> vs::ViStatus {
        native!(self.gpib_pass_control(vi, primary, secondary))
    }

    fn gpib_send_ifc(&self, vi: vs::ViSession) -> vs::ViStatus {
        native!(self.gpib_send_ifc(vi))
    }

    fn usb_control_out(
        &self,
        vi: vs::ViSession,
        request_type: i16,
        request: i16,
        value: u16,
        index: u16,
        data: &[u8],
    ) -> vs::ViStatus {
        native!(self.usb_control_out(
            vi,
            request_type,
            request,
            value,
            index,
            data.len() as u16,
            data.as_ptr(),
        ))
    }

    fn usb_control_in(
        &self,
        vi: vs::ViSession,
        request_type: i16,
        request: i16,
        value: u16,
        index: u16,
        data: &mut [u8],
        ret: &mut u16,
    ) -> vs::ViStatus {
        native!(self.usb_control_in(
            vi,
            request_type,
            request,
            value,
            index,
            data.len() as u16,
            data.as_mut_ptr(),
            ret,
        ))
    }

    fn read_memory(
        &self,
        vi: vs::ViSession,
        space: u16,
        offset: u64,
        width: MemWidth,
        value: &mut u64,
    ) -> vs::ViStatus {
        let (status, read) = match width {
            MemWidth::W8 => {
                let mut v = 0u8;
                (native!(self.in8(vi, space, offset, &mut v)), v as u64)
            }
            MemWidth::W16 => {
                let mut v = 0u16;
                (native!(self.in16(vi, space, offset, &mut v)), v as u64)
            }
            MemWidth::W32 => {
                let mut v = 0u32;
                (native!(self.in32(vi, space, offset, &mut v)), v as u64)
            }
            MemWidth::W64 => {
                let mut v = 0u64;
                (native!(self.in64(vi, space, offset, &mut v)), v)
            }
        };
        *value = read;
        status
    }

    fn write_memory(
        &self,
        vi: vs::ViSession,
        space: u16,
        offset: u64,
        width: MemWidth,
        value: u64,
    ) -> vs::ViStatus {
        match width {
            MemWidth::W8 => native!(self.out8(vi, space, offset, value as u8)),
            MemWidth::W16 => native!(self.out16(vi, space, offset, value as u16)),
            MemWidth::W32 => native!(self.out32(vi, space, offset, value as u32)),
            MemWidth::W64 => native!(self.out64(vi, space, offset, value)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_library_lists_candidates() {
        let cfg = LibraryConfig::with_library("/nonexistent/libvisa-test.so");
        match NativeVisa::from_config(&cfg) {
            Err(Error::LibraryNotFound(tried)) => {
                assert!(tried.contains("/nonexistent/libvisa-test.so"))
            }
            // a VISA runtime is installed on this machine
            Ok(lib) => assert_ne!(lib.path(), Path::new("/nonexistent/libvisa-test.so")),
            Err(e) => panic!("unexpected error {e}"),
        }
    }
}
