//! The boundary to the native VISA library.
//!
//! [`RawVisa`] mirrors the `vi*` C functions one to one, taking safe Rust
//! buffers wherever the call does not outlive the borrow. [`VisaLibrary`] wraps
//! an implementation and turns returned statuses into [`Result`]s, logging
//! warning codes on the way.

use crate::{
    enums::status::{CompletionCode, ErrorCode},
    sys::{self as vs, VisaBuf},
    Error, Result,
};
use dashmap::DashMap;
use std::{ffi::CStr, fmt};

/// Status returned by operations a backend does not provide.
pub const NSUP_OPER: vs::ViStatus = ErrorCode::ErrorNsupOper as vs::ViStatus;

/// Access width of a register-based transfer, `viInXX`/`viOutXX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemWidth {
    W8,
    W16,
    W32,
    W64,
}

impl MemWidth {
    pub fn bytes(&self) -> usize {
        match self {
            Self::W8 => 1,
            Self::W16 => 2,
            Self::W32 => 4,
            Self::W64 => 8,
        }
    }
}

/// Raw VISA operations.
///
/// The first group is what every backend must provide, the rest default to
/// `VI_ERROR_NSUP_OPER`.
#[allow(clippy::too_many_arguments)]
pub trait RawVisa: Send + Sync {
    fn open_default_rm(&self, rm: &mut vs::ViSession) -> vs::ViStatus;
    fn open(
        &self,
        rm: vs::ViSession,
        name: &CStr,
        mode: vs::ViAccessMode,
        timeout: u32,
        vi: &mut vs::ViSession,
    ) -> vs::ViStatus;
    fn close(&self, vi: vs::ViObject) -> vs::ViStatus;
    /// `value` is at least as large as the attribute.
    fn get_attribute(&self, vi: vs::ViObject, attr: vs::ViAttr, value: &mut [u8]) -> vs::ViStatus;
    fn set_attribute(
        &self,
        vi: vs::ViObject,
        attr: vs::ViAttr,
        state: vs::ViAttrState,
    ) -> vs::ViStatus;
    fn read(&self, vi: vs::ViSession, buf: &mut [u8], ret: &mut u32) -> vs::ViStatus;
    fn write(&self, vi: vs::ViSession, buf: &[u8], ret: &mut u32) -> vs::ViStatus;

    fn find_rsrc(
        &self,
        _rm: vs::ViSession,
        _expr: &CStr,
        _list: &mut vs::ViFindList,
        _count: &mut u32,
        _desc: &mut VisaBuf,
    ) -> vs::ViStatus {
        NSUP_OPER
    }
    fn find_next(&self, _list: vs::ViFindList, _desc: &mut VisaBuf) -> vs::ViStatus {
        NSUP_OPER
    }
    fn parse_rsrc_ex(
        &self,
        _rm: vs::ViSession,
        _name: &CStr,
        _intf_type: &mut u16,
        _intf_num: &mut u16,
        _class: &mut VisaBuf,
        _expanded: &mut VisaBuf,
        _alias: &mut VisaBuf,
    ) -> vs::ViStatus {
        NSUP_OPER
    }
    fn status_desc(
        &self,
        _vi: vs::ViObject,
        _status: vs::ViStatus,
        _desc: &mut VisaBuf,
    ) -> vs::ViStatus {
        NSUP_OPER
    }

    /// # Safety
    /// `buf` must stay valid for `len` bytes until the job completes or is
    /// terminated.
    unsafe fn read_async(
        &self,
        _vi: vs::ViSession,
        _buf: *mut u8,
        _len: u32,
        _job: &mut vs::ViJobId,
    ) -> vs::ViStatus {
        NSUP_OPER
    }
    /// # Safety
    /// `buf` must stay valid for `len` bytes until the job completes or is
    /// terminated.
    unsafe fn write_async(
        &self,
        _vi: vs::ViSession,
        _buf: *const u8,
        _len: u32,
        _job: &mut vs::ViJobId,
    ) -> vs::ViStatus {
        NSUP_OPER
    }
    fn terminate(&self, _vi: vs::ViObject, _degree: u16, _job: vs::ViJobId) -> vs::ViStatus {
        NSUP_OPER
    }

    fn flush(&self, _vi: vs::ViSession, _mask: u16) -> vs::ViStatus {
        NSUP_OPER
    }
    fn clear(&self, _vi: vs::ViSession) -> vs::ViStatus {
        NSUP_OPER
    }
    fn read_stb(&self, _vi: vs::ViSession, _stb: &mut u16) -> vs::ViStatus {
        NSUP_OPER
    }
    fn assert_trigger(&self, _vi: vs::ViSession, _protocol: u16) -> vs::ViStatus {
        NSUP_OPER
    }
    fn assert_util_signal(&self, _vi: vs::ViSession, _line: u16) -> vs::ViStatus {
        NSUP_OPER
    }
    fn assert_intr_signal(&self, _vi: vs::ViSession, _mode: i16, _status_id: u32) -> vs::ViStatus {
        NSUP_OPER
    }

    fn lock(
        &self,
        _vi: vs::ViSession,
        _mode: vs::ViAccessMode,
        _timeout: u32,
        _requested_key: Option<&CStr>,
        _access_key: Option<&mut VisaBuf>,
    ) -> vs::ViStatus {
        NSUP_OPER
    }
    fn unlock(&self, _vi: vs::ViSession) -> vs::ViStatus {
        NSUP_OPER
    }

    fn enable_event(
        &self,
        _vi: vs::ViSession,
        _event: vs::ViEventType,
        _mechanism: u16,
        _filter: vs::ViEventFilter,
    ) -> vs::ViStatus {
        NSUP_OPER
    }
    fn disable_event(
        &self,
        _vi: vs::ViSession,
        _event: vs::ViEventType,
        _mechanism: u16,
    ) -> vs::ViStatus {
        NSUP_OPER
    }
    fn discard_events(
        &self,
        _vi: vs::ViSession,
        _event: vs::ViEventType,
        _mechanism: u16,
    ) -> vs::ViStatus {
        NSUP_OPER
    }
    fn wait_on_event(
        &self,
        _vi: vs::ViSession,
        _in_event: vs::ViEventType,
        _timeout: u32,
        _out_event: &mut vs::ViEventType,
        _context: &mut vs::ViEvent,
    ) -> vs::ViStatus {
        NSUP_OPER
    }

    fn gpib_command(&self, _vi: vs::ViSession, _cmd: &[u8], _ret: &mut u32) -> vs::ViStatus {
        NSUP_OPER
    }
    fn gpib_control_atn(&self, _vi: vs::ViSession, _mode: u16) -> vs::ViStatus {
        NSUP_OPER
    }
    fn gpib_control_ren(&self, _vi: vs::ViSession, _mode: u16) -> vs::ViStatus {
        NSUP_OPER
    }
    fn gpib_pass_control(&self, _vi: vs::ViSession, _primary: u16, _secondary: u16) -> vs::ViStatus {
        NSUP_OPER
    }
    fn gpib_send_ifc(&self, _vi: vs::ViSession) -> vs::ViStatus {
        NSUP_OPER
    }

    fn usb_control_out(
        &self,
        _vi: vs::ViSession,
        _request_type: i16,
        _request: i16,
        _value: u16,
        _index: u16,
        _data: &[u8],
    ) -> vs::ViStatus {
        NSUP_OPER
    }
    fn usb_control_in(
        &self,
        _vi: vs::ViSession,
        _request_type: i16,
        _request: i16,
        _value: u16,
        _index: u16,
        _data: &mut [u8],
        _ret: &mut u16,
    ) -> vs::ViStatus {
        NSUP_OPER
    }

    fn read_memory(
        &self,
        _vi: vs::ViSession,
        _space: u16,
        _offset: u64,
        _width: MemWidth,
        _value: &mut u64,
    ) -> vs::ViStatus {
        NSUP_OPER
    }
    fn write_memory(
        &self,
        _vi: vs::ViSession,
        _space: u16,
        _offset: u64,
        _width: MemWidth,
        _value: u64,
    ) -> vs::ViStatus {
        NSUP_OPER
    }
}

/// A [`RawVisa`] backend plus status bookkeeping.
pub struct VisaLibrary {
    raw: Box<dyn RawVisa>,
    ignored: DashMap<(vs::ViObject, vs::ViStatus), usize>,
    last_status: DashMap<vs::ViObject, vs::ViStatus>,
}

impl fmt::Debug for VisaLibrary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VisaLibrary")
            .field("ignored", &self.ignored)
            .field("last_status", &self.last_status)
            .finish_non_exhaustive()
    }
}

impl VisaLibrary {
    pub fn new(raw: impl RawVisa + 'static) -> Self {
        Self::from_boxed(Box::new(raw))
    }

    pub fn from_boxed(raw: Box<dyn RawVisa>) -> Self {
        Self {
            raw,
            ignored: DashMap::new(),
            last_status: DashMap::new(),
        }
    }

    pub fn raw(&self) -> &dyn RawVisa {
        self.raw.as_ref()
    }

    /// Runs a raw call on behalf of `vi` and checks the status it returns.
    pub fn call(
        &self,
        vi: vs::ViObject,
        f: impl FnOnce(&dyn RawVisa) -> vs::ViStatus,
    ) -> Result<CompletionCode> {
        self.check(vi, f(self.raw()))
    }

    /// Translates a status returned for `vi`.
    ///
    /// Negative statuses become [`Error::Visa`]. Warnings are logged unless
    /// silenced with [`Self::ignore_warning`]. Unknown positive statuses are
    /// reported as [`CompletionCode::WarnUnknownStatus`].
    pub fn check(&self, vi: vs::ViObject, status: vs::ViStatus) -> Result<CompletionCode> {
        self.last_status.insert(vi, status);
        if status < vs::VI_SUCCESS {
            log::trace!("session {vi}: status {status:#010X}");
            return Err(match ErrorCode::try_from(status) {
                Ok(code) => Error::Visa(code),
                Err(_) => Error::UnknownStatus(status),
            });
        }
        let code = match CompletionCode::try_from(status) {
            Ok(code) => code,
            Err(_) => {
                log::warn!("session {vi}: unknown completion status {status:#010X}");
                return Ok(CompletionCode::WarnUnknownStatus);
            }
        };
        log::trace!("session {vi}: {code:?}");
        if code.is_warning() && !self.is_ignored(vi, status) {
            log::warn!("session {vi}: {code:?}");
        }
        Ok(code)
    }

    fn is_ignored(&self, vi: vs::ViObject, status: vs::ViStatus) -> bool {
        self.ignored.contains_key(&(vi, status))
    }

    /// Silences `codes` on `vi` until the guard is dropped. Guards nest.
    pub fn ignore_warning(
        &self,
        vi: vs::ViObject,
        codes: &[CompletionCode],
    ) -> WarningGuard<'_> {
        let codes: Vec<vs::ViStatus> = codes.iter().map(|c| i32::from(*c)).collect();
        for code in &codes {
            *self.ignored.entry((vi, *code)).or_insert(0) += 1;
        }
        WarningGuard {
            lib: self,
            vi,
            codes,
        }
    }

    /// Last status returned by a call made on behalf of `vi`.
    pub fn last_status(&self, vi: vs::ViObject) -> Option<vs::ViStatus> {
        self.last_status.get(&vi).map(|s| *s)
    }

    pub(crate) fn forget(&self, vi: vs::ViObject) {
        self.last_status.remove(&vi);
        self.ignored.retain(|(v, _), _| *v != vi);
    }

    pub fn get_attribute(
        &self,
        vi: vs::ViObject,
        attr: vs::ViAttr,
        buf: &mut [u8],
    ) -> Result<CompletionCode> {
        self.call(vi, |raw| raw.get_attribute(vi, attr, buf))
    }

    pub fn set_attribute(
        &self,
        vi: vs::ViObject,
        attr: vs::ViAttr,
        state: vs::ViAttrState,
    ) -> Result<CompletionCode> {
        self.call(vi, |raw| raw.set_attribute(vi, attr, state))
    }
}

/// Returned by [`VisaLibrary::ignore_warning`].
#[must_use = "warnings are only ignored while the guard lives"]
pub struct WarningGuard<'a> {
    lib: &'a VisaLibrary,
    vi: vs::ViObject,
    codes: Vec<vs::ViStatus>,
}

impl Drop for WarningGuard<'_> {
    fn drop(&mut self) {
        for code in &self.codes {
            let key = (self.vi, *code);
            let left = match self.lib.ignored.get_mut(&key) {
                Some(mut n) => {
                    *n = n.saturating_sub(1);
                    *n
                }
                None => continue,
            };
            if left == 0 {
                self.lib.ignored.remove_if(&key, |_, n| *n == 0);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Nothing;

    impl RawVisa for Nothing {
        fn open_default_rm(&self, _rm: &mut vs::ViSession) -> vs::ViStatus {
            NSUP_OPER
        }
        fn open(
            &self,
            _rm: vs::ViSession,
            _name: &CStr,
            _mode: vs::ViAccessMode,
            _timeout: u32,
            _vi: &mut vs::ViSession,
        ) -> vs::ViStatus {
            NSUP_OPER
        }
        fn close(&self, _vi: vs::ViObject) -> vs::ViStatus {
            vs::VI_SUCCESS
        }
        fn get_attribute(&self, _: vs::ViObject, _: vs::ViAttr, _: &mut [u8]) -> vs::ViStatus {
            NSUP_OPER
        }
        fn set_attribute(&self, _: vs::ViObject, _: vs::ViAttr, _: vs::ViAttrState) -> vs::ViStatus {
            NSUP_OPER
        }
        fn read(&self, _: vs::ViSession, _: &mut [u8], _: &mut u32) -> vs::ViStatus {
            NSUP_OPER
        }
        fn write(&self, _: vs::ViSession, _: &[u8], _: &mut u32) -> vs::ViStatus {
            NSUP_OPER
        }
    }

    #[test]
    fn statuses_are_translated() {
        let lib = VisaLibrary::new(Nothing);
        assert!(matches!(
            lib.check(1, NSUP_OPER),
            Err(Error::Visa(ErrorCode::ErrorNsupOper))
        ));
        assert!(matches!(lib.check(1, -1), Err(Error::UnknownStatus(-1))));
        assert_eq!(
            lib.check(1, 0x3FFF0006).ok(),
            Some(CompletionCode::SuccessMaxCnt)
        );
        assert_eq!(
            lib.check(1, 0x3FFF7000).ok(),
            Some(CompletionCode::WarnUnknownStatus)
        );
        assert_eq!(lib.last_status(1), Some(0x3FFF7000));
        assert!(lib.call(2, |raw| raw.clear(2)).is_err());
    }

    #[test]
    fn guards_nest() {
        let lib = VisaLibrary::new(Nothing);
        let max_cnt = CompletionCode::SuccessMaxCnt;
        let outer = lib.ignore_warning(3, &[max_cnt]);
        {
            let _inner = lib.ignore_warning(3, &[max_cnt]);
            assert!(lib.is_ignored(3, max_cnt.into()));
        }
        assert!(lib.is_ignored(3, max_cnt.into()));
        drop(outer);
        assert!(!lib.is_ignored(3, max_cnt.into()));
    }
}
