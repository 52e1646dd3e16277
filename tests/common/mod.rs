//! In-memory VISA backend recording every native call.
#![allow(dead_code)]

use rstest::fixture;
use std::{
    collections::{HashMap, VecDeque},
    ffi::CStr,
    sync::{Arc, Mutex, MutexGuard},
    time::Duration,
};
use visa_bind::{
    attributes::{self, VI_ATTR_JOB_ID, VI_ATTR_RET_COUNT, VI_ATTR_STATUS, VI_ATTR_TERMCHAR, VI_ATTR_TERMCHAR_EN},
    enums::{
        event::EventType,
        status::{CompletionCode, ErrorCode},
    },
    library::MemWidth,
    sys::{self as vs, VisaBuf},
    RawVisa, ResourceManager,
};

pub fn init_logger() {
    let _ = env_logger::builder()
        .filter_level(log::LevelFilter::Warn)
        .is_test(true)
        .try_init();
}

fn status(code: ErrorCode) -> vs::ViStatus {
    code.into()
}

fn completion(code: CompletionCode) -> vs::ViStatus {
    code.into()
}

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    OpenDefaultRm,
    Open(String),
    Close(vs::ViObject),
    GetAttribute(vs::ViObject, vs::ViAttr),
    SetAttribute(vs::ViObject, vs::ViAttr, u64),
    Read(vs::ViSession, usize),
    Write(vs::ViSession, Vec<u8>),
    FindRsrc(String),
    FindNext(vs::ViFindList),
    ReadStb(vs::ViSession),
    EnableEvent(vs::ViSession, vs::ViEventType),
    DiscardEvents(vs::ViSession, vs::ViEventType),
    WaitOnEvent(vs::ViSession, vs::ViEventType),
    GpibCommand(vs::ViSession, Vec<u8>),
    SendIfc(vs::ViSession),
    ReadAsync(vs::ViSession, usize),
    Terminate(vs::ViSession, vs::ViJobId),
    ReadMemory(vs::ViSession, u16, u64, MemWidth),
    WriteMemory(vs::ViSession, u16, u64, MemWidth, u64),
}

#[derive(Debug, Clone, PartialEq)]
enum Stored {
    Int(u64),
    Str(String),
}

#[derive(Debug, Default)]
struct State {
    calls: Vec<Call>,
    next_handle: vs::ViObject,
    attrs: HashMap<(vs::ViObject, vs::ViAttr), Stored>,
    resources: Vec<String>,
    found: VecDeque<String>,
    /// Bytes the device will answer, the last byte carries END.
    output: VecDeque<u8>,
    /// Largest count a single `viWrite` accepts.
    write_chunk: Option<usize>,
    events: VecDeque<(vs::ViEventType, vs::ViEvent)>,
    stb: u16,
    memory: HashMap<(u16, u64), u64>,
    /// How long handing out a queued event takes.
    event_latency: Duration,
    /// Timeout of every `viWaitOnEvent`, in milliseconds.
    wait_timeouts: Vec<u32>,
}

impl State {
    fn handle(&mut self) -> vs::ViObject {
        self.next_handle += 1;
        self.next_handle
    }

    fn int(&self, vi: vs::ViObject, attr: vs::ViAttr) -> Option<u64> {
        match self.attrs.get(&(vi, attr)) {
            Some(Stored::Int(v)) => Some(*v),
            _ => None,
        }
    }

    /// Takes at most `len` bytes of output, stopping after the termination
    /// character when it is enabled for `vi`.
    fn take_output(&mut self, vi: vs::ViSession, len: usize) -> (Vec<u8>, vs::ViStatus) {
        if self.output.is_empty() {
            return (Vec::new(), status(ErrorCode::ErrorTmo));
        }
        let termchar = match self.int(vi, VI_ATTR_TERMCHAR_EN) {
            Some(1) => self.int(vi, VI_ATTR_TERMCHAR).map(|c| c as u8),
            _ => None,
        };
        let mut data = Vec::new();
        while data.len() < len {
            let Some(byte) = self.output.pop_front() else { break };
            data.push(byte);
            if Some(byte) == termchar {
                return (data, completion(CompletionCode::SuccessTermChar));
            }
        }
        let code = if self.output.is_empty() {
            CompletionCode::Success
        } else {
            CompletionCode::SuccessMaxCnt
        };
        (data, completion(code))
    }
}

/// Cheap to clone, clones share their state.
#[derive(Debug, Clone, Default)]
pub struct MockVisa {
    state: Arc<Mutex<State>>,
}

impl MockVisa {
    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap()
    }

    pub fn calls(&self) -> Vec<Call> {
        self.lock().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.lock().calls.clear();
    }

    pub fn set_event_latency(&self, latency: Duration) {
        self.lock().event_latency = latency;
    }

    pub fn wait_timeouts(&self) -> Vec<u32> {
        self.lock().wait_timeouts.clone()
    }

    pub fn set_attr(&self, vi: vs::ViObject, attr: vs::ViAttr, value: u64) {
        self.lock().attrs.insert((vi, attr), Stored::Int(value));
    }

    pub fn set_str(&self, vi: vs::ViObject, attr: vs::ViAttr, value: &str) {
        self.lock()
            .attrs
            .insert((vi, attr), Stored::Str(value.to_string()));
    }

    pub fn attr(&self, vi: vs::ViObject, attr: vs::ViAttr) -> Option<u64> {
        self.lock().int(vi, attr)
    }

    pub fn add_resource(&self, name: &str) {
        self.lock().resources.push(name.to_string());
    }

    /// Queues bytes for the device to answer.
    pub fn respond(&self, data: &[u8]) {
        self.lock().output.extend(data);
    }

    pub fn set_write_chunk(&self, chunk: usize) {
        self.lock().write_chunk = Some(chunk);
    }

    pub fn set_stb(&self, stb: u16) {
        self.lock().stb = stb;
    }

    /// Queues an event occurrence with the given context attributes and
    /// returns its context.
    pub fn push_event(&self, kind: EventType, attrs: &[(vs::ViAttr, u64)]) -> vs::ViEvent {
        let mut st = self.lock();
        let context = st.handle();
        for (attr, value) in attrs {
            st.attrs.insert((context, *attr), Stored::Int(*value));
        }
        st.events.push_back((kind.into(), context));
        context
    }

    pub fn rm(&self) -> visa_bind::Result<ResourceManager> {
        ResourceManager::with_library(self.clone())
    }
}

#[fixture]
pub fn mock() -> MockVisa {
    init_logger();
    MockVisa::default()
}

/// `?*` matches anything, everything else literally and ignoring case.
fn matches_expr(expr: &str, name: &str) -> bool {
    let name = name.to_ascii_uppercase();
    let mut rest = name.as_str();
    let parts: Vec<String> = expr.split("?*").map(str::to_ascii_uppercase).collect();
    for (i, part) in parts.iter().enumerate() {
        if i == 0 {
            match rest.strip_prefix(part.as_str()) {
                Some(r) => rest = r,
                None => return false,
            }
        } else if i == parts.len() - 1 {
            return rest.ends_with(part.as_str());
        } else {
            match rest.find(part.as_str()) {
                Some(at) => rest = &rest[at + part.len()..],
                None => return false,
            }
        }
    }
    rest.is_empty()
}

fn copy_str(dst: &mut [u8], s: &str) {
    dst[..s.len()].copy_from_slice(s.as_bytes());
    dst[s.len()] = 0;
}

impl RawVisa for MockVisa {
    fn open_default_rm(&self, rm: &mut vs::ViSession) -> vs::ViStatus {
        let mut st = self.lock();
        st.calls.push(Call::OpenDefaultRm);
        *rm = st.handle();
        vs::VI_SUCCESS
    }

    fn open(
        &self,
        _rm: vs::ViSession,
        name: &CStr,
        _mode: vs::ViAccessMode,
        _timeout: u32,
        vi: &mut vs::ViSession,
    ) -> vs::ViStatus {
        let mut st = self.lock();
        st.calls
            .push(Call::Open(name.to_string_lossy().into_owned()));
        *vi = st.handle();
        vs::VI_SUCCESS
    }

    fn close(&self, vi: vs::ViObject) -> vs::ViStatus {
        self.lock().calls.push(Call::Close(vi));
        vs::VI_SUCCESS
    }

    fn get_attribute(&self, vi: vs::ViObject, attr: vs::ViAttr, value: &mut [u8]) -> vs::ViStatus {
        let mut st = self.lock();
        st.calls.push(Call::GetAttribute(vi, attr));
        match st.attrs.get(&(vi, attr)) {
            Some(Stored::Str(s)) => copy_str(value, s),
            Some(Stored::Int(v)) => {
                let width = attributes::builtin()
                    .descriptor(attr)
                    .ok()
                    .and_then(|d| d.buffer_len())
                    .unwrap_or(8);
                let bytes = match width {
                    1 => (*v as u8).to_ne_bytes().to_vec(),
                    2 => (*v as u16).to_ne_bytes().to_vec(),
                    4 => (*v as u32).to_ne_bytes().to_vec(),
                    _ => v.to_ne_bytes().to_vec(),
                };
                value[..bytes.len()].copy_from_slice(&bytes);
            }
            None => return status(ErrorCode::ErrorNsupAttr),
        }
        vs::VI_SUCCESS
    }

    fn set_attribute(
        &self,
        vi: vs::ViObject,
        attr: vs::ViAttr,
        state: vs::ViAttrState,
    ) -> vs::ViStatus {
        let mut st = self.lock();
        let state = state as u64;
        st.calls.push(Call::SetAttribute(vi, attr, state));
        st.attrs.insert((vi, attr), Stored::Int(state));
        vs::VI_SUCCESS
    }

    fn read(&self, vi: vs::ViSession, buf: &mut [u8], ret: &mut u32) -> vs::ViStatus {
        let mut st = self.lock();
        st.calls.push(Call::Read(vi, buf.len()));
        let (data, status) = st.take_output(vi, buf.len());
        buf[..data.len()].copy_from_slice(&data);
        *ret = data.len() as u32;
        status
    }

    fn write(&self, vi: vs::ViSession, buf: &[u8], ret: &mut u32) -> vs::ViStatus {
        let mut st = self.lock();
        let n = st.write_chunk.unwrap_or(buf.len()).min(buf.len());
        st.calls.push(Call::Write(vi, buf[..n].to_vec()));
        *ret = n as u32;
        vs::VI_SUCCESS
    }

    fn find_rsrc(
        &self,
        _rm: vs::ViSession,
        expr: &CStr,
        list: &mut vs::ViFindList,
        count: &mut u32,
        desc: &mut VisaBuf,
    ) -> vs::ViStatus {
        let mut st = self.lock();
        let expr = expr.to_string_lossy().into_owned();
        st.calls.push(Call::FindRsrc(expr.clone()));
        let found: VecDeque<String> = st
            .resources
            .iter()
            .filter(|r| matches_expr(&expr, r))
            .cloned()
            .collect();
        let Some(first) = found.front().cloned() else {
            return status(ErrorCode::ErrorRsrcNfound);
        };
        copy_str(desc, &first);
        *count = found.len() as u32;
        *list = st.handle();
        st.found = found;
        st.found.pop_front();
        vs::VI_SUCCESS
    }

    fn find_next(&self, list: vs::ViFindList, desc: &mut VisaBuf) -> vs::ViStatus {
        let mut st = self.lock();
        st.calls.push(Call::FindNext(list));
        match st.found.pop_front() {
            Some(next) => {
                copy_str(desc, &next);
                vs::VI_SUCCESS
            }
            None => status(ErrorCode::ErrorRsrcNfound),
        }
    }

    fn read_stb(&self, vi: vs::ViSession, stb: &mut u16) -> vs::ViStatus {
        let mut st = self.lock();
        st.calls.push(Call::ReadStb(vi));
        *stb = st.stb;
        vs::VI_SUCCESS
    }

    fn enable_event(
        &self,
        vi: vs::ViSession,
        event: vs::ViEventType,
        _mechanism: u16,
        _filter: vs::ViEventFilter,
    ) -> vs::ViStatus {
        self.lock().calls.push(Call::EnableEvent(vi, event));
        vs::VI_SUCCESS
    }

    fn discard_events(
        &self,
        vi: vs::ViSession,
        event: vs::ViEventType,
        _mechanism: u16,
    ) -> vs::ViStatus {
        let mut st = self.lock();
        st.calls.push(Call::DiscardEvents(vi, event));
        st.events.retain(|(kind, _)| *kind != event);
        vs::VI_SUCCESS
    }

    fn wait_on_event(
        &self,
        vi: vs::ViSession,
        in_event: vs::ViEventType,
        timeout: u32,
        out_event: &mut vs::ViEventType,
        context: &mut vs::ViEvent,
    ) -> vs::ViStatus {
        let mut st = self.lock();
        st.calls.push(Call::WaitOnEvent(vi, in_event));
        st.wait_timeouts.push(timeout);
        let any = u32::from(EventType::AllEnabledEvents);
        let Some(at) = st
            .events
            .iter()
            .position(|(kind, _)| *kind == in_event || in_event == any)
        else {
            return status(ErrorCode::ErrorTmo);
        };
        let Some((kind, ctx)) = st.events.remove(at) else {
            return status(ErrorCode::ErrorTmo);
        };
        *out_event = kind;
        *context = ctx;
        let latency = st.event_latency;
        drop(st);
        std::thread::sleep(latency);
        vs::VI_SUCCESS
    }

    fn gpib_command(&self, vi: vs::ViSession, cmd: &[u8], ret: &mut u32) -> vs::ViStatus {
        self.lock().calls.push(Call::GpibCommand(vi, cmd.to_vec()));
        *ret = cmd.len() as u32;
        vs::VI_SUCCESS
    }

    fn gpib_send_ifc(&self, vi: vs::ViSession) -> vs::ViStatus {
        self.lock().calls.push(Call::SendIfc(vi));
        vs::VI_SUCCESS
    }

    unsafe fn read_async(
        &self,
        vi: vs::ViSession,
        buf: *mut u8,
        len: u32,
        job: &mut vs::ViJobId,
    ) -> vs::ViStatus {
        let mut st = self.lock();
        st.calls.push(Call::ReadAsync(vi, len as usize));
        let (data, read_status) = st.take_output(vi, len as usize);
        std::ptr::copy_nonoverlapping(data.as_ptr(), buf, data.len());
        *job = st.handle();
        let context = st.handle();
        for (attr, value) in [
            (VI_ATTR_JOB_ID, u64::from(*job)),
            (VI_ATTR_RET_COUNT, data.len() as u64),
            (VI_ATTR_STATUS, read_status as u32 as u64),
        ] {
            st.attrs.insert((context, attr), Stored::Int(value));
        }
        st.events
            .push_back((EventType::IoCompletion.into(), context));
        vs::VI_SUCCESS
    }

    fn terminate(&self, vi: vs::ViObject, _degree: u16, job: vs::ViJobId) -> vs::ViStatus {
        self.lock().calls.push(Call::Terminate(vi, job));
        vs::VI_SUCCESS
    }

    fn read_memory(
        &self,
        vi: vs::ViSession,
        space: u16,
        offset: u64,
        width: MemWidth,
        value: &mut u64,
    ) -> vs::ViStatus {
        let mut st = self.lock();
        st.calls.push(Call::ReadMemory(vi, space, offset, width));
        *value = st.memory.get(&(space, offset)).copied().unwrap_or_default();
        vs::VI_SUCCESS
    }

    fn write_memory(
        &self,
        vi: vs::ViSession,
        space: u16,
        offset: u64,
        width: MemWidth,
        value: u64,
    ) -> vs::ViStatus {
        let mut st = self.lock();
        st.calls
            .push(Call::WriteMemory(vi, space, offset, width, value));
        st.memory.insert((space, offset), value);
        vs::VI_SUCCESS
    }
}
