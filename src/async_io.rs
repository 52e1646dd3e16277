//! `viReadAsync`/`viWriteAsync` with blocking completion.
//!
//! The job owns its buffer so the native library can keep writing to it
//! however long the caller holds the job. Completion is collected from the
//! `VI_EVENT_IO_COMPLETION` queue, which must be enabled beforehand:
//!
//! ```no_run
//! # fn main() -> visa_bind::Result<()> {
//! use std::time::{Duration, Instant};
//! use visa_bind::{enums::event::{EventType, Mechanism}, rm::ResourceManager};
//! let rm = ResourceManager::new()?;
//! let instr = rm.open_bare_resource("TCPIP::192.168.0.10::INSTR")?;
//! instr.enable_event(EventType::IoCompletion, Mechanism::Queue)?;
//! instr.write_async(&b"*IDN?\n"[..])?.wait(Duration::from_secs(1))?;
//! let idn = instr.read_async(256)?.finish(Duration::from_secs(1))?;
//! # Ok(())
//! # }
//! ```

use crate::{
    attributes::{VI_ATTR_JOB_ID, VI_ATTR_RET_COUNT, VI_ATTR_STATUS},
    enums::{event::EventType, status::ErrorCode},
    session::Session,
    sys as vs, Error, Result,
};
use bytes::{Bytes, BytesMut};
use std::time::{Duration, Instant};

/// How long a dropped job waits for its aborted transfer to report back.
const ABORT_GRACE: Duration = Duration::from_millis(100);

/// Job ID of an asynchronous operation, compared against `VI_ATTR_JOB_ID` of
/// completion events.
#[derive(Debug, PartialEq, PartialOrd, Eq, Ord, Hash, Clone, Copy)]
pub struct JobId(pub(crate) vs::ViJobId);

impl JobId {
    ///create JobId with value null, used in [`Session::terminate`] to abort all calls
    pub fn null() -> Self {
        Self(vs::VI_NULL as _)
    }

    pub fn into_inner(self) -> vs::ViJobId {
        self.0
    }
}

#[derive(Debug)]
enum JobBuffer {
    Read(BytesMut),
    Write(Bytes),
}

/// A running asynchronous transfer. Dropping it before completion
/// terminates the transfer.
#[derive(Debug)]
#[must_use = "dropping the job terminates the transfer"]
pub struct AsyncJob<'s> {
    session: &'s Session,
    id: JobId,
    buf: Option<JobBuffer>,
    /// Byte count, or the error status, of the completion event.
    outcome: Option<std::result::Result<usize, vs::ViStatus>>,
}

impl Session {
    ///Reads up to `len` bytes from device or interface asynchronously.
    ///
    /// If you have enabled `VI_EVENT_IO_COMPLETION` for queueing, every
    /// successful call must be followed by a wait on the completion event, even
    /// if the library performed the transfer synchronously
    /// (`VI_SUCCESS_SYNC`). [`AsyncJob::wait`] does that.
    pub fn read_async(&self, len: usize) -> Result<AsyncJob<'_>> {
        let len32 = u32::try_from(len)
            .map_err(|_| Error::InvalidArgument(format!("read of {len} bytes is too large")))?;
        let mut buf = BytesMut::zeroed(len);
        let mut id: vs::ViJobId = 0;
        let ptr = buf.as_mut_ptr();
        // SAFETY: `buf` is owned by the job and never reallocated, it outlives
        // the transfer or is leaked, see `AsyncJob::drop`.
        self.call(|raw, vi| unsafe { raw.read_async(vi, ptr, len32, &mut id) })?;
        log::trace!("session {}: async read job {id}", self.vi());
        Ok(AsyncJob::new(self, JobId(id), JobBuffer::Read(buf)))
    }

    ///Writes `data` to device or interface asynchronously.
    ///
    /// See [`Self::read_async`] for the completion requirements.
    pub fn write_async(&self, data: impl Into<Bytes>) -> Result<AsyncJob<'_>> {
        let data: Bytes = data.into();
        let len = u32::try_from(data.len()).map_err(|_| {
            Error::InvalidArgument(format!("write of {} bytes is too large", data.len()))
        })?;
        let mut id: vs::ViJobId = 0;
        let ptr = data.as_ptr();
        // SAFETY: as in `read_async`, `data` is kept alive by the job.
        self.call(|raw, vi| unsafe { raw.write_async(vi, ptr, len, &mut id) })?;
        log::trace!("session {}: async write job {id}", self.vi());
        Ok(AsyncJob::new(self, JobId(id), JobBuffer::Write(data)))
    }

    /// Requests session to terminate normal execution of an operation.
    ///
    /// [`JobId::null`] aborts every call in the current process executing on
    /// this session, those calls should return `VI_ERROR_ABORT`.
    pub fn terminate(&self, job: JobId) -> Result<()> {
        self.call(|raw, vi| raw.terminate(vi, vs::VI_NULL as u16, job.0))?;
        Ok(())
    }
}

impl<'s> AsyncJob<'s> {
    fn new(session: &'s Session, id: JobId, buf: JobBuffer) -> Self {
        Self {
            session,
            id,
            buf: Some(buf),
            outcome: None,
        }
    }

    pub fn id(&self) -> JobId {
        self.id
    }

    /// Whether the completion event arrived, successful or not.
    pub fn is_done(&self) -> bool {
        self.outcome.is_some()
    }

    /// Blocks until the completion event of this job arrives and returns the
    /// number of bytes transferred, or the error status the job completed
    /// with.
    ///
    /// Completion events of other jobs received meanwhile are discarded, they
    /// do not extend `timeout`. Once the completion arrived, later calls
    /// return the same outcome again.
    pub fn wait(&mut self, timeout: Duration) -> Result<usize> {
        if let Some(outcome) = self.outcome {
            return outcome.map_err(status_error);
        }
        let deadline = Instant::now().checked_add(timeout);
        let mut left = timeout;
        loop {
            let resp = self.session.wait_on_event(EventType::IoCompletion, left)?;
            let event = match resp.event {
                Some(event) => event,
                None => return Err(Error::Visa(ErrorCode::ErrorTmo)),
            };
            let job: vs::ViJobId = event.attribute(VI_ATTR_JOB_ID)?;
            if job == self.id.0 {
                let count: u64 = event.attribute(VI_ATTR_RET_COUNT)?;
                let status: vs::ViStatus = event.attribute(VI_ATTR_STATUS)?;
                let outcome = self
                    .session
                    .library()
                    .check(self.session.vi(), status)
                    .map(|_| count as usize);
                self.outcome = Some(outcome.as_ref().copied().map_err(|_| status));
                return outcome;
            }
            log::warn!(
                "session {}: discarding completion of job {job} while waiting for {}",
                self.session.vi(),
                self.id.0
            );
            if let Some(deadline) = deadline {
                left = deadline.saturating_duration_since(Instant::now());
                if left.is_zero() {
                    return Err(Error::Visa(ErrorCode::ErrorTmo));
                }
            }
        }
    }

    /// Waits for completion and returns the bytes transferred.
    pub fn finish(mut self, timeout: Duration) -> Result<Bytes> {
        let count = self.wait(timeout)?;
        Ok(match self.buf.take() {
            Some(JobBuffer::Read(mut buf)) => {
                buf.truncate(count);
                buf.freeze()
            }
            Some(JobBuffer::Write(data)) => data.slice(..count.min(data.len())),
            None => Bytes::new(),
        })
    }
}

fn status_error(status: vs::ViStatus) -> Error {
    match ErrorCode::try_from(status) {
        Ok(code) => Error::Visa(code),
        Err(_) => Error::UnknownStatus(status),
    }
}

impl Drop for AsyncJob<'_> {
    fn drop(&mut self) {
        if self.outcome.is_some() {
            return;
        }
        log::info!("terminating unfinished async io, job id = {}", self.id.0);
        if let Err(e) = self.session.terminate(self.id) {
            log::warn!("terminating async io: {e}");
        }
        if let Err(e) = self.wait(ABORT_GRACE) {
            log::debug!("aborted job {}: {e}", self.id.0);
        }
        if self.outcome.is_none() {
            log::warn!(
                "job {} did not report back after abort, leaking its buffer",
                self.id.0
            );
            std::mem::forget(self.buf.take());
        }
    }
}
