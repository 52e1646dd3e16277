//! An open VISA session and the operations every resource supports.

use crate::{
    attributes::{self, AttrId, AttrValue},
    enums::{
        assert::AssertTrigPro,
        event::{EventType, Mechanism},
        status::{CompletionCode, ErrorCode},
    },
    event::Event,
    flags::{AccessMode, FlushMode},
    library::VisaLibrary,
    rm::ResourceInfo,
    sys::{self as vs, buf_to_string, new_visa_buf},
    timeout_ms, Error, Result,
};
use std::{ffi::CString, fmt, sync::Arc, time::Duration};

/// Owned session to a resource, closed on drop.
pub struct Session {
    lib: Arc<VisaLibrary>,
    vi: vs::ViSession,
    info: ResourceInfo,
    open: bool,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("vi", &self.vi)
            .field("resource", &self.info.resource_name)
            .finish()
    }
}

/// Result of [`Session::wait_on_event`].
#[derive(Debug)]
pub struct WaitResponse {
    /// Context of the event, `None` when the wait timed out.
    pub event: Option<Event>,
    pub status: Option<CompletionCode>,
    pub timed_out: bool,
}

impl WaitResponse {
    pub fn kind(&self) -> Option<EventType> {
        self.event.as_ref().map(Event::kind)
    }
}

impl Session {
    pub(crate) fn new(lib: Arc<VisaLibrary>, vi: vs::ViSession, info: ResourceInfo) -> Self {
        Self {
            lib,
            vi,
            info,
            open: true,
        }
    }

    pub fn vi(&self) -> vs::ViSession {
        self.vi
    }

    pub fn info(&self) -> &ResourceInfo {
        &self.info
    }

    pub fn resource_name(&self) -> &str {
        &self.info.resource_name
    }

    pub fn library(&self) -> &Arc<VisaLibrary> {
        &self.lib
    }

    /// Runs a raw call on this session.
    pub(crate) fn call(
        &self,
        f: impl FnOnce(&dyn crate::RawVisa, vs::ViSession) -> vs::ViStatus,
    ) -> Result<CompletionCode> {
        let vi = self.vi;
        self.lib.call(vi, |raw| f(raw, vi))
    }

    /// Last status a call on this session returned.
    pub fn last_status(&self) -> Option<vs::ViStatus> {
        self.lib.last_status(self.vi)
    }

    fn applicable(&self, id: AttrId) -> Result<&'static attributes::AttributeDescriptor> {
        let desc = attributes::builtin().descriptor(id)?;
        let (intf, class) = (self.info.interface_type, self.info.resource_class);
        if !desc.applies_to(intf, class) {
            return Err(Error::NotApplicable {
                name: desc.name,
                target: format!("{intf} {class}"),
            });
        }
        Ok(desc)
    }

    /// Reads an attribute, checking first that it applies to this resource.
    pub fn get_attribute(&self, id: AttrId) -> Result<AttrValue> {
        self.applicable(id)?;
        attributes::builtin().get(&self.lib, self.vi, id)
    }

    /// Reads an attribute and converts it, e.g. to an enum of
    /// [`crate::enums::attribute`].
    pub fn attribute<T>(&self, id: AttrId) -> Result<T>
    where
        T: TryFrom<AttrValue, Error = Error>,
    {
        T::try_from(self.get_attribute(id)?)
    }

    /// Validates and writes an attribute. Invalid values never reach the
    /// native library.
    pub fn set_attribute(&self, id: AttrId, value: impl Into<AttrValue>) -> Result<()> {
        self.applicable(id)?;
        attributes::builtin().set(&self.lib, self.vi, id, value.into())
    }

    /// Establishes an access mode to the specified resources.
    ///
    /// This operation is used to obtain a lock on the specified resource. The caller can specify the type of lock requested (exclusive or shared) and the length of time the operation will suspend while waiting to acquire the lock before timing out. This operation can also be used for sharing and nesting locks.
    ///
    /// The session that gained a shared lock can pass the access key to other sessions for the purpose of sharing the lock. The session wanting to join the group of sessions sharing the lock can use the key as `requested_key`.
    ///
    /// Locks nest: each call increases a lock count that [`Self::unlock`] decreases, the resource is unlocked when the count is back at 0.
    ///
    /// Returns the access key for shared locks.
    ///
    /// see also [`Self::lock_exclusive`], [`Self::lock_shared`]
    pub fn lock(
        &self,
        mode: AccessMode,
        timeout: Duration,
        requested_key: Option<&str>,
    ) -> Result<Option<String>> {
        let requested = requested_key
            .map(|k| {
                CString::new(k).map_err(|_| Error::InvalidArgument(format!("lock key `{k}` contains NUL")))
            })
            .transpose()?;
        let tmo = timeout_ms(timeout);
        if mode.contains(AccessMode::SHARED_LOCK) {
            let mut key = new_visa_buf();
            self.call(|raw, vi| {
                raw.lock(vi, mode.bits(), tmo, requested.as_deref(), Some(&mut key))
            })?;
            Ok(Some(buf_to_string(&key)))
        } else {
            self.call(|raw, vi| raw.lock(vi, mode.bits(), tmo, None, None))?;
            Ok(None)
        }
    }

    pub fn lock_exclusive(&self, timeout: Duration) -> Result<()> {
        self.lock(AccessMode::EXCLUSIVE_LOCK, timeout, None)?;
        Ok(())
    }

    /// Acquires a shared lock, joining the group holding `key` if given.
    pub fn lock_shared(&self, timeout: Duration, key: Option<&str>) -> Result<String> {
        Ok(self
            .lock(AccessMode::SHARED_LOCK, timeout, key)?
            .unwrap_or_default())
    }

    ///Relinquishes a lock for the specified resource.
    pub fn unlock(&self) -> Result<()> {
        self.call(|raw, vi| raw.unlock(vi))?;
        Ok(())
    }

    /// Clears the device input and output buffers.
    pub fn clear(&self) -> Result<()> {
        self.call(|raw, vi| raw.clear(vi))?;
        Ok(())
    }

    ///Manually flushes the specified buffers associated with formatted I/O operations and/or serial communication.
    pub fn flush(&self, mode: FlushMode) -> Result<()> {
        self.call(|raw, vi| raw.flush(vi, mode.bits()))?;
        Ok(())
    }

    /// Reads a status byte of the service request.
    ///
    /// The IEEE 488.2 standard defines several bit assignments in the status byte. For example, if bit 6 of the status is set, the device is requesting service. Bit 4, the Message Available bit (MAV), is set when the device is ready to send previously queried data. Bit 5, the Event Status bit (ESB), is set if one or more of the enabled 488.2 events occurs.
    pub fn read_stb(&self) -> Result<u16> {
        let mut stb = 0;
        self.call(|raw, vi| raw.read_stb(vi, &mut stb))?;
        Ok(stb)
    }

    /// Asserts a software or hardware trigger.
    pub fn assert_trigger(&self, protocol: AssertTrigPro) -> Result<()> {
        self.call(|raw, vi| raw.assert_trigger(vi, protocol.into()))?;
        Ok(())
    }

    /// User-readable description of a status code, as given by the library.
    pub fn status_desc(&self, status: vs::ViStatus) -> Result<String> {
        let mut desc = new_visa_buf();
        self.call(|raw, vi| raw.status_desc(vi, status, &mut desc))?;
        Ok(buf_to_string(&desc))
    }

    /// One `viRead` into `buf`, returning the count and completion code.
    pub fn read_into(&self, buf: &mut [u8]) -> Result<(usize, CompletionCode)> {
        let mut ret = 0;
        let code = self.call(|raw, vi| raw.read(vi, buf, &mut ret))?;
        Ok((ret as usize, code))
    }

    /// One `viWrite` of `buf`, returning the count written.
    pub fn write_from(&self, buf: &[u8]) -> Result<usize> {
        let mut ret = 0;
        self.call(|raw, vi| raw.write(vi, buf, &mut ret))?;
        Ok(ret as usize)
    }

    ///Enables notification of a specified event.
    ///
    /// Only [`Mechanism::Queue`] is serviced by this crate; queued events are
    /// collected with [`Self::wait_on_event`].
    pub fn enable_event(&self, event: EventType, mechanism: Mechanism) -> Result<()> {
        self.call(|raw, vi| raw.enable_event(vi, event.into(), mechanism.into(), vs::VI_NULL))?;
        Ok(())
    }

    /// Disables notification of the specified event type(s) via the specified mechanism(s).
    ///
    /// Event occurrences already in the queue are not flushed, use
    /// [`Self::discard_events`] for that.
    pub fn disable_event(&self, event: EventType, mechanism: Mechanism) -> Result<()> {
        self.call(|raw, vi| raw.disable_event(vi, event.into(), mechanism.into()))?;
        Ok(())
    }

    /// Discards event occurrences for specified event types and mechanisms in a session.
    pub fn discard_events(&self, event: EventType, mechanism: Mechanism) -> Result<()> {
        self.call(|raw, vi| raw.discard_events(vi, event.into(), mechanism.into()))?;
        Ok(())
    }

    /// Waits for an occurrence of the specified event for a given session.
    ///
    /// You can wait only for events that have been enabled with [`Self::enable_event`]. With [`EventType::AllEnabledEvents`] the operation waits for any enabled event. [`crate::TIMEOUT_IMMEDIATE`] dequeues an event without suspending.
    ///
    /// A timeout is not an error: the response has `timed_out` set and no
    /// event.
    pub fn wait_on_event(&self, event: EventType, timeout: Duration) -> Result<WaitResponse> {
        let mut out_kind: vs::ViEventType = 0;
        let mut context: vs::ViEvent = 0;
        let tmo = timeout_ms(timeout);
        let status = self.call(|raw, vi| {
            raw.wait_on_event(vi, event.into(), tmo, &mut out_kind, &mut context)
        });
        let status = match status {
            Ok(status) => status,
            Err(Error::Visa(ErrorCode::ErrorTmo)) => {
                return Ok(WaitResponse {
                    event: None,
                    status: None,
                    timed_out: true,
                })
            }
            Err(e) => return Err(e),
        };
        let event = Event::new(self.lib.clone(), context, out_kind)?;
        Ok(WaitResponse {
            event: Some(event),
            status: Some(status),
            timed_out: false,
        })
    }

    /// Closes the session, reporting failures that [`Drop`] would only log.
    pub fn close(mut self) -> Result<()> {
        self.close_inner()
    }

    fn close_inner(&mut self) -> Result<()> {
        if !std::mem::replace(&mut self.open, false) {
            return Ok(());
        }
        log::debug!("closing session {} to {}", self.vi, self.info.resource_name);
        let vi = self.vi;
        let ret = self.lib.call(vi, |raw| raw.close(vi));
        self.lib.forget(vi);
        ret.map(|_| ())
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        if let Err(e) = self.close_inner() {
            log::warn!("closing session {}: {e}", self.vi);
        }
    }
}
