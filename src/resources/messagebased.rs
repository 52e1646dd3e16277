//! Message-based I/O: terminated reads and writes on top of `viRead` and
//! `viWrite`.

use super::VisaResource;
use crate::{
    attributes::{VI_ATTR_SEND_END_EN, VI_ATTR_TERMCHAR, VI_ATTR_TERMCHAR_EN},
    enums::{assert::AssertTrigPro, status::CompletionCode},
    map_to_io_err,
    session::Session,
    termination::TerminationSpec,
    Error, Result,
};
use bytes::{Bytes, BytesMut};
use std::{io, thread, time::Duration};

/// Client-side settings of a message-based resource.
#[derive(Debug, Clone, PartialEq)]
pub struct IoSettings {
    /// Stripped from strings returned by [`MessageBased::read`]. Its last
    /// character is the `VI_ATTR_TERMCHAR` of the session.
    pub read_termination: Option<String>,
    /// Appended by [`MessageBased::write`].
    pub write_termination: String,
    /// Bytes requested per `viRead`.
    pub chunk_size: usize,
    /// Pause between the write and the read of [`MessageBased::query`].
    pub query_delay: Duration,
    /// Pause after each [`MessageBased::write`].
    pub write_delay: Duration,
}

impl Default for IoSettings {
    fn default() -> Self {
        Self {
            read_termination: None,
            write_termination: "\r\n".to_string(),
            chunk_size: 20 * 1024,
            query_delay: Duration::ZERO,
            write_delay: Duration::ZERO,
        }
    }
}

/// Sets `VI_ATTR_TERMCHAR` and `VI_ATTR_TERMCHAR_EN` after a read termination.
pub(crate) fn apply_read_termination(session: &Session, termination: Option<&str>) -> Result<()> {
    let bytes = termination.map(str::as_bytes).unwrap_or_default();
    let Some((&last, rest)) = bytes.split_last() else {
        return session.set_attribute(VI_ATTR_TERMCHAR_EN, false);
    };
    if !bytes.is_ascii() {
        return Err(Error::InvalidArgument(format!(
            "read termination {:?} is not ASCII",
            termination.unwrap_or_default()
        )));
    }
    if rest.contains(&last) {
        return Err(Error::InvalidArgument(format!(
            "ambiguous ending in read termination {:?}",
            termination.unwrap_or_default()
        )));
    }
    session.set_attribute(VI_ATTR_TERMCHAR, last)?;
    session.set_attribute(VI_ATTR_TERMCHAR_EN, true)
}

/// Resources talking in messages: GPIB, serial, TCPIP, USB and VXI
/// instruments.
///
/// `dyn MessageBased` also implements [`io::Read`] and [`io::Write`], reading
/// and writing raw bytes.
pub trait MessageBased: VisaResource {
    fn io_settings(&self) -> &IoSettings;

    fn io_settings_mut(&mut self) -> &mut IoSettings;

    fn read_termination(&self) -> Option<&str> {
        self.io_settings().read_termination.as_deref()
    }

    /// Sets the read termination, `None` or `""` to read until END.
    fn set_read_termination(&mut self, termination: Option<&str>) -> Result<()> {
        apply_read_termination(self.session(), termination)?;
        self.io_settings_mut().read_termination =
            termination.filter(|t| !t.is_empty()).map(str::to_string);
        Ok(())
    }

    fn write_termination(&self) -> &str {
        &self.io_settings().write_termination
    }

    fn set_write_termination(&mut self, termination: &str) {
        self.io_settings_mut().write_termination = termination.to_string();
    }

    fn chunk_size(&self) -> usize {
        self.io_settings().chunk_size
    }

    fn set_chunk_size(&mut self, size: usize) -> Result<()> {
        if size == 0 {
            return Err(Error::InvalidArgument("chunk size must not be 0".to_string()));
        }
        self.io_settings_mut().chunk_size = size;
        Ok(())
    }

    fn query_delay(&self) -> Duration {
        self.io_settings().query_delay
    }

    fn set_query_delay(&mut self, delay: Duration) {
        self.io_settings_mut().query_delay = delay;
    }

    fn write_delay(&self) -> Duration {
        self.io_settings().write_delay
    }

    fn set_write_delay(&mut self, delay: Duration) {
        self.io_settings_mut().write_delay = delay;
    }

    /// Applies a [`TerminationSpec`] such as `"\r NOEND DELAY 0.5"`.
    ///
    /// The terminator becomes both read and write termination, `END`/`NOEND`
    /// sets `VI_ATTR_SEND_END_EN` and the delay is waited after each write.
    /// Parts left out of the spec are not touched.
    fn set_termination(&mut self, spec: &str) -> Result<TerminationSpec> {
        let spec = TerminationSpec::parse(spec)?;
        if let Some(term) = &spec.terminator {
            self.set_read_termination(Some(term))?;
            self.set_write_termination(term);
        }
        if let Some(send_end) = spec.send_end {
            self.session().set_attribute(VI_ATTR_SEND_END_EN, send_end)?;
        }
        if let Some(delay) = spec.delay {
            self.set_write_delay(delay);
        }
        Ok(spec)
    }

    /// Writes all of `data`, returning the number of bytes written.
    fn write_raw(&self, data: &[u8]) -> Result<usize> {
        let mut written = 0;
        while written < data.len() {
            let n = self.session().write_from(&data[written..])?;
            if n == 0 {
                return Err(io::Error::from(io::ErrorKind::WriteZero).into());
            }
            written += n;
        }
        Ok(written)
    }

    /// Writes `message` followed by the write termination.
    fn write(&self, message: &str) -> Result<usize> {
        let term = self.write_termination();
        if !term.is_empty() && message.ends_with(term) {
            log::warn!("write message already ends with termination characters");
        }
        let n = self.write_raw(format!("{message}{term}").as_bytes())?;
        let delay = self.write_delay();
        if !delay.is_zero() {
            thread::sleep(delay);
        }
        Ok(n)
    }

    /// Reads until END, the termination character or an error, `chunk_size`
    /// bytes at a time (or `size` if given).
    fn read_raw(&self, size: Option<usize>) -> Result<Bytes> {
        let chunk = size.unwrap_or_else(|| self.chunk_size()).max(1);
        let session = self.session();
        let _quiet = session
            .library()
            .ignore_warning(session.vi(), &[CompletionCode::SuccessMaxCnt]);
        let mut out = BytesMut::new();
        loop {
            let start = out.len();
            out.resize(start + chunk, 0);
            let (n, code) = session.read_into(&mut out[start..])?;
            out.truncate(start + n);
            if code != CompletionCode::SuccessMaxCnt {
                break;
            }
        }
        Ok(out.freeze())
    }

    /// Reads exactly `count` bytes, or fewer when `break_on_termchar` is set
    /// and the message ends first.
    fn read_bytes(&self, count: usize, break_on_termchar: bool) -> Result<Bytes> {
        let chunk = self.chunk_size().max(1);
        let session = self.session();
        let _quiet = session
            .library()
            .ignore_warning(session.vi(), &[CompletionCode::SuccessMaxCnt]);
        let mut out = BytesMut::with_capacity(count);
        while out.len() < count {
            let start = out.len();
            out.resize(start + chunk.min(count - start), 0);
            let (n, code) = session.read_into(&mut out[start..])?;
            out.truncate(start + n);
            let ended = matches!(
                code,
                CompletionCode::Success | CompletionCode::SuccessTermChar
            );
            if n == 0 || (break_on_termchar && ended) {
                break;
            }
        }
        Ok(out.freeze())
    }

    /// Reads a message as text, without its read termination.
    fn read(&self) -> Result<String> {
        let data = self.read_raw(None)?;
        let text = String::from_utf8_lossy(&data);
        Ok(match self.read_termination() {
            Some(term) => match text.strip_suffix(term) {
                Some(stripped) => stripped.to_string(),
                None => {
                    log::warn!("read string doesn't end with termination characters");
                    text.into_owned()
                }
            },
            None => text.into_owned(),
        })
    }

    /// Writes `message` then reads the answer, waiting `delay` (or
    /// `query_delay`) in between.
    fn query(&self, message: &str, delay: Option<Duration>) -> Result<String> {
        self.write(message)?;
        let delay = delay.unwrap_or_else(|| self.query_delay());
        if !delay.is_zero() {
            thread::sleep(delay);
        }
        self.read()
    }

    /// See [`Session::read_stb`].
    fn read_stb(&self) -> Result<u16> {
        self.session().read_stb()
    }

    /// Sends a software trigger, see [`Session::assert_trigger`].
    fn assert_trigger(&self) -> Result<()> {
        self.session().assert_trigger(AssertTrigPro::Default)
    }
}

/// Implements [`MessageBased`] for a `message_based` wrapper. Extra items
/// override the provided methods.
macro_rules! impl_message_based {
    ($name:ident $({ $($item:item)* })?) => {
        impl $crate::resources::MessageBased for $name {
            fn io_settings(&self) -> &$crate::resources::IoSettings {
                &self.io
            }

            fn io_settings_mut(&mut self) -> &mut $crate::resources::IoSettings {
                &mut self.io
            }

            $($($item)*)?
        }
    };
}

pub(crate) use impl_message_based;

impl<'a> io::Read for dyn MessageBased + 'a {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let session = self.session();
        let _quiet = session
            .library()
            .ignore_warning(session.vi(), &[CompletionCode::SuccessMaxCnt]);
        let (n, _) = session.read_into(buf).map_err(map_to_io_err)?;
        Ok(n)
    }
}

impl<'a> io::Write for dyn MessageBased + 'a {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.session().write_from(buf).map_err(map_to_io_err)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.session()
            .flush(crate::flags::FlushMode::IO_OUT_BUF)
            .map_err(map_to_io_err)
    }
}
