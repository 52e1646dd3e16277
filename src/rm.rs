//! The default resource manager: finds, parses and opens resources.

use crate::{
    config::LibraryConfig,
    enums::{
        interface::{InterfaceType, ResourceClass},
        status::ErrorCode,
    },
    flags::AccessMode,
    library::{RawVisa, VisaLibrary},
    native::NativeVisa,
    registry::{self, ClassRegistry, ResourceType},
    resources::{FromSession, VisaResource},
    rname::ResourceName,
    session::Session,
    sys::{self as vs, buf_to_string, new_visa_buf},
    timeout_ms, Error, Result, TIMEOUT_IMMEDIATE,
};
use std::{ffi::CString, fmt, sync::Arc, time::Duration};

/// What a resource name stands for.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceInfo {
    pub interface_type: InterfaceType,
    pub interface_board_number: u16,
    pub resource_class: ResourceClass,
    /// Expanded, canonical name.
    pub resource_name: String,
    pub alias: Option<String>,
}

impl From<&ResourceName> for ResourceInfo {
    fn from(name: &ResourceName) -> Self {
        Self {
            interface_type: name.interface_type(),
            interface_board_number: name.board_number().unwrap_or_default(),
            resource_class: name.resource_class(),
            resource_name: name.to_string(),
            alias: None,
        }
    }
}

fn to_cstring(s: &str) -> Result<CString> {
    CString::new(s).map_err(|_| Error::InvalidArgument(format!("`{s}` contains NUL")))
}

/// Session to the default resource manager.
///
/// When the manager is closed, the native library also closes every
/// session opened through it.
pub struct ResourceManager {
    lib: Arc<VisaLibrary>,
    session: vs::ViSession,
    open: bool,
}

impl fmt::Debug for ResourceManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceManager")
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}

impl ResourceManager {
    /// Loads the VISA library found by [`LibraryConfig::from_env`] and opens
    /// the default resource manager.
    pub fn new() -> Result<Self> {
        Self::with_config(&LibraryConfig::from_env()?)
    }

    pub fn with_config(config: &LibraryConfig) -> Result<Self> {
        let native = NativeVisa::from_config(config)?;
        Self::with_library(native)
    }

    /// Opens the default resource manager of any [`RawVisa`] backend.
    pub fn with_library(raw: impl RawVisa + 'static) -> Result<Self> {
        Self::from_library(Arc::new(VisaLibrary::new(raw)))
    }

    pub fn from_library(lib: Arc<VisaLibrary>) -> Result<Self> {
        let mut session = 0;
        lib.call(vs::VI_NULL, |raw| raw.open_default_rm(&mut session))?;
        log::debug!("opened default resource manager, session {session}");
        Ok(Self {
            lib,
            session,
            open: true,
        })
    }

    pub fn library(&self) -> &Arc<VisaLibrary> {
        &self.lib
    }

    pub fn session(&self) -> vs::ViSession {
        self.session
    }

    /// Last status a call on the manager session returned.
    pub fn last_status(&self) -> Option<vs::ViStatus> {
        self.lib.last_status(self.session)
    }

    /// Resource names matching `query`, e.g. `?*INSTR` or `GPIB?*`.
    ///
    /// Finding nothing is an empty list, not an error.
    pub fn list_resources(&self, query: &str) -> Result<Vec<String>> {
        let expr = to_cstring(query)?;
        let rm = self.session;
        let mut list: vs::ViFindList = 0;
        let mut count = 0;
        let mut desc = new_visa_buf();
        match self
            .lib
            .call(rm, |raw| raw.find_rsrc(rm, &expr, &mut list, &mut count, &mut desc))
        {
            Ok(_) => {}
            Err(Error::Visa(ErrorCode::ErrorRsrcNfound)) => return Ok(Vec::new()),
            Err(e) => return Err(e),
        }
        let mut names = Vec::with_capacity(count as usize);
        let mut listed = Ok(());
        for i in 0..count {
            if i > 0 {
                if let Err(e) = self.lib.call(list, |raw| raw.find_next(list, &mut desc)) {
                    listed = Err(e);
                    break;
                }
            }
            names.push(buf_to_string(&desc));
        }
        if list != vs::VI_NULL {
            if let Err(e) = self.lib.call(list, |raw| raw.close(list)) {
                log::warn!("closing find list {list}: {e}");
            }
            self.lib.forget(list);
        }
        listed.map(|_| names)
    }

    /// Parses a resource name, with `viParseRsrcEx` when the library has it
    /// and locally otherwise.
    pub fn resource_info(&self, name: &str) -> Result<ResourceInfo> {
        let cname = to_cstring(name)?;
        let rm = self.session;
        let (mut intf, mut board) = (0u16, 0u16);
        let (mut class, mut expanded, mut alias) = (new_visa_buf(), new_visa_buf(), new_visa_buf());
        let parsed = self.lib.call(rm, |raw| {
            raw.parse_rsrc_ex(
                rm,
                &cname,
                &mut intf,
                &mut board,
                &mut class,
                &mut expanded,
                &mut alias,
            )
        });
        match parsed {
            Ok(_) => Ok(ResourceInfo {
                interface_type: InterfaceType::try_from(intf).unwrap_or(InterfaceType::Unknown),
                interface_board_number: board,
                resource_class: buf_to_string(&class)
                    .parse()
                    .unwrap_or(ResourceClass::Unknown),
                resource_name: buf_to_string(&expanded),
                alias: Some(buf_to_string(&alias)).filter(|a| !a.is_empty()),
            }),
            Err(Error::Visa(ErrorCode::ErrorNsupOper)) => {
                log::trace!("viParseRsrcEx not available, parsing `{name}` locally");
                Ok(ResourceInfo::from(&ResourceName::parse(name)?))
            }
            Err(e) => Err(e),
        }
    }

    /// Opens a plain session, without locking and without waiting for a
    /// lock.
    pub fn open_bare_resource(&self, name: &str) -> Result<Session> {
        self.open_bare_resource_with(name, AccessMode::NO_LOCK, TIMEOUT_IMMEDIATE)
    }

    /// Opens a plain session.
    ///
    /// With [`AccessMode::EXCLUSIVE_LOCK`] the lock is taken on open, waiting
    /// up to `open_timeout` for it.
    pub fn open_bare_resource_with(
        &self,
        name: &str,
        mode: AccessMode,
        open_timeout: Duration,
    ) -> Result<Session> {
        let info = self.resource_info(name)?;
        let cname = to_cstring(name)?;
        let rm = self.session;
        let tmo = timeout_ms(open_timeout);
        let mut vi = 0;
        self.lib
            .call(rm, |raw| raw.open(rm, &cname, mode.bits(), tmo, &mut vi))?;
        log::debug!("opened session {vi} to {}", info.resource_name);
        Ok(Session::new(self.lib.clone(), vi, info))
    }

    /// Opens a session wrapped in the type registered for its resource pair,
    /// see [`registry::builtin`].
    pub fn open_resource(&self, name: &str) -> Result<Box<dyn VisaResource>> {
        self.open_resource_in(name, registry::builtin())
    }

    /// Like [`Self::open_resource`], dispatching through `registry`.
    pub fn open_resource_in(
        &self,
        name: &str,
        registry: &ClassRegistry,
    ) -> Result<Box<dyn VisaResource>> {
        let session = self.open_bare_resource(name)?;
        let info = session.info();
        let ty = registry.resolve(info.interface_type, info.resource_class);
        Ok(ty.construct(session))
    }

    /// Opens a session as a given wrapper type, e.g. `open_as::<GpibInstrument>`.
    ///
    /// Fails if `T` lacks a property of the resource, see
    /// [`ResourceType::check`].
    pub fn open_as<T: FromSession>(&self, name: &str) -> Result<T> {
        let session = self.open_bare_resource(name)?;
        let info = session.info();
        ResourceType::of::<T>().check(info.interface_type, info.resource_class)?;
        Ok(T::from_session(session))
    }

    /// Closes the manager, reporting failures that [`Drop`] would only log.
    pub fn close(mut self) -> Result<()> {
        self.close_inner()
    }

    fn close_inner(&mut self) -> Result<()> {
        if !std::mem::replace(&mut self.open, false) {
            return Ok(());
        }
        log::debug!("closing resource manager session {}", self.session);
        let rm = self.session;
        let ret = self.lib.call(rm, |raw| raw.close(rm));
        self.lib.forget(rm);
        ret.map(|_| ())
    }
}

impl Drop for ResourceManager {
    fn drop(&mut self) {
        if let Err(e) = self.close_inner() {
            log::warn!("closing resource manager {}: {e}", self.session);
        }
    }
}
