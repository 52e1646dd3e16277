//! Where to find the VISA shared library.
//!
//! Lookup order:
//!
//! 1. `VISA_LIBRARY`, a path to the library itself;
//! 2. `VISA_CONFIG`, a path to a TOML file such as
//!    ```toml
//!    [paths]
//!    visa_library = "/opt/keysight/iolibs/libktvisa32.so"
//!    ```
//! 3. the platform's usual install names.

use serde::Deserialize;
use std::{
    env,
    path::{Path, PathBuf},
};

pub const LIBRARY_ENV: &str = "VISA_LIBRARY";
pub const CONFIG_ENV: &str = "VISA_CONFIG";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LibraryConfig {
    #[serde(default)]
    pub paths: Paths,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Paths {
    pub visa_library: Option<PathBuf>,
}

impl LibraryConfig {
    pub fn with_library(path: impl Into<PathBuf>) -> Self {
        Self {
            paths: Paths {
                visa_library: Some(path.into()),
            },
        }
    }

    pub fn from_toml(s: &str) -> crate::Result<Self> {
        Ok(toml::from_str(s)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> crate::Result<Self> {
        let path = path.as_ref();
        log::debug!("reading VISA configuration from {}", path.display());
        Self::from_toml(&std::fs::read_to_string(path)?)
    }

    /// Reads the configuration from the environment, see the module docs.
    pub fn from_env() -> crate::Result<Self> {
        if let Some(lib) = env::var_os(LIBRARY_ENV).filter(|v| !v.is_empty()) {
            return Ok(Self::with_library(lib));
        }
        match env::var_os(CONFIG_ENV).filter(|v| !v.is_empty()) {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Libraries to try, the configured one first.
    pub fn candidates(&self) -> Vec<PathBuf> {
        self.paths
            .visa_library
            .iter()
            .cloned()
            .chain(default_names().iter().map(PathBuf::from))
            .collect()
    }
}

fn default_names() -> &'static [&'static str] {
    if cfg!(windows) {
        if cfg!(target_pointer_width = "64") {
            &["visa64.dll", "visa32.dll"]
        } else {
            &["visa32.dll"]
        }
    } else if cfg!(target_os = "macos") {
        &["/Library/Frameworks/VISA.framework/VISA"]
    } else {
        &["libvisa.so.7", "libvisa.so"]
    }
}
