//! Options that decide which modes [`dispatch`](crate::dispatch) binds.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::foundation::error::{XferError, XferResult};

/// Environment variable that overrides [`DispatchOpts::legacy_non_separable_modes`].
pub const LEGACY_NON_SEPARABLE_ENV: &str = "XFERMODE_LEGACY_NON_SEPARABLE";

/// Options consulted when binding a mode to a [`Processor`](crate::Processor).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DispatchOpts {
    /// Report HardLight, Overlay, Darken and Lighten as unsupported so callers keep their scalar
    /// implementation. Defaults to the `legacy-non-separable` cargo feature.
    pub legacy_non_separable_modes: bool,
}

impl Default for DispatchOpts {
    fn default() -> Self {
        Self {
            legacy_non_separable_modes: cfg!(feature = "legacy-non-separable"),
        }
    }
}

impl DispatchOpts {
    /// Return options with the legacy flag set to `on`.
    pub fn with_legacy_non_separable_modes(mut self, on: bool) -> Self {
        self.legacy_non_separable_modes = on;
        self
    }

    /// Parse options from a JSON reader. Missing fields keep their defaults.
    pub fn from_reader<R: std::io::Read>(r: R) -> XferResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| XferError::config(format!("parse dispatch options JSON: {e}")))
    }

    /// Parse options from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> XferResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            XferError::config(format!("open dispatch options '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Apply [`LEGACY_NON_SEPARABLE_ENV`] if it is set to a recognizable boolean.
    pub fn with_env_overrides(self) -> Self {
        match std::env::var(LEGACY_NON_SEPARABLE_ENV) {
            Ok(v) => self.with_env_value(&v),
            Err(_) => self,
        }
    }

    pub(crate) fn with_env_value(mut self, raw: &str) -> Self {
        match parse_flag(raw) {
            Some(on) => self.legacy_non_separable_modes = on,
            None => tracing::warn!(
                var = LEGACY_NON_SEPARABLE_ENV,
                value = raw,
                "ignoring unrecognized boolean"
            ),
        }
        self
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
