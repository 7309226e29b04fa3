use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use thiserror::Error;
use xvm_sdk::{HttpContext, XvmError};

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings [{}]: {source}", .path.display())]
    Read {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse settings [{}]: {source}", .path.display())]
    Parse {
        path: std::path::PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to write settings [{}]: {source}", .path.display())]
    Write {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub sdks: Vec<String>,

    #[serde(default = "default_connect_timeout")]
    pub http_connect_timeout_secs: u64,

    #[serde(default = "default_http_timeout")]
    pub http_timeout_secs: u64,

    #[serde(default = "default_download_timeout")]
    pub download_timeout_secs: u64,
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_http_timeout() -> u64 {
    30
}

fn default_download_timeout() -> u64 {
    30 * 60
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sdks: Vec::new(),
            http_connect_timeout_secs: default_connect_timeout(),
            http_timeout_secs: default_http_timeout(),
            download_timeout_secs: default_download_timeout(),
        }
    }
}

impl Settings {
    /// A missing file yields the defaults; an unreadable or malformed one is
    /// an error.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(SettingsError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        serde_json::from_str(&content).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        let write_error = |source| SettingsError::Write {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(write_error)?;
        }

        let content = serde_json::to_string_pretty(self).map_err(|e| write_error(e.into()))?;
        std::fs::write(path, content).map_err(write_error)
    }

    /// Appends the names not yet activated, keeping the existing order.
    pub fn activate<S: AsRef<str>>(&mut self, names: &[S]) {
        for name in names {
            let name = name.as_ref();
            if !self.sdks.iter().any(|sdk| sdk == name) {
                self.sdks.push(name.to_string());
            }
        }
    }

    pub fn http_context(&self) -> Result<HttpContext, XvmError> {
        HttpContext::new(
            Duration::from_secs(self.http_connect_timeout_secs),
            Duration::from_secs(self.http_timeout_secs),
            Duration::from_secs(self.download_timeout_secs),
        )
    }
}
