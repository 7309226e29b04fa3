use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum XvmError {
    #[error("unknown {kind}: {name}, allows {}", .allowed.join(","))]
    NotFound {
        kind: LookupKind,
        name: String,
        allowed: Vec<String>,
    },

    #[error("Network error during {operation} ({stage}) for {url}: {details}")]
    Network {
        operation: &'static str,
        stage: NetworkStage,
        url: String,
        details: String,
    },

    #[error("No version of {sdk} is available for {platform}")]
    NoVersionAvailable { sdk: String, platform: String },

    #[error("Version {version} of {sdk} is not available for {platform}")]
    VersionNotFound {
        sdk: String,
        version: String,
        platform: String,
    },

    #[error("Unsupported archive: {}", .path.display())]
    UnsupportedArchive { path: PathBuf },

    #[error("Unable to link command {name} at {}: {details}", .path.display())]
    Link {
        name: String,
        path: PathBuf,
        details: String,
    },

    #[error("Failed to parse {}: {details}", .path.display())]
    ManifestParse { path: PathBuf, details: String },

    #[error("{context} [{}] ({kind}): {message}", .path.display())]
    Io {
        context: &'static str,
        path: PathBuf,
        kind: std::io::ErrorKind,
        message: String,
    },

    #[error("{phase} hook of {sdk} failed: {details}")]
    Hook {
        phase: HookPhase,
        sdk: String,
        details: String,
    },
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupKind {
    #[error("sdk")]
    Sdk,
    #[error("tool")]
    Tool,
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkStage {
    #[error("request")]
    Request,
    #[error("status")]
    Status,
    #[error("response parse")]
    ResponseParse,
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookPhase {
    #[error("post-install")]
    PostInstall,
    #[error("pre-run")]
    PreRun,
}

impl XvmError {
    pub fn unknown_sdk(name: impl Into<String>, allowed: Vec<String>) -> Self {
        Self::NotFound {
            kind: LookupKind::Sdk,
            name: name.into(),
            allowed,
        }
    }

    pub fn unknown_tool(name: impl Into<String>, allowed: Vec<String>) -> Self {
        Self::NotFound {
            kind: LookupKind::Tool,
            name: name.into(),
            allowed,
        }
    }

    pub fn network_request<E>(operation: &'static str, url: &str, error: E) -> Self
    where
        E: std::fmt::Display,
    {
        Self::Network {
            operation,
            stage: NetworkStage::Request,
            url: url.to_string(),
            details: error.to_string(),
        }
    }

    pub fn network_status(operation: &'static str, url: &str, status: reqwest::StatusCode) -> Self {
        Self::Network {
            operation,
            stage: NetworkStage::Status,
            url: url.to_string(),
            details: format!("HTTP {status}"),
        }
    }

    pub fn network_parse<E>(operation: &'static str, url: &str, error: E) -> Self
    where
        E: std::fmt::Display,
    {
        Self::Network {
            operation,
            stage: NetworkStage::ResponseParse,
            url: url.to_string(),
            details: error.to_string(),
        }
    }

    pub fn io(context: &'static str, path: &Path, error: &std::io::Error) -> Self {
        Self::Io {
            context,
            path: path.to_path_buf(),
            kind: error.kind(),
            message: error.to_string(),
        }
    }

    pub fn link(name: impl Into<String>, path: &Path, details: impl Into<String>) -> Self {
        Self::Link {
            name: name.into(),
            path: path.to_path_buf(),
            details: details.into(),
        }
    }

    pub fn manifest_parse(path: &Path, details: impl Into<String>) -> Self {
        Self::ManifestParse {
            path: path.to_path_buf(),
            details: details.into(),
        }
    }

    pub fn hook(phase: HookPhase, sdk: impl Into<String>, details: impl Into<String>) -> Self {
        Self::Hook {
            phase,
            sdk: sdk.into(),
            details: details.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::{HookPhase, NetworkStage, XvmError};

    #[test]
    fn not_found_lists_allowed_names() {
        let error = XvmError::unknown_tool(
            "rustc",
            vec!["go".to_string(), "node".to_string(), "npm".to_string()],
        );

        assert_eq!(error.to_string(), "unknown tool: rustc, allows go,node,npm");
    }

    #[test]
    fn io_error_keeps_context_and_path() {
        let source = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let error = XvmError::io("failed to remove dir", Path::new("/tmp/xvm/sdk/go"), &source);

        assert!(matches!(
            error,
            XvmError::Io { kind: std::io::ErrorKind::PermissionDenied, ref path, .. }
                if path == Path::new("/tmp/xvm/sdk/go")
        ));
        assert!(error.to_string().starts_with("failed to remove dir [/tmp/xvm/sdk/go]"));
    }

    #[test]
    fn network_helpers_set_expected_stage() {
        let request = XvmError::network_request("list go versions", "https://go.dev", "timed out");
        assert!(matches!(
            request,
            XvmError::Network {
                operation: "list go versions",
                stage: NetworkStage::Request,
                ..
            }
        ));

        let status = XvmError::network_status(
            "probe artifact",
            "https://go.dev/dl/go1.21.0.linux-amd64.tar.gz",
            reqwest::StatusCode::NOT_FOUND,
        );
        assert!(matches!(
            status,
            XvmError::Network { stage: NetworkStage::Status, ref details, .. } if details.contains("404")
        ));
    }

    #[test]
    fn hook_error_names_phase_and_sdk() {
        let error = XvmError::hook(HookPhase::PostInstall, "node", "npm exited with 1");

        assert_eq!(
            error.to_string(),
            "post-install hook of node failed: npm exited with 1"
        );
    }
}
