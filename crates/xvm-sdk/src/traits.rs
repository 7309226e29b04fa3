use async_trait::async_trait;
use std::path::Path;

use crate::error::XvmError;
use crate::types::{SdkInfo, VersionDescriptor, latest, select_version};

/// A source of platform-matched artifacts for one SDK.
#[async_trait]
pub trait Mirror: Send + Sync {
    /// Name of the SDK this mirror serves, used in error messages.
    fn sdk(&self) -> &str;

    /// Platform label (for example `darwin/arm64`) used in error messages.
    fn platform(&self) -> String;

    fn base_url(&self) -> &str;

    /// Stable versions that have an artifact for the running platform.
    async fn versions(&self) -> Result<Vec<VersionDescriptor>, XvmError>;

    async fn latest(&self) -> Result<VersionDescriptor, XvmError> {
        let versions = self.versions().await?;
        latest(&versions)
            .cloned()
            .ok_or_else(|| XvmError::NoVersionAvailable {
                sdk: self.sdk().to_string(),
                platform: self.platform(),
            })
    }

    async fn artifact(&self, version: &str) -> Result<VersionDescriptor, XvmError> {
        let versions = self.versions().await?;
        select_version(&versions, version)
            .cloned()
            .ok_or_else(|| XvmError::VersionNotFound {
                sdk: self.sdk().to_string(),
                version: version.to_string(),
                platform: self.platform(),
            })
    }
}

/// A project file that pins a toolchain version, such as `go.mod`.
pub trait ProjectManifest: Send + Sync {
    fn file_name(&self) -> &'static str;

    /// `Ok(None)` when the manifest does not name a version.
    ///
    /// # Errors
    /// Returns [`XvmError::ManifestParse`] when the manifest is malformed.
    fn parse_version(&self, path: &Path, contents: &str) -> Result<Option<String>, XvmError>;
}

pub trait EnvironmentProvider: Send + Sync {
    fn environment(&self, install_root: &Path) -> Vec<(String, String)>;
}

pub trait Preparer: Send + Sync {
    /// Runs before every tool invocation.
    ///
    /// # Errors
    /// Returns an error when the install cannot be prepared for running.
    fn prepare(&self, install_root: &Path) -> Result<(), XvmError>;
}

#[async_trait]
pub trait PostInstaller: Send + Sync {
    /// Runs once after extraction, before the completion marker is written.
    ///
    /// # Errors
    /// Returns an error when configuring the fresh install fails.
    async fn post_install(&self, install_root: &Path) -> Result<(), XvmError>;
}

pub trait Sdk: Send + Sync {
    fn info(&self) -> &SdkInfo;

    fn mirror(&self) -> &dyn Mirror;

    fn name(&self) -> &str {
        &self.info().name
    }

    fn version_file(&self) -> String {
        format!(".{}version", self.info().name)
    }

    fn manifest(&self) -> Option<&dyn ProjectManifest> {
        None
    }

    fn environment(&self) -> Option<&dyn EnvironmentProvider> {
        None
    }

    fn preparer(&self) -> Option<&dyn Preparer> {
        None
    }

    fn post_installer(&self) -> Option<&dyn PostInstaller> {
        None
    }
}
