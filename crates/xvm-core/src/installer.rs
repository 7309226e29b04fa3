use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use log::debug;
use serde::Serialize;
use xvm_platform::XvmPaths;
use xvm_sdk::{HttpContext, InstalledInstance, Sdk, SdkInfo, Tool, VersionDescriptor, XvmError};

use crate::archive;
use crate::download;
use crate::linker::{Linker, OverridePolicy};
use crate::progress::{InstallProgress, InstallReporter};
use crate::registry::SdkRegistry;
use crate::resolver::{ResolveContext, resolve_version};

/// Leading archive component every supported SDK wraps its files in.
const STRIP_COMPONENTS: usize = 1;

/// A tool ready to run: which SDK provides it and where that SDK lives.
pub struct ToolBinding<'a> {
    pub sdk: &'a dyn Sdk,
    pub tool: Tool,
    pub instance: InstalledInstance,
}

impl ToolBinding<'_> {
    #[must_use]
    pub fn executable(&self) -> PathBuf {
        self.instance.install_root.join(&self.tool.path)
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CompletionRecord<'a> {
    #[serde(flatten)]
    info: &'a SdkInfo,
    version: &'a str,
    mirror: MirrorRecord<'a>,
    installed_at: DateTime<Utc>,
}

#[derive(Serialize)]
struct MirrorRecord<'a> {
    base: &'a str,
}

pub struct Installer<'a> {
    registry: &'a SdkRegistry,
    paths: &'a XvmPaths,
    http: &'a HttpContext,
    reporter: &'a dyn InstallReporter,
}

impl<'a> Installer<'a> {
    #[must_use]
    pub fn new(
        registry: &'a SdkRegistry,
        paths: &'a XvmPaths,
        http: &'a HttpContext,
        reporter: &'a dyn InstallReporter,
    ) -> Self {
        Self {
            registry,
            paths,
            http,
            reporter,
        }
    }

    /// Make sure the SDK providing `tool` is installed at the version the
    /// project wants, installing it if needed.
    ///
    /// # Errors
    /// Returns an error when the tool is unknown, no version can be chosen,
    /// or fetching, extracting or configuring the SDK fails.
    pub async fn install(
        &self,
        tool: &str,
        ctx: &ResolveContext,
    ) -> Result<ToolBinding<'a>, XvmError> {
        let (sdk, tool) = self.registry.find_tool(tool)?;

        let requested = resolve_version(ctx, sdk)?;
        let (version, latest) = if requested.is_empty() {
            let latest = sdk.mirror().latest().await?;
            debug!("No {} version requested, using latest {}", sdk.name(), latest.version);
            (latest.version.clone(), Some(latest))
        } else {
            (requested, None)
        };

        let instance = InstalledInstance::new(&self.paths.stash, sdk.name(), &version);
        if instance.is_complete() {
            return Ok(ToolBinding {
                sdk,
                tool: tool.clone(),
                instance,
            });
        }

        self.reporter.report(InstallProgress::Installing {
            sdk: sdk.name().to_string(),
            version: instance.version.clone(),
        });
        debug!("Installing {}@{}", sdk.name(), instance.version);

        remove_stale(&instance.install_root)?;
        let artifact = match latest {
            Some(artifact) => artifact,
            None => sdk.mirror().artifact(&instance.version).await?,
        };
        self.fetch(&artifact, &instance.install_root).await?;

        if let Some(post_installer) = sdk.post_installer() {
            self.reporter.report(InstallProgress::Configuring {
                sdk: sdk.name().to_string(),
            });
            post_installer.post_install(&instance.install_root).await?;
        }

        write_completion_marker(sdk, &instance)?;
        self.reporter.report(InstallProgress::Complete {
            install_root: instance.install_root.clone(),
        });

        Ok(ToolBinding {
            sdk,
            tool: tool.clone(),
            instance,
        })
    }

    async fn fetch(&self, artifact: &VersionDescriptor, install_root: &Path) -> Result<(), XvmError> {
        let url = &artifact.download_url;
        self.reporter.report(InstallProgress::Probing { url: url.clone() });
        download::probe(self.http, url).await?;

        let temp_dir = tempfile::tempdir()
            .map_err(|e| XvmError::io("failed to create temp directory", &std::env::temp_dir(), &e))?;
        debug!("Downloading {url}");
        let archive_path = download::download(self.http, url, temp_dir.path(), self.reporter).await?;

        self.reporter.report(InstallProgress::Extracting {
            destination: install_root.to_path_buf(),
        });
        debug!("Extracting to {}", install_root.display());
        archive::extract(&archive_path, install_root, STRIP_COMPONENTS)
    }

    /// Publish a shim for every tool of each named SDK. Each shim runs
    /// `<xvm_command> exec <tool>`.
    ///
    /// # Errors
    /// Returns [`XvmError::NotFound`] for an unknown SDK name and
    /// [`XvmError::Link`] when a shim cannot be written.
    pub fn link(
        &self,
        names: &[String],
        linker: &Linker,
        xvm_command: &str,
        policy: OverridePolicy,
    ) -> Result<Vec<PathBuf>, XvmError> {
        let mut shims = Vec::new();
        for name in names {
            let sdk = self.registry.sdk(name)?;
            for tool in &sdk.info().tools {
                let command = format!("{xvm_command} exec {}", tool.name);
                let shim = linker.publish(&tool.name, &self.paths.bin, &command, policy)?;
                self.reporter.report(InstallProgress::Linked {
                    tool: tool.name.clone(),
                    shim: shim.clone(),
                });
                shims.push(shim);
            }
        }
        Ok(shims)
    }

    #[must_use]
    pub fn bin_paths(&self, activated: &[String]) -> Vec<PathBuf> {
        self.registry.bin_paths(&self.paths.bin, activated)
    }
}

fn remove_stale(install_root: &Path) -> Result<(), XvmError> {
    match std::fs::remove_dir_all(install_root) {
        Ok(()) => {
            debug!("Removed incomplete install at {}", install_root.display());
            Ok(())
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(XvmError::io("failed to remove dir", install_root, &e)),
    }
}

fn write_completion_marker(sdk: &dyn Sdk, instance: &InstalledInstance) -> Result<(), XvmError> {
    let marker = instance.completion_marker();
    let record = CompletionRecord {
        info: sdk.info(),
        version: &instance.version,
        mirror: MirrorRecord {
            base: sdk.mirror().base_url(),
        },
        installed_at: Utc::now(),
    };
    let json = serde_json::to_vec_pretty(&record).map_err(|e| {
        XvmError::io(
            "failed to encode completion marker",
            &marker,
            &std::io::Error::other(e),
        )
    })?;
    std::fs::write(&marker, json)
        .map_err(|e| XvmError::io("failed to write completion marker", &marker, &e))
}
