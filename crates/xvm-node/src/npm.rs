use std::path::{Path, PathBuf};

use async_trait::async_trait;
use log::debug;
use tokio::process::Command;
use xvm_platform::{HideWindow, Os, combined_output};
use xvm_sdk::{HookPhase, PostInstaller, XvmError};

/// Points a fresh Node install's global prefix and cache at directories
/// shared by every installed version.
pub struct NpmConfigurer {
    pub(crate) os: Os,
    pub(crate) packages: PathBuf,
    pub(crate) cache: PathBuf,
}

impl NpmConfigurer {
    fn node(&self, install_root: &Path) -> PathBuf {
        install_root.join(crate::sdk::node_tool_path(self.os))
    }

    fn npm_cli(&self, install_root: &Path) -> PathBuf {
        let modules = if self.os.is_windows() {
            install_root.join("node_modules")
        } else {
            install_root.join("lib").join("node_modules")
        };
        modules.join("npm").join("bin").join("npm-cli.js")
    }

    async fn config_set(&self, install_root: &Path, key: &str, value: &Path) -> Result<(), XvmError> {
        let node = self.node(install_root);
        debug!("npm config set {key} {}", value.display());

        let output = Command::new(&node)
            .arg(self.npm_cli(install_root))
            .args(["config", "set", key])
            .arg(value)
            .hide_window()
            .output()
            .await
            .map_err(|e| {
                XvmError::hook(
                    HookPhase::PostInstall,
                    "node",
                    format!("failed to run {}: {e}", node.display()),
                )
            })?;

        if output.status.success() {
            Ok(())
        } else {
            Err(XvmError::hook(
                HookPhase::PostInstall,
                "node",
                format!("failed to set {key}: {}", combined_output(&output)),
            ))
        }
    }
}

#[async_trait]
impl PostInstaller for NpmConfigurer {
    async fn post_install(&self, install_root: &Path) -> Result<(), XvmError> {
        for dir in [&self.packages, &self.cache] {
            tokio::fs::create_dir_all(dir)
                .await
                .map_err(|e| XvmError::io("failed to create directory", dir, &e))?;
        }
        self.config_set(install_root, "prefix", &self.packages).await?;
        self.config_set(install_root, "cache", &self.cache).await
    }
}
