use std::path::{Path, PathBuf};

use xvm_platform::{EnvVars, Os, Platform};
use xvm_sdk::{HttpContext, Mirror, PostInstaller, Sdk, SdkInfo, Tool};

use crate::mirror::NodeMirror;
use crate::npm::NpmConfigurer;

/// Windows archives put the binaries at the top level, unix ones in `bin/`.
pub(crate) fn node_tool_path(os: Os) -> PathBuf {
    if os.is_windows() {
        PathBuf::from("node.exe")
    } else {
        Path::new("bin").join("node")
    }
}

fn npm_tool_path(os: Os) -> PathBuf {
    if os.is_windows() {
        PathBuf::from("npm.cmd")
    } else {
        Path::new("bin").join("npm")
    }
}

pub struct NodeSdk {
    info: SdkInfo,
    mirror: NodeMirror,
    npm: NpmConfigurer,
}

impl NodeSdk {
    /// Global npm packages and the npm cache live under `<data>/node`.
    #[must_use]
    pub fn new(data_dir: &Path, platform: Platform, http: HttpContext, vars: &EnvVars) -> Self {
        let os = platform.os;
        let packages = data_dir.join("node").join("npm-packages");
        let packages_bin = if os.is_windows() {
            packages.clone()
        } else {
            packages.join("bin")
        };
        Self {
            info: SdkInfo {
                name: "node".to_string(),
                tools: vec![
                    Tool::new("node", node_tool_path(os)),
                    Tool::new("npm", npm_tool_path(os)),
                ],
                bin_paths: vec![packages_bin],
            },
            mirror: NodeMirror::new(http, platform, vars),
            npm: NpmConfigurer {
                os,
                cache: data_dir.join("node").join("npm-cache"),
                packages,
            },
        }
    }
}

impl Sdk for NodeSdk {
    fn info(&self) -> &SdkInfo {
        &self.info
    }

    fn mirror(&self) -> &dyn Mirror {
        &self.mirror
    }

    fn post_installer(&self) -> Option<&dyn PostInstaller> {
        Some(&self.npm)
    }
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use xvm_platform::{Arch, EnvVars, Os, Platform};
    use xvm_sdk::{HttpContext, Sdk};

    use super::NodeSdk;

    fn sdk(os: Os) -> NodeSdk {
        let http = HttpContext::new(
            xvm_sdk::DEFAULT_CONNECT_TIMEOUT,
            xvm_sdk::DEFAULT_REQUEST_TIMEOUT,
            xvm_sdk::DEFAULT_DOWNLOAD_TIMEOUT,
        )
        .expect("http client should build");
        NodeSdk::new(
            Path::new("/home/dev/.xvm/data"),
            Platform::new(os, Arch::X86_64),
            http,
            &EnvVars::Fixed(std::collections::HashMap::new()),
        )
    }

    #[test]
    fn unix_layout() {
        let sdk = sdk(Os::Linux);

        assert_eq!(sdk.name(), "node");
        assert_eq!(sdk.version_file(), ".nodeversion");
        assert_eq!(sdk.info().tool_names(), vec!["node", "npm"]);
        assert_eq!(sdk.info().tools[1].path, PathBuf::from("bin/npm"));
        assert_eq!(
            sdk.info().bin_paths,
            vec![PathBuf::from("/home/dev/.xvm/data/node/npm-packages/bin")]
        );
        assert!(sdk.post_installer().is_some());
        assert!(sdk.environment().is_none());
        assert!(sdk.manifest().is_none());
    }

    #[test]
    fn windows_layout() {
        let sdk = sdk(Os::Windows);

        assert_eq!(sdk.info().tools[0].path, PathBuf::from("node.exe"));
        assert_eq!(sdk.info().tools[1].path, PathBuf::from("npm.cmd"));
        assert_eq!(
            sdk.info().bin_paths,
            vec![PathBuf::from("/home/dev/.xvm/data/node/npm-packages")]
        );
    }
}
