use std::path::{Path, PathBuf};

use xvm_platform::{EnvVars, Platform};
use xvm_sdk::{EnvironmentProvider, HttpContext, Mirror, ProjectManifest, Sdk, SdkInfo, Tool};

use crate::gomod::GoModManifest;
use crate::mirror::GoMirror;

struct GoEnvironment {
    gopath: PathBuf,
}

impl EnvironmentProvider for GoEnvironment {
    fn environment(&self, install_root: &Path) -> Vec<(String, String)> {
        vec![
            ("GOROOT".to_string(), install_root.display().to_string()),
            ("GOPATH".to_string(), self.gopath.display().to_string()),
        ]
    }
}

pub struct GoSdk {
    info: SdkInfo,
    mirror: GoMirror,
    environment: GoEnvironment,
}

impl GoSdk {
    /// Go installs keep the user's workspace at `<home>/go`.
    #[must_use]
    pub fn new(home: &Path, platform: Platform, http: HttpContext, vars: &EnvVars) -> Self {
        let gopath = home.join("go");
        let tool_path = Path::new("bin").join(format!("go{}", platform.os.exe_suffix()));
        Self {
            info: SdkInfo {
                name: "go".to_string(),
                tools: vec![Tool::new("go", tool_path)],
                bin_paths: vec![gopath.join("bin")],
            },
            mirror: GoMirror::new(http, platform, vars),
            environment: GoEnvironment { gopath },
        }
    }
}

impl Sdk for GoSdk {
    fn info(&self) -> &SdkInfo {
        &self.info
    }

    fn mirror(&self) -> &dyn Mirror {
        &self.mirror
    }

    fn manifest(&self) -> Option<&dyn ProjectManifest> {
        Some(&GoModManifest)
    }

    fn environment(&self) -> Option<&dyn EnvironmentProvider> {
        Some(&self.environment)
    }
}
