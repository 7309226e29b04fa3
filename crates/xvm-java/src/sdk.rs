use std::path::{Path, PathBuf};

use xvm_platform::{EnvVars, Platform};
use xvm_sdk::{EnvironmentProvider, HttpContext, Mirror, Sdk, SdkInfo, Tool};

use crate::distribution::java_mirror;

const TOOLS: [&str; 8] = [
    "java", "javac", "javadoc", "jsk", "jstack", "jar", "jlink", "jpackage",
];

struct JavaHome;

impl EnvironmentProvider for JavaHome {
    fn environment(&self, install_root: &Path) -> Vec<(String, String)> {
        vec![("JAVA_HOME".to_string(), install_root.display().to_string())]
    }
}

pub struct JavaSdk {
    info: SdkInfo,
    mirror: Box<dyn Mirror>,
}

impl JavaSdk {
    #[must_use]
    pub fn new(platform: Platform, http: HttpContext, vars: &EnvVars) -> Self {
        let suffix = platform.os.exe_suffix();
        let tools = TOOLS
            .iter()
            .map(|name| {
                let path: PathBuf = Path::new("bin").join(format!("{name}{suffix}"));
                Tool::new(*name, path)
            })
            .collect();
        Self {
            info: SdkInfo {
                name: "java".to_string(),
                tools,
                bin_paths: Vec::new(),
            },
            mirror: java_mirror(http, platform, vars),
        }
    }
}

impl Sdk for JavaSdk {
    fn info(&self) -> &SdkInfo {
        &self.info
    }

    fn mirror(&self) -> &dyn Mirror {
        self.mirror.as_ref()
    }

    fn environment(&self) -> Option<&dyn EnvironmentProvider> {
        Some(&JavaHome)
    }
}
