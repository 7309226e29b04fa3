use std::collections::HashSet;

use async_trait::async_trait;
use serde::Deserialize;
use xvm_platform::{API_SUFFIX, Arch, EnvVars, MIRROR_SUFFIX, Os, Platform};
use xvm_sdk::{HttpContext, Mirror, VersionDescriptor, XvmError};

const NAME: &str = "java";
const DEFAULT_API: &str = "https://api.azul.com/zulu/download/community/v1.0/bundles/";
const DEFAULT_BASE: &str = "https://cdn.azul.com/zulu/bin";

#[derive(Debug, Deserialize)]
struct Bundle {
    java_version: Vec<u64>,
    name: String,
}

/// Azul Zulu community builds. The bundle API filters by platform, so
/// every returned bundle is installable here.
pub struct ZuluMirror {
    http: HttpContext,
    platform: Platform,
    api_url: String,
    base_url: String,
}

impl ZuluMirror {
    #[must_use]
    pub fn new(http: HttpContext, platform: Platform, vars: &EnvVars) -> Self {
        Self {
            http,
            platform,
            api_url: vars.endpoint(NAME, API_SUFFIX, DEFAULT_API),
            base_url: vars.endpoint(NAME, MIRROR_SUFFIX, DEFAULT_BASE),
        }
    }
}

#[async_trait]
impl Mirror for ZuluMirror {
    fn sdk(&self) -> &str {
        NAME
    }

    fn platform(&self) -> String {
        self.platform.to_string()
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn versions(&self) -> Result<Vec<VersionDescriptor>, XvmError> {
        let params = query(self.platform);
        let params: Vec<(&str, &str)> = params.iter().map(|(k, v)| (*k, v.as_str())).collect();
        let bundles: Vec<Bundle> = self
            .http
            .fetch_json_with_query("list java versions", &format!("{}/", self.api_url), &params)
            .await?;
        Ok(select_artifacts(bundles, &self.base_url))
    }
}

/// Bundle API filter for `platform`. Architectures the API names by family
/// and bitness (`x86`/`arm` plus 64 or 32) are split accordingly.
fn query(platform: Platform) -> Vec<(&'static str, String)> {
    let os = match platform.os {
        Os::Linux => "linux",
        Os::Darwin => "macos",
        Os::Windows => "windows",
    };
    let ext = if platform.os.is_windows() { "zip" } else { "tar.gz" };
    let (arch, bitness) = match platform.arch {
        Arch::X86_64 => ("x86", "64"),
        Arch::X86 => ("x86", "32"),
        Arch::Arm64 => ("arm", "64"),
        other => (other.as_str(), ""),
    };

    let mut params = vec![
        ("os", os.to_string()),
        ("ext", ext.to_string()),
        ("bundle_type", "jdk".to_string()),
        ("arch", arch.to_string()),
    ];
    if !bitness.is_empty() {
        params.push(("hw_bitness", bitness.to_string()));
    }
    params.extend([
        ("release_status", "ga".to_string()),
        ("javafx", "false".to_string()),
    ]);
    params
}

/// One artifact per Java version, the first bundle the API lists for it.
fn select_artifacts(bundles: Vec<Bundle>, base_url: &str) -> Vec<VersionDescriptor> {
    let mut seen = HashSet::new();
    bundles
        .into_iter()
        .filter(|bundle| !bundle.java_version.is_empty())
        .filter_map(|bundle| {
            let version = bundle
                .java_version
                .iter()
                .map(u64::to_string)
                .collect::<Vec<_>>()
                .join(".");
            seen.insert(version.clone()).then(|| VersionDescriptor {
                download_url: format!("{base_url}/{}", bundle.name),
                filename: bundle.name,
                version,
                checksum: None,
            })
        })
        .collect()
}
