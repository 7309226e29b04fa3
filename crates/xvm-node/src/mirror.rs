use async_trait::async_trait;
use serde::Deserialize;
use xvm_platform::{API_SUFFIX, Arch, EnvVars, MIRROR_SUFFIX, Os, Platform};
use xvm_sdk::{
    HttpContext, Mirror, PlatformFallback, VersionDescriptor, XvmError, fallback_platform,
    normalize_version,
};

const NAME: &str = "node";
const DEFAULT_BASE: &str = "https://nodejs.org/dist";

/// Apple Silicon builds start at 16.0.0.
const FALLBACKS: &[PlatformFallback] = &[PlatformFallback {
    host: Platform::new(Os::Darwin, Arch::Arm64),
    below: "16.0.0",
    substitute: Platform::new(Os::Darwin, Arch::X86_64),
}];

/// One release in `index.json`. Every listed release is a final build.
#[derive(Debug, Deserialize)]
struct Release {
    version: String,
    #[serde(default)]
    files: Vec<String>,
}

pub struct NodeMirror {
    http: HttpContext,
    platform: Platform,
    base_url: String,
    index_url: String,
}

impl NodeMirror {
    /// The index defaults to `<base>/index.json`, so overriding the mirror
    /// alone is enough.
    #[must_use]
    pub fn new(http: HttpContext, platform: Platform, vars: &EnvVars) -> Self {
        let base_url = vars.endpoint(NAME, MIRROR_SUFFIX, DEFAULT_BASE);
        let index_url = vars.endpoint(NAME, API_SUFFIX, &format!("{base_url}/index.json"));
        Self {
            http,
            platform,
            base_url,
            index_url,
        }
    }
}

#[async_trait]
impl Mirror for NodeMirror {
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
        let releases: Vec<Release> = self
            .http
            .fetch_json("list node versions", &self.index_url)
            .await?;
        Ok(select_artifacts(releases, self.platform, &self.base_url))
    }
}

fn node_arch(arch: Arch) -> &'static str {
    match arch {
        Arch::X86_64 => "x64",
        Arch::X86 => "x86",
        Arch::Arm64 => "arm64",
        Arch::Arm => "armv7l",
        Arch::Ppc64le => "ppc64le",
        Arch::S390x => "s390x",
    }
}

/// Key `index.json` lists when a build exists, e.g. `osx-arm64-tar`.
fn index_key(platform: Platform) -> String {
    let arch = node_arch(platform.arch);
    match platform.os {
        Os::Linux => format!("linux-{arch}"),
        Os::Darwin => format!("osx-{arch}-tar"),
        Os::Windows => format!("win-{arch}-zip"),
    }
}

fn artifact_name(version: &str, platform: Platform) -> String {
    let (os, ext) = match platform.os {
        Os::Linux => ("linux", "tar.gz"),
        Os::Darwin => ("darwin", "tar.gz"),
        Os::Windows => ("win", "zip"),
    };
    format!("node-v{version}-{os}-{}.{ext}", node_arch(platform.arch))
}

fn select_artifacts(releases: Vec<Release>, host: Platform, base_url: &str) -> Vec<VersionDescriptor> {
    releases
        .into_iter()
        .filter_map(|release| {
            let version = normalize_version(&release.version);
            let has = |platform: Platform| release.files.contains(&index_key(platform));
            let platform = if has(host) {
                host
            } else {
                fallback_platform(FALLBACKS, host, &version).filter(|substitute| has(*substitute))?
            };
            let filename = artifact_name(&version, platform);
            Some(VersionDescriptor {
                download_url: format!("{base_url}/v{version}/{filename}"),
                filename,
                version,
                checksum: None,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use xvm_platform::{Arch, EnvVars, Os, Platform};
    use xvm_sdk::{HttpContext, Mirror, latest};

    use super::{NodeMirror, Release, select_artifacts};

    const BASE: &str = "https://nodejs.org/dist";

    const INDEX: &str = r#"[
        {"version": "v20.11.0", "date": "2024-01-09", "files": ["linux-x64", "osx-arm64-tar", "osx-x64-tar", "win-x64-zip"], "lts": "Iron"},
        {"version": "v16.0.0", "date": "2021-04-20", "files": ["linux-x64", "osx-arm64-tar", "osx-x64-tar", "win-x64-zip"], "lts": false},
        {"version": "v14.21.3", "date": "2023-02-16", "files": ["linux-x64", "osx-x64-tar", "win-x64-zip"], "lts": "Fermium"},
        {"version": "v0.12.18", "date": "2017-02-22", "files": ["linux-x64", "osx-x64-tar"], "lts": false}
    ]"#;

    fn index() -> Vec<Release> {
        serde_json::from_str(INDEX).expect("index fixture should parse")
    }

    #[test]
    fn linux_urls_follow_dist_layout() {
        let versions = select_artifacts(index(), Platform::new(Os::Linux, Arch::X86_64), BASE);

        assert_eq!(versions.len(), 4);
        assert_eq!(versions[0].version, "20.11.0");
        assert_eq!(
            versions[0].download_url,
            "https://nodejs.org/dist/v20.11.0/node-v20.11.0-linux-x64.tar.gz"
        );
        assert_eq!(versions[0].filename, "node-v20.11.0-linux-x64.tar.gz");
    }

    #[test]
    fn apple_silicon_falls_back_to_x64_before_16() {
        let versions = select_artifacts(index(), Platform::new(Os::Darwin, Arch::Arm64), BASE);

        let by_version: HashMap<&str, &str> = versions
            .iter()
            .map(|v| (v.version.as_str(), v.filename.as_str()))
            .collect();
        assert_eq!(by_version["20.11.0"], "node-v20.11.0-darwin-arm64.tar.gz");
        assert_eq!(by_version["16.0.0"], "node-v16.0.0-darwin-arm64.tar.gz");
        assert_eq!(by_version["14.21.3"], "node-v14.21.3-darwin-x64.tar.gz");
        assert_eq!(by_version["0.12.18"], "node-v0.12.18-darwin-x64.tar.gz");
    }

    #[test]
    fn windows_gets_zip_and_skips_missing_builds() {
        let versions = select_artifacts(index(), Platform::new(Os::Windows, Arch::X86_64), BASE);

        assert_eq!(versions.len(), 3);
        assert_eq!(
            versions[2].download_url,
            "https://nodejs.org/dist/v14.21.3/node-v14.21.3-win-x64.zip"
        );
    }

    #[test]
    fn latest_is_semantic_maximum() {
        let versions = select_artifacts(index(), Platform::new(Os::Linux, Arch::X86_64), BASE);

        assert_eq!(latest(&versions).map(|v| v.version.as_str()), Some("20.11.0"));
    }

    #[test]
    fn index_follows_mirror_override() {
        let http = HttpContext::new(
            xvm_sdk::DEFAULT_CONNECT_TIMEOUT,
            xvm_sdk::DEFAULT_REQUEST_TIMEOUT,
            xvm_sdk::DEFAULT_DOWNLOAD_TIMEOUT,
        )
        .expect("http client should build");
        let vars = EnvVars::fixed([("XVM_NODE_MIRROR", "https://npmmirror.com/mirrors/node/")]);

        let mirror = NodeMirror::new(http, Platform::new(Os::Linux, Arch::X86_64), &vars);

        assert_eq!(mirror.base_url(), "https://npmmirror.com/mirrors/node");
        assert_eq!(mirror.index_url, "https://npmmirror.com/mirrors/node/index.json");
    }
}
