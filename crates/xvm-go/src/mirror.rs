use async_trait::async_trait;
use log::debug;
use serde::Deserialize;
use xvm_platform::{API_SUFFIX, Arch, EnvVars, MIRROR_SUFFIX, Os, Platform};
use xvm_sdk::{
    HttpContext, Mirror, PlatformFallback, VersionDescriptor, XvmError, fallback_platform,
    normalize_version,
};

const NAME: &str = "go";
const DEFAULT_BASE: &str = "https://go.dev/dl";
const DEFAULT_MANIFEST: &str =
    "https://raw.githubusercontent.com/actions/go-versions/main/versions-manifest.json";

/// Apple Silicon builds start at 1.16.
const FALLBACKS: &[PlatformFallback] = &[PlatformFallback {
    host: Platform::new(Os::Darwin, Arch::Arm64),
    below: "1.16.0",
    substitute: Platform::new(Os::Darwin, Arch::X86_64),
}];

#[derive(Debug, Deserialize)]
struct Release {
    version: String,
    #[serde(default)]
    stable: bool,
    #[serde(default)]
    files: Vec<ReleaseFile>,
}

#[derive(Debug, Deserialize)]
struct ReleaseFile {
    filename: String,
    arch: String,
    platform: String,
}

pub struct GoMirror {
    http: HttpContext,
    platform: Platform,
    base_url: String,
    manifest_url: String,
}

impl GoMirror {
    #[must_use]
    pub fn new(http: HttpContext, platform: Platform, vars: &EnvVars) -> Self {
        Self {
            http,
            platform,
            base_url: vars.endpoint(NAME, MIRROR_SUFFIX, DEFAULT_BASE),
            manifest_url: vars.endpoint(NAME, API_SUFFIX, DEFAULT_MANIFEST),
        }
    }
}

#[async_trait]
impl Mirror for GoMirror {
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
            .fetch_json("list go versions", &self.manifest_url)
            .await?;
        let versions = select_artifacts(releases, self.platform, &self.base_url);
        debug!("{} go versions available for {}", versions.len(), self.platform);
        Ok(versions)
    }
}

/// Manifest spelling of a platform, `None` when Go publishes no builds
/// for it.
fn manifest_platform(platform: Platform) -> Option<(&'static str, &'static str)> {
    let os = match platform.os {
        Os::Linux => "linux",
        Os::Darwin => "darwin",
        Os::Windows => "win32",
    };
    let arch = match platform.arch {
        Arch::X86_64 => "x64",
        Arch::X86 => "386",
        Arch::Arm64 => "arm64",
        Arch::Arm => "armv6l",
        Arch::Ppc64le | Arch::S390x => return None,
    };
    Some((os, arch))
}

fn find_file(release: &Release, platform: Platform) -> Option<&ReleaseFile> {
    let (os, arch) = manifest_platform(platform)?;
    release
        .files
        .iter()
        .find(|file| file.platform == os && file.arch == arch)
}

fn select_artifacts(releases: Vec<Release>, host: Platform, base_url: &str) -> Vec<VersionDescriptor> {
    releases
        .into_iter()
        .filter(|release| release.stable)
        .filter_map(|release| {
            let file = find_file(&release, host).or_else(|| {
                fallback_platform(FALLBACKS, host, &release.version)
                    .and_then(|substitute| find_file(&release, substitute))
            })?;
            Some(VersionDescriptor {
                version: normalize_version(&release.version),
                download_url: format!("{base_url}/{}", file.filename),
                filename: file.filename.clone(),
                checksum: None,
            })
        })
        .collect()
}
