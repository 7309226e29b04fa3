use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use semver::Version;

pub const COMPLETION_MARKER: &str = ".done";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tool {
    pub name: String,
    pub path: PathBuf,
}

impl Tool {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SdkInfo {
    pub name: String,
    pub tools: Vec<Tool>,
    pub bin_paths: Vec<PathBuf>,
}

impl SdkInfo {
    #[must_use]
    pub fn tool(&self, name: &str) -> Option<&Tool> {
        self.tools.iter().find(|tool| tool.name == name)
    }

    #[must_use]
    pub fn tool_names(&self) -> Vec<String> {
        self.tools.iter().map(|tool| tool.name.clone()).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionDescriptor {
    pub version: String,
    pub download_url: String,
    pub filename: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checksum: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstalledInstance {
    pub sdk_name: String,
    pub version: String,
    pub install_root: PathBuf,
}

impl InstalledInstance {
    /// The install root is `<stash>/<sdk>/<version>` and nothing else.
    #[must_use]
    pub fn new(stash: &Path, sdk_name: &str, version: &str) -> Self {
        let version = normalize_version(version);
        Self {
            install_root: stash.join(sdk_name).join(&version),
            sdk_name: sdk_name.to_string(),
            version,
        }
    }

    #[must_use]
    pub fn completion_marker(&self) -> PathBuf {
        self.install_root.join(COMPLETION_MARKER)
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.completion_marker().exists()
    }
}

/// Trims whitespace and a single leading `v`.
#[must_use]
pub fn normalize_version(raw: &str) -> String {
    let trimmed = raw.trim();
    trimmed.strip_prefix('v').unwrap_or(trimmed).to_string()
}

/// Appends a `.0` patch component to `major.minor` versions.
#[must_use]
pub fn complete_version(raw: &str) -> String {
    let version = normalize_version(raw);
    let (core, suffix) = split_core_and_suffix(&version);
    let numeric = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
    let parts: Vec<&str> = core.split('.').collect();
    if parts.len() == 2 && parts.iter().all(|part| numeric(part)) {
        format!("{core}.0{suffix}")
    } else {
        version
    }
}

/// Whether `candidate` is `requested` itself or a release under the
/// dotted prefix `requested` (`17` matches `17.0.9`, not `170.1`).
#[must_use]
pub fn version_matches(requested: &str, candidate: &str) -> bool {
    candidate == requested
        || candidate
            .strip_prefix(requested)
            .is_some_and(|rest| rest.starts_with('.'))
}

/// Orderable version: a semver core plus any numeric components past the
/// third (Zulu publishes `17.0.9.1`-style builds).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SdkVersion {
    core: Version,
    extra: Vec<u64>,
}

impl SdkVersion {
    #[must_use]
    pub fn core(&self) -> &Version {
        &self.core
    }
}

impl Ord for SdkVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.core
            .cmp(&other.core)
            .then_with(|| self.extra.cmp(&other.extra))
    }
}

impl PartialOrd for SdkVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for SdkVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.core)?;
        for part in &self.extra {
            write!(f, ".{part}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, thiserror::Error)]
#[error("Invalid version: {input}")]
pub struct VersionParseError {
    input: String,
}

impl FromStr for SdkVersion {
    type Err = VersionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || VersionParseError {
            input: s.to_string(),
        };
        let version = normalize_version(s);
        let (core, suffix) = split_core_and_suffix(&version);

        let parts = core
            .split('.')
            .map(str::parse::<u64>)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| invalid())?;
        let (major, minor, patch) = match parts.as_slice() {
            [major] => (*major, 0, 0),
            [major, minor] => (*major, *minor, 0),
            [major, minor, patch, ..] => (*major, *minor, *patch),
            [] => return Err(invalid()),
        };

        let core = Version::parse(&format!("{major}.{minor}.{patch}{suffix}"))
            .map_err(|_| invalid())?;
        let extra = parts.get(3..).map(<[u64]>::to_vec).unwrap_or_default();

        Ok(Self { core, extra })
    }
}

/// Semantic ordering; unparseable versions sort below parseable ones.
#[must_use]
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    match (a.parse::<SdkVersion>(), b.parse::<SdkVersion>()) {
        (Ok(a), Ok(b)) => a.cmp(&b),
        (Ok(_), Err(_)) => Ordering::Greater,
        (Err(_), Ok(_)) => Ordering::Less,
        (Err(_), Err(_)) => a.cmp(b),
    }
}

#[must_use]
pub fn latest(versions: &[VersionDescriptor]) -> Option<&VersionDescriptor> {
    versions
        .iter()
        .max_by(|a, b| compare_versions(&a.version, &b.version))
}

/// Exact match first, otherwise the highest version under the requested
/// dotted prefix.
#[must_use]
pub fn select_version<'a>(
    versions: &'a [VersionDescriptor],
    requested: &str,
) -> Option<&'a VersionDescriptor> {
    let requested = normalize_version(requested);
    versions
        .iter()
        .find(|candidate| candidate.version == requested)
        .or_else(|| {
            versions
                .iter()
                .filter(|candidate| version_matches(&requested, &candidate.version))
                .max_by(|a, b| compare_versions(&a.version, &b.version))
        })
}

fn split_core_and_suffix(version: &str) -> (&str, &str) {
    let suffix_idx = version.find(['-', '+']).unwrap_or(version.len());
    (&version[..suffix_idx], &version[suffix_idx..])
}
