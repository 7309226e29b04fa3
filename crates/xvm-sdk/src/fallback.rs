use xvm_platform::Platform;

use crate::types::SdkVersion;

/// A legacy build to use when a host had no native artifact before some
/// release, such as Apple Silicon before Go 1.16.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlatformFallback {
    pub host: Platform,
    pub below: &'static str,
    pub substitute: Platform,
}

/// The platform whose artifact should stand in for `host` at `version`, if
/// the table has an entry covering it.
#[must_use]
pub fn fallback_platform(
    table: &[PlatformFallback],
    host: Platform,
    version: &str,
) -> Option<Platform> {
    let version = version.parse::<SdkVersion>().ok()?;
    table
        .iter()
        .filter(|entry| entry.host == host)
        .find(|entry| {
            entry
                .below
                .parse::<SdkVersion>()
                .is_ok_and(|threshold| version < threshold)
        })
        .map(|entry| entry.substitute)
}
