mod error;
mod fallback;
mod http;
mod traits;
mod types;

pub use error::{HookPhase, LookupKind, NetworkStage, XvmError};
pub use fallback::{PlatformFallback, fallback_platform};
pub use http::{
    DEFAULT_CONNECT_TIMEOUT, DEFAULT_DOWNLOAD_TIMEOUT, DEFAULT_REQUEST_TIMEOUT, HttpContext,
};
pub use traits::{EnvironmentProvider, Mirror, PostInstaller, Preparer, ProjectManifest, Sdk};
pub use types::{
    COMPLETION_MARKER, InstalledInstance, SdkInfo, SdkVersion, Tool, VersionDescriptor,
    VersionParseError, compare_versions, complete_version, latest, normalize_version,
    select_version, version_matches,
};
