mod commands;
mod environment;
mod paths;
mod platform;

pub use commands::{HideWindow, combined_output};
pub use environment::{API_SUFFIX, EnvVars, MIRROR_SUFFIX, VERSION_SUFFIX, sdk_var_name};
pub use paths::{XvmPaths, XvmPathsError};
pub use platform::{Arch, Os, Platform, PlatformError};
