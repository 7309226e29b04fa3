use std::path::{Path, PathBuf};

use log::debug;
use xvm_platform::{EnvVars, VERSION_SUFFIX};
use xvm_sdk::{Sdk, XvmError, complete_version, normalize_version};

/// Everything version resolution reads from the outside world.
#[derive(Debug, Clone)]
pub struct ResolveContext {
    pub working_dir: PathBuf,
    pub home: PathBuf,
    pub vars: EnvVars,
}

impl ResolveContext {
    /// Context for the running process: its working directory and live
    /// environment.
    ///
    /// # Errors
    /// Returns an error when the working directory cannot be read.
    pub fn from_process(home: &Path) -> Result<Self, XvmError> {
        let working_dir = std::env::current_dir()
            .map_err(|e| XvmError::io("failed to read working directory", Path::new("."), &e))?;
        Ok(Self {
            working_dir,
            home: home.to_path_buf(),
            vars: EnvVars::Process,
        })
    }

    /// The nearest ancestor of the working directory containing `.git`, or
    /// the working directory itself.
    #[must_use]
    pub fn repository_root(&self) -> PathBuf {
        git_root(&self.working_dir)
    }

    fn project_dirs(&self) -> Vec<PathBuf> {
        let root = self.repository_root();
        let mut dirs = vec![self.working_dir.clone()];
        if root != self.working_dir {
            dirs.push(root);
        }
        dirs
    }
}

#[must_use]
pub fn git_root(start: &Path) -> PathBuf {
    start
        .ancestors()
        .find(|dir| dir.join(".git").exists())
        .unwrap_or(start)
        .to_path_buf()
}

/// Decide which version of `sdk` the current project wants. An empty string
/// means no preference.
///
/// Precedence: `XVM_<SDK>_VERSION`, then the first marker file found in the
/// working directory, repository root and home directory, then the SDK's
/// project manifest in the working directory and repository root.
///
/// # Errors
/// Returns an error when a marker file exists but cannot be read, or when a
/// project manifest is malformed.
pub fn resolve_version(ctx: &ResolveContext, sdk: &dyn Sdk) -> Result<String, XvmError> {
    if let Some(version) = ctx.vars.sdk_var(sdk.name(), VERSION_SUFFIX) {
        debug!("{} version {version} set by environment", sdk.name());
        return Ok(normalize_version(&version));
    }

    if let Some(version) = version_from_marker(ctx, &sdk.version_file())? {
        return Ok(version);
    }

    if let Some(manifest) = sdk.manifest() {
        for dir in ctx.project_dirs() {
            let path = dir.join(manifest.file_name());
            if !path.is_file() {
                continue;
            }
            let contents = std::fs::read_to_string(&path)
                .map_err(|e| XvmError::io("failed to read project manifest", &path, &e))?;
            let version = manifest.parse_version(&path, &contents)?;
            debug!("{} version {version:?} from {}", sdk.name(), path.display());
            return Ok(version.map(|v| complete_version(&v)).unwrap_or_default());
        }
    }

    Ok(String::new())
}

fn version_from_marker(ctx: &ResolveContext, file_name: &str) -> Result<Option<String>, XvmError> {
    let mut candidates = ctx.project_dirs();
    candidates.push(ctx.home.clone());

    for dir in candidates {
        let path = dir.join(file_name);
        if !path.is_file() {
            continue;
        }
        let contents = std::fs::read_to_string(&path)
            .map_err(|e| XvmError::io("failed to read version file", &path, &e))?;
        debug!("version marker {}", path.display());
        return Ok(Some(normalize_version(&contents)));
    }

    Ok(None)
}
