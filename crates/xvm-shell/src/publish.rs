use std::path::{Path, PathBuf};

use log::{info, warn};
use xvm_platform::Os;

use crate::config::{ShellConfig, ShellConfigError};
use crate::shells::ShellType;
use crate::windows::publish_to_user_environment;

/// Makes `paths` visible to future shells: rc files on unix, the user
/// environment on Windows.
pub async fn publish_paths(
    home: &Path,
    os: Os,
    shell_env: Option<&str>,
    paths: &[String],
) -> Result<(), ShellConfigError> {
    if os.is_windows() {
        return publish_to_user_environment(paths).await;
    }

    let current = ShellType::from_shell_env(shell_env);
    for rc in publish_to_rc_files(home, os, current, paths)? {
        info!("Added bin paths to {}", rc.display());
    }
    Ok(())
}

/// The current shell's rc file is always written, created if needed.
/// Other shells are only touched when their rc file already exists, and
/// failures there are logged and skipped. Returns the files changed.
pub fn publish_to_rc_files(
    home: &Path,
    os: Os,
    current: ShellType,
    paths: &[String],
) -> Result<Vec<PathBuf>, ShellConfigError> {
    let mut updated = Vec::new();
    if let Some(rc) = add_paths_to_rc(home, os, current, paths, true)? {
        updated.push(rc);
    }

    for shell in ShellType::ALL.into_iter().filter(|shell| *shell != current) {
        match add_paths_to_rc(home, os, shell, paths, false) {
            Ok(Some(rc)) => updated.push(rc),
            Ok(None) => {}
            Err(e) => warn!("Skipping {} rc file: {e}", shell.name()),
        }
    }
    Ok(updated)
}

fn add_paths_to_rc(
    home: &Path,
    os: Os,
    shell: ShellType,
    paths: &[String],
    create: bool,
) -> Result<Option<PathBuf>, ShellConfigError> {
    let rc = home.join(shell.rc_file(os));
    if !create && !rc.exists() {
        return Ok(None);
    }

    let mut config = ShellConfig::load(shell, rc.clone())?;
    let edit = config.add_paths(paths);
    if !edit.has_changes() {
        return Ok(None);
    }
    config.apply_edit(&edit)?;
    Ok(Some(rc))
}
