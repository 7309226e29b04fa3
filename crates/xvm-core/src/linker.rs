use std::path::{Path, PathBuf};

use log::debug;
use xvm_sdk::XvmError;

use crate::tokenizer::tokenize;

#[cfg(unix)]
const SHIM_MODE: u32 = 0o744;

/// Which shim files to write: a POSIX shell script, or a `.cmd` batch file
/// plus an MSYS2 shell script next to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShimFlavor {
    Unix,
    Windows,
}

impl ShimFlavor {
    #[must_use]
    pub const fn native() -> Self {
        if cfg!(windows) {
            Self::Windows
        } else {
            Self::Unix
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverridePolicy {
    #[default]
    KeepExisting,
    Always,
}

#[derive(Debug, Clone, Copy)]
pub struct Linker {
    flavor: ShimFlavor,
}

impl Default for Linker {
    fn default() -> Self {
        Self::new(ShimFlavor::native())
    }
}

impl Linker {
    #[must_use]
    pub const fn new(flavor: ShimFlavor) -> Self {
        Self { flavor }
    }

    /// Write a shim named `tool` in `bin_dir` that runs `command` with the
    /// caller's arguments appended. Returns the primary shim path.
    ///
    /// # Errors
    /// Returns [`XvmError::Link`] if the directory or a shim file cannot be
    /// written, or if `command` has no tokens (Windows flavor).
    pub fn publish(
        &self,
        tool: &str,
        bin_dir: &Path,
        command: &str,
        policy: OverridePolicy,
    ) -> Result<PathBuf, XvmError> {
        std::fs::create_dir_all(bin_dir).map_err(|e| {
            XvmError::link(tool, bin_dir, format!("failed to create directory: {e}"))
        })?;

        match self.flavor {
            ShimFlavor::Unix => {
                let shim = bin_dir.join(tool);
                write_shim(tool, &shim, &shell_script(command), policy)?;
                Ok(shim)
            }
            ShimFlavor::Windows => {
                let shim = bin_dir.join(format!("{tool}.cmd"));
                write_shim(tool, &shim, &cmd_script(command), policy)?;

                let msys2 = bin_dir.join(tool);
                if !skip_existing(&msys2, policy) {
                    let command = msys2_command(tool, &msys2, command)?;
                    write_shim(tool, &msys2, &shell_script(&command), OverridePolicy::Always)?;
                }
                Ok(shim)
            }
        }
    }
}

fn skip_existing(shim: &Path, policy: OverridePolicy) -> bool {
    policy == OverridePolicy::KeepExisting && shim.exists()
}

fn write_shim(
    tool: &str,
    shim: &Path,
    contents: &str,
    policy: OverridePolicy,
) -> Result<(), XvmError> {
    if skip_existing(shim, policy) {
        debug!("Keeping existing shim {}", shim.display());
        return Ok(());
    }

    std::fs::write(shim, contents)
        .map_err(|e| XvmError::link(tool, shim, format!("failed to create file: {e}")))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(shim, std::fs::Permissions::from_mode(SHIM_MODE))
            .map_err(|e| XvmError::link(tool, shim, format!("failed to set mode: {e}")))?;
    }

    Ok(())
}

fn shell_script(command: &str) -> String {
    format!("#!/bin/sh\n\n{command} \"$@\"")
}

fn cmd_script(command: &str) -> String {
    format!("@echo off\n\n{command} %*")
}

/// Rewrites the executable of `command` to its MSYS2 spelling when it names
/// an existing file.
fn msys2_command(tool: &str, shim: &Path, command: &str) -> Result<String, XvmError> {
    let tokens = tokenize(command);
    let Some(executable) = tokens.first() else {
        return Err(XvmError::link(
            tool,
            shim,
            format!("empty command: {command}"),
        ));
    };

    if Path::new(executable).exists() {
        Ok(command.replacen(executable.as_str(), &to_posix_path(executable), 1))
    } else {
        Ok(command.to_string())
    }
}

/// `C:\Users\dev\go.exe` becomes `/c/Users/dev/go.exe`.
#[must_use]
pub fn to_posix_path(path: &str) -> String {
    let path = path.replace('\\', "/");
    let bytes = path.as_bytes();
    if bytes.len() >= 3 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':' && bytes[2] == b'/' {
        format!("/{}{}", (bytes[0] as char).to_ascii_lowercase(), &path[2..])
    } else {
        path
    }
}

#[cfg(test)]
mod tests {
    use super::{Linker, OverridePolicy, ShimFlavor, to_posix_path};
    use xvm_sdk::XvmError;

    #[test]
    fn unix_shim_forwards_arguments() {
        let dir = tempfile::tempdir().expect("temp dir should be created");
        let bin = dir.path().join("bin");

        let shim = Linker::new(ShimFlavor::Unix)
            .publish("go", &bin, "/opt/xvm exec go", OverridePolicy::KeepExisting)
            .expect("shim should be written");

        assert_eq!(shim, bin.join("go"));
        let contents = std::fs::read_to_string(&shim).expect("shim should be readable");
        assert_eq!(contents, "#!/bin/sh\n\n/opt/xvm exec go \"$@\"");

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = std::fs::metadata(&shim)
                .expect("shim metadata should be readable")
                .permissions()
                .mode();
            assert_eq!(mode & 0o777, 0o744);
        }
    }

    #[test]
    fn existing_shim_is_kept_unless_override_requested() {
        let dir = tempfile::tempdir().expect("temp dir should be created");
        let bin = dir.path();
        let shim = bin.join("node");
        std::fs::write(&shim, "sentinel").expect("sentinel should be written");
        let linker = Linker::new(ShimFlavor::Unix);

        let kept = linker
            .publish("node", bin, "xvm exec node", OverridePolicy::KeepExisting)
            .expect("keeping a shim is not an error");
        assert_eq!(kept, shim);
        assert_eq!(
            std::fs::read_to_string(&shim).expect("shim should be readable"),
            "sentinel"
        );

        linker
            .publish("node", bin, "xvm exec node", OverridePolicy::Always)
            .expect("override should rewrite the shim");
        assert_eq!(
            std::fs::read_to_string(&shim).expect("shim should be readable"),
            "#!/bin/sh\n\nxvm exec node \"$@\""
        );
    }

    #[test]
    fn windows_flavor_writes_cmd_and_msys2_shims() {
        let dir = tempfile::tempdir().expect("temp dir should be created");
        let bin = dir.path();
        let command = r"C:\missing\xvm.exe exec npm";

        let shim = Linker::new(ShimFlavor::Windows)
            .publish("npm", bin, command, OverridePolicy::KeepExisting)
            .expect("shims should be written");

        assert_eq!(shim, bin.join("npm.cmd"));
        assert_eq!(
            std::fs::read_to_string(&shim).expect("cmd shim should be readable"),
            "@echo off\n\nC:\\missing\\xvm.exe exec npm %*"
        );
        assert_eq!(
            std::fs::read_to_string(bin.join("npm")).expect("msys2 shim should be readable"),
            "#!/bin/sh\n\nC:\\missing\\xvm.exe exec npm \"$@\""
        );
    }

    #[cfg(unix)]
    #[test]
    fn msys2_shim_rewrites_existing_executable() {
        let dir = tempfile::tempdir().expect("temp dir should be created");
        let executable = format!("{}/tools\\xvm.exe", dir.path().display());
        std::fs::write(&executable, "").expect("fake executable should be written");
        let bin = dir.path().join("bin");

        Linker::new(ShimFlavor::Windows)
            .publish(
                "java",
                &bin,
                &format!("\"{executable}\" exec java"),
                OverridePolicy::KeepExisting,
            )
            .expect("shims should be written");

        let msys2 = std::fs::read_to_string(bin.join("java")).expect("msys2 shim should exist");
        let rewritten = format!("{}/tools/xvm.exe", dir.path().display());
        assert_eq!(msys2, format!("#!/bin/sh\n\n\"{rewritten}\" exec java \"$@\""));
    }

    #[test]
    fn empty_command_is_a_link_error_for_msys2() {
        let dir = tempfile::tempdir().expect("temp dir should be created");

        let result = Linker::new(ShimFlavor::Windows).publish(
            "go",
            dir.path(),
            "   ",
            OverridePolicy::KeepExisting,
        );

        assert!(matches!(result, Err(XvmError::Link { ref name, .. }) if name == "go"));
    }

    #[test]
    fn posix_path_translates_drive_letters() {
        assert_eq!(
            to_posix_path(r"C:\Users\Administrator\go\bin\gofmt.exe"),
            "/c/Users/Administrator/go/bin/gofmt.exe"
        );
        assert_eq!(to_posix_path("d:/tools/xvm.exe"), "/d/tools/xvm.exe");
        assert_eq!(to_posix_path(r"relative\xvm.exe"), "relative/xvm.exe");
        assert_eq!(to_posix_path("/usr/bin/env"), "/usr/bin/env");
    }
}
