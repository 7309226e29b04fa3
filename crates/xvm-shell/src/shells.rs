use std::path::PathBuf;

use xvm_platform::Os;

/// Unix shells whose rc file can carry a `PATH` addition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellType {
    Bash,
    Sh,
    Zsh,
    Fish,
    Csh,
    Tcsh,
}

impl ShellType {
    pub const ALL: [Self; 6] = [
        Self::Bash,
        Self::Sh,
        Self::Tcsh,
        Self::Csh,
        Self::Zsh,
        Self::Fish,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bash => "bash",
            Self::Sh => "sh",
            Self::Zsh => "zsh",
            Self::Fish => "fish",
            Self::Csh => "csh",
            Self::Tcsh => "tcsh",
        }
    }

    /// The shell named by a `$SHELL` value, falling back to bash.
    #[must_use]
    pub fn from_shell_env(shell: Option<&str>) -> Self {
        let name = shell
            .and_then(|s| s.rsplit('/').next())
            .unwrap_or_default();
        Self::ALL
            .into_iter()
            .find(|shell| shell.name() == name)
            .unwrap_or(Self::Bash)
    }

    /// Rc file relative to the home directory.
    #[must_use]
    pub fn rc_file(self, os: Os) -> PathBuf {
        match self {
            Self::Bash | Self::Sh if os == Os::Darwin => PathBuf::from(".bash_profile"),
            Self::Bash | Self::Sh => PathBuf::from(".bashrc"),
            Self::Zsh => PathBuf::from(".zshrc"),
            Self::Fish => [".config", "fish", "config.fish"].iter().collect(),
            Self::Csh | Self::Tcsh => PathBuf::from(".tcshrc"),
        }
    }

    /// Line that prepends `paths` to the shell's search path.
    #[must_use]
    pub fn path_line(self, paths: &[String]) -> String {
        match self {
            Self::Bash | Self::Sh | Self::Zsh => {
                format!("export PATH=\"{}:$PATH\"", paths.join(":"))
            }
            Self::Fish => format!("set -gx PATH {} $PATH", paths.join(" ")),
            Self::Csh | Self::Tcsh => format!("set path = ({} $path)", paths.join(" ")),
        }
    }
}
