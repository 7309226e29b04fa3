#[cfg(windows)]
use std::os::windows::process::CommandExt;
use std::process::Output;

#[cfg(windows)]
const CREATE_NO_WINDOW: u32 = 0x08000000;

/// Keeps helper processes (`npm config`, `reg`, `setx`) from flashing a
/// console window on Windows.
pub trait HideWindow {
    fn hide_window(&mut self) -> &mut Self;
}

impl HideWindow for tokio::process::Command {
    #[cfg(windows)]
    fn hide_window(&mut self) -> &mut Self {
        self.creation_flags(CREATE_NO_WINDOW)
    }

    #[cfg(not(windows))]
    fn hide_window(&mut self) -> &mut Self {
        self
    }
}

impl HideWindow for std::process::Command {
    #[cfg(windows)]
    fn hide_window(&mut self) -> &mut Self {
        self.creation_flags(CREATE_NO_WINDOW)
    }

    #[cfg(not(windows))]
    fn hide_window(&mut self) -> &mut Self {
        self
    }
}

/// Combined, trimmed stdout and stderr of a finished helper process, for
/// error messages.
#[must_use]
pub fn combined_output(output: &Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    [stdout.trim(), stderr.trim()]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::{HideWindow, combined_output};

    #[test]
    fn tokio_command_hide_window_is_chainable() {
        let mut cmd = tokio::process::Command::new("npm");
        let before = &raw mut cmd;
        let after = cmd.hide_window() as *mut tokio::process::Command;
        assert_eq!(before, after);
    }

    #[cfg(unix)]
    #[test]
    fn combined_output_joins_non_empty_streams() {
        use std::os::unix::process::ExitStatusExt;

        let output = std::process::Output {
            status: std::process::ExitStatus::from_raw(256),
            stdout: b"  \n".to_vec(),
            stderr: b"npm ERR! invalid config\n".to_vec(),
        };

        assert_eq!(combined_output(&output), "npm ERR! invalid config");

        let both = std::process::Output {
            stdout: b"wrote prefix".to_vec(),
            ..output
        };
        assert_eq!(combined_output(&both), "wrote prefix\nnpm ERR! invalid config");
    }
}
