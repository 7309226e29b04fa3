use log::debug;
use tokio::process::Command;
use xvm_platform::{HideWindow, combined_output};

use crate::config::ShellConfigError;

/// User variable holding the joined xvm bin paths; `PATH` references it.
pub const XVM_VAR: &str = "Xvm";

pub async fn publish_to_user_environment(paths: &[String]) -> Result<(), ShellConfigError> {
    if !paths.is_empty() {
        set_user_var(XVM_VAR, &paths.join(";")).await?;
    }

    let path = query_user_var("PATH").await?;
    let reference = format!("%{XVM_VAR}%");
    if path.contains(&reference) {
        return Ok(());
    }

    let updated = if path.is_empty() {
        reference
    } else {
        format!("{reference};{path}")
    };
    set_user_var("PATH", &updated).await
}

async fn query_user_var(name: &str) -> Result<String, ShellConfigError> {
    let output = Command::new("reg")
        .args(["query", r"HKCU\Environment", "/v", name])
        .hide_window()
        .output()
        .await
        .map_err(|e| ShellConfigError::command("failed to run reg query", e.to_string()))?;

    if !output.status.success() {
        debug!("User variable {name} is not set: {}", combined_output(&output));
        return Ok(String::new());
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    Ok(parse_reg_value(&stdout, name).unwrap_or_default())
}

async fn set_user_var(name: &str, value: &str) -> Result<(), ShellConfigError> {
    let output = Command::new("setx")
        .args([name, value])
        .hide_window()
        .output()
        .await
        .map_err(|e| ShellConfigError::command("failed to run setx", e.to_string()))?;

    if output.status.success() {
        Ok(())
    } else {
        Err(ShellConfigError::command(
            "failed to set user variable",
            format!("{name}: {}", combined_output(&output)),
        ))
    }
}

/// Value of `name` in `reg query` output, whose value lines read
/// `    <name>    REG_<TYPE>    <data>`.
#[must_use]
pub fn parse_reg_value(output: &str, name: &str) -> Option<String> {
    output.lines().find_map(|line| {
        let line = line.trim_start();
        let rest = line.get(..name.len()).and_then(|head| {
            head.eq_ignore_ascii_case(name)
                .then(|| &line[name.len()..])
        })?;
        let rest = rest.trim_start();
        let after_type = rest.strip_prefix("REG_")?;
        let data_start = after_type.find(char::is_whitespace)?;
        Some(after_type[data_start..].trim().to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::parse_reg_value;

    const OUTPUT: &str = "\r\nHKEY_CURRENT_USER\\Environment\r\n    Path    REG_EXPAND_SZ    %USERPROFILE%\\AppData\\Local\\Microsoft\\WindowsApps;C:\\Tools\r\n\r\n";

    #[test]
    fn parses_expandable_value() {
        assert_eq!(
            parse_reg_value(OUTPUT, "PATH").as_deref(),
            Some(r"%USERPROFILE%\AppData\Local\Microsoft\WindowsApps;C:\Tools")
        );
    }

    #[test]
    fn missing_value_is_none() {
        assert_eq!(parse_reg_value(OUTPUT, "Xvm"), None);
    }

    #[test]
    fn value_with_spaces_is_kept_whole() {
        let output = "    Xvm    REG_SZ    C:\\Users\\Dev User\\.xvm\\bin\r\n";

        assert_eq!(
            parse_reg_value(output, "Xvm").as_deref(),
            Some(r"C:\Users\Dev User\.xvm\bin")
        );
    }
}
