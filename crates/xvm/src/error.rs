use std::process::ExitCode;

use thiserror::Error;
use xvm_platform::{PlatformError, XvmPathsError};
use xvm_sdk::XvmError;
use xvm_shell::ShellConfigError;

use crate::settings::SettingsError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Xvm(#[from] XvmError),

    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error(transparent)]
    Paths(#[from] XvmPathsError),

    #[error(transparent)]
    Platform(#[from] PlatformError),

    #[error("failed to publish bin paths: {0}")]
    Shell(#[from] ShellConfigError),

    #[error("{operation} failed: {details}")]
    OperationFailed {
        operation: &'static str,
        details: String,
    },

    #[error("{tool} exited with {code}")]
    ToolExit { tool: String, code: i32 },
}

impl AppError {
    pub fn operation_failed(operation: &'static str, details: impl Into<String>) -> Self {
        Self::OperationFailed {
            operation,
            details: details.into(),
        }
    }

    /// A failed tool passes its own exit code through; everything else is 1.
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Self::ToolExit { code, .. } => u8::try_from(*code).map_or(ExitCode::FAILURE, ExitCode::from),
            _ => ExitCode::FAILURE,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::process::ExitCode;

    use xvm_sdk::XvmError;

    use super::AppError;

    #[test]
    fn tool_exit_keeps_exit_code() {
        let error = AppError::ToolExit {
            tool: "go".to_string(),
            code: 3,
        };

        assert_eq!(error.exit_code(), ExitCode::from(3));
        assert_eq!(error.to_string(), "go exited with 3");
    }

    #[test]
    fn out_of_range_tool_code_falls_back_to_failure() {
        let error = AppError::ToolExit {
            tool: "node".to_string(),
            code: -1,
        };

        assert_eq!(error.exit_code(), ExitCode::FAILURE);
    }

    #[test]
    fn other_errors_exit_with_failure() {
        let error = AppError::from(XvmError::unknown_sdk(
            "ruby",
            vec!["go".to_string(), "node".to_string()],
        ));

        assert_eq!(error.exit_code(), ExitCode::FAILURE);
        assert_eq!(error.to_string(), "unknown sdk: ruby, allows go,node");
    }

    #[test]
    fn operation_failed_includes_operation() {
        let error = AppError::operation_failed("locate xvm", "not on PATH");

        assert_eq!(error.to_string(), "locate xvm failed: not on PATH");
    }
}
