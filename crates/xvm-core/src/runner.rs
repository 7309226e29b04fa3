use std::process::{ExitStatus, Stdio};

use log::debug;
use xvm_sdk::XvmError;

use crate::installer::ToolBinding;

/// Run an installed tool with the caller's terminal and the SDK's extra
/// environment, returning its exit status.
///
/// # Errors
/// Returns an error when the SDK's pre-run preparation fails or the tool
/// cannot be started.
pub async fn run(binding: &ToolBinding<'_>, args: &[String]) -> Result<ExitStatus, XvmError> {
    let root = &binding.instance.install_root;
    if let Some(preparer) = binding.sdk.preparer() {
        preparer.prepare(root)?;
    }

    let executable = binding.executable();
    let mut command = tokio::process::Command::new(&executable);
    command
        .args(args)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit());
    if let Some(provider) = binding.sdk.environment() {
        command.envs(provider.environment(root));
    }

    debug!("Running {} {args:?}", executable.display());
    command
        .status()
        .await
        .map_err(|e| XvmError::io("failed to run tool", &executable, &e))
}
