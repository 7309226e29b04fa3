mod cli;
mod commands;
mod error;
mod logging;
mod reporter;
mod sdks;
mod settings;

use std::process::ExitCode;

use clap::Parser;
use log::error;
use xvm_platform::EnvVars;

use crate::cli::Cli;
use crate::commands::App;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let vars = EnvVars::Process;
    logging::init_logging(&vars);

    let result = match App::load(vars) {
        Ok(app) => commands::dispatch(app, cli.command).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            if !matches!(e, error::AppError::ToolExit { .. }) {
                error!("{e}");
            }
            e.exit_code()
        }
    }
}
