use std::process::ExitCode;

use log::{debug, info, warn};
use xvm_core::{Installer, Linker, OverridePolicy, ResolveContext, SdkRegistry, run};
use xvm_platform::{EnvVars, Platform, XvmPaths};
use xvm_sdk::{HttpContext, XvmError};

use crate::cli::{ActivateArgs, Command};
use crate::error::AppError;
use crate::logging;
use crate::reporter::TermReporter;
use crate::sdks;
use crate::settings::Settings;

const APP: &str = "xvm";

/// Everything a command needs, built once per invocation.
pub struct App {
    pub paths: XvmPaths,
    pub platform: Platform,
    pub settings: Settings,
    pub http: HttpContext,
    pub vars: EnvVars,
    pub registry: SdkRegistry,
}

impl App {
    pub fn load(vars: EnvVars) -> Result<Self, AppError> {
        let paths = XvmPaths::new()?;
        let platform = Platform::current()?;
        let settings = Settings::load(&paths.config_file())?;
        let http = settings.http_context()?;
        let registry = sdks::registry(&paths, platform, &http, &vars);
        Ok(Self {
            paths,
            platform,
            settings,
            http,
            vars,
            registry,
        })
    }
}

pub async fn dispatch(app: App, command: Command) -> Result<ExitCode, AppError> {
    match command {
        Command::Activate(args) => activate(app, args).await,
        Command::Exec { tool, args } => exec(&app, &tool, &args).await,
        Command::Show => {
            show(&app);
            Ok(ExitCode::SUCCESS)
        }
    }
}

async fn activate(mut app: App, args: ActivateArgs) -> Result<ExitCode, AppError> {
    let xvm = xvm_command()?;
    let available = app.registry.names();
    let unknown: Vec<&str> = args
        .sdks
        .iter()
        .filter(|name| !available.contains(name))
        .map(String::as_str)
        .collect();
    if !unknown.is_empty() {
        return Err(XvmError::unknown_sdk(unknown.join(","), available).into());
    }

    let names = if args.all {
        app.settings.sdks.clone_from(&available);
        available
    } else {
        app.settings.activate(&args.sdks);
        args.sdks
    };

    info!("Start activating {} ...", names.join(","));
    let reporter = TermReporter::new(app.vars.is_true("SILENT"));
    let installer = Installer::new(&app.registry, &app.paths, &app.http, &reporter);
    installer.link(&names, &Linker::default(), &xvm, OverridePolicy::Always)?;

    if args.add_binpath {
        let bin_paths: Vec<String> = installer
            .bin_paths(&app.settings.sdks)
            .iter()
            .map(|path| path.display().to_string())
            .collect();
        info!("Adding bin paths to PATH: {}", bin_paths.join(", "));
        let shell = app.vars.var("SHELL");
        xvm_shell::publish_paths(&app.paths.home, app.platform.os, shell.as_deref(), &bin_paths)
            .await?;
        info!("Succeeded to add all bin paths");
    }

    app.settings.save(&app.paths.config_file())?;
    Ok(ExitCode::SUCCESS)
}

async fn exec(app: &App, tool: &str, args: &[String]) -> Result<ExitCode, AppError> {
    let ctx = ResolveContext::from_process(&app.paths.home)?;
    let reporter = TermReporter::new(app.vars.is_true("SILENT"));
    let installer = Installer::new(&app.registry, &app.paths, &app.http, &reporter);
    let binding = installer.install(tool, &ctx).await?;
    debug!(
        "Resolved {tool} to {}@{}",
        binding.sdk.name(),
        binding.instance.version
    );

    logging::disable_logging();
    let status = run(&binding, args).await?;
    if status.success() {
        return Ok(ExitCode::SUCCESS);
    }
    Err(AppError::ToolExit {
        tool: tool.to_string(),
        code: status.code().unwrap_or(1),
    })
}

fn show(app: &App) {
    info!("Version: {}", env!("CARGO_PKG_VERSION"));
    info!("Available Sdks: {}", app.registry.names().join(","));
    info!("Activated Sdks: {}", app.settings.sdks.join(","));
    info!("Workspace: {}", app.paths.root.display());
    info!("Sdk Root Path: {}", app.paths.stash.display());
    info!("Binary Path: {}", app.paths.bin.display());
    for sdk in app.registry.iter() {
        info!("Mirror for {}: {}", sdk.name(), sdk.mirror().base_url());
    }
}

/// How shims invoke xvm: the `xvm` on PATH, else this executable. Quoted
/// when the path contains spaces.
fn xvm_command() -> Result<String, AppError> {
    let path = match which::which(APP) {
        Ok(path) => path,
        Err(e) => {
            warn!("The {APP} command cannot be found on PATH ({e}), shims will use this executable");
            std::env::current_exe()
                .map_err(|e| AppError::operation_failed("locate xvm", e.to_string()))?
        }
    };
    Ok(quote_command(&path))
}

fn quote_command(path: &std::path::Path) -> String {
    let display = path.display().to_string();
    if display.contains(' ') {
        format!("\"{display}\"")
    } else {
        display
    }
}
