use simplelog::{ColorChoice, ConfigBuilder, LevelFilter, TermLogger, TerminalMode};
use xvm_platform::EnvVars;

const DEBUG_VAR: &str = "DEBUG";
const SILENT_VAR: &str = "SILENT";

/// `SILENT` wins over `DEBUG`.
pub fn level_from_env(vars: &EnvVars) -> LevelFilter {
    if vars.is_true(SILENT_VAR) {
        LevelFilter::Off
    } else if vars.is_true(DEBUG_VAR) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

pub fn init_logging(vars: &EnvVars) {
    let level = level_from_env(vars);
    let config = ConfigBuilder::new()
        .set_time_level(LevelFilter::Off)
        .set_target_level(LevelFilter::Off)
        .set_thread_level(LevelFilter::Off)
        .build();

    let _ = TermLogger::init(level, config, TerminalMode::Mixed, ColorChoice::Auto);
    log::set_max_level(level);
}

/// Silences logging before the terminal is handed to a tool.
pub fn disable_logging() {
    log::set_max_level(LevelFilter::Off);
}
