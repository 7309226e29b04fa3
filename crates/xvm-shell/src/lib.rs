#![allow(clippy::missing_errors_doc)]

mod config;
mod publish;
mod shells;
mod windows;

pub use config::{ShellConfig, ShellConfigEdit, ShellConfigError};
pub use publish::{publish_paths, publish_to_rc_files};
pub use shells::ShellType;
pub use windows::{XVM_VAR, parse_reg_value, publish_to_user_environment};
