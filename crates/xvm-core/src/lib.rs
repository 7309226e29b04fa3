//! Install, resolve and link engine for xvm.
//!
//! - Version resolution from the environment, marker files and project
//!   manifests.
//! - Idempotent installs into the per-user stash: probe, download, extract,
//!   post-install, completion marker.
//! - Command shims and the tokenizer they rely on.
//! - Running installed tools with their SDK environment.

mod archive;
mod download;
mod installer;
mod linker;
mod progress;
mod registry;
mod resolver;
mod runner;
mod tokenizer;

pub use archive::{ArchiveKind, extract};
pub use download::{download, probe};
pub use installer::{Installer, ToolBinding};
pub use linker::{Linker, OverridePolicy, ShimFlavor, to_posix_path};
pub use progress::{InstallProgress, InstallReporter};
pub use registry::SdkRegistry;
pub use resolver::{ResolveContext, git_root, resolve_version};
pub use runner::run;
pub use tokenizer::tokenize;
