use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallProgress {
    Installing { sdk: String, version: String },
    Probing { url: String },
    Downloading { downloaded: u64, total: Option<u64> },
    Extracting { destination: PathBuf },
    Configuring { sdk: String },
    Complete { install_root: PathBuf },
    Linked { tool: String, shim: PathBuf },
}

/// Receives installer and linker events. The CLI renders them; tests
/// record them or pass `&()` to drop them.
pub trait InstallReporter: Send + Sync {
    fn report(&self, event: InstallProgress);
}

impl InstallReporter for () {
    fn report(&self, _event: InstallProgress) {}
}
