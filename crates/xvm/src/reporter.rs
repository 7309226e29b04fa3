#![allow(clippy::print_stderr)]

use std::sync::Mutex;

use indicatif::{ProgressBar, ProgressStyle};
use xvm_core::{InstallProgress, InstallReporter};

const BAR_TEMPLATE: &str = "{bytes}/{total_bytes} [{bar:30}] {bytes_per_sec} {eta}";
const SPINNER_TEMPLATE: &str = "{spinner} {bytes} {bytes_per_sec}";

/// Renders install progress on stderr with a download bar.
pub struct TermReporter {
    quiet: bool,
    bar: Mutex<Option<ProgressBar>>,
}

impl TermReporter {
    pub fn new(quiet: bool) -> Self {
        Self {
            quiet,
            bar: Mutex::new(None),
        }
    }

    fn update_bar(&self, downloaded: u64, total: Option<u64>) {
        let mut guard = self
            .bar
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let bar = guard.get_or_insert_with(|| new_bar(total));
        bar.set_position(downloaded);
    }

    fn finish_bar(&self) {
        let mut guard = self
            .bar
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        if let Some(bar) = guard.take() {
            bar.finish_and_clear();
        }
    }
}

fn new_bar(total: Option<u64>) -> ProgressBar {
    let (bar, template) = match total {
        Some(total) => (ProgressBar::new(total), BAR_TEMPLATE),
        None => (ProgressBar::new_spinner(), SPINNER_TEMPLATE),
    };
    if let Ok(style) = ProgressStyle::with_template(template) {
        bar.set_style(style.progress_chars("=> "));
    }
    bar
}

impl InstallReporter for TermReporter {
    fn report(&self, event: InstallProgress) {
        if self.quiet {
            return;
        }
        match event {
            InstallProgress::Downloading { downloaded, total } => {
                self.update_bar(downloaded, total);
            }
            InstallProgress::Installing { sdk, version } => {
                eprintln!("> installing {sdk}@{version}");
            }
            InstallProgress::Extracting { destination } => {
                self.finish_bar();
                eprintln!("> extracting to {}", destination.display());
            }
            InstallProgress::Configuring { sdk } => eprintln!("> configuring {sdk}"),
            InstallProgress::Complete { install_root } => {
                eprintln!("> installed at {}", install_root.display());
            }
            InstallProgress::Linked { tool, shim } => {
                eprintln!("> linked {tool} -> {}", shim.display());
            }
            InstallProgress::Probing { .. } => {}
        }
    }
}
