//! Progress feedback for batch runs, built on `indicatif`.
//!
//! - **Quiet Mode**: no progress output (`GOMSORT_QUIET` env var or `--quiet`)
//! - **Non-TTY**: bars are hidden when stderr is not a terminal, so piped
//!   output and CI logs stay clean

use indicatif::{ProgressBar, ProgressStyle};
use std::io::IsTerminal;

pub const TEMPLATE_FILES: &str = "{spinner} {msg} {pos}/{len} files ({percent}%) - {eta}";

/// Configuration for progress display behavior
#[derive(Debug, Clone, Default)]
pub struct ProgressConfig {
    /// Whether to suppress all progress output
    pub quiet_mode: bool,
}

impl ProgressConfig {
    /// Create progress configuration from environment and CLI arguments
    pub fn from_env(quiet: bool) -> Self {
        let env_quiet = std::env::var("GOMSORT_QUIET").is_ok();
        Self {
            quiet_mode: quiet || env_quiet,
        }
    }

    pub fn should_show_progress(&self) -> bool {
        !self.quiet_mode && std::io::stderr().is_terminal()
    }
}

#[derive(Debug, Clone)]
pub struct ProgressManager {
    config: ProgressConfig,
}

impl ProgressManager {
    pub fn new(config: ProgressConfig) -> Self {
        Self { config }
    }

    /// A file counter bar, hidden when progress should not be shown.
    pub fn create_bar(&self, len: u64, msg: &str) -> ProgressBar {
        if !self.config.should_show_progress() || len == 0 {
            return ProgressBar::hidden();
        }

        let style = ProgressStyle::default_bar()
            .template(TEMPLATE_FILES)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ ");
        let pb = ProgressBar::new(len).with_style(style);
        pb.set_message(msg.to_string());
        pb
    }
}
