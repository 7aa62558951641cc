//! CLI command implementations.
//!
//! - **sort**: reorder methods in place (or report with `--dry-run`)
//! - **check**: lint mode, report unsorted files and exit non-zero
//! - **init**: write a default `.msort.toml`

pub mod check;
pub mod init;
pub mod sort;

pub use check::{check_files, CheckConfig};
pub use init::init_config;
pub use sort::{sort_files, SortConfig};

use crate::batch::BatchReport;
use crate::config::{load_config, LoadedConfig};
use crate::formatting::Styler;
use crate::io::{collect_files, FileFilter};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Exit status when `check` finds unsorted files
pub const EXIT_UNSORTED: u8 = 1;
/// Exit status when any file failed
pub const EXIT_ERROR: u8 = 2;

/// Load configuration and expand the command line paths into files.
fn prepare(
    paths: &[PathBuf],
    config_path: Option<&Path>,
    recursive: bool,
) -> Result<(LoadedConfig, Vec<PathBuf>)> {
    let loaded = load_config(config_path).context("Failed to load configuration")?;
    if let Some(source) = &loaded.source {
        log::info!("Using config {}", source.display());
    }

    let filter = FileFilter::from_config(&loaded.config).context("Invalid file patterns")?;
    let files = collect_files(paths, recursive, &filter).context("Failed to collect Go files")?;
    log::info!("Found {} Go files", files.len());
    Ok((loaded, files))
}

/// Print every failure to stderr. Returns whether there were any.
fn report_failures(report: &BatchReport, styler: &Styler) -> bool {
    let mut failed = false;
    for (path, error) in report.failures() {
        eprintln!("{} {}: {}", styler.error("error:"), path.display(), error);
        failed = true;
    }
    failed
}

fn exit_code(code: u8) -> ExitCode {
    if code == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(code)
    }
}
