use super::{exit_code, prepare, report_failures, EXIT_ERROR, EXIT_UNSORTED};
use crate::batch::{BatchMode, BatchOptions, BatchRunner};
use crate::formatting::{ColorMode, Styler};
use crate::pipeline::SortOptions;
use anyhow::{Context, Result};
use std::path::PathBuf;
use std::process::ExitCode;

pub const UNSORTED_MESSAGE: &str = "methods in this file could be better sorted for readability";

#[derive(Debug, Clone)]
pub struct CheckConfig {
    pub paths: Vec<PathBuf>,
    pub config: Option<PathBuf>,
    pub jobs: usize,
    pub color: ColorMode,
    pub verbosity: u8,
}

/// Report unsorted files in vet style without touching them.
pub fn check_files(config: CheckConfig) -> Result<ExitCode> {
    let styler = Styler::new(config.color.with_env());
    let (loaded, files) = prepare(&config.paths, config.config.as_deref(), true)?;

    let options = BatchOptions {
        mode: BatchMode::DryRun,
        sort: SortOptions::from(&loaded.config),
        skip_generated: loaded.config.skip_generated,
        jobs: Some(config.jobs),
        keep_outcomes: false,
    };
    let report = BatchRunner::new(options)
        .run(&files)
        .context("Failed to run check")?;

    let mut unsorted = 0usize;
    for file in report.reordered() {
        println!(
            "{}:1:1: {}",
            file.path.display(),
            styler.warning(UNSORTED_MESSAGE)
        );
        unsorted += 1;
    }
    if config.verbosity > 0 {
        println!(
            "{} files checked, {} need sorting",
            report.files.len(),
            unsorted
        );
    }

    if report_failures(&report, &styler) {
        return Ok(exit_code(EXIT_ERROR));
    }
    if unsorted > 0 {
        return Ok(exit_code(EXIT_UNSORTED));
    }
    Ok(exit_code(0))
}
