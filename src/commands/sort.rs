use super::{exit_code, prepare, report_failures, EXIT_ERROR};
use crate::batch::{BatchMode, BatchOptions, BatchRunner, FileStatus, SkipReason};
use crate::config::MethodPlacement;
use crate::formatting::{format_explain, ColorMode, Styler};
use crate::pipeline::SortOptions;
use crate::progress::{ProgressConfig, ProgressManager};
use anyhow::{Context, Result};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Clone)]
pub struct SortConfig {
    pub paths: Vec<PathBuf>,
    pub dry_run: bool,
    pub list: bool,
    pub recursive: bool,
    pub config: Option<PathBuf>,
    pub jobs: usize,
    pub placement: Option<MethodPlacement>,
    pub explain: bool,
    pub color: ColorMode,
    pub quiet: bool,
    pub verbosity: u8,
}

pub fn sort_files(config: SortConfig) -> Result<ExitCode> {
    let styler = Styler::new(config.color.with_env());
    let (loaded, files) = prepare(&config.paths, config.config.as_deref(), config.recursive)?;

    let mut sort = SortOptions::from(&loaded.config);
    if let Some(placement) = config.placement {
        sort.placement = placement;
    }

    let options = BatchOptions {
        mode: if config.dry_run {
            BatchMode::DryRun
        } else {
            BatchMode::Write
        },
        sort,
        skip_generated: loaded.config.skip_generated,
        jobs: Some(config.jobs),
        keep_outcomes: config.explain,
    };

    let progress = ProgressManager::new(ProgressConfig::from_env(config.quiet || config.list))
        .create_bar(files.len() as u64, "Sorting");
    let report = BatchRunner::new(options)
        .with_progress(progress)
        .run(&files)
        .context("Failed to run sort")?;

    for file in &report.files {
        let path = file.path.display();
        if config.list {
            if file.is_reordered() {
                println!("{path}");
            }
            continue;
        }
        match &file.status {
            FileStatus::WouldSort => println!("Would sort methods in: {path}"),
            FileStatus::Sorted if config.verbosity > 0 => {
                println!("{} {path}", styler.success("Sorted methods in:"))
            }
            FileStatus::Unchanged if config.verbosity > 0 => {
                println!("{}", styler.dim(&format!("No changes needed: {path}")))
            }
            FileStatus::Skipped(SkipReason::Generated) if config.verbosity > 0 => {
                println!("{}", styler.dim(&format!("Skipped generated file: {path}")))
            }
            _ => {}
        }
        if let Some(outcome) = &file.outcome {
            print!("{}", format_explain(outcome, &styler));
        }
    }

    if config.verbosity > 0 && !config.list {
        println!(
            "{} files processed, {} {}, {} failed",
            report.files.len(),
            report.reordered().count(),
            if config.dry_run { "would change" } else { "sorted" },
            report.count(|s| matches!(s, FileStatus::Failed(_)))
        );
    }

    if report_failures(&report, &styler) {
        return Ok(exit_code(EXIT_ERROR));
    }
    Ok(exit_code(0))
}
