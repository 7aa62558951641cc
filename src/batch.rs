//! Parallel multi-file runner.
//!
//! Files are independent, so each one runs its own pipeline on the rayon
//! pool. The only shared state is the cancellation flag and the progress
//! bar; results are collected and sorted by path afterwards.

use crate::errors::{Error, Result};
use crate::io::{is_generated, read_source, write_atomic};
use crate::pipeline::{MethodSorter, SortOptions, SortOutcome};
use indicatif::ProgressBar;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::debug_span;

/// What to do with a file whose method order changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BatchMode {
    /// Rewrite the file in place
    #[default]
    Write,
    /// Report only
    DryRun,
}

#[derive(Debug, Clone, Default)]
pub struct BatchOptions {
    pub mode: BatchMode,
    pub sort: SortOptions,
    /// Skip files carrying the generated-code marker
    pub skip_generated: bool,
    /// Worker threads; `None` uses rayon's default
    pub jobs: Option<usize>,
    /// Keep the per-file [`SortOutcome`] for reporting
    pub keep_outcomes: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    Generated,
    Cancelled,
}

#[derive(Debug)]
pub enum FileStatus {
    Unchanged,
    /// Reordered and written back
    Sorted,
    /// Reordered, nothing written
    WouldSort,
    Skipped(SkipReason),
    Failed(Error),
}

#[derive(Debug)]
pub struct FileOutcome {
    pub path: PathBuf,
    pub status: FileStatus,
    pub outcome: Option<SortOutcome>,
}

impl FileOutcome {
    fn new(path: &Path, status: FileStatus) -> Self {
        Self {
            path: path.to_path_buf(),
            status,
            outcome: None,
        }
    }

    /// Whether the file's method order was (or would be) changed.
    pub fn is_reordered(&self) -> bool {
        matches!(self.status, FileStatus::Sorted | FileStatus::WouldSort)
    }
}

#[derive(Debug, Default)]
pub struct BatchReport {
    pub files: Vec<FileOutcome>,
}

impl BatchReport {
    pub fn reordered(&self) -> impl Iterator<Item = &FileOutcome> {
        self.files.iter().filter(|f| f.is_reordered())
    }

    pub fn failures(&self) -> impl Iterator<Item = (&Path, &Error)> {
        self.files.iter().filter_map(|f| match &f.status {
            FileStatus::Failed(e) => Some((f.path.as_path(), e)),
            _ => None,
        })
    }

    pub fn has_failures(&self) -> bool {
        self.failures().next().is_some()
    }

    pub fn count(&self, predicate: impl Fn(&FileStatus) -> bool) -> usize {
        self.files.iter().filter(|f| predicate(&f.status)).count()
    }
}

/// Shared flag checked before each file starts.
#[derive(Debug, Clone, Default)]
pub struct CancellationFlag(Arc<AtomicBool>);

impl CancellationFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

pub struct BatchRunner {
    options: BatchOptions,
    cancel: CancellationFlag,
    progress: ProgressBar,
}

impl BatchRunner {
    pub fn new(options: BatchOptions) -> Self {
        Self {
            options,
            cancel: CancellationFlag::new(),
            progress: ProgressBar::hidden(),
        }
    }

    pub fn with_cancellation(mut self, cancel: CancellationFlag) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = progress;
        self
    }

    /// Process every file. Per-file failures are part of the report; only a
    /// failure to set up the thread pool is an error.
    pub fn run(&self, files: &[PathBuf]) -> Result<BatchReport> {
        let mut builder = rayon::ThreadPoolBuilder::new();
        if let Some(jobs) = self.options.jobs.filter(|jobs| *jobs > 0) {
            builder = builder.num_threads(jobs);
        }
        let pool = builder
            .build()
            .map_err(|e| Error::Invariant(format!("failed to start worker pool: {e}")))?;

        log::info!(
            "Processing {} files on {} threads",
            files.len(),
            pool.current_num_threads()
        );

        let mut outcomes: Vec<FileOutcome> = pool.install(|| {
            files
                .par_iter()
                .map_init(
                    || MethodSorter::new(self.options.sort.clone()),
                    |sorter, path| {
                        let outcome = match sorter {
                            Ok(sorter) => self.process(sorter, path),
                            Err(e) => FileOutcome::new(
                                path,
                                FileStatus::Failed(Error::Invariant(e.to_string())),
                            ),
                        };
                        self.progress.inc(1);
                        outcome
                    },
                )
                .collect()
        });
        self.progress.finish_and_clear();

        outcomes.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(BatchReport { files: outcomes })
    }

    fn process(&self, sorter: &mut MethodSorter, path: &Path) -> FileOutcome {
        if self.cancel.is_cancelled() {
            return FileOutcome::new(path, FileStatus::Skipped(SkipReason::Cancelled));
        }
        let _span = debug_span!("sort_file", path = %path.display()).entered();

        match self.sort_file(sorter, path) {
            Ok(Some((status, outcome))) => FileOutcome {
                path: path.to_path_buf(),
                status,
                outcome: self.options.keep_outcomes.then_some(outcome),
            },
            Ok(None) => FileOutcome::new(path, FileStatus::Skipped(SkipReason::Generated)),
            Err(e) => {
                log::debug!("{}: {}", path.display(), e);
                FileOutcome::new(path, FileStatus::Failed(e))
            }
        }
    }

    fn sort_file(
        &self,
        sorter: &mut MethodSorter,
        path: &Path,
    ) -> Result<Option<(FileStatus, SortOutcome)>> {
        let source = read_source(path)?;
        if self.options.skip_generated && is_generated(&source) {
            log::debug!("Skipping generated file {}", path.display());
            return Ok(None);
        }

        let outcome = sorter.sort_source(path, source)?;
        let status = match (outcome.changed, self.options.mode) {
            (false, _) => FileStatus::Unchanged,
            (true, BatchMode::DryRun) => FileStatus::WouldSort,
            (true, BatchMode::Write) => {
                write_atomic(path, &outcome.content)?;
                log::info!("Sorted methods in {}", path.display());
                FileStatus::Sorted
            }
        };
        Ok(Some((status, outcome)))
    }
}
