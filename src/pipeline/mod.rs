//! Single-file sorting pipeline.
//!
//! `Parsed -> GraphBuilt -> MetricsComputed -> Sorted`, then either
//! `Unchanged` (the original text is returned) or `Changed` (rewrite and
//! render). Each file is one linear pass with no I/O.

use crate::analysis::{
    compute_metrics, extract_methods, CallGraphBuilder, GraphMetrics, ReceiverMatcher,
};
use crate::config::{MethodPlacement, MsortConfig, SortCriteria};
use crate::core::MethodRecord;
use crate::errors::Result;
use crate::parser::{GoParser, ParsedUnit};
use crate::rewrite::{plan_rewrite, render, RewritePlan};
use crate::sorting::{has_order_changed, sort_methods};
use std::fmt;
use std::path::PathBuf;

/// Options for one pipeline pass, derived from [`MsortConfig`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SortOptions {
    pub criteria: SortCriteria,
    pub receiver: ReceiverMatcher,
    pub placement: MethodPlacement,
}

impl From<&MsortConfig> for SortOptions {
    fn from(config: &MsortConfig) -> Self {
        Self {
            criteria: config.sort,
            receiver: ReceiverMatcher::from_config(&config.receiver),
            placement: config.layout.method_placement,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Parsed,
    GraphBuilt,
    MetricsComputed,
    Sorted,
    Unchanged,
    Changed,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Parsed => "parsed",
            Stage::GraphBuilt => "graph built",
            Stage::MetricsComputed => "metrics computed",
            Stage::Sorted => "sorted",
            Stage::Unchanged => "unchanged",
            Stage::Changed => "changed",
        };
        f.write_str(name)
    }
}

/// Result of sorting one file.
#[derive(Debug, Clone)]
pub struct SortOutcome {
    pub path: PathBuf,
    /// Rendered text; the input itself when nothing changed
    pub content: String,
    pub changed: bool,
    /// Methods in their new order
    pub methods: Vec<MethodRecord>,
    pub metrics: GraphMetrics,
}

/// Runs the pipeline, reusing one Go parser across files.
pub struct MethodSorter {
    parser: GoParser,
    options: SortOptions,
}

impl MethodSorter {
    pub fn new(options: SortOptions) -> Result<Self> {
        Ok(Self {
            parser: GoParser::new()?,
            options,
        })
    }

    /// Parse and sort one source text.
    pub fn sort_source(&mut self, path: impl Into<PathBuf>, source: String) -> Result<SortOutcome> {
        let unit = self.parser.parse(path, source)?;
        self.sort_unit(&unit)
    }

    /// Sort an already parsed unit.
    pub fn sort_unit(&mut self, unit: &ParsedUnit) -> Result<SortOutcome> {
        let path = unit.path().to_path_buf();
        trace_stage(unit, Stage::Parsed);

        let methods = extract_methods(unit);
        let mut graph = CallGraphBuilder::new(unit, self.options.receiver.clone()).build(methods);
        trace_stage(unit, Stage::GraphBuilt);

        let metrics = compute_metrics(&mut graph);
        trace_stage(unit, Stage::MetricsComputed);

        let mut methods = graph.into_methods();
        sort_methods(&mut methods, self.options.criteria);
        let changed = has_order_changed(&methods);
        trace_stage(unit, Stage::Sorted);

        let plan = if changed {
            plan_rewrite(unit, &methods, self.options.placement, true)?
        } else {
            RewritePlan::identity(unit)
        };
        let content = render(unit, &plan, &mut self.parser)?;
        trace_stage(
            unit,
            if changed {
                Stage::Changed
            } else {
                Stage::Unchanged
            },
        );

        Ok(SortOutcome {
            path,
            content,
            changed,
            methods,
            metrics,
        })
    }
}

fn trace_stage(unit: &ParsedUnit, stage: Stage) {
    log::trace!("{}: {}", unit.path().display(), stage);
}

/// Sort one source text with a fresh [`MethodSorter`].
pub fn sort_source(
    path: impl Into<PathBuf>,
    source: impl Into<String>,
    options: SortOptions,
) -> Result<SortOutcome> {
    MethodSorter::new(options)?.sort_source(path, source.into())
}
