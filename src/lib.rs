// Export modules for library usage
pub mod analysis;
pub mod batch;
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod errors;
pub mod formatting;
pub mod io;
pub mod parser;
pub mod pipeline;
pub mod progress;
pub mod rewrite;
pub mod sorting;

// Re-export commonly used types
pub use crate::analysis::{
    compute_metrics, extract_methods, CallGraph, CallGraphBuilder, GraphMetrics, ReceiverMatcher,
};
pub use crate::batch::{
    BatchMode, BatchOptions, BatchReport, BatchRunner, CancellationFlag, FileOutcome, FileStatus,
};
pub use crate::config::{MethodPlacement, MsortConfig, SortCriteria};
pub use crate::core::{MethodKey, MethodRecord};
pub use crate::errors::{Error, Result};
pub use crate::parser::{parse_source, GoParser, ParsedUnit};
pub use crate::pipeline::{sort_source, MethodSorter, SortOptions, SortOutcome};
pub use crate::sorting::{has_order_changed, sort_methods, MethodComparator};
