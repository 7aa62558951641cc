//! Method analysis
//!
//! This module turns a parsed Go file into enriched method records:
//! - Declaration extraction (`extractor`)
//! - Receiver self-reference heuristics (`receiver`)
//! - Intra-type call graph construction (`call_graph`)
//! - In-degree and cycle-safe call depth metrics (`metrics`)

pub mod call_graph;
pub mod extractor;
pub mod metrics;
pub mod receiver;

pub use call_graph::{CallGraph, CallGraphBuilder};
pub use extractor::extract_methods;
pub use metrics::{compute_metrics, GraphMetrics};
pub use receiver::ReceiverMatcher;
