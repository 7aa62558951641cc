//! `--explain` report: the metrics behind a file's method order.

use super::Styler;
use crate::pipeline::SortOutcome;
use std::fmt::Write;

const HEADERS: [&str; 7] = ["receiver", "method", "exported", "in", "depth", "old", "new"];

/// One aligned line per method, in the new order.
pub fn format_explain(outcome: &SortOutcome, styler: &Styler) -> String {
    let rows: Vec<[String; 7]> = outcome
        .methods
        .iter()
        .enumerate()
        .map(|(position, method)| {
            [
                method.receiver_display.clone(),
                method.name.clone(),
                if method.is_exported { "yes" } else { "no" }.to_string(),
                method.in_degree.to_string(),
                method.max_depth.to_string(),
                method.original_order.to_string(),
                position.to_string(),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let status = if outcome.changed { "reordered" } else { "unchanged" };
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} ({}, {} calls)",
        styler.header(&outcome.path.display().to_string()),
        status,
        outcome.metrics.calls
    );
    if rows.is_empty() {
        let _ = writeln!(out, "  {}", styler.dim("no methods"));
        return out;
    }

    let header = HEADERS.map(str::to_string);
    let _ = writeln!(out, "  {}", styler.dim(&align(&header, &widths)));
    for row in &rows {
        let line = align(row, &widths);
        let moved = row[5] != row[6];
        let _ = writeln!(
            out,
            "  {}",
            if moved { styler.warning(&line) } else { line }
        );
    }
    out
}

fn align(cells: &[String; 7], widths: &[usize; 7]) -> String {
    let mut line = String::new();
    for (i, (cell, width)) in cells.iter().zip(widths).enumerate() {
        if i > 0 {
            line.push_str("  ");
        }
        // Text columns left aligned, numbers right aligned.
        if i < 3 {
            let _ = write!(line, "{cell:<width$}");
        } else {
            let _ = write!(line, "{cell:>width$}");
        }
    }
    line.trim_end().to_string()
}
