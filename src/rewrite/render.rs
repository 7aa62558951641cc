//! Text rendering of a [`RewritePlan`].
//!
//! Every declaration is copied as its original bytes (doc comment through
//! trailing comment), so bodies and inline comments are never re-printed.
//! Only the whitespace between declarations is synthesized: a pair that was
//! adjacent in the source and involves no relocated method keeps its original
//! separator, every other pair is separated by exactly one blank line.

use super::RewritePlan;
use crate::analysis::extract_methods;
use crate::core::MethodKey;
use crate::errors::{Error, Result};
use crate::parser::{GoParser, ParsedUnit};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineEnding {
    Lf,
    CrLf,
}

impl LineEnding {
    pub fn detect(source: &str) -> Self {
        if source.contains("\r\n") {
            Self::CrLf
        } else {
            Self::Lf
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Lf => "\n",
            Self::CrLf => "\r\n",
        }
    }
}

/// Render `plan` to text and verify the result re-parses with the same
/// methods. Unchanged plans return the source as is.
pub fn render(unit: &ParsedUnit, plan: &RewritePlan, parser: &mut GoParser) -> Result<String> {
    if !plan.changed {
        return Ok(unit.source().to_string());
    }
    let output = splice(unit, plan)?;
    verify(unit, &output, parser)?;
    Ok(output)
}

fn splice(unit: &ParsedUnit, plan: &RewritePlan) -> Result<String> {
    let source = unit.source();
    let decls = unit.decls();
    if plan.items.len() != decls.len() {
        return Err(Error::render(
            unit.path(),
            format!(
                "rewrite has {} declarations, source has {}",
                plan.items.len(),
                decls.len()
            ),
        ));
    }
    let (Some(first), Some(last)) = (decls.first(), decls.last()) else {
        return Ok(source.to_string());
    };

    let newline = LineEnding::detect(source).as_str();
    let mut out = String::with_capacity(source.len() + newline.len() * decls.len());
    out.push_str(&source[..first.full_span().start]);

    let mut previous: Option<&super::Placed> = None;
    for item in &plan.items {
        let span = unit.decl(item.handle).full_span();
        if let Some(prev) = previous {
            let prev_span = unit.decl(prev.handle).full_span();
            let kept = !prev.relocated
                && !item.relocated
                && prev.handle.index() + 1 == item.handle.index();
            if kept {
                out.push_str(&source[prev_span.end..span.start]);
            } else {
                out.push_str(newline);
                out.push_str(newline);
            }
        }
        out.push_str(unit.text(span));
        previous = Some(item);
    }

    out.push_str(&source[last.full_span().end..]);
    Ok(out)
}

fn verify(unit: &ParsedUnit, output: &str, parser: &mut GoParser) -> Result<()> {
    let reparsed = parser
        .parse(unit.path(), output.to_string())
        .map_err(|e| Error::render(unit.path(), format!("rewritten source does not parse: {e}")))?;

    if reparsed.decls().len() != unit.decls().len() {
        return Err(Error::render(
            unit.path(),
            format!(
                "declaration count changed from {} to {}",
                unit.decls().len(),
                reparsed.decls().len()
            ),
        ));
    }

    let before = method_keys(unit);
    let after = method_keys(&reparsed);
    if before != after {
        return Err(Error::render(
            unit.path(),
            "method set changed during rewrite",
        ));
    }
    Ok(())
}

fn method_keys(unit: &ParsedUnit) -> Vec<MethodKey> {
    let mut keys: Vec<MethodKey> = extract_methods(unit).iter().map(|m| m.key()).collect();
    keys.sort();
    keys
}
