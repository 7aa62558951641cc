//! Declaration reordering.
//!
//! A rewrite is a pure function from a parsed unit and a target method order
//! to a new sequence of declaration handles. Comments are owned by the
//! declarations they document, so moving a handle moves its doc and trailing
//! comments with it and nothing else is ever touched.

pub mod render;

pub use render::{render, LineEnding};

use crate::config::MethodPlacement;
use crate::core::MethodRecord;
use crate::errors::{Error, Result};
use crate::parser::{DeclHandle, DeclKind, ParsedUnit};

/// One slot of the rewritten file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placed {
    pub handle: DeclHandle,
    /// Part of the sorted method run
    pub relocated: bool,
}

/// The new top-level order of a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewritePlan {
    pub items: Vec<Placed>,
    pub changed: bool,
}

impl RewritePlan {
    /// The original order, nothing relocated.
    pub fn identity(unit: &ParsedUnit) -> Self {
        Self {
            items: unit
                .handles()
                .map(|handle| Placed {
                    handle,
                    relocated: false,
                })
                .collect(),
            changed: false,
        }
    }

    pub fn handles(&self) -> impl Iterator<Item = DeclHandle> + '_ {
        self.items.iter().map(|item| item.handle)
    }
}

/// Place the methods of `sorted` as one contiguous run, in that order, and
/// keep every other declaration in its original relative order.
pub fn plan_rewrite(
    unit: &ParsedUnit,
    sorted: &[MethodRecord],
    placement: MethodPlacement,
    changed: bool,
) -> Result<RewritePlan> {
    let mut in_run = vec![false; unit.decls().len()];
    for method in sorted {
        let index = method.handle.index();
        let Some(decl) = unit.decls().get(index) else {
            return Err(Error::Invariant(format!(
                "{}: method {} points past the declaration list",
                unit.path().display(),
                method.key()
            )));
        };
        if decl.kind != DeclKind::Method || in_run[index] {
            return Err(Error::Invariant(format!(
                "{}: method {} does not map to a unique method declaration",
                unit.path().display(),
                method.key()
            )));
        }
        in_run[index] = true;
    }

    let run = sorted.iter().map(|method| Placed {
        handle: method.handle,
        relocated: true,
    });
    let rest: Vec<Placed> = unit
        .handles()
        .filter(|handle| !in_run[handle.index()])
        .map(|handle| Placed {
            handle,
            relocated: false,
        })
        .collect();

    let split = match placement {
        // Freestanding comments closing the file stay after the methods.
        MethodPlacement::End => {
            let last_method = in_run.iter().rposition(|m| *m).unwrap_or(0);
            let trailing = rest
                .iter()
                .rev()
                .take_while(|item| {
                    item.handle.index() > last_method
                        && unit.decl(item.handle).kind == DeclKind::Comment
                })
                .count();
            rest.len() - trailing
        }
        MethodPlacement::FirstMethod => {
            let first_method = in_run.iter().position(|m| *m).unwrap_or(in_run.len());
            rest.iter()
                .take_while(|item| item.handle.index() < first_method)
                .count()
        }
    };

    let mut items = Vec::with_capacity(unit.decls().len());
    items.extend_from_slice(&rest[..split]);
    items.extend(run);
    items.extend_from_slice(&rest[split..]);

    Ok(RewritePlan { items, changed })
}
