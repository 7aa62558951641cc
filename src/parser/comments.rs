//! Comment ownership for top-level declarations.
//!
//! Follows Go's conventions: a comment group that ends on the line directly
//! above a declaration is that declaration's doc comment, a comment starting
//! on the line where a declaration ends is its trailing comment, and every
//! other comment group stands alone.

use super::{CommentBlock, DeclKind, Span, TopLevelDecl};
use tree_sitter::Node;

struct RawItem {
    node_index: usize,
    kind: DeclKind,
    span: Span,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Role {
    Unassigned,
    Doc,
    Trailing,
}

pub(super) fn associate(root: Node) -> Vec<TopLevelDecl> {
    let mut cursor = root.walk();
    let raw: Vec<RawItem> = root
        .named_children(&mut cursor)
        .enumerate()
        .map(|(node_index, node)| RawItem {
            node_index,
            kind: DeclKind::from_node_kind(node.kind()),
            span: Span::of(node),
        })
        .collect();

    let mut roles = vec![Role::Unassigned; raw.len()];
    let trailing = mark_trailing(&raw, &mut roles);
    let docs = mark_docs(&raw, &mut roles);

    let mut decls = Vec::with_capacity(raw.len());
    let mut i = 0;
    while i < raw.len() {
        let item = &raw[i];
        if item.kind != DeclKind::Comment {
            decls.push(TopLevelDecl {
                kind: item.kind,
                node_index: item.node_index,
                span: item.span,
                doc: docs[i],
                trailing: trailing[i],
            });
            i += 1;
            continue;
        }
        if roles[i] != Role::Unassigned {
            i += 1;
            continue;
        }
        // Freestanding: merge with following unassigned comments that are not
        // separated by a blank line.
        let start = i;
        let mut end = i;
        while end + 1 < raw.len()
            && raw[end + 1].kind == DeclKind::Comment
            && roles[end + 1] == Role::Unassigned
            && adjacent(raw[end].span, raw[end + 1].span)
        {
            end += 1;
        }
        decls.push(TopLevelDecl {
            kind: DeclKind::Comment,
            node_index: raw[start].node_index,
            span: raw[start].span.cover(raw[end].span),
            doc: None,
            trailing: None,
        });
        i = end + 1;
    }
    decls
}

/// No blank line between `a` and `b`.
fn adjacent(a: Span, b: Span) -> bool {
    b.start_row <= a.end_row + 1
}

fn mark_trailing(raw: &[RawItem], roles: &mut [Role]) -> Vec<Option<CommentBlock>> {
    let mut trailing = vec![None; raw.len()];
    for (i, item) in raw.iter().enumerate() {
        if item.kind == DeclKind::Comment {
            continue;
        }
        let mut j = i + 1;
        let mut block: Option<CommentBlock> = None;
        while j < raw.len()
            && raw[j].kind == DeclKind::Comment
            && raw[j].span.start_row == item.span.end_row
        {
            roles[j] = Role::Trailing;
            block = Some(match block {
                Some(b) => CommentBlock {
                    span: b.span.cover(raw[j].span),
                    count: b.count + 1,
                },
                None => CommentBlock {
                    span: raw[j].span,
                    count: 1,
                },
            });
            j += 1;
        }
        trailing[i] = block;
    }
    trailing
}

fn mark_docs(raw: &[RawItem], roles: &mut [Role]) -> Vec<Option<CommentBlock>> {
    let mut docs = vec![None; raw.len()];
    for (i, item) in raw.iter().enumerate() {
        if matches!(item.kind, DeclKind::Comment | DeclKind::Other) || i == 0 {
            continue;
        }
        let mut first = i;
        let mut next_start_row = item.span.start_row;
        while first > 0 {
            let candidate = &raw[first - 1];
            if candidate.kind != DeclKind::Comment || roles[first - 1] != Role::Unassigned {
                break;
            }
            if candidate.span.end_row + 1 < next_start_row {
                break;
            }
            next_start_row = candidate.span.start_row;
            first -= 1;
        }
        if first == i {
            continue;
        }
        let mut span = raw[first].span;
        for (offset, role) in roles[first..i].iter_mut().enumerate() {
            *role = Role::Doc;
            span = span.cover(raw[first + offset].span);
        }
        docs[i] = Some(CommentBlock {
            span,
            count: i - first,
        });
    }
    docs
}
