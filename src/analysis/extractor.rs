//! Declaration extractor: turns method declarations into [`MethodRecord`]s.

use crate::core::{is_exported, MethodRecord};
use crate::parser::{DeclHandle, DeclKind, ParsedUnit};
use tree_sitter::Node;

/// Collect every classifiable method in first-appearance order.
///
/// Declarations that do not look like a method bound to exactly one named
/// receiver type are skipped; the rewriter treats them like any other
/// non-method declaration.
pub fn extract_methods(unit: &ParsedUnit) -> Vec<MethodRecord> {
    let mut methods = Vec::new();
    for handle in unit.handles() {
        if unit.decl(handle).kind != DeclKind::Method {
            continue;
        }
        let Some(node) = unit.node(handle) else {
            continue;
        };
        match classify(unit, handle, node, methods.len()) {
            Some(record) => methods.push(record),
            None => log::debug!(
                "{}:{}: unclassifiable method declaration left in place",
                unit.path().display(),
                node.start_position().row + 1
            ),
        }
    }
    methods
}

fn classify(
    unit: &ParsedUnit,
    handle: DeclHandle,
    node: Node,
    original_order: usize,
) -> Option<MethodRecord> {
    let name = unit.node_text(node.child_by_field_name("name")?);
    if name.is_empty() {
        return None;
    }

    let receiver = single_receiver(node.child_by_field_name("receiver")?)?;
    let type_node = receiver.child_by_field_name("type")?;
    let receiver_type = receiver_type_name(unit, type_node, true)?;

    let mut cursor = receiver.walk();
    let names: Vec<&str> = receiver
        .children_by_field_name("name", &mut cursor)
        .map(|n| unit.node_text(n))
        .collect();
    let receiver_ident = match names.as_slice() {
        [] | ["_"] => None,
        [ident] => Some((*ident).to_string()),
        _ => return None,
    };

    Some(MethodRecord {
        name: name.to_string(),
        receiver_type: receiver_type.to_string(),
        receiver_display: unit.node_text(type_node).to_string(),
        receiver_ident,
        is_exported: is_exported(name),
        original_order,
        in_degree: 0,
        max_depth: 0,
        handle,
    })
}

/// The only parameter declaration of a receiver list, if there is exactly one.
fn single_receiver(list: Node) -> Option<Node> {
    let mut cursor = list.walk();
    let mut params = list
        .named_children(&mut cursor)
        .filter(|child| child.kind() != "comment");
    let first = params.next()?;
    if params.next().is_some() || first.kind() != "parameter_declaration" {
        return None;
    }
    Some(first)
}

/// Grouping name of a receiver type: parentheses and type arguments are
/// dropped and at most one pointer level is unwrapped.
fn receiver_type_name<'a>(
    unit: &'a ParsedUnit,
    node: Node,
    allow_pointer: bool,
) -> Option<&'a str> {
    match node.kind() {
        "type_identifier" => Some(unit.node_text(node)).filter(|name| !name.is_empty()),
        "parenthesized_type" => receiver_type_name(unit, node.named_child(0)?, allow_pointer),
        "pointer_type" if allow_pointer => receiver_type_name(unit, node.named_child(0)?, false),
        "generic_type" => receiver_type_name(unit, node.child_by_field_name("type")?, false),
        _ => None,
    }
}
